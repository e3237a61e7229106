//! Median noise removal
//!
//! Every interior pixel's r, g and b are replaced, channel by channel, by the
//! median of the pixel and a fixed set of neighbours. Median rather than mean
//! removes salt-and-pepper impulses without blurring edges. The outermost
//! rows and columns have incomplete neighbourhoods and are copied unchanged.
//! Alpha is copied unchanged everywhere.
//!
//! The filter runs in place over a copy of the input, column by column (x
//! outer, y inner). Neighbours above and to the left have therefore already
//! been filtered when a pixel is visited; the input buffer itself is never
//! touched.
//!
//! This is the most expensive transform in the crate (a small sort per
//! channel per interior pixel); see [`crate::ops::Operation::is_expensive`].

use log::debug;
use serde::{Deserialize, Serialize};
use crate::buffer::{PixelBuffer, CHANNELS};

/// Neighbourhood sampled around each pixel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Topology {
    /// The pixel and its top, bottom, left and right neighbours (5 samples)
    Cross,
    /// The pixel and its four diagonal neighbours (5 samples)
    #[serde(alias = "x")]
    Diagonal,
    /// The full 3x3 window (9 samples)
    #[serde(rename = "3x3", alias = "full3x3")]
    Full3x3,
}

impl Topology {
    pub fn sample_count(self) -> usize {
        match self {
            Topology::Cross | Topology::Diagonal => CROSS.len(),
            Topology::Full3x3 => FULL_3X3.len(),
        }
    }
}

const CROSS: [(isize, isize); 5] = [(0, 0), (0, -1), (-1, 0), (1, 0), (0, 1)];
const DIAGONAL: [(isize, isize); 5] = [(0, 0), (-1, -1), (1, -1), (-1, 1), (1, 1)];
#[rustfmt::skip]
const FULL_3X3: [(isize, isize); 9] = [
    (-1, -1), (0, -1), (1, -1),
    (-1, 0), (0, 0), (1, 0),
    (-1, 1), (0, 1), (1, 1),
];

/// Remove impulse noise with a median over the chosen neighbourhood
pub fn denoise(buf: &PixelBuffer, topology: Topology) -> PixelBuffer {
    debug!(
        "denoise: {}x{} topology={:?} ({} samples)",
        buf.width(),
        buf.height(),
        topology,
        topology.sample_count()
    );
    match topology {
        Topology::Cross => median_filter(buf, &CROSS),
        Topology::Diagonal => median_filter(buf, &DIAGONAL),
        Topology::Full3x3 => median_filter(buf, &FULL_3X3),
    }
}

/// Median over `N` samples at the given `(dx, dy)` offsets. `N` is odd.
fn median_filter<const N: usize>(buf: &PixelBuffer, offsets: &[(isize, isize); N]) -> PixelBuffer {
    let mut out = buf.clone();
    let (width, height) = buf.dimensions();
    if width < 3 || height < 3 {
        return out;
    }

    let stride = width as isize * CHANNELS as isize;
    let deltas = (*offsets).map(|(dx, dy)| dx * CHANNELS as isize + dy * stride);
    let data = out.data_mut();
    let mut samples = [0u8; N];

    for x in 1..width - 1 {
        for y in 1..height - 1 {
            let i = (x as usize + y as usize * width as usize) * CHANNELS;
            for c in 0..3 {
                let base = (i + c) as isize;
                for (sample, delta) in samples.iter_mut().zip(deltas.iter()) {
                    *sample = data[(base + delta) as usize];
                }
                samples.sort_unstable();
                data[i + c] = samples[N / 2];
            }
        }
    }

    out
}
