//! Point transforms
//!
//! Each output pixel depends only on the same input pixel. Alpha is never
//! touched by any of these.

use log::debug;
use serde::{Deserialize, Serialize};
use crate::buffer::{clamp_channel, PixelBuffer, CHANNELS};

/// Per-channel contributions for weighted greyscale, as percentages (0-100)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GreyWeights {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Default for GreyWeights {
    fn default() -> Self {
        Self { r: 100, g: 100, b: 100 }
    }
}

/// Divisor of the weighted mean: three channels at up to 100% each.
const WEIGHTED_DIVISOR: f64 = 300.0;

pub(crate) fn rgb_mean(px: &[u8]) -> f64 {
    (f64::from(px[0]) + f64::from(px[1]) + f64::from(px[2])) / 3.0
}

/// Apply `f` to the RGB bytes of every pixel of a copy of `buf`
fn map_rgb(buf: &PixelBuffer, mut f: impl FnMut(&mut [u8])) -> PixelBuffer {
    let mut out = buf.clone();
    for px in out.data_mut().chunks_exact_mut(CHANNELS) {
        f(&mut px[..3]);
    }
    out
}

/// Invert every color channel: `255 - value`
///
/// Applying it twice restores the original RGB exactly.
pub fn negative(buf: &PixelBuffer) -> PixelBuffer {
    debug!("negative: {}x{}", buf.width(), buf.height());
    map_rgb(buf, |rgb| {
        for v in rgb.iter_mut() {
            *v = 255 - *v;
        }
    })
}

/// Binarize on the unweighted RGB mean
///
/// Pixels whose mean is below `level` become black, all others white
/// (a mean equal to `level` is white).
pub fn threshold(buf: &PixelBuffer, level: u8) -> PixelBuffer {
    debug!("threshold: {}x{} at {}", buf.width(), buf.height(), level);
    let level = f64::from(level);
    map_rgb(buf, |rgb| {
        let value = if rgb_mean(rgb) < level { 0 } else { 255 };
        rgb.fill(value);
    })
}

/// Desaturate
///
/// Without weights each channel becomes the arithmetic mean of r, g and b.
/// With weights the grey tone is `(r*wr + g*wg + b*wb) / 300`; the divisor is
/// fixed and does not depend on the weights chosen.
pub fn greyscale(buf: &PixelBuffer, weights: Option<GreyWeights>) -> PixelBuffer {
    debug!("greyscale: {}x{} weights={:?}", buf.width(), buf.height(), weights);
    match weights {
        None => map_rgb(buf, |rgb| {
            let grey = clamp_channel(rgb_mean(rgb));
            rgb.fill(grey);
        }),
        Some(w) => map_rgb(buf, |rgb| {
            let sum = f64::from(rgb[0]) * f64::from(w.r)
                + f64::from(rgb[1]) * f64::from(w.g)
                + f64::from(rgb[2]) * f64::from(w.b);
            let grey = clamp_channel(sum / WEIGHTED_DIVISOR);
            rgb.fill(grey);
        }),
    }
}
