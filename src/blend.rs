//! Weighted blend of two buffers
//!
//! The buffers need not share dimensions: the output covers their overlapping
//! top-left region, `min(width) x min(height)`. The result is a fresh
//! composite, so every output pixel is fully opaque.

use log::debug;
use serde::{Deserialize, Serialize};
use crate::buffer::{clamp_channel, PixelBuffer, CHANNELS};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlendMode {
    /// `(a*pct_a + b*pct_b) / 100`
    Sum,
    /// `(a*pct_a - b*pct_b) / 100`, negative results saturate to 0
    Sub,
}

/// Blend the r, g and b of two buffers with percentage weights (0-100)
pub fn blend(a: &PixelBuffer, b: &PixelBuffer, pct_a: u8, pct_b: u8, mode: BlendMode) -> PixelBuffer {
    let width = a.width().min(b.width());
    let height = a.height().min(b.height());
    debug!(
        "blend: {}x{} + {}x{} -> {}x{} ({}% {:?} {}%)",
        a.width(),
        a.height(),
        b.width(),
        b.height(),
        width,
        height,
        pct_a,
        mode,
        pct_b
    );

    let wa = f64::from(pct_a);
    let wb = f64::from(pct_b);
    let sign = match mode {
        BlendMode::Sum => 1.0,
        BlendMode::Sub => -1.0,
    };

    let mut out = PixelBuffer::new(width, height);
    let (src_a, src_b) = (a.data(), b.data());

    for y in 0..height {
        for x in 0..width {
            let i = out.index(x, y);
            let ia = a.index(x, y);
            let ib = b.index(x, y);
            let dst = &mut out.data_mut()[i..i + CHANNELS];
            for c in 0..3 {
                let value = (f64::from(src_a[ia + c]) * wa + sign * f64::from(src_b[ib + c]) * wb) / 100.0;
                dst[c] = clamp_channel(value);
            }
            dst[3] = 255;
        }
    }

    out
}
