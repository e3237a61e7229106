//! Histogram equalization
//!
//! Each channel value is remapped through the channel's cumulative
//! distribution:
//!
//! `new = min_level + cumulative[old] * (shades - 1) / pixel_count`
//!
//! With `valid_shades_only` unset, `shades` is 256 and `min_level` 0, so the
//! output spreads over the full range. With it set, both come from the levels
//! that actually occur in the channel, which stretches contrast onto the
//! observed range instead. A channel holding a single level collapses onto
//! that level.
//!
//! All four channels are remapped. A fully opaque alpha channel maps back to
//! 255 under either policy.

use log::debug;
use crate::buffer::{clamp_channel, Channel, PixelBuffer, CHANNELS};
use crate::stats::{cumulative, histogram, LEVELS};

/// Remap parameters for one channel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ShadeRange {
    shades: usize,
    min_level: u8,
}

pub fn equalize(buf: &PixelBuffer, valid_shades_only: bool) -> PixelBuffer {
    let mut out = buf.clone();
    let n = buf.pixel_count();
    if n == 0 {
        return out;
    }

    let hist = histogram(buf);
    let cum = cumulative(&hist);

    let ranges = Channel::ALL.map(|channel| {
        if valid_shades_only {
            ShadeRange {
                shades: hist.valid_shades(channel),
                min_level: hist.min_level(channel).unwrap_or(0),
            }
        } else {
            ShadeRange {
                shades: LEVELS,
                min_level: 0,
            }
        }
    });
    debug!(
        "equalize: {}x{} valid_shades_only={} ranges={:?}",
        buf.width(),
        buf.height(),
        valid_shades_only,
        ranges
    );

    // One lookup table per channel
    let tables = Channel::ALL.map(|channel| {
        let range = ranges[channel.offset()];
        let scale = (range.shades.saturating_sub(1)) as f64 / n as f64;
        let mut table = [0u8; LEVELS];
        for (level, entry) in table.iter_mut().enumerate() {
            let count = f64::from(cum[level as u8].get(channel));
            *entry = clamp_channel(f64::from(range.min_level) + count * scale);
        }
        table
    });

    for px in out.data_mut().chunks_exact_mut(CHANNELS) {
        for (value, table) in px.iter_mut().zip(tables.iter()) {
            *value = table[*value as usize];
        }
    }

    out
}
