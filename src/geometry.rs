//! Positional transforms over regions, quadrants and column stripes
//!
//! Unlike the point transforms these depend on where a pixel sits. They follow
//! the same allocate-and-return contract.

use log::debug;
use crate::buffer::{clamp_channel, Channel, Color, PixelBuffer, CHANNELS};
use crate::point::rgb_mean;
use crate::region::Selection;
use crate::stats::{cumulative, histogram};

/// Width of each painted column in [`paint_columns`].
pub const PAINTED_COLUMN_WIDTH: u32 = 3;

/// Greyscale alternate vertical stripes
///
/// The buffer is cut into stripes `width / columns` pixels wide starting at
/// the left edge; stripes with an even index (0, 2, ...) become the unweighted
/// grey mean, odd ones keep their color. Leftover pixels on the right form a
/// trailing partial stripe.
pub fn greyscale_columns(buf: &PixelBuffer, columns: u32) -> PixelBuffer {
    let mut out = buf.clone();
    let stripe = if columns == 0 { 0 } else { buf.width() / columns };
    debug!("greyscale_columns: {} columns of {}px", columns, stripe);
    if stripe == 0 {
        return out;
    }

    let width = buf.width() as usize;
    for (n, px) in out.data_mut().chunks_exact_mut(CHANNELS).enumerate() {
        let x = (n % width) as u32;
        if (x / stripe) % 2 == 0 {
            let grey = clamp_channel(rgb_mean(px));
            px[..3].fill(grey);
        }
    }

    out
}

/// Flip the selected rectangle upside down (RGB only)
///
/// Rows outside the buffer neither contribute nor receive pixels.
pub fn mirror_region_vertical(buf: &PixelBuffer, selection: &Selection) -> PixelBuffer {
    let mut out = buf.clone();
    let b = selection.bounds();
    debug!("mirror_region_vertical: {:?}", b);

    let Some(visible) = b.clip_to(buf.width(), buf.height()) else {
        return out;
    };

    for y in visible.min_y..=visible.max_y {
        let src_y = b.max_y - (y - b.min_y);
        if src_y >= buf.height() {
            continue;
        }
        for x in visible.min_x..=visible.max_x {
            let i = out.index(x, y);
            let j = buf.index(x, src_y);
            out.data_mut()[i..i + 3].copy_from_slice(&buf.data()[j..j + 3]);
        }
    }

    out
}

/// Rotate the chosen quadrants by 180 degrees, each within its own bounds
///
/// Quadrants are numbered 1 (top-left), 2 (top-right), 3 (bottom-left) and
/// 4 (bottom-right); other numbers are ignored. The split point is
/// `ceil(width / 2), ceil(height / 2)` and the quadrants tile the buffer
/// without overlap: on an odd height the middle row belongs to the top
/// quadrants only. All four channels move.
pub fn rotate_quadrants(buf: &PixelBuffer, quadrants: &[u8]) -> PixelBuffer {
    let mut out = buf.clone();
    let (width, height) = buf.dimensions();
    let mid_x = width.div_ceil(2);
    let mid_y = height.div_ceil(2);
    debug!("rotate_quadrants: {:?} split at ({}, {})", quadrants, mid_x, mid_y);

    let rects = [
        (0, 0, mid_x, mid_y),
        (mid_x, 0, width, mid_y),
        (0, mid_y, mid_x, height),
        (mid_x, mid_y, width, height),
    ];

    for (quadrant, &(x0, y0, x1, y1)) in (1u8..).zip(rects.iter()) {
        if !quadrants.contains(&quadrant) {
            continue;
        }
        for y in y0..y1 {
            for x in x0..x1 {
                let i = out.index(x, y);
                let j = buf.index(x0 + x1 - 1 - x, y0 + y1 - 1 - y);
                out.data_mut()[i..i + CHANNELS].copy_from_slice(&buf.data()[j..j + CHANNELS]);
            }
        }
    }

    out
}

/// Paint full-height columns 3 pixels wide, one every `3 + gutter` pixels
///
/// Each column sits at the right end of its `3 + gutter` cell, so the gutter
/// precedes it. Only complete cells get a column. A gutter so wide that the
/// cell size overflows leaves the buffer unchanged.
pub fn paint_columns(buf: &PixelBuffer, color: Color, gutter: u32) -> PixelBuffer {
    let mut out = buf.clone();
    let Some(cell) = PAINTED_COLUMN_WIDTH.checked_add(gutter) else {
        debug!("paint_columns: gutter {} too wide", gutter);
        return out;
    };
    let cells = buf.width() / cell;
    debug!("paint_columns: {} cells of {}px", cells, cell);

    for n in 1..=cells {
        for offset in 1..=PAINTED_COLUMN_WIDTH {
            let x = cell * n - offset;
            for y in 0..buf.height() {
                out.put_pixel(x, y, color);
            }
        }
    }

    out
}

/// Invert the top half and greyscale the bottom half
///
/// The split is row aligned: rows above `height / 2` (rounded down) get the
/// negative, the rest get the unweighted grey mean. Alpha is untouched.
pub fn negative_top_grey_bottom(buf: &PixelBuffer) -> PixelBuffer {
    let mut out = buf.clone();
    let middle = buf.height() / 2;
    debug!("negative_top_grey_bottom: split at row {}", middle);

    let row_bytes = buf.width() as usize * CHANNELS;
    let split = (middle as usize * row_bytes).min(out.data().len());
    let (top, bottom) = out.data_mut().split_at_mut(split);

    for px in top.chunks_exact_mut(CHANNELS) {
        for v in px[..3].iter_mut() {
            *v = 255 - *v;
        }
    }
    for px in bottom.chunks_exact_mut(CHANNELS) {
        let grey = clamp_channel(rgb_mean(px));
        px[..3].fill(grey);
    }

    out
}

/// Equalize everything above the main diagonal and draw the diagonal
///
/// For column `x` the diagonal sits at row `floor(height * x / width)`; that
/// pixel becomes opaque black and every pixel above it in the column is
/// remapped through `255 * cdf(level) / pixel_count`, each channel through its
/// own cumulative histogram. The histogram is taken over the whole buffer
/// before anything is drawn. Pixels below the diagonal are untouched.
pub fn equalize_above_diagonal(buf: &PixelBuffer) -> PixelBuffer {
    let mut out = buf.clone();
    if buf.is_empty() {
        return out;
    }

    let (width, height) = buf.dimensions();
    let cdf = cumulative(&histogram(buf));
    let scale = 255.0 / buf.pixel_count() as f64;
    debug!("equalize_above_diagonal: {}x{} scale={}", width, height, scale);

    for x in 0..width {
        let diagonal_y = (u64::from(height) * u64::from(x) / u64::from(width)) as u32;
        for y in 0..diagonal_y {
            let i = out.index(x, y);
            let px = &mut out.data_mut()[i..i + CHANNELS];
            for channel in Channel::ALL {
                let c = channel.offset();
                px[c] = clamp_channel(scale * f64::from(cdf[px[c]].get(channel)));
            }
        }
        out.put_pixel(x, diagonal_y, Color::BLACK);
    }

    out
}
