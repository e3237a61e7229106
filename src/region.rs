//! Rectangular selections and their on-screen outline
//!
//! The front-end tracks a drag as a [`Selection`]: the start point is fixed on
//! press, the end point follows the pointer. While dragging it redraws the
//! untouched source buffer through [`draw_border`] so the outline never
//! accumulates.

use log::debug;
use serde::{Deserialize, Serialize};
use crate::buffer::{Color, PixelBuffer};

/// Two corner points in any order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub start: (u32, u32),
    pub end: (u32, u32),
}

/// Normalized inclusive rectangle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Bounds {
    pub min_x: u32,
    pub min_y: u32,
    pub max_x: u32,
    pub max_y: u32,
}

impl Bounds {
    /// Distance between the left and right edges
    pub fn span_x(&self) -> u32 {
        self.max_x - self.min_x
    }

    /// Distance between the top and bottom edges
    pub fn span_y(&self) -> u32 {
        self.max_y - self.min_y
    }

    /// Part of the rectangle inside a `width` x `height` buffer, or `None`
    /// when they do not overlap
    pub fn clip_to(&self, width: u32, height: u32) -> Option<Bounds> {
        if self.min_x > self.max_x || self.min_y > self.max_y {
            return None;
        }
        if self.min_x >= width || self.min_y >= height {
            return None;
        }
        Some(Bounds {
            min_x: self.min_x,
            min_y: self.min_y,
            max_x: self.max_x.min(width - 1),
            max_y: self.max_y.min(height - 1),
        })
    }
}

impl Selection {
    /// Selection collapsed onto a single point, as on pointer press
    pub fn new(x: u32, y: u32) -> Self {
        Self {
            start: (x, y),
            end: (x, y),
        }
    }

    pub fn from_corners(start: (u32, u32), end: (u32, u32)) -> Self {
        Self { start, end }
    }

    /// Move the end point, as on pointer drag
    pub fn update_end(&mut self, x: u32, y: u32) {
        self.end = (x, y);
    }

    pub fn bounds(&self) -> Bounds {
        Bounds {
            min_x: self.start.0.min(self.end.0),
            min_y: self.start.1.min(self.end.1),
            max_x: self.start.0.max(self.end.0),
            max_y: self.start.1.max(self.end.1),
        }
    }
}

/// Outline appearance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BorderStyle {
    /// Border color (default: (0, 102, 204, 255) - selection blue)
    pub color: Color,
    /// Border width in pixels (default: 1)
    pub width: u32,
}

impl Default for BorderStyle {
    fn default() -> Self {
        Self {
            color: Color::rgb(0, 102, 204),
            width: 1,
        }
    }
}

/// Draw a rectangular outline of uniform width around the selection
///
/// The width is capped at the smaller span of the selection so thin
/// selections are not overdrawn. Top and bottom bands span the full width of
/// the selection, left and right bands only the rows between them. Only the
/// part of each band inside the buffer is visited.
pub fn draw_border(buf: &PixelBuffer, selection: &Selection, style: &BorderStyle) -> PixelBuffer {
    let mut out = buf.clone();
    let b = selection.bounds();
    let width = style.width.min(b.span_x()).min(b.span_y());
    debug!("draw_border: {:?} width={} color={:?}", b, width, style.color);

    if width == 0 {
        return out;
    }

    let bands = [
        // top, bottom
        (b.min_x, b.min_y, b.max_x, b.min_y + width - 1),
        (b.min_x, b.max_y - (width - 1), b.max_x, b.max_y),
        // left, right
        (b.min_x, b.min_y + width, b.min_x + width - 1, b.max_y - width),
        (b.max_x - (width - 1), b.min_y + width, b.max_x, b.max_y - width),
    ];

    for (min_x, min_y, max_x, max_y) in bands {
        let band = Bounds { min_x, min_y, max_x, max_y };
        if let Some(clipped) = band.clip_to(out.width(), out.height()) {
            fill(&mut out, &clipped, style.color);
        }
    }

    out
}

fn fill(buf: &mut PixelBuffer, b: &Bounds, color: Color) {
    for y in b.min_y..=b.max_y {
        for x in b.min_x..=b.max_x {
            buf.put_pixel(x, y, color);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Color = Color::rgb(255, 0, 0);

    fn count(buf: &PixelBuffer, color: Color) -> usize {
        buf.pixels().filter(|px| Color::from([px[0], px[1], px[2], px[3]]) == color).count()
    }

    #[test]
    fn test_bounds_normalize_any_corner_order() {
        let sel = Selection::from_corners((7, 2), (3, 9));
        let b = sel.bounds();
        assert_eq!((b.min_x, b.min_y, b.max_x, b.max_y), (3, 2, 7, 9));
        assert_eq!((b.span_x(), b.span_y()), (4, 7));
    }

    #[test]
    fn test_drag_updates_end_point() {
        let mut sel = Selection::new(4, 4);
        assert_eq!(sel.bounds().span_x(), 0);
        sel.update_end(1, 6);
        assert_eq!(sel.start, (4, 4));
        assert_eq!(sel.bounds().min_x, 1);
        assert_eq!(sel.bounds().max_y, 6);
    }

    #[test]
    fn test_outer_ring_of_4x4() {
        let buf = PixelBuffer::filled(4, 4, Color::BLACK);
        let style = BorderStyle { color: RED, width: 1 };
        let out = draw_border(&buf, &Selection::from_corners((0, 0), (3, 3)), &style);
        assert_eq!(count(&out, RED), 12);
        for (x, y) in [(1, 1), (2, 1), (1, 2), (2, 2)] {
            assert_eq!(out.pixel(x, y), Some(Color::BLACK));
        }
    }

    #[test]
    fn test_reversed_corners_draw_same_outline() {
        let buf = PixelBuffer::filled(6, 6, Color::BLACK);
        let style = BorderStyle { color: RED, width: 1 };
        let a = draw_border(&buf, &Selection::from_corners((1, 1), (4, 5)), &style);
        let b = draw_border(&buf, &Selection::from_corners((4, 5), (1, 1)), &style);
        assert_eq!(a, b);
    }

    #[test]
    fn test_width_capped_by_thin_selection() {
        let buf = PixelBuffer::filled(10, 10, Color::BLACK);
        let style = BorderStyle { color: RED, width: 5 };
        // span_y = 2 caps the width at 2: rows 1..=3 all filled
        let out = draw_border(&buf, &Selection::from_corners((1, 1), (8, 3)), &style);
        assert_eq!(count(&out, RED), 8 * 3);
    }

    #[test]
    fn test_thick_border_leaves_interior() {
        let buf = PixelBuffer::filled(8, 8, Color::BLACK);
        let style = BorderStyle { color: RED, width: 2 };
        let out = draw_border(&buf, &Selection::from_corners((0, 0), (7, 7)), &style);
        assert_eq!(count(&out, RED), 64 - 16);
        assert_eq!(out.pixel(2, 2), Some(Color::BLACK));
        assert_eq!(out.pixel(5, 5), Some(Color::BLACK));
        assert_eq!(out.pixel(1, 4), Some(RED));
    }

    #[test]
    fn test_point_selection_draws_nothing() {
        let buf = PixelBuffer::filled(3, 3, Color::BLACK);
        let out = draw_border(&buf, &Selection::new(1, 1), &BorderStyle::default());
        assert_eq!(out, buf);
    }

    #[test]
    fn test_out_of_bounds_corner_is_clipped() {
        let buf = PixelBuffer::filled(4, 4, Color::BLACK);
        let style = BorderStyle { color: RED, width: 1 };
        let out = draw_border(&buf, &Selection::from_corners((1, 1), (9, 9)), &style);
        // Only the top row (x 1..=3) and left column (y 2..=3) land inside
        assert_eq!(count(&out, RED), 3 + 2);
    }

    #[test]
    fn test_selection_far_past_buffer_stays_cheap() {
        let buf = PixelBuffer::filled(4, 4, Color::BLACK);
        let style = BorderStyle { color: RED, width: 1 };
        let out = draw_border(&buf, &Selection::from_corners((0, 0), (u32::MAX, u32::MAX)), &style);
        // top row and left column; the far edges lie outside
        assert_eq!(count(&out, RED), 4 + 3);
        assert_eq!(out.pixel(3, 3), Some(Color::BLACK));
    }

    #[test]
    fn test_clip_to_buffer() {
        let b = Selection::from_corners((2, 1), (40, 3)).bounds();
        let clipped = b.clip_to(5, 5).unwrap();
        assert_eq!((clipped.min_x, clipped.min_y, clipped.max_x, clipped.max_y), (2, 1, 4, 3));
        assert!(Selection::from_corners((6, 0), (9, 2)).bounds().clip_to(5, 5).is_none());
        assert!(b.clip_to(0, 0).is_none());
    }

    #[test]
    fn test_default_style() {
        let style = BorderStyle::default();
        assert_eq!(style.color, Color::rgba(0, 102, 204, 255));
        assert_eq!(style.width, 1);
    }
}
