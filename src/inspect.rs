//! Read-only queries over a buffer

use log::debug;
use serde::Serialize;
use crate::buffer::{Color, PixelBuffer};
use crate::region::Selection;

/// Which opaque primaries occur in a region
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PureColors {
    pub red: bool,
    pub green: bool,
    pub blue: bool,
}

/// Shape recognised by [`classify_shape`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Shape {
    Circle,
    Square,
    Unrecognized,
}

fn is_solid_black_at(buf: &PixelBuffer, (x, y): (u32, u32)) -> bool {
    buf.pixel(x, y).is_some_and(Color::is_solid_black)
}

/// First opaque pure-black pixel in row-major order
fn first_solid_black(buf: &PixelBuffer) -> Option<(u32, u32)> {
    let width = buf.width();
    buf.pixels()
        .position(|px| Color::from([px[0], px[1], px[2], px[3]]).is_solid_black())
        .map(|n| (n as u32 % width, n as u32 / width))
}

fn step((x, y): (u32, u32), (dx, dy): (i32, i32)) -> Option<(u32, u32)> {
    Some((x.checked_add_signed(dx)?, y.checked_add_signed(dy)?))
}

/// Whether the single black rectangle on the buffer is filled
///
/// An outline is one pixel wide, so a filled rectangle is recognised by the
/// pixel diagonally below-right of its top-left corner also being black.
pub fn is_rectangle_filled(buf: &PixelBuffer) -> bool {
    let filled = first_solid_black(buf)
        .and_then(|corner| step(corner, (1, 1)))
        .is_some_and(|p| is_solid_black_at(buf, p));
    debug!("is_rectangle_filled: {}", filled);
    filled
}

/// Tell a black circle from a black square by its topmost-leftmost pixel
///
/// The top of a circle curves outwards, so the pixel below-left of its first
/// black pixel is black too; a square continues straight down instead.
pub fn classify_shape(buf: &PixelBuffer) -> Shape {
    let shape = match first_solid_black(buf) {
        Some(first) if step(first, (-1, 1)).is_some_and(|p| is_solid_black_at(buf, p)) => Shape::Circle,
        Some(first) if step(first, (0, 1)).is_some_and(|p| is_solid_black_at(buf, p)) => Shape::Square,
        _ => Shape::Unrecognized,
    };
    debug!("classify_shape: {:?}", shape);
    shape
}

/// Whether the black rectangle outline on the buffer has a gap
///
/// Starting at the top-left corner the outline is followed right, down, left
/// and up, each edge as far as it stays black. The outline is closed when the
/// walk ends back on the corner. A buffer with no black pixel counts as open.
pub fn is_rectangle_open(buf: &PixelBuffer) -> bool {
    let Some(corner) = first_solid_black(buf) else {
        debug!("is_rectangle_open: no outline");
        return true;
    };

    let mut at = corner;
    for dir in [(1, 0), (0, 1), (-1, 0), (0, -1)] {
        let mut moved = false;
        while let Some(next) = step(at, dir).filter(|&p| is_solid_black_at(buf, p)) {
            at = next;
            moved = true;
        }
        if !moved {
            debug!("is_rectangle_open: edge broken at {:?}", at);
            return true;
        }
    }

    let open = at != corner;
    debug!("is_rectangle_open: {}", open);
    open
}

/// Count 4-connected groups of opaque pure-black pixels
pub fn count_solid_black_objects(buf: &PixelBuffer) -> usize {
    let (width, height) = buf.dimensions();
    let is_black = |x: u32, y: u32| buf.pixel(x, y).is_some_and(Color::is_solid_black);

    let mut visited = vec![false; buf.pixel_count()];
    let mut stack: Vec<(u32, u32)> = Vec::new();
    let mut objects = 0;

    for y in 0..height {
        for x in 0..width {
            let idx = x as usize + y as usize * width as usize;
            if visited[idx] || !is_black(x, y) {
                continue;
            }

            objects += 1;
            visited[idx] = true;
            stack.push((x, y));

            while let Some((cx, cy)) = stack.pop() {
                let neighbors = [
                    (cx.wrapping_sub(1), cy),
                    (cx + 1, cy),
                    (cx, cy.wrapping_sub(1)),
                    (cx, cy + 1),
                ];
                for (nx, ny) in neighbors {
                    // wrapping_sub lands far outside, which `pixel` rejects
                    if !is_black(nx, ny) {
                        continue;
                    }
                    let nidx = nx as usize + ny as usize * width as usize;
                    if !visited[nidx] {
                        visited[nidx] = true;
                        stack.push((nx, ny));
                    }
                }
            }
        }
    }

    debug!("count_solid_black_objects: {}", objects);
    objects
}

/// Report which of opaque pure red, green and blue appear in the selection
pub fn pure_colors_in_region(buf: &PixelBuffer, selection: &Selection) -> PureColors {
    let b = selection.bounds();
    let mut found = PureColors::default();
    let Some(visible) = b.clip_to(buf.width(), buf.height()) else {
        return found;
    };

    for y in visible.min_y..=visible.max_y {
        for x in visible.min_x..=visible.max_x {
            match buf.pixel(x, y) {
                Some(Color { r: 255, g: 0, b: 0, a: 255 }) => found.red = true,
                Some(Color { r: 0, g: 255, b: 0, a: 255 }) => found.green = true,
                Some(Color { r: 0, g: 0, b: 255, a: 255 }) => found.blue = true,
                _ => {}
            }
        }
    }

    debug!("pure_colors_in_region: {:?} -> {:?}", b, found);
    found
}
