//! Pixel buffer transformation engine
//!
//! Pure, single-threaded transforms over RGBA buffers for an interactive
//! image editor: histograms, point transforms, median noise removal,
//! two-buffer blending, histogram equalization and selection outlines. Every
//! transform borrows its inputs and returns a newly allocated buffer.
//!
//! The editor's window, dialogs and pointer tracking live outside this crate;
//! they hand buffers in and display whatever comes back.

pub mod blend;
pub mod buffer;
pub mod denoise;
pub mod equalize;
pub mod error;
pub mod geometry;
pub mod inspect;
pub mod io;
pub mod ops;
pub mod point;
pub mod region;
pub mod stats;

pub use blend::{blend, BlendMode};
pub use buffer::{Channel, Color, PixelBuffer};
pub use denoise::{denoise, Topology};
pub use equalize::equalize;
pub use error::{Result, WorkbenchError};
pub use geometry::{
    equalize_above_diagonal, greyscale_columns, mirror_region_vertical, negative_top_grey_bottom,
    paint_columns, rotate_quadrants,
};
pub use inspect::{
    classify_shape, count_solid_black_objects, is_rectangle_filled, is_rectangle_open,
    pure_colors_in_region, PureColors, Shape,
};
pub use ops::{apply, process_image, Operation, ProcessResult, Recipe};
pub use point::{greyscale, negative, threshold, GreyWeights};
pub use region::{draw_border, BorderStyle, Bounds, Selection};
pub use stats::{cumulative, histogram, ChannelCounts, CumulativeHistogram, Histogram};
