//! Operation Dispatch
//!
//! The front-end describes what it wants as an [`Operation`]: a transform name
//! plus its parameters, deserializable from JSON. This module validates the
//! parameters and the input buffers, then calls the matching transform.
//!
//! The transforms themselves trust their inputs; rejecting empty buffers and
//! out-of-range parameters happens here, once, on behalf of the caller.
//!
//! A [`Recipe`] is an ordered list of operations. [`process_image`] runs one
//! over an image file and writes the result, which is what the harness binary
//! uses.

use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::path::Path;
use crate::blend::{blend, BlendMode};
use crate::buffer::{Color, PixelBuffer};
use crate::denoise::{denoise, Topology};
use crate::equalize::equalize;
use crate::error::{Result, WorkbenchError};
use crate::geometry::{
    equalize_above_diagonal, greyscale_columns, mirror_region_vertical, negative_top_grey_bottom,
    paint_columns, rotate_quadrants, PAINTED_COLUMN_WIDTH,
};
use crate::io::{load_image, save_image};
use crate::point::{greyscale, negative, threshold, GreyWeights};
use crate::region::{draw_border, BorderStyle, Selection};

/// Pixel count above which a denoise run is logged as likely to stall the UI.
pub const SLOW_DENOISE_PIXELS: usize = 2_000_000;

const MAX_PERCENT: u8 = 100;

fn full_percent() -> u8 {
    MAX_PERCENT
}

// ============================================================================
// OPERATIONS
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Operation {
    Negative,
    Threshold {
        level: u8,
    },
    Greyscale {
        /// Omit for the unweighted mean
        #[serde(default)]
        weights: Option<GreyWeights>,
    },
    Denoise {
        topology: Topology,
    },
    /// Blend the working buffer (first operand) with a second buffer
    Blend {
        #[serde(default = "full_percent")]
        pct_a: u8,
        #[serde(default = "full_percent")]
        pct_b: u8,
        mode: BlendMode,
    },
    Equalize {
        #[serde(default)]
        valid_shades_only: bool,
    },
    DrawBorder {
        selection: Selection,
        #[serde(default)]
        style: BorderStyle,
    },
    GreyscaleColumns {
        columns: u32,
    },
    MirrorRegion {
        selection: Selection,
    },
    RotateQuadrants {
        quadrants: Vec<u8>,
    },
    PaintColumns {
        color: Color,
        gutter: u32,
    },
    NegativeTopGreyBottom,
    EqualizeAboveDiagonal,
}

impl Operation {
    pub fn name(&self) -> &'static str {
        match self {
            Operation::Negative => "negative",
            Operation::Threshold { .. } => "threshold",
            Operation::Greyscale { .. } => "greyscale",
            Operation::Denoise { .. } => "denoise",
            Operation::Blend { .. } => "blend",
            Operation::Equalize { .. } => "equalize",
            Operation::DrawBorder { .. } => "draw_border",
            Operation::GreyscaleColumns { .. } => "greyscale_columns",
            Operation::MirrorRegion { .. } => "mirror_region",
            Operation::RotateQuadrants { .. } => "rotate_quadrants",
            Operation::PaintColumns { .. } => "paint_columns",
            Operation::NegativeTopGreyBottom => "negative_top_grey_bottom",
            Operation::EqualizeAboveDiagonal => "equalize_above_diagonal",
        }
    }

    /// Whether the front-end should warn that this may take a while on large
    /// images. The engine itself always runs to completion.
    pub fn is_expensive(&self) -> bool {
        matches!(self, Operation::Denoise { .. })
    }

    /// Whether this operation consumes a second buffer
    pub fn needs_second_buffer(&self) -> bool {
        matches!(self, Operation::Blend { .. })
    }

    /// Check parameter ranges the types alone do not enforce
    pub fn validate(&self) -> Result<()> {
        match self {
            Operation::Greyscale { weights: Some(w) } => {
                if [w.r, w.g, w.b].iter().any(|&p| p > MAX_PERCENT) {
                    return Err(WorkbenchError::InvalidParameter(format!(
                        "Greyscale weights must be 0-100, got {:?}",
                        w
                    )));
                }
            }
            Operation::Blend { pct_a, pct_b, .. } => {
                if *pct_a > MAX_PERCENT || *pct_b > MAX_PERCENT {
                    return Err(WorkbenchError::InvalidParameter(format!(
                        "Blend percentages must be 0-100, got {} and {}",
                        pct_a, pct_b
                    )));
                }
            }
            Operation::GreyscaleColumns { columns: 0 } => {
                return Err(WorkbenchError::InvalidParameter(
                    "Column count must be at least 1".to_string(),
                ));
            }
            Operation::PaintColumns { gutter, .. } => {
                if PAINTED_COLUMN_WIDTH.checked_add(*gutter).is_none() {
                    return Err(WorkbenchError::InvalidParameter(format!(
                        "Column gutter {} is too wide",
                        gutter
                    )));
                }
            }
            _ => {}
        }
        Ok(())
    }
}

fn ensure_not_empty(buf: &PixelBuffer, what: &str) -> Result<()> {
    if buf.is_empty() {
        return Err(WorkbenchError::InvalidParameter(format!(
            "The {} is empty ({}x{})",
            what,
            buf.width(),
            buf.height()
        )));
    }
    Ok(())
}

/// Validate and run one operation, returning a new buffer
///
/// `second` is the other operand of a blend and is ignored otherwise.
pub fn apply(op: &Operation, buf: &PixelBuffer, second: Option<&PixelBuffer>) -> Result<PixelBuffer> {
    ensure_not_empty(buf, "image")?;
    op.validate()?;

    if op.is_expensive() && buf.pixel_count() > SLOW_DENOISE_PIXELS {
        warn!(
            "{} over {}x{} pixels may take a while",
            op.name(),
            buf.width(),
            buf.height()
        );
    }
    debug!("apply: {:?}", op);

    let out = match op {
        Operation::Negative => negative(buf),
        Operation::Threshold { level } => threshold(buf, *level),
        Operation::Greyscale { weights } => greyscale(buf, *weights),
        Operation::Denoise { topology } => denoise(buf, *topology),
        Operation::Blend { pct_a, pct_b, mode } => {
            let other = second.ok_or_else(|| {
                WorkbenchError::InvalidParameter("Blend needs a second image".to_string())
            })?;
            ensure_not_empty(other, "second image")?;
            blend(buf, other, *pct_a, *pct_b, *mode)
        }
        Operation::Equalize { valid_shades_only } => equalize(buf, *valid_shades_only),
        Operation::DrawBorder { selection, style } => draw_border(buf, selection, style),
        Operation::GreyscaleColumns { columns } => greyscale_columns(buf, *columns),
        Operation::MirrorRegion { selection } => mirror_region_vertical(buf, selection),
        Operation::RotateQuadrants { quadrants } => rotate_quadrants(buf, quadrants),
        Operation::PaintColumns { color, gutter } => paint_columns(buf, *color, *gutter),
        Operation::NegativeTopGreyBottom => negative_top_grey_bottom(buf),
        Operation::EqualizeAboveDiagonal => equalize_above_diagonal(buf),
    };

    Ok(out)
}

// ============================================================================
// RECIPES
// ============================================================================

/// Ordered list of operations applied one after another
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipe {
    pub operations: Vec<Operation>,
}

impl Recipe {
    pub fn new(operations: Vec<Operation>) -> Self {
        Self { operations }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let recipe: Recipe = serde_json::from_str(json)?;
        for op in &recipe.operations {
            op.validate()?;
        }
        Ok(recipe)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn is_expensive(&self) -> bool {
        self.operations.iter().any(Operation::is_expensive)
    }

    /// Run every operation in order, each on the previous one's output
    pub fn apply(&self, buf: &PixelBuffer, second: Option<&PixelBuffer>) -> Result<PixelBuffer> {
        let mut current = buf.clone();
        for op in &self.operations {
            current = apply(op, &current, second)?;
        }
        Ok(current)
    }
}

// ============================================================================
// FILE PIPELINE
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct ProcessResult {
    pub original_size: (u32, u32),
    pub final_size: (u32, u32),
    pub operations_applied: usize,
}

/// Load `input`, run the recipe and save to `output`
///
/// `second` is loaded only when the recipe contains a blend.
pub fn process_image(
    input: &Path,
    output: &Path,
    recipe: &Recipe,
    second: Option<&Path>,
) -> Result<ProcessResult> {
    let img = load_image(input)?;
    let original_size = img.dimensions();

    let other = if recipe.operations.iter().any(Operation::needs_second_buffer) {
        match second {
            Some(path) => Some(load_image(path)?),
            None => {
                return Err(WorkbenchError::InvalidParameter(
                    "Recipe blends but no second image was given".to_string(),
                ))
            }
        }
    } else {
        None
    };

    let result = recipe.apply(&img, other.as_ref())?;
    save_image(&result, output)?;

    Ok(ProcessResult {
        original_size,
        final_size: result.dimensions(),
        operations_applied: recipe.operations.len(),
    })
}
