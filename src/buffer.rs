//! RGBA pixel buffer shared by every transform.
//!
//! Storage is a flat byte vector of four interleaved channels per pixel in
//! `[r, g, b, a]` order, row-major. The length invariant
//! `data.len() == width * height * 4` holds for every buffer the crate hands
//! out; raw bytes from outside the crate go through [`PixelBuffer::from_raw`].
//!
//! Transforms never mutate their input. They clone or allocate a fresh buffer,
//! write into it and return it, so the caller can keep the previous buffer
//! around for preview or undo.

use image::{Rgba, RgbaImage};
use serde::{Deserialize, Serialize};
use crate::error::{Result, WorkbenchError};

/// Number of bytes per pixel.
pub const CHANNELS: usize = 4;

// ============================================================================
// CHANNELS & COLORS
// ============================================================================

/// One of the four interleaved channels of a pixel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    Red,
    Green,
    Blue,
    Alpha,
}

impl Channel {
    pub const ALL: [Channel; 4] = [Channel::Red, Channel::Green, Channel::Blue, Channel::Alpha];
    pub const RGB: [Channel; 3] = [Channel::Red, Channel::Green, Channel::Blue];

    /// Byte offset of this channel inside a pixel
    pub const fn offset(self) -> usize {
        match self {
            Channel::Red => 0,
            Channel::Green => 1,
            Channel::Blue => 2,
            Channel::Alpha => 3,
        }
    }
}

fn opaque() -> u8 {
    255
}

/// RGBA color. Alpha defaults to fully opaque when omitted from JSON.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    #[serde(default = "opaque")]
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Opaque and pure black
    pub const fn is_solid_black(self) -> bool {
        self.a == 255 && self.r == 0 && self.g == 0 && self.b == 0
    }
}

impl From<[u8; 4]> for Color {
    fn from([r, g, b, a]: [u8; 4]) -> Self {
        Self { r, g, b, a }
    }
}

impl From<Color> for Rgba<u8> {
    fn from(color: Color) -> Self {
        Rgba(color.to_array())
    }
}

/// Convert an arithmetic result to a channel value the way clamped byte
/// storage does: round half to even, then saturate to 0..=255.
pub(crate) fn clamp_channel(value: f64) -> u8 {
    value.round_ties_even().clamp(0.0, 255.0) as u8
}

// ============================================================================
// PIXEL BUFFER
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Allocate a buffer with every byte zeroed (transparent black)
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0; width as usize * height as usize * CHANNELS],
        }
    }

    /// Allocate a buffer with every pixel set to `color`
    pub fn filled(width: u32, height: u32, color: Color) -> Self {
        let pixel = color.to_array();
        let data = pixel
            .iter()
            .copied()
            .cycle()
            .take(width as usize * height as usize * CHANNELS)
            .collect();
        Self { width, height, data }
    }

    /// Wrap raw interleaved RGBA bytes, checking the length invariant
    pub fn from_raw(width: u32, height: u32, data: Vec<u8>) -> Result<Self> {
        let expected = width as usize * height as usize * CHANNELS;
        if data.len() != expected {
            return Err(WorkbenchError::InvalidParameter(format!(
                "Buffer of {}x{} needs {} bytes, got {}",
                width,
                height,
                expected,
                data.len()
            )));
        }
        Ok(Self { width, height, data })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Raw interleaved RGBA bytes
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }

    pub fn pixel_count(&self) -> usize {
        self.data.len() / CHANNELS
    }

    /// Zero width or zero height
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Start index of the pixel at `(x, y)` in the byte vector
    #[inline]
    pub fn index(&self, x: u32, y: u32) -> usize {
        (x as usize + y as usize * self.width as usize) * CHANNELS
    }

    pub fn contains(&self, x: u32, y: u32) -> bool {
        x < self.width && y < self.height
    }

    /// Color at `(x, y)`, or `None` outside the buffer
    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        if !self.contains(x, y) {
            return None;
        }
        let i = self.index(x, y);
        Some(Color::rgba(self.data[i], self.data[i + 1], self.data[i + 2], self.data[i + 3]))
    }

    pub(crate) fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Write all four channels of one pixel. Coordinates outside the buffer
    /// are ignored.
    pub(crate) fn put_pixel(&mut self, x: u32, y: u32, color: Color) {
        if self.contains(x, y) {
            let i = self.index(x, y);
            self.data[i..i + CHANNELS].copy_from_slice(&color.to_array());
        }
    }

    /// Iterate over pixels as `[r, g, b, a]` chunks in row-major order
    pub fn pixels(&self) -> std::slice::ChunksExact<'_, u8> {
        self.data.chunks_exact(CHANNELS)
    }

    /// Copy into an `image` crate buffer
    pub fn to_rgba_image(&self) -> RgbaImage {
        self.clone().into_rgba_image()
    }

    pub fn into_rgba_image(self) -> RgbaImage {
        let (width, height) = (self.width, self.height);
        match RgbaImage::from_raw(width, height, self.data) {
            Some(img) => img,
            // Length invariant guarantees the conversion above
            None => RgbaImage::new(width, height),
        }
    }
}

impl From<RgbaImage> for PixelBuffer {
    fn from(img: RgbaImage) -> Self {
        let (width, height) = img.dimensions();
        Self {
            width,
            height,
            data: img.into_raw(),
        }
    }
}

impl From<PixelBuffer> for RgbaImage {
    fn from(buf: PixelBuffer) -> Self {
        buf.into_rgba_image()
    }
}
