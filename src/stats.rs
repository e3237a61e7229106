//! Per-channel histograms
//!
//! A histogram holds one record per intensity level (0-255) with four
//! independent counts, one per channel. The cumulative histogram has the same
//! shape and stores prefix sums in increasing level order.

use serde::Serialize;
use std::ops::Index;
use crate::buffer::{Channel, PixelBuffer};

/// Number of intensity levels per channel.
pub const LEVELS: usize = 256;

/// Occurrence counts of one intensity level across the four channels
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ChannelCounts {
    pub r: u32,
    pub g: u32,
    pub b: u32,
    pub a: u32,
}

impl ChannelCounts {
    pub fn get(&self, channel: Channel) -> u32 {
        match channel {
            Channel::Red => self.r,
            Channel::Green => self.g,
            Channel::Blue => self.b,
            Channel::Alpha => self.a,
        }
    }

    fn add(&mut self, other: &ChannelCounts) {
        self.r += other.r;
        self.g += other.g;
        self.b += other.b;
        self.a += other.a;
    }
}

/// Per-level, per-channel pixel counts
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Histogram {
    // Always LEVELS long
    levels: Vec<ChannelCounts>,
}

impl Histogram {
    fn empty() -> Self {
        Self {
            levels: vec![ChannelCounts::default(); LEVELS],
        }
    }

    pub fn levels(&self) -> &[ChannelCounts] {
        &self.levels
    }

    /// Counts of one channel in level order
    pub fn channel(&self, channel: Channel) -> impl Iterator<Item = u32> + '_ {
        self.levels.iter().map(move |counts| counts.get(channel))
    }

    /// Sum of all counts of one channel (the pixel count of the source buffer)
    pub fn total(&self, channel: Channel) -> u64 {
        self.channel(channel).map(u64::from).sum()
    }

    /// Number of levels with at least one occurrence
    pub fn valid_shades(&self, channel: Channel) -> usize {
        self.channel(channel).filter(|&count| count != 0).count()
    }

    /// Lowest level with at least one occurrence
    pub fn min_level(&self, channel: Channel) -> Option<u8> {
        self.channel(channel)
            .position(|count| count != 0)
            .map(|level| level as u8)
    }
}

impl Index<u8> for Histogram {
    type Output = ChannelCounts;

    fn index(&self, level: u8) -> &ChannelCounts {
        &self.levels[level as usize]
    }
}

/// Prefix sums of a [`Histogram`], non-decreasing per channel
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CumulativeHistogram {
    levels: Vec<ChannelCounts>,
}

impl CumulativeHistogram {
    pub fn levels(&self) -> &[ChannelCounts] {
        &self.levels
    }

    pub fn channel(&self, channel: Channel) -> impl Iterator<Item = u32> + '_ {
        self.levels.iter().map(move |counts| counts.get(channel))
    }
}

impl Index<u8> for CumulativeHistogram {
    type Output = ChannelCounts;

    fn index(&self, level: u8) -> &ChannelCounts {
        &self.levels[level as usize]
    }
}

/// Count, for every channel, how many pixels hold each intensity level
pub fn histogram(buf: &PixelBuffer) -> Histogram {
    let mut hist = Histogram::empty();

    for px in buf.pixels() {
        hist.levels[px[0] as usize].r += 1;
        hist.levels[px[1] as usize].g += 1;
        hist.levels[px[2] as usize].b += 1;
        hist.levels[px[3] as usize].a += 1;
    }

    hist
}

/// Accumulate a histogram in increasing level order
pub fn cumulative(hist: &Histogram) -> CumulativeHistogram {
    let mut levels = hist.levels.clone();
    for level in 1..LEVELS {
        let prev = levels[level - 1];
        levels[level].add(&prev);
    }
    CumulativeHistogram { levels }
}
