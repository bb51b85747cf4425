// File: ./src/config.rs
// Page-layout calibration: margins and the coordinate-to-time tables.
use anyhow::{Context, Result};
use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

fn default_left_margin() -> i32 {
    42
}
fn default_bottom_margin() -> i32 {
    520
}

/// One row of a coordinate-to-time lookup table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotBand {
    pub threshold: i32,
    pub time: NaiveTime,
}

impl SlotBand {
    fn new(threshold: i32, h: u32, m: u32) -> Self {
        Self {
            threshold,
            // Static tables only carry valid clock times.
            time: NaiveTime::from_hms_opt(h, m, 0).unwrap(),
        }
    }
}

fn default_start_bands() -> Vec<SlotBand> {
    vec![
        SlotBand::new(701, 21, 20),
        SlotBand::new(607, 19, 40),
        SlotBand::new(514, 18, 0),
        SlotBand::new(420, 16, 0),
        SlotBand::new(327, 14, 10),
        SlotBand::new(233, 12, 20),
        SlotBand::new(139, 10, 20),
        SlotBand::new(46, 8, 30),
    ]
}

fn default_end_bands() -> Vec<SlotBand> {
    vec![
        SlotBand::new(46, 10, 10),
        SlotBand::new(139, 12, 0),
        SlotBand::new(233, 14, 0),
        SlotBand::new(327, 15, 50),
        SlotBand::new(420, 17, 40),
        SlotBand::new(514, 19, 30),
        SlotBand::new(607, 21, 10),
        SlotBand::new(701, 22, 50),
    ]
}

/// Geometry calibration for one print layout of the timetable page.
///
/// All values are pixel coordinates of the source page. `start_bands`
/// must be ordered by descending threshold: a cell's left edge picks
/// the first band it reaches (`pos >= threshold`), because a class
/// starts where its column begins. `end_bands` must be ordered by
/// ascending threshold and each row carries the band's *lower* edge:
/// a cell's right edge picks the last band it reaches, because the
/// right edge lines up with the start of the following period. Both
/// lookups reject positions left of the earliest class column.
///
/// The defaults are calibrated against the known page; a recalibrated
/// table can be loaded from a TOML file without touching any parsing
/// logic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Layout {
    #[serde(default = "default_left_margin")]
    pub left_margin: i32,
    #[serde(default = "default_bottom_margin")]
    pub bottom_margin: i32,
    #[serde(default = "default_start_bands")]
    pub start_bands: Vec<SlotBand>,
    #[serde(default = "default_end_bands")]
    pub end_bands: Vec<SlotBand>,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            left_margin: default_left_margin(),
            bottom_margin: default_bottom_margin(),
            start_bands: default_start_bands(),
            end_bands: default_end_bands(),
        }
    }
}

impl Layout {
    /// Loads a layout override from a TOML file. Missing keys fall back
    /// to the built-in calibration.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Failed to read layout file {}", path.display()))?;
        toml::from_str(&raw)
            .with_context(|| format!("Failed to parse layout file {}", path.display()))
    }

    /// Start-of-class slot for a cell's left edge.
    pub fn start_time(&self, pos: i32) -> Option<NaiveTime> {
        self.start_bands
            .iter()
            .find(|b| pos >= b.threshold)
            .map(|b| b.time)
    }

    /// End-of-class slot for a cell's right edge.
    pub fn end_time(&self, pos: i32) -> Option<NaiveTime> {
        self.end_bands
            .iter()
            .rev()
            .find(|b| pos >= b.threshold)
            .map(|b| b.time)
    }
}
