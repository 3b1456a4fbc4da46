//! Configuration options for command execution.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::plane::WorkingPlane;

/// Options read at the start of every command.
///
/// These replace the scene-level properties that the panel UI edits. They are
/// passed explicitly into the router and the solvers and never mutated while
/// a command runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PdtOptions {
    /// Plane used for polar, intersection and measurement operations.
    pub plane: WorkingPlane,

    /// Base point for delta and polar placement of the cursor and pivot.
    pub select: SelectMode,

    /// Fold polar angles into the opposite half-plane.
    pub flip_angle: bool,

    /// Measure percentages from the second point instead of the first.
    pub flip_percent: bool,
}

impl Default for PdtOptions {
    fn default() -> Self {
        Self {
            plane: WorkingPlane::XY,
            select: SelectMode::Current,
            flip_angle: false,
            flip_percent: false,
        }
    }
}

impl PdtOptions {
    /// Parses options from a JSON document. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Loads options from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let options = Self::from_json(&text)?;
        log::debug!("loaded options from {}: {options:?}", path.display());
        Ok(options)
    }

    /// Serializes the options as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Sets the working plane.
    #[must_use]
    pub fn with_plane(mut self, plane: WorkingPlane) -> Self {
        self.plane = plane;
        self
    }

    /// Sets the delta base mode.
    #[must_use]
    pub fn with_select(mut self, select: SelectMode) -> Self {
        self.select = select;
        self
    }

    /// Sets the angle flip flag.
    #[must_use]
    pub fn with_flip_angle(mut self, flip: bool) -> Self {
        self.flip_angle = flip;
        self
    }

    /// Sets the percentage flip flag.
    #[must_use]
    pub fn with_flip_percent(mut self, flip: bool) -> Self {
        self.flip_percent = flip;
        self
    }
}

/// Where delta and polar offsets for the cursor and pivot start from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum SelectMode {
    /// Relative to the current cursor or pivot location.
    #[default]
    #[serde(rename = "REL")]
    Current,
    /// Relative to the last selected vertex (or the active object).
    #[serde(rename = "SEL")]
    Selected,
}
