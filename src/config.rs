use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::time::Duration;

use crate::foundation::color::Color;
use crate::foundation::error::{InkError, InkResult};
use crate::stroke::style::StrokeStyle;

/// Environment override for [`WhiteboardOpts::disarm_delay_ms`].
pub const DISARM_DELAY_ENV: &str = "INKBOARD_DISARM_DELAY_MS";

/// Options for a [`crate::Whiteboard`].
///
/// All fields have defaults, so `{}` is a valid options document.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WhiteboardOpts {
    /// Stroke width in surface pixels.
    pub stroke_width: f32,
    /// Stroke color. When absent, black on a light board or white when `inverted`.
    pub color: Option<Color>,
    /// Dark-background board: default ink is white.
    pub inverted: bool,
    /// Quiet period after a stroke ends before raw capture is released.
    pub disarm_delay_ms: u64,
    /// Pen-up refresh delay handed to the low-latency subsystem.
    pub pen_up_refresh_ms: u64,
}

impl Default for WhiteboardOpts {
    fn default() -> Self {
        Self {
            stroke_width: 6.0,
            color: None,
            inverted: false,
            disarm_delay_ms: 500,
            pen_up_refresh_ms: 500,
        }
    }
}

impl WhiteboardOpts {
    /// Parse options from a JSON reader and validate them.
    pub fn from_reader<R: std::io::Read>(r: R) -> InkResult<Self> {
        let opts: Self = serde_json::from_reader(r)
            .map_err(|e| InkError::config(format!("parse options JSON: {e}")))?;
        opts.validate()?;
        Ok(opts)
    }

    /// Parse options from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> InkResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            InkError::config(format!("open options JSON '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Apply `INKBOARD_DISARM_DELAY_MS` when it is set to a valid number.
    pub fn with_env_overrides(mut self) -> Self {
        if let Some(ms) = std::env::var(DISARM_DELAY_ENV)
            .ok()
            .and_then(|v| v.trim().parse::<u64>().ok())
        {
            self.disarm_delay_ms = ms;
        }
        self
    }

    pub fn validate(&self) -> InkResult<()> {
        if !self.stroke_width.is_finite() || self.stroke_width <= 0.0 {
            return Err(InkError::config(format!(
                "stroke_width must be finite and > 0, got {}",
                self.stroke_width
            )));
        }
        Ok(())
    }

    pub fn ink_color(&self) -> Color {
        match self.color {
            Some(c) => c,
            None if self.inverted => Color::WHITE,
            None => Color::BLACK,
        }
    }

    pub fn stroke_style(&self) -> StrokeStyle {
        StrokeStyle::new(self.ink_color(), self.stroke_width)
    }

    pub fn disarm_delay(&self) -> Duration {
        Duration::from_millis(self.disarm_delay_ms)
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
