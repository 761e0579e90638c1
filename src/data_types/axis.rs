use serde::{Deserialize, Serialize};
use std::fmt;

/// A closed numeric interval as the plotting frontend reports it.
/// `end` may be smaller than `start` for flipped axes.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Range1d {
    pub start: f64,
    pub end: f64,
}

impl Range1d {
    pub const fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    /// Signed extent, `end - start`.
    pub fn span(&self) -> f64 {
        self.end - self.start
    }
}

/// Identifies one of the four ranges of a [`crate::data_types::PlotState`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RangeAxis {
    ScreenX,
    ScreenY,
    DataX,
    DataY,
}

impl fmt::Display for RangeAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::ScreenX => "screen_x",
            Self::ScreenY => "screen_y",
            Self::DataX => "data_x",
            Self::DataY => "data_y",
        };
        f.write_str(name)
    }
}
