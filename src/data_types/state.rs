use super::axis::{Range1d, RangeAxis};
use serde::{Deserialize, Serialize};

/// Per-redraw view state sent by the client on pan/zoom.
///
/// `screen_*` are the canvas extents in pixels, `data_*` the visible data
/// window. A fresh value is built for every redraw and never stored.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlotState {
    pub screen_x: Range1d,
    pub screen_y: Range1d,
    pub data_x: Range1d,
    pub data_y: Range1d,
}

impl PlotState {
    pub fn new(screen_x: Range1d, screen_y: Range1d, data_x: Range1d, data_y: Range1d) -> Self {
        Self {
            screen_x,
            screen_y,
            data_x,
            data_y,
        }
    }

    pub fn range(&self, axis: RangeAxis) -> Range1d {
        match axis {
            RangeAxis::ScreenX => self.screen_x,
            RangeAxis::ScreenY => self.screen_y,
            RangeAxis::DataX => self.data_x,
            RangeAxis::DataY => self.data_y,
        }
    }
}
