use serde::{Deserialize, Serialize};

/// Tuning knobs for the native render engine.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Largest canvas (width * height) the engine will allocate. Raise it
    /// for deep zooms; each cell costs 8 bytes.
    pub max_cells: usize,
    /// Canvas rows aggregated per parallel task.
    pub band_rows: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_cells: 1 << 28,
            band_rows: 64,
        }
    }
}
