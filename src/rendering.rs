//! Render engine seam and the native CPU engine.

use crate::aggregation::{aggregate, AggregatorOp, InfoOp};
use crate::data_types::EngineConfig;
use crate::glyphset::{Bounds, Glyphset};
use crate::grid::Grid;
use crate::shading::ShaderOp;
use crate::transform::{zoom_fit, Balance, ViewTransform};
use eyre::bail;
use glam::DVec2;
use tracing::debug;

/// Target canvas in whole pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CanvasSize {
    pub width: usize,
    pub height: usize,
}

impl CanvasSize {
    pub const fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    /// Rounds a fractional plot side to whole pixels, at least one.
    /// `None` when not finite or beyond `usize`.
    pub fn pixels(length: f64) -> Option<usize> {
        let v = length.abs().round();
        (v.is_finite() && v <= usize::MAX as f64).then(|| v.max(1.0) as usize)
    }

    pub fn as_dvec2(&self) -> DVec2 {
        DVec2::new(self.width as f64, self.height as f64)
    }

    pub fn cells(&self) -> Option<usize> {
        self.width.checked_mul(self.height)
    }
}

/// Aggregation/shading engine the downsampler drives.
///
/// Failures are opaque to callers and travel as [`eyre::Report`].
pub trait RenderEngine: Send + Sync {
    /// Aggregates `glyphs` through `info` and `agg` onto a canvas of `size`
    /// under `ivt`, then shades the result.
    fn render(
        &self,
        glyphs: &Glyphset<'_>,
        info: &InfoOp,
        agg: &AggregatorOp,
        shader: &ShaderOp,
        size: CanvasSize,
        ivt: &ViewTransform,
    ) -> eyre::Result<Grid>;

    fn zoom_fit(&self, size: DVec2, bounds: &Bounds, balance: Balance) -> ViewTransform {
        zoom_fit(size, bounds, balance)
    }
}

/// In-process CPU engine backed by rayon.
#[derive(Clone, Debug, Default)]
pub struct NativeEngine {
    config: EngineConfig,
}

impl NativeEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }
}

impl RenderEngine for NativeEngine {
    fn render(
        &self,
        glyphs: &Glyphset<'_>,
        info: &InfoOp,
        agg: &AggregatorOp,
        shader: &ShaderOp,
        size: CanvasSize,
        ivt: &ViewTransform,
    ) -> eyre::Result<Grid> {
        let Some(cells) = size.cells() else {
            bail!("canvas {}x{} overflows", size.width, size.height);
        };
        if cells > self.config.max_cells {
            bail!(
                "canvas {}x{} exceeds the {} cell limit",
                size.width,
                size.height,
                self.config.max_cells
            );
        }

        debug!(
            glyphs = glyphs.len(),
            width = size.width,
            height = size.height,
            "aggregating"
        );
        let grid = aggregate(
            glyphs,
            info,
            agg,
            ivt,
            size.width,
            size.height,
            self.config.band_rows,
        );
        Ok(shader.shade(grid))
    }
}
