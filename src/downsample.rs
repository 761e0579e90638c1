//! On-demand downsampling of point data into a single image per redraw.

use crate::data_types::{ImagePayload, PlotState, Range1d, RangeAxis, RawData};
use crate::error::{Error, Result};
use crate::glyphset::{Bounds, Glyphset, Shaper};
use crate::rendering::{CanvasSize, NativeEngine, RenderEngine};
use crate::source::TransformBundle;
use crate::transform::Balance;
use glam::DVec2;
use tracing::{debug, trace};

/// Signed extent of a range.
pub fn span(range: &Range1d) -> f64 {
    range.span()
}

/// Canvas geometry for one redraw.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RenderPlan {
    /// Visible canvas extent in pixels.
    pub screen_size: DVec2,
    /// Data units per screen pixel.
    pub scale: DVec2,
    /// Size in pixels of the whole dataset drawn at the current zoom.
    pub plot_size: DVec2,
}

/// Computes screen size, scale and full plot size from the view state.
/// Zero or non-finite extents fail instead of dividing by zero.
pub fn plan(state: &PlotState) -> Result<RenderPlan> {
    let extent = |axis: RangeAxis| {
        let s = span(&state.range(axis));
        if s == 0.0 || !s.is_finite() {
            Err(Error::DegenerateRange { axis, span: s })
        } else {
            Ok(s)
        }
    };
    let screen_size = DVec2::new(extent(RangeAxis::ScreenX)?, extent(RangeAxis::ScreenY)?);
    let data_size = DVec2::new(extent(RangeAxis::DataX)?, extent(RangeAxis::DataY)?);

    let scale = data_size / screen_size;
    let plot_size = screen_size / scale;
    Ok(RenderPlan {
        screen_size,
        scale,
        plot_size,
    })
}

/// Shaper for a glyph type. Only squares of a fixed size are supported.
pub fn shaper(code: &str, size: f64) -> Result<Shaper> {
    if !code.eq_ignore_ascii_case("square") {
        return Err(Error::UnsupportedGlyphType(code.to_string()));
    }
    Ok(Shaper::square(size))
}

/// [`downsample_with`] on a default [`NativeEngine`].
pub fn downsample(
    data: RawData<'_>,
    transform: &TransformBundle,
    plot_state: &PlotState,
) -> Result<ImagePayload> {
    downsample_with(&NativeEngine::default(), data, transform, plot_state)
}

/// Renders `data` at the resolution implied by `plot_state`, using the
/// aggregator, info and shader of `transform`.
pub fn downsample_with<E: RenderEngine + ?Sized>(
    engine: &E,
    data: RawData<'_>,
    transform: &TransformBundle,
    plot_state: &PlotState,
) -> Result<ImagePayload> {
    let view = plan(plot_state)?;
    let side = |length: f64, axis: RangeAxis| {
        CanvasSize::pixels(length).ok_or_else(|| Error::DegenerateRange {
            axis,
            span: span(&plot_state.range(axis)),
        })
    };
    let canvas = CanvasSize::new(
        side(view.plot_size.x, RangeAxis::DataX)?,
        side(view.plot_size.y, RangeAxis::DataY)?,
    );
    debug!(
        scale_x = view.scale.x,
        scale_y = view.scale.y,
        width = canvas.width,
        height = canvas.height,
        "downsample plan"
    );

    let spec = &transform.glyphspec;
    // TODO: per-point sizes from `size.field` bindings
    let size = spec.size.fixed_size()?;
    let shaper = shaper(&spec.kind, size)?;

    let (xs, ys) = data.xy_columns(&spec.x.field, &spec.y.field)?;
    let glyphs = Glyphset::from_columns(xs, ys, shaper)?;

    // Nothing finite to fit: any transform renders an empty canvas.
    let bounds = glyphs
        .bounds()
        .unwrap_or(Bounds::new(0.0, 0.0, 1.0, 1.0));
    let ivt = engine.zoom_fit(canvas.as_dvec2(), &bounds, Balance::Unbalanced);
    trace!(?bounds, ?ivt, glyphs = glyphs.len(), "fitted view transform");

    let image = engine.render(
        &glyphs,
        &transform.info.reify(),
        &transform.agg.reify(),
        &transform.shader.reify(),
        canvas,
        &ivt,
    )?;

    Ok(ImagePayload::from_grid(image))
}
