//! Per-cell aggregation of glyph footprints.

use crate::glyphset::{Bounds, Glyphset};
use crate::grid::Grid;
use crate::transform::ViewTransform;
use rayon::prelude::*;

/// Combines the info values of every glyph touching a cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AggregatorOp {
    /// Number of glyphs covering the cell.
    Count,
    /// Sum of the glyphs' info values.
    Sum,
}

impl AggregatorOp {
    #[inline(always)]
    pub fn combine(&self, acc: f64, value: f64) -> f64 {
        match self {
            AggregatorOp::Count => acc + 1.0,
            AggregatorOp::Sum => acc + value,
        }
    }
}

/// Per-glyph auxiliary value fed to the aggregator.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InfoOp {
    Const(f64),
}

impl InfoOp {
    #[inline(always)]
    pub fn value(&self, _index: usize) -> f64 {
        match *self {
            InfoOp::Const(v) => v,
        }
    }
}

/// Half-open pixel span `[x0, x1) x [y0, y1)` a glyph covers on the canvas.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Footprint {
    pub x0: usize,
    pub x1: usize,
    pub y0: usize,
    pub y1: usize,
}

impl Footprint {
    /// Pixels touched by `rect` (canvas space), clipped to the canvas.
    /// A glyph thinner than a pixel still marks the pixel it falls in.
    pub fn cover(rect: &Bounds, width: usize, height: usize) -> Option<Self> {
        if !rect.is_finite() {
            return None;
        }
        let (x0, x1) = pixel_span(rect.x, rect.max_x(), width)?;
        let (y0, y1) = pixel_span(rect.y, rect.max_y(), height)?;
        Some(Self { x0, x1, y0, y1 })
    }
}

fn pixel_span(lo: f64, hi: f64, limit: usize) -> Option<(usize, usize)> {
    let edge = limit as f64;
    // glyphs starting on the far edge of the fitted range land in the last pixel
    let lo = if lo >= edge && lo - edge <= edge * 1e-9 {
        (edge - 1.0).max(0.0)
    } else {
        lo
    };
    let start = lo.floor();
    let mut end = hi.ceil();
    if end <= start {
        end = start + 1.0;
    }
    let start = start.max(0.0);
    let end = end.min(limit as f64);
    if start >= end {
        return None;
    }
    Some((start as usize, end as usize))
}

/// Aggregates every glyph of `glyphs` into a `width` x `height` grid.
///
/// The canvas is split in bands of `band_rows` rows aggregated in parallel.
/// Within a cell glyphs are combined in input order, so the result does not
/// depend on the band size or thread count.
pub fn aggregate(
    glyphs: &Glyphset<'_>,
    info: &InfoOp,
    agg: &AggregatorOp,
    ivt: &ViewTransform,
    width: usize,
    height: usize,
    band_rows: usize,
) -> Grid {
    let mut grid = Grid::new(width, height);
    if grid.is_empty() || glyphs.is_empty() {
        return grid;
    }

    let footprints: Vec<Option<Footprint>> = (0..glyphs.len())
        .into_par_iter()
        .map(|i| {
            glyphs
                .glyph(i)
                .and_then(|rect| Footprint::cover(&ivt.bounds_to_screen(&rect), width, height))
        })
        .collect();

    let band_rows = band_rows.max(1);
    grid.cells_mut()
        .par_chunks_mut(width * band_rows)
        .enumerate()
        .for_each(|(band, cells)| {
            let row_start = band * band_rows;
            let row_end = row_start + cells.len() / width;
            for (i, fp) in footprints.iter().enumerate() {
                let Some(fp) = fp else { continue };
                let r0 = fp.y0.max(row_start);
                let r1 = fp.y1.min(row_end);
                if r0 >= r1 {
                    continue;
                }
                let value = info.value(i);
                for row in r0..r1 {
                    let offset = (row - row_start) * width;
                    for cell in &mut cells[offset + fp.x0..offset + fp.x1] {
                        *cell = agg.combine(*cell, value);
                    }
                }
            }
        });

    grid
}
