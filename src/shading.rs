//! Shaders: whole-grid transforms applied after aggregation.

use crate::grid::Grid;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Straight (non-premultiplied) RGBA color.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgba(pub [u8; 4]);

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self([r, g, b, a])
    }

    /// Packs the color the way an RGBA image buffer viewed as little-endian
    /// `u32` stores it.
    pub fn pack(&self) -> u32 {
        u32::from_le_bytes(self.0)
    }

    pub fn lerp(&self, other: &Rgba, t: f64) -> Rgba {
        let t = t.clamp(0.0, 1.0);
        let mut out = [0u8; 4];
        for (i, c) in out.iter_mut().enumerate() {
            let a = self.0[i] as f64;
            let b = other.0[i] as f64;
            *c = (a + (b - a) * t).round() as u8;
        }
        Rgba(out)
    }
}

/// Engine-side shader operator.
#[derive(Clone, Debug, PartialEq)]
pub enum ShaderOp {
    /// Pass-through.
    Id,
    /// Linear map of the non-empty value range onto `low..high`.
    Interpolate { low: f64, high: f64 },
    Sqrt,
    Cuberoot,
    /// Linear color ramp over the non-empty value range, cells hold packed
    /// RGBA. Empty cells become fully transparent.
    InterpolateColor { low: Rgba, high: Rgba },
    /// Operators applied left to right.
    Chain(Vec<ShaderOp>),
}

/// Cells equal to this value hold no glyphs.
const EMPTY: f64 = 0.0;

impl ShaderOp {
    /// Order-preserving combination: `self` runs first, then `next`.
    /// Nested chains are flattened so grouping does not matter.
    pub fn then(self, next: ShaderOp) -> ShaderOp {
        let mut ops = match self {
            ShaderOp::Chain(ops) => ops,
            op => vec![op],
        };
        match next {
            ShaderOp::Chain(more) => ops.extend(more),
            op => ops.push(op),
        }
        ShaderOp::Chain(ops)
    }

    pub fn shade(&self, mut grid: Grid) -> Grid {
        match self {
            ShaderOp::Id => grid,
            ShaderOp::Sqrt => {
                grid.cells_mut().par_iter_mut().for_each(|v| *v = v.sqrt());
                grid
            }
            ShaderOp::Cuberoot => {
                grid.cells_mut().par_iter_mut().for_each(|v| *v = v.cbrt());
                grid
            }
            ShaderOp::Interpolate { low, high } => {
                let Some((min, max)) = occupied_range(&grid) else {
                    return grid;
                };
                let span = max - min;
                let (low, high) = (*low, *high);
                grid.cells_mut().par_iter_mut().for_each(|v| {
                    if is_occupied(*v) {
                        *v = if span == 0.0 {
                            high
                        } else {
                            low + (*v - min) / span * (high - low)
                        };
                    }
                });
                grid
            }
            ShaderOp::InterpolateColor { low, high } => {
                let range = occupied_range(&grid);
                grid.cells_mut().par_iter_mut().for_each(|v| {
                    *v = match range {
                        Some((min, max)) if is_occupied(*v) => {
                            let t = if max > min { (*v - min) / (max - min) } else { 1.0 };
                            low.lerp(high, t).pack() as f64
                        }
                        _ => 0.0,
                    };
                });
                grid
            }
            ShaderOp::Chain(ops) => ops.iter().fold(grid, |g, op| op.shade(g)),
        }
    }
}

fn is_occupied(v: f64) -> bool {
    v != EMPTY && v.is_finite()
}

/// Min and max over cells holding data.
fn occupied_range(grid: &Grid) -> Option<(f64, f64)> {
    grid.cells()
        .par_iter()
        .copied()
        .filter(|v| is_occupied(*v))
        .map(|v| (v, v))
        .reduce_with(|a, b| (a.0.min(b.0), a.1.max(b.1)))
}
