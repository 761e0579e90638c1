//! Glyph sets: coordinate columns plus a shaper turning each row into a
//! data-space rectangle.

use crate::error::{Error, Result};
use rayon::prelude::*;
use std::borrow::Cow;

/// Axis-aligned rectangle as `(x, y, width, height)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Builds bounds from two opposite corners in any order.
    pub fn from_corners(x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        let (min_x, max_x) = if x0 <= x1 { (x0, x1) } else { (x1, x0) };
        let (min_y, max_y) = if y0 <= y1 { (y0, y1) } else { (y1, y0) };
        Self::new(min_x, min_y, max_x - min_x, max_y - min_y)
    }

    pub fn max_x(&self) -> f64 {
        self.x + self.width
    }

    pub fn max_y(&self) -> f64 {
        self.y + self.height
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.width.is_finite() && self.height.is_finite()
    }

    pub fn union(&self, other: &Bounds) -> Bounds {
        Bounds::from_corners(
            self.x.min(other.x),
            self.y.min(other.y),
            self.max_x().max(other.max_x()),
            self.max_y().max(other.max_y()),
        )
    }
}

/// Maps a point row onto the rectangle it covers.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Shaper {
    /// Rectangle of fixed size centered on the point.
    Rect { width: f64, height: f64 },
}

impl Shaper {
    pub fn square(size: f64) -> Self {
        Shaper::Rect {
            width: size,
            height: size,
        }
    }

    pub fn shape(&self, x: f64, y: f64) -> Bounds {
        match *self {
            Shaper::Rect { width, height } => {
                Bounds::new(x - width / 2.0, y - height / 2.0, width, height)
            }
        }
    }
}

/// Points to render, stored column-major.
#[derive(Clone, Debug)]
pub struct Glyphset<'a> {
    xs: Cow<'a, [f64]>,
    ys: Cow<'a, [f64]>,
    shaper: Shaper,
}

impl<'a> Glyphset<'a> {
    /// Column-major construction from equal-length X and Y columns.
    pub fn from_columns(
        xs: impl Into<Cow<'a, [f64]>>,
        ys: impl Into<Cow<'a, [f64]>>,
        shaper: Shaper,
    ) -> Result<Self> {
        let (xs, ys) = (xs.into(), ys.into());
        if xs.len() != ys.len() {
            return Err(Error::ColumnLengthMismatch {
                x_len: xs.len(),
                y_len: ys.len(),
            });
        }
        Ok(Self { xs, ys, shaper })
    }

    /// Row-major construction from `[x, y]` pairs.
    pub fn from_rows(rows: &[[f64; 2]], shaper: Shaper) -> Self {
        let (xs, ys): (Vec<f64>, Vec<f64>) = rows.iter().map(|r| (r[0], r[1])).unzip();
        Self {
            xs: Cow::Owned(xs),
            ys: Cow::Owned(ys),
            shaper,
        }
    }

    pub fn len(&self) -> usize {
        self.xs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.xs.is_empty()
    }

    /// Shape of glyph `index`, or `None` when its coordinates are not finite.
    pub fn glyph(&self, index: usize) -> Option<Bounds> {
        let x = *self.xs.get(index)?;
        let y = *self.ys.get(index)?;
        let rect = self.shaper.shape(x, y);
        rect.is_finite().then_some(rect)
    }

    /// Data-space bounding box of every finite glyph.
    pub fn bounds(&self) -> Option<Bounds> {
        (0..self.len())
            .into_par_iter()
            .filter_map(|i| self.glyph(i))
            .reduce_with(|a, b| a.union(&b))
    }
}
