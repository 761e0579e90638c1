//! View transform helper for data to canvas projection

use crate::glyphset::Bounds;
use glam::{DAffine2, DVec2};
use serde::{Deserialize, Serialize};

/// Whether `zoom_fit` may scale X and Y independently.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Balance {
    /// One common scale, the smaller of the two axis fits.
    Balanced,
    #[default]
    Unbalanced,
}

/// Axis-aligned affine map from data space to canvas pixels:
/// `pixel = data * scale + translation`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewTransform {
    affine: DAffine2,
}

impl ViewTransform {
    pub fn new(translation: DVec2, scale: DVec2) -> Self {
        Self {
            affine: DAffine2::from_scale_angle_translation(scale, 0.0, translation),
        }
    }

    pub fn identity() -> Self {
        Self {
            affine: DAffine2::IDENTITY,
        }
    }

    pub fn scale(&self) -> DVec2 {
        DVec2::new(self.affine.matrix2.x_axis.x, self.affine.matrix2.y_axis.y)
    }

    pub fn translation(&self) -> DVec2 {
        self.affine.translation
    }

    pub fn data_to_screen(&self, point: DVec2) -> DVec2 {
        self.affine.transform_point2(point)
    }

    pub fn screen_to_data(&self, point: DVec2) -> DVec2 {
        self.affine.inverse().transform_point2(point)
    }

    /// Projects a data-space rectangle into canvas space.
    pub fn bounds_to_screen(&self, bounds: &Bounds) -> Bounds {
        let p0 = self.data_to_screen(DVec2::new(bounds.x, bounds.y));
        let p1 = self.data_to_screen(DVec2::new(bounds.max_x(), bounds.max_y()));
        Bounds::from_corners(p0.x, p0.y, p1.x, p1.y)
    }
}

/// Fits `bounds` into a canvas of `size` pixels with the bounds' origin at
/// pixel (0, 0). A zero-width or zero-height bounds axis keeps a unit scale
/// so the transform stays invertible.
pub fn zoom_fit(size: DVec2, bounds: &Bounds, balance: Balance) -> ViewTransform {
    let fit = |canvas: f64, extent: f64| {
        let s = canvas / extent;
        if s.is_finite() && s != 0.0 {
            s
        } else {
            1.0
        }
    };
    let mut scale = DVec2::new(fit(size.x, bounds.width), fit(size.y, bounds.height));
    if balance == Balance::Balanced {
        scale = DVec2::splat(scale.x.min(scale.y));
    }
    let translation = DVec2::new(-bounds.x * scale.x, -bounds.y * scale.y);
    ViewTransform::new(translation, scale)
}
