use crate::error::{Error, Result};
use crate::grid::Grid;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Key/value payload held by a server data source and shipped to the client.
pub type DataMap = serde_json::Map<String, Value>;

/// Palette used when the caller does not pick one.
pub const DEFAULT_PALETTE: &str = "Spectral-11";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FieldSpec {
    pub field: String,
}

/// Glyph size: a fixed `default`, or a per-point `field` binding.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SizeSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl SizeSpec {
    pub fn fixed(size: f64) -> Self {
        Self {
            default: Some(size),
            field: None,
        }
    }

    /// The single size shared by every glyph. Field bindings take
    /// precedence over `default` and are not supported.
    pub fn fixed_size(&self) -> Result<f64> {
        match (&self.field, self.default) {
            (Some(field), _) => Err(Error::UnsupportedGlyphSize(format!("field `{field}`"))),
            (None, Some(size)) => Ok(size),
            (None, None) => Err(Error::UnsupportedGlyphSize("no size".to_string())),
        }
    }
}

/// The parts of a serialized glyph the downsampler needs.
/// Unknown keys (units, colors, ...) are ignored.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GlyphSpec {
    #[serde(rename = "type")]
    pub kind: String,
    pub x: FieldSpec,
    pub y: FieldSpec,
    #[serde(default)]
    pub size: SizeSpec,
}

impl GlyphSpec {
    pub fn new(kind: &str, x_field: &str, y_field: &str, size: f64) -> Self {
        Self {
            kind: kind.to_string(),
            x: FieldSpec {
                field: x_field.to_string(),
            },
            y: FieldSpec {
                field: y_field.to_string(),
            },
            size: SizeSpec::fixed(size),
        }
    }

    pub fn square(x_field: &str, y_field: &str, size: f64) -> Self {
        Self::new("square", x_field, y_field, size)
    }

    /// Reads the spec out of a renderer's serialized glyph.
    pub fn from_value(value: &Value) -> Result<Self> {
        Self::deserialize(value).map_err(Error::InvalidGlyphSpec)
    }
}

/// One rendered frame, in the layout the client image glyph expects.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ImagePayload {
    pub image: Vec<Grid>,
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub dw: Vec<usize>,
    pub dh: Vec<usize>,
}

impl ImagePayload {
    /// Anchors `grid` at the world origin, sized by its own pixel dimensions.
    pub fn from_grid(grid: Grid) -> Self {
        let (width, height) = grid.shape();
        Self {
            image: vec![grid],
            x: vec![0.0],
            y: vec![0.0],
            dw: vec![width],
            dh: vec![height],
        }
    }

    pub fn to_data_map(&self) -> Result<DataMap> {
        let value = serde_json::to_value(self).map_err(Error::Payload)?;
        serde_json::from_value(value).map_err(Error::Payload)
    }
}

/// Payload a fresh source starts with until the first downsample lands.
pub fn placeholder_payload(palette: &[String]) -> DataMap {
    let mut data = DataMap::new();
    data.insert("image".into(), json!([]));
    data.insert("x".into(), json!([0]));
    data.insert("y".into(), json!([0]));
    data.insert("global_x_range".into(), json!([0, 10]));
    data.insert("global_y_range".into(), json!([0, 10]));
    data.insert("global_offset_x".into(), json!([0]));
    data.insert("global_offset_y".into(), json!([0]));
    data.insert("dw".into(), json!([10]));
    data.insert("dh".into(), json!([10]));
    data.insert("palette".into(), json!(palette));
    data
}
