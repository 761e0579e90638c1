//! Error types for abstract rendering downsampling.

use crate::data_types::RangeAxis;
use crate::proxy::OutKind;
use thiserror::Error;

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// The plot has no renderer carrying a glyph and a server data source.
    #[error("no renderable glyph found on plot `{0}`")]
    NoGlyphRenderer(String),

    /// The source builder only wires up shaders producing plain images.
    #[error("only image shaders supported, got `{0}`")]
    UnsupportedShaderOutput(OutKind),

    /// The property mapper only knows how to bind image payloads.
    #[error("only image type supported in property mapping, got `{0}`")]
    UnsupportedMappingOutput(OutKind),

    #[error("unsupported glyph type `{0}`, only `square` is recognized")]
    UnsupportedGlyphType(String),

    /// Only one size shared by every glyph can be rendered.
    #[error("glyph size must be a fixed value, got {0}")]
    UnsupportedGlyphSize(String),

    #[error("invalid glyph spec: {0}")]
    InvalidGlyphSpec(#[source] serde_json::Error),

    /// A screen or data range with zero or non-finite extent.
    #[error("degenerate {axis} range: span is {span}")]
    DegenerateRange { axis: RangeAxis, span: f64 },

    #[error("column `{0}` not found in data")]
    MissingColumn(String),

    #[error("column length mismatch: x has {x_len} values, y has {y_len} values")]
    ColumnLengthMismatch { x_len: usize, y_len: usize },

    /// Failure reported by a queryable table backend.
    #[error("table query failed: {0}")]
    Table(String),

    #[error("payload serialization failed: {0}")]
    Payload(#[source] serde_json::Error),

    /// Opaque failure from inside the render engine, passed through as-is.
    #[error(transparent)]
    Engine(#[from] eyre::Report),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::UnsupportedGlyphType("circle".to_string());
        assert!(err.to_string().contains("circle"));

        let err = Error::UnsupportedShaderOutput(OutKind::RgbImage);
        assert!(err.to_string().contains("only image shaders supported"));
        assert!(err.to_string().contains("rgb_image"));
    }

    #[test]
    fn test_engine_error_is_transparent() {
        let err: Error = eyre::eyre!("canvas exploded").into();
        assert_eq!(err.to_string(), "canvas exploded");
    }
}
