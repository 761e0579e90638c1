//! ar_downsample: server-side abstract rendering for large scatter plots

pub mod aggregation;
pub mod data_types;
pub mod downsample;
pub mod error;
pub mod glyphset;
pub mod grid;
pub mod mapping;
#[cfg(feature = "polars")]
pub mod polars_source;
pub mod proxy;
pub mod rendering;
pub mod shading;
pub mod source;
pub mod transform;

pub use data_types::{GlyphSpec, ImagePayload, PlotState, Range1d, RawData};
pub use downsample::{downsample, downsample_with, span};
pub use error::{Error, Result};
pub use mapping::mapping;
pub use proxy::{compose, Aggregator, Info, OutKind, Shader};
pub use rendering::{NativeEngine, RenderEngine};
pub use source::{source, Document, Plot, ServerDataSource, SourceBuilder, TransformBundle};
