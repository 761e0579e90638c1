//! Server-backed data sources carrying an abstract rendering transform.

use crate::data_types::{
    placeholder_payload, DataMap, GlyphSpec, ImagePayload, PlotState, RawData, DEFAULT_PALETTE,
};
use crate::downsample::downsample_with;
use crate::error::{Error, Result};
use crate::proxy::{Aggregator, Info, OutKind, Shader};
use crate::rendering::RenderEngine;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info};

/// Value of [`TransformBundle::resample`].
pub const ABSTRACT_RENDERING: &str = "abstract rendering";

/// Identity of a plot inside a document.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlotId(pub String);

/// Where a renderer's full-resolution data lives on the server.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataSourceRef {
    pub data_url: String,
    pub owner_username: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct GlyphRenderer {
    /// The renderer's serialized glyph.
    pub glyphspec: Value,
    pub server_data_source: DataSourceRef,
}

#[derive(Clone, Debug, PartialEq)]
pub enum PlotRenderer {
    Glyph(GlyphRenderer),
    /// Guides, annotations and anything else without glyph data.
    Other(String),
}

impl PlotRenderer {
    pub fn as_glyph(&self) -> Option<&GlyphRenderer> {
        match self {
            PlotRenderer::Glyph(g) => Some(g),
            PlotRenderer::Other(_) => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Plot {
    pub id: PlotId,
    pub renderers: Vec<PlotRenderer>,
}

impl Plot {
    pub fn new(id: &str) -> Self {
        Self {
            id: PlotId(id.to_string()),
            renderers: Vec::new(),
        }
    }

    pub fn with_renderer(mut self, renderer: PlotRenderer) -> Self {
        self.renderers.push(renderer);
        self
    }

    /// First renderer able to feed a downsampler.
    pub fn glyph_renderer(&self) -> Option<&GlyphRenderer> {
        self.renderers.iter().find_map(PlotRenderer::as_glyph)
    }
}

/// The document whose children the client renders.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Document {
    children: Vec<PlotId>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_child(&mut self, id: PlotId) {
        if !self.contains(&id) {
            self.children.push(id);
        }
    }

    pub fn contains(&self, id: &PlotId) -> bool {
        self.children.contains(id)
    }

    /// Removes `id` if present. Returns whether anything was removed.
    pub fn remove_child(&mut self, id: &PlotId) -> bool {
        let before = self.children.len();
        self.children.retain(|c| c != id);
        self.children.len() != before
    }

    pub fn children(&self) -> &[PlotId] {
        &self.children
    }
}

/// How a source is downsampled. Fixed once the source is built.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TransformBundle {
    pub resample: String,
    pub agg: Aggregator,
    pub info: Info,
    pub shader: Shader,
    pub glyphspec: GlyphSpec,
}

impl TransformBundle {
    pub fn new(agg: Aggregator, info: Info, shader: Shader, glyphspec: GlyphSpec) -> Self {
        Self {
            resample: ABSTRACT_RENDERING.to_string(),
            agg,
            info,
            shader,
            glyphspec,
        }
    }
}

/// Server-backed data source whose payload is filled by the downsampler.
#[derive(Debug)]
pub struct ServerDataSource {
    data_url: String,
    owner_username: String,
    properties: DataMap,
    transform: TransformBundle,
    data: RwLock<DataMap>,
}

impl ServerDataSource {
    pub fn new(
        data_source: DataSourceRef,
        transform: TransformBundle,
        data: DataMap,
        properties: DataMap,
    ) -> Self {
        Self {
            data_url: data_source.data_url,
            owner_username: data_source.owner_username,
            properties,
            transform,
            data: RwLock::new(data),
        }
    }

    pub fn data_url(&self) -> &str {
        &self.data_url
    }

    pub fn owner_username(&self) -> &str {
        &self.owner_username
    }

    /// Extra properties passed through the builder untouched.
    pub fn properties(&self) -> &DataMap {
        &self.properties
    }

    pub fn transform(&self) -> &TransformBundle {
        &self.transform
    }

    /// Snapshot of the current payload.
    pub fn data(&self) -> DataMap {
        self.data.read().clone()
    }

    pub fn data_keys(&self) -> Vec<String> {
        self.data.read().keys().cloned().collect()
    }

    /// Writes a freshly rendered frame over the previous one. Keys the
    /// payload does not carry (palette, global ranges) are kept.
    pub fn apply(&self, payload: &ImagePayload) -> Result<()> {
        let update = payload.to_data_map()?;
        let mut data = self.data.write();
        for (key, value) in update {
            data.insert(key, value);
        }
        Ok(())
    }

    /// Downsamples `raw` for `plot_state` and stores the result.
    pub fn refresh<E: RenderEngine + ?Sized>(
        &self,
        engine: &E,
        raw: RawData<'_>,
        plot_state: &PlotState,
    ) -> Result<ImagePayload> {
        let payload = downsample_with(engine, raw, &self.transform, plot_state)?;
        self.apply(&payload)?;
        Ok(payload)
    }
}

/// Builds an abstract rendering data source from a plot's glyph renderer.
#[derive(Clone, Debug)]
pub struct SourceBuilder {
    agg: Aggregator,
    info: Info,
    shader: Shader,
    remove_original: bool,
    palette: Vec<String>,
    properties: DataMap,
}

impl Default for SourceBuilder {
    fn default() -> Self {
        Self {
            agg: Aggregator::default(),
            info: Info::default(),
            shader: Shader::default(),
            remove_original: true,
            palette: vec![DEFAULT_PALETTE.to_string()],
            properties: DataMap::new(),
        }
    }
}

impl SourceBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_agg(mut self, agg: Aggregator) -> Self {
        self.agg = agg;
        self
    }

    pub fn with_info(mut self, info: Info) -> Self {
        self.info = info;
        self
    }

    pub fn with_shader(mut self, shader: Shader) -> Self {
        self.shader = shader;
        self
    }

    /// Whether to detach the full-resolution plot from the document.
    pub fn with_remove_original(mut self, remove: bool) -> Self {
        self.remove_original = remove;
        self
    }

    pub fn with_palette<S: Into<String>>(mut self, palette: impl IntoIterator<Item = S>) -> Self {
        self.palette = palette.into_iter().map(Into::into).collect();
        self
    }

    /// Extra data source property, passed through untouched.
    pub fn with_property(mut self, key: &str, value: Value) -> Self {
        self.properties.insert(key.to_string(), value);
        self
    }

    pub fn build(self, plot: &Plot, document: Option<&mut Document>) -> Result<ServerDataSource> {
        let renderer = plot
            .glyph_renderer()
            .ok_or_else(|| Error::NoGlyphRenderer(plot.id.0.clone()))?;
        let glyphspec = GlyphSpec::from_value(&renderer.glyphspec)?;

        let out = self.shader.out();
        let data = match out {
            OutKind::Image => placeholder_payload(&self.palette),
            other => return Err(Error::UnsupportedShaderOutput(other)),
        };

        if self.remove_original {
            if let Some(doc) = document {
                if doc.remove_child(&plot.id) {
                    info!(plot = %plot.id.0, "detached full-resolution plot");
                }
            }
        }

        debug!(
            data_url = %renderer.server_data_source.data_url,
            glyph = %glyphspec.kind,
            "built abstract rendering source"
        );
        let transform = TransformBundle::new(self.agg, self.info, self.shader, glyphspec);
        Ok(ServerDataSource::new(
            renderer.server_data_source.clone(),
            transform,
            data,
            self.properties,
        ))
    }
}

/// [`SourceBuilder`] with every default: Count, Const(1), Id, original
/// plot removed.
pub fn source(plot: &Plot, document: Option<&mut Document>) -> Result<ServerDataSource> {
    SourceBuilder::default().build(plot, document)
}
