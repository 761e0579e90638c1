//! Property mapping from a source's payload to the client image glyph.

use crate::data_types::Range1d;
use crate::error::{Error, Result};
use crate::proxy::OutKind;
use crate::source::ServerDataSource;
use serde::Serialize;
use std::collections::BTreeMap;

/// Fixed view range the image glyph is bound to.
pub const IMAGE_RANGE: Range1d = Range1d::new(0.0, 500.0);

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Binding {
    /// Glyph property read from the payload field of that name.
    Field(String),
    Range(Range1d),
}

pub type PropertyMapping = BTreeMap<String, Binding>;

/// Binds every payload field to the glyph property of the same name, plus
/// `x_range`/`y_range`. Recomputed from the source's current payload.
pub fn mapping(source: &ServerDataSource) -> Result<PropertyMapping> {
    match source.transform().shader.out() {
        OutKind::Image => {
            let mut m: PropertyMapping = source
                .data_keys()
                .into_iter()
                .map(|k| (k.clone(), Binding::Field(k)))
                .collect();
            m.insert("x_range".to_string(), Binding::Range(IMAGE_RANGE));
            m.insert("y_range".to_string(), Binding::Range(IMAGE_RANGE));
            Ok(m)
        }
        other => Err(Error::UnsupportedMappingOutput(other)),
    }
}
