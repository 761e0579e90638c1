use ar_downsample::data_types::{DataMap, GlyphSpec, ImagePayload};
use ar_downsample::grid::Grid;
use ar_downsample::mapping::{mapping, Binding, IMAGE_RANGE};
use ar_downsample::proxy::{Aggregator, Info, OutKind, Shader};
use ar_downsample::shading::Rgba;
use ar_downsample::source::{DataSourceRef, ServerDataSource, TransformBundle};
use ar_downsample::{Error, Range1d};
use serde_json::json;
use std::collections::BTreeSet;

fn server_source(shader: Shader, data: DataMap) -> ServerDataSource {
    ServerDataSource::new(
        DataSourceRef {
            data_url: "/data".to_string(),
            owner_username: "user".to_string(),
        },
        TransformBundle::new(
            Aggregator::Count,
            Info::default(),
            shader,
            GlyphSpec::square("a", "b", 1.0),
        ),
        data,
        DataMap::new(),
    )
}

#[test]
fn test_image_mapping_keys() {
    let mut data = DataMap::new();
    data.insert("image".into(), json!([]));
    data.insert("dw".into(), json!([10]));
    data.insert("palette".into(), json!(["Spectral-11"]));
    let src = server_source(Shader::Sqrt, data);

    let m = mapping(&src).unwrap();

    let keys: BTreeSet<&str> = m.keys().map(String::as_str).collect();
    let expected: BTreeSet<&str> = ["image", "dw", "palette", "x_range", "y_range"]
        .into_iter()
        .collect();
    assert_eq!(keys, expected);

    assert_eq!(m["image"], Binding::Field("image".to_string()));
    assert_eq!(m["palette"], Binding::Field("palette".to_string()));
    assert_eq!(m["x_range"], Binding::Range(Range1d::new(0.0, 500.0)));
    assert_eq!(m["y_range"], Binding::Range(IMAGE_RANGE));
}

#[test]
fn test_mapping_tracks_current_payload() {
    let src = server_source(Shader::Id, DataMap::new());
    assert_eq!(mapping(&src).unwrap().len(), 2);

    src.apply(&ImagePayload::from_grid(Grid::new(2, 2))).unwrap();
    let m = mapping(&src).unwrap();
    for key in ["image", "x", "y", "dw", "dh", "x_range", "y_range"] {
        assert!(m.contains_key(key), "missing {key}");
    }
    assert_eq!(m.len(), 7);
}

#[test]
fn test_non_image_mapping_fails() {
    let shader = Shader::InterpolateColor {
        low: Rgba::new(0, 0, 0, 0),
        high: Rgba::new(255, 255, 255, 255),
    };
    let src = server_source(shader, DataMap::new());
    let err = mapping(&src).unwrap_err();
    assert!(matches!(err, Error::UnsupportedMappingOutput(OutKind::RgbImage)));
    assert!(err.to_string().contains("only image type supported"));
}

#[test]
fn test_mapping_serializes_for_client() {
    let mut data = DataMap::new();
    data.insert("image".into(), json!([]));
    let src = server_source(Shader::Id, data);
    let value = serde_json::to_value(mapping(&src).unwrap()).unwrap();
    assert_eq!(value["image"], "image");
    assert_eq!(value["x_range"], json!({"start": 0.0, "end": 500.0}));
}
