use ar_downsample::data_types::{ColumnMap, EngineConfig, GlyphSpec, PlotState, RawData};
use ar_downsample::downsample::{downsample, downsample_with};
use ar_downsample::grid::Grid;
use ar_downsample::proxy::{Aggregator, Info, Shader};
use ar_downsample::rendering::NativeEngine;
use ar_downsample::source::TransformBundle;
use ar_downsample::Range1d;

// One screen pixel per data unit on a 100 x 100 canvas.
fn unit_state() -> PlotState {
    PlotState::new(
        Range1d::new(0.0, 100.0),
        Range1d::new(0.0, 100.0),
        Range1d::new(0.0, 100.0),
        Range1d::new(0.0, 100.0),
    )
}

fn diagonal() -> ColumnMap {
    let mut data = ColumnMap::new();
    data.insert("a".to_string(), vec![1.0, 2.0, 3.0]);
    data.insert("b".to_string(), vec![1.0, 2.0, 3.0]);
    data
}

fn render(agg: Aggregator, info: Info, shader: Shader) -> Grid {
    let data = diagonal();
    let transform = TransformBundle::new(agg, info, shader, GlyphSpec::square("a", "b", 5.0));
    let mut payload = downsample(RawData::Columns(&data), &transform, &unit_state()).unwrap();
    assert_eq!(payload.dw, vec![100]);
    assert_eq!(payload.dh, vec![100]);
    payload.image.remove(0)
}

#[test]
fn test_count_coverage() {
    let grid = render(Aggregator::Count, Info::default(), Shader::Id);
    assert_eq!(grid.shape(), (100, 100));

    // the three squares overlap around data (2, 2), the canvas center
    assert_eq!(grid.get(50, 50), Some(3.0));
    // bottom-left corner only sees the first square, top-right the last
    assert_eq!(grid.get(0, 0), Some(1.0));
    assert_eq!(grid.get(99, 99), Some(1.0));
    // no square spans both the far left and the far top
    assert_eq!(grid.get(0, 99), Some(0.0));
    assert_eq!(grid.max_value(), Some(3.0));
    assert!(grid.cells().iter().all(|v| [0.0, 1.0, 2.0, 3.0].contains(v)));
}

#[test]
fn test_sum_scales_with_info() {
    let count = render(Aggregator::Count, Info::default(), Shader::Id);
    let sum = render(Aggregator::Sum, Info::constant(2.5), Shader::Id);
    for (c, s) in count.cells().iter().zip(sum.cells()) {
        assert_eq!(*s, c * 2.5);
    }
}

#[test]
fn test_root_shaders() {
    let grid = render(Aggregator::Count, Info::default(), Shader::Sqrt);
    assert_eq!(grid.get(50, 50), Some(3.0f64.sqrt()));
    assert_eq!(grid.get(0, 0), Some(1.0));

    let grid = render(Aggregator::Count, Info::default(), Shader::Cuberoot);
    assert_eq!(grid.get(50, 50), Some(3.0f64.cbrt()));
}

#[test]
fn test_interpolate_shader() {
    let grid = render(
        Aggregator::Count,
        Info::default(),
        Shader::Interpolate {
            low: 0.0,
            high: 1.0,
        },
    );
    assert_eq!(grid.get(50, 50), Some(1.0));
    assert_eq!(grid.get(0, 0), Some(0.0));
    assert!(grid.cells().iter().all(|v| (0.0..=1.0).contains(v)));
}

#[test]
fn test_nan_points_are_skipped() {
    let mut data = diagonal();
    data.insert("a".to_string(), vec![1.0, f64::NAN, 3.0]);
    let transform = TransformBundle::new(
        Aggregator::Count,
        Info::default(),
        Shader::Id,
        GlyphSpec::square("a", "b", 5.0),
    );
    let payload = downsample(RawData::Columns(&data), &transform, &unit_state()).unwrap();
    assert_eq!(payload.image[0].max_value(), Some(2.0));
}

#[test]
fn test_empty_data_renders_blank_canvas() {
    let mut data = ColumnMap::new();
    data.insert("a".to_string(), vec![]);
    data.insert("b".to_string(), vec![]);
    let transform = TransformBundle::new(
        Aggregator::Count,
        Info::default(),
        Shader::Interpolate {
            low: 0.0,
            high: 1.0,
        },
        GlyphSpec::square("a", "b", 5.0),
    );
    let payload = downsample(RawData::Columns(&data), &transform, &unit_state()).unwrap();
    assert_eq!(payload.image[0].shape(), (100, 100));
    assert!(payload.image[0].cells().iter().all(|v| *v == 0.0));
}

#[test]
fn test_band_size_does_not_change_output() {
    let data = diagonal();
    let transform = TransformBundle::new(
        Aggregator::Sum,
        Info::constant(0.1),
        Shader::Id,
        GlyphSpec::square("a", "b", 5.0),
    );
    let narrow = NativeEngine::new(EngineConfig {
        band_rows: 1,
        ..Default::default()
    });
    let wide = NativeEngine::new(EngineConfig {
        band_rows: 1000,
        ..Default::default()
    });

    let a = downsample_with(&narrow, RawData::Columns(&data), &transform, &unit_state()).unwrap();
    let b = downsample_with(&wide, RawData::Columns(&data), &transform, &unit_state()).unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_flipped_ranges_render() {
    let state = PlotState::new(
        Range1d::new(100.0, 0.0),
        Range1d::new(0.0, 100.0),
        Range1d::new(100.0, 0.0),
        Range1d::new(0.0, 100.0),
    );
    let data = diagonal();
    let transform = TransformBundle::new(
        Aggregator::Count,
        Info::default(),
        Shader::Id,
        GlyphSpec::square("a", "b", 5.0),
    );
    let payload = downsample(RawData::Columns(&data), &transform, &state).unwrap();
    assert_eq!(payload.dw, vec![100]);
    assert_eq!(payload.image[0].max_value(), Some(3.0));
}

#[test]
fn test_refresh_updates_server_source() {
    use ar_downsample::source::{DataSourceRef, ServerDataSource};
    use ar_downsample::data_types::{placeholder_payload, DataMap};
    use serde_json::json;

    let palette = vec!["Greys-9".to_string()];
    let src = ServerDataSource::new(
        DataSourceRef {
            data_url: "/data/points".to_string(),
            owner_username: "user".to_string(),
        },
        TransformBundle::new(
            Aggregator::Count,
            Info::default(),
            Shader::Id,
            GlyphSpec::square("a", "b", 5.0),
        ),
        placeholder_payload(&palette),
        DataMap::new(),
    );

    let data = diagonal();
    let payload = src
        .refresh(&NativeEngine::default(), RawData::Columns(&data), &unit_state())
        .unwrap();

    let stored = src.data();
    assert_eq!(stored["dw"], json!([100]));
    assert_eq!(stored["dh"], json!([100]));
    assert_eq!(stored["x"], json!([0.0]));
    assert_eq!(stored["palette"], json!(["Greys-9"]));
    assert_eq!(stored["global_x_range"], json!([0, 10]));
    assert_eq!(stored["image"], serde_json::to_value(&payload.image).unwrap());
}
