use ar_downsample::data_types::{ColumnMap, PlotState, RawData};
use ar_downsample::proxy::{Aggregator, Info, Shader};
use ar_downsample::rendering::NativeEngine;
use ar_downsample::source::{
    DataSourceRef, Document, GlyphRenderer, Plot, PlotRenderer, SourceBuilder,
};
use ar_downsample::{mapping, Range1d};
use rand::Rng;
use serde_json::json;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut rng = rand::rng();
    let n = 500_000;

    // two gaussian-ish blobs
    let mut xs = Vec::with_capacity(n);
    let mut ys = Vec::with_capacity(n);
    for i in 0..n {
        let (cx, cy) = if i % 3 == 0 { (20.0, 70.0) } else { (65.0, 30.0) };
        let spread: f64 = (0..4).map(|_| rng.random_range(-5.0..5.0)).sum();
        let angle = rng.random_range(0.0..std::f64::consts::TAU);
        xs.push(cx + spread * angle.cos());
        ys.push(cy + spread * angle.sin());
    }
    let mut data = ColumnMap::new();
    data.insert("x".to_string(), xs);
    data.insert("y".to_string(), ys);

    let plot = Plot::new("scatter").with_renderer(PlotRenderer::Glyph(GlyphRenderer {
        glyphspec: json!({
            "type": "square",
            "x": {"field": "x"},
            "y": {"field": "y"},
            "size": {"default": 0.5}
        }),
        server_data_source: DataSourceRef {
            data_url: "/data/scatter".to_string(),
            owner_username: "demo".to_string(),
        },
    }));
    let mut document = Document::new();
    document.add_child(plot.id.clone());

    let source = SourceBuilder::new()
        .with_agg(Aggregator::Count)
        .with_info(Info::default())
        .with_shader(Shader::Cuberoot.then(Shader::Interpolate {
            low: 0.0,
            high: 255.0,
        }))
        .build(&plot, Some(&mut document))?;
    println!("document children after build: {}", document.children().len());

    let engine = NativeEngine::default();
    for (zoom, state) in [
        ("full", view(0.0, 100.0)),
        ("zoomed", view(40.0, 90.0)),
    ] {
        let payload = source.refresh(&engine, RawData::Columns(&data), &state)?;
        let image = &payload.image[0];
        println!(
            "{zoom}: {}x{} canvas, peak {:.1}",
            payload.dw[0],
            payload.dh[0],
            image.max_value().unwrap_or(0.0)
        );
    }

    let bindings = mapping(&source)?;
    println!("{}", serde_json::to_string_pretty(&bindings)?);
    Ok(())
}

fn view(start: f64, end: f64) -> PlotState {
    PlotState::new(
        Range1d::new(0.0, 640.0),
        Range1d::new(0.0, 480.0),
        Range1d::new(start, end),
        Range1d::new(start, end),
    )
}
