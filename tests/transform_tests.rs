use ar_downsample::glyphset::Bounds;
use ar_downsample::transform::{zoom_fit, Balance, ViewTransform};
use glam::DVec2;

#[test]
fn test_round_trip() {
    let ivt = ViewTransform::new(DVec2::new(-30.0, 12.0), DVec2::new(4.0, 0.5));
    let p = DVec2::new(7.5, -2.0);
    let screen = ivt.data_to_screen(p);
    assert_eq!(screen, DVec2::new(0.0, 11.0));
    assert!((ivt.screen_to_data(screen) - p).length() < 1e-12);
}

#[test]
fn test_bounds_to_screen() {
    let ivt = ViewTransform::new(DVec2::new(10.0, 0.0), DVec2::new(2.0, 3.0));
    let rect = ivt.bounds_to_screen(&Bounds::new(1.0, 1.0, 2.0, 2.0));
    assert_eq!(rect, Bounds::new(12.0, 3.0, 4.0, 6.0));
}

#[test]
fn test_zoom_fit_maps_bounds_onto_canvas() {
    let bounds = Bounds::new(-1.5, 100.0, 7.0, 50.0);
    let size = DVec2::new(350.0, 200.0);
    let ivt = zoom_fit(size, &bounds, Balance::Unbalanced);

    let lo = ivt.data_to_screen(DVec2::new(bounds.x, bounds.y));
    let hi = ivt.data_to_screen(DVec2::new(bounds.max_x(), bounds.max_y()));
    assert!(lo.length() < 1e-9);
    assert!((hi - size).length() < 1e-9);
}

#[test]
fn test_balanced_fit_keeps_aspect() {
    let bounds = Bounds::new(0.0, 0.0, 10.0, 40.0);
    let ivt = zoom_fit(DVec2::new(100.0, 100.0), &bounds, Balance::Balanced);
    assert_eq!(ivt.scale(), DVec2::splat(2.5));
    assert_eq!(Balance::default(), Balance::Unbalanced);
}
