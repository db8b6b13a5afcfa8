use banca::geo::{GeoPoint, MapBounds, Viewport, haversine_km};

fn viewport(lat: f64, lon: f64, lat_delta: f64, lon_delta: f64) -> Viewport {
    Viewport {
        center: GeoPoint::new(lat, lon),
        latitude_delta: lat_delta,
        longitude_delta: lon_delta,
    }
}

#[test]
fn contains_is_inclusive() {
    let bounds = MapBounds::default();
    assert!(bounds.contains(11.25, 125.0));
    assert!(bounds.contains(13.0, 126.5));
    assert!(bounds.contains(9.5, 123.5));
    assert!(!bounds.contains(20.0, 125.0));
    assert!(!bounds.contains(11.25, 130.0));
    assert!(!bounds.contains(9.49, 125.0));
}

#[test]
fn deltas_are_clamped_into_the_zoom_range() {
    let bounds = MapBounds::default();
    let v = bounds.constrain(viewport(11.25, 125.0, 0.0001, 9999.0));
    assert_eq!(v.latitude_delta, 0.01);
    assert_eq!(v.longitude_delta, 4.0);
}

#[test]
fn interior_viewport_is_untouched() {
    let bounds = MapBounds::default();
    let input = viewport(11.25, 125.0, 1.0, 1.0);
    assert_eq!(bounds.constrain(input), input);
}

#[test]
fn south_edge_pushes_center_up() {
    let bounds = MapBounds::default();
    let v = bounds.constrain(viewport(9.5, 125.0, 1.0, 1.0));
    assert_eq!(v.center.latitude, 10.0);
    assert_eq!(v.center.longitude, 125.0);
}

#[test]
fn east_edge_pushes_center_west() {
    let bounds = MapBounds::default();
    let v = bounds.constrain(viewport(11.0, 126.5, 1.0, 1.0));
    assert_eq!(v.center.longitude, 126.0);
}

#[test]
fn far_outside_center_is_pulled_back_inside() {
    let bounds = MapBounds::default();
    let v = bounds.constrain(viewport(-40.0, 10.0, 0.5, 0.5));
    let half = 0.25;
    assert!(v.center.latitude - half >= bounds.south);
    assert!(v.center.latitude + half <= bounds.north);
    assert!(v.center.longitude - half >= bounds.west);
    assert!(v.center.longitude + half <= bounds.east);
}

#[test]
fn constrain_is_idempotent() {
    let bounds = MapBounds::default();
    let inputs = [
        viewport(11.25, 125.0, 1.0, 1.0),
        viewport(9.0, 123.0, 0.5, 0.5),
        viewport(13.5, 127.0, 2.0, 3.0),
        viewport(-40.0, 10.0, 0.001, 9999.0),
        // Span wider than the rectangle: both pushes fire per axis.
        viewport(11.25, 125.0, 4.0, 4.0),
        viewport(9.5, 126.5, 4.0, 4.0),
    ];
    for input in inputs {
        let once = bounds.constrain(input);
        let twice = bounds.constrain(once);
        assert_eq!(once, twice, "input {input:?}");
    }
}

#[test]
fn visible_edges_stay_inside_for_spans_within_the_rectangle() {
    let bounds = MapBounds::default();
    for (lat, lon) in [(9.5, 123.5), (13.0, 126.5), (0.0, 0.0), (11.0, 125.0)] {
        for delta in [0.01, 0.5, 1.5, 3.0] {
            let v = bounds.constrain(viewport(lat, lon, delta, delta));
            let half = delta / 2.0;
            assert!(v.center.latitude - half >= bounds.south - 1e-9);
            assert!(v.center.latitude + half <= bounds.north + 1e-9);
            assert!(v.center.longitude - half >= bounds.west - 1e-9);
            assert!(v.center.longitude + half <= bounds.east + 1e-9);
        }
    }
}

#[test]
fn oversized_span_lands_on_the_max_side_write() {
    let bounds = MapBounds::default();
    // Latitude span is 3.5, so a 4.0 delta fires both pushes; the north
    // write is last.
    let v = bounds.constrain(viewport(11.25, 125.0, 4.0, 1.0));
    assert_eq!(v.center.latitude, 11.0);
}

#[test]
fn default_viewport_is_the_region_center() {
    let bounds = MapBounds::default();
    let v = bounds.default_viewport();
    assert_eq!(v.center, GeoPoint::new(11.25, 125.0));
    assert_eq!(v.latitude_delta, 3.5);
}

#[test]
fn haversine_zero_for_identical_points() {
    let p = GeoPoint::new(11.0, 125.0);
    assert!(haversine_km(p, p).abs() < 1e-9);
}

#[test]
fn haversine_one_degree_of_latitude() {
    let d = haversine_km(GeoPoint::new(11.0, 125.0), GeoPoint::new(12.0, 125.0));
    assert!((d - 111.19).abs() < 0.1, "distance {d}");
}

#[test]
fn haversine_is_symmetric() {
    let a = GeoPoint::new(11.0, 125.0);
    let b = GeoPoint::new(11.5, 125.5);
    assert!((haversine_km(a, b) - haversine_km(b, a)).abs() < 1e-9);
}

#[test]
fn haversine_hundred_meters() {
    // Roughly 0.0009 degrees of latitude is 100 m.
    let d = haversine_km(GeoPoint::new(11.0, 125.0), GeoPoint::new(11.0009, 125.0));
    assert!(d > 0.09 && d < 0.11, "distance {d}");
}
