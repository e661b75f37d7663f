use approx::assert_relative_eq;
use geo::coord;

use graticule::layers::{GraticuleGeometry, LabelFormat};
use graticule::{
    Graticule, GraticuleConfig, GraticuleError, Location, MapProjection, MapView, ProjectionKind,
    Viewport,
};

const ALL_KINDS: [ProjectionKind; 6] = [
    ProjectionKind::WebMercator,
    ProjectionKind::Equirectangular,
    ProjectionKind::AzimuthalEquidistant,
    ProjectionKind::Gnomonic,
    ProjectionKind::Stereographic,
    ProjectionKind::Orthographic,
];

fn view(kind: ProjectionKind, center: Location, zoom: f64, heading: f64) -> MapView {
    MapView::new(kind.build(center, None), center, Viewport::new(800.0, 600.0))
        .expect("center is representable")
        .with_zoom_level(zoom)
        .with_heading(heading)
}

fn compute(map: &MapView) -> GraticuleGeometry {
    let mut graticule = Graticule::new(GraticuleConfig::default());
    graticule
        .on_viewport_or_style_changed(Some(map))
        .expect("graticule recompute");
    graticule.geometry().cloned().expect("geometry after recompute")
}

#[test]
fn test_center_is_fixed_point_for_every_projection() {
    let center = Location::new(48.2, 16.4);
    for kind in ALL_KINDS {
        let projection: Box<dyn MapProjection> = kind.build(center, None);
        if !projection.is_azimuthal() {
            continue;
        }
        let origin = projection.location_to_map(&center).unwrap();
        assert_eq!((origin.x, origin.y), (0.0, 0.0), "{kind}");
        assert_eq!(
            projection.map_to_location(coord! { x: 0.0, y: 0.0 }).unwrap(),
            center,
            "{kind}"
        );
    }
}

#[test]
fn test_viewport_round_trip_for_every_projection() {
    let center = Location::new(48.2, 16.4);
    for kind in ALL_KINDS {
        let map = view(kind, center, 6.0, 20.0);
        for pixel in [
            coord! { x: 0.0, y: 0.0 },
            coord! { x: 100.0, y: 150.0 },
            coord! { x: 400.0, y: 300.0 },
            coord! { x: 800.0, y: 600.0 },
        ] {
            let location = map.viewport_point_to_location(pixel).unwrap();
            let back = map.location_to_viewport_point(&location).unwrap();
            assert_relative_eq!(back.x, pixel.x, epsilon = 1e-6);
            assert_relative_eq!(back.y, pixel.y, epsilon = 1e-6);
        }
    }
}

#[test]
fn test_every_projection_produces_a_grid() {
    let center = Location::new(-33.9, 151.2);
    for kind in ALL_KINDS {
        let geometry = compute(&view(kind, center, 8.0, 0.0));
        assert!(!geometry.lines.is_empty(), "{kind}");
        assert!(!geometry.labels.is_empty(), "{kind}");
        assert!(geometry.spacing > 0.0 && geometry.spacing <= 60.0);
        for label in &geometry.labels {
            assert!(label.latitude_text.starts_with("S "), "{kind}");
            assert!(label.longitude_text.starts_with("E "), "{kind}");
        }
    }
}

#[test]
fn test_unrotated_mercator_labels_stay_on_screen() {
    let map = view(ProjectionKind::WebMercator, Location::new(51.5, -0.12), 10.0, 0.0);
    let geometry = compute(&map);

    assert_eq!(geometry.format, LabelFormat::DegreesMinutes);
    for label in &geometry.labels {
        assert!((-1e-6..=800.0 + 1e-6).contains(&label.anchor.x));
        assert!((-1e-6..=600.0 + 1e-6).contains(&label.anchor.y));
        assert_eq!(label.rotation, 0.0);
    }
}

#[test]
fn test_rotated_view_bounds_cover_viewport_corners() {
    let map = view(ProjectionKind::Equirectangular, Location::new(10.0, 20.0), 5.0, 45.0);
    let geometry = compute(&map);
    let bounds = geometry.bounds;

    for (x, y) in map.viewport().corners() {
        let corner = map.viewport_point_to_location(coord! { x: x, y: y }).unwrap();
        assert!(corner.latitude >= bounds.south - 1e-9);
        assert!(corner.latitude <= bounds.north + 1e-9);
        assert!(corner.longitude >= bounds.west - 1e-9);
        assert!(corner.longitude <= bounds.east + 1e-9);
    }
    for label in &geometry.labels {
        assert_eq!(label.rotation, 45.0);
    }
}

#[test]
fn test_heading_is_wrapped_for_label_rotation() {
    let geometry = compute(&view(
        ProjectionKind::WebMercator,
        Location::new(0.0, 0.0),
        4.0,
        370.0,
    ));
    assert!(!geometry.labels.is_empty());
    for label in &geometry.labels {
        assert_relative_eq!(label.rotation, 10.0, epsilon = 1e-9);
    }
}

#[test]
fn test_recompute_follows_view_changes() {
    let mut map = view(ProjectionKind::Stereographic, Location::new(70.0, 25.0), 3.0, 0.0);
    let mut graticule = Graticule::new(GraticuleConfig::default());

    graticule.on_viewport_or_style_changed(Some(&map)).unwrap();
    let wide = graticule.geometry().unwrap().spacing;

    map.set_zoom_level(12.0);
    map.set_center(Location::new(69.65, 18.96)).unwrap();
    graticule.on_viewport_or_style_changed(Some(&map)).unwrap();
    let narrow = graticule.geometry().unwrap().clone();

    assert!(narrow.spacing < wide);
    assert_eq!(map.projection().center(), Some(Location::new(69.65, 18.96)));
    assert!(narrow.bounds.south < 69.65 && narrow.bounds.north > 69.65);

    map.set_zoom_level(f64::NEG_INFINITY);
    assert_eq!(
        graticule.on_viewport_or_style_changed(Some(&map)),
        Err(GraticuleError::NonInvertibleViewport)
    );
    assert_eq!(graticule.geometry(), Some(&narrow));
}

#[test]
fn test_geometry_json_document() {
    let geometry = compute(&view(ProjectionKind::Gnomonic, Location::new(35.0, 139.0), 7.0, 0.0));
    let json = serde_json::to_string_pretty(&geometry).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    assert_eq!(value["lines"].as_array().unwrap().len(), geometry.lines.len());
    assert_eq!(value["labels"].as_array().unwrap().len(), geometry.labels.len());
    assert_relative_eq!(value["spacing"].as_f64().unwrap(), geometry.spacing);
    assert!(value["bounds"]["west"].as_f64().unwrap() < 139.0);
}

#[test]
fn test_crs_values_for_overlay_requests() {
    let center = Location::new(52.0, 13.0);
    let gnomonic = ProjectionKind::Gnomonic.build(center, None);
    assert_eq!(gnomonic.crs_value(), "AUTO2:97001,1,13,52");

    let plate = ProjectionKind::Equirectangular.build(center, None);
    let bbox = graticule::BoundingBox::new(50.0, 10.0, 54.0, 16.0);
    let rect = plate.bounding_box_to_bounds(&bbox).unwrap();
    assert_eq!(
        plate.bbox_value(&rect),
        "50.000000,10.000000,54.000000,16.000000"
    );
}
