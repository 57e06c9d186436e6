use geokernel::{
    classify_edges, generate, robust_union, validate_layout, BuildingSpec, EdgeType, GridPos,
    KernelConfig, Rect, Room, RoofType, SingleRoomFloorplan,
};

fn room(id: u32, rect: Rect) -> Room {
    Room {
        rect,
        floor_index: 0,
        id,
    }
}

#[test]
fn unit_cube_floor_scenario() {
    let cfg = KernelConfig::default();
    let rooms = [room(1, Rect::new(0.0, 0.0, 10.0, 8.0))];
    let footprint = robust_union(&rooms, &cfg).unwrap();
    assert!((footprint_area(&footprint) - 80.0).abs() < 1e-6);

    let edges = classify_edges(&footprint, &rooms, &cfg);
    assert_eq!(edges.len(), 4);
    assert!(edges.iter().all(|e| e.edge_type == EdgeType::Exterior));
}

#[test]
fn shared_wall_scenario() {
    let cfg = KernelConfig::default();
    let rooms = [
        room(1, Rect::new(0.0, 0.0, 2.0, 2.0)),
        room(2, Rect::new(2.0, 0.0, 4.0, 2.0)),
    ];
    let footprint = robust_union(&rooms, &cfg).unwrap();
    assert!((footprint_area(&footprint) - 8.0).abs() < 1e-6);

    let edges = classify_edges(&footprint, &rooms, &cfg);
    assert_eq!(edges.len(), 7);
    let interior_count = edges
        .iter()
        .filter(|e| e.edge_type == EdgeType::Interior)
        .count();
    assert_eq!(interior_count, 1);
}

#[test]
fn drift_tolerant_union_scenario() {
    let cfg = KernelConfig::default();
    let rooms = [
        room(1, Rect::new(0.0, 0.0, 2.0001, 2.0)),
        room(2, Rect::new(1.9999, 0.0, 4.0, 2.0)),
    ];
    let footprint = robust_union(&rooms, &cfg).unwrap();
    assert!((footprint_area(&footprint) - 8.0).abs() < 1e-3);
}

#[test]
fn integer_grid_identity_scenario() {
    let cfg = KernelConfig::default();
    let pos = GridPos::from_meters(1.0, 0.25, 0.025, geokernel::SnapMode::Micro, &cfg);
    assert_eq!(pos.x, 40);
    assert_eq!(pos.y, 10);
    assert_eq!(pos.z, 1);
    assert_eq!(pos.to_meters(&cfg).0, 1.0);
}

#[test]
fn collision_scenario_reports_both_ids() {
    let cfg = KernelConfig::default();
    let rooms = [
        room(1, Rect::new(0.0, 0.0, 2.0, 2.0)),
        room(2, Rect::new(1.5, 0.0, 3.5, 2.0)),
    ];
    let err = validate_layout(&rooms, &cfg).unwrap_err();
    assert!(err.contains("LAYOUT_CONFLICT"));
    assert!(err.contains('1') && err.contains('2'));
}

#[test]
fn multi_floor_stacking_scenario() {
    let cfg = KernelConfig::default();
    let spec = BuildingSpec {
        width: 6.0,
        depth: 6.0,
        floors: 3,
        seed: 99,
        roof_type: RoofType::Flat,
    };
    let dir = tempfile::tempdir().unwrap();
    let output = generate(
        &spec,
        &SingleRoomFloorplan,
        dir.path(),
        "2026-07-27T00:00:00Z",
        &cfg,
    )
    .unwrap();
    assert_eq!(output.floors.len(), 3);
    assert_eq!(output.floors[2].index, 2);
}

fn footprint_area(footprint: &geokernel::Footprint) -> f64 {
    use geo::Area;
    footprint.unsigned_area()
}
