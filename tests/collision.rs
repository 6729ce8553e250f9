use crossing_sim::simulation::{
    AliveTransition, CollisionDetector, Point, RasterMap, Rect, Termination, Vehicle, VehicleId,
};

fn vehicle_at(x: f32, y: f32) -> Vehicle {
    Vehicle::new(VehicleId(0), Point::new(x, y), 10.0, 0)
}

fn other_at(x: f32, y: f32) -> Rect {
    Rect::from_center(Point::new(x, y), 10.0, 10.0)
}

#[test]
fn open_ground_is_safe() {
    let map = RasterMap::open(100, 100).unwrap();
    assert_eq!(CollisionDetector::detect(&vehicle_at(50.0, 50.0), &map, &[]), None);
}

#[test]
fn centre_on_boundary_cell() {
    let mut map = RasterMap::open(100, 100).unwrap();
    map.fill(40, 40, 20, 20);

    assert_eq!(
        CollisionDetector::detect(&vehicle_at(50.0, 50.0), &map, &[]),
        Some(Termination::HitBoundary)
    );
    // Box overlaps the boundary but the centre does not
    assert_eq!(CollisionDetector::detect(&vehicle_at(36.0, 50.0), &map, &[]), None);
}

#[test]
fn centre_on_or_past_edge_is_off_map() {
    let map = RasterMap::open(100, 100).unwrap();
    for (x, y) in [(0.0, 50.0), (100.0, 50.0), (50.0, 0.0), (50.0, 100.0), (-3.0, -3.0)] {
        assert_eq!(
            CollisionDetector::detect(&vehicle_at(x, y), &map, &[]),
            Some(Termination::OffMap),
            "({}, {})",
            x,
            y
        );
    }
}

#[test]
fn map_checks_win_over_vehicle_overlap() {
    let map = RasterMap::open(100, 100).unwrap();
    let vehicle = vehicle_at(0.0, 50.0);
    assert_eq!(
        CollisionDetector::detect(&vehicle, &map, &[other_at(2.0, 50.0)]),
        Some(Termination::OffMap)
    );
}

#[test]
fn overlapping_boxes_collide_but_touching_edges_do_not() {
    let map = RasterMap::open(100, 100).unwrap();
    let vehicle = vehicle_at(50.0, 50.0);

    assert_eq!(
        CollisionDetector::detect(&vehicle, &map, &[other_at(58.0, 50.0)]),
        Some(Termination::HitVehicle)
    );
    assert_eq!(CollisionDetector::detect(&vehicle, &map, &[other_at(60.0, 50.0)]), None);
    assert_eq!(
        CollisionDetector::detect(&vehicle, &map, &[other_at(80.0, 80.0), other_at(45.0, 56.0)]),
        Some(Termination::HitVehicle)
    );
}

#[test]
fn evaluate_terminates_once() {
    let map = RasterMap::open(100, 100).unwrap();
    let mut vehicle = vehicle_at(50.0, 50.0);

    assert_eq!(CollisionDetector::evaluate(&mut vehicle, &map, &[]), AliveTransition::StillAlive);
    assert!(vehicle.is_alive());

    vehicle.position = Point::new(150.0, 50.0);
    assert_eq!(
        CollisionDetector::evaluate(&mut vehicle, &map, &[]),
        AliveTransition::Died(Termination::OffMap)
    );
    assert_eq!(vehicle.termination(), Some(Termination::OffMap));

    // Back on the map and overlapping someone: still dead, reason unchanged
    vehicle.position = Point::new(50.0, 50.0);
    assert_eq!(
        CollisionDetector::evaluate(&mut vehicle, &map, &[other_at(52.0, 50.0)]),
        AliveTransition::AlreadyDead
    );
    assert_eq!(vehicle.termination(), Some(Termination::OffMap));
}

#[test]
fn collision_reasons_are_classified() {
    assert!(Termination::OffMap.is_collision());
    assert!(Termination::HitBoundary.is_collision());
    assert!(Termination::HitVehicle.is_collision());
    assert!(!Termination::ReachedGoal.is_collision());
    assert!(!Termination::TimedOut.is_collision());
}
