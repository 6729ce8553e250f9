use crossing_sim::{
    config::VehicleConfig,
    simulation::{Control, Point, Termination, Vehicle, VehicleId},
};

const WIDTH: f32 = 683.0;
const HEIGHT: f32 = 384.0;

fn vehicle_at(x: f32, y: f32) -> Vehicle {
    Vehicle::new(VehicleId(0), Point::new(x, y), 30.0, 6)
}

/// Heading 0 points up, so a positive speed moves the vehicle toward y = 0.
#[test]
fn advance_moves_up_at_heading_zero() {
    let mut vehicle = vehicle_at(90.0, 90.0).with_motion(0.0, 2.0);
    vehicle.advance(WIDTH, HEIGHT);

    assert_eq!(vehicle.position, Point::new(90.0, 88.0));
    assert_eq!(vehicle.distance(), 2.0);
    assert_eq!(vehicle.ticks_alive(), 1);
}

#[test]
fn zero_speed_and_rotation_leave_position_unchanged() {
    let mut vehicle = vehicle_at(120.0, 45.0).with_motion(37.0, 0.0);
    vehicle.apply_rotation_delta(0.0);
    vehicle.advance(WIDTH, HEIGHT);

    assert_eq!(vehicle.position, Point::new(120.0, 45.0));
    assert_eq!(vehicle.total_rotation(), 0.0);
    assert_eq!(vehicle.ticks_alive(), 1);
}

/// Headings above 90 degrees integrate as if they were exactly 90.
#[test]
fn heading_is_capped_at_ninety_during_integration() {
    let mut vehicle = vehicle_at(200.0, 200.0).with_motion(0.0, 1.0);
    vehicle.apply_rotation_delta(135.0);
    assert_eq!(vehicle.heading, 135.0, "rotation itself is not clamped");

    vehicle.advance(WIDTH, HEIGHT);

    assert_eq!(vehicle.heading, 90.0);
    assert!((vehicle.position.x - 201.0).abs() < 1e-4);
    assert!((vehicle.position.y - 200.0).abs() < 1e-4);
    assert_eq!(vehicle.total_rotation(), 135.0);
}

#[test]
fn negative_headings_are_not_capped() {
    let mut vehicle = vehicle_at(200.0, 200.0).with_motion(-90.0, 1.0);
    vehicle.advance(WIDTH, HEIGHT);

    assert_eq!(vehicle.heading, -90.0);
    assert!((vehicle.position.x - 199.0).abs() < 1e-4);
}

#[test]
fn accumulated_rotation_only_grows() {
    let mut vehicle = vehicle_at(100.0, 100.0);
    let mut previous = vehicle.total_rotation();

    for delta in [5.0, -5.0, -12.5, 3.0, -0.25, 90.0] {
        vehicle.apply_rotation_delta(delta);
        assert!(vehicle.total_rotation() > previous, "rotation shrank after delta {}", delta);
        previous = vehicle.total_rotation();
    }

    assert_eq!(vehicle.total_rotation(), 115.75);
    assert_eq!(vehicle.heading, 80.25);
}

/// The centre is pinned into the interior before moving, separately from collision.
#[test]
fn advance_pins_centre_inside_the_map() {
    let mut vehicle = vehicle_at(700.0, -3.0);
    vehicle.advance(WIDTH, HEIGHT);
    assert_eq!(vehicle.position, Point::new(WIDTH - 1.0, 1.0));

    let mut vehicle = vehicle_at(0.0, 384.0);
    vehicle.advance(WIDTH, HEIGHT);
    assert_eq!(vehicle.position, Point::new(1.0, HEIGHT - 1.0));
}

#[test]
fn reversing_reduces_distance() {
    let mut vehicle = vehicle_at(300.0, 200.0).with_motion(0.0, -1.5);
    vehicle.advance(WIDTH, HEIGHT);
    vehicle.advance(WIDTH, HEIGHT);

    assert_eq!(vehicle.distance(), -3.0);
    assert_eq!(vehicle.position, Point::new(300.0, 203.0));
}

#[test]
fn control_steps_speed_towards_limits() {
    let config = VehicleConfig::default();
    let mut vehicle = vehicle_at(300.0, 200.0);

    for _ in 0..30 {
        vehicle.apply_control(Control::new(1.0, 1.0), &config);
    }
    assert!((vehicle.speed - config.max_speed).abs() < 1e-6);

    for _ in 0..60 {
        vehicle.apply_control(Control::new(-1.0, 1.0), &config);
    }
    assert!((vehicle.speed + config.max_speed).abs() < 1e-6);
}

/// There is no neutral steering: zero and NaN both turn counter-clockwise.
#[test]
fn control_always_rotates() {
    let config = VehicleConfig::default();
    let mut vehicle = vehicle_at(300.0, 200.0);

    vehicle.apply_control(Control::new(1.0, 0.7), &config);
    assert_eq!(vehicle.heading, 5.0);

    vehicle.apply_control(Control::new(1.0, 0.0), &config);
    assert_eq!(vehicle.heading, 0.0);

    vehicle.apply_control(Control::new(f32::NAN, f32::NAN), &config);
    assert_eq!(vehicle.heading, -5.0);
    assert!((vehicle.speed - 0.1).abs() < 1e-6, "NaN throttle decelerates");

    assert_eq!(vehicle.total_rotation(), 15.0);
}

#[test]
fn termination_is_permanent_and_keeps_first_reason() {
    let mut vehicle = vehicle_at(300.0, 200.0);
    assert!(vehicle.is_alive());

    assert!(vehicle.terminate(Termination::HitBoundary));
    assert!(!vehicle.terminate(Termination::ReachedGoal));

    assert!(!vehicle.is_alive());
    assert_eq!(vehicle.termination(), Some(Termination::HitBoundary));
}
