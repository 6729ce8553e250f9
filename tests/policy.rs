use crossing_sim::{
    policy::{ControlPolicy, FixedControl, Gap, GapFollower, Policy},
    simulation::Control,
};

#[test]
fn steers_toward_centre_of_widest_gap() {
    let mut follower = GapFollower::new(0.6);
    let control = follower.decide(&[0.2, 0.2, 1.0, 1.0, 1.0, 0.2]).unwrap();

    assert!((control.steer - 0.5).abs() < 1e-6);
    assert_eq!(control.throttle, 1.0);
}

#[test]
fn backs_off_when_boxed_in() {
    let mut follower = GapFollower::new(0.6);

    let control = follower.decide(&[0.1; 6]).unwrap();
    assert_eq!(control.steer, 0.0);
    assert_eq!(control.throttle, -1.0);

    let control = follower.decide(&[0.1, 0.2, 0.5]).unwrap();
    assert!((control.steer - 0.4).abs() < 1e-6);
}

#[test]
fn first_of_equally_wide_gaps_wins() {
    let follower = GapFollower::new(0.6);

    assert_eq!(follower.find_widest_gap(&[1.0, 0.0, 1.0]), Some(Gap { start: 0, end: 0 }));
    assert_eq!(follower.find_widest_gap(&[1.0, 0.0, 1.0, 1.0]), Some(Gap { start: 2, end: 3 }));
    assert_eq!(follower.find_widest_gap(&[0.0, 0.0]), None);
}

#[test]
fn gap_follower_needs_readings() {
    let mut follower = GapFollower::new(0.6);
    assert!(follower.decide(&[]).is_err());
}

#[test]
fn fixed_control_ignores_observation() {
    let mut fixed = FixedControl::new(1.0, -1.0);
    assert_eq!(fixed.decide(&[]).unwrap(), Control::new(1.0, -1.0));
    assert_eq!(fixed.decide(&[0.3; 6]).unwrap(), Control::new(1.0, -1.0));
}

#[test]
fn policy_enum_dispatches() {
    let mut fixed = Policy::new_fixed(-1.0, 1.0);
    let mut gap = Policy::new_gap_follow(0.6);

    assert_eq!(fixed.name(), "fixed");
    assert_eq!(gap.name(), "gap");
    assert_eq!(fixed.decide(&[1.0; 6]).unwrap(), Control::new(-1.0, 1.0));
    assert_eq!(gap.decide(&[1.0; 6]).unwrap().throttle, 1.0);
}
