// Mapping property tests
// Invariants of the angle resolver, the coordinate mapper and the
// validator, checked over generated inputs.

use graftmark_core::{CenteringMode, Vessel, YOrientation};
use graftmark_planner::{
    angle_to_hour, resolve_angle, CoordinateMapper, Fenestration, FenestrationSet, GraftTemplate,
    ValidationLimits,
};
use proptest::prelude::*;

#[test]
fn test_hour_round_trip_for_every_convention() {
    for anterior in 1..=12u8 {
        for hour in 1..=12u8 {
            let angle = resolve_angle(hour, anterior).unwrap();
            assert!((0.0..360.0).contains(&angle));
            assert_eq!(angle_to_hour(angle, anterior).unwrap(), hour);
        }
    }
}

#[test]
fn test_device_a_circumference() {
    let t = GraftTemplate::new("device-a", "Device A", 24.0, 145.0).unwrap();
    assert!((t.circumference() - 75.40).abs() < 0.01);
}

proptest! {
    #[test]
    fn prop_edge_and_center_differ_by_half_circumference(
        angle in 0.0f64..360.0,
        diameter in 10.0f64..46.0,
    ) {
        let t = GraftTemplate::new("t", "T", diameter, 150.0).unwrap();
        let edge = CoordinateMapper::new(&t, CenteringMode::Edge, YOrientation::DistalDown);
        let center = CoordinateMapper::new(&t, CenteringMode::Center, YOrientation::DistalDown);
        let c = t.circumference();

        let xe = edge.map_x(angle).unwrap();
        let xc = center.map_x(angle).unwrap();
        prop_assert!(xe >= 0.0 && xe < c);
        prop_assert!(xc >= 0.0 && xc < c);

        let diff = (xc - xe).rem_euclid(c);
        prop_assert!((diff - c / 2.0).abs() < 1e-6, "diff {} vs {}", diff, c / 2.0);
    }

    #[test]
    fn prop_orientations_mirror_each_other(d in 0.0f64..=145.0) {
        let t = GraftTemplate::new("device-a", "Device A", 24.0, 145.0).unwrap();
        let down = CoordinateMapper::new(&t, CenteringMode::Edge, YOrientation::DistalDown);
        let up = CoordinateMapper::new(&t, CenteringMode::Edge, YOrientation::ProximalDown);
        let sum = down.map_y(d).unwrap() + up.map_y(d).unwrap();
        prop_assert!((sum - 145.0).abs() < 1e-9);
    }

    #[test]
    fn prop_accepted_sets_respect_min_spacing(
        distances in proptest::collection::vec(0.0f64..=145.0, 1..20),
    ) {
        let t = GraftTemplate::new("device-a", "Device A", 24.0, 145.0).unwrap();
        let limits = ValidationLimits::default();
        let mut set = FenestrationSet::new();
        for d in distances {
            let candidate = Fenestration::new(Vessel::Sma, d, 0.0, 6.0).unwrap();
            match set.try_add(&t, candidate, &limits) {
                Ok(next) => set = next,
                Err(e) => prop_assert!(e.is_collision()),
            }
        }
        let members = set.as_slice();
        for (i, a) in members.iter().enumerate() {
            for b in &members[i + 1..] {
                prop_assert!((a.axial_distance - b.axial_distance).abs() >= limits.min_spacing);
            }
        }
    }
}
