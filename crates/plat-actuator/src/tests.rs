//! Unit tests for plat-actuator.

use nalgebra::DVector;

use crate::{
    ActionPreprocessor, ActionSpace, ActionValue, Actuation, Actuator, ActuatorError,
    ActuatorSet, Bounds, PostActivation,
};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn bounds(min: f64, max: f64) -> Bounds {
    Bounds::new(min, max).unwrap()
}

/// thrust_x / thrust_y scalar channels plus a two-wide gimbal channel.
fn three_channel_set() -> ActuatorSet {
    ActuatorSet::new(vec![
        Actuator::continuous("thrust_x", bounds(-1.0, 1.0), &[0.0]).unwrap(),
        Actuator::continuous("gimbal", bounds(-0.5, 0.5), &[0.1, 0.2]).unwrap(),
        Actuator::continuous("thrust_y", bounds(-1.0, 1.0), &[0.5]).unwrap(),
    ])
    .unwrap()
}

// ── Actuator / Bounds ─────────────────────────────────────────────────────────

#[cfg(test)]
mod actuator {
    use super::*;

    #[test]
    fn inverted_bounds_rejected() {
        assert!(matches!(Bounds::new(1.0, -1.0), Err(ActuatorError::InvalidBounds { .. })));
        assert!(Bounds::new(f64::NAN, 1.0).is_err());
        assert!(Bounds::try_from([2.0, 2.0]).is_ok());
    }

    #[test]
    fn empty_default_rejected() {
        let err = Actuator::continuous("a", bounds(0.0, 1.0), &[]).unwrap_err();
        assert!(matches!(err, ActuatorError::EmptyDefault(name) if name == "a"));
    }

    #[test]
    fn width_follows_default() {
        let a = Actuator::continuous("gimbal", bounds(-1.0, 1.0), &[0.0, 0.0, 0.0]).unwrap();
        assert_eq!(a.width(), 3);
    }

    #[test]
    fn set_bounds_ignored_for_discrete() {
        let mut d = Actuator::discrete("mode", &[0.0]).unwrap();
        d.set_bounds(bounds(0.0, 3.0));
        assert_eq!(d.bounds(), None);

        let mut c = Actuator::continuous("c", bounds(-5.0, 5.0), &[0.0]).unwrap();
        c.set_bounds(bounds(-1.0, 2.0));
        assert_eq!(c.bounds(), Some(bounds(-1.0, 2.0)));
    }
}

// ── ActuatorSet ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod actuator_set {
    use super::*;

    #[test]
    fn duplicate_names_rejected() {
        let result = ActuatorSet::new(vec![
            Actuator::continuous("a", bounds(0.0, 1.0), &[0.0]).unwrap(),
            Actuator::continuous("a", bounds(0.0, 1.0), &[0.0]).unwrap(),
        ]);
        assert!(matches!(result, Err(ActuatorError::DuplicateActuator(n)) if n == "a"));
    }

    #[test]
    fn none_equals_empty_and_is_concatenated_defaults() {
        let set = three_channel_set();
        let from_none = set.gen_control(None).unwrap();
        let from_empty = set.gen_control(Some(&Actuation::new())).unwrap();
        assert_eq!(from_none, from_empty);
        assert_eq!(from_none, DVector::from_vec(vec![0.0, 0.1, 0.2, 0.5]));
        assert_eq!(set.control_len(), 4);
    }

    #[test]
    fn supplied_entries_override_defaults_in_place() {
        let set = three_channel_set();
        let mut actuation = Actuation::new();
        actuation.insert_scalar("thrust_y", -0.75);
        actuation.insert("gimbal", DVector::from_vec(vec![0.3, -0.3]));
        let control = set.gen_control(Some(&actuation)).unwrap();
        assert_eq!(control, DVector::from_vec(vec![0.0, 0.3, -0.3, -0.75]));
    }

    #[test]
    fn unknown_actuation_name_fails() {
        let set = three_channel_set();
        let mut actuation = Actuation::new();
        actuation.insert_scalar("rudder", 1.0);
        let err = set.gen_control(Some(&actuation)).unwrap_err();
        assert!(matches!(err, ActuatorError::UnknownActuator(n) if n == "rudder"));
    }

    #[test]
    fn wrong_width_command_fails() {
        let set = three_channel_set();
        let mut actuation = Actuation::new();
        actuation.insert_scalar("gimbal", 0.0);
        let err = set.gen_control(Some(&actuation)).unwrap_err();
        assert!(matches!(err, ActuatorError::ShapeMismatch { expected: 2, got: 1, .. }));
    }

    #[test]
    fn lookup_by_name() {
        let set = three_channel_set();
        assert_eq!(set.index_of("thrust_y").map(|id| id.index()), Some(2));
        assert!(set.get("gimbal").is_some());
        assert!(set.get("missing").is_none());
        assert!(ActuatorSet::empty().gen_control(None).unwrap().is_empty());
    }
}

// ── ActionPreprocessor ────────────────────────────────────────────────────────

#[cfg(test)]
mod preprocess {
    use super::*;

    #[test]
    fn pass_through_is_identity() {
        let p = ActionPreprocessor::pass_through("a", None);
        assert_eq!(p.preprocess(ActionValue::Continuous(123.5)).unwrap(), 123.5);
        let (name, cmd) = p.apply(7.0.into()).unwrap();
        assert_eq!(name, "a");
        assert_eq!(cmd, DVector::from_element(1, 7.0));
    }

    #[test]
    fn rescale_maps_unit_interval_onto_bounds() {
        let p = ActionPreprocessor::continuous_rescale("a", bounds(2.0, 6.0), false, PostActivation::Clip)
            .unwrap();
        assert_eq!(p.preprocess((-1.0).into()).unwrap(), 2.0);
        assert_eq!(p.preprocess(1.0.into()).unwrap(), 6.0);
        assert_eq!(p.preprocess(0.0.into()).unwrap(), 4.0);
        // clip saturates
        assert_eq!(p.preprocess(5.0.into()).unwrap(), 6.0);
        assert_eq!(p.preprocess((-5.0).into()).unwrap(), 2.0);
    }

    #[test]
    fn zero_centered_scales_each_side_separately() {
        let p = ActionPreprocessor::continuous_rescale("a", bounds(-2.0, 4.0), true, PostActivation::Clip)
            .unwrap();
        assert_eq!(p.preprocess((-1.0).into()).unwrap(), -2.0);
        assert_eq!(p.preprocess(1.0.into()).unwrap(), 4.0);
        assert_eq!(p.preprocess(0.0.into()).unwrap(), 0.0);
        assert_eq!(p.preprocess((-0.5).into()).unwrap(), -1.0);
        assert_eq!(p.preprocess(0.5.into()).unwrap(), 2.0);
    }

    #[test]
    fn zero_centered_requires_bounds_around_zero() {
        let err = ActionPreprocessor::continuous_rescale("a", bounds(1.0, 4.0), true, PostActivation::Clip)
            .unwrap_err();
        assert!(matches!(err, ActuatorError::ZeroCenteredBounds { .. }));
    }

    #[test]
    fn tanh_squashes_before_rescale() {
        let p = ActionPreprocessor::continuous_rescale("a", bounds(-1.0, 1.0), false, PostActivation::Tanh)
            .unwrap();
        let v = p.preprocess(0.5.into()).unwrap();
        assert!((v - 0.5f64.tanh()).abs() < 1e-12);
        assert!(p.preprocess(100.0.into()).unwrap() <= 1.0);
    }

    #[test]
    fn post_activation_parse_is_closed() {
        assert_eq!("clip".parse::<PostActivation>().unwrap(), PostActivation::Clip);
        assert_eq!("tanh".parse::<PostActivation>().unwrap(), PostActivation::Tanh);
        assert!(matches!(
            "relu".parse::<PostActivation>(),
            Err(ActuatorError::InvalidPostActivation(s)) if s == "relu"
        ));
    }

    #[test]
    fn discrete_map_even_grid() {
        let p = ActionPreprocessor::discrete_map("a", bounds(0.0, 10.0), 3).unwrap();
        assert_eq!(p.preprocess(0usize.into()).unwrap(), 0.0);
        assert_eq!(p.preprocess(1usize.into()).unwrap(), 5.0);
        assert_eq!(p.preprocess(2usize.into()).unwrap(), 10.0);
        let err = p.preprocess(3usize.into()).unwrap_err();
        assert!(matches!(err, ActuatorError::IndexOutOfRange { index: 3, len: 3, .. }));
    }

    #[test]
    fn discrete_map_single_point_and_zero_points() {
        let one = ActionPreprocessor::discrete_map("a", bounds(-3.0, 3.0), 1).unwrap();
        assert_eq!(one.preprocess(0usize.into()).unwrap(), -3.0);
        assert!(matches!(
            ActionPreprocessor::discrete_map("a", bounds(0.0, 1.0), 0),
            Err(ActuatorError::NoPoints(_))
        ));
    }

    #[test]
    fn value_kind_must_match() {
        let disc = ActionPreprocessor::discrete_map("a", bounds(0.0, 1.0), 2).unwrap();
        assert!(matches!(
            disc.preprocess(0.5.into()),
            Err(ActuatorError::ActionKindMismatch { expected: "index", .. })
        ));
        let cont = ActionPreprocessor::pass_through("a", None);
        assert!(matches!(
            cont.preprocess(1usize.into()),
            Err(ActuatorError::ActionKindMismatch { expected: "continuous", .. })
        ));
    }
}

// ── ActionSpace ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod space {
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    use super::*;

    fn composite() -> ActionSpace {
        ActionSpace::Tuple(vec![
            ActionSpace::Box { low: -1.0, high: 1.0 },
            ActionSpace::Discrete(4),
        ])
    }

    #[test]
    fn preprocessor_subspaces() {
        let rescale = ActionPreprocessor::continuous_rescale("a", bounds(0.0, 9.0), false, PostActivation::Clip)
            .unwrap();
        assert_eq!(rescale.action_space(), ActionSpace::Box { low: -1.0, high: 1.0 });
        let pass = ActionPreprocessor::pass_through("a", Some(bounds(0.0, 9.0)));
        assert_eq!(pass.action_space(), ActionSpace::Box { low: 0.0, high: 9.0 });
        let disc = ActionPreprocessor::discrete_map("a", bounds(0.0, 9.0), 5).unwrap();
        assert_eq!(disc.action_space(), ActionSpace::Discrete(5));
    }

    #[test]
    fn contains_checks_each_leaf() {
        let space = composite();
        assert_eq!(space.len(), 2);
        assert!(space.contains(&[Some(0.5.into()), Some(3usize.into())]));
        assert!(space.contains(&[None, Some(0usize.into())]));
        assert!(!space.contains(&[Some(1.5.into()), Some(0usize.into())]));
        assert!(!space.contains(&[Some(0.0.into()), Some(4usize.into())]));
        assert!(!space.contains(&[Some(0.0.into())]));
    }

    #[test]
    fn samples_lie_in_space() {
        let space = composite();
        let mut rng = SmallRng::seed_from_u64(7);
        for _ in 0..200 {
            let sample: Vec<Option<ActionValue>> = space.sample(&mut rng).into_iter().map(Some).collect();
            assert!(space.contains(&sample));
        }
    }
}
