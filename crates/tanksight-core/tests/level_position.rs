use tanksight_core::shape::{level_position, LevelLimits, TankShape};

#[test]
fn test_vertical_cylinder_midpoint() {
    // limits (180, 20): 180 + 0.5 * (20 - 180) = 100
    let limits = TankShape::VerticalCylinder.limits();
    assert_eq!(limits.min, 180.0);
    assert_eq!(limits.max, 20.0);
    assert_eq!(level_position(50.0, limits), 100.0);
}

#[test]
fn test_zero_and_hundred_hit_limits_exactly() {
    for shape in [
        TankShape::VerticalOval,
        TankShape::VerticalCylinder,
        TankShape::VerticalCapsule,
        TankShape::Rectangle,
        TankShape::HorizontalOval,
        TankShape::HorizontalEllipse,
        TankShape::HorizontalDishedEnds,
        TankShape::HorizontalCylinder,
        TankShape::HorizontalCapsule,
    ] {
        let limits = shape.limits();
        assert_eq!(level_position(0.0, limits), limits.min);
        assert_eq!(level_position(100.0, limits), limits.max);
    }
}

#[test]
fn test_out_of_range_percentages_clamp() {
    let limits = LevelLimits { min: 180.0, max: 20.0 };
    assert_eq!(level_position(-50.0, limits), 180.0);
    assert_eq!(level_position(101.0, limits), 20.0);
    assert_eq!(level_position(f64::INFINITY, limits), 20.0);
    assert_eq!(level_position(f64::NEG_INFINITY, limits), 180.0);
}

#[test]
fn test_monotonic_when_limits_differ() {
    let downward = LevelLimits { min: 170.0, max: 10.0 };
    let upward = LevelLimits { min: 10.0, max: 170.0 };

    for limits in [downward, upward] {
        let direction = (limits.max - limits.min).signum();
        let mut prev = level_position(0.0, limits);
        for p in 1..=100 {
            let pos = level_position(p as f64, limits);
            assert!(
                (pos - prev) * direction > 0.0,
                "position must move steadily toward max"
            );
            prev = pos;
        }
    }
}

#[test]
fn test_degenerate_limits_are_constant() {
    let limits = LevelLimits { min: 80.0, max: 80.0 };
    for p in [0.0, 12.5, 50.0, 99.0, 100.0] {
        assert_eq!(level_position(p, limits), 80.0);
    }
}

#[test]
fn test_every_shape_has_a_template_reference() {
    for shape in [
        TankShape::VerticalOval,
        TankShape::VerticalCylinder,
        TankShape::VerticalCapsule,
        TankShape::Rectangle,
        TankShape::HorizontalOval,
        TankShape::HorizontalEllipse,
        TankShape::HorizontalDishedEnds,
        TankShape::HorizontalCylinder,
        TankShape::HorizontalCapsule,
    ] {
        assert!(shape.template().ends_with(".svg"));
    }
}
