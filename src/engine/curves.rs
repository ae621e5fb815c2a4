//! Pure cost/effect curves shared by every upgrade.

/// Cost of the next level: `floor(base_cost × multiplier^level)`.
///
/// Monotone non-decreasing in `level` for `multiplier >= 1`, which
/// `catalog::validate` guarantees for every definition.
pub fn cost(base_cost: f64, multiplier: f64, level: u32) -> f64 {
    (base_cost * multiplier.powi(level as i32)).floor()
}

/// Effect at `level`: `base + step × level`, clamped toward `limit` when given.
///
/// A negative step shrinks the effect toward a floor (cooldowns, hold times),
/// a non-negative step grows it toward a cap. The clamp direction follows the
/// step sign; definitions where the two disagree are rejected by
/// `catalog::validate`.
pub fn effect(base: f64, step: f64, level: u32, limit: Option<f64>) -> f64 {
    let raw = base + step * level as f64;
    match limit {
        Some(l) if step < 0.0 => raw.max(l),
        Some(l) => raw.min(l),
        None => raw,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cost_at_level_zero_is_base() {
        assert_eq!(cost(10.0, 1.6, 0), 10.0);
        assert_eq!(cost(500.0, 1.0, 0), 500.0);
    }

    #[test]
    fn cost_grows_and_floors() {
        // base 10, ×1.6: 10 → 16 → 25 (25.6 floored) → 40 (40.96 floored)
        assert_eq!(cost(10.0, 1.6, 1), 16.0);
        assert_eq!(cost(10.0, 1.6, 2), 25.0);
        assert_eq!(cost(10.0, 1.6, 3), 40.0);
    }

    #[test]
    fn cost_flat_multiplier_stays_at_base() {
        for level in 0..10 {
            assert_eq!(cost(250.0, 1.0, level), 250.0);
        }
    }

    #[test]
    fn effect_unclamped_is_linear() {
        assert!((effect(1.0, 1.0, 0, None) - 1.0).abs() < 0.001);
        assert!((effect(1.0, 1.0, 3, None) - 4.0).abs() < 0.001);
    }

    #[test]
    fn effect_negative_step_respects_floor() {
        // base 5, step -0.5, floor 2: hits the floor exactly at level 6
        assert!((effect(5.0, -0.5, 0, Some(2.0)) - 5.0).abs() < 0.001);
        assert!((effect(5.0, -0.5, 4, Some(2.0)) - 3.0).abs() < 0.001);
        assert!((effect(5.0, -0.5, 6, Some(2.0)) - 2.0).abs() < 0.001);
        // well past the floor: clamped, not negative
        assert!((effect(5.0, -0.5, 10, Some(2.0)) - 2.0).abs() < 0.001);
        assert!((effect(5.0, -0.5, 100, Some(2.0)) - 2.0).abs() < 0.001);
    }

    #[test]
    fn effect_positive_step_respects_cap() {
        assert!((effect(1.0, 1.0, 0, Some(5.0)) - 1.0).abs() < 0.001);
        assert!((effect(1.0, 1.0, 4, Some(5.0)) - 5.0).abs() < 0.001);
        assert!((effect(1.0, 1.0, 10, Some(5.0)) - 5.0).abs() < 0.001);
    }

    #[test]
    fn effect_zero_step_is_constant() {
        for level in 0..5 {
            assert!((effect(0.0, 0.0, level, None)).abs() < 0.001);
        }
    }
}
