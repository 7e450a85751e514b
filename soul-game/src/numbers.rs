//! Numeric conversion helpers centralizing the float/integer casts used by the formulas.

use num_traits::cast::cast;

/// Floor a f64 and clamp it to the u64 range, returning 0 for NaN and non-positive values.
#[must_use]
pub fn floor_f64_to_u64(value: f64) -> u64 {
    if value.is_nan() || value <= 0.0 {
        return 0;
    }
    let max = cast::<u64, f64>(u64::MAX).unwrap_or(f64::MAX);
    let clamped = value.min(max).floor();
    cast::<f64, u64>(clamped).unwrap_or(u64::MAX)
}

/// Convert u64 to f64 while allowing precision loss in a single location.
#[must_use]
pub fn u64_to_f64(value: u64) -> f64 {
    cast::<u64, f64>(value).unwrap_or(0.0)
}

/// Convert u32 to f32 while allowing precision loss in a single location.
#[must_use]
pub fn u32_to_f32(value: u32) -> f32 {
    cast::<u32, f32>(value).unwrap_or(0.0)
}

/// Clamp a signed counter into the u32 range, mapping negatives to `floor`.
#[must_use]
pub fn clamp_i64_to_u32(value: i64, floor: u32) -> u32 {
    u32::try_from(value).unwrap_or(if value < 0 { 0 } else { u32::MAX }).max(floor)
}

/// Clamp a signed counter into the u64 range, mapping negatives to zero.
#[must_use]
pub fn clamp_i64_to_u64(value: i64) -> u64 {
    u64::try_from(value).unwrap_or(0)
}

/// Widen an unsigned amount into the signed XP domain, saturating at `i64::MAX`.
#[must_use]
pub fn saturating_u64_to_i64(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn floor_handles_non_finite_and_negative() {
        assert_eq!(floor_f64_to_u64(f64::NAN), 0);
        assert_eq!(floor_f64_to_u64(-3.7), 0);
        assert_eq!(floor_f64_to_u64(282.84), 282);
        assert_eq!(floor_f64_to_u64(f64::INFINITY), u64::MAX);
    }

    #[test]
    fn signed_clamps_cover_ranges() {
        assert_eq!(clamp_i64_to_u32(-5, 0), 0);
        assert_eq!(clamp_i64_to_u32(-5, 1), 1);
        assert_eq!(clamp_i64_to_u32(0, 1), 1);
        assert_eq!(clamp_i64_to_u32(42, 1), 42);
        assert_eq!(clamp_i64_to_u32(i64::MAX, 0), u32::MAX);
        assert_eq!(clamp_i64_to_u64(-1), 0);
        assert_eq!(saturating_u64_to_i64(u64::MAX), i64::MAX);
    }

    #[test]
    fn widening_is_exact_for_small_values() {
        assert!((u64_to_f64(282) - 282.0).abs() < f64::EPSILON);
        assert!((u32_to_f32(10) - 10.0).abs() < f32::EPSILON);
    }
}
