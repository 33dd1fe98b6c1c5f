use crate::models::CalculationMethod;
use std::f64::consts::FRAC_PI_2;

/// Growing Degree Days from the average of the daily extremes.
pub fn gdd_simple_average(min_temp: f64, max_temp: f64, base_temp: f64) -> f64 {
    let avg_temp = (max_temp + min_temp) / 2.0;
    (avg_temp - base_temp).max(0.0)
}

/// Like the simple average, but both extremes are raised to the base first
/// so cold nights cannot drag a warm afternoon below zero.
pub fn gdd_modified_average(min_temp: f64, max_temp: f64, base_temp: f64) -> f64 {
    let capped_min = min_temp.max(base_temp);
    let capped_max = max_temp.max(base_temp);
    let avg_temp = (capped_max + capped_min) / 2.0;
    (avg_temp - base_temp).max(0.0)
}

/// Single sine (Baskerville-Emin): integrates the part of a sinusoidal daily
/// temperature curve lying above the base.
pub fn gdd_single_sine(min_temp: f64, max_temp: f64, base_temp: f64) -> f64 {
    if max_temp <= base_temp {
        return 0.0;
    }

    if min_temp >= base_temp {
        return (max_temp + min_temp) / 2.0 - base_temp;
    }

    // Base is crossed during the day
    let temp_range = max_temp - min_temp;
    if temp_range <= 0.0 {
        return 0.0;
    }

    let theta = ((base_temp - min_temp) / temp_range).asin();
    let gdd = ((max_temp + min_temp) / 2.0 - base_temp) * (1.0 - theta / FRAC_PI_2)
        + (temp_range * theta.cos()) / FRAC_PI_2;

    gdd.max(0.0)
}

/// Daily GDD for the configured method (°C·day).
pub fn calculate_gdd(
    method: CalculationMethod,
    min_temp: f64,
    max_temp: f64,
    base_temp: f64,
) -> f64 {
    match method {
        CalculationMethod::SimpleAverage => gdd_simple_average(min_temp, max_temp, base_temp),
        CalculationMethod::ModifiedAverage => gdd_modified_average(min_temp, max_temp, base_temp),
        CalculationMethod::SingleSine => gdd_single_sine(min_temp, max_temp, base_temp),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn simple_average_known_day() {
        // base 10, 8/22 → (22+8)/2 - 10 = 5
        assert!((gdd_simple_average(8.0, 22.0, 10.0) - 5.0).abs() < EPS);
    }

    #[test]
    fn simple_average_cold_day_is_zero() {
        assert_eq!(gdd_simple_average(-5.0, 12.0, 10.0), 0.0);
        assert_eq!(gdd_simple_average(-15.0, -5.0, 0.0), 0.0);
    }

    #[test]
    fn modified_average_caps_cold_night() {
        // min raised to 10: (10 + 22)/2 - 10 = 6
        assert!((gdd_modified_average(2.0, 22.0, 10.0) - 6.0).abs() < EPS);
        // Entire day below base
        assert_eq!(gdd_modified_average(0.0, 8.0, 10.0), 0.0);
    }

    #[test]
    fn single_sine_crossing_day() {
        // base 10, 5/15: theta = asin(0.5) = π/6
        // gdd = 0 * (2/3) + 10 * cos(π/6) / (π/2) ≈ 5.513
        let gdd = gdd_single_sine(5.0, 15.0, 10.0);
        let expected = 10.0 * (std::f64::consts::PI / 6.0).cos() / FRAC_PI_2;
        assert!((gdd - expected).abs() < EPS);
        assert!((gdd - 5.513).abs() < 0.001);
    }

    #[test]
    fn single_sine_below_base_is_zero() {
        assert_eq!(gdd_single_sine(0.0, 10.0, 10.0), 0.0);
        assert_eq!(gdd_single_sine(-3.0, 4.0, 10.0), 0.0);
    }

    #[test]
    fn single_sine_above_base_is_average() {
        assert!((gdd_single_sine(12.0, 28.0, 10.0) - 10.0).abs() < EPS);
    }

    #[test]
    fn single_sine_min_at_base_is_average() {
        assert!((gdd_single_sine(10.0, 20.0, 10.0) - 5.0).abs() < EPS);
    }

    #[test]
    fn dispatch_selects_method() {
        assert!(
            (calculate_gdd(CalculationMethod::SimpleAverage, 8.0, 22.0, 10.0) - 5.0).abs() < EPS
        );
        assert!(
            (calculate_gdd(CalculationMethod::ModifiedAverage, 2.0, 22.0, 10.0) - 6.0).abs() < EPS
        );
        assert!(
            (calculate_gdd(CalculationMethod::SingleSine, 5.0, 15.0, 10.0) - 5.513).abs() < 0.001
        );
    }

    fn day() -> impl Strategy<Value = (f64, f64, f64)> {
        (-30.0f64..45.0, 0.0f64..30.0, -5.0f64..25.0)
            .prop_map(|(min, spread, base)| (min, min + spread, base))
    }

    proptest! {
        #[test]
        fn all_methods_non_negative((min, max, base) in day()) {
            prop_assert!(gdd_simple_average(min, max, base) >= 0.0);
            prop_assert!(gdd_modified_average(min, max, base) >= 0.0);
            prop_assert!(gdd_single_sine(min, max, base) >= 0.0);
        }

        #[test]
        fn sine_matches_simple_when_day_above_base(
            base in -5.0f64..25.0,
            offset in 0.0f64..15.0,
            spread in 0.0f64..20.0,
        ) {
            let min = base + offset;
            let max = min + spread;
            let sine = gdd_single_sine(min, max, base);
            let simple = gdd_simple_average(min, max, base);
            prop_assert!((sine - simple).abs() < 1e-9);
        }

        #[test]
        fn sine_zero_when_max_at_or_below_base(
            base in -5.0f64..25.0,
            below in 0.0f64..10.0,
            spread in 0.0f64..20.0,
        ) {
            let max = base - below;
            let min = max - spread;
            prop_assert_eq!(gdd_single_sine(min, max, base), 0.0);
        }

        #[test]
        fn modified_never_below_simple((min, max, base) in day()) {
            // Raising the extremes to the base can only raise the average.
            prop_assert!(
                gdd_modified_average(min, max, base) + 1e-9 >= gdd_simple_average(min, max, base)
            );
        }

        #[test]
        fn methods_are_deterministic((min, max, base) in day()) {
            for method in [
                CalculationMethod::SimpleAverage,
                CalculationMethod::ModifiedAverage,
                CalculationMethod::SingleSine,
            ] {
                prop_assert_eq!(
                    calculate_gdd(method, min, max, base),
                    calculate_gdd(method, min, max, base)
                );
            }
        }
    }
}
