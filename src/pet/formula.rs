//! Thornthwaite (1948) equations.
//!
//! Pure functions on plain `f64`s; temperatures in °C, PET in mm/month.

/// Temperatures at or above this use the hot-month table instead of the power law.
pub const HOT_THRESHOLD: f64 = 26.5;

/// Unadjusted PET (mm) for hot months, at 0.5 °C steps from 26.5 to 31.0 °C.
pub const HOT_PET_TABLE: [(f64, f64); 10] = [
    (26.5, 135.0),
    (27.0, 139.5),
    (27.5, 143.7),
    (28.0, 147.8),
    (28.5, 151.7),
    (29.0, 155.4),
    (29.5, 158.9),
    (30.0, 162.1),
    (30.5, 165.2),
    (31.0, 168.0),
];

/// Monthly heat sub-index `i = (T/5)^1.514`. Months at or below 0 °C contribute nothing.
pub fn sub_index(temperature: f64) -> f64 {
    if temperature > 0.0 {
        (temperature / 5.0).powf(1.514)
    } else {
        0.0
    }
}

/// Annual heat index `I`, the sum of the monthly sub-indices.
pub fn heat_index(temperatures: impl IntoIterator<Item = f64>) -> f64 {
    temperatures.into_iter().map(sub_index).sum()
}

/// Exponent `a` as a cubic of the heat index.
pub fn exponent(heat_index: f64) -> f64 {
    6.75e-7 * heat_index.powi(3) - 7.71e-5 * heat_index.powi(2) + 1.792e-2 * heat_index + 0.49239
}

/// `PET = 16 (10 T / I)^a`, zero when `I` is zero or the month is not above freezing.
pub fn thornthwaite_formula(temperature: f64, heat_index: f64, exponent: f64) -> f64 {
    if heat_index <= 0.0 || temperature <= 0.0 {
        return 0.0;
    }
    16.0 * (10.0 * temperature / heat_index).powf(exponent)
}

/// Linear interpolation in [`HOT_PET_TABLE`], held flat beyond either end.
pub fn interpolate_hot(temperature: f64) -> f64 {
    let (first_t, first_pet) = HOT_PET_TABLE[0];
    let (last_t, last_pet) = HOT_PET_TABLE[HOT_PET_TABLE.len() - 1];
    if temperature <= first_t {
        return first_pet;
    }
    if temperature >= last_t {
        return last_pet;
    }
    HOT_PET_TABLE
        .windows(2)
        .find(|pair| pair[0].0 <= temperature && temperature <= pair[1].0)
        .map(|pair| {
            let ((t0, pet0), (t1, pet1)) = (pair[0], pair[1]);
            pet0 + (temperature - t0) * (pet1 - pet0) / (t1 - t0)
        })
        .unwrap_or(last_pet)
}

/// Unadjusted PET for one month, switching to the table at [`HOT_THRESHOLD`].
pub fn monthly_pet(temperature: f64, heat_index: f64, exponent: f64) -> f64 {
    if temperature < HOT_THRESHOLD {
        thornthwaite_formula(temperature, heat_index, exponent)
    } else {
        interpolate_hot(temperature)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn non_positive_temperatures_have_no_sub_index() {
        assert_eq!(sub_index(0.0), 0.0);
        assert_eq!(sub_index(-12.3), 0.0);
        assert!((sub_index(5.0) - 1.0).abs() < EPS);
    }

    #[test]
    fn heat_index_of_constant_year() {
        let t = 17.3_f64;
        let expected = 12.0 * (t / 5.0).powf(1.514);
        assert!((heat_index([t; 12]) - expected).abs() < EPS);
    }

    #[test]
    fn exponent_at_zero_is_the_constant_term() {
        assert!((exponent(0.0) - 0.49239).abs() < EPS);
        // I = 100 -> 0.675 - 0.771 + 1.792 + 0.49239
        assert!((exponent(100.0) - 2.18839).abs() < 1e-9);
    }

    #[test]
    fn formula_is_sixteen_when_ten_t_equals_i() {
        assert!((thornthwaite_formula(5.0, 50.0, 1.7) - 16.0).abs() < EPS);
        assert!((thornthwaite_formula(12.0, 120.0, 0.8) - 16.0).abs() < EPS);
    }

    #[test]
    fn formula_is_zero_without_heat() {
        assert_eq!(thornthwaite_formula(10.0, 0.0, 0.49239), 0.0);
        assert_eq!(thornthwaite_formula(-3.0, 40.0, 1.2), 0.0);
        assert_eq!(thornthwaite_formula(0.0, 40.0, 1.2), 0.0);
    }

    #[test]
    fn hot_table_anchors_are_returned_exactly() {
        for (t, pet) in HOT_PET_TABLE {
            assert_eq!(interpolate_hot(t), pet);
        }
    }

    #[test]
    fn hot_table_interpolates_between_anchors() {
        let pet = interpolate_hot(28.3);
        assert!(pet > 147.8 && pet < 151.7, "got {pet}");
        assert!((pet - (147.8 + 0.3 * (151.7 - 147.8) / 0.5)).abs() < 1e-9);
    }

    #[test]
    fn hot_table_is_monotonic_and_flat_outside() {
        let mut previous = interpolate_hot(26.5);
        for step in 1..=45 {
            let current = interpolate_hot(26.5 + step as f64 * 0.1);
            assert!(current > previous);
            previous = current;
        }
        assert_eq!(interpolate_hot(35.0), 168.0);
        assert_eq!(interpolate_hot(20.0), 135.0);
    }

    #[test]
    fn hot_months_ignore_heat_index_and_exponent() {
        assert_eq!(monthly_pet(28.0, 0.0, 0.0), 147.8);
        assert_eq!(monthly_pet(28.0, 150.0, 3.2), 147.8);
        assert_eq!(monthly_pet(26.5, 10.0, 1.0), 135.0);
    }
}
