/// Rounds half away from zero to `decimals` places.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// Lowercases and strips the accents found in French month and hemisphere names,
/// so "FÉVRIER", "Février" and "fevrier" all fold to "fevrier".
pub fn fold_label(label: &str) -> String {
    label
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| match c {
            'à' | 'â' | 'ä' | 'á' => 'a',
            'é' | 'è' | 'ê' | 'ë' => 'e',
            'î' | 'ï' | 'í' => 'i',
            'ô' | 'ö' | 'ó' => 'o',
            'ù' | 'û' | 'ü' | 'ú' => 'u',
            'ç' => 'c',
            other => other,
        })
        .collect()
}

/// First character uppercase, the rest lowercase.
pub fn capitalize(label: &str) -> String {
    let lower = label.to_lowercase();
    let mut chars = lower.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_to_is_half_away_from_zero() {
        assert_eq!(round_to(1.005_000_1, 2), 1.01);
        assert_eq!(round_to(-2.345_000_1, 2), -2.35);
        assert_eq!(round_to(0.123_456, 5), 0.12346);
    }

    #[test]
    fn fold_label_strips_case_and_accents() {
        assert_eq!(fold_label("  FÉVRIER "), "fevrier");
        assert_eq!(fold_label("Août"), "aout");
        assert_eq!(fold_label("Hémisphère"), "hemisphere");
    }

    #[test]
    fn capitalize_lowers_the_tail() {
        assert_eq!(capitalize("jANVIER"), "Janvier");
        assert_eq!(capitalize("smarch"), "Smarch");
        assert_eq!(capitalize(""), "");
    }
}
