use std::cmp::Ordering;

use super::config::Multipliers;

/// Check one table: every value positive and finite, and strictly
/// decreasing from the heaviest level to the lightest.
fn check_table(table: &str, levels: &[(&str, f64)], errors: &mut Vec<String>) {
    for (name, value) in levels {
        if !(value.is_finite() && *value > 0.0) {
            errors.push(format!(
                "multipliers.{}.{}: must be a positive number, got {}",
                table, name, value
            ));
        }
    }

    for pair in levels.windows(2) {
        let (heavier, heavier_value) = pair[0];
        let (lighter, lighter_value) = pair[1];
        if heavier_value.partial_cmp(&lighter_value) != Some(Ordering::Greater) {
            errors.push(format!(
                "multipliers.{}: {} ({}) must be greater than {} ({})",
                table, heavier, heavier_value, lighter, lighter_value
            ));
        }
    }
}

/// Validate multiplier tables at startup.
/// Returns all validation errors at once (not just the first).
pub fn validate_multipliers(m: &Multipliers) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    for (table, levels) in m.tables() {
        check_table(table, &levels, &mut errors);
    }

    if m.child_development.none != 1.0 {
        errors.push(format!(
            "multipliers.child_development.none: must be 1.0, got {}",
            m.child_development.none
        ));
    }
    if m.priority.unranked != 1.0 {
        errors.push(format!(
            "multipliers.priority.unranked: must be 1.0, got {}",
            m.priority.unranked
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_multipliers_valid() {
        assert!(validate_multipliers(&Multipliers::default()).is_ok());
    }

    #[test]
    fn test_non_monotonic_table() {
        let mut m = Multipliers::default();
        m.frequency.weekly = 1.6; // above daily
        let errors = validate_multipliers(&m).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("multipliers.frequency"));
        assert!(errors[0].contains("daily"));
    }

    #[test]
    fn test_equal_levels_rejected() {
        let mut m = Multipliers::default();
        m.emotional_labor.medium = m.emotional_labor.high;
        let errors = validate_multipliers(&m).unwrap_err();
        assert!(errors[0].contains("multipliers.emotional_labor"));
    }

    #[test]
    fn test_negative_value() {
        let mut m = Multipliers::default();
        m.invisibility.visible = -1.0;
        let errors = validate_multipliers(&m).unwrap_err();
        assert!(errors[0].contains("multipliers.invisibility.visible"));
    }

    #[test]
    fn test_none_must_be_neutral() {
        let mut m = Multipliers::default();
        m.child_development.none = 0.9;
        let errors = validate_multipliers(&m).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.contains("multipliers.child_development.none")));
    }

    #[test]
    fn test_unranked_must_be_neutral() {
        let mut m = Multipliers::default();
        m.priority.unranked = 0.5;
        let errors = validate_multipliers(&m).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.contains("multipliers.priority.unranked")));
    }

    #[test]
    fn test_collects_all_errors() {
        let mut m = Multipliers::default();
        m.frequency.rarely = 2.0; // Error 1: rarely above monthly
        m.invisibility.mostly = f64::NAN; // Error 2: not finite, Error 3: not above partially
        let errors = validate_multipliers(&m).unwrap_err();
        assert_eq!(errors.len(), 3);
    }
}
