use super::config::Multipliers;
use crate::error::ValidationError;
use crate::survey::{FamilyPriorities, Question};

#[derive(Debug, Clone)]
pub struct FactorContribution {
    pub label: &'static str, // e.g. "Frequency", "Priority"
    pub description: String, // e.g. "daily -> x1.5"
    pub before: f64,         // Weight before this factor
    pub after: f64,          // Weight after this factor
}

#[derive(Debug, Clone)]
pub struct WeightResult {
    pub base_weight: f64,
    pub weight: f64,
    pub factors: Vec<FactorContribution>,
}

/// Effective weight of one question under the default multiplier tables
pub fn compute_weight(
    question: &Question,
    priorities: &FamilyPriorities,
) -> Result<f64, ValidationError> {
    compute_weight_with(question, priorities, &Multipliers::default())
}

pub fn compute_weight_with(
    question: &Question,
    priorities: &FamilyPriorities,
    multipliers: &Multipliers,
) -> Result<f64, ValidationError> {
    explain_weight(question, priorities, multipliers).map(|result| result.weight)
}

/// Compute a question's weight along with the contribution of each factor.
///
/// Factors compound multiplicatively in a fixed order: frequency,
/// invisibility, emotional labor, child development, priority.
pub fn explain_weight(
    question: &Question,
    priorities: &FamilyPriorities,
    multipliers: &Multipliers,
) -> Result<WeightResult, ValidationError> {
    multipliers.check_finite()?;
    weigh(question, priorities, multipliers)
}

/// Weigh one question against tables already known to be finite and positive
pub(crate) fn weigh(
    question: &Question,
    priorities: &FamilyPriorities,
    multipliers: &Multipliers,
) -> Result<WeightResult, ValidationError> {
    priorities.validate()?;

    let base_weight = question.base_weight;
    if !(base_weight.is_finite() && base_weight > 0.0) {
        return Err(ValidationError::InvalidBaseWeight {
            question: question.id.clone(),
            value: base_weight,
        });
    }

    let rank = priorities.rank_of(question.category);
    let steps = [
        (
            "Frequency",
            question.frequency.as_str(),
            multipliers.frequency(question.frequency),
        ),
        (
            "Invisibility",
            question.invisibility.as_str(),
            multipliers.invisibility(question.invisibility),
        ),
        (
            "Emotional labor",
            question.emotional_labor.as_str(),
            multipliers.emotional_labor(question.emotional_labor),
        ),
        (
            "Child development",
            question.child_development.as_str(),
            multipliers.child_development(question.child_development),
        ),
        ("Priority", rank.label(), multipliers.priority(rank)),
    ];

    let mut weight = base_weight;
    let mut factors = Vec::with_capacity(steps.len());
    for (label, level, factor) in steps {
        let before = weight;
        weight *= factor;
        factors.push(FactorContribution {
            label,
            description: format!("{} -> x{}", level, factor),
            before,
            after: weight,
        });
    }

    // A large enough base weight overflows once the factors compound
    if !(weight.is_finite() && weight > 0.0) {
        return Err(ValidationError::InvalidWeight {
            question: question.id.clone(),
            value: weight,
        });
    }

    tracing::debug!(
        question = %question.id,
        category = %question.category,
        base_weight,
        weight,
        "weighted question"
    );

    Ok(WeightResult {
        base_weight,
        weight,
        factors,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::survey::{Category, ChildDevelopment, EmotionalLabor, Frequency, Invisibility};

    fn sample_question() -> Question {
        Question {
            id: "q1".to_string(),
            text: None,
            category: Category::InvisibleParental,
            frequency: Frequency::Daily,
            invisibility: Invisibility::Mostly,
            emotional_labor: EmotionalLabor::High,
            child_development: ChildDevelopment::High,
            base_weight: 3.0,
        }
    }

    fn neutral_question() -> Question {
        Question {
            id: "q2".to_string(),
            text: None,
            category: Category::VisibleHousehold,
            frequency: Frequency::Monthly,
            invisibility: Invisibility::Visible,
            emotional_labor: EmotionalLabor::Low,
            child_development: ChildDevelopment::None,
            base_weight: 2.0,
        }
    }

    fn sample_priorities() -> FamilyPriorities {
        FamilyPriorities::new(
            Category::InvisibleParental,
            Category::VisibleParental,
            Category::InvisibleHousehold,
        )
        .unwrap()
    }

    #[test]
    fn test_heavy_question_outweighs_base() {
        let weight = compute_weight(&sample_question(), &sample_priorities()).unwrap();
        assert!(weight > 3.0);
        // 3 * 1.5 * 1.4 * 1.3 * 1.3 * 1.5
        assert!((weight - 15.9705).abs() < 1e-9);
    }

    #[test]
    fn test_neutral_levels_keep_base_weight() {
        // monthly/visible/low/none in the unranked category are all x1.0
        let weight = compute_weight(&neutral_question(), &sample_priorities()).unwrap();
        assert_eq!(weight, 2.0);
    }

    #[test]
    fn test_strictly_increasing_in_base_weight() {
        let priorities = sample_priorities();
        let mut previous = 0.0;
        for base in [0.5, 1.0, 2.0, 3.0, 5.0] {
            let mut q = sample_question();
            q.base_weight = base;
            let weight = compute_weight(&q, &priorities).unwrap();
            assert!(weight > previous);
            previous = weight;
        }
    }

    #[test]
    fn test_monotonic_frequency() {
        let priorities = sample_priorities();
        let weights: Vec<f64> = [
            Frequency::Rarely,
            Frequency::Monthly,
            Frequency::Weekly,
            Frequency::Daily,
        ]
        .into_iter()
        .map(|frequency| {
            let mut q = neutral_question();
            q.frequency = frequency;
            compute_weight(&q, &priorities).unwrap()
        })
        .collect();
        assert!(weights.windows(2).all(|w| w[0] < w[1]), "{:?}", weights);
    }

    #[test]
    fn test_monotonic_invisibility() {
        let priorities = sample_priorities();
        let weights: Vec<f64> = [
            Invisibility::Visible,
            Invisibility::Partially,
            Invisibility::Mostly,
        ]
        .into_iter()
        .map(|invisibility| {
            let mut q = neutral_question();
            q.invisibility = invisibility;
            compute_weight(&q, &priorities).unwrap()
        })
        .collect();
        assert!(weights.windows(2).all(|w| w[0] < w[1]), "{:?}", weights);
    }

    #[test]
    fn test_monotonic_emotional_labor() {
        let priorities = sample_priorities();
        let weights: Vec<f64> = [EmotionalLabor::Low, EmotionalLabor::Medium, EmotionalLabor::High]
            .into_iter()
            .map(|emotional_labor| {
                let mut q = neutral_question();
                q.emotional_labor = emotional_labor;
                compute_weight(&q, &priorities).unwrap()
            })
            .collect();
        assert!(weights.windows(2).all(|w| w[0] < w[1]), "{:?}", weights);
    }

    #[test]
    fn test_monotonic_child_development() {
        let priorities = sample_priorities();
        let weights: Vec<f64> = [
            ChildDevelopment::None,
            ChildDevelopment::Low,
            ChildDevelopment::Medium,
            ChildDevelopment::High,
        ]
        .into_iter()
        .map(|child_development| {
            let mut q = neutral_question();
            q.child_development = child_development;
            compute_weight(&q, &priorities).unwrap()
        })
        .collect();
        assert!(weights.windows(2).all(|w| w[0] < w[1]), "{:?}", weights);
    }

    #[test]
    fn test_priority_multipliers() {
        let q = neutral_question(); // VisibleHousehold, all other factors x1.0
        let ranked = |highest, secondary, tertiary| {
            compute_weight(
                &q,
                &FamilyPriorities::new(highest, secondary, tertiary).unwrap(),
            )
            .unwrap()
        };

        let highest = ranked(
            Category::VisibleHousehold,
            Category::VisibleParental,
            Category::InvisibleHousehold,
        );
        let secondary = ranked(
            Category::VisibleParental,
            Category::VisibleHousehold,
            Category::InvisibleHousehold,
        );
        let tertiary = ranked(
            Category::VisibleParental,
            Category::InvisibleHousehold,
            Category::VisibleHousehold,
        );
        let unranked = ranked(
            Category::VisibleParental,
            Category::InvisibleHousehold,
            Category::InvisibleParental,
        );

        assert!((highest - 3.0).abs() < 1e-9);
        assert!((secondary - 2.6).abs() < 1e-9);
        assert!((tertiary - 2.2).abs() < 1e-9);
        assert_eq!(unranked, 2.0);
    }

    #[test]
    fn test_duplicate_priorities_rejected() {
        let priorities = FamilyPriorities {
            highest: Category::VisibleParental,
            secondary: Category::VisibleParental,
            tertiary: Category::InvisibleHousehold,
        };
        let err = compute_weight(&sample_question(), &priorities).unwrap_err();
        assert_eq!(
            err,
            ValidationError::DuplicatePriority {
                category: Category::VisibleParental
            }
        );
    }

    #[test]
    fn test_invalid_base_weight_rejected() {
        let mut q = sample_question();
        q.base_weight = 0.0;
        let err = compute_weight(&q, &sample_priorities()).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidBaseWeight { .. }));
    }

    #[test]
    fn test_overflowing_weight_rejected() {
        let mut q = sample_question();
        q.base_weight = 1e308;
        let err = compute_weight(&q, &sample_priorities()).unwrap_err();
        match err {
            ValidationError::InvalidWeight { question, value } => {
                assert_eq!(question, "q1");
                assert!(value.is_infinite());
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_large_finite_weight_accepted() {
        let mut q = neutral_question();
        q.base_weight = 1e300;
        let weight = compute_weight(&q, &sample_priorities()).unwrap();
        assert_eq!(weight, 1e300);
    }

    #[test]
    fn test_nan_multiplier_rejected() {
        let mut m = Multipliers::default();
        m.frequency.daily = f64::NAN;
        let err = compute_weight_with(&sample_question(), &sample_priorities(), &m).unwrap_err();
        assert!(matches!(
            err,
            ValidationError::InvalidMultiplier {
                table: "frequency",
                level: "daily",
                ..
            }
        ));
    }

    #[test]
    fn test_unused_bad_multiplier_still_rejected() {
        // neutral_question is monthly, but a broken daily entry still fails
        let mut m = Multipliers::default();
        m.frequency.daily = -1.0;
        assert!(compute_weight_with(&neutral_question(), &sample_priorities(), &m).is_err());
    }

    #[test]
    fn test_idempotent() {
        let q = sample_question();
        let p = sample_priorities();
        let first = compute_weight(&q, &p).unwrap();
        let second = compute_weight(&q, &p).unwrap();
        assert_eq!(first.to_bits(), second.to_bits());
    }

    #[test]
    fn test_explain_matches_compute() {
        let q = sample_question();
        let p = sample_priorities();
        let m = Multipliers::default();
        let explained = explain_weight(&q, &p, &m).unwrap();
        let weight = compute_weight_with(&q, &p, &m).unwrap();

        assert_eq!(explained.weight.to_bits(), weight.to_bits());
        assert_eq!(explained.base_weight, 3.0);
        assert_eq!(explained.factors.len(), 5);
        assert_eq!(explained.factors[0].label, "Frequency");
        assert_eq!(explained.factors[0].description, "daily -> x1.5");
        assert_eq!(explained.factors[4].label, "Priority");
        assert_eq!(explained.factors[4].description, "highest -> x1.5");
        // Each factor picks up where the previous left off
        for pair in explained.factors.windows(2) {
            assert_eq!(pair[0].after, pair[1].before);
        }
    }

    #[test]
    fn test_custom_multipliers() {
        let mut m = Multipliers::default();
        m.frequency.monthly = 2.0;
        let weight = compute_weight_with(&neutral_question(), &sample_priorities(), &m).unwrap();
        assert_eq!(weight, 4.0);
    }
}
