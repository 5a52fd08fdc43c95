use serde::{Deserialize, Serialize};

use super::types::Category;
use crate::error::ValidationError;

/// The family's ranking of the four categories.
///
/// Three categories are ranked; the fourth is implicitly unranked. The
/// ranked categories must be pairwise distinct.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "PrioritiesRecord", into = "PrioritiesRecord")]
pub struct FamilyPriorities {
    pub highest: Category,
    pub secondary: Category,
    pub tertiary: Category,
}

/// Where a category falls in the family's ranking
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PriorityRank {
    Highest,
    Secondary,
    Tertiary,
    Unranked,
}

impl PriorityRank {
    pub fn label(&self) -> &'static str {
        match self {
            PriorityRank::Highest => "highest",
            PriorityRank::Secondary => "secondary",
            PriorityRank::Tertiary => "tertiary",
            PriorityRank::Unranked => "unranked",
        }
    }
}

impl FamilyPriorities {
    pub fn new(
        highest: Category,
        secondary: Category,
        tertiary: Category,
    ) -> Result<Self, ValidationError> {
        let priorities = Self {
            highest,
            secondary,
            tertiary,
        };
        priorities.validate()?;
        Ok(priorities)
    }

    /// Check that no category is ranked twice
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.highest == self.secondary || self.highest == self.tertiary {
            return Err(ValidationError::DuplicatePriority {
                category: self.highest,
            });
        }
        if self.secondary == self.tertiary {
            return Err(ValidationError::DuplicatePriority {
                category: self.secondary,
            });
        }
        Ok(())
    }

    pub fn rank_of(&self, category: Category) -> PriorityRank {
        if category == self.highest {
            PriorityRank::Highest
        } else if category == self.secondary {
            PriorityRank::Secondary
        } else if category == self.tertiary {
            PriorityRank::Tertiary
        } else {
            PriorityRank::Unranked
        }
    }

    /// The category left out of the ranking, if the priorities are distinct
    pub fn unranked(&self) -> Option<Category> {
        let mut remaining = Category::ALL
            .into_iter()
            .filter(|c| self.rank_of(*c) == PriorityRank::Unranked);
        match (remaining.next(), remaining.next()) {
            (Some(category), None) => Some(category),
            _ => None,
        }
    }
}

/// Priorities as stored in a survey submission
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PrioritiesRecord {
    pub highest_priority: String,
    pub secondary_priority: String,
    pub tertiary_priority: String,
}

fn parse_priority(field: &str, value: &str) -> Result<Category, ValidationError> {
    Category::parse(value).ok_or_else(|| ValidationError::InvalidCategory {
        field: field.to_string(),
        value: value.to_string(),
    })
}

impl TryFrom<PrioritiesRecord> for FamilyPriorities {
    type Error = ValidationError;

    fn try_from(record: PrioritiesRecord) -> Result<Self, Self::Error> {
        FamilyPriorities::new(
            parse_priority("highestPriority", &record.highest_priority)?,
            parse_priority("secondaryPriority", &record.secondary_priority)?,
            parse_priority("tertiaryPriority", &record.tertiary_priority)?,
        )
    }
}

impl From<FamilyPriorities> for PrioritiesRecord {
    fn from(p: FamilyPriorities) -> Self {
        PrioritiesRecord {
            highest_priority: p.highest.as_str().to_string(),
            secondary_priority: p.secondary.as_str().to_string(),
            tertiary_priority: p.tertiary.as_str().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_priorities() -> FamilyPriorities {
        FamilyPriorities::new(
            Category::InvisibleParental,
            Category::VisibleParental,
            Category::InvisibleHousehold,
        )
        .unwrap()
    }

    #[test]
    fn test_rank_of() {
        let p = sample_priorities();
        assert_eq!(p.rank_of(Category::InvisibleParental), PriorityRank::Highest);
        assert_eq!(p.rank_of(Category::VisibleParental), PriorityRank::Secondary);
        assert_eq!(p.rank_of(Category::InvisibleHousehold), PriorityRank::Tertiary);
        assert_eq!(p.rank_of(Category::VisibleHousehold), PriorityRank::Unranked);
    }

    #[test]
    fn test_unranked_category() {
        assert_eq!(sample_priorities().unranked(), Some(Category::VisibleHousehold));
    }

    #[test]
    fn test_duplicate_rejected() {
        let result = FamilyPriorities::new(
            Category::VisibleHousehold,
            Category::InvisibleHousehold,
            Category::VisibleHousehold,
        );
        assert_eq!(
            result.unwrap_err(),
            ValidationError::DuplicatePriority {
                category: Category::VisibleHousehold
            }
        );
    }

    #[test]
    fn test_validate_catches_hand_built_duplicates() {
        let p = FamilyPriorities {
            highest: Category::VisibleParental,
            secondary: Category::InvisibleParental,
            tertiary: Category::InvisibleParental,
        };
        assert!(p.validate().is_err());
        assert_eq!(p.unranked(), None);
    }

    #[test]
    fn test_deserialize_from_submission_yaml() {
        let yaml = r#"
highestPriority: Invisible Parental Tasks
secondaryPriority: VisibleParental
tertiaryPriority: InvisibleHousehold
"#;
        let p: FamilyPriorities = serde_saphyr::from_str(yaml).unwrap();
        assert_eq!(p, sample_priorities());
    }

    #[test]
    fn test_deserialize_reports_field() {
        let yaml = r#"
highestPriority: Chores
secondaryPriority: VisibleParental
tertiaryPriority: InvisibleHousehold
"#;
        let err = serde_saphyr::from_str::<FamilyPriorities>(yaml).unwrap_err();
        assert!(err.to_string().contains("highestPriority"));
    }
}
