use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::ValidationError;

/// One of the four fixed responsibility categories.
///
/// Declaration order is the display order used for per-category output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum Category {
    VisibleHousehold,
    InvisibleHousehold,
    VisibleParental,
    InvisibleParental,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::VisibleHousehold,
        Category::InvisibleHousehold,
        Category::VisibleParental,
        Category::InvisibleParental,
    ];

    /// Parse a category token.
    ///
    /// Accepts the canonical token (`VisibleHousehold`) as well as the spaced
    /// display form the survey screens use ("Visible Household Tasks"),
    /// ignoring case.
    pub fn parse(s: &str) -> Option<Self> {
        let normalized: String = s
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect::<String>()
            .to_ascii_lowercase();
        let normalized = normalized.strip_suffix("tasks").unwrap_or(&normalized);

        match normalized {
            "visiblehousehold" => Some(Category::VisibleHousehold),
            "invisiblehousehold" => Some(Category::InvisibleHousehold),
            "visibleparental" => Some(Category::VisibleParental),
            "invisibleparental" => Some(Category::InvisibleParental),
            _ => None,
        }
    }

    /// Canonical token, as written in catalog files
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::VisibleHousehold => "VisibleHousehold",
            Category::InvisibleHousehold => "InvisibleHousehold",
            Category::VisibleParental => "VisibleParental",
            Category::InvisibleParental => "InvisibleParental",
        }
    }

    /// Human-readable label for terminal output
    pub fn label(&self) -> &'static str {
        match self {
            Category::VisibleHousehold => "Visible Household",
            Category::InvisibleHousehold => "Invisible Household",
            Category::VisibleParental => "Visible Parental",
            Category::InvisibleParental => "Invisible Parental",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for Category {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Category::parse(&value).ok_or(ValidationError::InvalidCategory {
            field: "category".to_string(),
            value,
        })
    }
}

/// How often a task recurs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Frequency {
    Daily,
    Weekly,
    Monthly,
    Rarely,
}

impl Frequency {
    pub const EXPECTED: &'static str = "daily, weekly, monthly, rarely";

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "daily" => Some(Frequency::Daily),
            "weekly" => Some(Frequency::Weekly),
            "monthly" => Some(Frequency::Monthly),
            "rarely" => Some(Frequency::Rarely),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Frequency::Daily => "daily",
            Frequency::Weekly => "weekly",
            Frequency::Monthly => "monthly",
            Frequency::Rarely => "rarely",
        }
    }
}

/// How much of a task is unobserved mental or emotional work
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Invisibility {
    Mostly,
    Partially,
    Visible,
}

impl Invisibility {
    pub const EXPECTED: &'static str = "mostly, partially, visible";

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mostly" => Some(Invisibility::Mostly),
            "partially" => Some(Invisibility::Partially),
            "visible" => Some(Invisibility::Visible),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Invisibility::Mostly => "mostly",
            Invisibility::Partially => "partially",
            Invisibility::Visible => "visible",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EmotionalLabor {
    High,
    Medium,
    Low,
}

impl EmotionalLabor {
    pub const EXPECTED: &'static str = "high, medium, low";

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "high" => Some(EmotionalLabor::High),
            "medium" => Some(EmotionalLabor::Medium),
            "low" => Some(EmotionalLabor::Low),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EmotionalLabor::High => "high",
            EmotionalLabor::Medium => "medium",
            EmotionalLabor::Low => "low",
        }
    }
}

/// Relevance of a task to child development outcomes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChildDevelopment {
    High,
    Medium,
    Low,
    None,
}

impl ChildDevelopment {
    pub const EXPECTED: &'static str = "high, medium, low, none";

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "high" => Some(ChildDevelopment::High),
            "medium" => Some(ChildDevelopment::Medium),
            "low" => Some(ChildDevelopment::Low),
            "none" => Some(ChildDevelopment::None),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ChildDevelopment::High => "high",
            ChildDevelopment::Medium => "medium",
            ChildDevelopment::Low => "low",
            ChildDevelopment::None => "none",
        }
    }
}

/// A survey question with validated attributes.
///
/// Deserializes through [`QuestionRecord`] so that an unknown level in a
/// catalog file is reported with the question id and field name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "QuestionRecord", into = "QuestionRecord")]
pub struct Question {
    pub id: String,
    pub text: Option<String>,
    pub category: Category,
    pub frequency: Frequency,
    pub invisibility: Invisibility,
    pub emotional_labor: EmotionalLabor,
    pub child_development: ChildDevelopment,
    pub base_weight: f64,
}

/// Question as stored in the catalog, before level validation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct QuestionRecord {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    pub category: String,
    pub frequency: String,
    pub invisibility: String,
    pub emotional_labor: String,
    pub child_development: String,
    pub base_weight: f64,
}

fn parse_level<T>(
    question: &str,
    field: &'static str,
    expected: &'static str,
    value: &str,
    parse: fn(&str) -> Option<T>,
) -> Result<T, ValidationError> {
    parse(value).ok_or_else(|| ValidationError::InvalidField {
        question: question.to_string(),
        field,
        value: value.to_string(),
        expected,
    })
}

impl TryFrom<QuestionRecord> for Question {
    type Error = ValidationError;

    fn try_from(record: QuestionRecord) -> Result<Self, Self::Error> {
        let id = record.id;

        let category = Category::parse(&record.category).ok_or_else(|| {
            ValidationError::InvalidCategory {
                field: format!("question '{}' category", id),
                value: record.category.clone(),
            }
        })?;
        let frequency = parse_level(
            &id,
            "frequency",
            Frequency::EXPECTED,
            &record.frequency,
            Frequency::parse,
        )?;
        let invisibility = parse_level(
            &id,
            "invisibility",
            Invisibility::EXPECTED,
            &record.invisibility,
            Invisibility::parse,
        )?;
        let emotional_labor = parse_level(
            &id,
            "emotionalLabor",
            EmotionalLabor::EXPECTED,
            &record.emotional_labor,
            EmotionalLabor::parse,
        )?;
        let child_development = parse_level(
            &id,
            "childDevelopment",
            ChildDevelopment::EXPECTED,
            &record.child_development,
            ChildDevelopment::parse,
        )?;

        if !(record.base_weight.is_finite() && record.base_weight > 0.0) {
            return Err(ValidationError::InvalidBaseWeight {
                question: id,
                value: record.base_weight,
            });
        }

        Ok(Question {
            id,
            text: record.text,
            category,
            frequency,
            invisibility,
            emotional_labor,
            child_development,
            base_weight: record.base_weight,
        })
    }
}

impl From<Question> for QuestionRecord {
    fn from(q: Question) -> Self {
        QuestionRecord {
            id: q.id,
            text: q.text,
            category: q.category.as_str().to_string(),
            frequency: q.frequency.as_str().to_string(),
            invisibility: q.invisibility.as_str().to_string(),
            emotional_labor: q.emotional_labor.as_str().to_string(),
            child_development: q.child_development.as_str().to_string(),
            base_weight: q.base_weight,
        }
    }
}

impl Question {
    /// Display text, falling back to the id when the catalog has none
    pub fn display_text(&self) -> &str {
        self.text.as_deref().unwrap_or(&self.id)
    }
}
