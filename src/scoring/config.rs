use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::survey::{ChildDevelopment, EmotionalLabor, Frequency, Invisibility, PriorityRank};

/// Multiplier tables used by the weight engine.
///
/// Every table and every level is optional in YAML; anything left out keeps
/// its default. Values must decrease from the heaviest level to the lightest
/// (see `validate_multipliers`).
///
/// Example YAML:
/// ```yaml
/// multipliers:
///   frequency: { daily: 2.0, rarely: 0.5 }
///   priority: { highest: 1.8 }
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Multipliers {
    pub frequency: FrequencyTable,
    pub invisibility: InvisibilityTable,
    pub emotional_labor: EmotionalLaborTable,
    pub child_development: ChildDevelopmentTable,
    pub priority: PriorityTable,
}

impl Multipliers {
    /// Every table with its levels, heaviest first
    pub fn tables(&self) -> [(&'static str, Vec<(&'static str, f64)>); 5] {
        let f = &self.frequency;
        let i = &self.invisibility;
        let e = &self.emotional_labor;
        let c = &self.child_development;
        let p = &self.priority;
        [
            (
                "frequency",
                vec![
                    ("daily", f.daily),
                    ("weekly", f.weekly),
                    ("monthly", f.monthly),
                    ("rarely", f.rarely),
                ],
            ),
            (
                "invisibility",
                vec![
                    ("mostly", i.mostly),
                    ("partially", i.partially),
                    ("visible", i.visible),
                ],
            ),
            (
                "emotional_labor",
                vec![("high", e.high), ("medium", e.medium), ("low", e.low)],
            ),
            (
                "child_development",
                vec![
                    ("high", c.high),
                    ("medium", c.medium),
                    ("low", c.low),
                    ("none", c.none),
                ],
            ),
            (
                "priority",
                vec![
                    ("highest", p.highest),
                    ("secondary", p.secondary),
                    ("tertiary", p.tertiary),
                    ("unranked", p.unranked),
                ],
            ),
        ]
    }

    /// Fail on the first multiplier that is not a positive finite number.
    ///
    /// Unlike `validate_multipliers` this does not check ordering; it only
    /// rules out values that would make a weight meaningless.
    pub fn check_finite(&self) -> Result<(), ValidationError> {
        for (table, levels) in self.tables() {
            for (level, value) in levels {
                if !(value.is_finite() && value > 0.0) {
                    return Err(ValidationError::InvalidMultiplier {
                        table,
                        level,
                        value,
                    });
                }
            }
        }
        Ok(())
    }

    pub fn frequency(&self, level: Frequency) -> f64 {
        let t = &self.frequency;
        match level {
            Frequency::Daily => t.daily,
            Frequency::Weekly => t.weekly,
            Frequency::Monthly => t.monthly,
            Frequency::Rarely => t.rarely,
        }
    }

    pub fn invisibility(&self, level: Invisibility) -> f64 {
        let t = &self.invisibility;
        match level {
            Invisibility::Mostly => t.mostly,
            Invisibility::Partially => t.partially,
            Invisibility::Visible => t.visible,
        }
    }

    pub fn emotional_labor(&self, level: EmotionalLabor) -> f64 {
        let t = &self.emotional_labor;
        match level {
            EmotionalLabor::High => t.high,
            EmotionalLabor::Medium => t.medium,
            EmotionalLabor::Low => t.low,
        }
    }

    pub fn child_development(&self, level: ChildDevelopment) -> f64 {
        let t = &self.child_development;
        match level {
            ChildDevelopment::High => t.high,
            ChildDevelopment::Medium => t.medium,
            ChildDevelopment::Low => t.low,
            ChildDevelopment::None => t.none,
        }
    }

    pub fn priority(&self, rank: PriorityRank) -> f64 {
        let t = &self.priority;
        match rank {
            PriorityRank::Highest => t.highest,
            PriorityRank::Secondary => t.secondary,
            PriorityRank::Tertiary => t.tertiary,
            PriorityRank::Unranked => t.unranked,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct FrequencyTable {
    pub daily: f64,
    pub weekly: f64,
    pub monthly: f64,
    pub rarely: f64,
}

impl Default for FrequencyTable {
    fn default() -> Self {
        Self {
            daily: 1.5,
            weekly: 1.2,
            monthly: 1.0,
            rarely: 0.8,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct InvisibilityTable {
    pub mostly: f64,
    pub partially: f64,
    pub visible: f64,
}

impl Default for InvisibilityTable {
    fn default() -> Self {
        Self {
            mostly: 1.4,
            partially: 1.2,
            visible: 1.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct EmotionalLaborTable {
    pub high: f64,
    pub medium: f64,
    pub low: f64,
}

impl Default for EmotionalLaborTable {
    fn default() -> Self {
        Self {
            high: 1.3,
            medium: 1.15,
            low: 1.0,
        }
    }
}

/// `none` must stay at 1.0: tasks with no developmental impact get no boost
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ChildDevelopmentTable {
    pub high: f64,
    pub medium: f64,
    pub low: f64,
    pub none: f64,
}

impl Default for ChildDevelopmentTable {
    fn default() -> Self {
        Self {
            high: 1.3,
            medium: 1.2,
            low: 1.1,
            none: 1.0,
        }
    }
}

/// Multiplier by the question category's place in the family's ranking
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct PriorityTable {
    pub highest: f64,
    pub secondary: f64,
    pub tertiary: f64,
    pub unranked: f64,
}

impl Default for PriorityTable {
    fn default() -> Self {
        Self {
            highest: 1.5,
            secondary: 1.3,
            tertiary: 1.1,
            unranked: 1.0,
        }
    }
}
