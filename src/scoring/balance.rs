use serde::Serialize;
use std::collections::{BTreeMap, HashSet};

use super::config::Multipliers;
use super::engine::weigh;
use crate::error::ValidationError;
use crate::survey::{Category, FamilyPriorities, Question, Responder, Responses};

/// One answered question with its effective weight
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeightedResponse {
    pub question_id: String,
    pub category: Category,
    pub responder: Responder,
    pub weight: f64,
}

/// Integer percentages for the two responders. Always sums to 100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Balance {
    pub a: u8,
    pub b: u8,
}

impl Balance {
    pub const EVEN: Balance = Balance { a: 50, b: 50 };

    /// Split decisive weight into percentages.
    ///
    /// No decisive weight means an even split. Totals too large to add
    /// are compared relative to the larger side; an infinite side takes
    /// everything unless both are infinite. After rounding, any drift from
    /// 100 is taken off (or added to) the larger side.
    pub fn from_weights(a_weight: f64, b_weight: f64) -> Self {
        debug_assert!(
            a_weight >= 0.0 && b_weight >= 0.0,
            "weights must be non-negative: {} / {}",
            a_weight,
            b_weight
        );

        let (a_weight, b_weight) = match (a_weight.is_infinite(), b_weight.is_infinite()) {
            (true, true) => return Balance::EVEN,
            (true, false) => (1.0, 0.0),
            (false, true) => (0.0, 1.0),
            (false, false) if (a_weight + b_weight).is_infinite() => {
                let larger = a_weight.max(b_weight);
                (a_weight / larger, b_weight / larger)
            }
            (false, false) => (a_weight, b_weight),
        };

        let total = a_weight + b_weight;
        if total.is_nan() || total <= 0.0 {
            return Balance::EVEN;
        }

        let a_raw = a_weight / total * 100.0;
        let mut a = a_raw.round() as i32;
        let mut b = (100.0 - a_raw).round() as i32;

        let drift = a + b - 100;
        if drift != 0 {
            if a >= b {
                a -= drift;
            } else {
                b -= drift;
            }
        }

        debug_assert!(a + b == 100 && (0..=100).contains(&a), "{} / {}", a, b);
        Balance {
            a: a as u8,
            b: b as u8,
        }
    }

    /// Distance from an even split, in percentage points
    pub fn skew(&self) -> u8 {
        self.a.abs_diff(50)
    }
}

/// Accumulated weight per responder
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeightTotals {
    pub a: f64,
    pub b: f64,
    pub shared: f64,
    pub not_applicable: f64,
}

impl WeightTotals {
    pub fn add(&mut self, responder: Responder, weight: f64) {
        match responder {
            Responder::ResponderA => self.a += weight,
            Responder::ResponderB => self.b += weight,
            Responder::Shared => self.shared += weight,
            Responder::NotApplicable => self.not_applicable += weight,
        }
    }

    pub fn balance(&self) -> Balance {
        Balance::from_weights(self.a, self.b)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CategoryBalance {
    pub balance: Balance,
    pub totals: WeightTotals,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceScores {
    pub overall_balance: Balance,
    pub totals: WeightTotals,
    pub by_category: BTreeMap<Category, CategoryBalance>,
}

impl BalanceScores {
    /// Category furthest from an even split, or None if all are even.
    /// Ties go to the category listed first.
    pub fn most_imbalanced(&self) -> Option<Category> {
        let mut worst: Option<(Category, u8)> = None;
        for (category, entry) in &self.by_category {
            let skew = entry.balance.skew();
            if skew > 0 && worst.map_or(true, |(_, s)| skew > s) {
                worst = Some((*category, skew));
            }
        }
        worst.map(|(category, _)| category)
    }
}

/// Weight every answered question, in catalog order.
///
/// Answers for ids that are not in the catalog are skipped with a warning.
pub fn weigh_responses(
    questions: &[Question],
    responses: &Responses,
    priorities: &FamilyPriorities,
    multipliers: &Multipliers,
) -> Result<Vec<WeightedResponse>, ValidationError> {
    multipliers.check_finite()?;

    let mut weighted = Vec::with_capacity(responses.len());
    for question in questions {
        if let Some(responder) = responses.get(&question.id) {
            let weight = weigh(question, priorities, multipliers)?.weight;
            weighted.push(WeightedResponse {
                question_id: question.id.clone(),
                category: question.category,
                responder,
                weight,
            });
        }
    }

    if weighted.len() < responses.len() {
        let known: HashSet<&str> = questions.iter().map(|q| q.id.as_str()).collect();
        for (id, _) in responses.iter() {
            if !known.contains(id) {
                tracing::warn!("Ignoring response for unknown question '{}'", id);
            }
        }
    }

    Ok(weighted)
}

/// Turn weighted responses into overall and per-category balance
pub fn aggregate(weighted: &[WeightedResponse]) -> BalanceScores {
    let mut totals = WeightTotals::default();
    let mut per_category: BTreeMap<Category, WeightTotals> = Category::ALL
        .into_iter()
        .map(|c| (c, WeightTotals::default()))
        .collect();

    for response in weighted {
        totals.add(response.responder, response.weight);
        per_category
            .entry(response.category)
            .or_default()
            .add(response.responder, response.weight);
    }

    let by_category = per_category
        .into_iter()
        .map(|(category, totals)| {
            (
                category,
                CategoryBalance {
                    balance: totals.balance(),
                    totals,
                },
            )
        })
        .collect();

    let scores = BalanceScores {
        overall_balance: totals.balance(),
        totals,
        by_category,
    };

    tracing::debug!(
        responses = weighted.len(),
        a = scores.overall_balance.a,
        b = scores.overall_balance.b,
        "aggregated balance"
    );

    scores
}

/// Balance scores under the default multiplier tables
pub fn compute_balance(
    questions: &[Question],
    responses: &Responses,
    priorities: &FamilyPriorities,
) -> Result<BalanceScores, ValidationError> {
    compute_balance_with(questions, responses, priorities, &Multipliers::default())
}

pub fn compute_balance_with(
    questions: &[Question],
    responses: &Responses,
    priorities: &FamilyPriorities,
    multipliers: &Multipliers,
) -> Result<BalanceScores, ValidationError> {
    let weighted = weigh_responses(questions, responses, priorities, multipliers)?;
    Ok(aggregate(&weighted))
}

/// A responder's tasks, heaviest first (ties by question id)
pub fn heaviest_tasks(
    weighted: &[WeightedResponse],
    responder: Responder,
    limit: usize,
) -> Vec<&WeightedResponse> {
    let mut tasks: Vec<&WeightedResponse> = weighted
        .iter()
        .filter(|w| w.responder == responder)
        .collect();
    tasks.sort_by(|x, y| {
        y.weight
            .partial_cmp(&x.weight)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| x.question_id.cmp(&y.question_id))
    });
    tasks.truncate(limit);
    tasks
}
