pub mod balance;
pub mod config;
pub mod engine;
pub mod validation;

pub use balance::{
    aggregate, compute_balance, compute_balance_with, heaviest_tasks, weigh_responses, Balance,
    BalanceScores, CategoryBalance, WeightTotals, WeightedResponse,
};
pub use config::*;
pub use engine::{compute_weight, compute_weight_with, explain_weight, FactorContribution, WeightResult};
pub use validation::validate_multipliers;
