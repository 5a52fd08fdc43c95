pub mod formatter;

pub use formatter::{
    format_balance_bar, format_balance_table, format_balance_tsv, format_heaviest_tasks,
    format_weight, format_weight_breakdown, format_weight_table, format_weight_tsv,
    should_use_colors, WeightedQuestion,
};
