use owo_colors::OwoColorize;
use std::io::IsTerminal;
use terminal_size::{terminal_size, Width};

use crate::config::ResponderNames;
use crate::scoring::{Balance, BalanceScores, WeightResult, WeightedResponse};
use crate::survey::Question;

/// A question with its computed weight, for display
pub struct WeightedQuestion<'a> {
    pub question: &'a Question,
    pub result: WeightResult,
}

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Get terminal width, defaulting to None for pipes (unlimited)
fn get_terminal_width() -> Option<usize> {
    terminal_size().map(|(Width(w), _)| w as usize)
}

/// Truncate text to fit available width, accounting for Unicode
fn truncate_text(text: &str, max_width: usize) -> String {
    let chars: Vec<char> = text.chars().collect();
    if chars.len() <= max_width {
        text.to_string()
    } else if max_width > 3 {
        format!("{}...", chars[..max_width - 3].iter().collect::<String>())
    } else {
        chars[..max_width].iter().collect()
    }
}

/// Format a weight with two decimals, dropping trailing zeros ("4.5", "3", "15.97")
pub fn format_weight(weight: f64) -> String {
    let formatted = format!("{:.2}", weight);
    formatted
        .trim_end_matches('0')
        .trim_end_matches('.')
        .to_string()
}

/// Format weighted questions as a table: Index, Weight, Category, Text
pub fn format_weight_table(rows: &[WeightedQuestion], use_colors: bool) -> String {
    if rows.is_empty() {
        return "No questions found.".to_string();
    }

    let term_width = get_terminal_width();

    // Index: 3, weight: 7, category: 18, two-space separators
    let weight_width = 7;
    let category_width = 18;
    let separator = "  ";
    let fixed_width = 3 + 1 + weight_width + category_width + separator.len() * 2;

    rows.iter()
        .enumerate()
        .map(|(idx, row)| {
            let index_str = format!("{:>2}.", idx + 1);
            let weight_str = format!(
                "{:>width$}",
                format_weight(row.result.weight),
                width = weight_width
            );
            let category_str = format!(
                "{:<width$}",
                row.question.category.as_str(),
                width = category_width
            );

            let text = match term_width {
                Some(width) if width > fixed_width + 10 => {
                    truncate_text(row.question.display_text(), width - fixed_width)
                }
                Some(_) => truncate_text(row.question.display_text(), 20),
                None => row.question.display_text().to_string(),
            };

            if use_colors {
                format!(
                    "{} {}{}{}{}{}",
                    index_str.dimmed(),
                    weight_str.bold(),
                    separator,
                    category_str.cyan(),
                    separator,
                    text
                )
            } else {
                format!(
                    "{} {}{}{}{}{}",
                    index_str, weight_str, separator, category_str, separator, text
                )
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Per-factor breakdown lines for verbose output
pub fn format_weight_breakdown(result: &WeightResult) -> String {
    let mut lines = vec![format!("    Base weight: {}", format_weight(result.base_weight))];
    lines.extend(result.factors.iter().map(|f| {
        format!(
            "    {}: {} ({} -> {})",
            f.label,
            f.description,
            format_weight(f.before),
            format_weight(f.after)
        )
    }));
    lines.join("\n")
}

/// Format weighted questions as tab-separated values for scripting
/// Columns: weight, id, category (no headers, no colors)
pub fn format_weight_tsv(rows: &[WeightedQuestion]) -> String {
    rows.iter()
        .map(|row| {
            format!(
                "{}\t{}\t{}",
                format_weight(row.result.weight),
                row.question.id,
                row.question.category.as_str()
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Width of the balance bar, shrinking on narrow terminals
fn bar_width() -> usize {
    match get_terminal_width() {
        Some(width) => width.saturating_sub(50).clamp(10, 40),
        None => 20,
    }
}

/// Render a balance as a two-tone bar, A's share on the left
pub fn format_balance_bar(balance: Balance, width: usize, use_colors: bool) -> String {
    let filled = (balance.a as usize * width + 50) / 100;
    let a_part = "█".repeat(filled);
    let b_part = "░".repeat(width - filled);
    if use_colors {
        format!("{}{}", a_part.magenta(), b_part.cyan())
    } else {
        format!("{}{}", a_part, b_part)
    }
}

fn format_balance_line(
    label: &str,
    balance: Balance,
    names: &ResponderNames,
    width: usize,
    use_colors: bool,
) -> String {
    let label = format!("{:<20}", label);
    let a = format!("{} {:>3}%", names.a, balance.a);
    let b = format!("{:>3}% {}", balance.b, names.b);
    let bar = format_balance_bar(balance, width, use_colors);
    if use_colors {
        format!("{} {} {} {}", label.bold(), a.magenta(), bar, b.cyan())
    } else {
        format!("{} {} {} {}", label, a, bar, b)
    }
}

/// Format balance scores: overall line, one line per category, and the
/// most imbalanced category if any
pub fn format_balance_table(
    scores: &BalanceScores,
    names: &ResponderNames,
    use_colors: bool,
) -> String {
    let width = bar_width();
    let mut lines = vec![format_balance_line(
        "Overall",
        scores.overall_balance,
        names,
        width,
        use_colors,
    )];

    for (category, entry) in &scores.by_category {
        lines.push(format_balance_line(
            category.label(),
            entry.balance,
            names,
            width,
            use_colors,
        ));
    }

    if let Some(category) = scores.most_imbalanced() {
        lines.push(String::new());
        let note = format!("Most imbalanced: {}", category.label());
        if use_colors {
            lines.push(note.yellow().to_string());
        } else {
            lines.push(note);
        }
    }

    lines.join("\n")
}

/// Format balance scores as tab-separated values for scripting
/// Columns: scope, a%, b% (scope is "overall" or a category token)
pub fn format_balance_tsv(scores: &BalanceScores) -> String {
    let overall = format!(
        "overall\t{}\t{}",
        scores.overall_balance.a, scores.overall_balance.b
    );
    std::iter::once(overall)
        .chain(scores.by_category.iter().map(|(category, entry)| {
            format!(
                "{}\t{}\t{}",
                category.as_str(),
                entry.balance.a,
                entry.balance.b
            )
        }))
        .collect::<Vec<_>>()
        .join("\n")
}

/// List a responder's heaviest tasks, resolving question text from the catalog
pub fn format_heaviest_tasks(
    name: &str,
    tasks: &[&WeightedResponse],
    questions: &[Question],
    use_colors: bool,
) -> String {
    let header = format!("Heaviest tasks for {}:", name);
    let header = if use_colors {
        header.bold().to_string()
    } else {
        header
    };

    if tasks.is_empty() {
        return format!("{}\n  (none)", header);
    }

    let mut lines = vec![header];
    for task in tasks {
        let text = questions
            .iter()
            .find(|q| q.id == task.question_id)
            .map(|q| q.display_text())
            .unwrap_or(&task.question_id);
        lines.push(format!(
            "  {:>7}  {}  ({})",
            format_weight(task.weight),
            text,
            task.category.label().to_lowercase()
        ));
    }
    lines.join("\n")
}
