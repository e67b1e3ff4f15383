//! Expense display formatting
//!
//! Plain-text list and detail views for the terminal.

use crate::models::{Expense, Period};

/// Format an amount with two decimals and the currency after it
pub fn format_amount(amount: f64, symbol: &str) -> String {
    format!("{:.2} {}", amount, symbol)
}

/// Format a single expense as a list row
pub fn format_expense_row(expense: &Expense, symbol: &str) -> String {
    format!(
        "{:8}  {:30} {:>14}",
        expense.id.short(),
        truncate(&expense.title, 30),
        format_amount(expense.price, symbol)
    )
}

/// Format a period's expenses with the running total
pub fn format_expense_list(
    period: Period,
    expenses: &[Expense],
    total: f64,
    symbol: &str,
) -> String {
    let mut output = String::new();

    output.push_str(&format!("Expenses for {}\n", period));
    output.push_str(&format!("Total: {}\n\n", format_amount(total, symbol)));

    if expenses.is_empty() {
        output.push_str("No expenses recorded.\n");
        return output;
    }

    output.push_str(&format!("{:8}  {:30} {:>14}\n", "ID", "Title", "Price"));
    output.push_str(&"-".repeat(54));
    output.push('\n');

    for expense in expenses {
        output.push_str(&format_expense_row(expense, symbol));
        output.push('\n');
    }

    output
}

/// Format expense details for display
pub fn format_expense_details(expense: &Expense, symbol: &str) -> String {
    let mut output = String::new();

    output.push_str(&format!("Expense:     {}\n", expense.id));
    output.push_str(&format!("Title:       {}\n", expense.title));
    output.push_str(&format!(
        "Price:       {}\n",
        format_amount(expense.price, symbol)
    ));
    output.push_str(&format!("Description: {}\n", expense.description));

    output
}

/// Truncate a string to a maximum number of characters
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max_len - 3).collect();
        format!("{}...", cut)
    }
}
