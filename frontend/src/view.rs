use std::collections::HashSet;

use crate::model::Expense;
use crate::query::CategoryFilter;

pub const ALL_CATEGORIES_LABEL: &str = "All Categories";

pub trait ExpenseView {
    fn render_rows(&self, rows: Vec<ExpenseRow>);

    fn render_total(&self, total: String);

    fn render_category_options(&self, options: CategoryOptions);

    /// The rendered result no longer contains the filtered category; later
    /// requests must go out unfiltered.
    fn reset_filter(&self);

    fn reset_form(&self);

    fn alert(&self, message: &str);
}

#[derive(Clone, Debug, PartialEq)]
pub struct ExpenseRow {
    pub date: String,
    pub category: String,
    pub description: String,
    pub amount: String,
}

impl ExpenseRow {
    pub fn from_expense(expense: &Expense, currency_symbol: &str) -> Self {
        ExpenseRow {
            date: expense.date.clone(),
            category: expense.category.clone(),
            description: expense.description.clone().unwrap_or_default(),
            amount: format_money(expense.amount, currency_symbol),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct CategoryOptions {
    pub categories: Vec<String>,
    pub selected: CategoryFilter,
}

impl CategoryOptions {
    // Options come from the rendered result only, so an active filter hides
    // the other categories.
    pub fn from_expenses(expenses: &[Expense], previous: &CategoryFilter) -> Self {
        let mut seen = HashSet::new();
        let categories: Vec<String> = expenses
            .iter()
            .filter(|e| seen.insert(e.category.as_str()))
            .map(|e| e.category.clone())
            .collect();

        let selected = match previous.category() {
            Some(category) if categories.iter().any(|c| c == category) => previous.clone(),
            _ => CategoryFilter::all(),
        };

        CategoryOptions {
            categories,
            selected,
        }
    }
}

pub fn format_money(amount: f64, currency_symbol: &str) -> String {
    if amount.is_nan() {
        format!("{currency_symbol}NaN")
    } else if amount.is_infinite() {
        let sign = if amount < 0.0 { "-" } else { "" };
        format!("{currency_symbol}{sign}Infinity")
    } else {
        format!("{currency_symbol}{amount:.2}")
    }
}

pub fn format_total(total: f64, currency_symbol: &str) -> String {
    format!("Total: {}", format_money(total, currency_symbol))
}
