use std::cell::Cell;
use std::rc::Rc;

use crate::api::ExpenseApi;
use crate::error::ApiError;
use crate::idempotency::IdempotencyKey;
use crate::model::{ExpenseForm, ExpenseListing};
use crate::query::{CategoryFilter, ListQuery};
use crate::view::{format_total, CategoryOptions, ExpenseRow, ExpenseView};

pub const UNREACHABLE_MESSAGE: &str = "Check your connection. The server is unreachable.";
pub const SAVE_FAILED_MESSAGE: &str = "Error saving expense. Check console for details.";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RefreshOutcome {
    Rendered,
    /// A newer refresh started while this one was in flight.
    Superseded,
    Failed,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    Created,
    Rejected,
    Unreachable,
}

pub struct ExpenseClient<A> {
    api: Rc<A>,
    currency_symbol: String,
    generation: Rc<Cell<u64>>,
}

impl<A> Clone for ExpenseClient<A> {
    fn clone(&self) -> Self {
        ExpenseClient {
            api: Rc::clone(&self.api),
            currency_symbol: self.currency_symbol.clone(),
            generation: Rc::clone(&self.generation),
        }
    }
}

impl<A: ExpenseApi> ExpenseClient<A> {
    pub fn new(api: A, currency_symbol: impl Into<String>) -> Self {
        ExpenseClient {
            api: Rc::new(api),
            currency_symbol: currency_symbol.into(),
            generation: Rc::new(Cell::new(0)),
        }
    }

    /// Failures are logged and leave the view as it was.
    pub async fn refresh(&self, filter: &CategoryFilter, view: &impl ExpenseView) -> RefreshOutcome {
        let generation = self.generation.get() + 1;
        self.generation.set(generation);

        let query = ListQuery::new(filter);
        let result = self.api.list(&query).await;

        if self.generation.get() != generation {
            if let Err(err) = &result {
                log::error!("Fetch error: {err}");
            }
            log::debug!("dropping expense list from superseded request {generation}");
            return RefreshOutcome::Superseded;
        }

        match result {
            Ok(listing) => {
                log::info!("rendering {} expenses", listing.expenses.len());
                self.render(&listing, filter, view);
                RefreshOutcome::Rendered
            }
            Err(err) => {
                log::error!("Fetch error: {err}");
                RefreshOutcome::Failed
            }
        }
    }

    pub async fn submit(
        &self,
        form: &ExpenseForm,
        filter: &CategoryFilter,
        view: &impl ExpenseView,
    ) -> SubmitOutcome {
        let expense = form.to_new_expense();
        let key = IdempotencyKey::new();

        match self.api.create(&expense, key).await {
            Ok(()) => {
                log::info!("created expense in {} ({key})", expense.category);
                view.reset_form();
                self.refresh(filter, view).await;
                SubmitOutcome::Created
            }
            Err(ApiError::Network(reason)) => {
                log::error!("Network error: {reason}");
                view.alert(UNREACHABLE_MESSAGE);
                SubmitOutcome::Unreachable
            }
            Err(err) => {
                log::error!("Server error: {err}");
                view.alert(&rejection_message(&err));
                SubmitOutcome::Rejected
            }
        }
    }

    fn render(&self, listing: &ExpenseListing, filter: &CategoryFilter, view: &impl ExpenseView) {
        let rows = listing
            .expenses
            .iter()
            .map(|e| ExpenseRow::from_expense(e, &self.currency_symbol))
            .collect();

        view.render_rows(rows);
        view.render_total(format_total(listing.total(), &self.currency_symbol));

        let options = CategoryOptions::from_expenses(&listing.expenses, filter);
        let filter_lost = !filter.is_all() && options.selected.is_all();
        view.render_category_options(options);
        if filter_lost {
            log::info!("category filter no longer matches any expense, showing all");
            view.reset_filter();
        }
    }
}

fn rejection_message(err: &ApiError) -> String {
    match err {
        ApiError::Status {
            body: Some(body), ..
        } => {
            log::error!("Server error body: {body}");
            format!("Error: {body}")
        }
        _ => SAVE_FAILED_MESSAGE.to_string(),
    }
}
