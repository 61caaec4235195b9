use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer, Serialize};

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Expense {
    pub date: String,
    pub category: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default = "missing_amount", deserialize_with = "deserialize_amount")]
    pub amount: f64,
}

// A non-finite amount is serialised as `null`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct NewExpense {
    pub date: String,
    pub category: String,
    pub description: String,
    pub amount: f64,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ExpenseForm {
    pub date: String,
    pub category: String,
    pub description: String,
    pub amount: String,
}

impl ExpenseForm {
    pub fn to_new_expense(&self) -> NewExpense {
        NewExpense {
            date: self.date.clone(),
            category: self.category.clone(),
            description: self.description.clone(),
            amount: parse_float(&self.amount),
        }
    }
}

/// A bare array, or an envelope with the array under `results` or `expenses`
/// and an optional `total`.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(from = "ListingBody")]
pub struct ExpenseListing {
    pub expenses: Vec<Expense>,
    pub total: Option<f64>,
}

impl ExpenseListing {
    pub fn total(&self) -> f64 {
        self.total
            .unwrap_or_else(|| self.expenses.iter().map(|e| e.amount).sum())
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ListingBody {
    Bare(Vec<Expense>),
    Envelope {
        #[serde(default)]
        results: Option<Vec<Expense>>,
        #[serde(default)]
        expenses: Option<Vec<Expense>>,
        #[serde(default, deserialize_with = "deserialize_optional_amount")]
        total: Option<f64>,
    },
}

impl From<ListingBody> for ExpenseListing {
    fn from(body: ListingBody) -> Self {
        match body {
            ListingBody::Bare(expenses) => ExpenseListing {
                expenses,
                total: None,
            },
            ListingBody::Envelope {
                results,
                expenses,
                total,
            } => ExpenseListing {
                expenses: results.or(expenses).unwrap_or_default(),
                total,
            },
        }
    }
}

// Decimal fields arrive either as JSON numbers or as strings like "12.50".
// Anything else becomes NaN rather than failing the whole listing.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawAmount {
    Number(f64),
    Text(String),
    Other(IgnoredAny),
}

impl RawAmount {
    fn into_f64(self) -> f64 {
        match self {
            RawAmount::Number(n) => n,
            RawAmount::Text(s) => parse_float(&s),
            RawAmount::Other(_) => f64::NAN,
        }
    }
}

fn missing_amount() -> f64 {
    f64::NAN
}

fn deserialize_amount<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    RawAmount::deserialize(deserializer).map(RawAmount::into_f64)
}

fn deserialize_optional_amount<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<RawAmount>::deserialize(deserializer)?.map(RawAmount::into_f64))
}

/// Longest numeric prefix after leading whitespace, or `NaN`.
pub fn parse_float(raw: &str) -> f64 {
    let s = raw.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end = 1;
    }
    if s[end..].starts_with("Infinity") {
        return if s.starts_with('-') {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };
    }

    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        end = frac_end;
    }

    if digits == 0 {
        return f64::NAN;
    }

    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && matches!(bytes[exp_end], b'+' | b'-') {
            exp_end += 1;
        }
        let exp_digits = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits {
            end = exp_end;
        }
    }

    s[..end].parse().unwrap_or(f64::NAN)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{parse_float, Expense, ExpenseForm, ExpenseListing};

    fn expense(category: &str, amount: f64) -> Expense {
        Expense {
            date: "2024-01-01".to_string(),
            category: category.to_string(),
            description: None,
            amount,
        }
    }

    #[test]
    fn parses_numeric_prefix() {
        assert_eq!(parse_float("12.5"), 12.5);
        assert_eq!(parse_float("  42"), 42.0);
        assert_eq!(parse_float("12.50abc"), 12.5);
        assert_eq!(parse_float("-3"), -3.0);
        assert_eq!(parse_float(".5"), 0.5);
        assert_eq!(parse_float("1e3"), 1000.0);
        assert_eq!(parse_float("7e"), 7.0);
        assert_eq!(parse_float("Infinity"), f64::INFINITY);
    }

    #[test]
    fn malformed_input_is_nan() {
        assert!(parse_float("").is_nan());
        assert!(parse_float("abc").is_nan());
        assert!(parse_float(".").is_nan());
        assert!(parse_float("-").is_nan());
        assert!(parse_float("nan").is_nan());
    }

    #[test]
    fn decodes_bare_list() {
        let body = json!([
            {"date": "2024-01-02", "category": "Food", "description": "Lunch", "amount": "12.50"},
            {"date": "2024-01-01", "category": "Travel", "amount": 3}
        ]);

        let listing: ExpenseListing = serde_json::from_value(body).unwrap();

        assert_eq!(listing.expenses.len(), 2);
        assert_eq!(listing.expenses[0].amount, 12.5);
        assert_eq!(listing.expenses[0].description.as_deref(), Some("Lunch"));
        assert_eq!(listing.expenses[1].description, None);
        assert_eq!(listing.total, None);
    }

    #[test]
    fn decodes_expenses_envelope_with_total() {
        let body = json!({
            "expenses": [
                {"id": 7, "date": "2024-01-02", "category": "Food", "description": "", "amount": "1.25", "created_at": "2024-01-02T10:00:00Z"}
            ],
            "total": "99.90"
        });

        let listing: ExpenseListing = serde_json::from_value(body).unwrap();

        let want = Expense {
            date: "2024-01-02".to_string(),
            description: Some(String::new()),
            ..expense("Food", 1.25)
        };
        assert_eq!(listing.expenses, vec![want]);
        assert_eq!(listing.total, Some(99.9));
    }

    #[test]
    fn results_key_takes_precedence() {
        let body = json!({
            "results": [{"date": "2024-01-01", "category": "Rent", "amount": 500}],
            "expenses": [{"date": "2024-01-01", "category": "Food", "amount": 1}]
        });

        let listing: ExpenseListing = serde_json::from_value(body).unwrap();

        assert_eq!(listing.expenses, vec![expense("Rent", 500.0)]);
    }

    #[test]
    fn envelope_without_list_is_empty() {
        let listing: ExpenseListing = serde_json::from_value(json!({"total": 0})).unwrap();

        assert!(listing.expenses.is_empty());
        assert_eq!(listing.total(), 0.0);
    }

    #[test]
    fn bad_amount_does_not_drop_the_listing() {
        let body = json!({
            "expenses": [
                {"date": "2024-01-02", "category": "Food", "amount": null},
                {"date": "2024-01-01", "category": "Rent"},
                {"date": "2024-01-01", "category": "Travel", "amount": {"value": 1}},
                {"date": "2024-01-01", "category": "Fuel", "amount": "40"}
            ]
        });

        let listing: ExpenseListing = serde_json::from_value(body).unwrap();

        assert_eq!(listing.expenses.len(), 4);
        assert!(listing.expenses[0].amount.is_nan());
        assert!(listing.expenses[1].amount.is_nan());
        assert!(listing.expenses[2].amount.is_nan());
        assert_eq!(listing.expenses[3].amount, 40.0);
        assert!(listing.total().is_nan());
    }

    #[test]
    fn null_total_falls_back_to_sum() {
        let body = json!({
            "expenses": [{"date": "2024-01-01", "category": "Food", "amount": 2}],
            "total": null
        });

        let listing: ExpenseListing = serde_json::from_value(body).unwrap();

        assert_eq!(listing.total, None);
        assert_eq!(listing.total(), 2.0);
    }

    #[test]
    fn total_prefers_server_value() {
        let listing = ExpenseListing {
            expenses: vec![expense("Food", 1.0), expense("Food", 2.0)],
            total: Some(10.0),
        };

        assert_eq!(listing.total(), 10.0);
    }

    #[test]
    fn total_falls_back_to_sum() {
        let listing = ExpenseListing {
            expenses: vec![expense("Food", 1.25), expense("Travel", 2.5)],
            total: None,
        };

        assert_eq!(listing.total(), 3.75);
    }

    #[test]
    fn form_coerces_amount_only() {
        let form = ExpenseForm {
            date: "2024-01-01".to_string(),
            category: "Food".to_string(),
            description: String::new(),
            amount: "12.5".to_string(),
        };

        let body = serde_json::to_value(form.to_new_expense()).unwrap();

        assert_eq!(
            body,
            json!({"date": "2024-01-01", "category": "Food", "description": "", "amount": 12.5})
        );
    }

    #[test]
    fn malformed_amount_is_sent_as_null() {
        let form = ExpenseForm {
            amount: "twelve".to_string(),
            ..ExpenseForm::default()
        };

        let new_expense = form.to_new_expense();
        let body = serde_json::to_value(&new_expense).unwrap();

        assert!(new_expense.amount.is_nan());
        assert_eq!(body["amount"], serde_json::Value::Null);
    }
}
