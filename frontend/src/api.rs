use gloo_net::http::{Request, Response};

use crate::error::ApiError;
use crate::idempotency::IdempotencyKey;
use crate::model::{ExpenseListing, NewExpense};
use crate::query::ListQuery;

#[allow(async_fn_in_trait)]
pub trait ExpenseApi {
    async fn list(&self, query: &ListQuery) -> Result<ExpenseListing, ApiError>;

    async fn create(&self, expense: &NewExpense, key: IdempotencyKey) -> Result<(), ApiError>;
}

/// `ExpenseApi` over the browser's fetch.
#[derive(Clone, Debug, PartialEq)]
pub struct HttpExpenseApi {
    api_url: String,
}

impl HttpExpenseApi {
    pub fn new(api_url: impl Into<String>) -> Self {
        HttpExpenseApi {
            api_url: api_url.into(),
        }
    }

    // The collection route only matches with exactly one trailing slash.
    fn collection_url(&self) -> String {
        format!("{}/", self.api_url.trim_end_matches('/'))
    }
}

impl ExpenseApi for HttpExpenseApi {
    async fn list(&self, query: &ListQuery) -> Result<ExpenseListing, ApiError> {
        let query_string = query
            .to_query_string()
            .map_err(|e| ApiError::Encode(e.to_string()))?;
        let url = format!("{}?{}", self.collection_url(), query_string);
        log::debug!("GET {url}");

        let resp = Request::get(&url)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        if !resp.ok() {
            return Err(status_error(&resp).await);
        }

        resp.json::<ExpenseListing>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }

    async fn create(&self, expense: &NewExpense, key: IdempotencyKey) -> Result<(), ApiError> {
        let url = self.collection_url();
        log::debug!("POST {url} ({} {key})", IdempotencyKey::HEADER);

        let request = Request::post(&url)
            .header(IdempotencyKey::HEADER, &key.to_string())
            .json(expense)
            .map_err(|e| ApiError::Encode(e.to_string()))?;

        let resp = request
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        if resp.ok() {
            Ok(())
        } else {
            Err(status_error(&resp).await)
        }
    }
}

async fn status_error(resp: &Response) -> ApiError {
    ApiError::Status {
        status: resp.status(),
        body: resp.json::<serde_json::Value>().await.ok(),
    }
}

#[cfg(test)]
mod tests {
    use super::HttpExpenseApi;

    #[test]
    fn collection_url_has_single_trailing_slash() {
        assert_eq!(
            HttpExpenseApi::new("http://localhost:8000/api/expenses").collection_url(),
            "http://localhost:8000/api/expenses/"
        );
        assert_eq!(
            HttpExpenseApi::new("http://localhost:8000/api/expenses/").collection_url(),
            "http://localhost:8000/api/expenses/"
        );
    }
}
