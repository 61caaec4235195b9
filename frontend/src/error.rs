#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ApiError {
    /// `body` is the error payload when the server sent JSON.
    #[error("server responded with status {status}")]
    Status {
        status: u16,
        body: Option<serde_json::Value>,
    },

    #[error("could not reach the server: {0}")]
    Network(String),

    #[error("could not decode the response: {0}")]
    Decode(String),

    #[error("could not encode the request: {0}")]
    Encode(String),
}
