use std::result::Result as StdResult;

use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum Error {
    #[error("failed to read rpc response body:\n{0}")]
    RpcResponseBody(reqwest::Error),
    #[error("failed to parse rpc response json:\n{0}")]
    RpcResponseParseJson(serde_json::Error),
    #[error("failed to serialize rpc request:\n{0}")]
    RpcRequestSerialize(serde_json::Error),
    #[error("error: rpc response status is {0}. payload:\n{1:?}")]
    RpcResponseStatus(u16, Option<String>),
    #[error("failed to execute http request:\n{0}")]
    HttpRequest(reqwest::Error),
    #[error("failed to build http client:\n{0}")]
    BuildHttpClient(reqwest::Error),
    #[error("operation was cancelled")]
    Cancelled,
    #[error("collection task panicked:\n{0}")]
    TaskPanicked(String),
}

impl Error {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Error::Cancelled)
    }
}

pub type Result<T> = StdResult<T, Error>;
