use std::result::Result as StdResult;
use std::{fmt, io};
use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum Error {
    #[error("{0} is not a known RPC target.")]
    UnknownRpcTarget(String),
    #[error("failed to create rpc transport:\n{0}")]
    CreateTransport(eth_exporter_core::Error),
    #[error("failed to encode metrics:\n{0}")]
    EncodeMetrics(fmt::Error),
    #[error("failed to bind http server:\n{0}")]
    BindHttpServer(hyper::Error),
    #[error("failed to run http server:\n{0}")]
    RunHttpServer(hyper::Error),
    #[error("failed to join tokio task:\n{0}")]
    JoinError(tokio::task::JoinError),
    #[error("failed to wait for shutdown signal:\n{0}")]
    ShutdownSignal(io::Error),
}

pub type Result<T> = StdResult<T, Error>;
