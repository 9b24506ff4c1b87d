pub mod client_version;
pub mod config;
pub mod error;
pub mod eth_request;
pub mod hex;
pub mod rpc_client;
pub mod scheduler;
pub mod types;

pub use error::{Error, Result};
