mod config;
mod error;
mod exporter;
mod metrics;
mod server;

pub mod ethereum;

pub use config::{Config, RpcTarget};
pub use error::{Error, Result};
pub use exporter::Exporter;
pub use metrics::Metrics;
pub use server::Server;
