use crate::metrics::Metrics;
use eth_exporter_core::client_version::parse_client_version;
use eth_exporter_core::eth_request;
use eth_exporter_core::rpc_client::RpcClient;
use eth_exporter_core::scheduler::Collector;
use eth_exporter_core::{Error, Result};
use futures::future::{BoxFuture, FutureExt};
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

const CLIENT_VERSION_ID: u64 = 0x10;

/// Publishes the node's client version as labels of `eth_client_version`.
pub struct NodeCollector {
    client: RpcClient,
    metrics: Arc<Metrics>,
}

impl NodeCollector {
    pub fn new(client: RpcClient, metrics: Arc<Metrics>) -> Self {
        Self { client, metrics }
    }

    async fn collect_node_metrics(&self, cancel: &CancellationToken) -> Result<()> {
        if cancel.is_cancelled() {
            return Err(Error::Cancelled);
        }

        let responses = self
            .client
            .send(&[eth_request::client_version(CLIENT_VERSION_ID)])
            .await;

        let raw = match responses.find_result(CLIENT_VERSION_ID) {
            Some(raw) => raw,
            None => return Ok(()),
        };

        match parse_client_version(&raw) {
            Some(version) => self.metrics.record_client_version(&version),
            None => log::debug!("unrecognized client version {:?}", raw),
        }

        Ok(())
    }
}

impl Collector for NodeCollector {
    fn name(&self) -> &'static str {
        "ethereum node"
    }

    fn period(&self) -> Duration {
        Duration::from_secs(60)
    }

    fn collect<'a>(&'a self, cancel: &'a CancellationToken) -> BoxFuture<'a, Result<()>> {
        self.collect_node_metrics(cancel).boxed()
    }
}
