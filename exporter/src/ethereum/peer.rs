use crate::metrics::Metrics;
use eth_exporter_core::eth_request;
use eth_exporter_core::hex::try_parse_hex;
use eth_exporter_core::rpc_client::RpcClient;
use eth_exporter_core::scheduler::Collector;
use eth_exporter_core::{Error, Result};
use futures::future::{BoxFuture, FutureExt};
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

const PEER_COUNT_ID: u64 = 0x10;

pub struct PeerCollector {
    client: RpcClient,
    metrics: Arc<Metrics>,
}

impl PeerCollector {
    pub fn new(client: RpcClient, metrics: Arc<Metrics>) -> Self {
        Self { client, metrics }
    }

    async fn collect_peer_metrics(&self, cancel: &CancellationToken) -> Result<()> {
        if cancel.is_cancelled() {
            return Err(Error::Cancelled);
        }

        let responses = self
            .client
            .send(&[eth_request::peer_count(PEER_COUNT_ID)])
            .await;

        let peers = responses
            .find_result(PEER_COUNT_ID)
            .as_deref()
            .and_then(try_parse_hex);
        if let Some(peers) = peers {
            self.metrics.record_peers(peers);
        }

        Ok(())
    }
}

impl Collector for PeerCollector {
    fn name(&self) -> &'static str {
        "ethereum peer"
    }

    fn period(&self) -> Duration {
        Duration::from_secs(10)
    }

    fn collect<'a>(&'a self, cancel: &'a CancellationToken) -> BoxFuture<'a, Result<()>> {
        self.collect_peer_metrics(cancel).boxed()
    }
}
