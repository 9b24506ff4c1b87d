use crate::metrics::Metrics;
use eth_exporter_core::eth_request::{self, LATEST_BLOCK};
use eth_exporter_core::hex::try_parse_hex;
use eth_exporter_core::rpc_client::RpcClient;
use eth_exporter_core::scheduler::Collector;
use eth_exporter_core::types::SyncStatus;
use eth_exporter_core::{Error, Result};
use futures::future::{BoxFuture, FutureExt};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio_util::sync::CancellationToken;

const BLOCK_NUMBER_ID: u64 = 0x10;
const LATEST_BLOCK_TRANSACTIONS_ID: u64 = 0x20;
const SYNCING_ID: u64 = 0x30;
const LATENCY_PROBE_ID: u64 = 0x42;

/// Block height, latest block transaction count, sync state and rpc latency.
pub struct BlockCollector {
    client: RpcClient,
    metrics: Arc<Metrics>,
}

impl BlockCollector {
    pub fn new(client: RpcClient, metrics: Arc<Metrics>) -> Self {
        Self { client, metrics }
    }

    async fn collect_block_metrics(&self, cancel: &CancellationToken) -> Result<()> {
        if cancel.is_cancelled() {
            return Err(Error::Cancelled);
        }

        let responses = self
            .client
            .send(&[
                eth_request::block_number(BLOCK_NUMBER_ID),
                eth_request::block_transaction_count_by_number(
                    LATEST_BLOCK_TRANSACTIONS_ID,
                    LATEST_BLOCK,
                ),
                eth_request::syncing(SYNCING_ID),
            ])
            .await;

        // nothing came back, the client already logged why
        if responses.is_empty() {
            return Ok(());
        }

        let block_number = responses
            .find_result(BLOCK_NUMBER_ID)
            .as_deref()
            .and_then(try_parse_hex);
        if let Some(block_number) = block_number {
            self.metrics.record_block_number(block_number);
        }

        let transactions = responses
            .find_result(LATEST_BLOCK_TRANSACTIONS_ID)
            .as_deref()
            .and_then(try_parse_hex);
        if let Some(transactions) = transactions {
            self.metrics.record_latest_block_transactions(transactions);
        }

        let sync_status = SyncStatus::decode(responses.find_result(SYNCING_ID).as_deref());
        if let SyncStatus::Undecodable = sync_status {
            log::debug!("undecodable eth_syncing result, assuming node is syncing");
        }
        self.metrics.record_syncing(sync_status.is_syncing());

        // the node's own block number is the highest one it knows unless it is
        // catching up
        if let Some(highest) = sync_status.highest_block().or(block_number) {
            self.metrics.record_highest_block_number(highest);
        }

        Ok(())
    }

    async fn collect_latency_metrics(&self, cancel: &CancellationToken) -> Result<()> {
        if cancel.is_cancelled() {
            return Err(Error::Cancelled);
        }

        let metrics = self.metrics.clone();

        // full transactions make the probe closer to a real workload, the
        // block itself is not used
        self.client
            .send_with(
                &[eth_request::block_by_number(
                    LATENCY_PROBE_ID,
                    LATEST_BLOCK,
                    true,
                )],
                |call| async move {
                    let start_time = Instant::now();
                    let res = call.await;
                    if res.is_ok() {
                        metrics.record_block_latency(start_time.elapsed());
                    }
                    res
                },
            )
            .await;

        Ok(())
    }
}

impl Collector for BlockCollector {
    fn name(&self) -> &'static str {
        "ethereum block"
    }

    fn period(&self) -> Duration {
        Duration::from_secs(1)
    }

    fn collect<'a>(&'a self, cancel: &'a CancellationToken) -> BoxFuture<'a, Result<()>> {
        async move {
            self.collect_block_metrics(cancel).await?;
            self.collect_latency_metrics(cancel).await
        }
        .boxed()
    }
}
