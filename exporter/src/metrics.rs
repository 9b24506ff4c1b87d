use crate::{Error, Result};
use core::sync::atomic::{AtomicI64, AtomicU64};
use eth_exporter_core::types::NodeClientVersion;
use prometheus_client::encoding::text::encode;
use prometheus_client::encoding::EncodeLabelSet;
use prometheus_client::metrics::family::Family;
use prometheus_client::metrics::gauge::Gauge as GaugeImpl;
use prometheus_client::registry::Registry;
use std::time::Duration;

type Gauge = GaugeImpl<i64, AtomicI64>;
type LatencyGauge = GaugeImpl<f64, AtomicU64>;

/// Registry of everything the exporter publishes. Collectors only ever write
/// to it, the metrics endpoint only reads.
pub struct Metrics {
    pub(crate) block_number: Gauge,
    pub(crate) highest_block_number: Gauge,
    pub(crate) block_number_latency: LatencyGauge,
    pub(crate) latest_block_transactions: Gauge,
    pub(crate) syncing: Gauge,
    pub(crate) peers: Gauge,
    pub(crate) client_version: Family<VersionLabels, Gauge>,
    registry: Registry,
}

#[derive(Debug, Clone, Hash, PartialEq, Eq, EncodeLabelSet)]
pub(crate) struct VersionLabels {
    client: String,
    version: String,
    version_short: String,
    architecture: String,
    language: String,
}

impl From<&NodeClientVersion> for VersionLabels {
    fn from(v: &NodeClientVersion) -> Self {
        Self {
            client: v.client.clone(),
            version: v.version.clone(),
            version_short: v.short_version.clone(),
            architecture: v.architecture.clone(),
            language: v.language.clone(),
        }
    }
}

impl Metrics {
    pub fn new() -> Self {
        let block_number = Gauge::default();
        let highest_block_number = Gauge::default();
        let block_number_latency = LatencyGauge::default();
        let latest_block_transactions = Gauge::default();
        let syncing = Gauge::default();
        let peers = Gauge::default();
        let client_version = Family::<VersionLabels, Gauge>::default();
        let mut registry = <Registry>::default();

        registry.register(
            "eth_block_number",
            "Current block number",
            block_number.clone(),
        );
        registry.register(
            "eth_highest_block_number",
            "Highest block number",
            highest_block_number.clone(),
        );
        registry.register(
            "eth_block_number_latency",
            "Latency for getting latest block",
            block_number_latency.clone(),
        );
        registry.register(
            "eth_latest_block_transactions",
            "Latest block transaction count",
            latest_block_transactions.clone(),
        );
        registry.register(
            "eth_syncing",
            "Whether node is currently syncing",
            syncing.clone(),
        );
        registry.register(
            "eth_peers",
            "Number of currently connected peers",
            peers.clone(),
        );
        registry.register(
            "eth_client_version",
            "Client version used by node",
            client_version.clone(),
        );

        Self {
            block_number,
            highest_block_number,
            block_number_latency,
            latest_block_transactions,
            syncing,
            peers,
            client_version,
            registry,
        }
    }

    pub fn record_block_number(&self, block_number: i64) {
        self.block_number.set(block_number);
    }

    pub fn record_highest_block_number(&self, block_number: i64) {
        self.highest_block_number.set(block_number);
    }

    pub fn record_block_latency(&self, latency: Duration) {
        self.block_number_latency.set(latency.as_secs_f64());
    }

    pub fn record_latest_block_transactions(&self, count: i64) {
        self.latest_block_transactions.set(count);
    }

    pub fn record_syncing(&self, syncing: bool) {
        self.syncing.set(i64::from(syncing));
    }

    pub fn record_peers(&self, peers: i64) {
        self.peers.set(peers);
    }

    pub fn record_client_version(&self, version: &NodeClientVersion) {
        self.client_version
            .get_or_create(&VersionLabels::from(version))
            .set(1);
    }

    pub fn encode(&self) -> Result<String> {
        let mut buf = String::new();

        encode(&mut buf, &self.registry).map_err(Error::EncodeMetrics)?;

        Ok(buf)
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}
