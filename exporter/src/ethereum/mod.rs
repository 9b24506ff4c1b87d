//! Collection tasks for Ethereum compatible nodes.

mod block;
mod node;
mod peer;

#[cfg(test)]
pub(crate) mod mock;

pub use block::BlockCollector;
pub use node::NodeCollector;
pub use peer::PeerCollector;

use crate::metrics::Metrics;
use eth_exporter_core::rpc_client::RpcClient;
use eth_exporter_core::scheduler::Collector;
use std::sync::Arc;

pub fn collectors(client: RpcClient, metrics: Arc<Metrics>) -> Vec<Arc<dyn Collector>> {
    vec![
        Arc::new(BlockCollector::new(client.clone(), metrics.clone())),
        Arc::new(PeerCollector::new(client.clone(), metrics.clone())),
        Arc::new(NodeCollector::new(client, metrics)),
    ]
}
