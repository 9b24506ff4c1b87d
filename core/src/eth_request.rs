//! Builders for the Ethereum json-rpc calls the exporter issues.

use crate::types::RpcRequest;
use serde_json::json;

pub const LATEST_BLOCK: &str = "latest";

pub fn block_number(id: u64) -> RpcRequest {
    RpcRequest::new(id, "eth_blockNumber")
}

pub fn block_transaction_count_by_number(id: u64, block: &str) -> RpcRequest {
    RpcRequest::new(id, "eth_getBlockTransactionCountByNumber").with_params(vec![json!(block)])
}

pub fn syncing(id: u64) -> RpcRequest {
    RpcRequest::new(id, "eth_syncing")
}

pub fn block_by_number(id: u64, block: &str, include_transactions: bool) -> RpcRequest {
    RpcRequest::new(id, "eth_getBlockByNumber")
        .with_params(vec![json!(block), json!(include_transactions)])
}

pub fn peer_count(id: u64) -> RpcRequest {
    RpcRequest::new(id, "net_peerCount")
}

pub fn client_version(id: u64) -> RpcRequest {
    RpcRequest::new(id, "web3_clientVersion")
}
