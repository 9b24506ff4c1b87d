use crate::hex::try_parse_hex;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

pub const JSONRPC_VERSION: &str = "2.0";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RpcRequest {
    pub method: String,
    pub params: Vec<JsonValue>,
    pub id: u64,
    pub jsonrpc: &'static str,
}

impl RpcRequest {
    pub fn new(id: u64, method: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            params: Vec::new(),
            id,
            jsonrpc: JSONRPC_VERSION,
        }
    }

    pub fn with_params(mut self, params: Vec<JsonValue>) -> Self {
        self.params = params;
        self
    }
}

/// A single element of a batch response.
///
/// Every field is optional on the wire. A node answering with a partial object
/// still yields a response instead of failing the whole batch.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RpcResponse {
    #[serde(default)]
    pub jsonrpc: Option<String>,
    #[serde(default)]
    pub result: Option<JsonValue>,
    /// Kept as raw json so a single element with an odd id doesn't fail the
    /// whole batch.
    #[serde(default)]
    pub id: Option<JsonValue>,
    #[serde(default)]
    pub error: Option<RpcError>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RpcError {
    #[serde(default)]
    pub code: i64,
    #[serde(default)]
    pub message: String,
}

/// Responses of one batch. Order is not guaranteed to match the requests,
/// look values up by id.
#[derive(Debug, Clone, Default, derive_more::Deref, derive_more::From)]
pub struct RpcResponses(pub Vec<RpcResponse>);

impl RpcResponses {
    pub fn find_result(&self, id: u64) -> Option<String> {
        find_result(&self.0, id)
    }
}

/// Returns the stringified `result` of the response with the given id.
///
/// Strings are returned without quotes, `null` and absent results yield `None`,
/// anything else is rendered as compact json.
pub fn find_result(responses: &[RpcResponse], id: u64) -> Option<String> {
    let response = responses
        .iter()
        .find(|r| r.id.as_ref().and_then(JsonValue::as_u64) == Some(id))?;

    match response.result.as_ref()? {
        JsonValue::Null => None,
        JsonValue::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncInfo {
    #[serde(default)]
    pub current_block: Option<String>,
    #[serde(default)]
    pub highest_block: Option<String>,
    #[serde(default)]
    pub starting_block: Option<String>,
}

/// Result of `eth_syncing`, which is either a bare boolean or a progress
/// object. The wire format has no discriminator so decoding is attempted in
/// that order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncStatus {
    Flag(bool),
    Progress(SyncInfo),
    Undecodable,
}

impl SyncStatus {
    pub fn decode(raw: Option<&str>) -> Self {
        let raw = match raw {
            Some(raw) => raw.trim(),
            None => return SyncStatus::Undecodable,
        };

        if let Ok(flag) = raw.to_ascii_lowercase().parse::<bool>() {
            return SyncStatus::Flag(flag);
        }

        // only a json object counts as progress, serde would also accept an
        // array for a struct
        match serde_json::from_str::<JsonValue>(raw) {
            Ok(obj @ JsonValue::Object(_)) => match serde_json::from_value::<SyncInfo>(obj) {
                Ok(info) => SyncStatus::Progress(info),
                Err(_) => SyncStatus::Undecodable,
            },
            _ => SyncStatus::Undecodable,
        }
    }

    /// Anything that can't be decoded counts as syncing.
    pub fn is_syncing(&self) -> bool {
        match self {
            SyncStatus::Flag(flag) => *flag,
            SyncStatus::Progress(info) => match (info.current(), info.highest()) {
                // some clients keep reporting progress after they caught up
                (Some(current), Some(highest)) => current != highest,
                _ => true,
            },
            SyncStatus::Undecodable => true,
        }
    }

    pub fn highest_block(&self) -> Option<i64> {
        match self {
            SyncStatus::Progress(info) => info.highest(),
            _ => None,
        }
    }
}

impl SyncInfo {
    pub fn current(&self) -> Option<i64> {
        self.current_block.as_deref().and_then(try_parse_hex)
    }

    pub fn highest(&self) -> Option<i64> {
        self.highest_block.as_deref().and_then(try_parse_hex)
    }

    pub fn starting(&self) -> Option<i64> {
        self.starting_block.as_deref().and_then(try_parse_hex)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NodeClientVersion {
    pub client: String,
    pub version: String,
    pub short_version: String,
    pub architecture: String,
    pub language: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn response(id: u64, result: JsonValue) -> RpcResponse {
        RpcResponse {
            jsonrpc: Some(JSONRPC_VERSION.to_owned()),
            result: Some(result),
            id: Some(json!(id)),
            error: None,
        }
    }

    #[test]
    fn test_request_wire_format() {
        let req = RpcRequest::new(0x20, "eth_getBlockTransactionCountByNumber")
            .with_params(vec![json!("latest")]);

        assert_eq!(
            serde_json::to_value(vec![req]).unwrap(),
            json!([{
                "method": "eth_getBlockTransactionCountByNumber",
                "params": ["latest"],
                "id": 32,
                "jsonrpc": "2.0",
            }])
        );
    }

    #[test]
    fn test_find_result_ignores_order() {
        let responses = vec![response(2, json!("b")), response(1, json!("a"))];

        assert_eq!(find_result(&responses, 1).as_deref(), Some("a"));
        assert_eq!(find_result(&responses, 2).as_deref(), Some("b"));
        assert_eq!(find_result(&responses, 3), None);
    }

    #[test]
    fn test_find_result_stringifies() {
        let responses = RpcResponses(vec![
            response(1, json!(false)),
            response(2, JsonValue::Null),
            response(3, json!({"currentBlock": "0x1"})),
            RpcResponse {
                id: Some(json!(4)),
                error: Some(RpcError {
                    code: -32601,
                    message: "method not found".to_owned(),
                }),
                ..Default::default()
            },
        ]);

        assert_eq!(responses.find_result(1).as_deref(), Some("false"));
        assert_eq!(responses.find_result(2), None);
        assert_eq!(
            responses.find_result(3).as_deref(),
            Some(r#"{"currentBlock":"0x1"}"#)
        );
        assert_eq!(responses.find_result(4), None);
    }

    #[test]
    fn test_response_tolerates_missing_fields() {
        let responses: Vec<RpcResponse> =
            serde_json::from_str(r#"[{"id": 7}, {"jsonrpc": "2.0", "result": "0x1"}]"#).unwrap();

        assert_eq!(responses[0].id, Some(json!(7)));
        assert_eq!(responses[0].result, None);
        assert_eq!(responses[1].id, None);
    }

    #[test]
    fn test_odd_id_keeps_rest_of_batch() {
        let responses: Vec<RpcResponse> = serde_json::from_str(
            r#"[{"jsonrpc":"2.0","id":"16","result":"0x1"},{"jsonrpc":"2.0","id":32,"result":"0x2"}]"#,
        )
        .unwrap();

        assert_eq!(responses.len(), 2);
        assert_eq!(find_result(&responses, 16), None);
        assert_eq!(find_result(&responses, 32).as_deref(), Some("0x2"));
    }

    #[test]
    fn test_sync_status_flag() {
        let status = SyncStatus::decode(Some("false"));
        assert_eq!(status, SyncStatus::Flag(false));
        assert!(!status.is_syncing());

        assert!(SyncStatus::decode(Some("True")).is_syncing());
    }

    #[test]
    fn test_sync_status_caught_up_progress() {
        let raw = json!({"currentBlock": "0x5", "highestBlock": "0x5", "startingBlock": "0x0"});
        let status = SyncStatus::decode(Some(&raw.to_string()));

        assert!(matches!(status, SyncStatus::Progress(_)));
        assert!(!status.is_syncing());
        assert_eq!(status.highest_block(), Some(5));
    }

    #[test]
    fn test_sync_status_behind() {
        let raw = json!({"currentBlock": "0x5", "highestBlock": "0x9", "startingBlock": "0x0"});
        let status = SyncStatus::decode(Some(&raw.to_string()));

        assert!(status.is_syncing());
        assert_eq!(status.highest_block(), Some(9));
    }

    #[test]
    fn test_sync_status_undecodable_counts_as_syncing() {
        assert!(SyncStatus::decode(Some("0x12")).is_syncing());
        assert!(SyncStatus::decode(Some("not json")).is_syncing());
        assert!(SyncStatus::decode(None).is_syncing());

        let array = SyncStatus::decode(Some(r#"["0x5","0x5","0x0"]"#));
        assert_eq!(array, SyncStatus::Undecodable);
        assert!(array.is_syncing());

        let numbers = json!({"currentBlock": 5, "highestBlock": 5});
        assert!(SyncStatus::decode(Some(&numbers.to_string())).is_syncing());

        let garbage = json!({"currentBlock": "zz", "highestBlock": "0x1"});
        assert!(SyncStatus::decode(Some(&garbage.to_string())).is_syncing());
    }
}
