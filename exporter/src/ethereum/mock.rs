use eth_exporter_core::rpc_client::Transport;
use eth_exporter_core::{Error, Result};
use futures::future::{BoxFuture, FutureExt};
use serde_json::{json, Value as JsonValue};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Answers every request with the result configured for its method.
///
/// Replies come back in reverse request order so the unit tests exercise id
/// correlation. The integration tests carry their own in-order fake since
/// `cfg(test)` items aren't visible to them.
#[derive(Default)]
pub struct MockNode {
    results: Mutex<HashMap<String, JsonValue>>,
    unreachable: Mutex<bool>,
    calls: AtomicUsize,
}

impl MockNode {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn set(&self, method: &str, result: JsonValue) {
        self.results
            .lock()
            .unwrap()
            .insert(method.to_owned(), result);
    }

    pub fn set_unreachable(&self, unreachable: bool) {
        *self.unreachable.lock().unwrap() = unreachable;
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn reply(&self, body: &str) -> Result<String> {
        if *self.unreachable.lock().unwrap() {
            return Err(Error::RpcResponseStatus(503, None));
        }

        let requests: Vec<JsonValue> = serde_json::from_str(body).unwrap();
        let results = self.results.lock().unwrap();

        let responses = requests
            .iter()
            .rev()
            .filter_map(|req| {
                let result = results.get(req["method"].as_str()?)?;
                Some(json!({
                    "jsonrpc": "2.0",
                    "id": req["id"],
                    "result": result,
                }))
            })
            .collect::<Vec<_>>();

        Ok(JsonValue::Array(responses).to_string())
    }
}

impl Transport for MockNode {
    fn post(&self, body: String) -> BoxFuture<'static, Result<String>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let reply = self.reply(&body);
        async move { reply }.boxed()
    }
}
