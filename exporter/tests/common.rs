use eth_exporter_core::rpc_client::Transport;
use eth_exporter_core::{Error, Result};
use futures::future::{BoxFuture, FutureExt};
use serde_json::{json, Value as JsonValue};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

/// In-order fake node. Reordering is covered by the crate's own unit tests.
#[derive(Default)]
pub struct FakeNode {
    results: Mutex<HashMap<String, JsonValue>>,
    down: AtomicBool,
}

impl FakeNode {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn set(&self, method: &str, result: JsonValue) {
        self.results
            .lock()
            .unwrap()
            .insert(method.to_owned(), result);
    }

    pub fn set_down(&self, down: bool) {
        self.down.store(down, Ordering::SeqCst);
    }
}

impl Transport for FakeNode {
    fn post(&self, body: String) -> BoxFuture<'static, Result<String>> {
        let reply = if self.down.load(Ordering::SeqCst) {
            Err(Error::RpcResponseStatus(502, Some("bad gateway".to_owned())))
        } else {
            let requests: Vec<JsonValue> = serde_json::from_str(&body).unwrap();
            let results = self.results.lock().unwrap();
            let responses = requests
                .iter()
                .filter_map(|req| {
                    let result = results.get(req["method"].as_str()?)?;
                    Some(json!({"jsonrpc": "2.0", "id": req["id"], "result": result}))
                })
                .collect::<Vec<_>>();
            Ok(JsonValue::Array(responses).to_string())
        };

        async move { reply }.boxed()
    }
}

pub fn metric_line<'a>(body: &'a str, name: &str) -> Option<&'a str> {
    body.lines()
        .find(|line| line.split(|c| c == ' ' || c == '{').next() == Some(name))
}
