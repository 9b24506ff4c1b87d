use crate::config::RpcConfig;
use crate::error::{Error, Result};
use crate::types::{RpcRequest, RpcResponse, RpcResponses};
use futures::future::{BoxFuture, FutureExt};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

/// Outbound side of the rpc client. Posts a json payload and resolves to the
/// raw response body.
pub trait Transport: Send + Sync {
    fn post(&self, body: String) -> BoxFuture<'static, Result<String>>;
}

pub struct HttpTransport {
    http_client: reqwest::Client,
    rpc_url: url::Url,
}

impl HttpTransport {
    pub fn new(cfg: &RpcConfig) -> Result<HttpTransport> {
        let request_timeout = Duration::from_secs(cfg.request_timeout_secs.get());
        let connect_timeout = Duration::from_millis(cfg.connect_timeout_ms.get());

        let http_client = reqwest::ClientBuilder::new()
            .gzip(true)
            .timeout(request_timeout)
            .connect_timeout(connect_timeout)
            .build()
            .map_err(Error::BuildHttpClient)?;

        Ok(HttpTransport {
            http_client,
            rpc_url: cfg.rpc_url.clone(),
        })
    }
}

impl Transport for HttpTransport {
    fn post(&self, body: String) -> BoxFuture<'static, Result<String>> {
        let http_client = self.http_client.clone();
        let rpc_url = self.rpc_url.clone();

        async move {
            let resp = http_client
                .post(rpc_url)
                .header(reqwest::header::CONTENT_TYPE, "application/json")
                .body(body)
                .send()
                .await
                .map_err(Error::HttpRequest)?;

            let resp_status = resp.status();
            if !resp_status.is_success() {
                let body = resp.text().await.ok();
                return Err(Error::RpcResponseStatus(resp_status.as_u16(), body));
            }

            resp.text().await.map_err(Error::RpcResponseBody)
        }
        .boxed()
    }
}

#[derive(Clone)]
pub struct RpcClient {
    transport: Arc<dyn Transport>,
}

impl RpcClient {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Sends all requests as a single batch.
    ///
    /// Transport and decoding failures are logged here and come back as an
    /// empty response set, callers should skip the cycle in that case.
    pub async fn send(&self, requests: &[RpcRequest]) -> RpcResponses {
        self.send_with(requests, |call| call).await
    }

    /// Same as [`RpcClient::send`] but lets the caller wrap the outbound call,
    /// e.g. to time it. `wrap` gets the pending call and has to drive it to
    /// completion exactly once.
    pub async fn send_with<W, Fut>(&self, requests: &[RpcRequest], wrap: W) -> RpcResponses
    where
        W: FnOnce(BoxFuture<'static, Result<String>>) -> Fut,
        Fut: Future<Output = Result<String>>,
    {
        if requests.is_empty() {
            return RpcResponses::default();
        }

        let req_body = match serde_json::to_string(requests) {
            Ok(body) => body,
            Err(e) => {
                log::error!("{}", Error::RpcRequestSerialize(e));
                return RpcResponses::default();
            }
        };

        log::debug!("sending batch of {} requests to rpc upstream", requests.len());

        let resp_body = match wrap(self.transport.post(req_body)).await {
            Ok(body) => body,
            Err(e) => {
                log::error!("FATAL: upstream rpc unreachable:\n{}", e);
                return RpcResponses::default();
            }
        };

        match parse_batch_response(&resp_body) {
            Ok(responses) => responses,
            Err(e) => {
                log::error!(
                    "FATAL: failed to decode rpc response, body was:\n{}\n{}",
                    resp_body,
                    e
                );
                RpcResponses::default()
            }
        }
    }
}

fn parse_batch_response(body: &str) -> Result<RpcResponses> {
    let responses: Vec<RpcResponse> =
        serde_json::from_str(body).map_err(Error::RpcResponseParseJson)?;

    for resp in responses.iter() {
        if let Some(err) = &resp.error {
            log::warn!(
                "rpc request {:?} failed with code {}: {}",
                resp.id,
                err.code,
                err.message
            );
        }
    }

    Ok(responses.into())
}
