use crate::config::{Config, RpcTarget};
use crate::error::{Error, Result};
use crate::ethereum;
use crate::metrics::Metrics;
use crate::server::Server;
use eth_exporter_core::rpc_client::{HttpTransport, RpcClient};
use eth_exporter_core::scheduler::Scheduler;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

pub struct Exporter {}

impl Exporter {
    /// Runs the collectors and the metrics endpoint until a shutdown signal
    /// arrives or the endpoint fails.
    pub async fn run(config: Config) -> Result<()> {
        let transport = HttpTransport::new(&config.rpc).map_err(Error::CreateTransport)?;
        let client = RpcClient::new(Arc::new(transport));

        let metrics = Arc::new(Metrics::new());

        let collectors = match config.rpc_target {
            RpcTarget::Ethereum => ethereum::collectors(client, metrics.clone()),
        };

        let cancel = CancellationToken::new();
        let scheduler = Scheduler::new(config.scheduler);

        let tasks = collectors
            .into_iter()
            .map(|collector| scheduler.spawn(collector, cancel.clone()))
            .collect::<Vec<_>>();

        let mut server = tokio::spawn(Server::run(
            config.server_addr,
            metrics,
            cancel.clone(),
        ));

        let server_res = tokio::select! {
            res = shutdown_signal() => {
                if let Err(e) = res {
                    log::error!("{}", e);
                }
                None
            }
            res = &mut server => Some(res),
        };

        log::info!("shutting down");
        cancel.cancel();

        for task in tasks {
            if let Err(e) = task.await {
                log::error!("failed to join collection task:\n{}", e);
            }
        }

        let server_res = match server_res {
            Some(res) => res,
            None => server.await,
        };

        server_res.map_err(Error::JoinError)?
    }
}

#[cfg(unix)]
async fn shutdown_signal() -> Result<()> {
    use tokio::signal;

    let mut sigterm = signal::unix::signal(signal::unix::SignalKind::terminate())
        .map_err(Error::ShutdownSignal)?;

    tokio::select! {
        res = signal::ctrl_c() => res.map_err(Error::ShutdownSignal),
        _ = sigterm.recv() => Ok(()),
    }
}

#[cfg(not(unix))]
async fn shutdown_signal() -> Result<()> {
    tokio::signal::ctrl_c().await.map_err(Error::ShutdownSignal)
}
