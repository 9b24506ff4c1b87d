use crate::config::SchedulerConfig;
use crate::error::{Error, Result};
use futures::future::{BoxFuture, FutureExt};
use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// A metric family that is collected periodically.
pub trait Collector: Send + Sync {
    /// Name used in log messages.
    fn name(&self) -> &'static str;

    /// Delay between two successful ticks.
    fn period(&self) -> Duration;

    /// Runs a single tick. Failures that only affect this tick should be
    /// handled inside, an error returned here restarts the collection loop.
    fn collect<'a>(&'a self, cancel: &'a CancellationToken) -> BoxFuture<'a, Result<()>>;
}

#[derive(Clone, Copy, Debug)]
pub struct Scheduler {
    restart_cooldown: Duration,
}

impl Scheduler {
    pub fn new(cfg: SchedulerConfig) -> Self {
        Self {
            restart_cooldown: cfg.restart_cooldown(),
        }
    }

    pub fn spawn(self, collector: Arc<dyn Collector>, cancel: CancellationToken) -> JoinHandle<()> {
        tokio::spawn(async move { self.run(&*collector, cancel).await })
    }

    /// Drives `collector` until `cancel` fires.
    ///
    /// A failed tick restarts the whole loop after the cooldown, there is no
    /// limit on the number of restarts.
    pub async fn run<C: Collector + ?Sized>(&self, collector: &C, cancel: CancellationToken) {
        let name = collector.name();
        log::info!("starting {} collection", name);

        loop {
            let err = self.run_ticks(collector, &cancel).await;
            if err.is_cancelled() {
                break;
            }

            log::error!("error during {} collection:\n{}", name, err);

            tokio::select! {
                biased;
                _ = cancel.cancelled() => break,
                _ = tokio::time::sleep(self.restart_cooldown) => {}
            }

            log::info!("restarting {} collection", name);
        }

        log::info!("stopped {} collection", name);
    }

    /// Runs ticks until one fails. Returns the error that ended the loop,
    /// [`Error::Cancelled`] on shutdown.
    async fn run_ticks<C: Collector + ?Sized>(
        &self,
        collector: &C,
        cancel: &CancellationToken,
    ) -> Error {
        loop {
            if cancel.is_cancelled() {
                return Error::Cancelled;
            }

            let tick = AssertUnwindSafe(collector.collect(cancel)).catch_unwind();

            // in-flight rpc calls are dropped on cancellation
            let res = tokio::select! {
                biased;
                _ = cancel.cancelled() => return Error::Cancelled,
                res = tick => res,
            };

            match res {
                Ok(Ok(())) => (),
                Ok(Err(e)) => return e,
                Err(panic) => return Error::TaskPanicked(panic_message(panic)),
            }

            tokio::select! {
                biased;
                _ = cancel.cancelled() => return Error::Cancelled,
                _ = tokio::time::sleep(collector.period()) => {}
            }
        }
    }
}

fn panic_message(panic: Box<dyn Any + Send>) -> String {
    if let Some(msg) = panic.downcast_ref::<&str>() {
        msg.to_string()
    } else if let Some(msg) = panic.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unknown panic".to_owned()
    }
}
