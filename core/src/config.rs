use clap::Args;
use std::num::NonZeroU64;
use std::time::Duration;

#[derive(Args, Clone, Debug)]
pub struct RpcConfig {
    /// Url of the node's json-rpc endpoint
    #[clap(long, env = "RPC_URL")]
    pub rpc_url: url::Url,
    /// Http request timeout in seconds
    #[clap(long, default_value = "20")]
    pub request_timeout_secs: NonZeroU64,
    /// Http connect timeout in milliseconds
    #[clap(long, default_value = "5000")]
    pub connect_timeout_ms: NonZeroU64,
}

#[derive(Args, Clone, Copy, Debug)]
pub struct SchedulerConfig {
    /// Seconds to wait before restarting a crashed collection task
    #[clap(long, default_value_t = 10)]
    pub restart_cooldown_secs: u64,
}

impl SchedulerConfig {
    pub fn restart_cooldown(&self) -> Duration {
        Duration::from_secs(self.restart_cooldown_secs)
    }
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            restart_cooldown_secs: 10,
        }
    }
}
