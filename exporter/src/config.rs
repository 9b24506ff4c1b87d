use crate::error::Error;
use clap::Parser;
use eth_exporter_core::config::{RpcConfig, SchedulerConfig};
use std::fmt;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::str::FromStr;

#[derive(Clone, Parser, Debug)]
#[clap(author, version, about, long_about = None)]
pub struct Config {
    #[command(flatten)]
    pub rpc: RpcConfig,
    #[command(flatten)]
    pub scheduler: SchedulerConfig,
    /// Kind of node behind the rpc url
    #[clap(long, env = "RPC_TARGET", default_value_t = RpcTarget::Ethereum)]
    pub rpc_target: RpcTarget,
    /// Address to serve metrics on
    #[clap(long, default_value_t = default_server_addr())]
    pub server_addr: SocketAddr,
}

fn default_server_addr() -> SocketAddr {
    SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), 9368)
}

impl Config {
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RpcTarget {
    /// Ethereum compatible json-rpc
    Ethereum,
}

impl FromStr for RpcTarget {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "ethereum" => Ok(RpcTarget::Ethereum),
            _ => Err(Error::UnknownRpcTarget(s.to_owned())),
        }
    }
}

impl fmt::Display for RpcTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RpcTarget::Ethereum => f.write_str("ethereum"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rpc_target() {
        assert_eq!("ethereum".parse::<RpcTarget>().unwrap(), RpcTarget::Ethereum);
        assert_eq!("Ethereum".parse::<RpcTarget>().unwrap(), RpcTarget::Ethereum);

        let err = "bitcoin".parse::<RpcTarget>().unwrap_err();
        assert_eq!(err.to_string(), "bitcoin is not a known RPC target.");
    }

    #[test]
    fn test_parse_config() {
        let config = Config::try_parse_from([
            "eth-exporter",
            "--rpc-url",
            "http://localhost:8545",
            "--restart-cooldown-secs",
            "3",
        ])
        .unwrap();

        assert_eq!(config.rpc.rpc_url.as_str(), "http://localhost:8545/");
        assert_eq!(config.rpc.request_timeout_secs.get(), 20);
        assert_eq!(config.scheduler.restart_cooldown_secs, 3);
        assert_eq!(config.rpc_target, RpcTarget::Ethereum);
        assert_eq!(config.server_addr.port(), 9368);
    }

    #[test]
    fn test_unknown_rpc_target_is_rejected() {
        let res = Config::try_parse_from([
            "eth-exporter",
            "--rpc-url",
            "http://localhost:8545",
            "--rpc-target",
            "solana",
        ]);

        assert!(res.is_err());
    }
}
