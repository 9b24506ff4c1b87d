use crate::types::NodeClientVersion;
use once_cell::sync::Lazy;
use regex::Regex;

// <client>/[/]<version>/<architecture>/<language>, version has to start with
// an optional `v` and a numeric triple
static VERSION_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(?P<client>[^/]+)//?(?P<version>(?P<short>v?\d+\.\d+\.\d+)[^/]*)/(?P<arch>[^/]+)/(?P<lang>[^/]+)$",
    )
    .unwrap()
});

/// Splits the string returned by `web3_clientVersion` into its parts.
///
/// Returns `None` when the string doesn't follow the common
/// `client/version/arch/language` layout.
pub fn parse_client_version(raw: &str) -> Option<NodeClientVersion> {
    let caps = VERSION_REGEX.captures(raw)?;

    Some(NodeClientVersion {
        client: caps["client"].to_owned(),
        version: caps["version"].to_owned(),
        short_version: caps["short"].to_owned(),
        architecture: caps["arch"].to_owned(),
        language: caps["lang"].to_owned(),
    })
}
