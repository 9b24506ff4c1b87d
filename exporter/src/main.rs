use eth_exporter::{Config, Exporter};

use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() {
    env_logger::init();

    let config = Config::parse();

    if let Err(e) = Exporter::run(config).await {
        log::error!("failed to run exporter:\n{}", e);
        std::process::exit(1);
    }
}
