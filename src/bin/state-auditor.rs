use clap::{Parser, error::ErrorKind};
use state_auditor::{config::Config, eth::EthClient, report::Auditor};
use tracing_subscriber::filter::{EnvFilter, LevelFilter};

const EXIT_USAGE: i32 = 1;
const EXIT_UNREACHABLE: i32 = 2;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    dotenv::dotenv().ok();
    enable_tracer();

    let config = match Config::try_parse() {
        Ok(config) => config,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            e.exit()
        }
        Err(e) => {
            e.print().ok();
            std::process::exit(EXIT_USAGE);
        }
    };

    let eth = EthClient::new(&config.rpc)?;
    match eth.check_connectivity().await {
        Ok(chain_id) => tracing::info!(rpc = %config.rpc, chain_id, "RPC reachable"),
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(EXIT_UNREACHABLE);
        }
    }

    let report = Auditor::new(eth)
        .with_concurrency(config.concurrency as usize)
        .run(
            &config.rpc,
            config.block_a,
            config.block_b,
            &config.addresses,
        )
        .await?;

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

/// Logs go to stderr so stdout carries only the report.
fn enable_tracer() {
    let env_filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
}
