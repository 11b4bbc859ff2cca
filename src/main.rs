use anyhow::Result;
use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use synapse_rs::cli::{self, Args};
use synapse_rs::generator::workflow::launch;

fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "synapse_rs=debug,synapse=debug"
    } else {
        "synapse_rs=info,synapse=info"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();
}

async fn run(args: Args) -> Result<()> {
    let mut config = args.into_config()?;
    init_tracing(config.verbose);

    let stdin = std::io::stdin();
    cli::resolve_company(&mut config, &mut stdin.lock(), &mut std::io::stdout())?;

    let report = launch(&config).await?;
    println!("\n🎉 {} 的AI转型方案已生成", report.company);
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    // .env 只在入口加载一次
    dotenv::dotenv().ok();

    let args = Args::parse();
    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("❌ {:#}", e);
            ExitCode::FAILURE
        }
    }
}
