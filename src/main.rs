use anyhow::Context;
use clap::Parser;
use tracing::info;
use well_connected_gardener::{cli::Cli, config::Config, runner};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // ログ初期化
    let log_level = if cli.verbose { "debug" } else { "info" };
    let env_filter = format!("well_connected_gardener={}", log_level);
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(env_filter))
        .with_writer(std::io::stderr)
        .init();

    let config = Config::load().context("設定ファイルを読み込めません")?;

    let reports = runner::run(cli.files, config).await?;

    let completed = reports.iter().filter(|r| r.is_completed()).count();
    info!("{}/{} ファイル完了", completed, reports.len());

    Ok(())
}
