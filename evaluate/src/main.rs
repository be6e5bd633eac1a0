mod cli;

use anyhow::Result;
use clap::Parser;
use cli::Cli;
use evaluate::EvaluationContext;
use std::process::ExitCode;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

fn init_logger(level: &str) {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_file(true)
                .with_line_number(true)
                .with_target(false),
        )
        .init();
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // 初始化日志记录器
    init_logger(&cli.log_level);

    // 加载配置
    let ctx = EvaluationContext::load_config(&cli.config)?;

    cli::run(cli, ctx).await
}
