//! churn-rs 入口
//!
//! 两个子命令：`serve` 启动预测服务，`predict` 作为表单客户端提交一次预测。
//! 模型制品标识来自 config.json，三套部署差异收敛为一份配置。

mod artifact;
mod client;
mod config;
mod server;

use std::path::Path;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use config::Config;

#[derive(Parser)]
#[command(name = "churn-rs", about = "客户流失预测服务与表单客户端")]
struct Cli {
    /// 配置文件路径
    #[arg(long, default_value_t = Config::default_config_path().to_string())]
    config: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// 启动预测服务
    Serve,
    /// 提交一次流失预测（表单客户端）
    Predict(client::PredictArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let config = Config::load(&cli.config)
        .with_context(|| format!("加载配置失败: {}", cli.config))?;

    match cli.command {
        Command::Serve => serve(config).await,
        Command::Predict(args) => client::submit(&config, args).await,
    }
}

/// 启动预测服务
///
/// 模型加载失败时直接退出，进程不会进入服务状态。
async fn serve(config: Config) -> anyhow::Result<()> {
    let model = artifact::load_artifact(Path::new(&config.model_registry), &config.model_artifact)
        .with_context(|| format!("模型制品 {} 加载失败，服务拒绝启动", config.model_artifact))?;

    let app = server::router::create_router(model);
    let bind_address = config.bind_address();

    tracing::info!("预测服务启动: http://{}", bind_address);
    tracing::info!("  GET  /         - 存活探针");
    tracing::info!("  POST /predict  - 流失预测");

    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("监听地址绑定失败: {}", bind_address))?;
    axum::serve(listener, app).await?;
    Ok(())
}
