//! 输入表单客户端
//!
//! 原始表单的 Rust 渲染：十三个数值参数即表单控件（保留控件级最小值），
//! 提交即向服务端 POST 一次，按返回标签渲染判定结果。
//! 不做重试，失败直接报告给操作员，由操作员手动重新提交。

use std::time::Duration;

use anyhow::Context;
use clap::Args;
use reqwest::{Client, Proxy};

use crate::config::Config;
use crate::server::types::{ChurnRequest, PredictResponse};

/// 流失预测表单参数
///
/// 控件级最小值与原始表单一致：订阅时长/扣费额 ≥ 1，年龄 ≥ 18，
/// 计数类字段通过无符号类型保证 ≥ 0。除此之外不做客户端校验。
#[derive(Debug, Args)]
pub struct PredictArgs {
    /// 呼叫失败次数
    #[arg(long)]
    pub call_failure: u32,

    /// 投诉次数
    #[arg(long)]
    pub complains: u32,

    /// 订阅时长（月）
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub subscription_length: u32,

    /// 扣费金额
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub charge_amount: u32,

    /// 通话秒数
    #[arg(long)]
    pub seconds_of_use: u32,

    /// 通话频次
    #[arg(long)]
    pub frequency_of_use: u32,

    /// 短信频次
    #[arg(long)]
    pub frequency_of_sms: u32,

    /// 不同被叫号码数
    #[arg(long)]
    pub distinct_called_numbers: u32,

    /// 年龄分组
    #[arg(long)]
    pub age_group: u32,

    /// 资费方案
    #[arg(long)]
    pub tariff_plan: u32,

    /// 在网状态
    #[arg(long)]
    pub status: u32,

    /// 年龄
    #[arg(long, value_parser = clap::value_parser!(u32).range(18..))]
    pub age: u32,

    /// 客户价值
    #[arg(long)]
    pub customer_value: f64,
}

impl PredictArgs {
    /// 表单状态打包为特征记录
    pub fn to_record(&self) -> ChurnRequest {
        ChurnRequest {
            call_failure: self.call_failure as i64,
            complains: self.complains as i64,
            subscription_length: self.subscription_length as i64,
            charge_amount: self.charge_amount as i64,
            seconds_of_use: self.seconds_of_use as i64,
            frequency_of_use: self.frequency_of_use as i64,
            frequency_of_sms: self.frequency_of_sms as i64,
            distinct_called_numbers: self.distinct_called_numbers as i64,
            age_group: self.age_group as i64,
            tariff_plan: self.tariff_plan as i64,
            status: self.status as i64,
            age: self.age as i64,
            customer_value: self.customer_value,
        }
    }
}

/// 构建 HTTP Client
///
/// `proxy_url` 支持 http://host:port 与 socks5://host:port 格式
fn build_client(proxy_url: Option<&str>, timeout_secs: u64) -> anyhow::Result<Client> {
    let mut builder = Client::builder().timeout(Duration::from_secs(timeout_secs));

    if let Some(url) = proxy_url {
        let proxy = Proxy::all(url)?;
        builder = builder.proxy(proxy);
        tracing::debug!("HTTP Client 使用代理: {}", url);
    }

    Ok(builder.build()?)
}

/// 向服务端提交特征记录，返回预测标签
///
/// 传输失败与非 2xx 响应都作为错误返回，调用方决定如何向操作员展示。
async fn fetch_prediction(
    client: &Client,
    url: &str,
    record: &ChurnRequest,
) -> anyhow::Result<i64> {
    let response = client
        .post(url)
        .json(record)
        .send()
        .await
        .context("预测请求发送失败")?;

    if !response.status().is_success() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        anyhow::bail!("预测服务返回 HTTP {}: {}", status, body);
    }

    let result: PredictResponse = response.json().await.context("解析预测响应失败")?;
    Ok(result.churn_prediction)
}

/// 按预测标签渲染判定文案
///
/// 与原始表单的两个分支一致：1 走告警分支，其余走成功分支。
pub fn verdict_message(label: i64) -> &'static str {
    if label == 1 {
        "🚨 The customer is likely to churn."
    } else {
        "✅ The customer is NOT likely to churn."
    }
}

/// 连接失败时展示给操作员的提示
pub const CONNECTIVITY_ERROR: &str =
    "⚠ Error fetching prediction. Make sure the prediction server is running.";

/// 提交一次预测请求并输出判定结果
pub async fn submit(config: &Config, args: PredictArgs) -> anyhow::Result<()> {
    let client = build_client(config.proxy_url.as_deref(), config.request_timeout_secs)?;
    let record = args.to_record();

    tracing::debug!("提交预测请求到 {}: {:?}", config.predict_url, record);

    match fetch_prediction(&client, &config.predict_url, &record).await {
        Ok(label) => {
            println!("{}", verdict_message(label));
            Ok(())
        }
        Err(e) => {
            eprintln!("{}", CONNECTIVITY_ERROR);
            Err(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use axum::routing::post;
    use axum::{Json, Router};

    fn sample_args() -> PredictArgs {
        PredictArgs {
            call_failure: 0,
            complains: 0,
            subscription_length: 12,
            charge_amount: 10,
            seconds_of_use: 500,
            frequency_of_use: 20,
            frequency_of_sms: 5,
            distinct_called_numbers: 10,
            age_group: 2,
            tariff_plan: 1,
            status: 1,
            age: 30,
            customer_value: 100.0,
        }
    }

    /// 起一个只回固定标签的桩服务，返回其 predict URL
    async fn spawn_stub(label: i64) -> String {
        let app = Router::new().route(
            "/predict",
            post(move || async move { Json(serde_json::json!({"churn_prediction": label})) }),
        );
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}/predict", addr)
    }

    #[test]
    fn test_verdict_alert_branch() {
        assert_eq!(verdict_message(1), "🚨 The customer is likely to churn.");
    }

    #[test]
    fn test_verdict_success_branch() {
        assert_eq!(verdict_message(0), "✅ The customer is NOT likely to churn.");
        // 非 1 一律走成功分支，与原始表单的 == 1 判断一致
        assert_eq!(verdict_message(-3), verdict_message(0));
    }

    #[test]
    fn test_record_wire_names() {
        let value = serde_json::to_value(sample_args().to_record()).unwrap();
        assert_eq!(value["Subscription_Length"], 12);
        assert_eq!(value["Customer_Value"], 100.0);
        assert_eq!(value.as_object().unwrap().len(), 13);
    }

    #[test]
    fn test_build_client_without_proxy() {
        assert!(build_client(None, 10).is_ok());
    }

    #[test]
    fn test_build_client_with_socks5_proxy() {
        assert!(build_client(Some("socks5://127.0.0.1:1080"), 10).is_ok());
    }

    #[test]
    fn test_build_client_with_invalid_proxy() {
        assert!(build_client(Some("not a proxy url"), 10).is_err());
    }

    #[tokio::test]
    async fn test_fetch_prediction_churn_renders_alert() {
        let url = spawn_stub(1).await;
        let client = build_client(None, 5).unwrap();
        let label = fetch_prediction(&client, &url, &sample_args().to_record())
            .await
            .unwrap();
        assert_eq!(label, 1);
        // 标签 1 走告警分支而非成功分支
        assert_eq!(verdict_message(label), "🚨 The customer is likely to churn.");
    }

    #[tokio::test]
    async fn test_fetch_prediction_no_churn() {
        let url = spawn_stub(0).await;
        let client = build_client(None, 5).unwrap();
        let label = fetch_prediction(&client, &url, &sample_args().to_record())
            .await
            .unwrap();
        assert_eq!(label, 0);
        assert_eq!(verdict_message(label), "✅ The customer is NOT likely to churn.");
    }

    #[tokio::test]
    async fn test_fetch_prediction_non_2xx_is_error() {
        let app = Router::new().route(
            "/predict",
            post(|| async {
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(serde_json::json!({"error": {"type": "inference_error", "message": "boom"}})),
                )
            }),
        );
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        let client = build_client(None, 5).unwrap();
        let err = fetch_prediction(
            &client,
            &format!("http://{}/predict", addr),
            &sample_args().to_record(),
        )
        .await
        .unwrap_err();
        assert!(err.to_string().contains("HTTP 500"));
    }

    #[tokio::test]
    async fn test_submit_against_stub_and_unreachable_server() {
        let url = spawn_stub(1).await;
        let mut config = Config::default();
        config.predict_url = url;
        config.request_timeout_secs = 5;
        assert!(submit(&config, sample_args()).await.is_ok());

        // 没有服务端在听：传输失败作为错误上报，由操作员决定是否重试
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        config.predict_url = format!("http://{}/predict", addr);
        assert!(submit(&config, sample_args()).await.is_err());
    }
}
