use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// 应用配置
///
/// 服务端与客户端共用一份 config.json。文件不存在时使用默认值，
/// 模型制品标识通过配置外部化，不在代码中硬编码。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// 模型注册目录（制品按 `<registry>/<artifact>.json` 解析）
    #[serde(default = "default_model_registry")]
    pub model_registry: String,

    /// 模型制品标识（部署配置，决定加载哪个制品）
    #[serde(default = "default_model_artifact")]
    pub model_artifact: String,

    /// 客户端预测端点 URL
    #[serde(default = "default_predict_url")]
    pub predict_url: String,

    /// 客户端请求超时（秒）
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// HTTP 代理地址（可选）
    /// 支持格式: http://host:port, socks5://host:port
    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proxy_url: Option<String>,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_model_registry() -> String {
    "models".to_string()
}

fn default_model_artifact() -> String {
    "churn-forest-v1".to_string()
}

fn default_predict_url() -> String {
    "http://127.0.0.1:8000/predict".to_string()
}

fn default_request_timeout_secs() -> u64 {
    10
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            model_registry: default_model_registry(),
            model_artifact: default_model_artifact(),
            predict_url: default_predict_url(),
            request_timeout_secs: default_request_timeout_secs(),
            proxy_url: None,
        }
    }
}

impl Config {
    /// 获取默认配置文件路径
    pub fn default_config_path() -> &'static str {
        "config.json"
    }

    /// 从文件加载配置
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            // 配置文件不存在，返回默认配置
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// 服务端监听地址
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
