//! 模型制品边界
//!
//! 模型是外部协作者：唯一的契约是「给一张单行特征表，返回一个预测标签序列」。
//! 制品按标识从注册目录解析为 `<registry>/<artifact>.json`，自描述 JSON 文档
//! 声明期望的特征列（加载时校验）和具体的打分器编码（forest / linear）。
//! 新编码在此边界后实现 [`ChurnModel`] 即可接入，服务端无需改动。

pub mod forest;
pub mod linear;

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, bail};
use serde::Deserialize;

use forest::ForestModel;
use linear::LinearModel;

/// 固定的特征列，顺序即模型期望的输入顺序
pub const FEATURE_COLUMNS: [&str; 13] = [
    "Call_Failure",
    "Complains",
    "Subscription_Length",
    "Charge_Amount",
    "Seconds_of_Use",
    "Frequency_of_use",
    "Frequency_of_SMS",
    "Distinct_Called_Numbers",
    "Age_Group",
    "Tariff_Plan",
    "Status",
    "Age",
    "Customer_Value",
];

/// 单行特征表
///
/// 列名固定、顺序固定，一次请求构造一张，用完即弃。
#[derive(Debug, Clone)]
pub struct Frame {
    values: Vec<f64>,
}

impl Frame {
    /// 按声明顺序的特征值构造单行表
    pub fn single_row(values: Vec<f64>) -> Self {
        Self { values }
    }

    /// 列名（声明顺序）
    pub fn columns(&self) -> &'static [&'static str] {
        &FEATURE_COLUMNS
    }

    /// 表宽（列数）
    pub fn width(&self) -> usize {
        self.values.len()
    }

    /// 行数据
    pub fn row(&self) -> &[f64] {
        &self.values
    }
}

/// 模型预测能力
///
/// 句柄在启动时加载一次，之后只读共享，并发读取无需加锁。
pub trait ChurnModel: Send + Sync + std::fmt::Debug {
    /// 对单行特征表返回预测标签序列（每行一个标签）
    fn predict(&self, frame: &Frame) -> anyhow::Result<Vec<i64>>;
}

/// 制品文档
///
/// `features` 必须与固定特征列完全一致（名称与顺序），否则拒绝加载。
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ArtifactDocument {
    name: String,
    kind: String,
    features: Vec<String>,
    #[serde(default)]
    forest: Option<ForestModel>,
    #[serde(default)]
    linear: Option<LinearModel>,
}

/// 按标识从注册目录加载模型制品
///
/// 任何失败（文件缺失、JSON 损坏、特征列不匹配、未知编码）都阻止服务就绪。
pub fn load_artifact(registry: &Path, artifact_id: &str) -> anyhow::Result<Arc<dyn ChurnModel>> {
    let path = registry.join(format!("{}.json", artifact_id));
    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("读取模型制品失败: {}", path.display()))?;
    let doc: ArtifactDocument = serde_json::from_str(&content)
        .with_context(|| format!("解析模型制品失败: {}", path.display()))?;

    if doc.features != FEATURE_COLUMNS {
        bail!(
            "制品 {} 的特征列与请求 schema 不匹配（期望 {} 列）",
            doc.name,
            FEATURE_COLUMNS.len()
        );
    }

    let model: Arc<dyn ChurnModel> = match doc.kind.as_str() {
        "forest" => {
            let forest = doc
                .forest
                .with_context(|| format!("制品 {} 声明 kind=forest 但缺少 forest 字段", doc.name))?;
            forest.validate()?;
            Arc::new(forest)
        }
        "linear" => {
            let linear = doc
                .linear
                .with_context(|| format!("制品 {} 声明 kind=linear 但缺少 linear 字段", doc.name))?;
            linear.validate()?;
            Arc::new(linear)
        }
        other => bail!("制品 {} 使用未知的打分器编码: {}", doc.name, other),
    };

    tracing::info!("模型制品已加载: {} (kind={})", doc.name, doc.kind);
    Ok(model)
}
