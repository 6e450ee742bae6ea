//! 线性打分器
//!
//! 加权和过阈值即判流失，适合轻量部署或作为基线制品。

use anyhow::bail;
use serde::Deserialize;

use super::{ChurnModel, Frame};

/// 线性模型：`score = weights · row + bias`，`score >= threshold` 判 1
#[derive(Debug, Clone, Deserialize)]
pub struct LinearModel {
    pub weights: Vec<f64>,
    pub bias: f64,
    pub threshold: f64,
}

impl LinearModel {
    /// 加载时的静态校验
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.weights.is_empty() {
            bail!("线性模型权重为空");
        }
        Ok(())
    }
}

impl ChurnModel for LinearModel {
    fn predict(&self, frame: &Frame) -> anyhow::Result<Vec<i64>> {
        if frame.width() != self.weights.len() {
            bail!(
                "特征表宽度不匹配: 模型期望 {} 列，实际 {} 列",
                self.weights.len(),
                frame.width()
            );
        }
        let score: f64 = frame
            .row()
            .iter()
            .zip(&self.weights)
            .map(|(value, weight)| value * weight)
            .sum::<f64>()
            + self.bias;
        let label = if score >= self.threshold { 1 } else { 0 };
        Ok(vec![label])
    }
}
