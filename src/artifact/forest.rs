//! 决策树集成打分器
//!
//! 制品 JSON 中的序列化随机森林：每棵树是节点数组（下标 0 为根），
//! 多数票决定最终标签。

use anyhow::bail;
use serde::Deserialize;

use super::{ChurnModel, Frame};

/// 树节点
///
/// 分裂节点按 `值 <= threshold` 走 left，否则走 right；叶节点携带标签。
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Node {
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf {
        leaf: i64,
    },
}

/// 单棵决策树
#[derive(Debug, Clone, Deserialize)]
pub struct Tree {
    pub nodes: Vec<Node>,
}

impl Tree {
    fn score(&self, row: &[f64]) -> anyhow::Result<i64> {
        let mut index = 0;
        // 节点数组有限，走的步数不会超过节点数
        for _ in 0..self.nodes.len() {
            match &self.nodes[index] {
                Node::Leaf { leaf } => return Ok(*leaf),
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    let value = row
                        .get(*feature)
                        .ok_or_else(|| anyhow::anyhow!("分裂节点引用越界特征: {}", feature))?;
                    index = if *value <= *threshold { *left } else { *right };
                    if index >= self.nodes.len() {
                        bail!("树节点引用越界: {}", index);
                    }
                }
            }
        }
        bail!("树遍历未到达叶节点（节点数组存在环）")
    }
}

/// 随机森林模型
#[derive(Debug, Clone, Deserialize)]
pub struct ForestModel {
    pub trees: Vec<Tree>,
}

impl ForestModel {
    /// 加载时的静态校验
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.trees.is_empty() {
            bail!("森林为空，至少需要一棵树");
        }
        for tree in &self.trees {
            if tree.nodes.is_empty() {
                bail!("树的节点数组为空");
            }
        }
        Ok(())
    }
}

impl ChurnModel for ForestModel {
    fn predict(&self, frame: &Frame) -> anyhow::Result<Vec<i64>> {
        if frame.width() != frame.columns().len() {
            bail!(
                "特征表宽度不匹配: 期望 {} 列，实际 {} 列",
                frame.columns().len(),
                frame.width()
            );
        }
        let mut votes = 0i64;
        for tree in &self.trees {
            if tree.score(frame.row())? == 1 {
                votes += 1;
            }
        }
        // 多数票（平票判 0）
        let label = if votes * 2 > self.trees.len() as i64 { 1 } else { 0 };
        Ok(vec![label])
    }
}
