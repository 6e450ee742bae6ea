//! 预测服务路由配置

use std::sync::Arc;

use axum::{
    Router,
    http::Method,
    routing::{get, post},
};
use tower_http::cors::{Any, CorsLayer};

use crate::artifact::ChurnModel;

use super::handlers::{health, predict};

/// 预测服务状态
///
/// 模型句柄启动后只读，跨请求共享无需加锁。
#[derive(Clone)]
pub struct AppState {
    pub model: Arc<dyn ChurnModel>,
}

/// 创建预测服务路由
///
/// # 端点
/// - `GET /` - 存活探针
/// - `POST /predict` - 单条流失预测
pub fn create_router(model: Arc<dyn ChurnModel>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any);

    Router::new()
        .route("/", get(health))
        .route("/predict", post(predict))
        .layer(cors)
        .with_state(AppState { model })
}
