//! 预测 API 处理器

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};

use super::router::AppState;
use super::types::{ChurnRequest, ErrorResponse, HealthResponse, PredictResponse};

/// GET /
///
/// 存活探针，与模型状态无关，永远返回静态应答。
pub async fn health() -> impl IntoResponse {
    Json(HealthResponse {
        message: "Hello World".to_string(),
    })
}

/// POST /predict
///
/// 缺字段/类型不符 → 422（模型不会被调用）；推理失败 → 500。
pub async fn predict(
    State(state): State<AppState>,
    payload: Result<Json<ChurnRequest>, JsonRejection>,
) -> Response {
    let Json(request) = match payload {
        Ok(json) => json,
        Err(rejection) => {
            tracing::warn!("请求体校验失败: {}", rejection.body_text());
            return (
                rejection.status(),
                Json(ErrorResponse::validation_error(rejection.body_text())),
            )
                .into_response();
        }
    };

    let request_id = uuid::Uuid::new_v4();
    tracing::info!("收到预测请求 [{}]: {:?}", request_id, request);

    let frame = request.to_frame();
    let labels = match state.model.predict(&frame) {
        Ok(labels) => labels,
        Err(e) => {
            tracing::error!("模型推理失败 [{}]: {}", request_id, e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::inference_error("model prediction failed")),
            )
                .into_response();
        }
    };

    // 标签必须是二元值，越界视为推理失败，不向调用方转发
    let label = match labels.first() {
        Some(label @ (0 | 1)) => *label,
        Some(other) => {
            tracing::error!("模型返回非二元标签 [{}]: {}", request_id, other);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::inference_error("model returned a non-binary label")),
            )
                .into_response();
        }
        None => {
            tracing::error!("模型返回空预测序列 [{}]", request_id);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::inference_error("model returned no prediction")),
            )
                .into_response();
        }
    };

    tracing::info!("预测完成 [{}]: churn_prediction={}", request_id, label);
    Json(PredictResponse {
        churn_prediction: label,
    })
    .into_response()
}
