//! 预测 API 请求/响应类型

use serde::{Deserialize, Serialize};

use crate::artifact::Frame;

/// 流失特征记录
///
/// 十三个字段全部必填，线上字段名与模型训练时的列名保持一致。
/// 缺字段或类型不符在反序列化阶段即被拒绝，不会触达模型。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChurnRequest {
    #[serde(rename = "Call_Failure")]
    pub call_failure: i64,
    #[serde(rename = "Complains")]
    pub complains: i64,
    #[serde(rename = "Subscription_Length")]
    pub subscription_length: i64,
    #[serde(rename = "Charge_Amount")]
    pub charge_amount: i64,
    #[serde(rename = "Seconds_of_Use")]
    pub seconds_of_use: i64,
    #[serde(rename = "Frequency_of_use")]
    pub frequency_of_use: i64,
    #[serde(rename = "Frequency_of_SMS")]
    pub frequency_of_sms: i64,
    #[serde(rename = "Distinct_Called_Numbers")]
    pub distinct_called_numbers: i64,
    #[serde(rename = "Age_Group")]
    pub age_group: i64,
    #[serde(rename = "Tariff_Plan")]
    pub tariff_plan: i64,
    #[serde(rename = "Status")]
    pub status: i64,
    #[serde(rename = "Age")]
    pub age: i64,
    #[serde(rename = "Customer_Value")]
    pub customer_value: f64,
}

impl ChurnRequest {
    /// 按声明顺序构造单行特征表
    pub fn to_frame(&self) -> Frame {
        Frame::single_row(vec![
            self.call_failure as f64,
            self.complains as f64,
            self.subscription_length as f64,
            self.charge_amount as f64,
            self.seconds_of_use as f64,
            self.frequency_of_use as f64,
            self.frequency_of_sms as f64,
            self.distinct_called_numbers as f64,
            self.age_group as f64,
            self.tariff_plan as f64,
            self.status as f64,
            self.age as f64,
            self.customer_value,
        ])
    }
}

/// 预测响应
#[derive(Debug, Serialize, Deserialize)]
pub struct PredictResponse {
    pub churn_prediction: i64,
}

/// 存活探针响应
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub message: String,
}

/// API 错误响应
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

/// 错误详情
#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    #[serde(rename = "type")]
    pub error_type: String,
    pub message: String,
}

impl ErrorResponse {
    /// 创建新的错误响应
    pub fn new(error_type: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: ErrorDetail {
                error_type: error_type.into(),
                message: message.into(),
            },
        }
    }

    /// 请求体校验失败
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("validation_error", message)
    }

    /// 模型推理失败
    pub fn inference_error(message: impl Into<String>) -> Self {
        Self::new("inference_error", message)
    }
}
