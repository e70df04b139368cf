//! 员工 JSON 接口

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::Json,
};
use serde::Deserialize;
use serde_json::Value;
use tracing::warn;

use super::model::{Employee, EmployeeField, TransferReceipt, UpdateOutcome};
use super::validation::format_ssn;
use crate::app::AppState;
use crate::core::error::CoreError;
use crate::core::response::ApiResponse;

/// 字段名和金额都按原始文本接收，由业务层给出和表单一致的提示
#[derive(Debug, Deserialize)]
pub struct UpdateEmployeeRequest {
    #[serde(default)]
    pub field: String,
    #[serde(default)]
    pub value: String,
}

#[derive(Debug, Deserialize)]
pub struct TransferRequest {
    #[serde(default)]
    pub from: String,
    #[serde(default)]
    pub to: String,
    /// `"12.5"` 或 `12.5` 都可以
    #[serde(default)]
    pub amount: Value,
}

impl TransferRequest {
    fn amount_text(&self) -> String {
        match &self.amount {
            Value::String(text) => text.clone(),
            Value::Number(number) => number.to_string(),
            _ => String::new(),
        }
    }
}

pub async fn get_employee(
    State(state): State<AppState>,
    Path(ssn): Path<String>,
) -> Result<Json<ApiResponse<Employee>>, CoreError> {
    let employee = state.employees.view(&ssn).await?.ok_or_else(|| {
        CoreError::NotFound(format!(
            "No employee found with SSN: {}",
            format_ssn(&ssn)
        ))
    })?;
    Ok(Json(ApiResponse::success(employee)))
}

pub async fn update_employee(
    State(state): State<AppState>,
    Path(ssn): Path<String>,
    payload: Result<Json<UpdateEmployeeRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<UpdateOutcome>>, CoreError> {
    let Json(payload) = payload?;
    let field = EmployeeField::from_column(&payload.field).ok_or_else(|| {
        CoreError::Validation("No valid column selected for update.".to_string())
    })?;
    let outcome = state.employees.update(&ssn, field, &payload.value).await?;
    let message = outcome.message();
    Ok(Json(ApiResponse::success(outcome).with_message(message)))
}

pub async fn transfer(
    State(state): State<AppState>,
    payload: Result<Json<TransferRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<TransferReceipt>>, CoreError> {
    let Json(payload) = payload?;
    let receipt = state
        .employees
        .transfer(&payload.from, &payload.to, &payload.amount_text())?;
    let message = receipt.message();
    Ok(Json(ApiResponse::success(receipt).with_message(message)))
}

/// 健康检查，数据库不可达时返回 503
pub async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<serde_json::Value>) {
    let (status, database) = match state.employees.ping().await {
        Ok(()) => (StatusCode::OK, "connected"),
        Err(err) => {
            warn!("数据库健康检查失败: {}", err);
            (StatusCode::SERVICE_UNAVAILABLE, "unreachable")
        }
    };

    (
        status,
        Json(serde_json::json!({
            "status": if status == StatusCode::OK { "healthy" } else { "degraded" },
            "database": database,
            "timestamp": chrono::Utc::now().to_rfc3339()
        })),
    )
}
