//! 核心错误处理模块

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tracing::error;

use crate::app::employee::repository::StoreError;
use crate::app::employee::validation::ValidationError;
use crate::core::page::Alert;

/// 核心错误类型
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("{0}")]
    Validation(String),
    #[error("Incorrect password. Please try again.")]
    Unauthorized,
    #[error("{0}")]
    NotFound(String),
    #[error("Error: {0}")]
    Store(#[from] StoreError),
}

impl From<ValidationError> for CoreError {
    fn from(err: ValidationError) -> Self {
        CoreError::Validation(err.to_string())
    }
}

/// 请求体不是合法 JSON 时同样返回 [`ErrorResponse`]
impl From<JsonRejection> for CoreError {
    fn from(rejection: JsonRejection) -> Self {
        CoreError::Validation(rejection.body_text())
    }
}

impl CoreError {
    pub fn status(&self) -> StatusCode {
        match self {
            CoreError::Validation(_) => StatusCode::BAD_REQUEST,
            CoreError::Unauthorized => StatusCode::UNAUTHORIZED,
            CoreError::NotFound(_) => StatusCode::NOT_FOUND,
            CoreError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn code(&self) -> &'static str {
        match self {
            CoreError::Validation(_) => "BAD_REQUEST",
            CoreError::Unauthorized => "UNAUTHORIZED",
            CoreError::NotFound(_) => "NOT_FOUND",
            CoreError::Store(_) => "DATABASE_ERROR",
        }
    }

    /// 表单页面上的提示：输入问题用警告，存储故障用错误
    pub fn alert(&self) -> Alert {
        match self {
            CoreError::Validation(_) | CoreError::NotFound(_) => Alert::Warning(self.to_string()),
            _ => Alert::Error(self.to_string()),
        }
    }

    /// 存储故障写错误日志，输入问题不记
    pub fn log(&self) {
        if let CoreError::Store(_) = self {
            error!("请求处理失败: {}", self);
        }
    }
}

/// 错误响应结构
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub code: u16,
    pub timestamp: String,
}

impl IntoResponse for CoreError {
    fn into_response(self) -> Response {
        self.log();
        let status = self.status();

        let error_response = ErrorResponse {
            error: self.code().to_string(),
            message: self.to_string(),
            code: status.as_u16(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        };

        (status, axum::Json(error_response)).into_response()
    }
}
