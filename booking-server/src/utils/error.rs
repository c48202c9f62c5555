//! 统一错误处理
//!
//! 提供应用级错误类型和响应结构：
//! - [`AppError`] - 应用错误枚举
//! - [`shared::ApiResponse`] - API 响应结构
//!
//! # 错误码规范
//!
//! | 错误码 | 分类 | 说明 |
//! |--------|------|------|
//! | E0000 | 成功 | - |
//! | E0002 | 验证错误 | 表单校验失败 (本地检测, 不触达存储) |
//! | E0003 | 业务错误 | 资源不存在 |
//! | E0004 | 业务错误 | 资源冲突 (非法状态迁移等) |
//! | E0006 | 请求错误 | 无效请求 |
//! | E1001 | 容量竞争 | 时段已满 (客户端应清除所选时段) |
//! | E9001 | 系统错误 | 内部错误 |
//! | E9002 | 系统错误 | 数据库/存储暂时性错误 (可重试) |
//!
//! # 使用示例
//!
//! ```ignore
//! // 返回错误
//! Err(AppError::not_found("Reservation not found"))
//!
//! // 返回成功响应
//! Ok(ok(data))
//! ```

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use shared::ApiResponse;
use tracing::error;

/// 应用错误枚举
///
/// 对应规范的三类用户可见失败：验证错误、容量竞争错误、暂时性存储错误，
/// 外加管理接口的业务错误。
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // ========== 业务逻辑错误 (4xx) ==========
    #[error("Resource not found: {0}")]
    /// 资源不存在 (404)
    NotFound(String),

    #[error("Resource conflict: {0}")]
    /// 资源冲突 (409)
    Conflict(String),

    #[error("Validation failed: {0}")]
    /// 验证失败 (400) - 本地检测，不触达存储
    Validation(String),

    #[error("Slot is full: {0}")]
    /// 容量竞争 (409) - 提交瞬间时段已满，客户端应清除所选时段
    SlotFull(String),

    // ========== 系统错误 (5xx) ==========
    #[error("Database error: {0}")]
    /// 数据库/存储错误 (503, 可重试)
    Database(String),

    #[error("Internal server error: {0}")]
    /// 内部错误 (500)
    Internal(String),

    #[error("Invalid request: {0}")]
    /// 无效请求 (400)
    Invalid(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            // Not found (404)
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "E0003", msg.as_str()),

            // Conflict (409)
            AppError::Conflict(msg) => (StatusCode::CONFLICT, "E0004", msg.as_str()),

            // Validation (400)
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "E0002", msg.as_str()),

            // Capacity race (409) - distinct code so the client clears
            // the selected slot and forces a re-choice
            AppError::SlotFull(msg) => (StatusCode::CONFLICT, "E1001", msg.as_str()),

            // Database / store errors (503, retryable)
            AppError::Database(msg) => {
                error!(target: "database", error = %msg, "Store error occurred");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "E9002",
                    "A temporary error occurred. Please try again or contact us by phone.",
                )
            }

            // Internal errors (500)
            AppError::Internal(msg) => {
                error!(target: "internal", error = %msg, "Internal error occurred");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "E9001",
                    "Internal server error",
                )
            }

            // Invalid request (400)
            AppError::Invalid(msg) => (StatusCode::BAD_REQUEST, "E0006", msg.as_str()),
        };

        let body = Json(ApiResponse::<()>::error(code, message));
        (status, body).into_response()
    }
}

// ========== Helper Constructors ==========

impl AppError {
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn database(msg: impl Into<String>) -> Self {
        Self::Database(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}

// ========== Conversions ==========

impl From<crate::db::repository::RepoError> for AppError {
    fn from(err: crate::db::repository::RepoError) -> Self {
        use crate::db::repository::RepoError;
        match err {
            RepoError::NotFound(msg) => AppError::NotFound(msg),
            RepoError::Conflict(msg) => AppError::Conflict(msg),
            RepoError::Database(msg) => AppError::Database(msg),
            RepoError::Validation(msg) => AppError::Validation(msg),
        }
    }
}

impl From<crate::booking::SubmissionError> for AppError {
    fn from(err: crate::booking::SubmissionError) -> Self {
        use crate::booking::SubmissionError;
        match err {
            // Distinct code: the client clears the selected slot
            SubmissionError::SlotFull { .. } => AppError::SlotFull(err.to_string()),
            // Unknown ids mean a malformed request, not a form mistake
            SubmissionError::UnknownClass(_) | SubmissionError::UnknownSlot { .. } => {
                AppError::Invalid(err.to_string())
            }
            SubmissionError::Store(e) => e.into(),
            _ => AppError::Validation(err.to_string()),
        }
    }
}

impl From<crate::supporters::SupporterError> for AppError {
    fn from(err: crate::supporters::SupporterError) -> Self {
        use crate::supporters::SupporterError;
        match err {
            SupporterError::Store(e) => e.into(),
            _ => AppError::Validation(err.to_string()),
        }
    }
}

/// Result type for API handlers
pub type AppResult<T> = Result<T, AppError>;

// ========== Helper functions ==========

/// Create a successful response
pub fn ok<T: Serialize>(data: T) -> Json<ApiResponse<T>> {
    Json(ApiResponse::ok(data))
}

/// Create a successful response with custom message
pub fn ok_with_message<T: Serialize>(data: T, message: impl Into<String>) -> Json<ApiResponse<T>> {
    Json(ApiResponse::ok_with_message(data, message))
}
