// src/common/error.rs

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::{json, Value};
use thiserror::Error;

// Erros internos da aplicação (camadas de repo/service).
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Invalid range type: '{0}'")]
    InvalidRange(String),

    #[error("Validation failed")]
    ValidationError(#[from] validator::ValidationErrors),

    // Corpo JSON malformado (antes mesmo da validação)
    #[error("{0}")]
    BadRequest(String),

    // Pedido com items ok, mas algum outro campo impossível de decodificar
    #[error("Invalid order payload: {0}")]
    InvalidOrder(String),

    #[error("Product ID {0} not found")]
    ProductNotFound(i64),

    // Qualquer falha nas consultas do dashboard. Nunca é ecoada ao cliente.
    #[error("Aggregation query '{operation}' failed: {source}")]
    AggregationFailure {
        operation: &'static str,
        #[source]
        source: sqlx::Error,
    },

    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),

    #[error("Export failed: {0}")]
    ExportError(String),
}

impl AppError {
    pub fn aggregation(operation: &'static str) -> impl FnOnce(sqlx::Error) -> AppError {
        move |source| AppError::AggregationFailure { operation, source }
    }

    /// Traduz o erro para a resposta HTTP.
    ///
    /// `message` é a mensagem genérica do endpoint ("Failed to get categories"...).
    /// O detalhe interno vai no campo `error`, exceto para falhas de agregação.
    pub fn to_api_error(self, message: &str) -> ApiError {
        match self {
            AppError::ValidationError(errors) => {
                let first_message = errors
                    .field_errors()
                    .values()
                    .flat_map(|field_errors| field_errors.iter())
                    .find_map(|e| e.message.as_ref().map(|m| m.to_string()))
                    .unwrap_or_else(|| "Invalid request payload".to_string());

                tracing::warn!(details = ?errors, "{}", message);
                ApiError {
                    status: StatusCode::BAD_REQUEST,
                    message: first_message,
                    error: serde_json::to_value(&errors).ok(),
                }
            }
            AppError::BadRequest(reason) => {
                tracing::warn!(%reason, "{}", message);
                ApiError::new(StatusCode::BAD_REQUEST, reason)
            }
            AppError::InvalidRange(ref raw) => {
                tracing::error!(range = %raw, error = %self, "{}", message);
                ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")
            }
            AppError::AggregationFailure { operation, ref source } => {
                tracing::error!(operation, error = %source, "{}", message);
                ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")
            }
            ref e => {
                tracing::error!(error = %e, "{}", message);
                ApiError {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    message: message.to_string(),
                    error: Some(json!(e.to_string())),
                }
            }
        }
    }
}

// Erro que sai para o cliente: { success: false, message, error? }
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
    pub error: Option<Value>,
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    success: bool,
    message: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<&'a Value>,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            error: None,
        }
    }
}

impl ApiError {
    // Endpoints do dashboard não ecoam detalhes internos
    pub fn without_detail(mut self) -> Self {
        if self.status.is_server_error() {
            self.error = None;
        }
        self
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            success: false,
            message: &self.message,
            error: self.error.as_ref(),
        };
        (self.status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[derive(Validate)]
    struct Payload {
        #[validate(length(min = 1, message = "Items are required"))]
        items: Vec<u32>,
    }

    #[test]
    fn validation_errors_become_400_with_first_message() {
        let errors = Payload { items: vec![] }.validate().unwrap_err();
        let api = AppError::from(errors).to_api_error("Failed to create order");

        assert_eq!(api.status, StatusCode::BAD_REQUEST);
        assert_eq!(api.message, "Items are required");
        assert!(api.error.is_some());
    }

    #[test]
    fn unknown_range_is_a_generic_server_error() {
        let api = AppError::InvalidRange("30".into()).to_api_error("Internal Server Error");

        assert_eq!(api.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(api.message, "Internal Server Error");
        assert!(api.error.is_none());
    }

    #[test]
    fn undecodable_order_field_echoes_reason() {
        let api = AppError::InvalidOrder("unknown order status '5'".into())
            .to_api_error("Failed to create order");

        assert_eq!(api.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(api.message, "Failed to create order");
        assert_eq!(
            api.error,
            Some(json!("Invalid order payload: unknown order status '5'"))
        );
    }

    #[test]
    fn missing_product_echoes_detail() {
        let api = AppError::ProductNotFound(7).to_api_error("Failed to create order");

        assert_eq!(api.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(api.message, "Failed to create order");
        assert_eq!(api.error, Some(json!("Product ID 7 not found")));
    }

    #[test]
    fn aggregation_failure_hides_detail() {
        let err = AppError::aggregation("count_total_sales")(sqlx::Error::RowNotFound);
        let api = err.to_api_error("Failed to load dashboard");

        assert_eq!(api.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(api.message, "Internal Server Error");
        assert!(api.error.is_none());
    }

    #[test]
    fn without_detail_keeps_client_errors_intact() {
        let db = AppError::DatabaseError(sqlx::Error::PoolTimedOut)
            .to_api_error("Error getting top products")
            .without_detail();
        assert!(db.error.is_none());
        assert_eq!(db.message, "Error getting top products");

        let bad = AppError::BadRequest("Invalid category_id".into())
            .to_api_error("Error getting top products")
            .without_detail();
        assert_eq!(bad.status, StatusCode::BAD_REQUEST);
        assert_eq!(bad.message, "Invalid category_id");
    }
}
