// src/handlers/order.rs

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::Value;
use validator::Validate;

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    models::order::{CreateOrderPayload, CreateOrderResponse, ITEMS_REQUIRED},
};

// POST /api/order
#[utoipa::path(
    post,
    path = "/api/order",
    tag = "Orders",
    request_body = CreateOrderPayload,
    responses(
        (status = 200, description = "Pedido criado", body = CreateOrderResponse),
        (status = 400, description = "Itens ausentes, vazios ou inválidos"),
        (status = 500, description = "Campo inválido, produto inexistente ou falha no banco (nada é gravado)")
    )
)]
pub async fn create_order(
    State(app_state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let payload = decode_order(body)?;

    let order_id = app_state
        .order_service
        .create_order(&app_state.db_pool, &payload)
        .await
        .map_err(|app_err| app_err.to_api_error("Failed to create order"))?;

    Ok((
        StatusCode::OK,
        Json(CreateOrderResponse {
            success: true,
            message: "Order created successfully".to_string(),
            order_id,
        }),
    ))
}

fn decode_order(body: Result<Json<Value>, JsonRejection>) -> Result<CreateOrderPayload, ApiError> {
    // Corpo que nem é JSON não tem items
    let Json(body) = body.map_err(|rejection| {
        tracing::warn!(reason = %rejection.body_text(), "Payload de pedido rejeitado");
        AppError::BadRequest(ITEMS_REQUIRED.to_string()).to_api_error("Failed to create order")
    })?;

    let payload = CreateOrderPayload::from_json(body)
        .map_err(|app_err| app_err.to_api_error("Failed to create order"))?;

    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error("Failed to create order"))?;

    Ok(payload)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        extract::FromRequest,
        http::{header, Request},
    };

    async fn decode(raw: &'static str) -> Result<CreateOrderPayload, ApiError> {
        let request = Request::builder()
            .method("POST")
            .uri("/api/order")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(raw))
            .unwrap();
        decode_order(Json::<Value>::from_request(request, &()).await)
    }

    #[tokio::test]
    async fn items_problems_are_400_items_required() {
        for raw in ["not json", r#"{"customer_name":"A"}"#, r#"{"items":{}}"#, r#"{"items":[]}"#] {
            let err = decode(raw).await.unwrap_err();
            assert_eq!(err.status, StatusCode::BAD_REQUEST, "{raw}");
            assert_eq!(err.message, ITEMS_REQUIRED, "{raw}");
        }
    }

    #[tokio::test]
    async fn naive_created_at_with_valid_items_is_accepted() {
        for raw in [
            r#"{"created_at":"2025-07-27 10:00:00","items":[{"product_id":1,"quantity":2}]}"#,
            r#"{"created_at":"2025-07-27","status":2,"items":[{"product_id":1,"quantity":2}]}"#,
        ] {
            let payload = decode(raw).await.unwrap();
            assert!(payload.created_at.is_some());
        }
    }

    #[tokio::test]
    async fn other_bad_fields_report_the_real_reason() {
        let err = decode(r#"{"status":"5","items":[{"product_id":1,"quantity":2}]}"#)
            .await
            .unwrap_err();

        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_ne!(err.message, ITEMS_REQUIRED);
        let detail = err.error.unwrap().to_string();
        assert!(detail.contains("unknown order status '5'"), "{detail}");
    }
}
