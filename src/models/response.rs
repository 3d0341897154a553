// src/models/response.rs

use serde::Serialize;
use utoipa::ToSchema;

// Envelope padrão de sucesso: { success: true, data }
#[derive(Debug, Serialize, ToSchema)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: T,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self { success: true, data }
    }
}
