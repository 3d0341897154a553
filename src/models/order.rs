// src/models/order.rs

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use chrono_tz::Tz;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::common::{error::AppError, period::local_to_utc};

pub const ITEMS_REQUIRED: &str = "Items are required";

// --- Status ---
// Persistido como texto: '1' pendente, '2' concluído, '0' cancelado
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(try_from = "StatusInput")]
pub enum OrderStatus {
    Cancelled,
    #[default]
    Pending,
    Completed,
}

impl OrderStatus {
    pub fn code(self) -> &'static str {
        match self {
            OrderStatus::Cancelled => "0",
            OrderStatus::Pending => "1",
            OrderStatus::Completed => "2",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim() {
            "0" => Some(OrderStatus::Cancelled),
            "1" => Some(OrderStatus::Pending),
            "2" => Some(OrderStatus::Completed),
            _ => None,
        }
    }
}

// O front manda o status ora como "2", ora como 2
#[derive(Deserialize)]
#[serde(untagged)]
enum StatusInput {
    Text(String),
    Number(i64),
}

impl TryFrom<StatusInput> for OrderStatus {
    type Error = String;

    fn try_from(input: StatusInput) -> Result<Self, Self::Error> {
        let code = match input {
            StatusInput::Text(text) => text,
            StatusInput::Number(number) => number.to_string(),
        };
        OrderStatus::from_code(&code).ok_or_else(|| format!("unknown order status '{code}'"))
    }
}

// --- Data do pedido ---
// RFC 3339 é um instante; "YYYY-MM-DD[ HH:MM:SS]" é horário do negócio
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub enum OrderTimestamp {
    Instant(DateTime<Utc>),
    Local(NaiveDateTime),
}

const LOCAL_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

impl OrderTimestamp {
    pub fn resolve(self, tz: &Tz) -> DateTime<Utc> {
        match self {
            OrderTimestamp::Instant(instant) => instant,
            OrderTimestamp::Local(local) => local_to_utc(local, tz),
        }
    }
}

impl TryFrom<String> for OrderTimestamp {
    type Error = String;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        let raw = raw.trim();
        if let Ok(instant) = DateTime::parse_from_rfc3339(raw) {
            return Ok(OrderTimestamp::Instant(instant.with_timezone(&Utc)));
        }
        LOCAL_FORMATS
            .iter()
            .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
            .or_else(|| {
                NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                    .ok()
                    .map(|date| date.and_time(NaiveTime::MIN))
            })
            .map(OrderTimestamp::Local)
            .ok_or_else(|| format!("invalid created_at '{raw}'"))
    }
}

// --- Payloads ---

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct OrderItemPayload {
    #[schema(example = 1)]
    pub product_id: i64,

    #[validate(range(min = 1, message = "Quantity must be at least 1"))]
    #[schema(example = 2)]
    pub quantity: i32,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateOrderPayload {
    #[schema(example = "Nguyen Van A")]
    pub customer_name: Option<String>,

    #[serde(default)]
    #[schema(value_type = Option<String>, example = "2")]
    pub status: Option<OrderStatus>,

    // Se ausente, usa o instante atual
    #[serde(default)]
    #[schema(value_type = Option<String>, example = "2025-07-27 10:00:00")]
    pub created_at: Option<OrderTimestamp>,

    #[serde(default)]
    #[validate(length(min = 1, message = "Items are required"), nested)]
    pub items: Vec<OrderItemPayload>,
}

impl CreateOrderPayload {
    /// Decodifica o corpo já lido como JSON.
    ///
    /// Só `items` ausente ou que não seja array vira "Items are required";
    /// qualquer outro campo inválido carrega o motivo real.
    pub fn from_json(body: Value) -> Result<Self, AppError> {
        if !body.get("items").is_some_and(Value::is_array) {
            return Err(AppError::BadRequest(ITEMS_REQUIRED.to_string()));
        }
        serde_json::from_value(body).map_err(|e| AppError::InvalidOrder(e.to_string()))
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CreateOrderResponse {
    pub success: bool,
    #[schema(example = "Order created successfully")]
    pub message: String,
    #[schema(example = 42)]
    pub order_id: i64,
}

// --- Linhas já precificadas ---

#[derive(Debug, Clone, Copy, FromRow)]
pub struct ProductPrice {
    pub id: i64,
    pub price: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PricedLine {
    pub product_id: i64,
    pub quantity: i32,
    pub price: Decimal,
}

impl PricedLine {
    pub fn subtotal(&self) -> Decimal {
        self.price * Decimal::from(self.quantity)
    }
}
