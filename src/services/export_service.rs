// src/services/export_service.rs

use crate::{common::error::AppError, models::dashboard::TopProductEntry};

pub const TOP_PRODUCTS_FILENAME: &str = "top_products.csv";
pub const CSV_CONTENT_TYPE: &str = "text/csv; charset=utf-8";

// BOM UTF-8: sem ele o Excel abre acentos quebrados
const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

const TOP_PRODUCTS_HEADERS: [&str; 5] = ["Product", "Price", "Category", "Quantity", "Amount"];

/// Serializa o ranking já calculado numa planilha CSV (separador `;`).
pub fn top_products_spreadsheet(products: &[TopProductEntry]) -> Result<Vec<u8>, AppError> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(b';')
        .from_writer(UTF8_BOM.to_vec());

    writer
        .write_record(TOP_PRODUCTS_HEADERS)
        .map_err(|e| AppError::ExportError(e.to_string()))?;

    for product in products {
        let record = [
            product.name.clone(),
            product.price.to_string(),
            product.category.clone(),
            product.quantity.to_string(),
            product.amount.to_string(),
        ];
        writer
            .write_record(&record)
            .map_err(|e| AppError::ExportError(e.to_string()))?;
    }

    writer
        .into_inner()
        .map_err(|e| AppError::ExportError(e.to_string()))
}
