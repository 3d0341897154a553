// src/common/sort.rs

// Chaves aceitas no ?sort=<chave>-<direção> do ranking de produtos
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    Name,
    Price,
    Category,
    Quantity,
    #[default]
    Amount,
}

impl SortKey {
    // Coluna (alias do SELECT) usada no ORDER BY
    pub fn column(self) -> &'static str {
        match self {
            SortKey::Name => "product_name",
            SortKey::Price => "price",
            SortKey::Category => "category_name",
            SortKey::Quantity => "total_quantity",
            SortKey::Amount => "total_amount",
        }
    }

    fn parse(raw: &str) -> Self {
        match raw {
            "name" => SortKey::Name,
            "price" => SortKey::Price,
            "category" => SortKey::Category,
            "quantity" => SortKey::Quantity,
            _ => SortKey::Amount,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

impl SortDirection {
    pub fn sql(self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SortSpec {
    pub key: SortKey,
    pub direction: SortDirection,
}

impl SortSpec {
    /// "amount-desc" -> (Amount, Desc). Chave desconhecida vira `amount`,
    /// direção desconhecida ou ausente vira `desc`.
    pub fn parse(raw: &str) -> Self {
        let mut parts = raw.trim().split('-');
        let key = SortKey::parse(parts.next().unwrap_or_default());
        let direction = match parts.next() {
            Some("asc") => SortDirection::Asc,
            _ => SortDirection::Desc,
        };
        Self { key, direction }
    }

    pub fn from_query(raw: Option<&str>) -> Self {
        raw.map(Self::parse).unwrap_or_default()
    }

    pub fn order_by(self) -> String {
        format!("{} {}", self.key.column(), self.direction.sql())
    }
}
