// src/common/metrics.rs

use rust_decimal::{Decimal, RoundingStrategy};

const HUNDRED: Decimal = Decimal::ONE_HUNDRED;

// Arredondamento "comercial" (0.125 -> 0.13), não o bancário padrão do Decimal
pub fn round2(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

pub fn round_whole(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

/// Variação percentual usada em todas as comparações do resumo.
///
/// 0 -> 0 é 0%, x -> qualquer a partir de 0 é 100%, senão
/// `(atual - anterior) / anterior * 100` com 2 casas.
pub fn calc_percent_change(current: Decimal, previous: Decimal) -> Decimal {
    if previous.is_zero() {
        return if current.is_zero() { Decimal::ZERO } else { HUNDRED };
    }
    round2((current - previous) / previous * HUNDRED)
}

/// Parcela `part / total` em porcentagem com 2 casas; 0 quando não há total.
pub fn share_percent(part: i64, total: i64) -> Decimal {
    if total == 0 {
        return Decimal::ZERO;
    }
    round2(Decimal::from(part) / Decimal::from(total) * HUNDRED)
}

pub fn fulfillment_rate(completed_orders: i64, total_orders: i64) -> Decimal {
    share_percent(completed_orders, total_orders)
}
