use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;

use crate::domain::errors::DomainError;

/// Round to 2 decimal places, half-up (currency convention). Idempotent on
/// already-rounded values.
pub fn round2(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Derive the retail list price from source cost and markup percentage:
/// `round2(cost x (1 + markup/100))`.
pub fn compute_list_price(
    cost_price: Decimal,
    markup_percent: Decimal,
) -> Result<Decimal, DomainError> {
    if cost_price < Decimal::ZERO {
        return Err(DomainError::NegativeCost { value: cost_price });
    }
    if markup_percent < Decimal::ZERO {
        return Err(DomainError::NegativeMarkup {
            value: markup_percent,
        });
    }
    Ok(round2(cost_price * (Decimal::ONE + markup_percent / dec!(100))))
}

/// Profit on one unit, absolute and as a percentage.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Margin {
    pub amount: Decimal,
    /// Percent taken over the LIST price, not cost. This is the convention
    /// used consistently across discovery and sync.
    pub percent: Decimal,
}

pub fn compute_margin(cost_price: Decimal, list_price: Decimal) -> Result<Margin, DomainError> {
    if cost_price < Decimal::ZERO {
        return Err(DomainError::NegativeCost { value: cost_price });
    }
    if list_price < Decimal::ZERO {
        return Err(DomainError::NegativePrice { value: list_price });
    }

    let amount = list_price - cost_price;
    let percent = if cost_price > Decimal::ZERO && list_price > Decimal::ZERO {
        amount / list_price * dec!(100)
    } else {
        Decimal::ZERO
    };
    Ok(Margin { amount, percent })
}
