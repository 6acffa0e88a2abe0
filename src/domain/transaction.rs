//! Transaction line-items read from the external ledger.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::id::{ProductId, StoreId, UserId};

/// One purchased line-item.
///
/// Owned by the transaction ledger; the engine never mutates or creates
/// these. Several lines sharing a basket reference (or falling into the same
/// store/user/time bucket) form one basket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionLine {
    pub product_id: ProductId,
    /// Explicit order or receipt reference, when the point of sale recorded one.
    pub basket_ref: Option<String>,
    pub quantity: i32,
    pub total: Decimal,
    pub user_id: Option<UserId>,
    pub store_id: StoreId,
    pub transaction_date: DateTime<Utc>,
}

impl TransactionLine {
    /// Return the basket reference if it carries any non-blank text.
    #[must_use]
    pub fn reference(&self) -> Option<&str> {
        self.basket_ref
            .as_deref()
            .map(str::trim)
            .filter(|r| !r.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(basket_ref: Option<&str>) -> TransactionLine {
        TransactionLine {
            product_id: ProductId::new(1),
            basket_ref: basket_ref.map(str::to_string),
            quantity: 1,
            total: Decimal::ONE,
            user_id: None,
            store_id: StoreId::new(1),
            transaction_date: Utc::now(),
        }
    }

    #[test]
    fn blank_reference_is_absent() {
        assert_eq!(line(Some("   ")).reference(), None);
        assert_eq!(line(Some("")).reference(), None);
        assert_eq!(line(None).reference(), None);
    }

    #[test]
    fn reference_is_trimmed() {
        assert_eq!(line(Some(" R-100 ")).reference(), Some("R-100"));
    }
}
