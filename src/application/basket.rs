//! Groups transaction line-items into purchase baskets.
//!
//! Key precedence: an explicit basket reference wins; otherwise lines are
//! bucketed by `store:user:floor(unix_seconds / window)`. The fallback is a
//! heuristic and can merge unrelated anonymous purchases made in the same
//! store within one window.

use chrono::Duration;
use tracing::debug;

use crate::domain::basket::{BasketKey, Baskets};
use crate::domain::error::DomainError;
use crate::domain::transaction::TransactionLine;

/// Default width of the synthetic basket window.
pub const DEFAULT_WINDOW_SECS: i64 = 300;

/// Builds [`Baskets`] from raw transaction lines.
#[derive(Debug, Clone, Copy)]
pub struct BasketBuilder {
    window_secs: i64,
}

impl BasketBuilder {
    /// Create a builder with the given fallback window.
    ///
    /// # Errors
    /// Returns [`DomainError::NonPositiveWindow`] if the window is shorter
    /// than one second.
    pub fn new(window: Duration) -> Result<Self, DomainError> {
        let window_secs = window.num_seconds();
        if window_secs <= 0 {
            return Err(DomainError::NonPositiveWindow {
                seconds: window_secs,
            });
        }
        Ok(Self { window_secs })
    }

    /// Width of the fallback window.
    #[must_use]
    pub fn window(&self) -> Duration {
        Duration::seconds(self.window_secs)
    }

    /// Compute the basket key for a single line.
    #[must_use]
    pub fn key_for(&self, line: &TransactionLine) -> BasketKey {
        match line.reference() {
            Some(reference) => BasketKey::Reference(reference.to_string()),
            None => BasketKey::Window {
                store_id: line.store_id,
                user_id: line.user_id,
                bucket: line.transaction_date.timestamp().div_euclid(self.window_secs),
            },
        }
    }

    /// Group lines into baskets of distinct products.
    #[must_use]
    pub fn build(&self, lines: &[TransactionLine]) -> Baskets {
        let baskets: Baskets = lines
            .iter()
            .map(|line| (self.key_for(line), line.product_id))
            .collect();

        debug!(
            lines = lines.len(),
            baskets = baskets.len(),
            window_secs = self.window_secs,
            "Built baskets"
        );
        baskets
    }
}

impl Default for BasketBuilder {
    fn default() -> Self {
        Self {
            window_secs: DEFAULT_WINDOW_SECS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::id::{ProductId, StoreId, UserId};
    use crate::testkit::domain::{line, line_at};
    use chrono::{TimeZone, Utc};

    #[test]
    fn explicit_reference_takes_precedence() {
        let builder = BasketBuilder::default();
        let mut a = line(1, Some("R-1"));
        let mut b = line(2, Some("R-1"));
        a.store_id = StoreId::new(1);
        b.store_id = StoreId::new(2);

        let baskets = builder.build(&[a, b]);
        assert_eq!(baskets.len(), 1);
        assert_eq!(
            baskets.get(&BasketKey::Reference("R-1".into())).map(|p| p.len()),
            Some(2)
        );
    }

    #[test]
    fn duplicate_line_items_collapse_into_one_product() {
        let builder = BasketBuilder::default();
        let lines = vec![line(1, Some("R-1")), line(1, Some("R-1")), line(2, Some("R-1"))];

        let baskets = builder.build(&lines);
        let products = baskets.contents().next().unwrap();
        assert_eq!(products.len(), 2);
    }

    #[test]
    fn lines_within_one_window_share_a_basket() {
        let builder = BasketBuilder::default();
        let base = Utc.with_ymd_and_hms(2024, 3, 1, 10, 0, 0).unwrap();
        let lines = vec![
            line_at(1, 5, Some(7), base),
            line_at(2, 5, Some(7), base + Duration::seconds(120)),
            line_at(3, 5, Some(7), base + Duration::seconds(400)),
        ];

        let baskets = builder.build(&lines);
        assert_eq!(baskets.len(), 2);
    }

    #[test]
    fn different_users_never_share_a_window_basket() {
        let builder = BasketBuilder::default();
        let at = Utc.with_ymd_and_hms(2024, 3, 1, 10, 0, 0).unwrap();
        let lines = vec![line_at(1, 5, Some(7), at), line_at(2, 5, Some(8), at)];

        assert_eq!(builder.build(&lines).len(), 2);
    }

    #[test]
    fn anonymous_lines_share_the_anonymous_partition() {
        let builder = BasketBuilder::default();
        let at = Utc.with_ymd_and_hms(2024, 3, 1, 10, 0, 0).unwrap();
        let lines = vec![line_at(1, 5, None, at), line_at(2, 5, None, at)];

        let baskets = builder.build(&lines);
        assert_eq!(baskets.len(), 1);
        let (key, _) = baskets.iter().next().unwrap();
        assert!(key.to_string().contains("anon"));
    }

    #[test]
    fn bucket_floors_pre_epoch_timestamps() {
        let builder = BasketBuilder::default();
        let before_epoch = Utc.timestamp_opt(-1, 0).unwrap();
        let key = builder.key_for(&line_at(1, 1, Some(1), before_epoch));

        assert_eq!(
            key,
            BasketKey::Window {
                store_id: StoreId::new(1),
                user_id: Some(UserId::new(1)),
                bucket: -1,
            }
        );
    }

    #[test]
    fn identical_input_builds_identical_baskets() {
        let builder = BasketBuilder::default();
        let at = Utc.with_ymd_and_hms(2024, 3, 1, 10, 0, 0).unwrap();
        let lines = vec![
            line_at(3, 1, Some(1), at),
            line_at(1, 1, Some(1), at),
            line_at(2, 2, None, at),
        ];

        assert_eq!(builder.build(&lines), builder.build(&lines));
        assert!(builder.build(&lines).products().contains(&ProductId::new(3)));
    }

    #[test]
    fn rejects_non_positive_window() {
        assert_eq!(
            BasketBuilder::new(Duration::zero()).unwrap_err(),
            DomainError::NonPositiveWindow { seconds: 0 }
        );
    }
}
