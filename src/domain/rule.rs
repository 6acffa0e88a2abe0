//! Association rules between products.

use serde::Serialize;

use super::id::ProductId;

/// Co-purchase count at which a rule counts as frequently bought together.
const STRONG_CO_PURCHASE_COUNT: u32 = 3;
/// Confidence (percent) paired with [`STRONG_CO_PURCHASE_COUNT`].
const STRONG_CONFIDENCE: f64 = 50.0;
/// Lift at which the pairing is called out as unusually strong.
const HIGH_LIFT: f64 = 2.0;
/// Confidence (percent) for the moderate tier.
const MODERATE_CONFIDENCE: f64 = 30.0;

/// Directional rule `antecedent -> consequent`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssociationRule {
    pub antecedent: ProductId,
    pub consequent: ProductId,
    /// Baskets containing both products.
    pub support: u32,
    /// Share of antecedent baskets that also hold the consequent, in percent.
    pub confidence: f64,
    pub lift: f64,
}

impl AssociationRule {
    /// Combined ranking score.
    #[must_use]
    pub fn score(&self) -> f64 {
        self.confidence * self.lift
    }

    #[must_use]
    pub fn rationale(&self) -> Rationale {
        Rationale::classify(self)
    }
}

/// Presentation tier explaining why a rule was surfaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Rationale {
    StrongCoPurchase,
    HighLift,
    ModerateConfidence,
    Related,
}

impl Rationale {
    /// Pick the first tier the rule qualifies for.
    #[must_use]
    pub fn classify(rule: &AssociationRule) -> Self {
        if rule.support >= STRONG_CO_PURCHASE_COUNT && rule.confidence >= STRONG_CONFIDENCE {
            Self::StrongCoPurchase
        } else if rule.lift >= HIGH_LIFT {
            Self::HighLift
        } else if rule.confidence >= MODERATE_CONFIDENCE {
            Self::ModerateConfidence
        } else {
            Self::Related
        }
    }

    /// Human-readable sentence for dashboards.
    #[must_use]
    pub fn describe(self, rule: &AssociationRule) -> String {
        match self {
            Self::StrongCoPurchase => format!(
                "Bought together in {} baskets; {:.0}% of buyers also pick this up",
                rule.support, rule.confidence
            ),
            Self::HighLift => format!(
                "{:.1}x more likely to be bought together than by chance",
                rule.lift
            ),
            Self::ModerateConfidence => format!(
                "{:.0}% of buyers also purchase this item",
                rule.confidence
            ),
            Self::Related => "Customers sometimes buy these together".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(support: u32, confidence: f64, lift: f64) -> AssociationRule {
        AssociationRule {
            antecedent: ProductId::new(1),
            consequent: ProductId::new(2),
            support,
            confidence,
            lift,
        }
    }

    #[test]
    fn score_multiplies_confidence_and_lift() {
        assert!((rule(2, 40.0, 1.5).score() - 60.0).abs() < 1e-9);
    }

    #[test]
    fn tiers_follow_precedence() {
        assert_eq!(rule(3, 50.0, 5.0).rationale(), Rationale::StrongCoPurchase);
        assert_eq!(rule(2, 50.0, 2.5).rationale(), Rationale::HighLift);
        assert_eq!(rule(2, 35.0, 1.3).rationale(), Rationale::ModerateConfidence);
        assert_eq!(rule(1, 21.0, 1.3).rationale(), Rationale::Related);
    }

    #[test]
    fn describe_reflects_numbers() {
        let strong = rule(4, 80.0, 1.5);
        assert!(Rationale::StrongCoPurchase.describe(&strong).contains("4 baskets"));

        let lifted = rule(1, 25.0, 3.0);
        assert!(Rationale::HighLift.describe(&lifted).starts_with("3.0x"));
    }
}
