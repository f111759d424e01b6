//! Priority-tier resolution of the final allowable amount.

use rust_decimal::Decimal;

use crate::config::PriorityTier;

/// The candidate values for each priority tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TierCandidates {
    /// Commission actually received year to date.
    pub actual_ytd: Option<Decimal>,
    /// Manually supplied annual figure.
    pub override_amount: Option<Decimal>,
    /// The formula-calculated figure.
    pub calculated: Decimal,
}

/// The tier that supplied the final amount, and the amount itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriorityResolution {
    /// The winning tier.
    pub tier: PriorityTier,
    /// The final allowable amount.
    pub amount: Decimal,
}

/// Picks the final amount from the first tier holding a positive value.
///
/// Zero or absent override and actual figures fall through to the next tier.
/// The calculated tier always wins when reached, floored at zero.
///
/// # Examples
///
/// ```
/// use income_engine::calculation::{resolve_priority, TierCandidates};
/// use income_engine::config::PriorityTier;
/// use rust_decimal::Decimal;
///
/// let tiers = [PriorityTier::ActualYtd, PriorityTier::Override, PriorityTier::Calculated];
/// let resolution = resolve_priority(&tiers, &TierCandidates {
///     actual_ytd: Some(Decimal::from(85000)),
///     override_amount: Some(Decimal::from(90000)),
///     calculated: Decimal::from(120000),
/// });
/// assert_eq!(resolution.tier, PriorityTier::ActualYtd);
/// assert_eq!(resolution.amount, Decimal::from(85000));
/// ```
pub fn resolve_priority(tiers: &[PriorityTier], candidates: &TierCandidates) -> PriorityResolution {
    let calculated = PriorityResolution {
        tier: PriorityTier::Calculated,
        amount: candidates.calculated.max(Decimal::ZERO),
    };

    for tier in tiers {
        let supplied = match tier {
            PriorityTier::ActualYtd => candidates.actual_ytd,
            PriorityTier::Override => candidates.override_amount,
            PriorityTier::Calculated => return calculated,
        };

        if let Some(amount) = supplied.filter(|amount| *amount > Decimal::ZERO) {
            return PriorityResolution {
                tier: *tier,
                amount,
            };
        }
    }

    calculated
}
