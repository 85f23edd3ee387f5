//! The experience-point economy.
//!
//! Pure arithmetic shared by every surface that prices a purchase: character
//! creation, the character sheet, admin tooling, and the server-side checks
//! before a write commits. Keeping one module here is what prevents the
//! per-screen drift these rules are prone to.
//!
//! Attribute points get more expensive as the attribute grows (a step function
//! over twenty-point bands); skills are flat-priced by how well they match the
//! character's heritage and archetype(s).

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::entities::{Archetype, Heritage};

/// Experience budget every character starts with at creation.
pub const CREATION_XP_BUDGET: u32 = 25;

/// Flat, one-time cost of purchasing a second archetype.
pub const SECOND_ARCHETYPE_COST: u32 = 50;

/// Cost of the next attribute point when the attribute currently sits at `value`.
pub fn attribute_point_cost(value: u32) -> u32 {
    match value {
        0..=19 => 1,
        20..=39 => 2,
        40..=59 => 3,
        60..=79 => 4,
        80..=99 => 5,
        100..=119 => 6,
        120..=139 => 7,
        140..=159 => 8,
        160..=179 => 9,
        _ => 10,
    }
}

/// Total cost of buying `points` attribute points starting from `current`.
///
/// Each point is priced at the attribute's value the moment it is bought, so
/// a purchase that crosses a band boundary pays the higher rate only for the
/// points past the boundary. `points == 0` costs nothing. No upper bound is
/// enforced here; callers cap against the available balance.
pub fn attribute_cost(current: u32, points: u32) -> u32 {
    (0..points).map(|i| attribute_point_cost(current + i)).sum()
}

/// Cumulative XP spent to raise both attributes from their heritage base
/// values to their current values, replayed one point at a time.
///
/// Values at or below base contribute nothing. Equivalent to one bulk
/// [`attribute_cost`] call per attribute.
pub fn attribute_purchase_cost(
    base_body: u32,
    base_stamina: u32,
    current_body: u32,
    current_stamina: u32,
) -> u32 {
    let body = if current_body > base_body {
        (base_body..current_body).map(attribute_point_cost).sum()
    } else {
        0
    };
    let stamina = if current_stamina > base_stamina {
        (base_stamina..current_stamina)
            .map(attribute_point_cost)
            .sum()
    } else {
        0
    };
    body + stamina
}

/// Discount classification determining a skill's flat XP price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkillTier {
    Primary,
    Secondary,
    Other,
}

impl SkillTier {
    pub fn xp_cost(&self) -> u32 {
        match self {
            Self::Primary => 5,
            Self::Secondary => 10,
            Self::Other => 20,
        }
    }
}

impl fmt::Display for SkillTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Primary => write!(f, "primary"),
            Self::Secondary => write!(f, "secondary"),
            Self::Other => write!(f, "other"),
        }
    }
}

/// A classified skill price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillPricing {
    pub tier: SkillTier,
    pub cost: u32,
}

impl SkillPricing {
    fn from_tier(tier: SkillTier) -> Self {
        Self {
            tier,
            cost: tier.xp_cost(),
        }
    }
}

/// Price a skill for a character's heritage and archetype(s).
///
/// First match wins, in this order:
/// 1. primary skill of either archetype -> `Primary`
/// 2. secondary skill of the heritage or either archetype -> `Secondary`
/// 3. everything else -> `Other`
///
/// The ordering matters: a skill that is both a heritage secondary and an
/// archetype primary prices at the primary tier. A skill name appearing in no
/// list lands on `Other` - unknown names are priced, never rejected.
pub fn classify_skill(
    skill_name: &str,
    heritage: &Heritage,
    primary_archetype: &Archetype,
    secondary_archetype: Option<&Archetype>,
) -> SkillPricing {
    if primary_archetype.is_primary_skill(skill_name)
        || secondary_archetype.is_some_and(|a| a.is_primary_skill(skill_name))
    {
        return SkillPricing::from_tier(SkillTier::Primary);
    }

    if heritage.has_secondary_skill(skill_name)
        || primary_archetype.is_secondary_skill(skill_name)
        || secondary_archetype.is_some_and(|a| a.is_secondary_skill(skill_name))
    {
        return SkillPricing::from_tier(SkillTier::Secondary);
    }

    SkillPricing::from_tier(SkillTier::Other)
}

/// Inputs for totalling a character's spending against the creation budget.
#[derive(Debug, Clone, Default)]
pub struct SpendingSnapshot<'a> {
    /// Per-skill costs of the currently selected skills
    pub skill_costs: &'a [u32],
    pub base_body: u32,
    pub base_stamina: u32,
    pub current_body: u32,
    pub current_stamina: u32,
    /// Whether the flat second-archetype purchase applies
    pub second_archetype: bool,
}

/// Derived totals for a [`SpendingSnapshot`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerTotals {
    pub skill_cost: u32,
    pub attribute_cost: u32,
    pub archetype_cost: u32,
    /// Everything spent so far
    pub spent: u32,
    /// Remaining budget, clamped at zero for display
    pub available: u32,
}

/// Total a snapshot against the creation budget.
///
/// `available` is clamped at zero so over-budget selections render as 0 rather
/// than a negative number. The aggregator is advisory: callers must still gate
/// every purchase with [`can_afford`] against the pre-commit balance.
pub fn summarize(snapshot: &SpendingSnapshot<'_>) -> LedgerTotals {
    let skill_cost = snapshot.skill_costs.iter().sum();
    let attribute_cost = attribute_purchase_cost(
        snapshot.base_body,
        snapshot.base_stamina,
        snapshot.current_body,
        snapshot.current_stamina,
    );
    let archetype_cost = if snapshot.second_archetype {
        SECOND_ARCHETYPE_COST
    } else {
        0
    };
    let spent = skill_cost + attribute_cost + archetype_cost;
    LedgerTotals {
        skill_cost,
        attribute_cost,
        archetype_cost,
        spent,
        available: CREATION_XP_BUDGET.saturating_sub(spent),
    }
}

/// Whether a purchase of `cost` fits in `available` experience.
pub fn can_afford(available: u32, cost: u32) -> bool {
    cost <= available
}
