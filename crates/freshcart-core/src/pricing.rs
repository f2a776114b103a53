//! # Pricing Calculator
//!
//! Pure pricing derivations over a product's depot variants: which variant a
//! channel/unit selection resolves to, what it costs under a purchase option,
//! what the savings banner shows, and which delivery cadences a subscription
//! period is allowed to offer.
//!
//! ## Derivation Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     PricingCalculator Pipeline                          │
//! │                                                                         │
//! │  Vec<DepotVariant>  (all variants of one product, across depots)        │
//! │        │                                                                │
//! │        ▼  filter: channel (home ⇔ depot.is_online)                      │
//! │        ▼  filter: unit (via canonical alias table)                      │
//! │        ▼  filter: pickup depot id, when one is selected                 │
//! │        │                                                                │
//! │  first survivor = canonical variant for the combination                 │
//! │        │                                                                │
//! │        ▼  price ladder: buy-once → buyOncePrice ∥ mrp ∥ 0               │
//! │        ▼                subscribe → tier field ∥ 0                      │
//! │        │                                                                │
//! │  PriceQuote { price, mrp, savings{percent, amount} }                    │
//! │                                                                         │
//! │  No survivor → all-zero quote. "Unavailable" is a value, not a crash.   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::types::{
    DeliveryChannel, DepotVariant, PurchaseOption, ScheduleOption, SubscriptionPeriod,
};
use crate::units::UnitAliases;

// =============================================================================
// Variant Selection
// =============================================================================

/// The shopper's current selection context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantSelection {
    /// Home delivery or store pickup.
    pub channel: DeliveryChannel,

    /// Unit label as the UI knows it; matched through [`UnitAliases`].
    pub unit: String,

    /// For pickup: restrict to one depot. `None` keeps every pickup depot
    /// in play, which is what the "compare all stores" view wants.
    pub pickup_depot_id: Option<i64>,
}

impl VariantSelection {
    /// Selection for home delivery of a given unit.
    pub fn home(unit: impl Into<String>) -> Self {
        VariantSelection {
            channel: DeliveryChannel::HomeDelivery,
            unit: unit.into(),
            pickup_depot_id: None,
        }
    }

    /// Selection for pickup of a given unit, optionally at one depot.
    pub fn pickup(unit: impl Into<String>, depot_id: Option<i64>) -> Self {
        VariantSelection {
            channel: DeliveryChannel::StorePickup,
            unit: unit.into(),
            pickup_depot_id: depot_id,
        }
    }
}

/// Resolves the canonical variant for a selection.
///
/// Filters by channel, canonical unit, and (for pickup) the selected depot;
/// the first surviving variant wins. `None` means the combination is not
/// purchasable and every derived price is zero.
pub fn select_variant<'a>(
    variants: &'a [DepotVariant],
    selection: &VariantSelection,
    aliases: &UnitAliases,
) -> Option<&'a DepotVariant> {
    variants.iter().find(|v| {
        let channel_ok = match selection.channel {
            DeliveryChannel::HomeDelivery => v.depot.is_online,
            DeliveryChannel::StorePickup => !v.depot.is_online,
        };
        let depot_ok = match (selection.channel, selection.pickup_depot_id) {
            (DeliveryChannel::StorePickup, Some(depot_id)) => v.depot_id == depot_id,
            _ => true,
        };
        channel_ok && depot_ok && aliases.matches(&v.unit, &selection.unit)
    })
}

// =============================================================================
// Price Ladder
// =============================================================================

/// The effective unit price of a variant under a purchase option.
///
/// Buy-once falls back from `buy_once_price` to `mrp` to zero; a subscription
/// tier is the matching tier field or zero. Zero always means "price
/// unknown/unavailable", never a free product.
pub fn price_for_option(variant: &DepotVariant, option: PurchaseOption) -> Money {
    match option {
        PurchaseOption::BuyOnce => variant
            .buy_once_price_paise
            .map(Money::from_paise)
            .unwrap_or_else(|| variant.mrp()),
        PurchaseOption::Subscribe(period) => variant
            .subscription_price(period)
            .unwrap_or_else(Money::zero),
    }
}

// =============================================================================
// Savings
// =============================================================================

/// Savings relative to MRP.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Savings {
    /// Rounded percentage discount against MRP, never negative.
    pub percent: u32,

    /// Absolute discount against MRP, floored at zero.
    pub amount: Money,
}

impl Savings {
    /// No savings at all.
    pub const fn none() -> Self {
        Savings {
            percent: 0,
            amount: Money::zero(),
        }
    }
}

/// Computes savings of `price` against `mrp`.
///
/// Percentage = round((mrp − price) / mrp × 100), computed with integer
/// arithmetic. Whenever either operand is zero or non-positive the answer is
/// "no savings": defective price data must still render something.
///
/// ## Example
/// ```rust
/// use freshcart_core::money::Money;
/// use freshcart_core::pricing::savings;
///
/// let s = savings(Money::from_paise(10000), Money::from_paise(8000));
/// assert_eq!(s.percent, 20);
/// assert_eq!(s.amount.paise(), 2000);
///
/// // MRP missing → no savings, regardless of the price
/// assert_eq!(savings(Money::zero(), Money::from_paise(8000)).percent, 0);
/// ```
pub fn savings(mrp: Money, price: Money) -> Savings {
    if !mrp.is_positive() || !price.is_positive() {
        return Savings::none();
    }

    let amount = mrp.saturating_sub(price);
    // round((mrp - price) * 100 / mrp) in integer math
    let percent = (amount.paise() * 100 + mrp.paise() / 2) / mrp.paise();

    Savings {
        percent: percent as u32,
        amount,
    }
}

// =============================================================================
// Price Quote
// =============================================================================

/// The full answer for one (selection, purchase option) combination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PriceQuote {
    /// Effective unit price. Zero when the combination is unavailable.
    pub price: Money,

    /// Reference price (MRP) of the resolved variant, zero when unresolved.
    pub mrp: Money,

    /// Savings of `price` against `mrp`.
    pub savings: Savings,
}

impl PriceQuote {
    /// The degraded "unavailable" quote: everything zero.
    pub const fn unavailable() -> Self {
        PriceQuote {
            price: Money::zero(),
            mrp: Money::zero(),
            savings: Savings::none(),
        }
    }
}

/// Derives the quote for a selection and purchase option in one call.
pub fn quote(
    variants: &[DepotVariant],
    selection: &VariantSelection,
    option: PurchaseOption,
    aliases: &UnitAliases,
) -> PriceQuote {
    let Some(variant) = select_variant(variants, selection, aliases) else {
        return PriceQuote::unavailable();
    };

    let price = price_for_option(variant, option);
    let mrp = variant.mrp();

    PriceQuote {
        price,
        mrp,
        savings: savings(mrp, price),
    }
}

// =============================================================================
// Schedule Gating
// =============================================================================

/// Delivery cadences legal for a subscription period.
///
/// An option is offered iff `period.days() >= option.min_period_days()`.
/// Pure and price-independent: the same period yields the same options for
/// every variant. Longer periods only ever add options (monotone).
pub fn legal_schedule_options(period: SubscriptionPeriod) -> Vec<ScheduleOption> {
    legal_schedule_options_for_days(period.days())
}

/// Day-count form of [`legal_schedule_options`], for callers holding a raw
/// horizon rather than one of the fixed periods.
pub fn legal_schedule_options_for_days(days: u32) -> Vec<ScheduleOption> {
    ScheduleOption::ALL
        .into_iter()
        .filter(|option| days >= option.min_period_days())
        .collect()
}

// =============================================================================
// Unit Tests
// =============================================================================
