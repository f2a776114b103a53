//! # Domain Types
//!
//! Core domain types used throughout the freshcart engine.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │  DepotVariant   │   │    CartItem     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │   │  id             │   │  variant_id     │       │
//! │  │  name, category │   │  product_id     │   │  price snapshot │       │
//! │  │  tags, is_dairy │   │  depot_id, unit │   │  quantity       │       │
//! │  └─────────────────┘   │  mrp + 3 tiers  │   │  availability   │       │
//! │                        │  stock flags    │   │  provenance     │       │
//! │  ┌─────────────────┐   └─────────────────┘   └─────────────────┘       │
//! │  │     Depot       │                                                   │
//! │  │  ─────────────  │   ┌──────────────────┐  ┌──────────────────┐      │
//! │  │  id, name       │   │SubscriptionPeriod│  │  ScheduleOption  │      │
//! │  │  is_online      │   │  3 / 15 / 30 day │  │  Daily, Alt, ... │      │
//! │  └─────────────────┘   └──────────────────┘  └──────────────────┘      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Snapshot Pattern
//! A `CartItem` freezes the product name, unit label, and unit price at the
//! moment of adding. Reconciliation (freshcart-reconcile) is the only thing
//! allowed to refresh those snapshots, and it does so against the currently
//! selected depot's catalog.

use chrono::{DateTime, Utc, Weekday};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Depot
// =============================================================================

/// A fulfillment location.
///
/// `is_online == true` means the depot delivers to homes; `false` means the
/// depot is pickup-only. The pricing calculator maps the delivery channel
/// onto this flag when filtering variants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Depot {
    pub id: i64,
    pub name: String,
    pub is_online: bool,
}

// =============================================================================
// Product
// =============================================================================

/// A product in the storefront catalog.
///
/// Immutable within a session; owned by the catalog service. The engine
/// never writes products, it only reads them to resolve variants.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: i64,

    /// Display name shown in the catalog and on cart lines.
    pub name: String,

    /// Catalog category (e.g. "Milk", "Ghee").
    pub category: String,

    /// Free-text comma-separated tag list, as the catalog service stores it.
    pub tags: String,

    /// Whether this is a dairy product (drives storefront filtering).
    pub is_dairy: bool,

    /// Optional long description.
    pub description: Option<String>,
}

impl Product {
    /// Splits the free-text tag list into trimmed, non-empty tags.
    ///
    /// ## Example
    /// ```rust
    /// use freshcart_core::types::Product;
    ///
    /// let product = Product {
    ///     id: 1,
    ///     name: "Cow Milk".into(),
    ///     category: "Milk".into(),
    ///     tags: "fresh, a2 , bestseller".into(),
    ///     is_dairy: true,
    ///     description: None,
    /// };
    /// assert_eq!(product.tag_list(), vec!["fresh", "a2", "bestseller"]);
    /// ```
    pub fn tag_list(&self) -> Vec<&str> {
        self.tags
            .split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .collect()
    }
}

// =============================================================================
// Depot Variant
// =============================================================================

/// A product's purchasable unit within one depot.
///
/// Each variant carries its own stock fields and the full price ladder:
/// MRP (reference price), buy-once price, and the three subscription tiers.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct DepotVariant {
    pub id: i64,
    pub product_id: i64,
    pub depot_id: i64,

    /// Unit label as the catalog stores it (e.g. "500ml", "1 Ltrs").
    /// Compare with [`crate::units::UnitAliases`], never with `==`.
    pub unit: String,

    /// Maximum/reference retail price, the savings baseline.
    pub mrp_paise: i64,

    /// One-time purchase price. Falls back to MRP when absent.
    pub buy_once_price_paise: Option<i64>,

    /// Per-unit price on a 3-day subscription.
    pub price_3_day_paise: Option<i64>,

    /// Per-unit price on a 15-day subscription.
    pub price_15_day_paise: Option<i64>,

    /// Per-unit price on a 1-month subscription.
    pub price_1_month_paise: Option<i64>,

    /// Remaining stock at the depot.
    pub closing_qty: i64,

    /// Threshold under which the depot considers the variant low-stock.
    pub minimum_qty: i64,

    /// Depot has marked the variant out of stock.
    pub not_in_stock: bool,

    /// Depot has hidden the variant from the storefront.
    pub is_hidden: bool,

    /// The owning depot descriptor.
    pub depot: Depot,
}

impl DepotVariant {
    /// Whether this variant can currently be ordered.
    ///
    /// Reconciliation treats a non-orderable variant the same as a missing
    /// one: the cart line is annotated unavailable, never dropped.
    #[inline]
    pub fn is_orderable(&self) -> bool {
        !self.not_in_stock && !self.is_hidden
    }

    /// Whether the depot's remaining stock is at or under its threshold.
    #[inline]
    pub fn low_stock(&self) -> bool {
        self.closing_qty <= self.minimum_qty
    }

    /// Returns the MRP as Money.
    #[inline]
    pub fn mrp(&self) -> Money {
        Money::from_paise(self.mrp_paise)
    }

    /// Price for the given subscription period, if the tier is published.
    pub fn subscription_price(&self, period: SubscriptionPeriod) -> Option<Money> {
        let paise = match period {
            SubscriptionPeriod::ThreeDay => self.price_3_day_paise,
            SubscriptionPeriod::FifteenDay => self.price_15_day_paise,
            SubscriptionPeriod::OneMonth => self.price_1_month_paise,
        };
        paise.map(Money::from_paise)
    }
}

// =============================================================================
// Subscription Period
// =============================================================================

/// A fixed subscription horizon offered at a discounted per-unit price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionPeriod {
    ThreeDay,
    FifteenDay,
    OneMonth,
}

impl SubscriptionPeriod {
    /// The period length in days (3 / 15 / 30).
    #[inline]
    pub const fn days(&self) -> u32 {
        match self {
            SubscriptionPeriod::ThreeDay => 3,
            SubscriptionPeriod::FifteenDay => 15,
            SubscriptionPeriod::OneMonth => 30,
        }
    }

    /// All periods, shortest first.
    pub const ALL: [SubscriptionPeriod; 3] = [
        SubscriptionPeriod::ThreeDay,
        SubscriptionPeriod::FifteenDay,
        SubscriptionPeriod::OneMonth,
    ];
}

// =============================================================================
// Purchase Option
// =============================================================================

/// What the shopper is pricing: a one-time purchase or a subscription tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum PurchaseOption {
    BuyOnce,
    Subscribe(SubscriptionPeriod),
}

// =============================================================================
// Delivery Channel
// =============================================================================

/// How the order reaches the customer.
///
/// Maps onto [`Depot::is_online`]: home delivery is served by online depots,
/// store pickup by offline ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryChannel {
    HomeDelivery,
    StorePickup,
}

// =============================================================================
// Schedule Option
// =============================================================================

/// A delivery cadence the shopper can pick for a subscription.
///
/// Each option has a minimum subscription period; shorter periods simply
/// don't offer it. The gate is pure and identical across every variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum ScheduleOption {
    /// Every day of the period.
    Daily,
    /// Every other day.
    AlternateDays,
    /// Alternating quantities between two configured days.
    Day1Day2,
    /// Custom weekday selection.
    SelectDays,
}

impl ScheduleOption {
    /// Minimum subscription period (in days) for which this cadence is legal.
    #[inline]
    pub const fn min_period_days(&self) -> u32 {
        match self {
            ScheduleOption::Daily => 3,
            ScheduleOption::AlternateDays => 15,
            ScheduleOption::Day1Day2 => 15,
            ScheduleOption::SelectDays => 30,
        }
    }

    /// All cadences, in display order.
    pub const ALL: [ScheduleOption; 4] = [
        ScheduleOption::Daily,
        ScheduleOption::AlternateDays,
        ScheduleOption::Day1Day2,
        ScheduleOption::SelectDays,
    ];
}

// =============================================================================
// Cart Item
// =============================================================================

/// A line item in the persisted cart.
///
/// ## Provenance Fields
/// `original_depot_id` / `original_variant_id` record the depot and variant
/// the item was FIRST added under. Reconciliation retargets `depot_id`,
/// `variant_id` and the price snapshot as the active depot changes, but the
/// originals are set once and never overwritten: provenance is never lost.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub product_id: i64,

    /// Current, depot-scoped variant id. The cart's merge key.
    pub variant_id: i64,

    /// Product name at time of adding (frozen until reconciliation).
    pub name: String,

    /// Unit label of the variant (e.g. "500ml").
    pub variant_name: String,

    /// Unit price snapshot in paise.
    pub price_paise: i64,

    /// Quantity in cart. Invariant: 1 ≤ quantity ≤ 99.
    pub quantity: i64,

    /// Optional image reference for cart display.
    pub image_url: Option<String>,

    /// The depot the item is currently priced against.
    pub depot_id: i64,

    /// The depot the item was first added under.
    pub original_depot_id: Option<i64>,

    /// The variant the item was first added as.
    pub original_variant_id: Option<i64>,

    /// Availability annotation. `None` means "not yet validated" and reads
    /// as available; only an explicit `Some(false)` marks a line unavailable.
    pub is_available: Option<bool>,

    /// Human-readable reason when `is_available == Some(false)`.
    pub unavailable_reason: Option<String>,

    /// When this item was added to the cart.
    #[serde(default = "Utc::now")]
    #[ts(as = "String")]
    pub added_at: DateTime<Utc>,
}

impl CartItem {
    /// Creates a cart line from a depot variant, freezing its snapshots.
    pub fn from_variant(product: &Product, variant: &DepotVariant, price: Money, quantity: i64) -> Self {
        CartItem {
            product_id: product.id,
            variant_id: variant.id,
            name: product.name.clone(),
            variant_name: variant.unit.clone(),
            price_paise: price.paise(),
            quantity: crate::validation::clamp_quantity(quantity),
            image_url: None,
            depot_id: variant.depot_id,
            original_depot_id: Some(variant.depot_id),
            original_variant_id: Some(variant.id),
            is_available: None,
            unavailable_reason: None,
            added_at: Utc::now(),
        }
    }

    /// Whether the line counts as available.
    ///
    /// Unvalidated lines (`None`) are treated as available; checkout runs a
    /// reconciliation pass before it trusts this.
    #[inline]
    pub fn is_available(&self) -> bool {
        self.is_available != Some(false)
    }

    /// Returns the frozen unit price as Money.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_paise(self.price_paise)
    }

    /// Calculates the line total (unit price × quantity).
    #[inline]
    pub fn line_total_paise(&self) -> i64 {
        self.price_paise * self.quantity
    }
}

// =============================================================================
// Delivery Context
// =============================================================================

/// The ambient "current depot" selection for a serviceable pincode.
///
/// Produced by the external depot-resolution collaborator; consumed by the
/// reconciler (depot id) and the schedule resolver (weekday names).
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryContext {
    pub depot_id: i64,
    pub depot_name: String,
    pub area_name: String,

    /// Weekday names on which the area is served (e.g. ["monday", "thursday"]).
    /// Empty means "schedule unspecified for this area".
    pub delivery_schedule: Vec<String>,
}

impl DeliveryContext {
    /// Parses the schedule's weekday names, skipping anything unparseable.
    ///
    /// Bad data from the catalog degrades to a shorter schedule rather than
    /// an error; an empty result reads as "unspecified".
    pub fn schedule_weekdays(&self) -> Vec<Weekday> {
        self.delivery_schedule
            .iter()
            .filter_map(|name| name.trim().parse::<Weekday>().ok())
            .collect()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
