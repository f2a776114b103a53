//! # Validation State Machine
//!
//! Duplicate-suppression for reconciliation passes, made structural.
//!
//! ## Why a State Machine?
//! The usual implementation is a pair of mutable flags ("is validating",
//! "last validated depot") that every call site must remember to check and
//! reset in the right order. Folding both into one enum makes the
//! suppression rule an invariant of the type: a pass can only start from
//! `Idle` or a *different* depot's `Done`, and only the pass that owns the
//! current `Validating` tag may commit its results.
//!
//! ```text
//!            validate(d)                 commit(d)
//!   Idle ───────────────► Validating(d) ──────────► Done(d)
//!    ▲                        │     ▲                  │
//!    │        lookup failed   │     │ validate(d') ≠ d │ validate(d)
//!    └────────────────────────┘     └── suppressed ────┴── suppressed
//! ```

use std::fmt;

// =============================================================================
// Validation State
// =============================================================================

/// Where the reconciler is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationState {
    /// No pass has run, or the last pass failed and may be retried.
    Idle,

    /// A pass for this depot is in flight. New passes are suppressed.
    Validating { depot_id: i64 },

    /// The cart is annotated against this depot's catalog. A pass for the
    /// same depot is redundant and suppressed; a different depot starts one.
    Done { depot_id: i64 },
}

impl ValidationState {
    /// Whether a pass is currently in flight.
    #[inline]
    pub fn is_validating(&self) -> bool {
        matches!(self, ValidationState::Validating { .. })
    }

    /// Whether the cart is already validated against `depot_id`.
    #[inline]
    pub fn is_done_for(&self, depot_id: i64) -> bool {
        matches!(self, ValidationState::Done { depot_id: d } if *d == depot_id)
    }
}

impl Default for ValidationState {
    fn default() -> Self {
        ValidationState::Idle
    }
}

impl fmt::Display for ValidationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationState::Idle => write!(f, "idle"),
            ValidationState::Validating { depot_id } => write!(f, "validating(depot {depot_id})"),
            ValidationState::Done { depot_id } => write!(f, "done(depot {depot_id})"),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
