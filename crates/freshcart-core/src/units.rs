//! # Unit Canonicalization
//!
//! The catalog service stores unit labels as free text, and different depots
//! disagree about spelling: "1L", "1 Ltrs" and "1000ml" are the same pack.
//! Variant selection must treat them as equal, so all label comparison goes
//! through one canonicalization table instead of scattered string literals.
//!
//! ```rust
//! use freshcart_core::units::UnitAliases;
//!
//! let aliases = UnitAliases::default();
//! assert_eq!(aliases.canonical("1 Ltrs"), "1L");
//! assert!(aliases.matches("1000ml", "1L"));
//! assert!(!aliases.matches("500ml", "1L"));
//! ```

use std::collections::HashMap;

// =============================================================================
// Alias Table
// =============================================================================

/// Configuration table mapping free-text unit labels to canonical labels.
///
/// The default table covers the storefront's dairy units. Callers with
/// unusual catalogs can start from `UnitAliases::empty()` and register their
/// own families; matching behavior is identical either way.
#[derive(Debug, Clone)]
pub struct UnitAliases {
    /// normalized alias -> canonical label
    table: HashMap<String, String>,
}

impl UnitAliases {
    /// An empty table: only normalization applies, no alias folding.
    pub fn empty() -> Self {
        UnitAliases {
            table: HashMap::new(),
        }
    }

    /// Registers a canonical label and its aliases.
    ///
    /// The canonical label maps to itself so that `canonical("1L") == "1L"`
    /// regardless of how the label is cased in the catalog.
    pub fn register(&mut self, canonical: &str, aliases: &[&str]) {
        self.table
            .insert(normalize(canonical), canonical.to_string());
        for alias in aliases {
            self.table.insert(normalize(alias), canonical.to_string());
        }
    }

    /// Resolves a free-text label to its canonical form.
    ///
    /// Unknown labels come back normalized (lowercased, spacing stripped) so
    /// that two depots that agree on an unregistered label still match.
    pub fn canonical(&self, label: &str) -> String {
        let key = normalize(label);
        match self.table.get(&key) {
            Some(canonical) => canonical.clone(),
            None => key,
        }
    }

    /// Whether two free-text labels denote the same unit.
    pub fn matches(&self, a: &str, b: &str) -> bool {
        self.canonical(a) == self.canonical(b)
    }
}

impl Default for UnitAliases {
    fn default() -> Self {
        let mut aliases = UnitAliases::empty();
        aliases.register("250ml", &["250 ML", "0.25L", "quarter litre"]);
        aliases.register("500ml", &["500 ML", "0.5L", "half litre", "half ltr"]);
        aliases.register("1L", &["1 Ltrs", "1 ltr", "1 litre", "1000ml", "1000 ML"]);
        aliases.register("2L", &["2 Ltrs", "2 ltr", "2 litre", "2000ml"]);
        aliases.register("200g", &["200 gm", "200 gms", "200 grams"]);
        aliases.register("500g", &["500 gm", "500 gms", "half kg"]);
        aliases.register("1kg", &["1 kg", "1000g", "1000 gm"]);
        aliases.register("1pc", &["1 pc", "1 piece", "single"]);
        aliases.register("6pc", &["6 pc", "6 pieces", "half dozen"]);
        aliases.register("12pc", &["12 pc", "12 pieces", "dozen", "1 dozen"]);
        aliases
    }
}

/// Lowercases and strips whitespace and punctuation noise.
fn normalize(label: &str) -> String {
    label
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '.' && *c != '-')
        .flat_map(char::to_lowercase)
        .collect()
}

// =============================================================================
// Unit Tests
// =============================================================================
