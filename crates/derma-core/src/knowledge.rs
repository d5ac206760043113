//! Static skincare knowledge base: condition→ingredient and
//! ingredient→product association tables.
//!
//! Both tables are frozen at compile time and shared read-only across
//! requests; nothing ever mutates them after startup.

use std::collections::BTreeSet;

use crate::labels::ConditionLabel;

/// The position a product occupies in a routine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProductRole {
    Cleanser,
    Serum,
    Exfoliant,
    SpotTreat,
    NightSerum,
    Moisturizer,
    Sunscreen,
    EyeSerum,
    Treatment,
}

/// One catalog entry. `ingredient` is the free-text tag products are matched
/// against, not a normalized ingredient identity.
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub ingredient: &'static str,
    pub name: &'static str,
    pub role: ProductRole,
}

/// Condition name → active ingredients.
///
/// Keys are the historical map keys, kept verbatim. Several entries
/// ("pimples", "papules", "pustules", "nodules", "sun tan") are keyed by
/// names the detector never emits (the label set uses "papule"/"pustule"/
/// "nodule"), so they are permanently dead lookups. Do not rename or merge
/// them without retraining-side confirmation of intent.
const INGREDIENT_MAP: &[(&str, &[&str])] = &[
    ("pimples", &["Salicylic Acid", "Tea Tree Oil"]),
    ("papules", &["Niacinamide", "Salicylic Acid"]),
    ("pustules", &["Benzoyl Peroxide", "Centella"]),
    ("nodules", &["Adapalene (Differin)", "Retinol"]),
    ("acne scar", &["Vitamin C", "Alpha Arbutin"]),
    ("dark spot", &["Vitamin C", "Tranexamic Acid"]),
    ("Dark Circle", &["Caffeine", "Retinol Eye Cream"]),
    ("melasma", &["Azelaic Acid", "Kojic Acid"]),
    ("freckle", &["SPF 50+ Sunscreen", "Niacinamide"]),
    ("wrinkle", &["Retinol", "Peptides"]),
    ("large pores", &["Niacinamide", "BHA Exfoliant"]),
    ("blackhead", &["Salicylic Acid (BHA)", "Clay Mask"]),
    ("whitehead", &["Glycolic Acid (AHA)"]),
    ("oily skin", &["Niacinamide", "Oil-Free Moisturizer"]),
    ("dry skin", &["Hyaluronic Acid", "Ceramides"]),
    ("redness", &["Centella Asiatica", "Azelaic Acid"]),
    ("sun tan", &["Vitamin C", "Aloe Vera"]),
];

/// Product catalog, in recommendation priority order. Matching always scans
/// in this order, so earlier entries win ties.
const CATALOG: &[Product] = &[
    Product { ingredient: "Salicylic Acid", name: "CeraVe Renewing SA Cleanser", role: ProductRole::Cleanser },
    Product { ingredient: "Niacinamide", name: "The Ordinary Niacinamide 10% + Zinc", role: ProductRole::Serum },
    Product { ingredient: "Benzoyl Peroxide", name: "Benzac AC 2.5% Gel", role: ProductRole::SpotTreat },
    Product { ingredient: "Vitamin C", name: "Minimalist Vitamin C 10%", role: ProductRole::Serum },
    Product { ingredient: "Retinol", name: "CeraVe Resurfacing Retinol Serum", role: ProductRole::NightSerum },
    Product { ingredient: "Hyaluronic Acid", name: "Neutrogena Hydro Boost Gel", role: ProductRole::Moisturizer },
    Product { ingredient: "Ceramides", name: "CeraVe Moisturizing Cream", role: ProductRole::Moisturizer },
    Product { ingredient: "Caffeine", name: "The Ordinary Caffeine Solution 5%", role: ProductRole::EyeSerum },
    Product { ingredient: "BHA", name: "Paula's Choice 2% BHA Liquid", role: ProductRole::Exfoliant },
    Product { ingredient: "Centella", name: "COSRX Cica Serum", role: ProductRole::Serum },
    Product { ingredient: "Azelaic Acid", name: "The Ordinary Azelaic Acid 10%", role: ProductRole::Treatment },
    Product { ingredient: "SPF 50+ Sunscreen", name: "La Roche-Posay Anthelios SPF 50", role: ProductRole::Sunscreen },
];

/// A needed ingredient matches a product when it occurs as a literal
/// substring of the product's ingredient tag.
///
/// The direction is deliberate and asymmetric: the needed ingredient is the
/// needle, the tag is the haystack. A product tagged "BHA" therefore does NOT
/// match a needed ingredient of "Salicylic Acid (BHA)". This under-matches in
/// places but is the contract existing recommendations were tuned against;
/// keep it as is.
pub fn ingredient_matches_tag(ingredient: &str, tag: &str) -> bool {
    tag.contains(ingredient)
}

/// Read-only lookup capabilities over the knowledge tables.
pub trait Knowledge {
    /// Active ingredients for a condition; empty when the condition has no
    /// table entry.
    fn ingredients_for(&self, condition: ConditionLabel) -> &[&'static str];

    /// Catalog products whose role is in `roles` and whose tag matches any
    /// needed ingredient, in catalog order.
    fn products_matching(
        &self,
        ingredients: &BTreeSet<String>,
        roles: &[ProductRole],
    ) -> Vec<&Product>;
}

/// The built-in, compile-time knowledge base.
#[derive(Debug, Clone, Copy)]
pub struct KnowledgeBase {
    ingredient_map: &'static [(&'static str, &'static [&'static str])],
    catalog: &'static [Product],
}

impl KnowledgeBase {
    pub fn builtin() -> Self {
        Self {
            ingredient_map: INGREDIENT_MAP,
            catalog: CATALOG,
        }
    }

    /// The full product catalog, in priority order.
    pub fn catalog(&self) -> &'static [Product] {
        self.catalog
    }
}

impl Knowledge for KnowledgeBase {
    fn ingredients_for(&self, condition: ConditionLabel) -> &[&'static str] {
        self.ingredient_map
            .iter()
            .find(|(key, _)| *key == condition.as_str())
            .map(|(_, ingredients)| *ingredients)
            .unwrap_or(&[])
    }

    fn products_matching(
        &self,
        ingredients: &BTreeSet<String>,
        roles: &[ProductRole],
    ) -> Vec<&Product> {
        self.catalog
            .iter()
            .filter(|product| roles.contains(&product.role))
            .filter(|product| {
                ingredients
                    .iter()
                    .any(|needed| ingredient_matches_tag(needed, product.ingredient))
            })
            .collect()
    }
}
