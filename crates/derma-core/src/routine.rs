//! Routine builder: turns detected conditions into an ordered list of
//! skincare steps, consulting the knowledge base for products.
//!
//! Deterministic given its inputs and the static catalog. The builder also
//! owns the empty-detection policy: a clean probability vector yields the
//! fixed maintenance routine and a synthetic "Healthy Skin" diagnosis.

use std::collections::BTreeSet;

use crate::knowledge::{Knowledge, ProductRole};
use crate::types::{AnalysisResult, DetectedCondition, DiagnosisEntry, RoutineStep};

/// Synthetic diagnosis reported when nothing crosses the detection threshold.
pub const HEALTHY_SKIN: &str = "Healthy Skin";

/// Roles eligible for the treatment phase, checked in this order against the
/// catalog scan.
const TREATMENT_ROLES: [ProductRole; 4] = [
    ProductRole::Serum,
    ProductRole::Exfoliant,
    ProductRole::SpotTreat,
    ProductRole::NightSerum,
];

/// Running-length cap applied while appending treatment steps. Note this
/// bounds the treatment phase only: the trailing moisturize step is appended
/// unconditionally afterwards, so a finished routine can hold up to 4 steps
/// (1 cleanse + 2 treatments + 1 moisturizer).
const TREATMENT_PHASE_CAP: usize = 3;

/// Build the routine, needed-ingredient set, and diagnosis for a set of
/// detected conditions.
pub fn build_routine(detected: &[DetectedCondition], kb: &dyn Knowledge) -> AnalysisResult {
    let mut ingredients: BTreeSet<String> = BTreeSet::new();
    for condition in detected {
        for ingredient in kb.ingredients_for(condition.label) {
            ingredients.insert((*ingredient).to_string());
        }
    }

    if detected.is_empty() {
        return AnalysisResult {
            routine: vec![
                RoutineStep::new("1. Cleanse", "Cetaphil Gentle Cleanser", "Daily Maintenance"),
                RoutineStep::new("2. Moisturize", "CeraVe Moisturizing Cream", "Barrier Protection"),
                RoutineStep::new("3. Protect", "SPF 50 Sunscreen", "Prevention"),
            ],
            diagnosis: vec![DiagnosisEntry {
                condition: HEALTHY_SKIN.to_string(),
                confidence: 100.0,
            }],
            ingredients,
        };
    }

    let mut routine = Vec::new();

    // Step 1: cleanse. Exactly one, always first.
    match kb
        .products_matching(&ingredients, &[ProductRole::Cleanser])
        .first()
    {
        Some(cleanser) => routine.push(RoutineStep::new(
            "1. Cleanse",
            cleanser.name,
            format!("Contains {}", cleanser.ingredient),
        )),
        None => routine.push(RoutineStep::new(
            "1. Cleanse",
            "Gentle Foaming Cleanser",
            "Prep skin",
        )),
    }

    // Step 2: treatments, deduplicated by role, while under the phase cap.
    let mut seen_roles: Vec<ProductRole> = Vec::new();
    for treatment in kb.products_matching(&ingredients, &TREATMENT_ROLES) {
        if routine.len() >= TREATMENT_PHASE_CAP {
            break;
        }
        if seen_roles.contains(&treatment.role) {
            continue;
        }
        routine.push(RoutineStep::new(
            "2. Treat",
            treatment.name,
            format!("Targets {}", treatment.ingredient),
        ));
        seen_roles.push(treatment.role);
    }

    // Step 3: moisturize. Appended regardless of the cap above.
    match kb
        .products_matching(&ingredients, &[ProductRole::Moisturizer])
        .first()
    {
        Some(moisturizer) => routine.push(RoutineStep::new(
            "3. Moisturize",
            moisturizer.name,
            format!("Contains {}", moisturizer.ingredient),
        )),
        None => routine.push(RoutineStep::new(
            "3. Moisturize",
            "CeraVe Moisturizing Cream",
            "Lock in hydration",
        )),
    }

    AnalysisResult {
        routine,
        diagnosis: detected.iter().map(DiagnosisEntry::from).collect(),
        ingredients,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::knowledge::KnowledgeBase;
    use crate::labels::ConditionLabel;

    fn detected(entries: &[(ConditionLabel, f32)]) -> Vec<DetectedCondition> {
        entries
            .iter()
            .map(|&(label, confidence)| DetectedCondition { label, confidence })
            .collect()
    }

    #[test]
    fn test_empty_detection_yields_default_routine() {
        let kb = KnowledgeBase::builtin();
        let result = build_routine(&[], &kb);

        assert_eq!(
            result.routine,
            vec![
                RoutineStep::new("1. Cleanse", "Cetaphil Gentle Cleanser", "Daily Maintenance"),
                RoutineStep::new("2. Moisturize", "CeraVe Moisturizing Cream", "Barrier Protection"),
                RoutineStep::new("3. Protect", "SPF 50 Sunscreen", "Prevention"),
            ]
        );
        assert_eq!(
            result.diagnosis,
            vec![DiagnosisEntry {
                condition: "Healthy Skin".into(),
                confidence: 100.0
            }]
        );
        assert!(result.ingredients.is_empty());
    }

    #[test]
    fn test_wrinkle_scenario() {
        let kb = KnowledgeBase::builtin();
        let result = build_routine(&detected(&[(ConditionLabel::Wrinkle, 55.0)]), &kb);

        assert_eq!(result.diagnosis.len(), 1);
        assert_eq!(result.diagnosis[0].condition, "wrinkle");
        assert_eq!(result.diagnosis[0].confidence, 55.0);

        assert!(result.ingredients.contains("Retinol"));
        assert!(result.ingredients.contains("Peptides"));
        assert_eq!(result.ingredients.len(), 2);

        // No cleanser tag contains "Retinol" or "Peptides": fallback cleanse.
        assert_eq!(result.routine[0], RoutineStep::new("1. Cleanse", "Gentle Foaming Cleanser", "Prep skin"));
        // The retinol night serum is the only matching treatment.
        assert_eq!(
            result.routine[1],
            RoutineStep::new("2. Treat", "CeraVe Resurfacing Retinol Serum", "Targets Retinol")
        );
        // No moisturizer tag contains a needed ingredient: fallback.
        assert_eq!(
            result.routine[2],
            RoutineStep::new("3. Moisturize", "CeraVe Moisturizing Cream", "Lock in hydration")
        );
        assert_eq!(result.routine.len(), 3);
    }

    #[test]
    fn test_matched_moisturizer_prefers_catalog_order() {
        let kb = KnowledgeBase::builtin();
        let result = build_routine(&detected(&[(ConditionLabel::DrySkin, 80.0)]), &kb);

        // dry skin -> Hyaluronic Acid + Ceramides; both moisturizer tags
        // match, and the catalog-first one must win.
        let last = result.routine.last().unwrap();
        assert_eq!(last.step, "3. Moisturize");
        assert_eq!(last.product, "Neutrogena Hydro Boost Gel");
        assert_eq!(last.why, "Contains Hyaluronic Acid");
    }

    #[test]
    fn test_routine_shape_invariants() {
        let kb = KnowledgeBase::builtin();
        // Exercise every single-condition detection.
        for &label in &ConditionLabel::ALL {
            let result = build_routine(&detected(&[(label, 90.0)]), &kb);
            assert!(
                (2..=4).contains(&result.routine.len()),
                "{label}: routine length {}",
                result.routine.len()
            );
            assert!(result.routine.first().unwrap().step.starts_with("1."));
            assert_eq!(result.routine.last().unwrap().step, "3. Moisturize");
        }
    }

    #[test]
    fn test_treatments_deduplicated_by_role() {
        // oily skin (Niacinamide) + acne scar (Vitamin C) match two different
        // serums; only the first may contribute a step.
        let kb = KnowledgeBase::builtin();
        let result = build_routine(
            &detected(&[(ConditionLabel::AcneScar, 60.0), (ConditionLabel::OilySkin, 70.0)]),
            &kb,
        );

        let treats: Vec<_> = result
            .routine
            .iter()
            .filter(|s| s.step == "2. Treat")
            .collect();
        assert_eq!(treats.len(), 1);
        assert_eq!(treats[0].product, "The Ordinary Niacinamide 10% + Zinc");
    }

    #[test]
    fn test_four_step_routine_possible() {
        // wrinkle (Retinol) + acne scar (Vitamin C) match a serum and a night
        // serum: two treatment roles fill the phase cap, then the moisturize
        // step is still appended, giving 4 steps total.
        let kb = KnowledgeBase::builtin();
        let result = build_routine(
            &detected(&[(ConditionLabel::AcneScar, 60.0), (ConditionLabel::Wrinkle, 55.0)]),
            &kb,
        );

        let steps: Vec<_> = result.routine.iter().map(|s| s.step.as_str()).collect();
        assert_eq!(steps, vec!["1. Cleanse", "2. Treat", "2. Treat", "3. Moisturize"]);
        assert_eq!(result.routine[1].product, "Minimalist Vitamin C 10%");
        assert_eq!(result.routine[2].product, "CeraVe Resurfacing Retinol Serum");
    }

    #[test]
    fn test_ingredient_set_closure() {
        let kb = KnowledgeBase::builtin();
        let conditions = detected(&[
            (ConditionLabel::Wrinkle, 55.0),
            (ConditionLabel::DrySkin, 45.0),
            (ConditionLabel::Papule, 99.0), // dead table key: contributes nothing
        ]);
        let result = build_routine(&conditions, &kb);

        let expected: BTreeSet<String> = ["Retinol", "Peptides", "Hyaluronic Acid", "Ceramides"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(result.ingredients, expected);
    }

    #[test]
    fn test_condition_without_entry_gets_fallback_routine() {
        // Eyebag has no ingredient entry at all: empty ingredient set, but a
        // detection happened, so both fallback products are used.
        let kb = KnowledgeBase::builtin();
        let result = build_routine(&detected(&[(ConditionLabel::Eyebag, 75.0)]), &kb);

        assert!(result.ingredients.is_empty());
        assert_eq!(
            result.routine,
            vec![
                RoutineStep::new("1. Cleanse", "Gentle Foaming Cleanser", "Prep skin"),
                RoutineStep::new("3. Moisturize", "CeraVe Moisturizing Cream", "Lock in hydration"),
            ]
        );
        assert_eq!(result.diagnosis[0].condition, "Eyebag");
    }

    #[test]
    fn test_diagnosis_preserves_detection_order() {
        let kb = KnowledgeBase::builtin();
        let conditions = detected(&[
            (ConditionLabel::DarkCircle, 40.0),
            (ConditionLabel::Melasma, 35.0),
            (ConditionLabel::LargePores, 31.0),
        ]);
        let result = build_routine(&conditions, &kb);
        let names: Vec<_> = result.diagnosis.iter().map(|d| d.condition.as_str()).collect();
        assert_eq!(names, vec!["Dark Circle", "melasma", "large pores"]);
    }

    #[test]
    fn test_deterministic() {
        let kb = KnowledgeBase::builtin();
        let conditions = detected(&[
            (ConditionLabel::Blackhead, 44.4),
            (ConditionLabel::Redness, 33.3),
        ]);
        let a = build_routine(&conditions, &kb);
        let b = build_routine(&conditions, &kb);
        assert_eq!(a, b);
        assert_eq!(
            serde_json::to_string(&a).unwrap(),
            serde_json::to_string(&b).unwrap()
        );
    }
}
