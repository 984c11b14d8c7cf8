// ============================================================
// Layer 3 — Risk Assessment
// ============================================================
// Turns a raw risk vector (one sigmoid score per hazard) into
// labelled, thresholded hazard risks for one region.
//
// The scores are independent probabilities: they do not sum
// to 1, and several hazards can alert at the same time.

use serde::{Deserialize, Serialize};

use crate::domain::hazard::{AlertThresholds, HazardKind, Severity};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HazardRisk {
    /// Hazard name, or `hazard_<i>` for models that are not four-hazard models
    pub label:    String,
    pub hazard:   Option<HazardKind>,
    pub score:    f32,
    pub severity: Option<Severity>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub region: String,
    pub risks:  Vec<HazardRisk>,
}

impl RiskAssessment {
    pub fn from_scores(
        region:     impl Into<String>,
        scores:     &[f32],
        thresholds: &AlertThresholds,
    ) -> Self {
        let named = scores.len() == HazardKind::ALL.len();
        let risks = scores
            .iter()
            .enumerate()
            .map(|(i, &score)| {
                let hazard = named.then(|| HazardKind::ALL[i]);
                let label  = hazard.map_or_else(|| format!("hazard_{i}"), |h| h.name().to_string());
                HazardRisk {
                    label,
                    hazard,
                    score,
                    severity: Severity::classify(score, thresholds.for_hazard(hazard)),
                }
            })
            .collect();
        Self { region: region.into(), risks }
    }

    /// The hazard with the largest score.
    pub fn highest(&self) -> Option<&HazardRisk> {
        self.risks.iter().max_by(|a, b| a.score.total_cmp(&b.score))
    }

    pub fn alerts(&self) -> impl Iterator<Item = &HazardRisk> {
        self.risks.iter().filter(|r| r.severity.is_some())
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_four_scores_are_named_hazards() {
        let a = RiskAssessment::from_scores("North Coast", &[0.9, 0.4, 0.1, 0.2], &AlertThresholds::default());
        assert_eq!(a.risks[0].hazard, Some(HazardKind::Cyclone));
        assert_eq!(a.risks[3].label, "landslide");
        assert_eq!(a.highest().unwrap().label, "cyclone");
    }

    #[test]
    fn test_other_widths_use_indexed_labels() {
        let a = RiskAssessment::from_scores("r", &[0.2, 0.3], &AlertThresholds::default());
        assert_eq!(a.risks[1].label, "hazard_1");
        assert_eq!(a.risks[1].hazard, None);
    }

    #[test]
    fn test_multiple_hazards_can_alert() {
        let a = RiskAssessment::from_scores("r", &[0.9, 0.95, 0.1, 0.8], &AlertThresholds::uniform(70.0));
        let alerted: Vec<&str> = a.alerts().map(|r| r.label.as_str()).collect();
        assert_eq!(alerted, ["cyclone", "flood", "landslide"]);
    }

    #[test]
    fn test_empty_scores_have_no_highest() {
        let a = RiskAssessment::from_scores("r", &[], &AlertThresholds::default());
        assert!(a.highest().is_none());
    }
}
