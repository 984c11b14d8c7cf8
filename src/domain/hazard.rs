// ============================================================
// Layer 3 — Hazard Vocabulary
// ============================================================
// The hazards the forecaster scores, the alert severities an
// operator sees, and the per-hazard confidence thresholds that
// decide when a score becomes an alert.
//
// Thresholds are confidence percentages (0–100), matching the
// way operators configure them. A risk score s in (0, 1) raises
// an alert once s * 100 >= threshold. The band above the
// threshold is then split:
//
//   threshold ──────── +50% of headroom ── +75% ──── 100
//   |        Watch        |     Warning    | Emergency |

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HazardKind {
    Cyclone,
    Flood,
    Seismic,
    Landslide,
}

impl HazardKind {
    /// Output coordinate order of a four-hazard model.
    pub const ALL: [HazardKind; 4] = [
        HazardKind::Cyclone,
        HazardKind::Flood,
        HazardKind::Seismic,
        HazardKind::Landslide,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            HazardKind::Cyclone   => "cyclone",
            HazardKind::Flood     => "flood",
            HazardKind::Seismic   => "seismic",
            HazardKind::Landslide => "landslide",
        }
    }
}

impl fmt::Display for HazardKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Severity {
    Watch,
    Warning,
    Emergency,
}

impl Severity {
    /// `None` when the score is below the alert threshold.
    pub fn classify(score: f32, threshold_pct: f32) -> Option<Severity> {
        let pct = score * 100.0;
        if pct.is_nan() || pct < threshold_pct {
            return None;
        }
        let headroom = (100.0 - threshold_pct).max(0.0);
        let above    = pct - threshold_pct;
        Some(if above >= headroom * 0.75 && headroom > 0.0 {
            Severity::Emergency
        } else if above >= headroom * 0.5 && headroom > 0.0 {
            Severity::Warning
        } else {
            Severity::Watch
        })
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Severity::Watch     => "Watch",
            Severity::Warning   => "Warning",
            Severity::Emergency => "Emergency",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertThresholds {
    pub cyclone:   f32,
    pub flood:     f32,
    pub seismic:   f32,
    pub landslide: f32,
    /// Used for coordinates of models that are not four-hazard models.
    #[serde(default = "default_threshold")]
    pub fallback:  f32,
}

fn default_threshold() -> f32 {
    75.0
}

impl Default for AlertThresholds {
    fn default() -> Self {
        Self {
            cyclone:   default_threshold(),
            flood:     default_threshold(),
            seismic:   default_threshold(),
            landslide: default_threshold(),
            fallback:  default_threshold(),
        }
    }
}

impl AlertThresholds {
    pub fn uniform(pct: f32) -> Self {
        Self { cyclone: pct, flood: pct, seismic: pct, landslide: pct, fallback: pct }
    }

    pub fn for_hazard(&self, hazard: Option<HazardKind>) -> f32 {
        match hazard {
            Some(HazardKind::Cyclone)   => self.cyclone,
            Some(HazardKind::Flood)     => self.flood,
            Some(HazardKind::Seismic)   => self.seismic,
            Some(HazardKind::Landslide) => self.landslide,
            None                        => self.fallback,
        }
    }
}
