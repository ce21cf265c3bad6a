//! Tier policy: which annotation tiers run, in which order.
//!
//! Pure resolution from the configured `TierOrder`, the per-request
//! `enriched` flag and the capabilities actually wired at startup.
//! The heuristic tier is never part of the resolved plan: the chain always
//! ends with it.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ═══════════════════════════════════════════════════════════
// Types
// ═══════════════════════════════════════════════════════════

/// Configured precedence between curated and generative tiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TierOrder {
    /// Curated library first, generative as second chance.
    #[default]
    CuratedFirst,
    /// Generative first, curated library as second chance.
    GenerativeFirst,
}

impl fmt::Display for TierOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CuratedFirst => write!(f, "curated_first"),
            Self::GenerativeFirst => write!(f, "generative_first"),
        }
    }
}

impl FromStr for TierOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "curated_first" | "curated" => Ok(Self::CuratedFirst),
            "generative_first" | "generative" => Ok(Self::GenerativeFirst),
            other => Err(format!("Unknown tier order: {other}")),
        }
    }
}

/// A tier that can be placed in the plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TierKind {
    Curated,
    Generative,
}

/// Capabilities wired at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Capabilities {
    pub curated: bool,
    pub generative: bool,
}

/// Resolved plan for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TierPlan {
    /// Tiers to try before the heuristic fallback, in order.
    pub tiers: Vec<TierKind>,
    /// Whether the curated tier may ask the LLM to elaborate short entries.
    pub elaborate_curated: bool,
}

// ═══════════════════════════════════════════════════════════
// Resolution
// ═══════════════════════════════════════════════════════════

/// Resolve the tier plan for one request.
///
/// Pure function. `enriched = false` drops every generative call: the
/// generative tier and curated elaboration.
pub fn resolve_plan(order: TierOrder, enriched: bool, caps: Capabilities) -> TierPlan {
    let generative = caps.generative && enriched;

    let preferred: &[TierKind] = match order {
        TierOrder::CuratedFirst => &[TierKind::Curated, TierKind::Generative],
        TierOrder::GenerativeFirst => &[TierKind::Generative, TierKind::Curated],
    };

    let tiers = preferred
        .iter()
        .copied()
        .filter(|kind| match kind {
            TierKind::Curated => caps.curated,
            TierKind::Generative => generative,
        })
        .collect();

    TierPlan {
        tiers,
        elaborate_curated: caps.curated && generative,
    }
}

// ═══════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════
