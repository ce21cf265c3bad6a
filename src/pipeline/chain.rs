//! Ordered tier chain ending in the heuristic synthesizer.

use std::sync::Arc;

use super::budget::BudgetAllocator;
use super::heuristic::HeuristicSynthesizer;
use super::strategy::{resolve_plan, Capabilities, TierKind, TierOrder};
use super::types::{AnnotateOptions, Annotation, AnnotationRequest, Annotator, SourceTier, TierOutcome};

/// Ordered annotation strategies with a guaranteed heuristic fallback.
///
/// Optional tiers are simply absent when their capability is not wired.
pub struct AnnotationChain {
    curated: Option<Arc<dyn Annotator>>,
    generative: Option<Arc<dyn Annotator>>,
    heuristic: HeuristicSynthesizer,
    allocator: BudgetAllocator,
    order: TierOrder,
}

impl AnnotationChain {
    pub fn new(allocator: BudgetAllocator, order: TierOrder) -> Self {
        Self {
            curated: None,
            generative: None,
            heuristic: HeuristicSynthesizer::new(),
            allocator,
            order,
        }
    }

    pub fn with_curated(mut self, tier: Arc<dyn Annotator>) -> Self {
        self.curated = Some(tier);
        self
    }

    pub fn with_generative(mut self, tier: Arc<dyn Annotator>) -> Self {
        self.generative = Some(tier);
        self
    }

    pub fn allocator(&self) -> &BudgetAllocator {
        &self.allocator
    }

    pub fn capabilities(&self) -> Capabilities {
        Capabilities {
            curated: self.curated.is_some(),
            generative: self.generative.is_some(),
        }
    }

    /// Annotate one verse within `budget` chars. Total: always returns
    /// a non-empty annotation.
    pub async fn annotate(&self, request: &AnnotationRequest, budget: usize, enriched: bool) -> Annotation {
        let plan = resolve_plan(self.order, enriched, self.capabilities());
        let options = AnnotateOptions {
            budget,
            elaborate: plan.elaborate_curated,
        };

        for kind in &plan.tiers {
            let Some(tier) = self.tier(*kind) else {
                continue;
            };
            match tier.annotate(request, options).await {
                TierOutcome::Produced(text) if !text.trim().is_empty() => {
                    return self.finish(request, &text, budget, tier.tier());
                }
                TierOutcome::Produced(_) => {
                    tracing::debug!(verse = %request.verse_id(), tier = %tier.tier(), "Tier produced empty text");
                }
                TierOutcome::Miss(reason) => {
                    tracing::debug!(verse = %request.verse_id(), tier = %tier.tier(), reason = %reason, "Tier missed");
                }
            }
        }

        let text = self.heuristic.synthesize(request);
        self.finish(request, &text, budget, SourceTier::Heuristic)
    }

    fn tier(&self, kind: TierKind) -> Option<&Arc<dyn Annotator>> {
        match kind {
            TierKind::Curated => self.curated.as_ref(),
            TierKind::Generative => self.generative.as_ref(),
        }
    }

    fn finish(&self, request: &AnnotationRequest, text: &str, budget: usize, tier: SourceTier) -> Annotation {
        let filler = self.heuristic.elaboration_clauses(request.book);
        let fitted = self.allocator.fit(text, budget, &filler);
        if fitted.is_empty() {
            // Zero budget: keep the raw text rather than an empty annotation.
            return Annotation::new(text.trim().to_string(), tier);
        }
        Annotation::new(fitted, tier)
    }
}
