//! Tiered annotation pipeline.
//!
//! Curated library → generative provider → heuristic synthesizer, in the
//! order resolved by `strategy`, with every result fitted to a per-verse
//! character budget.

pub mod budget;
pub mod chain;
pub mod curated;
pub mod generative;
pub mod heuristic;
pub mod ollama;
pub mod sanitize;
pub mod strategy;
pub mod types;

pub use budget::{BudgetAllocator, BudgetSpec};
pub use chain::AnnotationChain;
pub use curated::{CuratedLibrary, CuratedStore, CuratedTier};
pub use generative::GenerativeTier;
pub use heuristic::HeuristicSynthesizer;
pub use ollama::{LlmClient, LlmError, OllamaClient};
pub use strategy::TierOrder;
pub use types::*;
