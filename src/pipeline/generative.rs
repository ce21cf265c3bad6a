//! Generative tier: a prompted LLM call under a timeout, with output validation.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use super::ollama::{LlmClient, LlmError};
use super::sanitize::{clean_generated, is_well_formed};
use super::types::{AnnotateOptions, AnnotationRequest, Annotator, SourceTier, TierOutcome};

/// Generated explanations at or under this length are rejected.
pub const MIN_GENERATED_CHARS: usize = 100;

pub const VERSE_SYSTEM_PROMPT: &str = r#"
You are a Bible study assistant writing verse-by-verse commentary.
Your ONLY role is to explain the verse you are given.

RULES:
1. Explain the verse in its literary and historical context.
2. Mention one or two key words of the original language when relevant.
3. Connect the verse to the wider biblical story.
4. Write plain prose paragraphs. No headings, no lists, no markdown.
5. Never mention that you are an assistant or a model.
"#;

/// Build the prompt asking for a fresh explanation of one verse.
pub fn build_verse_prompt(request: &AnnotationRequest, budget: usize) -> String {
    format!(
        r#"<verse reference="{reference}">
{text}
</verse>

Write a theological explanation of this verse in about {budget} characters.
Cover its context, its key terms and what it reveals about God."#,
        reference = request.reference(),
        text = request.verse_text.trim(),
    )
}

/// Build the prompt asking to expand a short curated explanation.
pub fn build_elaboration_prompt(request: &AnnotationRequest, curated: &str, budget: usize) -> String {
    format!(
        r#"<verse reference="{reference}">
{text}
</verse>

<commentary>
{curated}
</commentary>

Expand the commentary above into a fuller explanation of about {budget} characters.
Keep every point it makes and stay faithful to the verse."#,
        reference = request.reference(),
        text = request.verse_text.trim(),
        curated = curated.trim(),
    )
}

/// Call the LLM under a timeout and return cleaned, well-formed text.
///
/// Shared by the generative tier and curated elaboration.
pub(crate) async fn generate_checked(
    llm: &dyn LlmClient,
    prompt: &str,
    timeout: Duration,
) -> Result<String, String> {
    let raw = match tokio::time::timeout(timeout, llm.generate(VERSE_SYSTEM_PROMPT, prompt)).await {
        Ok(Ok(raw)) => raw,
        Ok(Err(e)) => return Err(e.to_string()),
        Err(_) => return Err(LlmError::Timeout(timeout.as_secs()).to_string()),
    };

    let cleaned = clean_generated(&raw);
    if !is_well_formed(&cleaned) {
        return Err("generated text is not well-formed".into());
    }
    Ok(cleaned)
}

/// Fresh explanation from the generative provider.
pub struct GenerativeTier {
    llm: Arc<dyn LlmClient>,
    timeout: Duration,
}

impl GenerativeTier {
    pub fn new(llm: Arc<dyn LlmClient>, timeout: Duration) -> Self {
        Self { llm, timeout }
    }
}

#[async_trait]
impl Annotator for GenerativeTier {
    fn tier(&self) -> SourceTier {
        SourceTier::Generative
    }

    async fn annotate(&self, request: &AnnotationRequest, options: AnnotateOptions) -> TierOutcome {
        let prompt = build_verse_prompt(request, options.budget);
        match generate_checked(self.llm.as_ref(), &prompt, self.timeout).await {
            Ok(text) if text.chars().count() > MIN_GENERATED_CHARS => TierOutcome::Produced(text),
            Ok(text) => TierOutcome::miss(format!(
                "generated text too short ({} chars)",
                text.chars().count()
            )),
            Err(reason) => {
                tracing::debug!(
                    verse = %request.verse_id(),
                    model = self.llm.model(),
                    reason = %reason,
                    "Generative tier missed"
                );
                TierOutcome::Miss(reason)
            }
        }
    }
}
