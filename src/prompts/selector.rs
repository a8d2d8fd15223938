use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use tracing::warn;

use super::catalog::{Prompt, PromptCatalog, PromptCategory};

/// Draws prompts for a session category with visible rotation.
///
/// The draw is a single pass over an explicit candidate list, degrading in
/// order: category minus the currently displayed prompt, then the full
/// category (repetition only when unavoidable), then the fixed fallback
/// prompt. It never errors and never loops.
pub struct PromptSelector {
    catalog: PromptCatalog,
    rng: StdRng,
}

impl PromptSelector {
    pub fn new(catalog: PromptCatalog) -> Self {
        Self {
            catalog,
            rng: StdRng::from_entropy(),
        }
    }

    /// Deterministic selector for tests.
    pub fn with_seed(catalog: PromptCatalog, seed: u64) -> Self {
        Self {
            catalog,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Draw a prompt from `category`, excluding `exclude` (the currently
    /// displayed prompt id) unless the category has no other entry.
    pub fn draw(&mut self, category: PromptCategory, exclude: Option<&str>) -> Prompt {
        let candidates = self.catalog.in_category(category);

        let rotation: Vec<&Prompt> = candidates
            .iter()
            .copied()
            .filter(|p| Some(p.id.as_str()) != exclude)
            .collect();

        if let Some(p) = rotation.choose(&mut self.rng) {
            return (*p).clone();
        }
        if let Some(p) = candidates.choose(&mut self.rng) {
            return (*p).clone();
        }

        warn!(
            "no prompts in category {:?}; falling back to the default prompt",
            category
        );
        PromptCatalog::fallback_prompt()
    }

    /// Append a custom prompt to the underlying catalog.
    pub fn add_custom(&mut self, prompt: Prompt) {
        self.catalog.push(prompt);
    }

    pub fn catalog(&self) -> &PromptCatalog {
        &self.catalog
    }
}
