//! Prompt catalog and selection
//!
//! This module provides the prompt set shared with the profile/library
//! collaborator and the `PromptSelector` that draws prompts for a session:
//! - Typed prompt records with category and optional activity tags
//! - The built-in starter catalog
//! - Non-repeating random draws with a graceful fallback ladder

mod catalog;
mod selector;

pub use catalog::{ActivityType, Prompt, PromptCatalog, PromptCategory};
pub use selector::PromptSelector;
