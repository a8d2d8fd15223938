use serde::{Deserialize, Serialize};
use tracing::info;

/// Which part of a session a prompt belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PromptCategory {
    /// Date-night / general connection prompts.
    Peak,
    /// Vulnerability and growth prompts.
    DeepDive,
    /// Journey phase 1: setting the container.
    JourneyEntry,
    /// Journey phase 2: deep connection and empathy.
    JourneyPeak,
    /// Journey phase 3: integration and future planning.
    JourneyLanding,
    /// Daily check-in prompts.
    Daily,
    /// Crisis / repair prompts.
    Crisis,
    /// Lightweight playful prompts (custom-only; no built-in entries).
    Playful,
}

/// How a prompt is meant to be answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityType {
    Speaking,
    Action,
    Sensory,
}

/// A single reflective question or instruction shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prompt {
    /// Unique within the catalog.
    pub id: String,
    pub text: String,
    pub category: PromptCategory,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub activity_type: Option<ActivityType>,
    pub is_custom: bool,
}

/// The prompt set for a session.
///
/// Supplied by the profile collaborator as a read-only snapshot; custom
/// prompts may be appended but existing entries are never mutated or removed.
#[derive(Debug, Clone)]
pub struct PromptCatalog {
    prompts: Vec<Prompt>,
}

fn prompt(id: &str, text: &str, category: PromptCategory) -> Prompt {
    Prompt {
        id: id.to_string(),
        text: text.to_string(),
        category,
        activity_type: None,
        is_custom: false,
    }
}

fn activity(id: &str, text: &str, category: PromptCategory, kind: ActivityType) -> Prompt {
    Prompt {
        activity_type: Some(kind),
        ..prompt(id, text, category)
    }
}

impl PromptCatalog {
    pub fn new(prompts: Vec<Prompt>) -> Self {
        Self { prompts }
    }

    /// The built-in starter prompt set.
    pub fn builtin() -> Self {
        use ActivityType::*;
        use PromptCategory::*;

        Self::new(vec![
            // Peak / date night (general connection)
            prompt("p1", "Look at your partner and tell them exactly what you admire about them right now.", Peak),
            prompt("p2", "What is a promise you want to make to your future frustrated selves?", Peak),
            prompt("p3", "What is the 'safe word' or phrase that brings you back to this feeling?", Peak),
            prompt("p4", "Share a memory from our relationship that defines 'us' for you.", Peak),
            prompt("p5", "What is one thing I do that makes you feel safest?", Peak),
            prompt("p6", "When did you feel most proud of me this year?", Peak),
            prompt("p7", "What is an adventure we haven't taken yet that you want to plan?", Peak),
            prompt("p8", "What is the funniest thing we've ever experienced together?", Peak),
            prompt("p9", "If we were characters in a book, what would our 'superpower' as a couple be?", Peak),
            prompt("p10", "What is one small ritual we used to do that you'd like to bring back?", Peak),
            prompt("p11", "Describe a time you saw me and thought 'Wow'.", Peak),
            prompt("p12", "What is your favorite non-sexual way that I touch you?", Peak),
            // Deep dive (vulnerability & growth)
            prompt("dd1", "What is a resentment you are holding that feels too small to mention?", DeepDive),
            prompt("dd2", "How have I changed in the last 5 years that you appreciate?", DeepDive),
            prompt("dd3", "What is a fear about 'us' that keeps you up at night?", DeepDive),
            prompt("dd4", "If we could automate one conflict we have repeatedly, what would it be?", DeepDive),
            prompt("dd5", "What part of yourself do you feel you have to hide from me?", DeepDive),
            prompt("dd6", "When do you feel most lonely in our relationship?", DeepDive),
            prompt("dd7", "What is one thing you need from me but are afraid to ask for?", DeepDive),
            prompt("dd8", "What does 'support' look like to you when you are stressed?", DeepDive),
            prompt("dd9", "Is there an apology you are still waiting for?", DeepDive),
            prompt("dd10", "What childhood pattern are you trying hardest not to repeat with us?", DeepDive),
            // Journey entry (setting the container)
            prompt("e1", "What is your highest intention for our connection tonight?", JourneyEntry),
            prompt("e2", "Is there a fear you are holding about tonight that you can voice now to release?", JourneyEntry),
            prompt("e3", "Create a shared 'container'. What rules do we need to feel totally free?", JourneyEntry),
            prompt("e4", "What mask am I wearing right now that I can take off?", JourneyEntry),
            activity("e5", "Check your body. Where are you holding tension? Can we breathe into it?", JourneyEntry, Sensory),
            prompt("e6", "If this evening could heal one thing between us, what would it be?", JourneyEntry),
            activity("e7", "Look at me. Without speaking, let your face show me how much you want to be here.", JourneyEntry, Action),
            prompt("e8", "What distraction (mental or physical) do you need to put in a box for the next 4 hours?", JourneyEntry),
            activity("e9", "Hold hands. Sync your breathing for 10 breaths. No words.", JourneyEntry, Action),
            // Journey peak (deep connection & empathy)
            activity("ep1", "Look into my eyes for 60 seconds without speaking. Then say the first word that comes to mind.", JourneyPeak, Action),
            activity("ep2", "Sensory Check: Describe the texture of your love right now using non-emotional words (colors, temperatures, materials).", JourneyPeak, Sensory),
            prompt("ep3", "If you could physically take a piece of my pain away, what would it look like?", JourneyPeak),
            prompt("ep4", "Tell me a truth you have been too afraid to say because you didn't want to hurt me.", JourneyPeak),
            activity("ep5", "Touch my hand. Imagine sending a beam of light from your heart to mine through that touch.", JourneyPeak, Action),
            prompt("ep6", "What is a childhood wound you feel is healing right now?", JourneyPeak),
            activity("ep7", "Visualize our relationship as a landscape. Describe it to me.", JourneyPeak, Sensory),
            prompt("ep8", "What is a part of me you used to judge, but now you understand?", JourneyPeak),
            prompt("ep9", "If we stripped away our jobs, house, and roles, who are we to each other right now?", JourneyPeak),
            prompt("ep10", "What do you forgive yourself for in this moment?", JourneyPeak),
            activity("ep11", "Lie back to back. Feel the support. What does it feel like to be upheld?", JourneyPeak, Action),
            activity("ep12", "Describe the energy between us right now as a color.", JourneyPeak, Sensory),
            prompt("ep13", "What is the most beautiful thing about my soul that you can see right now?", JourneyPeak),
            // Journey landing (integration & future)
            prompt("el1", "What is one insight from tonight that we must not forget on Tuesday morning?", JourneyLanding),
            prompt("el2", "How do you want to change our morning routine based on what we felt tonight?", JourneyLanding),
            prompt("el3", "Record a message to your 'Sober Self' about how much you love your partner.", JourneyLanding),
            prompt("el4", "What is one behavior I want to leave behind in this trip?", JourneyLanding),
            prompt("el5", "What is one concrete action we will take this week to honor this connection?", JourneyLanding),
            prompt("el6", "How can I support your 'landing' over the next 24 hours?", JourneyLanding),
            prompt("el7", "What was the hardest moment of tonight, and what did we learn from it?", JourneyLanding),
            prompt("el8", "Make a wish for our relationship for the next 3 months.", JourneyLanding),
            // Daily check-in
            prompt("d1", "Describe a moment this week where you felt truly seen by your partner.", Daily),
            prompt("d2", "What is one small thing your partner did that made your life easier today?", Daily),
            prompt("d3", "What is a stressor you are carrying that you haven't shared yet?", Daily),
            prompt("d4", "What is one thing you are looking forward to doing with me?", Daily),
            prompt("d5", "How are your energy levels today (1-10)?", Daily),
            // Crisis / repair
            prompt("c1", "If we are fighting right now, what is the one thing I need to remember?", Crisis),
            prompt("c2", "Remind me: We are on the same team. What is our shared goal?", Crisis),
            prompt("c3", "Record a calm voice note: 'I love you, even when I'm angry.'", Crisis),
            prompt("c4", "What is your best quality that I sometimes forget when we argue?", Crisis),
        ])
    }

    /// Last-resort prompt returned when a category has no entries at all.
    /// Drawing must never produce "no prompt to display".
    pub fn fallback_prompt() -> Prompt {
        prompt(
            "p1",
            "Look at your partner and tell them exactly what you admire about them right now.",
            PromptCategory::Peak,
        )
    }

    pub fn in_category(&self, category: PromptCategory) -> Vec<&Prompt> {
        self.prompts
            .iter()
            .filter(|p| p.category == category)
            .collect()
    }

    /// Today's daily check-in prompt: the first daily entry, falling back to
    /// the first catalog entry, then the fixed fallback.
    pub fn daily_prompt(&self) -> Prompt {
        self.prompts
            .iter()
            .find(|p| p.category == PromptCategory::Daily)
            .or_else(|| self.prompts.first())
            .cloned()
            .unwrap_or_else(Self::fallback_prompt)
    }

    /// Append a custom prompt. The catalog is append-only.
    pub fn push(&mut self, prompt: Prompt) {
        info!("custom prompt added to catalog: {}", prompt.id);
        self.prompts.push(prompt);
    }

    pub fn len(&self) -> usize {
        self.prompts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prompts.is_empty()
    }

    pub fn prompts(&self) -> &[Prompt] {
        &self.prompts
    }
}
