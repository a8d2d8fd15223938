use serde::{Deserialize, Serialize};

use crate::prompts::PromptCategory;

/// A stage of the multi-phase journey.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Preparation,
    Peak,
    Integration,
}

impl Phase {
    /// The phase that follows this one, or `None` for the terminal phase.
    pub fn next(self) -> Option<Phase> {
        match self {
            Phase::Preparation => Some(Phase::Peak),
            Phase::Peak => Some(Phase::Integration),
            Phase::Integration => None,
        }
    }

    /// The prompt category this phase draws from.
    pub fn category(self) -> PromptCategory {
        match self {
            Phase::Preparation => PromptCategory::JourneyEntry,
            Phase::Peak => PromptCategory::JourneyPeak,
            Phase::Integration => PromptCategory::JourneyLanding,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Phase::Preparation => "preparation",
            Phase::Peak => "peak",
            Phase::Integration => "integration",
        }
    }
}

/// Recommended completion counts per phase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhaseThresholds {
    pub preparation: u32,
    pub peak: u32,
    pub integration: u32,
}

impl Default for PhaseThresholds {
    fn default() -> Self {
        Self {
            preparation: 2,
            peak: 3,
            integration: 2,
        }
    }
}

impl PhaseThresholds {
    pub fn goal(&self, phase: Phase) -> u32 {
        match phase {
            Phase::Preparation => self.preparation,
            Phase::Peak => self.peak,
            Phase::Integration => self.integration,
        }
    }
}

/// Completed-artifact counters for one journey. Session-scoped: reset each
/// time a new journey begins, never persisted across sessions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PhaseCounters {
    pub preparation: u32,
    pub peak: u32,
    pub integration: u32,
}

impl PhaseCounters {
    pub fn get(&self, phase: Phase) -> u32 {
        match phase {
            Phase::Preparation => self.preparation,
            Phase::Peak => self.peak,
            Phase::Integration => self.integration,
        }
    }

    pub fn bump(&mut self, phase: Phase) {
        match phase {
            Phase::Preparation => self.preparation += 1,
            Phase::Peak => self.peak += 1,
            Phase::Integration => self.integration += 1,
        }
    }
}

/// Read-only completion view for one phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PhaseProgress {
    pub count: u32,
    pub goal: u32,
}

impl PhaseProgress {
    /// Completion is advisory: the user may keep logging in a complete
    /// phase.
    pub fn is_complete(&self) -> bool {
        self.count >= self.goal
    }
}

/// Evaluates phase counters against the threshold table. Stateless aside
/// from the table itself; the counters live in the session state.
#[derive(Debug, Clone, Default)]
pub struct ProgressTracker {
    thresholds: PhaseThresholds,
}

impl ProgressTracker {
    pub fn new(thresholds: PhaseThresholds) -> Self {
        Self { thresholds }
    }

    pub fn progress(&self, phase: Phase, counters: &PhaseCounters) -> PhaseProgress {
        PhaseProgress {
            count: counters.get(phase),
            goal: self.thresholds.goal(phase),
        }
    }

    pub fn thresholds(&self) -> &PhaseThresholds {
        &self.thresholds
    }
}
