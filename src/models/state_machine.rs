// Wizard stage state machine with validation

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Lifecycle stage of a brief under construction
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum WizardStage {
    NotStarted,
    InProgress,
    ReadyToSubmit,
    Submitted,
}

impl WizardStage {
    pub fn all() -> &'static [WizardStage] {
        &[
            WizardStage::NotStarted,
            WizardStage::InProgress,
            WizardStage::ReadyToSubmit,
            WizardStage::Submitted,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            WizardStage::NotStarted => "not_started",
            WizardStage::InProgress => "in_progress",
            WizardStage::ReadyToSubmit => "ready_to_submit",
            WizardStage::Submitted => "submitted",
        }
    }
}

impl std::fmt::Display for WizardStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for WizardStage {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "not_started" => Ok(WizardStage::NotStarted),
            "in_progress" => Ok(WizardStage::InProgress),
            "ready_to_submit" => Ok(WizardStage::ReadyToSubmit),
            "submitted" => Ok(WizardStage::Submitted),
            _ => Err(format!(
                "Unknown wizard stage: '{}'. Expected one of: not_started, in_progress, ready_to_submit, submitted",
                s
            )),
        }
    }
}

#[derive(Debug, Error)]
pub enum StageTransitionError {
    #[error("Invalid stage transition from {from:?} to {to:?}")]
    InvalidTransition { from: WizardStage, to: WizardStage },

    #[error("Brief already in terminal stage: {0:?}")]
    AlreadyTerminal(WizardStage),
}

/// Validates if a brief can move from one stage to another
pub fn can_transition(from: WizardStage, to: WizardStage) -> bool {
    match (from, to) {
        // Starting the wizard creates the draft
        (WizardStage::NotStarted, WizardStage::InProgress) => true,

        // Category advancement keeps the draft in progress
        (WizardStage::InProgress, WizardStage::InProgress) => true,

        // Finalize: summary generated, draft completed
        (WizardStage::InProgress, WizardStage::ReadyToSubmit) => true,

        // Submit: brief record created
        (WizardStage::ReadyToSubmit, WizardStage::Submitted) => true,

        // Finalize and submit happen exactly once; nothing moves backwards
        _ => false,
    }
}

/// Validates and performs a stage transition
pub fn transition_stage(
    current: WizardStage,
    target: WizardStage,
) -> Result<WizardStage, StageTransitionError> {
    if is_terminal_stage(current) && current != target {
        return Err(StageTransitionError::AlreadyTerminal(current));
    }
    if !can_transition(current, target) {
        return Err(StageTransitionError::InvalidTransition {
            from: current,
            to: target,
        });
    }

    Ok(target)
}

/// Check if a stage is terminal
pub fn is_terminal_stage(stage: WizardStage) -> bool {
    matches!(stage, WizardStage::Submitted)
}

/// Get the next logical stage in the happy path
pub fn next_stage(current: WizardStage) -> Option<WizardStage> {
    match current {
        WizardStage::NotStarted => Some(WizardStage::InProgress),
        WizardStage::InProgress => Some(WizardStage::ReadyToSubmit),
        WizardStage::ReadyToSubmit => Some(WizardStage::Submitted),
        WizardStage::Submitted => None, // Terminal
    }
}

/// Get all valid next stages from the current stage
pub fn valid_next_stages(current: WizardStage) -> Vec<WizardStage> {
    WizardStage::all()
        .iter()
        .copied()
        .filter(|&stage| can_transition(current, stage))
        .collect()
}
