//! Elimination and outcome tracking
//!
//! Two states: `Running` and `Resolved`. The transition fires once, the first
//! time the alive count reaches one. If the last two heads knock each other
//! out in the same collision the run resolves as a draw instead of stalling.

use serde::{Deserialize, Serialize};

use super::state::{HeadsState, SimPhase};

/// How a run ended
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// Exactly one head survived
    Winner { id: u32, name: String },
    /// The last survivors were eliminated together
    Draw,
}

/// Watches the alive set and drives the Running -> Resolved transition
pub struct OutcomeTracker;

impl OutcomeTracker {
    /// Re-check the alive set. Returns the outcome only on the transition.
    pub fn evaluate(state: &mut HeadsState) -> Option<Outcome> {
        if state.is_resolved() {
            return None;
        }

        let mut alive = state.heads.iter().filter(|h| h.alive);
        let outcome = match (alive.next(), alive.next()) {
            (Some(survivor), None) => Outcome::Winner {
                id: survivor.id,
                name: survivor.name.clone(),
            },
            (None, _) if !state.heads.is_empty() => Outcome::Draw,
            _ => return None,
        };

        match &outcome {
            Outcome::Winner { id, name } => log::info!("Winner: {} (id {})", name, id),
            Outcome::Draw => log::info!("No survivors - resolved as a draw"),
        }
        state.phase = SimPhase::Resolved(outcome.clone());
        Some(outcome)
    }
}
