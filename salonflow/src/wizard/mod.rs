//! The registration wizard.
//!
//! Three pieces:
//! - [`WizardState`]: the current step, the lifecycle phase, and the four
//!   step records.
//! - [`WizardIntent`]: the typed edits and navigation requests hosts send.
//! - [`WizardController`]: owns the state, applies intents, and drives
//!   verification and submission.

mod controller;
mod intent;
mod state;

#[cfg(test)]
mod integration_tests;

pub use controller::WizardController;
pub use intent::WizardIntent;
pub use state::WizardState;
