// Wizard: three revisitable steps collecting the candidate profile.
// Basic info -> technical details -> projects. State lives in a
// `WizardSession` persisted through a `SessionStore`.

pub mod answers;
pub mod handlers;
pub mod session;
pub mod store;
pub mod validation;
