mod dispatch;
mod session;

pub use dispatch::{evaluate_condition, execute_action};
pub use session::{ChoiceOutcome, DialogueSession, NavigationCallback, PendingDelayedAction};
