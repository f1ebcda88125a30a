pub mod condition;
pub mod error;
pub mod item;
pub mod player;
pub mod types;

pub use condition::{CompareOp, ConditionRecord, ConditionTest, StatKey};
pub use error::DialogueError;
pub use item::{ItemKind, ItemSpec};
pub use player::PlayerState;
pub use types::*;
