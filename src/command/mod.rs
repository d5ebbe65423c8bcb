mod commands;
mod gesture;
mod history;

pub use commands::{Attribute, AttributeOp, Command, DeleteSelectionOp, SelectionOp};
pub use gesture::{GestureTracker, PendingOp};
pub use history::CommandHistory;
