mod bus;
mod events;
mod handlers;

pub use bus::{EditorFunction, Events, Listener, ListenerId};
pub use events::{EditorEvent, EventKind};
pub use handlers::connect_history;
