#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod camera;
pub mod command;
pub mod config;
pub mod error;
pub mod event;
pub mod gizmo;
pub mod panels;
pub mod selection;
pub mod session;
pub mod splat;
pub mod tools;

pub use app::SplatEditorApp;
pub use command::{Command, CommandHistory};
pub use config::EditorConfig;
pub use error::{EditorError, Result};
pub use event::{EditorEvent, EventKind, Events};
pub use session::EditorSession;
pub use splat::{Splat, SplatHandle};
pub use tools::Tool;
