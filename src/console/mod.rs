//! Interactive text menu over the event service.

mod menu;
mod prompt;
pub mod style;

pub use menu::{format_event, ConsoleMenu, MenuOption};
pub use prompt::{EditorPrompt, Prompt, ScriptedPrompt};
