use rustyline::{error::ReadlineError, history::DefaultHistory, Config, Editor};
use tracing::warn;

/// A source of input lines for the console menu.
pub trait Prompt {
    /// Shows `prompt` and reads one line, without its trailing newline.
    /// `None` means the user is done: end of input or an interrupt.
    fn read_line(&mut self, prompt: &str) -> Option<String>;
}

/// Line editor backed prompt used by the interactive binary.
pub struct EditorPrompt {
    editor: Editor<(), DefaultHistory>,
}

impl EditorPrompt {
    pub fn new() -> rustyline::Result<Self> {
        let config = Config::builder().auto_add_history(true).build();
        Ok(Self {
            editor: Editor::with_config(config)?,
        })
    }
}

impl Prompt for EditorPrompt {
    fn read_line(&mut self, prompt: &str) -> Option<String> {
        match self.editor.readline(prompt) {
            Ok(line) => Some(line),
            Err(ReadlineError::Interrupted) => {
                println!("CTRL-C");
                None
            }
            Err(ReadlineError::Eof) => {
                println!("CTRL-D: exiting.");
                None
            }
            Err(err) => {
                warn!("Failed to read console input: {:?}", err);
                None
            }
        }
    }
}

/// Replays a fixed list of lines, then reports end of input.
#[derive(Debug, Default)]
pub struct ScriptedPrompt {
    lines: std::collections::VecDeque<String>,
    /// Every prompt shown, in order.
    pub prompts: Vec<String>,
}

impl ScriptedPrompt {
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
            prompts: Vec::new(),
        }
    }
}

impl Prompt for ScriptedPrompt {
    fn read_line(&mut self, prompt: &str) -> Option<String> {
        self.prompts.push(prompt.to_string());
        self.lines.pop_front()
    }
}
