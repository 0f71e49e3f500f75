use std::io::{self, Write};

use super::prompt::Prompt;
use super::style;
use crate::event_service::EventService;
use crate::event_store::{Event, EventDraft};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuOption {
    List,
    Create,
    Update,
    Delete,
    Exit,
}

impl MenuOption {
    pub const ALL: [MenuOption; 5] = [
        MenuOption::List,
        MenuOption::Create,
        MenuOption::Update,
        MenuOption::Delete,
        MenuOption::Exit,
    ];

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "1" => Some(MenuOption::List),
            "2" => Some(MenuOption::Create),
            "3" => Some(MenuOption::Update),
            "4" => Some(MenuOption::Delete),
            "5" => Some(MenuOption::Exit),
            _ => None,
        }
    }

    pub fn number(&self) -> u8 {
        match self {
            MenuOption::List => 1,
            MenuOption::Create => 2,
            MenuOption::Update => 3,
            MenuOption::Delete => 4,
            MenuOption::Exit => 5,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MenuOption::List => "List events",
            MenuOption::Create => "Create event",
            MenuOption::Update => "Update event",
            MenuOption::Delete => "Delete event",
            MenuOption::Exit => "Exit",
        }
    }
}

/// What the menu should do after handling one selection.
enum Flow {
    Continue,
    Exit,
}

/// Numbered text menu over the event service.
///
/// Holds no state of its own: every choice becomes exactly one service call,
/// and the outcome is printed.
pub struct ConsoleMenu<'a, P: Prompt, W: Write> {
    service: &'a EventService,
    prompt: P,
    out: W,
}

impl<'a, P: Prompt, W: Write> ConsoleMenu<'a, P, W> {
    pub fn new(service: &'a EventService, prompt: P, out: W) -> Self {
        Self {
            service,
            prompt,
            out,
        }
    }

    /// Runs until the user picks exit or input ends.
    pub fn run(&mut self) -> io::Result<()> {
        loop {
            self.print_menu()?;
            let Some(line) = self.prompt.read_line("Option: ") else {
                return Ok(());
            };

            let Some(option) = MenuOption::parse(&line) else {
                writeln!(
                    self.out,
                    "{}",
                    style::error("Invalid option. Please select a valid option.")
                )?;
                continue;
            };

            writeln!(self.out, "{}", style::dim(&format!("> {}", option.label())))?;
            if let Flow::Exit = self.handle(option)? {
                return Ok(());
            }
        }
    }

    pub fn into_parts(self) -> (P, W) {
        (self.prompt, self.out)
    }

    fn print_menu(&mut self) -> io::Result<()> {
        writeln!(self.out, "{}", style::header("Select an option:"))?;
        for option in MenuOption::ALL {
            writeln!(self.out, "{}. {}", option.number(), option.label())?;
        }
        Ok(())
    }

    fn handle(&mut self, option: MenuOption) -> io::Result<Flow> {
        match option {
            MenuOption::List => self.list()?,
            MenuOption::Create => self.create()?,
            MenuOption::Update => self.update()?,
            MenuOption::Delete => self.delete()?,
            MenuOption::Exit => {
                writeln!(self.out, "Exiting...")?;
                return Ok(Flow::Exit);
            }
        }
        Ok(Flow::Continue)
    }

    fn list(&mut self) -> io::Result<()> {
        match self.service.list_events() {
            Ok(events) if events.is_empty() => writeln!(self.out, "No events found."),
            Ok(events) => {
                for event in events.iter() {
                    writeln!(self.out, "{}", format_event(event))?;
                }
                Ok(())
            }
            Err(err) => self.print_error(&err.to_string()),
        }
    }

    fn create(&mut self) -> io::Result<()> {
        let Some(draft) = self.read_draft(false)? else {
            return Ok(());
        };
        match self.service.create_event(draft) {
            Ok(event) => self.print_success(&format!(
                "Event {} created successfully.",
                event.id
            )),
            Err(err) => self.print_error(&err.to_string()),
        }
    }

    fn update(&mut self) -> io::Result<()> {
        let Some(id) = self.prompt.read_line("Event ID to update: ") else {
            return Ok(());
        };
        let Some(draft) = self.read_draft(true)? else {
            return Ok(());
        };
        match self.service.update_event(&id, draft) {
            Ok(()) => self.print_success("Event updated successfully."),
            Err(err) => self.print_error(&err.to_string()),
        }
    }

    fn delete(&mut self) -> io::Result<()> {
        let Some(id) = self.prompt.read_line("Event ID to delete: ") else {
            return Ok(());
        };
        match self.service.delete_event(&id) {
            Ok(()) => self.print_success("Event deleted successfully."),
            Err(err) => self.print_error(&err.to_string()),
        }
    }

    /// Prompts for each field in turn. `None` when input ended or the price
    /// was not a number, in which case the reason was already printed.
    fn read_draft(&mut self, updating: bool) -> io::Result<Option<EventDraft>> {
        let prefix = if updating { "New event" } else { "Event" };

        let Some(name) = self.prompt.read_line(&format!("{} name: ", prefix)) else {
            return Ok(None);
        };
        let Some(price) = self.prompt.read_line(&format!("{} price: ", prefix)) else {
            return Ok(None);
        };
        let price = match price.trim().parse::<f64>() {
            Ok(price) => price,
            Err(_) => {
                self.print_error(&format!("Invalid price '{}'", price.trim()))?;
                return Ok(None);
            }
        };
        let Some(description) = self.prompt.read_line(&format!("{} description: ", prefix))
        else {
            return Ok(None);
        };
        let Some(event_type) = self.prompt.read_line(&format!("{} type: ", prefix)) else {
            return Ok(None);
        };
        let Some(date) = self.prompt.read_line(&format!("{} date: ", prefix)) else {
            return Ok(None);
        };

        Ok(Some(EventDraft {
            name: name.trim().to_string(),
            price,
            description: description.trim().to_string(),
            event_type: event_type.trim().to_string(),
            date: date.trim().to_string(),
        }))
    }

    fn print_success(&mut self, message: &str) -> io::Result<()> {
        writeln!(self.out, "{}", style::success(message))
    }

    fn print_error(&mut self, message: &str) -> io::Result<()> {
        writeln!(self.out, "{}", style::error(message))
    }
}

pub fn format_event(event: &Event) -> String {
    format!(
        "ID: {}, Name: {}, Price: {:.2}, Description: {}, Type: {}, Date: {}",
        event.id, event.name, event.price, event.description, event.event_type, event.date
    )
}
