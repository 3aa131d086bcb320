//! Interactive session.
//!
//! A line-oriented loop that turns typed commands into catalog events and
//! lets the [`Terminal`] surface draw the results.

use std::{
    fmt::{Debug, Formatter, Result as FmtResult},
    io::{self, Write},
    str::FromStr,
};

use autovault::{
    catalog::{Catalog, Event},
    vehicles::{
        errors::FormError,
        form::{EditForm, VehicleForm},
        records::{CategoryFilter, VehicleId},
    },
};
use thiserror::Error;
use tokio::io::AsyncBufRead;
use tracing::debug;

use crate::terminal::Terminal;

pub const HELP: &str = "\
Commands:
  list                    show the vehicles matching the current filter
  stats                   show collection statistics
  refresh                 reload the collection from the store
  filter <category>       All, SUV, Sedan, Hatchback or Sub4m
  search [term]           match make, model or chassis; no term clears it
  add                     add a vehicle
  edit <id>               edit a vehicle; blank keeps a value, `cancel` aborts
  remove <id>             remove a vehicle
  help                    show this help
  quit                    leave the session";

const PROMPT: &str = "autovault> ";

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("failed to read input: {0}")]
    Input(#[source] io::Error),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("unknown command: {0}")]
    Unknown(String),

    #[error("usage: {0}")]
    Usage(&'static str),

    #[error(transparent)]
    Filter(#[from] FormError),
}

/// One parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    List,
    Stats,
    Refresh,
    Filter(CategoryFilter),
    Search(String),
    Add,
    Edit(VehicleId),
    Remove(VehicleId),
    Help,
    Quit,
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();

        let (name, argument) = line
            .split_once(char::is_whitespace)
            .map_or((line, ""), |(name, rest)| (name, rest.trim()));

        match name.to_lowercase().as_str() {
            "list" | "ls" => Ok(Command::List),
            "stats" => Ok(Command::Stats),
            "refresh" => Ok(Command::Refresh),
            "filter" if argument.is_empty() => Err(CommandError::Usage(
                "filter <All|SUV|Sedan|Hatchback|Sub4m>",
            )),
            "filter" => Ok(Command::Filter(argument.parse()?)),
            "search" => Ok(Command::Search(argument.to_string())),
            "add" => Ok(Command::Add),
            "edit" if argument.is_empty() => Err(CommandError::Usage("edit <id>")),
            "edit" => Ok(Command::Edit(VehicleId::from(argument))),
            "remove" | "rm" if argument.is_empty() => Err(CommandError::Usage("remove <id>")),
            "remove" | "rm" => Ok(Command::Remove(VehicleId::from(argument))),
            "help" | "?" => Ok(Command::Help),
            "quit" | "exit" => Ok(Command::Quit),
            other => Err(CommandError::Unknown(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Exit,
}

enum EditOutcome {
    Submit(EditForm),
    Cancel,
    EndOfInput,
}

pub struct Session<R, W> {
    catalog: Catalog,
    terminal: Terminal<R, W>,
}

impl<R, W> Session<R, W>
where
    R: AsyncBufRead + Unpin + Send,
    W: Write + Send,
{
    pub fn new(catalog: Catalog, terminal: Terminal<R, W>) -> Self {
        Self { catalog, terminal }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn into_terminal(self) -> Terminal<R, W> {
        self.terminal
    }

    /// Load the collection, then read and execute commands until `quit` or
    /// end of input.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Input`] when reading input fails.
    pub async fn run(&mut self) -> Result<(), SessionError> {
        self.terminal
            .say("Autovault vehicle catalog. Type `help` for commands.");

        self.dispatch(Event::Refresh).await;

        loop {
            let Some(line) = self.read(PROMPT).await? else {
                break;
            };

            if line.trim().is_empty() {
                continue;
            }

            let flow = match line.parse::<Command>() {
                Ok(command) => self.execute(command).await?,
                Err(error) => {
                    self.terminal.say(error);
                    self.terminal.say(HELP);

                    Flow::Continue
                }
            };

            if flow == Flow::Exit {
                break;
            }
        }

        self.terminal.say("Goodbye.");

        Ok(())
    }

    async fn execute(&mut self, command: Command) -> Result<Flow, SessionError> {
        match command {
            Command::List => {
                let filter = self.catalog.filter_state();
                let heading = if filter.search.is_empty() {
                    format!("Category: {}", filter.category)
                } else {
                    format!("Category: {} | Search: {}", filter.category, filter.search)
                };

                self.terminal.say(heading);
                self.terminal.show_cards();
            }
            Command::Stats => self.terminal.show_statistics(),
            Command::Refresh => self.dispatch(Event::Refresh).await,
            Command::Filter(filter) => self.dispatch(Event::Filter(filter)).await,
            Command::Search(term) => self.dispatch(Event::Search(term)).await,
            Command::Add => {
                let Some(form) = self.read_create_form().await? else {
                    return Ok(Flow::Exit);
                };

                self.dispatch(Event::Submit(form)).await;
            }
            Command::Edit(id) => return self.edit(&id).await,
            Command::Remove(id) => {
                if self.catalog.vehicles().iter().any(|vehicle| vehicle.id == id) {
                    self.dispatch(Event::Delete(id)).await;
                } else {
                    self.terminal.say(format!("No vehicle with id {id}."));
                }
            }
            Command::Help => self.terminal.say(HELP),
            Command::Quit => return Ok(Flow::Exit),
        }

        Ok(Flow::Continue)
    }

    async fn edit(&mut self, id: &VehicleId) -> Result<Flow, SessionError> {
        self.dispatch(Event::OpenEdit(id.clone())).await;

        let Some(form) = self.terminal.editing().cloned() else {
            self.terminal.say(format!("No vehicle with id {id}."));

            return Ok(Flow::Continue);
        };

        match self.read_edit_form(form).await? {
            EditOutcome::Submit(form) => {
                self.dispatch(Event::SubmitEdit(form)).await;

                // A rejected edit cannot stay on screen between commands.
                if self.terminal.editing().is_some() {
                    self.dispatch(Event::CloseEdit).await;
                }

                Ok(Flow::Continue)
            }
            EditOutcome::Cancel => {
                self.dispatch(Event::CloseEdit).await;
                self.terminal.say("Edit cancelled.");

                Ok(Flow::Continue)
            }
            EditOutcome::EndOfInput => {
                self.dispatch(Event::CloseEdit).await;

                Ok(Flow::Exit)
            }
        }
    }

    async fn read_create_form(&mut self) -> Result<Option<VehicleForm>, SessionError> {
        let mut form = VehicleForm::default();

        for (label, field) in [
            ("Make: ", &mut form.make),
            ("Model: ", &mut form.model),
            ("Chassis number: ", &mut form.chassis),
            ("Category (SUV/Sedan/Hatchback/Sub4m): ", &mut form.category),
            ("Year: ", &mut form.year),
            ("Price: ", &mut form.price),
        ] {
            let Some(value) = self.read(label).await? else {
                return Ok(None);
            };

            *field = value;
        }

        Ok(Some(form))
    }

    async fn read_edit_form(&mut self, mut form: EditForm) -> Result<EditOutcome, SessionError> {
        self.terminal.say(format!(
            "Editing {} (chassis {} cannot be changed).",
            form.id, form.chassis
        ));

        for (label, field) in [
            ("Make", &mut form.make),
            ("Model", &mut form.model),
            ("Category", &mut form.category),
            ("Year", &mut form.year),
            ("Price", &mut form.price),
        ] {
            let Some(answer) = self.read(&format!("{label} [{field}]: ")).await? else {
                return Ok(EditOutcome::EndOfInput);
            };

            let answer = answer.trim();

            if answer.eq_ignore_ascii_case("cancel") {
                return Ok(EditOutcome::Cancel);
            }

            if !answer.is_empty() {
                *field = answer.to_string();
            }
        }

        Ok(EditOutcome::Submit(form))
    }

    async fn read(&mut self, label: &str) -> Result<Option<String>, SessionError> {
        self.terminal
            .prompt(label)
            .await
            .map_err(SessionError::Input)
    }

    async fn dispatch(&mut self, event: Event) {
        // Failures have already been logged and shown by the catalog.
        if let Err(error) = self.catalog.handle(event, &mut self.terminal).await {
            debug!("event failed: {error}");
        }
    }
}

impl<R, W> Debug for Session<R, W> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("Session")
            .field("catalog", &self.catalog)
            .field("terminal", &self.terminal)
            .finish()
    }
}
