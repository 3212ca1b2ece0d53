//! Line-oriented shell around the session
//!
//! Plays the part of the UI shell: every line is either digits for the
//! entry field or a `:command`. The shell subscribes to the session's
//! results and redraws the screen whenever a new one has been applied.

use std::cell::Cell;
use std::io::{self, BufRead, Write};
use std::rc::Rc;
use std::time::Duration;

use thiserror::Error;
use tracing::{debug, warn};

use crate::app::session::{SessionState, SubscriptionId};
use crate::domain::base::{TargetBase, UnknownBase};
use crate::domain::input::InputError;
use crate::ui::view::{Orientation, ScreenView};

/// How long to wait for a recomputation before drawing anyway
pub const SETTLE_TIMEOUT: Duration = Duration::from_secs(1);

pub const HELP: &str = "\
Commands:
  <digits>        set the number (at most 9 digits)
  :dec :hex :oct :bin
  :base <name>    select the target base (name, alias or radix)
  :clear          empty the input
  :help           show this help
  :q, :quit       exit";

/// One parsed shell line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Raw entry text; validated by the session
    Input(String),
    Base(TargetBase),
    Clear,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("Unknown command ':{0}', try :help")]
    UnknownCommand(String),
    #[error("Missing base name after :base")]
    MissingBase,
    #[error(transparent)]
    UnknownBase(#[from] UnknownBase),
    #[error(transparent)]
    Input(#[from] InputError),
}

impl Command {
    /// Parses a line; surrounding whitespace is ignored
    pub fn parse(line: &str) -> Result<Self, CommandError> {
        let line = line.trim();

        let Some(rest) = line.strip_prefix(':') else {
            return Ok(Command::Input(line.to_string()));
        };

        let mut words = rest.split_whitespace();
        let name = words.next().unwrap_or_default().to_ascii_lowercase();
        match name.as_str() {
            "q" | "quit" => Ok(Command::Quit),
            "help" | "h" => Ok(Command::Help),
            "clear" => Ok(Command::Clear),
            "base" => {
                let base = words.next().ok_or(CommandError::MissingBase)?;
                Ok(Command::Base(base.parse()?))
            }
            other => other
                .parse::<TargetBase>()
                .map(Command::Base)
                .map_err(|_| CommandError::UnknownCommand(other.to_string())),
        }
    }
}

/// Interactive loop over any line source and sink
///
/// Holds a result subscription for its whole lifetime and drops it again
/// when the shell goes away.
pub struct Shell<'a> {
    session: &'a mut SessionState,
    orientation: Orientation,
    /// Set by the observer when a new result was applied
    dirty: Rc<Cell<bool>>,
    subscription: SubscriptionId,
}

impl<'a> Shell<'a> {
    pub fn new(session: &'a mut SessionState, orientation: Orientation) -> Self {
        let dirty = Rc::new(Cell::new(false));
        let dirty_ref = Rc::clone(&dirty);
        let subscription = session.subscribe(move |_| dirty_ref.set(true));

        Self {
            session,
            orientation,
            dirty,
            subscription,
        }
    }

    /// Current screen drawn as text
    pub fn screen(&self) -> String {
        ScreenView::build(&self.session.snapshot(), self.orientation).render_text()
    }

    /// Runs until `:quit` or end of input
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, output: &mut W) -> io::Result<()> {
        writeln!(output, "{}", self.screen())?;

        for line in input.lines() {
            let line = line?;
            debug!(line = %line, "shell line");

            let command = match Command::parse(&line) {
                Ok(command) => command,
                Err(err) => {
                    writeln!(output, "{err}")?;
                    continue;
                }
            };

            match command {
                Command::Quit => break,
                Command::Help => writeln!(output, "{HELP}")?,
                command => {
                    if let Err(err) = self.execute(command) {
                        writeln!(output, "{err}")?;
                        continue;
                    }
                    self.redraw(output)?;
                }
            }
        }

        output.flush()
    }

    /// Waits for the scheduled recomputations and draws if a result arrived
    fn redraw<W: Write>(&mut self, output: &mut W) -> io::Result<()> {
        if !self.session.wait_settled(SETTLE_TIMEOUT) {
            warn!(pending = self.session.pending(), "session did not settle in time");
        }

        if self.dirty.replace(false) {
            writeln!(output, "{}", self.screen())?;
        } else {
            warn!("no new result to draw");
        }
        Ok(())
    }

    /// Applies a state-changing command to the session
    fn execute(&mut self, command: Command) -> Result<(), CommandError> {
        match command {
            Command::Input(text) => self.session.set_input(&text)?,
            Command::Base(base) => self.session.set_base(base),
            Command::Clear => self.session.set_input("")?,
            Command::Help | Command::Quit => {}
        }
        Ok(())
    }
}

impl Drop for Shell<'_> {
    fn drop(&mut self) {
        self.session.unsubscribe(self.subscription);
    }
}
