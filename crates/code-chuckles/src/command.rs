//! Parsing of the lines typed at the prompt.
//!
//! Lines starting with a known `/command` drive the settings panel,
//! anything else is a chat submission, so `/dev/null jokes` asks for a
//! joke.

use std::error::Error as StdError;
use std::fmt::{self, Display};

use code_chuckles_core::settings::{Model, SettingsError, Temperature};

/// A parsed input line.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Ask the bot for a joke.
    Chat(String),
    /// List the selectable models.
    ListModels,
    /// Select a model.
    SetModel(Model),
    /// Move the temperature slider.
    SetTemperature(TemperatureChange),
    /// Empty the transcript.
    Clear,
    /// Show the available commands.
    Help,
    /// End the session.
    Quit,
}

/// How the temperature slider should move.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TemperatureChange {
    /// Jump to a value.
    To(Temperature),
    /// One step up.
    Up,
    /// One step down.
    Down,
}

impl TemperatureChange {
    /// Applies the change to `current`.
    #[inline]
    pub fn apply(self, current: Temperature) -> Temperature {
        match self {
            TemperatureChange::To(temperature) => temperature,
            TemperatureChange::Up => current.step_up(),
            TemperatureChange::Down => current.step_down(),
        }
    }
}

/// Error returned for a line that is not a valid command.
#[derive(Clone, Debug, PartialEq)]
pub enum CommandError {
    /// The line was blank.
    Empty,
    /// The command needs an argument.
    MissingArgument(&'static str),
    /// The argument was rejected.
    InvalidSetting(SettingsError),
}

impl Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandError::Empty => f.write_str("nothing to send"),
            CommandError::MissingArgument(usage) => {
                write!(f, "usage: {usage}")
            }
            CommandError::InvalidSetting(err) => Display::fmt(err, f),
        }
    }
}

impl StdError for CommandError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            CommandError::InvalidSetting(err) => Some(err),
            _ => None,
        }
    }
}

impl From<SettingsError> for CommandError {
    #[inline]
    fn from(err: SettingsError) -> Self {
        CommandError::InvalidSetting(err)
    }
}

/// Usage lines shown by `/help`.
pub const USAGE: &[(&str, &str)] = &[
    ("/model [gpt-4|gpt-3.5-turbo]", "choose the model for joke generation"),
    ("/temperature <0.2..1.2|+|->", "set the humor randomness"),
    ("/clear", "clear the chat"),
    ("/help", "show this help"),
    ("/quit", "leave"),
];

/// Parses one input line.
pub fn parse(line: &str) -> Result<Command, CommandError> {
    let line = line.trim();
    if line.is_empty() {
        return Err(CommandError::Empty);
    }
    let chat = || Ok(Command::Chat(line.to_owned()));
    let Some(command) = line.strip_prefix('/') else {
        return chat();
    };

    let (name, arg) = match command.split_once(char::is_whitespace) {
        Some((name, arg)) => (name, arg.trim()),
        None => (command, ""),
    };
    match name.to_ascii_lowercase().as_str() {
        "model" if arg.is_empty() => Ok(Command::ListModels),
        "model" => Ok(Command::SetModel(arg.parse()?)),
        "temperature" | "temp" => {
            let change = match arg {
                "" => {
                    return Err(CommandError::MissingArgument(
                        "/temperature <0.2..1.2|+|->",
                    ));
                }
                "+" => TemperatureChange::Up,
                "-" => TemperatureChange::Down,
                value => TemperatureChange::To(value.parse()?),
            };
            Ok(Command::SetTemperature(change))
        }
        "clear" => Ok(Command::Clear),
        "help" | "?" => Ok(Command::Help),
        "quit" | "exit" => Ok(Command::Quit),
        _ => chat(),
    }
}
