//! Line commands understood by the interactive binary.

use crate::error::CommandError;
use crate::types::{TodoAction, TodoId, VisibilityFilter};

/// One parsed input line
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// `add <text>`: submit new item text (everything after `add `, untrimmed)
    Add(String),
    /// `toggle <id>`: click an item
    Toggle(TodoId),
    /// `filter <all|active|completed>`: click a footer link
    Filter(VisibilityFilter),
    /// A raw JSON action record, dispatched as is
    Dispatch(TodoAction),
    /// `help`
    Help,
    /// `quit` or `exit`
    Quit,
}

/// Help text printed by `help`
pub const HELP: &str = "\
Commands:
  add <text>                     add a todo
  toggle <id>                    toggle a todo
  filter <all|active|completed>  choose which todos are shown
  {\"type\": ...}                  dispatch a raw action record
  help                           show this help
  quit                           leave";

impl std::str::FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim_end_matches(['\r', '\n']);
        let trimmed = line.trim_start();

        if trimmed.is_empty() {
            return Err(CommandError::Empty);
        }

        if trimmed.starts_with('{') {
            return Ok(Self::Dispatch(TodoAction::from_json(trimmed)?));
        }

        let (word, rest) = trimmed.split_once(' ').unwrap_or((trimmed, ""));

        match word {
            "add" if rest.is_empty() => Err(CommandError::MissingArgument("add")),
            "add" => Ok(Self::Add(rest.to_string())),
            "toggle" => {
                let arg = rest.trim();
                if arg.is_empty() {
                    return Err(CommandError::MissingArgument("toggle"));
                }
                arg.trim_start_matches('#')
                    .parse::<u64>()
                    .map(|id| Self::Toggle(TodoId::new(id)))
                    .map_err(|_| CommandError::InvalidId(arg.to_string()))
            }
            "filter" if rest.trim().is_empty() => Err(CommandError::MissingArgument("filter")),
            "filter" => Ok(Self::Filter(rest.parse()?)),
            "help" | "?" => Ok(Self::Help),
            "quit" | "exit" => Ok(Self::Quit),
            other => Err(CommandError::UnknownCommand(other.to_string())),
        }
    }
}
