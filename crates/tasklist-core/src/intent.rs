use std::{num::ParseIntError, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::tasks::TaskId;

/// A discrete user event, one per view-model operation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum Intent {
    /// Keystroke in the new-task input.
    SetDraft(String),
    /// Add a task from the given text, or from the current draft when `None`.
    Add(Option<String>),
    Toggle(TaskId),
    Delete(TaskId),
    BeginEdit(TaskId),
    /// Keystroke in the edit input.
    UpdateEditDraft(String),
    CommitEdit,
    Search(String),
}

/// Errors produced while parsing a one-line intent command.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum IntentParseError {
    #[error("empty command")]
    Empty,
    #[error("unknown command: {command}")]
    UnknownCommand { command: String },
    #[error("`{command}` needs a task id")]
    MissingId { command: String },
    #[error("`{command}` got invalid task id `{value}`: {source}")]
    InvalidId {
        command: String,
        value: String,
        source: ParseIntError,
    },
    #[error("`{command}` takes no arguments")]
    UnexpectedArgument { command: String },
}

impl FromStr for Intent {
    type Err = IntentParseError;

    /// Parses commands such as `add Write tests`, `toggle 3`, `search react`.
    /// Text arguments keep their inner whitespace verbatim.
    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        if line.is_empty() {
            return Err(IntentParseError::Empty);
        }
        let (command, rest) = match line.split_once(char::is_whitespace) {
            Some((command, rest)) => (command, rest.trim_start()),
            None => (line, ""),
        };

        let intent = match command {
            "draft" => Intent::SetDraft(rest.to_string()),
            "add" if rest.is_empty() => Intent::Add(None),
            "add" => Intent::Add(Some(rest.to_string())),
            "toggle" => Intent::Toggle(parse_id(command, rest)?),
            "delete" => Intent::Delete(parse_id(command, rest)?),
            "edit" => Intent::BeginEdit(parse_id(command, rest)?),
            "edit-draft" => Intent::UpdateEditDraft(rest.to_string()),
            "commit" if rest.is_empty() => Intent::CommitEdit,
            "commit" => {
                return Err(IntentParseError::UnexpectedArgument {
                    command: command.to_string(),
                })
            }
            "search" => Intent::Search(rest.to_string()),
            other => {
                return Err(IntentParseError::UnknownCommand {
                    command: other.to_string(),
                })
            }
        };
        Ok(intent)
    }
}

fn parse_id(command: &str, raw: &str) -> Result<TaskId, IntentParseError> {
    if raw.is_empty() {
        return Err(IntentParseError::MissingId {
            command: command.to_string(),
        });
    }
    raw.parse::<TaskId>()
        .map_err(|source| IntentParseError::InvalidId {
            command: command.to_string(),
            value: raw.to_string(),
            source,
        })
}
