//! Error types for the to-do application.

use statefold_runtime::StoreError;
use thiserror::Error;

/// An action record could not be decoded or encoded
#[derive(Error, Debug)]
pub enum ActionError {
    /// The record is not valid JSON, lacks a required payload field, has a
    /// payload of the wrong type, or names a filter that does not exist
    #[error("Malformed action: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// A filter name did not match any known filter
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown filter `{0}` (expected all, active or completed)")]
pub struct ParseFilterError(pub String);

/// Failures surfaced by the view layer
#[derive(Error, Debug)]
pub enum ViewError {
    /// The store refused the dispatch
    #[error(transparent)]
    Store(#[from] StoreError),

    /// The id generator has no identifiers left for new items
    #[error("No todo ids left")]
    IdsExhausted,

    /// Writing a frame to the display surface failed
    #[error("Failed to paint surface: {0}")]
    Surface(#[from] std::io::Error),
}

/// A line typed into the demo binary could not be understood
#[derive(Error, Debug)]
pub enum CommandError {
    /// Nothing but whitespace
    #[error("Empty command")]
    Empty,

    /// The first word is not a known command
    #[error("Unknown command `{0}` (try `help`)")]
    UnknownCommand(String),

    /// A command that needs an argument did not get one
    #[error("`{0}` needs an argument")]
    MissingArgument(&'static str),

    /// `toggle` was given something other than a numeric id
    #[error("Invalid todo id `{0}`")]
    InvalidId(String),

    /// `filter` was given an unknown filter name
    #[error(transparent)]
    Filter(#[from] ParseFilterError),

    /// A raw JSON action could not be decoded
    #[error(transparent)]
    Action(#[from] ActionError),
}
