//! Defines the error types for dashboard definition checks.
use crate::store::Value;
use thiserror::Error;

/// A defect in the static dashboard definition. Fatal at startup.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error("control '{control}' is declared more than once")]
    DuplicateControl { control: String },
    #[error("control '{control}' has an empty domain")]
    EmptyDomain { control: String },
    #[error("default value '{value}' of control '{control}' is outside its domain")]
    DefaultOutsideDomain { control: String, value: Value },
    #[error("rule '{output}' references undeclared control '{control}'")]
    UndeclaredControl { output: String, control: String },
    #[error("rule '{output}' has no inputs")]
    NoInputs { output: String },
    #[error("output '{output}' is produced more than once")]
    DuplicateOutput { output: String },
    #[error("tab '{tab}' is declared more than once")]
    DuplicateTab { tab: String },
    #[error("tab '{tab}' claims undeclared control '{control}'")]
    UnknownTabControl { tab: String, control: String },
    #[error("tab '{tab}' places unknown output '{output}'")]
    UnknownTabOutput { tab: String, output: String },
    #[error("control '{control}' is owned by both '{first}' and '{second}'")]
    SharedControl { control: String, first: String, second: String },
    #[error("output '{output}' is placed on both '{first}' and '{second}'")]
    SharedOutput { output: String, first: String, second: String },
    #[error("output '{output}' is not placed on any tab")]
    UnplacedOutput { output: String },
    #[error("rule '{output}' on tab '{tab}' reads control '{control}' owned by another tab")]
    ForeignInput { output: String, tab: String, control: String },
}
