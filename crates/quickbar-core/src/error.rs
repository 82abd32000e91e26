use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RowError {
    #[error("row already holds the maximum of {max} buttons")]
    CapacityExceeded { max: usize },
    #[error("no button at index {0}")]
    UnknownButton(usize),
    #[error("button {button} has no sub-menu entry at index {entry}")]
    UnknownEntry { button: usize, entry: usize },
}
