//! Typed errors for section setup.  Scrolling itself never fails.

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum TrackerError {
    #[error("section `{id}`: visibility threshold {value} is outside (0, 1]")]
    InvalidThreshold { id: String, value: f64 },

    #[error("section `{0}` is declared more than once")]
    DuplicateSection(String),
}
