// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors that can occur during domain validation and parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A jurisdiction level string was not `county` or `city`.
    InvalidLevel(String),
    /// A date token could not be parsed in any accepted ADOR format.
    UnparseableDate(String),
    /// A file name did not contain an `MMDDYYYY` date run.
    UnparseableFilename(String),
    /// An `MMDDYYYY` digit run did not form a valid calendar date.
    InvalidCalendarDate(String),
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidLevel(value) => {
                write!(f, "Invalid jurisdiction level: '{value}'")
            }
            Self::UnparseableDate(value) => {
                write!(f, "Cannot parse date: '{value}'")
            }
            Self::UnparseableFilename(name) => {
                write!(f, "Cannot parse effective date from filename: '{name}'")
            }
            Self::InvalidCalendarDate(value) => {
                write!(f, "Digits '{value}' do not form a valid MMDDYYYY date")
            }
        }
    }
}

impl std::error::Error for DomainError {}
