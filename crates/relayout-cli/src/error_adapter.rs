//! Error adapter for converting RelayoutError to miette diagnostics.
//!
//! This module provides the bridge between the library's standard error type
//! and miette's rich diagnostic formatting used in the CLI.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan};

use relayout::RelayoutError;

/// Adapter rendering a [`RelayoutError`] through miette.
pub struct ErrorAdapter<'a>(pub &'a RelayoutError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        std::error::Error::source(self.0)
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match &self.0 {
            RelayoutError::Io(_) => "relayout::io",
            RelayoutError::Convert(_) => "relayout::convert",
            RelayoutError::Layout(_) => "relayout::layout",
            RelayoutError::Serialization(_) => "relayout::serialization",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let help = match &self.0 {
            RelayoutError::Convert(_) => "every node, edge and label in a snapshot needs its own id",
            RelayoutError::Serialization(_) => {
                "snapshots are JSON objects with `id`, `nodes` and `edges`; changes hold `moved`, `resized` and `startingPosition`"
            }
            RelayoutError::Io(_) | RelayoutError::Layout(_) => return None,
        };
        Some(Box::new(help))
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        None
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        None
    }
}
