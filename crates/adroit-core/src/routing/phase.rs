//! Routing phase state machine.

use std::fmt;

/// Which synthetic segment the backtracking search is currently trying.
///
/// The phase also decides how many trailing raw segments are consumed by
/// the handler identifier and how many become parameters: parameters start
/// at `len(candidate) - phase as usize`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum RoutingPhase {
    /// The candidate is checked as-is; its last raw segment is the action.
    Index = 1,
    /// An HTTP-verb segment (`GetMethod`) is appended to the candidate.
    Method = 2,
    /// An `Index` segment is appended to the candidate.
    Action = 3,
}

impl RoutingPhase {
    /// Returns the phase that follows this one, wrapping after `Action`.
    pub const fn next(self) -> Self {
        match self {
            Self::Index => Self::Method,
            Self::Method => Self::Action,
            Self::Action => Self::Index,
        }
    }

    /// Returns the numeric value of the phase (1, 2 or 3).
    pub const fn value(self) -> usize {
        self as usize
    }
}

impl fmt::Display for RoutingPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Index => "index",
            Self::Method => "method",
            Self::Action => "action",
        };
        f.write_str(name)
    }
}
