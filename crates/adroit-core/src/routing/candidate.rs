//! Candidate identifiers and the backtracking step.
//!
//! A [`Candidate`] is an immutable snapshot of one step of the search:
//!
//! ```text
//! [namespace…, "Action", Segment…, (GetMethod | Index)?]
//!              ^ marker
//! ```
//!
//! [`Candidate::next`] produces the following step without touching the
//! current one, so every step of a search can be inspected on its own.

use crate::bundle::NAMESPACE_SEPARATOR;

use super::phase::RoutingPhase;

/// Segment inserted after the namespace for handler identifiers.
pub const ACTION_SEGMENT: &str = "Action";

/// Segment that replaces [`ACTION_SEGMENT`] for presenter identifiers.
pub const RESPONDER_SEGMENT: &str = "Responder";

/// Segment appended when trying a namespace's default action.
pub const INDEX_SEGMENT: &str = "Index";

/// One step of the backtracking search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    segments: Vec<String>,
    marker: usize,
    phase: RoutingPhase,
}

impl Candidate {
    /// Creates the first candidate of a search.
    ///
    /// `namespace` is the bundle's namespace segments and `path` the
    /// camelized path segments that remain after the bundle segment.
    pub fn new<N, P>(namespace: N, path: P) -> Self
    where
        N: IntoIterator,
        N::Item: Into<String>,
        P: IntoIterator,
        P::Item: Into<String>,
    {
        let mut segments: Vec<String> = namespace.into_iter().map(Into::into).collect();
        let marker = segments.len();
        segments.push(ACTION_SEGMENT.to_string());
        segments.extend(path.into_iter().map(Into::into));

        Self {
            segments,
            marker,
            phase: RoutingPhase::Index,
        }
    }

    /// Returns the candidate segments.
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Returns the number of segments.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Returns `true` if there are no segments.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Returns the phase this candidate is checked in.
    pub fn phase(&self) -> RoutingPhase {
        self.phase
    }

    /// Returns `true` while the candidate still names something below the
    /// `Action` namespace (at least one segment after the marker).
    pub fn is_viable(&self) -> bool {
        self.segments.len() >= self.marker + 2
    }

    /// Returns the handler identifier, e.g. `App\Action\Blog\PostAction`.
    pub fn controller_id(&self) -> String {
        let mut id = self.segments.join(&NAMESPACE_SEPARATOR.to_string());
        id.push_str(ACTION_SEGMENT);
        id
    }

    /// Returns the presenter identifier, e.g. `App\Responder\Blog\PostResponder`.
    pub fn presenter_id(&self) -> String {
        let mut segments = self.segments.clone();
        if let Some(marker) = segments.get_mut(self.marker) {
            *marker = RESPONDER_SEGMENT.to_string();
        }
        let mut id = segments.join(&NAMESPACE_SEPARATOR.to_string());
        id.push_str(RESPONDER_SEGMENT);
        id
    }

    /// Returns the action token for a match on this candidate.
    ///
    /// `raw` must be the raw segments aligned with this search (namespace
    /// segments followed by the raw path segments, sentinel included).
    pub fn action_token(&self, raw: &[String], method_token: &str) -> String {
        if self.phase == RoutingPhase::Method {
            return method_token.to_string();
        }
        self.segments
            .len()
            .checked_sub(2)
            .and_then(|i| raw.get(i))
            .cloned()
            .unwrap_or_default()
    }

    /// Returns the positional parameters for a match on this candidate.
    ///
    /// The trailing sentinel of `raw` is never included.
    pub fn params(&self, raw: &[String]) -> Vec<String> {
        let end = raw.len().saturating_sub(1);
        let start = self
            .segments
            .len()
            .saturating_sub(self.phase.value())
            .min(end);
        raw[start..end].to_vec()
    }

    /// Returns the next step of the search.
    ///
    /// The last segment is dropped, then a synthetic segment is appended
    /// depending on the phase being left: the method token after `Index`,
    /// `Index` after `Method`, nothing after `Action`.
    pub fn next(&self, method_token: &str) -> Self {
        let mut segments = self.segments.clone();
        segments.pop();

        match self.phase {
            RoutingPhase::Index => segments.push(method_token.to_string()),
            RoutingPhase::Method => segments.push(INDEX_SEGMENT.to_string()),
            RoutingPhase::Action => {}
        }

        Self {
            segments,
            marker: self.marker,
            phase: self.phase.next(),
        }
    }

    /// Iterates over this candidate and every following viable step.
    pub fn backtrack(self, method_token: &str) -> impl Iterator<Item = Candidate> + '_ {
        std::iter::successors(Some(self), move |c| Some(c.next(method_token)))
            .take_while(Candidate::is_viable)
    }
}
