//! Convention-based routing.

mod candidate;
mod phase;
mod resolver;
mod route;

pub use candidate::{ACTION_SEGMENT, Candidate, INDEX_SEGMENT, RESPONDER_SEGMENT};
pub use phase::RoutingPhase;
pub use resolver::{DEFAULT_ACTION, LanguageConfig, RouteResolver, split_path};
pub use route::{MatchedRoute, Resolution};
