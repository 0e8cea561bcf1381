//! # Adroit Framework
//!
//! Action-domain-responder components on top of the core router.
//!
//! This layer provides:
//! - [`Action`] and [`Responder`] traits, with blanket implementations for
//!   closures
//! - [`ActionContext`], what an action sees of the current dispatch
//! - [`ComponentRegistry`], the factory map the router probes and the
//!   dispatcher builds from
//! - [`BundleDescriptor`] and the [`bundle!`] macro, plus the [`BUNDLES`]
//!   distributed slice
//! - [`Dispatcher`], which fires [`BEFORE_DISPATCH`] and [`AFTER_DISPATCH`]
//!   around every action

pub mod action;
pub mod bundle;
pub mod context;
pub mod dispatcher;
pub mod error;
pub mod registry;

pub use linkme;

pub use action::{Action, JsonResponder, Responder};
pub use bundle::{BUNDLES, BundleDescriptor, RegisterFn, find_bundle};
pub use context::ActionContext;
pub use dispatcher::{AFTER_DISPATCH, AfterDispatch, BEFORE_DISPATCH, BeforeDispatch, Dispatcher};
pub use error::{DispatchError, DispatchResult, RegistryError, RegistryResult};
pub use registry::{ActionFactory, BundleScope, Component, ComponentRegistry, ResponderFactory};
