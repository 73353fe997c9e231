//! Core types for SQLNav
//!
//! This crate defines the foundational types shared by the engine and the
//! executor:
//! - Value: Unified value enum for columns, payloads and parameters
//! - Record: Ordered row projection
//! - NavPath: Rooted, separator-normalized path with store-prefix stripping
//! - Verb / Capability / NodeKind: The dispatch vocabulary
//! - ParamSpec / Parameters: Runtime-shaped named inputs
//! - NodeValue: Materialized view of a node
//! - NavError: Error type hierarchy

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod node_value;
pub mod params;
pub mod path;
pub mod record;
pub mod value;
pub mod verb;

pub use error::{NavError, NavResult};
pub use node_value::NodeValue;
pub use params::{ParamSpec, Parameters, ValueKind};
pub use path::{is_addressable, is_wildcard, split_store_prefix, strip_store_prefix, wildcard_match, NavPath};
pub use record::Record;
pub use value::Value;
pub use verb::{Capability, NodeKind, Verb};
