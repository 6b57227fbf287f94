//! Token-aware query input core.
//!
//! A chat query may contain bracketed placeholder tokens such as
//! `[Business Head]`, `[OEM]` or the generic `[Name]`. This module owns
//! everything needed to work with them:
//!
//! - `segment`: splits an input string into an ordered, loss-free list of
//!   text and token segments.
//! - `role`: the closed set of semantic roles a token can denote, plus the
//!   ordered keyword table used for direct mapping.
//! - `resolver`: decides which role a clicked token refers to, including the
//!   context-sensitive disambiguation of `[Name]`.
//! - `applier`: substitutes a chosen value for exactly one token occurrence
//!   in the live input string.
//! - `catalog`: the per-role candidate lists offered by the picker, with
//!   dataset-derived lists taking precedence over the static fallback.
//!
//! Everything here is synchronous and pure: no state is carried between
//! calls, and no function panics on malformed input.

pub mod applier;
pub mod catalog;
pub mod resolver;
pub mod role;
pub mod segment;

pub use applier::apply_selection;
pub use catalog::Catalog;
pub use resolver::resolve;
pub use role::Role;
pub use segment::{parse, token_ordinal, Segment, SegmentKind};
