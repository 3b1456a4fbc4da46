//! The PDT command language.
//!
//! - [`parser`] tokenizes `<Op><Mode><values>` command lines
//! - [`router`] validates a command against the selection, runs the solvers
//!   and builds a [`Mutation`]
//! - [`mutation`] defines the changes handed to the host's [`MutationSink`]
//! - [`maths`] evaluates expressions for the `M` operation

#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::module_name_repetitions)]

pub mod maths;
pub mod mutation;
pub mod operation;
pub mod parser;
pub mod router;

pub use mutation::{Fillet, FilletTarget, Mutation, MutationSink, SplitPlacement};
pub use operation::{FilletMode, MathsTarget, Mode, Operation, PlacementKind};
pub use parser::{parse, Command, Parsed, Special};
pub use router::{commit, execute, Action, Router, HELP};

#[cfg(test)]
mod tests;
