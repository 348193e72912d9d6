//! Word-level Markov chain text generation library.
//!
//! This crate provides:
//! - Building n-word-prefix frequency tables from text
//! - A flat text format to persist and reload those tables
//! - Frequency-weighted random text generation
//!
//! File helpers stay internal; callers go through `Chain` and `codec`.

/// Chain model, model file codec and generator.
pub mod model;

/// Error type shared by every operation.
pub mod error;

/// I/O utilities (buffered file open/create).
///
/// Not exposed
pub(crate) mod io;

pub use error::ChainError;
pub use model::build_options::{BuildOptions, InputErrorPolicy, WindowPolicy};
pub use model::chain::{BuildReport, Chain, SkippedSource};
pub use model::generator::Generator;
pub use model::prefix::Prefix;
pub use model::state::State;
