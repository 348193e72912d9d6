//! Top-level module for the word-level Markov chain.
//!
//! - Token windows (`Prefix`)
//! - Suffix counts for one prefix (`State`)
//! - The prefix → suffix table and its builders (`Chain`)
//! - The persisted text format (`codec`)
//! - Weighted random text generation (`Generator`)

/// Fixed-length token window used as the table key.
pub mod prefix;

/// Suffix counts observed after a single prefix.
///
/// Tracks outgoing transitions and supports weighted random sampling.
pub mod state;

/// Prefix → suffix count table.
///
/// Handles token ingestion from iterators, readers and files.
pub mod chain;

/// Policies for building from several sources.
pub mod build_options;

/// Reading and writing the model file format.
pub mod codec;

/// Random walks over a chain.
pub mod generator;
