//! Order-k Markov text generation library.
//!
//! This crate provides:
//! - Character-level k-gram models built over a circular view of a text
//! - Frequency queries per kgram and per transition
//! - Weighted random sampling driven by integer counts
//! - Text generation from a seed kgram
//!
//! Lengths are counted in characters (`char`), never in bytes.

/// Error type shared by every fallible operation.
pub mod error;

/// Core k-gram model, sampling and generation logic.
pub mod model;

pub use error::WriterError;
pub use model::kgram_model::KGramModel;
pub use model::rand_writer::RandWriter;
