//! Top-level module for the k-gram text writer.
//!
//! This module provides an order-k character Markov model, including:
//! - The transition table and frequency queries (`KGramModel`)
//! - Per-context transition counts (`State`)
//! - Weighted sampling and text generation (`RandWriter`)

/// Fixed-order k-gram model (`k >= 0`).
///
/// Handles construction from a circularized source text,
/// transition counting, frequency queries and display.
pub mod kgram_model;

/// Sampling and generation on top of a `KGramModel`.
///
/// Owns the random generator; reproducible when built with a fixed seed.
pub mod rand_writer;

/// Transitions out of a single k-character context.
///
/// Tracks outgoing counts and resolves integer draws to characters.
pub mod state;
