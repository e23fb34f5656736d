use std::fmt;

use crate::error::WriterError;
use crate::model::kgram_model::KGramModel;
use crate::model::state::{State, pick_cumulative};
use log::{debug, trace};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// High-level text writer driving an order-k model.
///
/// # Responsibilities
/// - Own a built `KGramModel` and the random generator used to sample it
/// - Draw the next character of a kgram by weighted sampling
/// - Generate text of an exact length from a seed kgram
///
/// The generator is advanced by every draw, so sampling takes `&mut self`.
/// Share a `RandWriter` across threads only behind a lock.
#[derive(Debug)]
pub struct RandWriter {
	model: KGramModel,
	rng: StdRng,
}

impl RandWriter {
	/// Builds a writer seeded from the operating system's entropy source.
	///
	/// # Errors
	/// Same as `KGramModel::new`.
	pub fn new(text: &str, order: usize) -> Result<Self, WriterError> {
		Ok(Self::from_model(KGramModel::new(text, order)?, StdRng::from_os_rng()))
	}

	/// Builds a writer with a fixed seed; two writers built from the same
	/// text, order and seed produce the same draws.
	pub fn with_seed(text: &str, order: usize, seed: u64) -> Result<Self, WriterError> {
		Ok(Self::from_model(KGramModel::new(text, order)?, StdRng::seed_from_u64(seed)))
	}

	pub fn from_model(model: KGramModel, rng: StdRng) -> Self {
		Self { model, rng }
	}

	pub fn model(&self) -> &KGramModel {
		&self.model
	}

	/// Returns the order `k` of the underlying model.
	pub fn order(&self) -> usize {
		self.model.order()
	}

	pub fn alphabet(&self) -> &str {
		self.model.alphabet()
	}

	/// See `KGramModel::total_frequency`.
	pub fn total_frequency(&self, kgram: &str) -> Result<usize, WriterError> {
		self.model.total_frequency(kgram)
	}

	/// See `KGramModel::frequency`.
	pub fn frequency(&self, kgram: &str, c: char) -> Result<usize, WriterError> {
		self.model.frequency(kgram, c)
	}

	/// Draws a character following `kgram`, proportionally to its count.
	///
	/// With order 0 the kgram is ignored and the draw covers every character
	/// of the source.
	///
	/// # Errors
	/// - `KgramLengthMismatch` if the kgram length differs from `k` (k > 0).
	/// - `UnknownKgram` if the kgram was never observed or has no transitions.
	pub fn sample(&mut self, kgram: &str) -> Result<char, WriterError> {
		if self.model.order() == 0 {
			return self.sample_bag();
		}
		self.model.check_kgram(kgram)?;

		let state = match self.model.state(kgram) {
			Some(state) if !state.is_empty() => state,
			_ => return Err(WriterError::UnknownKgram(kgram.to_owned())),
		};

		let next_char = state
			.sample(&mut self.rng)
			.ok_or_else(|| WriterError::UnknownKgram(kgram.to_owned()))?;
		trace!("sample {:?} -> {:?}", kgram, next_char);
		Ok(next_char)
	}

	/// Order-0 draw: a cumulative walk across every transition of every state.
	fn sample_bag(&mut self) -> Result<char, WriterError> {
		let total: usize = self.model.kgrams().map(State::total).sum();
		if total == 0 {
			return Err(WriterError::UnknownKgram(String::new()));
		}

		let r = self.rng.random_range(1..=total);
		let entries = self.model.kgrams().flat_map(State::transitions);
		let next_char = pick_cumulative(entries, r).ok_or(WriterError::UnknownKgram(String::new()))?;
		trace!("sample bag: r={} -> {:?}", r, next_char);
		Ok(next_char)
	}

	/// Generates a string of exactly `length` characters starting with `seed`.
	///
	/// Each step takes the last `k` characters generated so far as the
	/// context and appends one sampled character, so `length - k` draws are
	/// made in total.
	///
	/// # Errors
	/// - `OrderZeroUnsupported` if `k == 0`.
	/// - `KgramLengthMismatch` if `seed` is not exactly `k` characters.
	/// - `LengthTooShort` if `length < k`.
	/// - `UnknownKgram` if a context along the way has no transitions.
	pub fn generate(&mut self, seed: &str, length: usize) -> Result<String, WriterError> {
		let order = self.model.order();
		if order == 0 {
			return Err(WriterError::OrderZeroUnsupported);
		}
		self.model.check_kgram(seed)?;
		if length < order {
			return Err(WriterError::LengthTooShort { length, order });
		}

		debug!("generate {} chars from seed {:?}", length, seed);

		let mut result: Vec<char> = seed.chars().collect();
		result.reserve(length - order);
		while result.len() < length {
			let kgram: String = result[result.len() - order..].iter().collect();
			let next_char = self.sample(&kgram)?;
			result.push(next_char);
		}

		Ok(result.into_iter().collect())
	}
}

impl fmt::Display for RandWriter {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		fmt::Display::fmt(&self.model, f)
	}
}
