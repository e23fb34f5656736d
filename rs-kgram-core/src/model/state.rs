use indexmap::IndexMap;

use rand::Rng;

use serde::Serialize;

/// Represents a state in a k-gram model.
///
/// A `State` corresponds to a fixed k-character context (`key`) and stores
/// every observed transition from this context to the next character.
///
/// Conceptually, this is a node in a Markov chain where outgoing edges
/// are weighted by their number of observations.
///
/// ## Responsibilities:
/// - Accumulate transition occurrences during construction
/// - Answer per-character and aggregate occurrence counts
/// - Draw the next character using integer inverse-CDF sampling
///
/// ## Invariants
/// - All transitions belong to the same `key`
/// - Each transition occurrence count is strictly positive
/// - Transitions iterate in first-insertion order
#[derive(Serialize, Clone, Debug)]
pub struct State {
	/// Identifier of the state (k-character context).
	key: String,
	/// Outgoing transitions indexed by the next character.
	/// The value represents how many times this transition was observed.
	/// Example: { 'e' => 42, 'a' => 3 }
	transitions: IndexMap<char, usize>,
}

impl State {
	/// Creates a new empty state for the given context.
	pub fn new(key: &str) -> Self {
		Self {
			key: key.to_owned(),
			transitions: IndexMap::new(),
		}
	}

	pub fn key(&self) -> &str {
		&self.key
	}

	/// Records an occurrence of a transition toward `next_char`.
	///
	/// - If the transition already exists, its occurrence count is increased.
	/// - Otherwise, a new transition is appended with an initial count of 1.
	pub fn add_transition(&mut self, next_char: char) {
		*self.transitions.entry(next_char).or_insert(0) += 1;
	}

	/// Sum of all transition counts.
	pub fn total(&self) -> usize {
		self.transitions.values().sum()
	}

	/// Occurrence count of the transition toward `c`, 0 if never observed.
	pub fn count(&self, c: char) -> usize {
		self.transitions.get(&c).copied().unwrap_or(0)
	}

	pub fn is_empty(&self) -> bool {
		self.transitions.is_empty()
	}

	/// Iterates over `(next_char, occurrence)` pairs in insertion order.
	pub fn transitions(&self) -> impl Iterator<Item = (char, usize)> + '_ {
		self.transitions.iter().map(|(c, n)| (*c, *n))
	}

	/// Resolves a draw `r` in `[1, total]` to a character.
	///
	/// Walks the transitions accumulating their counts and returns the first
	/// character whose running sum reaches `r`. Returns `None` when `r` is
	/// past the total mass.
	pub fn pick(&self, r: usize) -> Option<char> {
		pick_cumulative(self.transitions(), r)
	}

	/// Draws the next character with probability proportional to its count.
	///
	/// Returns `None` if the state has no transitions.
	pub fn sample<R: Rng>(&self, rng: &mut R) -> Option<char> {
		let total = self.total();
		if total == 0 {
			return None;
		}
		self.pick(rng.random_range(1..=total))
	}
}

/// Inverse-CDF walk over unnormalized integer weights.
///
/// Shared by the per-state draw and the order-0 draw, which spans every state.
pub(crate) fn pick_cumulative<I>(entries: I, r: usize) -> Option<char>
where
	I: IntoIterator<Item = (char, usize)>,
{
	let mut cumulative = 0;
	for (c, occurrence) in entries {
		cumulative += occurrence;
		if r <= cumulative {
			return Some(c);
		}
	}
	None
}

#[cfg(test)]
mod tests {
	use super::*;
	use rand::SeedableRng;
	use rand::rngs::StdRng;

	fn state(key: &str, chars: &str) -> State {
		let mut s = State::new(key);
		for c in chars.chars() {
			s.add_transition(c);
		}
		s
	}

	#[test]
	fn counts_accumulate() {
		let s = state("ga", "gggag");
		assert_eq!(s.key(), "ga");
		assert_eq!(s.total(), 5);
		assert_eq!(s.count('g'), 4);
		assert_eq!(s.count('a'), 1);
		assert_eq!(s.count('z'), 0);
	}

	#[test]
	fn transitions_keep_insertion_order() {
		let s = state("x", "cabca");
		let order: Vec<char> = s.transitions().map(|(c, _)| c).collect();
		assert_eq!(order, vec!['c', 'a', 'b']);
	}

	#[test]
	fn pick_walks_cumulative_counts() {
		// cumulative: g=2, a=3, c=6
		let s = state("k", "gagccc");
		assert_eq!(s.pick(1), Some('g'));
		assert_eq!(s.pick(2), Some('g'));
		assert_eq!(s.pick(3), Some('a'));
		assert_eq!(s.pick(4), Some('c'));
		assert_eq!(s.pick(6), Some('c'));
		assert_eq!(s.pick(7), None);
	}

	#[test]
	fn empty_state_samples_nothing() {
		let s = State::new("k");
		let mut rng = StdRng::seed_from_u64(1);
		assert!(s.is_empty());
		assert_eq!(s.sample(&mut rng), None);
	}

	#[test]
	fn sample_only_returns_observed_chars() {
		let s = state("k", "aab");
		let mut rng = StdRng::seed_from_u64(7);
		for _ in 0..200 {
			let c = s.sample(&mut rng).unwrap();
			assert!(s.count(c) > 0);
		}
	}
}
