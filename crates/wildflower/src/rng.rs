//! Randomness sources for plant generation.
//!
//! Generation never calls a global generator. Every component takes a
//! `&mut dyn RandomSource`, so production code can plug in a seeded LCG
//! (or an OS-seeded generator from the CLI) and tests can replay an exact
//! sequence of values.

/// A capability yielding uniform floats.
///
/// Implementors only provide [`RandomSource::next_f64`]; the helpers each
/// consume exactly one draw.
pub trait RandomSource {
    /// Next value in `[0, 1)`.
    fn next_f64(&mut self) -> f64;

    /// Uniform value in `[min, max)`.
    #[inline]
    fn uniform(&mut self, min: f64, max: f64) -> f64 {
        min + self.next_f64() * (max - min)
    }

    /// `true` with the given probability.
    #[inline]
    fn chance(&mut self, probability: f64) -> bool {
        self.next_f64() < probability
    }

    /// Index in `[0, len)`.
    #[inline]
    fn index(&mut self, len: usize) -> usize {
        assert!(len > 0, "cannot pick an index from an empty range");
        ((self.next_f64() * len as f64) as usize).min(len - 1)
    }
}

/// A fast, deterministic pseudo-random number generator.
///
/// Uses a Linear Congruential Generator (LCG) with parameters from
/// Numerical Recipes.
///
/// # Example
/// ```
/// use wildflower::rng::{RandomSource, Rng};
///
/// let mut rng = Rng::new(12345);
/// let value = rng.next_f64(); // Returns value in [0, 1)
/// assert!((0.0..1.0).contains(&value));
/// ```
#[derive(Clone)]
pub struct Rng {
    state: u64,
}

impl Rng {
    /// Create a new RNG with the given seed.
    ///
    /// The same seed will always produce the same sequence of numbers.
    #[inline]
    pub fn new(seed: u64) -> Self {
        Self { state: seed.wrapping_add(1) }
    }

    /// Get the next raw u64 value.
    #[inline]
    pub fn next_u64(&mut self) -> u64 {
        self.state = self.state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.state
    }
}

impl RandomSource for Rng {
    #[inline]
    fn next_f64(&mut self) -> f64 {
        // High bits have the better distribution
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }
}

impl Default for Rng {
    fn default() -> Self {
        Self::new(0)
    }
}

/// Replays a fixed list of values, wrapping around at the end.
///
/// Values are returned verbatim, so a script may contain `1.0` to pin a
/// range to its upper end.
#[derive(Debug, Clone)]
pub struct Scripted {
    values: Vec<f64>,
    cursor: usize,
    draws: usize,
}

impl Scripted {
    /// # Panics
    /// Panics if `values` is empty.
    pub fn new(values: Vec<f64>) -> Self {
        assert!(!values.is_empty(), "scripted source needs at least one value");
        Self { values, cursor: 0, draws: 0 }
    }

    /// A script that always yields `value`.
    pub fn constant(value: f64) -> Self {
        Self::new(vec![value])
    }

    /// Total number of values handed out so far.
    pub fn draws(&self) -> usize {
        self.draws
    }
}

impl RandomSource for Scripted {
    fn next_f64(&mut self) -> f64 {
        let value = self.values[self.cursor];
        self.cursor = (self.cursor + 1) % self.values.len();
        self.draws += 1;
        value
    }
}
