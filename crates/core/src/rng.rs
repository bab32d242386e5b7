//! RNG module - injected piece selection
//!
//! The session never reaches for ambient randomness. Every command that can
//! spawn a piece takes a [`PieceSource`], so callers decide between a seeded
//! generator for play and a scripted sequence for deterministic tests and
//! replays.

use crate::types::PieceKind;

/// Source of the next piece kind to spawn.
pub trait PieceSource {
    fn next_kind(&mut self) -> PieceKind;
}

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce a short cycle
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    ///
    /// Scales by the high bits; the low bits of this LCG cycle with short
    /// periods and would skew a plain modulo.
    pub fn next_range(&mut self, max: u32) -> u32 {
        ((self.next_u32() as u64 * max as u64) >> 32) as u32
    }
}

impl Default for SimpleRng {
    fn default() -> Self {
        Self::new(1)
    }
}

impl PieceSource for SimpleRng {
    /// Uniform choice over the seven kinds
    fn next_kind(&mut self) -> PieceKind {
        PieceKind::ALL[self.next_range(PieceKind::ALL.len() as u32) as usize]
    }
}

/// Replays a fixed list of kinds, cycling when exhausted.
#[derive(Debug, Clone)]
pub struct ScriptedSource {
    kinds: Vec<PieceKind>,
    index: usize,
}

impl ScriptedSource {
    /// An empty script behaves like `[PieceKind::I]`.
    pub fn new(kinds: impl IntoIterator<Item = PieceKind>) -> Self {
        let mut kinds: Vec<PieceKind> = kinds.into_iter().collect();
        if kinds.is_empty() {
            kinds.push(PieceKind::I);
        }
        Self { kinds, index: 0 }
    }

    /// Always the same kind
    pub fn repeat(kind: PieceKind) -> Self {
        Self::new([kind])
    }

    /// Number of kinds handed out so far
    pub fn drawn(&self) -> usize {
        self.index
    }
}

impl PieceSource for ScriptedSource {
    fn next_kind(&mut self) -> PieceKind {
        let kind = self.kinds[self.index % self.kinds.len()];
        self.index += 1;
        kind
    }
}

impl<S: PieceSource + ?Sized> PieceSource for &mut S {
    fn next_kind(&mut self) -> PieceKind {
        (**self).next_kind()
    }
}
