/// Deterministic randomness: seed hashing and the Mulberry32 generator.
///
/// Seeded lines must reproduce bit-for-bit wherever the same algorithm runs,
/// so the arithmetic here is fixed 32-bit wrap-around, never `rand`'s
/// platform-stable-but-different generators.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const FNV_OFFSET_BASIS: u32 = 0x811C_9DC5;
const FNV_PRIME: u32 = 16_777_619;
const MULBERRY_INCREMENT: u32 = 0x6D2B_79F5;
const TWO_POW_32: f64 = 4_294_967_296.0;

/// FNV-1a over the UTF-16 code units of `text`.
pub fn seed_from_text(text: &str) -> u32 {
    text.encode_utf16().fold(FNV_OFFSET_BASIS, |hash, unit| {
        (hash ^ u32::from(unit)).wrapping_mul(FNV_PRIME)
    })
}

/// A zero-argument source of floats in `[0, 1)`.
///
/// Every sampling function takes one of these; seeded and entropy-backed
/// sources are interchangeable.
pub trait RandomSource {
    fn next_f64(&mut self) -> f64;
}

/// Counter-based Mulberry32 generator.
#[derive(Debug, Clone)]
pub struct Mulberry32 {
    state: u32,
}

impl Mulberry32 {
    pub fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    pub fn from_text(text: &str) -> Self {
        Self::new(seed_from_text(text))
    }

    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_add(MULBERRY_INCREMENT);
        let mut r = self.state;
        r = (r ^ (r >> 15)).wrapping_mul(r | 1);
        r ^= r.wrapping_add((r ^ (r >> 7)).wrapping_mul(r | 61));
        r ^ (r >> 14)
    }
}

impl RandomSource for Mulberry32 {
    fn next_f64(&mut self) -> f64 {
        f64::from(self.next_u32()) / TWO_POW_32
    }
}

/// Non-deterministic fallback used when no seed text is given.
#[derive(Debug)]
pub struct EntropySource {
    rng: StdRng,
}

impl EntropySource {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }
}

impl Default for EntropySource {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomSource for EntropySource {
    fn next_f64(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }
}

/// Build the random source for one generation call.
pub fn source_for_seed(seed_text: Option<&str>) -> Box<dyn RandomSource> {
    match seed_text {
        Some(text) if !text.is_empty() => {
            log::debug!("seeded generation (seed hash {:#010x})", seed_from_text(text));
            Box::new(Mulberry32::from_text(text))
        }
        _ => {
            log::debug!("unseeded generation");
            Box::new(EntropySource::new())
        }
    }
}

/// Uniform index into a collection of `len` items. `len` must be non-zero.
pub(crate) fn pick_index(rng: &mut dyn RandomSource, len: usize) -> usize {
    let idx = (rng.next_f64() * len as f64).floor() as usize;
    idx.min(len.saturating_sub(1))
}
