//! Short code generation.
//!
//! The generator is a trait seam so tests can substitute a fixed or sequenced
//! implementation and drive the collision retry loop deterministically.

use rand::Rng;

/// Alphabet for short codes: 62 alphanumeric characters.
pub const ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Default length of generated codes.
pub const DEFAULT_CODE_LENGTH: usize = 8;

/// Produces candidate short codes.
///
/// Implementations are pure generators without side effects or shared mutable
/// state; they never consult storage, so a returned candidate may collide with
/// an existing code. Callers handle collisions via
/// [`crate::domain::repositories::MappingStore::try_insert`].
#[cfg_attr(test, mockall::automock)]
pub trait CodeGenerator: Send + Sync {
    /// Returns a fresh candidate code.
    fn generate(&self) -> String;
}

/// Uniformly random code generator over [`ALPHABET`].
///
/// Uses `rand`'s thread-local RNG, so concurrent callers never contend on
/// shared state.
pub struct RandomCodeGenerator {
    length: usize,
}

impl RandomCodeGenerator {
    pub fn new(length: usize) -> Self {
        Self { length }
    }
}

impl Default for RandomCodeGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_CODE_LENGTH)
    }
}

impl CodeGenerator for RandomCodeGenerator {
    fn generate(&self) -> String {
        let mut rng = rand::rng();
        (0..self.length)
            .map(|_| {
                let idx = rng.random_range(0..ALPHABET.len());
                ALPHABET[idx] as char
            })
            .collect()
    }
}
