//! Temporary identifiers for `LET` bindings.

use rand::Rng;

const CHARSET: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";
const IDENT_LEN: usize = 10;

/// Source of binding names. Names must be valid AQL identifiers.
///
/// The compiler redraws names it has already issued or that equal the loop variable
/// or a path root, and fails after a bounded number of draws, so a generator must
/// keep producing new names.
pub trait IdentGenerator {
    fn next_ident(&mut self) -> String;
}

/// Random ASCII-letter names drawn from the thread-local RNG.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomIdents;

impl IdentGenerator for RandomIdents {
    fn next_ident(&mut self) -> String {
        let mut rng = rand::rng();
        (0..IDENT_LEN)
            .map(|_| char::from(CHARSET[rng.random_range(0..CHARSET.len())]))
            .collect()
    }
}

/// Deterministic `<prefix><n>` names.
#[derive(Debug, Clone)]
pub struct SequentialIdents {
    prefix: String,
    next: usize,
}

impl SequentialIdents {
    #[must_use]
    pub fn new(prefix: impl Into<String>) -> Self {
        Self { prefix: prefix.into(), next: 0 }
    }
}

impl Default for SequentialIdents {
    fn default() -> Self {
        Self::new("tmp")
    }
}

impl IdentGenerator for SequentialIdents {
    fn next_ident(&mut self) -> String {
        let id = format!("{}{}", self.prefix, self.next);
        self.next += 1;
        id
    }
}
