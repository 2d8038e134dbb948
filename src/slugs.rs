//! Slug utilities

use rand::Rng;

/// Length of a generated slug
const SLUG_LENGTH: usize = 8;

/// Characters a generated slug is made of
const ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Generate a new random slug
///
/// Not checked against existing entries
pub fn generate() -> String {
    let mut rng = rand::rng();

    (0..SLUG_LENGTH)
        .map(|_| char::from(ALPHABET[rng.random_range(0..ALPHABET.len())]))
        .collect()
}
