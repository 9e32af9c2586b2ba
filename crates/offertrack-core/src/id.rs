//! Opaque identifier generation.
//!
//! IDs are a short prefix plus six random base36 characters, e.g. `of-x7k2m9`.
//! They are never parsed; the prefix only helps humans tell record kinds apart
//! in JSON dumps and CLI output.

use rand::Rng;

const ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const SUFFIX_LEN: usize = 6;

fn random_suffix() -> String {
    let mut rng = rand::thread_rng();
    (0..SUFFIX_LEN)
        .map(|_| char::from(ALPHABET[rng.gen_range(0..ALPHABET.len())]))
        .collect()
}

/// New offer ID (`of-` prefix).
#[must_use]
pub fn offer_id() -> String {
    format!("of-{}", random_suffix())
}

/// New follow-up entry ID (`fu-` prefix), unique within one offer.
#[must_use]
pub fn followup_id() -> String {
    format!("fu-{}", random_suffix())
}

/// New notification ID (`nt-` prefix).
#[must_use]
pub fn notification_id() -> String {
    format!("nt-{}", random_suffix())
}
