use rand::Rng;

/// Alphabet for generated team codes. Ambiguous glyphs (0/O, 1/I/L) are
/// excluded so codes survive being read aloud or written on paper.
const ALPHABET: &[u8] = b"ABCDEFGHJKMNPQRSTUVWXYZ23456789";

/// Length of a generated team code.
pub const CODE_LEN: usize = 6;

/// Generate a random team code. Uniqueness is the caller's job: codes are
/// re-drawn until no team row matches.
pub fn generate() -> String {
    let mut rng = rand::rng();
    (0..CODE_LEN)
        .map(|_| ALPHABET[rng.random_range(0..ALPHABET.len())] as char)
        .collect()
}
