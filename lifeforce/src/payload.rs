// payload.rs - Generated strings carried by influence in generative mode

use rand::Rng;

/// Base pairs draw from `B..=Z`.
const BASE_PAIR_RANGE: std::ops::RangeInclusive<u8> = b'B'..=b'Z';
/// Art draws from the upper Latin-1 block.
const ART_RANGE: std::ops::RangeInclusive<u8> = 0x99..=0xFF;

/// Number of base pairs an initially-alive cell is seeded with.
pub const INITIAL_GENOME_LEN: usize = 3;

/// Two-character pseudo-DNA sent to a dead neighbor.
pub fn base_pair<R: Rng + ?Sized>(rng: &mut R) -> String {
    produce(rng, BASE_PAIR_RANGE, 2)
}

/// Three-character pseudo-art sent to a live neighbor.
pub fn art<R: Rng + ?Sized>(rng: &mut R) -> String {
    produce(rng, ART_RANGE, 3)
}

pub fn genome<R: Rng + ?Sized>(rng: &mut R) -> Vec<String> {
    (0..INITIAL_GENOME_LEN).map(|_| base_pair(rng)).collect()
}

fn produce<R: Rng + ?Sized>(rng: &mut R, range: std::ops::RangeInclusive<u8>, len: usize) -> String {
    (0..len)
        .map(|_| char::from(rng.random_range(range.clone())))
        .collect()
}
