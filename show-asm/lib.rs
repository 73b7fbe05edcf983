#[inline(never)]
pub fn hash_oneshot(bytes: &[u8], seed: &[u8; 16]) -> u64 {
    siphash24::hash(bytes, seed)
}

#[inline(never)]
pub fn hash_append(hasher: &mut siphash24::Hasher, bytes: &[u8]) {
    hasher.append(bytes)
}

#[inline(never)]
pub fn hash_finalize(hasher: siphash24::Hasher) -> u64 {
    hasher.finalize()
}

#[inline(never)]
pub fn rapidhash(bytes: &[u8], seed: u64) -> u64 {
    rapidhash::rapidhash_inline(bytes, seed)
}
