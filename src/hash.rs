/*
 * Copyright (c) 2024 K--Aethiax
 *
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License.
 * You may obtain a copy of the License at
 *
 *     http://www.apache.org/licenses/LICENSE-2.0
 *
 * Unless required by applicable law or agreed to in writing, software
 * distributed under the License is distributed on an "AS IS" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 * See the License for the specific language governing permissions and
 * limitations under the License.
 *
 * Alternatively, the contents of this file may be used under the terms of
 * the MIT license as described below.
 *
 * Permission is hereby granted, free of charge, to any person obtaining a copy
 * of this software and associated documentation files (the "Software"), to deal
 * in the Software without restriction, including without limitation the rights
 * to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
 * copies of the Software, and to permit persons to whom the Software is
 * furnished to do so, subject to the following conditions:
 *
 * The above copyright notice and this permission notice shall be included in all
 * copies or substantial portions of the Software.
 *
 * THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
 * IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
 * FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
 * AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
 * LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
 * OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
 * SOFTWARE.
 */

use super::*;
use core::fmt;

/// Streamed SipHash-2-4 hasher.
pub type Hasher = HashState;

/// 128-bit key. Bytes `0..8` and `8..16` are read as two little-endian words.
pub type Seed = [u8; 16];

/// `"somepseudorandomlygeneratedbytes"`
const INIT_STATE: State = [
    0x736f6d6570736575,
    0x646f72616e646f6d,
    0x6c7967656e657261,
    0x7465646279746573,
];
/// XORed into `v2` before the finalization rounds.
const FINAL_MARK: u64 = 0xff;

/// `[v0, v1, v2, v3]`
type State = [u64; 4];

#[inline(always)]
const fn split_seed(seed: &Seed) -> (u64, u64) {
    let [a0, a1, a2, a3, a4, a5, a6, a7, b0, b1, b2, b3, b4, b5, b6, b7] = *seed;
    (
        u64::from_le_bytes([a0, a1, a2, a3, a4, a5, a6, a7]),
        u64::from_le_bytes([b0, b1, b2, b3, b4, b5, b6, b7]),
    )
}
#[inline(always)]
const fn keyed(k0: u64, k1: u64) -> State {
    [
        INIT_STATE[0] ^ k0,
        INIT_STATE[1] ^ k1,
        INIT_STATE[2] ^ k0,
        INIT_STATE[3] ^ k1,
    ]
}

#[inline(always)]
fn sip_round([mut v0, mut v1, mut v2, mut v3]: State) -> State {
    v0 = v0.wrapping_add(v1);
    v1 = v1.rotate_left(13);
    v1 ^= v0;
    v0 = v0.rotate_left(32);

    v2 = v2.wrapping_add(v3);
    v3 = v3.rotate_left(16);
    v3 ^= v2;

    v0 = v0.wrapping_add(v3);
    v3 = v3.rotate_left(21);
    v3 ^= v0;

    v2 = v2.wrapping_add(v1);
    v1 = v1.rotate_left(17);
    v1 ^= v2;
    v2 = v2.rotate_left(32);

    [v0, v1, v2, v3]
}

/// The "2" of SipHash-2-4.
#[inline(always)]
fn absorb(mut state: State, m: u64) -> State {
    state[3] ^= m;
    state = sip_round(sip_round(state));
    state[0] ^= m;
    state
}

/// Last block, then the "4" of SipHash-2-4.
#[inline(always)]
fn epi(state: State, last: u64) -> u64 {
    let mut state = absorb(state, last);
    state[2] ^= FINAL_MARK;
    state = sip_round(sip_round(sip_round(sip_round(state))));
    state[0] ^ state[1] ^ state[2] ^ state[3]
}

/// Only the low byte of the message length is encoded, in the top byte of the last block.
#[inline(always)]
const fn last_word(pending: u64, tot_len: u64) -> u64 {
    pending | ((tot_len & 0xff) << 56)
}

/// One-shot SipHash-2-4.
///
/// Same result as [`HashState::init`], [`HashState::append`] with the whole of `bytes`,
/// then [`HashState::finalize`].
#[inline]
pub fn hash(bytes: &[u8], seed: &Seed) -> u64 {
    let (k0, k1) = split_seed(seed);
    let mut state = keyed(k0, k1);

    let blocks = bytes.chunks_exact(8);
    let remainder = blocks.remainder();
    for block in blocks {
        state = absorb(state, read_le(block));
    }

    epi(state, last_word(read_le(remainder), bytes.len() as u64))
}

/// Incremental SipHash-2-4 state.
///
/// Bytes may be fed in chunks of any size; the digest only depends on their concatenation.
/// Partial blocks are kept inside the state, so nothing is allocated and callers never
/// have to buffer.
///
/// [`finalize`](Self::finalize) consumes the state. To start over, assign a fresh
/// [`init`](Self::init) to it.
#[derive(Clone)]
pub struct HashState {
    state: State,
    /// Up to 7 bytes not yet absorbed, little-endian from bit 0. Higher bytes stay zero.
    pending: u64,
    /// Wraps at 2^64. Only `% 8` and `% 256` are ever read.
    tot_len: u64,
}
impl HashState {
    /// Keys the state from 16 bytes of (ideally secret and random) seed.
    pub const fn init(seed: &Seed) -> Self {
        let (k0, k1) = split_seed(seed);
        Self::from_keys(k0, k1)
    }

    /// Keys the state from the two already decoded halves of the seed.
    pub const fn from_keys(k0: u64, k1: u64) -> Self {
        Self {
            state: keyed(k0, k1),
            pending: 0,
            tot_len: 0,
        }
    }

    /// Feeds more message bytes. Empty slices are allowed and change nothing.
    pub fn append(&mut self, mut bytes: &[u8]) {
        let filled = (self.tot_len & 7) as usize;
        self.tot_len = self.tot_len.wrapping_add(bytes.len() as u64);

        let mut state = self.state;
        if filled > 0 {
            let take = bytes.len().min(8 - filled);
            self.pending |= read_le(&bytes[..take]) << (filled * 8);
            if unlikely(filled + take < 8) {
                return;
            }

            state = absorb(state, self.pending);
            bytes = &bytes[take..];
        }

        let blocks = bytes.chunks_exact(8);
        let remainder = blocks.remainder();
        for block in blocks {
            state = absorb(state, read_le(block));
        }

        self.pending = read_le(remainder);
        self.state = state;
    }

    /// Produces the 64-bit digest.
    pub fn finalize(self) -> u64 {
        self.digest()
    }

    fn digest(&self) -> u64 {
        epi(self.state, last_word(self.pending, self.tot_len))
    }
}
impl fmt::Debug for HashState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Lanes and pending bytes are key material.
        f.write_str("siphash24::Hasher { ... }")
    }
}
impl core::hash::Hasher for HashState {
    fn finish(&self) -> u64 {
        self.digest()
    }
    fn write(&mut self, bytes: &[u8]) {
        self.append(bytes)
    }

    // Integers go in little-endian so digests don't depend on the host.
    fn write_u16(&mut self, i: u16) {
        self.append(&i.to_le_bytes())
    }
    fn write_u32(&mut self, i: u32) {
        self.append(&i.to_le_bytes())
    }
    fn write_u64(&mut self, i: u64) {
        self.append(&i.to_le_bytes())
    }
    fn write_u128(&mut self, i: u128) {
        self.append(&i.to_le_bytes())
    }
    fn write_usize(&mut self, i: usize) {
        self.append(&(i as u64).to_le_bytes())
    }
}
