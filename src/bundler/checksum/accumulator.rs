//! Running CRC-32 accumulator.
//!
//! The fingerprint is a single CRC-32 (IEEE) continued across every file
//! buffer and path string in manifest order. The reference tooling keeps the
//! running value in a plain integer and treats zero as "nothing accumulated
//! yet": a contribution landing on a zero running value starts a fresh CRC
//! instead of continuing one. [`ChecksumState`] keeps that distinction
//! explicit and offers both the compatible rule and a strict one.
//!
//! With standard CRC-32 continuation, continuing from zero and starting
//! afresh produce the same register, so both rules yield identical numbers.

use crc32fast::Hasher;

/// Which accumulation rule to apply when the running value is zero.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ChecksumMode {
    /// A zero running value is treated as "not started" (reference behavior).
    #[default]
    Compatible,
    /// A zero running value is continued like any other.
    Strict,
}

/// Accumulator state of the running checksum.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ChecksumState {
    /// Nothing has been fed yet.
    #[default]
    NotStarted,
    /// Current running CRC-32.
    Value(u32),
}

impl ChecksumState {
    /// Feeds `data` using the rule selected by `mode`.
    pub fn feed(self, mode: ChecksumMode, data: &[u8]) -> Self {
        match mode {
            ChecksumMode::Compatible => self.feed_compatible(data),
            ChecksumMode::Strict => self.feed_strict(data),
        }
    }

    /// Feeds `data`, restarting whenever the running value is zero.
    pub fn feed_compatible(self, data: &[u8]) -> Self {
        match self {
            ChecksumState::NotStarted | ChecksumState::Value(0) => {
                ChecksumState::Value(crc32fast::hash(data))
            }
            ChecksumState::Value(running) => ChecksumState::Value(continue_crc(running, data)),
        }
    }

    /// Feeds `data`, continuing from any started value including zero.
    pub fn feed_strict(self, data: &[u8]) -> Self {
        match self {
            ChecksumState::NotStarted => ChecksumState::Value(crc32fast::hash(data)),
            ChecksumState::Value(running) => ChecksumState::Value(continue_crc(running, data)),
        }
    }

    /// Final checksum; an accumulator that was never fed reports zero.
    pub fn value(self) -> u32 {
        match self {
            ChecksumState::NotStarted => 0,
            ChecksumState::Value(v) => v,
        }
    }
}

fn continue_crc(running: u32, data: &[u8]) -> u32 {
    let mut hasher = Hasher::new_with_initial(running);
    hasher.update(data);
    hasher.finalize()
}

/// Removes every carriage return byte, keeping all other bytes in order.
///
/// Normalizes `\r\n` line endings so the fingerprint is identical on every host.
pub fn strip_carriage_returns(mut buf: Vec<u8>) -> Vec<u8> {
    buf.retain(|&b| b != b'\r');
    buf
}
