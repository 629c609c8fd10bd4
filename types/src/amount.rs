//! Token amount type and its canonical byte codec.
//!
//! Amounts are unsigned 64-bit integers. The smallest unit is 1 raw; the
//! ledger never deals in fractions. The stored byte form is fixed-width
//! little-endian (codec version 1) and is applied uniformly to every
//! balance and allowance entry.

use crate::error::AmountError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Sub};

/// A token amount — a balance, an allowance, or a quantity being moved.
///
/// Internally stored as raw units (u64). Negative amounts are
/// unrepresentable; host-supplied raw integers go through [`TryFrom<i128>`]
/// at the boundary, which rejects them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Amount(u64);

impl Amount {
    pub const ZERO: Self = Self(0);

    /// Width of the canonical byte encoding.
    pub const ENCODED_LEN: usize = 8;

    /// Version of the canonical amount codec. Stored entries written by a
    /// different codec version must not be mixed with this one.
    pub const CODEC_VERSION: u8 = 1;

    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub const fn raw(&self) -> u64 {
        self.0
    }

    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub fn checked_add(self, other: Self) -> Option<Self> {
        self.0.checked_add(other.0).map(Self)
    }

    pub fn checked_sub(self, other: Self) -> Option<Self> {
        self.0.checked_sub(other.0).map(Self)
    }

    pub fn saturating_sub(self, other: Self) -> Self {
        Self(self.0.saturating_sub(other.0))
    }

    /// Encode into the canonical fixed-width little-endian form.
    pub fn encode(&self) -> [u8; Self::ENCODED_LEN] {
        self.0.to_le_bytes()
    }

    /// Decode from the canonical byte form.
    ///
    /// The input must be exactly [`Self::ENCODED_LEN`] bytes; anything else
    /// indicates a corrupt entry and fails with [`AmountError::Malformed`].
    pub fn decode(bytes: &[u8]) -> Result<Self, AmountError> {
        let arr: [u8; Self::ENCODED_LEN] = bytes
            .try_into()
            .map_err(|_| AmountError::Malformed { len: bytes.len() })?;
        Ok(Self(u64::from_le_bytes(arr)))
    }

    /// Decode a value as read from the ledger store, where an absent entry
    /// is equivalent to a zero amount.
    pub fn decode_stored(bytes: Option<&[u8]>) -> Result<Self, AmountError> {
        match bytes {
            Some(b) => Self::decode(b),
            None => Ok(Self::ZERO),
        }
    }
}

impl Add for Amount {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl Sub for Amount {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self(self.0 - rhs.0)
    }
}

/// Boundary conversion from a host-supplied raw integer.
///
/// The host's calling convention is loosely typed; this is the single place
/// where a negative or oversized quantity is rejected.
impl TryFrom<i128> for Amount {
    type Error = AmountError;

    fn try_from(raw: i128) -> Result<Self, AmountError> {
        if raw < 0 {
            return Err(AmountError::Negative(raw));
        }
        u64::try_from(raw)
            .map(Self)
            .map_err(|_| AmountError::OutOfRange(raw))
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
