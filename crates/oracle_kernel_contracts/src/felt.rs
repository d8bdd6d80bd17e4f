#![forbid(unsafe_code)]

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{ContractViolation, Validate};

/// Field modulus `2^251 + 17 * 2^192 + 1`, big-endian.
pub const FELT_MODULUS_BE: [u8; 32] = [
    0x08, 0, 0, 0, 0, 0, 0, 0x11, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0x01,
];

/// Wire-level integer. Every argument, return value and event field crosses
/// the contract boundary as a `Felt`; zero doubles as the null address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Felt([u8; 32]);

impl Felt {
    pub const ZERO: Felt = Felt([0u8; 32]);

    pub fn from_be_bytes(bytes: [u8; 32]) -> Result<Self, ContractViolation> {
        let v = Self(bytes);
        v.validate()?;
        Ok(v)
    }

    pub fn to_be_bytes(self) -> [u8; 32] {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|b| *b == 0)
    }

    pub fn to_u128(self) -> Option<u128> {
        if self.0[..16].iter().any(|b| *b != 0) {
            return None;
        }
        let mut low = [0u8; 16];
        low.copy_from_slice(&self.0[16..]);
        Some(u128::from_be_bytes(low))
    }

    pub fn to_u64(self) -> Option<u64> {
        self.to_u128().and_then(|v| u64::try_from(v).ok())
    }

    pub fn to_u8(self) -> Option<u8> {
        self.to_u128().and_then(|v| u8::try_from(v).ok())
    }

    pub fn from_hex(raw: &str) -> Result<Self, ContractViolation> {
        let digits = raw
            .strip_prefix("0x")
            .or_else(|| raw.strip_prefix("0X"))
            .unwrap_or(raw);
        if digits.is_empty() {
            return Err(ContractViolation::InvalidValue {
                field: "felt",
                reason: "hex literal must not be empty",
            });
        }
        if digits.len() > 64 {
            return Err(ContractViolation::OutOfRange {
                field: "felt",
                bound: "2^256",
            });
        }
        let mut out = [0u8; 32];
        for (i, c) in digits.bytes().rev().enumerate() {
            let nibble = match c {
                b'0'..=b'9' => c - b'0',
                b'a'..=b'f' => c - b'a' + 10,
                b'A'..=b'F' => c - b'A' + 10,
                _ => {
                    return Err(ContractViolation::InvalidValue {
                        field: "felt",
                        reason: "hex literal contains a non-hex digit",
                    })
                }
            };
            out[31 - i / 2] |= if i % 2 == 0 { nibble } else { nibble << 4 };
        }
        Self::from_be_bytes(out)
    }

    pub fn from_dec(raw: &str) -> Result<Self, ContractViolation> {
        if raw.is_empty() {
            return Err(ContractViolation::InvalidValue {
                field: "felt",
                reason: "decimal literal must not be empty",
            });
        }
        let mut out = [0u8; 32];
        for c in raw.bytes() {
            if !c.is_ascii_digit() {
                return Err(ContractViolation::InvalidValue {
                    field: "felt",
                    reason: "decimal literal contains a non-digit",
                });
            }
            let mut carry = (c - b'0') as u16;
            for byte in out.iter_mut().rev() {
                let v = (*byte as u16) * 10 + carry;
                *byte = (v & 0xff) as u8;
                carry = v >> 8;
            }
            if carry != 0 {
                return Err(ContractViolation::OutOfRange {
                    field: "felt",
                    bound: "2^256",
                });
            }
        }
        Self::from_be_bytes(out)
    }
}

impl Validate for Felt {
    fn validate(&self) -> Result<(), ContractViolation> {
        if self.0 >= FELT_MODULUS_BE {
            return Err(ContractViolation::OutOfRange {
                field: "felt",
                bound: "2^251 + 17 * 2^192 + 1",
            });
        }
        Ok(())
    }
}

impl From<u128> for Felt {
    fn from(v: u128) -> Self {
        let mut out = [0u8; 32];
        out[16..].copy_from_slice(&v.to_be_bytes());
        Self(out)
    }
}

impl From<u64> for Felt {
    fn from(v: u64) -> Self {
        Self::from(v as u128)
    }
}

impl From<u8> for Felt {
    fn from(v: u8) -> Self {
        Self::from(v as u128)
    }
}

impl FromStr for Felt {
    type Err = ContractViolation;

    /// Accepts `0x`-prefixed hex or plain decimal.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.starts_with("0x") || s.starts_with("0X") {
            Self::from_hex(s)
        } else {
            Self::from_dec(s)
        }
    }
}

impl fmt::LowerHex for Felt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(first) = self.0.iter().position(|b| *b != 0) else {
            return f.write_str("0");
        };
        write!(f, "{:x}", self.0[first])?;
        for b in &self.0[first + 1..] {
            write!(f, "{b:02x}")?;
        }
        Ok(())
    }
}

impl fmt::Display for Felt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{self:x}")
    }
}

impl Serialize for Felt {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Felt {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// A caller or owner address. Never zero: the null address is represented
/// as `Option<Identity>::None` and only becomes `Felt::ZERO` on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "Felt", into = "Felt")]
pub struct Identity(Felt);

impl Identity {
    pub fn new(felt: Felt) -> Result<Self, ContractViolation> {
        let v = Self(felt);
        v.validate()?;
        Ok(v)
    }

    /// Boundary conversion: the zero sentinel maps to `None`.
    pub fn from_felt(felt: Felt) -> Option<Self> {
        Self::new(felt).ok()
    }

    pub fn as_felt(&self) -> Felt {
        self.0
    }
}

impl Validate for Identity {
    fn validate(&self) -> Result<(), ContractViolation> {
        self.0.validate()?;
        if self.0.is_zero() {
            return Err(ContractViolation::InvalidValue {
                field: "identity",
                reason: "must not be the zero address",
            });
        }
        Ok(())
    }
}

impl TryFrom<Felt> for Identity {
    type Error = ContractViolation;

    fn try_from(felt: Felt) -> Result<Self, Self::Error> {
        Self::new(felt)
    }
}

impl From<Identity> for Felt {
    fn from(id: Identity) -> Self {
        id.0
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}
