use std::fmt;
use std::str::FromStr;

use num_bigint::BigUint;
use num_traits::{ToPrimitive, Zero};
use schemars::gen::SchemaGenerator;
use schemars::schema::{InstanceType, Schema, SchemaObject};
use schemars::JsonSchema;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

/// Opaque account identity, taken verbatim from the snapshot (typically the
/// hex form of a storage key). Only compared and copied, never interpreted.
#[derive(Serialize, Deserialize, JsonSchema, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(transparent)]
pub struct AccountKey(String);

impl AccountKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The trailing `len` characters of the key. Keys shorter than `len`
    /// are returned whole.
    pub fn short(&self, len: usize) -> &str {
        let count = self.0.chars().count();
        if count <= len {
            return &self.0;
        }
        match self.0.char_indices().nth(count - len) {
            Some((start, _)) => &self.0[start..],
            None => "",
        }
    }
}

impl fmt::Display for AccountKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for AccountKey {
    fn from(key: &str) -> Self {
        Self::new(key)
    }
}

/// Why a textual amount was rejected.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AmountParseError {
    Empty,
    Negative,
    InvalidDigit { found: char },
}

impl fmt::Display for AmountParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AmountParseError::Empty => f.write_str("is empty"),
            AmountParseError::Negative => f.write_str("is negative"),
            AmountParseError::InvalidDigit { found } => {
                write!(f, "is not a decimal integer (found {found:?})")
            }
        }
    }
}

impl std::error::Error for AmountParseError {}

/// Arbitrary-precision non-negative token amount in minor units.
///
/// On the wire an amount is always a plain decimal string (`"1000"`): no sign,
/// no separators, no exponent.
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Amount(BigUint);

impl Amount {
    pub fn zero() -> Self {
        Self(BigUint::zero())
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn as_biguint(&self) -> &BigUint {
        &self.0
    }

    pub fn into_biguint(self) -> BigUint {
        self.0
    }

    /// `None` if the amount does not fit in a `u128`.
    pub fn to_u128(&self) -> Option<u128> {
        self.0.to_u128()
    }
}

impl From<BigUint> for Amount {
    fn from(value: BigUint) -> Self {
        Self(value)
    }
}

impl From<u128> for Amount {
    fn from(value: u128) -> Self {
        Self(BigUint::from(value))
    }
}

impl FromStr for Amount {
    type Err = AmountParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(AmountParseError::Empty);
        }
        if s.starts_with('-') {
            return Err(AmountParseError::Negative);
        }
        if let Some(found) = s.chars().find(|c| !c.is_ascii_digit()) {
            return Err(AmountParseError::InvalidDigit { found });
        }
        // Only ASCII digits remain, so parsing cannot fail.
        BigUint::parse_bytes(s.as_bytes(), 10)
            .map(Self)
            .ok_or(AmountParseError::Empty)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl Serialize for Amount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse()
            .map_err(|e| de::Error::custom(format!("amount {s:?} {e}")))
    }
}

impl JsonSchema for Amount {
    fn schema_name() -> String {
        "Amount".to_string()
    }

    fn json_schema(_gen: &mut SchemaGenerator) -> Schema {
        let mut schema = SchemaObject {
            instance_type: Some(InstanceType::String.into()),
            ..Default::default()
        };
        schema.string().pattern = Some("^[0-9]+$".to_string());
        schema.into()
    }
}

/// Which balance figure feeds the square-root weighting.
#[derive(Serialize, Deserialize, JsonSchema, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BasisMode {
    /// Free balance only.
    #[default]
    #[serde(rename = "free")]
    Free,
    /// Free plus reserved balance.
    #[serde(rename = "free+reserved")]
    FreeAndReserved,
}

impl BasisMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            BasisMode::Free => "free",
            BasisMode::FreeAndReserved => "free+reserved",
        }
    }
}

impl FromStr for BasisMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "free" => Ok(BasisMode::Free),
            "free+reserved" => Ok(BasisMode::FreeAndReserved),
            other => Err(format!(
                "unknown basis mode {other:?} (expected \"free\" or \"free+reserved\")"
            )),
        }
    }
}

impl fmt::Display for BasisMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Balance portion of the target account record.
#[derive(Serialize, Deserialize, JsonSchema, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AccountData {
    pub free: Amount,
    pub reserved: Amount,
    pub misc_frozen: Amount,
    pub fee_frozen: Amount,
}

/// Account record in the target storage schema (reference-counted layout).
#[derive(Serialize, Deserialize, JsonSchema, Clone, Debug, PartialEq, Eq)]
pub struct MigratedAccountRecord {
    pub nonce: u32,
    pub consumers: u32,
    pub providers: u32,
    pub sufficients: u32,
    pub data: AccountData,
}
