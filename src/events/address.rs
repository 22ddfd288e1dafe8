use std::fmt;
use std::str::FromStr;

use borsh::{BorshDeserialize, BorshSerialize};
use solana_pubkey::Pubkey;

/// A 32-byte account address inside an event record.
///
/// Borsh reads it as raw bytes; serde writes it as a base58 string and reads
/// either a base58 string or a 32-element byte array.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Address(pub Pubkey);

impl Address {
    pub const fn new_from_array(bytes: [u8; 32]) -> Self {
        Self(Pubkey::new_from_array(bytes))
    }

    pub fn pubkey(&self) -> &Pubkey {
        &self.0
    }
}

impl From<Pubkey> for Address {
    fn from(value: Pubkey) -> Self {
        Self(value)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({})", self.0)
    }
}

impl BorshDeserialize for Address {
    fn deserialize_reader<R: std::io::Read>(reader: &mut R) -> std::io::Result<Self> {
        let bytes = <[u8; 32]>::deserialize_reader(reader)?;
        Ok(Self::new_from_array(bytes))
    }
}

impl BorshSerialize for Address {
    fn serialize<W: std::io::Write>(&self, writer: &mut W) -> std::io::Result<()> {
        self.0.to_bytes().serialize(writer)
    }
}

impl serde::Serialize for Address {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&self.0)
    }
}

impl<'de> serde::Deserialize<'de> for Address {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = serde_json::Value::deserialize(deserializer)?;
        value_to_address(&value)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid address: {value}")))
    }
}

/// Convert a JSON value to an [`Address`].
/// Handles both byte arrays (`[u8; 32]`) and base58 strings.
pub fn value_to_address(value: &serde_json::Value) -> Option<Address> {
    if let Some(s) = value.as_str() {
        return Pubkey::from_str(s).ok().map(Address);
    }
    let arr = value.as_array()?;
    let bytes: Vec<u8> = arr
        .iter()
        .map(|v| v.as_u64().and_then(|n| u8::try_from(n).ok()))
        .collect::<Option<_>>()?;
    let bytes: [u8; 32] = bytes.try_into().ok()?;
    Some(Address::new_from_array(bytes))
}
