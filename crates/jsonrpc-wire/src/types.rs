use std::fmt;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Identifier of a JSON-RPC call.
///
/// Ids compare by tag and value: `String("1")` and `Number(1)` are different
/// ids. `Null` is a regular value with ordinary equality, so responses with a
/// `null` id can be keyed in maps like any other id.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RpcId {
    String(String),
    Number(i64),
    Null,
}

impl RpcId {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            RpcId::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            RpcId::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, RpcId::Null)
    }
}

impl fmt::Display for RpcId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RpcId::String(s) => write!(f, "{}", s),
            RpcId::Number(n) => write!(f, "{}", n),
            RpcId::Null => write!(f, "(null)"),
        }
    }
}

impl From<i64> for RpcId {
    fn from(n: i64) -> Self {
        RpcId::Number(n)
    }
}

impl From<i32> for RpcId {
    fn from(n: i32) -> Self {
        RpcId::Number(n.into())
    }
}

impl From<u32> for RpcId {
    fn from(n: u32) -> Self {
        RpcId::Number(n.into())
    }
}

impl From<&str> for RpcId {
    fn from(s: &str) -> Self {
        RpcId::String(s.to_string())
    }
}

impl From<String> for RpcId {
    fn from(s: String) -> Self {
        RpcId::String(s)
    }
}

impl Serialize for RpcId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            RpcId::String(s) => serializer.serialize_str(s),
            RpcId::Number(n) => serializer.serialize_i64(*n),
            RpcId::Null => serializer.serialize_unit(),
        }
    }
}

struct RpcIdVisitor;

impl<'de> Visitor<'de> for RpcIdVisitor {
    type Value = RpcId;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("string, number, or null for id")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<RpcId, E> {
        Ok(RpcId::String(v.to_string()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<RpcId, E> {
        Ok(RpcId::String(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<RpcId, E> {
        Ok(RpcId::Number(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<RpcId, E> {
        i64::try_from(v)
            .map(RpcId::Number)
            .map_err(|_| E::invalid_value(de::Unexpected::Unsigned(v), &self))
    }

    fn visit_unit<E: de::Error>(self) -> Result<RpcId, E> {
        Ok(RpcId::Null)
    }

    fn visit_none<E: de::Error>(self) -> Result<RpcId, E> {
        Ok(RpcId::Null)
    }

    fn visit_some<D>(self, deserializer: D) -> Result<RpcId, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(self)
    }
}

impl<'de> Deserialize<'de> for RpcId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(RpcIdVisitor)
    }
}

/// JSON-RPC version
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonRpcVersion {
    #[default]
    V2_0,
}

impl JsonRpcVersion {
    pub fn as_str(&self) -> &'static str {
        match self {
            JsonRpcVersion::V2_0 => crate::JSONRPC_VERSION,
        }
    }
}

impl fmt::Display for JsonRpcVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Serialize for JsonRpcVersion {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for JsonRpcVersion {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        match s.as_str() {
            crate::JSONRPC_VERSION => Ok(JsonRpcVersion::V2_0),
            _ => Err(de::Error::custom(format!("Invalid JSON-RPC version: {}", s))),
        }
    }
}
