//! Serializer profiles.
//!
//! A profile decides how *payloads* (`params`, `result`, `error.data`) are
//! cased on the wire. Envelope fields (`id`, `jsonrpc`, `method`, `params`,
//! `result`, `error`, `code`, `message`, `data`) have fixed names regardless of
//! the profile in use; they are written and read through [`JsonRpcSerializer::wire`].
//!
//! Naming applies to the names serde declares: struct fields and enum
//! variants, including unit variants written as bare strings. Map keys and
//! `serde_json::Value` objects are data and pass through untouched in both
//! directions. On decode an incoming key selects the declared field whose
//! converted name equals it.
//!
//! `#[serde(flatten)]` fields and internally tagged or untagged enums are
//! buffered by serde as maps, so their inner names are not converted.

mod de;
mod ser;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::ProtocolError;
use crate::request::RequestParams;

/// Property naming policy of a profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NamingPolicy {
    /// Keys are written and read exactly as serde produces them
    #[default]
    AsDeclared,
    CamelCase,
    SnakeCase,
}

impl NamingPolicy {
    /// Wire name of a declared field or variant
    pub fn convert_name(&self, name: &str) -> String {
        match self {
            NamingPolicy::AsDeclared => name.to_string(),
            NamingPolicy::CamelCase => to_camel_case(name),
            NamingPolicy::SnakeCase => to_snake_case(name),
        }
    }
}

/// Immutable serialization profile.
///
/// Profiles are plain values: build one, share it by reference or copy it into
/// whatever needs it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JsonRpcSerializer {
    naming: NamingPolicy,
    pretty: bool,
}

impl JsonRpcSerializer {
    pub const fn new(naming: NamingPolicy, pretty: bool) -> Self {
        Self { naming, pretty }
    }

    pub const fn camel_case() -> Self {
        Self::new(NamingPolicy::CamelCase, false)
    }

    pub const fn snake_case() -> Self {
        Self::new(NamingPolicy::SnakeCase, false)
    }

    /// Fixed profile used for the protocol envelope
    pub const fn wire() -> Self {
        Self::new(NamingPolicy::SnakeCase, false)
    }

    pub const fn as_declared() -> Self {
        Self::new(NamingPolicy::AsDeclared, false)
    }

    pub const fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    pub fn naming(&self) -> NamingPolicy {
        self.naming
    }

    pub fn is_pretty(&self) -> bool {
        self.pretty
    }

    /// Encode a payload into a JSON tree cased by this profile
    pub fn encode<T>(&self, value: &T) -> serde_json::Result<Value>
    where
        T: Serialize + ?Sized,
    {
        match self.naming {
            NamingPolicy::AsDeclared => serde_json::to_value(value),
            naming => ser::to_value(value, naming),
        }
    }

    /// Decode a payload cased by this profile
    pub fn decode<T>(&self, value: &Value) -> serde_json::Result<T>
    where
        T: DeserializeOwned,
    {
        match self.naming {
            NamingPolicy::AsDeclared => T::deserialize(value),
            naming => de::from_value(value.clone(), naming),
        }
    }

    /// Encode call params. `null` means "no params"; anything other than an
    /// object or an array is rejected.
    pub fn serialize_params<T>(&self, params: &T) -> Result<Option<RequestParams>, ProtocolError>
    where
        T: Serialize + ?Sized,
    {
        let value = self
            .encode(params)
            .map_err(|e| ProtocolError::Serialization(e.to_string()))?;
        match value {
            Value::Null => Ok(None),
            Value::Object(map) => Ok(Some(RequestParams::Object(map))),
            Value::Array(items) => Ok(Some(RequestParams::Array(items))),
            other => Err(ProtocolError::InvalidParams {
                type_name: std::any::type_name::<T>().to_string(),
                kind: value_kind(&other),
            }),
        }
    }

    /// Write an envelope as-is; only the pretty flag applies
    pub fn write<T>(&self, envelope: &T) -> serde_json::Result<String>
    where
        T: Serialize + ?Sized,
    {
        if self.pretty {
            serde_json::to_string_pretty(envelope)
        } else {
            serde_json::to_string(envelope)
        }
    }
}

impl Default for JsonRpcSerializer {
    fn default() -> Self {
        Self::snake_case()
    }
}

/// Name of the JSON kind of a value, used in error messages
pub fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn to_camel_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut upper_next = false;
    for (i, c) in name.chars().enumerate() {
        if c == '_' && i > 0 {
            upper_next = true;
        } else if i == 0 {
            out.extend(c.to_lowercase());
        } else if upper_next {
            out.extend(c.to_uppercase());
            upper_next = false;
        } else {
            out.push(c);
        }
    }
    out
}

fn to_snake_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    for (i, c) in name.chars().enumerate() {
        if i > 0 && c.is_uppercase() {
            out.push('_');
        }
        out.extend(c.to_lowercase());
    }
    out
}
