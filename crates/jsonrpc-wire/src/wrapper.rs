//! Single-vs-batch discrimination.
//!
//! Both requests and responses may arrive as one object or as an array of
//! objects. The wrappers decide which by looking at the root token only; the
//! elements are then decoded by their own converters. Wrappers are decode-only.

use std::fmt;
use std::marker::PhantomData;

use serde::de::value::{MapAccessDeserializer, SeqAccessDeserializer};
use serde::de::{self, Deserializer, MapAccess, SeqAccess, Visitor};
use serde::Deserialize;
use serde_json::value::RawValue;

use crate::call::UntypedCall;
use crate::response::Response;

const ROOT_EXPECTED: &str = "{} or [] as root element";

/// Inbound request body
#[derive(Debug, Clone, PartialEq)]
pub enum RequestWrapper {
    Single(UntypedCall),
    Batch(Vec<UntypedCall>),
}

impl RequestWrapper {
    pub fn from_raw(raw: &RawValue) -> serde_json::Result<Self> {
        let text = raw.get().trim_start();
        match text.as_bytes().first() {
            Some(b'{') => UntypedCall::from_raw(raw).map(RequestWrapper::Single),
            Some(b'[') => {
                let items: Vec<Box<RawValue>> = serde_json::from_str(text)?;
                items
                    .iter()
                    .map(|item| UntypedCall::from_raw(item))
                    .collect::<Result<Vec<_>, _>>()
                    .map(RequestWrapper::Batch)
            }
            other => Err(de::Error::custom(format!(
                "Expected {}, got {}",
                ROOT_EXPECTED,
                root_token_kind(other.copied())
            ))),
        }
    }

    pub fn parse(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }

    pub fn is_batch(&self) -> bool {
        matches!(self, RequestWrapper::Batch(_))
    }
}

impl<'de> Deserialize<'de> for RequestWrapper {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Box::<RawValue>::deserialize(deserializer)?;
        RequestWrapper::from_raw(&raw).map_err(de::Error::custom)
    }
}

fn root_token_kind(first: Option<u8>) -> &'static str {
    match first {
        None => "nothing",
        Some(b'n') => "null",
        Some(b't') | Some(b'f') => "boolean",
        Some(b'"') => "string",
        Some(_) => "number",
    }
}

/// Inbound response body, generic over the element converter
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseWrapper<R = Response> {
    Single(R),
    Batch(Vec<R>),
}

impl<R> ResponseWrapper<R> {
    pub fn is_batch(&self) -> bool {
        matches!(self, ResponseWrapper::Batch(_))
    }

    /// Short shape description for diagnostics
    pub fn shape(&self) -> String {
        match self {
            ResponseWrapper::Single(_) => "single".to_string(),
            ResponseWrapper::Batch(items) => format!("batch of {}", items.len()),
        }
    }
}

struct ResponseWrapperVisitor<R>(PhantomData<R>);

impl<'de, R> Visitor<'de> for ResponseWrapperVisitor<R>
where
    R: Deserialize<'de>,
{
    type Value = ResponseWrapper<R>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(ROOT_EXPECTED)
    }

    fn visit_map<A>(self, map: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        R::deserialize(MapAccessDeserializer::new(map)).map(ResponseWrapper::Single)
    }

    fn visit_seq<A>(self, seq: A) -> Result<Self::Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        Vec::<R>::deserialize(SeqAccessDeserializer::new(seq)).map(ResponseWrapper::Batch)
    }
}

impl<'de, R> Deserialize<'de> for ResponseWrapper<R>
where
    R: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(ResponseWrapperVisitor(PhantomData))
    }
}
