use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::serializer::value_kind;
use crate::types::{JsonRpcVersion, RpcId};

/// Parameters of a call as they appear on the wire
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum RequestParams {
    /// Positional parameters as an array
    Array(Vec<Value>),
    /// Named parameters as an object
    Object(Map<String, Value>),
}

impl RequestParams {
    /// Get a parameter by name (for object params)
    pub fn get(&self, key: &str) -> Option<&Value> {
        match self {
            RequestParams::Object(map) => map.get(key),
            RequestParams::Array(_) => None,
        }
    }

    /// Get a parameter by index (for array params)
    pub fn get_index(&self, index: usize) -> Option<&Value> {
        match self {
            RequestParams::Array(vec) => vec.get(index),
            RequestParams::Object(_) => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            RequestParams::Object(map) => map.is_empty(),
            RequestParams::Array(vec) => vec.is_empty(),
        }
    }

    pub fn to_value(&self) -> Value {
        match self {
            RequestParams::Object(map) => Value::Object(map.clone()),
            RequestParams::Array(arr) => Value::Array(arr.clone()),
        }
    }
}

impl TryFrom<Value> for RequestParams {
    type Error = String;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(map) => Ok(RequestParams::Object(map)),
            Value::Array(vec) => Ok(RequestParams::Array(vec)),
            other => Err(format!(
                "Expected params to be object or array, got [{}]",
                value_kind(&other)
            )),
        }
    }
}

impl<'de> Deserialize<'de> for RequestParams {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        RequestParams::try_from(value).map_err(de::Error::custom)
    }
}

/// A JSON-RPC request with typed params.
///
/// Params are encoded by the serializer profile of whoever sends the request,
/// see [`crate::Call::with_serialized_params`].
#[derive(Debug, Clone, PartialEq)]
pub struct Request<P> {
    pub id: RpcId,
    pub method: String,
    pub params: P,
    pub version: JsonRpcVersion,
}

impl<P> Request<P> {
    pub fn new(id: impl Into<RpcId>, method: impl Into<String>, params: P) -> Self {
        Self {
            id: id.into(),
            method: method.into(),
            params,
            version: JsonRpcVersion::V2_0,
        }
    }
}

/// Wire form of a request: params already encoded, original text retained when
/// the request was parsed rather than built.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UntypedRequest {
    pub id: RpcId,
    pub method: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<RequestParams>,
    #[serde(rename = "jsonrpc")]
    pub version: JsonRpcVersion,
    #[serde(skip)]
    pub raw_json: Option<Box<str>>,
}

impl UntypedRequest {
    pub fn new(id: RpcId, method: String, params: Option<RequestParams>) -> Self {
        Self {
            id,
            method,
            params,
            version: JsonRpcVersion::V2_0,
            raw_json: None,
        }
    }

    /// Get a parameter by name (if params are an object)
    pub fn get_param(&self, name: &str) -> Option<&Value> {
        self.params.as_ref()?.get(name)
    }

    /// Get a parameter by index (if params are an array)
    pub fn get_param_index(&self, index: usize) -> Option<&Value> {
        self.params.as_ref()?.get_index(index)
    }
}
