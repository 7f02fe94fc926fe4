use serde::Serialize;
use serde_json::Value;

use crate::{request::RequestParams, types::JsonRpcVersion};

/// A JSON-RPC notification (request without an id) with typed params
#[derive(Debug, Clone, PartialEq)]
pub struct Notification<P> {
    pub method: String,
    pub params: P,
    pub version: JsonRpcVersion,
}

impl<P> Notification<P> {
    pub fn new(method: impl Into<String>, params: P) -> Self {
        Self {
            method: method.into(),
            params,
            version: JsonRpcVersion::V2_0,
        }
    }
}

/// Wire form of a notification
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UntypedNotification {
    pub method: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<RequestParams>,
    #[serde(rename = "jsonrpc")]
    pub version: JsonRpcVersion,
    #[serde(skip)]
    pub raw_json: Option<Box<str>>,
}

impl UntypedNotification {
    pub fn new(method: String, params: Option<RequestParams>) -> Self {
        Self {
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
