use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::value::RawValue;

use crate::error::ProtocolError;
use crate::notification::{Notification, UntypedNotification};
use crate::request::{Request, RequestParams, UntypedRequest};
use crate::serializer::JsonRpcSerializer;
use crate::types::{JsonRpcVersion, RpcId};

/// Anything that can be sent as a JSON-RPC call
pub trait Call: Send + Sync {
    fn method(&self) -> &str;

    /// Id of the call; `None` for notifications
    fn id(&self) -> Option<&RpcId>;

    /// Whether the server is expected to answer this call
    fn is_request(&self) -> bool {
        self.id().is_some()
    }

    /// Encode params with the given profile, producing the wire form of the call
    fn with_serialized_params(
        &self,
        serializer: &JsonRpcSerializer,
    ) -> Result<UntypedCall, ProtocolError>;
}

impl<P> Call for Request<P>
where
    P: Serialize + Send + Sync,
{
    fn method(&self) -> &str {
        &self.method
    }

    fn id(&self) -> Option<&RpcId> {
        Some(&self.id)
    }

    fn with_serialized_params(
        &self,
        serializer: &JsonRpcSerializer,
    ) -> Result<UntypedCall, ProtocolError> {
        let params = serializer.serialize_params(&self.params)?;
        Ok(UntypedCall::Request(UntypedRequest::new(
            self.id.clone(),
            self.method.clone(),
            params,
        )))
    }
}

impl<P> Call for Notification<P>
where
    P: Serialize + Send + Sync,
{
    fn method(&self) -> &str {
        &self.method
    }

    fn id(&self) -> Option<&RpcId> {
        None
    }

    fn with_serialized_params(
        &self,
        serializer: &JsonRpcSerializer,
    ) -> Result<UntypedCall, ProtocolError> {
        let params = serializer.serialize_params(&self.params)?;
        Ok(UntypedCall::Notification(UntypedNotification::new(
            self.method.clone(),
            params,
        )))
    }
}

/// Wire form of any call.
///
/// Decoding classifies by the presence of the `id` key: an explicit
/// `"id": null` is still a request, a missing `id` makes a notification.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum UntypedCall {
    Request(UntypedRequest),
    Notification(UntypedNotification),
}

#[derive(Deserialize)]
struct CallFields {
    #[serde(default, deserialize_with = "present_id")]
    id: Option<RpcId>,
    method: String,
    #[serde(default)]
    params: Option<RequestParams>,
    jsonrpc: JsonRpcVersion,
}

fn present_id<'de, D>(deserializer: D) -> Result<Option<RpcId>, D::Error>
where
    D: Deserializer<'de>,
{
    RpcId::deserialize(deserializer).map(Some)
}

impl UntypedCall {
    /// Decode one call object, keeping its original text
    pub fn from_raw(raw: &RawValue) -> serde_json::Result<Self> {
        let fields: CallFields = serde_json::from_str(raw.get())?;
        let raw_json = Some(Box::<str>::from(raw.get()));
        Ok(match fields.id {
            Some(id) => UntypedCall::Request(UntypedRequest {
                id,
                method: fields.method,
                params: fields.params,
                version: fields.jsonrpc,
                raw_json,
            }),
            None => UntypedCall::Notification(UntypedNotification {
                method: fields.method,
                params: fields.params,
                version: fields.jsonrpc,
                raw_json,
            }),
        })
    }

    pub fn method(&self) -> &str {
        match self {
            UntypedCall::Request(req) => &req.method,
            UntypedCall::Notification(notif) => &notif.method,
        }
    }

    pub fn id(&self) -> Option<&RpcId> {
        match self {
            UntypedCall::Request(req) => Some(&req.id),
            UntypedCall::Notification(_) => None,
        }
    }

    pub fn params(&self) -> Option<&RequestParams> {
        match self {
            UntypedCall::Request(req) => req.params.as_ref(),
            UntypedCall::Notification(notif) => notif.params.as_ref(),
        }
    }

    /// Original JSON text, present when the call was decoded
    pub fn raw_json(&self) -> Option<&str> {
        match self {
            UntypedCall::Request(req) => req.raw_json.as_deref(),
            UntypedCall::Notification(notif) => notif.raw_json.as_deref(),
        }
    }

    pub fn is_request(&self) -> bool {
        matches!(self, UntypedCall::Request(_))
    }

    pub fn is_notification(&self) -> bool {
        matches!(self, UntypedCall::Notification(_))
    }
}

/// Untyped calls are already encoded and can be re-sent as they are
impl Call for UntypedCall {
    fn method(&self) -> &str {
        UntypedCall::method(self)
    }

    fn id(&self) -> Option<&RpcId> {
        UntypedCall::id(self)
    }

    fn with_serialized_params(
        &self,
        _serializer: &JsonRpcSerializer,
    ) -> Result<UntypedCall, ProtocolError> {
        Ok(self.clone())
    }
}

impl<'de> Deserialize<'de> for UntypedCall {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Box::<RawValue>::deserialize(deserializer)?;
        UntypedCall::from_raw(&raw).map_err(de::Error::custom)
    }
}
