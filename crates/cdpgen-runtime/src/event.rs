//! Typed event receiver

use crate::{Codec, JsonCodec, MessageStream, RpcError, RpcResult};
use serde::de::DeserializeOwned;
use std::fmt;
use std::marker::PhantomData;

/// Receives events of one kind, decoded into `T`.
///
/// Generated code aliases this per event, e.g.
/// `pub type LoadEventFiredClient = EventClient<LoadEventFiredReply>;`.
pub struct EventClient<T> {
    method: &'static str,
    stream: Box<dyn MessageStream>,
    _payload: PhantomData<fn() -> T>,
}

impl<T: DeserializeOwned> EventClient<T> {
    /// Wrap a raw message stream
    pub fn new(method: &'static str, stream: Box<dyn MessageStream>) -> Self {
        Self {
            method,
            stream,
            _payload: PhantomData,
        }
    }

    /// Wire name of the event this client receives
    pub fn method(&self) -> &'static str {
        self.method
    }

    /// Wait for the next event.
    ///
    /// A message that fails to decode yields [`RpcError::Decode`]; the stream
    /// stays open and the next call receives the following message.
    pub async fn recv(&mut self) -> RpcResult<T> {
        let msg = self.stream.recv_msg().await?;
        JsonCodec::new()
            .decode(&msg)
            .map_err(|source| RpcError::Decode {
                context: self.method.to_string(),
                source,
            })
    }

    /// Close the underlying stream
    pub async fn close(&mut self) -> RpcResult<()> {
        self.stream.close().await
    }
}

impl<T> fmt::Debug for EventClient<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventClient")
            .field("method", &self.method)
            .finish_non_exhaustive()
    }
}
