//! Transport contract consumed by generated clients

use crate::RpcResult;
use async_trait::async_trait;

/// A connection to a protocol endpoint.
///
/// Implementations own request/response correlation and event fan-out. The
/// generated domain bindings only ever call these two methods.
///
/// # Example
///
/// ```ignore
/// struct WsConn { /* socket, pending requests, subscribers */ }
///
/// #[cdpgen_runtime::async_trait]
/// impl Connection for WsConn {
///     async fn invoke(&self, method: &str, params: Option<Vec<u8>>) -> RpcResult<Vec<u8>> {
///         self.send_and_wait(method, params).await
///     }
///
///     async fn subscribe(&self, method: &str) -> RpcResult<Box<dyn MessageStream>> {
///         Ok(Box::new(self.listen(method)))
///     }
/// }
/// ```
#[async_trait]
pub trait Connection: Send + Sync {
    /// Invoke `method` with optional JSON-encoded params, returning the JSON-encoded result
    async fn invoke(&self, method: &str, params: Option<Vec<u8>>) -> RpcResult<Vec<u8>>;

    /// Open a stream of JSON-encoded event messages for `method`
    async fn subscribe(&self, method: &str) -> RpcResult<Box<dyn MessageStream>>;
}

/// A stream of raw inbound messages for one event
#[async_trait]
pub trait MessageStream: Send {
    /// Wait for the next message
    async fn recv_msg(&mut self) -> RpcResult<Vec<u8>>;

    /// Stop receiving; later calls to `recv_msg` fail
    async fn close(&mut self) -> RpcResult<()>;
}
