//! Command invocation and event subscription helpers

use crate::{Codec, Connection, EventClient, JsonCodec, RpcResult};
use serde::Serialize;
use serde::de::DeserializeOwned;

/// Invoke a command and decode its reply.
///
/// `args` that encode to `null` (pass `&()`) are sent without params.
pub async fn invoke<A, R>(conn: &dyn Connection, method: &str, args: &A) -> RpcResult<R>
where
    A: Serialize + ?Sized + Sync,
    R: DeserializeOwned,
{
    let codec = JsonCodec::new();
    let params = codec.encode_params(args)?;
    tracing::trace!(method, has_params = params.is_some(), "invoke");
    let reply = conn.invoke(method, params).await?;
    Ok(codec.decode(&reply)?)
}

/// Invoke a command that declares no return values.
pub async fn invoke_unit<A>(conn: &dyn Connection, method: &str, args: &A) -> RpcResult<()>
where
    A: Serialize + ?Sized + Sync,
{
    let params = JsonCodec::new().encode_params(args)?;
    tracing::trace!(method, has_params = params.is_some(), "invoke");
    conn.invoke(method, params).await?;
    Ok(())
}

/// Open a typed event stream for `method`.
pub async fn subscribe<T>(conn: &dyn Connection, method: &'static str) -> RpcResult<EventClient<T>>
where
    T: DeserializeOwned,
{
    let stream = conn.subscribe(method).await?;
    tracing::trace!(method, "subscribed");
    Ok(EventClient::new(method, stream))
}
