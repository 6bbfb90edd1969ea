//! cdpgen-runtime - Runtime support for generated protocol clients
//!
//! Code emitted by `cdpgen` links against this crate. It provides:
//! - [`Connection`] and [`MessageStream`], the transport contract a client is bound to
//! - [`invoke`], [`invoke_unit`] and [`subscribe`] used by the generated domain bindings
//! - [`EventClient`] typed event receiver
//! - [`WireEnum`] and the [`wire_enum`] codec for enumerated value sets
//! - the [`raw`] codec for opaque payloads
//! - [`Codec`] trait and [`JsonCodec`] implementation
//!
//! The transport itself (websocket framing, request id correlation) is not part
//! of this crate; applications supply it by implementing [`Connection`].

mod codec;
mod conn;
mod error;
mod event;
mod rpc;

pub mod raw;
pub mod wire_enum;

pub use async_trait::async_trait;
pub use codec::{Codec, CodecError, JsonCodec};
pub use conn::{Connection, MessageStream};
pub use error::{RpcError, RpcResult, UnrecognizedEnumValue};
pub use event::EventClient;
pub use rpc::{invoke, invoke_unit, subscribe};
pub use wire_enum::WireEnum;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        Connection, EventClient, MessageStream, RpcError, RpcResult, UnrecognizedEnumValue,
        WireEnum,
    };
}
