//! Client facade emitter: `client.rs`.
//!
//! ```ignore
//! pub struct Client {
//!     pub page: Box<dyn Page>,
//! }
//!
//! #[cdpgen_runtime::async_trait]
//! pub trait Page: Send + Sync {
//!     async fn reload(&self, args: &commands::page::ReloadArgs) -> cdpgen_runtime::RpcResult<()>;
//!     async fn load_event_fired(&self) -> cdpgen_runtime::RpcResult<events::page::LoadEventFiredClient>;
//! }
//!
//! pub struct PageDomain { conn: Arc<dyn cdpgen_runtime::Connection> }
//! ```

use super::commands::{args_name, has_args, has_reply, reply_name};
use super::events::client_name;
use super::{EmitContext, docs, ident};
use crate::buffer::SourceBuffer;
use crate::naming;
use crate::schema::{Command, Domain, Event, Protocol};
use proc_macro2::TokenStream;
use quote::quote;

/// Output path.
pub const PATH: &str = "client.rs";

/// Emit the aggregate client and one trait plus implementation per domain.
pub fn emit(ctx: &EmitContext<'_>, protocol: &Protocol, buffer: &mut SourceBuffer) {
    if protocol.domains.is_empty() {
        return;
    }

    buffer.write_header(header(ctx, protocol));
    buffer.append(aggregate(protocol));
    for domain in &protocol.domains {
        buffer.append(domain_api(ctx, domain));
    }
}

fn header(ctx: &EmitContext<'_>, protocol: &Protocol) -> TokenStream {
    let rt = ctx.runtime();
    let doc = docs::inner_attrs(&["Protocol client facade.".to_string()]);
    let uses_commands = protocol
        .domains
        .iter()
        .flat_map(|d| &d.commands)
        .any(|c| has_args(c) || has_reply(c));
    let uses_events = protocol.domains.iter().any(|d| !d.events.is_empty());

    let commands = if uses_commands {
        quote!(use super::commands;)
    } else {
        TokenStream::new()
    };
    let events = if uses_events {
        quote!(use super::events;)
    } else {
        TokenStream::new()
    };
    let cmd_registry = if protocol.domains.iter().any(|d| !d.commands.is_empty()) {
        quote!(use super::commands::CmdType;)
    } else {
        TokenStream::new()
    };
    let event_registry = if uses_events {
        quote!(use super::events::EventType;)
    } else {
        TokenStream::new()
    };

    quote! {
        #doc
        #commands
        #events
        #cmd_registry
        #event_registry
        use #rt::{Connection, RpcResult};
        use std::sync::Arc;
    }
}

fn trait_name(domain: &Domain) -> String {
    naming::type_name(&domain.domain)
}

fn impl_name(domain: &Domain) -> String {
    format!("{}Domain", naming::type_name(&domain.domain))
}

/// `Client` with one field per domain.
fn aggregate(protocol: &Protocol) -> TokenStream {
    let fields = protocol.domains.iter().map(|d| {
        let doc = docs::doc_attrs(d);
        let field = ident(&naming::module_name(&d.domain));
        let api = ident(&trait_name(d));
        quote! {
            #doc
            pub #field: Box<dyn #api>
        }
    });
    let inits = protocol.domains.iter().map(|d| {
        let field = ident(&naming::module_name(&d.domain));
        let binding = ident(&impl_name(d));
        quote!(#field: Box::new(#binding::new(Arc::clone(&conn))))
    });

    quote! {
        /// Protocol client with one field per domain.
        pub struct Client {
            #(#fields,)*
        }

        impl Client {
            /// Bind every domain to `conn`.
            pub fn new(conn: Arc<dyn Connection>) -> Self {
                Self {
                    #(#inits,)*
                }
            }
        }

        impl std::fmt::Debug for Client {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.debug_struct("Client").finish_non_exhaustive()
            }
        }
    }
}

/// Capability trait of a domain and its connection-bound implementation.
fn domain_api(ctx: &EmitContext<'_>, domain: &Domain) -> TokenStream {
    let rt = ctx.runtime();
    let doc = docs::doc_attrs(domain);
    let api = ident(&trait_name(domain));
    let binding_name = impl_name(domain);
    let binding = ident(&binding_name);
    let binding_doc = format!(" Binds [`{api}`] to a connection.");

    let module = ident(&naming::module_name(&domain.domain));
    let mut signatures = Vec::new();
    let mut bodies = Vec::new();

    for command in &domain.commands {
        let doc = docs::doc_attrs(command);
        let sig = command_signature(&module, command);
        let body = command_body(rt, domain, command);
        signatures.push(quote!(#doc #sig;));
        bodies.push(quote!(#sig { #body }));
    }
    for event in &domain.events {
        let doc = docs::doc_attrs(event);
        let sig = event_signature(&module, event);
        let body = event_body(rt, domain, event);
        signatures.push(quote!(#doc #sig;));
        bodies.push(quote!(#sig { #body }));
    }

    // A domain with only types has nothing that reads the connection.
    let unread = if signatures.is_empty() {
        quote!(#[allow(dead_code)])
    } else {
        TokenStream::new()
    };

    quote! {
        #doc
        #[#rt::async_trait]
        pub trait #api: Send + Sync {
            #(#signatures)*
        }

        #[doc = #binding_doc]
        #[derive(Clone)]
        pub struct #binding {
            #unread
            conn: Arc<dyn Connection>,
        }

        impl #binding {
            pub fn new(conn: Arc<dyn Connection>) -> Self {
                Self { conn }
            }
        }

        impl std::fmt::Debug for #binding {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.debug_struct(#binding_name).finish_non_exhaustive()
            }
        }

        #[#rt::async_trait]
        impl #api for #binding {
            #(#bodies)*
        }
    }
}

fn command_signature(module: &proc_macro2::Ident, command: &Command) -> TokenStream {
    let method = ident(&naming::field_name(&command.name));
    let args = if has_args(command) {
        let args = ident(&args_name(command));
        quote!(, args: &commands::#module::#args)
    } else {
        TokenStream::new()
    };
    let reply = if has_reply(command) {
        let reply = ident(&reply_name(command));
        quote!(commands::#module::#reply)
    } else {
        quote!(())
    };
    quote!(async fn #method(&self #args) -> RpcResult<#reply>)
}

fn command_body(rt: &syn::Path, domain: &Domain, command: &Command) -> TokenStream {
    let variant = ident(&naming::registry_variant(&domain.domain, &command.name));
    let args = if has_args(command) {
        quote!(args)
    } else {
        quote!(&())
    };
    let call = if has_reply(command) {
        quote!(invoke)
    } else {
        quote!(invoke_unit)
    };
    quote!(#rt::#call(self.conn.as_ref(), CmdType::#variant.as_str(), #args).await)
}

fn event_signature(module: &proc_macro2::Ident, event: &Event) -> TokenStream {
    let method = ident(&naming::field_name(&event.name));
    let client = ident(&client_name(event));
    quote!(async fn #method(&self) -> RpcResult<events::#module::#client>)
}

fn event_body(rt: &syn::Path, domain: &Domain, event: &Event) -> TokenStream {
    let variant = ident(&naming::registry_variant(&domain.domain, &event.name));
    quote!(#rt::subscribe(self.conn.as_ref(), EventType::#variant.as_str()).await)
}
