//! Event emitter: payloads and typed receivers in `events.rs`.

use super::{EmitContext, docs, fields, ident, registry};
use crate::buffer::SourceBuffer;
use crate::error::GenResult;
use crate::naming;
use crate::resolve::Scope;
use crate::schema::{Domain, Event, Protocol};
use proc_macro2::TokenStream;
use quote::quote;

/// Output path.
pub const PATH: &str = "events.rs";

/// Name of the event registry.
pub const REGISTRY: &str = "EventType";

/// Module docs of `events.rs`.
pub fn header() -> TokenStream {
    docs::inner_attrs(&["Event payloads, receivers and wire names.".to_string()])
}

/// Append the `EventType` registry for every event of `protocol`.
pub fn emit_registry(ctx: &EmitContext<'_>, protocol: &Protocol, buffer: &mut SourceBuffer) {
    let entries = registry::events(protocol);
    if entries.is_empty() {
        return;
    }
    buffer.write_header(header());
    buffer.append(registry::registry(
        ctx,
        REGISTRY,
        "Wire names of every event.",
        &entries,
    ));
}

/// Append `pub mod <domain>` with the domain's event payloads, if it has any.
pub fn emit_domain(
    ctx: &EmitContext<'_>,
    domain: &Domain,
    buffer: &mut SourceBuffer,
) -> GenResult<()> {
    if domain.events.is_empty() {
        return Ok(());
    }

    let items = domain
        .events
        .iter()
        .map(|event| emit_event(ctx, domain, event))
        .collect::<GenResult<Vec<_>>>()?;

    buffer.write_header(header());
    let module = ident(&naming::module_name(&domain.domain));
    let doc = docs::attrs(&[format!("Event payloads of the `{}` domain.", domain.domain)]);
    buffer.append(quote! {
        #doc
        pub mod #module {
            #(#items)*
        }
    });
    Ok(())
}

pub fn reply_name(event: &Event) -> String {
    format!("{}Reply", naming::type_name(&event.name))
}

pub fn client_name(event: &Event) -> String {
    format!("{}Client", naming::type_name(&event.name))
}

/// Payload struct and receiver alias of one event.
pub fn emit_event(ctx: &EmitContext<'_>, domain: &Domain, event: &Event) -> GenResult<TokenStream> {
    let wire = naming::wire_name(&domain.domain, &event.name);
    let fields = ctx
        .resolver()
        .fields(&domain.domain, None, &event.name, &event.parameters)?;

    let mut lines = vec![format!("Payload of `{wire}`."), String::new()];
    lines.extend(docs::lines(event));
    let reply = reply_name(event);
    let record = fields::record(ctx, &reply, docs::attrs(&lines), &fields, Scope::Payloads);

    let rt = ctx.runtime();
    let reply = ident(&reply);
    let client = ident(&client_name(event));
    let client_doc = format!(" Receives `{wire}` events.");

    Ok(quote! {
        #record

        #[doc = #client_doc]
        pub type #client = #rt::EventClient<#reply>;
    })
}
