//! Command emitter: argument and reply payloads in `commands.rs`.

use super::{EmitContext, docs, fields, ident, registry};
use crate::buffer::SourceBuffer;
use crate::error::GenResult;
use crate::naming;
use crate::resolve::{Field, Scope};
use crate::schema::{Command, Domain, Protocol};
use proc_macro2::TokenStream;
use quote::{format_ident, quote};

/// Output path.
pub const PATH: &str = "commands.rs";

/// Name of the command registry.
pub const REGISTRY: &str = "CmdType";

/// Module docs of `commands.rs`.
pub fn header() -> TokenStream {
    docs::inner_attrs(&["Command payloads and wire names.".to_string()])
}

/// Append the `CmdType` registry for every command of `protocol`.
pub fn emit_registry(ctx: &EmitContext<'_>, protocol: &Protocol, buffer: &mut SourceBuffer) {
    let entries = registry::commands(protocol);
    if entries.is_empty() {
        return;
    }
    buffer.write_header(header());
    buffer.append(registry::registry(
        ctx,
        REGISTRY,
        "Wire names of every command.",
        &entries,
    ));
}

/// Append `pub mod <domain>` with the domain's payloads, if it has any.
pub fn emit_domain(
    ctx: &EmitContext<'_>,
    domain: &Domain,
    buffer: &mut SourceBuffer,
) -> GenResult<()> {
    let mut items = Vec::new();
    for command in &domain.commands {
        items.push(emit_command(ctx, domain, command)?);
    }
    if items.iter().all(TokenStream::is_empty) {
        return Ok(());
    }

    buffer.write_header(header());
    let module = ident(&naming::module_name(&domain.domain));
    let doc = docs::attrs(&[format!("Command payloads of the `{}` domain.", domain.domain)]);
    buffer.append(quote! {
        #doc
        pub mod #module {
            #(#items)*
        }
    });
    Ok(())
}

/// Whether a command gets an argument payload.
pub fn has_args(command: &Command) -> bool {
    !command.parameters.is_empty()
}

/// Whether a command gets a reply payload.
pub fn has_reply(command: &Command) -> bool {
    !command.returns.is_empty()
}

pub fn args_name(command: &Command) -> String {
    format!("{}Args", naming::type_name(&command.name))
}

pub fn reply_name(command: &Command) -> String {
    format!("{}Reply", naming::type_name(&command.name))
}

/// Payloads of one command; empty for a command without parameters and returns.
pub fn emit_command(
    ctx: &EmitContext<'_>,
    domain: &Domain,
    command: &Command,
) -> GenResult<TokenStream> {
    let wire = naming::wire_name(&domain.domain, &command.name);
    let mut tokens = TokenStream::new();

    if has_args(command) {
        let fields = ctx.resolver().fields(
            &domain.domain,
            None,
            &command.name,
            &command.parameters,
        )?;
        let mut lines = vec![format!("Arguments of `{wire}`."), String::new()];
        lines.extend(docs::lines(command));
        let name = args_name(command);
        tokens.extend(fields::record(
            ctx,
            &name,
            docs::attrs(&lines),
            &fields,
            Scope::Payloads,
        ));
        tokens.extend(builder(&name, &fields));
    }

    if has_reply(command) {
        let fields = ctx.resolver().fields(
            &domain.domain,
            None,
            &command.name,
            &command.returns,
        )?;
        let lines = vec![format!("Reply of `{wire}`.")];
        tokens.extend(fields::record(
            ctx,
            &reply_name(command),
            docs::attrs(&lines),
            &fields,
            Scope::Payloads,
        ));
    }

    Ok(tokens)
}

/// `new` taking the required parameters plus one `with_` setter per
/// optional parameter.
fn builder(name: &str, fields: &[Field<'_>]) -> TokenStream {
    let name = ident(name);
    let (required, optional): (Vec<_>, Vec<_>) =
        fields.iter().partition(|f| !f.property.optional);

    let params = required.iter().map(|f| {
        let arg = ident(&f.ident);
        let ty = f.ty(Scope::Payloads);
        quote!(#arg: #ty)
    });
    let body = if required.is_empty() {
        quote!(Self::default())
    } else {
        let names = required.iter().map(|f| ident(&f.ident));
        let rest = if optional.is_empty() {
            TokenStream::new()
        } else {
            quote!(..Default::default())
        };
        quote!(Self { #(#names,)* #rest })
    };
    let allow = if required.len() > 7 {
        quote!(#[allow(clippy::too_many_arguments)])
    } else {
        TokenStream::new()
    };

    let setters = optional.iter().map(|f| {
        let doc = docs::property_doc_attrs(f.property);
        let field = ident(&f.ident);
        let setter = format_ident!("with_{}", f.ident);
        let ty = f.repr.tokens(Scope::Payloads);
        let store = f.store(&field);
        quote! {
            #doc
            pub fn #setter(mut self, #field: #ty) -> Self {
                self.#field = #store;
                self
            }
        }
    });

    quote! {
        impl #name {
            /// Create arguments from the required parameters.
            #allow
            pub fn new(#(#params),*) -> Self {
                #body
            }

            #(#setters)*
        }
    }
}
