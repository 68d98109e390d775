//! `rpc!` procedural macro implementation
//!
//! This module parses the `rpc!` call syntax with `syn` and generates the
//! equivalent `MethodHandle` builder chain with `quote`.
//!
//! # Macro Expansion Process
//!
//! 1. **Parse**: the client expression, `=>`, a dotted method path and a
//!    parenthesized argument list
//! 2. **Validate**: arguments are all positional or all named
//! 3. **Join**: the path segments become one string literal, so the method
//!    name is fixed at compile time
//! 4. **Quote**: emit `client.method(name).args()` followed by one `.arg` or
//!    `.named` per argument and a final `.send()`
//!
//! # Code Generation Example
//!
//! Input:
//! ```ignore
//! rpc!(client => math.add(1, 2))
//! ```
//!
//! Generated output:
//! ```ignore
//! (client).method("math.add").args().arg(1).arg(2).send()
//! ```
//!
//! The expansion only uses method-call syntax, so it resolves no paths and
//! works whether the caller depends on `jrpx` or on `jrpx-client` directly.

use proc_macro2::{Span, TokenStream};
use quote::quote;
use syn::ext::IdentExt;
use syn::parse::{Parse, ParseStream};
use syn::punctuated::Punctuated;
use syn::{parenthesized, Expr, Ident, LitStr, Token};

/// Parsed form of `rpc!(client => a.b.c(args...))`
pub struct RpcCall {
    client: Expr,
    segments: Vec<Ident>,
    args: Punctuated<CallArg, Token![,]>,
}

/// One argument inside the parentheses
pub enum CallArg {
    /// `expr`
    Positional(Expr),
    /// `name = expr`
    Named(Ident, Expr),
}

impl Parse for RpcCall {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let client: Expr = input.parse()?;
        input.parse::<Token![=>]>()?;

        // Keywords are valid remote method names (`admin.type`)
        let mut segments = vec![input.call(Ident::parse_any)?];
        while input.peek(Token![.]) {
            input.parse::<Token![.]>()?;
            segments.push(input.call(Ident::parse_any)?);
        }

        let content;
        parenthesized!(content in input);
        let args = content.parse_terminated(CallArg::parse, Token![,])?;

        if !input.is_empty() {
            return Err(input.error("unexpected tokens after the argument list"));
        }

        Ok(RpcCall {
            client,
            segments,
            args,
        })
    }
}

impl Parse for CallArg {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        // `name = value`, but not `a == b`
        if input.peek(Ident::peek_any) && input.peek2(Token![=]) && !input.peek2(Token![==]) {
            let name = input.call(Ident::parse_any)?;
            input.parse::<Token![=]>()?;
            let value: Expr = input.parse()?;
            Ok(CallArg::Named(name, value))
        } else {
            Ok(CallArg::Positional(input.parse()?))
        }
    }
}

impl RpcCall {
    /// The dotted method name sent on the wire
    pub fn method_name(&self) -> String {
        self.segments
            .iter()
            .map(|s| s.unraw().to_string())
            .collect::<Vec<_>>()
            .join(".")
    }

    fn validate(&self) -> syn::Result<()> {
        let has_positional = self
            .args
            .iter()
            .any(|arg| matches!(arg, CallArg::Positional(_)));
        let first_named = self.args.iter().find_map(|arg| match arg {
            CallArg::Named(name, _) => Some(name),
            CallArg::Positional(_) => None,
        });

        match first_named {
            Some(name) if has_positional => Err(syn::Error::new(
                name.span(),
                "use positional or named arguments, not both",
            )),
            _ => Ok(()),
        }
    }

    /// Generate the builder chain
    pub fn expand(&self) -> syn::Result<TokenStream> {
        self.validate()?;

        let client = &self.client;
        let name = LitStr::new(&self.method_name(), Span::call_site());

        let steps = self.args.iter().map(|arg| match arg {
            CallArg::Positional(value) => quote! { .arg(#value) },
            CallArg::Named(key, value) => {
                let key = LitStr::new(&key.unraw().to_string(), key.span());
                quote! { .named(#key, #value) }
            }
        });

        Ok(quote! {
            (#client).method(#name).args() #(#steps)* .send()
        })
    }
}

/// Entry point used by the `rpc!` macro
pub fn rpc_impl(input: TokenStream) -> TokenStream {
    match syn::parse2::<RpcCall>(input).and_then(|call| call.expand()) {
        Ok(tokens) => tokens,
        Err(err) => err.to_compile_error(),
    }
}
