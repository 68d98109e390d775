//! Procedural macros for the jrpx JSON-RPC client
//!
//! This crate provides the `rpc!` macro, which lets a remote call read like a
//! local method call on a dotted path. The macro only rewrites syntax: the
//! call itself still goes through `RpcClient`, with all of its checks.
//!
//! # Available Macros
//!
//! ## `rpc!` - Remote Method Call
//!
//! Turns `client => ns.sub.method(args)` into the equivalent `MethodHandle`
//! builder chain and yields the `send()` future:
//! - The dotted path becomes the wire method name, joined at compile time
//! - Each argument is serialized with `serde` when the call is built
//! - Mixing positional and named arguments is a compile error
//!
//! # Benefits Over Manual Implementation
//!
//! Without macros, you'd write:
//!
//! ```ignore
//! let user = client
//!     .method("users")
//!     .child("get")
//!     .args()
//!     .named("id", 42)
//!     .send()
//!     .await?;
//! ```
//!
//! With macros, you write:
//!
//! ```ignore
//! let user = rpc!(client => users.get(id = 42)).await?;
//! ```
//!
//! # Examples
//!
//! ```ignore
//! use jrpx::{rpc, RpcClient};
//!
//! # async fn example() -> jrpx::Result<()> {
//! let client = RpcClient::new("http://localhost:8080/rpc")?;
//!
//! // Positional arguments
//! let sum = rpc!(client => math.add(5, 3)).await?;
//!
//! // Named arguments
//! let created = rpc!(client => users.create(name = "alice", admin = false)).await?;
//!
//! // No arguments: `params` is left out of the request
//! let pong = rpc!(client => system.ping()).await?;
//! # Ok(())
//! # }
//! ```

mod call;

use proc_macro::TokenStream;

/// Function-like macro for calling a remote method by its dotted path
///
/// # Syntax
///
/// ```ignore
/// rpc!(<client expr> => <segment>(.<segment>)*( <args> ))
/// ```
///
/// `<client expr>` is anything that auto-refs to an `RpcClient`: a local, a
/// field such as `self.client`, or a reference. `<args>` is either a list of
/// expressions or a list of `name = expr` pairs, possibly empty.
///
/// # Generated Code
///
/// ```ignore
/// rpc!(client => math.add(1, 2))
/// ```
///
/// Expands to:
///
/// ```ignore
/// (client).method("math.add").args().arg(1).arg(2).send()
/// ```
///
/// The result is a future resolving to `Result<Option<serde_json::Value>>`.
///
/// # Method Names
///
/// Path segments may be Rust keywords (`admin.type()`), and raw identifiers
/// lose their `r#` prefix (`ns.r#match()` calls `"ns.match"`).
///
/// # Limitations
///
/// - Segments must be identifiers; names containing `-` need
///   `client.method("with-dash")`
/// - The typed result form is `client.method(..).args()...send_typed()`
#[proc_macro]
pub fn rpc(input: TokenStream) -> TokenStream {
    call::rpc_impl(input.into()).into()
}
