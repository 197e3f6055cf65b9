//! Procura - procurement request intake and tracking service
//!
//! HTTP surface for the procurement workflow: one handler per proxy
//! operation, forwarding to the remote scripting endpoint through the core
//! service and normalizing errors into the `{success, ...}` envelope the
//! clients expect.

pub mod context;
pub mod error;
pub mod routes;
pub mod utils;

pub use context::AppContext;
pub use routes::router;
