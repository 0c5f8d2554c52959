//! HTTP server: handlers, routes and the builder that wires storage into them

pub mod builder;
pub mod handlers;
pub mod router;
pub mod session;

pub use builder::ServerBuilder;
pub use handlers::AppState;
pub use session::SessionHandle;
