// Application Layer - Authentication, dispatch and method use cases

pub mod auth;
pub mod context;
pub mod dispatcher;
pub mod method;
pub mod panic_guard;
pub mod settings;

// Re-exports
pub use auth::{admin_token, regular_token, Authenticator};
pub use context::{Audit, RequestContext};
pub use dispatcher::Dispatcher;
pub use settings::Settings;
