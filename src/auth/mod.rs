//! Caller identity: the auth cookie, the middleware that checks it, and log out.

mod cookie;
mod log_out;
mod middleware;
mod token;

pub use cookie::{COOKIE_TOKEN, DEFAULT_COOKIE_DURATION, invalidate_auth_cookie, set_auth_cookie};
pub use log_out::get_log_out;
pub use middleware::{AuthState, auth_guard};
pub(crate) use token::Token;
