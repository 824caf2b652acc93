//! Route-entry auth check and the page title store.

pub mod guard;
pub mod title;
pub mod token;

pub use guard::{RouteDecision, RouteGuard, SIGN_IN_PATH};
pub use title::PageTitle;
pub use token::{SessionTokens, demo_token, token_expiry};
