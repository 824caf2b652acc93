// ============================================================================
// care_console library
// ============================================================================
//
// Headless core of the marketplace admin console: typed REST access, the
// debounced search + paginated list controller, row delete confirmation,
// capped child-collection editors, route-entry session checks and a seeded
// demo API speaking the same envelope as the backend.

pub mod actions;
pub mod api;
pub mod collections;
pub mod config;
pub mod core;
pub mod demo;
pub mod entities;
pub mod list;
pub mod notify;
pub mod session;

pub use api::{ApiEnvelope, RemoteListResult, Resource, RestClient};
pub use config::ConsoleConfig;
pub use core::{ConsoleError, Result};
pub use list::{ListController, ListEntity, ListQuery};
pub use notify::{Notifier, Toast, ToastQueue};
