pub mod client;
pub mod envelope;
pub mod resources;
pub mod source;

pub use client::RestClient;
pub use envelope::{ApiEnvelope, ErrorBody, Pagination, RemoteListResult};
pub use resources::Resource;
pub use source::{ListSource, ResourceEndpoint};
