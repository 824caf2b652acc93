pub mod delete;

pub use delete::{DeleteConfirmation, DeleteOutcome, DeleteTicket};
