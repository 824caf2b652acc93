pub mod error;

pub use error::{ConsoleError, GENERIC_FAILURE_MESSAGE, Result};
