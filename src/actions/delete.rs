use crate::core::{ConsoleError, Result};
use tracing::debug;

/// Proof that a delete for `id` was confirmed and is in flight.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteTicket {
    id: String,
}

impl DeleteTicket {
    pub fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted(String),
    /// The dialog stays open with the error so the user can retry.
    Failed(ConsoleError),
    /// The ticket no longer matches the in-flight delete.
    Stale,
}

/// Confirmation dialog state for destructive row actions.
///
/// The "deleting" marker is tracked per row identifier, so a pending delete
/// of one row never shows as pending on another.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeleteConfirmation {
    target: Option<String>,
    in_flight: Option<String>,
    error: Option<String>,
}

impl DeleteConfirmation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open the dialog for `id`. Refused while another delete is in flight.
    pub fn open(&mut self, id: &str) -> Result<()> {
        if let Some(pending) = &self.in_flight {
            return Err(ConsoleError::validation(format!(
                "wait for the deletion of {pending} to finish"
            )));
        }
        self.target = Some(id.to_string());
        self.error = None;
        Ok(())
    }

    /// Close without deleting. Ignored while the request is in flight.
    pub fn cancel(&mut self) -> bool {
        if self.in_flight.is_some() {
            return false;
        }
        self.target = None;
        self.error = None;
        true
    }

    pub fn is_open(&self) -> bool {
        self.target.is_some()
    }

    pub fn target(&self) -> Option<&str> {
        self.target.as_deref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Confirm the open dialog. `None` if closed or already in flight.
    pub fn confirm(&mut self) -> Option<DeleteTicket> {
        if self.in_flight.is_some() {
            return None;
        }
        let id = self.target.clone()?;
        debug!(id = %id, "delete confirmed");
        self.in_flight = Some(id.clone());
        self.error = None;
        Some(DeleteTicket { id })
    }

    pub fn is_deleting(&self, id: &str) -> bool {
        self.in_flight.as_deref() == Some(id)
    }

    pub fn finish(&mut self, ticket: DeleteTicket, result: Result<()>) -> DeleteOutcome {
        if self.in_flight.as_deref() != Some(ticket.id.as_str()) {
            return DeleteOutcome::Stale;
        }
        self.in_flight = None;

        match result {
            Ok(()) => {
                self.target = None;
                self.error = None;
                DeleteOutcome::Deleted(ticket.id)
            }
            Err(err) => {
                self.error = Some(err.toast_message());
                DeleteOutcome::Failed(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deleting_marker_is_per_row() {
        let mut dialog = DeleteConfirmation::new();
        dialog.open("x").unwrap();
        let ticket = dialog.confirm().unwrap();

        assert!(dialog.is_deleting("x"));
        assert!(!dialog.is_deleting("y"));
        assert_eq!(ticket.id(), "x");
    }

    #[test]
    fn success_closes_and_clears() {
        let mut dialog = DeleteConfirmation::new();
        dialog.open("x").unwrap();
        let ticket = dialog.confirm().unwrap();

        assert_eq!(dialog.finish(ticket, Ok(())), DeleteOutcome::Deleted("x".to_string()));
        assert!(!dialog.is_open());
        assert!(!dialog.is_deleting("x"));
    }

    #[test]
    fn failure_keeps_dialog_open_and_clears_marker() {
        let mut dialog = DeleteConfirmation::new();
        dialog.open("x").unwrap();
        let ticket = dialog.confirm().unwrap();

        let outcome = dialog.finish(ticket, Err(ConsoleError::api(409, "Booking is active")));
        assert!(matches!(outcome, DeleteOutcome::Failed(_)));
        assert!(dialog.is_open());
        assert!(!dialog.is_deleting("x"));
        assert_eq!(dialog.error(), Some("Booking is active"));

        // retry
        assert!(dialog.confirm().is_some());
        assert!(dialog.error().is_none());
    }

    #[test]
    fn cannot_open_or_cancel_while_in_flight() {
        let mut dialog = DeleteConfirmation::new();
        dialog.open("x").unwrap();
        let _ticket = dialog.confirm().unwrap();

        assert!(dialog.open("y").is_err());
        assert!(!dialog.cancel());
        assert!(dialog.confirm().is_none());
        assert_eq!(dialog.target(), Some("x"));
    }

    #[test]
    fn stale_ticket_is_ignored() {
        let mut dialog = DeleteConfirmation::new();
        dialog.open("x").unwrap();
        let ticket = dialog.confirm().unwrap();
        dialog.finish(ticket.clone(), Ok(()));

        assert_eq!(dialog.finish(ticket, Ok(())), DeleteOutcome::Stale);
    }
}
