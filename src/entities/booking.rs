use crate::api::resources::Resource;
use crate::list::entity::{FilterDef, ListEntity};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    #[default]
    Pending,
    Accepted,
    Completed,
    Cancelled,
}

impl BookingStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Accepted => "accepted",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }

    /// Terminal bookings can no longer change status.
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    #[serde(alias = "_id")]
    pub id: String,
    pub care_seeker_name: String,
    #[serde(default)]
    pub caregiver_name: Option<String>,
    pub status: BookingStatus,
    pub scheduled_at: DateTime<Utc>,
    #[serde(default)]
    pub hours: u32,
}

impl ListEntity for Booking {
    const RESOURCE: Resource = Resource::Bookings;
    const FILTERS: &'static [FilterDef] = &[
        FilterDef::server(
            "status",
            &["all", "pending", "accepted", "completed", "cancelled"],
        ),
        FilterDef::client("stage", &["all", "open", "closed"]),
    ];
    const COLUMNS: &'static [&'static str] =
        &["Care seeker", "Caregiver", "Scheduled", "Hours", "Status"];

    fn id(&self) -> &str {
        &self.id
    }

    fn display_name(&self) -> &str {
        &self.care_seeker_name
    }

    fn matches_client_filter(&self, name: &str, value: &str) -> bool {
        match (name, value) {
            ("stage", "open") => !self.status.is_terminal(),
            ("stage", "closed") => self.status.is_terminal(),
            _ => true,
        }
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.care_seeker_name.clone(),
            self.caregiver_name
                .clone()
                .unwrap_or_else(|| "unassigned".to_string()),
            self.scheduled_at.format("%Y-%m-%d %H:%M").to_string(),
            self.hours.to_string(),
            self.status.to_string(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::list::{ListQuery, refine};
    use serde_json::json;

    #[test]
    fn status_filter_options_match_wire_values() {
        let def = Booking::filter_def("status").unwrap();
        for status in [
            BookingStatus::Pending,
            BookingStatus::Accepted,
            BookingStatus::Completed,
            BookingStatus::Cancelled,
        ] {
            assert!(def.accepts(status.as_str()));
        }
    }

    #[test]
    fn unassigned_bookings_render_placeholder() {
        let booking: Booking = serde_json::from_value(json!({
            "id": "b-1",
            "careSeekerName": "Alice",
            "status": "accepted",
            "scheduledAt": "2026-03-01T09:30:00Z",
            "hours": 4
        }))
        .unwrap();

        assert_eq!(
            booking.cells(),
            vec!["Alice", "unassigned", "2026-03-01 09:30", "4", "accepted"]
        );
        assert!(booking.matches_client_filter("stage", "open"));
        assert!(!booking.matches_client_filter("stage", "closed"));
    }

    #[test]
    fn stage_filter_splits_open_and_closed_bookings() {
        let booking = |status: &str| -> Booking {
            serde_json::from_value(json!({
                "id": format!("b-{status}"),
                "careSeekerName": "Alice",
                "status": status,
                "scheduledAt": "2026-03-01T09:30:00Z"
            }))
            .unwrap()
        };
        let items: Vec<Booking> = ["pending", "accepted", "completed", "cancelled"]
            .into_iter()
            .map(booking)
            .collect();
        let mut query = ListQuery::for_entity::<Booking>(10);

        query.set_filter("stage", "closed");
        let closed: Vec<_> = refine(&items, &query).iter().map(|b| b.status).collect();
        assert_eq!(closed, vec![BookingStatus::Completed, BookingStatus::Cancelled]);

        query.set_filter("stage", "open");
        let open: Vec<_> = refine(&items, &query).iter().map(|b| b.status).collect();
        assert_eq!(open, vec![BookingStatus::Pending, BookingStatus::Accepted]);
        // Client filters never reach the request.
        assert!(query.key::<Booking>().filters.is_empty());
    }
}
