use crate::api::resources::Resource;
use crate::list::entity::{FilterDef, ListEntity};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CareSeeker {
    #[serde(alias = "_id")]
    pub id: String,
    pub full_name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default = "default_account_status")]
    pub status: String,
}

fn default_account_status() -> String {
    "active".to_string()
}

impl ListEntity for CareSeeker {
    const RESOURCE: Resource = Resource::CareSeekers;
    const FILTERS: &'static [FilterDef] =
        &[FilterDef::server("status", &["all", "active", "inactive"])];
    const COLUMNS: &'static [&'static str] = &["Name", "Email", "Phone", "Status"];

    fn id(&self) -> &str {
        &self.id
    }

    fn display_name(&self) -> &str {
        &self.full_name
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.full_name.clone(),
            self.email.clone(),
            self.phone.clone().unwrap_or_else(|| "-".to_string()),
            self.status.clone(),
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Female,
    Male,
    Other,
}

impl Gender {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Female => "female",
            Self::Male => "male",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Caregiver {
    #[serde(alias = "_id")]
    pub id: String,
    pub full_name: String,
    pub email: String,
    pub gender: Gender,
    pub review_status: String,
    #[serde(default)]
    pub allocated_bookings: u32,
}

impl Caregiver {
    /// A caregiver counts as active while any booking is allocated to them.
    pub fn is_active(&self) -> bool {
        self.allocated_bookings > 0
    }
}

impl ListEntity for Caregiver {
    const RESOURCE: Resource = Resource::Caregivers;
    const FILTERS: &'static [FilterDef] = &[
        FilterDef::server("status", &["all", "pending", "approved", "rejected"]),
        FilterDef::client("gender", &["all", "female", "male", "other"]),
        FilterDef::client("activity", &["all", "active", "inactive"]),
    ];
    const COLUMNS: &'static [&'static str] = &["Name", "Email", "Gender", "Review", "Active"];

    fn id(&self) -> &str {
        &self.id
    }

    fn display_name(&self) -> &str {
        &self.full_name
    }

    fn matches_client_filter(&self, name: &str, value: &str) -> bool {
        match name {
            "gender" => self.gender.as_str() == value,
            "activity" => match value {
                "active" => self.is_active(),
                "inactive" => !self.is_active(),
                _ => true,
            },
            _ => true,
        }
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.full_name.clone(),
            self.email.clone(),
            self.gender.to_string(),
            self.review_status.clone(),
            if self.is_active() { "yes" } else { "no" }.to_string(),
        ]
    }
}

/// A caregiver job application awaiting review.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    #[serde(alias = "_id")]
    pub id: String,
    pub full_name: String,
    pub email: String,
    #[serde(default)]
    pub experience_years: u32,
    pub status: String,
}

impl ListEntity for Application {
    const RESOURCE: Resource = Resource::Applications;
    const FILTERS: &'static [FilterDef] = &[FilterDef::server(
        "status",
        &["all", "pending", "reviewed", "accepted", "rejected"],
    )];
    const COLUMNS: &'static [&'static str] = &["Name", "Email", "Experience", "Status"];

    fn id(&self) -> &str {
        &self.id
    }

    fn display_name(&self) -> &str {
        &self.full_name
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.full_name.clone(),
            self.email.clone(),
            format!("{} yrs", self.experience_years),
            self.status.clone(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn caregiver_accepts_mongo_style_ids() {
        let caregiver: Caregiver = serde_json::from_value(json!({
            "_id": "cg-1",
            "fullName": "Jane Doe",
            "email": "jane@example.com",
            "gender": "female",
            "reviewStatus": "approved",
            "allocatedBookings": 3
        }))
        .unwrap();

        assert_eq!(caregiver.id, "cg-1");
        assert!(caregiver.is_active());
        assert!(caregiver.matches_client_filter("activity", "active"));
        assert!(!caregiver.matches_client_filter("gender", "male"));
    }

    #[test]
    fn zero_allocations_means_inactive() {
        let caregiver: Caregiver = serde_json::from_value(json!({
            "id": "cg-2",
            "fullName": "Sam",
            "email": "sam@example.com",
            "gender": "male",
            "reviewStatus": "pending"
        }))
        .unwrap();

        assert!(!caregiver.is_active());
        assert_eq!(caregiver.cells()[4], "no");
    }
}
