use serde::{Deserialize, Serialize};
use std::fmt;

/// Top-level collections exposed by the admin API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Resource {
    CareSeekers,
    Caregivers,
    Bookings,
    Applications,
    Blogs,
    Testimonials,
    Faqs,
    LocationServices,
    ResourceCards,
}

impl Resource {
    pub const ALL: [Resource; 9] = [
        Resource::CareSeekers,
        Resource::Caregivers,
        Resource::Bookings,
        Resource::Applications,
        Resource::Blogs,
        Resource::Testimonials,
        Resource::Faqs,
        Resource::LocationServices,
        Resource::ResourceCards,
    ];

    /// Path segment below `/api/v1`.
    pub const fn path(self) -> &'static str {
        match self {
            Self::CareSeekers => "care-seekers",
            Self::Caregivers => "caregivers",
            Self::Bookings => "bookings",
            Self::Applications => "applications",
            Self::Blogs => "blogs",
            Self::Testimonials => "testimonials",
            Self::Faqs => "faqs",
            Self::LocationServices => "location-services",
            Self::ResourceCards => "resource-cards",
        }
    }

    /// Key under `data` holding a list of this resource.
    pub const fn list_key(self) -> &'static str {
        match self {
            Self::CareSeekers => "careSeekers",
            Self::Caregivers => "caregivers",
            Self::Bookings => "bookings",
            Self::Applications => "applications",
            Self::Blogs => "blogs",
            Self::Testimonials => "testimonials",
            Self::Faqs => "faqs",
            Self::LocationServices => "locationServices",
            Self::ResourceCards => "resourceCards",
        }
    }

    /// Key under `data` holding a single instance.
    pub const fn item_key(self) -> &'static str {
        match self {
            Self::CareSeekers => "careSeeker",
            Self::Caregivers => "caregiver",
            Self::Bookings => "booking",
            Self::Applications => "application",
            Self::Blogs => "blog",
            Self::Testimonials => "testimonial",
            Self::Faqs => "faq",
            Self::LocationServices => "locationService",
            Self::ResourceCards => "resourceCard",
        }
    }

    /// Human-readable title used for page headers.
    pub const fn title(self) -> &'static str {
        match self {
            Self::CareSeekers => "Care Seekers",
            Self::Caregivers => "Caregivers",
            Self::Bookings => "Bookings",
            Self::Applications => "Applications",
            Self::Blogs => "Blogs",
            Self::Testimonials => "Testimonials",
            Self::Faqs => "FAQs",
            Self::LocationServices => "Location Services",
            Self::ResourceCards => "Resource Cards",
        }
    }

    pub fn item_path(self, id: &str) -> String {
        format!("{}/{}", self.path(), id)
    }

    pub fn from_path(path: &str) -> Option<Self> {
        let path = path.trim_matches('/');
        Self::ALL.into_iter().find(|resource| resource.path() == path)
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Path of the per-item service endpoint of a location page.
pub fn location_service_items_path(location_id: &str, service_id: Option<&str>) -> String {
    match service_id {
        Some(service_id) => format!(
            "{}/{}/services/{}",
            Resource::LocationServices.path(),
            location_id,
            service_id
        ),
        None => format!("{}/{}/services", Resource::LocationServices.path(), location_id),
    }
}
