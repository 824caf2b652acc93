use crate::api::client::RestClient;
use crate::api::resources::{Resource, location_service_items_path};
use crate::collections::{
    ChildItem, CollectionEditor, ItemEndpoint, LOCATIONS_LIMIT, SERVICES_PER_LOCATION_LIMIT,
    SyncStrategy,
};
use crate::core::Result;
use crate::list::entity::ListEntity;
use serde::{Deserialize, Serialize};

/// A location landing page listing the services offered in one city.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationService {
    #[serde(alias = "_id")]
    pub id: String,
    pub city: String,
    pub slug: String,
    #[serde(default)]
    pub services: Vec<ServiceItem>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceItem {
    #[serde(default, alias = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub title: String,
    #[serde(default)]
    pub description: String,
}

impl ChildItem for ServiceItem {
    fn child_id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn set_child_id(&mut self, id: Option<String>) {
        self.id = id;
    }
}

impl LocationService {
    /// Editor over this page's services, synced through the per-item endpoints.
    pub fn services_editor(&self) -> CollectionEditor<ServiceItem> {
        CollectionEditor::new(
            self.services.clone(),
            SyncStrategy::PerItem,
            Some(SERVICES_PER_LOCATION_LIMIT),
        )
    }

    pub fn services_endpoint(&self, client: RestClient) -> ItemEndpoint {
        ItemEndpoint::new(client, location_service_items_path(&self.id, None), "service")
    }
}

impl ListEntity for LocationService {
    const RESOURCE: Resource = Resource::LocationServices;
    const COLUMNS: &'static [&'static str] = &["City", "Slug", "Services"];

    fn id(&self) -> &str {
        &self.id
    }

    fn display_name(&self) -> &str {
        &self.city
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.city.clone(),
            self.slug.clone(),
            self.services.len().to_string(),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewLocation {
    pub city: String,
    pub slug: String,
}

/// Create a location page unless `existing` pages already fill the quota.
pub async fn create_location(
    client: &RestClient,
    existing: usize,
    draft: &NewLocation,
) -> Result<LocationService> {
    LOCATIONS_LIMIT.check(existing)?;
    let resource = Resource::LocationServices;
    let envelope = client.post(resource.path(), draft).await?;
    envelope.resource(resource.item_key())
}
