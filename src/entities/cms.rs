//! Marketing CMS documents with embedded, capped collections.

use crate::api::client::RestClient;
use crate::api::resources::Resource;
use crate::collections::{
    ArrayFieldEndpoint, BADGES_LIMIT, ChildItem, CollectionEditor, GALLERY_IMAGES_LIMIT,
    POINTS_LIMIT, SyncStrategy,
};
use crate::list::entity::ListEntity;
use serde::{Deserialize, Serialize};

/// Path of the singleton "about" section document.
pub const ABOUT_SECTION_PATH: &str = "cms/about";

macro_rules! child_item {
    ($ty:ty) => {
        impl ChildItem for $ty {
            fn child_id(&self) -> Option<&str> {
                self.id.as_deref()
            }

            fn set_child_id(&mut self, id: Option<String>) {
                self.id = id;
            }
        }
    };
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Point {
    #[serde(default, alias = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub title: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Badge {
    #[serde(default, alias = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GalleryImage {
    #[serde(default, alias = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub url: String,
    #[serde(default)]
    pub alt: String,
}

child_item!(Point);
child_item!(Badge);
child_item!(GalleryImage);

/// The "about" page section: selling points plus an image gallery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AboutSection {
    pub heading: String,
    #[serde(default)]
    pub points: Vec<Point>,
    #[serde(default)]
    pub gallery: Vec<GalleryImage>,
}

impl AboutSection {
    pub fn points_editor(&self) -> CollectionEditor<Point> {
        CollectionEditor::new(
            self.points.clone(),
            SyncStrategy::ArrayReplace,
            Some(POINTS_LIMIT),
        )
    }

    pub fn gallery_editor(&self) -> CollectionEditor<GalleryImage> {
        CollectionEditor::new(
            self.gallery.clone(),
            SyncStrategy::ArrayReplace,
            Some(GALLERY_IMAGES_LIMIT),
        )
    }

    pub fn points_endpoint(client: RestClient) -> ArrayFieldEndpoint {
        ArrayFieldEndpoint::new(client, ABOUT_SECTION_PATH, "about", "points")
    }

    pub fn gallery_endpoint(client: RestClient) -> ArrayFieldEndpoint {
        ArrayFieldEndpoint::new(client, ABOUT_SECTION_PATH, "about", "gallery")
    }
}

/// A card on the Resources page carrying up to four badges.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceCard {
    #[serde(alias = "_id")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub badges: Vec<Badge>,
}

impl ResourceCard {
    pub fn badges_editor(&self) -> CollectionEditor<Badge> {
        CollectionEditor::new(
            self.badges.clone(),
            SyncStrategy::ArrayReplace,
            Some(BADGES_LIMIT),
        )
    }

    /// Badges are saved by updating the whole card.
    pub fn badges_endpoint(&self, client: RestClient) -> ArrayFieldEndpoint {
        ArrayFieldEndpoint::new(
            client,
            Resource::ResourceCards.item_path(&self.id),
            Resource::ResourceCards.item_key(),
            "badges",
        )
    }
}

impl ListEntity for ResourceCard {
    const RESOURCE: Resource = Resource::ResourceCards;
    const COLUMNS: &'static [&'static str] = &["Title", "Badges"];

    fn id(&self) -> &str {
        &self.id
    }

    fn display_name(&self) -> &str {
        &self.title
    }

    fn cells(&self) -> Vec<String> {
        let badges = self
            .badges
            .iter()
            .map(|badge| badge.label.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        vec![self.title.clone(), badges]
    }
}
