//! Editors for small ordered collections embedded in a parent document
//! (points, badges, service items, gallery images, locations).
//!
//! Two synchronization styles exist on the backend: the whole array is
//! replaced through the parent document, or each item has its own endpoint.

pub mod editor;
pub mod endpoints;

pub use editor::{CollectionEditor, EditMode, SyncOp, SyncOutcome};
pub use endpoints::{ArrayFieldEndpoint, ItemEndpoint};

use crate::core::{ConsoleError, Result};
use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use uuid::Uuid;

/// Prefix of client-generated identifiers.
pub const PLACEHOLDER_PREFIX: &str = "tmp-";

pub fn placeholder_id() -> String {
    format!("{PLACEHOLDER_PREFIX}{}", Uuid::new_v4())
}

pub fn is_placeholder(id: &str) -> bool {
    id.starts_with(PLACEHOLDER_PREFIX)
}

/// An element of an embedded collection.
pub trait ChildItem: Clone + Serialize + DeserializeOwned + Send + Sync + 'static {
    fn child_id(&self) -> Option<&str>;

    fn set_child_id(&mut self, id: Option<String>);

    /// True until the server has assigned a real identifier.
    fn is_unsaved(&self) -> bool {
        self.child_id().is_none_or(is_placeholder)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncStrategy {
    /// Send the whole array through the parent document.
    ArrayReplace,
    /// Create/update/delete each item through its own endpoint.
    PerItem,
}

/// Client-side cap on a collection's size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollectionLimit {
    pub label: &'static str,
    pub max: usize,
}

impl CollectionLimit {
    pub const fn new(label: &'static str, max: usize) -> Self {
        Self { label, max }
    }

    pub fn check(&self, current_len: usize) -> Result<()> {
        if current_len >= self.max {
            return Err(ConsoleError::limit(self.label, self.max));
        }
        Ok(())
    }
}

pub const POINTS_LIMIT: CollectionLimit = CollectionLimit::new("points", 6);
pub const BADGES_LIMIT: CollectionLimit = CollectionLimit::new("badges", 4);
pub const SERVICES_PER_LOCATION_LIMIT: CollectionLimit = CollectionLimit::new("services", 3);
pub const LOCATIONS_LIMIT: CollectionLimit = CollectionLimit::new("locations", 5);
pub const GALLERY_IMAGES_LIMIT: CollectionLimit = CollectionLimit::new("images", 4);

/// Backend side of a collection editor.
///
/// Implementations support the operations of their [`SyncStrategy`]; the rest
/// keep the default, which refuses.
#[async_trait]
pub trait CollectionSink<T: ChildItem>: Send + Sync {
    /// Persist the full collection and return it as saved.
    async fn replace_all(&self, _items: &[T]) -> Result<Vec<T>> {
        Err(ConsoleError::validation(
            "this collection is saved item by item",
        ))
    }

    async fn create_item(&self, _item: &T) -> Result<T> {
        Err(ConsoleError::validation(
            "this collection is saved as a whole",
        ))
    }

    async fn update_item(&self, _id: &str, _item: &T) -> Result<T> {
        Err(ConsoleError::validation(
            "this collection is saved as a whole",
        ))
    }

    async fn delete_item(&self, _id: &str) -> Result<()> {
        Err(ConsoleError::validation(
            "this collection is saved as a whole",
        ))
    }
}
