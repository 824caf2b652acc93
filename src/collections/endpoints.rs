use super::{ChildItem, CollectionSink};
use crate::api::client::RestClient;
use crate::core::{ConsoleError, Result};
use async_trait::async_trait;
use serde_json::{Map as JsonMap, Value as JsonValue};

/// Collection stored as an array field of a parent document and saved by
/// sending the whole array with `PUT <path>`.
#[derive(Clone)]
pub struct ArrayFieldEndpoint {
    client: RestClient,
    path: String,
    item_key: &'static str,
    field: &'static str,
}

impl ArrayFieldEndpoint {
    /// `item_key` names the parent under `data` in the response; `field` is
    /// the array inside it.
    pub fn new(
        client: RestClient,
        path: impl Into<String>,
        item_key: &'static str,
        field: &'static str,
    ) -> Self {
        Self {
            client,
            path: path.into(),
            item_key,
            field,
        }
    }
}

#[async_trait]
impl<T: ChildItem> CollectionSink<T> for ArrayFieldEndpoint {
    async fn replace_all(&self, items: &[T]) -> Result<Vec<T>> {
        let mut body = JsonMap::new();
        body.insert(self.field.to_string(), serde_json::to_value(items)?);
        let body = JsonValue::Object(body);
        let envelope = self.client.put(&self.path, &body).await?;
        let parent: JsonValue = envelope.resource(self.item_key)?;
        let saved = parent.get(self.field).cloned().ok_or_else(|| {
            ConsoleError::Decode(format!(
                "response is missing data.{}.{}",
                self.item_key, self.field
            ))
        })?;
        Ok(serde_json::from_value(saved)?)
    }
}

/// Collection with its own create/update/delete endpoints below
/// `collection_path`.
#[derive(Clone)]
pub struct ItemEndpoint {
    client: RestClient,
    collection_path: String,
    item_key: &'static str,
}

impl ItemEndpoint {
    pub fn new(client: RestClient, collection_path: impl Into<String>, item_key: &'static str) -> Self {
        Self {
            client,
            collection_path: collection_path.into(),
            item_key,
        }
    }

    fn item_path(&self, id: &str) -> String {
        format!("{}/{}", self.collection_path, id)
    }
}

#[async_trait]
impl<T: ChildItem> CollectionSink<T> for ItemEndpoint {
    async fn create_item(&self, item: &T) -> Result<T> {
        let envelope = self.client.post(&self.collection_path, item).await?;
        envelope.resource(self.item_key)
    }

    async fn update_item(&self, id: &str, item: &T) -> Result<T> {
        let envelope = self.client.put(&self.item_path(id), item).await?;
        envelope.resource(self.item_key)
    }

    async fn delete_item(&self, id: &str) -> Result<()> {
        self.client.delete(&self.item_path(id)).await?;
        Ok(())
    }
}
