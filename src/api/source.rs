use super::client::RestClient;
use super::envelope::RemoteListResult;
use crate::core::Result;
use crate::list::entity::ListEntity;
use crate::list::query::QueryKey;
use async_trait::async_trait;
use std::marker::PhantomData;

/// Where a list controller gets its pages from and sends its deletes to.
#[async_trait]
pub trait ListSource<T>: Send + Sync {
    async fn fetch(&self, key: &QueryKey) -> Result<RemoteListResult<T>>;

    async fn delete(&self, id: &str) -> Result<()>;
}

/// REST-backed list source for entity `T`.
pub struct ResourceEndpoint<T> {
    client: RestClient,
    _entity: PhantomData<fn() -> T>,
}

impl<T> ResourceEndpoint<T> {
    pub fn new(client: RestClient) -> Self {
        Self {
            client,
            _entity: PhantomData,
        }
    }

    pub fn client(&self) -> &RestClient {
        &self.client
    }
}

impl<T> Clone for ResourceEndpoint<T> {
    fn clone(&self) -> Self {
        Self::new(self.client.clone())
    }
}

#[async_trait]
impl<T: ListEntity> ListSource<T> for ResourceEndpoint<T> {
    async fn fetch(&self, key: &QueryKey) -> Result<RemoteListResult<T>> {
        let resource = T::RESOURCE;
        let envelope = self.client.get(resource.path(), &key.to_params()).await?;
        envelope.list(resource.list_key())
    }

    async fn delete(&self, id: &str) -> Result<()> {
        self.client.delete(&T::RESOURCE.item_path(id)).await?;
        Ok(())
    }
}
