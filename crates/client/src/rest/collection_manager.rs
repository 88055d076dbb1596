//! REST collection manager implementation for lifecycle operations

use crate::transport::{
    HttpMethod, ResourceRequest, ResourceType, RestTransport, HEADER_OFFER_THROUGHPUT,
};
use crate::CollectionManager;
use async_trait::async_trait;
use colladmin_core::entities::{CollectionEntity, OfferEntity, OfferQuery, SearchOffersEntity};
use colladmin_core::error::{Error, Result};
use colladmin_core::ConnectionContext;
use tracing::{debug, error, info};

/// Collection manager speaking the service's REST dialect
pub(crate) struct RestCollectionManager {
    context: ConnectionContext,
    transport: RestTransport,
}

impl RestCollectionManager {
    pub fn new(context: ConnectionContext, transport: RestTransport) -> Self {
        Self { context, transport }
    }

    fn log_failure(&self, operation: &str, correlation_id: &str, err: &Error) {
        error!(
            correlation_id,
            operation,
            collection = self.context.collection(),
            database = self.context.database(),
            status = err.status(),
            "Collection operation failed: {err}"
        );
    }

    fn collection_request(&self, method: HttpMethod) -> ResourceRequest {
        let link = self.context.collection_link();
        let path = format!("/{link}");
        ResourceRequest::new(method, ResourceType::Collections, link, path)
    }

    async fn fetch_collection(&self) -> Result<CollectionEntity> {
        let response = self
            .transport
            .execute(self.collection_request(HttpMethod::Get))
            .await?;

        if response.is_not_found() {
            return Err(Error::not_found(format!(
                "Collection '{}' does not exist in database '{}'",
                self.context.collection(),
                self.context.database()
            )));
        }

        response.error_for_status()?.json()
    }

    async fn find_offer(&self, resource_id: &str) -> Result<OfferEntity> {
        let request = ResourceRequest::new(HttpMethod::Post, ResourceType::Offers, "", "/offers")
            .query_body(&OfferQuery::by_resource_id(resource_id))?;

        let search: SearchOffersEntity = self
            .transport
            .execute(request)
            .await?
            .error_for_status()?
            .json()?;

        search.into_single().ok_or_else(|| {
            Error::not_found(format!(
                "No offer references collection resource id '{resource_id}'"
            ))
        })
    }

    async fn find_collection_offer(&self) -> Result<OfferEntity> {
        let collection = self.fetch_collection().await?;
        let resource_id = collection.resource_id.ok_or_else(|| {
            Error::not_found(format!(
                "Collection '{}' has no resource id",
                self.context.collection()
            ))
        })?;
        debug!(resource_id = %resource_id, "Resolved collection resource id");

        self.find_offer(&resource_id).await
    }

    async fn replace_offer(&self, offer: &OfferEntity) -> Result<()> {
        let link = offer.resource_link();
        let path = format!("/offers/{link}");
        let request = ResourceRequest::new(HttpMethod::Put, ResourceType::Offers, link, path)
            .json_body(offer)?;

        self.transport.execute(request).await?.error_for_status()?;
        Ok(())
    }

    async fn create(&self, throughput: u32, index_names: &[String]) -> Result<()> {
        let body = CollectionEntity::new(
            self.context.collection(),
            self.context.partition_key(),
            index_names,
        );
        let link = self.context.database_link();
        let path = format!("/{link}/colls");
        let request =
            ResourceRequest::new(HttpMethod::Post, ResourceType::Collections, link, path)
                .header(HEADER_OFFER_THROUGHPUT, throughput.to_string())
                .json_body(&body)?;

        self.transport.execute(request).await?.error_for_status()?;
        Ok(())
    }

    async fn change_throughput(&self, throughput: u32) -> Result<()> {
        let offer = self.find_collection_offer().await?;
        debug!(
            offer_id = %offer.id,
            current = offer.content.offer_throughput,
            requested = throughput,
            "Found offer"
        );
        self.replace_offer(&offer.with_throughput(throughput)).await
    }

    async fn replace_indexes(&self, index_names: &[String]) -> Result<()> {
        let current = self.fetch_collection().await?;
        let body = current.projection().rebuild(index_names);
        let request = self.collection_request(HttpMethod::Put).json_body(&body)?;

        self.transport.execute(request).await?.error_for_status()?;
        Ok(())
    }
}

#[async_trait]
impl CollectionManager for RestCollectionManager {
    async fn collection_exists(&self, correlation_id: &str) -> Result<bool> {
        let result: Result<bool> = async {
            let response = self
                .transport
                .execute(self.collection_request(HttpMethod::Get))
                .await?;
            if response.is_not_found() {
                return Ok(false);
            }
            response.error_for_status().map(|_| true)
        }
        .await;

        result.inspect_err(|e| self.log_failure("collection_exists", correlation_id, e))
    }

    async fn get_collection(&self, correlation_id: &str) -> Result<CollectionEntity> {
        self.fetch_collection()
            .await
            .inspect_err(|e| self.log_failure("get_collection", correlation_id, e))
    }

    async fn create_collection(
        &self,
        correlation_id: &str,
        throughput: u32,
        index_names: &[String],
    ) -> Result<()> {
        info!(
            correlation_id,
            collection = self.context.collection(),
            throughput,
            "Creating collection"
        );

        self.create(throughput, index_names)
            .await
            .inspect_err(|e| self.log_failure("create_collection", correlation_id, e))
    }

    async fn read_throughput(&self, correlation_id: &str) -> Result<u32> {
        self.find_collection_offer()
            .await
            .map(|offer| offer.content.offer_throughput)
            .inspect_err(|e| self.log_failure("read_throughput", correlation_id, e))
    }

    async fn update_throughput(&self, correlation_id: &str, throughput: u32) -> Result<()> {
        info!(
            correlation_id,
            collection = self.context.collection(),
            throughput,
            "Updating collection throughput"
        );

        self.change_throughput(throughput)
            .await
            .inspect_err(|e| self.log_failure("update_throughput", correlation_id, e))
    }

    async fn update_indexes(&self, correlation_id: &str, index_names: &[String]) -> Result<()> {
        info!(
            correlation_id,
            collection = self.context.collection(),
            index_count = index_names.len(),
            "Updating collection indexes"
        );

        self.replace_indexes(index_names)
            .await
            .inspect_err(|e| self.log_failure("update_indexes", correlation_id, e))
    }
}
