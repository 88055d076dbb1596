use crate::rest::RestCollectionManager;
use crate::transport::{HttpClient, ReqwestHttpClient, RestTransport};
use crate::CollectionManager;
use colladmin_core::{Config, ConnectionContext, Error};
use std::sync::Arc;
use tracing::info;

/// Creates a collection manager from configuration.
///
/// This is the primary factory function. It derives the connection context,
/// builds a reqwest-backed HTTP client with the configured timeout and hides
/// the REST implementation behind the [`CollectionManager`] trait.
///
/// # Errors
/// Returns an error if the configuration is invalid, the connection URI
/// cannot be parsed, the master key is not base64, or the HTTP client
/// cannot be built
///
/// # Example
/// ```ignore
/// let config = Config::load(None)?;
/// let manager = create_collection_manager(&config)?;
/// let exists = manager.collection_exists("req-42").await?;
/// ```
pub fn create_collection_manager(config: &Config) -> Result<Arc<dyn CollectionManager>, Error> {
    let context = config.connection_context()?;
    let client = Arc::new(ReqwestHttpClient::new(config.service.timeout_secs)?);
    create_collection_manager_with_client(config, context, client)
}

/// Creates a collection manager over a caller-provided [`HttpClient`].
///
/// Used by tests to drive the REST flows against
/// [`MockHttpClient`](crate::mock::MockHttpClient).
pub fn create_collection_manager_with_client(
    config: &Config,
    context: ConnectionContext,
    client: Arc<dyn HttpClient>,
) -> Result<Arc<dyn CollectionManager>, Error> {
    let transport = RestTransport::new(
        client,
        &context,
        config.service.api_version.clone(),
        &config.service.key_type,
        &config.service.token_version,
    )?;

    info!(
        endpoint = transport.base_uri(),
        database = context.database(),
        collection = context.collection(),
        "Collection manager ready"
    );

    Ok(Arc::new(RestCollectionManager::new(context, transport)) as Arc<dyn CollectionManager>)
}
