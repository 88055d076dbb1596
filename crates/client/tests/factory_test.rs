mod common;

use colladmin_client::mock::MockHttpClient;
use colladmin_client::{create_collection_manager, create_collection_manager_with_client};
use colladmin_core::{ConnectionContext, Error};
use common::test_config;
use std::sync::Arc;

#[test]
fn test_factory_builds_reqwest_manager() {
    let manager = create_collection_manager(&test_config());
    assert!(manager.is_ok());
}

#[test]
fn test_factory_rejects_non_base64_master_key() {
    let config = test_config();
    let context =
        ConnectionContext::new("acct.documents.azure.com", "shop", "orders", "customerId", "not base64!!")
            .unwrap();

    let err = create_collection_manager_with_client(&config, context, Arc::new(MockHttpClient::new()))
        .err()
        .expect("manager should not be created");
    assert!(matches!(err, Error::InvalidKeyFormat(_)));
}

#[test]
fn test_factory_rejects_invalid_config() {
    let mut config = test_config();
    config.collection.name = String::new();

    let err = create_collection_manager(&config)
        .err()
        .expect("manager should not be created");
    assert!(matches!(err, Error::Config(_)));
}
