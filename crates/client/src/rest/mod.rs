// Private module - not exposed in public API
mod collection_manager;

pub(crate) use collection_manager::RestCollectionManager;
