//! Wire entities for collections, indexing policies, partition keys and offers
//!
//! These types mirror the JSON bodies exchanged with the service's REST
//! interface. They are built per request and never cached.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Path that covers every property of every document
pub const CATCH_ALL_PATH: &str = "/*";

/// Document identifier field; the service indexes it on its own
pub const RESERVED_ID_FIELD: &str = "id";

/// Precision value the service interprets as "maximum"
pub const MAX_PRECISION: i32 = -1;

/// Partition key definition version written on creation
pub const PARTITION_KEY_VERSION: u32 = 1;

/// Server's view of a collection's schema-level configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionEntity {
    pub id: String,
    pub indexing_policy: IndexingPolicyEntity,
    pub partition_key: PartitionKeyEntity,

    /// Assigned by the service on creation, never sent by this client
    #[serde(rename = "_rid", default, skip_serializing)]
    pub resource_id: Option<String>,
}

impl CollectionEntity {
    /// Build the body for a brand new collection
    pub fn new<S: AsRef<str>>(id: &str, partition_key_field: &str, index_names: &[S]) -> Self {
        Self {
            id: id.to_string(),
            indexing_policy: IndexingPolicyEntity::for_index_names(index_names),
            partition_key: PartitionKeyEntity::for_field(partition_key_field),
            resource_id: None,
        }
    }

    /// The parts of this collection that survive an index update
    pub fn projection(&self) -> CollectionProjection {
        CollectionProjection {
            id: self.id.clone(),
            partition_key: self.partition_key.clone(),
            excluded_paths: self.indexing_policy.excluded_paths.clone(),
        }
    }
}

/// Prior state carried forward when a collection's indexes are rebuilt
#[derive(Debug, Clone, PartialEq)]
pub struct CollectionProjection {
    pub id: String,
    pub partition_key: PartitionKeyEntity,
    pub excluded_paths: Option<Vec<ExcludedPathEntity>>,
}

impl CollectionProjection {
    /// Produce the replacement collection body for the given index names
    ///
    /// Identifier, partition key and excluded paths come from the prior
    /// state untouched; included paths are rebuilt from scratch.
    pub fn rebuild<S: AsRef<str>>(&self, index_names: &[S]) -> CollectionEntity {
        let mut indexing_policy = IndexingPolicyEntity::for_index_names(index_names);
        indexing_policy.excluded_paths = self.excluded_paths.clone();

        CollectionEntity {
            id: self.id.clone(),
            indexing_policy,
            partition_key: self.partition_key.clone(),
            resource_id: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IndexingMode {
    Consistent,
    Lazy,
    None,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexingPolicyEntity {
    pub indexing_mode: IndexingMode,
    pub automatic: bool,
    #[serde(default)]
    pub included_paths: Vec<IncludedPathEntity>,

    /// Never authored here, only carried over from a fetched collection
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub excluded_paths: Option<Vec<ExcludedPathEntity>>,
}

impl IndexingPolicyEntity {
    /// Build a consistent, automatic policy for the given field names
    ///
    /// The catch-all path always comes first with range indexes. Each
    /// non-blank name other than the reserved `id` field adds a hash-indexed
    /// path, in caller order. Duplicates are kept.
    pub fn for_index_names<S: AsRef<str>>(index_names: &[S]) -> Self {
        let mut included_paths = Vec::with_capacity(index_names.len() + 1);
        included_paths.push(IncludedPathEntity::catch_all());

        included_paths.extend(
            index_names
                .iter()
                .map(|name| name.as_ref())
                .filter(|name| !name.trim().is_empty())
                .filter(|name| !name.eq_ignore_ascii_case(RESERVED_ID_FIELD))
                .map(IncludedPathEntity::hashed_field),
        );

        Self {
            indexing_mode: IndexingMode::Consistent,
            automatic: true,
            included_paths,
            excluded_paths: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncludedPathEntity {
    pub path: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub indexes: Vec<IndexEntity>,
}

impl IncludedPathEntity {
    /// `/*` with number and string range indexes
    pub fn catch_all() -> Self {
        Self {
            path: CATCH_ALL_PATH.to_string(),
            indexes: vec![
                IndexEntity::new(IndexKind::Range, IndexDataType::Number),
                IndexEntity::new(IndexKind::Range, IndexDataType::String),
            ],
        }
    }

    /// `/<field>/?` with number and string hash indexes
    pub fn hashed_field(field: &str) -> Self {
        Self {
            path: format!("/{field}/?"),
            indexes: vec![
                IndexEntity::new(IndexKind::Hash, IndexDataType::Number),
                IndexEntity::new(IndexKind::Hash, IndexDataType::String),
            ],
        }
    }
}

/// Excluded path, kept as the service returned it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExcludedPathEntity {
    pub path: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexEntity {
    pub kind: IndexKind,
    pub data_type: IndexDataType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub precision: Option<i32>,
}

impl IndexEntity {
    pub fn new(kind: IndexKind, data_type: IndexDataType) -> Self {
        Self {
            kind,
            data_type,
            precision: Some(MAX_PRECISION),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IndexKind {
    Range,
    Hash,
    Spatial,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IndexDataType {
    Number,
    String,
    Point,
    Polygon,
    LineString,
    MultiPolygon,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PartitionKind {
    Hash,
    Range,
    MultiHash,
}

/// Partition key definition; fixed once the collection exists
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartitionKeyEntity {
    pub paths: Vec<String>,
    pub kind: PartitionKind,
    #[serde(default = "default_partition_key_version")]
    pub version: u32,
}

fn default_partition_key_version() -> u32 {
    PARTITION_KEY_VERSION
}

impl PartitionKeyEntity {
    /// Single-path hash partition key on `field`
    pub fn for_field(field: &str) -> Self {
        let field = field.trim_start_matches('/');
        Self {
            paths: vec![format!("/{field}")],
            kind: PartitionKind::Hash,
            version: PARTITION_KEY_VERSION,
        }
    }
}

/// Provisioned throughput of a single collection
///
/// Fields this client does not interpret (`_rid`, `_self`, `resource`,
/// `offerVersion`, `_etag`, ...) are kept in `extra` so the offer can be
/// written back whole.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OfferEntity {
    pub id: String,
    #[serde(rename = "offerResourceId")]
    pub offer_resource_id: String,
    pub content: OfferContent,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl OfferEntity {
    /// Same offer with a different throughput
    pub fn with_throughput(mut self, throughput: u32) -> Self {
        self.content.offer_throughput = throughput;
        self
    }

    /// Resource link of this offer, as used for signing and addressing
    pub fn resource_link(&self) -> String {
        self.id.to_lowercase()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OfferContent {
    #[serde(rename = "offerThroughput")]
    pub offer_throughput: u32,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Result envelope of an offer query
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchOffersEntity {
    #[serde(rename = "Offers", default)]
    pub offers: Vec<OfferEntity>,
    #[serde(rename = "_count", default)]
    pub count: usize,
}

impl SearchOffersEntity {
    /// The matched offer, if any
    pub fn into_single(self) -> Option<OfferEntity> {
        self.offers.into_iter().next()
    }
}

/// Query body locating the offer that governs a collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OfferQuery {
    pub query: String,
}

impl OfferQuery {
    pub fn by_resource_id(resource_id: &str) -> Self {
        let escaped = resource_id.replace('\\', "\\\\").replace('"', "\\\"");
        Self {
            query: format!(
                "SELECT * FROM root WHERE (root[\"offerResourceId\"] = \"{escaped}\")"
            ),
        }
    }
}
