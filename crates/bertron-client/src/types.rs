//! Data types for BERtron API responses
//!
//! `Entity` mirrors the BERtron schema closely enough for typed access to the
//! common fields. Anything else a document carries is preserved in `extra`.

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

/// Known BER data sources
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum BerDataSource {
    #[serde(rename = "EMSL")]
    Emsl,
    #[serde(rename = "ESS-DIVE")]
    EssDive,
    #[serde(rename = "JGI")]
    Jgi,
    #[serde(rename = "NMDC")]
    Nmdc,
    #[serde(rename = "MONET")]
    Monet,
}

impl BerDataSource {
    pub const ALL: [BerDataSource; 5] = [
        Self::Emsl,
        Self::EssDive,
        Self::Jgi,
        Self::Nmdc,
        Self::Monet,
    ];

    /// Tag as stored in `ber_data_source`
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Emsl => "EMSL",
            Self::EssDive => "ESS-DIVE",
            Self::Jgi => "JGI",
            Self::Nmdc => "NMDC",
            Self::Monet => "MONET",
        }
    }

    /// Parse a data source from its tag
    pub fn from_str(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|source| source.as_str() == s)
    }
}

/// Geographic location of an entity
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
    /// Altitude, depth, elevation and anything else the server sends
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One record from the BER dataset
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Entity {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    /// The server sends either a single type or a list of types
    #[serde(deserialize_with = "deserialize_entity_types")]
    pub entity_type: Vec<String>,
    pub ber_data_source: String,
    #[serde(default)]
    pub coordinates: Option<Coordinates>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub alt_ids: Vec<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub alt_names: Vec<String>,
    #[serde(default)]
    pub uri: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Entity {
    /// Parsed data source, if it is one of the known tags
    pub fn data_source(&self) -> Option<BerDataSource> {
        BerDataSource::from_str(&self.ber_data_source)
    }

    pub fn has_entity_type(&self, entity_type: &str) -> bool {
        self.entity_type.iter().any(|t| t == entity_type)
    }
}

/// Optional lists may be sent as `null`; treat that like a missing key
fn null_as_empty<'de, D, T>(deserializer: D) -> std::result::Result<Vec<T>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<Vec<T>>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Helper to deserialize `entity_type` given as a string or a list of strings
fn deserialize_entity_types<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::{self, SeqAccess, Visitor};

    struct EntityTypesVisitor;

    impl<'de> Visitor<'de> for EntityTypesVisitor {
        type Value = Vec<String>;

        fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
            formatter.write_str("an entity type string or a list of them")
        }

        fn visit_str<E>(self, v: &str) -> std::result::Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(vec![v.to_string()])
        }

        fn visit_seq<A>(self, mut seq: A) -> std::result::Result<Self::Value, A::Error>
        where
            A: SeqAccess<'de>,
        {
            let mut types = Vec::with_capacity(seq.size_hint().unwrap_or(1));
            while let Some(t) = seq.next_element::<String>()? {
                types.push(t);
            }
            Ok(types)
        }
    }

    deserializer.deserialize_any(EntityTypesVisitor)
}

/// Which specialized query produced a [`QueryResponse`]
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum QueryType {
    GeospatialNearby,
    GeospatialBoundingBox,
}

impl QueryType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::GeospatialNearby => "geospatial_nearby",
            Self::GeospatialBoundingBox => "geospatial_bounding_box",
        }
    }
}

/// Result of every BERtron query
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QueryResponse {
    /// Entities in the order the server returned them
    pub entities: Vec<Entity>,
    /// Either `entities.len()` or the server-reported count, depending on the query
    pub count: u64,
    pub query_type: Option<QueryType>,
    /// Request parameters echoed back for context; the server does not return these
    pub metadata: Option<Value>,
}

impl QueryResponse {
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

/// `GET /bertron` response body
#[derive(Debug, Deserialize)]
pub(crate) struct DocumentList {
    pub(crate) documents: Vec<Entity>,
}

/// Response body of the find and geospatial endpoints
#[derive(Debug, Deserialize)]
pub(crate) struct CountedDocumentList {
    pub(crate) documents: Vec<Entity>,
    pub(crate) count: u64,
}

/// Echo of a nearby query's center and radius
///
/// JSON has no NaN or infinity, so a non-finite input is echoed as `null`.
pub(crate) fn nearby_metadata(latitude: f64, longitude: f64, radius_meters: f64) -> Value {
    json!({
        "center": { "latitude": latitude, "longitude": longitude },
        "radius_meters": radius_meters,
    })
}

/// Echo of a bounding box query's corners; non-finite values become `null`
pub(crate) fn bounding_box_metadata(
    southwest_lat: f64,
    southwest_lng: f64,
    northeast_lat: f64,
    northeast_lng: f64,
) -> Value {
    json!({
        "bounding_box": {
            "southwest": { "latitude": southwest_lat, "longitude": southwest_lng },
            "northeast": { "latitude": northeast_lat, "longitude": northeast_lng },
        }
    })
}
