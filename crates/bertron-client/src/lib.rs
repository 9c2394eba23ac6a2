//! Rust client for the BERtron API
//!
//! BERtron serves geospatial and attribute queries over entities (samples,
//! sequences, taxa, biosamples) gathered from the BER data sources: EMSL,
//! ESS-DIVE, JGI, NMDC and MONET.
//!
//! # Example
//!
//! ```no_run
//! use bertron_client::{BertronClient, BertronConfig, FindQuery, SortDirection};
//! use serde_json::json;
//!
//! # async fn example() -> Result<(), bertron_client::BertronError> {
//! let client = BertronClient::new(BertronConfig::default().with_base_url("http://localhost:8000"))?;
//!
//! // Entities from one data source
//! let emsl = client.find_entities_by_source("EMSL").await?;
//! println!("{} EMSL entities", emsl.count);
//!
//! // Arbitrary MongoDB-style query, paged by hand
//! let query = FindQuery::new(json!({"entity_type": "sample"}))
//!     .limit(25)
//!     .sort_by("name", SortDirection::Ascending);
//! let page = client.find_entities(&query).await?;
//!
//! // Everything within 100 km of central Florida, nearest first
//! let nearby = client.get_entities_in_region(28.1, -81.4, 100.0).await?;
//! # let _ = (page, nearby);
//! # Ok(())
//! # }
//! ```
//!
//! # API Coverage
//!
//! - `GET /health` - Server health
//! - `GET /bertron` - All entities
//! - `GET /bertron/{id}` - One entity
//! - `POST /bertron/find` - Filter/projection/sort/skip/limit query
//! - `GET /bertron/geo/nearby` - Radius query around a point
//! - `GET /bertron/geo/bbox` - Bounding box query

mod client;
mod config;
mod error;
mod query;
mod types;

pub use client::BertronClient;
pub use config::{BertronConfig, DEFAULT_BASE_URL};
pub use error::{ApiFailure, BertronError, Result};
pub use query::{name_pattern_filter, FindQuery, SortDirection};
pub use reqwest::Method;
pub use types::{BerDataSource, Coordinates, Entity, QueryResponse, QueryType};
