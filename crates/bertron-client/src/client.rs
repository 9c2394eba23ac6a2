//! BERtron API HTTP client

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::Method;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, error, warn};
use url::Url;

use crate::config::BertronConfig;
use crate::error::{ApiFailure, BertronError, Result};
use crate::query::{name_pattern_filter, FindQuery};
use crate::types::*;

/// Client for interacting with the BERtron API
///
/// Wraps one pooled HTTP session. Every operation issues a single request and
/// maps the JSON body into typed results; filtering, paging and geospatial
/// work all happen on the server.
pub struct BertronClient {
    http: Option<reqwest::Client>,
    base_url: Url,
    timeout: Duration,
}

impl BertronClient {
    /// Create a client from explicit settings
    pub fn new(config: BertronConfig) -> Result<Self> {
        let base_url = Url::parse(config.normalized_base_url()).map_err(|e| {
            BertronError::Config(format!("invalid base URL {:?}: {}", config.base_url, e))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(BertronError::Config(format!(
                "base URL {:?} cannot have endpoints joined onto it",
                config.base_url
            )));
        }

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        if !config.verify_tls {
            warn!(base_url = %base_url, "TLS certificate verification is disabled");
        }

        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.as_str())
            .default_headers(headers)
            .danger_accept_invalid_certs(!config.verify_tls)
            .build()
            .map_err(|e| BertronError::Config(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http: Some(http),
            base_url,
            timeout: config.timeout,
        })
    }

    /// Create a client for a custom server with default settings
    pub fn with_base_url(base_url: &str) -> Result<Self> {
        Self::new(BertronConfig::default().with_base_url(base_url))
    }

    /// Create a client configured from `BERTRON_*` environment variables
    pub fn from_env() -> Result<Self> {
        Self::new(BertronConfig::from_env())
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn is_closed(&self) -> bool {
        self.http.is_none()
    }

    /// Release the HTTP session. Safe to call more than once; requests made
    /// afterwards fail with [`ApiFailure::Closed`].
    pub fn close(&mut self) {
        if self.http.take().is_some() {
            debug!(base_url = %self.base_url, "Closed BERtron client");
        }
    }

    /// Send one request and return the parsed JSON body
    ///
    /// `endpoint` is resolved against the base URL the way a browser resolves a
    /// link, so an absolute path such as `/health` replaces the base URL's path.
    ///
    /// # Arguments
    /// * `method` - HTTP method
    /// * `endpoint` - Endpoint path, e.g. `/bertron/find`
    /// * `query` - Query string parameters, appended in order
    /// * `body` - Optional JSON request body
    pub async fn request(
        &self,
        method: Method,
        endpoint: &str,
        query: &[(&str, String)],
        body: Option<&Value>,
    ) -> Result<Value> {
        let mut url = self.base_url.join(endpoint).map_err(|e| {
            BertronError::Config(format!("invalid endpoint {:?}: {}", endpoint, e))
        })?;
        if !query.is_empty() {
            url.query_pairs_mut()
                .extend_pairs(query.iter().map(|(k, v)| (*k, v.as_str())));
        }

        let http = match &self.http {
            Some(http) => http,
            None => return Err(request_failed(&method, &url, ApiFailure::Closed)),
        };

        let mut builder = http.request(method.clone(), url.clone());
        if let Some(body) = body {
            builder = builder.json(body);
        }

        debug!(method = %method, url = %url, "Sending BERtron request");

        let response = builder
            .send()
            .await
            .map_err(|e| request_failed(&method, &url, ApiFailure::Http(Box::new(e))))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(request_failed(
                &method,
                &url,
                ApiFailure::Status {
                    status: status.as_u16(),
                    body,
                },
            ));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| request_failed(&method, &url, ApiFailure::Http(Box::new(e))))?;

        serde_json::from_slice(&bytes)
            .map_err(|e| request_failed(&method, &url, ApiFailure::Json(e)))
    }

    async fn get(&self, endpoint: &str, query: &[(&str, String)]) -> Result<Value> {
        self.request(Method::GET, endpoint, query, None).await
    }

    /// Check the health of the BERtron API server
    pub async fn health_check(&self) -> Result<Value> {
        self.get("/health", &[]).await
    }

    /// Get every entity in the BERtron database
    ///
    /// `count` is the number of entities actually returned.
    pub async fn get_all_entities(&self) -> Result<QueryResponse> {
        let response = self.get("/bertron", &[]).await?;
        let list: DocumentList = from_response(response)?;

        Ok(QueryResponse {
            count: list.documents.len() as u64,
            entities: list.documents,
            query_type: None,
            metadata: None,
        })
    }

    /// Get a single entity by its ID
    ///
    /// An unknown ID comes back from the server as a 404 and surfaces as
    /// [`BertronError::Api`].
    pub async fn get_entity_by_id(&self, entity_id: &str) -> Result<Entity> {
        let endpoint = format!("/bertron/{}", urlencoding::encode(entity_id));
        let response = self.get(&endpoint, &[]).await?;
        from_response(response)
    }

    /// Search for entities with a MongoDB-style query
    ///
    /// `count` is the server-reported count, which can differ from
    /// `entities.len()` when `skip`/`limit` page through a larger result.
    pub async fn find_entities(&self, query: &FindQuery) -> Result<QueryResponse> {
        let body = serde_json::to_value(query).map_err(BertronError::Deserialize)?;
        let response = self
            .request(Method::POST, "/bertron/find", &[], Some(&body))
            .await?;
        let list: CountedDocumentList = from_response(response)?;

        Ok(QueryResponse {
            entities: list.documents,
            count: list.count,
            query_type: None,
            metadata: None,
        })
    }

    /// Find entities within a radius of a point, nearest first
    ///
    /// The center and radius are echoed in `metadata` as JSON numbers. A NaN or
    /// infinite argument is still forwarded to the server verbatim, but its
    /// echo is `null` since JSON cannot represent it.
    ///
    /// # Arguments
    /// * `latitude` - Center latitude
    /// * `longitude` - Center longitude
    /// * `radius_meters` - Search radius in meters
    pub async fn find_nearby_entities(
        &self,
        latitude: f64,
        longitude: f64,
        radius_meters: f64,
    ) -> Result<QueryResponse> {
        let response = self
            .get(
                "/bertron/geo/nearby",
                &[
                    ("latitude", latitude.to_string()),
                    ("longitude", longitude.to_string()),
                    ("radius_meters", radius_meters.to_string()),
                ],
            )
            .await?;
        let list: CountedDocumentList = from_response(response)?;

        Ok(QueryResponse {
            entities: list.documents,
            count: list.count,
            query_type: Some(QueryType::GeospatialNearby),
            metadata: Some(nearby_metadata(latitude, longitude, radius_meters)),
        })
    }

    /// Find entities inside a rectangle given by its southwest and northeast corners
    ///
    /// Corners are echoed in `metadata`; non-finite values echo as `null`.
    pub async fn find_entities_in_bounding_box(
        &self,
        southwest_lat: f64,
        southwest_lng: f64,
        northeast_lat: f64,
        northeast_lng: f64,
    ) -> Result<QueryResponse> {
        let response = self
            .get(
                "/bertron/geo/bbox",
                &[
                    ("southwest_lat", southwest_lat.to_string()),
                    ("southwest_lng", southwest_lng.to_string()),
                    ("northeast_lat", northeast_lat.to_string()),
                    ("northeast_lng", northeast_lng.to_string()),
                ],
            )
            .await?;
        let list: CountedDocumentList = from_response(response)?;

        Ok(QueryResponse {
            entities: list.documents,
            count: list.count,
            query_type: Some(QueryType::GeospatialBoundingBox),
            metadata: Some(bounding_box_metadata(
                southwest_lat,
                southwest_lng,
                northeast_lat,
                northeast_lng,
            )),
        })
    }

    /// Find entities from one BER data source (EMSL, ESS-DIVE, JGI, NMDC, MONET)
    pub async fn find_entities_by_source(&self, source: &str) -> Result<QueryResponse> {
        self.find_entities(&FindQuery::new(serde_json::json!({ "ber_data_source": source })))
            .await
    }

    /// Find entities of one type (biodata, sample, sequence, taxon, jgi_biosample)
    pub async fn find_entities_by_entity_type(&self, entity_type: &str) -> Result<QueryResponse> {
        self.find_entities(&FindQuery::new(serde_json::json!({ "entity_type": entity_type })))
            .await
    }

    /// Search entity names with a regular expression
    ///
    /// The pattern uses the server's (MongoDB) regex dialect.
    pub async fn search_entities_by_name(
        &self,
        name_pattern: &str,
        case_sensitive: bool,
    ) -> Result<QueryResponse> {
        self.find_entities(&FindQuery::new(name_pattern_filter(
            name_pattern,
            case_sensitive,
        )))
        .await
    }

    /// Same as [`Self::find_nearby_entities`] with the radius given in kilometers
    pub async fn get_entities_in_region(
        &self,
        center_lat: f64,
        center_lng: f64,
        radius_km: f64,
    ) -> Result<QueryResponse> {
        let radius_meters = radius_km * 1000.0;
        self.find_nearby_entities(center_lat, center_lng, radius_meters)
            .await
    }
}

impl Drop for BertronClient {
    fn drop(&mut self) {
        self.close();
    }
}

fn request_failed(method: &Method, url: &Url, cause: ApiFailure) -> BertronError {
    error!(method = %method, url = %url, error = %cause, "API request failed");
    BertronError::Api(cause)
}

fn from_response<T: serde::de::DeserializeOwned>(response: Value) -> Result<T> {
    serde_json::from_value(response).map_err(BertronError::Deserialize)
}
