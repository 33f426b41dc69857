//! FinerWorks API client.
//!
//! One method per remote endpoint. Every endpoint is an HTTP POST carrying
//! the two credential headers and a JSON body; responses decode to
//! `serde_json::Value`. An HTTP 400 is an application-level rejection with
//! structured detail and is returned as a normal value, so callers can
//! inspect the server's explanation. Any other non-200 status is a
//! transport failure.
//!
//! API Docs: https://api.finerworks.com/docs

use std::time::Duration;

use reqwest::StatusCode;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};
use url::Url;

use crate::error::{Error, Result};
use crate::models::{
    IdLookup, ImageSearch, LookupId, Order, OrderId, OrderStatusQuery, OrderUpdate,
    RecipientEnvelope, SubmitOrders, UpdateCommand,
};

/// Production base URL for the FinerWorks v3 API.
pub const BASE_URL: &str = "https://api.finerworks.com/v3";

/// FinerWorks API client
///
/// Credentials and base URL are fixed at construction; the client holds no
/// other state, so it is cheap to clone and safe to share across tasks.
#[derive(Debug, Clone)]
pub struct Finerworks {
    /// Inner HTTP client
    client: reqwest::Client,

    /// Account credential headers
    web_api_key: String,
    app_key: String,

    /// API base URL
    base_url: Url,
}

impl Finerworks {
    /// Create a client against the production API.
    ///
    /// Both keys come from the FinerWorks account dashboard; an empty key is
    /// a configuration error.
    pub fn new(web_api_key: impl Into<String>, app_key: impl Into<String>) -> Result<Self> {
        Self::with_base_url(web_api_key, app_key, BASE_URL)
    }

    /// Create a client against a non-production base URL (sandbox or a test
    /// server).
    pub fn with_base_url(
        web_api_key: impl Into<String>,
        app_key: impl Into<String>,
        base_url: impl AsRef<str>,
    ) -> Result<Self> {
        let web_api_key = web_api_key.into();
        let app_key = app_key.into();

        if web_api_key.is_empty() {
            return Err(Error::Configuration("Missing `web_api_key`".to_string()));
        }
        if app_key.is_empty() {
            return Err(Error::Configuration("Missing `app_key`".to_string()));
        }

        let base_url = Url::parse(base_url.as_ref())
            .map_err(|e| Error::Configuration(format!("Invalid base URL: {e}")))?;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(concat!("finerworks/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Finerworks {
            client,
            web_api_key,
            app_key,
            base_url,
        })
    }

    /// Create a client from the `FINERWORKS_WEB_API_KEY` and
    /// `FINERWORKS_APP_KEY` environment variables.
    pub fn from_env() -> Result<Self> {
        let web_api_key = std::env::var("FINERWORKS_WEB_API_KEY").unwrap_or_default();
        let app_key = std::env::var("FINERWORKS_APP_KEY").unwrap_or_default();
        Self::new(web_api_key, app_key)
    }

    /// Configured base URL.
    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    fn endpoint(&self, suffix: &str) -> String {
        format!("{}{}", self.base_url.as_str().trim_end_matches('/'), suffix)
    }

    /// Shared transport primitive: POST `base_url + suffix` with the
    /// credential headers and a JSON body (`None` serializes as `null`).
    async fn send<B: Serialize>(&self, suffix: &str, body: Option<&B>) -> Result<Value> {
        let url = self.endpoint(suffix);
        debug!(url = %url, "FinerWorks API request");

        let response = self
            .client
            .post(&url)
            .header("web_api_key", &self.web_api_key)
            .header("app_key", &self.app_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        match status {
            StatusCode::OK => {
                let text = response.text().await?;
                Ok(serde_json::from_str(&text)?)
            }
            // Application-level rejection with structured detail. Hand the
            // body back instead of raising.
            StatusCode::BAD_REQUEST => {
                warn!(url = %url, "request rejected by the FinerWorks API");
                let text = response.text().await?;
                Ok(serde_json::from_str(&text)?)
            }
            _ => Err(Error::Transport {
                status: status.as_u16(),
            }),
        }
    }

    /// Test the configured credentials against the API.
    pub async fn login(&self) -> Result<Value> {
        self.send::<Value>("/test_my_credentials", None).await
    }

    /// Submit a single order.
    ///
    /// With `validate_only` the server checks the order for correctness
    /// without placing it into production fulfillment.
    pub async fn submit_order(&self, order: &Order, validate_only: bool) -> Result<Value> {
        let body = SubmitOrders {
            orders: [order],
            validate_only,
        };
        self.send("/submit_orders", Some(&body)).await
    }

    /// Update an order's state.
    ///
    /// `status` is matched case-insensitively against `pending`, `hold` and
    /// `cancel`; anything else fails validation before a request is sent.
    pub async fn update_order(
        &self,
        order_id: impl Into<OrderId>,
        status: &str,
    ) -> Result<Value> {
        let order_id = order_id.into().as_i64()?;
        let update_command = status.parse::<UpdateCommand>()?;
        let body = OrderUpdate {
            order_id,
            update_command,
        };
        self.send("/update_order", Some(&body)).await
    }

    /// Fetch the current status of an order.
    pub async fn order_status(&self, order_id: impl Into<OrderId>) -> Result<Value> {
        let order_id = order_id.into().as_i64()?;
        let body = OrderStatusQuery {
            order_ids: [order_id],
        };
        self.send("/fetch_order_status", Some(&body)).await
    }

    /// Fetch the server-defined order status code dictionary.
    pub async fn order_status_definitions(&self) -> Result<Value> {
        self.send::<Value>("/list_order_status_definitions", None)
            .await
    }

    /// Validate a recipient shipping address.
    pub async fn validate_address(&self, recipient: &Value) -> Result<Value> {
        let body = RecipientEnvelope { recipient };
        self.send("/validate_recipient_address", Some(&body)).await
    }

    /// Query product images; an empty filter lists everything.
    pub async fn list_images(&self, search_filter: &str) -> Result<Value> {
        let body = ImageSearch { search_filter };
        self.send("/list_images", Some(&body)).await
    }

    /// Query frame collections by collection id.
    pub async fn frame_collections(&self, collection_id: impl Into<LookupId>) -> Result<Value> {
        self.frame_lookup("/list_collections", collection_id.into(), "collection_id")
            .await
    }

    /// Query details for a specific frame.
    pub async fn frame_details(&self, frame_id: impl Into<LookupId>) -> Result<Value> {
        self.frame_lookup("/frame_details", frame_id.into(), "frame_id")
            .await
    }

    /// Query frame mat options by mat id.
    pub async fn frame_mats(&self, mat_id: impl Into<LookupId>) -> Result<Value> {
        self.frame_lookup("/list_mats", mat_id.into(), "mat_id").await
    }

    /// Query frame glazing options by glazing id.
    pub async fn frame_glazing(&self, glazing_id: impl Into<LookupId>) -> Result<Value> {
        self.frame_lookup("/list_glazing", glazing_id.into(), "glazing_id")
            .await
    }

    async fn frame_lookup(&self, suffix: &str, id: LookupId, what: &str) -> Result<Value> {
        id.ensure_present(what)?;
        let body = IdLookup { id: &id };
        self.send(suffix, Some(&body)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = Finerworks::new("web-key", "app-key").unwrap();
        assert_eq!(client.base_url(), BASE_URL);
    }

    #[test]
    fn test_client_requires_both_keys() {
        let err = Finerworks::new("", "app-key").unwrap_err();
        assert!(matches!(err, Error::Configuration(_)));

        let err = Finerworks::new("web-key", "").unwrap_err();
        assert!(matches!(err, Error::Configuration(_)));
    }

    #[test]
    fn test_client_rejects_bad_base_url() {
        let err = Finerworks::with_base_url("web-key", "app-key", "not a url").unwrap_err();
        assert!(matches!(err, Error::Configuration(_)));
    }

    #[test]
    fn test_endpoint_joining() {
        let client =
            Finerworks::with_base_url("web-key", "app-key", "http://localhost:9000/v3/").unwrap();
        assert_eq!(
            client.endpoint("/frame_details"),
            "http://localhost:9000/v3/frame_details"
        );

        let client = Finerworks::new("web-key", "app-key").unwrap();
        assert_eq!(
            client.endpoint("/submit_orders"),
            "https://api.finerworks.com/v3/submit_orders"
        );
    }

    #[test]
    fn test_from_env_requires_both_keys() {
        std::env::remove_var("FINERWORKS_WEB_API_KEY");
        std::env::remove_var("FINERWORKS_APP_KEY");
        assert!(matches!(
            Finerworks::from_env().unwrap_err(),
            Error::Configuration(_)
        ));
    }
}
