//! Client for the FinerWorks print-on-demand REST API (v3).
//!
//! FinerWorks exposes order submission, order status, address validation and
//! image/frame catalog lookups over HTTPS POST with JSON bodies. Every call
//! carries the account's `web_api_key` and `app_key` headers; this crate
//! wraps that contract in one method per endpoint.
//!
//! # Example
//!
//! ```no_run
//! use finerworks::{Finerworks, Order};
//! use serde_json::json;
//!
//! # async fn run() -> finerworks::Result<()> {
//! let client = Finerworks::from_env()?;
//! client.login().await?;
//!
//! let order = Order::new(
//!     json!({"product_sku": "canvas-8x10", "quantity": 1}),
//!     json!({"first_name": "Ada", "city": "Austin", "country_code": "US"}),
//! )
//! .order_po("PO-1001")
//! .shipping_code("SD");
//!
//! let receipt = client.submit_order(&order, false).await?;
//! println!("{receipt}");
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod error;
pub mod models;

// Re-export commonly used types
pub use client::{Finerworks, BASE_URL};
pub use error::{Error, Result};
pub use models::{LookupId, Order, OrderId, UpdateCommand};
