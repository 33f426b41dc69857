//! Request types for the FinerWorks API.
//!
//! Recipient addresses and product line items are opaque to the client: the
//! server is authoritative about their shape, so they travel as raw
//! `serde_json::Value` records. Optional order fields serialize as JSON
//! `null` rather than being omitted, matching the upstream wire format.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::Error;

// ============================================================================
// Orders
// ============================================================================

/// A single print order.
#[derive(Debug, Clone, Serialize)]
pub struct Order {
    /// Merchant purchase-order reference.
    pub order_po: Option<String>,
    /// Shipping recipient record, passed through verbatim.
    pub recipient: Value,
    /// Product line items, passed through verbatim.
    pub order_items: Vec<Value>,
    pub shipping_code: Option<String>,
    /// Routes the order to the provider's sandbox instead of live
    /// fulfillment. Defaults to `true`; call [`Order::live`] to opt out.
    pub test_mode: bool,
    /// Webhook URL notified on order status changes.
    pub webhook_order_status_url: Option<String>,
}

impl Order {
    /// Create a single-item sandbox order.
    pub fn new(product: Value, recipient: Value) -> Self {
        Order {
            order_po: None,
            recipient,
            order_items: vec![product],
            shipping_code: None,
            test_mode: true,
            webhook_order_status_url: None,
        }
    }

    /// Set the merchant purchase-order reference.
    pub fn order_po(mut self, po: impl Into<String>) -> Self {
        self.order_po = Some(po.into());
        self
    }

    /// Set the shipping method code.
    pub fn shipping_code(mut self, code: impl Into<String>) -> Self {
        self.shipping_code = Some(code.into());
        self
    }

    /// Set the order-status webhook URL.
    pub fn webhook_url(mut self, url: impl Into<String>) -> Self {
        self.webhook_order_status_url = Some(url.into());
        self
    }

    /// Append another product line item.
    pub fn add_item(mut self, product: Value) -> Self {
        self.order_items.push(product);
        self
    }

    /// Route the order to live fulfillment instead of the sandbox.
    pub fn live(mut self) -> Self {
        self.test_mode = false;
        self
    }
}

// ============================================================================
// Order Ids
// ============================================================================

/// An order id: an integer, or a string holding a base-10 integer.
///
/// The API wants integer ids on the wire. An integer is accepted directly; a
/// string is accepted iff it parses as base-10; anything else is rejected
/// with a validation error before a request goes out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderId {
    Int(i64),
    Text(String),
}

impl OrderId {
    /// Normalize to the wire integer.
    pub fn as_i64(&self) -> Result<i64, Error> {
        match self {
            OrderId::Int(n) => Ok(*n),
            OrderId::Text(s) => s.trim().parse::<i64>().map_err(|_| {
                Error::Validation(format!(
                    "Order ID should be an integer and not literal string: {s:?}"
                ))
            }),
        }
    }
}

impl From<i64> for OrderId {
    fn from(n: i64) -> Self {
        OrderId::Int(n)
    }
}

impl From<i32> for OrderId {
    fn from(n: i32) -> Self {
        OrderId::Int(n.into())
    }
}

impl From<u32> for OrderId {
    fn from(n: u32) -> Self {
        OrderId::Int(n.into())
    }
}

impl From<&str> for OrderId {
    fn from(s: &str) -> Self {
        OrderId::Text(s.to_string())
    }
}

impl From<String> for OrderId {
    fn from(s: String) -> Self {
        OrderId::Text(s)
    }
}

// ============================================================================
// Order Update Commands
// ============================================================================

/// Allowed order update commands.
///
/// Parses case-insensitively and serializes lowercase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UpdateCommand {
    Pending,
    Hold,
    Cancel,
}

impl UpdateCommand {
    /// Wire name of the command.
    pub fn as_str(&self) -> &'static str {
        match self {
            UpdateCommand::Pending => "pending",
            UpdateCommand::Hold => "hold",
            UpdateCommand::Cancel => "cancel",
        }
    }
}

impl FromStr for UpdateCommand {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pending" => Ok(UpdateCommand::Pending),
            "hold" => Ok(UpdateCommand::Hold),
            "cancel" => Ok(UpdateCommand::Cancel),
            other => Err(Error::Validation(format!(
                "Order status update {other:?} not in valid state. Options: pending,hold,cancel"
            ))),
        }
    }
}

impl fmt::Display for UpdateCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Catalog Lookup Ids
// ============================================================================

/// A frame/collection/mat/glazing id, passed through verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum LookupId {
    Int(i64),
    Text(String),
}

impl LookupId {
    /// Reject an empty id before a request goes out.
    pub(crate) fn ensure_present(&self, what: &str) -> Result<(), Error> {
        match self {
            LookupId::Text(s) if s.is_empty() => Err(Error::Validation(format!(
                "`{what}` required for this lookup"
            ))),
            _ => Ok(()),
        }
    }
}

impl From<i64> for LookupId {
    fn from(n: i64) -> Self {
        LookupId::Int(n)
    }
}

impl From<i32> for LookupId {
    fn from(n: i32) -> Self {
        LookupId::Int(n.into())
    }
}

impl From<&str> for LookupId {
    fn from(s: &str) -> Self {
        LookupId::Text(s.to_string())
    }
}

impl From<String> for LookupId {
    fn from(s: String) -> Self {
        LookupId::Text(s)
    }
}

// ============================================================================
// Request Envelopes
// ============================================================================

#[derive(Debug, Serialize)]
pub(crate) struct SubmitOrders<'a> {
    pub orders: [&'a Order; 1],
    pub validate_only: bool,
}

#[derive(Debug, Serialize)]
pub(crate) struct OrderUpdate {
    pub order_id: i64,
    pub update_command: UpdateCommand,
}

#[derive(Debug, Serialize)]
pub(crate) struct OrderStatusQuery {
    pub order_ids: [i64; 1],
}

#[derive(Debug, Serialize)]
pub(crate) struct RecipientEnvelope<'a> {
    pub recipient: &'a Value,
}

#[derive(Debug, Serialize)]
pub(crate) struct ImageSearch<'a> {
    pub search_filter: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct IdLookup<'a> {
    pub id: &'a LookupId,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_order_id_accepts_integer() {
        assert_eq!(OrderId::from(42i64).as_i64().unwrap(), 42);
        assert_eq!(OrderId::from(-7i32).as_i64().unwrap(), -7);
    }

    #[test]
    fn test_order_id_coerces_numeric_string() {
        assert_eq!(OrderId::from("42").as_i64().unwrap(), 42);
        assert_eq!(OrderId::from(" 42 ").as_i64().unwrap(), 42);
        assert_eq!(OrderId::from(String::from("-13")).as_i64().unwrap(), -13);
    }

    #[test]
    fn test_order_id_rejects_non_numeric_string() {
        let err = OrderId::from("abc").as_i64().unwrap_err();
        assert!(matches!(err, Error::Validation(_)));

        let err = OrderId::from("12.5").as_i64().unwrap_err();
        assert!(matches!(err, Error::Validation(_)));

        let err = OrderId::from("").as_i64().unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }

    #[test]
    fn test_update_command_parses_case_insensitively() {
        assert_eq!("PENDING".parse::<UpdateCommand>().unwrap(), UpdateCommand::Pending);
        assert_eq!("Hold".parse::<UpdateCommand>().unwrap(), UpdateCommand::Hold);
        assert_eq!("cancel".parse::<UpdateCommand>().unwrap(), UpdateCommand::Cancel);
    }

    #[test]
    fn test_update_command_rejects_unknown_status() {
        let err = "shipped".parse::<UpdateCommand>().unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }

    #[test]
    fn test_update_command_serializes_lowercase() {
        let body = OrderUpdate {
            order_id: 9,
            update_command: UpdateCommand::Hold,
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({"order_id": 9, "update_command": "hold"})
        );
    }

    #[test]
    fn test_lookup_id_rejects_empty_string() {
        let err = LookupId::from("").ensure_present("frame_id").unwrap_err();
        assert!(matches!(err, Error::Validation(_)));

        assert!(LookupId::from(0i64).ensure_present("frame_id").is_ok());
        assert!(LookupId::from("oak-17").ensure_present("frame_id").is_ok());
    }

    #[test]
    fn test_lookup_id_serializes_verbatim() {
        assert_eq!(serde_json::to_value(LookupId::from(17i64)).unwrap(), json!(17));
        assert_eq!(
            serde_json::to_value(LookupId::from("oak-17")).unwrap(),
            json!("oak-17")
        );
    }

    #[test]
    fn test_order_defaults_to_sandbox() {
        let order = Order::new(json!({"sku": "canvas-8x10"}), json!({"name": "Ada"}));
        assert!(order.test_mode);
        assert!(!order.live().test_mode);
    }

    #[test]
    fn test_order_serializes_optional_fields_as_null() {
        let order = Order::new(json!({"sku": "canvas-8x10"}), json!({"name": "Ada"}));
        let value = serde_json::to_value(&order).unwrap();
        assert_eq!(value["order_po"], Value::Null);
        assert_eq!(value["shipping_code"], Value::Null);
        assert_eq!(value["webhook_order_status_url"], Value::Null);
        assert_eq!(value["test_mode"], json!(true));
        assert_eq!(value["order_items"], json!([{"sku": "canvas-8x10"}]));
    }

    #[test]
    fn test_submit_envelope_shape() {
        let order = Order::new(json!({"sku": "print-a4"}), json!({"name": "Ada"}))
            .order_po("PO-100")
            .shipping_code("SD");
        let envelope = SubmitOrders {
            orders: [&order],
            validate_only: true,
        };
        let value = serde_json::to_value(&envelope).unwrap();
        assert_eq!(value["validate_only"], json!(true));
        assert_eq!(value["orders"][0]["order_po"], json!("PO-100"));
        assert_eq!(value["orders"][0]["shipping_code"], json!("SD"));
    }
}
