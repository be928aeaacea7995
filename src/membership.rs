//! Membership form input and checkout request validation
//!
//! The payment session itself is created elsewhere; this only decides
//! whether a request may go there. In the browser the form calls these
//! through the exports in [`web`].

use std::fmt;

use serde::Deserialize;
use serde_json::{Value, json};

/// Keep only the characters a contribution may contain
pub fn clean_contribution(input: &str) -> String {
    input
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == ',')
        .collect()
}

/// Contribution field as typed, for display next to the input
pub fn display_contribution(input: &str) -> String {
    let clean = clean_contribution(input);
    if clean.is_empty() {
        clean
    } else {
        format!("{} €", clean)
    }
}

/// Parse a contribution amount in euros.
///
/// Everything but digits, `.` and `,` is dropped, then the longest leading
/// decimal number is read: `"12,50"` is 12 and `"1.2.3"` is 1.2. `None`
/// when no digit starts the input.
pub fn parse_contribution(input: &str) -> Option<f64> {
    let clean = clean_contribution(input);
    let mut end = 0;
    let mut seen_dot = false;
    let mut digits = false;
    for (i, c) in clean.char_indices() {
        match c {
            '0'..='9' => digits = true,
            '.' if !seen_dot => seen_dot = true,
            _ => break,
        }
        end = i + c.len_utf8();
    }
    if !digits {
        return None;
    }
    clean[..end].parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Why a checkout request was refused
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckoutError {
    MissingPriceId,
    InvalidBody(String),
}

impl CheckoutError {
    /// HTTP status to answer with
    pub fn status(&self) -> u16 {
        400
    }

    /// JSON error body
    pub fn body(&self) -> Value {
        json!({ "error": self.to_string() })
    }
}

impl fmt::Display for CheckoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CheckoutError::MissingPriceId => write!(f, "priceId fehlt"),
            CheckoutError::InvalidBody(e) => write!(f, "invalid request body: {}", e),
        }
    }
}

impl std::error::Error for CheckoutError {}

#[derive(Debug, Deserialize)]
struct RawCheckout {
    #[serde(rename = "priceId")]
    price_id: Option<String>,
}

/// A validated request to start a subscription checkout
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutRequest {
    pub price_id: String,
}

impl CheckoutRequest {
    /// Validate a request body. Rejected before any payment call is made.
    pub fn from_json(body: &str) -> Result<Self, CheckoutError> {
        let raw: RawCheckout =
            serde_json::from_str(body).map_err(|e| CheckoutError::InvalidBody(e.to_string()))?;
        let price_id = raw
            .price_id
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty())
            .ok_or(CheckoutError::MissingPriceId)?;
        Ok(Self { price_id })
    }
}

/// Bindings for the membership form
#[cfg(target_arch = "wasm32")]
pub mod web {
    use wasm_bindgen::prelude::*;

    use super::{CheckoutRequest, clean_contribution, display_contribution, parse_contribution};

    #[wasm_bindgen(js_name = cleanContribution)]
    pub fn clean_contribution_js(input: &str) -> String {
        clean_contribution(input)
    }

    /// Value the contribution input shows while typing
    #[wasm_bindgen(js_name = displayContribution)]
    pub fn display_contribution_js(input: &str) -> String {
        display_contribution(input)
    }

    #[wasm_bindgen(js_name = parseContribution)]
    pub fn parse_contribution_js(input: &str) -> Option<f64> {
        parse_contribution(input)
    }

    /// Price id of a checkout request body. Throws the JSON error body
    /// (answered with status 400) when the request is refused.
    #[wasm_bindgen(js_name = validateCheckout)]
    pub fn validate_checkout(body: &str) -> Result<String, JsValue> {
        CheckoutRequest::from_json(body)
            .map(|request| request.price_id)
            .map_err(|e| JsValue::from_str(&e.body().to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_contribution() {
        assert_eq!(parse_contribution("12"), Some(12.0));
        assert_eq!(parse_contribution("EUR 7.5"), Some(7.5));
        assert_eq!(parse_contribution(".5"), Some(0.5));
        assert_eq!(parse_contribution("12."), Some(12.0));
    }

    #[test]
    fn test_parse_contribution_reads_leading_number() {
        assert_eq!(parse_contribution("12,50 €"), Some(12.0));
        assert_eq!(parse_contribution("1.2.3"), Some(1.2));
        assert_eq!(parse_contribution("1.200,00"), Some(1.2));
    }

    #[test]
    fn test_parse_contribution_rejects_garbage() {
        assert_eq!(parse_contribution(""), None);
        assert_eq!(parse_contribution("zwanzig"), None);
        assert_eq!(parse_contribution(",,"), None);
        assert_eq!(parse_contribution("."), None);
        assert_eq!(parse_contribution(",5"), None);
    }

    #[test]
    fn test_form_keystrokes() {
        // Each keystroke stores the cleaned value and shows it with the unit
        let mut stored = String::new();
        for typed in ["1", "15", "15x", "15,", "15,5"] {
            stored = clean_contribution(typed);
            assert_eq!(display_contribution(&stored), format!("{} €", stored));
        }
        assert_eq!(stored, "15,5");
        assert_eq!(parse_contribution(&stored), Some(15.0));
        assert_eq!(display_contribution(""), "");
    }

    #[test]
    fn test_display_contribution() {
        assert_eq!(display_contribution("15abc"), "15 €");
        assert_eq!(display_contribution("abc"), "");
    }

    #[test]
    fn test_checkout_requires_price_id() {
        assert_eq!(
            CheckoutRequest::from_json(r#"{"priceId":"price_123"}"#),
            Ok(CheckoutRequest {
                price_id: "price_123".to_string()
            })
        );
        for body in [r#"{}"#, r#"{"priceId":""}"#, r#"{"priceId":"  "}"#, r#"{"priceId":null}"#] {
            let err = CheckoutRequest::from_json(body).unwrap_err();
            assert_eq!(err, CheckoutError::MissingPriceId);
            assert_eq!(err.status(), 400);
            assert_eq!(err.body()["error"], "priceId fehlt");
        }
    }

    #[test]
    fn test_checkout_malformed_body() {
        let err = CheckoutRequest::from_json("not json").unwrap_err();
        assert!(matches!(err, CheckoutError::InvalidBody(_)));
        assert_eq!(err.status(), 400);
    }
}
