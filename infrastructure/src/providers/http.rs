//! Shared HTTP and usage helpers for the vendor adapters

use crossval_application::ProviderError;
use crossval_domain::TokenPricing;
use serde_json::Value;
use tracing::debug;

/// Send a JSON request and return the decoded JSON body.
///
/// Non-success statuses are classified with [`ProviderError::from_status`].
pub(crate) async fn send_json(request: reqwest::RequestBuilder) -> Result<Value, ProviderError> {
    let response = request
        .send()
        .await
        .map_err(|e| ProviderError::ConnectionError(e.to_string()))?;

    let status = response.status();
    debug!("HTTP status {}", status);
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(ProviderError::from_status(status.as_u16(), body));
    }

    response
        .json()
        .await
        .map_err(|e| ProviderError::MalformedResponse(e.to_string()))
}

/// Read a token count at a JSON pointer
pub(crate) fn token_count(raw: &Value, pointer: &str) -> Result<u64, ProviderError> {
    raw.pointer(pointer)
        .and_then(Value::as_u64)
        .ok_or_else(|| ProviderError::MissingUsage(pointer.trim_start_matches('/').replace('/', ".")))
}

/// Price a call from the input/output token counts at two pointers
pub(crate) fn priced(
    raw: &Value,
    pricing: &TokenPricing,
    input_pointer: &str,
    output_pointer: &str,
) -> Result<f64, ProviderError> {
    let input = token_count(raw, input_pointer)?;
    let output = token_count(raw, output_pointer)?;
    Ok(pricing.cost(input, output))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_priced_multiplies_per_million_rates() {
        let raw = json!({ "usage": { "input_tokens": 100, "output_tokens": 50 } });
        let cost = priced(
            &raw,
            &TokenPricing::new(3.0, 15.0),
            "/usage/input_tokens",
            "/usage/output_tokens",
        )
        .unwrap();
        assert_eq!(cost, 1050.0);
    }

    #[test]
    fn test_missing_usage_names_the_field() {
        let raw = json!({ "usage": { "input_tokens": 100 } });
        let err = token_count(&raw, "/usage/output_tokens").unwrap_err();
        assert_eq!(err.to_string(), "Missing usage field: usage.output_tokens");
    }
}
