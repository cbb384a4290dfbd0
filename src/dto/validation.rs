//! Validation helpers for score requests.
//!
//! Each helper checks one field and reports a distinct [`ValidationError`] so handlers can
//! short-circuit on the first failure in a fixed order.

use serde_json::Value;
use validator::ValidationError;

fn invalid(code: &'static str, message: &'static str) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(message.into());
    err
}

/// Validates that the declared content type is JSON (`application/json` or `*/*+json`).
///
/// Media type parameters such as `charset` are ignored.
pub fn validate_content_type(content_type: Option<&str>) -> Result<(), ValidationError> {
    let media_type = content_type
        .and_then(|value| value.split(';').next())
        .map(|value| value.trim().to_ascii_lowercase())
        .unwrap_or_default();

    let is_json = media_type == "application/json"
        || media_type
            .split_once('/')
            .is_some_and(|(kind, subtype)| !kind.is_empty() && subtype.ends_with("+json"));

    if is_json {
        Ok(())
    } else {
        Err(invalid(
            "content_type",
            "Content-Type must be application/json",
        ))
    }
}

/// Extracts the player from a request body; it must be a string with visible characters.
pub fn validate_player(value: Option<&Value>) -> Result<&str, ValidationError> {
    match value {
        Some(Value::String(player)) if !player.trim().is_empty() => Ok(player.as_str()),
        _ => Err(invalid(
            "player",
            "Invalid player: must be a non-empty string",
        )),
    }
}

/// Extracts the score from a request body; it must be a non-negative JSON number.
pub fn validate_score(value: Option<&Value>) -> Result<f64, ValidationError> {
    match value.and_then(Value::as_f64) {
        Some(score) if score.is_finite() && score >= 0.0 => Ok(score),
        _ => Err(invalid_score()),
    }
}

/// Error reported for any score that is not a non-negative number.
pub fn invalid_score() -> ValidationError {
    invalid("score", "Invalid score: must be a non-negative number")
}

/// Rejects query strings whose percent-escapes do not decode to UTF-8.
pub fn validate_query_encoding(raw_query: Option<&str>) -> Result<(), ValidationError> {
    match raw_query.map(urlencoding::decode) {
        Some(Err(_)) => Err(invalid(
            "query_encoding",
            "Query string must be valid UTF-8",
        )),
        _ => Ok(()),
    }
}

/// Validates the `player` query parameter of a score lookup.
pub fn validate_query_player(player: Option<&str>) -> Result<&str, ValidationError> {
    match player {
        Some(player) if !player.trim().is_empty() => Ok(player),
        _ => Err(invalid("player_missing", "Missing player query parameter")),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_validate_content_type_accepts_json() {
        assert!(validate_content_type(Some("application/json")).is_ok());
        assert!(validate_content_type(Some("application/json; charset=utf-8")).is_ok());
        assert!(validate_content_type(Some("Application/JSON")).is_ok());
        assert!(validate_content_type(Some("application/vnd.api+json")).is_ok());
    }

    #[test]
    fn test_validate_content_type_rejects_others() {
        assert!(validate_content_type(None).is_err());
        assert!(validate_content_type(Some("")).is_err());
        assert!(validate_content_type(Some("text/plain")).is_err());
        assert!(validate_content_type(Some("application/x-www-form-urlencoded")).is_err());
        assert!(validate_content_type(Some("+json")).is_err());
    }

    #[test]
    fn test_validate_player() {
        assert_eq!(validate_player(Some(&json!("alice"))).unwrap(), "alice");
        assert!(validate_player(None).is_err());
        assert!(validate_player(Some(&json!(""))).is_err());
        assert!(validate_player(Some(&json!("   "))).is_err()); // blank
        assert!(validate_player(Some(&json!(42))).is_err()); // not a string
        assert!(validate_player(Some(&Value::Null)).is_err());
    }

    #[test]
    fn test_validate_score() {
        assert_eq!(validate_score(Some(&json!(100))).unwrap(), 100.0);
        assert_eq!(validate_score(Some(&json!(0))).unwrap(), 0.0);
        assert_eq!(validate_score(Some(&json!(12.5))).unwrap(), 12.5);
        assert!(validate_score(None).is_err());
        assert!(validate_score(Some(&json!(-1))).is_err());
        assert!(validate_score(Some(&json!("abc"))).is_err());
        assert!(validate_score(Some(&json!("100"))).is_err()); // numeric strings are not numbers
        assert!(validate_score(Some(&json!(true))).is_err());
    }

    #[test]
    fn test_validation_codes_are_distinct() {
        let codes = [
            validate_content_type(None).unwrap_err().code,
            validate_player(None).unwrap_err().code,
            validate_score(None).unwrap_err().code,
            validate_query_player(None).unwrap_err().code,
        ];
        for (i, code) in codes.iter().enumerate() {
            assert!(codes[i + 1..].iter().all(|other| other != code));
        }
    }

    #[test]
    fn test_validate_query_player() {
        assert_eq!(validate_query_player(Some("bob")).unwrap(), "bob");
        assert!(validate_query_player(None).is_err());
        assert!(validate_query_player(Some("")).is_err());
    }

    #[test]
    fn test_validate_query_encoding() {
        assert!(validate_query_encoding(None).is_ok());
        assert!(validate_query_encoding(Some("player=alice%20smith")).is_ok());
        assert!(validate_query_encoding(Some("player=%C3%A9")).is_ok());
        let err = validate_query_encoding(Some("player=%FF")).unwrap_err();
        assert_eq!(err.code, "query_encoding");
    }
}
