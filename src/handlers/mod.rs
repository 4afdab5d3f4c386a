// Request handlers
//
// Public:    GET /, GET /health
// Protected: /recipes, /tags, /ingredients (bearer token required)
//
// Protected handlers receive the resolved caller through a request extension
// set by `middleware::require_caller`, and the store through `State`.

pub mod named;
pub mod recipes;
pub mod system;

use crate::error::ApiError;

/// Parse a record id from the path. Anything that is not an integer cannot
/// name a record, so it is reported as not found.
pub(crate) fn parse_record_id(raw: &str) -> Result<i64, ApiError> {
    raw.parse::<i64>().map_err(|_| ApiError::not_found("Not found."))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_numeric_ids_are_not_found() {
        assert_eq!(parse_record_id("42").unwrap(), 42);
        assert!(matches!(parse_record_id("abc"), Err(ApiError::NotFound(_))));
        assert!(matches!(parse_record_id(""), Err(ApiError::NotFound(_))));
    }
}
