use async_graphql::ErrorExtensions;

use crate::errors::{AppError, AppResult};

/// Converts a service result into a GraphQL result carrying the error `code`.
pub fn gql<T>(result: AppResult<T>) -> async_graphql::Result<T> {
    result.map_err(|err| err.extend())
}

/// Applies the REST pagination defaults to optional GraphQL arguments.
pub fn page_bounds(offset: Option<i64>, limit: Option<i64>) -> (i64, i64) {
    let offset = offset.unwrap_or(0).max(0);
    let limit = limit.unwrap_or(20).clamp(1, 100);
    (offset, limit)
}

/// Rejects blank id arguments before they reach a service.
pub fn require_id<'a>(name: &str, value: &'a str) -> AppResult<&'a str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::ValidationError(format!("{} must not be empty", name)));
    }
    Ok(trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_bounds_defaults_and_clamps() {
        assert_eq!(page_bounds(None, None), (0, 20));
        assert_eq!(page_bounds(Some(-5), Some(0)), (0, 1));
        assert_eq!(page_bounds(Some(40), Some(1000)), (40, 100));
    }

    #[test]
    fn gql_attaches_error_code() {
        let err = gql::<()>(Err(AppError::NotFound("result".into()))).unwrap_err();
        let extensions = serde_json::to_value(err.extensions.as_ref().unwrap()).unwrap();

        assert_eq!(err.message, "Not found: result");
        assert_eq!(extensions["code"], "NOT_FOUND");
    }

    #[test]
    fn require_id_rejects_blank() {
        assert!(require_id("id", "  ").is_err());
        assert_eq!(require_id("id", " r-1 ").unwrap(), "r-1");
    }
}
