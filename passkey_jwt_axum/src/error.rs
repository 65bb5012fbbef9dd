use axum::Json;
use http::StatusCode;
use passkey_jwt::CoordinationError;
use serde_json::{Value, json};

/// Error half of every handler response: a status code plus a JSON body of
/// the form `{"error": "..."}`.
pub(super) type ApiError = (StatusCode, Json<Value>);

pub(super) fn api_error(status: StatusCode, message: impl Into<String>) -> ApiError {
    (status, Json(json!({ "error": message.into() })))
}

/// Helper trait for converting errors to a standard response error format
pub(super) trait IntoResponseError<T> {
    fn into_response_error(self) -> Result<T, ApiError>;
}

/// Implementation for CoordinationError to map variants to appropriate status codes
impl<T> IntoResponseError<T> for Result<T, CoordinationError> {
    fn into_response_error(self) -> Result<T, ApiError> {
        self.map_err(|e| {
            let status = match e {
                CoordinationError::Unauthorized => StatusCode::UNAUTHORIZED,
                CoordinationError::Authentication(_) => StatusCode::UNAUTHORIZED,
                CoordinationError::Conflict(_) => StatusCode::CONFLICT,
                CoordinationError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
                CoordinationError::PasskeyError(_) => StatusCode::BAD_REQUEST,
                CoordinationError::UserError(_) => StatusCode::BAD_REQUEST,
                CoordinationError::ResourceNotFound { .. } => StatusCode::NOT_FOUND,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            };
            api_error(status, e.to_string())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use passkey_jwt::CoordinationError;

    fn status_of<T>(result: Result<T, CoordinationError>) -> StatusCode {
        match result.into_response_error() {
            Err((status, _)) => status,
            Ok(_) => panic!("Expected an error"),
        }
    }

    #[test]
    fn test_unauthorized_maps_to_401() {
        assert_eq!(
            status_of::<()>(Err(CoordinationError::Unauthorized)),
            StatusCode::UNAUTHORIZED
        );
    }

    #[test]
    fn test_authentication_maps_to_401() {
        assert_eq!(
            status_of::<()>(Err(CoordinationError::Authentication(
                "bad password".to_string()
            ))),
            StatusCode::UNAUTHORIZED
        );
    }

    #[test]
    fn test_conflict_maps_to_409() {
        assert_eq!(
            status_of::<()>(Err(CoordinationError::Conflict("taken".to_string()))),
            StatusCode::CONFLICT
        );
    }

    #[test]
    fn test_not_found_maps_to_404() {
        assert_eq!(
            status_of::<()>(Err(CoordinationError::ResourceNotFound {
                resource_type: "item".to_string(),
                resource_id: "123".to_string(),
            })),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn test_invalid_request_maps_to_400() {
        assert_eq!(
            status_of::<()>(Err(CoordinationError::InvalidRequest(
                "name is required".to_string()
            ))),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_database_maps_to_500() {
        assert_eq!(
            status_of::<()>(Err(CoordinationError::Database(
                "connection lost".to_string()
            ))),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_error_body_shape() {
        let result: Result<(), CoordinationError> = Err(CoordinationError::Unauthorized);
        let (_, Json(body)) = result.into_response_error().unwrap_err();

        assert_eq!(body["error"], "Unauthorized access");
    }

    #[test]
    fn test_success_case_passes_through() {
        let result: Result<String, CoordinationError> = Ok("Success".to_string());
        assert_eq!(result.into_response_error().unwrap(), "Success");
    }
}
