use validator::Validate;

use crate::api::errors::ApiError;

/// Runs derive-based validation and reports every failing field as a 400.
pub(crate) fn validate_request<T: Validate>(payload: &T) -> Result<(), ApiError> {
    payload.validate().map_err(|errors| ApiError::BadRequest(errors.to_string()))
}
