//! Port error mapping shared by the review services.

use crate::domain::Error;
use crate::domain::ports::{
    LocationRepositoryError, ReviewRepositoryError, StoreProbeError, ThemePreferenceStoreError,
};

pub(crate) fn map_review_error(error: ReviewRepositoryError) -> Error {
    match error {
        ReviewRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("review repository unavailable: {message}"))
        }
        ReviewRepositoryError::Query { message } => {
            Error::internal(format!("review repository error: {message}"))
        }
        ReviewRepositoryError::MissingReview { review_id } => {
            Error::not_found(format!("review {review_id} does not exist"))
        }
        ReviewRepositoryError::Corrupt { message } => {
            Error::internal(format!("stored review is unreadable: {message}"))
        }
    }
}

pub(crate) fn map_location_error(error: LocationRepositoryError) -> Error {
    match error {
        LocationRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("location repository unavailable: {message}"))
        }
        LocationRepositoryError::Query { message } => {
            Error::internal(format!("location repository error: {message}"))
        }
    }
}

pub(crate) fn map_probe_error(error: StoreProbeError) -> Error {
    match error {
        StoreProbeError::Unreachable { .. } => Error::service_unavailable(error.to_string()),
        StoreProbeError::AccessDenied { .. } => Error::internal(error.to_string()),
    }
}

pub(crate) fn map_theme_store_error(error: ThemePreferenceStoreError) -> Error {
    Error::service_unavailable(error.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::rstest;

    #[rstest]
    #[case::connection(ReviewRepositoryError::connection("refused"), ErrorCode::ServiceUnavailable)]
    #[case::query(ReviewRepositoryError::query("syntax"), ErrorCode::InternalError)]
    #[case::missing(ReviewRepositoryError::missing_review(4_i64), ErrorCode::NotFound)]
    #[case::corrupt(ReviewRepositoryError::corrupt("bad json"), ErrorCode::InternalError)]
    fn review_errors_map_to_stable_codes(
        #[case] error: ReviewRepositoryError,
        #[case] expected: ErrorCode,
    ) {
        assert_eq!(map_review_error(error).code(), expected);
    }

    #[rstest]
    fn unreachable_probe_is_unavailable() {
        let error = map_probe_error(StoreProbeError::unreachable("votes", "timeout"));
        assert_eq!(error.code(), ErrorCode::ServiceUnavailable);
        assert_eq!(error.message(), "votes is unreachable: timeout");
    }
}
