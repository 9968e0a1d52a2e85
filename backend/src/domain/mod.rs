//! Domain primitives, aggregates and services.
//!
//! Purpose: define the review record model (validation, vote tally,
//! reconciliation, wire format) and the services that drive it over the
//! persistence ports. Types keep their fields private and document
//! invariants and serialisation contracts in their Rustdoc.
//!
//! Public surface:
//! - Basic Info, ratings and detail validation (`validate_basic_info`,
//!   `validate_ratings`, `ExperienceDetails`, `SauceDetails`).
//! - `ReviewDraft` → `NewReview` → `Review` lifecycle with `record_vote` and
//!   `retract_vote`.
//! - `reconcile_tally` and the versioned wire codec.
//! - Services: submission, voting, audit, nearby queries, theme.

pub mod basic_info;
pub mod coordinates;
pub mod details;
pub mod error;
pub mod ids;
pub mod location;
pub mod ports;
pub mod ratings;
pub mod reconciliation;
pub mod review;
pub mod review_query_service;
pub mod review_submission_service;
mod service_support;
pub mod tally_audit_service;
pub mod theme;
pub mod theme_preferences_service;
pub mod validation;
pub mod vote;
pub mod vote_service;
pub mod wire;

pub use self::basic_info::{
    BasicInfoInput, RawCoordinates, ValidatedBasicInfo, validate_basic_info,
    validate_basic_info_now,
};
pub use self::coordinates::Coordinates;
pub use self::details::{ExperienceDetails, ExperienceDetailsInput, SauceDetails, SauceDetailsInput};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::ids::{LocationId, ReviewId, UserId, UserIdError};
pub use self::location::{Location, NewLocation};
pub use self::ratings::{Ratings, RatingsInput, validate_ratings};
pub use self::reconciliation::{
    ReconciliationReport, TallyField, TallyMismatch, reconcile_counts, reconcile_tally,
};
pub use self::review::{NewReview, Review, ReviewDraft};
pub use self::review_query_service::{NearbyReview, ReviewQueryService};
pub use self::review_submission_service::{ReviewSubmission, ReviewSubmissionService};
pub use self::tally_audit_service::{
    AuditSummary, CollectionProbe, ProbeReport, TallyAuditService,
};
pub use self::theme::{ParseThemeError, ThemeMode};
pub use self::theme_preferences_service::ThemePreferences;
pub use self::validation::{DateProblem, RequiredField, ValidationError};
pub use self::vote::{
    Tally, TallyDelta, Vote, VoteChange, VoteError, VoteOutcome, VoteType, VoteWrite,
};
pub use self::vote_service::VoteService;
pub use self::wire::{
    ParseError, ReviewRecord, SCHEMA_VERSION, deserialize_review, deserialize_review_value,
    serialize_review,
};

/// Convenient service result alias.
pub type ServiceResult<T> = Result<T, Error>;
