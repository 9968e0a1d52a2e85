//! Tests for the review lifecycle and vote mutations.

use super::*;
use crate::domain::{
    BasicInfoInput, RatingsInput, RawCoordinates, validate_basic_info, validate_ratings,
};
use chrono::NaiveDate;
use rating_descriptions::{RatingDescriptions, RatingField};
use rstest::{fixture, rstest};

#[fixture]
fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 1).expect("valid fixture date")
}

#[fixture]
fn wing_shack_input() -> BasicInfoInput {
    BasicInfoInput {
        restaurant_name: "Wing Shack".to_owned(),
        address: "123 Main St".to_owned(),
        date_visited: "2024-01-01".to_owned(),
        website_url: None,
        coordinates: Some(RawCoordinates {
            latitude: 40.0,
            longitude: -75.0,
        }),
    }
}

#[fixture]
fn draft(wing_shack_input: BasicInfoInput, today: NaiveDate) -> ReviewDraft {
    let info = validate_basic_info(&wing_shack_input, today).expect("valid basic info");
    ReviewDraft::start(info)
}

#[fixture]
fn review(draft: ReviewDraft) -> Review {
    let content = draft
        .publish(LocationId::new(1), "author", "Crispy and hot", "A")
        .expect("publishable draft");
    Review::from_new(ReviewId::new(10), content)
}

#[rstest]
fn published_review_starts_with_empty_tally(review: Review) {
    assert_eq!(review.tally(), Tally::new(0, 0));
    assert_eq!(review.date_visited(), NaiveDate::from_ymd_opt(2024, 1, 1).expect("date"));
    assert_eq!(review.user_id().as_ref(), "author");
    assert!(review.ratings().is_none());
    assert!(review.votes().is_none());
}

#[rstest]
fn publication_requires_coordinates(mut wing_shack_input: BasicInfoInput, today: NaiveDate) {
    wing_shack_input.coordinates = None;
    let info = validate_basic_info(&wing_shack_input, today).expect("valid basic info");
    let draft = ReviewDraft::start(info);

    let missing = ValidationError::MissingField {
        field: RequiredField::Coordinates,
    };
    assert_eq!(draft.location_content(), Err(missing.clone()));
    assert_eq!(
        draft.publish(LocationId::new(1), "author", "", "B"),
        Err(missing)
    );
}

#[rstest]
fn publication_requires_author(draft: ReviewDraft) {
    assert_eq!(
        draft.publish(LocationId::new(1), "  ", "", "B"),
        Err(ValidationError::MissingField {
            field: RequiredField::Author,
        })
    );
}

#[rstest]
fn wing_shack_publishes_with_ratings_and_rejects_conflict(draft: ReviewDraft) {
    let descriptions = RatingDescriptions::builtin();
    let input = RatingsInput {
        blue_cheese_na: true,
        ..RatingsInput::default()
    }
    .with_score(RatingField::Appearance, 4);
    let ratings = validate_ratings(&input, descriptions).expect("valid ratings");

    let content = draft
        .attach_ratings(ratings)
        .publish(LocationId::new(1), "author", "", "A")
        .expect("publishable draft");
    let published = Review::from_new(ReviewId::new(1), content);
    let attached = published.ratings().expect("ratings attached");
    assert_eq!(attached.score(RatingField::Appearance), Some(4));
    assert!(attached.blue_cheese_na());

    let conflicting = input.with_score(RatingField::BlueCheeseQuality, 3);
    assert_eq!(
        validate_ratings(&conflicting, descriptions),
        Err(ValidationError::ConflictingBlueCheeseState)
    );
}

#[rstest]
fn first_vote_is_cast_and_counted(mut review: Review) {
    let outcome = review.record_vote("u1", VoteType::Up).expect("vote");

    assert_eq!(outcome.change, VoteChange::Cast);
    assert_eq!(outcome.delta, TallyDelta::cast(VoteType::Up));
    assert_eq!(outcome.tally, Tally::new(1, 0));
    assert_eq!(review.vote_of(&UserId::new("u1").expect("id")), Some(VoteType::Up));
}

#[rstest]
fn repeated_vote_is_a_noop(mut review: Review) {
    review.record_vote("u1", VoteType::Down).expect("vote");
    let outcome = review.record_vote("u1", VoteType::Down).expect("vote");

    assert_eq!(outcome.change, VoteChange::Unchanged);
    assert!(outcome.is_noop());
    assert_eq!(review.tally(), Tally::new(0, 1));
    assert_eq!(review.votes().map(<[Vote]>::len), Some(1));
}

#[rstest]
fn flipping_moves_one_count_and_never_double_counts(mut review: Review) {
    let mut observed = vec![review.tally()];
    observed.push(review.record_vote("u1", VoteType::Up).expect("vote").tally);
    let outcome = review.record_vote("u1", VoteType::Down).expect("vote");
    observed.push(outcome.tally);

    assert_eq!(
        observed,
        [Tally::new(0, 0), Tally::new(1, 0), Tally::new(0, 1)]
    );
    assert_eq!(outcome.change, VoteChange::Flipped { from: VoteType::Up });
    assert_eq!(outcome.delta, TallyDelta { upvotes: -1, downvotes: 1 });
}

#[rstest]
fn replaying_votes_keeps_the_last_one(mut review: Review) {
    for vote_type in [VoteType::Up, VoteType::Up, VoteType::Down, VoteType::Up] {
        review.record_vote("u1", vote_type).expect("vote");
    }
    assert_eq!(review.tally(), Tally::new(1, 0));
}

#[rstest]
fn tally_matches_votes_after_mixed_activity(mut review: Review) {
    let script = [
        ("u1", VoteType::Up),
        ("u2", VoteType::Down),
        ("u3", VoteType::Up),
        ("u2", VoteType::Up),
        ("u1", VoteType::Down),
        ("u1", VoteType::Down),
    ];
    for (voter, vote_type) in script {
        review.record_vote(voter, vote_type).expect("vote");
    }
    let votes = review.votes().expect("votes loaded");
    assert_eq!(review.tally(), Tally::from_votes(votes));
    assert_eq!(review.tally(), Tally::new(2, 1));
}

#[rstest]
#[case::empty("")]
#[case::blank("   ")]
fn missing_voter_is_rejected(mut review: Review, #[case] voter: &str) {
    assert_eq!(
        review.record_vote(voter, VoteType::Up),
        Err(VoteError::UnknownVoter)
    );
    assert_eq!(review.retract_vote(voter), Err(VoteError::UnknownVoter));
    assert_eq!(review.tally(), Tally::new(0, 0));
}

#[rstest]
fn padded_voter_id_is_a_present_voter(mut review: Review) {
    let outcome = review.record_vote(" u1", VoteType::Up).expect("present voter");
    assert_eq!(outcome.change, VoteChange::Cast);
    assert_eq!(review.tally(), Tally::new(1, 0));

    review.record_vote("u1", VoteType::Up).expect("present voter");
    assert_eq!(review.tally(), Tally::new(2, 0));
    let retracted = review.retract_vote(" u1").expect("present voter");
    assert_eq!(retracted.change, VoteChange::Retracted { from: VoteType::Up });
    assert_eq!(review.tally(), Tally::new(1, 0));
}

#[rstest]
fn retraction_removes_vote_and_decrements(mut review: Review) {
    review.record_vote("u1", VoteType::Down).expect("vote");
    let outcome = review.retract_vote("u1").expect("retract");

    assert_eq!(outcome.change, VoteChange::Retracted { from: VoteType::Down });
    assert_eq!(outcome.delta, TallyDelta::retract(VoteType::Down));
    assert_eq!(review.tally(), Tally::new(0, 0));
    assert_eq!(review.votes().map(<[Vote]>::len), Some(0));
}

#[rstest]
fn retraction_without_vote_is_a_noop(mut review: Review) {
    let outcome = review.retract_vote("u9").expect("retract");
    assert_eq!(outcome.change, VoteChange::NoVote);
    assert!(outcome.is_noop());
    assert!(outcome.vote.is_none());
}

#[rstest]
fn author_may_vote_on_own_review(mut review: Review) {
    let outcome = review.record_vote("author", VoteType::Up).expect("self vote");
    assert_eq!(outcome.tally, Tally::new(1, 0));
}

#[rstest]
fn stale_counters_never_underflow(review: Review) {
    let mut review = review.with_votes(vec![Vote::new(
        ReviewId::new(10),
        UserId::new("u1").expect("id"),
        VoteType::Up,
    )]);
    let outcome = review.retract_vote("u1").expect("retract");
    assert_eq!(outcome.tally, Tally::new(0, 0));
}
