//! Votes, the cached tally and the deltas emitted by vote mutations.

use std::fmt;
use std::ops::Add;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{ReviewId, UserId};

/// Direction of a vote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoteType {
    /// Helpful review.
    Up,
    /// Unhelpful review.
    Down,
}

impl VoteType {
    /// Wire name of the vote type.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Down => "down",
        }
    }

    /// The opposite direction.
    pub const fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
        }
    }
}

impl fmt::Display for VoteType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One voter's vote on one review. At most one exists per (voter, review).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vote {
    /// Review being voted on.
    pub review_id: ReviewId,
    /// Voter identity.
    pub user_id: UserId,
    /// Vote direction.
    pub vote_type: VoteType,
}

impl Vote {
    /// Construct a vote record.
    pub const fn new(review_id: ReviewId, user_id: UserId, vote_type: VoteType) -> Self {
        Self {
            review_id,
            user_id,
            vote_type,
        }
    }
}

/// Signed per-column change produced by a vote mutation.
///
/// Stores apply deltas as atomic increments rather than writing absolute
/// counter values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TallyDelta {
    /// Change to the upvote counter.
    pub upvotes: i32,
    /// Change to the downvote counter.
    pub downvotes: i32,
}

impl TallyDelta {
    /// No change.
    pub const ZERO: Self = Self {
        upvotes: 0,
        downvotes: 0,
    };

    /// Delta for a first vote of `vote_type`.
    pub const fn cast(vote_type: VoteType) -> Self {
        match vote_type {
            VoteType::Up => Self {
                upvotes: 1,
                downvotes: 0,
            },
            VoteType::Down => Self {
                upvotes: 0,
                downvotes: 1,
            },
        }
    }

    /// Delta for removing a vote of `vote_type`.
    pub const fn retract(vote_type: VoteType) -> Self {
        let cast = Self::cast(vote_type);
        Self {
            upvotes: -cast.upvotes,
            downvotes: -cast.downvotes,
        }
    }

    /// Delta for flipping a vote away from `from`.
    pub const fn flip(from: VoteType) -> Self {
        let removed = Self::retract(from);
        let added = Self::cast(from.opposite());
        Self {
            upvotes: removed.upvotes + added.upvotes,
            downvotes: removed.downvotes + added.downvotes,
        }
    }

    /// Delta for one voter's row moving from `previous` to `next`.
    ///
    /// ```
    /// use wingrate::domain::{TallyDelta, VoteType};
    ///
    /// assert_eq!(
    ///     TallyDelta::between(Some(VoteType::Up), Some(VoteType::Down)),
    ///     TallyDelta::flip(VoteType::Up)
    /// );
    /// assert!(TallyDelta::between(Some(VoteType::Up), Some(VoteType::Up)).is_zero());
    /// ```
    pub const fn between(previous: Option<VoteType>, next: Option<VoteType>) -> Self {
        let removed = match previous {
            Some(vote_type) => Self::retract(vote_type),
            None => Self::ZERO,
        };
        let added = match next {
            Some(vote_type) => Self::cast(vote_type),
            None => Self::ZERO,
        };
        Self {
            upvotes: removed.upvotes + added.upvotes,
            downvotes: removed.downvotes + added.downvotes,
        }
    }

    /// Whether the delta changes nothing.
    pub const fn is_zero(self) -> bool {
        self.upvotes == 0 && self.downvotes == 0
    }
}

impl Add for TallyDelta {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            upvotes: self.upvotes + rhs.upvotes,
            downvotes: self.downvotes + rhs.downvotes,
        }
    }
}

/// Cached vote counters of a review.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tally {
    upvotes: u32,
    downvotes: u32,
}

impl Tally {
    /// Build a tally from explicit counters.
    pub const fn new(upvotes: u32, downvotes: u32) -> Self {
        Self { upvotes, downvotes }
    }

    /// Upvote counter.
    pub const fn upvotes(self) -> u32 {
        self.upvotes
    }

    /// Downvote counter.
    pub const fn downvotes(self) -> u32 {
        self.downvotes
    }

    /// Counter for `vote_type`.
    pub const fn count(self, vote_type: VoteType) -> u32 {
        match vote_type {
            VoteType::Up => self.upvotes,
            VoteType::Down => self.downvotes,
        }
    }

    /// Apply a delta. Decrements saturate at zero.
    #[must_use]
    pub const fn apply(self, delta: TallyDelta) -> Self {
        Self {
            upvotes: self.upvotes.saturating_add_signed(delta.upvotes),
            downvotes: self.downvotes.saturating_add_signed(delta.downvotes),
        }
    }

    /// Count votes partitioned by type.
    pub fn from_votes<'a>(votes: impl IntoIterator<Item = &'a Vote>) -> Self {
        votes.into_iter().fold(Self::default(), |tally, vote| {
            tally.apply(TallyDelta::cast(vote.vote_type))
        })
    }
}

impl fmt::Display for Tally {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{up: {}, down: {}}}", self.upvotes, self.downvotes)
    }
}

/// What a vote mutation did to the voter's vote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum VoteChange {
    /// First vote by this voter.
    Cast,
    /// Same vote repeated; nothing changed.
    Unchanged,
    /// Existing vote switched direction.
    Flipped {
        /// Previous direction.
        from: VoteType,
    },
    /// Existing vote removed.
    Retracted {
        /// Removed direction.
        from: VoteType,
    },
    /// Retraction requested without a prior vote.
    NoVote,
}

impl VoteChange {
    /// Classify one voter's row moving from `previous` to `next`.
    pub fn between(previous: Option<VoteType>, next: Option<VoteType>) -> Self {
        match (previous, next) {
            (None, Some(_)) => Self::Cast,
            (None, None) => Self::NoVote,
            (Some(from), None) => Self::Retracted { from },
            (Some(from), Some(to)) if from == to => Self::Unchanged,
            (Some(from), Some(_)) => Self::Flipped { from },
        }
    }
}

/// Result of a vote mutation on a review.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VoteOutcome {
    /// Tally after the mutation.
    pub tally: Tally,
    /// Change to persist; zero when nothing changed.
    pub delta: TallyDelta,
    /// What happened to the voter's vote.
    pub change: VoteChange,
    /// The vote row affected, if any.
    pub vote: Option<Vote>,
}

impl VoteOutcome {
    /// Whether the store needs to be written.
    pub const fn is_noop(&self) -> bool {
        self.delta.is_zero()
    }
}

/// What a store did when it wrote or removed a voter's row.
///
/// The row change and the counter delta are applied as one step, so
/// `previous` is the row the write actually replaced, not the one a caller
/// last read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VoteWrite {
    /// Direction of the row replaced or removed, if there was one.
    pub previous: Option<VoteType>,
    /// Delta applied to the counters alongside the row change.
    pub delta: TallyDelta,
    /// Counters after the write.
    pub tally: Tally,
}

/// Vote mutation failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VoteError {
    /// The voter identity is absent or blank.
    #[error("voter identity is missing")]
    UnknownVoter,
}
