use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::{FollowUpId, UserId};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum FollowUpError {
    #[error("rating {0} is out of range (1-10)")]
    RatingOutOfRange(u32),
}

/// A 1-10 self-assessment rating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Rating(u32);

impl Rating {
    /// Build a rating, rejecting values outside 1-10.
    ///
    /// # Errors
    ///
    /// Returns `FollowUpError::RatingOutOfRange` otherwise.
    pub fn new(value: u32) -> Result<Self, FollowUpError> {
        if !(1..=10).contains(&value) {
            return Err(FollowUpError::RatingOutOfRange(value));
        }
        Ok(Self(value))
    }

    #[must_use]
    pub fn value(self) -> u32 {
        self.0
    }
}

impl TryFrom<u32> for Rating {
    type Error = FollowUpError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Rating> for u32 {
    fn from(rating: Rating) -> Self {
        rating.0
    }
}

/// A submitted progress check-in. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FollowUp {
    id: FollowUpId,
    user_id: UserId,
    recorded_at: DateTime<Utc>,
    symptoms: Vec<String>,
    improvements: Vec<String>,
    concerns: Vec<String>,
    energy: Rating,
    sleep: Rating,
    digestion: Rating,
    notes: String,
}

impl FollowUp {
    /// Rehydrate a follow-up from persisted storage.
    #[allow(clippy::too_many_arguments)]
    #[must_use]
    pub fn from_persisted(
        id: FollowUpId,
        user_id: UserId,
        recorded_at: DateTime<Utc>,
        symptoms: Vec<String>,
        improvements: Vec<String>,
        concerns: Vec<String>,
        energy: Rating,
        sleep: Rating,
        digestion: Rating,
        notes: String,
    ) -> Self {
        Self {
            id,
            user_id,
            recorded_at,
            symptoms,
            improvements,
            concerns,
            energy,
            sleep,
            digestion,
            notes,
        }
    }

    #[must_use]
    pub fn id(&self) -> FollowUpId {
        self.id
    }

    #[must_use]
    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    #[must_use]
    pub fn recorded_at(&self) -> DateTime<Utc> {
        self.recorded_at
    }

    #[must_use]
    pub fn symptoms(&self) -> &[String] {
        &self.symptoms
    }

    #[must_use]
    pub fn improvements(&self) -> &[String] {
        &self.improvements
    }

    #[must_use]
    pub fn concerns(&self) -> &[String] {
        &self.concerns
    }

    #[must_use]
    pub fn energy(&self) -> Rating {
        self.energy
    }

    #[must_use]
    pub fn sleep(&self) -> Rating {
        self.sleep
    }

    #[must_use]
    pub fn digestion(&self) -> Rating {
        self.digestion
    }

    #[must_use]
    pub fn notes(&self) -> &str {
        &self.notes
    }
}

/// Unvalidated follow-up submission from the form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FollowUpDraft {
    pub symptoms: Vec<String>,
    pub improvements: Vec<String>,
    pub concerns: Vec<String>,
    pub energy: u32,
    pub sleep: u32,
    pub digestion: u32,
    pub notes: String,
}

impl FollowUpDraft {
    /// Validate the ratings and stamp the draft with owner and time.
    ///
    /// The resulting value has no id yet; storage assigns one on append.
    ///
    /// # Errors
    ///
    /// Returns `FollowUpError` if any rating is outside 1-10.
    pub fn validate(
        self,
        user_id: UserId,
        recorded_at: DateTime<Utc>,
    ) -> Result<FollowUp, FollowUpError> {
        Ok(FollowUp {
            id: FollowUpId::new(0),
            user_id,
            recorded_at,
            symptoms: self.symptoms,
            improvements: self.improvements,
            concerns: self.concerns,
            energy: Rating::new(self.energy)?,
            sleep: Rating::new(self.sleep)?,
            digestion: Rating::new(self.digestion)?,
            notes: self.notes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::fixed_now;

    #[test]
    fn rating_bounds() {
        assert!(Rating::new(1).is_ok());
        assert!(Rating::new(10).is_ok());
        assert_eq!(Rating::new(0), Err(FollowUpError::RatingOutOfRange(0)));
        assert_eq!(Rating::new(11), Err(FollowUpError::RatingOutOfRange(11)));
    }

    #[test]
    fn draft_validation_catches_bad_rating() {
        let draft = FollowUpDraft {
            energy: 5,
            sleep: 12,
            digestion: 5,
            ..FollowUpDraft::default()
        };
        let err = draft.validate(UserId::new(1), fixed_now()).unwrap_err();
        assert_eq!(err, FollowUpError::RatingOutOfRange(12));
    }

    #[test]
    fn draft_validation_stamps_owner_and_time() {
        let now = fixed_now();
        let draft = FollowUpDraft {
            symptoms: vec!["dry skin".into()],
            energy: 6,
            sleep: 7,
            digestion: 8,
            notes: "feeling steadier".into(),
            ..FollowUpDraft::default()
        };
        let follow_up = draft.validate(UserId::new(9), now).unwrap();
        assert_eq!(follow_up.user_id(), UserId::new(9));
        assert_eq!(follow_up.recorded_at(), now);
        assert_eq!(follow_up.energy().value(), 6);
    }
}
