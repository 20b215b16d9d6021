use std::sync::Arc;

use prakriti_core::model::{FollowUp, FollowUpDraft, FollowUpId, UserId};
use storage::repository::FollowUpRepository;

use crate::Clock;
use crate::error::FollowUpServiceError;

/// Records and lists progress check-ins.
#[derive(Clone)]
pub struct FollowUpService {
    clock: Clock,
    follow_ups: Arc<dyn FollowUpRepository>,
}

impl FollowUpService {
    #[must_use]
    pub fn new(clock: Clock, follow_ups: Arc<dyn FollowUpRepository>) -> Self {
        Self { clock, follow_ups }
    }

    /// Validate a draft, stamp it with the current time, and store it.
    ///
    /// # Errors
    ///
    /// Returns `FollowUpServiceError::FollowUp` if a rating is out of the
    /// 1-10 range.
    pub async fn submit(
        &self,
        user_id: UserId,
        draft: FollowUpDraft,
    ) -> Result<FollowUpId, FollowUpServiceError> {
        let follow_up = draft.validate(user_id, self.clock.now())?;
        let id = self.follow_ups.append_follow_up(&follow_up).await?;
        Ok(id)
    }

    /// All check-ins for a user, newest first.
    ///
    /// # Errors
    ///
    /// Returns `FollowUpServiceError::Storage` on repository failures.
    pub async fn history(&self, user_id: UserId) -> Result<Vec<FollowUp>, FollowUpServiceError> {
        let list = self.follow_ups.list_for_user(user_id).await?;
        Ok(list)
    }

    /// Number of check-ins a user has recorded.
    ///
    /// # Errors
    ///
    /// Returns `FollowUpServiceError::Storage` on repository failures.
    pub async fn count(&self, user_id: UserId) -> Result<u64, FollowUpServiceError> {
        let count = self.follow_ups.count_for_user(user_id).await?;
        Ok(count)
    }
}
