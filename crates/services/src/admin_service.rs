use std::sync::Arc;

use chrono::Duration;
use prakriti_core::model::{DoshaResult, FollowUp, FollowUpId, User, UserId};
use serde::{Deserialize, Serialize};
use storage::repository::{
    AssessmentRepository, DoshaCounts, FollowUpRepository, StorageError, UserRepository,
};

use crate::Clock;
use crate::error::AdminServiceError;

/// A user row in the dashboard, joined with their assessment status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserWithStatus {
    pub user: User,
    pub result: Option<DoshaResult>,
    pub follow_up_count: u64,
}

/// New-user counts over rolling windows ending now.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserGrowth {
    /// Joined within the last 7 days.
    pub this_week: u32,
    /// Joined within the last 30 days.
    pub this_month: u32,
    /// Joined between 60 and 30 days ago.
    pub last_month: u32,
}

/// Mean follow-up ratings across all users, or `None` with no check-ins.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AverageRatings {
    pub energy: f64,
    pub sleep: f64,
    pub digestion: f64,
}

/// Dashboard aggregates, computed fresh on each request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Statistics {
    pub total_users: u64,
    pub completed_assessments: u64,
    pub total_follow_ups: u64,
    pub dosha_distribution: DoshaCounts,
    pub user_growth: UserGrowth,
    pub average_ratings: Option<AverageRatings>,
}

const LIST_LIMIT: u32 = 1024;

/// Dashboard queries and administrative actions over user data.
#[derive(Clone)]
pub struct AdminService {
    clock: Clock,
    users: Arc<dyn UserRepository>,
    assessments: Arc<dyn AssessmentRepository>,
    follow_ups: Arc<dyn FollowUpRepository>,
}

impl AdminService {
    #[must_use]
    pub fn new(
        clock: Clock,
        users: Arc<dyn UserRepository>,
        assessments: Arc<dyn AssessmentRepository>,
        follow_ups: Arc<dyn FollowUpRepository>,
    ) -> Self {
        Self {
            clock,
            users,
            assessments,
            follow_ups,
        }
    }

    /// All users with their assessment status, in id order.
    ///
    /// # Errors
    ///
    /// Returns `AdminServiceError::Storage` on repository failures.
    pub async fn list_users(&self) -> Result<Vec<UserWithStatus>, AdminServiceError> {
        let users = self.users.list_users(LIST_LIMIT).await?;
        let mut rows = Vec::with_capacity(users.len());
        for user in users {
            let result = self.assessments.get_result(user.id()).await?;
            let follow_up_count = self.follow_ups.count_for_user(user.id()).await?;
            rows.push(UserWithStatus {
                user,
                result,
                follow_up_count,
            });
        }
        Ok(rows)
    }

    /// Delete a user. Their stored result and follow-ups go with them.
    ///
    /// # Errors
    ///
    /// Returns `AdminServiceError::UserNotFound` if no such user exists.
    pub async fn delete_user(&self, id: UserId) -> Result<(), AdminServiceError> {
        match self.users.delete_user(id).await {
            Ok(()) => Ok(()),
            Err(StorageError::NotFound) => Err(AdminServiceError::UserNotFound),
            Err(err) => Err(err.into()),
        }
    }

    /// Recent follow-ups across all users, newest first.
    ///
    /// # Errors
    ///
    /// Returns `AdminServiceError::Storage` on repository failures.
    pub async fn recent_follow_ups(&self, limit: u32) -> Result<Vec<FollowUp>, AdminServiceError> {
        let list = self.follow_ups.list_all(limit).await?;
        Ok(list)
    }

    /// Remove a single follow-up record.
    ///
    /// # Errors
    ///
    /// Returns `AdminServiceError::Storage` on repository failures,
    /// including `StorageError::NotFound` for an unknown id.
    pub async fn delete_follow_up(&self, id: FollowUpId) -> Result<(), AdminServiceError> {
        self.follow_ups.delete_follow_up(id).await?;
        Ok(())
    }

    /// Compute the dashboard aggregates.
    ///
    /// # Errors
    ///
    /// Returns `AdminServiceError::Storage` on repository failures.
    pub async fn statistics(&self) -> Result<Statistics, AdminServiceError> {
        let users = self.users.list_users(LIST_LIMIT).await?;
        let completed_assessments = self.assessments.count_results().await?;
        let dosha_distribution = self.assessments.dominant_counts().await?;
        let follow_ups = self.follow_ups.list_all(LIST_LIMIT).await?;

        let now = self.clock.now();
        let week_ago = now - Duration::days(7);
        let month_ago = now - Duration::days(30);
        let two_months_ago = now - Duration::days(60);

        let mut growth = UserGrowth::default();
        for user in &users {
            let joined = user.joined_at();
            if joined > week_ago {
                growth.this_week += 1;
            }
            if joined > month_ago {
                growth.this_month += 1;
            } else if joined > two_months_ago {
                growth.last_month += 1;
            }
        }

        Ok(Statistics {
            total_users: users.len() as u64,
            completed_assessments,
            total_follow_ups: follow_ups.len() as u64,
            dosha_distribution,
            user_growth: growth,
            average_ratings: average_ratings(&follow_ups),
        })
    }
}

#[allow(clippy::cast_precision_loss)]
fn average_ratings(follow_ups: &[FollowUp]) -> Option<AverageRatings> {
    if follow_ups.is_empty() {
        return None;
    }
    let n = follow_ups.len() as f64;
    let sum = |pick: fn(&FollowUp) -> u32| -> f64 {
        follow_ups.iter().map(|f| f64::from(pick(f))).sum::<f64>() / n
    };
    Some(AverageRatings {
        energy: sum(|f| f.energy().value()),
        sleep: sum(|f| f.sleep().value()),
        digestion: sum(|f| f.digestion().value()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    use prakriti_core::model::{Dosha, FollowUpDraft, Gender};
    use prakriti_core::time::{fixed_clock, fixed_now};
    use storage::repository::{InMemoryRepository, NewUserRecord};

    async fn insert_user(
        repo: &InMemoryRepository,
        email: &str,
        joined_days_ago: i64,
    ) -> UserId {
        repo.insert_new_user(NewUserRecord {
            name: "Asha".into(),
            email: email.into(),
            credential_hash: "hash".into(),
            age: 34,
            gender: Gender::Female,
            occupation: "Teacher".into(),
            location: "Pune".into(),
            joined_at: fixed_now() - Duration::days(joined_days_ago),
        })
        .await
        .expect("insert user")
    }

    #[tokio::test]
    async fn statistics_aggregate_counts_and_growth_windows() {
        let repo = Arc::new(InMemoryRepository::new());
        let service = AdminService::new(
            fixed_clock(),
            repo.clone(),
            repo.clone(),
            repo.clone(),
        );

        let recent = insert_user(&repo, "a@example.com", 2).await;
        insert_user(&repo, "b@example.com", 20).await;
        insert_user(&repo, "c@example.com", 45).await;
        insert_user(&repo, "d@example.com", 90).await;

        repo.save_result(
            recent,
            &DoshaResult {
                vata: 50,
                pitta: 30,
                kapha: 20,
                dominant: Dosha::Vata,
            },
        )
        .await
        .expect("result");

        let follow_up = FollowUpDraft {
            energy: 4,
            sleep: 6,
            digestion: 8,
            ..FollowUpDraft::default()
        }
        .validate(recent, fixed_now())
        .expect("draft");
        repo.append_follow_up(&follow_up).await.expect("follow-up");

        let stats = service.statistics().await.expect("statistics");
        assert_eq!(stats.total_users, 4);
        assert_eq!(stats.completed_assessments, 1);
        assert_eq!(stats.total_follow_ups, 1);
        assert_eq!(stats.dosha_distribution.vata, 1);
        assert_eq!(stats.user_growth.this_week, 1);
        assert_eq!(stats.user_growth.this_month, 2);
        assert_eq!(stats.user_growth.last_month, 1);

        let averages = stats.average_ratings.expect("one check-in");
        assert!((averages.energy - 4.0).abs() < f64::EPSILON);
        assert!((averages.sleep - 6.0).abs() < f64::EPSILON);
        assert!((averages.digestion - 8.0).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn list_users_joins_status_and_delete_removes_everything() {
        let repo = Arc::new(InMemoryRepository::new());
        let service = AdminService::new(
            fixed_clock(),
            repo.clone(),
            repo.clone(),
            repo.clone(),
        );

        let id = insert_user(&repo, "a@example.com", 0).await;
        let rows = service.list_users().await.expect("list");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].result, None);
        assert_eq!(rows[0].follow_up_count, 0);

        service.delete_user(id).await.expect("delete");
        assert!(service.list_users().await.expect("list").is_empty());
        assert!(matches!(
            service.delete_user(id).await.unwrap_err(),
            AdminServiceError::UserNotFound
        ));
    }
}
