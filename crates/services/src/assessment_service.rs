use std::sync::Arc;

use prakriti_core::model::{score, AnswerSheet, DoshaResult, QuestionBank, UserId};
use storage::repository::AssessmentRepository;

use crate::error::AssessmentServiceError;

/// Scores completed answer sheets and persists the outcome.
///
/// Each user keeps at most one stored result; retaking the assessment
/// replaces it.
#[derive(Clone)]
pub struct AssessmentService {
    bank: QuestionBank,
    assessments: Arc<dyn AssessmentRepository>,
}

impl AssessmentService {
    #[must_use]
    pub fn new(bank: QuestionBank, assessments: Arc<dyn AssessmentRepository>) -> Self {
        Self { bank, assessments }
    }

    #[must_use]
    pub fn bank(&self) -> &QuestionBank {
        &self.bank
    }

    /// Score a completed sheet and store the result for the user.
    ///
    /// # Errors
    ///
    /// Returns `AssessmentServiceError::Assessment` if the sheet is empty,
    /// incomplete, or references unknown questions or choices.
    pub async fn complete(
        &self,
        user_id: UserId,
        answers: &AnswerSheet,
    ) -> Result<DoshaResult, AssessmentServiceError> {
        let result = score(&self.bank, answers)?;
        self.assessments.save_result(user_id, &result).await?;
        Ok(result)
    }

    /// The stored result for a user, if they have completed the assessment.
    ///
    /// # Errors
    ///
    /// Returns `AssessmentServiceError::Storage` on repository failures.
    pub async fn stored_result(
        &self,
        user_id: UserId,
    ) -> Result<Option<DoshaResult>, AssessmentServiceError> {
        let result = self.assessments.get_result(user_id).await?;
        Ok(result)
    }

    /// Drop a user's stored result so they can retake from scratch.
    /// Idempotent.
    ///
    /// # Errors
    ///
    /// Returns `AssessmentServiceError::Storage` on repository failures.
    pub async fn reset(&self, user_id: UserId) -> Result<(), AssessmentServiceError> {
        self.assessments.delete_result(user_id).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use prakriti_core::model::{AssessmentError, Dosha};
    use storage::repository::InMemoryRepository;

    fn service() -> AssessmentService {
        AssessmentService::new(QuestionBank::builtin(), Arc::new(InMemoryRepository::new()))
    }

    fn sheet_answering(bank: &QuestionBank, choice: usize) -> AnswerSheet {
        let mut answers = AnswerSheet::new();
        for question in bank.questions() {
            answers.select(question.id(), choice);
        }
        answers
    }

    #[tokio::test]
    async fn complete_persists_and_replaces_result() {
        let service = service();
        let user = UserId::new(1);

        let all_vata = sheet_answering(service.bank(), 0);
        let first = service.complete(user, &all_vata).await.expect("score");
        assert_eq!(first.dominant, Dosha::Vata);
        assert_eq!(service.stored_result(user).await.expect("get"), Some(first));

        let all_pitta = sheet_answering(service.bank(), 1);
        let second = service.complete(user, &all_pitta).await.expect("rescore");
        assert_eq!(second.dominant, Dosha::Pitta);
        assert_eq!(
            service.stored_result(user).await.expect("get"),
            Some(second)
        );
    }

    #[tokio::test]
    async fn incomplete_sheet_is_not_persisted() {
        let service = service();
        let user = UserId::new(1);

        let mut answers = AnswerSheet::new();
        let first = service.bank().question_at(0).expect("question").id();
        answers.select(first, 0);

        let err = service.complete(user, &answers).await.unwrap_err();
        assert!(matches!(
            err,
            AssessmentServiceError::Assessment(AssessmentError::Incomplete { .. })
        ));
        assert_eq!(service.stored_result(user).await.expect("get"), None);
    }

    #[tokio::test]
    async fn reset_is_idempotent() {
        let service = service();
        let user = UserId::new(1);

        let sheet = sheet_answering(service.bank(), 2);
        service.complete(user, &sheet).await.expect("score");

        service.reset(user).await.expect("first reset");
        service.reset(user).await.expect("second reset");
        assert_eq!(service.stored_result(user).await.expect("get"), None);
    }
}
