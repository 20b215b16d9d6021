use prakriti_core::model::{
    score, AnswerSheet, AssessmentError, DoshaResult, Question, QuestionBank,
};

/// Walks a user through the question bank one question at a time.
///
/// Pure state machine: no storage, no clock. The caller persists the
/// result via `AssessmentService` once `finish` succeeds.
#[derive(Debug, Clone)]
pub struct AssessmentFlow {
    bank: QuestionBank,
    answers: AnswerSheet,
    position: usize,
}

impl AssessmentFlow {
    #[must_use]
    pub fn new(bank: QuestionBank) -> Self {
        Self {
            bank,
            answers: AnswerSheet::new(),
            position: 0,
        }
    }

    /// Start a flow over the built-in question bank.
    #[must_use]
    pub fn builtin() -> Self {
        Self::new(QuestionBank::builtin())
    }

    #[must_use]
    pub fn bank(&self) -> &QuestionBank {
        &self.bank
    }

    #[must_use]
    pub fn answers(&self) -> &AnswerSheet {
        &self.answers
    }

    /// The question currently shown, or `None` once past the last one.
    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        self.bank.question_at(self.position)
    }

    /// Zero-based index of the current question.
    #[must_use]
    pub fn position(&self) -> usize {
        self.position
    }

    /// The recorded choice for the current question, if any.
    #[must_use]
    pub fn current_answer(&self) -> Option<usize> {
        let question = self.current_question()?;
        self.answers.get(question.id())
    }

    /// Fraction of questions answered, in 0.0..=1.0.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn progress(&self) -> f64 {
        if self.bank.len() == 0 {
            return 0.0;
        }
        self.answers.len() as f64 / self.bank.len() as f64
    }

    #[must_use]
    pub fn answered(&self) -> usize {
        self.answers.len()
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.answers.is_complete(&self.bank)
    }

    /// Record a choice for the current question. Re-answering replaces the
    /// previous choice.
    ///
    /// # Errors
    ///
    /// Returns `AssessmentError::ChoiceOutOfRange` if the index does not
    /// name a choice of the current question, and
    /// `AssessmentError::NoCurrentQuestion` once the cursor sits past the
    /// last one.
    pub fn select(&mut self, choice_index: usize) -> Result<(), AssessmentError> {
        let Some(question) = self.bank.question_at(self.position) else {
            return Err(AssessmentError::NoCurrentQuestion);
        };
        if question.choice(choice_index).is_none() {
            return Err(AssessmentError::ChoiceOutOfRange {
                question: question.id(),
                index: choice_index,
                len: question.choices().len(),
            });
        }
        self.answers.select(question.id(), choice_index);
        Ok(())
    }

    /// Advance to the next question. Returns false when already past the
    /// last question.
    pub fn next(&mut self) -> bool {
        if self.position < self.bank.len() {
            self.position += 1;
        }
        self.position < self.bank.len()
    }

    /// Step back one question. Returns false when already at the first.
    pub fn previous(&mut self) -> bool {
        if self.position == 0 {
            return false;
        }
        self.position -= 1;
        true
    }

    /// Score the completed sheet.
    ///
    /// # Errors
    ///
    /// Returns `AssessmentError::Incomplete` while questions remain
    /// unanswered.
    pub fn finish(&self) -> Result<DoshaResult, AssessmentError> {
        score(&self.bank, &self.answers)
    }

    /// Discard all answers and return to the first question.
    pub fn reset(&mut self) {
        self.answers.clear();
        self.position = 0;
    }
}
