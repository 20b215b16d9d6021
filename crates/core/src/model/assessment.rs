use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::{Dosha, QuestionBank, QuestionId};

/// Errors produced by the scoring engine for malformed answer sets.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum AssessmentError {
    #[error("no answers recorded")]
    NoAnswers,

    #[error("{missing} question(s) unanswered")]
    Incomplete { missing: usize },

    #[error("answer references unknown question {0}")]
    UnknownQuestion(QuestionId),

    #[error("choice index {index} out of range for question {question} ({len} choices)")]
    ChoiceOutOfRange {
        question: QuestionId,
        index: usize,
        len: usize,
    },

    #[error("no question is currently presented")]
    NoCurrentQuestion,
}

/// The user's selected choice per question.
///
/// Selections may be revised freely while the assessment is in progress;
/// scoring requires one entry per bank question.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnswerSheet {
    selections: BTreeMap<QuestionId, usize>,
}

impl AnswerSheet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record (or revise) the selected choice index for a question.
    pub fn select(&mut self, question: QuestionId, choice_index: usize) {
        self.selections.insert(question, choice_index);
    }

    #[must_use]
    pub fn get(&self, question: QuestionId) -> Option<usize> {
        self.selections.get(&question).copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.selections.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.selections.is_empty()
    }

    /// True when every question in the bank has a recorded selection.
    #[must_use]
    pub fn is_complete(&self, bank: &QuestionBank) -> bool {
        bank.questions()
            .iter()
            .all(|q| self.selections.contains_key(&q.id()))
    }

    /// Forget all selections.
    pub fn clear(&mut self) {
        self.selections.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = (QuestionId, usize)> + '_ {
        self.selections.iter().map(|(id, idx)| (*id, *idx))
    }
}

/// Category distribution produced by scoring a complete answer sheet.
///
/// Percentages are rounded independently and are not normalized: the three
/// values each lie in [0, 100] and sum to 100 give or take rounding (99-101).
/// `dominant` is derived from the raw point totals, not the percentages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DoshaResult {
    pub vata: u8,
    pub pitta: u8,
    pub kapha: u8,
    pub dominant: Dosha,
}

impl DoshaResult {
    /// Percentage for the given dosha.
    #[must_use]
    pub fn percentage(&self, dosha: Dosha) -> u8 {
        match dosha {
            Dosha::Vata => self.vata,
            Dosha::Pitta => self.pitta,
            Dosha::Kapha => self.kapha,
        }
    }
}

/// Score a complete answer sheet against the question bank.
///
/// Sums the points of each selected choice per dosha, converts the sums to
/// rounded percentages of the grand total, and picks the dominant dosha as
/// the one with the strictly greatest raw sum. Pitta or Kapha win only on a
/// strict majority over both others; any tie involving the maximum falls
/// back in the fixed order Vata, Pitta, Kapha.
///
/// Pure and deterministic: identical input yields an identical result.
///
/// # Errors
///
/// Returns `AssessmentError` if the sheet is empty, incomplete, references
/// a question not in the bank, or selects a choice index out of range.
pub fn score(bank: &QuestionBank, answers: &AnswerSheet) -> Result<DoshaResult, AssessmentError> {
    if answers.is_empty() {
        return Err(AssessmentError::NoAnswers);
    }

    let mut vata = 0_u32;
    let mut pitta = 0_u32;
    let mut kapha = 0_u32;

    for (question_id, choice_index) in answers.iter() {
        let question = bank
            .get(question_id)
            .ok_or(AssessmentError::UnknownQuestion(question_id))?;
        let choice =
            question
                .choice(choice_index)
                .ok_or(AssessmentError::ChoiceOutOfRange {
                    question: question_id,
                    index: choice_index,
                    len: question.choices().len(),
                })?;
        match choice.dosha() {
            Dosha::Vata => vata += choice.points(),
            Dosha::Pitta => pitta += choice.points(),
            Dosha::Kapha => kapha += choice.points(),
        }
    }

    let answered = answers.len();
    if answered < bank.len() {
        return Err(AssessmentError::Incomplete {
            missing: bank.len() - answered,
        });
    }

    let total = vata + pitta + kapha;
    debug_assert!(total > 0, "complete non-empty sheet has positive total");

    let dominant = if pitta > vata && pitta > kapha {
        Dosha::Pitta
    } else if kapha > vata && kapha > pitta {
        Dosha::Kapha
    } else {
        Dosha::Vata
    };

    Ok(DoshaResult {
        vata: percent_of(vata, total),
        pitta: percent_of(pitta, total),
        kapha: percent_of(kapha, total),
        dominant,
    })
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn percent_of(sum: u32, total: u32) -> u8 {
    // sum <= total, so the rounded share is always within 0..=100.
    let rounded = (f64::from(sum) / f64::from(total) * 100.0).round();
    rounded as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Choice, Question, QuestionBank};

    fn bank_with_weights(weights: &[(u32, [(Dosha, u32); 3])]) -> QuestionBank {
        QuestionBank::new(
            weights
                .iter()
                .map(|(id, choices)| {
                    Question::new(
                        QuestionId::new(*id),
                        format!("Q{id}"),
                        choices
                            .iter()
                            .map(|(dosha, points)| {
                                Choice::new(format!("{dosha} option"), *dosha, *points)
                            })
                            .collect(),
                    )
                })
                .collect(),
        )
    }

    fn answer_all(bank: &QuestionBank, choice_index: usize) -> AnswerSheet {
        let mut sheet = AnswerSheet::new();
        for question in bank.questions() {
            sheet.select(question.id(), choice_index);
        }
        sheet
    }

    #[test]
    fn all_vata_answers_give_pure_vata_result() {
        let bank = QuestionBank::builtin();
        let sheet = answer_all(&bank, 0);

        let result = score(&bank, &sheet).unwrap();

        assert_eq!(result.vata, 100);
        assert_eq!(result.pitta, 0);
        assert_eq!(result.kapha, 0);
        assert_eq!(result.dominant, Dosha::Vata);
    }

    #[test]
    fn percentages_stay_in_range_and_sum_near_100() {
        let bank = QuestionBank::builtin();
        // Mixed selections: cycle through the three choices.
        let mut sheet = AnswerSheet::new();
        for (i, question) in bank.questions().iter().enumerate() {
            sheet.select(question.id(), i % 3);
        }

        let result = score(&bank, &sheet).unwrap();

        let sum = u32::from(result.vata) + u32::from(result.pitta) + u32::from(result.kapha);
        assert!((99..=101).contains(&sum), "sum was {sum}");
        for dosha in Dosha::ALL {
            assert!(result.percentage(dosha) <= 100);
        }
    }

    #[test]
    fn dominant_matches_strictly_greatest_sum() {
        // Synthetic 4/3/3-style split: one question weights vata higher.
        use Dosha::{Kapha, Pitta, Vata};
        let bank = bank_with_weights(&[
            (1, [(Vata, 4), (Pitta, 3), (Kapha, 3)]),
            (2, [(Vata, 3), (Pitta, 3), (Kapha, 3)]),
            (3, [(Vata, 3), (Pitta, 3), (Kapha, 3)]),
        ]);
        let mut sheet = AnswerSheet::new();
        sheet.select(QuestionId::new(1), 0); // vata 4
        sheet.select(QuestionId::new(2), 1); // pitta 3
        sheet.select(QuestionId::new(3), 2); // kapha 3

        let result = score(&bank, &sheet).unwrap();
        assert_eq!(result.dominant, Dosha::Vata);
    }

    #[test]
    fn tie_between_all_three_falls_back_to_vata() {
        // An exact three-way tie needs a synthetic bank.
        use Dosha::{Kapha, Pitta, Vata};
        let tied = bank_with_weights(&[
            (1, [(Vata, 3), (Pitta, 3), (Kapha, 3)]),
            (2, [(Vata, 3), (Pitta, 3), (Kapha, 3)]),
            (3, [(Vata, 3), (Pitta, 3), (Kapha, 3)]),
        ]);
        let mut sheet = AnswerSheet::new();
        sheet.select(QuestionId::new(1), 0);
        sheet.select(QuestionId::new(2), 1);
        sheet.select(QuestionId::new(3), 2);

        let result = score(&tied, &sheet).unwrap();
        assert_eq!(result.dominant, Dosha::Vata);
    }

    #[test]
    fn pitta_kapha_tie_above_vata_resolves_to_vata_fallback_order() {
        // Pitta and Kapha tie at the top; neither strictly exceeds both
        // others, so the fallback picks Vata (reference behavior).
        use Dosha::{Kapha, Pitta, Vata};
        let bank = bank_with_weights(&[
            (1, [(Vata, 1), (Pitta, 3), (Kapha, 3)]),
            (2, [(Vata, 1), (Pitta, 3), (Kapha, 3)]),
        ]);
        let mut sheet = AnswerSheet::new();
        sheet.select(QuestionId::new(1), 1); // pitta 3
        sheet.select(QuestionId::new(2), 2); // kapha 3

        let result = score(&bank, &sheet).unwrap();
        assert_eq!(result.dominant, Dosha::Vata);
    }

    #[test]
    fn strict_pitta_majority_wins() {
        let bank = QuestionBank::builtin();
        let sheet = answer_all(&bank, 1);

        let result = score(&bank, &sheet).unwrap();
        assert_eq!(result.dominant, Dosha::Pitta);
        assert_eq!(result.pitta, 100);
    }

    #[test]
    fn empty_sheet_is_rejected() {
        let bank = QuestionBank::builtin();
        let sheet = AnswerSheet::new();

        assert_eq!(score(&bank, &sheet), Err(AssessmentError::NoAnswers));
    }

    #[test]
    fn incomplete_sheet_is_rejected() {
        let bank = QuestionBank::builtin();
        let mut sheet = AnswerSheet::new();
        sheet.select(QuestionId::new(1), 0);

        assert_eq!(
            score(&bank, &sheet),
            Err(AssessmentError::Incomplete { missing: 9 })
        );
    }

    #[test]
    fn unknown_question_is_rejected_not_a_crash() {
        let bank = QuestionBank::builtin();
        let mut sheet = answer_all(&bank, 0);
        sheet.select(QuestionId::new(42), 0);

        assert_eq!(
            score(&bank, &sheet),
            Err(AssessmentError::UnknownQuestion(QuestionId::new(42)))
        );
    }

    #[test]
    fn out_of_range_choice_is_rejected() {
        let bank = QuestionBank::builtin();
        let mut sheet = answer_all(&bank, 0);
        sheet.select(QuestionId::new(3), 7);

        assert_eq!(
            score(&bank, &sheet),
            Err(AssessmentError::ChoiceOutOfRange {
                question: QuestionId::new(3),
                index: 7,
                len: 3,
            })
        );
    }

    #[test]
    fn scoring_is_deterministic() {
        let bank = QuestionBank::builtin();
        let mut sheet = AnswerSheet::new();
        for (i, question) in bank.questions().iter().enumerate() {
            sheet.select(question.id(), (i + 1) % 3);
        }

        let first = score(&bank, &sheet).unwrap();
        let second = score(&bank, &sheet).unwrap();
        assert_eq!(first, second);
    }
}
