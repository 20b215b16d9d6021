use serde::{Deserialize, Serialize};

use crate::model::{Dosha, QuestionId};

/// One selectable answer for a question, pre-tagged with the dosha it
/// contributes to and the points it is worth.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Choice {
    text: String,
    dosha: Dosha,
    points: u32,
}

impl Choice {
    #[must_use]
    pub fn new(text: impl Into<String>, dosha: Dosha, points: u32) -> Self {
        Self {
            text: text.into(),
            dosha,
            points,
        }
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn dosha(&self) -> Dosha {
        self.dosha
    }

    #[must_use]
    pub fn points(&self) -> u32 {
        self.points
    }
}

/// A fixed-choice question in the assessment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    id: QuestionId,
    prompt: String,
    choices: Vec<Choice>,
}

impl Question {
    #[must_use]
    pub fn new(id: QuestionId, prompt: impl Into<String>, choices: Vec<Choice>) -> Self {
        Self {
            id,
            prompt: prompt.into(),
            choices,
        }
    }

    #[must_use]
    pub fn id(&self) -> QuestionId {
        self.id
    }

    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    #[must_use]
    pub fn choices(&self) -> &[Choice] {
        &self.choices
    }

    #[must_use]
    pub fn choice(&self, index: usize) -> Option<&Choice> {
        self.choices.get(index)
    }
}

/// The ordered, fixed question set the assessment walks through.
///
/// The scoring algorithm is general over any number of questions and
/// choices; `builtin()` carries the ten reference questions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionBank {
    questions: Vec<Question>,
}

impl QuestionBank {
    #[must_use]
    pub fn new(questions: Vec<Question>) -> Self {
        Self { questions }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// Question by identifier, if it exists in the bank.
    #[must_use]
    pub fn get(&self, id: QuestionId) -> Option<&Question> {
        self.questions.iter().find(|q| q.id() == id)
    }

    /// Question by position in the fixed order.
    #[must_use]
    pub fn question_at(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }

    /// The ten reference constitution questions.
    #[must_use]
    pub fn builtin() -> Self {
        fn q(id: u32, prompt: &str, choices: [(&str, Dosha); 3]) -> Question {
            Question::new(
                QuestionId::new(id),
                prompt,
                choices
                    .into_iter()
                    .map(|(text, dosha)| Choice::new(text, dosha, 3))
                    .collect(),
            )
        }

        use Dosha::{Kapha, Pitta, Vata};

        Self::new(vec![
            q(
                1,
                "What is your body frame?",
                [
                    ("Thin, light build", Vata),
                    ("Medium, athletic build", Pitta),
                    ("Large, heavy build", Kapha),
                ],
            ),
            q(
                2,
                "How is your skin texture?",
                [
                    ("Dry, rough, thin", Vata),
                    ("Warm, oily, sensitive", Pitta),
                    ("Thick, oily, smooth", Kapha),
                ],
            ),
            q(
                3,
                "What describes your hair best?",
                [
                    ("Dry, brittle, curly", Vata),
                    ("Fine, straight, early graying", Pitta),
                    ("Thick, wavy, lustrous", Kapha),
                ],
            ),
            q(
                4,
                "How is your craving?",
                [
                    ("Variable, sometimes forget to eat", Vata),
                    ("Strong, cannot skip meals", Pitta),
                    ("Steady, can skip meals easily", Kapha),
                ],
            ),
            q(
                5,
                "What is your sleep pattern?",
                [
                    ("Light sleeper, difficulty falling asleep", Vata),
                    ("Moderate sleep, wake up refreshed", Pitta),
                    ("Deep sleeper", Kapha),
                ],
            ),
            q(
                6,
                "How do you handle stress?",
                [
                    ("Become anxious and worried", Vata),
                    ("Become irritated and angry", Pitta),
                    ("Remain calm and withdrawn", Kapha),
                ],
            ),
            q(
                7,
                "What is your energy level like?",
                [
                    ("Gets sudden bursts of energy, then feels worn out", Vata),
                    ("High and consistent", Pitta),
                    ("Steady but slow to start", Kapha),
                ],
            ),
            q(
                8,
                "How do you prefer the weather?",
                [
                    ("Warm and humid", Vata),
                    ("Cool and well-ventilated", Pitta),
                    ("Warm and dry", Kapha),
                ],
            ),
            q(
                9,
                "What describes your memory?",
                [
                    ("Quick to learn, quick to forget", Vata),
                    ("Sharp and clear", Pitta),
                    ("Slow to learn, never forget", Kapha),
                ],
            ),
            q(
                10,
                "How do you make decisions?",
                [
                    ("Quickly but change mind often", Vata),
                    ("Decisively after analysis", Pitta),
                    ("Slowly after much consideration", Kapha),
                ],
            ),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_bank_has_ten_questions_with_three_choices() {
        let bank = QuestionBank::builtin();
        assert_eq!(bank.len(), 10);
        for question in bank.questions() {
            assert_eq!(question.choices().len(), 3);
        }
    }

    #[test]
    fn builtin_choices_cover_each_dosha_once_per_question() {
        let bank = QuestionBank::builtin();
        for question in bank.questions() {
            for dosha in Dosha::ALL {
                let count = question
                    .choices()
                    .iter()
                    .filter(|c| c.dosha() == dosha)
                    .count();
                assert_eq!(count, 1, "question {} dosha {dosha}", question.id());
            }
        }
    }

    #[test]
    fn lookup_by_id_and_index_agree() {
        let bank = QuestionBank::builtin();
        let by_index = bank.question_at(4).unwrap();
        let by_id = bank.get(by_index.id()).unwrap();
        assert_eq!(by_index, by_id);
        assert!(bank.get(QuestionId::new(99)).is_none());
    }
}
