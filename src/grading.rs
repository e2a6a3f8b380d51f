use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::answer_sheet::ConfigurationError;
use crate::types::AnswerOption;

/// Reasons a set of detected answers cannot be graded.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum GradeError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
    #[error("answer key is incomplete, no answer set for question(s) {missing:?}")]
    IncompleteAnswerKey { missing: Vec<u32> },
}

/// The correct option for each question. Entries start out unset and must
/// all be filled in before a sheet can be graded.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnswerKey(Vec<Option<AnswerOption>>);

impl AnswerKey {
    /// A key for `num_questions` questions with nothing set.
    pub fn unset(num_questions: usize) -> Self {
        Self(vec![None; num_questions])
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<AnswerOption> {
        self.0.get(index).copied().flatten()
    }

    /// Sets the answer for a 0-indexed question. Returns `false`, leaving the
    /// key unchanged, when the question is past the end of the key.
    pub fn set(&mut self, index: usize, answer: Option<AnswerOption>) -> bool {
        match self.0.get_mut(index) {
            Some(entry) => {
                *entry = answer;
                true
            }
            None => false,
        }
    }

    /// Changes the number of questions, keeping the answers that remain in
    /// range and leaving any new ones unset.
    pub fn resize(&mut self, num_questions: usize) {
        self.0.resize(num_questions, None);
    }

    /// 1-indexed numbers of the questions with no answer set.
    pub fn missing(&self) -> Vec<u32> {
        self.0
            .iter()
            .enumerate()
            .filter(|(_, entry)| entry.is_none())
            .map(|(i, _)| i as u32 + 1)
            .collect()
    }

    pub fn is_complete(&self) -> bool {
        self.0.iter().all(Option::is_some)
    }

    pub fn entries(&self) -> &[Option<AnswerOption>] {
        &self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Outcome {
    Correct,
    Wrong,
    Unanswered,
}

impl From<Vec<Option<AnswerOption>>> for AnswerKey {
    fn from(entries: Vec<Option<AnswerOption>>) -> Self {
        Self(entries)
    }
}

impl Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::Correct => write!(f, "Correct"),
            Outcome::Wrong => write!(f, "Wrong"),
            Outcome::Unanswered => write!(f, "Unanswered"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectedAnswer {
    pub question: u32,
    pub answer: Option<AnswerOption>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GradedAnswer {
    pub question: u32,
    pub detected: Option<AnswerOption>,
    pub correct_answer: AnswerOption,
    pub is_correct: bool,
}

impl GradedAnswer {
    pub fn outcome(&self) -> Outcome {
        match self.detected {
            None => Outcome::Unanswered,
            Some(_) if self.is_correct => Outcome::Correct,
            Some(_) => Outcome::Wrong,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GradingReport {
    pub total_questions: u32,
    pub correct: u32,
    pub wrong: u32,
    pub unanswered: u32,
    pub score_percentage: f64,
    pub detected_answers: Vec<DetectedAnswer>,
    pub graded_answers: Vec<GradedAnswer>,
}

/// Compares detected answers against the key, question by question.
///
/// The key must have one fully set entry per detected answer; an
/// incomplete key is refused rather than counting the gaps as wrong.
pub fn grade(
    detected: &[Option<AnswerOption>],
    answer_key: &AnswerKey,
) -> Result<GradingReport, GradeError> {
    if answer_key.len() != detected.len() {
        return Err(ConfigurationError::AnswerKeyLengthMismatch {
            expected: detected.len(),
            actual: answer_key.len(),
        }
        .into());
    }

    let key_answers = answer_key
        .entries()
        .iter()
        .copied()
        .collect::<Option<Vec<AnswerOption>>>()
        .ok_or_else(|| GradeError::IncompleteAnswerKey {
            missing: answer_key.missing(),
        })?;

    let mut correct = 0;
    let mut wrong = 0;
    let mut unanswered = 0;
    let mut detected_answers = Vec::with_capacity(detected.len());
    let mut graded_answers = Vec::with_capacity(detected.len());

    for (i, (answer, correct_answer)) in detected.iter().zip(key_answers).enumerate() {
        let question = i as u32 + 1;
        let is_correct = *answer == Some(correct_answer);
        match answer {
            None => unanswered += 1,
            Some(_) if is_correct => correct += 1,
            Some(_) => wrong += 1,
        }

        detected_answers.push(DetectedAnswer {
            question,
            answer: *answer,
        });
        graded_answers.push(GradedAnswer {
            question,
            detected: *answer,
            correct_answer,
            is_correct,
        });
    }

    let total_questions = detected.len() as u32;
    let score_percentage = if total_questions == 0 {
        0.0
    } else {
        correct as f64 / total_questions as f64 * 100.0
    };

    Ok(GradingReport {
        total_questions,
        correct,
        wrong,
        unanswered,
        score_percentage,
        detected_answers,
        graded_answers,
    })
}

fn option_or_dash(option: Option<AnswerOption>) -> &'static str {
    option.map_or("-", AnswerOption::as_str)
}

impl Display for GradingReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Score: {:.1}%", self.score_percentage)?;
        writeln!(
            f,
            "Correct: {}  Wrong: {}  Unanswered: {}  Total: {}",
            self.correct, self.wrong, self.unanswered, self.total_questions
        )?;
        writeln!(f)?;
        writeln!(f, "{:>4}  {:>8}  {:>7}  Result", "Q.No", "Detected", "Correct")?;
        for answer in &self.graded_answers {
            writeln!(
                f,
                "{:>4}  {:>8}  {:>7}  {}",
                answer.question,
                option_or_dash(answer.detected),
                answer.correct_answer,
                answer.outcome()
            )?;
        }
        Ok(())
    }
}
