//! Personality quiz.
//!
//! The quiz is optional; its result feeds the profile's personality label at
//! finalize time.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::error::{FrinzyError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
pub enum PersonalityType {
    #[strum(serialize = "The Architect")]
    TheArchitect,
    #[strum(serialize = "The Logician")]
    TheLogician,
    #[strum(serialize = "The Commander")]
    TheCommander,
    #[strum(serialize = "The Debater")]
    TheDebater,
    #[strum(serialize = "The Advocate")]
    TheAdvocate,
    #[strum(serialize = "The Mediator")]
    TheMediator,
    #[strum(serialize = "The Protagonist")]
    TheProtagonist,
    #[strum(serialize = "The Campaigner")]
    TheCampaigner,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizQuestion {
    pub question: &'static str,
    pub options: [&'static str; 2],
    pub trait_axis: &'static str,
}

pub const PERSONALITY_QUESTIONS: &[QuizQuestion] = &[
    QuizQuestion {
        question: "After a long week, you'd rather:",
        options: [
            "Go to a party with lots of people",
            "Chill at home with a book or movie",
        ],
        trait_axis: "Introvert/Extrovert",
    },
    QuizQuestion {
        question: "When making decisions, you rely more on:",
        options: [
            "Logic and objective facts",
            "Feelings and how it affects people",
        ],
        trait_axis: "Thinking/Feeling",
    },
    QuizQuestion {
        question: "You are more interested in:",
        options: [
            "What is real and practical",
            "What is possible and imaginative",
        ],
        trait_axis: "Sensing/Intuition",
    },
    QuizQuestion {
        question: "Your life is more:",
        options: ["Planned and organized", "Spontaneous and flexible"],
        trait_axis: "Judging/Perceiving",
    },
    QuizQuestion {
        question: "You see yourself as more:",
        options: ["Pragmatic and down-to-earth", "Creative and visionary"],
        trait_axis: "Sensing/Intuition-2",
    },
];

/// Collects answers one question at a time.
#[derive(Debug, Clone, Default)]
pub struct PersonalityQuiz {
    answers: Vec<String>,
}

impl PersonalityQuiz {
    pub fn new() -> Self {
        Self::default()
    }

    /// The question awaiting an answer, `None` once all are answered.
    pub fn current_question(&self) -> Option<&'static QuizQuestion> {
        PERSONALITY_QUESTIONS.get(self.answers.len())
    }

    /// Records an answer to the current question.
    pub fn answer(&mut self, answer: &str) -> Result<()> {
        let question = self
            .current_question()
            .ok_or_else(|| FrinzyError::validation("quiz", "all questions already answered"))?;
        if !question.options.contains(&answer) {
            return Err(FrinzyError::validation(
                "quiz",
                format!("'{}' is not an option for '{}'", answer, question.question),
            ));
        }
        self.answers.push(answer.to_string());
        Ok(())
    }

    pub fn is_complete(&self) -> bool {
        self.answers.len() == PERSONALITY_QUESTIONS.len()
    }

    /// Progress through the quiz in percent.
    pub fn progress_percent(&self) -> u8 {
        ((self.answers.len() * 100) / PERSONALITY_QUESTIONS.len()) as u8
    }

    /// Final result, available once every question is answered.
    pub fn result(&self) -> Option<PersonalityType> {
        self.is_complete().then(|| determine_personality(&self.answers))
    }
}

/// Maps quiz answers to a personality type.
pub fn determine_personality<S: AsRef<str>>(answers: &[S]) -> PersonalityType {
    if answers.iter().any(|a| a.as_ref().contains("party")) {
        PersonalityType::TheCampaigner
    } else {
        PersonalityType::TheMediator
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn answer_all(quiz: &mut PersonalityQuiz, pick: usize) {
        while let Some(q) = quiz.current_question() {
            quiz.answer(q.options[pick]).unwrap();
        }
    }

    #[test]
    fn test_party_answer_gives_campaigner() {
        let mut quiz = PersonalityQuiz::new();
        answer_all(&mut quiz, 0);
        assert_eq!(quiz.result(), Some(PersonalityType::TheCampaigner));
        assert_eq!(quiz.progress_percent(), 100);
    }

    #[test]
    fn test_homebody_gives_mediator() {
        let mut quiz = PersonalityQuiz::new();
        answer_all(&mut quiz, 1);
        assert_eq!(quiz.result(), Some(PersonalityType::TheMediator));
        assert_eq!(PersonalityType::TheMediator.to_string(), "The Mediator");
    }

    #[test]
    fn test_incomplete_quiz_has_no_result() {
        let mut quiz = PersonalityQuiz::new();
        quiz.answer("Go to a party with lots of people").unwrap();
        assert!(quiz.result().is_none());
        assert!(quiz.answer("Not an option").unwrap_err().is_validation());
    }
}
