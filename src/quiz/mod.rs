pub mod answer;
pub mod error;
pub mod grammar;
pub mod lexicon;
pub mod phrase;

use log::{debug, warn};
use rand::Rng;

pub use error::QuizError;
pub use phrase::{PhraseGenerator, Question};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerOutcome {
    pub correct: bool,
    /// Set only when the answer was correct.
    pub next_question: Option<Question>,
}

/// Checks a submission and, when it is right, rolls the next question.
pub fn submit_answer<R: Rng + ?Sized>(
    generator: &PhraseGenerator,
    question: &Question,
    raw_input: &str,
    rng: &mut R,
) -> Result<AnswerOutcome, QuizError> {
    let correct = answer::validate(raw_input, question.expected_answer());
    let next_question = if correct {
        Some(generator.generate(rng)?)
    } else {
        None
    };
    Ok(AnswerOutcome {
        correct,
        next_question,
    })
}

/// Per-chat quiz state. There is no end state: a session keeps serving questions
/// until the user stops answering.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize, PartialEq, Eq)]
pub struct Session {
    pub question: Question,
    /// Last submission, kept while the answer is wrong.
    pub input: String,
    pub streak: u32,
    pub answered: u32,
}

impl Session {
    pub fn start<R: Rng + ?Sized>(
        generator: &PhraseGenerator,
        rng: &mut R,
    ) -> Result<Self, QuizError> {
        Ok(Self {
            question: generator.generate(rng)?,
            input: String::new(),
            streak: 0,
            answered: 0,
        })
    }

    /// Returns whether the answer was correct. Only a correct answer replaces the
    /// question.
    pub fn submit<R: Rng + ?Sized>(
        &mut self,
        generator: &PhraseGenerator,
        raw_input: &str,
        rng: &mut R,
    ) -> Result<bool, QuizError> {
        let outcome = submit_answer(generator, &self.question, raw_input, rng)?;
        match outcome.next_question {
            Some(next) => {
                debug!("Correct answer \"{}\"", raw_input.trim());
                self.question = next;
                self.input.clear();
                self.streak += 1;
                self.answered += 1;
            }
            None => {
                warn!(
                    "Wrong answer \"{}\", expected \"{}\"",
                    raw_input.trim(),
                    self.question.expected_answer()
                );
                self.input = raw_input.to_string();
                self.streak = 0;
            }
        }
        Ok(outcome.correct)
    }

    /// Drops the current question without answering it.
    pub fn skip<R: Rng + ?Sized>(
        &mut self,
        generator: &PhraseGenerator,
        rng: &mut R,
    ) -> Result<(), QuizError> {
        self.question = generator.generate(rng)?;
        self.input.clear();
        self.streak = 0;
        Ok(())
    }
}
