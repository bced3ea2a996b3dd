use log::debug;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::quiz::error::QuizError;
use crate::quiz::grammar::{article, CollocationForm, Definiteness, Number};
use crate::quiz::lexicon::{Adjective, Lexicon, Noun, Possessive};

/// One round of the quiz: a noun phrase with the adjective left blank.
///
/// Built in one go by [`PhraseGenerator::compose`], so the expected answer, the
/// determiner and the noun form always agree with each other.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize, PartialEq, Eq)]
pub struct Question {
    noun: Noun,
    adjective: Adjective,
    possessive: Possessive,
    number: Number,
    collocation: CollocationForm,
    noun_form: Definiteness,
    determiner: String,
    expected_answer: String,
}

impl Question {
    pub fn noun(&self) -> &Noun {
        &self.noun
    }

    pub fn adjective(&self) -> &Adjective {
        &self.adjective
    }

    pub fn possessive(&self) -> &Possessive {
        &self.possessive
    }

    pub fn number(&self) -> Number {
        self.number
    }

    pub fn collocation(&self) -> CollocationForm {
        self.collocation
    }

    pub fn noun_form(&self) -> Definiteness {
        self.noun_form
    }

    /// Article or possessive in front of the blank. Empty for plural indefinite.
    pub fn determiner(&self) -> &str {
        &self.determiner
    }

    pub fn expected_answer(&self) -> &str {
        &self.expected_answer
    }

    /// The adjective as it is shown to the user. Always the dictionary form, no
    /// matter which inflection the blank asks for.
    pub fn hint(&self) -> &str {
        self.adjective.citation()
    }

    pub fn noun_text(&self) -> &str {
        // Nouns are only picked when this form exists.
        self.noun.form(self.number, self.noun_form).unwrap_or_default()
    }

    /// e.g. "stor: en ___ stol" or "stor: ___ stolar"
    pub fn prompt(&self) -> String {
        let mut phrase = String::new();
        if !self.determiner.is_empty() {
            phrase.push_str(&self.determiner);
            phrase.push(' ');
        }
        phrase.push_str("___ ");
        phrase.push_str(self.noun_text());
        format!("{}: {}", self.hint(), phrase)
    }
}

pub struct PhraseGenerator {
    lexicon: Lexicon,
}

impl PhraseGenerator {
    pub fn new(lexicon: Lexicon) -> Self {
        Self { lexicon }
    }

    /// Generates a question, reproducibly when a seed is given.
    pub fn new_question(&self, seed: Option<u64>) -> Result<Question, QuizError> {
        let mut rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        self.generate(&mut rng)
    }

    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Question, QuizError> {
        let number = Number::ALL[rng.gen_range(0..Number::ALL.len())];
        let collocation = CollocationForm::ALL[rng.gen_range(0..CollocationForm::ALL.len())];
        let noun_form = collocation.noun_form();

        let candidates = self
            .lexicon
            .nouns_with(number, noun_form)
            .collect::<Vec<_>>();
        let noun = candidates.choose(rng).ok_or(QuizError::LexiconGap {
            number,
            definiteness: noun_form,
        })?;
        let adjective = self
            .lexicon
            .adjectives()
            .choose(rng)
            .ok_or(QuizError::EmptyLexicon("adjectives"))?;
        let possessive = self
            .lexicon
            .possessives()
            .choose(rng)
            .ok_or(QuizError::EmptyLexicon("possessives"))?;

        let question = Self::compose(noun, adjective, possessive, number, collocation);
        debug!(
            "Generated {} {} phrase \"{}\", expecting \"{}\"",
            number,
            collocation,
            question.prompt(),
            question.expected_answer
        );
        Ok(question)
    }

    /// Derives the rest of a question from an already sampled pattern.
    pub fn compose(
        noun: &Noun,
        adjective: &Adjective,
        possessive: &Possessive,
        number: Number,
        collocation: CollocationForm,
    ) -> Question {
        let noun_form = collocation.noun_form();

        // Strong (gender-marked) form only after a singular indefinite article;
        // the weak form covers definite, possessive and every plural.
        let expected_answer = match (number, collocation) {
            (Number::Singular, CollocationForm::Indefinite) => {
                adjective.singular_indefinite.get(noun.genus)
            }
            (Number::Singular, CollocationForm::Definite | CollocationForm::Possessive) => {
                &adjective.singular_definite
            }
            (Number::Plural, _) => &adjective.plural,
        };

        let determiner = match (collocation, number) {
            (CollocationForm::Indefinite, _) => article(noun.genus, number, Definiteness::Indefinite),
            (CollocationForm::Definite, _) => article(noun.genus, number, Definiteness::Definite),
            (CollocationForm::Possessive, Number::Plural) => possessive.plural.as_str(),
            (CollocationForm::Possessive, Number::Singular) => {
                possessive.singular.get(noun.genus).as_str()
            }
        };

        Question {
            noun: noun.clone(),
            adjective: adjective.clone(),
            possessive: possessive.clone(),
            number,
            collocation,
            noun_form,
            determiner: determiner.to_string(),
            expected_answer: expected_answer.to_string(),
        }
    }
}
