use std::fmt;

/// Grammatical gender of a Swedish noun.
#[derive(Debug, Clone, Copy, serde::Serialize, serde::Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Genus {
    Utrum,
    Neutrum,
}

#[derive(Debug, Clone, Copy, serde::Serialize, serde::Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Number {
    Singular,
    Plural,
}

impl Number {
    pub const ALL: [Number; 2] = [Number::Singular, Number::Plural];
}

#[derive(Debug, Clone, Copy, serde::Serialize, serde::Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Definiteness {
    Indefinite,
    Definite,
}

impl Definiteness {
    pub const ALL: [Definiteness; 2] = [Definiteness::Indefinite, Definiteness::Definite];
}

/// The determiner category that governs the whole phrase.
#[derive(Debug, Clone, Copy, serde::Serialize, serde::Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum CollocationForm {
    Indefinite,
    Definite,
    Possessive,
}

impl CollocationForm {
    pub const ALL: [CollocationForm; 3] = [
        CollocationForm::Indefinite,
        CollocationForm::Definite,
        CollocationForm::Possessive,
    ];

    /// The form the noun surfaces in. A possessive always takes the indefinite noun
    /// ("min stol", "mina stolar").
    pub fn noun_form(self) -> Definiteness {
        match self {
            CollocationForm::Indefinite | CollocationForm::Possessive => Definiteness::Indefinite,
            CollocationForm::Definite => Definiteness::Definite,
        }
    }
}

/// A pair of word forms split by gender.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize, PartialEq, Eq)]
pub struct ByGenus<T> {
    pub utrum: T,
    pub neutrum: T,
}

impl<T> ByGenus<T> {
    pub fn new(utrum: T, neutrum: T) -> Self {
        Self { utrum, neutrum }
    }

    pub fn get(&self, genus: Genus) -> &T {
        match genus {
            Genus::Utrum => &self.utrum,
            Genus::Neutrum => &self.neutrum,
        }
    }
}

/// Article placed before an (adjective +) noun phrase.
/// Plural indefinite phrases take no article at all.
pub fn article(genus: Genus, number: Number, definiteness: Definiteness) -> &'static str {
    use Definiteness::*;
    use Number::*;

    match (genus, number, definiteness) {
        (Genus::Utrum, Singular, Indefinite) => "en",
        (Genus::Utrum, Singular, Definite) => "den",
        (Genus::Neutrum, Singular, Indefinite) => "ett",
        (Genus::Neutrum, Singular, Definite) => "det",
        (_, Plural, Indefinite) => "",
        (_, Plural, Definite) => "de",
    }
}

impl fmt::Display for Genus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Genus::Utrum => "utrum",
            Genus::Neutrum => "neutrum",
        })
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Number::Singular => "singular",
            Number::Plural => "plural",
        })
    }
}

impl fmt::Display for Definiteness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Definiteness::Indefinite => "indefinite",
            Definiteness::Definite => "definite",
        })
    }
}

impl fmt::Display for CollocationForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            CollocationForm::Indefinite => "indefinite",
            CollocationForm::Definite => "definite",
            CollocationForm::Possessive => "possessive",
        })
    }
}
