use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use log::info;

use crate::quiz::error::QuizError;
use crate::quiz::grammar::{ByGenus, Definiteness, Genus, Number};

/// Both forms of a noun for one number. A blank cell in the lexicon becomes `None`.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize, PartialEq, Eq)]
pub struct Inflection {
    pub indefinite: Option<String>,
    pub definite: Option<String>,
}

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize, PartialEq, Eq)]
pub struct NounForms {
    pub singular: Inflection,
    pub plural: Inflection,
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize, PartialEq, Eq)]
pub struct Noun {
    pub genus: Genus,
    pub forms: NounForms,
}

impl Noun {
    pub fn form(&self, number: Number, definiteness: Definiteness) -> Option<&str> {
        let inflection = match number {
            Number::Singular => &self.forms.singular,
            Number::Plural => &self.forms.plural,
        };
        let form = match definiteness {
            Definiteness::Indefinite => &inflection.indefinite,
            Definiteness::Definite => &inflection.definite,
        };
        form.as_deref().filter(|f| !f.trim().is_empty())
    }

    pub fn has_form(&self, number: Number, definiteness: Definiteness) -> bool {
        self.form(number, definiteness).is_some()
    }
}

/// Swedish adjectives merge plural and definite into a single weak form, so four
/// slots cover every agreement pattern.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize, PartialEq, Eq)]
pub struct Adjective {
    pub singular_indefinite: ByGenus<String>,
    pub singular_definite: String,
    pub plural: String,
}

impl Adjective {
    /// Dictionary form, e.g. "stor".
    pub fn citation(&self) -> &str {
        &self.singular_indefinite.utrum
    }

    pub fn forms(&self) -> [&str; 4] {
        [
            &self.singular_indefinite.utrum,
            &self.singular_indefinite.neutrum,
            &self.singular_definite,
            &self.plural,
        ]
    }
}

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize, PartialEq, Eq)]
pub struct Possessive {
    pub singular: ByGenus<String>,
    pub plural: String,
}

#[derive(Debug, Clone)]
pub struct LexiconPaths {
    pub nouns: PathBuf,
    pub adjectives: PathBuf,
    pub possessives: PathBuf,
}

/// The three word lists every question is sampled from. Never mutated after load.
#[derive(Debug, Clone)]
pub struct Lexicon {
    nouns: Vec<Noun>,
    adjectives: Vec<Adjective>,
    possessives: Vec<Possessive>,
}

impl Lexicon {
    /// Builds a lexicon, refusing one that cannot serve every phrase pattern.
    pub fn new(
        nouns: Vec<Noun>,
        adjectives: Vec<Adjective>,
        possessives: Vec<Possessive>,
    ) -> Result<Self, QuizError> {
        if adjectives.is_empty() {
            return Err(QuizError::EmptyLexicon("adjectives"));
        }
        if possessives.is_empty() {
            return Err(QuizError::EmptyLexicon("possessives"));
        }
        let lexicon = Self {
            nouns,
            adjectives,
            possessives,
        };
        for number in Number::ALL {
            for definiteness in Definiteness::ALL {
                if lexicon.nouns_with(number, definiteness).next().is_none() {
                    return Err(QuizError::LexiconGap {
                        number,
                        definiteness,
                    });
                }
            }
        }
        Ok(lexicon)
    }

    #[cfg(test)]
    pub(crate) fn unchecked(
        nouns: Vec<Noun>,
        adjectives: Vec<Adjective>,
        possessives: Vec<Possessive>,
    ) -> Self {
        Self {
            nouns,
            adjectives,
            possessives,
        }
    }

    pub fn load(paths: &LexiconPaths) -> Result<Self, QuizError> {
        let nouns = read_nouns(open(&paths.nouns)?, &paths.nouns)?;
        let adjectives = read_adjectives(open(&paths.adjectives)?, &paths.adjectives)?;
        let possessives = read_possessives(open(&paths.possessives)?, &paths.possessives)?;
        info!(
            "Lexicon loaded: {} nouns, {} adjectives, {} possessives",
            nouns.len(),
            adjectives.len(),
            possessives.len()
        );
        Self::new(nouns, adjectives, possessives)
    }

    pub fn nouns(&self) -> &[Noun] {
        &self.nouns
    }

    pub fn adjectives(&self) -> &[Adjective] {
        &self.adjectives
    }

    pub fn possessives(&self) -> &[Possessive] {
        &self.possessives
    }

    pub fn nouns_with(
        &self,
        number: Number,
        definiteness: Definiteness,
    ) -> impl Iterator<Item = &Noun> {
        self.nouns
            .iter()
            .filter(move |n| n.has_form(number, definiteness))
    }
}

fn open(path: &Path) -> Result<File, QuizError> {
    File::open(path).map_err(|source| QuizError::Io {
        path: path.to_path_buf(),
        source,
    })
}

#[derive(Debug, serde::Deserialize)]
struct NounRow {
    genus: String,
    #[serde(rename = "singularIndefinite", default)]
    singular_indefinite: Option<String>,
    #[serde(rename = "singularDefinite", default)]
    singular_definite: Option<String>,
    #[serde(rename = "pluralIndefinite", default)]
    plural_indefinite: Option<String>,
    #[serde(rename = "pluralDefinite", default)]
    plural_definite: Option<String>,
}

#[derive(Debug, serde::Deserialize)]
struct AdjectiveRow {
    #[serde(rename = "singularIndefinite utrum", default)]
    singular_indefinite_utrum: Option<String>,
    #[serde(rename = "singularIndefinite neutrum", default)]
    singular_indefinite_neutrum: Option<String>,
    #[serde(rename = "singularDefinite", default)]
    singular_definite: Option<String>,
    #[serde(default)]
    plural: Option<String>,
}

#[derive(Debug, serde::Deserialize)]
struct PossessiveRow {
    #[serde(rename = "singular utrum", default)]
    singular_utrum: Option<String>,
    #[serde(rename = "singular neutrum", default)]
    singular_neutrum: Option<String>,
    #[serde(default)]
    plural: Option<String>,
}

/// Where a row came from, for error reporting. Row 1 is the header.
struct RowRef<'a> {
    file: &'a Path,
    row: u64,
}

impl RowRef<'_> {
    fn malformed(&self, reason: String) -> QuizError {
        QuizError::MalformedLexiconEntry {
            file: self.file.to_path_buf(),
            row: self.row,
            reason,
        }
    }

    fn required(&self, cell: Option<String>, column: &str) -> Result<String, QuizError> {
        optional(cell).ok_or_else(|| self.malformed(format!("column \"{}\" is blank", column)))
    }
}

fn optional(cell: Option<String>) -> Option<String> {
    cell.map(|c| c.trim().to_string()).filter(|c| !c.is_empty())
}

fn rows<R: Read, T: serde::de::DeserializeOwned>(
    reader: R,
    source: &Path,
) -> Result<Vec<(RowRef<'_>, T)>, QuizError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut out = Vec::new();
    for (i, row) in csv_reader.deserialize::<T>().enumerate() {
        let row_ref = RowRef {
            file: source,
            row: i as u64 + 2,
        };
        let record = row.map_err(|e| {
            let bad_row = matches!(
                e.kind(),
                csv::ErrorKind::Deserialize { .. } | csv::ErrorKind::UnequalLengths { .. }
            );
            if bad_row {
                row_ref.malformed(e.to_string())
            } else {
                QuizError::Csv {
                    path: source.to_path_buf(),
                    source: e,
                }
            }
        })?;
        out.push((row_ref, record));
    }
    Ok(out)
}

pub fn read_nouns<R: Read>(reader: R, source: &Path) -> Result<Vec<Noun>, QuizError> {
    rows::<_, NounRow>(reader, source)?
        .into_iter()
        .map(|(at, row)| {
            let genus = match row.genus.as_str() {
                "utrum" => Genus::Utrum,
                "neutrum" => Genus::Neutrum,
                other => return Err(at.malformed(format!("unknown genus \"{}\"", other))),
            };
            Ok(Noun {
                genus,
                forms: NounForms {
                    singular: Inflection {
                        indefinite: optional(row.singular_indefinite),
                        definite: optional(row.singular_definite),
                    },
                    plural: Inflection {
                        indefinite: optional(row.plural_indefinite),
                        definite: optional(row.plural_definite),
                    },
                },
            })
        })
        .collect()
}

pub fn read_adjectives<R: Read>(reader: R, source: &Path) -> Result<Vec<Adjective>, QuizError> {
    rows::<_, AdjectiveRow>(reader, source)?
        .into_iter()
        .map(|(at, row)| {
            Ok(Adjective {
                singular_indefinite: ByGenus::new(
                    at.required(row.singular_indefinite_utrum, "singularIndefinite utrum")?,
                    at.required(row.singular_indefinite_neutrum, "singularIndefinite neutrum")?,
                ),
                singular_definite: at.required(row.singular_definite, "singularDefinite")?,
                plural: at.required(row.plural, "plural")?,
            })
        })
        .collect()
}

pub fn read_possessives<R: Read>(reader: R, source: &Path) -> Result<Vec<Possessive>, QuizError> {
    rows::<_, PossessiveRow>(reader, source)?
        .into_iter()
        .map(|(at, row)| {
            Ok(Possessive {
                singular: ByGenus::new(
                    at.required(row.singular_utrum, "singular utrum")?,
                    at.required(row.singular_neutrum, "singular neutrum")?,
                ),
                plural: at.required(row.plural, "plural")?,
            })
        })
        .collect()
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    pub(crate) fn stol() -> Noun {
        Noun {
            genus: Genus::Utrum,
            forms: NounForms {
                singular: Inflection {
                    indefinite: Some("stol".to_string()),
                    definite: Some("stolen".to_string()),
                },
                plural: Inflection {
                    indefinite: Some("stolar".to_string()),
                    definite: Some("stolarna".to_string()),
                },
            },
        }
    }

    pub(crate) fn hus() -> Noun {
        Noun {
            genus: Genus::Neutrum,
            forms: NounForms {
                singular: Inflection {
                    indefinite: Some("hus".to_string()),
                    definite: Some("huset".to_string()),
                },
                plural: Inflection {
                    indefinite: Some("hus".to_string()),
                    definite: Some("husen".to_string()),
                },
            },
        }
    }

    /// Uncountable: singular forms only.
    pub(crate) fn mjolk() -> Noun {
        Noun {
            genus: Genus::Utrum,
            forms: NounForms {
                singular: Inflection {
                    indefinite: Some("mjölk".to_string()),
                    definite: Some("mjölken".to_string()),
                },
                plural: Inflection::default(),
            },
        }
    }

    pub(crate) fn stor() -> Adjective {
        Adjective {
            singular_indefinite: ByGenus::new("stor".to_string(), "stort".to_string()),
            singular_definite: "stora".to_string(),
            plural: "stora".to_string(),
        }
    }

    pub(crate) fn liten() -> Adjective {
        Adjective {
            singular_indefinite: ByGenus::new("liten".to_string(), "litet".to_string()),
            singular_definite: "lilla".to_string(),
            plural: "små".to_string(),
        }
    }

    pub(crate) fn min() -> Possessive {
        Possessive {
            singular: ByGenus::new("min".to_string(), "mitt".to_string()),
            plural: "mina".to_string(),
        }
    }

    pub(crate) fn sample_lexicon() -> Lexicon {
        Lexicon::new(
            vec![stol(), hus(), mjolk()],
            vec![stor(), liten()],
            vec![min()],
        )
        .unwrap()
    }

    const NOUNS_CSV: &str = "\
genus,singularIndefinite,singularDefinite,pluralIndefinite,pluralDefinite
utrum,stol,stolen,stolar,stolarna
neutrum,hus,huset,hus,husen
utrum,mjölk,mjölken,,
";

    #[test]
    fn reads_nouns_with_blank_cells() {
        let nouns = read_nouns(NOUNS_CSV.as_bytes(), Path::new("nouns.csv")).unwrap();
        assert_eq!(nouns, vec![stol(), hus(), mjolk()]);
        assert!(!nouns[2].has_form(Number::Plural, Definiteness::Indefinite));
    }

    #[test]
    fn rejects_unknown_genus() {
        let csv = "genus,singularIndefinite,singularDefinite,pluralIndefinite,pluralDefinite\n\
                   utrum,stol,stolen,stolar,stolarna\n\
                   masculine,bil,bilen,bilar,bilarna\n";
        let err = read_nouns(csv.as_bytes(), Path::new("nouns.csv")).unwrap_err();
        match err {
            QuizError::MalformedLexiconEntry { row, reason, .. } => {
                assert_eq!(row, 3);
                assert!(reason.contains("masculine"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn reads_adjectives_and_possessives() {
        let adjectives = "singularIndefinite utrum,singularIndefinite neutrum,singularDefinite,plural\n\
                          stor,stort,stora,stora\n\
                          liten,litet,lilla,små\n";
        let possessives = "singular utrum,singular neutrum,plural\nmin,mitt,mina\n";
        assert_eq!(
            read_adjectives(adjectives.as_bytes(), Path::new("adjectives.csv")).unwrap(),
            vec![stor(), liten()]
        );
        assert_eq!(
            read_possessives(possessives.as_bytes(), Path::new("possessives.csv")).unwrap(),
            vec![min()]
        );
    }

    #[test]
    fn blank_adjective_slot_is_malformed() {
        let csv = "singularIndefinite utrum,singularIndefinite neutrum,singularDefinite,plural\n\
                   stor,stort,,stora\n";
        let err = read_adjectives(csv.as_bytes(), Path::new("adjectives.csv")).unwrap_err();
        match err {
            QuizError::MalformedLexiconEntry { row, reason, .. } => {
                assert_eq!(row, 2);
                assert!(reason.contains("singularDefinite"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn blank_noun_cell_is_not_a_form() {
        let mut noun = stol();
        noun.forms.plural.definite = Some("  ".to_string());
        assert_eq!(noun.form(Number::Plural, Definiteness::Definite), None);
        assert_eq!(noun.form(Number::Singular, Definiteness::Definite), Some("stolen"));
    }

    #[test]
    fn gap_in_coverage_is_reported() {
        let err = Lexicon::new(vec![mjolk()], vec![stor()], vec![min()]).unwrap_err();
        match err {
            QuizError::LexiconGap {
                number,
                definiteness,
            } => {
                assert_eq!(number, Number::Plural);
                assert_eq!(definiteness, Definiteness::Indefinite);
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn empty_lists_are_rejected() {
        assert!(matches!(
            Lexicon::new(vec![stol()], vec![], vec![min()]),
            Err(QuizError::EmptyLexicon("adjectives"))
        ));
        assert!(matches!(
            Lexicon::new(vec![stol()], vec![stor()], vec![]),
            Err(QuizError::EmptyLexicon("possessives"))
        ));
    }

    #[test]
    fn loads_from_files() {
        let dir = tempfile::tempdir().unwrap();
        let write = |name: &str, content: &str| {
            let path = dir.path().join(name);
            File::create(&path)
                .unwrap()
                .write_all(content.as_bytes())
                .unwrap();
            path
        };
        let paths = LexiconPaths {
            nouns: write("nouns.csv", NOUNS_CSV),
            adjectives: write(
                "adjectives.csv",
                "singularIndefinite utrum,singularIndefinite neutrum,singularDefinite,plural\nstor,stort,stora,stora\n",
            ),
            possessives: write("possessives.csv", "singular utrum,singular neutrum,plural\nmin,mitt,mina\n"),
        };
        let lexicon = Lexicon::load(&paths).unwrap();
        assert_eq!(lexicon.nouns().len(), 3);
        assert_eq!(lexicon.adjectives(), &[stor()]);
        assert_eq!(lexicon.possessives(), &[min()]);
    }

    #[test]
    fn missing_file_is_io_error() {
        let paths = LexiconPaths {
            nouns: PathBuf::from("/nonexistent/nouns.csv"),
            adjectives: PathBuf::from("/nonexistent/adjectives.csv"),
            possessives: PathBuf::from("/nonexistent/possessives.csv"),
        };
        assert!(matches!(Lexicon::load(&paths), Err(QuizError::Io { .. })));
    }
}
