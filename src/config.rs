use std::path::PathBuf;

use crate::quiz::lexicon::LexiconPaths;

/// Settings read from the environment (and `.env`). The bot token itself is read by
/// teloxide from `TELOXIDE_TOKEN`.
#[derive(Debug, Clone)]
pub struct Config {
    pub lexicon: LexiconPaths,
    pub database_path: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str, default: &str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| default.to_string())
        };
        Self {
            lexicon: LexiconPaths {
                nouns: PathBuf::from(get("NOUNS_CSV", "nouns.csv")),
                adjectives: PathBuf::from(get("ADJECTIVES_CSV", "adjectives.csv")),
                possessives: PathBuf::from(get("POSSESSIVES_CSV", "possessives.csv")),
            },
            database_path: get("DATABASE_PATH", "db.sqlite"),
        }
    }
}
