// src/loader.rs

use std::fmt;
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

use rand::Rng;
use rand::seq::SliceRandom;
use serde::Deserialize;

use crate::{
    models::{category::Category, question::Question},
    store::QuizStore,
};

/// Why a category's bank could not be loaded.
#[derive(Debug)]
pub enum LoadError {
    /// The CSV file is absent or cannot be opened.
    MissingSource { path: PathBuf, source: io::Error },

    /// A row lacks a field or breaks the answer-in-options rule.
    MalformedRow {
        path: PathBuf,
        row: usize,
        reason: String,
    },
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::MissingSource { path, source } => {
                write!(f, "missing file {}: {}", path.display(), source)
            }
            LoadError::MalformedRow { path, row, reason } => {
                write!(f, "malformed row {} in {}: {}", row, path.display(), reason)
            }
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoadError::MissingSource { source, .. } => Some(source),
            LoadError::MalformedRow { .. } => None,
        }
    }
}

/// One CSV row: `question,option1,option2,option3,option4,answer`.
#[derive(Debug, Deserialize)]
struct RawQuestion {
    question: String,
    option1: String,
    option2: String,
    option3: String,
    option4: String,
    answer: String,
}

impl RawQuestion {
    fn options(&self) -> [&String; 4] {
        [&self.option1, &self.option2, &self.option3, &self.option4]
    }

    fn check_answer(&self) -> Result<(), String> {
        let matches = self
            .options()
            .into_iter()
            .filter(|option| **option == self.answer)
            .count();
        match matches {
            1 => Ok(()),
            0 => Err(format!("answer {:?} is not one of the options", self.answer)),
            _ => Err(format!("answer {:?} appears {} times in the options", self.answer, matches)),
        }
    }

    fn into_question<R: Rng + ?Sized>(self, id: String, rng: &mut R) -> Question {
        let mut options = vec![self.option1, self.option2, self.option3, self.option4];
        options.shuffle(rng);
        Question {
            id,
            question: self.question,
            options,
            answer: self.answer,
        }
    }
}

/// Path of the CSV bank for `category` under `data_dir`.
pub fn bank_path(data_dir: &Path, category: Category) -> PathBuf {
    data_dir.join(format!("{}.csv", category))
}

/// Reads and shuffles one category's bank.
///
/// Rows are shuffled before ids are assigned, and every question's options are
/// shuffled independently. A single bad row fails the whole bank.
pub fn load_bank<R: Rng + ?Sized>(
    data_dir: &Path,
    category: Category,
    rng: &mut R,
) -> Result<Vec<Question>, LoadError> {
    let path = bank_path(data_dir, category);
    let file = File::open(&path).map_err(|source| LoadError::MissingSource {
        path: path.clone(),
        source,
    })?;

    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(file);

    let mut rows = Vec::new();
    for (index, record) in reader.deserialize::<RawQuestion>().enumerate() {
        let malformed = |reason: String| LoadError::MalformedRow {
            path: path.clone(),
            row: index + 1,
            reason,
        };
        let raw = record.map_err(|e| malformed(e.to_string()))?;
        raw.check_answer().map_err(malformed)?;
        rows.push(raw);
    }

    rows.shuffle(rng);

    Ok(rows
        .into_iter()
        .enumerate()
        .map(|(n, raw)| raw.into_question(format!("{}_{}", category, n), rng))
        .collect())
}

/// Loads every category's bank into `store`, replacing the current questions.
///
/// Categories that fail to load end up with an empty bank; nothing is
/// propagated. Attempt histories are left untouched, so this also serves as
/// the reload path. Returns the total number of questions loaded.
pub fn load_banks<R: Rng + ?Sized>(store: &QuizStore, data_dir: &Path, rng: &mut R) -> usize {
    tracing::info!("Loading question banks from {}", data_dir.display());

    let mut total = 0;
    for category in Category::ALL {
        let questions = match load_bank(data_dir, category, rng) {
            Ok(questions) => {
                tracing::info!("Loaded {} questions for '{}'", questions.len(), category);
                questions
            }
            Err(e @ LoadError::MissingSource { .. }) => {
                tracing::warn!("No bank for '{}': {}", category, e);
                Vec::new()
            }
            Err(e @ LoadError::MalformedRow { .. }) => {
                tracing::error!("Discarding bank for '{}': {}", category, e);
                Vec::new()
            }
        };
        total += questions.len();
        store.replace_questions(category, questions);
    }

    tracing::info!("Categories available: {:?}", store.list_categories());
    total
}
