use crate::error::BankError;
use include_dir::{include_dir, Dir};
use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;

static SENTENCE_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/src/sentences");

/// Built-in sentence sets shipped inside the binary
#[derive(
    Debug,
    Copy,
    Clone,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    clap::ValueEnum,
    strum_macros::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SentenceSet {
    #[default]
    Classic,
    Pangrams,
}

#[derive(Deserialize, Clone, Debug)]
struct SentenceFile {
    name: String,
    sentences: Vec<String>,
}

/// Chooses which sentence comes next
pub trait Picker: fmt::Debug {
    /// Index in `0..len`. `len` is never zero.
    fn pick(&mut self, len: usize) -> usize;
}

/// Uniform random choice
#[derive(Debug)]
pub struct RandomPicker {
    rng: StdRng,
}

impl RandomPicker {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomPicker {
    fn default() -> Self {
        Self::new()
    }
}

impl Picker for RandomPicker {
    fn pick(&mut self, len: usize) -> usize {
        self.rng.gen_range(0..len)
    }
}

/// Walks the bank in order and wraps around
#[derive(Debug, Default)]
pub struct SequentialPicker {
    next: usize,
}

impl SequentialPicker {
    pub fn starting_at(next: usize) -> Self {
        Self { next }
    }
}

impl Picker for SequentialPicker {
    fn pick(&mut self, len: usize) -> usize {
        let idx = self.next % len;
        self.next = idx + 1;
        idx
    }
}

/// Ordered, non-empty list of candidate sentences
#[derive(Debug)]
pub struct SentenceBank {
    name: String,
    sentences: Vec<String>,
    picker: Box<dyn Picker>,
}

impl SentenceBank {
    /// Blank entries are dropped; fails if nothing is left.
    pub fn new<I, S>(name: impl Into<String>, sentences: I) -> Result<Self, BankError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let sentences: Vec<String> = sentences
            .into_iter()
            .map(|s| {
                let s: String = s.into();
                s.trim().to_string()
            })
            .filter(|s| !s.is_empty())
            .collect();

        if sentences.is_empty() {
            return Err(BankError::Empty);
        }

        Ok(Self {
            name: name.into(),
            sentences,
            picker: Box::new(RandomPicker::new()),
        })
    }

    pub fn builtin(set: SentenceSet) -> Result<Self, BankError> {
        let file_name = format!("{set}.json");
        let file = SENTENCE_DIR
            .get_file(&file_name)
            .ok_or_else(|| BankError::UnknownSet(set.to_string()))?;
        let contents = file
            .contents_utf8()
            .ok_or_else(|| BankError::UnknownSet(set.to_string()))?;

        let parsed: SentenceFile =
            serde_json::from_str(contents).map_err(|source| BankError::Parse {
                name: file_name,
                source,
            })?;

        Self::new(parsed.name, parsed.sentences)
    }

    /// One sentence per line
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, BankError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| BankError::ReadFile {
            path: path.to_path_buf(),
            source,
        })?;

        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "custom".to_string());

        Self::new(name, contents.lines())
    }

    pub fn with_picker(mut self, picker: impl Picker + 'static) -> Self {
        self.picker = Box::new(picker);
        self
    }

    pub fn pick_random(&mut self) -> &str {
        let idx = self.picker.pick(self.sentences.len());
        &self.sentences[idx]
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn sentences(&self) -> &[String] {
        &self.sentences
    }

    pub fn len(&self) -> usize {
        self.sentences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sentences.is_empty()
    }
}
