use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Index, IndexMut};
use std::str::FromStr;

use crate::error::ExplorerError;

/// One entity level of the dataset hierarchy, ordered root to leaf.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Paper,
    Study,
    Sample,
    Intervention,
    Outcome,
    Effect,
}

impl Level {
    pub const ALL: [Level; 6] = [
        Level::Paper,
        Level::Study,
        Level::Sample,
        Level::Intervention,
        Level::Outcome,
        Level::Effect,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            Level::Paper => "paper",
            Level::Study => "study",
            Level::Sample => "sample",
            Level::Intervention => "intervention",
            Level::Outcome => "outcome",
            Level::Effect => "effect",
        }
    }

    /// Name of the full level table ("Papers", "Studies", ...).
    pub fn table_name(self) -> &'static str {
        match self {
            Level::Paper => "Papers",
            Level::Study => "Studies",
            Level::Sample => "Samples",
            Level::Intervention => "Interventions",
            Level::Outcome => "Outcomes",
            Level::Effect => "Effects",
        }
    }

    /// The id column contributed by this level to every identity tuple below it.
    pub fn id_column(self) -> &'static str {
        match self {
            Level::Paper => "paper_id",
            Level::Study => "study_id",
            Level::Sample => "sample_id",
            Level::Intervention => "intervention_id",
            Level::Outcome => "outcome_id",
            Level::Effect => "effect_id",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Level {
    type Err = ExplorerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Level::ALL
            .into_iter()
            .find(|level| {
                level.name().eq_ignore_ascii_case(needle)
                    || level.table_name().eq_ignore_ascii_case(needle)
            })
            .ok_or_else(|| ExplorerError::UnknownLevel(s.to_string()))
    }
}

/// Exactly one `T` per [`Level`], iterated root to leaf.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelMap<T> {
    pub paper: T,
    pub study: T,
    pub sample: T,
    pub intervention: T,
    pub outcome: T,
    pub effect: T,
}

impl<T> LevelMap<T> {
    pub fn from_fn(mut f: impl FnMut(Level) -> T) -> Self {
        Self {
            paper: f(Level::Paper),
            study: f(Level::Study),
            sample: f(Level::Sample),
            intervention: f(Level::Intervention),
            outcome: f(Level::Outcome),
            effect: f(Level::Effect),
        }
    }

    pub fn get(&self, level: Level) -> &T {
        match level {
            Level::Paper => &self.paper,
            Level::Study => &self.study,
            Level::Sample => &self.sample,
            Level::Intervention => &self.intervention,
            Level::Outcome => &self.outcome,
            Level::Effect => &self.effect,
        }
    }

    pub fn get_mut(&mut self, level: Level) -> &mut T {
        match level {
            Level::Paper => &mut self.paper,
            Level::Study => &mut self.study,
            Level::Sample => &mut self.sample,
            Level::Intervention => &mut self.intervention,
            Level::Outcome => &mut self.outcome,
            Level::Effect => &mut self.effect,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Level, &T)> {
        Level::ALL.into_iter().map(move |level| (level, self.get(level)))
    }

    pub fn map<U>(&self, mut f: impl FnMut(Level, &T) -> U) -> LevelMap<U> {
        LevelMap::from_fn(|level| f(level, self.get(level)))
    }
}

impl<T> Index<Level> for LevelMap<T> {
    type Output = T;

    fn index(&self, level: Level) -> &T {
        self.get(level)
    }
}

impl<T> IndexMut<Level> for LevelMap<T> {
    fn index_mut(&mut self, level: Level) -> &mut T {
        self.get_mut(level)
    }
}

/// Per-level lock flags. A locked level keeps its filtered set verbatim during propagation and
/// does not constrain the other levels.
pub type LockSet = LevelMap<bool>;

impl LockSet {
    pub fn any(&self) -> bool {
        self.iter().any(|(_, locked)| *locked)
    }

    pub fn locked(&self) -> impl Iterator<Item = Level> + '_ {
        self.iter().filter_map(|(level, locked)| locked.then_some(level))
    }
}

/// Identity tuple and own fields of one level table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelSchema {
    pub identity: Vec<String>,
    #[serde(default)]
    pub fields: Vec<String>,
}

impl LevelSchema {
    pub fn new(identity: Vec<impl Into<String>>, fields: Vec<impl Into<String>>) -> Self {
        Self {
            identity: identity.into_iter().map(Into::into).collect(),
            fields: fields.into_iter().map(Into::into).collect(),
        }
    }

    /// Default schema for `level`. Below the study level, entities are keyed within their study,
    /// so an effect's identity is `(paper_id, study_id, effect_id)`.
    pub fn default_for(level: Level) -> Self {
        let mut identity = vec![Level::Paper.id_column()];
        if level != Level::Paper {
            identity.push(Level::Study.id_column());
        }
        if level > Level::Study {
            identity.push(level.id_column());
        }

        let fields: &[&str] = match level {
            Level::Paper => &["title", "authors", "year", "paper_type"],
            Level::Study => &["preregistered", "design", "country"],
            Level::Sample => &["n_participants", "population"],
            Level::Intervention => &["intervention_type", "delivery"],
            Level::Outcome => &["outcome_type", "measure"],
            Level::Effect => &["effect_size", "standard_error"],
        };

        Self::new(identity, fields.to_vec())
    }

    /// Identity columns followed by own fields, without duplicates.
    pub fn columns(&self) -> Vec<&str> {
        let mut out: Vec<&str> = Vec::with_capacity(self.identity.len() + self.fields.len());
        for column in self.identity.iter().chain(&self.fields) {
            if !out.contains(&column.as_str()) {
                out.push(column.as_str());
            }
        }
        out
    }
}

/// The default schema of all six levels.
pub fn default_schema() -> LevelMap<LevelSchema> {
    LevelMap::from_fn(LevelSchema::default_for)
}
