use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// One of the labelled bubbles printed for every question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AnswerOption {
    A,
    B,
    C,
    D,
}

/// Labels in the order the bubbles are laid out, left to right.
pub const OPTION_LABELS: [AnswerOption; 4] = [
    AnswerOption::A,
    AnswerOption::B,
    AnswerOption::C,
    AnswerOption::D,
];

impl AnswerOption {
    /// The label printed at the given bubble position, if there is one.
    pub fn from_index(index: usize) -> Option<Self> {
        OPTION_LABELS.get(index).copied()
    }

    pub fn index(self) -> usize {
        match self {
            AnswerOption::A => 0,
            AnswerOption::B => 1,
            AnswerOption::C => 2,
            AnswerOption::D => 3,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            AnswerOption::A => "A",
            AnswerOption::B => "B",
            AnswerOption::C => "C",
            AnswerOption::D => "D",
        }
    }
}

impl TryFrom<&str> for AnswerOption {
    type Error = String;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        match s.trim() {
            "A" | "a" => Ok(AnswerOption::A),
            "B" | "b" => Ok(AnswerOption::B),
            "C" | "c" => Ok(AnswerOption::C),
            "D" | "d" => Ok(AnswerOption::D),
            _ => Err(format!("invalid answer option: {s}")),
        }
    }
}

impl Display for AnswerOption {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

impl<'de> Deserialize<'de> for AnswerOption {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        AnswerOption::try_from(s.as_str()).map_err(serde::de::Error::custom)
    }
}

impl Serialize for AnswerOption {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Size<T> {
    pub width: T,
    pub height: T,
}
