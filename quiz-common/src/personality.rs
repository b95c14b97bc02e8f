//! Personality type tags and their display metadata

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::Error;

/// One of the four classifications a completed quiz can produce
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PersonalityType {
    Builder,
    Visionary,
    Connector,
    Analyst,
}

impl PersonalityType {
    /// All tags, in question-option order
    pub const ALL: [PersonalityType; 4] = [
        PersonalityType::Builder,
        PersonalityType::Visionary,
        PersonalityType::Connector,
        PersonalityType::Analyst,
    ];

    /// Wire/store representation
    pub fn as_str(&self) -> &'static str {
        match self {
            PersonalityType::Builder => "builder",
            PersonalityType::Visionary => "visionary",
            PersonalityType::Connector => "connector",
            PersonalityType::Analyst => "analyst",
        }
    }

    /// Title shown on the result screen and share card
    pub fn title(&self) -> &'static str {
        match self {
            PersonalityType::Builder => "The Builder",
            PersonalityType::Visionary => "The Visionary",
            PersonalityType::Connector => "The Connector",
            PersonalityType::Analyst => "The Analyst",
        }
    }

    /// Long-form description shown after finishing the quiz
    pub fn description(&self) -> &'static str {
        match self {
            PersonalityType::Builder => {
                "You love creating things and seeing tangible results. You're practical, \
                 hands-on, and enjoy solving problems through building solutions."
            }
            PersonalityType::Visionary => {
                "You see possibilities where others don't. You're future-oriented, creative, \
                 and always thinking about what's next in the space."
            }
            PersonalityType::Connector => {
                "You thrive on bringing people together. You're social, empathetic, and excel \
                 at creating communities and meaningful relationships."
            }
            PersonalityType::Analyst => {
                "You love diving deep into data and understanding how things work. You're \
                 logical, detail-oriented, and make decisions based on thorough research."
            }
        }
    }

    /// One-line tagline used on share cards
    pub fn tagline(&self) -> &'static str {
        match self {
            PersonalityType::Builder => "Practical, hands-on, and loves creating things",
            PersonalityType::Visionary => "Future-oriented, creative, and sees possibilities",
            PersonalityType::Connector => "Social, empathetic, and brings people together",
            PersonalityType::Analyst => "Logical, detail-oriented, and research-driven",
        }
    }

    /// Share card gradient as (from, to) hex colors
    pub fn gradient(&self) -> (&'static str, &'static str) {
        match self {
            PersonalityType::Builder => ("#3b82f6", "#22d3ee"),
            PersonalityType::Visionary => ("#8b5cf6", "#f472b6"),
            PersonalityType::Connector => ("#22c55e", "#10b981"),
            PersonalityType::Analyst => ("#eab308", "#f59e0b"),
        }
    }

    /// Upper-case initial used as the share card badge
    pub fn initial(&self) -> char {
        match self {
            PersonalityType::Builder => 'B',
            PersonalityType::Visionary => 'V',
            PersonalityType::Connector => 'C',
            PersonalityType::Analyst => 'A',
        }
    }
}

impl fmt::Display for PersonalityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PersonalityType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "builder" => Ok(PersonalityType::Builder),
            "visionary" => Ok(PersonalityType::Visionary),
            "connector" => Ok(PersonalityType::Connector),
            "analyst" => Ok(PersonalityType::Analyst),
            other => Err(Error::InvalidInput(format!(
                "Unknown personality type: {}",
                other
            ))),
        }
    }
}
