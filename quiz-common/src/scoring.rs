//! Quiz scoring
//!
//! Tallies answer tags and picks the dominant personality type.

use serde::{Deserialize, Serialize};

use crate::personality::PersonalityType;
use crate::questions::QUESTION_COUNT;
use crate::{Error, Result};

/// Outcome of scoring a set of answers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Score {
    pub personality_type: PersonalityType,
    /// Raw occurrence count of the winning tag
    pub score: u32,
}

/// Score an ordered sequence of answers
///
/// The tag with the highest count wins. Among tags sharing the highest count,
/// the one that first appears earliest in `answers` wins. An empty sequence
/// scores as builder with 0.
///
/// # Errors
/// `InvalidInput` when more answers than quiz questions are supplied.
///
/// # Examples
/// ```
/// use quiz_common::personality::PersonalityType::*;
/// use quiz_common::scoring::score;
///
/// let s = score(&[Analyst, Analyst, Builder, Connector, Analyst]).unwrap();
/// assert_eq!(s.personality_type, Analyst);
/// assert_eq!(s.score, 3);
/// ```
pub fn score(answers: &[PersonalityType]) -> Result<Score> {
    if answers.len() > QUESTION_COUNT {
        return Err(Error::InvalidInput(format!(
            "Expected at most {} answers, got {}",
            QUESTION_COUNT,
            answers.len()
        )));
    }

    // Tallies in first-seen order so the scan below breaks ties by first occurrence
    let mut tallies: Vec<(PersonalityType, u32)> = Vec::with_capacity(PersonalityType::ALL.len());
    for &answer in answers {
        match tallies.iter_mut().find(|(tag, _)| *tag == answer) {
            Some((_, count)) => *count += 1,
            None => tallies.push((answer, 1)),
        }
    }

    let mut winner = Score {
        personality_type: PersonalityType::Builder,
        score: 0,
    };
    for (tag, count) in tallies {
        if count > winner.score {
            winner = Score {
                personality_type: tag,
                score: count,
            };
        }
    }

    Ok(winner)
}

/// Score raw tag strings as submitted by a client
///
/// # Errors
/// `InvalidInput` for unknown tags or too many answers.
pub fn score_tags<S: AsRef<str>>(answers: &[S]) -> Result<Score> {
    let parsed = answers
        .iter()
        .map(|a| a.as_ref().parse::<PersonalityType>())
        .collect::<Result<Vec<_>>>()?;
    score(&parsed)
}
