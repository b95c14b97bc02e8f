//! Quiz result records and submission validation

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::str::FromStr;

use crate::personality::PersonalityType;
use crate::{Error, Result};

/// User id recorded when a submission carries none
///
/// Clients embedded outside the social app have no user context; their
/// results are attributed to this fixed account.
pub const DEFAULT_USER_ID: i64 = 203090;

/// A completed quiz, immutable once created
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizResult {
    #[serde(alias = "userFid")]
    pub user_id: i64,
    pub personality_type: PersonalityType,
    pub score: u32,
    /// Unix epoch milliseconds
    pub timestamp: i64,
    /// Profile name shown on the leaderboard, when the client sent one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
}

impl QuizResult {
    /// Field/value pairs for the per-user hash record, all stringified
    pub fn to_fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = vec![
            ("userId", self.user_id.to_string()),
            ("personalityType", self.personality_type.as_str().to_string()),
            ("score", self.score.to_string()),
            ("timestamp", self.timestamp.to_string()),
        ];
        if let Some(name) = &self.display_name {
            fields.push(("displayName", name.clone()));
        }
        fields
    }

    /// Sorted-set score for the leaderboard index (newest lowest)
    ///
    /// # Errors
    /// `Validation` if the timestamp cannot be negated.
    pub fn index_score(&self) -> Result<i64> {
        self.timestamp
            .checked_neg()
            .ok_or_else(|| Error::Validation(format!("Invalid timestamp: {}", self.timestamp)))
    }

    /// Rebuild a result from a stringified hash record
    ///
    /// Accepts `userFid` in place of `userId` for records written by older clients.
    ///
    /// # Errors
    /// `Deserialization` when a field is missing or does not parse.
    pub fn from_fields(fields: &HashMap<String, String>) -> Result<Self> {
        fn field<'a>(fields: &'a HashMap<String, String>, names: &[&str]) -> Result<&'a str> {
            names
                .iter()
                .find_map(|name| fields.get(*name))
                .map(String::as_str)
                .ok_or_else(|| Error::Deserialization(format!("Missing field: {}", names[0])))
        }

        fn parse<T: FromStr>(name: &str, value: &str) -> Result<T> {
            value
                .parse()
                .map_err(|_| Error::Deserialization(format!("Invalid {}: {}", name, value)))
        }

        Ok(QuizResult {
            user_id: parse("userId", field(fields, &["userId", "userFid"])?)?,
            personality_type: field(fields, &["personalityType"])?
                .parse()
                .map_err(|e: Error| Error::Deserialization(e.to_string()))?,
            score: parse("score", field(fields, &["score"])?)?,
            timestamp: parse("timestamp", field(fields, &["timestamp"])?)?,
            display_name: fields.get("displayName").cloned(),
        })
    }
}

/// Raw submission body; every field optional until validated
///
/// `userId` and `userFid` are separate fields so a body carrying both still
/// parses; `userId` wins.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultSubmission {
    #[serde(default)]
    pub user_id: Option<i64>,
    #[serde(default)]
    pub user_fid: Option<i64>,
    #[serde(default)]
    pub personality_type: Option<String>,
    #[serde(default)]
    pub score: Option<i64>,
    #[serde(default)]
    pub timestamp: Option<i64>,
    #[serde(default)]
    pub display_name: Option<String>,
}

impl ResultSubmission {
    /// Validate and fill defaults
    ///
    /// A missing or zero `userId` becomes `default_user_id`; a missing or zero
    /// `timestamp` becomes `now_ms`. A blank `displayName` is dropped.
    ///
    /// # Errors
    /// `Validation` when `personalityType` is absent or unknown, or when
    /// `score` or `timestamp` is negative, or `score` is absent.
    pub fn into_result(self, default_user_id: i64, now_ms: i64) -> Result<QuizResult> {
        let personality_type = self
            .personality_type
            .ok_or_else(|| Error::Validation("Missing required field: personalityType".into()))?
            .parse::<PersonalityType>()
            .map_err(|e| Error::Validation(e.to_string()))?;

        let score = self
            .score
            .ok_or_else(|| Error::Validation("Missing required field: score".into()))?;
        let score = u32::try_from(score)
            .map_err(|_| Error::Validation(format!("Invalid score: {}", score)))?;

        let user_id = match self.user_id.or(self.user_fid) {
            Some(id) if id != 0 => id,
            _ => default_user_id,
        };

        let timestamp = match self.timestamp {
            Some(ts) if ts < 0 => {
                return Err(Error::Validation(format!("Invalid timestamp: {}", ts)));
            }
            Some(ts) if ts != 0 => ts,
            _ => now_ms,
        };

        let display_name = self
            .display_name
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty());

        Ok(QuizResult {
            user_id,
            personality_type,
            score,
            timestamp,
            display_name,
        })
    }
}
