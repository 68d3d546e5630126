//! Optional search fields for member listings.

use serde::{Deserialize, Deserializer, Serialize, de};

/// Search filters, each optional. An absent field places no constraint.
///
/// Deserialized from the query string (`username`, `teamName`, `ageGoe`,
/// `ageLoe`). Blank strings are kept as given here; the predicate composer
/// treats them as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MemberSearchCondition {
    /// Exact username.
    pub username: Option<String>,
    /// Exact team name.
    pub team_name: Option<String>,
    /// Minimum age, inclusive.
    #[serde(deserialize_with = "blank_as_none")]
    pub age_goe: Option<i32>,
    /// Maximum age, inclusive.
    #[serde(deserialize_with = "blank_as_none")]
    pub age_loe: Option<i32>,
}

/// Accept a number or a numeric string; an empty string means absent.
///
/// Query strings deliver every value as text, so `ageGoe=` arrives as `""`.
fn blank_as_none<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(i32),
        Text(String),
    }

    match Option::<Raw>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Raw::Number(n)) => Ok(Some(n)),
        Some(Raw::Text(text)) if text.trim().is_empty() => Ok(None),
        Some(Raw::Text(text)) => text
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| de::Error::custom(format!("invalid age: {text:?}"))),
    }
}

impl MemberSearchCondition {
    /// A condition with no fields set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Require this username.
    pub fn username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    /// Require this team name.
    pub fn team_name(mut self, team_name: impl Into<String>) -> Self {
        self.team_name = Some(team_name.into());
        self
    }

    /// Require `age >= age_goe`.
    pub fn age_goe(mut self, age_goe: i32) -> Self {
        self.age_goe = Some(age_goe);
        self
    }

    /// Require `age <= age_loe`.
    pub fn age_loe(mut self, age_loe: i32) -> Self {
        self.age_loe = Some(age_loe);
        self
    }
}
