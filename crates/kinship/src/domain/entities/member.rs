//! Member - One person in a family tree
//!
//! Pure domain entity without infrastructure dependencies.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::services::age_in_years;
use crate::domain::value_objects::{Gender, RelationshipType};

pub type MemberId = i64;

/// Member - A person recorded in the family tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Member {
    pub id: MemberId,
    pub first_name: String,
    pub last_name: String,
    pub gender: Gender,
    #[serde(deserialize_with = "dates::required")]
    pub birth_date: NaiveDate,
    /// Presence marks the member deceased
    #[serde(default, deserialize_with = "dates::optional")]
    pub death_date: Option<NaiveDate>,
    #[serde(default)]
    pub photo: Option<String>,
    /// Edges where this member is the subject
    #[serde(default)]
    pub relationships: Vec<Relationship>,
}

/// Directed edge between two members
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relationship {
    pub relationship_type: RelationshipType,
    pub from_member_id: MemberId,
    pub to_member_id: MemberId,
}

impl Member {
    pub fn new(
        id: MemberId,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        gender: Gender,
        birth_date: NaiveDate,
    ) -> Self {
        Self {
            id,
            first_name: first_name.into(),
            last_name: last_name.into(),
            gender,
            birth_date,
            death_date: None,
            photo: None,
            relationships: Vec::new(),
        }
    }

    pub fn with_death_date(mut self, death_date: NaiveDate) -> Self {
        self.death_date = Some(death_date);
        self
    }

    pub fn with_photo(mut self, photo: impl Into<String>) -> Self {
        self.photo = Some(photo.into());
        self
    }

    /// Add an outgoing edge from this member to `to_member_id`
    pub fn with_relationship(mut self, relationship_type: RelationshipType, to_member_id: MemberId) -> Self {
        self.relationships.push(Relationship {
            relationship_type,
            from_member_id: self.id,
            to_member_id,
        });
        self
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn is_deceased(&self) -> bool {
        self.death_date.is_some()
    }

    /// An empty photo reference counts as missing
    pub fn has_photo(&self) -> bool {
        self.photo.as_deref().is_some_and(|p| !p.trim().is_empty())
    }

    /// Age in whole years, measured to the death date if deceased, else to `today`
    pub fn age(&self, today: NaiveDate) -> i32 {
        age_in_years(self.birth_date, self.death_date.unwrap_or(today))
    }
}

/// Lenient date parsing for the member endpoint.
///
/// Accepts `YYYY-MM-DD` as well as full timestamps, keeping only the date.
mod dates {
    use chrono::{DateTime, NaiveDate, NaiveDateTime};
    use serde::{de::Error, Deserialize, Deserializer};

    pub(super) fn parse(raw: &str) -> Option<NaiveDate> {
        let raw = raw.trim();
        NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .ok()
            .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()))
            .or_else(|| {
                NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S")
                    .ok()
                    .map(|dt| dt.date())
            })
    }

    pub(super) fn required<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).ok_or_else(|| D::Error::custom(format!("invalid date: {raw:?}")))
    }

    pub(super) fn optional<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<String>::deserialize(deserializer)? {
            None => Ok(None),
            Some(raw) if raw.trim().is_empty() => Ok(None),
            Some(raw) => parse(&raw)
                .map(Some)
                .ok_or_else(|| D::Error::custom(format!("invalid date: {raw:?}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_deserialize_endpoint_shape() {
        let json = r#"{
            "id": 7,
            "first_name": "Ann",
            "last_name": "Lee",
            "gender": "female",
            "birth_date": "1990-01-01T00:00:00.000000Z",
            "death_date": null,
            "relationships": [
                {"relationship_type": "parent", "from_member_id": 7, "to_member_id": 3}
            ]
        }"#;

        let member: Member = serde_json::from_str(json).unwrap();
        assert_eq!(member.birth_date, date(1990, 1, 1));
        assert_eq!(member.death_date, None);
        assert_eq!(member.photo, None);
        assert_eq!(member.relationships[0].relationship_type, RelationshipType::Parent);
        assert_eq!(member.relationships[0].to_member_id, 3);
    }

    #[test]
    fn test_missing_relationships_and_blank_death_date() {
        let json = r#"{"id": 1, "first_name": "Bo", "last_name": "Kim", "gender": "male",
                       "birth_date": "1985-05-05", "death_date": "", "photo": ""}"#;

        let member: Member = serde_json::from_str(json).unwrap();
        assert!(member.relationships.is_empty());
        assert!(!member.is_deceased());
        assert!(!member.has_photo());
    }

    #[test]
    fn test_invalid_birth_date_is_rejected() {
        let json = r#"{"id": 1, "first_name": "Bo", "last_name": "Kim", "gender": "male",
                       "birth_date": "sometime"}"#;
        assert!(serde_json::from_str::<Member>(json).is_err());
    }

    #[test]
    fn test_space_separated_timestamp() {
        assert_eq!(dates::parse("2020-12-25 13:45:00"), Some(date(2020, 12, 25)));
    }

    #[test]
    fn test_age_stops_at_death() {
        let member = Member::new(1, "Bo", "Kim", Gender::Male, date(1985, 5, 5))
            .with_death_date(date(2020, 12, 25));
        assert_eq!(member.age(date(2030, 1, 1)), 35);
    }
}
