//! Source data model as returned by the Mantis REST API.

use serde::{Deserialize, Deserializer, Serialize};

/// A Mantis user referenced as reporter, handler or note author.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct User {
    /// Identifier, unique within a Mantis instance.
    pub id: u64,

    /// Login / display name.
    #[serde(default)]
    pub name: String,

    /// Real name (omitted by some Mantis configurations).
    #[serde(default)]
    pub real_name: String,

    /// Email address (omitted by some Mantis configurations).
    #[serde(default)]
    pub email: String,

    /// GitHub login standing in for this user, attached during substitution.
    #[serde(default, skip_deserializing, skip_serializing_if = "Option::is_none")]
    pub substitute: Option<String>,
}

impl User {
    /// Returns the substitute login if one was attached and is non-empty.
    #[must_use]
    pub fn substitute(&self) -> Option<&str> {
        self.substitute.as_deref().filter(|login| !login.is_empty())
    }
}

/// Project reference embedded in an issue.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Project {
    #[serde(default)]
    pub id: u64,
    pub name: String,
}

/// An enumerated value (status, resolution) as Mantis encodes it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct CodeRef {
    pub id: u32,
    #[serde(default)]
    pub name: String,
}

/// A note (comment) attached to an issue.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Note {
    #[serde(default)]
    pub id: u64,

    /// Free-text body.
    #[serde(default)]
    pub text: String,

    /// Author.
    pub reporter: User,
}

/// A Mantis issue.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Issue {
    pub id: u64,

    /// Title.
    pub summary: String,

    #[serde(default)]
    pub description: String,

    #[serde(
        default,
        deserialize_with = "blank_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub steps_to_reproduce: Option<String>,

    #[serde(
        default,
        deserialize_with = "blank_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub additional_information: Option<String>,

    pub status: CodeRef,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolution: Option<CodeRef>,

    pub reporter: User,

    /// User assigned to resolve the issue.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub handler: Option<User>,

    pub project: Project,

    /// Notes in the order Mantis returned them.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub notes: Vec<Note>,
}

impl Issue {
    /// Returns the status code.
    #[must_use]
    pub fn status_code(&self) -> u32 {
        self.status.id
    }

    /// Returns the resolution code, if any.
    #[must_use]
    pub fn resolution_code(&self) -> Option<u32> {
        self.resolution.as_ref().map(|resolution| resolution.id)
    }
}

/// Response body of `GET /api/rest/issues/`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct IssueCollection {
    #[serde(default)]
    pub issues: Vec<Issue>,
}

impl IssueCollection {
    /// Returns the number of issues.
    #[must_use]
    pub fn len(&self) -> usize {
        self.issues.len()
    }

    /// Returns true if there are no issues.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }
}

/// Treats absent, null and whitespace-only text the same way.
fn blank_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<String> = Option::deserialize(deserializer)?;
    Ok(value.filter(|text| !text.trim().is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_full_issue() {
        let issue: Issue = serde_json::from_value(json!({
            "id": 7,
            "summary": "Crash on save",
            "description": "It crashes.",
            "steps_to_reproduce": "Click save.",
            "additional_information": "   ",
            "status": {"id": 80, "name": "resolved"},
            "resolution": {"id": 20, "name": "fixed"},
            "reporter": {"id": 1, "name": "alice", "real_name": "Alice", "email": "a@example.com"},
            "handler": {"id": 2, "name": "bob"},
            "project": {"id": 3, "name": "Core"},
            "notes": [
                {"id": 11, "text": "first", "reporter": {"id": 2, "name": "bob"}}
            ]
        }))
        .unwrap();

        assert_eq!(issue.status_code(), 80);
        assert_eq!(issue.resolution_code(), Some(20));
        assert_eq!(issue.steps_to_reproduce.as_deref(), Some("Click save."));
        assert_eq!(issue.additional_information, None);
        assert_eq!(issue.handler.as_ref().map(|h| h.name.as_str()), Some("bob"));
        assert_eq!(issue.handler.as_ref().unwrap().real_name, "");
        assert_eq!(issue.notes.len(), 1);
    }

    #[test]
    fn parses_minimal_issue() {
        let issue: Issue = serde_json::from_value(json!({
            "id": 8,
            "summary": "Typo",
            "status": {"id": 10},
            "reporter": {"id": 1, "name": "alice"},
            "project": {"name": "Docs"}
        }))
        .unwrap();

        assert_eq!(issue.description, "");
        assert!(issue.handler.is_none());
        assert!(issue.resolution.is_none());
        assert!(issue.notes.is_empty());
    }

    #[test]
    fn substitute_is_never_read_from_source() {
        let user: User =
            serde_json::from_value(json!({"id": 1, "name": "alice", "substitute": "mallory"}))
                .unwrap();
        assert_eq!(user.substitute(), None);
    }
}
