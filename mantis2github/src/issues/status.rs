//! Issue close reasons.

use serde::Serialize;
use std::fmt;

/// `state_reason` sent when closing an issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StateReason {
    /// The issue was fixed.
    Completed,

    /// The issue was closed without a fix.
    NotPlanned,
}

impl StateReason {
    /// Returns the wire value.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Completed => "completed",
            Self::NotPlanned => "not_planned",
        }
    }
}

impl fmt::Display for StateReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_to_wire_values() {
        assert_eq!(
            serde_json::to_string(&StateReason::Completed).unwrap(),
            "\"completed\""
        );
        assert_eq!(
            serde_json::to_string(&StateReason::NotPlanned).unwrap(),
            "\"not_planned\""
        );
        assert_eq!(StateReason::NotPlanned.to_string(), "not_planned");
    }
}
