use serde::{Deserialize, Serialize};
use super::string_id;
use crate::{Error, Result};

string_id!(
    /// Participant unique identifier
    ParticipantId
);

string_id!(
    /// Workspace unique identifier
    WorkspaceId
);

/// A person who pays for or benefits from shared expenses
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Participant {
    /// Unique participant identifier
    pub id: ParticipantId,

    /// Display name, used in transfer instructions
    pub name: String,

    /// Optional contact email
    #[serde(default)]
    pub email: Option<String>,

    /// Workspace the participant belongs to (`None` for legacy rows)
    #[serde(default)]
    pub workspace_id: Option<WorkspaceId>,
}

/// A named scope partitioning participants and expenses
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Workspace {
    pub id: WorkspaceId,
    pub name: String,
}

impl Participant {
    /// Creates a participant outside any workspace
    pub fn new(id: impl Into<ParticipantId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            email: None,
            workspace_id: None,
        }
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn in_workspace(mut self, workspace_id: impl Into<WorkspaceId>) -> Self {
        self.workspace_id = Some(workspace_id.into());
        self
    }

    /// Validates participant fields
    pub fn validate(&self) -> Result<()> {
        if self.id.as_str().trim().is_empty() {
            return Err(Error::InvalidParticipant("id must not be empty".to_string()));
        }

        if self.name.trim().is_empty() {
            return Err(Error::InvalidParticipant(format!(
                "participant {} has an empty name",
                self.id
            )));
        }

        if let Some(email) = &self.email {
            if !email.contains('@') {
                return Err(Error::InvalidParticipant(format!(
                    "participant {} has a malformed email: {}",
                    self.id, email
                )));
            }
        }

        Ok(())
    }

    /// Unscoped participants are visible from every workspace.
    pub fn belongs_to(&self, workspace_id: &WorkspaceId) -> bool {
        self.workspace_id
            .as_ref()
            .map_or(true, |own| own == workspace_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_participant_validation_success() {
        let alice = Participant::new("p1", "Alice").with_email("alice@example.com");
        assert!(alice.validate().is_ok());
    }

    #[test]
    fn test_participant_validation_empty_name() {
        let nobody = Participant::new("p1", "  ");
        assert!(matches!(nobody.validate(), Err(Error::InvalidParticipant(_))));
    }

    #[test]
    fn test_participant_validation_bad_email() {
        let bob = Participant::new("p2", "Bob").with_email("bob.example.com");
        assert!(bob.validate().is_err());
    }

    #[test]
    fn test_workspace_membership() {
        let home = WorkspaceId::new("home");
        let trip = WorkspaceId::new("trip");

        let scoped = Participant::new("p1", "Alice").in_workspace("home");
        assert!(scoped.belongs_to(&home));
        assert!(!scoped.belongs_to(&trip));

        let legacy = Participant::new("p2", "Bob");
        assert!(legacy.belongs_to(&home));
        assert!(legacy.belongs_to(&trip));
    }

    #[test]
    fn test_participant_deserializes_without_optional_fields() {
        let json = r#"{"id":"p1","name":"Alice"}"#;
        let alice: Participant = serde_json::from_str(json).expect("deserialize");
        assert_eq!(alice.id, ParticipantId::new("p1"));
        assert!(alice.email.is_none());
        assert!(alice.workspace_id.is_none());
    }
}
