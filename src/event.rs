use serde::Deserialize;

use crate::platform::types::{IssueRef, IssueState};

/// Payload of an `issues` event, the single input of a triage run.
#[derive(Debug, Clone, Deserialize)]
pub struct IssuesEvent {
    pub action: String,
    pub issue: IssuePayload,
    pub repository: RepositoryPayload,
    /// Absent for repositories owned by a user account.
    pub organization: Option<OrganizationPayload>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct IssuePayload {
    pub number: u64,
    pub title: String,
    pub state: IssueState,
    pub milestone: Option<MilestonePayload>,
    #[serde(default)]
    pub assignees: Vec<UserPayload>,
    #[serde(default)]
    pub labels: Vec<LabelPayload>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MilestonePayload {
    pub title: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LabelPayload {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UserPayload {
    pub login: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RepositoryPayload {
    pub name: String,
    pub full_name: String,
    pub owner: UserPayload,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OrganizationPayload {
    pub login: String,
}

impl IssuesEvent {
    pub fn from_slice(payload: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(payload)
    }

    /// Account that owns the repository: the organization when there is one.
    pub fn owner(&self) -> &str {
        self.organization
            .as_ref()
            .map(|org| org.login.as_str())
            .unwrap_or(&self.repository.owner.login)
    }

    pub fn issue_ref(&self) -> IssueRef {
        IssueRef {
            owner: self.owner().to_string(),
            repo: self.repository.name.clone(),
            number: self.issue.number,
        }
    }
}
