use crate::event::IssuesEvent;
use crate::platform::types::IssueState;

/// Title prefix that marks an issue as a release verification request.
pub const TITLE_PREFIX: &str = "Verify: Project";

/// Why an event was left alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    NotOpen,
    NotVerification,
}

impl SkipReason {
    pub fn describe(&self) -> &'static str {
        match self {
            SkipReason::NotOpen => "This is not an open issue.",
            SkipReason::NotVerification => {
                "This does not appear to be a project verification issue."
            }
        }
    }
}

/// Decide whether an issue event is in scope. Pure; never fails.
pub fn check(event: &IssuesEvent) -> Result<(), SkipReason> {
    if event.issue.state != IssueState::Open {
        return Err(SkipReason::NotOpen);
    }

    if !event.issue.title.starts_with(TITLE_PREFIX) {
        return Err(SkipReason::NotVerification);
    }

    Ok(())
}
