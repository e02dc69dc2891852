use crate::platform::types::IssueState;

use super::metadata::ValidationResult;
use super::release::ReleaseStatus;

/// Terminal outcome of an in-scope triage run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    TitleFormat { title: String },
    MetadataProblems(ValidationResult),
    Release { release: String, status: ReleaseStatus },
}

/// Comment to post and the state to leave the issue in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decision {
    pub comment: String,
    pub state: IssueState,
}

impl Decision {
    fn closed(comment: String) -> Self {
        Self {
            comment,
            state: IssueState::Closed,
        }
    }
}

impl Outcome {
    pub fn decision(&self) -> Decision {
        match self {
            Outcome::TitleFormat { title } => Decision::closed(format!(
                "## :warning: Warning\n\n The issue title `{title}` is in an unexpected format. Please re-open this issue once fixed. (All other checks skipped.)"
            )),
            Outcome::MetadataProblems(result) => Decision::closed(format!(
                "## :warning: Warning\n\n **One or more issues detected!**\n\n  - {}\n\nPlease re-open this issue once all of the above is fixed.",
                result.problems.join("\n  - ")
            )),
            Outcome::Release { release, status } => release_decision(release, status),
        }
    }
}

fn release_decision(release: &str, status: &ReleaseStatus) -> Decision {
    match status {
        ReleaseStatus::NotFound => Decision::closed(format!(
            "## :stop_sign: Release Not Verified\n\nUnable to find a workflow run that matches the `{release}` release."
        )),
        ReleaseStatus::Incomplete(run) => Decision::closed(format!(
            "## :stop_sign: Release Not Verified\n\nThe [workflow run]({}) for `{release}` did not complete.",
            run.html_url
        )),
        ReleaseStatus::Unsuccessful(run) => Decision::closed(format!(
            "## :stop_sign: Release Not Verified\n\nThe [workflow run]({}) for `{release}` was not successful.",
            run.html_url
        )),
        ReleaseStatus::Verified(run) => Decision {
            comment: format!(
                "## :tada: Release Verified!\n\nIdentified [passing workflow run]({}) for the `{release}` release.",
                run.html_url
            ),
            state: IssueState::Open,
        },
    }
}
