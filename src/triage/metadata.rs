use std::collections::BTreeSet;

use crate::event::IssuePayload;

use super::title::ParsedTitle;

/// Label every verification issue carries besides its project label.
pub const VERIFY_LABEL: &str = "verify";

/// Milestone, assignee and labels a verification issue must have.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpectedMetadata {
    pub milestone: String,
    pub assignee: String,
    /// Reported in this order when missing.
    pub labels: [String; 2],
}

impl ExpectedMetadata {
    pub fn for_title(parsed: &ParsedTitle, assignee: &str) -> Self {
        Self {
            milestone: format!("Project {}", parsed.project),
            assignee: assignee.to_string(),
            labels: [VERIFY_LABEL.to_string(), format!("project{}", parsed.project)],
        }
    }
}

/// Problems found on an issue, in the order they are reported.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationResult {
    pub problems: Vec<String>,
}

impl ValidationResult {
    pub fn is_clean(&self) -> bool {
        self.problems.is_empty()
    }
}

/// Run the milestone, assignee and label checks. None short-circuits another.
pub fn validate(issue: &IssuePayload, expected: &ExpectedMetadata) -> ValidationResult {
    let mut problems = Vec::new();

    problems.extend(check_milestone(issue, expected));
    problems.extend(check_assignee(issue, expected));
    problems.extend(check_labels(issue, expected));

    ValidationResult { problems }
}

fn check_milestone(issue: &IssuePayload, expected: &ExpectedMetadata) -> Option<String> {
    let matches = issue
        .milestone
        .as_ref()
        .is_some_and(|m| m.title == expected.milestone);

    (!matches).then(|| {
        format!(
            "The issue is missing the `{}` milestone.",
            expected.milestone
        )
    })
}

fn check_assignee(issue: &IssuePayload, expected: &ExpectedMetadata) -> Option<String> {
    let assignee = &expected.assignee;
    match issue.assignees.as_slice() {
        [] => Some(format!("Please assign `{assignee}` to this issue.")),
        [only] if only.login == *assignee => None,
        [only] => Some(format!(
            "This issue is not assigned correctly. Please remove assignee `{}` and add `{assignee}` instead.",
            only.login
        )),
        _ => Some(format!(
            "There should be only 1 assignee. Please remove all assignees except for `{assignee}` from this issue."
        )),
    }
}

/// Unexpected labels (present minus expected) first, sorted; then missing
/// labels (expected minus present) in expected order.
fn check_labels(issue: &IssuePayload, expected: &ExpectedMetadata) -> Vec<String> {
    let present: BTreeSet<&str> = issue.labels.iter().map(|l| l.name.as_str()).collect();
    let wanted: BTreeSet<&str> = expected.labels.iter().map(String::as_str).collect();

    let unexpected = present
        .difference(&wanted)
        .map(|name| format!("The label `{name}` is unexpected. Please remove."));

    let missing = expected
        .labels
        .iter()
        .filter(|name| !present.contains(name.as_str()))
        .map(|name| format!("The label `{name}` is missing. Please add this label."));

    unexpected.chain(missing).collect()
}
