//! Grammar for verification issue titles:
//!
//! ```text
//! title   = *CHAR "Verify: Project " release *CHAR
//! release = "v" DIGIT "." DIGIT+ "." DIGIT+
//! ```
//!
//! The first occurrence that is followed by a well-formed release wins.
//! The project number is the single major-version digit of the release.

use thiserror::Error;

const RELEASE_PREFIX: &str = "Verify: Project ";

/// Release and project identifiers extracted from a title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedTitle {
    /// Full release token, e.g. `v1.2.3`.
    pub release: String,
    /// Major version digit of the release.
    pub project: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("issue title `{title}` is not of the form `Verify: Project vMAJOR.MINOR.PATCH`")]
pub struct TitleFormatError {
    pub title: String,
}

pub fn parse(title: &str) -> Result<ParsedTitle, TitleFormatError> {
    title
        .match_indices(RELEASE_PREFIX)
        .find_map(|(at, prefix)| parse_release(&title[at + prefix.len()..]))
        .ok_or_else(|| TitleFormatError {
            title: title.to_string(),
        })
}

/// Parse a release token at the start of `token`, ignoring what follows it.
fn parse_release(token: &str) -> Option<ParsedTitle> {
    let version = token.strip_prefix('v')?;

    let (major, rest) = split_digits(version);
    if major.len() != 1 {
        return None;
    }
    let (minor, rest) = split_digits(rest.strip_prefix('.')?);
    if minor.is_empty() {
        return None;
    }
    let (patch, _) = split_digits(rest.strip_prefix('.')?);
    if patch.is_empty() {
        return None;
    }

    // "v" + major + "." + minor + "." + patch, all ASCII
    let release_len = 1 + major.len() + 1 + minor.len() + 1 + patch.len();

    Some(ParsedTitle {
        release: token[..release_len].to_string(),
        project: major.as_bytes()[0] - b'0',
    })
}

/// Split off the leading run of ASCII digits.
fn split_digits(s: &str) -> (&str, &str) {
    let end = s
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(s.len());
    s.split_at(end)
}
