use tracing::debug;

use crate::error::CommandError;
use crate::model::command::{Command, CommandKind, KEYWORDS};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeywordMatch {
    pub kind: CommandKind,
    /// false when the prefix differs from the keyword in one position
    pub exact: bool,
}

/// Number of differing positions between two strings of equal length, or
/// `None` when the lengths differ. Letters are compared case-insensitively.
pub fn hamming_distance(a: &str, b: &str) -> Option<usize> {
    if a.chars().count() != b.chars().count() {
        return None;
    }
    let distance = a
        .chars()
        .zip(b.chars())
        .filter(|(x, y)| !x.eq_ignore_ascii_case(y))
        .count();
    Some(distance)
}

/// Identical, or a single-character typo of the same length.
pub fn is_near_match(keyword: &str, candidate: &str) -> bool {
    matches!(hamming_distance(keyword, candidate), Some(0) | Some(1))
}

/// Compares the start of `input` against every keyword. An exact prefix
/// match beats a near match; among near matches the table order decides.
pub fn match_keyword(input: &str) -> Option<KeywordMatch> {
    match_keyword_in(input, &KEYWORDS)
}

fn match_keyword_in(input: &str, table: &[(CommandKind, &str)]) -> Option<KeywordMatch> {
    let mut near = None;
    for &(kind, keyword) in table {
        let Some(prefix) = prefix_chars(input, keyword.len()) else {
            continue;
        };
        match hamming_distance(keyword, prefix) {
            Some(0) => return Some(KeywordMatch { kind, exact: true }),
            Some(1) if near.is_none() => near = Some(KeywordMatch { kind, exact: false }),
            _ => {}
        }
    }
    near
}

/// Classifies one line of user input and extracts its argument.
pub fn parse_command(line: &str) -> Result<Command, CommandError> {
    let line = line.trim();
    let Some(matched) = match_keyword(line) else {
        debug!(line, "no keyword matched");
        return Err(CommandError::Unrecognized);
    };
    let kind = matched.kind;
    let keyword = kind.keyword();

    if line.eq_ignore_ascii_case(keyword) {
        // list は引数なしが正常
        if kind == CommandKind::List {
            return Ok(Command::new(kind, ""));
        }
        return Err(CommandError::EmptyDescription(kind));
    }

    let rest = prefix_chars(line, keyword.len())
        .map(|prefix| &line[prefix.len()..])
        .unwrap_or_default();
    if !matched.exact || !rest.starts_with(' ') {
        debug!(line, %kind, exact = matched.exact, "possible typo");
        return Err(CommandError::PossibleTypo(kind));
    }

    let argument = rest.trim();
    debug!(%kind, argument, "parsed command");
    Ok(Command::new(kind, argument))
}

/// The first `n` characters of `input`, or `None` if it is shorter.
fn prefix_chars(input: &str, n: usize) -> Option<&str> {
    match input.char_indices().nth(n) {
        Some((end, _)) => Some(&input[..end]),
        None if input.chars().count() == n => Some(input),
        None => None,
    }
}
