//! Path → policy table consulted before the authentication gate.
//!
//! Rules are checked in insertion order and the first match wins. A path no
//! rule matches falls through to `RequiresAuth`.
//!
//! Pattern forms:
//! - `/login` exact
//! - `/users/*/posts` where `*` matches one segment (or part of one, e.g. `*.html`)
//! - `/swagger-ui/**` trailing `**` matches zero or more segments

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Policy {
    Public,
    RequiresAuth,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolicyRule {
    pub pattern: String,
    pub policy: Policy,
}

#[derive(Debug, Clone, Default)]
pub struct PolicyMatcher {
    rules: Vec<PolicyRule>,
}

impl PolicyMatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Public patterns first, then the catch-all.
    pub fn from_public_paths<I, S>(paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        paths
            .into_iter()
            .fold(Self::new(), |m, p| m.rule(p, Policy::Public))
            .rule("/**", Policy::RequiresAuth)
    }

    pub fn rule(mut self, pattern: impl Into<String>, policy: Policy) -> Self {
        self.rules.push(PolicyRule {
            pattern: pattern.into(),
            policy,
        });
        self
    }

    pub fn classify(&self, path: &str) -> Policy {
        self.rules
            .iter()
            .find(|rule| path_matches(&rule.pattern, path))
            .map(|rule| rule.policy)
            .unwrap_or(Policy::RequiresAuth)
    }
}

fn segments(path: &str) -> Vec<&str> {
    path.split('/').filter(|s| !s.is_empty()).collect()
}

pub fn path_matches(pattern: &str, path: &str) -> bool {
    let pattern = segments(pattern);
    let path = segments(path);

    match pattern.split_last() {
        Some((&"**", prefix)) => {
            path.len() >= prefix.len()
                && prefix
                    .iter()
                    .zip(&path)
                    .all(|(p, s)| segment_matches(p, s))
        }
        _ => {
            pattern.len() == path.len()
                && pattern
                    .iter()
                    .zip(&path)
                    .all(|(p, s)| segment_matches(p, s))
        }
    }
}

// `*` matches any run of characters within a single segment.
fn segment_matches(pattern: &str, segment: &str) -> bool {
    if !pattern.contains('*') {
        return pattern == segment;
    }

    let pieces: Vec<&str> = pattern.split('*').collect();
    let (first, rest) = (pieces[0], &pieces[1..]);
    let Some(mut remaining) = segment.strip_prefix(first) else {
        return false;
    };

    let (last, middle) = rest.split_last().map_or(("", &[][..]), |(l, m)| (*l, m));
    for piece in middle {
        match remaining.find(piece) {
            Some(idx) => remaining = &remaining[idx + piece.len()..],
            None => return false,
        }
    }
    remaining.len() >= last.len() && remaining.ends_with(last)
}
