//! Wildcard permission strings.
//!
//! A permission is `:`-separated parts, each part a `,`-separated set of
//! values. `*` in a granted part matches any value. A granted permission with
//! fewer parts than the requirement implies everything below it, so `user`
//! and `user:*` both imply `user:view:42`. Matching ignores case.

const PART_DIVIDER: char = ':';
const SUBPART_DIVIDER: char = ',';
const WILDCARD: &str = "*";

fn parts(permission: &str) -> Vec<Vec<String>> {
    permission
        .split(PART_DIVIDER)
        .map(|part| {
            part.split(SUBPART_DIVIDER)
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_lowercase)
                .collect()
        })
        .collect()
}

fn is_wildcard(part: &[String]) -> bool {
    part.iter().any(|value| value == WILDCARD)
}

/// Does holding `granted` satisfy a check for `required`?
pub fn implies(granted: &str, required: &str) -> bool {
    let granted = parts(granted);
    let required = parts(required);

    if granted.iter().any(Vec::is_empty) || required.iter().any(Vec::is_empty) {
        return false;
    }

    for (i, req) in required.iter().enumerate() {
        let Some(have) = granted.get(i) else {
            // Granted ran out of parts: it covers everything deeper.
            return true;
        };
        if is_wildcard(have) {
            continue;
        }
        if !req.iter().all(|r| have.contains(r)) {
            return false;
        }
    }

    // Extra granted parts must not narrow the grant.
    granted
        .iter()
        .skip(required.len())
        .all(|have| is_wildcard(have))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact() {
        assert!(implies("user:view", "user:view"));
        assert!(!implies("user:view", "user:edit"));
        assert!(!implies("user:view", "post:view"));
    }

    #[test]
    fn test_wildcard() {
        assert!(implies("user:*", "user:view"));
        assert!(implies("user:*", "user:delete"));
        assert!(implies("user:*", "user:view:42"));
        assert!(implies("*", "anything:at:all"));
        assert!(!implies("user:*", "post:view"));
    }

    #[test]
    fn test_shorter_grant_implies_deeper() {
        assert!(implies("user", "user:view"));
        assert!(implies("user:view", "user:view:42"));
        assert!(!implies("user:view:42", "user:view"));
    }

    #[test]
    fn test_trailing_wildcards_are_fine() {
        assert!(implies("user:view:*", "user:view"));
        assert!(implies("user:*:*", "user"));
    }

    #[test]
    fn test_subparts() {
        assert!(implies("user:view,edit", "user:edit"));
        assert!(implies("user:view,edit", "user:view,edit"));
        assert!(!implies("user:view", "user:view,edit"));
    }

    #[test]
    fn test_case_insensitive() {
        assert!(implies("user:view", "user:VIEW"));
        assert!(implies("User:*", "user:delete"));
        assert!(!implies("user:VIEW", "user:edit"));
    }

    #[test]
    fn test_empty_parts_never_match() {
        assert!(!implies("", "user:view"));
        assert!(!implies("user:*", ""));
        assert!(!implies("user::view", "user:x:view"));
    }
}
