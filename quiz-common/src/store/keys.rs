//! Store key layout

/// Builds the keys used for result records and the leaderboard index
///
/// With an empty namespace keys are `results:<userId>` and `leaderboard`;
/// otherwise both are prefixed with `<namespace>:`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeySpace {
    namespace: String,
}

impl KeySpace {
    pub fn new(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
        }
    }

    fn prefixed(&self, key: &str) -> String {
        if self.namespace.is_empty() {
            key.to_string()
        } else {
            format!("{}:{}", self.namespace, key)
        }
    }

    /// Hash key holding one user's latest result fields
    pub fn result(&self, user_id: i64) -> String {
        self.prefixed(&format!("results:{}", user_id))
    }

    /// Scan pattern matching every result hash
    pub fn result_pattern(&self) -> String {
        self.prefixed("results:*")
    }

    /// Sorted-set key for the time-ordered index
    pub fn leaderboard(&self) -> String {
        self.prefixed("leaderboard")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_keys() {
        let keys = KeySpace::default();
        assert_eq!(keys.result(42), "results:42");
        assert_eq!(keys.result_pattern(), "results:*");
        assert_eq!(keys.leaderboard(), "leaderboard");
    }

    #[test]
    fn test_namespaced_keys() {
        let keys = KeySpace::new("quiz");
        assert_eq!(keys.result(203090), "quiz:results:203090");
        assert_eq!(keys.result_pattern(), "quiz:results:*");
        assert_eq!(keys.leaderboard(), "quiz:leaderboard");
    }
}
