//! Reasons a chat submission was turned away.

/// Why [`SessionManager::submit`](crate::SessionManager::submit) left the
/// session untouched.
///
/// None of these are failures of the session; the caller may surface them as
/// a hint or ignore them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Rejection {
    #[error("message cannot be empty")]
    EmptyInput,
    #[error("a previous message is still waiting for an answer")]
    Pending,
    #[error("no organization selected")]
    NoOrganization,
    #[error("session is closed")]
    Closed,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejection_display() {
        assert_eq!(Rejection::EmptyInput.to_string(), "message cannot be empty");
        assert_eq!(
            Rejection::Pending.to_string(),
            "a previous message is still waiting for an answer"
        );
        assert_eq!(
            Rejection::NoOrganization.to_string(),
            "no organization selected"
        );
        assert_eq!(Rejection::Closed.to_string(), "session is closed");
    }

    #[test]
    fn test_rejection_implements_debug() {
        let dbg = format!("{:?}", Rejection::Pending);
        assert!(dbg.contains("Pending"));
    }
}
