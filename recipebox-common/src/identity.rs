//! Acting-user identity threaded into query and mutation calls

use crate::{Error, Result};

/// Display name stamped on content when the caller supplied none
pub const ANONYMOUS_NAME: &str = "Anonymous";

/// Identity attached to a request
///
/// Reads accept either variant. Every write requires `Authenticated`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Identity {
    #[default]
    Anonymous,
    Authenticated {
        user_id: String,
        display_name: String,
    },
}

/// Borrowed view of an authenticated identity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActingUser<'a> {
    pub user_id: &'a str,
    pub display_name: &'a str,
}

impl<'a> ActingUser<'a> {
    /// Name to stamp as `authorName`
    pub fn author_name(&self) -> String {
        let name = self.display_name.trim();
        if name.is_empty() {
            ANONYMOUS_NAME.to_string()
        } else {
            name.to_string()
        }
    }
}

impl Identity {
    pub fn authenticated(user_id: impl Into<String>, display_name: impl Into<String>) -> Self {
        Identity::Authenticated {
            user_id: user_id.into(),
            display_name: display_name.into(),
        }
    }

    /// User id, if authenticated
    pub fn user_id(&self) -> Option<&str> {
        match self {
            Identity::Anonymous => None,
            Identity::Authenticated { user_id, .. } => Some(user_id),
        }
    }

    /// Require an authenticated identity for a write
    pub fn require(&self) -> Result<ActingUser<'_>> {
        match self {
            Identity::Anonymous => Err(Error::Unauthenticated),
            Identity::Authenticated {
                user_id,
                display_name,
            } => Ok(ActingUser {
                user_id,
                display_name,
            }),
        }
    }

    /// True if this identity is the given author
    pub fn is_author_of(&self, author_id: &str) -> bool {
        self.user_id() == Some(author_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anonymous_cannot_write() {
        assert!(matches!(
            Identity::Anonymous.require(),
            Err(Error::Unauthenticated)
        ));
    }

    #[test]
    fn test_blank_display_name_becomes_anonymous() {
        let identity = Identity::authenticated("u1", "   ");
        let acting = identity.require().unwrap();
        assert_eq!(acting.author_name(), ANONYMOUS_NAME);

        let named = Identity::authenticated("u2", "Maria Rossi");
        assert_eq!(named.require().unwrap().author_name(), "Maria Rossi");
    }

    #[test]
    fn test_is_author_of() {
        let identity = Identity::authenticated("u1", "Alex");
        assert!(identity.is_author_of("u1"));
        assert!(!identity.is_author_of("u2"));
        assert!(!Identity::Anonymous.is_author_of("u1"));
    }
}
