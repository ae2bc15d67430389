use std::fmt;

/// Opaque bearer token handed out at login.
pub type Token = String;

/// Lifecycle of a single token inside a [`crate::TokenStore`].
///
/// `Absent -> Active` on add, `Active -> Absent` on remove. Adding an active
/// token and removing an absent one are both self-loops.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenState {
    Absent,
    Active,
}

impl TokenState {
    pub fn is_active(self) -> bool {
        self == TokenState::Active
    }
}

impl From<bool> for TokenState {
    fn from(present: bool) -> Self {
        if present {
            TokenState::Active
        } else {
            TokenState::Absent
        }
    }
}

impl fmt::Display for TokenState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TokenState::Absent => "Absent",
            TokenState::Active => "Active",
        };
        f.write_str(s)
    }
}
