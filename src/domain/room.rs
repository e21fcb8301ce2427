use std::fmt::Display;

/// A named channel. The name is the whole identity: the backend enforces
/// uniqueness, and the first send or fetch against an unknown name is what
/// creates the room. There is no separate "create" request.
#[derive(Debug, Hash, Clone, PartialEq, Eq)]
pub struct Room {
    pub name: String,
}

impl Room {
    /// Builds a room from user input. Surrounding whitespace is trimmed and
    /// a name that trims to nothing is rejected.
    pub fn parse(raw: &str) -> Option<Self> {
        let name = raw.trim();
        if name.is_empty() {
            None
        } else {
            Some(Room { name: name.into() })
        }
    }
}

impl From<&str> for Room {
    fn from(value: &str) -> Self {
        Self { name: value.into() }
    }
}

impl Display for Room {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}
