use std::fmt::Display;

pub use almanac_syntax::error::Error as SyntaxError;

pub type Result<T> = std::result::Result<T, Error>;

/// Reason why a mutation requested by the user was refused. The state it
/// targets is always left untouched when one of these is returned.
#[derive(Clone, Debug)]
pub enum Error {
    /// The input fields don't describe a valid rule or date.
    Syntax(SyntaxError),
    /// A custom rule with the same name already exists.
    DuplicateName(String),
    /// There is no custom rule with this name.
    UnknownCustom(String),
    /// There is no built-in rule with this name.
    UnknownBuiltin(String),
    /// There is no item at this position of a list.
    NoSuchIndex { index: usize, len: usize },
    /// There is no task with this identifier.
    UnknownTask(u64),
    /// A text input was left empty.
    EmptyText,
}

impl From<SyntaxError> for Error {
    fn from(err: SyntaxError) -> Self {
        Self::Syntax(err)
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Syntax(err) => write!(f, "{err}"),
            Self::DuplicateName(name) => write!(f, "a custom date named `{name}` already exists"),
            Self::UnknownCustom(name) => write!(f, "unknown custom date `{name}`"),
            Self::UnknownBuiltin(name) => write!(f, "unknown built-in holiday `{name}`"),
            Self::NoSuchIndex { index, len } => {
                write!(f, "no item at index {index} in a list of {len} items")
            }
            Self::UnknownTask(id) => write!(f, "unknown task #{id}"),
            Self::EmptyText => write!(f, "the text can't be empty"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Syntax(err) => Some(err),
            _ => None,
        }
    }
}

/// Failure reported by a [`crate::store::KeyValueStore`].
#[derive(Clone, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct StoreError(pub String);

impl Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "storage failure: {}", self.0)
    }
}

impl std::error::Error for StoreError {}
