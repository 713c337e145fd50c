use crate::world::World;

/// Why a dataset load ended in failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadError {
    /// One of the joined fetches rejected.
    Fetch { url: String, message: String },
    /// The payload arrived but could not be decoded into features.
    Decode { url: String, message: String },
}

impl std::fmt::Display for LoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoadError::Fetch { url, message } => {
                write!(f, "failed to fetch {url}: {message}")
            }
            LoadError::Decode { url, message } => {
                write!(f, "failed to decode {url}: {message}")
            }
        }
    }
}

impl std::error::Error for LoadError {}

/// Lifecycle of one dataset load.
///
/// Failure is terminal for the owning component instance; there is no retry
/// transition. The compositor treats anything but `Success` as "draw
/// nothing".
#[derive(Debug, Clone, PartialEq)]
pub enum LoadState {
    Loading,
    Success(World),
    Failure(LoadError),
}

impl LoadState {
    pub fn world(&self) -> Option<&World> {
        match self {
            LoadState::Success(world) => Some(world),
            _ => None,
        }
    }

    pub fn is_terminal_failure(&self) -> bool {
        matches!(self, LoadState::Failure(_))
    }
}
