use thiserror::Error;

pub type Result<T> = std::result::Result<T, PulseError>;

#[derive(Error, Debug)]
pub enum PulseError {
    #[error("Git discover error: {0}")]
    GitDiscover(#[from] Box<gix::discover::Error>),
    #[error("Reference find error: {0}")]
    RefFind(#[from] Box<gix::reference::find::existing::Error>),
    #[error("Head peel error: {0}")]
    HeadPeel(#[from] Box<gix::head::peel::to_commit::Error>),
    #[error("Object find error: {0}")]
    ObjectFind(#[from] Box<gix::object::find::existing::Error>),
    #[error("Object find with conversion error: {0}")]
    ObjectFindConv(#[from] Box<gix::object::find::existing::with_conversion::Error>),
    #[error("Commit error: {0}")]
    Commit(#[from] Box<gix::object::commit::Error>),
    #[error("Object decode error: {0}")]
    ObjectDecode(#[from] Box<gix::objs::decode::Error>),
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("Invalid date: {0}")]
    InvalidDate(String),
    #[error("API request failed with status {status} for {url}")]
    ApiStatus { status: u16, url: String },
    #[error("HTTP transport error: {0}")]
    Transport(Box<ureq::Error>),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("No commits found, nothing to chart")]
    EmptyHistory,
    #[error("No repositories found for organization '{0}'")]
    NoRepositories(String),
    #[error("Invalid commit count {count} for {date}")]
    InvalidCount { date: chrono::NaiveDate, count: u32 },
}

// Manual From implementations for unboxed to boxed conversions
impl From<gix::discover::Error> for PulseError {
    fn from(err: gix::discover::Error) -> Self {
        PulseError::GitDiscover(Box::new(err))
    }
}

impl From<gix::reference::find::existing::Error> for PulseError {
    fn from(err: gix::reference::find::existing::Error) -> Self {
        PulseError::RefFind(Box::new(err))
    }
}

impl From<gix::head::peel::to_commit::Error> for PulseError {
    fn from(err: gix::head::peel::to_commit::Error) -> Self {
        PulseError::HeadPeel(Box::new(err))
    }
}

impl From<gix::object::find::existing::Error> for PulseError {
    fn from(err: gix::object::find::existing::Error) -> Self {
        PulseError::ObjectFind(Box::new(err))
    }
}

impl From<gix::object::find::existing::with_conversion::Error> for PulseError {
    fn from(err: gix::object::find::existing::with_conversion::Error) -> Self {
        PulseError::ObjectFindConv(Box::new(err))
    }
}

impl From<gix::object::commit::Error> for PulseError {
    fn from(err: gix::object::commit::Error) -> Self {
        PulseError::Commit(Box::new(err))
    }
}

impl From<gix::objs::decode::Error> for PulseError {
    fn from(err: gix::objs::decode::Error) -> Self {
        PulseError::ObjectDecode(Box::new(err))
    }
}

// Status errors carry the offending URL; everything else is transport.
impl From<ureq::Error> for PulseError {
    fn from(err: ureq::Error) -> Self {
        match err {
            ureq::Error::Status(status, response) => PulseError::ApiStatus {
                status,
                url: response.get_url().to_string(),
            },
            other => PulseError::Transport(Box::new(other)),
        }
    }
}
