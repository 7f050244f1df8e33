pub mod local;
pub mod remote;

pub use local::LocalHistory;
pub use remote::{CommitLister, CommitPage, GithubApi, RemoteCommit, RemoteHistory};

use crate::error::Result;
use crate::model::CommitRecord;

/// A finite producer of commit records. `collect` borrows, so a source
/// can be asked for its history again.
pub trait HistorySource {
    fn label(&self) -> String;

    fn collect(&self) -> Result<Vec<CommitRecord>>;
}
