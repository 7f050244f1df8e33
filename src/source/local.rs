use std::collections::{HashSet, VecDeque};
use std::path::PathBuf;

use chrono::DateTime;
use gix::ObjectId;
use indicatif::{ProgressBar, ProgressStyle};

use crate::error::{PulseError, Result};
use crate::model::{CommitRecord, LOCAL_SOURCE};
use crate::source::HistorySource;

pub struct LocalHistory {
    repo_path: Option<PathBuf>,
    branch: Option<String>,
}

impl LocalHistory {
    /// Walk `branch` of the repository at `repo_path`; current directory and
    /// `HEAD` when not given.
    pub fn new(repo_path: Option<PathBuf>, branch: Option<String>) -> Self {
        Self { repo_path, branch }
    }

    fn open(&self) -> Result<gix::Repository> {
        let path = match &self.repo_path {
            Some(path) => path.clone(),
            None => std::env::current_dir()?,
        };
        Ok(gix::discover(path)?)
    }

    fn tip(&self, repo: &gix::Repository) -> Result<ObjectId> {
        match &self.branch {
            Some(name) => {
                let id = repo.rev_parse_single(name.as_str()).map_err(|e| {
                    PulseError::Parse(format!("Cannot resolve branch '{name}': {e}"))
                })?;
                let commit = id
                    .object()?
                    .try_into_commit()
                    .map_err(|_| PulseError::Parse(format!("Not a commit: {name}")))?;
                Ok(commit.id)
            }
            None => {
                let mut head = repo.head()?;
                Ok(head.peel_to_commit_in_place()?.id)
            }
        }
    }
}

impl HistorySource for LocalHistory {
    fn label(&self) -> String {
        let branch = self.branch.as_deref().unwrap_or("HEAD");
        match &self.repo_path {
            Some(path) => format!("{} @ {branch}", path.display()),
            None => format!("local repository @ {branch}"),
        }
    }

    fn collect(&self) -> Result<Vec<CommitRecord>> {
        let repo = self.open()?;
        let tip = self.tip(&repo)?;

        let mut records = Vec::new();
        let mut seen: HashSet<ObjectId> = HashSet::new();
        let mut stack: VecDeque<ObjectId> = VecDeque::from([tip]);

        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        pb.set_message("Collecting commits...");

        while let Some(commit_id) = stack.pop_back() {
            if !seen.insert(commit_id) {
                continue;
            }

            let commit = repo.find_commit(commit_id)?;
            let secs = commit.time()?.seconds;
            let timestamp = DateTime::from_timestamp(secs, 0)
                .ok_or_else(|| PulseError::InvalidDate(format!("Invalid timestamp: {secs}")))?;

            let author = commit.author()?.name.to_string();
            // summary() trims the title's trailing newline.
            let message = commit.message()?.summary().to_string();

            records.push(CommitRecord {
                source: LOCAL_SOURCE.to_string(),
                timestamp,
                author: Some(author),
                message: Some(message),
            });

            for parent_id in commit.parent_ids() {
                stack.push_back(parent_id.into());
            }

            pb.inc(1);
        }

        pb.finish_with_message(format!("Collected {} commits", records.len()));
        Ok(records)
    }
}
