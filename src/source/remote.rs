use chrono::{DateTime, Utc};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Deserialize;

use crate::error::{PulseError, Result};
use crate::model::CommitRecord;
use crate::source::HistorySource;

pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Status GitHub returns for commit listings of a repository with no commits.
pub const STATUS_EMPTY_REPO: u16 = 409;

pub const PAGE_SIZE: u32 = 100;

#[derive(Debug, Clone)]
pub struct RemoteCommit {
    pub timestamp: DateTime<Utc>,
    pub author: Option<String>,
    pub message: Option<String>,
}

#[derive(Debug)]
pub enum CommitPage {
    Commits(Vec<RemoteCommit>),
    /// The repository has no commits at all. Not an error.
    EmptyRepository,
}

/// Listing calls of the hosting API, behind a trait so the pagination
/// loop can be driven without a network.
pub trait CommitLister {
    fn repo_names(&self) -> Result<Vec<String>>;

    /// Pages start at 1; an empty page means the listing is done.
    fn commit_page(&self, repo: &str, page: u32) -> Result<CommitPage>;
}

pub struct GithubApi {
    agent: ureq::Agent,
    api_url: String,
    org: String,
    token: String,
    author: Option<String>,
}

impl GithubApi {
    pub fn new(
        api_url: impl Into<String>,
        org: impl Into<String>,
        token: impl Into<String>,
        author: Option<String>,
    ) -> Self {
        Self {
            agent: ureq::agent(),
            api_url: api_url.into().trim_end_matches('/').to_string(),
            org: org.into(),
            token: token.into(),
            author,
        }
    }

    fn request(&self, path: &str, page: u32) -> ureq::Request {
        let url = format!("{}{path}", self.api_url);
        self.agent
            .get(&url)
            .set("Authorization", &format!("Bearer {}", self.token))
            .set("Accept", "application/vnd.github+json")
            .set("User-Agent", concat!("gitpulse/", env!("CARGO_PKG_VERSION")))
            .query("per_page", &PAGE_SIZE.to_string())
            .query("page", &page.to_string())
    }
}

impl CommitLister for GithubApi {
    fn repo_names(&self) -> Result<Vec<String>> {
        let mut names = Vec::new();
        let mut page = 1u32;
        loop {
            let response = self
                .request(&format!("/orgs/{}/repos", self.org), page)
                .call()?;
            let batch: Vec<RepoEntry> = response.into_json()?;
            if batch.is_empty() {
                break;
            }
            names.extend(batch.into_iter().map(|repo| repo.name));
            page += 1;
        }
        Ok(names)
    }

    fn commit_page(&self, repo: &str, page: u32) -> Result<CommitPage> {
        let mut request = self.request(&format!("/repos/{}/{repo}/commits", self.org), page);
        if let Some(author) = &self.author {
            request = request.query("author", author);
        }

        match request.call() {
            Ok(response) => {
                let batch: Vec<CommitEntry> = response.into_json()?;
                Ok(CommitPage::Commits(
                    batch.into_iter().filter_map(CommitEntry::into_commit).collect(),
                ))
            }
            Err(ureq::Error::Status(STATUS_EMPTY_REPO, _)) => Ok(CommitPage::EmptyRepository),
            Err(err) => Err(err.into()),
        }
    }
}

#[derive(Debug, Deserialize)]
struct RepoEntry {
    name: String,
}

#[derive(Debug, Deserialize)]
struct CommitEntry {
    commit: CommitDetail,
}

#[derive(Debug, Deserialize)]
struct CommitDetail {
    author: Option<Signature>,
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Signature {
    name: Option<String>,
    date: Option<DateTime<Utc>>,
}

impl CommitEntry {
    /// Payloads without an author date cannot be bucketed and are dropped.
    fn into_commit(self) -> Option<RemoteCommit> {
        let author = self.commit.author?;
        Some(RemoteCommit {
            timestamp: author.date?,
            author: author.name,
            message: self.commit.message,
        })
    }
}

pub struct RemoteHistory<L> {
    lister: L,
    org: String,
}

impl<L: CommitLister> RemoteHistory<L> {
    pub fn new(lister: L, org: impl Into<String>) -> Self {
        Self {
            lister,
            org: org.into(),
        }
    }

    /// An empty-repository reply or a failed page stops this repository
    /// only; pages gathered before the failure are kept.
    fn collect_repo(&self, repo: &str, records: &mut Vec<CommitRecord>, pb: &ProgressBar) {
        let mut page = 1u32;
        loop {
            match self.lister.commit_page(repo, page) {
                Ok(CommitPage::Commits(batch)) => {
                    if batch.is_empty() {
                        break;
                    }
                    records.extend(batch.into_iter().map(|commit| CommitRecord {
                        source: repo.to_string(),
                        timestamp: commit.timestamp,
                        author: commit.author,
                        message: commit.message,
                    }));
                    page += 1;
                }
                Ok(CommitPage::EmptyRepository) => {
                    pb.println(format!("Repository {repo} is empty."));
                    break;
                }
                Err(err) => {
                    pb.println(format!(
                        "{} Failed to fetch commits for {repo}: {err}",
                        style("warning:").yellow().bold()
                    ));
                    break;
                }
            }
        }
    }
}

impl<L: CommitLister> HistorySource for RemoteHistory<L> {
    fn label(&self) -> String {
        format!("organization {}", self.org)
    }

    fn collect(&self) -> Result<Vec<CommitRecord>> {
        let repos = self.lister.repo_names()?;
        if repos.is_empty() {
            return Err(PulseError::NoRepositories(self.org.clone()));
        }

        let pb = ProgressBar::new(repos.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("[{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );

        let mut records = Vec::new();
        for repo in &repos {
            pb.set_message(format!("Fetching commits: {repo}"));
            self.collect_repo(repo, &mut records, &pb);
            pb.inc(1);
        }
        pb.finish_with_message(format!(
            "Fetched {} commits from {} repositories",
            records.len(),
            repos.len()
        ));

        Ok(records)
    }
}
