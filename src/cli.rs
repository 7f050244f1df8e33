use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::chart::ChartStyle;
use crate::pipeline::{self, RenderOptions};
use crate::source::remote::DEFAULT_API_URL;
use crate::source::{GithubApi, LocalHistory, RemoteHistory};

#[derive(Parser)]
#[command(name = "gitpulse")]
#[command(about = "Animated 3D chart of commit activity from a local repository or a GitHub organization")]
#[command(version)]
pub struct Cli {
    #[clap(flatten)]
    pub common: CommonArgs,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Args, Clone)]
pub struct CommonArgs {
    #[arg(long, value_enum, help = "Chart style", default_value = "bar")]
    pub style: ChartStyle,

    #[arg(long, help = "Write the chart to this path instead of the temp directory")]
    pub output: Option<PathBuf>,

    #[arg(long, help = "Do not open the chart in a browser")]
    pub no_open: bool,

    #[arg(long, help = "Chart title")]
    pub title: Option<String>,

    #[arg(long, help = "Output date buckets as JSON instead of a chart")]
    pub json: bool,

    #[arg(long, help = "Output date buckets as NDJSON instead of a chart", conflicts_with = "json")]
    pub ndjson: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    Local {
        #[arg(long, help = "Path to git repository")]
        repo: Option<PathBuf>,

        #[arg(long, help = "Branch to walk instead of HEAD")]
        branch: Option<String>,
    },
    Remote {
        #[arg(long, help = "Organization whose repositories are scanned")]
        org: String,

        #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true, help = "API token")]
        token: String,

        #[arg(long, help = "Only count commits authored by this login")]
        author: Option<String>,

        #[arg(long, help = "Base URL of the hosting API", default_value = DEFAULT_API_URL)]
        api_url: String,
    },
}

impl Cli {
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    pub fn execute(self) -> Result<()> {
        let options = RenderOptions {
            style: self.common.style,
            output: self.common.output,
            no_open: self.common.no_open,
            title: self.common.title,
            json: self.common.json,
            ndjson: self.common.ndjson,
        };

        match self.command {
            Commands::Local { repo, branch } => {
                let source = LocalHistory::new(repo, branch);
                pipeline::exec(&source, &options)
            }
            Commands::Remote { org, token, author, api_url } => {
                let api = GithubApi::new(api_url, org.clone(), token, author);
                let source = RemoteHistory::new(api, org);
                pipeline::exec(&source, &options)
            }
        }
    }
}
