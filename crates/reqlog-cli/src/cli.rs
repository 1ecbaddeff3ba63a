//! Command-line definitions

use std::path::PathBuf;

use clap::{ArgGroup, Args, Parser, Subcommand, ValueHint};
use reqlog_db::Selector;
use reqlog_export::{Annotation, Category, JsonOptions};

use crate::export::{ExportOptions, RenderMode};
use crate::sink::OutputTarget;

/// Reqlog - inspect the API request log
#[derive(Parser, Debug)]
#[command(name = "reqlog")]
#[command(about = "Export logged API requests as JSON or curl commands", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Request log database URL
    #[arg(long, global = true, env = "REQLOG_DATABASE_URL")]
    pub database_url: Option<String>,

    /// API base URL that logged paths are relative to
    #[arg(long, global = true, env = "MOONSHOT_BASE_URL")]
    pub base_url: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true, default_value = "warn")]
    pub log_level: String,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Export a logged API request
    Export(ExportArgs),
}

#[derive(Args, Debug)]
#[command(group(
    ArgGroup::new("selector")
        .required(true)
        .multiple(true)
        .args(["id", "chatcmpl", "request_id"])
))]
pub struct ExportArgs {
    /// Row id
    #[arg(long)]
    pub id: Option<i64>,

    /// Completion id (chatcmpl-...)
    #[arg(long)]
    pub chatcmpl: Option<String>,

    /// Request id returned from the API
    #[arg(long = "requestid")]
    pub request_id: Option<String>,

    /// Output file path, or "stdout" / "stderr"
    #[arg(short, long, default_value = "stdout", value_hint = ValueHint::FilePath)]
    pub output: String,

    /// Output directory; the file name is derived from the record
    #[arg(long, conflicts_with_all = ["output", "curl"], value_hint = ValueHint::DirPath)]
    pub directory: Option<PathBuf>,

    /// Escape problematic HTML characters in JSON strings
    #[arg(long)]
    pub escape_html: bool,

    /// Mark a chat request as a good case
    #[arg(long, conflicts_with = "bad")]
    pub good: bool,

    /// Mark a chat request as a bad case
    #[arg(long)]
    pub bad: bool,

    /// Tag describing the case (repeatable, replaces existing tags)
    #[arg(long = "tag", value_name = "TAG")]
    pub tags: Vec<String>,

    /// Export a curl command instead of JSON
    #[arg(long)]
    pub curl: bool,
}

impl ExportArgs {
    /// Selected record, row id first, then completion id, then request id
    pub fn selector(&self) -> Option<Selector> {
        Selector::resolve(self.id, self.chatcmpl.clone(), self.request_id.clone())
    }

    pub fn category(&self) -> Option<Category> {
        match (self.good, self.bad) {
            (true, _) => Some(Category::GoodCase),
            (_, true) => Some(Category::BadCase),
            _ => None,
        }
    }

    pub fn mode(&self) -> RenderMode {
        if self.curl {
            RenderMode::Curl
        } else {
            RenderMode::Json(JsonOptions {
                escape_html: self.escape_html,
            })
        }
    }

    /// Build pipeline options; `None` when no selector was given
    pub fn into_options(self, base_url: String) -> Option<ExportOptions> {
        let selector = self.selector()?;
        let annotation = Annotation::new(self.category(), self.tags.clone());
        let mode = self.mode();
        let target = OutputTarget::from_args(&self.output, self.directory);

        Some(ExportOptions {
            selector,
            annotation,
            mode,
            target,
            base_url,
        })
    }
}
