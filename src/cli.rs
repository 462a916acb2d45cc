use crate::builder::SourceOptions;
use crate::model::RecordKind;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "cf-docs-mcp")]
#[command(about = "Serve Cute Framework documentation to AI assistants", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Cute Framework include/ directory
    #[arg(long, global = true, env = "CF_HEADERS_PATH")]
    pub root: Option<String>,

    /// Fetch the Cute Framework sources from GitHub instead of reading a local checkout
    #[arg(long, global = true, env = "CF_DOWNLOAD")]
    pub download: bool,

    /// Where downloaded sources are cached
    #[arg(long, global = true, env = "CF_CACHE_DIR")]
    pub cache_dir: Option<PathBuf>,

    /// Emit logs as JSON lines
    #[arg(long, global = true, env = "CF_LOG_JSON")]
    pub log_json: bool,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Serve MCP over stdio (default)
    Stdio,
    /// Run one search and print the result
    Search {
        query: String,
        #[arg(short = 't', long = "type", value_enum)]
        kind: Option<KindArg>,
        #[arg(short, long)]
        category: Option<String>,
        #[arg(short = 'n', long, default_value = "20")]
        limit: usize,
    },
    /// Print index statistics as JSON
    Stats,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum KindArg {
    Function,
    Struct,
    Enum,
    Topic,
}

impl From<KindArg> for RecordKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Function => Self::Function,
            KindArg::Struct => Self::Struct,
            KindArg::Enum => Self::Enum,
            KindArg::Topic => Self::Topic,
        }
    }
}

impl Cli {
    pub fn source_options(&self) -> SourceOptions {
        SourceOptions {
            root: self.root.clone().filter(|r| !r.trim().is_empty()),
            download: self.download,
            cache_dir: self.cache_dir.clone(),
        }
    }

    /// The subcommand to run, `stdio` when none was given.
    pub fn command(&self) -> Commands {
        self.command.clone().unwrap_or(Commands::Stdio)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert2::{check, let_assert};

    #[test]
    fn defaults_to_stdio() {
        let cli = Cli::parse_from(["cf-docs-mcp"]);
        let_assert!(Commands::Stdio = cli.command());
    }

    #[test]
    fn search_arguments() {
        let cli = Cli::parse_from([
            "cf-docs-mcp",
            "search",
            "sprite",
            "--type",
            "struct",
            "-n",
            "5",
            "--root",
            "/tmp/include",
        ]);
        let_assert!(
            Commands::Search {
                query,
                kind,
                category,
                limit
            } = cli.command()
        );
        check!(query == "sprite");
        check!(kind == Some(KindArg::Struct));
        check!(category.is_none());
        check!(limit == 5);
        check!(cli.source_options().root.as_deref() == Some("/tmp/include"));
    }

    #[test]
    fn blank_root_is_ignored() {
        let cli = Cli::parse_from(["cf-docs-mcp", "--root", " ", "stats"]);
        check!(cli.source_options().root.is_none());
    }

    #[test]
    fn kind_arg_converts() {
        check!(RecordKind::from(KindArg::Enum) == RecordKind::Enum);
    }
}
