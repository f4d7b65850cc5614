use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

use crate::error::DiscussError;
use crate::types::{DiscussionOrderField, OrderDirection};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Compact,
}

#[derive(Parser)]
#[command(name = "gh-discuss")]
#[command(about = "A CLI for GitHub Discussions", version)]
#[command(after_help = "EXAMPLES:
    gh-discuss list -R acme/core                  List recent discussions
    gh-discuss list -R acme/core --category-name Q&A --order-by updated-at --direction desc
    gh-discuss view -R acme/core 42               View a discussion
    gh-discuss create -R acme/core -t \"Title\" --category-name General
    gh-discuss comment -R acme/core 42 \"Thanks!\"  Add a comment")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (table, json, compact)
    #[arg(long, short = 'o', global = true, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Output as JSON (alias for --format json)
    #[arg(long, global = true, hide = true)]
    pub json: bool,

    /// Suppress success messages
    #[arg(long, short, global = true)]
    pub quiet: bool,

    /// Show debug logs and detailed error information
    #[arg(long, short, global = true)]
    pub verbose: bool,
}

impl Cli {
    /// Get the effective output format, considering --json flag
    pub fn output_format(&self) -> OutputFormat {
        if self.json {
            OutputFormat::Json
        } else {
            self.format
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// List discussions
    #[command(
        alias = "ls",
        after_help = "EXAMPLES:
    gh-discuss list --owner acme --repo core
    gh-discuss list -R acme/core --category-id DIC_kwDOA7 --first 10
    gh-discuss list -R acme/core --order-by created-at --direction asc
    gh-discuss list --owner acme                  Organization discussions (.github)"
    )]
    List(ListArgs),
    /// View a discussion
    #[command(after_help = "EXAMPLES:
    gh-discuss view -R acme/core 42")]
    View {
        #[command(flatten)]
        repo: RepoArgs,

        /// Discussion number
        number: u64,
    },
    /// Create a discussion
    #[command(after_help = "EXAMPLES:
    gh-discuss create -R acme/core -t \"RFC: new API\" -b \"Details\" --category-name Ideas")]
    Create(CreateArgs),
    /// Update a discussion
    #[command(after_help = "EXAMPLES:
    gh-discuss update -R acme/core 42 --title \"New title\"
    gh-discuss update -R acme/core 42 --category-name General")]
    Update(UpdateArgs),
    /// List comments on a discussion
    #[command(after_help = "EXAMPLES:
    gh-discuss comments -R acme/core 42
    gh-discuss comments -R acme/core 42 --first 50 --after Y3Vyc29y")]
    Comments {
        #[command(flatten)]
        repo: RepoArgs,

        /// Discussion number
        number: u64,

        #[command(flatten)]
        page: PageArgs,
    },
    /// Add a comment to a discussion
    #[command(after_help = "EXAMPLES:
    gh-discuss comment -R acme/core 42 \"This is a comment\"
    gh-discuss comment -R acme/core 42 \"Agreed\" --reply-to DC_kwDOA7")]
    Comment(CommentArgs),
    /// Edit a comment
    #[command(after_help = "EXAMPLES:
    gh-discuss edit-comment DC_kwDOA7 \"Updated text\"")]
    EditComment {
        /// Comment node id
        id: String,

        /// New comment body (markdown supported)
        body: String,
    },
    /// Delete a comment
    #[command(after_help = "EXAMPLES:
    gh-discuss delete-comment DC_kwDOA7")]
    DeleteComment {
        /// Comment node id
        id: String,
    },
    /// List discussion categories
    #[command(after_help = "EXAMPLES:
    gh-discuss categories -R acme/core
    gh-discuss categories --owner acme            Organization categories (.github)")]
    Categories {
        #[command(flatten)]
        repo: RepoArgs,
    },
    /// Generate shell completions
    #[command(after_help = "EXAMPLES:
    gh-discuss completions bash > ~/.bash_completion.d/gh-discuss
    gh-discuss completions zsh > ~/.zfunc/_gh-discuss
    gh-discuss completions fish > ~/.config/fish/completions/gh-discuss.fish")]
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
    /// Initialize configuration file interactively
    #[command(after_help = "EXAMPLES:
    gh-discuss init")]
    Init,
}

#[derive(Args, Clone, Debug, Default)]
pub struct RepoArgs {
    /// Repository owner (uses default_owner if not specified)
    #[arg(long)]
    pub owner: Option<String>,

    /// Repository name
    #[arg(long)]
    pub repo: Option<String>,

    /// Repository as OWNER/REPO
    #[arg(long = "repository", short = 'R', conflicts_with_all = ["owner", "repo"])]
    pub repository: Option<String>,
}

impl RepoArgs {
    /// Owner and repo as given, with `-R OWNER/REPO` split apart.
    pub fn parts(&self) -> crate::error::Result<(Option<String>, Option<String>)> {
        if let Some(full) = self.repository.as_deref() {
            return match full.split_once('/') {
                Some((owner, repo))
                    if !owner.is_empty() && !repo.is_empty() && !repo.contains('/') =>
                {
                    Ok((Some(owner.to_string()), Some(repo.to_string())))
                }
                _ => Err(DiscussError::InvalidArgument(format!(
                    "expected OWNER/REPO for --repository, got {full:?}"
                ))),
            };
        }
        if let Some(repo) = self.repo.as_deref().filter(|r| r.contains('/')) {
            return Err(DiscussError::InvalidArgument(format!(
                "--repo takes a repository name without its owner, got {repo:?}; use -R OWNER/REPO"
            )));
        }
        Ok((self.owner.clone(), self.repo.clone()))
    }
}

#[derive(Args, Clone, Debug, Default)]
pub struct PageArgs {
    /// Number of items to fetch (default: 30, max: 100)
    #[arg(long, allow_negative_numbers = true)]
    pub first: Option<i64>,

    /// Cursor to continue after (from a previous page)
    #[arg(long)]
    pub after: Option<String>,
}

#[derive(Args, Clone, Debug, Default)]
pub struct CategoryArgs {
    /// Category node id (wins over --category-name)
    #[arg(long)]
    pub category_id: Option<String>,

    /// Category name, matched ignoring case
    #[arg(long)]
    pub category_name: Option<String>,
}

#[derive(Args, Clone, Debug)]
pub struct ListArgs {
    #[command(flatten)]
    pub repo: RepoArgs,

    #[command(flatten)]
    pub category: CategoryArgs,

    /// Field to order by (requires --direction)
    #[arg(long, value_enum)]
    pub order_by: Option<DiscussionOrderField>,

    /// Order direction (requires --order-by)
    #[arg(long, value_enum)]
    pub direction: Option<OrderDirection>,

    #[command(flatten)]
    pub page: PageArgs,
}

#[derive(Args, Clone, Debug)]
pub struct CreateArgs {
    #[command(flatten)]
    pub repo: RepoArgs,

    /// Discussion title
    #[arg(long, short)]
    pub title: String,

    /// Discussion body (markdown supported)
    #[arg(long, short, default_value = "")]
    pub body: String,

    #[command(flatten)]
    pub category: CategoryArgs,
}

#[derive(Args, Clone, Debug)]
pub struct UpdateArgs {
    #[command(flatten)]
    pub repo: RepoArgs,

    /// Discussion number
    pub number: u64,

    /// New title
    #[arg(long, short)]
    pub title: Option<String>,

    /// New body
    #[arg(long, short)]
    pub body: Option<String>,

    #[command(flatten)]
    pub category: CategoryArgs,
}

#[derive(Args, Clone, Debug)]
pub struct CommentArgs {
    #[command(flatten)]
    pub repo: RepoArgs,

    /// Discussion number
    pub number: u64,

    /// Comment body (markdown supported)
    pub body: String,

    /// Comment node id to reply to
    #[arg(long)]
    pub reply_to: Option<String>,
}
