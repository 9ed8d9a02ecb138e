use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;
use syllabuzz_models::InteractionKind;

use crate::output::OutputFormat;

#[derive(Parser)]
#[command(name = "syllabuzz")]
#[command(version, about = "Syllabuzz - computer science news and papers, curated by module")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Base API url (defaults to http://127.0.0.1:5000/api)
    #[arg(long, global = true, env = "SYLLABUZZ_API_URL")]
    pub api_url: Option<String>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },

    /// Log in to your account
    Login(LoginArgs),

    /// Log out and forget the stored credential
    Logout,

    /// Create an account
    Signup(SignupArgs),

    /// Show the logged-in user
    Whoami,

    /// Request a password reset email
    ForgotPassword { email: String },

    /// Set a new password with a reset token
    ResetPassword {
        token: String,
        /// New password (prompted when omitted)
        #[arg(long)]
        password: Option<String>,
    },

    /// Check whether a reset token is still valid
    VerifyToken { token: String },

    /// List modules
    Modules,

    /// Show a module
    Module {
        id: String,
        /// Also list recommended articles for the module
        #[arg(long)]
        recommendations: bool,
    },

    /// List articles
    Articles(ArticlesArgs),

    /// Articles matched to your modules
    Relevant(PageArgs),

    /// Trending articles
    Trending {
        /// Window in days
        #[arg(long)]
        days: Option<u32>,
        #[arg(long)]
        limit: Option<u32>,
    },

    /// Search articles
    Search {
        query: String,
        #[arg(long)]
        limit: Option<u32>,
        #[arg(long)]
        skip: Option<u32>,
    },

    /// Personal recommendations
    Recommended {
        #[arg(long)]
        limit: Option<u32>,
    },

    /// Your saved articles
    Bookmarks {
        /// Load this many pages
        #[arg(long, default_value_t = 1)]
        page: u32,
    },

    /// Save or unsave an article
    Bookmark(ToggleArgs),

    /// Like or unlike an article
    Like(ToggleArgs),

    /// Star or unstar a module
    Star {
        module_id: String,
    },

    /// Your starred modules
    Starred,

    /// Show whether you bookmarked, liked or starred something
    Status {
        kind: InteractionKind,
        id: String,
    },

    /// Show an article and record the view
    Open {
        article_id: String,
        /// Module the article was found under
        #[arg(long)]
        module: Option<String>,
    },
}

#[derive(Args)]
pub struct LoginArgs {
    /// Email address (prompted when omitted)
    #[arg(long)]
    pub email: Option<String>,

    /// Password (prompted when omitted)
    #[arg(long)]
    pub password: Option<String>,
}

#[derive(Args)]
pub struct SignupArgs {
    #[arg(long)]
    pub name: String,

    #[arg(long)]
    pub email: String,

    /// Password (prompted when omitted)
    #[arg(long)]
    pub password: Option<String>,

    /// Agree to the terms and conditions
    #[arg(long)]
    pub accept_terms: bool,
}

#[derive(Args)]
pub struct ArticlesArgs {
    /// Module code or category
    #[arg(long)]
    pub category: Option<String>,

    #[arg(long)]
    pub limit: Option<u32>,

    #[arg(long)]
    pub skip: Option<u32>,
}

#[derive(Args)]
pub struct PageArgs {
    #[arg(long, default_value_t = 10)]
    pub limit: u32,

    /// Zero-based page
    #[arg(long, default_value_t = 0)]
    pub page: u32,
}

#[derive(Args)]
pub struct ToggleArgs {
    pub article_id: String,

    /// Module the article was found under
    #[arg(long)]
    pub module: Option<String>,
}

impl Commands {
    /// Path of the equivalent web view, used as the post-login destination.
    pub fn view_path(&self) -> String {
        match self {
            Commands::Bookmarks { .. } => "/bookmarks".to_string(),
            Commands::Starred => "/starred".to_string(),
            Commands::Recommended { .. } => "/recommendations".to_string(),
            Commands::Whoami => "/profile".to_string(),
            Commands::Module { id, .. } => format!("/modules/{id}"),
            Commands::Open { article_id, .. } => format!("/articles/{article_id}"),
            _ => "/".to_string(),
        }
    }
}
