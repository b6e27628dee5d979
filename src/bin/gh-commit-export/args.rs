use clap::{crate_description, ArgAction, Args, Parser, ValueEnum};
use std::io::IsTerminal;
use std::path::PathBuf;
use url::Url;

const DEFAULT_OUTPUT: &str = "commits.txt";
const DEFAULT_AFFILIATION: &str = "owner,collaborator";

// -----------------------------------------------------------------------------
// command-line args
// -----------------------------------------------------------------------------
#[derive(Parser, Debug)]
#[command(
    name("gh-commit-export"),
    bin_name("gh-commit-export"),

    version,  // retrieved from Cargo.toml `version`
    about,    // retrieved from Cargo.toml `description`

    long_about = concat!(
        crate_description!(),
        "\n\n",
        "Every repository accessible to the authenticated user is listed, and for each of its ",
        "branches the commit history is written as indented text: the repository, then each ",
        "branch, then each run of consecutive commits by one author, then one line per commit ",
        "with its author date and message.",
    ),
)]
/// Export the commit history of accessible GitHub repositories to a text file
pub struct CommandLineArgs {
    #[command(flatten)]
    pub export_args: ExportArgs,

    #[command(flatten)]
    pub global_args: GlobalArgs,
}

impl CommandLineArgs {
    pub fn parse_args() -> Self {
        let mut args = Self::parse();

        // If `NO_COLOR` is set in the environment, disable colored output
        //
        // https://no-color.org/
        if std::env::var("NO_COLOR").is_ok() {
            args.global_args.color = Mode::Never
        }

        args
    }
}

// -----------------------------------------------------------------------------
// export options
// -----------------------------------------------------------------------------
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Authenticate to GitHub with the given personal access token
    ///
    /// The token needs read access to the repositories to be exported.
    #[arg(
        long,
        value_name = "TOKEN",
        env = "GITHUB_TOKEN",
        hide_env_values = true,
        display_order = 1
    )]
    pub token: Option<String>,

    /// Select repositories by the authenticated user's relationship to them
    ///
    /// This is a comma-separated list drawn from `owner`, `collaborator`, and
    /// `organization_member`. It is passed to GitHub as-is.
    #[arg(long, value_name = "ROLES", default_value = DEFAULT_AFFILIATION, display_order = 2)]
    pub affiliation: String,

    /// Write the report to PATH
    ///
    /// An existing file at PATH is overwritten.
    #[arg(long, short, value_name = "PATH", default_value = DEFAULT_OUTPUT, display_order = 3)]
    pub output: PathBuf,

    /// Use the specified URL for GitHub API access
    ///
    /// If accessing a GitHub Enterprise Server instance, this value should be the entire base URL
    /// including the `api/v3` portion, e.g., `https://github.example.com/api/v3`.
    #[arg(
        long,
        visible_alias = "github-api-url",
        value_name = "URL",
        default_value_t = Url::parse("https://api.github.com").expect("default API url should parse"),
        display_order = 10
    )]
    pub api_url: Url,

    /// Ignore validation of TLS certificates
    #[arg(long, display_order = 11)]
    pub ignore_certs: bool,
}

// -----------------------------------------------------------------------------
// global options
// -----------------------------------------------------------------------------
#[derive(Args, Debug)]
#[command(next_help_heading = "Global Options")]
pub struct GlobalArgs {
    /// Enable verbose output
    ///
    /// This can be repeated up to 3 times to enable successively more output.
    #[arg(global=true, long, short, action=ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-error feedback messages
    ///
    /// This silences progress output and WARNING level log messages.
    #[arg(global=true, long, short, conflicts_with="verbose")]
    pub quiet: bool,

    /// Enable or disable colored output
    ///
    /// When this is "auto", colors are enabled for stderr when it is a tty.
    ///
    /// If the `NO_COLOR` environment variable is set, it takes precedence and is equivalent to `--color=never`.
    #[arg(global=true, long, default_value_t=Mode::Auto, value_name="MODE")]
    pub color: Mode,
}

impl GlobalArgs {
    pub fn use_color<T: IsTerminal>(&self, out: T) -> bool {
        match self.color {
            Mode::Never => false,
            Mode::Always => true,
            Mode::Auto => out.is_terminal(),
        }
    }
}

/// A generic auto/never/always mode value
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
pub enum Mode {
    Auto,
    Never,
    Always,
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Mode::Auto => "auto",
            Mode::Never => "never",
            Mode::Always => "always",
        };
        write!(f, "{s}")
    }
}
