use anyhow::Result;
use secrecy::SecretString;
use tracing::{debug, info};

use crate::args::{ExportArgs, GlobalArgs};
use gh_commit_export::export::{export_commits, ExportConfig};

/// No GitHub token was given on the command line or in the environment.
#[derive(Debug)]
pub struct MissingToken;

impl std::fmt::Display for MissingToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "GitHub token not provided. Use --token or set GITHUB_TOKEN env var.")
    }
}

impl std::error::Error for MissingToken {}

pub fn run(global_args: &GlobalArgs, args: &ExportArgs) -> Result<()> {
    let token = match args.token.as_deref() {
        Some(token) if !token.is_empty() => SecretString::new(token.to_string()),
        _ => return Err(MissingToken.into()),
    };

    debug!("Exporting from {} with affiliation {:?}", args.api_url, args.affiliation);

    let show_progress = !global_args.quiet;
    let stats = export_commits(ExportConfig {
        token,
        affiliation: args.affiliation.clone(),
        output: args.output.clone(),
        api_url: args.api_url.clone(),
        ignore_certs: args.ignore_certs,
        show_progress,
    })?;

    info!("{stats:?}");
    if show_progress {
        println!("All commits written to {}", args.output.display());
    }
    Ok(())
}
