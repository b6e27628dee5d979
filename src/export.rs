use anyhow::{Context, Result};
use secrecy::SecretString;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use tracing::info;
use url::Url;

use crate::github::models::Repository;
use crate::github::{ClientBuilder, Enumerator};
use crate::report::ReportWriter;

// -------------------------------------------------------------------------------------------------
// ExportConfig
// -------------------------------------------------------------------------------------------------
/// Everything needed to run one export.
pub struct ExportConfig {
    /// GitHub personal access token
    pub token: SecretString,

    /// Comma-separated affiliation filter for the repository listing
    pub affiliation: String,

    /// The report file; it is truncated if it exists
    pub output: PathBuf,

    /// Base URL of the GitHub REST API
    pub api_url: Url,

    /// Skip TLS certificate validation
    pub ignore_certs: bool,

    /// Print progress lines to stdout
    pub show_progress: bool,
}

// -------------------------------------------------------------------------------------------------
// ExportStats
// -------------------------------------------------------------------------------------------------
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ExportStats {
    pub repositories: usize,
    pub branches: usize,
    pub commits: usize,
}

/// Run a complete export: enumerate repositories, then write the report for each one.
///
/// This is a high-level wrapper that handles the details of creating an async runtime and a
/// GitHub REST API client. Requests are issued strictly one at a time.
///
/// The output file is only created once the repository listing has succeeded. If a later
/// request fails, whatever was written before the failure stays in the file.
pub fn export_commits(config: ExportConfig) -> Result<ExportStats> {
    let ExportConfig {
        token,
        affiliation,
        output,
        api_url,
        ignore_certs,
        show_progress,
    } = config;

    let client = ClientBuilder::new()
        .base_url(api_url)
        .context("Failed to set GitHub API URL")?
        .personal_access_token(token)
        .ignore_certs(ignore_certs)
        .build()
        .context("Failed to initialize GitHub client")?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to initialize async runtime")?;

    runtime.block_on(async {
        let exporter = Exporter::new(Enumerator::new(&client), show_progress);
        let repos = exporter.repositories(&affiliation).await?;

        let file = File::create(&output)
            .with_context(|| format!("Failed to create output file {}", output.display()))?;
        let mut report = ReportWriter::new(BufWriter::new(file));

        let stats = exporter.export_repositories(&repos, &mut report).await?;
        report.flush().context("Failed to write report")?;
        Ok::<_, anyhow::Error>(stats)
    })
}

// -------------------------------------------------------------------------------------------------
// Exporter
// -------------------------------------------------------------------------------------------------
/// Walks repositories, branches, and commits in the order GitHub returns them, feeding a
/// `ReportWriter`.
pub struct Exporter<'c> {
    enumerator: Enumerator<'c>,
    show_progress: bool,
}

impl<'c> Exporter<'c> {
    pub fn new(enumerator: Enumerator<'c>, show_progress: bool) -> Self {
        Self {
            enumerator,
            show_progress,
        }
    }

    fn progress<T: std::fmt::Display>(&self, message: T) {
        if self.show_progress {
            println!("{message}");
        }
    }

    /// Enumerate the repositories to export.
    pub async fn repositories(&self, affiliation: &str) -> Result<Vec<Repository>> {
        self.progress("Fetching repositories...");
        let repos = self
            .enumerator
            .repositories(affiliation)
            .await
            .context("Failed to enumerate GitHub repositories")?;
        self.progress(format_args!("Found {} repos.", repos.len()));
        Ok(repos)
    }

    /// Write the report for each of the given repositories.
    ///
    /// The writer is flushed after each repository.
    pub async fn export_repositories<W: Write>(
        &self,
        repos: &[Repository],
        report: &mut ReportWriter<W>,
    ) -> Result<ExportStats> {
        let mut stats = ExportStats::default();

        for repo in repos {
            report.write_repository(repo).context("Failed to write report")?;
            self.progress(format_args!("Processing {repo}..."));

            let owner = repo.owner.login.as_str();
            let branches = self
                .enumerator
                .branches(owner, &repo.name)
                .await
                .with_context(|| format!("Failed to enumerate branches of {repo}"))?;

            for branch in &branches {
                report.write_branch(branch).context("Failed to write report")?;
                self.progress(format_args!("  Branch: {}", branch.name));

                let commits = self
                    .enumerator
                    .commits(owner, &repo.name, &branch.name)
                    .await
                    .with_context(|| {
                        format!("Failed to enumerate commits of {repo} branch {}", branch.name)
                    })?;
                report.write_commits(&commits).context("Failed to write report")?;

                stats.branches += 1;
                stats.commits += commits.len();
            }

            report.flush().context("Failed to write report")?;
            stats.repositories += 1;
        }

        info!(
            "Exported {} commits from {} branches of {} repositories",
            stats.commits, stats.branches, stats.repositories
        );
        Ok(stats)
    }
}
