use std::io::Write;

use crate::github::models::{Branch, Commit, Repository};

/// How an absent author name or date is rendered
pub const NULL_FIELD: &str = "None";

const BRANCH_INDENT: &str = "    ";
const AUTHOR_INDENT: &str = "        ";
const COMMIT_INDENT: &str = "            ";

// -------------------------------------------------------------------------------------------------
// ReportWriter
// -------------------------------------------------------------------------------------------------
/// Writes the indented commit history report.
///
/// Each repository is a line at the left margin, each of its branches is indented by 4 spaces,
/// each run of consecutive commits by the same author gets an author line indented by 8 spaces,
/// and each commit is a `<date> <message>` line indented by 12 spaces.
pub struct ReportWriter<W: Write> {
    writer: W,
}

impl<W: Write> ReportWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn write_repository(&mut self, repo: &Repository) -> std::io::Result<()> {
        writeln!(self.writer, "{repo}")
    }

    pub fn write_branch(&mut self, branch: &Branch) -> std::io::Result<()> {
        writeln!(self.writer, "{BRANCH_INDENT}{}", branch.name)
    }

    /// Write the commits of one branch, in the given order.
    ///
    /// An author line is written whenever the author name differs from the previous commit's.
    /// The first commit always gets one, so author runs never continue across branches.
    pub fn write_commits(&mut self, commits: &[Commit]) -> std::io::Result<()> {
        // `None` until the first commit; a null author name is its own value
        let mut last_author: Option<Option<&str>> = None;

        for commit in commits {
            let author = commit.author_name();
            if last_author != Some(author) {
                writeln!(self.writer, "{AUTHOR_INDENT}{}", author.unwrap_or(NULL_FIELD))?;
                last_author = Some(author);
            }

            let date = commit.author_date().unwrap_or(NULL_FIELD);
            let message = single_line(commit.message());
            writeln!(self.writer, "{COMMIT_INDENT}{date} {message}")?;
        }
        Ok(())
    }

    pub fn flush(&mut self) -> std::io::Result<()> {
        self.writer.flush()
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

/// Collapse every line break (`\r\n`, `\n`, or `\r`) in a commit message to a single space.
pub fn single_line(message: &str) -> String {
    message.replace("\r\n", " ").replace(['\n', '\r'], " ")
}
