//! Integration Test Utilities and Common Code

#![allow(dead_code)]

use axum::extract::State;
use axum::http::{header, HeaderMap, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::{Json, Router};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

pub use assert_cmd::prelude::*;
pub use assert_fs::prelude::*;
pub use assert_fs::{fixture::ChildPath, TempDir};
pub use predicates::prelude::*;
pub use predicates::str::RegexPredicate;
pub use pretty_assertions::{assert_eq, assert_ne};
pub use std::path::Path;
pub use std::process::Command;

/// The token that the fake GitHub accepts
pub const TEST_TOKEN: &str = "ghp_test_token";

/// Build a `Command` for the `gh-commit-export` crate binary with variadic command-line arguments.
///
/// The arguments can be anything that is allowed by `Command::arg`.
/// `GITHUB_TOKEN` and `GCE_LOG` are cleared from the environment of the command.
#[macro_export]
macro_rules! gh_commit_export {
    ( $( $arg:expr ),* ) => {
        {
            let mut cmd = gh_commit_export_cmd();
            $(
                cmd.arg($arg);
            )*
            cmd
        }
    }
}

/// Get the command for the binary under test.
///
/// By default, this is the binary defined in this crate.
/// However, if the `GCE_TEST_PROGRAM` environment variable is set, its value is used instead.
pub fn gh_commit_export_cmd() -> Command {
    let mut cmd = if let Ok(p) = std::env::var("GCE_TEST_PROGRAM") {
        Command::new(p)
    } else {
        Command::cargo_bin("gh-commit-export").expect("gh-commit-export should be executable")
    };
    cmd.env_remove("GITHUB_TOKEN").env_remove("GCE_LOG");
    cmd
}

/// Create a `RegexPredicate` from the given pattern.
pub fn is_match(pat: &str) -> RegexPredicate {
    predicates::str::is_match(pat).expect("pattern should compile")
}

// -------------------------------------------------------------------------------------------------
// fake GitHub data
// -------------------------------------------------------------------------------------------------
pub fn repo_json(owner: &str, name: &str) -> Value {
    json!({
        "id": 1,
        "name": name,
        "full_name": format!("{owner}/{name}"),
        "private": false,
        "owner": { "login": owner, "id": 2, "type": "User" },
    })
}

pub fn branch_json(name: &str) -> Value {
    json!({
        "name": name,
        "commit": { "sha": "c5b97d5ae6c19d5c5df71a34c7fbeeda2479ccbc" },
        "protected": false,
    })
}

pub fn commit_json(author: &str, date: &str, message: &str) -> Value {
    json!({
        "sha": "6dcb09b5b57875f334f61aebed695e2e4193db5e",
        "commit": {
            "author": { "name": author, "email": "someone@example.com", "date": date },
            "committer": { "name": author, "email": "someone@example.com", "date": date },
            "message": message,
        },
        "author": null,
    })
}

/// The repositories, branches, and commits that a `FakeGitHub` serves.
#[derive(Clone, Default)]
pub struct FakeGitHubData {
    pub repos: Vec<Value>,

    /// Keyed by `owner/repo`
    pub branches: HashMap<String, Vec<Value>>,

    /// Keyed by (`owner/repo`, branch name)
    pub commits: HashMap<(String, String), Vec<Value>>,

    /// Request paths that are answered with the given status instead of data
    pub failures: HashMap<String, StatusCode>,
}

impl FakeGitHubData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn repo(mut self, owner: &str, name: &str) -> Self {
        self.repos.push(repo_json(owner, name));
        self
    }

    pub fn branch(mut self, repo: &str, name: &str) -> Self {
        self.branches
            .entry(repo.to_string())
            .or_default()
            .push(branch_json(name));
        self
    }

    pub fn commit(mut self, repo: &str, branch: &str, author: &str, date: &str, message: &str) -> Self {
        self.commits
            .entry((repo.to_string(), branch.to_string()))
            .or_default()
            .push(commit_json(author, date, message));
        self
    }

    pub fn failure(mut self, path: &str, status: StatusCode) -> Self {
        self.failures.insert(path.to_string(), status);
        self
    }

    /// The `acme/widget` repository with a `main` branch holding two commits by Alice.
    pub fn acme_widget() -> Self {
        Self::new()
            .repo("acme", "widget")
            .branch("acme/widget", "main")
            .commit("acme/widget", "main", "Alice", "2024-01-01T00:00:00Z", "init")
            .commit("acme/widget", "main", "Alice", "2024-01-02T00:00:00Z", "fix")
    }
}

// -------------------------------------------------------------------------------------------------
// fake GitHub server
// -------------------------------------------------------------------------------------------------
/// A request received by a `FakeGitHub`.
#[derive(Clone, Debug)]
pub struct RecordedRequest {
    pub path: String,
    pub query: Vec<(String, String)>,
    pub authorization: Option<String>,
    pub accept: Option<String>,
    pub user_agent: Option<String>,
}

impl RecordedRequest {
    pub fn param(&self, name: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
}

struct FakeState {
    data: FakeGitHubData,
    requests: Mutex<Vec<RecordedRequest>>,
}

/// An in-process HTTP server that answers the GitHub REST API listing endpoints used by the
/// export, with GitHub's page-number pagination.
#[derive(Clone)]
pub struct FakeGitHub {
    pub url: String,
    state: Arc<FakeState>,
}

impl FakeGitHub {
    /// Start serving on an ephemeral localhost port from within the current tokio runtime.
    pub async fn start(data: FakeGitHubData) -> Self {
        let state = Arc::new(FakeState {
            data,
            requests: Mutex::new(Vec::new()),
        });
        let app = Router::new().fallback(handle).with_state(state.clone());
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("should be able to bind to an ephemeral port");
        let addr = listener.local_addr().expect("listener should have a local address");
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("fake GitHub should serve");
        });
        Self {
            url: format!("http://{addr}"),
            state,
        }
    }

    /// Start serving from a background thread with its own runtime, for tests that are not
    /// themselves async.
    pub fn start_in_background(data: FakeGitHubData) -> Self {
        let (tx, rx) = std::sync::mpsc::channel();
        std::thread::spawn(move || {
            let runtime = tokio::runtime::Builder::new_multi_thread()
                .worker_threads(1)
                .enable_all()
                .build()
                .expect("should be able to build a runtime");
            runtime.block_on(async move {
                let server = FakeGitHub::start(data).await;
                tx.send(server).expect("should be able to hand off the server");
                std::future::pending::<()>().await;
            });
        });
        rx.recv().expect("fake GitHub should start")
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.requests.lock().unwrap().clone()
    }

    /// The requests made to the given path, in order.
    pub fn requests_to(&self, path: &str) -> Vec<RecordedRequest> {
        self.requests().into_iter().filter(|r| r.path == path).collect()
    }
}

async fn handle(State(state): State<Arc<FakeState>>, uri: Uri, headers: HeaderMap) -> Response {
    let header_value = |name: header::HeaderName| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(String::from)
    };

    let url = url::Url::parse(&format!("http://localhost{uri}")).expect("request URI should parse");
    let request = RecordedRequest {
        path: url.path().to_string(),
        query: url.query_pairs().into_owned().collect(),
        authorization: header_value(header::AUTHORIZATION),
        accept: header_value(header::ACCEPT),
        user_agent: header_value(header::USER_AGENT),
    };
    state.requests.lock().unwrap().push(request.clone());

    if request.authorization.as_deref() != Some(format!("Bearer {TEST_TOKEN}").as_str()) {
        return error_response(StatusCode::UNAUTHORIZED, "Bad credentials");
    }

    if let Some(status) = state.data.failures.get(&request.path) {
        return error_response(*status, "Server Error");
    }

    let segments: Vec<&str> = request.path.trim_start_matches('/').split('/').collect();
    let empty = Vec::new();
    let items = match segments.as_slice() {
        ["user", "repos"] => &state.data.repos,
        ["repos", owner, repo, "branches"] => state
            .data
            .branches
            .get(&format!("{owner}/{repo}"))
            .unwrap_or(&empty),
        ["repos", owner, repo, "commits"] => {
            let Some(sha) = request.param("sha") else {
                return error_response(StatusCode::BAD_REQUEST, "sha is required by this fake");
            };
            state
                .data
                .commits
                .get(&(format!("{owner}/{repo}"), sha.to_string()))
                .unwrap_or(&empty)
        }
        _ => return error_response(StatusCode::NOT_FOUND, "Not Found"),
    };

    let per_page: usize = request
        .param("per_page")
        .and_then(|v| v.parse().ok())
        .unwrap_or(30);
    let page: usize = request
        .param("page")
        .and_then(|v| v.parse().ok())
        .unwrap_or(1);
    let page_items: Vec<Value> = items
        .iter()
        .skip(page.saturating_sub(1) * per_page)
        .take(per_page)
        .cloned()
        .collect();

    Json(page_items).into_response()
}

fn error_response(status: StatusCode, message: &str) -> Response {
    let body = json!({
        "message": message,
        "documentation_url": "https://docs.github.com/rest",
    });
    (status, Json(body)).into_response()
}
