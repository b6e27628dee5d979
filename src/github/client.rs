use reqwest::{header, Url};
use secrecy::ExposeSecret;
use serde::de::DeserializeOwned;
use tracing::{debug, trace};

use super::models::{Branch, Commit, Repository};
use super::{Auth, ClientBuilder, Error, Result};

// -------------------------------------------------------------------------------------------------
// Client
// -------------------------------------------------------------------------------------------------
pub struct Client {
    pub(super) base_url: Url,
    pub(super) inner: reqwest::Client,
    pub(super) auth: Auth,
}

const MAX_PER_PAGE: (&str, &str) = ("per_page", "100");

/// The media type requested for every response
const ACCEPT_V3_JSON: &str = "application/vnd.github.v3+json";

impl Client {
    pub fn new() -> Result<Self> {
        ClientBuilder::new().build()
    }

    /// List the repositories accessible to the authenticated user with the given affiliation.
    ///
    /// `affiliation` is a comma-separated list such as `owner,collaborator`, passed through as-is.
    pub async fn get_user_repos(&self, affiliation: &str) -> Result<Vec<Repository>> {
        self.get_all_pages(&["user", "repos"], &[("affiliation", affiliation)])
            .await
    }

    pub async fn get_repo_branches(&self, owner: &str, repo: &str) -> Result<Vec<Branch>> {
        self.get_all_pages(&["repos", owner, repo, "branches"], &[])
            .await
    }

    /// List the commits reachable from `branch`, in the order GitHub returns them.
    pub async fn get_repo_commits(
        &self,
        owner: &str,
        repo: &str,
        branch: &str,
    ) -> Result<Vec<Commit>> {
        self.get_all_pages(&["repos", owner, repo, "commits"], &[("sha", branch)])
            .await
    }

    /// Fetch every page of a listing endpoint and concatenate the results.
    ///
    /// Pages are requested one at a time starting from page 1, until a page comes back empty.
    /// Any failed request fails the whole fetch.
    pub async fn get_all_pages<T>(
        &self,
        path_parts: &[&str],
        params: &[(&str, &str)],
    ) -> Result<Vec<T>>
    where
        T: DeserializeOwned,
    {
        let mut items = Vec::new();
        let mut page: u32 = 1;
        loop {
            let page_items: Vec<T> = self.get_page(path_parts, params, page).await?;
            trace!("Page {page} of /{} had {} items", path_parts.join("/"), page_items.len());
            if page_items.is_empty() {
                break;
            }
            items.extend(page_items);
            page += 1;
        }
        Ok(items)
    }

    /// Fetch a single 1-based page of a listing endpoint.
    pub async fn get_page<T>(
        &self,
        path_parts: &[&str],
        params: &[(&str, &str)],
        page: u32,
    ) -> Result<Vec<T>>
    where
        T: DeserializeOwned,
    {
        let page = page.to_string();
        let mut page_params: Vec<(&str, &str)> = params.to_vec();
        page_params.push(MAX_PER_PAGE);
        page_params.push(("page", page.as_str()));

        let response = self.get_with_params(path_parts, &page_params).await?;
        let body = response.json().await?;
        Ok(body)
    }
}

// private implementation
impl Client {
    /// Construct a `Url` from the given path parts and query parameters.
    ///
    /// The path parts are appended to any path the base URL already has, so that a GitHub
    /// Enterprise base like `https://github.example.com/api/v3` works.
    fn make_url(&self, path_parts: &[&str], params: &[(&str, &str)]) -> Result<Url> {
        let mut url = self.base_url.clone();
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| Error::UrlBaseError(self.base_url.clone()))?;
            segments.pop_if_empty();
            for p in path_parts {
                if p.contains('/') {
                    return Err(Error::UrlSlashError(p.to_string()));
                }
                segments.push(p);
            }
        }
        if !params.is_empty() {
            url.query_pairs_mut().extend_pairs(params);
        }
        Ok(url)
    }

    async fn get_with_params(
        &self,
        path_parts: &[&str],
        params: &[(&str, &str)],
    ) -> Result<reqwest::Response> {
        let url = self.make_url(path_parts, params)?;
        self.get_url(url).await
    }

    async fn get_url(&self, url: Url) -> Result<reqwest::Response> {
        debug!("GET {url}");

        // build request, handling authentication if any
        let request_builder = self.inner.get(url).header(header::ACCEPT, ACCEPT_V3_JSON);
        let request_builder = match &self.auth {
            Auth::PersonalAccessToken(token) => request_builder.bearer_auth(token.expose_secret()),
            Auth::Unauthenticated => request_builder,
        };

        // send request and wait for response
        let response = request_builder.send().await?;
        Ok(response.error_for_status()?)
    }
}
