//! Microsoft Graph group listing with `@odata.nextLink` pagination.

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, instrument};
use url::Url;

use super::pagination::PageSource;
use super::{Group, GroupPage};
use crate::error::{SyncError, SyncResult};

/// Largest `$top` the groups endpoint accepts.
pub const MAX_PAGE_SIZE: u32 = 300;

/// Fields requested on the initial query.
pub const SELECT_FIELDS: &str = "displayName,id";

/// Header enabling advanced query semantics on the initial query.
pub const CONSISTENCY_LEVEL_HEADER: &str = "ConsistencyLevel";

/// User agent sent with every directory request.
pub const USER_AGENT: &str = concat!("teamsync/", env!("CARGO_PKG_VERSION"));

/// `OData` error response from Microsoft Graph.
#[derive(Debug, Deserialize)]
struct ODataError {
    error: ODataErrorBody,
}

#[derive(Debug, Deserialize)]
struct ODataErrorBody {
    code: String,
    message: String,
}

/// One page of the `/groups` collection.
#[derive(Debug, Deserialize)]
struct ODataGroupPage {
    #[serde(default)]
    value: Vec<RawGroup>,
    #[serde(rename = "@odata.nextLink")]
    next_link: Option<String>,
}

/// A group record as returned by Graph; fields are optional on the wire.
#[derive(Debug, Deserialize)]
struct RawGroup {
    id: Option<String>,
    #[serde(rename = "displayName")]
    display_name: Option<String>,
}

impl RawGroup {
    fn into_group(self) -> SyncResult<Group> {
        let name = self
            .display_name
            .ok_or(SyncError::MissingField { field: "displayName" })?;
        let identifier = self.id.ok_or(SyncError::MissingField { field: "id" })?;
        Ok(Group { name, identifier })
    }
}

/// Authenticated Microsoft Graph client.
#[derive(Debug, Clone)]
pub struct GraphClient {
    http_client: reqwest::Client,
    groups_url: Url,
    token: String,
}

impl GraphClient {
    /// Creates a client for `graph_endpoint` (e.g. `https://graph.microsoft.com`)
    /// that authenticates with `token`.
    pub fn new(http_client: reqwest::Client, graph_endpoint: &str, token: String) -> SyncResult<Self> {
        let groups_url = Url::parse(&format!(
            "{}/v1.0/groups",
            graph_endpoint.trim_end_matches('/')
        ))?;

        Ok(Self {
            http_client,
            groups_url,
            token,
        })
    }

    /// URL of the initial query: selected fields and maximum page size.
    pub fn initial_url(&self) -> Url {
        let mut url = self.groups_url.clone();
        url.query_pairs_mut()
            .append_pair("$select", SELECT_FIELDS)
            .append_pair("$top", &MAX_PAGE_SIZE.to_string());
        url
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> SyncResult<GroupPage> {
        let response = request
            .bearer_auth(&self.token)
            .send()
            .await
            .map_err(|e| SyncError::fetch("request failed", e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let detail = match serde_json::from_str::<ODataError>(&body) {
                Ok(odata) => format!("{} - {}", odata.error.code, odata.error.message),
                Err(_) => body,
            };
            return Err(SyncError::Fetch(format!("HTTP {}: {}", status, detail)));
        }

        let page: ODataGroupPage = response
            .json()
            .await
            .map_err(|e| SyncError::fetch("invalid groups response", e))?;

        let groups = page
            .value
            .into_iter()
            .map(RawGroup::into_group)
            .collect::<SyncResult<Vec<_>>>()?;

        debug!(
            count = groups.len(),
            has_next = page.next_link.is_some(),
            "Received groups page"
        );

        Ok(GroupPage {
            groups,
            next_link: page.next_link,
        })
    }
}

#[async_trait]
impl PageSource for GraphClient {
    #[instrument(skip(self))]
    async fn first_page(&self) -> SyncResult<GroupPage> {
        let request = self
            .http_client
            .get(self.initial_url())
            .header(CONSISTENCY_LEVEL_HEADER, "eventual");
        self.send(request).await
    }

    #[instrument(skip(self))]
    async fn next_page(&self, next_link: &str) -> SyncResult<GroupPage> {
        self.send(self.http_client.get(next_link)).await
    }
}
