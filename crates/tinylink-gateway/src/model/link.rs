use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use tinylink_core::{CreateLinkParams, Link, LinkOverview};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateLinkRequest {
    #[serde(default)]
    pub long_url: String,
    /// An empty string is treated as "no custom code".
    #[serde(default)]
    pub code: Option<String>,
}

impl From<CreateLinkRequest> for CreateLinkParams {
    fn from(request: CreateLinkRequest) -> Self {
        CreateLinkParams {
            long_url: request.long_url,
            custom_code: request.code.filter(|code| !code.is_empty()),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkResponse {
    pub id: i64,
    pub short_code: String,
    /// The bare code, under the key older clients read it from.
    pub short_url: String,
    /// Full public URL of the short link.
    pub link: String,
    pub long_url: String,
    pub click_count: u64,
    pub click_history: Vec<Timestamp>,
    pub created_at: Timestamp,
}

impl LinkResponse {
    pub fn new(link: Link, base_url: &str) -> Self {
        Self {
            id: link.id.get(),
            link: link.short_code.to_url(base_url),
            short_url: link.short_code.to_string(),
            short_code: link.short_code.into(),
            long_url: link.long_url,
            click_count: link.click_count,
            click_history: link.click_history,
            created_at: link.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkSummaryResponse {
    #[serde(flatten)]
    pub link: LinkResponse,
    pub last_clicked: Option<Timestamp>,
}

impl LinkSummaryResponse {
    pub fn new(overview: LinkOverview, base_url: &str) -> Self {
        Self {
            last_clicked: overview.last_clicked,
            link: LinkResponse::new(overview.link, base_url),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DeleteLinkResponse {
    pub message: &'static str,
}
