mod health;
mod link;

pub use health::HealthResponse;
pub use link::{CreateLinkRequest, DeleteLinkResponse, LinkResponse, LinkSummaryResponse};
