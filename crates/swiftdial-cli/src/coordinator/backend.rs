//! Backend port for the session coordinator
//!
//! The coordinator talks to the calling backend through this trait so the
//! polling and state logic can be exercised against a recording fake.

use crate::api::{ApiClient, ApiResult};
use async_trait::async_trait;
use swiftdial_types::{CampaignStats, Contact, LogEntry};

#[async_trait]
pub trait CampaignBackend: Send + Sync {
    async fn fetch_stats(&self, campaign_id: &str) -> ApiResult<CampaignStats>;
    async fn fetch_logs(&self, campaign_id: &str) -> ApiResult<Vec<LogEntry>>;
    async fn fetch_contacts(&self, campaign_id: &str) -> ApiResult<Vec<Contact>>;
    async fn start_calling(&self, campaign_id: &str) -> ApiResult<()>;
    async fn stop_calling(&self, campaign_id: &str) -> ApiResult<()>;
}

#[async_trait]
impl CampaignBackend for ApiClient {
    async fn fetch_stats(&self, campaign_id: &str) -> ApiResult<CampaignStats> {
        self.campaign_stats(campaign_id).await
    }

    async fn fetch_logs(&self, campaign_id: &str) -> ApiResult<Vec<LogEntry>> {
        self.campaign_logs(campaign_id).await
    }

    async fn fetch_contacts(&self, campaign_id: &str) -> ApiResult<Vec<Contact>> {
        self.campaign_contacts(campaign_id, false).await
    }

    async fn start_calling(&self, campaign_id: &str) -> ApiResult<()> {
        ApiClient::start_calling(self, campaign_id).await
    }

    async fn stop_calling(&self, campaign_id: &str) -> ApiResult<()> {
        ApiClient::stop_calling(self, campaign_id).await
    }
}
