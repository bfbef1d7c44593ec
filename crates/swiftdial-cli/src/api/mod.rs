//! API client for the swiftdial backend
//!
//! Thin request/response wrapper: one method per backend capability,
//! bearer-token auth, `{ "data": ... }` envelopes. Failures map to a typed
//! [`ApiError`]; callers decide how to surface them. A 401 becomes
//! [`ApiError::Unauthorized`] so the command layer can clear stored
//! credentials.

mod auth;

pub use auth::TokenClaims;

use reqwest::{Client as ReqwestClient, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::json;
use swiftdial_types::{
    AccountSettings, AnalyticsSummary, Campaign, CampaignDraft, CampaignPatch, CampaignStats,
    Contact, ContactDraft, LogEntry, PhoneNumber, PhoneStatus, Property, SessionContext,
};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("not logged in")]
    NotAuthenticated,

    #[error("session expired or rejected by the server")]
    Unauthorized,

    #[error("{0}")]
    Backend(String),

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("could not read token claims: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;

#[derive(Debug, Deserialize)]
struct Envelope<T> {
    data: T,
}

#[derive(Debug, Deserialize)]
struct LogsEnvelope {
    #[serde(default)]
    logs: Vec<LogEntry>,
}

#[derive(Debug, Deserialize)]
struct LoginResponse {
    jwt_token: String,
}

/// Authenticated user as decoded from a fresh login token.
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub token: String,
    pub user_id: String,
    pub email: String,
}

pub struct ApiClient {
    http: ReqwestClient,
    base_url: String,
    token: Option<String>,
    user_id: Option<String>,
}

impl ApiClient {
    /// Build a client from an explicit session context.
    pub fn new(ctx: &SessionContext) -> Self {
        Self {
            http: ReqwestClient::new(),
            base_url: ctx.server_url.trim_end_matches('/').to_string(),
            token: ctx.token.clone(),
            user_id: ctx.user_id.clone(),
        }
    }

    fn api_url(&self, path: &str) -> String {
        format!("{}/api/{}", self.base_url, path)
    }

    fn authed(&self, builder: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    fn user_id(&self) -> ApiResult<&str> {
        self.user_id.as_deref().ok_or(ApiError::NotAuthenticated)
    }

    /// Authenticate and decode the identity claims carried in the token.
    pub async fn login(&self, email: &str, password: &str) -> ApiResult<AuthSession> {
        let response = self
            .http
            .post(format!("{}/login", self.base_url))
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await?;

        let login: LoginResponse = check(response).await?;
        let claims = auth::decode_claims(&login.jwt_token)?;
        Ok(AuthSession {
            token: login.jwt_token,
            user_id: claims.user_id,
            email: claims.email,
        })
    }

    // ---- Campaigns ----

    pub async fn list_campaigns(&self) -> ApiResult<Vec<Campaign>> {
        let response = self
            .authed(self.http.get(self.api_url("getCampaignList")))
            .query(&[("user_id", self.user_id()?)])
            .send()
            .await?;
        Ok(check::<Envelope<Vec<Campaign>>>(response).await?.data)
    }

    /// Create a campaign along with the contacts enrolled in it.
    pub async fn create_campaign(
        &self,
        draft: &CampaignDraft,
        contacts: &[Contact],
    ) -> ApiResult<()> {
        let response = self
            .authed(self.http.post(self.api_url("createCampaign")))
            .json(&json!({
                "campaignData": draft,
                "campaignInfoData": contacts,
            }))
            .send()
            .await?;
        check_status(response).await
    }

    pub async fn update_campaign(&self, campaign_id: &str, patch: &CampaignPatch) -> ApiResult<()> {
        let response = self
            .authed(
                self.http
                    .patch(self.api_url(&format!("campaigns/{}/update", campaign_id))),
            )
            .json(patch)
            .send()
            .await?;
        check_status(response).await
    }

    pub async fn delete_campaign(&self, campaign_id: &str) -> ApiResult<()> {
        let response = self
            .authed(
                self.http
                    .delete(self.api_url(&format!("campaigns/{}", campaign_id))),
            )
            .send()
            .await?;
        check_status(response).await
    }

    // ---- Campaign session data ----

    pub async fn campaign_stats(&self, campaign_id: &str) -> ApiResult<CampaignStats> {
        let response = self
            .authed(self.http.get(self.api_url("getCampaignStats")))
            .query(&[("campaign_id", campaign_id)])
            .send()
            .await?;
        Ok(check::<Envelope<CampaignStats>>(response).await?.data)
    }

    pub async fn campaign_logs(&self, campaign_id: &str) -> ApiResult<Vec<LogEntry>> {
        let response = self
            .authed(self.http.get(self.api_url("getCampaignLogs")))
            .query(&[("campaign_id", campaign_id)])
            .send()
            .await?;
        Ok(check::<LogsEnvelope>(response).await?.logs)
    }

    pub async fn campaign_contacts(
        &self,
        campaign_id: &str,
        hot_leads_only: bool,
    ) -> ApiResult<Vec<Contact>> {
        let mut query = vec![
            ("campaign_id", campaign_id.to_string()),
            ("user_id", self.user_id()?.to_string()),
        ];
        if hot_leads_only {
            query.push(("hot_leads_only", "true".to_string()));
        }
        let response = self
            .authed(self.http.get(self.api_url("getCampaignDeets")))
            .query(&query)
            .send()
            .await?;
        Ok(check::<Envelope<Vec<Contact>>>(response).await?.data)
    }

    pub async fn start_calling(&self, campaign_id: &str) -> ApiResult<()> {
        let response = self
            .authed(self.http.post(self.api_url("startCampaignCalls")))
            .json(&json!({
                "campaign_id": campaign_id,
                "user_id": self.user_id()?,
            }))
            .send()
            .await?;
        check_status(response).await
    }

    pub async fn stop_calling(&self, campaign_id: &str) -> ApiResult<()> {
        let response = self
            .authed(self.http.post(self.api_url("stopCampaignCalls")))
            .json(&json!({ "campaign_id": campaign_id }))
            .send()
            .await?;
        check_status(response).await
    }

    /// Trigger one call to a single campaign contact.
    pub async fn single_call(&self, contact_id: &str) -> ApiResult<()> {
        let response = self
            .authed(self.http.post(self.api_url("singleCall")))
            .json(&json!({
                "user_id": self.user_id()?,
                "campaign_contact_id": contact_id,
            }))
            .send()
            .await?;
        check_status(response).await
    }

    // ---- Contacts ----

    pub async fn list_contacts(&self) -> ApiResult<Vec<Contact>> {
        let response = self
            .authed(self.http.get(self.api_url("getContacts")))
            .query(&[("user_id", self.user_id()?)])
            .send()
            .await?;
        Ok(check::<Envelope<Vec<Contact>>>(response).await?.data)
    }

    pub async fn add_contacts(&self, contacts: &[ContactDraft]) -> ApiResult<()> {
        let response = self
            .authed(self.http.post(self.api_url("addContacts")))
            .json(&json!({
                "contacts": contacts,
                "user_id": self.user_id()?,
            }))
            .send()
            .await?;
        check_status(response).await
    }

    pub async fn edit_contact(&self, contact: &Contact) -> ApiResult<()> {
        let response = self
            .authed(self.http.put(self.api_url("editContact")))
            .json(contact)
            .send()
            .await?;
        check_status(response).await
    }

    pub async fn delete_contact(&self, contact_id: &str) -> ApiResult<()> {
        let response = self
            .authed(self.http.delete(self.api_url("deleteContact")))
            .query(&[("contact_id", contact_id)])
            .send()
            .await?;
        check_status(response).await
    }

    // ---- Account settings & phone numbers ----

    pub async fn get_settings(&self) -> ApiResult<AccountSettings> {
        let response = self
            .authed(self.http.get(self.api_url("getSettings")))
            .query(&[("user_id", self.user_id()?)])
            .send()
            .await?;
        check(response).await
    }

    pub async fn edit_settings(&self, settings: &AccountSettings) -> ApiResult<()> {
        let response = self
            .authed(self.http.post(self.api_url("editSettings")))
            .query(&[("user_id", self.user_id()?)])
            .json(settings)
            .send()
            .await?;
        check_status(response).await
    }

    pub async fn phone_numbers(&self) -> ApiResult<Vec<PhoneNumber>> {
        let response = self
            .authed(self.http.get(self.api_url("getUsersPhoneNums")))
            .query(&[("user_id", self.user_id()?)])
            .send()
            .await?;
        Ok(check::<Envelope<Vec<PhoneNumber>>>(response).await?.data)
    }

    pub async fn add_phone_number(
        &self,
        number: &str,
        label: Option<&str>,
    ) -> ApiResult<PhoneNumber> {
        let response = self
            .authed(self.http.post(self.api_url("addPhoneNumberSettings")))
            .json(&json!({
                "number": number,
                "label": label,
                "user_id": self.user_id()?,
            }))
            .send()
            .await?;
        check(response).await
    }

    pub async fn delete_phone_number(&self, id: i64) -> ApiResult<()> {
        let response = self
            .authed(self.http.get(self.api_url("delPhoneNumberSettings")))
            .query(&[("id", id)])
            .send()
            .await?;
        check_status(response).await
    }

    pub async fn set_phone_status(&self, id: i64, status: PhoneStatus) -> ApiResult<()> {
        let response = self
            .authed(self.http.post(self.api_url("changePhoneStatus")))
            .json(&json!({ "id": id, "status": status }))
            .send()
            .await?;
        check_status(response).await
    }

    // ---- Analytics & leads ----

    pub async fn analytics(&self, campaign_id: &str) -> ApiResult<AnalyticsSummary> {
        let response = self
            .authed(self.http.get(self.api_url("getAnalytics")))
            .query(&[("campaign_id", campaign_id)])
            .send()
            .await?;
        Ok(check::<Envelope<AnalyticsSummary>>(response).await?.data)
    }

    pub async fn hot_leads(&self, campaign_id: &str) -> ApiResult<Vec<Contact>> {
        let response = self
            .authed(self.http.get(self.api_url("getHotLeads")))
            .query(&[("campaign_id", campaign_id)])
            .send()
            .await?;
        Ok(check::<Envelope<Vec<Contact>>>(response).await?.data)
    }

    pub async fn properties(&self) -> ApiResult<Vec<Property>> {
        let response = self
            .authed(self.http.get(self.api_url("getProperties")))
            .send()
            .await?;
        Ok(check::<Envelope<Vec<Property>>>(response).await?.data)
    }
}

/// Map status codes, then decode the body.
async fn check<T: DeserializeOwned>(response: Response) -> ApiResult<T> {
    let status = response.status();
    let body = response.text().await?;
    check_error(status, &body)?;
    Ok(serde_json::from_str(&body)?)
}

/// Map status codes for endpoints whose body we do not consume.
async fn check_status(response: Response) -> ApiResult<()> {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    check_error(status, &body)
}

fn check_error(status: StatusCode, body: &str) -> ApiResult<()> {
    if status == StatusCode::UNAUTHORIZED {
        return Err(ApiError::Unauthorized);
    }
    if !status.is_success() {
        let detail: serde_json::Value = serde_json::from_str(body).unwrap_or_default();
        let message = detail["error"]
            .as_str()
            .map(str::to_string)
            .unwrap_or_else(|| format!("server returned {}", status));
        return Err(ApiError::Backend(message));
    }
    Ok(())
}
