//! Routstr node admin REST API client.
//!
//! Authentication is password-based: `login` exchanges the admin password
//! for a short-lived bearer token held in memory and attached to every
//! subsequent request. A 401 from any endpoint surfaces as
//! [`ConsoleError::AuthRequired`](crate::ConsoleError::AuthRequired).

use std::time::Duration;

use serde_json::Value;
use tracing::info;
use zeroize::Zeroizing;

use crate::models::balance::{BalanceDetail, DetailedBalancesResponse};
use crate::models::mapping::{ModelMapping, ModelMappingsResponse, UpdateMappingsRequest};
use crate::models::usage::UsageStats;
use crate::models::wallet::{SendTokenRequest, TokenResponse, WithdrawRequest};

/// Overall request timeout for admin API calls.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Client for the node's admin endpoints.
pub struct AdminClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<Zeroizing<String>>,
}

impl AdminClient {
    /// Creates an unauthenticated client for the given base URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError::Http`](crate::ConsoleError::Http) if the
    /// underlying HTTP client cannot be constructed.
    pub fn new(base_url: impl Into<String>) -> crate::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: None,
        })
    }

    /// Returns the underlying HTTP client, shared with the price-feed layer.
    pub fn http(&self) -> &reqwest::Client {
        &self.http
    }

    /// Returns whether a bearer token is held.
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// Exchanges the admin password for a bearer token.
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError::AuthRequired`](crate::ConsoleError::AuthRequired)
    /// on a wrong password, or [`ConsoleError::Api`](crate::ConsoleError::Api)
    /// for any other rejection.
    pub async fn login(&mut self, password: &str) -> crate::Result<()> {
        let response = self
            .http
            .post(self.url("/admin/login"))
            .json(&serde_json::json!({ "password": password }))
            .send()
            .await?;
        let body: Value = into_api_result(response).await?.json().await?;

        let token = body["access_token"].as_str().ok_or_else(|| {
            crate::ConsoleError::Api {
                status: 200,
                detail: "login response missing access_token".to_string(),
            }
        })?;
        self.token = Some(Zeroizing::new(token.to_string()));
        info!("admin login succeeded");
        Ok(())
    }

    /// Fetches per-mint/per-unit balance rows.
    pub async fn get_detailed_balances(&self) -> crate::Result<Vec<BalanceDetail>> {
        let response = self
            .authed(self.http.get(self.url("/admin/wallet/balances")))?
            .send()
            .await?;
        let body: DetailedBalancesResponse = into_api_result(response).await?.json().await?;
        Ok(body.balances)
    }

    /// Withdraws owner funds from one mint, returning a Cashu token.
    pub async fn withdraw(&self, request: &WithdrawRequest) -> crate::Result<TokenResponse> {
        info!(
            mint_url = %request.mint_url,
            unit = %request.unit,
            amount = request.amount,
            "submitting withdrawal"
        );
        let response = self
            .authed(self.http.post(self.url("/admin/wallet/withdraw")))?
            .json(request)
            .send()
            .await?;
        Ok(into_api_result(response).await?.json().await?)
    }

    /// Creates a spendable Cashu token from wallet funds.
    pub async fn send_token(&self, amount: u64) -> crate::Result<TokenResponse> {
        info!(amount, "creating send token");
        let response = self
            .authed(self.http.post(self.url("/admin/wallet/send")))?
            .json(&SendTokenRequest { amount })
            .send()
            .await?;
        Ok(into_api_result(response).await?.json().await?)
    }

    /// Fetches the advertised-name → upstream model mappings.
    pub async fn get_model_mappings(&self) -> crate::Result<Vec<ModelMapping>> {
        let response = self
            .authed(self.http.get(self.url("/admin/models")))?
            .send()
            .await?;
        let body: ModelMappingsResponse = into_api_result(response).await?.json().await?;
        Ok(body.mappings)
    }

    /// Replaces the full model mapping set.
    pub async fn update_model_mappings(&self, mappings: Vec<ModelMapping>) -> crate::Result<()> {
        let response = self
            .authed(self.http.put(self.url("/admin/models")))?
            .json(&UpdateMappingsRequest { mappings })
            .send()
            .await?;
        into_api_result(response).await?;
        Ok(())
    }

    /// Fetches usage and revenue statistics.
    pub async fn get_usage(&self) -> crate::Result<UsageStats> {
        let response = self
            .authed(self.http.get(self.url("/admin/usage")))?
            .send()
            .await?;
        Ok(into_api_result(response).await?.json().await?)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    fn authed(
        &self,
        builder: reqwest::RequestBuilder,
    ) -> crate::Result<reqwest::RequestBuilder> {
        match &self.token {
            Some(token) => Ok(builder.bearer_auth(token.as_str())),
            None => Err(crate::ConsoleError::AuthRequired),
        }
    }
}

/// Maps an HTTP response to a typed error unless it succeeded.
///
/// The admin API reports failures as `{"detail": "..."}` bodies; when the
/// body is not in that shape the HTTP status text is used instead.
async fn into_api_result(response: reqwest::Response) -> crate::Result<reqwest::Response> {
    let status = response.status();
    if status == reqwest::StatusCode::UNAUTHORIZED {
        return Err(crate::ConsoleError::AuthRequired);
    }
    if status.is_success() {
        return Ok(response);
    }
    let detail = response
        .json::<Value>()
        .await
        .ok()
        .and_then(|body| body["detail"].as_str().map(str::to_string))
        .unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("request failed")
                .to_string()
        });
    Err(crate::ConsoleError::Api {
        status: status.as_u16(),
        detail,
    })
}
