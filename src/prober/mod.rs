pub mod activity;

use std::io::{self, Write};
use std::time::Duration;

use reqwest::Client;

use crate::config::ProbeSettings;
use crate::error::Result;
use crate::http_probe::prelude::*;
use crate::http_probe::request::endpoint;

const HEALTH_PATH: &str = "/health";
const INSIGHTS_PATH: &str = "/analysis/quick-insights";
const USER_ID_PARAM: &str = "auth_user_id";

const HEALTH_EXCERPT_CHARS: usize = 100;
const SUCCESS_EXCERPT_CHARS: usize = 200;

pub const RULE: &str = "============================================================";

/// How the protected endpoint answered a token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthOutcome {
    /// 200: the token was accepted.
    Accepted,
    /// 401: the token was rejected. `detail` is lifted from a JSON error body when present.
    Rejected { detail: Option<String> },
    /// Anything else.
    Unexpected,
}

impl AuthOutcome {
    pub fn classify(result: &ProbeResult) -> Self {
        match result.status_code {
            200 => AuthOutcome::Accepted,
            401 => AuthOutcome::Rejected {
                detail: error_detail(&result.body_text),
            },
            _ => AuthOutcome::Unexpected,
        }
    }
}

/// Pull `detail` out of a JSON object body. Bodies that are not JSON objects yield `None`.
pub fn error_detail(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    match value.get("detail")? {
        serde_json::Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

/// Runs the health, authenticated and user-scoped checks against one API.
pub struct TokenProber {
    client: Client,
    settings: ProbeSettings,
}

impl TokenProber {
    pub fn new(settings: ProbeSettings) -> Result<Self> {
        let client = Client::builder().user_agent(settings.user_agent.as_str()).build()?;
        Ok(Self { client, settings })
    }

    pub fn settings(&self) -> &ProbeSettings {
        &self.settings
    }

    /// Probe the API with `token`, and additionally with `user_id` as a query parameter when given.
    /// Probe failures are written to `out` and never returned; only a failing `out` is an error.
    pub async fn run<W: Write>(&self, token: &str, user_id: Option<&str>, out: &mut W) -> io::Result<()> {
        writeln!(out, "🔍 Testing JWT Token Authentication")?;
        writeln!(out, "{RULE}")?;

        self.check_health(out).await?;
        self.check_authenticated(token, out).await?;
        if let Some(user_id) = user_id {
            self.check_user_scoped(token, user_id, out).await?;
        }

        Ok(())
    }

    async fn check_health<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "\n1️⃣ Testing Health Endpoint (no auth required):")?;

        let timeout = Duration::from_secs(self.settings.health_timeout_seconds);
        let outcome = match endpoint(&self.settings.base_url, HEALTH_PATH) {
            Ok(url) => send_probe(&self.client, ProbeRequest::get(url, timeout)).await,
            Err(e) => Err(e),
        };

        match outcome {
            Ok(result) => {
                writeln!(out, "   Status: {}", result.status_code)?;
                writeln!(out, "   Response: {}...", result.body_excerpt(HEALTH_EXCERPT_CHARS))?;
            }
            Err(e) => {
                log::warn!("health probe failed: {}", report(&e));
                writeln!(out, "   ❌ Health check failed: {}", report(&e))?;
            }
        }
        Ok(())
    }

    async fn check_authenticated<W: Write>(&self, token: &str, out: &mut W) -> io::Result<()> {
        writeln!(out, "\n2️⃣ Testing Protected Endpoint with JWT:")?;

        let result = match self.probe_insights(token, None).await {
            Ok(result) => result,
            Err(e) => {
                log::warn!("authenticated probe failed: {}", report(&e));
                writeln!(out, "   ❌ Request failed: {}", report(&e))?;
                return Ok(());
            }
        };

        writeln!(out, "   Status: {}", result.status_code)?;
        match AuthOutcome::classify(&result) {
            AuthOutcome::Accepted => {
                writeln!(out, "   ✅ JWT Authentication SUCCESS!")?;
                writeln!(out, "   Response: {}...", result.body_excerpt(SUCCESS_EXCERPT_CHARS))?;
            }
            AuthOutcome::Rejected { detail } => {
                writeln!(out, "   ❌ JWT Authentication FAILED (401 Unauthorized)")?;
                writeln!(out, "   Error: {}", result.body_text)?;
                if let Some(detail) = detail {
                    writeln!(out, "   Detail: {detail}")?;
                }
            }
            AuthOutcome::Unexpected => {
                writeln!(out, "   ❓ Unexpected status: {}", result.status_code)?;
                writeln!(out, "   Response: {}", result.body_text)?;
            }
        }
        Ok(())
    }

    async fn check_user_scoped<W: Write>(&self, token: &str, user_id: &str, out: &mut W) -> io::Result<()> {
        writeln!(out, "\n3️⃣ Testing with auth_user_id parameter: {user_id}")?;

        match self.probe_insights(token, Some(user_id)).await {
            Ok(result) => {
                writeln!(out, "   Status with user ID: {}", result.status_code)?;
                if result.status_code != 200 {
                    writeln!(out, "   Error: {}", result.body_text)?;
                }
            }
            Err(e) => {
                log::warn!("user-scoped probe failed: {}", report(&e));
                writeln!(out, "   ❌ Request with user ID failed: {}", report(&e))?;
            }
        }
        Ok(())
    }

    async fn probe_insights(&self, token: &str, user_id: Option<&str>) -> Result<ProbeResult> {
        let url = endpoint(&self.settings.base_url, INSIGHTS_PATH)?;
        let timeout = Duration::from_secs(self.settings.auth_timeout_seconds);

        let mut request = ProbeRequest::post_json(url, activity::sample_payload(), timeout).bearer(token)?;
        if let Some(user_id) = user_id {
            request = request.query(USER_ID_PARAM, user_id);
        }

        send_probe(&self.client, request).await
    }
}
