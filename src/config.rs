use serde::Deserialize;

use crate::Error;

pub const API_ENDPOINT: &str = "https://www.donationalerts.com/api/v1";
pub const AUTHORIZATION_ENDPOINT: &str = "https://www.donationalerts.com/oauth/authorize";
/// Widget class opened by the auth console unless overridden.
pub const DEFAULT_BROWSER_WIDGET: &str = "donation-alerts/auth-browser";

/// Controller settings. Every field has a default, so a partial JSON document
/// is enough.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DonationAlertsSettings {
    /// Application (client) id registered with DonationAlerts.
    pub app_id: String,
    pub api_endpoint: String,
    pub authorize_endpoint: String,
    /// Widget class to use instead of [`DEFAULT_BROWSER_WIDGET`].
    pub browser_widget_override: Option<String>,
}

impl Default for DonationAlertsSettings {
    fn default() -> Self {
        Self {
            app_id: String::new(),
            api_endpoint: API_ENDPOINT.to_string(),
            authorize_endpoint: AUTHORIZATION_ENDPOINT.to_string(),
            browser_widget_override: None,
        }
    }
}

impl DonationAlertsSettings {
    pub fn from_json(json: &str) -> Result<Self, Error> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn browser_widget(&self) -> &str {
        self.browser_widget_override
            .as_deref()
            .filter(|widget| !widget.is_empty())
            .unwrap_or(DEFAULT_BROWSER_WIDGET)
    }
}
