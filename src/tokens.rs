use serde::{Deserialize, Serialize};

/// Credential bundle returned by the DonationAlerts token endpoint.
///
/// Replaced as a whole; there is no partial update.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthToken {
    #[serde(default)]
    pub access_token: String,
    #[serde(default)]
    pub expires_in: i64,
    #[serde(default)]
    pub refresh_token: String,
}

impl AuthToken {
    pub fn new(
        access_token: impl Into<String>,
        expires_in: i64,
        refresh_token: impl Into<String>,
    ) -> Self {
        Self {
            access_token: access_token.into(),
            expires_in,
            refresh_token: refresh_token.into(),
        }
    }

    /// True when both the access and refresh tokens are present.
    /// `expires_in` is not consulted.
    pub fn is_valid(&self) -> bool {
        !self.access_token.is_empty() && !self.refresh_token.is_empty()
    }
}
