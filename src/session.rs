use crate::Error;
use crate::store::TokenStore;
use crate::tokens::AuthToken;

/// Scope requested by the authorization URL.
pub const AUTH_SCOPE: &str = "oauth-user-show";

/// Authorization state owned by a controller: app id, authorization code and
/// access token.
#[derive(Debug, Clone, Default)]
pub struct AppSession {
    app_id: String,
    authorization_code: String,
    access_token: AuthToken,
    initialized: bool,
}

impl AppSession {
    pub fn app_id(&self) -> &str {
        &self.app_id
    }

    pub fn authorization_code(&self) -> &str {
        &self.authorization_code
    }

    pub fn access_token(&self) -> &AuthToken {
        &self.access_token
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Set the app id and load whatever token the store holds. The loaded
    /// token is kept as-is, valid or not.
    pub(crate) fn initialize(
        &mut self,
        app_id: impl Into<String>,
        store: &impl TokenStore,
    ) -> Result<(), Error> {
        self.app_id = app_id.into();
        self.access_token = store.load_token()?;
        self.initialized = true;
        Ok(())
    }

    pub(crate) fn set_authorization_code(&mut self, code: impl Into<String>) {
        self.authorization_code = code.into();
    }

    #[cfg(test)]
    pub(crate) fn replace_token(&mut self, token: AuthToken) {
        self.access_token = token;
    }

    /// Hand the current token to the store. Nothing fills the token beyond the
    /// startup load until the code exchange exists.
    pub(crate) fn save_token(&self, store: &impl TokenStore) -> Result<(), Error> {
        store.save_token(&self.access_token)
    }

    /// Authorization URL for the configured app:
    /// `<endpoint>?client_id=<app_id>&response_type=code&scope=oauth-user-show`.
    pub fn auth_url(&self, authorize_endpoint: &str) -> String {
        format!(
            "{authorize_endpoint}?client_id={}&response_type=code&scope={AUTH_SCOPE}",
            self.app_id
        )
    }
}
