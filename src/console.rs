/// What the auth console should display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrowserView {
    /// Widget class to instantiate.
    pub widget: String,
    /// Authorization URL to load in it.
    pub auth_url: String,
}

/// UI collaborator that shows the authorization page and later hands the code
/// back through [`crate::DonationAlertsController::set_authorization_code`].
pub trait AuthConsole {
    type Handle;

    fn open(&self, view: BrowserView) -> Self::Handle;
}
