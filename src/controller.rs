use std::sync::Arc;

use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, trace};

use crate::config::DonationAlertsSettings;
use crate::console::{AuthConsole, BrowserView};
use crate::error::Error;
use crate::http::{HttpClient, HttpRequest, RequestVerb};
use crate::request::build_request;
use crate::response::{Classification, ErrorCallback, classify_response};
use crate::session::AppSession;
use crate::store::TokenStore;

const CUSTOM_ALERT_PATH: &str = "/custom_alert";

/// A custom on-screen alert, independent of real donations.
///
/// Only `external_id` is required. Empty optional fields are left out of the
/// request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomAlert {
    /// Caller-chosen id used by the service to deduplicate alerts.
    pub external_id: String,
    pub header: String,
    pub message: String,
    pub image_url: String,
    pub sound_url: String,
}

impl CustomAlert {
    pub fn new(external_id: impl Into<String>) -> Self {
        Self {
            external_id: external_id.into(),
            ..Default::default()
        }
    }

    pub fn header(mut self, header: impl Into<String>) -> Self {
        self.header = header.into();
        self
    }

    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    pub fn image_url(mut self, image_url: impl Into<String>) -> Self {
        self.image_url = image_url.into();
        self
    }

    pub fn sound_url(mut self, sound_url: impl Into<String>) -> Self {
        self.sound_url = sound_url.into();
        self
    }

    fn query_params(&self) -> Vec<(&'static str, &str)> {
        let mut params = vec![("external_id", self.external_id.as_str())];
        let optional = [
            ("header", &self.header),
            ("message", &self.message),
            ("image_url", &self.image_url),
            ("sound_url", &self.sound_url),
        ];
        params.extend(
            optional
                .into_iter()
                .filter(|(_, value)| !value.is_empty())
                .map(|(key, value)| (key, value.as_str())),
        );
        params
    }
}

/// Configuration for creating a [`DonationAlertsController`] with a custom HTTP client.
///
/// Use this when you need to provide your own [`HttpClient`] implementation
/// (e.g. a pre-configured `reqwest::Client` with custom timeouts or proxies).
/// For the common case, use [`DonationAlertsController::new`].
pub struct DonationAlertsOptions<H: HttpClient, S: TokenStore> {
    pub settings: DonationAlertsSettings,
    pub http_client: Arc<H>,
    pub token_store: S,
}

/// Entry point of the SDK: owns the authorization state and sends requests to
/// [DonationAlerts](https://www.donationalerts.com/apidoc).
///
/// Construct one per application and pass it to whoever needs it.
///
/// # Flow
///
/// 1. [`initialize`](Self::initialize) with your application id. This loads any
///    token saved by the [`TokenStore`].
/// 2. [`open_auth_console`](Self::open_auth_console) shows the authorization
///    page; the console reports the code back through
///    [`set_authorization_code`](Self::set_authorization_code).
/// 3. Send requests, e.g. [`send_custom_alert`](Self::send_custom_alert).
///
/// # Example
///
/// ```rust,no_run
/// use donation_alerts::{CustomAlert, DonationAlertsController, DonationAlertsSettings, MemoryTokenStore};
///
/// # async fn example() -> Result<(), donation_alerts::Error> {
/// let mut controller =
///     DonationAlertsController::new(DonationAlertsSettings::default(), MemoryTokenStore::new());
/// controller.initialize("your-app-id")?;
///
/// let alert = CustomAlert::new("alert-1").header("Hi").message("Thanks for watching");
/// let body = controller.custom_alert(&alert).await?;
/// println!("{body}");
/// # Ok(())
/// # }
/// ```
pub struct DonationAlertsController<H: HttpClient, S: TokenStore> {
    settings: DonationAlertsSettings,
    http_client: Arc<H>,
    token_store: S,
    session: AppSession,
}

impl<H: HttpClient, S: TokenStore> DonationAlertsController<H, S> {
    /// Creates a controller from a [`DonationAlertsOptions`] struct.
    pub fn from_options(options: DonationAlertsOptions<H, S>) -> Self {
        Self {
            settings: options.settings,
            http_client: options.http_client,
            token_store: options.token_store,
            session: AppSession::default(),
        }
    }
}

#[cfg(feature = "reqwest-client")]
impl<S: TokenStore> DonationAlertsController<crate::http::ReqwestClient, S> {
    /// Creates a controller using the shared default HTTP client.
    pub fn new(settings: DonationAlertsSettings, token_store: S) -> Self {
        Self::from_options(DonationAlertsOptions {
            settings,
            http_client: crate::http::default_client(),
            token_store,
        })
    }
}

impl<H: HttpClient, S: TokenStore> DonationAlertsController<H, S> {
    pub fn settings(&self) -> &DonationAlertsSettings {
        &self.settings
    }

    pub fn session(&self) -> &AppSession {
        &self.session
    }

    /// Sets the application id and loads the saved token.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Store`] or [`Error::Decode`] when the token store
    /// cannot be read.
    pub fn initialize(&mut self, app_id: impl Into<String>) -> Result<(), Error> {
        self.session.initialize(app_id, &self.token_store)?;
        info!(
            app_id = self.session.app_id(),
            token_loaded = self.session.access_token().is_valid(),
            "controller initialized"
        );
        Ok(())
    }

    /// [`initialize`](Self::initialize) with the app id from the settings.
    pub fn initialize_from_settings(&mut self) -> Result<(), Error> {
        let app_id = self.settings.app_id.clone();
        self.initialize(app_id)
    }

    /// Authorization URL for the current app id.
    pub fn auth_url(&self) -> String {
        self.session.auth_url(&self.settings.authorize_endpoint)
    }

    /// Asks the console to display the authorization page, using the
    /// configured widget override if any.
    pub fn open_auth_console<C: AuthConsole>(&self, console: &C) -> C::Handle {
        let view = BrowserView {
            widget: self.settings.browser_widget().to_string(),
            auth_url: self.auth_url(),
        };
        debug!(widget = %view.widget, "opening auth console");
        console.open(view)
    }

    pub fn set_authorization_code(&mut self, code: impl Into<String>) {
        self.session.set_authorization_code(code);
    }

    /// Writes the current token through the token store.
    pub fn save_token(&self) -> Result<(), Error> {
        self.session.save_token(&self.token_store)
    }

    /// Sends a custom alert and waits for the outcome.
    ///
    /// Returns the raw response body on a 2xx answer.
    ///
    /// # Errors
    ///
    /// - [`Error::Validation`] when `external_id` is empty; nothing is sent.
    /// - [`Error::Transport`] when no response arrived.
    /// - [`Error::Service`] for any non-2xx status.
    pub async fn custom_alert(&self, alert: &CustomAlert) -> Result<String, Error> {
        let request = self.prepare_custom_alert(alert)?;
        let (classification, body) = dispatch(self.http_client.as_ref(), request).await;
        classification.into_result()?;
        Ok(body)
    }

    /// Sends a custom alert in the background.
    ///
    /// The request runs on a task spawned on the current tokio runtime.
    /// Callers on a plain thread can enter one first with
    /// `Runtime::enter`. A failed completion is passed to `on_error` once; a
    /// successful one is only logged. The returned handle resolves after the
    /// completion has been handled.
    ///
    /// # Errors
    ///
    /// Nothing is sent in either case:
    /// - [`Error::Validation`] when `external_id` is empty.
    /// - [`Error::NoRuntime`] when called outside a tokio runtime.
    pub fn send_custom_alert(
        &self,
        alert: &CustomAlert,
        on_error: Option<ErrorCallback>,
    ) -> Result<JoinHandle<()>, Error>
    where
        H: 'static,
    {
        let request = self.prepare_custom_alert(alert)?;
        let runtime = Handle::try_current().map_err(|e| {
            error!(error = %e, "custom alert not sent: no tokio runtime");
            Error::NoRuntime
        })?;
        let http_client = Arc::clone(&self.http_client);

        Ok(runtime.spawn(async move {
            let (classification, body) = dispatch(http_client.as_ref(), request).await;
            if classification.report(on_error) {
                return;
            }
            trace!(response = %body, "custom alert delivered");
        }))
    }

    fn prepare_custom_alert(&self, alert: &CustomAlert) -> Result<HttpRequest, Error> {
        if alert.external_id.is_empty() {
            error!("custom alert rejected: external_id is required");
            return Err(Error::Validation {
                field: "external_id",
            });
        }

        build_request(
            &self.settings.api_endpoint,
            CUSTOM_ALERT_PATH,
            &alert.query_params(),
            RequestVerb::Get,
            None,
            &self.session,
        )
    }
}

/// Send one request and classify its completion. Returns the classification
/// and the raw body (empty when no response arrived).
async fn dispatch<H: HttpClient>(client: &H, request: HttpRequest) -> (Classification, String) {
    debug!(method = %request.method, url = %request.url, "sending request");

    match client.send(request).await {
        Ok(response) => (classify_response(Some(&response)), response.body_text()),
        Err(err) => {
            debug!(error = %err, "request produced no response");
            (classify_response(None), String::new())
        }
    }
}
