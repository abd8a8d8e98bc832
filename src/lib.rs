mod config;
mod console;
mod controller;
mod error;
mod events;
mod http;
mod request;
mod response;
mod session;
mod store;
mod tokens;

// Core
pub use controller::{CustomAlert, DonationAlertsController, DonationAlertsOptions};
pub use error::Error;
pub use http::{HttpClient, HttpRequest, HttpResponse, RequestVerb};
pub use response::{Classification, ErrorCallback, NO_RESPONSE_STATUS, classify_response};
pub use session::{AUTH_SCOPE, AppSession};
pub use tokens::AuthToken;

// Collaborators
pub use console::{AuthConsole, BrowserView};
pub use store::{JsonFileTokenStore, MemoryTokenStore, TokenStore};

// Configuration
pub use config::{API_ENDPOINT, AUTHORIZATION_ENDPOINT, DEFAULT_BROWSER_WIDGET, DonationAlertsSettings};

// Records
pub use events::{DonationEvent, GoalEvent, PollEvent, PollOption, PollType, UserProfile};

// Utilities
pub use request::{ENGINE_NAME, ENGINE_VERSION, SDK_VERSION, build_request};

// Default HTTP client (behind feature flag)
#[cfg(feature = "reqwest-client")]
pub use http::{ReqwestClient, default_client};
