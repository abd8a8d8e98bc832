use url::Url;

use crate::Error;
use crate::http::{HttpRequest, RequestVerb};
use crate::session::AppSession;

/// Engine identification sent with every request.
pub const ENGINE_NAME: &str = "rust";
/// Sent as `X-ENGINE-V`. This is the crate's declared minimum supported Rust
/// version (`rust-version` in the manifest), not the compiler that built it.
pub const ENGINE_VERSION: &str = env!("CARGO_PKG_RUST_VERSION");
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build a request against the DonationAlerts REST API.
///
/// `query` pairs are form-encoded in the given order. A non-empty `json_body`
/// is sent verbatim as `application/json`; otherwise the request carries an
/// empty form-encoded body. `session` is reserved for the bearer header and
/// currently unused.
pub fn build_request(
    api_endpoint: &str,
    path: &str,
    query: &[(&str, &str)],
    verb: RequestVerb,
    json_body: Option<&str>,
    session: &AppSession,
) -> Result<HttpRequest, Error> {
    let mut raw_url = format!("{}{}", api_endpoint.trim_end_matches('/'), path);

    if !query.is_empty() {
        let encoded = url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(query)
            .finish();
        raw_url.push('?');
        raw_url.push_str(&encoded);
    }

    // Re-parse so any character left unescaped in the endpoint or path gets encoded.
    let url = Url::parse(&raw_url)?;

    let mut headers = vec![
        ("X-ENGINE".to_string(), ENGINE_NAME.to_string()),
        ("X-ENGINE-V".to_string(), ENGINE_VERSION.to_string()),
        ("X-SDK-V".to_string(), SDK_VERSION.to_string()),
    ];

    let body = match json_body {
        Some(json) if !json.is_empty() => {
            headers.push(("Content-Type".to_string(), "application/json".to_string()));
            json.as_bytes().to_vec()
        }
        _ => {
            headers.push((
                "Content-Type".to_string(),
                "application/x-www-form-urlencoded".to_string(),
            ));
            Vec::new()
        }
    };

    // TODO: attach `Authorization: Bearer <access_token>` from the session once
    // the authorization code exchange populates it.
    let _ = session;

    Ok(HttpRequest {
        method: verb,
        url: url.into(),
        headers,
        body,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    const API: &str = "https://www.donationalerts.com/api/v1";

    fn session() -> AppSession {
        AppSession::default()
    }

    fn header_map(request: &HttpRequest) -> HashMap<&str, &str> {
        request
            .headers
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect()
    }

    #[test]
    fn sets_identification_headers() {
        let request = build_request(API, "/user/oauth", &[], RequestVerb::Get, None, &session())
            .unwrap();
        let headers = header_map(&request);

        assert_eq!(headers.get("X-ENGINE"), Some(&"rust"));
        assert_eq!(headers.get("X-ENGINE-V"), Some(&ENGINE_VERSION));
        assert_eq!(headers.get("X-SDK-V"), Some(&SDK_VERSION));
        assert_eq!(request.headers.len(), 4);
    }

    #[test]
    fn no_body_uses_form_content_type() {
        let request = build_request(API, "/user/oauth", &[], RequestVerb::Get, None, &session())
            .unwrap();

        assert_eq!(
            request.header("Content-Type"),
            Some("application/x-www-form-urlencoded")
        );
        assert!(request.body.is_empty());
        assert_eq!(request.url, "https://www.donationalerts.com/api/v1/user/oauth");
    }

    #[test]
    fn empty_json_body_is_treated_as_absent() {
        let request =
            build_request(API, "/merchandise", &[], RequestVerb::Post, Some(""), &session())
                .unwrap();

        assert_eq!(
            request.header("Content-Type"),
            Some("application/x-www-form-urlencoded")
        );
        assert!(request.body.is_empty());
    }

    #[test]
    fn json_body_is_sent_verbatim() {
        let json = r#"{"merchant_identifier":"MY_STORE","title":{"en_US":"Hoodie"}}"#;
        let request =
            build_request(API, "/merchandise", &[], RequestVerb::Post, Some(json), &session())
                .unwrap();

        assert_eq!(request.method, RequestVerb::Post);
        assert_eq!(request.header("Content-Type"), Some("application/json"));
        assert_eq!(request.body, json.as_bytes());
    }

    #[test]
    fn query_is_appended_in_order_and_encoded() {
        let request = build_request(
            API,
            "/custom_alert",
            &[("external_id", "12"), ("header", "Hi there & bye"), ("message", "100%")],
            RequestVerb::Get,
            None,
            &session(),
        )
        .unwrap();

        assert_eq!(
            request.url,
            "https://www.donationalerts.com/api/v1/custom_alert?external_id=12&header=Hi+there+%26+bye&message=100%25"
        );
    }

    #[test]
    fn stray_characters_in_path_are_escaped() {
        let request =
            build_request(API, "/custom alert", &[], RequestVerb::Get, None, &session()).unwrap();
        assert_eq!(
            request.url,
            "https://www.donationalerts.com/api/v1/custom%20alert"
        );
    }

    #[test]
    fn malformed_endpoint_is_rejected() {
        let err = build_request("not a url", "/x", &[], RequestVerb::Get, None, &session())
            .unwrap_err();
        assert!(matches!(err, Error::InvalidUrl(_)));
    }

    #[test]
    fn no_authorization_header_yet() {
        let mut session = session();
        session.replace_token(crate::AuthToken::new("access", 3600, "refresh"));
        let request =
            build_request(API, "/user/oauth", &[], RequestVerb::Get, None, &session).unwrap();
        assert!(request.header("Authorization").is_none());
    }
}
