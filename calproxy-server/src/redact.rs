//! Keeps feed credentials out of the logs.

use axum::http::Uri;
use url::form_urlencoded;

const SECRET_PARAMS: &[&str] = &["pStud", "pPers", "pToken"];
const MASK: &str = "XXXXXXXXXXXX";

/// Path and query with identity and token values cut to their first four
/// characters.
pub fn redact_uri(uri: &Uri) -> String {
    let Some(query) = uri.query() else {
        return uri.path().to_string();
    };

    let redacted: String = form_urlencoded::Serializer::new(String::new())
        .extend_pairs(form_urlencoded::parse(query.as_bytes()).map(|(key, value)| {
            let value = if SECRET_PARAMS.contains(&key.as_ref()) {
                mask(&value)
            } else {
                value.into_owned()
            };
            (key.into_owned(), value)
        }))
        .finish();

    format!("{}?{}", uri.path(), redacted)
}

pub fn mask(value: &str) -> String {
    let visible: String = value.chars().take(4).collect();
    format!("{visible}{MASK}")
}
