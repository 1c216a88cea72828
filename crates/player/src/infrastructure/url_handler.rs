//! Out-of-band identity token handling
//!
//! The browser build reads the token from the page's query string
//! (`?entityKey=...`). On desktop the OS passes `goldrush://` URLs:
//! - goldrush:// - Login
//! - goldrush://play?entityKey={key} - Auto-login as a participant

use goldrush_domain::EntityKey;
use goldrush_shared::routes::ENTITY_KEY_PARAM;

pub const URL_SCHEME: &str = "goldrush://";

/// Deep link extracted from a `goldrush://` url.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeepLink {
    Login,
    Play { entity_key: Option<EntityKey> },
}

impl DeepLink {
    pub fn entity_key(&self) -> Option<&EntityKey> {
        match self {
            DeepLink::Play { entity_key } => entity_key.as_ref(),
            DeepLink::Login => None,
        }
    }
}

/// Parse a `goldrush://` URL into a deep link.
///
/// Returns `None` if the URL is not one of ours.
pub fn parse_url_scheme(url: &str) -> Option<DeepLink> {
    let rest = url.strip_prefix(URL_SCHEME)?;
    let (path, query) = match rest.split_once('?') {
        Some((path, query)) => (path, Some(query)),
        None => (rest, None),
    };

    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

    match segments.as_slice() {
        [] => Some(DeepLink::Login),
        ["play"] => Some(DeepLink::Play {
            entity_key: query.and_then(entity_key_from_query),
        }),
        _ => None,
    }
}

/// Pull the entity key out of a query string, with or without the leading `?`.
///
/// Blank values count as absent.
pub fn entity_key_from_query(query: &str) -> Option<EntityKey> {
    let query = query.strip_prefix('?').unwrap_or(query);
    url::form_urlencoded::parse(query.as_bytes())
        .find(|(name, _)| name == ENTITY_KEY_PARAM)
        .map(|(_, value)| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .map(EntityKey::new)
}
