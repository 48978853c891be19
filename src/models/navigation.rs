use std::collections::BTreeMap;

/// Path of the login view; every gate redirect lands here.
pub const LOGIN_PATH: &str = "/login";

/// Query parameter carrying the originally requested path to the login view.
pub const REDIRECT_PARAM: &str = "redirect";

/// A single navigation attempt: the full requested path and its decoded query.
///
/// `target_path` is kept exactly as received (query string included) so it can
/// be handed back to the login view untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationIntent {
    pub target_path: String,
    pub query_params: BTreeMap<String, String>,
}

impl NavigationIntent {
    pub fn new(full_path: impl Into<String>) -> Self {
        let target_path = full_path.into();
        let query_params = parse_query(&target_path);
        NavigationIntent {
            target_path,
            query_params,
        }
    }

    /// The path component, without query string or fragment.
    pub fn path(&self) -> &str {
        let end = self
            .target_path
            .find(['?', '#'])
            .unwrap_or(self.target_path.len());
        &self.target_path[..end]
    }
}

fn parse_query(full_path: &str) -> BTreeMap<String, String> {
    let without_fragment = full_path.split('#').next().unwrap_or_default();
    let Some((_, query)) = without_fragment.split_once('?') else {
        return BTreeMap::new();
    };

    query
        .split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            (decode_component(key), decode_component(value))
        })
        .collect()
}

fn decode_component(raw: &str) -> String {
    urlencoding::decode(raw)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| raw.to_string())
}

/// Where to send the requester instead of the requested view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Redirect {
    pub path: String,
    pub query: BTreeMap<String, String>,
}

impl Redirect {
    /// A redirect to `path` with an empty query.
    pub fn to(path: impl Into<String>) -> Self {
        Redirect {
            path: path.into(),
            query: BTreeMap::new(),
        }
    }

    /// The login redirect produced for a logged-out requester of `target_path`.
    pub fn to_login(target_path: &str) -> Self {
        Redirect::to(LOGIN_PATH).with_query(REDIRECT_PARAM, target_path)
    }

    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.insert(key.into(), value.into());
        self
    }

    /// Renders the redirect as a `Location` value, percent-encoding the query.
    pub fn location(&self) -> String {
        if self.query.is_empty() {
            return self.path.clone();
        }
        let query = self
            .query
            .iter()
            .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&");
        format!("{}?{}", self.path, query)
    }
}

/// Outcome of the auth gate for one navigation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateDecision {
    Allow,
    Redirect(Redirect),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intent_without_query() {
        let intent = NavigationIntent::new("/dashboard");
        assert_eq!(intent.path(), "/dashboard");
        assert!(intent.query_params.is_empty());
    }

    #[test]
    fn test_intent_keeps_full_path_and_decodes_query() {
        let intent = NavigationIntent::new("/dashboard?city=New%20York&rooms=2#map");
        assert_eq!(intent.target_path, "/dashboard?city=New%20York&rooms=2#map");
        assert_eq!(intent.path(), "/dashboard");
        assert_eq!(intent.query_params.get("city").map(String::as_str), Some("New York"));
        assert_eq!(intent.query_params.get("rooms").map(String::as_str), Some("2"));
    }

    #[test]
    fn test_intent_query_edge_cases() {
        let intent = NavigationIntent::new("/x?flag&&a=1&a=2&bad=%zz");
        assert_eq!(intent.query_params.get("flag").map(String::as_str), Some(""));
        // The last occurrence wins.
        assert_eq!(intent.query_params.get("a").map(String::as_str), Some("2"));
        // Undecodable values are kept raw.
        assert_eq!(intent.query_params.get("bad").map(String::as_str), Some("%zz"));
    }

    #[test]
    fn test_login_redirect_location() {
        let redirect = Redirect::to_login("/dashboard");
        assert_eq!(redirect.path, LOGIN_PATH);
        assert_eq!(
            redirect.query.get(REDIRECT_PARAM).map(String::as_str),
            Some("/dashboard")
        );
        assert_eq!(redirect.location(), "/login?redirect=%2Fdashboard");
    }

    #[test]
    fn test_plain_redirect_location_has_no_query() {
        assert_eq!(Redirect::to("/login").location(), "/login");
    }

    #[test]
    fn test_location_round_trips_through_intent() {
        let target = "/dashboard?tab=2&q=a b";
        let location = Redirect::to_login(target).location();
        let login = NavigationIntent::new(location);
        assert_eq!(login.path(), "/login");
        assert_eq!(
            login.query_params.get(REDIRECT_PARAM).map(String::as_str),
            Some(target)
        );
    }
}
