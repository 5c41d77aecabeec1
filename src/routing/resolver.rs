//! Destination resolution.
//!
//! # Responsibilities
//! - Turn an inbound method + path (with query) into an absolute destination URL
//! - Swap the `mcp-` host token for `oauth2-` on OAuth-related paths
//! - Strip deployment prefixes (`/chatgpt-app`, `/chatgpt`, trailing `/oauth2`)
//!
//! # Design Decisions
//! - Pure and total: never rejects a path, never allocates state
//! - All replacements are single-occurrence, leftmost match
//! - Query strings are carried inside the path and never inspected

use axum::http::Method;

use crate::routing::Flavor;

/// Host token swapped on OAuth routes.
const MCP_HOST_TOKEN: &str = "mcp-";
const OAUTH2_HOST_TOKEN: &str = "oauth2-";

/// Substrings that mark a path as OAuth traffic in the generic flavor.
const GENERIC_OAUTH_MARKERS: &[&str] = &[
    "oauth-authorization-server",
    "oauth2",
    "token",
    "register-public-client",
];

const CHATGPT_APP_PREFIX: &str = "/chatgpt-app";
const CHATGPT_PREFIX: &str = "/chatgpt";
const OAUTH2_SUFFIX: &str = "/oauth2";
const REGISTER_CLIENT_SUFFIX: &str = "/register-public-client";

/// Outcome of resolving one inbound request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteDecision {
    /// Absolute URL the request is forwarded to.
    pub destination_url: String,
    /// True when the host-swap rule fired.
    pub oauth: bool,
}

/// Resolves destinations for one backend under one flavor.
#[derive(Debug, Clone)]
pub struct RouteResolver {
    backend_base: String,
    flavor: Flavor,
}

impl RouteResolver {
    pub fn new(backend_base: impl Into<String>, flavor: Flavor) -> Self {
        Self {
            backend_base: backend_base.into(),
            flavor,
        }
    }

    pub fn flavor(&self) -> Flavor {
        self.flavor
    }

    pub fn backend_base(&self) -> &str {
        &self.backend_base
    }

    /// Compute the destination for `original_path` (path plus query string).
    pub fn resolve(&self, method: &Method, original_path: &str) -> RouteDecision {
        let (host, path, oauth) = match self.flavor {
            Flavor::Generic => self.resolve_generic(method, original_path),
            Flavor::Default => self.resolve_default(original_path),
            Flavor::Passthrough => (self.backend_base.clone(), original_path.to_string(), false),
        };

        RouteDecision {
            destination_url: format!("{host}{path}"),
            oauth,
        }
    }

    fn oauth_host(&self) -> String {
        replace_first(&self.backend_base, MCP_HOST_TOKEN, OAUTH2_HOST_TOKEN)
    }

    fn resolve_generic(&self, method: &Method, original_path: &str) -> (String, String, bool) {
        let oauth = GENERIC_OAUTH_MARKERS
            .iter()
            .any(|marker| original_path.contains(marker));

        let (host, mut path) = if oauth {
            (
                self.oauth_host(),
                replace_first(original_path, CHATGPT_APP_PREFIX, ""),
            )
        } else {
            (self.backend_base.clone(), original_path.to_string())
        };

        if is_get(method) {
            path = replace_first(&path, CHATGPT_PREFIX, "");
        }

        (host, path, oauth)
    }

    fn resolve_default(&self, original_path: &str) -> (String, String, bool) {
        if original_path.ends_with(OAUTH2_SUFFIX) {
            let path = replace_first(original_path, OAUTH2_SUFFIX, "");
            let path = replace_first(&path, CHATGPT_PREFIX, "");
            (self.oauth_host(), path, true)
        } else if original_path.ends_with(REGISTER_CLIENT_SUFFIX) {
            let path = replace_first(original_path, CHATGPT_PREFIX, "");
            (self.backend_base.clone(), path, false)
        } else {
            (self.backend_base.clone(), original_path.to_string(), false)
        }
    }
}

/// GET, or HEAD answered by the GET route.
pub fn is_get(method: &Method) -> bool {
    matches!(*method, Method::GET | Method::HEAD)
}

/// Replace the leftmost occurrence of `from` with `to`; no-op when absent.
pub fn replace_first(haystack: &str, from: &str, to: &str) -> String {
    haystack.replacen(from, to, 1)
}
