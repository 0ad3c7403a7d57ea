// ABOUTME: Builds engine API requests from operation params and resolved auth.
// ABOUTME: Pure functions: method, path, query and headers, no I/O.

use crate::auth::{AuthResolver, DEFAULT_REGISTRY};
use crate::params::{BuildContext, BuildImageParams, InspectNetworkParams, PullParams, PushParams};
use bytes::Bytes;
use hyper::Method;

pub const REGISTRY_AUTH_HEADER: &str = "X-Registry-Auth";
pub const REGISTRY_CONFIG_HEADER: &str = "X-Registry-Config";

/// An engine request before it is bound to a connection.
#[derive(Debug, Clone)]
pub struct EngineRequest {
    pub method: Method,
    pub path: String,
    pub query: Vec<(&'static str, String)>,
    pub headers: Vec<(&'static str, String)>,
    pub body: Bytes,
}

impl EngineRequest {
    fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            headers: Vec::new(),
            body: Bytes::new(),
        }
    }

    fn query(mut self, key: &'static str, value: impl Into<String>) -> Self {
        self.query.push((key, value.into()));
        self
    }

    fn query_opt(self, key: &'static str, value: Option<impl Into<String>>) -> Self {
        match value {
            Some(value) => self.query(key, value),
            None => self,
        }
    }

    fn header(mut self, name: &'static str, value: String) -> Self {
        self.headers.push((name, value));
        self
    }

    pub fn header_value(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, value)| value.as_str())
    }

    /// Request target, prefixed with `/v<api_version>` when one is pinned.
    pub fn uri(&self, api_version: Option<&str>) -> String {
        let mut uri = match api_version {
            Some(version) => format!("/v{}{}", version.trim_start_matches('v'), self.path),
            None => self.path.clone(),
        };
        for (i, (key, value)) in self.query.iter().enumerate() {
            uri.push(if i == 0 { '?' } else { '&' });
            uri.push_str(key);
            uri.push('=');
            uri.push_str(&urlencoding::encode(value));
        }
        uri
    }
}

/// `POST /images/create`: the tag travels separately from the FQN.
pub fn pull_request(params: &PullParams, resolver: &AuthResolver) -> EngineRequest {
    let auth = resolver.resolve_auth_header(
        params.registry().unwrap_or(DEFAULT_REGISTRY),
        params.auth_configs(),
    );

    EngineRequest::new(Method::POST, "/images/create")
        .query("fromImage", params.image_fqn())
        .query_opt("tag", params.tag())
        .header(REGISTRY_AUTH_HEADER, auth)
}

/// `POST /images/{fqn}/push`.
pub fn push_request(params: &PushParams, resolver: &AuthResolver) -> EngineRequest {
    let auth = resolver.resolve_auth_header(
        params.registry().unwrap_or(DEFAULT_REGISTRY),
        params.auth_configs(),
    );

    EngineRequest::new(
        Method::POST,
        format!("/images/{}/push", params.repository_fqn()),
    )
    .query_opt("tag", params.tag())
    .header(REGISTRY_AUTH_HEADER, auth)
}

/// `POST /build`. `context_archive` is the tarred build directory, empty for
/// remote contexts.
pub fn build_request(
    params: &BuildImageParams,
    resolver: &AuthResolver,
    context_archive: Bytes,
) -> EngineRequest {
    let mut request = EngineRequest::new(Method::POST, "/build")
        .query_opt("t", params.image_tag())
        .query_opt("dockerfile", params.dockerfile())
        .query("rm", bool_param(params.remove_intermediate()))
        .query("forcerm", bool_param(params.force_remove()))
        .query("nocache", bool_param(params.no_cache()))
        .query("pull", bool_param(params.pull()))
        .query("q", bool_param(params.quiet()))
        .query_opt("memory", params.memory_limit().map(|m| m.to_string()))
        .query_opt("memswap", params.memory_swap_limit().map(|m| m.to_string()));

    if !params.build_args().is_empty() {
        // BTreeMap of strings always serializes
        if let Ok(json) = serde_json::to_string(params.build_args()) {
            request = request.query("buildargs", json);
        }
    }

    request = match params.context() {
        BuildContext::Remote(url) => request.query("remote", url.clone()),
        BuildContext::Directory(_) => {
            request.body = context_archive;
            request.header("Content-Type", "application/x-tar".to_string())
        }
    };

    request.header(
        REGISTRY_CONFIG_HEADER,
        resolver.resolve_auth_config_header(params.auth_configs()),
    )
}

/// `GET /networks/{id}`.
pub fn inspect_network_request(params: &InspectNetworkParams) -> EngineRequest {
    EngineRequest::new(
        Method::GET,
        format!("/networks/{}", urlencoding::encode(params.network_id())),
    )
}

fn bool_param(value: bool) -> &'static str {
    if value { "1" } else { "0" }
}
