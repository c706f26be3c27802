//! MCP integration endpoint.
//!
//! A JSON `{method, params, id?}` envelope posted by an external AI
//! assistant, answered with `{result}` or `{error}`. Dispatch goes through a
//! typed method registry; an unknown method name lands in the default error
//! branch rather than a transport failure.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::locale::Locale;
use crate::models::{ContentFilter, ContentType, SearchQuery, SortOrder};
use crate::repository::ContentRepository;
use crate::search::SearchService;

pub const ERR_INVALID_REQUEST: i32 = -32600;
pub const ERR_METHOD_NOT_FOUND: i32 = -32601;
pub const ERR_INVALID_PARAMS: i32 = -32602;
pub const ERR_INTERNAL: i32 = -32000;

/// Incoming envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct McpRequest {
    pub method: String,
    #[serde(default)]
    pub params: Value,
    #[serde(default)]
    pub id: Option<Value>,
}

/// Outgoing envelope. Exactly one of `result`/`error` is set.
#[derive(Debug, Clone, Serialize)]
pub struct McpResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<McpError>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
}

#[derive(Debug, Clone, Serialize)]
pub struct McpError {
    pub code: i32,
    pub message: String,
}

impl McpResponse {
    pub fn result(id: Option<Value>, result: Value) -> Self {
        Self {
            result: Some(result),
            error: None,
            id,
        }
    }

    pub fn error(id: Option<Value>, code: i32, message: impl Into<String>) -> Self {
        Self {
            result: None,
            error: Some(McpError {
                code,
                message: message.into(),
            }),
            id,
        }
    }
}

/// Handler for executing a method.
#[async_trait::async_trait]
pub trait MethodHandler: Send + Sync {
    /// Execute the method with the given params.
    async fn call(&self, params: Value) -> Result<Value, McpError>;
}

/// A registered method.
#[derive(Clone)]
pub struct Method {
    pub name: &'static str,
    pub description: &'static str,
    pub handler: Arc<dyn MethodHandler>,
}

/// Registry mapping method names to handlers.
#[derive(Clone)]
pub struct McpRegistry {
    methods: HashMap<&'static str, Method>,
}

impl McpRegistry {
    /// Build the registry with every portal method registered.
    pub fn new(repo: ContentRepository) -> Self {
        let mut registry = Self {
            methods: HashMap::new(),
        };

        registry.register(Method {
            name: "search_content",
            description: "Search papers, videos, and NASA media in the library",
            handler: Arc::new(SearchContentHandler {
                service: SearchService::new(repo.clone()),
            }),
        });
        registry.register(Method {
            name: "get_stats",
            description: "Aggregate per-type item counts",
            handler: Arc::new(GetStatsHandler { repo: repo.clone() }),
        });
        registry.register(Method {
            name: "get_item",
            description: "Fetch one library item by type and id",
            handler: Arc::new(GetItemHandler { repo }),
        });

        registry
    }

    fn register(&mut self, method: Method) {
        self.methods.insert(method.name, method);
    }

    /// Registered method names, sorted (for diagnostics).
    pub fn method_names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.methods.keys().copied().collect();
        names.sort_unstable();
        names
    }

    /// Dispatch one request to its handler.
    pub async fn dispatch(&self, request: McpRequest) -> McpResponse {
        let Some(method) = self.methods.get(request.method.as_str()) else {
            return McpResponse::error(
                request.id,
                ERR_METHOD_NOT_FOUND,
                format!("unknown method: {}", request.method),
            );
        };

        match method.handler.call(request.params).await {
            Ok(result) => McpResponse::result(request.id, result),
            Err(error) => McpResponse {
                result: None,
                error: Some(error),
                id: request.id,
            },
        }
    }
}

fn invalid_params(e: impl std::fmt::Display) -> McpError {
    McpError {
        code: ERR_INVALID_PARAMS,
        message: format!("invalid params: {}", e),
    }
}

fn internal(e: impl std::fmt::Display) -> McpError {
    McpError {
        code: ERR_INTERNAL,
        message: e.to_string(),
    }
}

fn to_value<T: Serialize>(value: &T) -> Result<Value, McpError> {
    serde_json::to_value(value).map_err(internal)
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchContentParams {
    query: String,
    #[serde(default)]
    r#type: Option<String>,
    #[serde(default)]
    page: Option<u32>,
    #[serde(default)]
    sort: Option<String>,
    #[serde(default)]
    date_from: Option<NaiveDate>,
    #[serde(default)]
    date_to: Option<NaiveDate>,
    #[serde(default)]
    lang: Option<String>,
}

struct SearchContentHandler {
    service: SearchService,
}

#[async_trait::async_trait]
impl MethodHandler for SearchContentHandler {
    async fn call(&self, params: Value) -> Result<Value, McpError> {
        let params: SearchContentParams =
            serde_json::from_value(params).map_err(invalid_params)?;

        let query = SearchQuery::new(params.query)
            .filter(ContentFilter::from_param(params.r#type.as_deref().unwrap_or("all")))
            .page(params.page.unwrap_or(1))
            .sort(SortOrder::from_param(params.sort.as_deref().unwrap_or("date")))
            .date_range(params.date_from, params.date_to)
            .locale(Locale::from_tag(params.lang.as_deref().unwrap_or("en")));

        let results = self.service.search(&query).await.map_err(internal)?;
        to_value(&results)
    }
}

struct GetStatsHandler {
    repo: ContentRepository,
}

#[async_trait::async_trait]
impl MethodHandler for GetStatsHandler {
    async fn call(&self, _params: Value) -> Result<Value, McpError> {
        let stats = self.repo.stats().await.map_err(internal)?;
        to_value(&stats)
    }
}

#[derive(Debug, Deserialize)]
struct GetItemParams {
    r#type: String,
    id: String,
}

struct GetItemHandler {
    repo: ContentRepository,
}

#[async_trait::async_trait]
impl MethodHandler for GetItemHandler {
    async fn call(&self, params: Value) -> Result<Value, McpError> {
        let params: GetItemParams = serde_json::from_value(params).map_err(invalid_params)?;
        let Some(content_type) = ContentType::from_str(&params.r#type) else {
            return Err(invalid_params(format!("unknown type: {}", params.r#type)));
        };

        let item = self
            .repo
            .get(content_type, &params.id)
            .await
            .map_err(internal)?;
        match item {
            Some(item) => to_value(&item),
            None => Err(McpError {
                code: ERR_INVALID_PARAMS,
                message: format!("no {} with id {}", params.r#type, params.id),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_parses_without_id_or_params() {
        let request: McpRequest =
            serde_json::from_str(r#"{"method": "get_stats"}"#).unwrap();
        assert_eq!(request.method, "get_stats");
        assert!(request.id.is_none());
        assert!(request.params.is_null());
    }

    #[test]
    fn response_serializes_one_branch() {
        let ok = McpResponse::result(Some(Value::from(1)), Value::from("x"));
        let json = serde_json::to_value(&ok).unwrap();
        assert!(json.get("error").is_none());
        assert_eq!(json["result"], "x");

        let err = McpResponse::error(None, ERR_METHOD_NOT_FOUND, "unknown method: nope");
        let json = serde_json::to_value(&err).unwrap();
        assert!(json.get("result").is_none());
        assert_eq!(json["error"]["code"], ERR_METHOD_NOT_FOUND);
    }
}
