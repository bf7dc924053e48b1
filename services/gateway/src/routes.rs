//! Route table of the mock backend

use axum::http::Method;

use crate::pattern::{PathParams, PatternError, RoutePattern};

/// Handler an intercepted request is dispatched to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    ListCategories,
    GetCategory,
    ListProducts,
    GetProduct,
    Register,
    Login,
    Session,
}

/// Every route served by the gateway, in evaluation order
pub fn marketplace_routes() -> [(Method, &'static str, Endpoint); 7] {
    [
        (Method::GET, "*/api/categories", Endpoint::ListCategories),
        (Method::GET, "*/api/categories/:id", Endpoint::GetCategory),
        (Method::GET, "*/api/products", Endpoint::ListProducts),
        (Method::GET, "*/api/products/:id", Endpoint::GetProduct),
        (Method::POST, "*/api/auth/register", Endpoint::Register),
        (Method::POST, "*/api/auth/login", Endpoint::Login),
        (Method::GET, "*/api/auth/session", Endpoint::Session),
    ]
}

#[derive(Debug, Clone)]
struct CompiledRoute {
    method: Method,
    pattern: RoutePattern,
    endpoint: Endpoint,
}

/// Route table compiled once at startup
#[derive(Debug, Clone)]
pub struct RouteTable {
    routes: Vec<CompiledRoute>,
}

impl RouteTable {
    /// Compile a table of `(method, pattern, endpoint)` entries
    pub fn compile(entries: &[(Method, &str, Endpoint)]) -> Result<Self, PatternError> {
        let routes = entries
            .iter()
            .map(|(method, pattern, endpoint)| {
                Ok(CompiledRoute {
                    method: method.clone(),
                    pattern: RoutePattern::compile(pattern)?,
                    endpoint: *endpoint,
                })
            })
            .collect::<Result<_, PatternError>>()?;

        Ok(Self { routes })
    }

    /// The default marketplace table
    pub fn marketplace() -> Result<Self, PatternError> {
        Self::compile(&marketplace_routes())
    }

    /// First route whose method and pattern accept the request
    pub fn resolve(&self, method: &Method, path: &str) -> Option<(Endpoint, PathParams)> {
        self.routes
            .iter()
            .filter(|route| route.method == *method)
            .find_map(|route| {
                route
                    .pattern
                    .matches(path)
                    .map(|params| (route.endpoint, params))
            })
    }

    /// Patterns in evaluation order, for logging
    pub fn patterns(&self) -> impl Iterator<Item = (&Method, &str)> {
        self.routes
            .iter()
            .map(|route| (&route.method, route.pattern.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> RouteTable {
        RouteTable::marketplace().unwrap()
    }

    #[test]
    fn test_resolves_every_endpoint() {
        let table = table();
        let cases = [
            (Method::GET, "/api/categories", Endpoint::ListCategories),
            (Method::GET, "/api/categories/vidro", Endpoint::GetCategory),
            (Method::GET, "/api/products", Endpoint::ListProducts),
            (Method::GET, "/api/products/p-001", Endpoint::GetProduct),
            (Method::POST, "/api/auth/register", Endpoint::Register),
            (Method::POST, "/api/auth/login", Endpoint::Login),
            (Method::GET, "/api/auth/session", Endpoint::Session),
        ];

        for (method, path, expected) in cases {
            let (endpoint, _) = table.resolve(&method, path).unwrap();
            assert_eq!(endpoint, expected, "{method} {path}");
        }
    }

    #[test]
    fn test_binds_id() {
        let (_, params) = table()
            .resolve(&Method::GET, "http://localhost:5173/api/categories/metal")
            .unwrap();
        assert_eq!(params.get("id"), Some("metal"));
    }

    #[test]
    fn test_method_must_match() {
        let table = table();
        assert!(table.resolve(&Method::POST, "/api/categories").is_none());
        assert!(table.resolve(&Method::GET, "/api/auth/login").is_none());
        assert!(table.resolve(&Method::DELETE, "/api/products/p-001").is_none());
    }

    #[test]
    fn test_unknown_path() {
        assert!(table().resolve(&Method::GET, "/api/orders").is_none());
        assert!(table().resolve(&Method::GET, "/health").is_none());
    }

    #[test]
    fn test_no_two_routes_accept_the_same_request() {
        let table = table();
        let paths = [
            "/api/categories",
            "/api/categories/x",
            "/api/products",
            "/api/products/x",
            "/api/auth/register",
            "/api/auth/login",
            "/api/auth/session",
        ];

        for path in paths {
            for method in [Method::GET, Method::POST] {
                let matching = table
                    .routes
                    .iter()
                    .filter(|route| route.method == method && route.pattern.matches(path).is_some())
                    .count();
                assert!(matching <= 1, "{method} {path} matched {matching} routes");
            }
        }
    }

    #[test]
    fn test_patterns_listed_in_order() {
        let table = table();
        let first = table.patterns().next().unwrap();
        assert_eq!(first, (&Method::GET, "*/api/categories"));
        assert_eq!(table.patterns().count(), marketplace_routes().len());
    }
}
