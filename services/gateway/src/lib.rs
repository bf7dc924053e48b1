//! Mock gateway for the marketplace backend
//!
//! Intercepts fetch-shaped requests, matches them against a route table
//! compiled at startup and dispatches them to the auth and catalog handlers.
//! Requests no route accepts are reported as unhandled, never as failures.
//!
//! ```rust,no_run
//! use gateway::{Dispatch, MockGateway, request::GatewayRequest};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let gateway = MockGateway::in_memory()?;
//!     let request = GatewayRequest::get("http://localhost:5173/api/categories");
//!     if let Dispatch::Handled(reply) = gateway.handle(&request).await {
//!         println!("{}", reply.status);
//!     }
//!     Ok(())
//! }
//! ```

use std::sync::Arc;

use anyhow::Result;
use auth::{AuthService, CredentialStore, models::Credentials};
use catalog::{Catalog, CatalogService, models::ProductQuery};
use common::{KeyValueStorage, MemoryStorage, Reply};
use tracing::{debug, warn};

pub mod config;
pub mod pattern;
pub mod request;
pub mod routes;
pub mod server;

use crate::{
    pattern::PathParams,
    request::GatewayRequest,
    routes::{Endpoint, RouteTable},
};

/// Outcome of offering a request to the gateway
#[derive(Debug, Clone, PartialEq)]
pub enum Dispatch {
    /// A route accepted the request
    Handled(Reply),
    /// No route accepted the request
    Unhandled,
}

impl Dispatch {
    /// The reply, if the request was handled
    pub fn reply(self) -> Option<Reply> {
        match self {
            Dispatch::Handled(reply) => Some(reply),
            Dispatch::Unhandled => None,
        }
    }
}

/// Routes intercepted requests to the auth and catalog handlers
#[derive(Clone)]
pub struct MockGateway {
    routes: Arc<RouteTable>,
    auth: AuthService,
    catalog: CatalogService,
}

impl MockGateway {
    /// Create a gateway over the given services with the marketplace routes
    pub fn new(auth: AuthService, catalog: CatalogService) -> Result<Self> {
        let routes = RouteTable::marketplace()?;
        for (method, pattern) in routes.patterns() {
            debug!("Registered mock route {} {}", method, pattern);
        }

        Ok(Self {
            routes: Arc::new(routes),
            auth,
            catalog,
        })
    }

    /// Gateway backed by the given storage and the bundled catalog
    pub fn with_storage(storage: Arc<dyn KeyValueStorage>) -> Result<Self> {
        let store = Arc::new(CredentialStore::new(storage));
        let catalog = Arc::new(Catalog::bundled()?);
        Self::new(AuthService::new(store), CatalogService::new(catalog))
    }

    /// Gateway with fresh in-memory storage
    pub fn in_memory() -> Result<Self> {
        Self::with_storage(Arc::new(MemoryStorage::new()))
    }

    /// The credential store behind the auth handlers
    pub fn credential_store(&self) -> &Arc<CredentialStore> {
        self.auth.store()
    }

    /// Reset users, sessions and the seed flag
    pub async fn reset(&self) {
        self.credential_store().clear_all_auth_data().await;
    }

    /// Offer a request to the route table
    pub async fn handle(&self, request: &GatewayRequest) -> Dispatch {
        let Some((endpoint, params)) = self.routes.resolve(&request.method, request.path()) else {
            warn!(
                "Unhandled request {} {}; no mock route matches",
                request.method, request.url
            );
            return Dispatch::Unhandled;
        };

        debug!("{} {} -> {:?}", request.method, request.url, endpoint);
        let reply = self.dispatch(endpoint, &params, request).await;
        if !reply.status.is_success() {
            debug!(
                "{:?} answered {}: {}",
                endpoint,
                reply.status,
                reply.field("message").unwrap_or("(no body)")
            );
        }
        Dispatch::Handled(reply)
    }

    async fn dispatch(
        &self,
        endpoint: Endpoint,
        params: &PathParams,
        request: &GatewayRequest,
    ) -> Reply {
        let id = params.get("id").unwrap_or_default();

        match endpoint {
            Endpoint::ListCategories => self.catalog.list_categories(),
            Endpoint::GetCategory => self.catalog.get_category(id).into(),
            Endpoint::ListProducts => {
                let query = ProductQuery {
                    category: request
                        .query_param("category")
                        .filter(|category| !category.is_empty()),
                };
                self.catalog.list_products(&query)
            }
            Endpoint::GetProduct => self.catalog.get_product(id).into(),
            Endpoint::Register => {
                let credentials: Credentials = request.json_or_default();
                self.auth.register(&credentials).await.into()
            }
            Endpoint::Login => {
                let credentials: Credentials = request.json_or_default();
                self.auth.login(&credentials).await.into()
            }
            Endpoint::Session => self.auth.session(&request.headers).await.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{Method, StatusCode};

    #[tokio::test]
    async fn test_unhandled_request() {
        let gateway = MockGateway::in_memory().unwrap();

        let dispatch = gateway.handle(&GatewayRequest::get("/api/orders")).await;
        assert_eq!(dispatch, Dispatch::Unhandled);

        let dispatch = gateway
            .handle(&GatewayRequest::new(Method::DELETE, "/api/products/p-001"))
            .await;
        assert_eq!(dispatch.reply(), None);
    }

    #[tokio::test]
    async fn test_empty_category_filter_lists_everything() {
        let gateway = MockGateway::in_memory().unwrap();

        let all = gateway
            .handle(&GatewayRequest::get("/api/products"))
            .await
            .reply()
            .unwrap();
        let empty_filter = gateway
            .handle(&GatewayRequest::get("/api/products?category="))
            .await
            .reply()
            .unwrap();

        assert_eq!(empty_filter.status, StatusCode::OK);
        assert_eq!(all.body, empty_filter.body);
    }

    #[tokio::test]
    async fn test_reset_clears_auth_state() {
        let gateway = MockGateway::in_memory().unwrap();
        gateway
            .handle(&GatewayRequest::post_json(
                "/api/auth/register",
                &Credentials::new("a@b.com", "x"),
            ))
            .await;
        assert!(gateway.credential_store().is_seeded().await);

        gateway.reset().await;

        assert!(!gateway.credential_store().is_seeded().await);
        assert!(gateway.credential_store().users().await.is_empty());
    }
}
