pub mod auth_routes;
pub mod user_routes;

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use axum::Router;
use axum::http::Method;
use thiserror::Error;

use crate::config::AppConfig;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    #[error("Invalid route name \"{0}\"")]
    UnknownRoute(String),
    #[error("route \"{route}\" requires parameter \"{param}\"")]
    MissingParameter {
        route: &'static str,
        param: &'static str,
    },
    #[error("route \"{route}\" has no identifier left for a positional parameter")]
    UnexpectedParameter { route: &'static str },
}

/// Every named API route. The HTTP router is built from this table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RouteName {
    Login,
    UsersCollection,
    UserItem,
    CreateUser,
    UpdateUser,
    DeleteUser,
}

impl RouteName {
    pub const ALL: [RouteName; 6] = [
        RouteName::Login,
        RouteName::UsersCollection,
        RouteName::UserItem,
        RouteName::CreateUser,
        RouteName::UpdateUser,
        RouteName::DeleteUser,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RouteName::Login => "api_auth_login",
            RouteName::UsersCollection => "api_users_get_collection",
            RouteName::UserItem => "api_users_get_item",
            RouteName::CreateUser => "api_users_post_collection",
            RouteName::UpdateUser => "api_users_put_item",
            RouteName::DeleteUser => "api_users_delete_item",
        }
    }

    pub fn method(&self) -> Method {
        match self {
            RouteName::Login | RouteName::CreateUser => Method::POST,
            RouteName::UsersCollection | RouteName::UserItem => Method::GET,
            RouteName::UpdateUser => Method::PUT,
            RouteName::DeleteUser => Method::DELETE,
        }
    }

    /// Path template in axum syntax.
    pub fn path(&self) -> &'static str {
        match self {
            RouteName::Login => "/api/login",
            RouteName::UsersCollection | RouteName::CreateUser => "/api/users",
            RouteName::UserItem | RouteName::UpdateUser | RouteName::DeleteUser => {
                "/api/users/{id}"
            }
        }
    }

    /// Path parameters, in the order positional values fill them.
    pub fn identifiers(&self) -> &'static [&'static str] {
        match self {
            RouteName::UserItem | RouteName::UpdateUser | RouteName::DeleteUser => &["id"],
            _ => &[],
        }
    }
}

impl fmt::Display for RouteName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RouteName {
    type Err = RouteError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        RouteName::ALL
            .into_iter()
            .find(|route| route.as_str() == name)
            .ok_or_else(|| RouteError::UnknownRoute(name.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteParam {
    /// Fills the next unused identifier of the route.
    Positional(String),
    Named(String, String),
}

impl RouteParam {
    pub fn positional(value: impl ToString) -> Self {
        RouteParam::Positional(value.to_string())
    }

    pub fn named(name: impl Into<String>, value: impl ToString) -> Self {
        RouteParam::Named(name.into(), value.to_string())
    }
}

/// Resolve a route name and its parameters to `(method, uri)`.
///
/// Parameters that are not path identifiers end up in the query string.
pub fn create_route(name: &str, params: &[RouteParam]) -> Result<(Method, String), RouteError> {
    let route: RouteName = name.parse()?;
    let mut identifiers = route.identifiers().iter();
    let mut values: Vec<(String, String)> = Vec::with_capacity(params.len());

    for param in params {
        match param {
            RouteParam::Positional(value) => {
                let identifier = identifiers.next().ok_or(RouteError::UnexpectedParameter {
                    route: route.as_str(),
                })?;
                values.push((identifier.to_string(), value.clone()));
            }
            RouteParam::Named(key, value) => values.push((key.clone(), value.clone())),
        }
    }

    let mut uri = route.path().to_string();
    for identifier in route.identifiers() {
        let index = values
            .iter()
            .position(|(key, _)| key == identifier)
            .ok_or(RouteError::MissingParameter {
                route: route.as_str(),
                param: *identifier,
            })?;
        let (_, value) = values.remove(index);
        uri = uri.replace(&format!("{{{}}}", identifier), &urlencoding::encode(&value));
    }

    if !values.is_empty() {
        let query = values
            .iter()
            .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&");
        uri.push('?');
        uri.push_str(&query);
    }

    Ok((route.method(), uri))
}

/// All API routes; user routes sit behind the JWT middleware.
pub fn api_routes(config: Arc<AppConfig>) -> Router {
    Router::new()
        .merge(auth_routes::auth_routes())
        .merge(user_routes::user_routes(config))
}
