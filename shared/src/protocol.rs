use crate::{Item, ItemId, LoginRequest, RegisterRequest, RegisteredUser, TokenResponse};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;

/// HTTP Methods for API Requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Describes one endpoint of the inventory service: where it lives and what it returns.
///
/// Paths are relative to the configured API base and always carry the trailing
/// slash the service expects.
pub trait Endpoint {
    /// The response type returned by this request.
    type Response;
    /// The HTTP method.
    const METHOD: HttpMethod;
    /// Whether the request must carry the `Authorization` header.
    const AUTHENTICATED: bool;

    /// The URL path (or suffix).
    fn path(&self) -> Cow<'static, str>;
}

// =========================================================
// Auth Endpoints
// =========================================================

/// Exchange credentials for a token
impl Endpoint for LoginRequest {
    type Response = TokenResponse;
    const METHOD: HttpMethod = HttpMethod::Post;
    const AUTHENTICATED: bool = false;

    fn path(&self) -> Cow<'static, str> {
        Cow::Borrowed("/auth/token/login/")
    }
}

/// Create a new user account
impl Endpoint for RegisterRequest {
    type Response = RegisteredUser;
    const METHOD: HttpMethod = HttpMethod::Post;
    const AUTHENTICATED: bool = false;

    fn path(&self) -> Cow<'static, str> {
        Cow::Borrowed("/auth/users/")
    }
}

// =========================================================
// Item Endpoints
// =========================================================

/// List all items of the current user
#[derive(Debug, Clone, Copy)]
pub struct ListItems;

impl Endpoint for ListItems {
    type Response = Vec<Item>;
    const METHOD: HttpMethod = HttpMethod::Get;
    const AUTHENTICATED: bool = true;

    fn path(&self) -> Cow<'static, str> {
        Cow::Borrowed("/items/")
    }
}

/// Create an item (multipart body)
#[derive(Debug, Clone, Copy)]
pub struct CreateItem;

impl Endpoint for CreateItem {
    type Response = Item;
    const METHOD: HttpMethod = HttpMethod::Post;
    const AUTHENTICATED: bool = true;

    fn path(&self) -> Cow<'static, str> {
        Cow::Borrowed("/items/")
    }
}

/// Replace an item (multipart body, full replace)
#[derive(Debug, Clone, Copy)]
pub struct UpdateItem {
    pub id: ItemId,
}

impl Endpoint for UpdateItem {
    // The service echoes the stored record; callers re-fetch instead of using it.
    type Response = ();
    const METHOD: HttpMethod = HttpMethod::Put;
    const AUTHENTICATED: bool = true;

    fn path(&self) -> Cow<'static, str> {
        Cow::Owned(format!("/items/{}/", self.id))
    }
}

/// Delete an item
#[derive(Debug, Clone, Copy)]
pub struct DeleteItem {
    pub id: ItemId,
}

impl Endpoint for DeleteItem {
    type Response = ();
    const METHOD: HttpMethod = HttpMethod::Delete;
    const AUTHENTICATED: bool = true;

    fn path(&self) -> Cow<'static, str> {
        Cow::Owned(format!("/items/{}/", self.id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_paths_keep_trailing_slash() {
        let id = ItemId::new(42);
        assert_eq!(ListItems.path(), "/items/");
        assert_eq!(UpdateItem { id }.path(), "/items/42/");
        assert_eq!(DeleteItem { id }.path(), "/items/42/");
    }

    #[test]
    fn test_auth_endpoints_are_anonymous() {
        assert!(!<LoginRequest as Endpoint>::AUTHENTICATED);
        assert!(!<RegisterRequest as Endpoint>::AUTHENTICATED);
        assert!(<DeleteItem as Endpoint>::AUTHENTICATED);
    }
}
