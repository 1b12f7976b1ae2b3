//! 认证 API 客户端
//!
//! 只负责与认证服务交互，保存 token 是调用方的职责。

use crate::api::{ServiceClient, decode};
use crate::error::{ClientError, ClientResult};
use crate::request::HttpClient;
use crate::session::AuthToken;
use costwise_shared::{FieldErrors, LoginRequest, RegisterRequest, RegisteredUser};
use serde::Deserialize;
use tracing::warn;

/// 登录失败时认证服务返回的结构
#[derive(Debug, Default, Deserialize)]
struct LoginRejection {
    #[serde(default)]
    non_field_errors: Vec<String>,
}

#[derive(Clone)]
pub struct AuthApi<C> {
    service: ServiceClient<C>,
}

impl<C: HttpClient> AuthApi<C> {
    pub fn new(service: ServiceClient<C>) -> Self {
        Self { service }
    }

    /// 用户名密码换取 token
    ///
    /// 服务端拒绝时返回 [`ClientError::InvalidCredentials`]，消息取
    /// `non_field_errors` 的第一条。
    pub async fn login(&self, username: &str, password: &str) -> ClientResult<AuthToken> {
        let body = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };
        let req = self
            .service
            .request(&body, None)
            .with_json(&body)
            .map_err(|e| ClientError::InvalidDraft(e.to_string()))?;

        let resp = self.service.execute(req).await?;

        if !resp.ok() {
            let rejection = resp.json::<LoginRejection>().unwrap_or_default();
            warn!(status = resp.status, "login rejected");
            return Err(ClientError::invalid_credentials(
                rejection.non_field_errors.first().map(String::as_str),
            ));
        }

        let data = decode::<LoginRequest>(&resp)?;
        if data.auth_token.is_empty() {
            return Err(ClientError::MalformedResponse("empty auth_token".to_string()));
        }
        Ok(AuthToken::new(data.auth_token))
    }

    /// 注册新用户
    ///
    /// 两次密码不一致时直接返回 [`ClientError::PasswordMismatch`]，不发出任何请求。
    pub async fn register(
        &self,
        username: &str,
        password: &str,
        confirm_password: &str,
    ) -> ClientResult<RegisteredUser> {
        if password != confirm_password {
            return Err(ClientError::PasswordMismatch);
        }

        let body = RegisterRequest {
            username: username.to_string(),
            password: password.to_string(),
            re_password: confirm_password.to_string(),
        };
        let req = self
            .service
            .request(&body, None)
            .with_json(&body)
            .map_err(|e| ClientError::InvalidDraft(e.to_string()))?;

        let resp = self.service.execute(req).await?;

        if !resp.ok() {
            let fields = resp.json::<FieldErrors>().unwrap_or_default();
            warn!(status = resp.status, "registration rejected");
            return Err(ClientError::registration_rejected(fields));
        }

        decode::<RegisterRequest>(&resp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::{HttpMethod, MockHttpClient, RequestBody};
    use crate::session::{MemoryTokenStorage, SessionStore};
    use serde_json::json;
    use std::rc::Rc;

    const BASE: &str = "http://api.test/api";
    const LOGIN_URL: &str = "http://api.test/api/auth/token/login/";
    const USERS_URL: &str = "http://api.test/api/auth/users/";

    fn create_api() -> (AuthApi<Rc<MockHttpClient>>, Rc<MockHttpClient>) {
        let client = Rc::new(MockHttpClient::new());
        let api = AuthApi::new(ServiceClient::new(client.clone(), BASE));
        (api, client)
    }

    #[tokio::test]
    async fn test_login_returns_token() {
        let (api, client) = create_api();
        client.mock_response(HttpMethod::Post, LOGIN_URL, 200, json!({"auth_token": "abc123"}));

        let token = api.login("alice", "secret").await.unwrap();
        assert_eq!(token.as_str(), "abc123");

        let requests = client.requests.borrow();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].header("Authorization"), None);
        let RequestBody::Json(body) = &requests[0].body else {
            panic!("login body must be JSON");
        };
        let body: serde_json::Value = serde_json::from_str(body).unwrap();
        assert_eq!(body, json!({"username": "alice", "password": "secret"}));
    }

    #[tokio::test]
    async fn test_login_rejected_keeps_session_unset() {
        let (api, client) = create_api();
        client.mock_response(
            HttpMethod::Post,
            LOGIN_URL,
            400,
            json!({"non_field_errors": ["Unable to log in"]}),
        );
        let mut session = SessionStore::new(MemoryTokenStorage::new());

        let result = api.login("alice", "wrong").await;
        if let Ok(token) = &result {
            session.set_token(token.clone());
        }

        let err = result.unwrap_err();
        assert_eq!(
            err,
            ClientError::InvalidCredentials {
                message: "Unable to log in".to_string()
            }
        );
        assert_eq!(err.user_message(), "Unable to log in");
        assert!(!session.is_authenticated());
    }

    #[tokio::test]
    async fn test_login_rejected_without_body_uses_default_message() {
        let (api, client) = create_api();
        client.mock_empty(HttpMethod::Post, LOGIN_URL, 401);

        let err = api.login("bob", "nope").await.unwrap_err();
        assert_eq!(err.user_message(), "Login failed");
    }

    #[tokio::test]
    async fn test_login_network_error() {
        let (api, client) = create_api();
        client.mock_network_error(HttpMethod::Post, LOGIN_URL, "connection refused");

        let err = api.login("alice", "secret").await.unwrap_err();
        assert_eq!(err, ClientError::NetworkError("connection refused".to_string()));
    }

    #[tokio::test]
    async fn test_login_malformed_success_body() {
        let (api, client) = create_api();
        client.mock_response(HttpMethod::Post, LOGIN_URL, 200, json!({"token": "x"}));

        let err = api.login("alice", "secret").await.unwrap_err();
        assert!(matches!(err, ClientError::MalformedResponse(_)));
    }

    #[tokio::test]
    async fn test_register_password_mismatch_sends_nothing() {
        let (api, client) = create_api();
        for (password, confirm) in [("a", "b"), ("secret", "Secret"), ("", " "), ("pw", "")] {
            let err = api.register("carol", password, confirm).await.unwrap_err();
            assert_eq!(err, ClientError::PasswordMismatch);
        }
        assert_eq!(client.request_count(), 0);
    }

    #[tokio::test]
    async fn test_register_success() {
        let (api, client) = create_api();
        client.mock_response(
            HttpMethod::Post,
            USERS_URL,
            201,
            json!({"email": "", "username": "carol", "id": 9}),
        );

        let user = api.register("carol", "s3cret!", "s3cret!").await.unwrap();
        assert_eq!(user.username, "carol");
        assert_eq!(user.id, Some(9));

        let requests = client.requests.borrow();
        let RequestBody::Json(body) = &requests[0].body else {
            panic!("register body must be JSON");
        };
        let body: serde_json::Value = serde_json::from_str(body).unwrap();
        assert_eq!(body["re_password"], "s3cret!");
    }

    #[tokio::test]
    async fn test_register_rejected_carries_first_field_error() {
        let (api, client) = create_api();
        client.mock_response(
            HttpMethod::Post,
            USERS_URL,
            400,
            json!({
                "password": ["This password is too short."],
                "username": ["A user with that username already exists."]
            }),
        );

        let err = api.register("carol", "x", "x").await.unwrap_err();
        let ClientError::RegistrationRejected { message, fields } = err else {
            panic!("expected RegistrationRejected");
        };
        assert_eq!(message, "A user with that username already exists.");
        assert_eq!(
            fields.get("password"),
            Some(&["This password is too short.".to_string()][..])
        );
    }

    #[tokio::test]
    async fn test_register_rejected_with_unparseable_body() {
        let (api, client) = create_api();
        client.mock_response(HttpMethod::Post, USERS_URL, 500, json!("boom"));

        let err = api.register("carol", "x", "x").await.unwrap_err();
        assert_eq!(err.user_message(), "Registration failed");
    }
}
