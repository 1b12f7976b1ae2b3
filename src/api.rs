use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};
use crate::request::{HttpClient, HttpRequest, HttpResponse};
use crate::session::AuthToken;
use costwise_shared::protocol::Endpoint;
use costwise_shared::{HEADER_AUTHORIZATION, authorization_value};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

/// 远端服务的公共请求管道
///
/// 负责拼接 URL、附加认证头并把传输失败翻译为 [`ClientError::NetworkError`]。
/// 这里接受任何实现了 HttpClient 的客户端，从而解耦了具体的 HTTP 实现。
#[derive(Clone)]
pub struct ServiceClient<C> {
    client: C,
    base_url: String,
}

impl<C: HttpClient> ServiceClient<C> {
    pub fn new(client: C, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    pub fn from_config(client: C, config: &ClientConfig) -> Self {
        Self::new(client, config.api_base_url.clone())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    /// 为端点构造请求
    ///
    /// 只有需要认证的端点才附加 `Authorization: Token <token>`，
    /// 匿名端点即使传入 token 也不会携带。
    pub(crate) fn request<E: Endpoint>(&self, endpoint: &E, token: Option<&AuthToken>) -> HttpRequest {
        let url = self.url(&endpoint.path());
        let req = HttpRequest::new(&url, E::METHOD).with_header("Accept", "application/json");

        if !E::AUTHENTICATED {
            return req;
        }
        match token {
            Some(token) => req.with_header(HEADER_AUTHORIZATION, &authorization_value(token.as_str())),
            None => {
                warn!(method = %E::METHOD, %url, "authenticated endpoint called without token");
                req
            }
        }
    }

    pub(crate) async fn execute(&self, req: HttpRequest) -> ClientResult<HttpResponse> {
        let method = req.method;
        let url = req.url.clone();
        debug!(%method, %url, "sending request");

        match self.client.send(req).await {
            Ok(resp) => {
                debug!(%method, %url, status = resp.status, "response received");
                Ok(resp)
            }
            Err(e) => {
                warn!(%method, %url, error = %e, "transport failure");
                Err(ClientError::NetworkError(e.to_string()))
            }
        }
    }
}

/// 按端点声明的响应类型解析 2xx 响应体
pub(crate) fn decode<E>(resp: &HttpResponse) -> ClientResult<E::Response>
where
    E: Endpoint,
    E::Response: DeserializeOwned,
{
    resp.json()
        .map_err(|e| ClientError::MalformedResponse(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::MockHttpClient;
    use costwise_shared::protocol::{DeleteItem, ListItems};
    use costwise_shared::{ItemId, LoginRequest, TokenResponse};

    #[test]
    fn test_url_joins_without_double_slash() {
        let service = ServiceClient::new(MockHttpClient::new(), "http://api.test/api/");
        assert_eq!(service.base_url(), "http://api.test/api");
        assert_eq!(service.url("/items/"), "http://api.test/api/items/");
        assert_eq!(service.url("items/"), "http://api.test/api/items/");
    }

    #[test]
    fn test_request_attaches_token_header() {
        let service = ServiceClient::new(MockHttpClient::new(), "http://api.test/api");
        let token = AuthToken::new("abc");

        let req = service.request(&ListItems, Some(&token));
        assert_eq!(req.header("Authorization"), Some("Token abc"));

        let req = service.request(&DeleteItem { id: ItemId::new(3) }, Some(&token));
        assert_eq!(req.header("Authorization"), Some("Token abc"));
        assert_eq!(req.url, "http://api.test/api/items/3/");
    }

    #[test]
    fn test_anonymous_endpoint_never_sends_token() {
        let service = ServiceClient::new(MockHttpClient::new(), "http://api.test/api");
        let login = LoginRequest {
            username: "alice".to_string(),
            password: "pw".to_string(),
        };

        let req = service.request(&login, Some(&AuthToken::new("abc")));
        assert_eq!(req.header("Authorization"), None);
        assert_eq!(req.header("Accept"), Some("application/json"));
    }

    #[test]
    fn test_decode_uses_endpoint_response_type() {
        let resp = HttpResponse::new(200, r#"{"auth_token": "t0k"}"#.to_string());
        let data: TokenResponse = decode::<LoginRequest>(&resp).unwrap();
        assert_eq!(data.auth_token, "t0k");

        let resp = HttpResponse::new(200, r#"{"items": []}"#.to_string());
        assert!(matches!(
            decode::<ListItems>(&resp),
            Err(ClientError::MalformedResponse(_))
        ));
    }
}
