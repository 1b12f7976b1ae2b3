//! costwise 客户端核心
//!
//! 与平台无关的会话与数据同步模型，浏览器端（`costwise-frontend`）与原生测试共用：
//! - `config`: 运行时配置（API 地址、分页大小）
//! - `request`: HTTP 抽象层，具体传输由调用方注入
//! - `session`: 认证 token 的持有与持久化
//! - `auth` / `items`: 远端服务的 API 客户端
//! - `route`: 路由守卫决策表
//! - `dashboard`: 物品面板的视图模型

pub mod api;
pub mod auth;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod items;
pub mod request;
pub mod route;
pub mod session;

#[cfg(test)]
mod testing;

pub use api::ServiceClient;
pub use auth::AuthApi;
pub use config::ClientConfig;
pub use dashboard::{DashboardModel, FetchTicket, ItemDraft, Pagination, Phase, SubmitPlan};
pub use error::{ClientError, ClientResult};
pub use items::{ImageUpload, ItemForm, ItemsApi};
pub use request::{FormPart, HttpClient, HttpRequest, HttpResponse, RequestBody, TransportError};
pub use route::{AppRoute, RouteDecision, guard, resolve_route};
pub use session::{AuthToken, MemoryTokenStorage, SessionStore, TokenStorage};

pub use costwise_shared as shared;
