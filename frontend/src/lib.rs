//! costwise 前端应用
//!
//! 采用 Context-Driven 架构，业务状态全部来自 `costwise` 核心库：
//! - `web::router`: 路由服务（守卫决策由核心库给出）
//! - `auth`: 会话状态管理
//! - `api`: 按配置创建的 API 客户端
//! - `components`: UI 组件层

mod api;
mod auth;
mod components {
    pub mod dashboard;
    mod item_editor;
    pub mod login;
    pub mod register;
}
pub mod logging;

use crate::api::AppServices;
use crate::auth::AuthContext;
use crate::components::dashboard::DashboardPage;
use crate::components::login::LoginPage;
use crate::components::register::RegisterPage;

use costwise::{AppRoute, ClientConfig};
use leptos::prelude::*;

// 浏览器原生 API 的轻量级封装
pub(crate) mod web {
    pub mod file;
    mod http;
    pub mod router;
    mod storage;

    pub use http::FetchHttpClient;
    pub use storage::BrowserTokenStorage;
}

use web::router::{Router, RouterOutlet};

/// 路由匹配函数
///
/// 根据 AppRoute 枚举返回对应的视图组件。未知路径已被守卫重定向，这里无需 404 页面。
fn route_matcher(route: AppRoute) -> AnyView {
    match route {
        AppRoute::Login => view! { <LoginPage /> }.into_any(),
        AppRoute::Register => view! { <RegisterPage /> }.into_any(),
        AppRoute::Dashboard => view! { <DashboardPage /> }.into_any(),
    }
}

#[component]
pub fn App() -> impl IntoView {
    // 1. 按编译期注入的环境变量创建 API 客户端
    provide_context(AppServices::new(ClientConfig::from_build_env()));

    // 2. 从 LocalStorage 恢复会话
    let auth_ctx = AuthContext::restore();
    provide_context(auth_ctx);

    // 3. 获取认证状态信号，用于注入路由服务
    let is_authenticated = auth_ctx.is_authenticated_signal();

    view! {
        <Router authenticated=is_authenticated>
            <RouterOutlet matcher=route_matcher />
        </Router>
    }
}
