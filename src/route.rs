//! 路由定义模块 - 领域模型
//!
//! 这是纯粹的决策逻辑，不依赖于 DOM 或 web_sys。
//! 每次导航都根据请求路径和认证状态重新求值，不做缓存。

use std::fmt::Display;

/// 应用视图
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AppRoute {
    Login,
    Register,
    /// 控制面板 (需要认证)
    Dashboard,
}

impl AppRoute {
    /// 获取路由对应的规范 URL path
    pub fn to_path(&self) -> &'static str {
        match self {
            Self::Login => "/login",
            Self::Register => "/register",
            Self::Dashboard => "/dashboard",
        }
    }

    /// 定义该路由是否需要认证
    pub fn requires_auth(&self) -> bool {
        matches!(self, Self::Dashboard)
    }
}

impl Display for AppRoute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_path())
    }
}

/// 守卫对单次导航的决定
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteDecision {
    /// 渲染该视图
    Render(AppRoute),
    /// 重定向到该路径（需要再次求值）
    Redirect(&'static str),
}

/// 去掉末尾斜杠，`/dashboard/` 与 `/dashboard` 等价
fn normalize(path: &str) -> &str {
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() { "/" } else { trimmed }
}

/// **核心守卫逻辑：路由决策表**
///
/// | 路径 | 已认证 | 结果 |
/// |---|---|---|
/// | `/`, `/dashboard` | 是 | Dashboard |
/// | `/`, `/dashboard` | 否 | → `/login` |
/// | `/login`, `/register` | 是 | → `/dashboard` |
/// | `/login` / `/register` | 否 | Login / Register |
/// | 其他 | - | → `/` |
pub fn guard(path: &str, is_authenticated: bool) -> RouteDecision {
    match (normalize(path), is_authenticated) {
        ("/" | "/dashboard", true) => RouteDecision::Render(AppRoute::Dashboard),
        ("/" | "/dashboard", false) => RouteDecision::Redirect(AppRoute::Login.to_path()),
        ("/login" | "/register", true) => RouteDecision::Redirect(AppRoute::Dashboard.to_path()),
        ("/login", false) => RouteDecision::Render(AppRoute::Login),
        ("/register", false) => RouteDecision::Render(AppRoute::Register),
        _ => RouteDecision::Redirect("/"),
    }
}

/// 跟随重定向直到得到一个视图
///
/// 返回最终视图以及应写入地址栏的路径。决策表最多经过两次重定向
/// （未知路径 → `/` → `/login`）即可收敛。
pub fn resolve_route(path: &str, is_authenticated: bool) -> (AppRoute, String) {
    let mut current = normalize(path).to_string();
    loop {
        match guard(&current, is_authenticated) {
            RouteDecision::Render(route) => return (route, current),
            RouteDecision::Redirect(next) => current = next.to_string(),
        }
    }
}
