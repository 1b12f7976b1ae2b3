//! 路由服务
//!
//! 所有对 window.history 的操作都集中在此模块。守卫决策完全委托给核心库的
//! [`resolve_route`]：主动导航、浏览器前进/后退以及认证状态变化都会重新求值，
//! 被重定向时地址栏写入最终路径。

use costwise::{AppRoute, resolve_route};
use leptos::prelude::*;
use tracing::info;
use wasm_bindgen::prelude::*;

/// 写入地址栏的方式
#[derive(Clone, Copy, PartialEq, Eq)]
enum HistoryMode {
    /// 新增一条历史记录
    Push,
    /// 覆盖当前记录，后退时不会回到被拒绝的地址
    Replace,
}

fn location_path() -> String {
    web_sys::window()
        .and_then(|w| w.location().pathname().ok())
        .unwrap_or_else(|| "/".to_string())
}

fn write_history(path: &str, mode: HistoryMode) {
    let Some(history) = web_sys::window().and_then(|w| w.history().ok()) else {
        return;
    };
    let result = match mode {
        HistoryMode::Push => history.push_state_with_url(&JsValue::NULL, "", Some(path)),
        HistoryMode::Replace => history.replace_state_with_url(&JsValue::NULL, "", Some(path)),
    };
    if result.is_err() {
        tracing::warn!(path, "failed to update browser history");
    }
}

/// 路由器服务
///
/// 认证状态以信号形式注入，路由模块不依赖认证模块。
#[derive(Clone, Copy)]
pub struct RouterService {
    route: RwSignal<AppRoute>,
    authenticated: Signal<bool>,
}

impl RouterService {
    fn new(authenticated: Signal<bool>) -> Self {
        let requested = location_path();
        let (route, resolved) = resolve_route(&requested, authenticated.get_untracked());
        if resolved != requested {
            write_history(&resolved, HistoryMode::Replace);
        }

        Self {
            route: RwSignal::new(route),
            authenticated,
        }
    }

    pub fn current_route(&self) -> ReadSignal<AppRoute> {
        self.route.read_only()
    }

    /// 对请求路径执行守卫，写入地址栏并切换视图
    fn apply(&self, requested: &str, mode: HistoryMode) {
        let (route, resolved) = resolve_route(requested, self.authenticated.get_untracked());
        if resolved != requested {
            info!(from = requested, to = %resolved, "[Router] redirected");
        }
        match mode {
            HistoryMode::Push => write_history(&resolved, mode),
            // 浏览器已经切换到 requested，只有被重定向时才需要改写
            HistoryMode::Replace if resolved != requested => write_history(&resolved, mode),
            HistoryMode::Replace => {}
        }
        self.route.set(route);
    }

    /// 用户发起的导航
    pub fn navigate(&self, path: &str) {
        self.apply(path, HistoryMode::Push);
    }

    fn listen_popstate(self) {
        let on_popstate = Closure::<dyn Fn()>::new(move || {
            self.apply(&location_path(), HistoryMode::Replace);
        });

        if let Some(window) = web_sys::window() {
            let _ = window
                .add_event_listener_with_callback("popstate", on_popstate.as_ref().unchecked_ref());
        }

        // 监听器与页面同寿命
        on_popstate.forget();
    }

    /// 登录成功 / 登出后重新求值当前视图
    fn follow_auth_changes(self) {
        Effect::new(move |_| {
            let authenticated = self.authenticated.get();
            let current = self.route.get_untracked();
            let (next, resolved) = resolve_route(current.to_path(), authenticated);
            if next != current {
                info!(authenticated, to = %resolved, "[Router] auth state changed");
                write_history(&resolved, HistoryMode::Push);
                self.route.set(next);
            }
        });
    }
}

/// 从 Context 获取路由服务
pub fn use_router() -> RouterService {
    use_context::<RouterService>()
        .expect("RouterService not found in context. Ensure Router is provided.")
}

// ============================================================================
// UI 组件
// ============================================================================

/// 路由器根组件，应在 App 根部使用
#[component]
pub fn Router(authenticated: Signal<bool>, children: Children) -> impl IntoView {
    let router = RouterService::new(authenticated);
    router.listen_popstate();
    router.follow_auth_changes();
    provide_context(router);

    children()
}

/// 根据当前路由渲染对应的页面
#[component]
pub fn RouterOutlet(matcher: fn(AppRoute) -> AnyView) -> impl IntoView {
    let router = use_router();

    move || matcher(router.current_route().get())
}

/// 站内链接，点击时走路由服务而不是整页跳转
#[component]
pub fn Link(
    #[prop(into)] to: String,
    #[prop(into, optional)] class: String,
    children: Children,
) -> impl IntoView {
    let router = use_router();

    let target = to.clone();
    let on_click = move |ev: leptos::web_sys::MouseEvent| {
        ev.prevent_default();
        router.navigate(&target);
    };

    view! {
        <a href=to class=class on:click=on_click>
            {children()}
        </a>
    }
}
