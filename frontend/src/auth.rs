//! 认证模块
//!
//! 管理会话状态，与路由系统解耦。
//! 路由服务通过注入的认证信号来检查认证状态，登录 / 登出后无需手动导航。

use crate::web::{BrowserTokenStorage, FetchHttpClient};
use costwise::{AuthApi, AuthToken, ClientResult, SessionStore};
use costwise_shared::RegisteredUser;
use leptos::prelude::*;

/// 认证上下文
///
/// 会话存放在信号中，通过 Context 在组件间共享。
#[derive(Clone, Copy)]
pub struct AuthContext {
    pub session: RwSignal<SessionStore<BrowserTokenStorage>>,
}

impl AuthContext {
    /// 从 LocalStorage 恢复上次的会话
    pub fn restore() -> Self {
        Self {
            session: RwSignal::new(SessionStore::restore(BrowserTokenStorage)),
        }
    }

    /// 获取认证状态信号（用于路由服务注入）
    pub fn is_authenticated_signal(&self) -> Signal<bool> {
        let session = self.session;
        Signal::derive(move || session.with(|s| s.is_authenticated()))
    }

    /// 当前 token 的副本（不追踪依赖）
    pub fn token(&self) -> Option<AuthToken> {
        self.session
            .try_with_untracked(|s| s.token().cloned())
            .flatten()
    }
}

/// 从 Context 获取认证上下文
pub fn use_auth() -> AuthContext {
    use_context::<AuthContext>().expect("AuthContext should be provided")
}

/// 登录并保存 token
///
/// 成功后认证信号变化，路由服务会自动跳转到面板。
pub async fn login(
    ctx: AuthContext,
    api: &AuthApi<FetchHttpClient>,
    username: &str,
    password: &str,
) -> ClientResult<()> {
    let token = api.login(username, password).await?;
    ctx.session.try_update(|s| s.set_token(token));
    Ok(())
}

/// 注册新账号，不会自动登录
pub async fn register(
    api: &AuthApi<FetchHttpClient>,
    username: &str,
    password: &str,
    confirm_password: &str,
) -> ClientResult<RegisteredUser> {
    api.register(username, password, confirm_password).await
}

/// 注销并清除状态
///
/// 导航将由路由服务的认证状态监听自动处理。
pub fn logout(ctx: &AuthContext) {
    ctx.session.update(|s| s.logout());
}
