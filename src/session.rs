//! 会话模块
//!
//! 持有当前认证 token，是否已认证完全由 token 是否存在推导。
//! token 被视为不透明凭据：客户端从不解析、校验或检查其过期时间，
//! 只有当使用它的请求失败时才会暴露问题。

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use tracing::info;

/// 不透明的认证 token
#[derive(Clone, PartialEq, Eq)]
pub struct AuthToken(String);

impl AuthToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// 避免 token 出现在日志里
impl fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AuthToken(***)")
    }
}

/// token 持久化后端
pub trait TokenStorage {
    fn load(&self) -> Option<String>;
    fn save(&self, token: &str);
    fn clear(&self);
}

/// 内存存储，克隆体共享同一份数据
#[derive(Clone, Default)]
pub struct MemoryTokenStorage {
    slot: Rc<RefCell<Option<String>>>,
}

impl MemoryTokenStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TokenStorage for MemoryTokenStorage {
    fn load(&self) -> Option<String> {
        self.slot.borrow().clone()
    }

    fn save(&self, token: &str) {
        *self.slot.borrow_mut() = Some(token.to_string());
    }

    fn clear(&self) {
        *self.slot.borrow_mut() = None;
    }
}

/// 会话存储
///
/// 由应用启动时显式创建并注入到各个视图，登出时清空。
#[derive(Clone)]
pub struct SessionStore<S: TokenStorage = MemoryTokenStorage> {
    token: Option<AuthToken>,
    storage: S,
}

impl<S: TokenStorage> SessionStore<S> {
    /// 创建空会话（不读取存储）
    pub fn new(storage: S) -> Self {
        Self {
            token: None,
            storage,
        }
    }

    /// 从存储恢复会话（页面刷新后使用）
    pub fn restore(storage: S) -> Self {
        let token = storage
            .load()
            .filter(|t| !t.is_empty())
            .map(AuthToken::new);
        if token.is_some() {
            info!("session restored from storage");
        }
        Self { token, storage }
    }

    pub fn token(&self) -> Option<&AuthToken> {
        self.token.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// 保存登录得到的 token
    pub fn set_token(&mut self, token: AuthToken) {
        self.storage.save(token.as_str());
        self.token = Some(token);
        info!("session established");
    }

    /// 登出：清除内存和存储中的 token
    pub fn logout(&mut self) {
        self.storage.clear();
        if self.token.take().is_some() {
            info!("session cleared");
        }
    }
}
