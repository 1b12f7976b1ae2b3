//! token 持久化
//!
//! 基于 `web_sys::Storage`（window.localStorage）实现核心库的 [`TokenStorage`]，
//! 刷新页面后会话仍然有效。存储不可用（隐私模式等）时退化为仅内存会话。

use costwise::TokenStorage;
use tracing::warn;

const TOKEN_KEY: &str = "costwise_token";

fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok().flatten()
}

#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserTokenStorage;

impl TokenStorage for BrowserTokenStorage {
    fn load(&self) -> Option<String> {
        local_storage()?.get_item(TOKEN_KEY).ok().flatten()
    }

    fn save(&self, token: &str) {
        let saved = local_storage().is_some_and(|s| s.set_item(TOKEN_KEY, token).is_ok());
        if !saved {
            warn!("failed to persist session token");
        }
    }

    fn clear(&self) {
        if let Some(storage) = local_storage() {
            let _ = storage.remove_item(TOKEN_KEY);
        }
    }
}
