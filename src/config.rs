//! 运行时配置
//!
//! 配置项通过键查找读取，读不到（或为空）时使用默认值。
//! 浏览器端在编译期由构建工具注入环境变量，原生环境直接读取进程环境变量。

use tracing::warn;

/// 这些是默认值，如果环境中没有定义，则使用这些值
pub const DEFAULT_API_PATH: &str = "http://localhost:8000/api";
pub const DEFAULT_PAGE_SIZE: usize = 5;

pub const API_PATH_VAR: &str = "COSTWISE_API_PATH";
pub const PAGE_SIZE_VAR: &str = "COSTWISE_PAGE_SIZE";

/// 客户端配置
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// REST API 根地址（不含末尾斜杠）
    pub api_base_url: String,
    /// 面板每页展示的物品数
    pub page_size: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_PATH.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl ClientConfig {
    /// 从任意键值来源构造配置
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let api_base_url = read(API_PATH_VAR)
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or_else(|| DEFAULT_API_PATH.to_string());

        let page_size = match read(PAGE_SIZE_VAR) {
            None => DEFAULT_PAGE_SIZE,
            Some(raw) => match raw.parse::<usize>() {
                Ok(size) if size > 0 => size,
                _ => {
                    warn!(value = %raw, "invalid {}, using default", PAGE_SIZE_VAR);
                    DEFAULT_PAGE_SIZE
                }
            },
        };

        Self {
            api_base_url,
            page_size,
        }
    }

    /// 读取进程环境变量
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// 读取编译期注入的环境变量（WASM 构建使用）
    pub fn from_build_env() -> Self {
        Self::from_lookup(|key| match key {
            API_PATH_VAR => option_env!("COSTWISE_API_PATH").map(str::to_string),
            PAGE_SIZE_VAR => option_env!("COSTWISE_PAGE_SIZE").map(str::to_string),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = ClientConfig::from_lookup(|_| None);
        assert_eq!(config, ClientConfig::default());
        assert_eq!(config.api_base_url, "http://localhost:8000/api");
    }

    #[test]
    fn test_overrides_and_trailing_slash() {
        let config = ClientConfig::from_lookup(lookup_from(&[
            (API_PATH_VAR, "https://inventory.example.com/api/"),
            (PAGE_SIZE_VAR, "10"),
        ]));
        assert_eq!(config.api_base_url, "https://inventory.example.com/api");
        assert_eq!(config.page_size, 10);
    }

    #[test]
    fn test_blank_and_invalid_values_fall_back() {
        let config = ClientConfig::from_lookup(lookup_from(&[
            (API_PATH_VAR, "   "),
            (PAGE_SIZE_VAR, "0"),
        ]));
        assert_eq!(config, ClientConfig::default());

        let config = ClientConfig::from_lookup(lookup_from(&[(PAGE_SIZE_VAR, "many")]));
        assert_eq!(config.page_size, DEFAULT_PAGE_SIZE);
    }
}
