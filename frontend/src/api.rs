//! API 服务上下文
//!
//! 应用启动时按配置创建一次，通过 Context 注入到各个页面。

use crate::web::FetchHttpClient;
use costwise::{AuthApi, ClientConfig, ItemsApi, ServiceClient};
use leptos::prelude::*;

#[derive(Clone)]
pub struct AppServices {
    pub config: ClientConfig,
    pub auth: AuthApi<FetchHttpClient>,
    pub items: ItemsApi<FetchHttpClient>,
}

impl AppServices {
    pub fn new(config: ClientConfig) -> Self {
        let service = ServiceClient::from_config(FetchHttpClient, &config);
        tracing::info!(api = %service.base_url(), "api client configured");
        Self {
            auth: AuthApi::new(service.clone()),
            items: ItemsApi::new(service),
            config,
        }
    }
}

/// 从 Context 获取 API 服务
pub fn use_services() -> AppServices {
    use_context::<AppServices>().expect("AppServices should be provided")
}
