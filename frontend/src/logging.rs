//! 日志初始化
//!
//! `tracing` 事件交给 tracing-wasm 输出到浏览器控制台。

use tracing::Level;
use tracing_wasm::WASMLayerConfigBuilder;

/// 安装全局订阅者，只应在启动时调用一次
pub fn init() {
    let max_level = if cfg!(debug_assertions) {
        Level::DEBUG
    } else {
        Level::INFO
    };

    let config = WASMLayerConfigBuilder::new()
        .set_max_level(max_level)
        .set_report_logs_in_timings(false)
        .build();
    tracing_wasm::set_as_global_default_with_config(config);
}
