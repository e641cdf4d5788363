//! 日志系统模块
//!
//! 基于 `tracing` 提供结构化的日志记录功能。
//!
//! 导入管线本身只输出 debug/trace 级别的诊断信息，错误通过返回值交给调用方；
//! info/warn/error 级别的日志由应用层（命令行入口、纹理查找）负责。
//!
//! # 使用示例
//!
//! ```no_run
//! use dist_mesh::core::config::LogLevel;
//! use dist_mesh::core::log;
//!
//! // 仅控制台输出
//! log::init_logger(LogLevel::Info, false, None);
//!
//! dist_mesh::app_info!(vertices = 24, "Mesh imported");
//! ```

use tracing::Level;
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    prelude::*,
    EnvFilter,
};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use std::path::{Path, PathBuf};

use super::config::{LogLevel, LoggingConfig};

/// 初始化日志系统
///
/// 设置了 `RUST_LOG` 时以环境变量为准，否则按 `level` 过滤本库的日志，
/// 依赖库只输出 warn 以上。重复调用时保留第一次安装的订阅者。
///
/// # 参数
///
/// * `level` - 日志级别
/// * `file_output` - 是否同时输出到文件（按天滚动）
/// * `log_file_path` - 日志文件路径（可选，默认为 "dist_mesh.log"）
pub fn init_logger(level: LogLevel, file_output: bool, log_file_path: Option<&str>) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_directive(level)));

    let console_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_writer(std::io::stderr);

    let file_layer = file_output.then(|| {
        let (directory, filename) = split_log_path(log_file_path.unwrap_or(DEFAULT_LOG_FILE));
        fmt::layer()
            .with_target(true)
            .with_ansi(false)
            .with_writer(RollingFileAppender::new(Rotation::DAILY, directory, filename))
    });

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .with(file_layer)
        .try_init();
}

const DEFAULT_LOG_FILE: &str = "dist_mesh.log";

/// 拆分为滚动日志所需的目录和文件名
fn split_log_path(log_path: &str) -> (PathBuf, String) {
    let path = Path::new(log_path);
    let directory = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."))
        .to_path_buf();
    let filename = path
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or(DEFAULT_LOG_FILE)
        .to_string();
    (directory, filename)
}

/// 按配置初始化日志系统
pub fn init_from_config(config: &LoggingConfig) {
    init_logger(config.level, config.file_output, Some(&config.log_file));
}

fn filter_directive(level: LogLevel) -> String {
    format!("warn,dist_mesh={}", level.name())
}

/// 导入管线日志 - Debug 级别
#[macro_export]
macro_rules! import_debug {
    ($($arg:tt)*) => {
        tracing::debug!(target: "dist_mesh::import", $($arg)*)
    };
}

/// 导入管线日志 - Trace 级别
#[macro_export]
macro_rules! import_trace {
    ($($arg:tt)*) => {
        tracing::trace!(target: "dist_mesh::import", $($arg)*)
    };
}

/// 应用层日志 - Info 级别
#[macro_export]
macro_rules! app_info {
    ($($arg:tt)*) => {
        tracing::info!(target: "dist_mesh::app", $($arg)*)
    };
}

/// 应用层日志 - Warn 级别
#[macro_export]
macro_rules! app_warn {
    ($($arg:tt)*) => {
        tracing::warn!(target: "dist_mesh::app", $($arg)*)
    };
}

/// 应用层日志 - Error 级别
#[macro_export]
macro_rules! app_error {
    ($($arg:tt)*) => {
        tracing::error!(target: "dist_mesh::app", $($arg)*)
    };
}

/// 日志级别转换
impl From<LogLevel> for Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => Level::TRACE,
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Info => Level::INFO,
            LogLevel::Warn => Level::WARN,
            LogLevel::Error => Level::ERROR,
        }
    }
}

/// 性能追踪宏
///
/// 记录一段代码的执行时间（span 关闭时输出）。
///
/// ```no_run
/// let _span = dist_mesh::span_trace!("obj_import").entered();
/// ```
#[macro_export]
macro_rules! span_trace {
    ($name:expr) => {
        tracing::span!(tracing::Level::TRACE, $name)
    };
}
