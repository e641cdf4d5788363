//! 配置管理模块
//!
//! 提供导入管线配置的加载、解析和管理功能。
//! 支持从 TOML 配置文件加载，也支持命令行参数覆盖。
//!
//! # 配置文件格式 (config.toml)
//!
//! ```toml
//! [import]
//! strict = false
//! flip_v = true
//! normal_mode = "smooth"    # smooth 或 flat
//! vertex_color = [1.0, 0.0, 0.0, 1.0]
//!
//! [textures]
//! directory = "assets/textures"
//! extensions = ["jpg", "png"]
//!
//! [resources]
//! search_paths = ["assets"]
//!
//! [logging]
//! level = "info"      # trace, debug, info, warn, error
//! file_output = false
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::error::{ConfigError, Result};
use super::math::Color;

/// 顶层配置
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// 导入配置
    #[serde(default)]
    pub import: ImportConfig,

    /// 纹理查找配置
    #[serde(default)]
    pub textures: TextureConfig,

    /// 资源查找配置
    #[serde(default)]
    pub resources: ResourceConfig,

    /// 日志配置
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// 导入配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportConfig {
    /// 严格模式：遇到未识别的指令时报错
    #[serde(default)]
    pub strict: bool,

    /// 是否翻转纹理坐标的 V 分量（v' = 1 - v）
    #[serde(default = "default_flip_v")]
    pub flip_v: bool,

    /// 法线生成方式
    #[serde(default = "default_normal_mode")]
    pub normal_mode: NormalMode,

    /// 每个输出顶点的固定颜色（RGBA）
    #[serde(default = "default_vertex_color")]
    pub vertex_color: [f32; 4],
}

/// 法线生成方式
///
/// 仅在源文件不包含 `vn` 时有区别；存在显式法线时两者行为一致。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NormalMode {
    /// 解析阶段按位置累加面法线（增量平均）
    Smooth,
    /// 去重后逐三角形写入面法线，后写覆盖先写
    Flat,
}

/// 纹理查找配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextureConfig {
    /// 纹理目录
    #[serde(default = "default_texture_dir")]
    pub directory: PathBuf,

    /// 按顺序尝试的扩展名（不含点号）
    #[serde(default = "default_texture_extensions")]
    pub extensions: Vec<String>,
}

/// 资源查找配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceConfig {
    /// 按顺序搜索的目录
    #[serde(default = "default_search_paths")]
    pub search_paths: Vec<PathBuf>,
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// 日志级别
    #[serde(default = "default_log_level")]
    pub level: LogLevel,

    /// 是否输出到文件
    #[serde(default = "default_file_output")]
    pub file_output: bool,

    /// 日志文件路径
    #[serde(default = "default_log_file")]
    pub log_file: String,
}

/// 日志级别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

// 默认值函数
fn default_flip_v() -> bool { true }
fn default_normal_mode() -> NormalMode { NormalMode::Smooth }
fn default_vertex_color() -> [f32; 4] { Color::RED.to_array() }
fn default_texture_dir() -> PathBuf { PathBuf::from("assets/textures") }
fn default_texture_extensions() -> Vec<String> { vec!["jpg".to_string(), "png".to_string()] }
fn default_search_paths() -> Vec<PathBuf> { vec![PathBuf::from("assets")] }
fn default_log_level() -> LogLevel { LogLevel::Info }
fn default_file_output() -> bool { false }
fn default_log_file() -> String { "dist_mesh.log".to_string() }

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            strict: false,
            flip_v: default_flip_v(),
            normal_mode: default_normal_mode(),
            vertex_color: default_vertex_color(),
        }
    }
}

impl Default for TextureConfig {
    fn default() -> Self {
        Self {
            directory: default_texture_dir(),
            extensions: default_texture_extensions(),
        }
    }
}

impl Default for ResourceConfig {
    fn default() -> Self {
        Self {
            search_paths: default_search_paths(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file_output: default_file_output(),
            log_file: default_log_file(),
        }
    }
}

impl Config {
    /// 从配置文件加载
    ///
    /// # 参数
    ///
    /// * `path` - 配置文件路径
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path_str = path.as_ref().to_string_lossy().to_string();

        let contents = std::fs::read_to_string(path)
            .map_err(|_| ConfigError::FileNotFound(path_str.clone()))?;

        toml::from_str(&contents)
            .map_err(|e| ConfigError::ParseError(e.to_string()).into())
    }

    /// 从配置文件加载，如果文件不存在或无法解析则使用默认配置
    pub fn from_file_or_default<P: AsRef<Path>>(path: P) -> Self {
        Self::from_file(path).unwrap_or_default()
    }

    /// 保存配置到文件
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let contents = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::ParseError(e.to_string()))?;

        std::fs::write(path, contents)?;
        Ok(())
    }

    /// 从命令行参数覆盖配置
    ///
    /// 支持的参数：
    /// - `--strict`: 启用严格解析
    /// - `--flat`: 使用平面法线
    /// - `--no-flip-v`: 不翻转纹理 V 坐标
    /// - `--textures <dir>`: 纹理目录
    /// - `--log-level <level>`: 日志级别
    pub fn apply_args<I>(&mut self, args: I)
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let args: Vec<String> = args.into_iter().map(|s| s.as_ref().to_string()).collect();

        if args.iter().any(|a| a == "--strict") {
            self.import.strict = true;
        }

        if args.iter().any(|a| a == "--flat") {
            self.import.normal_mode = NormalMode::Flat;
        }

        if args.iter().any(|a| a == "--no-flip-v") {
            self.import.flip_v = false;
        }

        if let Some(idx) = args.iter().position(|a| a == "--textures") {
            if let Some(dir) = args.get(idx + 1) {
                self.textures.directory = PathBuf::from(dir);
            }
        }

        if let Some(idx) = args.iter().position(|a| a == "--log-level") {
            if let Some(level) = args.get(idx + 1).and_then(|l| LogLevel::parse(l)) {
                self.logging.level = level;
            }
        }
    }

    /// 验证配置的有效性
    pub fn validate(&self) -> Result<()> {
        if self
            .import
            .vertex_color
            .iter()
            .any(|c| !(0.0..=1.0).contains(c))
        {
            return Err(ConfigError::InvalidValue {
                field: "import.vertex_color".to_string(),
                reason: "Color components must be within [0, 1]".to_string(),
            }
            .into());
        }

        if self.textures.extensions.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "textures.extensions".to_string(),
                reason: "At least one texture extension is required".to_string(),
            }
            .into());
        }

        if let Some(ext) = self
            .textures
            .extensions
            .iter()
            .find(|e| e.is_empty() || e.starts_with('.'))
        {
            return Err(ConfigError::InvalidValue {
                field: "textures.extensions".to_string(),
                reason: format!("Extension '{}' must be non-empty and without a leading dot", ext),
            }
            .into());
        }

        Ok(())
    }
}

impl LogLevel {
    /// 从命令行字符串解析日志级别（不区分大小写）
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "trace" => Some(LogLevel::Trace),
            "debug" => Some(LogLevel::Debug),
            "info" => Some(LogLevel::Info),
            "warn" => Some(LogLevel::Warn),
            "error" => Some(LogLevel::Error),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl NormalMode {
    /// 获取模式名称
    pub fn name(&self) -> &'static str {
        match self {
            NormalMode::Smooth => "smooth",
            NormalMode::Flat => "flat",
        }
    }
}
