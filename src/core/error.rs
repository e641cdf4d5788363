//! 错误处理模块
//!
//! 定义了网格导入管线中使用的统一错误类型。
//!
//! # 设计原则
//!
//! - 为每种错误类型提供清晰的上下文信息（行号 + 原始行文本）
//! - 支持错误链（error source）
//! - 易于模式匹配和错误处理
//! - 导入失败时不返回任何部分结果

use std::fmt;

/// 统一的 Result 类型
///
/// 所有可能返回错误的函数都应该使用这个类型。
pub type Result<T> = std::result::Result<T, DistMeshError>;

/// DistMesh 的错误类型
#[derive(Debug)]
pub enum DistMeshError {
    /// 配置错误
    Config(ConfigError),

    /// 网格加载错误
    MeshLoading(MeshLoadError),

    /// 纹理读取错误
    Texture(String),

    /// IO 错误
    Io(std::io::Error),
}

/// 配置相关的错误
#[derive(Debug)]
pub enum ConfigError {
    /// 配置文件未找到
    FileNotFound(String),

    /// 配置文件解析失败
    ParseError(String),

    /// 配置值无效
    InvalidValue { field: String, reason: String },
}

/// 出错位置：行号（从 1 开始）和原始行文本
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineLocation {
    pub line: usize,
    pub text: String,
}

impl LineLocation {
    pub fn new(line: usize, text: impl Into<String>) -> Self {
        Self {
            line,
            text: text.into(),
        }
    }
}

impl fmt::Display for LineLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: `{}`", self.line, self.text)
    }
}

/// 面索引引用的属性类别
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeKind {
    Position,
    TexCoord,
    Normal,
}

impl AttributeKind {
    pub fn name(&self) -> &'static str {
        match self {
            AttributeKind::Position => "position",
            AttributeKind::TexCoord => "texture coordinate",
            AttributeKind::Normal => "normal",
        }
    }
}

/// 网格加载相关的错误
#[derive(Debug)]
pub enum MeshLoadError {
    /// 严格模式下出现无法识别的行首指令
    MalformedDirective {
        location: LineLocation,
        directive: String,
    },

    /// 数值字段无法解析，或缺少必需的分量
    MalformedNumericField {
        location: LineLocation,
        field: String,
    },

    /// 面的顶点引用少于 3 个
    DegenerateFace {
        location: LineLocation,
        references: usize,
    },

    /// 面引用了尚未声明的位置/法线/纹理坐标
    DanglingIndexReference {
        location: LineLocation,
        attribute: AttributeKind,
        index: i64,
        declared: usize,
    },

    /// 指定的资源无法定位或打开
    MissingResource(String),

    /// 不支持的文件格式
    UnsupportedFormat(String),
}

impl MeshLoadError {
    /// 出错的行位置（资源类错误没有行位置）
    pub fn location(&self) -> Option<&LineLocation> {
        match self {
            MeshLoadError::MalformedDirective { location, .. }
            | MeshLoadError::MalformedNumericField { location, .. }
            | MeshLoadError::DegenerateFace { location, .. }
            | MeshLoadError::DanglingIndexReference { location, .. } => Some(location),
            MeshLoadError::MissingResource(_) | MeshLoadError::UnsupportedFormat(_) => None,
        }
    }
}

impl fmt::Display for DistMeshError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DistMeshError::Config(e) => write!(f, "Configuration error: {}", e),
            DistMeshError::MeshLoading(e) => write!(f, "Mesh loading error: {}", e),
            DistMeshError::Texture(msg) => write!(f, "Texture error: {}", msg),
            DistMeshError::Io(e) => write!(f, "IO error: {}", e),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::FileNotFound(path) => write!(f, "Config file not found: {}", path),
            ConfigError::ParseError(msg) => write!(f, "Failed to parse config: {}", msg),
            ConfigError::InvalidValue { field, reason } => {
                write!(f, "Invalid value for '{}': {}", field, reason)
            }
        }
    }
}

impl fmt::Display for MeshLoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MeshLoadError::MalformedDirective { location, directive } => {
                write!(f, "Unrecognized directive '{}' at {}", directive, location)
            }
            MeshLoadError::MalformedNumericField { location, field } => {
                write!(f, "Malformed numeric field '{}' at {}", field, location)
            }
            MeshLoadError::DegenerateFace { location, references } => write!(
                f,
                "Face has {} vertex references (at least 3 required) at {}",
                references, location
            ),
            MeshLoadError::DanglingIndexReference {
                location,
                attribute,
                index,
                declared,
            } => write!(
                f,
                "Face references {} index {} but only {} declared at {}",
                attribute.name(),
                index,
                declared,
                location
            ),
            MeshLoadError::MissingResource(name) => write!(f, "Mesh resource not found: {}", name),
            MeshLoadError::UnsupportedFormat(msg) => write!(f, "Unsupported mesh format: {}", msg),
        }
    }
}

impl std::error::Error for DistMeshError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DistMeshError::Io(e) => Some(e),
            DistMeshError::Config(e) => Some(e),
            DistMeshError::MeshLoading(e) => Some(e),
            DistMeshError::Texture(_) => None,
        }
    }
}

impl std::error::Error for ConfigError {}
impl std::error::Error for MeshLoadError {}

// 实现 From trait 以便于错误转换
impl From<std::io::Error> for DistMeshError {
    fn from(err: std::io::Error) -> Self {
        DistMeshError::Io(err)
    }
}

impl From<ConfigError> for DistMeshError {
    fn from(err: ConfigError) -> Self {
        DistMeshError::Config(err)
    }
}

impl From<MeshLoadError> for DistMeshError {
    fn from(err: MeshLoadError) -> Self {
        DistMeshError::MeshLoading(err)
    }
}
