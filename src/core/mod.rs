//! 核心功能模块
//!
//! 本模块提供导入管线的基础功能，包括数学类型、日志系统、配置管理、
//! 资源定位和错误处理。这些模块与具体的网格格式无关。
//!
//! # 模块组织
//!
//! - `math`：基于 nalgebra 的向量别名与颜色类型
//! - `log`：日志系统，提供结构化的日志记录功能
//! - `config`：配置管理，支持从 TOML 文件加载导入设置
//! - `error`：错误处理，定义统一的错误类型
//! - `resource`：按名称定位网格资源（内嵌或磁盘）

pub mod math;
pub mod log;
pub mod config;
pub mod error;
pub mod resource;

// 重新导出常用类型，方便使用
pub use math::{Vector2, Vector3, Vector4, Color};
pub use error::{Result, DistMeshError, MeshLoadError};
pub use config::{Config, ImportConfig, NormalMode};
pub use resource::ResourceLocator;
