//! 资源定位模块
//!
//! 按名称定位网格资源：先查找内嵌资源（通常来自 `include_str!`），
//! 再依次搜索配置的目录。找不到时返回 `MeshLoadError::MissingResource`。

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader, Cursor};
use std::path::{Path, PathBuf};

use super::config::ResourceConfig;
use super::error::{MeshLoadError, Result};

/// 资源定位器
///
/// # 示例
///
/// ```rust
/// use dist_mesh::core::resource::ResourceLocator;
///
/// let mut locator = ResourceLocator::new();
/// locator.register_embedded("triangle.obj", "v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n");
/// assert!(locator.contains("triangle.obj"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct ResourceLocator {
    search_paths: Vec<PathBuf>,
    embedded: HashMap<String, &'static str>,
}

impl ResourceLocator {
    /// 创建一个空的定位器
    pub fn new() -> Self {
        Self::default()
    }

    /// 按配置创建定位器
    pub fn from_config(config: &ResourceConfig) -> Self {
        Self {
            search_paths: config.search_paths.clone(),
            embedded: HashMap::new(),
        }
    }

    /// 追加一个搜索目录
    pub fn with_search_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.search_paths.push(path.into());
        self
    }

    /// 注册内嵌资源，同名资源会被覆盖
    pub fn register_embedded(&mut self, name: impl Into<String>, contents: &'static str) {
        self.embedded.insert(name.into(), contents);
    }

    /// 资源是否存在（内嵌或磁盘）
    pub fn contains(&self, name: &str) -> bool {
        self.embedded.contains_key(name) || self.resolve_path(name).is_some()
    }

    /// 在搜索目录中查找资源文件
    ///
    /// 搜索目录优先；都没有命中时把名称本身当作路径。
    pub fn resolve_path(&self, name: &str) -> Option<PathBuf> {
        self.search_paths
            .iter()
            .map(|dir| dir.join(name))
            .chain(std::iter::once(PathBuf::from(name)))
            .find(|candidate| candidate.is_file())
    }

    /// 打开资源，返回带缓冲的读取器
    pub fn open(&self, name: &str) -> Result<Box<dyn BufRead>> {
        if let Some(contents) = self.embedded.get(name) {
            return Ok(Box::new(Cursor::new(contents.as_bytes())));
        }

        let path = self
            .resolve_path(name)
            .ok_or_else(|| MeshLoadError::MissingResource(name.to_string()))?;

        open_file(&path)
    }
}

/// 打开磁盘文件；文件不存在映射为 `MissingResource`
pub(crate) fn open_file(path: &Path) -> Result<Box<dyn BufRead>> {
    match File::open(path) {
        Ok(file) => Ok(Box::new(BufReader::new(file))),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Err(MeshLoadError::MissingResource(path.display().to_string()).into())
        }
        Err(e) => Err(e.into()),
    }
}
