/// 模型加载器模块
///
/// 提供统一的模型加载接口和 OBJ 格式的具体实现。
///
/// # 支持的格式
///
/// - **OBJ**: Wavefront OBJ 格式（自带解析器，支持材质分组）
///
/// # 使用示例
///
/// ```rust,no_run
/// use dist_mesh::core::ImportConfig;
/// use dist_mesh::geometry::loaders::load_mesh;
/// use std::path::Path;
///
/// let mesh = load_mesh(Path::new("model.obj"), &ImportConfig::default())?;
/// # Ok::<(), dist_mesh::core::DistMeshError>(())
/// ```
use crate::core::config::ImportConfig;
use crate::core::error::{MeshLoadError, Result};
use crate::geometry::mesh::MeshData;
use std::path::Path;

pub mod obj_parser;
pub mod obj_loader;
pub mod obj_writer;

// 重新导出加载器
pub use obj_loader::ObjLoader;

/// 网格加载器 trait
///
/// 所有格式的加载器都实现此 trait。
///
/// # 实现要求
///
/// - 加载器只持有配置，不保存跨调用的状态
/// - 返回 CPU 侧的 `MeshData`，不涉及 GPU 资源
/// - 失败时返回错误，不返回部分填充的数据
pub trait MeshLoader {
    /// 从文件路径加载网格
    ///
    /// # 错误
    ///
    /// - 文件不存在：`MeshLoadError::MissingResource`
    /// - 文件格式错误：对应的解析错误
    fn load_from_file(&self, path: &Path) -> Result<MeshData>;

    /// 从内存数据加载网格
    fn load_from_memory(&self, data: &[u8]) -> Result<MeshData>;

    /// 获取支持的文件扩展名列表（小写，不含点号）
    fn supported_extensions(&self) -> &'static [&'static str];
}

/// 根据文件扩展名选择合适的加载器
pub fn load_mesh(path: &Path, config: &ImportConfig) -> Result<MeshData> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .ok_or_else(|| {
            MeshLoadError::UnsupportedFormat(format!(
                "cannot determine file extension of {}",
                path.display()
            ))
        })?;

    let loader = ObjLoader::new(config.clone());
    if loader.supported_extensions().contains(&extension.as_str()) {
        loader.load_from_file(path)
    } else {
        Err(MeshLoadError::UnsupportedFormat(format!(".{}", extension)).into())
    }
}
