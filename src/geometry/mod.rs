/// 几何体导入和处理模块
///
/// 把 OBJ 文本转换为可以直接上传到渲染后端的扁平缓冲区。
///
/// # 模块结构
///
/// - `vertex`: 输出顶点布局
/// - `mesh`: 导入结果和绘制区间
/// - `math_utils`: 法线解析（增量平均、面法线、平面法线后处理）
/// - `indexer`: 顶点去重与索引构建
/// - `loaders`: 解析器、加载器和导出器
/// - `texture`: 按材质名查找纹理（CPU 侧）
///
/// # 架构设计
///
/// ```text
/// OBJ 文本
///     ↓
/// ObjParser（ParsedObj：原始属性 + 材质组 + 三角形）
///     ↓
/// resolve_normals（每个位置一个法线）
///     ↓
/// MeshIndexer（去重、重映射索引、绘制区间）
///     ↓
/// MeshData（交给渲染后端上传）
/// ```
///
/// # 使用示例
///
/// ```rust,no_run
/// use dist_mesh::geometry::loaders::{MeshLoader, ObjLoader};
/// use std::path::Path;
///
/// let mesh_data = ObjLoader::default().load_from_file(Path::new("model.obj"))?;
///
/// println!("顶点数: {}", mesh_data.vertex_count());
/// println!("三角形数: {}", mesh_data.triangle_count());
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```

pub mod vertex;
pub mod mesh;
pub mod math_utils;
pub mod indexer;
pub mod loaders;
pub mod texture;

// 重新导出常用类型
pub use vertex::Vertex;
pub use mesh::{DrawSpan, MeshData};
pub use loaders::{MeshLoader, ObjLoader};
