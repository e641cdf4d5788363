//! DistMesh - OBJ 网格导入管线
//!
//! 把 Wavefront OBJ 文本转换为渲染后端可以直接上传的扁平缓冲区：
//! 交错的位置/法线/纹理坐标、固定顶点颜色、三角形索引，以及按材质分组的绘制区间。
//! 本库不接触任何 GPU 状态，缓冲区的所有权完全交给调用方。
//!
//! # 模块结构
//!
//! - `core`: 核心功能模块（数学、日志、配置、错误处理、资源定位）
//! - `geometry`: 网格导入模块（解析、法线解析、顶点去重、纹理查找）
//!
//! # 使用示例
//!
//! ```
//! use dist_mesh::geometry::loaders::ObjLoader;
//!
//! let mesh = ObjLoader::default().load_from_str(
//!     "v 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 0\nf 1 2 3 4\n",
//! )?;
//!
//! assert_eq!(mesh.indices, vec![0, 1, 2, 0, 2, 3]);
//! assert_eq!(mesh.interleaved_vertices().len(), 4 * 8);
//! # Ok::<(), dist_mesh::core::DistMeshError>(())
//! ```

pub mod core;
pub mod geometry;
