/// OBJ 文件加载器
///
/// 串联导入管线的三个阶段：文本解析 → 法线解析 → 顶点去重与索引构建。
/// 任何阶段失败都会中止整个导入，不返回部分结果。
use std::io::{BufRead, Cursor};
use std::path::Path;

use super::obj_parser::{ObjParser, ParseOptions, ParsedObj};
use super::MeshLoader;
use crate::core::config::{ImportConfig, NormalMode};
use crate::core::error::Result;
use crate::core::math::Color;
use crate::core::resource::{open_file, ResourceLocator};
use crate::geometry::indexer::{MeshIndexer, NormalSource};
use crate::geometry::math_utils::resolve_normals;
use crate::geometry::mesh::MeshData;
use crate::{import_debug, span_trace};

/// OBJ 格式加载器
///
/// 加载器只持有配置，不保存任何跨调用的状态。
///
/// # 特性
///
/// - 扇形三角化多边形面
/// - UV 坐标翻转（V轴：1.0 - v，可关闭）
/// - 缺失法线时按面法线重建（平滑或平面两种方式）
/// - 按材质组输出绘制区间
///
/// # 使用示例
///
/// ```rust
/// use dist_mesh::geometry::loaders::ObjLoader;
///
/// let mesh = ObjLoader::default().load_from_str("v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n")?;
/// assert_eq!(mesh.indices, vec![0, 1, 2]);
/// assert_eq!(mesh.vertices[0].normal, [0.0, 0.0, 1.0]);
/// # Ok::<(), dist_mesh::core::DistMeshError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct ObjLoader {
    config: ImportConfig,
}

impl ObjLoader {
    pub fn new(config: ImportConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ImportConfig {
        &self.config
    }

    fn parser(&self) -> ObjParser {
        ObjParser::new(ParseOptions {
            strict: self.config.strict,
            flip_v: self.config.flip_v,
        })
    }

    /// 从内存中的文本加载
    pub fn load_from_str(&self, text: &str) -> Result<MeshData> {
        let parsed = self.parser().parse_str(text)?;
        Ok(self.build(&parsed))
    }

    /// 从任意带缓冲的读取器加载
    pub fn load_from_reader<R: BufRead>(&self, reader: R) -> Result<MeshData> {
        let parsed = self.parser().parse_reader(reader)?;
        Ok(self.build(&parsed))
    }

    /// 按名称加载资源（内嵌资源或搜索目录中的文件）
    pub fn load_resource(&self, locator: &ResourceLocator, name: &str) -> Result<MeshData> {
        let mut mesh = self.load_from_reader(locator.open(name)?)?;
        mesh.name = Some(name.to_string());
        Ok(mesh)
    }

    /// 法线解析 + 去重索引构建
    pub fn build(&self, parsed: &ParsedObj) -> MeshData {
        let _span = span_trace!("obj_build").entered();
        let indexer = MeshIndexer::new(Color::from(self.config.vertex_color));

        let flat = self.config.normal_mode == NormalMode::Flat && !parsed.has_normals();
        let mesh = if flat {
            indexer.build(parsed, NormalSource::FlatPostPass)
        } else {
            let normals = resolve_normals(parsed);
            indexer.build(parsed, NormalSource::Resolved(&normals))
        };

        import_debug!(
            positions = parsed.positions.len(),
            normals = parsed.normals.len(),
            texcoords = parsed.texcoords.len(),
            vertices = mesh.vertex_count(),
            triangles = mesh.triangle_count(),
            spans = mesh.spans.len(),
            normal_mode = if flat { "flat" } else { "smooth" },
            "OBJ mesh built"
        );
        debug_assert!(mesh.validate().is_ok());

        mesh
    }
}

impl MeshLoader for ObjLoader {
    fn load_from_file(&self, path: &Path) -> Result<MeshData> {
        let reader = open_file(path)?;
        let mut mesh = self.load_from_reader(reader)?;
        mesh.name = Some(
            path.file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("Unnamed")
                .to_string(),
        );
        Ok(mesh)
    }

    fn load_from_memory(&self, data: &[u8]) -> Result<MeshData> {
        self.load_from_reader(Cursor::new(data))
    }

    fn supported_extensions(&self) -> &'static [&'static str] {
        &["obj"]
    }
}
