//! 材质纹理查找
//!
//! 为每个绘制区间按材质名查找纹理文件并解码为 RGBA8，只在 CPU 侧工作，
//! 不创建任何 GPU 资源。纹理查找失败不视为导入失败：记录一条警告，
//! 该区间不绑定纹理。

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::core::config::TextureConfig;
use crate::core::error::{DistMeshError, Result};
use crate::geometry::loaders::obj_parser::DEFAULT_GROUP;
use crate::geometry::mesh::DrawSpan;
use crate::{app_warn, import_debug};

/// 解码后的纹理图像
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextureImage {
    pub material: String,
    pub path: PathBuf,
    pub width: u32,
    pub height: u32,
    /// 逐行的 RGBA8 像素数据
    pub rgba: Vec<u8>,
}

impl TextureImage {
    /// 读取并解码图像文件
    pub fn open(material: &str, path: &Path) -> Result<Self> {
        let image = image::open(path)
            .map_err(|e| DistMeshError::Texture(format!("{}: {}", path.display(), e)))?
            .to_rgba8();

        Ok(Self {
            material: material.to_string(),
            path: path.to_path_buf(),
            width: image.width(),
            height: image.height(),
            rgba: image.into_raw(),
        })
    }
}

/// 纹理库
///
/// 同名材质只解码一次；每个区间得到纹理在库中的下标（可能为 `None`）。
///
/// # 使用示例
///
/// ```rust,no_run
/// use dist_mesh::core::config::TextureConfig;
/// use dist_mesh::geometry::loaders::ObjLoader;
/// use dist_mesh::geometry::texture::TextureLibrary;
///
/// let mesh = ObjLoader::default().load_from_str("v 0 0 0\nv 1 0 0\nv 0 1 0\nusemtl brick\nf 1 2 3\n")?;
/// let mut library = TextureLibrary::new(TextureConfig::default());
/// let bindings = library.load_for_spans(&mesh.spans);
/// for (span, texture) in mesh.spans.iter().zip(&bindings) {
///     println!("{} -> {:?}", span.material, texture.map(|i| &library.images()[i].path));
/// }
/// # Ok::<(), dist_mesh::core::DistMeshError>(())
/// ```
#[derive(Debug, Clone)]
pub struct TextureLibrary {
    config: TextureConfig,
    images: Vec<TextureImage>,
    by_material: HashMap<String, Option<usize>>,
}

impl TextureLibrary {
    pub fn new(config: TextureConfig) -> Self {
        Self {
            config,
            images: Vec::new(),
            by_material: HashMap::new(),
        }
    }

    /// 按配置的扩展名顺序查找材质对应的纹理文件
    pub fn resolve_path(&self, material: &str) -> Option<PathBuf> {
        self.config
            .extensions
            .iter()
            .map(|ext| self.config.directory.join(format!("{}.{}", material, ext)))
            .find(|candidate| candidate.is_file())
    }

    /// 加载单个材质的纹理，返回在库中的下标
    ///
    /// 默认组没有纹理；结果（包括失败）按材质名缓存。
    pub fn load(&mut self, material: &str) -> Option<usize> {
        if material.is_empty() || material == DEFAULT_GROUP {
            return None;
        }
        if let Some(&cached) = self.by_material.get(material) {
            return cached;
        }

        let loaded = match self.resolve_path(material) {
            Some(path) => match TextureImage::open(material, &path) {
                Ok(image) => {
                    import_debug!(material, width = image.width, height = image.height, "texture decoded");
                    self.images.push(image);
                    Some(self.images.len() - 1)
                }
                Err(e) => {
                    app_warn!("Failed to load texture for material '{}': {}", material, e);
                    None
                }
            },
            None => {
                app_warn!(
                    "No texture found for material '{}' in {}",
                    material,
                    self.config.directory.display()
                );
                None
            }
        };

        self.by_material.insert(material.to_string(), loaded);
        loaded
    }

    /// 为每个绘制区间加载纹理，结果与 `spans` 一一对应
    pub fn load_for_spans(&mut self, spans: &[DrawSpan]) -> Vec<Option<usize>> {
        spans.iter().map(|span| self.load(&span.material)).collect()
    }

    /// 已解码的纹理
    pub fn images(&self) -> &[TextureImage] {
        &self.images
    }

    pub fn into_images(self) -> Vec<TextureImage> {
        self.images
    }
}
