/// 网格数据结构模块
///
/// 定义导入结果的CPU侧容器：顶点、并行颜色数组、三角形索引，
/// 以及按材质分组的绘制区间。

use super::vertex::Vertex;

/// 绘制区间
///
/// 对应源文件中的一个材质组（`usemtl` 到下一个 `usemtl` 之间的面）。
/// 调用方可以为每个区间绑定不同的纹理后发起一次绘制。
///
/// # 示例
///
/// ```rust
/// use dist_mesh::geometry::mesh::DrawSpan;
///
/// let span = DrawSpan::new("brick", 0, 6, 0, 4);
/// assert_eq!(span.triangle_count(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrawSpan {
    /// 材质名称（隐式的第一组为 "default"）
    pub material: String,

    /// 在索引数组中的起始位置（以索引数量计）
    pub index_start: u32,

    /// 索引数量（三角形数 * 3）
    pub index_count: u32,

    /// 该组顶点在顶点数组中的起始位置
    pub vertex_start: u32,

    /// 该组的顶点数量
    pub vertex_count: u32,
}

impl DrawSpan {
    /// 创建一个新的绘制区间
    #[inline]
    pub fn new(
        material: impl Into<String>,
        index_start: u32,
        index_count: u32,
        vertex_start: u32,
        vertex_count: u32,
    ) -> Self {
        Self {
            material: material.into(),
            index_start,
            index_count,
            vertex_start,
            vertex_count,
        }
    }

    /// 三角形数量
    #[inline]
    pub fn triangle_count(&self) -> u32 {
        self.index_count / 3
    }

    /// 在索引数组中的范围
    #[inline]
    pub fn index_range(&self) -> std::ops::Range<usize> {
        self.index_start as usize..(self.index_start + self.index_count) as usize
    }

    /// 在顶点数组中的范围
    #[inline]
    pub fn vertex_range(&self) -> std::ops::Range<usize> {
        self.vertex_start as usize..(self.vertex_start + self.vertex_count) as usize
    }
}

/// 导入结果
///
/// 顶点、颜色、索引和绘制区间在一次导入中一次性生成，之后所有权交给调用方。
///
/// # 架构说明
///
/// - **CPU侧**: `MeshData` 存储在内存中的扁平数组
/// - **GPU侧**: 渲染后端负责创建缓冲区、绑定着色器和纹理
#[derive(Debug, Clone, Default)]
pub struct MeshData {
    /// 顶点数组
    pub vertices: Vec<Vertex>,

    /// 顶点颜色（与 `vertices` 一一对应）
    pub colors: Vec<[f32; 4]>,

    /// 三角形顶点索引，每3个索引定义一个三角形
    pub indices: Vec<u32>,

    /// 按材质组划分的绘制区间，保持源文件中的顺序
    pub spans: Vec<DrawSpan>,

    /// 网格名称（可选）
    pub name: Option<String>,
}

impl MeshData {
    /// 创建一个空的网格数据
    pub fn new() -> Self {
        Self::default()
    }

    /// 创建一个指定名称的空网格数据
    pub fn with_name(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    /// 获取顶点数量
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// 获取索引数量
    #[inline]
    pub fn index_count(&self) -> usize {
        self.indices.len()
    }

    /// 获取三角形数量
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// 是否没有任何三角形
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// 交错顶点数组：每个顶点 position(3) + normal(3) + texcoord(2)
    pub fn interleaved_vertices(&self) -> Vec<f32> {
        let mut out = Vec::with_capacity(self.vertices.len() * Vertex::FLOATS);
        for vertex in &self.vertices {
            vertex.write_interleaved(&mut out);
        }
        out
    }

    /// 扁平颜色数组：每个顶点 RGBA(4)
    pub fn color_array(&self) -> Vec<f32> {
        self.colors.iter().flatten().copied().collect()
    }

    /// 顶点缓冲区的原始字节
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// 索引缓冲区的原始字节
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }

    /// 验证网格数据的有效性
    ///
    /// 检查：
    /// - 索引数量是3的倍数
    /// - 颜色数量与顶点数量一致
    /// - 所有索引都在有效范围内
    /// - 绘制区间首尾相接覆盖整个索引数组，且区间内索引不越出本组顶点范围
    pub fn validate(&self) -> Result<(), String> {
        if self.indices.len() % 3 != 0 {
            return Err(format!(
                "index count must be a multiple of 3, got {}",
                self.indices.len()
            ));
        }

        if self.colors.len() != self.vertices.len() {
            return Err(format!(
                "color count {} does not match vertex count {}",
                self.colors.len(),
                self.vertices.len()
            ));
        }

        let vertex_count = self.vertices.len() as u32;
        if let Some((i, &index)) = self
            .indices
            .iter()
            .enumerate()
            .find(|&(_, &index)| index >= vertex_count)
        {
            return Err(format!(
                "index {} at position {} is out of range (vertex count {})",
                index, i, vertex_count
            ));
        }

        let mut expected_start = 0u32;
        for (i, span) in self.spans.iter().enumerate() {
            if span.index_start != expected_start {
                return Err(format!(
                    "span {} ('{}') starts at index {}, expected {}",
                    i, span.material, span.index_start, expected_start
                ));
            }
            if span.index_count % 3 != 0 || span.index_range().end > self.indices.len() {
                return Err(format!(
                    "span {} ('{}') has an invalid index range {:?}",
                    i,
                    span.material,
                    span.index_range()
                ));
            }
            let vertices = span.vertex_range();
            if let Some(&index) = self.indices[span.index_range()]
                .iter()
                .find(|&&index| !vertices.contains(&(index as usize)))
            {
                return Err(format!(
                    "span {} ('{}') references vertex {} outside its range {:?}",
                    i, span.material, index, vertices
                ));
            }
            expected_start += span.index_count;
        }

        if !self.spans.is_empty() && expected_start as usize != self.indices.len() {
            return Err(format!(
                "spans cover {} indices but the mesh has {}",
                expected_start,
                self.indices.len()
            ));
        }

        Ok(())
    }
}
