/// 几何体顶点定义模块
///
/// 定义导入结果中每个输出顶点的属性布局：位置、法线、纹理坐标。
/// 顶点颜色是常量，单独存放在并行的颜色数组中。

use bytemuck::{Pod, Zeroable};

/// 输出顶点
///
/// 内存布局与GPU兼容，使用 `#[repr(C)]` 保证顺序和对齐，
/// 可以直接通过 `bytemuck::cast_slice` 上传。
///
/// # 内存布局
///
/// - position: 12 bytes (3 * f32)，着色器 location 0
/// - normal: 12 bytes (3 * f32)，着色器 location 2
/// - texcoord: 8 bytes (2 * f32)，着色器 location 3
/// - **总计**: 32 bytes
///
/// # 示例
///
/// ```rust
/// use dist_mesh::geometry::vertex::Vertex;
///
/// let vertex = Vertex {
///     position: [0.0, 1.0, 0.0],
///     normal: [0.0, 1.0, 0.0],
///     texcoord: [0.5, 0.5],
/// };
/// assert_eq!(Vertex::FLOATS, 8);
/// ```
#[repr(C)]
#[derive(Default, Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    /// 顶点位置 (x, y, z)
    pub position: [f32; 3],

    /// 法线向量 (nx, ny, nz)
    ///
    /// 通常为单位向量；没有任何面贡献的位置保持零向量。
    pub normal: [f32; 3],

    /// 纹理坐标 (u, v)，V 分量已按配置翻转
    pub texcoord: [f32; 2],
}

impl Vertex {
    /// 每个顶点的浮点数个数（交错布局的步长）
    pub const FLOATS: usize = 8;

    /// 法线在顶点内的字节偏移
    pub const NORMAL_OFFSET: usize = 3 * std::mem::size_of::<f32>();

    /// 纹理坐标在顶点内的字节偏移
    pub const TEXCOORD_OFFSET: usize = 6 * std::mem::size_of::<f32>();

    /// 创建一个新的顶点
    #[inline]
    pub fn new(position: [f32; 3], normal: [f32; 3], texcoord: [f32; 2]) -> Self {
        Self {
            position,
            normal,
            texcoord,
        }
    }

    /// 按交错布局追加到浮点数组
    #[inline]
    pub fn write_interleaved(&self, out: &mut Vec<f32>) {
        out.extend_from_slice(&self.position);
        out.extend_from_slice(&self.normal);
        out.extend_from_slice(&self.texcoord);
    }
}
