//! 几何数学工具模块
//!
//! 法线解析相关的函数：
//! - 按位置索引累加面法线（增量平均）
//! - 计算三角形几何法线
//! - 去重后的平面法线后处理
//!
//! 累加状态存放在与位置数组平行的数组中（位置索引即下标），
//! 不在顶点之间共享可变对象。

use crate::core::math::{normalize_or_zero, Vector3};
use crate::geometry::loaders::obj_parser::ParsedObj;
use crate::geometry::vertex::Vertex;

/// 法线累加器
///
/// 每个位置保存当前平均法线和已贡献的面数。更新规则：
///
/// ```text
/// new = normalize((n * old + contribution) / (n + 1))
/// ```
///
/// 其中 `old` 是已经归一化过的结果，所以后来的贡献权重逐次降低，
/// 并不等同于所有贡献的算术平均。这一行为是有意保留的。
///
/// # 示例
///
/// ```rust
/// use dist_mesh::core::math::Vector3;
/// use dist_mesh::geometry::math_utils::NormalAccumulator;
///
/// let mut acc = NormalAccumulator::new(1);
/// acc.contribute(0, Vector3::new(0.0, 0.0, 1.0));
/// acc.contribute(0, Vector3::new(0.0, 1.0, 0.0));
///
/// let n = acc.into_normals()[0];
/// assert!((n.norm() - 1.0).abs() < 1e-6);
/// ```
#[derive(Debug, Clone)]
pub struct NormalAccumulator {
    normals: Vec<Vector3>,
    counts: Vec<u32>,
}

impl NormalAccumulator {
    /// 为 `len` 个位置创建累加器，初始法线为零向量
    pub fn new(len: usize) -> Self {
        Self {
            normals: vec![Vector3::zeros(); len],
            counts: vec![0; len],
        }
    }

    /// 把一个面的法线并入指定位置
    pub fn contribute(&mut self, index: usize, contribution: Vector3) {
        let n = self.counts[index] as f32;
        let blended = (self.normals[index] * n + contribution) / (n + 1.0);
        self.normals[index] = normalize_or_zero(blended);
        self.counts[index] += 1;
    }

    /// 指定位置已经收到的贡献次数
    pub fn contributions(&self, index: usize) -> u32 {
        self.counts[index]
    }

    /// 当前的法线数组
    pub fn normals(&self) -> &[Vector3] {
        &self.normals
    }

    pub fn into_normals(self) -> Vec<Vector3> {
        self.normals
    }
}

/// 三角形几何法线：normalize((b - a) × (c - a))
///
/// 逆时针环绕的三角形法线朝向观察者。零面积三角形返回 `None`。
#[inline]
pub fn face_normal(a: &Vector3, b: &Vector3, c: &Vector3) -> Option<Vector3> {
    let n = normalize_or_zero((b - a).cross(&(c - a)));
    if n == Vector3::zeros() {
        None
    } else {
        Some(n)
    }
}

/// 为每个位置解析一个法线
///
/// - 源文件声明了 `vn`：每个带法线索引的三角形角把声明的法线并入该角的位置；
///   没有法线子字段的角不贡献。
/// - 没有 `vn`：每个三角形的几何法线并入三个角的位置，零面积三角形跳过。
///
/// 没有被任何面引用的位置保持零向量，由调用方自行判断。
pub fn resolve_normals(parsed: &ParsedObj) -> Vec<Vector3> {
    let mut acc = NormalAccumulator::new(parsed.positions.len());

    if parsed.has_normals() {
        for triangle in parsed.triangles() {
            for corner in triangle {
                if let Some(normal) = corner.normal {
                    acc.contribute(corner.position, parsed.normals[normal]);
                }
            }
        }
    } else {
        for triangle in parsed.triangles() {
            let [a, b, c] = triangle.map(|corner| &parsed.positions[corner.position]);
            if let Some(normal) = face_normal(a, b, c) {
                for corner in triangle {
                    acc.contribute(corner.position, normal);
                }
            }
        }
    }

    acc.into_normals()
}

/// 平面法线后处理
///
/// 直接在去重后的顶点上写入每个三角形的几何法线：
/// 被多个三角形共享的顶点保留最后一个处理到的三角形的法线，不做平均。
/// 零面积三角形不写入。
pub fn recompute_flat_normals(vertices: &mut [Vertex], indices: &[u32]) {
    for triangle in indices.chunks_exact(3) {
        let [i0, i1, i2] = [triangle[0], triangle[1], triangle[2]].map(|i| i as usize);

        let p0 = Vector3::from(vertices[i0].position);
        let p1 = Vector3::from(vertices[i1].position);
        let p2 = Vector3::from(vertices[i2].position);

        if let Some(normal) = face_normal(&p0, &p1, &p2) {
            let normal: [f32; 3] = normal.into();
            for i in [i0, i1, i2] {
                vertices[i].normal = normal;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::math::approx_eq;
    use crate::geometry::loaders::obj_parser::ObjParser;

    fn assert_vec_eq(actual: Vector3, expected: Vector3) {
        assert!(
            (actual - expected).norm() < 1e-5,
            "expected {:?}, got {:?}",
            expected,
            actual
        );
    }

    #[test]
    fn test_face_normal_winding() {
        let a = Vector3::new(0.0, 0.0, 0.0);
        let b = Vector3::new(1.0, 0.0, 0.0);
        let c = Vector3::new(0.0, 1.0, 0.0);

        assert_vec_eq(face_normal(&a, &b, &c).unwrap(), Vector3::new(0.0, 0.0, 1.0));
        assert_vec_eq(face_normal(&a, &c, &b).unwrap(), Vector3::new(0.0, 0.0, -1.0));
    }

    #[test]
    fn test_face_normal_degenerate() {
        let a = Vector3::new(0.0, 0.0, 0.0);
        let b = Vector3::new(1.0, 0.0, 0.0);
        let c = Vector3::new(2.0, 0.0, 0.0);

        assert!(face_normal(&a, &b, &c).is_none());
    }

    #[test]
    fn test_incremental_average_weights() {
        let mut acc = NormalAccumulator::new(1);
        let x = Vector3::new(1.0, 0.0, 0.0);
        let y = Vector3::new(0.0, 1.0, 0.0);

        acc.contribute(0, x);
        assert_vec_eq(acc.normals()[0], x);

        acc.contribute(0, y);
        let half = std::f32::consts::FRAC_1_SQRT_2;
        assert_vec_eq(acc.normals()[0], Vector3::new(half, half, 0.0));

        // 第三次贡献：normalize((2 * old + x) / 3)，不是三者的算术平均
        acc.contribute(0, x);
        let expected = (Vector3::new(half, half, 0.0) * 2.0 + x).normalize();
        assert_vec_eq(acc.normals()[0], expected);
        assert_eq!(acc.contributions(0), 3);

        let arithmetic = (x + y + x).normalize();
        assert!((acc.normals()[0] - arithmetic).norm() > 1e-3);
    }

    #[test]
    fn test_resolve_geometric_normals() {
        let parsed = ObjParser::default()
            .parse_str("v 0 0 0\nv 1 0 0\nv 0 1 0\nv 5 5 5\nf 1 2 3\n")
            .unwrap();

        let normals = resolve_normals(&parsed);
        for n in &normals[..3] {
            assert_vec_eq(*n, Vector3::new(0.0, 0.0, 1.0));
        }
        // 未被引用的位置保持零向量
        assert_eq!(normals[3], Vector3::zeros());
    }

    #[test]
    fn test_sub_millimetre_triangle_keeps_its_normal() {
        let parsed = ObjParser::default()
            .parse_str("v 0 0 0\nv 0.0005 0 0\nv 0 0.0005 0\nf 1 2 3\n")
            .unwrap();

        let smooth = resolve_normals(&parsed);
        for n in &smooth {
            assert_vec_eq(*n, Vector3::new(0.0, 0.0, 1.0));
        }

        let mut vertices: Vec<Vertex> = parsed
            .positions
            .iter()
            .map(|p| Vertex::new((*p).into(), [0.0, 1.0, 0.0], [0.0, 0.0]))
            .collect();
        recompute_flat_normals(&mut vertices, &[0, 1, 2]);
        for v in &vertices {
            assert_vec_eq(Vector3::from(v.normal), Vector3::new(0.0, 0.0, 1.0));
        }
    }

    #[test]
    fn test_short_explicit_normal_is_normalized() {
        let parsed = ObjParser::default()
            .parse_str("v 0 0 0\nv 1 0 0\nv 0 1 0\nvn 0 0 1e-8\nf 1//1 2//1 3//1\n")
            .unwrap();

        for n in &resolve_normals(&parsed) {
            assert_vec_eq(*n, Vector3::new(0.0, 0.0, 1.0));
        }
    }

    #[test]
    fn test_resolve_explicit_normals() {
        let parsed = ObjParser::default()
            .parse_str(
                "v 0 0 0\nv 1 0 0\nv 0 1 0\nv 1 1 0\n\
                 vn 0 0 1\nvn 0 1 0\n\
                 f 1//1 2//1 3//1\nf 2//2 4//2 3\n",
            )
            .unwrap();

        let normals = resolve_normals(&parsed);
        let half = std::f32::consts::FRAC_1_SQRT_2;

        assert_vec_eq(normals[0], Vector3::new(0.0, 0.0, 1.0));
        // 位置 2 先收到 (0,0,1)，再收到 (0,1,0)
        assert_vec_eq(normals[1], Vector3::new(0.0, half, half));
        // 位置 3 的第二个角没有法线索引，不贡献
        assert_vec_eq(normals[2], Vector3::new(0.0, 0.0, 1.0));
        assert_vec_eq(normals[3], Vector3::new(0.0, 1.0, 0.0));
    }

    #[test]
    fn test_recompute_flat_normals_last_write_wins() {
        // 两个共享边的三角形，一个在 XY 平面，一个在 XZ 平面
        let mut vertices = vec![
            Vertex::new([0.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0]),
            Vertex::new([1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0]),
            Vertex::new([0.0, 1.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0]),
            Vertex::new([0.0, 0.0, 1.0], [0.0, 1.0, 0.0], [0.0, 0.0]),
        ];
        let indices = [0, 1, 2, 0, 3, 1];

        recompute_flat_normals(&mut vertices, &indices);

        assert_eq!(vertices[2].normal, [0.0, 0.0, 1.0]);
        // 顶点 0 和 1 被第二个三角形覆盖：(0,0,1) × (1,0,0) = (0,1,0)
        assert_eq!(vertices[0].normal, [0.0, 1.0, 0.0]);
        assert_eq!(vertices[1].normal, [0.0, 1.0, 0.0]);
        assert_eq!(vertices[3].normal, [0.0, 1.0, 0.0]);

        for v in &vertices {
            let n = Vector3::from(v.normal);
            assert!(approx_eq(n.norm(), 1.0, 1e-6));
        }
    }
}
