//! 数学类型模块
//!
//! 基于 `nalgebra` 的向量类型别名、颜色类型和少量归一化工具函数。

pub use nalgebra::{Vector2 as Vec2, Vector3 as Vec3, Vector4 as Vec4};

// 类型别名，使用更简洁的名称
pub type Vector2 = Vec2<f32>;
pub type Vector3 = Vec3<f32>;
pub type Vector4 = Vec4<f32>;

/// 颜色类型（RGBA，范围 0.0-1.0）
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    /// 创建新的颜色
    pub fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// 创建 RGB 颜色（alpha = 1.0）
    pub fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self::new(r, g, b, 1.0)
    }

    /// 转换为 Vector4
    pub fn to_vec4(&self) -> Vector4 {
        Vector4::new(self.r, self.g, self.b, self.a)
    }

    /// 转换为数组（顶点颜色缓冲区的布局）
    pub fn to_array(&self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }

    // 预定义颜色
    pub const WHITE: Color = Color { r: 1.0, g: 1.0, b: 1.0, a: 1.0 };
    pub const RED: Color = Color { r: 1.0, g: 0.0, b: 0.0, a: 1.0 };
    pub const GRAY: Color = Color { r: 0.5, g: 0.5, b: 0.5, a: 1.0 };
}

impl From<[f32; 4]> for Color {
    fn from(c: [f32; 4]) -> Self {
        Self::new(c[0], c[1], c[2], c[3])
    }
}

/// 归一化向量；只有精确的零向量（或含非有限分量）返回零向量
///
/// 先按最大分量缩放再归一化，很短的向量也不会因为平方下溢而丢失方向。
#[inline]
pub fn normalize_or_zero(v: Vector3) -> Vector3 {
    let max = v.amax();
    if max == 0.0 || !v.iter().all(|c| c.is_finite()) {
        return Vector3::zeros();
    }
    (v / max).normalize()
}

/// 浮点数近似比较
#[inline]
pub fn approx_eq(a: f32, b: f32, epsilon: f32) -> bool {
    (a - b).abs() < epsilon
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_or_zero() {
        let n = normalize_or_zero(Vector3::new(3.0, 0.0, 4.0));
        assert!(approx_eq(n.norm(), 1.0, 1e-6));
        assert!(approx_eq(n.x, 0.6, 1e-6));

        assert_eq!(normalize_or_zero(Vector3::zeros()), Vector3::zeros());
        assert_eq!(
            normalize_or_zero(Vector3::new(f32::NAN, 0.0, 1.0)),
            Vector3::zeros()
        );
    }

    #[test]
    fn test_normalize_tiny_vector() {
        for scale in [2.5e-7f32, 1e-12, 1e-30] {
            let n = normalize_or_zero(Vector3::new(0.0, 0.0, scale));
            assert!(approx_eq(n.z, 1.0, 1e-6), "scale {}: {:?}", scale, n);
        }

        let n = normalize_or_zero(Vector3::new(3e-25, 0.0, 4e-25));
        assert!(approx_eq(n.norm(), 1.0, 1e-6));
        assert!(approx_eq(n.x, 0.6, 1e-6));
    }

    #[test]
    fn test_color_conversion() {
        let c = Color::from([0.5, 0.5, 0.5, 1.0]);
        assert_eq!(c, Color::GRAY);
        assert_eq!(Color::RED.to_array(), [1.0, 0.0, 0.0, 1.0]);
        assert_eq!(Color::rgb(1.0, 1.0, 1.0), Color::WHITE);
        assert_eq!(Color::WHITE.to_vec4(), Vector4::new(1.0, 1.0, 1.0, 1.0));
    }
}
