//! 顶点去重与索引构建
//!
//! 把解析得到的三角形按 (位置, 纹理坐标, 法线) 三元组去重，生成扁平的顶点数组、
//! 颜色数组、重映射后的索引数组，以及每个材质组的绘制区间。
//!
//! 所有组共用一个顶点数组，但去重只在组内进行：同一个三元组出现在不同组时会得到
//! 不同的输出顶点，保证每组的顶点连续、索引不越出本组范围。

use std::collections::HashMap;

use crate::core::math::{Color, Vector3};
use crate::geometry::loaders::obj_parser::{ParsedObj, VertexRef};
use crate::geometry::math_utils::recompute_flat_normals;
use crate::geometry::mesh::{DrawSpan, MeshData};
use crate::geometry::vertex::Vertex;

/// 完全没有法线信息时写入的占位法线
pub const FALLBACK_NORMAL: [f32; 3] = [0.0, 1.0, 0.0];

/// 输出顶点的法线来源
#[derive(Debug, Clone, Copy)]
pub enum NormalSource<'a> {
    /// 解析阶段已为每个位置解析出法线（按位置索引）
    Resolved(&'a [Vector3]),
    /// 先写入占位法线，去重后再逐三角形写入平面法线
    FlatPostPass,
}

/// 索引构建器
#[derive(Debug, Clone, Copy)]
pub struct MeshIndexer {
    color: Color,
}

impl MeshIndexer {
    /// 创建构建器，`color` 为每个输出顶点的固定颜色
    pub fn new(color: Color) -> Self {
        Self { color }
    }

    /// 构建输出缓冲区
    ///
    /// 三元组在组内按首次出现的顺序分配槽位，槽位编号在所有组之间连续递增。
    /// 三角形的环绕顺序保持不变。
    pub fn build(&self, parsed: &ParsedObj, normals: NormalSource<'_>) -> MeshData {
        let mut mesh = MeshData::new();
        let color = self.color.to_array();

        for group in &parsed.groups {
            let vertex_start = mesh.vertices.len() as u32;
            let index_start = mesh.indices.len() as u32;
            let mut slots: HashMap<VertexRef, u32> = HashMap::new();

            for triangle in &group.triangles {
                for corner in triangle {
                    let slot = *slots.entry(*corner).or_insert_with(|| {
                        mesh.vertices.push(resolve_vertex(parsed, corner, normals));
                        mesh.colors.push(color);
                        mesh.vertices.len() as u32 - 1
                    });
                    mesh.indices.push(slot);
                }
            }

            mesh.spans.push(DrawSpan::new(
                group.name.clone(),
                index_start,
                mesh.indices.len() as u32 - index_start,
                vertex_start,
                mesh.vertices.len() as u32 - vertex_start,
            ));
        }

        if let NormalSource::FlatPostPass = normals {
            recompute_flat_normals(&mut mesh.vertices, &mesh.indices);
        }

        mesh
    }
}

/// 首次遇到一个三元组时生成对应的输出顶点
fn resolve_vertex(parsed: &ParsedObj, corner: &VertexRef, normals: NormalSource<'_>) -> Vertex {
    let position = parsed.positions[corner.position].into();

    let normal = match normals {
        NormalSource::Resolved(resolved) => resolved
            .get(corner.position)
            .map(|n| (*n).into())
            .unwrap_or(FALLBACK_NORMAL),
        NormalSource::FlatPostPass => FALLBACK_NORMAL,
    };

    let texcoord = corner
        .texcoord
        .and_then(|t| parsed.texcoords.get(t))
        .map(|t| (*t).into())
        .unwrap_or([0.0, 0.0]);

    Vertex::new(position, normal, texcoord)
}
