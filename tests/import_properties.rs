//! 导入管线的性质测试
//!
//! 使用 proptest 随机生成 OBJ 文本，验证：
//! - 扇形三角化：k 边形得到 k-2 个共享首顶点的三角形
//! - 去重幂等：重复的面不产生新顶点
//! - 缺少法线时（平滑和平面两种方式）法线都是单位长度
//! - 导入 → 导出 → 再导入保持缓冲区不变

use std::collections::HashSet;
use std::fmt::Write;

use dist_mesh::core::{ImportConfig, NormalMode};
use dist_mesh::geometry::loaders::obj_writer::write_obj;
use dist_mesh::geometry::loaders::ObjLoader;
use proptest::prelude::*;

fn coordinate() -> impl Strategy<Value = f32> {
    -10.0f32..10.0
}

/// 随机高度场网格：所有三角形在 XY 平面上都是逆时针，面法线的 z 分量为正
///
/// 网格间距在 1e-4 到 1e3 之间变化，覆盖亚毫米级的小三角形。
fn arb_height_field() -> impl Strategy<Value = String> {
    let scale = (-4.0f32..3.0).prop_map(|e| 10f32.powf(e));
    (2usize..6, 2usize..6, scale).prop_flat_map(|(w, h, scale)| {
        prop::collection::vec(-1.0f32..1.0, w * h).prop_map(move |heights| {
            let mut text = String::new();
            for j in 0..h {
                for i in 0..w {
                    writeln!(
                        text,
                        "v {} {} {}",
                        i as f32 * scale,
                        j as f32 * scale,
                        heights[j * w + i] * scale
                    )
                    .unwrap();
                }
            }
            for j in 0..h - 1 {
                for i in 0..w - 1 {
                    let a = j * w + i + 1;
                    writeln!(text, "f {} {} {} {}", a, a + 1, a + w + 1, a + w).unwrap();
                }
            }
            text
        })
    })
}

/// 随机的三角形列表，只引用位置
fn arb_position_triangles() -> impl Strategy<Value = (usize, Vec<[usize; 3]>)> {
    (3usize..10).prop_flat_map(|n| {
        (
            Just(n),
            prop::collection::vec([1..=n, 1..=n, 1..=n], 1..20),
        )
    })
}

const AXES: [&str; 6] = ["1 0 0", "-1 0 0", "0 1 0", "0 -1 0", "0 0 1", "0 0 -1"];

/// 带纹理坐标、法线和材质组的三角形网格
fn arb_full_mesh() -> impl Strategy<Value = String> {
    (3usize..8, 1usize..4).prop_flat_map(|(n, m)| {
        let corner = (1..=n, 1..=m, 1..=AXES.len());
        (
            prop::collection::vec([coordinate(), coordinate(), coordinate()], n),
            prop::collection::vec([0.0f32..1.0, 0.0f32..1.0], m),
            prop::collection::vec(
                (
                    0usize..3,
                    prop::collection::vec([corner.clone(), corner.clone(), corner], 1..5),
                ),
                1..4,
            ),
        )
            .prop_map(|(positions, texcoords, groups)| {
                let mut text = String::new();
                for [x, y, z] in positions {
                    writeln!(text, "v {} {} {}", x, y, z).unwrap();
                }
                for [u, v] in texcoords {
                    writeln!(text, "vt {} {}", u, v).unwrap();
                }
                for axis in AXES {
                    writeln!(text, "vn {}", axis).unwrap();
                }
                for (material, triangles) in groups {
                    writeln!(text, "usemtl m{}", material).unwrap();
                    for triangle in triangles {
                        text.push('f');
                        for (p, t, n) in triangle {
                            write!(text, " {}/{}/{}", p, t, n).unwrap();
                        }
                        text.push('\n');
                    }
                }
                text
            })
    })
}

fn length(normal: [f32; 3]) -> f32 {
    normal.iter().map(|c| c * c).sum::<f32>().sqrt()
}

#[test]
fn proptest_fan_triangulation() {
    proptest!(|(k in 3usize..12, z in coordinate())| {
        let mut text = String::new();
        for i in 0..k {
            let angle = i as f32 / k as f32 * std::f32::consts::TAU;
            writeln!(text, "v {} {} {}", angle.cos(), angle.sin(), z).unwrap();
        }
        let refs: Vec<String> = (1..=k).map(|i| i.to_string()).collect();
        writeln!(text, "f {}", refs.join(" ")).unwrap();

        let mesh = ObjLoader::default().load_from_str(&text).unwrap();

        prop_assert_eq!(mesh.vertex_count(), k);
        prop_assert_eq!(mesh.triangle_count(), k - 2);
        for (i, triangle) in mesh.indices.chunks_exact(3).enumerate() {
            let i = i as u32;
            prop_assert_eq!(triangle, &[0, i + 1, i + 2][..]);
        }
    });
}

#[test]
fn proptest_dedup_idempotence() {
    proptest!(|((n, triangles) in arb_position_triangles())| {
        let mut text = String::new();
        for i in 0..n {
            writeln!(text, "v {} 0 0", i).unwrap();
        }
        let mut faces = String::new();
        for [a, b, c] in &triangles {
            writeln!(faces, "f {} {} {}", a, b, c).unwrap();
        }

        let loader = ObjLoader::default();
        let once = loader.load_from_str(&format!("{}{}", text, faces)).unwrap();
        let twice = loader.load_from_str(&format!("{}{}{}", text, faces, faces)).unwrap();

        let distinct: HashSet<usize> = triangles.iter().flatten().copied().collect();
        prop_assert_eq!(once.vertex_count(), distinct.len());
        prop_assert_eq!(twice.vertex_count(), once.vertex_count());
        prop_assert_eq!(twice.indices.len(), once.indices.len() * 2);
        prop_assert_eq!(&twice.indices[..once.indices.len()], &once.indices[..]);
        prop_assert_eq!(&twice.indices[once.indices.len()..], &once.indices[..]);
    });
}

#[test]
fn proptest_reconstructed_normals_are_unit() {
    proptest!(|(text in arb_height_field(), flat in any::<bool>())| {
        let config = ImportConfig {
            normal_mode: if flat { NormalMode::Flat } else { NormalMode::Smooth },
            ..ImportConfig::default()
        };
        let mesh = ObjLoader::new(config).load_from_str(&text).unwrap();

        prop_assert!(!mesh.is_empty());
        for vertex in &mesh.vertices {
            prop_assert!((length(vertex.normal) - 1.0).abs() < 1e-4, "normal {:?}", vertex.normal);
            prop_assert!(vertex.normal[2] > 0.0);
        }
    });
}

#[test]
fn proptest_export_round_trip() {
    proptest!(|(text in arb_full_mesh())| {
        let loader = ObjLoader::default();
        let first = loader.load_from_str(&text).unwrap();
        let second = loader.load_from_str(&write_obj(&first, true)).unwrap();

        prop_assert_eq!(second.vertex_count(), first.vertex_count());
        prop_assert_eq!(&second.indices, &first.indices);
        prop_assert_eq!(&second.spans, &first.spans);

        for (a, b) in first.vertices.iter().zip(&second.vertices) {
            prop_assert_eq!(a.position, b.position);
            for i in 0..3 {
                prop_assert!((a.normal[i] - b.normal[i]).abs() < 1e-5);
            }
            for i in 0..2 {
                prop_assert!((a.texcoord[i] - b.texcoord[i]).abs() < 1e-5);
            }
        }
    });
}
