/// OBJ 导出
///
/// 把导入结果重新写成 OBJ 文本：每个输出顶点写一条 `v`/`vt`/`vn`，
/// 每个绘制区间写一条 `usemtl`，三角形写成 `f p/t/n`（三个索引相同）。
/// 再次导入时顶点数、索引数和环绕顺序都保持不变。
use std::io::Write;

use crate::geometry::mesh::MeshData;

/// 写入任意输出流
///
/// `flip_v` 应与导入时使用的设置一致，写出的 `vt` 会还原为源文件的 V 约定。
pub fn write_obj_to<W: Write>(mesh: &MeshData, flip_v: bool, out: &mut W) -> std::io::Result<()> {
    if let Some(name) = &mesh.name {
        writeln!(out, "# {}", name)?;
    }
    writeln!(
        out,
        "# {} vertices, {} triangles",
        mesh.vertex_count(),
        mesh.triangle_count()
    )?;

    for v in &mesh.vertices {
        writeln!(out, "v {} {} {}", v.position[0], v.position[1], v.position[2])?;
    }
    for v in &mesh.vertices {
        let t = if flip_v { 1.0 - v.texcoord[1] } else { v.texcoord[1] };
        writeln!(out, "vt {} {}", v.texcoord[0], t)?;
    }
    for v in &mesh.vertices {
        writeln!(out, "vn {} {} {}", v.normal[0], v.normal[1], v.normal[2])?;
    }

    if mesh.spans.is_empty() {
        write_faces(out, &mesh.indices)?;
    } else {
        for span in &mesh.spans {
            writeln!(out, "usemtl {}", span.material)?;
            write_faces(out, &mesh.indices[span.index_range()])?;
        }
    }

    Ok(())
}

/// 写成字符串
pub fn write_obj(mesh: &MeshData, flip_v: bool) -> String {
    let mut out = Vec::new();
    // 写入 Vec<u8> 不会失败
    let _ = write_obj_to(mesh, flip_v, &mut out);
    String::from_utf8_lossy(&out).into_owned()
}

fn write_faces<W: Write>(out: &mut W, indices: &[u32]) -> std::io::Result<()> {
    for triangle in indices.chunks_exact(3) {
        write!(out, "f")?;
        for &index in triangle {
            let i = index + 1;
            write!(out, " {}/{}/{}", i, i, i)?;
        }
        writeln!(out)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::loaders::ObjLoader;

    #[test]
    fn test_write_triangle() {
        let mesh = ObjLoader::default()
            .load_from_str("v 0 0 0\nv 1 0 0\nv 0 1 0\nvt 0 0\nf 1/1 2/1 3/1\n")
            .unwrap();
        let text = write_obj(&mesh, true);

        assert!(text.contains("v 1 0 0\n"));
        assert!(text.contains("vt 0 0\n"));
        assert!(text.contains("vn 0 0 1\n"));
        assert!(text.contains("usemtl default\n"));
        assert!(text.contains("f 1/1/1 2/2/2 3/3/3\n"));
    }

    #[test]
    fn test_round_trip_preserves_buffers() {
        let source = "v 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 0\n\
                      vt 0 0\nvt 1 0\nvt 1 1\nvt 0 1\n\
                      vn 0 0 1\n\
                      usemtl front\nf 1/1/1 2/2/1 3/3/1\nf 1/1/1 3/3/1 4/4/1\n\
                      usemtl back\nf 3/3/1 2/2/1 1/1/1\n";
        let loader = ObjLoader::default();
        let first = loader.load_from_str(source).unwrap();
        let second = loader.load_from_str(&write_obj(&first, true)).unwrap();

        assert_eq!(second.vertex_count(), first.vertex_count());
        assert_eq!(second.indices, first.indices);
        assert_eq!(second.spans, first.spans);
        assert_eq!(second.vertices, first.vertices);
    }
}
