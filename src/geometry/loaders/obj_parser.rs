/// OBJ 文本解析器
///
/// 单遍扫描源文本，产出原始位置/法线/纹理坐标数组以及按材质分组、
/// 已经扇形三角化的面列表。解析状态保存在局部的 `ParseState` 中，
/// 不存在跨调用共享的状态，不同线程可以同时解析互不相关的输入。
///
/// # 支持的指令
///
/// | 指令 | 内容 |
/// |---|---|
/// | `v` | 位置，3 个浮点数（多余字段忽略） |
/// | `vn` | 法线，3 个浮点数 |
/// | `vt` | 纹理坐标，2 个浮点数（多余字段忽略），V 分量可翻转 |
/// | `usemtl` | 开始一个新的材质组 |
/// | `f` | 面，`位置[/纹理坐标][/法线]` 引用，至少 3 个 |
///
/// 空行和以 `#` 开头的行被跳过。宽松模式下其他指令被忽略，
/// 严格模式下报 `MalformedDirective`。
use std::io::BufRead;
use std::str::SplitWhitespace;

use crate::core::error::{AttributeKind, DistMeshError, LineLocation, MeshLoadError, Result};
use crate::core::math::{Vector2, Vector3};
use crate::import_trace;

/// 隐式第一个材质组的名称
pub const DEFAULT_GROUP: &str = "default";

/// 面上一个角的顶点引用（0 基索引）
///
/// 纹理坐标或法线子字段缺失（包括 `v//n` 这种空子字段）时为 `None`，
/// 不会回退到第一个声明的值。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VertexRef {
    pub position: usize,
    pub texcoord: Option<usize>,
    pub normal: Option<usize>,
}

impl VertexRef {
    pub fn new(position: usize, texcoord: Option<usize>, normal: Option<usize>) -> Self {
        Self {
            position,
            texcoord,
            normal,
        }
    }
}

/// 三角形的三个角，保持源文件中的环绕顺序
pub type Triangle = [VertexRef; 3];

/// 材质组：`usemtl` 之后直到下一个 `usemtl`（或文件结束）的所有三角形
#[derive(Debug, Clone, PartialEq)]
pub struct MaterialGroup {
    pub name: String,
    pub triangles: Vec<Triangle>,
}

impl MaterialGroup {
    fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            triangles: Vec::new(),
        }
    }
}

/// 解析结果
///
/// 空材质组已被丢弃；重复使用同一材质名的 `usemtl` 块各自成组，不会合并。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedObj {
    pub positions: Vec<Vector3>,
    pub normals: Vec<Vector3>,
    pub texcoords: Vec<Vector2>,
    pub groups: Vec<MaterialGroup>,
    /// `mtllib` 引用的材质库文件名（仅记录，不读取）
    pub material_libraries: Vec<String>,
}

impl ParsedObj {
    /// 源文件是否声明了显式法线（任意一条 `vn`）
    #[inline]
    pub fn has_normals(&self) -> bool {
        !self.normals.is_empty()
    }

    /// 按组顺序遍历所有三角形
    pub fn triangles(&self) -> impl Iterator<Item = &Triangle> + '_ {
        self.groups.iter().flat_map(|g| g.triangles.iter())
    }

    /// 三角形总数
    pub fn triangle_count(&self) -> usize {
        self.groups.iter().map(|g| g.triangles.len()).sum()
    }
}

/// 解析选项
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    /// 严格模式：未识别的指令视为错误
    pub strict: bool,
    /// 翻转纹理坐标 V 分量
    pub flip_v: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            strict: false,
            flip_v: true,
        }
    }
}

/// OBJ 解析器
///
/// # 示例
///
/// ```rust
/// use dist_mesh::geometry::loaders::obj_parser::{ObjParser, ParseOptions};
///
/// let parsed = ObjParser::new(ParseOptions::default())
///     .parse_str("v 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 0\nf 1 2 3 4\n")?;
///
/// assert_eq!(parsed.positions.len(), 4);
/// assert_eq!(parsed.triangle_count(), 2);
/// # Ok::<(), dist_mesh::core::DistMeshError>(())
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ObjParser {
    options: ParseOptions,
}

impl ObjParser {
    pub fn new(options: ParseOptions) -> Self {
        Self { options }
    }

    /// 解析内存中的文本
    pub fn parse_str(&self, text: &str) -> Result<ParsedObj> {
        let mut state = ParseState::new(self.options);
        for (i, line) in text.lines().enumerate() {
            state.parse_line(i + 1, line)?;
        }
        Ok(state.finish())
    }

    /// 逐行解析任意带缓冲的读取器；读取失败作为 IO 错误返回
    pub fn parse_reader<R: BufRead>(&self, reader: R) -> Result<ParsedObj> {
        let mut state = ParseState::new(self.options);
        for (i, line) in reader.lines().enumerate() {
            let line = line.map_err(|e| invalid_line(i + 1, e))?;
            state.parse_line(i + 1, &line)?;
        }
        Ok(state.finish())
    }
}

/// 非 UTF-8 的行保留行号，其他读取失败按 IO 错误返回
fn invalid_line(number: usize, err: std::io::Error) -> DistMeshError {
    if err.kind() == std::io::ErrorKind::InvalidData {
        MeshLoadError::MalformedNumericField {
            location: LineLocation::new(number, "<invalid UTF-8>"),
            field: err.to_string(),
        }
        .into()
    } else {
        err.into()
    }
}

/// 当前正在处理的行
struct Line<'a> {
    number: usize,
    // 未裁剪的原始文本，只用于错误位置
    raw: &'a str,
}

impl Line<'_> {
    fn location(&self) -> LineLocation {
        LineLocation::new(self.number, self.raw)
    }

    fn numeric_error(&self, field: &str) -> DistMeshError {
        MeshLoadError::MalformedNumericField {
            location: self.location(),
            field: field.to_string(),
        }
        .into()
    }
}

struct ParseState {
    options: ParseOptions,
    parsed: ParsedObj,
    current: MaterialGroup,
    // 复用的面引用缓冲区
    face: Vec<VertexRef>,
}

impl ParseState {
    fn new(options: ParseOptions) -> Self {
        Self {
            options,
            parsed: ParsedObj::default(),
            current: MaterialGroup::new(DEFAULT_GROUP),
            face: Vec::new(),
        }
    }

    fn parse_line(&mut self, number: usize, raw: &str) -> Result<()> {
        let text = raw.trim();
        if text.is_empty() || text.starts_with('#') {
            return Ok(());
        }

        let line = Line { number, raw };
        let mut tokens = text.split_whitespace();
        let directive = tokens.next().unwrap_or_default();

        match directive {
            "v" => {
                let [x, y, z] = parse_floats::<3>(&line, &mut tokens)?;
                self.parsed.positions.push(Vector3::new(x, y, z));
            }
            "vn" => {
                let [x, y, z] = parse_floats::<3>(&line, &mut tokens)?;
                self.parsed.normals.push(Vector3::new(x, y, z));
            }
            "vt" => {
                let [u, v] = parse_floats::<2>(&line, &mut tokens)?;
                let v = if self.options.flip_v { 1.0 - v } else { v };
                self.parsed.texcoords.push(Vector2::new(u, v));
            }
            "usemtl" => {
                let name = text[directive.len()..].trim();
                if name.is_empty() {
                    return Err(MeshLoadError::MalformedDirective {
                        location: line.location(),
                        directive: directive.to_string(),
                    }
                    .into());
                }
                let previous = std::mem::replace(&mut self.current, MaterialGroup::new(name));
                self.close_group(previous);
            }
            "f" => self.parse_face(&line, tokens)?,
            "mtllib" if !self.options.strict => {
                self.parsed
                    .material_libraries
                    .extend(tokens.map(str::to_string));
            }
            other => {
                if self.options.strict {
                    return Err(MeshLoadError::MalformedDirective {
                        location: line.location(),
                        directive: other.to_string(),
                    }
                    .into());
                }
                import_trace!(line = number, directive = other, "skipping unsupported directive");
            }
        }

        Ok(())
    }

    fn parse_face<'a>(&mut self, line: &Line<'_>, tokens: impl Iterator<Item = &'a str>) -> Result<()> {
        self.face.clear();
        for token in tokens {
            let reference = self.parse_reference(line, token)?;
            self.face.push(reference);
        }

        if self.face.len() < 3 {
            return Err(MeshLoadError::DegenerateFace {
                location: line.location(),
                references: self.face.len(),
            }
            .into());
        }

        // 扇形三角化：(v0, vi, vi+1)，i = 1..=k-2
        let first = self.face[0];
        for pair in self.face[1..].windows(2) {
            self.current.triangles.push([first, pair[0], pair[1]]);
        }

        Ok(())
    }

    fn parse_reference(&self, line: &Line<'_>, token: &str) -> Result<VertexRef> {
        let mut fields = token.split('/');
        let position = fields.next().unwrap_or_default();
        let texcoord = fields.next().filter(|s| !s.is_empty());
        let normal = fields.next().filter(|s| !s.is_empty());

        if fields.next().is_some() || position.is_empty() {
            return Err(line.numeric_error(token));
        }

        let position = resolve_index(
            line,
            position,
            self.parsed.positions.len(),
            AttributeKind::Position,
        )?;
        let texcoord = texcoord
            .map(|t| resolve_index(line, t, self.parsed.texcoords.len(), AttributeKind::TexCoord))
            .transpose()?;
        let normal = normal
            .map(|n| resolve_index(line, n, self.parsed.normals.len(), AttributeKind::Normal))
            .transpose()?;

        Ok(VertexRef::new(position, texcoord, normal))
    }

    fn close_group(&mut self, group: MaterialGroup) {
        if group.triangles.is_empty() {
            import_trace!(material = %group.name, "dropping empty material group");
        } else {
            self.parsed.groups.push(group);
        }
    }

    fn finish(mut self) -> ParsedObj {
        let last = std::mem::replace(&mut self.current, MaterialGroup::new(DEFAULT_GROUP));
        self.close_group(last);
        self.parsed
    }
}

/// 读取固定数量的浮点分量，多余字段忽略
fn parse_floats<const N: usize>(
    line: &Line<'_>,
    tokens: &mut SplitWhitespace<'_>,
) -> Result<[f32; N]> {
    let mut values = [0.0f32; N];
    for (i, value) in values.iter_mut().enumerate() {
        let token = tokens
            .next()
            .ok_or_else(|| line.numeric_error(&format!("<missing component {}>", i + 1)))?;
        *value = token.parse::<f32>().map_err(|_| line.numeric_error(token))?;
    }
    Ok(values)
}

/// 把源文件中的 1 基索引（负数为相对索引）转换为 0 基索引
///
/// 只能引用当前行之前已经声明的元素。
fn resolve_index(line: &Line<'_>, raw: &str, declared: usize, attribute: AttributeKind) -> Result<usize> {
    let index: i64 = raw.parse().map_err(|_| line.numeric_error(raw))?;

    let resolved = match index {
        i if i > 0 && (i as u64) <= declared as u64 => Some(i as usize - 1),
        i if i < 0 && i.unsigned_abs() <= declared as u64 => Some(declared - i.unsigned_abs() as usize),
        _ => None,
    };

    resolved.ok_or_else(|| {
        MeshLoadError::DanglingIndexReference {
            location: line.location(),
            attribute,
            index,
            declared,
        }
        .into()
    })
}
