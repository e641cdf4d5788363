//! DistMesh - OBJ 网格导入工具
//!
//! 导入一个 OBJ 文件，输出顶点、索引和绘制区间的统计信息，
//! 可选地加载材质纹理并把导入结果重新导出为 OBJ。
//!
//! # 使用方法
//!
//! ```bash
//! # 使用 config.toml（不存在时使用默认配置）
//! cargo run -- model.obj
//!
//! # 严格解析 + 平面法线，并导出结果
//! cargo run -- --strict --flat --export out.obj model.obj
//! ```
//!
//! # 命令行参数
//!
//! - `--config <file>`: 配置文件路径（默认 `config.toml`）
//! - `--strict`: 遇到不支持的指令时报错
//! - `--flat`: 缺少法线时使用平面法线
//! - `--no-flip-v`: 不翻转纹理 V 坐标
//! - `--textures <dir>`: 纹理目录
//! - `--log-level <level>`: 日志级别
//! - `--export <out.obj>`: 把导入结果写回 OBJ 文件

use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use dist_mesh::core::{log, Config, ResourceLocator};
use dist_mesh::geometry::loaders::{load_mesh, obj_writer, ObjLoader};
use dist_mesh::geometry::texture::TextureLibrary;
use dist_mesh::geometry::MeshData;
use dist_mesh::{app_error, app_info};

/// 带参数值的选项，解析位置参数时需要跳过它们的值
const VALUE_OPTIONS: &[&str] = &["--config", "--textures", "--log-level", "--export"];

/// 命令行中工具自身负责的部分（其余交给 `Config::apply_args`）
struct CliArgs {
    config_path: PathBuf,
    export: Option<PathBuf>,
    mesh: Option<String>,
}

impl CliArgs {
    fn parse(args: &[String]) -> Self {
        let value_of = |flag: &str| {
            args.iter()
                .position(|a| a == flag)
                .and_then(|idx| args.get(idx + 1))
                .cloned()
        };

        let mut mesh = None;
        let mut iter = args.iter().skip(1);
        while let Some(arg) = iter.next() {
            if VALUE_OPTIONS.contains(&arg.as_str()) {
                iter.next();
            } else if !arg.starts_with("--") {
                mesh = Some(arg.clone());
            }
        }

        Self {
            config_path: value_of("--config")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("config.toml")),
            export: value_of("--export").map(PathBuf::from),
            mesh,
        }
    }
}

/// 应用程序入口点
///
/// # 流程
///
/// 1. 加载配置文件并应用命令行覆盖
/// 2. 初始化日志系统
/// 3. 导入网格（直接路径优先，其次在资源搜索目录中查找）
/// 4. 输出统计信息，加载纹理，按需导出
fn main() {
    let args: Vec<String> = std::env::args().collect();
    let cli = CliArgs::parse(&args);

    // 1. 加载配置（在初始化日志之前）
    let mut config = Config::from_file_or_default(&cli.config_path);
    config.apply_args(&args);

    if let Err(e) = config.validate() {
        eprintln!("Invalid configuration: {}", e);
        std::process::exit(1);
    }

    // 2. 初始化日志系统
    log::init_from_config(&config.logging);
    app_info!(version = env!("CARGO_PKG_VERSION"), "DistMesh starting...");

    if let Err(e) = run(&config, &cli) {
        app_error!("{:#}", e);
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(config: &Config, cli: &CliArgs) -> anyhow::Result<()> {
    let Some(name) = cli.mesh.as_deref() else {
        bail!("usage: dist_mesh [--config <file>] [--strict] [--flat] [--no-flip-v] [--textures <dir>] [--export <out.obj>] <mesh.obj>");
    };

    app_info!(
        strict = config.import.strict,
        flip_v = config.import.flip_v,
        normal_mode = config.import.normal_mode.name(),
        "Import configuration"
    );

    // 3. 导入网格
    let mesh = import(config, name).with_context(|| format!("failed to import {}", name))?;
    report(&mesh);

    // 4. 纹理
    let mut textures = TextureLibrary::new(config.textures.clone());
    let bindings = textures.load_for_spans(&mesh.spans);
    for (span, texture) in mesh.spans.iter().zip(&bindings) {
        if let Some(index) = texture {
            let image = &textures.images()[*index];
            app_info!(
                material = %span.material,
                path = %image.path.display(),
                width = image.width,
                height = image.height,
                "Texture bound"
            );
        }
    }

    // 5. 导出
    if let Some(out) = &cli.export {
        std::fs::write(out, obj_writer::write_obj(&mesh, config.import.flip_v))
            .with_context(|| format!("failed to write {}", out.display()))?;
        app_info!(path = %out.display(), "Mesh exported");
    }

    Ok(())
}

fn import(config: &Config, name: &str) -> dist_mesh::core::Result<MeshData> {
    let path = Path::new(name);
    if path.is_file() {
        return load_mesh(path, &config.import);
    }

    let locator = ResourceLocator::from_config(&config.resources);
    ObjLoader::new(config.import.clone()).load_resource(&locator, name)
}

fn report(mesh: &MeshData) {
    app_info!(
        name = mesh.name.as_deref().unwrap_or("Unnamed"),
        vertices = mesh.vertex_count(),
        triangles = mesh.triangle_count(),
        spans = mesh.spans.len(),
        vertex_bytes = mesh.vertex_bytes().len(),
        index_bytes = mesh.index_bytes().len(),
        "Mesh imported"
    );

    for span in &mesh.spans {
        app_info!(
            material = %span.material,
            index_start = span.index_start,
            triangles = span.triangle_count(),
            vertex_start = span.vertex_start,
            vertex_count = span.vertex_count,
            "Draw span"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_cli_args() {
        let cli = CliArgs::parse(&args(&[
            "dist_mesh",
            "--config",
            "custom.toml",
            "--textures",
            "tex",
            "--flat",
            "--export",
            "out.obj",
            "model.obj",
        ]));

        assert_eq!(cli.config_path, PathBuf::from("custom.toml"));
        assert_eq!(cli.export, Some(PathBuf::from("out.obj")));
        assert_eq!(cli.mesh.as_deref(), Some("model.obj"));
    }

    #[test]
    fn test_cli_defaults() {
        let cli = CliArgs::parse(&args(&["dist_mesh"]));
        assert_eq!(cli.config_path, PathBuf::from("config.toml"));
        assert!(cli.export.is_none());
        assert!(cli.mesh.is_none());
    }
}
