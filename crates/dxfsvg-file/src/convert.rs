//! DXF→SVG 转换流程
//!
//! HTTP、批量、命令行三个入口共享的转换例程：
//! 打开DXF文档 → 构建页面画布 → 渲染 → 校验输出。
//! 画布在调用内创建和销毁，重复转换互不影响。

use crate::document::Document;
use crate::error::FileError;
use crate::export::{PageSetup, SvgExporter};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{error, info, warn};

/// 期望的输入文件扩展名
pub const DXF_EXTENSION: &str = "dxf";

/// 转换单个DXF文件为SVG文本
pub fn convert_path(path: impl AsRef<Path>) -> Result<String, FileError> {
    let document = Document::open(path)?;
    render_svg(&document)
}

/// 转换内存中的DXF字节为SVG文本
pub fn convert_bytes(bytes: &[u8]) -> Result<String, FileError> {
    let document = Document::from_bytes(bytes)?;
    render_svg(&document)
}

/// 渲染文档并校验输出
fn render_svg(document: &Document) -> Result<String, FileError> {
    let exporter = SvgExporter::new(PageSetup::default());
    let svg = exporter.export(document)?;

    // 输出必须以XML声明开头，否则视为渲染失败
    if !svg.starts_with("<?xml") {
        return Err(FileError::InvalidOutput(
            "rendered output does not start with an XML declaration".to_string(),
        ));
    }

    Ok(svg)
}

/// 批量转换DXF文件
///
/// 跳过扩展名不是 `.dxf` 的路径；单个文件失败只记录日志，
/// 不中断整个批次。返回 派生的`.svg`文件名 → SVG文本 的映射。
pub fn convert_files<P: AsRef<Path>>(
    paths: impl IntoIterator<Item = P>,
) -> BTreeMap<String, String> {
    let mut converted = BTreeMap::new();

    for path in paths {
        let path = path.as_ref();

        if path.extension().and_then(|e| e.to_str()) != Some(DXF_EXTENSION) {
            warn!("Skipping {}: not a DXF file", path.display());
            continue;
        }

        let stem = match path.file_stem().and_then(|s| s.to_str()) {
            Some(stem) => stem,
            None => {
                warn!("Skipping {}: unreadable file name", path.display());
                continue;
            }
        };
        let svg_filename = format!("{}.svg", stem);

        match convert_path(path) {
            Ok(svg) => {
                info!("Converted: {} => {}", path.display(), svg_filename);
                converted.insert(svg_filename, svg);
            }
            Err(e) => {
                error!("Failed to convert {}: {}", path.display(), e);
            }
        }
    }

    converted
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    /// 含一条线段的最小DXF文档
    fn minimal_dxf_bytes() -> Vec<u8> {
        let mut drawing = dxf::Drawing::new();

        let mut line = dxf::entities::Line::default();
        line.p1 = dxf::Point::new(0.0, 0.0, 0.0);
        line.p2 = dxf::Point::new(100.0, 50.0, 0.0);
        drawing.add_entity(dxf::entities::Entity::new(dxf::entities::EntityType::Line(
            line,
        )));

        let mut buffer = Vec::new();
        drawing.save(&mut buffer).expect("save dxf to buffer");
        buffer
    }

    #[test]
    fn test_convert_bytes_produces_svg() {
        let svg = convert_bytes(&minimal_dxf_bytes()).unwrap();
        assert!(svg.starts_with("<?xml"));
        assert!(svg.contains("<line"));
    }

    #[test]
    fn test_convert_is_idempotent() {
        let bytes = minimal_dxf_bytes();
        let first = convert_bytes(&bytes).unwrap();
        let second = convert_bytes(&bytes).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_convert_bytes_rejects_garbage() {
        assert!(convert_bytes(b"definitely not dxf").is_err());
    }

    #[test]
    fn test_convert_files_skips_and_isolates_failures() {
        let dir = tempfile::tempdir().unwrap();

        // 有效的DXF
        let good = dir.path().join("good.dxf");
        std::fs::write(&good, minimal_dxf_bytes()).unwrap();

        // 错误的扩展名
        let readme = dir.path().join("readme.txt");
        std::fs::write(&readme, b"not a drawing").unwrap();

        // 扩展名正确但内容损坏
        let broken = dir.path().join("broken.dxf");
        let mut f = std::fs::File::create(&broken).unwrap();
        f.write_all(b"garbage content").unwrap();

        let converted = convert_files([&good, &readme, &broken]);

        assert_eq!(converted.len(), 1);
        assert!(converted.contains_key("good.svg"));
        assert!(converted["good.svg"].starts_with("<?xml"));
    }

    #[test]
    fn test_convert_path_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("drawing.dxf");
        std::fs::write(&path, minimal_dxf_bytes()).unwrap();

        let svg = convert_path(&path).unwrap();
        assert!(svg.starts_with("<?xml"));
    }
}
