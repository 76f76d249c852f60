//! DXFSVG 命令行工具
//!
//! 用法：`dxfsvg <dxf_file>`
//!
//! 成功时将SVG文本写到标准输出并以0退出；
//! 参数错误、扩展名不符或转换失败时将诊断信息写到标准错误并以1退出。

use clap::error::ErrorKind;
use clap::Parser;
use dxfsvg_file::convert::DXF_EXTENSION;
use dxfsvg_file::FileError;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// 命令行参数
#[derive(Debug, Parser)]
#[command(name = "dxfsvg", about = "Convert a DXF drawing to SVG")]
struct Cli {
    /// 输入的DXF文件
    dxf_file: PathBuf,
}

fn main() -> ExitCode {
    // 日志写到stderr，避免污染标准输出的SVG文本
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::WARN)
        .with_writer(std::io::stderr)
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            let _ = e.print();
            return ExitCode::SUCCESS;
        }
        Err(e) => {
            // 参数错误按失败退出码1处理（而不是clap默认的2）
            eprint!("{}", e);
            return ExitCode::from(1);
        }
    };

    match run(&cli) {
        Ok(svg) => {
            print!("{}", svg);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Failed to convert {}: {}", cli.dxf_file.display(), e);
            ExitCode::from(1)
        }
    }
}

fn run(cli: &Cli) -> Result<String, FileError> {
    if cli.dxf_file.extension().and_then(|e| e.to_str()) != Some(DXF_EXTENSION) {
        return Err(FileError::InvalidFormat(format!(
            "{} is not a DXF file",
            cli.dxf_file.display()
        )));
    }

    dxfsvg_file::convert_path(&cli.dxf_file)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_non_dxf_extension() {
        let cli = Cli {
            dxf_file: PathBuf::from("drawing.txt"),
        };

        let err = run(&cli).unwrap_err();
        assert!(matches!(err, FileError::InvalidFormat(_)));
    }

    #[test]
    fn test_converts_dxf_file_to_svg() {
        let mut drawing = dxf::Drawing::new();

        let mut line = dxf::entities::Line::default();
        line.p1 = dxf::Point::new(0.0, 0.0, 0.0);
        line.p2 = dxf::Point::new(50.0, 25.0, 0.0);
        drawing.add_entity(dxf::entities::Entity::new(dxf::entities::EntityType::Line(
            line,
        )));

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("drawing.dxf");
        drawing.save_file(&path).unwrap();

        let cli = Cli { dxf_file: path };
        let svg = run(&cli).unwrap();
        assert!(svg.starts_with("<?xml"));
        assert!(svg.contains("<line"));
    }
}
