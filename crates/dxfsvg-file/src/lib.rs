//! DXFSVG 文件格式处理
//!
//! 支持：
//! - `.dxf` 导入（模型空间实体和图层）
//! - SVG 导出
//! - 三个入口（HTTP、批量、命令行）共享的转换例程

pub mod convert;
pub mod document;
pub mod dxf_io;
pub mod error;
pub mod export;

pub use convert::{convert_bytes, convert_files, convert_path};
pub use document::Document;
pub use error::FileError;
pub use export::{PageSetup, SvgExporter};
