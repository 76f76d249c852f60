//! DXFSVG 几何与文档模型
//!
//! 为 DXF→SVG 转换流程提供共享的2D图元、实体和图层类型。
//!
//! # 架构设计
//!
//! 采用 Entity-Component 模式：
//! - `Entity`: 几何数据 + 视觉属性 + 所属图层
//! - `Geometry`: 几何数据（点、线、圆等）
//! - `Properties`: 视觉属性（颜色、线型、线宽）
//!
//! # 示例
//!
//! ```rust
//! use dxfsvg_core::prelude::*;
//!
//! // 创建一条线段
//! let line = Line::new(Point2::origin(), Point2::new(100.0, 50.0));
//!
//! // 计算长度
//! println!("Length: {}", line.length());
//! ```

pub mod entity;
pub mod geometry;
pub mod layer;
pub mod math;
pub mod properties;

pub mod prelude {
    //! 常用类型的便捷导入
    pub use crate::entity::Entity;
    pub use crate::geometry::{Arc, Circle, Geometry, Line, Point, Polyline};
    pub use crate::layer::{Layer, LayerTable};
    pub use crate::math::{BoundingBox2, Point2, Vector2};
    pub use crate::properties::{Color, LineType, Properties};
}
