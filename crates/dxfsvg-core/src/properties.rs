//! 实体属性定义
//!
//! 包含颜色、线型、线宽等视觉属性。

use serde::{Deserialize, Serialize};

/// RGBA颜色
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn with_alpha(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// 从十六进制值创建（如 0xFF0000 表示红色）
    pub const fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xFF) as u8,
            g: ((hex >> 8) & 0xFF) as u8,
            b: (hex & 0xFF) as u8,
            a: 255,
        }
    }

    // 预定义颜色（AutoCAD ACI颜色兼容）
    pub const RED: Color = Color::new(255, 0, 0);
    pub const YELLOW: Color = Color::new(255, 255, 0);
    pub const GREEN: Color = Color::new(0, 255, 0);
    pub const CYAN: Color = Color::new(0, 255, 255);
    pub const BLUE: Color = Color::new(0, 0, 255);
    pub const MAGENTA: Color = Color::new(255, 0, 255);
    pub const WHITE: Color = Color::new(255, 255, 255);
    pub const BLACK: Color = Color::new(0, 0, 0);
    pub const GRAY: Color = Color::new(128, 128, 128);

    /// 颜色跟随图层（ByLayer）
    pub const BY_LAYER: Color = Color::with_alpha(0, 0, 0, 0);

    /// 颜色跟随块（ByBlock）
    pub const BY_BLOCK: Color = Color::with_alpha(0, 0, 0, 1);

    pub fn is_by_layer(&self) -> bool {
        self.a == 0
    }

    pub fn is_by_block(&self) -> bool {
        self.a == 1 && self.r == 0 && self.g == 0 && self.b == 0
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BY_LAYER
    }
}

/// 线型
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum LineType {
    /// 连续线（实线）
    Continuous,
    /// 虚线
    Dashed,
    /// 点线
    Dotted,
    /// 点划线
    DashDot,
    /// 中心线
    Center,
    /// 隐藏线
    Hidden,
    /// 跟随图层
    ByLayer,
}

impl LineType {
    /// 获取线型的模式数据（正数表示画线，负数表示空白）
    pub fn pattern(&self) -> Vec<f64> {
        match self {
            LineType::Continuous => vec![],
            LineType::Dashed => vec![12.0, -6.0],
            LineType::Dotted => vec![0.0, -6.0],
            LineType::DashDot => vec![12.0, -6.0, 0.0, -6.0],
            LineType::Center => vec![32.0, -6.0, 6.0, -6.0],
            LineType::Hidden => vec![6.0, -3.0],
            LineType::ByLayer => vec![],
        }
    }

    /// 按名称匹配DXF线型（未知名称按连续线处理）
    pub fn from_dxf_name(name: &str) -> Self {
        match name.to_ascii_uppercase().as_str() {
            "BYLAYER" => LineType::ByLayer,
            "DASHED" => LineType::Dashed,
            "DOT" | "DOTTED" => LineType::Dotted,
            "DASHDOT" => LineType::DashDot,
            "CENTER" => LineType::Center,
            "HIDDEN" => LineType::Hidden,
            _ => LineType::Continuous,
        }
    }
}

impl Default for LineType {
    fn default() -> Self {
        LineType::ByLayer
    }
}

/// 线宽（毫米）
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum LineWeight {
    /// 默认线宽
    Default,
    /// 跟随图层
    ByLayer,
    /// 指定线宽（毫米）
    Width(f64),
}

impl Default for LineWeight {
    fn default() -> Self {
        LineWeight::ByLayer
    }
}

/// 实体的视觉属性
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Properties {
    /// 颜色
    pub color: Color,
    /// 线型
    pub line_type: LineType,
    /// 线宽
    pub line_weight: LineWeight,
}

impl Default for Properties {
    fn default() -> Self {
        Self {
            color: Color::BY_LAYER,
            line_type: LineType::ByLayer,
            line_weight: LineWeight::ByLayer,
        }
    }
}

impl Properties {
    /// 创建带有指定颜色的属性
    pub fn with_color(color: Color) -> Self {
        Self {
            color,
            ..Default::default()
        }
    }

    /// 设置线型
    pub fn set_line_type(mut self, line_type: LineType) -> Self {
        self.line_type = line_type;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_by_layer_sentinel() {
        assert!(Color::BY_LAYER.is_by_layer());
        assert!(!Color::RED.is_by_layer());
        assert!(Color::BY_BLOCK.is_by_block());
    }

    #[test]
    fn test_line_type_from_dxf_name() {
        assert_eq!(LineType::from_dxf_name("DASHED"), LineType::Dashed);
        assert_eq!(LineType::from_dxf_name("ByLayer"), LineType::ByLayer);
        assert_eq!(LineType::from_dxf_name("WHATEVER"), LineType::Continuous);
    }
}
