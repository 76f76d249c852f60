//! 图层管理
//!
//! 图层是CAD中组织实体的重要方式。渲染时实体的
//! ByLayer 颜色/线型通过所属图层解析。

use crate::properties::{Color, LineType, LineWeight};
use serde::{Deserialize, Serialize};

/// 图层定义
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Layer {
    /// 图层名称
    pub name: String,

    /// 图层颜色
    pub color: Color,

    /// 图层线型
    pub line_type: LineType,

    /// 图层线宽
    pub line_weight: LineWeight,

    /// 是否可见
    pub visible: bool,

    /// 是否冻结
    pub frozen: bool,

    /// 是否可打印
    pub plottable: bool,
}

impl Layer {
    /// 创建新图层
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            color: Color::WHITE,
            line_type: LineType::Continuous,
            line_weight: LineWeight::Default,
            visible: true,
            frozen: false,
            plottable: true,
        }
    }

    /// 默认图层（0层）
    pub fn default_layer() -> Self {
        Self::new("0")
    }

    /// 设置颜色
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    /// 设置线型
    pub fn with_line_type(mut self, line_type: LineType) -> Self {
        self.line_type = line_type;
        self
    }

    /// 检查图层上的实体是否应该显示
    pub fn should_display(&self) -> bool {
        self.visible && !self.frozen
    }
}

/// 图层表
///
/// 始终包含图层 "0"；按名称查找。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayerTable {
    layers: Vec<Layer>,
}

impl LayerTable {
    /// 创建新的图层表
    pub fn new() -> Self {
        Self {
            layers: vec![Layer::default_layer()],
        }
    }

    /// 添加新图层（同名图层会被替换）
    pub fn add_layer(&mut self, layer: Layer) {
        if let Some(existing) = self.layers.iter_mut().find(|l| l.name == layer.name) {
            *existing = layer;
        } else {
            self.layers.push(layer);
        }
    }

    /// 获取图层（按名称）
    pub fn get_layer(&self, name: &str) -> Option<&Layer> {
        self.layers.iter().find(|l| l.name == name)
    }

    /// 获取所有图层
    pub fn all_layers(&self) -> &[Layer] {
        &self.layers
    }

    /// 图层数量
    pub fn count(&self) -> usize {
        self.layers.len()
    }
}

impl Default for LayerTable {
    fn default() -> Self {
        Self::new()
    }
}
