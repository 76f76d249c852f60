//! 实体定义
//!
//! 转换流程中的实体是只读的：导入后不再编辑，
//! 因此用所属图层的名称直接关联图层，不维护ID。

use serde::{Deserialize, Serialize};

/// CAD实体
///
/// 一个实体包含几何数据、视觉属性和所属图层
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entity {
    /// 几何类型和数据
    pub geometry: crate::geometry::Geometry,

    /// 视觉属性
    pub properties: crate::properties::Properties,

    /// 所属图层名称
    pub layer: String,
}

impl Entity {
    /// 创建新实体（默认在图层 "0" 上）
    pub fn new(geometry: crate::geometry::Geometry) -> Self {
        Self {
            geometry,
            properties: crate::properties::Properties::default(),
            layer: "0".to_string(),
        }
    }

    /// 获取包围盒
    pub fn bounding_box(&self) -> crate::math::BoundingBox2 {
        self.geometry.bounding_box()
    }

    /// 使用指定的图层
    pub fn with_layer(mut self, layer: impl Into<String>) -> Self {
        self.layer = layer.into();
        self
    }

    /// 使用指定的属性
    pub fn with_properties(mut self, properties: crate::properties::Properties) -> Self {
        self.properties = properties;
        self
    }
}
