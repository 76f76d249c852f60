//! CAD文档数据模型
//!
//! 转换流程的中间表示：一次导入得到图层表和模型空间实体，
//! 随后交给 SVG 导出器，不支持编辑。

use dxfsvg_core::entity::Entity;
use dxfsvg_core::layer::LayerTable;
use dxfsvg_core::math::BoundingBox2;

/// CAD文档
#[derive(Debug, Default)]
pub struct Document {
    /// 图层表
    pub layers: LayerTable,

    /// 模型空间实体
    entities: Vec<Entity>,
}

impl Document {
    /// 创建新文档
    pub fn new() -> Self {
        Self {
            layers: LayerTable::new(),
            entities: Vec::new(),
        }
    }

    /// 从文件加载
    pub fn open(path: impl AsRef<std::path::Path>) -> Result<Self, crate::FileError> {
        let path = path.as_ref();

        match path.extension().and_then(|e| e.to_str()) {
            Some("dxf") => crate::dxf_io::import(path),
            _ => Err(crate::FileError::InvalidFormat(
                "Unknown file extension".to_string(),
            )),
        }
    }

    /// 从内存中的DXF字节加载
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, crate::FileError> {
        crate::dxf_io::import_bytes(bytes)
    }

    /// 添加实体
    pub fn add_entity(&mut self, entity: Entity) {
        self.entities.push(entity);
    }

    /// 获取所有实体
    pub fn all_entities(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter()
    }

    /// 获取实体数量
    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    /// 计算所有实体的包围盒
    pub fn bounds(&self) -> Option<BoundingBox2> {
        let mut iter = self.entities.iter();
        let first = iter.next()?;
        let mut bbox = first.bounding_box();

        for entity in iter {
            bbox = bbox.union(&entity.bounding_box());
        }

        Some(bbox)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dxfsvg_core::geometry::{Geometry, Line};
    use dxfsvg_core::math::Point2;

    #[test]
    fn test_open_rejects_unknown_extension() {
        let err = Document::open("drawing.step").unwrap_err();
        assert!(matches!(err, crate::FileError::InvalidFormat(_)));
    }

    #[test]
    fn test_bounds_union() {
        let mut doc = Document::new();
        assert!(doc.bounds().is_none());

        doc.add_entity(Entity::new(Geometry::Line(Line::new(
            Point2::new(0.0, 0.0),
            Point2::new(10.0, 0.0),
        ))));
        doc.add_entity(Entity::new(Geometry::Line(Line::new(
            Point2::new(0.0, -5.0),
            Point2::new(0.0, 5.0),
        ))));

        let bounds = doc.bounds().unwrap();
        assert_eq!(bounds.min.y, -5.0);
        assert_eq!(bounds.max.x, 10.0);
    }
}
