//! DXF文件导入
//!
//! 读取AutoCAD DXF格式，转换为渲染用的文档模型：
//! - 图层表（ACI颜色）
//! - 模型空间实体
//!
//! 转换是单向的（DXF→SVG），不提供DXF导出。

use crate::document::Document;
use crate::error::FileError;
use dxfsvg_core::entity::Entity;
use dxfsvg_core::geometry::{
    Arc, Circle, Dimension, DimensionType, Ellipse, Geometry, Leader, Line, Point, Polyline,
    PolylineVertex, Spline, Text,
};
use dxfsvg_core::math::{Point2, Vector2};
use dxfsvg_core::properties::{Color, Properties};
use std::path::Path;
use tracing::debug;

/// 从DXF文件导入
pub fn import(path: &Path) -> Result<Document, FileError> {
    let drawing = dxf::Drawing::load_file(path).map_err(|e| FileError::Dxf(e.to_string()))?;
    import_drawing(&drawing)
}

/// 从内存中的DXF字节导入
pub fn import_bytes(bytes: &[u8]) -> Result<Document, FileError> {
    let mut cursor = std::io::Cursor::new(bytes);
    let drawing = dxf::Drawing::load(&mut cursor).map_err(|e| FileError::Dxf(e.to_string()))?;
    import_drawing(&drawing)
}

fn import_drawing(drawing: &dxf::Drawing) -> Result<Document, FileError> {
    let mut document = Document::new();

    // 导入图层
    for layer in drawing.layers() {
        let color = aci_to_color(layer.color.index().unwrap_or(7) as u8);
        let new_layer = dxfsvg_core::layer::Layer::new(&layer.name).with_color(color);
        document.layers.add_layer(new_layer);
    }

    // 导入模型空间实体
    let mut skipped = 0usize;
    for entity in drawing.entities() {
        match convert_dxf_entity(entity) {
            Some(converted) => document.add_entity(converted),
            None => skipped += 1,
        }
    }

    if skipped > 0 {
        debug!("Skipped {} unsupported DXF entities", skipped);
    }

    Ok(document)
}

/// 将DXF实体转换为渲染实体
fn convert_dxf_entity(entity: &dxf::entities::Entity) -> Option<Entity> {
    let geometry = match &entity.specific {
        dxf::entities::EntityType::Line(line) => {
            let start = Point2::new(line.p1.x, line.p1.y);
            let end = Point2::new(line.p2.x, line.p2.y);
            Geometry::Line(Line::new(start, end))
        }

        dxf::entities::EntityType::Circle(circle) => {
            let center = Point2::new(circle.center.x, circle.center.y);
            Geometry::Circle(Circle::new(center, circle.radius))
        }

        dxf::entities::EntityType::Arc(arc) => {
            let center = Point2::new(arc.center.x, arc.center.y);
            let start_angle = arc.start_angle.to_radians();
            let end_angle = arc.end_angle.to_radians();
            Geometry::Arc(Arc::new(center, arc.radius, start_angle, end_angle))
        }

        dxf::entities::EntityType::LwPolyline(lwpoly) => {
            let vertices: Vec<PolylineVertex> = lwpoly
                .vertices
                .iter()
                .map(|v| PolylineVertex::with_bulge(Point2::new(v.x, v.y), v.bulge))
                .collect();

            Geometry::Polyline(Polyline::new(vertices, lwpoly.is_closed()))
        }

        dxf::entities::EntityType::Polyline(poly) => {
            let vertices: Vec<PolylineVertex> = poly
                .vertices()
                .map(|v| {
                    PolylineVertex::with_bulge(Point2::new(v.location.x, v.location.y), v.bulge)
                })
                .collect();

            Geometry::Polyline(Polyline::new(vertices, poly.is_closed()))
        }

        dxf::entities::EntityType::Text(text) => {
            let position = Point2::new(text.location.x, text.location.y);
            let height = text.text_height;
            let rotation = text.rotation.to_radians();
            let value = Text::new(position, text.value.clone(), height).with_rotation(rotation);
            Geometry::Text(value)
        }

        dxf::entities::EntityType::MText(mtext) => {
            let position = Point2::new(mtext.insertion_point.x, mtext.insertion_point.y);
            let height = mtext.initial_text_height;
            let rotation = mtext.rotation_angle.to_radians();
            // MText 内容可能包含格式代码，这里只做简单的换行处理
            let content = mtext.text.replace("\\P", "\n");
            let value = Text::new(position, content, height).with_rotation(rotation);
            Geometry::Text(value)
        }

        dxf::entities::EntityType::ModelPoint(point) => {
            let position = Point2::new(point.location.x, point.location.y);
            Geometry::Point(Point::from_point2(position))
        }

        dxf::entities::EntityType::Ellipse(ellipse) => {
            let center = Point2::new(ellipse.center.x, ellipse.center.y);
            let major_axis = Vector2::new(ellipse.major_axis.x, ellipse.major_axis.y);
            let ratio = ellipse.minor_axis_ratio;
            let start_param = ellipse.start_parameter;
            let end_param = ellipse.end_parameter;
            Geometry::Ellipse(Ellipse::arc(center, major_axis, ratio, start_param, end_param))
        }

        dxf::entities::EntityType::Spline(spline) => {
            let degree = spline.degree_of_curve as u8;
            let control_points: Vec<Point2> = spline
                .control_points
                .iter()
                .map(|p| Point2::new(p.x, p.y))
                .collect();
            let knots: Vec<f64> = spline.knot_values.clone();
            let fit_points: Vec<Point2> = spline
                .fit_points
                .iter()
                .map(|p| Point2::new(p.x, p.y))
                .collect();
            let closed = spline.is_closed();

            let mut value = Spline::new(degree);
            value.control_points = control_points;
            value.knots = knots;
            value.fit_points = fit_points;
            value.closed = closed;

            Geometry::Spline(value)
        }

        dxf::entities::EntityType::Leader(leader) => {
            let vertices: Vec<Point2> = leader
                .vertices
                .iter()
                .map(|p| Point2::new(p.x, p.y))
                .collect();

            Geometry::Leader(Leader::new(vertices))
        }

        dxf::entities::EntityType::RotatedDimension(dim) => {
            // definition_point_2 (13) = Extension line 1 origin (Start point)
            // definition_point_3 (14) = Extension line 2 origin (End point)
            // definition_point_1 (10 in base) = Dimension line definition point
            let p1 = Point2::new(dim.definition_point_2.x, dim.definition_point_2.y);
            let p2 = Point2::new(dim.definition_point_3.x, dim.definition_point_3.y);
            let location = Point2::new(
                dim.dimension_base.definition_point_1.x,
                dim.dimension_base.definition_point_1.y,
            );

            let mut value = Dimension::new(p1, p2, location);

            match dim.dimension_base.dimension_type {
                dxf::enums::DimensionType::Aligned => {
                    value.dim_type = DimensionType::Aligned;
                }
                _ => {
                    value.dim_type = DimensionType::Linear;
                }
            }

            if !dim.dimension_base.text.is_empty() && dim.dimension_base.text != "<>" {
                value.text_override = Some(dim.dimension_base.text.clone());
            }

            // 读取文本位置 (11)，(0,0)视为未设置
            let text_pos = Point2::new(
                dim.dimension_base.text_mid_point.x,
                dim.dimension_base.text_mid_point.y,
            );
            if text_pos.x.abs() > 1e-6 || text_pos.y.abs() > 1e-6 {
                value.text_position = Some(text_pos);
            }

            Geometry::Dimension(value)
        }

        dxf::entities::EntityType::RadialDimension(dim) => {
            // 10: Center (definition_point_1 in base)
            // 15: Point on curve (definition_point_2)
            let center = Point2::new(
                dim.dimension_base.definition_point_1.x,
                dim.dimension_base.definition_point_1.y,
            );
            let point_on_curve = Point2::new(dim.definition_point_2.x, dim.definition_point_2.y);
            let text_pos = Point2::new(
                dim.dimension_base.text_mid_point.x,
                dim.dimension_base.text_mid_point.y,
            );

            let mut value = Dimension::new(center, point_on_curve, text_pos);
            value.dim_type = DimensionType::Radius;

            if !dim.dimension_base.text.is_empty() && dim.dimension_base.text != "<>" {
                value.text_override = Some(dim.dimension_base.text.clone());
            }

            value.text_position = Some(text_pos);

            Geometry::Dimension(value)
        }

        dxf::entities::EntityType::DiameterDimension(dim) => {
            // 15: Point on curve (definition_point_2)
            // 10: Opposite point on curve (definition_point_1 in base)
            let p1 = Point2::new(dim.definition_point_2.x, dim.definition_point_2.y);
            let p2 = Point2::new(
                dim.dimension_base.definition_point_1.x,
                dim.dimension_base.definition_point_1.y,
            );

            let center = p1 + (p2 - p1) * 0.5;
            let text_pos = Point2::new(
                dim.dimension_base.text_mid_point.x,
                dim.dimension_base.text_mid_point.y,
            );

            let mut value = Dimension::new(center, p1, text_pos);
            value.dim_type = DimensionType::Diameter;

            if !dim.dimension_base.text.is_empty() && dim.dimension_base.text != "<>" {
                value.text_override = Some(dim.dimension_base.text.clone());
            }

            value.text_position = Some(text_pos);

            Geometry::Dimension(value)
        }

        _ => return None,
    };

    // 提取属性和所属图层
    let color = entity
        .common
        .color
        .index()
        .map(|i| aci_to_color(i as u8))
        .unwrap_or(Color::BY_LAYER);

    let properties = Properties::with_color(color);

    Some(
        Entity::new(geometry)
            .with_properties(properties)
            .with_layer(entity.common.layer.clone()),
    )
}

/// AutoCAD颜色索引(ACI)转RGBA颜色
fn aci_to_color(aci: u8) -> Color {
    match aci {
        1 => Color::RED,
        2 => Color::YELLOW,
        3 => Color::GREEN,
        4 => Color::CYAN,
        5 => Color::BLUE,
        6 => Color::MAGENTA,
        7 => Color::WHITE,
        8 => Color::GRAY,
        _ => Color::WHITE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drawing_to_bytes(drawing: &dxf::Drawing) -> Vec<u8> {
        let mut buffer = Vec::new();
        drawing.save(&mut buffer).expect("save dxf to buffer");
        buffer
    }

    #[test]
    fn test_import_line_and_circle() {
        let mut drawing = dxf::Drawing::new();

        let mut line = dxf::entities::Line::default();
        line.p1 = dxf::Point::new(0.0, 0.0, 0.0);
        line.p2 = dxf::Point::new(100.0, 50.0, 0.0);
        drawing.add_entity(dxf::entities::Entity::new(dxf::entities::EntityType::Line(
            line,
        )));

        let mut circle = dxf::entities::Circle::default();
        circle.center = dxf::Point::new(10.0, 10.0, 0.0);
        circle.radius = 5.0;
        drawing.add_entity(dxf::entities::Entity::new(
            dxf::entities::EntityType::Circle(circle),
        ));

        let document = import_bytes(&drawing_to_bytes(&drawing)).unwrap();
        assert_eq!(document.entity_count(), 2);

        let types: Vec<&str> = document
            .all_entities()
            .map(|e| e.geometry.type_name())
            .collect();
        assert!(types.contains(&"Line"));
        assert!(types.contains(&"Circle"));
    }

    #[test]
    fn test_import_layers() {
        let mut drawing = dxf::Drawing::new();

        let mut layer = dxf::tables::Layer::default();
        layer.name = "Walls".to_string();
        layer.color = dxf::Color::from_index(1);
        drawing.add_layer(layer);

        let document = import_bytes(&drawing_to_bytes(&drawing)).unwrap();
        let walls = document.layers.get_layer("Walls").unwrap();
        assert_eq!(walls.color, Color::RED);
    }

    #[test]
    fn test_import_rejects_garbage() {
        assert!(import_bytes(b"this is not a dxf file").is_err());
    }

    #[test]
    fn test_arc_angles_converted_to_radians() {
        let mut drawing = dxf::Drawing::new();

        let mut arc = dxf::entities::Arc::default();
        arc.center = dxf::Point::new(0.0, 0.0, 0.0);
        arc.radius = 10.0;
        arc.start_angle = 0.0;
        arc.end_angle = 90.0;
        drawing.add_entity(dxf::entities::Entity::new(dxf::entities::EntityType::Arc(
            arc,
        )));

        let document = import_bytes(&drawing_to_bytes(&drawing)).unwrap();
        let entity = document.all_entities().next().unwrap();
        match &entity.geometry {
            Geometry::Arc(a) => {
                assert!((a.end_angle - std::f64::consts::FRAC_PI_2).abs() < 1e-9);
            }
            other => panic!("expected arc, got {}", other.type_name()),
        }
    }
}
