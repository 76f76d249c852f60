//! SVG导出
//!
//! 将文档渲染为 SVG 文本：页面设置决定画布大小，
//! 内容按包围盒缩放居中。画布随每次导出创建和销毁。

use crate::document::Document;
use crate::error::FileError;
use dxfsvg_core::entity::Entity;
use dxfsvg_core::geometry::{Geometry, Polyline, TextAlignment};
use dxfsvg_core::layer::Layer;
use dxfsvg_core::math::{Point2, Vector2};
use dxfsvg_core::properties::{Color, LineType, LineWeight};

/// 纸张大小
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PaperSize {
    A4,
    A3,
    A2,
    A1,
    A0,
    Letter,
    Custom { width: f64, height: f64 },
}

impl PaperSize {
    /// 获取纸张尺寸（毫米）
    pub fn dimensions_mm(&self) -> (f64, f64) {
        match self {
            PaperSize::A4 => (210.0, 297.0),
            PaperSize::A3 => (297.0, 420.0),
            PaperSize::A2 => (420.0, 594.0),
            PaperSize::A1 => (594.0, 841.0),
            PaperSize::A0 => (841.0, 1189.0),
            PaperSize::Letter => (215.9, 279.4),
            PaperSize::Custom { width, height } => (*width, *height),
        }
    }
}

/// 纸张方向
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Orientation {
    Portrait,
    Landscape,
}

/// 页面设置
#[derive(Debug, Clone)]
pub struct PageSetup {
    /// 纸张大小
    pub paper_size: PaperSize,
    /// 纸张方向
    pub orientation: Orientation,
    /// 边距（毫米）：上、右、下、左
    pub margins: (f64, f64, f64, f64),
    /// 缩放比例（1:X），仅在 fit_to_page 为 false 时生效
    pub scale: f64,
    /// 是否适应页面
    pub fit_to_page: bool,
    /// 打印范围：None = 全部
    pub print_area: Option<PrintArea>,
}

impl Default for PageSetup {
    fn default() -> Self {
        Self {
            paper_size: PaperSize::A4,
            orientation: Orientation::Landscape,
            margins: (10.0, 10.0, 10.0, 10.0),
            scale: 1.0,
            fit_to_page: true,
            print_area: None,
        }
    }
}

impl PageSetup {
    /// 获取可打印区域尺寸（毫米）
    pub fn printable_size(&self) -> (f64, f64) {
        let (paper_w, paper_h) = self.paper_size.dimensions_mm();
        let (w, h) = match self.orientation {
            Orientation::Portrait => (paper_w, paper_h),
            Orientation::Landscape => (paper_h, paper_w),
        };
        let (top, right, bottom, left) = self.margins;
        (w - left - right, h - top - bottom)
    }
}

/// 打印区域
#[derive(Debug, Clone)]
pub struct PrintArea {
    /// 最小点
    pub min: Point2,
    /// 最大点
    pub max: Point2,
}

impl PrintArea {
    pub fn new(min: Point2, max: Point2) -> Self {
        Self { min, max }
    }

    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }
}

/// 解析后的绘制样式：颜色、线宽（毫米）、虚线模式
struct ResolvedStroke {
    color: Color,
    width: f64,
    dash: Option<String>,
}

/// SVG 导出器
pub struct SvgExporter {
    page_setup: PageSetup,
}

impl SvgExporter {
    pub fn new(page_setup: PageSetup) -> Self {
        Self { page_setup }
    }

    /// 导出文档为 SVG 字符串
    pub fn export(&self, document: &Document) -> Result<String, FileError> {
        // 计算所有实体的包围盒
        let bounds = self.calculate_bounds(document);

        // 获取页面尺寸
        let (page_width, page_height) = self.page_setup.printable_size();

        // 计算缩放和偏移
        let (scale, offset) = self.calculate_transform(&bounds, page_width, page_height);

        let mut svg = String::new();

        // SVG 头部和白色背景
        svg.push_str(&format!(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<svg xmlns="http://www.w3.org/2000/svg"
     width="{:.2}mm" height="{:.2}mm"
     viewBox="0 0 {:.2} {:.2}">
  <rect x="0" y="0" width="{:.2}" height="{:.2}" fill="white"/>
  <g transform="translate({:.2},{:.2}) scale({:.6},-{:.6})">
"#,
            page_width,
            page_height,
            page_width,
            page_height,
            page_width,
            page_height,
            offset.x,
            page_height - offset.y,
            scale,
            scale
        ));

        // 渲染每个实体
        for entity in document.all_entities() {
            let layer = document.layers.get_layer(&entity.layer);

            // 冻结/隐藏/不可打印的图层不进入输出
            if let Some(layer) = layer {
                if !layer.should_display() || !layer.plottable {
                    continue;
                }
            }

            let stroke = self.resolve_stroke(entity, layer);
            if let Some(svg_elem) = self.geometry_to_svg(&entity.geometry, &stroke) {
                svg.push_str(&format!("    {}\n", svg_elem));
            }
        }

        // SVG 尾部
        svg.push_str("  </g>\n</svg>\n");

        Ok(svg)
    }

    /// 解析实体的绘制样式（ByLayer 属性通过图层表解析）
    fn resolve_stroke(&self, entity: &Entity, layer: Option<&Layer>) -> ResolvedStroke {
        let props = &entity.properties;

        let mut color = if props.color.is_by_layer() || props.color.is_by_block() {
            layer.map(|l| l.color).unwrap_or(Color::WHITE)
        } else {
            props.color
        };

        // 白色背景上 ACI 7（白）按黑色绘制
        if color == Color::WHITE {
            color = Color::BLACK;
        }

        let line_type = match &props.line_type {
            LineType::ByLayer => layer.map(|l| l.line_type.clone()).unwrap_or(LineType::Continuous),
            other => other.clone(),
        };

        let dash = dash_array(&line_type);

        let width = match props.line_weight {
            LineWeight::Width(w) => w,
            LineWeight::ByLayer => match layer.map(|l| l.line_weight) {
                Some(LineWeight::Width(w)) => w,
                _ => 0.25,
            },
            LineWeight::Default => 0.25,
        }
        .max(0.1);

        ResolvedStroke { color, width, dash }
    }

    /// 计算所有实体的包围盒
    fn calculate_bounds(&self, document: &Document) -> PrintArea {
        // 如果有指定打印区域，使用它
        if let Some(ref area) = self.page_setup.print_area {
            return area.clone();
        }

        match document.bounds() {
            Some(bbox) => PrintArea::new(bbox.min, bbox.max),
            None => PrintArea::new(Point2::origin(), Point2::new(100.0, 100.0)),
        }
    }

    /// 计算变换参数
    fn calculate_transform(
        &self,
        bounds: &PrintArea,
        page_width: f64,
        page_height: f64,
    ) -> (f64, Vector2) {
        let content_width = bounds.width().max(1e-6);
        let content_height = bounds.height().max(1e-6);

        let scale = if self.page_setup.fit_to_page {
            let scale_x = page_width / content_width;
            let scale_y = page_height / content_height;
            scale_x.min(scale_y) * 0.95 // 留一点边距
        } else {
            self.page_setup.scale
        };

        // 居中偏移
        let scaled_width = content_width * scale;
        let scaled_height = content_height * scale;
        let offset_x = (page_width - scaled_width) / 2.0 - bounds.min.x * scale;
        let offset_y = (page_height - scaled_height) / 2.0 - bounds.min.y * scale;

        (scale, Vector2::new(offset_x, offset_y))
    }

    /// 将几何体转换为 SVG 元素
    fn geometry_to_svg(&self, geometry: &Geometry, stroke: &ResolvedStroke) -> Option<String> {
        let stroke_color = format!(
            "rgb({},{},{})",
            stroke.color.r, stroke.color.g, stroke.color.b
        );
        let dash_attr = stroke
            .dash
            .as_ref()
            .map(|d| format!(r#" stroke-dasharray="{}""#, d))
            .unwrap_or_default();
        let style = format!(
            r#"stroke="{}" stroke-width="{:.2}"{} fill="none""#,
            stroke_color, stroke.width, dash_attr
        );

        match geometry {
            Geometry::Line(line) => Some(format!(
                r#"<line x1="{:.4}" y1="{:.4}" x2="{:.4}" y2="{:.4}" {}/>"#,
                line.start.x, line.start.y, line.end.x, line.end.y, style
            )),
            Geometry::Circle(circle) => Some(format!(
                r#"<circle cx="{:.4}" cy="{:.4}" r="{:.4}" {}/>"#,
                circle.center.x, circle.center.y, circle.radius, style
            )),
            Geometry::Arc(arc) => {
                let start = arc.start_point();
                let end = arc.end_point();

                // DXF 圆弧恒为逆时针
                let sweep = arc.sweep_angle();
                let large_arc = if sweep > std::f64::consts::PI { 1 } else { 0 };

                Some(format!(
                    r#"<path d="M {:.4} {:.4} A {:.4} {:.4} 0 {} 1 {:.4} {:.4}" {}/>"#,
                    start.x, start.y, arc.radius, arc.radius, large_arc, end.x, end.y, style
                ))
            }
            Geometry::Point(point) => {
                let size = 1.0;
                Some(format!(
                    r#"<circle cx="{:.4}" cy="{:.4}" r="{:.4}" fill="{}" stroke="none"/>"#,
                    point.position.x, point.position.y, size, stroke_color
                ))
            }
            Geometry::Polyline(polyline) => {
                let path = polyline_path(polyline)?;
                Some(format!(r#"<path d="{}" {}/>"#, path, style))
            }
            Geometry::Ellipse(ellipse) => {
                if ellipse.is_full() {
                    let rotation = ellipse.rotation().to_degrees();
                    Some(format!(
                        r#"<ellipse cx="{:.4}" cy="{:.4}" rx="{:.4}" ry="{:.4}" transform="rotate({:.2} {:.4} {:.4})" {}/>"#,
                        ellipse.center.x,
                        ellipse.center.y,
                        ellipse.major_radius(),
                        ellipse.minor_radius(),
                        rotation,
                        ellipse.center.x,
                        ellipse.center.y,
                        style
                    ))
                } else {
                    // 椭圆弧：采样为折线路径
                    let path = points_path(&ellipse.sample_points(32), false)?;
                    Some(format!(r#"<path d="{}" {}/>"#, path, style))
                }
            }
            Geometry::Spline(spline) => {
                if spline.control_points.len() < 2 {
                    return None;
                }
                let path = points_path(&spline.sample_points(64), spline.closed)?;
                Some(format!(r#"<path d="{}" {}/>"#, path, style))
            }
            Geometry::Text(text) => Some(self.text_to_svg(
                text.position,
                &text.content,
                text.height,
                text.rotation,
                text.alignment,
                &stroke_color,
            )),
            Geometry::Leader(leader) => {
                if leader.vertices.is_empty() {
                    return None;
                }

                let mut path = points_path_from_iter(leader.vertices.iter().copied())?;

                // 添加箭头
                if leader.vertices.len() >= 2 {
                    let p0 = &leader.vertices[0];
                    let dir = leader.arrow_direction().unwrap_or(Vector2::new(1.0, 0.0));
                    let arrow_len = leader.arrow_size;
                    let arrow_width = leader.arrow_size / 3.0;

                    let back = -dir;
                    let perp = Vector2::new(-back.y, back.x);
                    let arrow1 = Point2::new(
                        p0.x + back.x * arrow_len + perp.x * arrow_width,
                        p0.y + back.y * arrow_len + perp.y * arrow_width,
                    );
                    let arrow2 = Point2::new(
                        p0.x + back.x * arrow_len - perp.x * arrow_width,
                        p0.y + back.y * arrow_len - perp.y * arrow_width,
                    );

                    path.push_str(&format!(
                        " M {:.4} {:.4} L {:.4} {:.4} L {:.4} {:.4}",
                        arrow1.x, arrow1.y, p0.x, p0.y, arrow2.x, arrow2.y
                    ));
                }

                Some(format!(r#"<path d="{}" {}/>"#, path, style))
            }
            Geometry::Dimension(dim) => {
                let p1 = dim.definition_point1;
                let p2 = dim.definition_point2;
                let text_pos = dim.get_text_position();

                let mut elements = vec![format!(
                    r#"<line x1="{:.4}" y1="{:.4}" x2="{:.4}" y2="{:.4}" {}/>"#,
                    p1.x, p1.y, p2.x, p2.y, style
                )];

                elements.push(self.text_to_svg(
                    text_pos,
                    &dim.display_text(),
                    dim.text_height,
                    0.0,
                    TextAlignment::Center,
                    &stroke_color,
                ));

                Some(elements.join("\n    "))
            }
        }
    }

    /// 生成文本元素
    ///
    /// 外层 <g> 做了 Y 轴翻转，文本需要在插入点局部再翻转回来才能正立。
    fn text_to_svg(
        &self,
        position: Point2,
        content: &str,
        height: f64,
        rotation: f64,
        alignment: TextAlignment,
        fill: &str,
    ) -> String {
        let anchor = match alignment {
            TextAlignment::Left => "start",
            TextAlignment::Center => "middle",
            TextAlignment::Right => "end",
        };

        format!(
            r#"<text font-size="{:.2}" fill="{}" text-anchor="{}" transform="translate({:.4} {:.4}) rotate({:.2}) scale(1,-1)">{}</text>"#,
            height,
            fill,
            anchor,
            position.x,
            position.y,
            rotation.to_degrees(),
            escape_xml(content)
        )
    }
}

/// 多段线路径（凸度弧段转为SVG圆弧）
fn polyline_path(polyline: &Polyline) -> Option<String> {
    if polyline.vertices.len() < 2 {
        return None;
    }

    let first = &polyline.vertices[0];
    let mut path = format!("M {:.4} {:.4}", first.point.x, first.point.y);

    for i in 0..polyline.segment_count() {
        let v1 = &polyline.vertices[i];
        let v2 = &polyline.vertices[(i + 1) % polyline.vertices.len()];

        match Polyline::bulge_arc_params(v1, v2) {
            Some((radius, large_arc, ccw)) => {
                path.push_str(&format!(
                    " A {:.4} {:.4} 0 {} {} {:.4} {:.4}",
                    radius,
                    radius,
                    large_arc as u8,
                    ccw as u8,
                    v2.point.x,
                    v2.point.y
                ));
            }
            None => {
                path.push_str(&format!(" L {:.4} {:.4}", v2.point.x, v2.point.y));
            }
        }
    }

    if polyline.closed {
        path.push_str(" Z");
    }

    Some(path)
}

/// 点序列转折线路径
fn points_path(points: &[Point2], closed: bool) -> Option<String> {
    let mut path = points_path_from_iter(points.iter().copied())?;
    if closed {
        path.push_str(" Z");
    }
    Some(path)
}

fn points_path_from_iter(points: impl IntoIterator<Item = Point2>) -> Option<String> {
    let mut iter = points.into_iter();
    let first = iter.next()?;
    let mut path = format!("M {:.4} {:.4}", first.x, first.y);
    for p in iter {
        path.push_str(&format!(" L {:.4} {:.4}", p.x, p.y));
    }
    Some(path)
}

/// 虚线模式转为 stroke-dasharray 值
fn dash_array(line_type: &LineType) -> Option<String> {
    let pattern = line_type.pattern();
    if pattern.is_empty() {
        return None;
    }

    let values: Vec<String> = pattern.iter().map(|v| format!("{}", v.abs())).collect();
    Some(values.join(","))
}

/// 转义XML文本内容
fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use dxfsvg_core::geometry::{Circle, Line, Text};
    use dxfsvg_core::properties::Properties;

    fn line_entity() -> Entity {
        Entity::new(Geometry::Line(Line::new(
            Point2::new(0.0, 0.0),
            Point2::new(100.0, 50.0),
        )))
    }

    #[test]
    fn test_export_starts_with_xml_declaration() {
        let mut doc = Document::new();
        doc.add_entity(line_entity());

        let svg = SvgExporter::new(PageSetup::default()).export(&doc).unwrap();
        assert!(svg.starts_with("<?xml"));
        assert!(svg.contains("<line"));
        assert!(svg.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn test_white_strokes_rendered_black() {
        // 图层0默认白色，白色背景上应绘制为黑色
        let mut doc = Document::new();
        doc.add_entity(line_entity());

        let svg = SvgExporter::new(PageSetup::default()).export(&doc).unwrap();
        assert!(svg.contains(r#"stroke="rgb(0,0,0)""#));
    }

    #[test]
    fn test_by_layer_color_resolution() {
        let mut doc = Document::new();
        doc.layers
            .add_layer(Layer::new("Walls").with_color(Color::RED));
        doc.add_entity(line_entity().with_layer("Walls"));

        let svg = SvgExporter::new(PageSetup::default()).export(&doc).unwrap();
        assert!(svg.contains(r#"stroke="rgb(255,0,0)""#));
    }

    #[test]
    fn test_frozen_layer_is_skipped() {
        let mut doc = Document::new();
        let mut layer = Layer::new("Frozen").with_color(Color::GREEN);
        layer.frozen = true;
        doc.layers.add_layer(layer);
        doc.add_entity(line_entity().with_layer("Frozen"));
        doc.add_entity(Entity::new(Geometry::Circle(Circle::new(
            Point2::new(0.0, 0.0),
            10.0,
        ))));

        let svg = SvgExporter::new(PageSetup::default()).export(&doc).unwrap();
        assert!(!svg.contains("<line"));
        assert!(svg.contains("<circle"));
    }

    #[test]
    fn test_text_content_is_escaped() {
        let mut doc = Document::new();
        doc.add_entity(Entity::new(Geometry::Text(Text::new(
            Point2::new(0.0, 0.0),
            "A<B&C",
            2.5,
        ))));

        let svg = SvgExporter::new(PageSetup::default()).export(&doc).unwrap();
        assert!(svg.contains("A&lt;B&amp;C"));
    }

    #[test]
    fn test_dashed_line_type_emits_dasharray() {
        let mut doc = Document::new();
        let props = Properties::default().set_line_type(LineType::Dashed);
        doc.add_entity(line_entity().with_properties(props));

        let svg = SvgExporter::new(PageSetup::default()).export(&doc).unwrap();
        assert!(svg.contains("stroke-dasharray"));
    }

    #[test]
    fn test_empty_document_still_renders_page() {
        let doc = Document::new();
        let svg = SvgExporter::new(PageSetup::default()).export(&doc).unwrap();
        assert!(svg.starts_with("<?xml"));
        assert!(svg.contains("viewBox"));
    }

    #[test]
    fn test_page_setup_printable_size() {
        let setup = PageSetup {
            paper_size: PaperSize::A4,
            orientation: Orientation::Portrait,
            margins: (10.0, 10.0, 10.0, 10.0),
            ..Default::default()
        };

        let (w, h) = setup.printable_size();
        assert_eq!(w, 190.0);
        assert_eq!(h, 277.0);
    }
}
