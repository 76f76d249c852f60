//! 几何图元定义
//!
//! 支持的基本图元：
//! - 点 (Point)
//! - 线段 (Line)
//! - 圆 (Circle)
//! - 圆弧 (Arc)
//! - 多段线 (Polyline)
//! - 文本 (Text)
//! - 尺寸标注 (Dimension)
//! - 椭圆 (Ellipse)
//! - 样条曲线 (Spline)
//! - 引线 (Leader)
//!
//! 图元面向渲染：每种类型提供包围盒，曲线类型提供采样点。

use crate::math::{BoundingBox2, Point2, Vector2, EPSILON};
use serde::{Deserialize, Serialize};

/// 几何类型枚举
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Geometry {
    Point(Point),
    Line(Line),
    Circle(Circle),
    Arc(Arc),
    Polyline(Polyline),
    Text(Text),
    Dimension(Dimension),
    Ellipse(Ellipse),
    Spline(Spline),
    Leader(Leader),
}

impl Geometry {
    /// 获取几何的包围盒
    pub fn bounding_box(&self) -> BoundingBox2 {
        match self {
            Geometry::Point(p) => p.bounding_box(),
            Geometry::Line(l) => l.bounding_box(),
            Geometry::Circle(c) => c.bounding_box(),
            Geometry::Arc(a) => a.bounding_box(),
            Geometry::Polyline(pl) => pl.bounding_box(),
            Geometry::Text(t) => t.bounding_box(),
            Geometry::Dimension(d) => d.bounding_box(),
            Geometry::Ellipse(e) => e.bounding_box(),
            Geometry::Spline(s) => s.bounding_box(),
            Geometry::Leader(l) => l.bounding_box(),
        }
    }

    /// 获取几何的类型名称
    pub fn type_name(&self) -> &'static str {
        match self {
            Geometry::Point(_) => "Point",
            Geometry::Line(_) => "Line",
            Geometry::Circle(_) => "Circle",
            Geometry::Arc(_) => "Arc",
            Geometry::Polyline(_) => "Polyline",
            Geometry::Text(_) => "Text",
            Geometry::Dimension(_) => "Dimension",
            Geometry::Ellipse(_) => "Ellipse",
            Geometry::Spline(_) => "Spline",
            Geometry::Leader(_) => "Leader",
        }
    }
}

/// 点
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Point {
    pub position: Point2,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            position: Point2::new(x, y),
        }
    }

    pub fn from_point2(position: Point2) -> Self {
        Self { position }
    }

    pub fn bounding_box(&self) -> BoundingBox2 {
        BoundingBox2::new(self.position, self.position)
    }
}

/// 线段
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Line {
    pub start: Point2,
    pub end: Point2,
}

impl Line {
    pub fn new(start: Point2, end: Point2) -> Self {
        Self { start, end }
    }

    /// 计算线段长度
    pub fn length(&self) -> f64 {
        (self.end - self.start).norm()
    }

    /// 计算线段中点
    pub fn midpoint(&self) -> Point2 {
        Point2::new(
            (self.start.x + self.end.x) / 2.0,
            (self.start.y + self.end.y) / 2.0,
        )
    }

    pub fn bounding_box(&self) -> BoundingBox2 {
        BoundingBox2::from_points([self.start, self.end])
    }
}

/// 圆
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Circle {
    pub center: Point2,
    pub radius: f64,
}

impl Circle {
    pub fn new(center: Point2, radius: f64) -> Self {
        Self { center, radius }
    }

    /// 获取圆上指定角度的点
    pub fn point_at_angle(&self, angle: f64) -> Point2 {
        Point2::new(
            self.center.x + self.radius * angle.cos(),
            self.center.y + self.radius * angle.sin(),
        )
    }

    pub fn bounding_box(&self) -> BoundingBox2 {
        BoundingBox2::new(
            Point2::new(self.center.x - self.radius, self.center.y - self.radius),
            Point2::new(self.center.x + self.radius, self.center.y + self.radius),
        )
    }
}

/// 圆弧
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Arc {
    pub center: Point2,
    pub radius: f64,
    /// 起始角度（弧度）
    pub start_angle: f64,
    /// 终止角度（弧度）
    pub end_angle: f64,
}

impl Arc {
    pub fn new(center: Point2, radius: f64, start_angle: f64, end_angle: f64) -> Self {
        Self {
            center,
            radius,
            start_angle,
            end_angle,
        }
    }

    /// 计算扫过的角度（归一化到 [0, 2π)，DXF 圆弧恒为逆时针）
    pub fn sweep_angle(&self) -> f64 {
        let mut sweep = self.end_angle - self.start_angle;
        while sweep < 0.0 {
            sweep += 2.0 * std::f64::consts::PI;
        }
        while sweep > 2.0 * std::f64::consts::PI {
            sweep -= 2.0 * std::f64::consts::PI;
        }
        sweep
    }

    /// 获取起点
    pub fn start_point(&self) -> Point2 {
        Point2::new(
            self.center.x + self.radius * self.start_angle.cos(),
            self.center.y + self.radius * self.start_angle.sin(),
        )
    }

    /// 获取终点
    pub fn end_point(&self) -> Point2 {
        Point2::new(
            self.center.x + self.radius * self.end_angle.cos(),
            self.center.y + self.radius * self.end_angle.sin(),
        )
    }

    /// 检查角度是否在弧的范围内
    pub fn contains_angle(&self, angle: f64) -> bool {
        let mut a = angle;
        let mut start = self.start_angle;
        let mut end = self.end_angle;

        // 归一化到 [0, 2π)
        while a < 0.0 {
            a += 2.0 * std::f64::consts::PI;
        }
        while start < 0.0 {
            start += 2.0 * std::f64::consts::PI;
        }
        while end < 0.0 {
            end += 2.0 * std::f64::consts::PI;
        }

        if start <= end {
            a >= start && a <= end
        } else {
            a >= start || a <= end
        }
    }

    pub fn bounding_box(&self) -> BoundingBox2 {
        let mut bbox = BoundingBox2::from_points([self.start_point(), self.end_point()]);

        // 检查象限点
        let pi = std::f64::consts::PI;
        for angle in [0.0, pi / 2.0, pi, 3.0 * pi / 2.0] {
            if self.contains_angle(angle) {
                bbox.expand_to_include(&Point2::new(
                    self.center.x + self.radius * angle.cos(),
                    self.center.y + self.radius * angle.sin(),
                ));
            }
        }

        bbox
    }
}

/// 多段线顶点
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PolylineVertex {
    pub point: Point2,
    /// 凸度（bulge）- 用于弧线段，0表示直线
    pub bulge: f64,
}

impl PolylineVertex {
    pub fn new(point: Point2) -> Self {
        Self { point, bulge: 0.0 }
    }

    pub fn with_bulge(point: Point2, bulge: f64) -> Self {
        Self { point, bulge }
    }
}

/// 多段线
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Polyline {
    pub vertices: Vec<PolylineVertex>,
    /// 是否闭合
    pub closed: bool,
}

impl Polyline {
    pub fn new(vertices: Vec<PolylineVertex>, closed: bool) -> Self {
        Self { vertices, closed }
    }

    /// 从点列表创建（所有顶点都是直线连接）
    pub fn from_points(points: impl IntoIterator<Item = Point2>, closed: bool) -> Self {
        Self {
            vertices: points.into_iter().map(PolylineVertex::new).collect(),
            closed,
        }
    }

    /// 顶点数量
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// 线段数量
    pub fn segment_count(&self) -> usize {
        if self.vertices.len() < 2 {
            return 0;
        }
        if self.closed {
            self.vertices.len()
        } else {
            self.vertices.len() - 1
        }
    }

    /// 凸度弧段的圆弧参数：(半径, 大弧标志, 逆时针标志)
    ///
    /// 凸度 bulge = tan(θ/4)，|bulge| > 1 表示弧段扫过的角度超过 π。
    /// 弦长退化或凸度为零时返回 None（按直线段处理）。
    pub fn bulge_arc_params(v1: &PolylineVertex, v2: &PolylineVertex) -> Option<(f64, bool, bool)> {
        let chord = (v2.point - v1.point).norm();
        if chord < EPSILON || v1.bulge.abs() < EPSILON {
            return None;
        }

        let bulge = v1.bulge;
        let s = chord / 2.0;
        let h = s * bulge.abs(); // 弧高
        let radius = (s * s + h * h) / (2.0 * h);

        Some((radius, bulge.abs() > 1.0, bulge > 0.0))
    }

    pub fn bounding_box(&self) -> BoundingBox2 {
        if self.vertices.is_empty() {
            return BoundingBox2::empty();
        }
        BoundingBox2::from_points(self.vertices.iter().map(|v| v.point))
    }
}

/// 文本对齐方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum TextAlignment {
    /// 左对齐（默认）
    #[default]
    Left,
    /// 居中对齐
    Center,
    /// 右对齐
    Right,
}

/// 文本
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Text {
    /// 插入点
    pub position: Point2,
    /// 文本内容
    pub content: String,
    /// 文本高度
    pub height: f64,
    /// 旋转角度（弧度）
    pub rotation: f64,
    /// 对齐方式
    pub alignment: TextAlignment,
}

impl Text {
    /// 创建新的文本对象
    pub fn new(position: Point2, content: impl Into<String>, height: f64) -> Self {
        Self {
            position,
            content: content.into(),
            height,
            rotation: 0.0,
            alignment: TextAlignment::Left,
        }
    }

    /// 设置旋转角度
    pub fn with_rotation(mut self, rotation: f64) -> Self {
        self.rotation = rotation;
        self
    }

    /// 设置对齐方式
    pub fn with_alignment(mut self, alignment: TextAlignment) -> Self {
        self.alignment = alignment;
        self
    }

    /// 估算文本宽度（简化计算，假设每个字符宽度约为高度的0.6倍）
    pub fn estimated_width(&self) -> f64 {
        // 对于中文字符，宽度接近高度；对于英文，约为高度的0.6倍
        let char_count = self.content.chars().count();
        let cjk_count = self.content.chars().filter(|c| Self::is_cjk(*c)).count();
        let ascii_count = char_count - cjk_count;

        (cjk_count as f64 * self.height) + (ascii_count as f64 * self.height * 0.6)
    }

    /// 检查是否是CJK字符
    fn is_cjk(c: char) -> bool {
        matches!(c, '\u{4E00}'..='\u{9FFF}' | '\u{3400}'..='\u{4DBF}' | '\u{F900}'..='\u{FAFF}')
    }

    /// 获取包围盒
    pub fn bounding_box(&self) -> BoundingBox2 {
        let width = self.estimated_width();
        let height = self.height;

        // 根据对齐方式计算基准点
        let base_x = match self.alignment {
            TextAlignment::Left => self.position.x,
            TextAlignment::Center => self.position.x - width / 2.0,
            TextAlignment::Right => self.position.x - width,
        };

        if self.rotation.abs() < EPSILON {
            BoundingBox2::new(
                Point2::new(base_x, self.position.y),
                Point2::new(base_x + width, self.position.y + height),
            )
        } else {
            // 带旋转的包围盒：计算四个角点
            let corners = [
                Point2::new(0.0, 0.0),
                Point2::new(width, 0.0),
                Point2::new(width, height),
                Point2::new(0.0, height),
            ];

            let cos_r = self.rotation.cos();
            let sin_r = self.rotation.sin();

            let rotated: Vec<Point2> = corners
                .iter()
                .map(|p| {
                    let rx = p.x * cos_r - p.y * sin_r + base_x;
                    let ry = p.x * sin_r + p.y * cos_r + self.position.y;
                    Point2::new(rx, ry)
                })
                .collect();

            BoundingBox2::from_points(rotated)
        }
    }
}

/// 标注类型
///
/// 仅包含 DXF 导入产生的标注类型。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum DimensionType {
    /// 对齐标注 (Aligned) - 默认
    #[default]
    Aligned,
    /// 线性标注 (Linear) - 水平或垂直
    Linear,
    /// 半径标注
    Radius,
    /// 直径标注
    Diameter,
}

/// 尺寸标注
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dimension {
    /// 第一个测量点
    pub definition_point1: Point2,
    /// 第二个测量点
    pub definition_point2: Point2,
    /// 标注线位置点 (决定标注线的高度/距离)
    pub line_location: Point2,
    /// 标注类型
    pub dim_type: DimensionType,
    /// 覆盖文本 (如果为空则显示测量值)
    pub text_override: Option<String>,
    /// 文本高度
    pub text_height: f64,
    /// 文本位置 (如果为None，则自动计算默认位置)
    pub text_position: Option<Point2>,
}

impl Dimension {
    pub fn new(p1: Point2, p2: Point2, location: Point2) -> Self {
        Self {
            definition_point1: p1,
            definition_point2: p2,
            line_location: location,
            dim_type: DimensionType::Aligned,
            text_override: None,
            text_height: 10.0,
            text_position: None,
        }
    }

    /// 获取文本的实际显示位置（如果未设置，则计算默认位置）
    pub fn get_text_position(&self) -> Point2 {
        if let Some(pos) = self.text_position {
            return pos;
        }
        self.default_text_position()
    }

    /// 计算默认文本位置
    pub fn default_text_position(&self) -> Point2 {
        match self.dim_type {
            DimensionType::Aligned | DimensionType::Linear => {
                let dir = (self.definition_point2 - self.definition_point1).normalize();
                let perp = Vector2::new(-dir.y, dir.x);
                let v_loc = self.line_location - self.definition_point1;
                let dist = v_loc.dot(&perp);

                // signum为0时默认向上偏移
                let sign = if dist.abs() < EPSILON { 1.0 } else { dist.signum() };
                let total_dist = dist + sign * (self.text_height * 0.8);
                let offset_vec = perp * total_dist;

                self.definition_point1
                    + (self.definition_point2 - self.definition_point1) * 0.5
                    + offset_vec
            }
            DimensionType::Radius | DimensionType::Diameter => self.line_location,
        }
    }

    /// 获取测量值
    pub fn measurement(&self) -> f64 {
        match self.dim_type {
            DimensionType::Aligned => (self.definition_point2 - self.definition_point1).norm(),
            DimensionType::Linear => {
                // 简化处理：取两点差异较大的轴向分量
                let dx = (self.definition_point2.x - self.definition_point1.x).abs();
                let dy = (self.definition_point2.y - self.definition_point1.y).abs();
                if dx >= dy {
                    dx
                } else {
                    dy
                }
            }
            DimensionType::Radius => (self.definition_point2 - self.definition_point1).norm(),
            DimensionType::Diameter => {
                (self.definition_point2 - self.definition_point1).norm() * 2.0
            }
        }
    }

    /// 获取显示的文本
    pub fn display_text(&self) -> String {
        if let Some(text) = &self.text_override {
            text.clone()
        } else {
            let val = self.measurement();
            match self.dim_type {
                DimensionType::Radius => format!("R{:.2}", val),
                DimensionType::Diameter => format!("%%C{:.2}", val), // %%C 是 CAD 中直径符号的转义
                _ => format!("{:.2}", val),
            }
        }
    }

    /// 计算包围盒 (简化估算)
    pub fn bounding_box(&self) -> BoundingBox2 {
        BoundingBox2::from_points([
            self.definition_point1,
            self.definition_point2,
            self.line_location,
        ])
    }
}

// ========== 椭圆 (Ellipse) ==========

/// 椭圆
///
/// 支持完整椭圆和椭圆弧，使用 DXF 兼容的参数化方式：
/// - 中心点 + 长轴端点（相对向量）+ 短轴比例
/// - 起始/终止参数用于椭圆弧
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ellipse {
    /// 中心点
    pub center: Point2,
    /// 长轴端点（相对于中心的向量）
    pub major_axis: Vector2,
    /// 短轴与长轴的比例 (0.0 < ratio <= 1.0)
    pub ratio: f64,
    /// 起始参数（弧度，0.0 表示长轴正方向）
    pub start_param: f64,
    /// 终止参数（弧度，2π 表示完整椭圆）
    pub end_param: f64,
}

impl Ellipse {
    /// 创建完整椭圆
    pub fn new(center: Point2, major_axis: Vector2, ratio: f64) -> Self {
        Self {
            center,
            major_axis,
            ratio: ratio.clamp(EPSILON, 1.0),
            start_param: 0.0,
            end_param: 2.0 * std::f64::consts::PI,
        }
    }

    /// 创建椭圆弧
    pub fn arc(
        center: Point2,
        major_axis: Vector2,
        ratio: f64,
        start_param: f64,
        end_param: f64,
    ) -> Self {
        Self {
            center,
            major_axis,
            ratio: ratio.clamp(EPSILON, 1.0),
            start_param,
            end_param,
        }
    }

    /// 获取长轴半径
    pub fn major_radius(&self) -> f64 {
        self.major_axis.norm()
    }

    /// 获取短轴半径
    pub fn minor_radius(&self) -> f64 {
        self.major_radius() * self.ratio
    }

    /// 获取长轴旋转角度（相对于X轴）
    pub fn rotation(&self) -> f64 {
        self.major_axis.y.atan2(self.major_axis.x)
    }

    /// 获取短轴方向向量（单位向量）
    pub fn minor_axis_direction(&self) -> Vector2 {
        let rot = self.rotation();
        Vector2::new(-rot.sin(), rot.cos())
    }

    /// 是否是完整椭圆
    pub fn is_full(&self) -> bool {
        (self.end_param - self.start_param - 2.0 * std::f64::consts::PI).abs() < EPSILON
    }

    /// 获取椭圆上指定参数的点
    ///
    /// 参数 t 是椭圆的参数化角度，不是真正的几何角度
    pub fn point_at_param(&self, t: f64) -> Point2 {
        let cos_t = t.cos();
        let sin_t = t.sin();
        let major_dir = self.major_axis / self.major_radius();
        let minor_dir = self.minor_axis_direction();

        Point2::new(
            self.center.x
                + self.major_radius() * cos_t * major_dir.x
                + self.minor_radius() * sin_t * minor_dir.x,
            self.center.y
                + self.major_radius() * cos_t * major_dir.y
                + self.minor_radius() * sin_t * minor_dir.y,
        )
    }

    /// 获取起点
    pub fn start_point(&self) -> Point2 {
        self.point_at_param(self.start_param)
    }

    /// 获取终点
    pub fn end_point(&self) -> Point2 {
        self.point_at_param(self.end_param)
    }

    /// 获取包围盒
    pub fn bounding_box(&self) -> BoundingBox2 {
        let rot = self.rotation();
        let cos_r = rot.cos();
        let sin_r = rot.sin();
        let a = self.major_radius();
        let b = self.minor_radius();

        // 椭圆在 x, y 方向的极值
        let dx = (a * a * cos_r * cos_r + b * b * sin_r * sin_r).sqrt();
        let dy = (a * a * sin_r * sin_r + b * b * cos_r * cos_r).sqrt();

        if self.is_full() {
            BoundingBox2::new(
                Point2::new(self.center.x - dx, self.center.y - dy),
                Point2::new(self.center.x + dx, self.center.y + dy),
            )
        } else {
            // 椭圆弧：采样点计算包围盒
            let mut bbox = BoundingBox2::from_points([self.start_point(), self.end_point()]);

            let steps = 32;
            let range = self.end_param - self.start_param;
            for i in 0..=steps {
                let t = self.start_param + range * (i as f64) / (steps as f64);
                bbox.expand_to_include(&self.point_at_param(t));
            }

            bbox
        }
    }

    /// 获取椭圆上的采样点（用于渲染）
    pub fn sample_points(&self, segments: usize) -> Vec<Point2> {
        let mut points = Vec::with_capacity(segments + 1);
        let range = self.end_param - self.start_param;

        for i in 0..=segments {
            let t = self.start_param + range * (i as f64) / (segments as f64);
            points.push(self.point_at_param(t));
        }

        points
    }
}

// ========== 样条曲线 (Spline) ==========

/// 样条曲线
///
/// B-样条曲线，使用 De Boor 算法求值
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Spline {
    /// 曲线阶数（通常为 3 或 4）
    pub degree: u8,
    /// 控制点
    pub control_points: Vec<Point2>,
    /// 节点向量（knot vector）
    pub knots: Vec<f64>,
    /// 拟合点（用于样条拟合）
    pub fit_points: Vec<Point2>,
    /// 是否闭合
    pub closed: bool,
}

impl Spline {
    /// 创建一个空的 B-样条
    pub fn new(degree: u8) -> Self {
        Self {
            degree,
            control_points: Vec::new(),
            knots: Vec::new(),
            fit_points: Vec::new(),
            closed: false,
        }
    }

    /// 从控制点创建 B-样条（自动生成均匀节点向量）
    pub fn from_control_points(control_points: Vec<Point2>, degree: u8, closed: bool) -> Self {
        let n = control_points.len();
        let k = degree as usize;

        // 生成均匀节点向量
        let num_knots = n + k + 1;
        let mut knots = Vec::with_capacity(num_knots);

        for i in 0..num_knots {
            if i < k {
                knots.push(0.0);
            } else if i >= n {
                knots.push((n - k + 1) as f64);
            } else {
                knots.push((i - k + 1) as f64);
            }
        }

        Self {
            degree,
            control_points,
            knots,
            fit_points: Vec::new(),
            closed,
        }
    }

    /// 使用 De Boor 算法计算样条曲线上的点
    pub fn point_at_param(&self, t: f64) -> Point2 {
        if self.control_points.is_empty() {
            return Point2::origin();
        }

        if self.control_points.len() == 1 {
            return self.control_points[0];
        }

        let n = self.control_points.len();
        let k = self.degree as usize;

        // 找到 t 所在的区间
        let mut span = k;
        while span < n && self.knots.get(span + 1).map_or(false, |&k| k <= t) {
            span += 1;
        }
        span = span.min(n - 1);

        // De Boor 算法
        let mut d: Vec<Point2> = (0..=k)
            .filter_map(|i| {
                let idx = span.saturating_sub(k) + i;
                self.control_points.get(idx).copied()
            })
            .collect();

        if d.len() <= k {
            return self.control_points.last().copied().unwrap_or(Point2::origin());
        }

        for r in 1..=k {
            for j in (r..=k).rev() {
                let idx = span.saturating_sub(k) + j;
                let left = self.knots.get(idx).copied().unwrap_or(0.0);
                let right = self.knots.get(idx + k + 1 - r).copied().unwrap_or(1.0);

                let denom = right - left;
                if denom.abs() < EPSILON {
                    continue;
                }

                let alpha = (t - left) / denom;
                let j_idx = j;
                let j_prev = j - 1;

                if j_idx < d.len() && j_prev < d.len() {
                    d[j_idx] = Point2::new(
                        (1.0 - alpha) * d[j_prev].x + alpha * d[j_idx].x,
                        (1.0 - alpha) * d[j_prev].y + alpha * d[j_idx].y,
                    );
                }
            }
        }

        d.get(k).copied().unwrap_or(Point2::origin())
    }

    /// 获取参数范围
    pub fn param_range(&self) -> (f64, f64) {
        let k = self.degree as usize;
        let start = self.knots.get(k).copied().unwrap_or(0.0);
        let end = self
            .knots
            .get(self.knots.len().saturating_sub(k + 1))
            .copied()
            .unwrap_or(1.0);
        (start, end)
    }

    /// 获取包围盒
    pub fn bounding_box(&self) -> BoundingBox2 {
        if self.control_points.is_empty() {
            return BoundingBox2::empty();
        }

        // 控制点的包围盒是保守估计，补充采样点使其更贴合
        let mut bbox = BoundingBox2::from_points(self.control_points.iter().copied());

        for pt in self.sample_points(32) {
            bbox.expand_to_include(&pt);
        }

        bbox
    }

    /// 获取采样点（用于渲染）
    pub fn sample_points(&self, segments: usize) -> Vec<Point2> {
        let mut points = Vec::with_capacity(segments + 1);
        let (start, end) = self.param_range();

        for i in 0..=segments {
            let t = start + (end - start) * (i as f64) / (segments as f64);
            points.push(self.point_at_param(t));
        }

        points
    }
}

// ========== 引线 (Leader) ==========

/// 引线
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Leader {
    /// 顶点列表（从箭头到文本）
    pub vertices: Vec<Point2>,
    /// 箭头大小
    pub arrow_size: f64,
}

impl Leader {
    /// 创建新的引线
    pub fn new(vertices: Vec<Point2>) -> Self {
        Self {
            vertices,
            arrow_size: 3.0,
        }
    }

    /// 获取箭头位置（第一个顶点）
    pub fn arrow_point(&self) -> Option<Point2> {
        self.vertices.first().copied()
    }

    /// 获取箭头方向
    pub fn arrow_direction(&self) -> Option<Vector2> {
        if self.vertices.len() >= 2 {
            Some((self.vertices[0] - self.vertices[1]).normalize())
        } else {
            None
        }
    }

    /// 获取包围盒
    pub fn bounding_box(&self) -> BoundingBox2 {
        if self.vertices.is_empty() {
            return BoundingBox2::empty();
        }
        BoundingBox2::from_points(self.vertices.iter().copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::approx_eq;

    #[test]
    fn test_line_length() {
        let line = Line::new(Point2::new(0.0, 0.0), Point2::new(3.0, 4.0));
        assert!((line.length() - 5.0).abs() < EPSILON);
    }

    #[test]
    fn test_arc_bounding_box_includes_quadrant() {
        // 从 0° 到 180° 的上半圆弧，最高点在 90° 象限点
        let arc = Arc::new(Point2::origin(), 10.0, 0.0, std::f64::consts::PI);
        let bbox = arc.bounding_box();

        assert!(approx_eq(bbox.max.y, 10.0));
        assert!(approx_eq(bbox.min.y, 0.0));
        assert!(approx_eq(bbox.min.x, -10.0));
        assert!(approx_eq(bbox.max.x, 10.0));
    }

    #[test]
    fn test_bulge_arc_params() {
        // 凸度 1.0 = 半圆
        let v1 = PolylineVertex::with_bulge(Point2::new(0.0, 0.0), 1.0);
        let v2 = PolylineVertex::new(Point2::new(10.0, 0.0));

        let (radius, large_arc, ccw) = Polyline::bulge_arc_params(&v1, &v2).unwrap();
        assert!((radius - 5.0).abs() < 1e-9);
        assert!(!large_arc);
        assert!(ccw);

        // 零凸度按直线段处理
        let v3 = PolylineVertex::new(Point2::new(0.0, 0.0));
        assert!(Polyline::bulge_arc_params(&v3, &v2).is_none());
    }

    #[test]
    fn test_ellipse_samples_within_bounding_box() {
        let ellipse = Ellipse::new(Point2::new(5.0, 5.0), Vector2::new(10.0, 0.0), 0.5);
        let bbox = ellipse.bounding_box();

        for pt in ellipse.sample_points(16) {
            assert!(bbox.contains(&pt));
        }
    }

    #[test]
    fn test_spline_endpoints() {
        let spline = Spline::from_control_points(
            vec![
                Point2::new(0.0, 0.0),
                Point2::new(5.0, 10.0),
                Point2::new(10.0, 0.0),
            ],
            2,
            false,
        );

        let samples = spline.sample_points(8);
        assert_eq!(samples.len(), 9);

        let first = samples.first().unwrap();
        assert!((first.x - 0.0).abs() < 1e-6);
        assert!((first.y - 0.0).abs() < 1e-6);
    }

    #[test]
    fn test_dimension_display_text() {
        let mut dim = Dimension::new(
            Point2::new(0.0, 0.0),
            Point2::new(3.0, 4.0),
            Point2::new(1.5, 6.0),
        );
        assert_eq!(dim.display_text(), "5.00");

        dim.dim_type = DimensionType::Radius;
        assert_eq!(dim.display_text(), "R5.00");

        dim.text_override = Some("TYP".to_string());
        assert_eq!(dim.display_text(), "TYP");
    }
}
