//! DXFSVG HTTP转换服务
//!
//! 单个POST端点：接收 `{"dxf": "<base64>"}`，返回
//! `{"success": true, "svg": "..."}` 或 `{"success": false, "error": "..."}`。
//! OPTIONS 预检由CORS层应答，允许浏览器客户端跨域调用。

use anyhow::Result;
use axum::extract::rejection::JsonRejection;
use axum::http::{header, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use base64::Engine as _;
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

/// 命令行参数
#[derive(Debug, Parser)]
#[command(name = "dxfsvg-server", about = "DXF to SVG conversion service")]
struct Args {
    /// 监听地址
    #[arg(long, default_value = "0.0.0.0:8080")]
    bind: SocketAddr,
}

/// 转换请求体
#[derive(Debug, Deserialize)]
struct ConvertRequest {
    /// base64编码的DXF内容
    #[serde(default)]
    dxf: Option<String>,
}

/// 转换响应体
#[derive(Debug, Serialize)]
struct ConvertResponse {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    svg: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl ConvertResponse {
    fn ok(svg: String) -> Self {
        Self {
            success: true,
            svg: Some(svg),
            error: None,
        }
    }

    fn fail(error: impl Into<String>) -> Self {
        Self {
            success: false,
            svg: None,
            error: Some(error.into()),
        }
    }
}

/// 构建服务路由
fn router() -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .route("/", post(convert_handler))
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

/// POST / 处理：解码base64负载并执行转换
async fn convert_handler(payload: Result<Json<ConvertRequest>, JsonRejection>) -> Response {
    // JSON本身无法解析 → 400
    let Json(request) = match payload {
        Ok(json) => json,
        Err(rejection) => {
            return (StatusCode::BAD_REQUEST, rejection.body_text()).into_response();
        }
    };

    // 缺少dxf字段 → 400
    let Some(dxf_base64) = request.dxf.filter(|s| !s.is_empty()) else {
        return (StatusCode::BAD_REQUEST, "No DXF data provided").into_response();
    };

    // base64解码失败 → 400
    let dxf_bytes = match base64::engine::general_purpose::STANDARD.decode(dxf_base64.as_bytes())
    {
        Ok(bytes) => bytes,
        Err(e) => {
            return (
                StatusCode::BAD_REQUEST,
                format!("Invalid base64 payload: {}", e),
            )
                .into_response();
        }
    };

    // 转换失败作为结构化失败返回（HTTP 200）
    let body = match dxfsvg_file::convert_bytes(&dxf_bytes) {
        Ok(svg) => ConvertResponse::ok(svg),
        Err(e) => {
            error!("Conversion failed: {}", e);
            ConvertResponse::fail(e.to_string())
        }
    };

    Json(body).into_response()
}

/// 处理器panic → 500，附带诊断信息
fn handle_panic(err: Box<dyn std::any::Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    };

    error!("Handler panicked: {}", detail);

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ConvertResponse::fail(format!(
            "Internal server error: {}",
            detail
        ))),
    )
        .into_response()
}

#[tokio::main]
async fn main() -> Result<()> {
    // 初始化日志
    tracing::subscriber::set_global_default(
        FmtSubscriber::builder().with_max_level(Level::INFO).finish(),
    )?;

    let args = Args::parse();

    info!("Starting dxfsvg-server on {}", args.bind);

    let listener = tokio::net::TcpListener::bind(args.bind).await?;
    axum::serve(listener, router()).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    /// 含一条线段的最小DXF文档，base64编码
    fn minimal_dxf_base64() -> String {
        let mut drawing = dxf::Drawing::new();

        let mut line = dxf::entities::Line::default();
        line.p1 = dxf::Point::new(0.0, 0.0, 0.0);
        line.p2 = dxf::Point::new(10.0, 10.0, 0.0);
        drawing.add_entity(dxf::entities::Entity::new(dxf::entities::EntityType::Line(
            line,
        )));

        let mut buffer = Vec::new();
        drawing.save(&mut buffer).expect("save dxf to buffer");
        base64::engine::general_purpose::STANDARD.encode(buffer)
    }

    async fn post_json(body: &str) -> (StatusCode, String) {
        let response = router()
            .oneshot(
                Request::builder()
                    .method(Method::POST)
                    .uri("/")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();

        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_convert_success() {
        let payload = format!(r#"{{"dxf": "{}"}}"#, minimal_dxf_base64());
        let (status, body) = post_json(&payload).await;

        assert_eq!(status, StatusCode::OK);
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["success"], true);
        assert!(json["svg"].as_str().unwrap().starts_with("<?xml"));
    }

    #[tokio::test]
    async fn test_missing_dxf_field_is_400() {
        let (status, body) = post_json("{}").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, "No DXF data provided");
    }

    #[tokio::test]
    async fn test_malformed_json_is_400() {
        let (status, _) = post_json("{not json").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_invalid_base64_is_400() {
        let (status, _) = post_json(r#"{"dxf": "!!!not-base64!!!"}"#).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_invalid_dxf_reports_structured_failure() {
        let garbage = base64::engine::general_purpose::STANDARD.encode(b"not a dxf");
        let payload = format!(r#"{{"dxf": "{}"}}"#, garbage);
        let (status, body) = post_json(&payload).await;

        assert_eq!(status, StatusCode::OK);
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["success"], false);
        assert!(json["error"].is_string());
    }

    #[tokio::test]
    async fn test_options_preflight_has_cors_headers() {
        let response = router()
            .oneshot(
                Request::builder()
                    .method(Method::OPTIONS)
                    .uri("/")
                    .header(header::ORIGIN, "http://example.com")
                    .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response
                .headers()
                .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
                .unwrap(),
            "*"
        );
    }
}
