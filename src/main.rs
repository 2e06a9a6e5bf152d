//! # Sigan 웹 서버 진입점
//!
//! 개인 시간 기록 앱의 백엔드 서버입니다.
//! Rust 프로그램은 항상 `main()` 함수에서 실행이 시작됩니다.
//!
//! 이 파일이 수행하는 작업:
//! 1. 환경변수(.env) 로딩
//! 2. 로깅(tracing) 초기화
//! 3. 설정 로딩
//! 4. data 디렉토리 준비 (JSON 파일 저장소)
//! 5. API 라우터 설정
//! 6. 정적 파일(프론트엔드) 서빙 설정
//! 7. HTTP 서버 시작

// ── 모듈 선언 ──
// `mod` 키워드는 다른 파일을 모듈로 가져옵니다.
// Rust에서는 파일 시스템 구조가 곧 모듈 구조입니다.
mod config;
mod error;
mod models;
mod routes;
mod services;
mod store;

use anyhow::Result;
use axum::{
    routing::{get, post},
    Router,
};
use config::Config;
use routes::{records::AppState, *};
use std::path::Path;
use store::JsonStore;
use tower_http::{
    cors::{Any, CorsLayer},
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // ── 1단계: 환경변수 로딩 ──
    // .env 파일이 없어도 에러 없이 넘어갑니다.
    dotenvy::dotenv().ok();

    // ── 2단계: 로깅(tracing) 초기화 ──
    // RUST_LOG 환경변수로 로그 레벨을 제어합니다.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sigan=debug,tower_http=debug,axum=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // ── 3단계: 설정 로딩 ──
    // 모든 설정에 기본값이 있어 환경변수 없이도 바로 뜹니다.
    let config = Config::from_env();
    tracing::info!("Starting Sigan server on {}:{}", config.host, config.port);

    // ── 4단계: 저장소 준비 ──
    // 데이터베이스 대신 data 디렉토리의 JSON 파일을 사용합니다.
    let store = JsonStore::new(&config.data_path);
    store.ensure_dir().await?;

    // ── 5단계: API 라우터 설정 ──
    // AppState는 모든 핸들러가 공유하는 상태입니다 (저장소 핸들).
    let state = AppState { store };

    let api_routes = Router::new()
        // 기록 CRUD
        .route("/records", get(list_records).post(create_record))
        // {id}는 URL 경로 파라미터 (Path<String>으로 핸들러에서 추출)
        .route(
            "/records/{id}",
            get(get_record).put(update_record).delete(delete_record),
        )
        // 전체 기록 필터/페이지네이션
        .route("/all-records", get(list_all_records))
        // 오늘 요약 통계
        .route("/stats", get(get_stats))
        // 최근 7일 집계 (감정 벽 / 활동 벽 / 키워드)
        .route("/mood-wall", get(get_mood_wall))
        // 일일 계획
        .route(
            "/daily-plan/{date}",
            get(get_daily_plan).put(upsert_daily_plan),
        )
        .route("/daily-plan/{date}/sync", post(sync_daily_plan))
        // 활동 카테고리 설정
        .route(
            "/activity-categories",
            get(get_categories).put(put_categories),
        )
        // 백업 내보내기/가져오기
        .route("/export-records", get(export_records))
        .route("/import-records", post(import_records))
        // Bitable 동기화
        .route(
            "/bitable/config",
            get(get_bitable_config).put(put_bitable_config),
        )
        .route("/bitable/import-records", post(push_records_to_bitable))
        // 헬스체크
        .route("/health", get(health_check))
        .with_state(state);

    // ── 6단계: CORS 미들웨어 설정 ──
    // 개인용 로컬 서버라 모든 출처를 허용합니다.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // ── 7단계: 프론트엔드 정적 파일 서빙 설정 ──
    // 빌드된 프론트엔드가 있으면 같은 서버에서 서빙합니다.
    // SPA이므로 찾을 수 없는 경로는 index.html로 돌려보냅니다.
    let static_path = Path::new(&config.static_path);
    let app = if static_path.exists() {
        tracing::info!("Serving frontend static files from {}", config.static_path);

        let index = static_path.join("index.html");
        let serve_dir = ServeDir::new(static_path).not_found_service(ServeFile::new(index));

        Router::new()
            .nest("/api", api_routes)
            .fallback_service(serve_dir)
            .layer(cors)
            .layer(TraceLayer::new_for_http())
    } else {
        tracing::warn!("Static directory not found, serving API only");

        Router::new()
            .nest("/api", api_routes)
            .layer(cors)
            .layer(TraceLayer::new_for_http())
    };

    // ── 8단계: 서버 시작 ──
    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
