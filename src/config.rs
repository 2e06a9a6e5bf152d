//! # 애플리케이션 설정(Configuration) 모듈
//!
//! 환경변수에서 서버 설정값을 읽어오는 모듈입니다.
//! `.env` 파일이나 시스템 환경변수에서 값을 가져옵니다.
//!
//! 설정 항목:
//! - `DATA_PATH`: JSON 데이터 파일 저장 디렉토리 (기록/카테고리/일일 계획)
//! - `STATIC_PATH`: 프론트엔드 정적 파일 디렉토리
//! - `HOST`: 서버 바인딩 주소
//! - `PORT`: 서버 포트 번호
//!
//! 설정은 시작 시 한 번 읽고, 카테고리 목록 같은 사용자 설정은
//! 여기 두지 않고 저장소(store)를 통해 요청 단위로 로드합니다.

use std::env;

/// 애플리케이션 전체 설정을 담는 구조체
///
/// 서버 시작 시 환경변수에서 한 번 읽어온 후,
/// 애플리케이션 전체에서 공유됩니다.
#[derive(Debug, Clone)]
pub struct Config {
    /// JSON 데이터 파일이 저장되는 디렉토리 경로 (기본값: "data")
    pub data_path: String,
    /// 프론트엔드 정적 파일 디렉토리 (기본값: "static")
    pub static_path: String,
    /// 서버가 바인딩할 호스트 주소 (기본값: "0.0.0.0")
    pub host: String,
    /// 서버 포트 번호 (기본값: 5002)
    pub port: u16,
}

impl Config {
    /// 환경변수에서 설정값을 읽어 Config 인스턴스를 생성합니다.
    ///
    /// 모든 설정에 기본값이 있으므로 환경변수가 하나도 없어도 동작합니다.
    /// (개인용 단일 프로세스 앱이라 필수 설정을 강제하지 않습니다.)
    pub fn from_env() -> Self {
        Self {
            data_path: env::var("DATA_PATH").unwrap_or_else(|_| "data".to_string()),
            static_path: env::var("STATIC_PATH").unwrap_or_else(|_| "static".to_string()),
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            // 포트 번호는 문자열 → 숫자 변환이 필요합니다.
            // 파싱 실패 시 기본값 5002를 사용합니다.
            port: env::var("PORT")
                .unwrap_or_else(|_| "5002".to_string())
                .parse()
                .unwrap_or(5002),
        }
    }
}
