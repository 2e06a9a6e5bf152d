use serde::{Deserialize, Serialize};

/// Bitable(다차원 스프레드시트) 동기화 설정.
/// data 디렉토리의 bitable.json에 하나의 단위로 저장됩니다.
/// 인증 플로우 자체는 외부 협력자의 몫이고,
/// 여기서는 토큰 발급에 필요한 자격 정보와 대상 테이블만 관리합니다.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct BitableConfig {
    #[serde(default)]
    pub app_id: String,
    /// GET 응답에는 절대 포함하지 않습니다 (쓰기 전용 취급)
    #[serde(default)]
    pub app_secret: String,
    /// 대상 Bitable 앱 토큰
    #[serde(default)]
    pub app_token: String,
    /// 기록이 들어갈 테이블 ID
    #[serde(default)]
    pub table_id: String,
    /// 일일 계획이 들어갈 테이블 ID
    #[serde(default)]
    pub plan_table_id: String,
}

impl BitableConfig {
    /// 동기화를 시도할 수 있을 만큼 설정이 채워졌는지 확인합니다.
    pub fn is_configured(&self) -> bool {
        !self.app_id.is_empty() && !self.app_secret.is_empty()
    }

    /// 부분 수정 요청을 병합합니다. 요청에서 생략한 필드는
    /// 저장된 값을 그대로 유지합니다 (app_secret 포함 — 모델 문서 참고).
    pub fn apply(&mut self, req: UpdateBitableConfigRequest) {
        if let Some(id) = req.app_id {
            self.app_id = id;
        }
        if let Some(secret) = req.app_secret {
            self.app_secret = secret;
        }
        if let Some(token) = req.app_token {
            self.app_token = token;
        }
        if let Some(table) = req.table_id {
            self.table_id = table;
        }
        if let Some(table) = req.plan_table_id {
            self.plan_table_id = table;
        }
    }
}

/// PUT /api/bitable/config 요청. 모든 필드가 선택적이며,
/// 생략한 필드는 기존 값을 유지합니다.
/// 특히 `app_secret`: GET이 secret을 돌려주지 않으므로, 조회한 설정을
/// 그대로 되돌려 저장해도 빈 값으로 덮이지 않아야 합니다.
#[derive(Debug, Deserialize)]
pub struct UpdateBitableConfigRequest {
    pub app_id: Option<String>,
    pub app_secret: Option<String>,
    pub app_token: Option<String>,
    pub table_id: Option<String>,
    pub plan_table_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stored() -> BitableConfig {
        BitableConfig {
            app_id: "cli_123".to_string(),
            app_secret: "shh".to_string(),
            app_token: "tok".to_string(),
            table_id: "tbl1".to_string(),
            plan_table_id: "tbl2".to_string(),
        }
    }

    fn empty_req() -> UpdateBitableConfigRequest {
        UpdateBitableConfigRequest {
            app_id: None,
            app_secret: None,
            app_token: None,
            table_id: None,
            plan_table_id: None,
        }
    }

    #[test]
    fn omitted_fields_keep_stored_values() {
        // app_id만 보내는 부분 수정: 나머지는 전부 그대로여야 합니다.
        let mut config = stored();
        let mut req = empty_req();
        req.app_id = Some("cli_456".to_string());
        config.apply(req);
        assert_eq!(config.app_id, "cli_456");
        assert_eq!(config.app_secret, "shh");
        assert_eq!(config.table_id, "tbl1");
    }

    #[test]
    fn fully_omitted_request_is_a_noop() {
        // GET 응답(secret/app_id 없이)을 그대로 되돌려 저장하는 경우
        let mut config = stored();
        config.apply(empty_req());
        assert_eq!(config.app_id, "cli_123");
        assert_eq!(config.app_secret, "shh");
        assert!(config.is_configured());
    }
}
