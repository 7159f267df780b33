//! Judge backend access.
//!
//! Problem pages only see [`JudgeClient`]. [`HttpJudgeClient`] talks to the
//! `/run`, `/judge` and `/records` endpoints; [`SimulatedJudge`] answers
//! locally after an artificial delay.

use std::fmt;
use std::rc::Rc;

use async_trait::async_trait;
use gloo_net::http::{Request, Response};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::{JudgeMode, RuntimeConfig};
use crate::editor::Language;
use crate::problems::{find_problem, JudgeRule};

/// Simulated runtime (ms) and memory (KB) reported for every run.
const SIMULATED_RUNTIME_MS: f64 = 4.0;
const SIMULATED_MEMORY_KB: f64 = 2048.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum JudgeAction {
    FetchRecords,
    Submit,
    RunTestCase,
}

impl fmt::Display for JudgeAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FetchRecords => f.write_str("Failed to fetch records"),
            Self::Submit => f.write_str("Failed to submit code"),
            Self::RunTestCase => f.write_str("Failed to run test case"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Error)]
pub enum JudgeError {
    #[error("{action}: {status} - {body}")]
    Status {
        action: JudgeAction,
        status: u16,
        body: String,
    },
    #[error("request failed: {0}")]
    Network(String),
    #[error("response decode failed: {0}")]
    Decode(String),
    #[error("테스트 케이스 JSON 형식이 잘못되었습니다: {0}")]
    InvalidTestCases(String),
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JudgeRequest {
    pub user_id: String,
    pub problem_id: String,
    pub language: Language,
    pub code: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunRequest {
    pub user_id: String,
    pub problem_id: String,
    pub language: Language,
    pub code: String,
    pub input: String,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct RunResponse {
    #[serde(default)]
    pub output: String,
    #[serde(default)]
    pub runtime: f64,
    #[serde(default)]
    pub memory: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Verdict {
    Correct,
    Wrong,
}

impl Verdict {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Correct => "correct",
            Self::Wrong => "wrong",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JudgeResponse {
    pub is_passed: bool,
    #[serde(default)]
    pub feedback: String,
    #[serde(default)]
    pub score: Option<u32>,
    #[serde(default)]
    pub status: Option<String>,
}

impl JudgeResponse {
    pub fn verdict(&self) -> Verdict {
        if self.is_passed {
            Verdict::Correct
        } else {
            Verdict::Wrong
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubmissionKind {
    Test,
    #[default]
    Submit,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionRecord {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub timestamp: String,
    #[serde(default)]
    pub kind: SubmissionKind,
    #[serde(default)]
    pub language: Option<Language>,
    #[serde(default)]
    pub code: String,
    pub is_passed: bool,
    #[serde(default)]
    pub score: Option<u32>,
    #[serde(default)]
    pub runtime: Option<f64>,
    #[serde(default)]
    pub memory: Option<f64>,
}

#[async_trait(?Send)]
pub trait JudgeClient {
    async fn run(&self, request: RunRequest) -> Result<RunResponse, JudgeError>;

    async fn judge(&self, request: JudgeRequest) -> Result<JudgeResponse, JudgeError>;

    async fn records(
        &self,
        problem_id: &str,
        user_id: &str,
    ) -> Result<Vec<SubmissionRecord>, JudgeError>;

    /// Whether submission history lives behind [`JudgeClient::records`].
    /// Otherwise the page keeps history locally.
    fn remote_history(&self) -> bool;
}

/// Context value giving components shared access to the configured client.
#[derive(Clone)]
pub struct JudgeHandle(Rc<dyn JudgeClient>);

impl JudgeHandle {
    pub fn new(client: impl JudgeClient + 'static) -> Self {
        Self(Rc::new(client))
    }

    pub fn from_config(config: &RuntimeConfig) -> Self {
        tracing::info!("judge backend: {}", config.judge_mode);
        match config.judge_mode {
            JudgeMode::Http => Self::new(HttpJudgeClient::new(&config.judge_api_base_url)),
            JudgeMode::Simulated => Self::new(SimulatedJudge::new(config.simulated_delay_ms)),
        }
    }

    pub fn client(&self) -> &dyn JudgeClient {
        self.0.as_ref()
    }
}

pub struct HttpJudgeClient {
    base_url: String,
}

impl HttpJudgeClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim().trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        build_api_url(&self.base_url, path)
    }

    async fn post_json<B: Serialize>(&self, path: &str, body: &B) -> Result<Response, JudgeError> {
        let url = self.url(path);
        tracing::debug!("judge: POST {url}");
        Request::post(&url)
            .json(body)
            .map_err(|err| JudgeError::Network(err.to_string()))?
            .send()
            .await
            .map_err(|err| JudgeError::Network(err.to_string()))
    }
}

pub fn build_api_url(base_url: &str, path: &str) -> String {
    let base = base_url.trim().trim_end_matches('/');
    let segment = path.trim_start_matches('/');
    format!("{base}/{segment}")
}

pub fn records_query(problem_id: &str, user_id: &str) -> String {
    format!(
        "records?problemId={}&userId={}",
        urlencoding::encode(problem_id),
        urlencoding::encode(user_id)
    )
}

async fn expect_ok(action: JudgeAction, response: Response) -> Result<Response, JudgeError> {
    if response.ok() {
        return Ok(response);
    }
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    tracing::warn!("judge: {action} ({status})");
    Err(JudgeError::Status { action, status, body })
}

#[async_trait(?Send)]
impl JudgeClient for HttpJudgeClient {
    async fn run(&self, request: RunRequest) -> Result<RunResponse, JudgeError> {
        let response = self.post_json("run", &request).await?;
        expect_ok(JudgeAction::RunTestCase, response)
            .await?
            .json::<RunResponse>()
            .await
            .map_err(|err| JudgeError::Decode(err.to_string()))
    }

    async fn judge(&self, request: JudgeRequest) -> Result<JudgeResponse, JudgeError> {
        let response = self.post_json("judge", &request).await?;
        expect_ok(JudgeAction::Submit, response)
            .await?
            .json::<JudgeResponse>()
            .await
            .map_err(|err| JudgeError::Decode(err.to_string()))
    }

    async fn records(
        &self,
        problem_id: &str,
        user_id: &str,
    ) -> Result<Vec<SubmissionRecord>, JudgeError> {
        let url = self.url(&records_query(problem_id, user_id));
        tracing::debug!("judge: GET {url}");
        let response = Request::get(&url)
            .send()
            .await
            .map_err(|err| JudgeError::Network(err.to_string()))?;
        expect_ok(JudgeAction::FetchRecords, response)
            .await?
            .json::<Vec<SubmissionRecord>>()
            .await
            .map_err(|err| JudgeError::Decode(err.to_string()))
    }

    fn remote_history(&self) -> bool {
        true
    }
}

/// Deterministic stand-in for the judge service.
pub struct SimulatedJudge {
    delay_ms: u32,
}

impl SimulatedJudge {
    pub fn new(delay_ms: u32) -> Self {
        Self { delay_ms }
    }
}

#[async_trait(?Send)]
impl JudgeClient for SimulatedJudge {
    async fn run(&self, request: RunRequest) -> Result<RunResponse, JudgeError> {
        pause(self.delay_ms).await;
        Ok(RunResponse {
            output: request.code.chars().rev().collect(),
            runtime: SIMULATED_RUNTIME_MS,
            memory: SIMULATED_MEMORY_KB,
        })
    }

    async fn judge(&self, request: JudgeRequest) -> Result<JudgeResponse, JudgeError> {
        pause(self.delay_ms).await;
        let rule = find_problem(&request.problem_id)
            .map(|problem| problem.judge_rule)
            .unwrap_or_default();
        let is_passed = rule.accepts(&request.code);
        let verdict = if is_passed { Verdict::Correct } else { Verdict::Wrong };
        let JudgeRule::Contains(literal) = rule;
        let feedback = if is_passed {
            "모든 테스트를 통과했습니다.".to_string()
        } else {
            format!("출력에 `{literal}`이(가) 없습니다.")
        };
        Ok(JudgeResponse {
            is_passed,
            feedback,
            score: Some(if is_passed { 100 } else { 0 }),
            status: Some(verdict.as_str().to_string()),
        })
    }

    async fn records(
        &self,
        _problem_id: &str,
        _user_id: &str,
    ) -> Result<Vec<SubmissionRecord>, JudgeError> {
        Ok(Vec::new())
    }

    fn remote_history(&self) -> bool {
        false
    }
}

async fn pause(delay_ms: u32) {
    #[cfg(target_arch = "wasm32")]
    gloo_timers::future::TimeoutFuture::new(delay_ms).await;
    #[cfg(not(target_arch = "wasm32"))]
    tokio::time::sleep(std::time::Duration::from_millis(u64::from(delay_ms))).await;
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn judge_request(problem_id: &str, code: &str) -> JudgeRequest {
        JudgeRequest {
            user_id: "user123".to_string(),
            problem_id: problem_id.to_string(),
            language: Language::Python,
            code: code.to_string(),
        }
    }

    #[tokio::test]
    async fn simulated_judge_accepts_hello_world() {
        let judge = SimulatedJudge::new(0);
        let response = judge
            .judge(judge_request("0001", "print(\"Hello, World!\")"))
            .await
            .unwrap();
        assert_eq!(response.verdict().as_str(), "correct");
        assert_eq!(response.status.as_deref(), Some("correct"));
        assert_eq!(response.score, Some(100));
    }

    #[tokio::test]
    async fn simulated_judge_rejects_other_code() {
        let judge = SimulatedJudge::new(0);
        let response = judge
            .judge(judge_request("0001", "print(\"hello world\")"))
            .await
            .unwrap();
        assert_eq!(response.verdict(), Verdict::Wrong);
        assert_eq!(response.status.as_deref(), Some("wrong"));
        assert_eq!(response.score, Some(0));
    }

    #[tokio::test]
    async fn unknown_problem_falls_back_to_hello_world_rule() {
        let judge = SimulatedJudge::new(0);
        let response = judge
            .judge(judge_request("9999", "Hello, World!"))
            .await
            .unwrap();
        assert!(response.is_passed);
    }

    #[tokio::test]
    async fn simulated_run_reverses_code() {
        let judge = SimulatedJudge::new(0);
        let response = judge
            .run(RunRequest {
                user_id: "u".to_string(),
                problem_id: "0002".to_string(),
                language: Language::Cpp,
                code: "abc".to_string(),
                input: "1 2".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(response.output, "cba");
        assert!(!judge.remote_history());
    }

    #[test]
    fn requests_serialize_in_camel_case() {
        let body = serde_json::to_value(RunRequest {
            user_id: "user123".to_string(),
            problem_id: "0002".to_string(),
            language: Language::Cpp,
            code: "x".to_string(),
            input: "1 2".to_string(),
        })
        .unwrap();
        assert_eq!(
            body,
            serde_json::json!({
                "userId": "user123",
                "problemId": "0002",
                "language": "cpp",
                "code": "x",
                "input": "1 2",
            })
        );
    }

    #[test]
    fn records_tolerate_missing_fields() {
        let records: Vec<SubmissionRecord> = serde_json::from_str(
            r#"[
                { "isPassed": true, "timestamp": "2024-12-24 10:00:00" },
                { "isPassed": false, "kind": "test", "language": "java", "runtime": 3.5 }
            ]"#,
        )
        .unwrap();
        assert_eq!(records[0].kind, SubmissionKind::Submit);
        assert_eq!(records[0].timestamp, "2024-12-24 10:00:00");
        assert_eq!(records[1].kind, SubmissionKind::Test);
        assert_eq!(records[1].language, Some(Language::Java));
        assert_eq!(records[1].runtime, Some(3.5));
    }

    #[tokio::test]
    async fn simulated_judge_waits_for_the_configured_delay() {
        let judge = SimulatedJudge::new(30);
        let started = std::time::Instant::now();
        judge
            .judge(judge_request("0001", "Hello, World!"))
            .await
            .unwrap();
        assert!(started.elapsed() >= std::time::Duration::from_millis(30));
    }

    #[test]
    fn status_error_carries_code_and_body() {
        let err = JudgeError::Status {
            action: JudgeAction::Submit,
            status: 502,
            body: "bad gateway".to_string(),
        };
        assert_eq!(err.to_string(), "Failed to submit code: 502 - bad gateway");
    }

    #[test]
    fn urls_join_cleanly() {
        assert_eq!(build_api_url("/api/", "/judge"), "/api/judge");
        assert_eq!(
            HttpJudgeClient::new(" https://judge.test/api/ ").url(&records_query("0001", "a b")),
            "https://judge.test/api/records?problemId=0001&userId=a%20b"
        );
    }

    #[test]
    fn handle_follows_configured_mode() {
        let simulated = JudgeHandle::from_config(&RuntimeConfig::default());
        assert!(!simulated.client().remote_history());
        let http = JudgeHandle::from_config(&RuntimeConfig {
            judge_mode: JudgeMode::Http,
            ..RuntimeConfig::default()
        });
        assert!(http.client().remote_history());
    }
}
