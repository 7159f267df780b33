//! Test/submit actions of a problem page and the state they drive.

use futures_util::future::try_join_all;
use serde::Deserialize;

use crate::date::timestamp_now;
use crate::editor::Language;
use crate::judge::{
    JudgeClient, JudgeError, JudgeRequest, JudgeResponse, RunRequest, SubmissionKind,
    SubmissionRecord,
};

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct TestCase {
    pub input: String,
    pub output: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TestCaseResult {
    pub input: String,
    pub expected_output: String,
    pub actual_output: String,
    pub runtime: f64,
    pub memory: f64,
    pub is_passed: bool,
}

/// Everything a judge call needs besides the test input.
#[derive(Clone, Debug, PartialEq)]
pub struct SubmissionContext {
    pub user_id: String,
    pub problem_id: String,
    pub language: Language,
    pub code: String,
}

pub fn parse_test_cases(raw: &str) -> Result<Vec<TestCase>, JudgeError> {
    serde_json::from_str(raw).map_err(|err| JudgeError::InvalidTestCases(err.to_string()))
}

pub fn outputs_match(expected: &str, actual: &str) -> bool {
    expected.trim() == actual.trim()
}

/// Runs every case concurrently. One failure fails the whole batch.
pub async fn run_test_batch(
    client: &dyn JudgeClient,
    context: &SubmissionContext,
    raw_cases: &str,
) -> Result<Vec<TestCaseResult>, JudgeError> {
    let cases = parse_test_cases(raw_cases)?;
    tracing::debug!("running {} test case(s) for {}", cases.len(), context.problem_id);
    let runs = cases.into_iter().map(move |case| async move {
        let response = client
            .run(RunRequest {
                user_id: context.user_id.clone(),
                problem_id: context.problem_id.clone(),
                language: context.language,
                code: context.code.clone(),
                input: case.input.clone(),
            })
            .await?;
        Ok::<_, JudgeError>(TestCaseResult {
            is_passed: outputs_match(&case.output, &response.output),
            input: case.input,
            expected_output: case.output,
            actual_output: response.output,
            runtime: response.runtime,
            memory: response.memory,
        })
    });
    try_join_all(runs).await
}

pub async fn submit(
    client: &dyn JudgeClient,
    context: &SubmissionContext,
) -> Result<JudgeResponse, JudgeError> {
    tracing::info!("submitting {} ({})", context.problem_id, context.language.as_str());
    client
        .judge(JudgeRequest {
            user_id: context.user_id.clone(),
            problem_id: context.problem_id.clone(),
            language: context.language,
            code: context.code.clone(),
        })
        .await
}

/// `idle -> loading -> {result | error} -> idle`, with one busy flag per
/// action kind. Test results and the verdict are kept apart so a test batch
/// and a submission finishing in either order both stay visible.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct JudgePanel {
    pub test_busy: bool,
    pub submit_busy: bool,
    pub test_results: Option<Vec<TestCaseResult>>,
    pub verdict: Option<JudgeResponse>,
    pub error: Option<String>,
}

impl JudgePanel {
    pub fn is_busy(&self, kind: SubmissionKind) -> bool {
        match kind {
            SubmissionKind::Test => self.test_busy,
            SubmissionKind::Submit => self.submit_busy,
        }
    }

    /// Returns false, changing nothing, when `kind` is already in flight.
    /// A test run clears the verdict, a submission clears the test results;
    /// both clear the error.
    pub fn begin(&mut self, kind: SubmissionKind) -> bool {
        if self.is_busy(kind) {
            return false;
        }
        match kind {
            SubmissionKind::Test => {
                self.test_busy = true;
                self.verdict = None;
            }
            SubmissionKind::Submit => {
                self.submit_busy = true;
                self.test_results = None;
            }
        }
        self.error = None;
        true
    }

    pub fn finish_test(&mut self, result: Result<Vec<TestCaseResult>, JudgeError>) {
        self.test_busy = false;
        match result {
            Ok(results) => self.test_results = Some(results),
            Err(err) => self.show_error(&err),
        }
    }

    pub fn finish_submit(&mut self, result: Result<JudgeResponse, JudgeError>) {
        self.submit_busy = false;
        match result {
            Ok(response) => self.verdict = Some(response),
            Err(err) => self.show_error(&err),
        }
    }

    pub fn show_error(&mut self, err: &JudgeError) {
        self.error = Some(err.to_string());
    }
}

/// Submission history, most recent first.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SubmissionHistory {
    records: Vec<SubmissionRecord>,
    next_id: u64,
}

impl SubmissionHistory {
    pub fn records(&self) -> &[SubmissionRecord] {
        &self.records
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn replace(&mut self, records: Vec<SubmissionRecord>) {
        self.records = records;
    }

    pub fn prepend(&mut self, mut record: SubmissionRecord) {
        if record.id.is_empty() {
            self.next_id += 1;
            record.id = format!("local-{}", self.next_id);
        }
        self.records.insert(0, record);
    }

    pub fn record_test_batch(&mut self, context: &SubmissionContext, results: &[TestCaseResult]) {
        let runtime = results.iter().map(|result| result.runtime).fold(None, max_metric);
        let memory = results.iter().map(|result| result.memory).fold(None, max_metric);
        self.prepend(SubmissionRecord {
            id: String::new(),
            timestamp: timestamp_now(),
            kind: SubmissionKind::Test,
            language: Some(context.language),
            code: context.code.clone(),
            is_passed: !results.is_empty() && results.iter().all(|result| result.is_passed),
            score: None,
            runtime,
            memory,
        });
    }

    pub fn record_submission(&mut self, context: &SubmissionContext, response: &JudgeResponse) {
        self.prepend(SubmissionRecord {
            id: String::new(),
            timestamp: timestamp_now(),
            kind: SubmissionKind::Submit,
            language: Some(context.language),
            code: context.code.clone(),
            is_passed: response.is_passed,
            score: response.score,
            runtime: None,
            memory: None,
        });
    }
}

fn max_metric(current: Option<f64>, value: f64) -> Option<f64> {
    Some(current.map_or(value, |current| current.max(value)))
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use async_trait::async_trait;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::judge::{JudgeAction, RunResponse, SimulatedJudge};

    /// Answers `run` with canned outputs keyed by input.
    struct ScriptedJudge {
        outputs: Vec<(&'static str, Result<&'static str, u16>)>,
        seen_inputs: RefCell<Vec<String>>,
    }

    #[async_trait(?Send)]
    impl JudgeClient for ScriptedJudge {
        async fn run(&self, request: RunRequest) -> Result<RunResponse, JudgeError> {
            self.seen_inputs.borrow_mut().push(request.input.clone());
            let (_, scripted) = self
                .outputs
                .iter()
                .find(|(input, _)| *input == request.input)
                .expect("unscripted input");
            match scripted {
                Ok(output) => Ok(RunResponse {
                    output: output.to_string(),
                    runtime: request.input.len() as f64,
                    memory: 1024.0,
                }),
                Err(status) => Err(JudgeError::Status {
                    action: JudgeAction::RunTestCase,
                    status: *status,
                    body: "runner down".to_string(),
                }),
            }
        }

        async fn judge(&self, _request: JudgeRequest) -> Result<JudgeResponse, JudgeError> {
            unreachable!("not used")
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

    fn context(code: &str) -> SubmissionContext {
        SubmissionContext {
            user_id: "user123".to_string(),
            problem_id: "0002".to_string(),
            language: Language::Cpp,
            code: code.to_string(),
        }
    }

    #[test]
    fn trimmed_outputs_compare_equal() {
        assert!(outputs_match("3", "3\n"));
        assert!(outputs_match("  30 ", "30"));
        assert!(!outputs_match("3", "4"));
    }

    #[test]
    fn malformed_cases_report_localized_error() {
        let err = parse_test_cases("[{ \"input\": \"1 2\" ").unwrap_err();
        assert!(matches!(err, JudgeError::InvalidTestCases(_)));
        assert!(err
            .to_string()
            .starts_with("테스트 케이스 JSON 형식이 잘못되었습니다: "));
    }

    #[tokio::test]
    async fn batch_compares_each_case() {
        let judge = ScriptedJudge {
            outputs: vec![("1 2", Ok("3\n")), ("10 20", Ok("31"))],
            seen_inputs: RefCell::new(Vec::new()),
        };
        let raw = r#"[{ "input": "1 2", "output": "3" }, { "input": "10 20", "output": "30" }]"#;

        let results = run_test_batch(&judge, &context("int main() {}"), raw).await.unwrap();

        assert_eq!(results.len(), 2);
        assert!(results[0].is_passed);
        assert_eq!(results[0].actual_output, "3\n");
        assert_eq!(results[0].runtime, 3.0);
        assert!(!results[1].is_passed);
        assert_eq!(results[1].expected_output, "30");
        assert_eq!(*judge.seen_inputs.borrow(), vec!["1 2".to_string(), "10 20".to_string()]);
    }

    #[tokio::test]
    async fn one_failed_run_fails_the_batch() {
        let judge = ScriptedJudge {
            outputs: vec![("1 2", Ok("3")), ("oops", Err(500))],
            seen_inputs: RefCell::new(Vec::new()),
        };
        let raw = r#"[{ "input": "1 2", "output": "3" }, { "input": "oops", "output": "" }]"#;

        let err = run_test_batch(&judge, &context(""), raw).await.unwrap_err();

        assert_eq!(err.to_string(), "Failed to run test case: 500 - runner down");
    }

    #[tokio::test]
    async fn malformed_batch_issues_no_requests() {
        let judge = ScriptedJudge {
            outputs: Vec::new(),
            seen_inputs: RefCell::new(Vec::new()),
        };
        let mut panel = JudgePanel::default();
        assert!(panel.begin(SubmissionKind::Test));

        let result = run_test_batch(&judge, &context(""), "not json").await;
        panel.finish_test(result);

        assert!(judge.seen_inputs.borrow().is_empty());
        assert!(!panel.test_busy);
        assert!(panel.test_results.is_none());
        assert!(matches!(panel.error, Some(ref message) if message.contains("JSON")));
    }

    #[tokio::test]
    async fn simulated_submit_flows_into_history() {
        let judge = SimulatedJudge::new(0);
        let context = context("cout << \"Hello, World!\";");
        let mut panel = JudgePanel::default();
        let mut history = SubmissionHistory::default();

        assert!(panel.begin(SubmissionKind::Submit));
        let result = submit(&judge, &context).await;
        if let Ok(response) = &result {
            history.record_submission(&context, response);
        }
        panel.finish_submit(result);

        let Some(response) = &panel.verdict else {
            panic!("expected verdict, got {:?}", panel);
        };
        assert_eq!(response.score, Some(100));
        assert_eq!(history.records()[0].score, Some(100));
        assert_eq!(history.records()[0].kind, SubmissionKind::Submit);
    }

    #[test]
    fn busy_action_ignores_repeat_clicks() {
        let mut panel = JudgePanel::default();
        assert!(panel.begin(SubmissionKind::Submit));
        assert!(!panel.begin(SubmissionKind::Submit));
        assert!(panel.begin(SubmissionKind::Test));
        assert!(panel.is_busy(SubmissionKind::Submit));
        assert!(panel.is_busy(SubmissionKind::Test));

        panel.finish_submit(Err(JudgeError::Network("offline".to_string())));
        assert!(!panel.submit_busy);
        assert_eq!(panel.error.as_deref(), Some("request failed: offline"));
        assert!(panel.begin(SubmissionKind::Submit));
        assert_eq!(panel.error, None);
    }

    fn accepted() -> JudgeResponse {
        JudgeResponse {
            is_passed: true,
            feedback: "ok".to_string(),
            score: Some(100),
            status: Some("correct".to_string()),
        }
    }

    #[test]
    fn records_failure_after_submit_keeps_the_verdict() {
        let mut panel = JudgePanel::default();
        assert!(panel.begin(SubmissionKind::Submit));
        panel.finish_submit(Ok(accepted()));
        panel.show_error(&JudgeError::Status {
            action: JudgeAction::FetchRecords,
            status: 500,
            body: "db".to_string(),
        });

        assert_eq!(panel.verdict, Some(accepted()));
        assert_eq!(panel.error.as_deref(), Some("Failed to fetch records: 500 - db"));
    }

    #[test]
    fn overlapping_test_and_submit_keep_both_results() {
        let mut panel = JudgePanel::default();
        assert!(panel.begin(SubmissionKind::Test));
        assert!(panel.begin(SubmissionKind::Submit));
        panel.finish_submit(Ok(accepted()));
        panel.finish_test(Ok(Vec::new()));

        assert_eq!(panel.verdict, Some(accepted()));
        assert_eq!(panel.test_results, Some(Vec::new()));

        let mut panel = JudgePanel::default();
        assert!(panel.begin(SubmissionKind::Test));
        assert!(panel.begin(SubmissionKind::Submit));
        panel.finish_test(Ok(Vec::new()));
        panel.finish_submit(Ok(accepted()));

        assert_eq!(panel.verdict, Some(accepted()));
        assert_eq!(panel.test_results, Some(Vec::new()));
    }

    #[test]
    fn starting_an_action_clears_the_other_kinds_result() {
        let mut panel = JudgePanel {
            test_results: Some(Vec::new()),
            verdict: Some(accepted()),
            error: Some("old".to_string()),
            ..JudgePanel::default()
        };
        assert!(panel.begin(SubmissionKind::Test));
        assert_eq!(panel.verdict, None);
        assert_eq!(panel.test_results, Some(Vec::new()));
        assert_eq!(panel.error, None);

        panel.finish_test(Ok(Vec::new()));
        panel.verdict = Some(accepted());
        assert!(panel.begin(SubmissionKind::Submit));
        assert_eq!(panel.test_results, None);
        assert_eq!(panel.verdict, Some(accepted()));
    }

    #[test]
    fn history_is_most_recent_first() {
        let mut history = SubmissionHistory::default();
        let ctx = context("a");
        history.record_test_batch(
            &ctx,
            &[TestCaseResult {
                input: String::new(),
                expected_output: String::new(),
                actual_output: String::new(),
                runtime: 7.0,
                memory: 10.0,
                is_passed: true,
            }],
        );
        history.record_submission(
            &ctx,
            &JudgeResponse {
                is_passed: false,
                feedback: String::new(),
                score: Some(0),
                status: None,
            },
        );

        let kinds: Vec<_> = history.records().iter().map(|record| record.kind).collect();
        assert_eq!(kinds, vec![SubmissionKind::Submit, SubmissionKind::Test]);
        assert_eq!(history.records()[0].id, "local-2");
        assert_eq!(history.records()[1].runtime, Some(7.0));
        assert!(history.records()[1].is_passed);
    }

    #[test]
    fn empty_batch_is_not_a_pass() {
        let mut history = SubmissionHistory::default();
        history.record_test_batch(&context("a"), &[]);
        assert!(!history.records()[0].is_passed);
        assert_eq!(history.records()[0].runtime, None);
    }
}
