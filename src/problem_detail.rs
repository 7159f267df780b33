use dioxus::prelude::*;

use crate::code_editor::CodeEditor;
use crate::editor::Language;
use crate::hooks::{use_effective_user_id, use_judge_client};
use crate::judge::{JudgeHandle, JudgeResponse, SubmissionKind};
use crate::markdown::render_markdown;
use crate::problems::{difficulty_class, find_problem};
use crate::theme::Theme;
use crate::workflow::{
    run_test_batch, submit, JudgePanel, SubmissionContext, SubmissionHistory, TestCaseResult,
};

#[component]
pub fn ProblemDetailPage(problem_id: String, on_back: EventHandler<()>) -> Element {
    let judge = use_judge_client();
    let theme = use_context::<Theme>();
    let user_id = use_effective_user_id();
    let problem = find_problem(&problem_id);

    let code = use_signal(String::new);
    let mut language = use_signal(Language::default);
    let mut test_cases = use_signal(|| {
        problem
            .map(|problem| problem.sample_cases.to_string())
            .unwrap_or_else(|| "[]".to_string())
    });
    let mut panel = use_signal(JudgePanel::default);
    let mut history = use_signal(SubmissionHistory::default);
    let statement_html = use_hook(|| {
        problem
            .map(|problem| render_markdown(problem.statement))
            .unwrap_or_default()
    });

    use_hook({
        let judge = judge.clone();
        let problem_id = problem_id.clone();
        let user_id = user_id.clone();
        move || {
            if judge.client().remote_history() {
                spawn(refresh_history(judge, problem_id, user_id, history, panel));
            }
        }
    });

    let Some(problem) = problem else {
        return rsx! {
            div { class: "problem-detail",
                p { class: "problem-missing", "문제를 찾을 수 없습니다: {problem_id}" }
                button { r#type: "button", class: "back-button", onclick: move |_| on_back.call(()), "← 문제 목록" }
            }
        };
    };
    let summary = problem.summary;

    let context = {
        let user_id = user_id.clone();
        let problem_id = problem_id.clone();
        move || SubmissionContext {
            user_id: user_id.clone(),
            problem_id: problem_id.clone(),
            language: language(),
            code: code(),
        }
    };

    let on_test = {
        let judge = judge.clone();
        let context = context.clone();
        move |_: MouseEvent| {
            if !panel.with_mut(|panel| panel.begin(SubmissionKind::Test)) {
                return;
            }
            let judge = judge.clone();
            let context = context();
            let raw_cases = test_cases();
            let mut panel = panel;
            let mut history = history;
            spawn(async move {
                let result = run_test_batch(judge.client(), &context, &raw_cases).await;
                if let Ok(results) = &result {
                    if !judge.client().remote_history() {
                        history.with_mut(|history| history.record_test_batch(&context, results));
                    }
                }
                panel.with_mut(|panel| panel.finish_test(result));
            });
        }
    };

    let on_submit = {
        let judge = judge.clone();
        move |_: MouseEvent| {
            if !panel.with_mut(|panel| panel.begin(SubmissionKind::Submit)) {
                return;
            }
            let judge = judge.clone();
            let context = context();
            let mut panel = panel;
            let mut history = history;
            spawn(async move {
                let result = submit(judge.client(), &context).await;
                let accepted = result.as_ref().ok().cloned();
                panel.with_mut(|panel| panel.finish_submit(result));
                let Some(response) = accepted else {
                    return;
                };
                if judge.client().remote_history() {
                    let SubmissionContext { problem_id, user_id, .. } = context;
                    refresh_history(judge, problem_id, user_id, history, panel).await;
                } else {
                    history.with_mut(|history| history.record_submission(&context, &response));
                }
            });
        }
    };

    let state = panel();
    let test_view = state
        .test_results
        .as_deref()
        .map(|results| render_test_results(results, &theme));
    let verdict_view = state
        .verdict
        .as_ref()
        .map(|response| render_verdict(response, &theme));
    let submissions = history();
    let test_label = if state.test_busy { "테스트 중..." } else { "테스트" };
    let submit_label = if state.submit_busy { "채점 중..." } else { "제출" };

    rsx! {
        div { class: "problem-detail",
            div { class: "problem-detail-toolbar",
                button { r#type: "button", class: "back-button", onclick: move |_| on_back.call(()), "← 문제 목록" }
                span { class: "problem-id", "{summary.id}." }
                span { class: "problem-title", "{summary.title}" }
                span { class: "difficulty-badge {difficulty_class(summary.difficulty)}", "{summary.difficulty}" }
            }
            div { class: "problem-detail-columns",
                div { class: "problem-statement", dangerous_inner_html: "{statement_html}" }
                div { class: "problem-workspace",
                    div { class: "editor-header",
                        h2 { "코드 작성" }
                        span { class: "editor-file-name", "{language().file_name()}" }
                        select {
                            class: "language-select",
                            value: "{language().as_str()}",
                            onchange: move |event| {
                                if let Some(next) = Language::parse(&event.value()) {
                                    language.set(next);
                                }
                            },
                            for option_language in Language::ALL {
                                option { key: "{option_language.as_str()}", value: "{option_language.as_str()}", "{option_language.label()}" }
                            }
                        }
                    }
                    CodeEditor { code, language: language() }
                    details { class: "test-case-editor",
                        summary { "테스트 케이스 (JSON)" }
                        textarea {
                            class: "test-case-input",
                            value: "{test_cases}",
                            spellcheck: "false",
                            oninput: move |event| test_cases.set(event.value()),
                        }
                    }
                    div { class: "action-buttons",
                        button {
                            r#type: "button",
                            class: "action-button",
                            style: theme.action_button(theme.test, state.test_busy),
                            disabled: state.test_busy,
                            onclick: on_test,
                            "{test_label}"
                        }
                        button {
                            r#type: "button",
                            class: "action-button",
                            style: theme.action_button(theme.primary, state.submit_busy),
                            disabled: state.submit_busy,
                            onclick: on_submit,
                            "{submit_label}"
                        }
                    }
                    if let Some(message) = state.error.as_deref() {
                        div { class: "judge-error", style: "color: {theme.failure};", "{message}" }
                    }
                    {test_view}
                    {verdict_view}
                    div { class: "submission-history",
                        h2 { "제출 기록" }
                        if submissions.is_empty() {
                            p { class: "history-empty", style: "color: {theme.muted};", "아직 제출 기록이 없습니다." }
                        } else {
                            ul { class: "history-list",
                                for (index, record) in submissions.records().iter().enumerate() {
                                    li {
                                        key: "{record.id}-{index}",
                                        class: "history-item",
                                        style: "background-color: {theme.row_background(index)};",
                                        span {
                                            class: "history-status",
                                            style: "color: {theme.verdict_color(record.is_passed)};",
                                            if record.is_passed { "Accepted" } else { "Wrong Answer" }
                                        }
                                        span { class: "history-kind", "{kind_label(record.kind)}" }
                                        if let Some(language) = record.language {
                                            span { class: "history-language", "{language.label()}" }
                                        }
                                        if let Some(score) = record.score {
                                            span { class: "history-score", "{score}점" }
                                        }
                                        span { class: "history-time", style: "color: {theme.muted};", "{record.timestamp}" }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

fn kind_label(kind: SubmissionKind) -> &'static str {
    match kind {
        SubmissionKind::Test => "테스트",
        SubmissionKind::Submit => "제출",
    }
}

fn render_test_results(results: &[TestCaseResult], theme: &Theme) -> Element {
    rsx! {
        div { class: "result-box",
            h3 { "테스트 결과" }
            table { class: "test-results",
                thead {
                    tr {
                        th { "#" }
                        th { "결과" }
                        th { "실행 시간" }
                        th { "메모리" }
                    }
                }
                tbody {
                    for (index, result) in results.iter().enumerate() {
                        tr { key: "{index}",
                            td { "{index + 1}" }
                            td { style: "color: {theme.verdict_color(result.is_passed)};",
                                if result.is_passed { "정답" } else { "오답" }
                            }
                            td { "{result.runtime} ms" }
                            td { "{result.memory} KB" }
                        }
                    }
                }
            }
            h4 { "입력/출력 상세" }
            for (index, result) in results.iter().enumerate() {
                div { key: "detail-{index}", class: "test-detail",
                    p { strong { "입력: " } "{result.input}" }
                    p { strong { "기대 출력: " } "{result.expected_output}" }
                    p { style: "color: {theme.verdict_color(result.is_passed)};",
                        strong { "실제 출력: " }
                        "{result.actual_output}"
                    }
                }
            }
        }
    }
}

fn render_verdict(response: &JudgeResponse, theme: &Theme) -> Element {
    let feedback = render_markdown(&response.feedback);
    let heading = if response.is_passed { "✅ Accepted" } else { "❌ Wrong Answer" };
    rsx! {
        div { class: "result-box",
            h3 { style: "color: {theme.verdict_color(response.is_passed)};", "{heading}" }
            if let Some(score) = response.score {
                p { class: "verdict-score", "점수: {score}" }
            }
            div { class: "verdict-feedback", dangerous_inner_html: "{feedback}" }
        }
    }
}

async fn refresh_history(
    judge: JudgeHandle,
    problem_id: String,
    user_id: String,
    mut history: Signal<SubmissionHistory>,
    mut panel: Signal<JudgePanel>,
) {
    match judge.client().records(&problem_id, &user_id).await {
        Ok(records) => history.with_mut(|history| history.replace(records)),
        Err(err) => {
            tracing::warn!("records for {problem_id}: {err}");
            panel.with_mut(|panel| panel.show_error(&err));
        }
    }
}
