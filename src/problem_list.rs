use dioxus::prelude::*;

use crate::problem_detail::ProblemDetailPage;
use crate::problems::{all_problems, difficulty_class};

#[component]
pub fn ProblemListPage() -> Element {
    let mut selected = use_signal(|| None::<&'static str>);

    if let Some(problem_id) = selected() {
        return rsx! {
            ProblemDetailPage {
                problem_id: problem_id.to_string(),
                on_back: move |_| selected.set(None),
            }
        };
    }

    rsx! {
        div { class: "problem-page-container",
            h2 { class: "page-title", "문제 목록" }
            div { class: "problem-list",
                for problem in all_problems().iter().map(|problem| problem.summary) {
                    div {
                        key: "{problem.id}",
                        class: "problem-card",
                        onclick: move |_| {
                            tracing::debug!("open problem {}", problem.id);
                            selected.set(Some(problem.id));
                        },
                        div { class: "problem-header",
                            div { class: "problem-info",
                                span { class: "problem-id", "{problem.id}." }
                                span { class: "problem-title", "{problem.title}" }
                            }
                            div { class: "difficulty-badge {difficulty_class(problem.difficulty)}", "{problem.difficulty}" }
                        }
                        div { class: "problem-footer",
                            span { class: "score-label", "점수" }
                            span { class: "score-value", "{problem.score}점" }
                        }
                        div { class: "score-indicator-container",
                            div {
                                class: "score-indicator-bar {problem.indicator().class()}",
                                style: "width: {problem.percent()}%;",
                            }
                        }
                    }
                }
            }
        }
    }
}
