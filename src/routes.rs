use dioxus::prelude::*;

use crate::config::{use_runtime_config, RuntimeConfig};
use crate::hooks::use_hash_route;
use crate::judge::JudgeHandle;
use crate::login::{AuthState, LoginPanel};
use crate::navigation::NavigationHandle;
use crate::problem_list::ProblemListPage;
use crate::problems::{all_problems, difficulty_class};
use crate::theme::Theme;

const MAIN_CSS: Asset = asset!("/assets/main.css");
const TITLE: &str = "Christmas Coding Party";
const AUTHOR_URL: &str = "https://github.com/lmwmason";
const CONTACT_EMAIL: &str = "lmwmason@naver.com";

#[component]
pub fn App() -> Element {
    let config_resource = use_runtime_config();
    let history = use_hook(NavigationHandle::platform_default);

    match config_resource() {
        None => rsx! {
            document::Title { "{TITLE}" }
            div { class: "page loading",
                h1 { "Loading config..." }
            }
        },
        Some(Err(message)) => rsx! {
            document::Title { "{TITLE}" }
            div { class: "page loading",
                h1 { "Config load failed" }
                p { "{message}" }
            }
        },
        Some(Ok(config)) => rsx! {
            Shell { config, history }
        },
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LanguageTrack {
    C,
    Cpp,
    Java,
    Python,
    CSharp,
    JavaScript,
    Dart,
}

impl LanguageTrack {
    fn from_fragment(fragment: &str) -> Option<Self> {
        let track = match fragment {
            "C" => Self::C,
            "cpp" => Self::Cpp,
            "Java" => Self::Java,
            "Python" => Self::Python,
            "CS" => Self::CSharp,
            "Js" => Self::JavaScript,
            "Dart" => Self::Dart,
            _ => return None,
        };
        Some(track)
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::C => "C",
            Self::Cpp => "c++",
            Self::Java => "java",
            Self::Python => "python",
            Self::CSharp => "c#",
            Self::JavaScript => "Javascript",
            Self::Dart => "dart",
        }
    }
}

/// Page selected by the URL fragment.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Page {
    Home,
    Language(LanguageTrack),
    Problems,
    ScoreMe,
    Leaderboard,
    MyPage,
}

impl Page {
    /// Accepts the fragment with or without the leading `#`. Anything
    /// unrecognized is the home page.
    pub fn from_hash(hash: &str) -> Self {
        let fragment = hash.strip_prefix('#').unwrap_or(hash);
        match fragment {
            "problem" => Self::Problems,
            "score_me" => Self::ScoreMe,
            "leaderboard" => Self::Leaderboard,
            "Mypage" => Self::MyPage,
            other => LanguageTrack::from_fragment(other)
                .map(Self::Language)
                .unwrap_or(Self::Home),
        }
    }
}

struct MenuItem {
    label: &'static str,
    hash: &'static str,
}

static MENU: [MenuItem; 4] = [
    MenuItem { label: "문제", hash: "#problem" },
    MenuItem { label: "채점 상황", hash: "#score_me" },
    MenuItem { label: "리더보드", hash: "#leaderboard" },
    MenuItem { label: "내 정보", hash: "#Mypage" },
];

#[component]
fn Shell(config: RuntimeConfig, history: NavigationHandle) -> Element {
    use_context_provider(|| JudgeHandle::from_config(&config));
    use_context_provider(|| config.clone());
    use_context_provider(Theme::default);
    let auth = use_context_provider(|| Signal::new(AuthState::default()));
    let hash = use_hash_route(history.clone());

    let current = hash();
    let content = match Page::from_hash(&current) {
        Page::Home => rsx! { HomePage { track: None } },
        Page::Language(track) => rsx! { HomePage { track: Some(track) } },
        Page::Problems => rsx! { ProblemListPage {} },
        Page::ScoreMe => rsx! { ScoreMePage {} },
        Page::Leaderboard => rsx! { LeaderboardPage {} },
        Page::MyPage => rsx! { MyPage {} },
    };

    rsx! {
        document::Title { "{TITLE}" }
        document::Link { rel: "stylesheet", href: MAIN_CSS }
        div { class: "app-shell",
            header { class: "menu-bar",
                a {
                    class: "menu-brand",
                    href: "#",
                    onclick: {
                        let history = history.clone();
                        move |event: MouseEvent| {
                            event.prevent_default();
                            history.navigate("");
                        }
                    },
                    "🎄 {TITLE}"
                }
                nav { class: "menu",
                    for item in MENU.iter() {
                        a {
                            key: "{item.hash}",
                            class: if current == item.hash { "menu-item active" } else { "menu-item" },
                            href: "{item.hash}",
                            onclick: {
                                let history = history.clone();
                                move |event: MouseEvent| {
                                    event.prevent_default();
                                    history.navigate(item.hash);
                                }
                            },
                            "{item.label}"
                        }
                    }
                }
                if let Some(user_id) = auth().user_id {
                    span { class: "menu-user", "{user_id}" }
                }
            }
            main { class: "page", {content} }
            Footer {}
        }
    }
}

#[component]
fn HomePage(#[props(!optional)] track: Option<LanguageTrack>) -> Element {
    let auth = use_context::<Signal<AuthState>>();
    let greeting = match (track, auth().user_id) {
        (None, _) => "Choose a language!".to_string(),
        (Some(track), Some(user_id)) => format!("{user_id} for {}", track.label()),
        (Some(track), None) => format!("guest for {}", track.label()),
    };

    rsx! {
        div { class: "home",
            h1 { class: "home-title", "🎅 {TITLE}" }
            LoginPanel {}
            h2 { class: "home-greeting", "{greeting}" }
            nav { class: "language-links",
                for fragment in ["C", "cpp", "Java", "Python", "CS", "Js", "Dart"] {
                    a { key: "{fragment}", class: "language-link", href: "#{fragment}", "{fragment}" }
                }
            }
        }
    }
}

#[component]
fn ScoreMePage() -> Element {
    let theme = use_context::<Theme>();
    let summaries: Vec<_> = all_problems().iter().map(|problem| problem.summary).collect();
    let earned: u32 = summaries.iter().map(|summary| summary.score).sum();
    let possible: u32 = summaries.iter().map(|summary| summary.max_score).sum();

    rsx! {
        div { class: "score-page",
            h2 { class: "page-title", "채점 상황" }
            table { class: "score-table",
                thead {
                    tr {
                        th { "번호" }
                        th { "제목" }
                        th { "난이도" }
                        th { "점수" }
                    }
                }
                tbody {
                    for (index, summary) in summaries.iter().enumerate() {
                        tr {
                            key: "{summary.id}",
                            style: "background-color: {theme.row_background(index)};",
                            td { "{summary.id}" }
                            td { "{summary.title}" }
                            td {
                                span { class: "difficulty-badge {difficulty_class(summary.difficulty)}", "{summary.difficulty}" }
                            }
                            td { class: "{summary.indicator().class()}-text", "{summary.score} / {summary.max_score}" }
                        }
                    }
                }
                tfoot {
                    tr {
                        td { colspan: "3", "합계" }
                        td { "{earned} / {possible}" }
                    }
                }
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Standing {
    pub name: &'static str,
    pub solved: u32,
    pub score: u32,
}

const STANDINGS: [Standing; 6] = [
    Standing { name: "rudolph", solved: 7, score: 640 },
    Standing { name: "1102", solved: 9, score: 815 },
    Standing { name: "santa", solved: 9, score: 815 },
    Standing { name: "elf_kim", solved: 5, score: 410 },
    Standing { name: "1101", solved: 6, score: 530 },
    Standing { name: "snowman", solved: 2, score: 120 },
];

/// Orders by score, then solved count, then name. Equal score and solved
/// count share a rank and the next rank skips accordingly.
pub fn rank_standings(standings: &[Standing]) -> Vec<(usize, Standing)> {
    let mut sorted = standings.to_vec();
    sorted.sort_by(|a, b| {
        b.score
            .cmp(&a.score)
            .then(b.solved.cmp(&a.solved))
            .then(a.name.cmp(b.name))
    });
    let mut ranked: Vec<(usize, Standing)> = Vec::with_capacity(sorted.len());
    for (position, standing) in sorted.into_iter().enumerate() {
        let rank = match ranked.last() {
            Some((rank, previous))
                if previous.score == standing.score && previous.solved == standing.solved =>
            {
                *rank
            }
            _ => position + 1,
        };
        ranked.push((rank, standing));
    }
    ranked
}

#[component]
fn LeaderboardPage() -> Element {
    let theme = use_context::<Theme>();
    let auth = use_context::<Signal<AuthState>>();
    let me = auth().user_id;
    let ranked = rank_standings(&STANDINGS);

    rsx! {
        div { class: "leaderboard-page",
            h2 { class: "page-title", "리더보드" }
            table { class: "leaderboard-table",
                thead {
                    tr {
                        th { "순위" }
                        th { "참가자" }
                        th { "해결" }
                        th { "점수" }
                    }
                }
                tbody {
                    for (index, (rank, standing)) in ranked.into_iter().enumerate() {
                        tr {
                            key: "{standing.name}",
                            class: if me.as_deref() == Some(standing.name) { "leaderboard-me" } else { "" },
                            style: "background-color: {theme.row_background(index)};",
                            td { "{rank}" }
                            td { "{standing.name}" }
                            td { "{standing.solved}" }
                            td { "{standing.score}" }
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn MyPage() -> Element {
    let auth = use_context::<Signal<AuthState>>();
    let config = use_context::<RuntimeConfig>();
    let theme = use_context::<Theme>();
    let state = auth();

    rsx! {
        div { class: "my-page",
            h2 { class: "page-title", "내 정보" }
            if let Some(user_id) = state.user_id.as_deref() {
                p { class: "my-page-status", style: "color: {theme.success};", "로그인 상태: {user_id}" }
            } else {
                p { class: "my-page-status", style: "color: {theme.muted};",
                    "로그인하지 않았습니다. 채점 요청은 {config.user_id} 으로 전송됩니다."
                }
            }
            p { class: "my-page-mode", "채점 모드: {config.judge_mode}" }
            LoginPanel {}
        }
    }
}

#[component]
fn Footer() -> Element {
    rsx! {
        footer { class: "footer",
            a { href: AUTHOR_URL, "@happy coding" }
            p {}
            a { href: "mailto:{CONTACT_EMAIL}", "문의 : {CONTACT_EMAIL}" }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn menu_fragments_select_their_pages() {
        assert_eq!(Page::from_hash("#problem"), Page::Problems);
        assert_eq!(Page::from_hash("#score_me"), Page::ScoreMe);
        assert_eq!(Page::from_hash("#leaderboard"), Page::Leaderboard);
        assert_eq!(Page::from_hash("#Mypage"), Page::MyPage);
    }

    #[test]
    fn language_fragments_render_on_home() {
        assert_eq!(Page::from_hash("#cpp"), Page::Language(LanguageTrack::Cpp));
        assert_eq!(Page::from_hash("#CS"), Page::Language(LanguageTrack::CSharp));
        assert_eq!(Page::from_hash("#Js"), Page::Language(LanguageTrack::JavaScript));
        assert_eq!(LanguageTrack::CSharp.label(), "c#");
    }

    #[test]
    fn unknown_fragments_fall_back_to_home() {
        assert_eq!(Page::from_hash(""), Page::Home);
        assert_eq!(Page::from_hash("#"), Page::Home);
        assert_eq!(Page::from_hash("#mypage"), Page::Home);
        assert_eq!(Page::from_hash("#problems"), Page::Home);
    }

    #[test]
    fn fragments_without_hash_sign_are_accepted() {
        assert_eq!(Page::from_hash("leaderboard"), Page::Leaderboard);
    }

    #[test]
    fn ties_share_a_rank() {
        let ranked = rank_standings(&STANDINGS);
        let view: Vec<(usize, &str)> = ranked
            .iter()
            .map(|(rank, standing)| (*rank, standing.name))
            .collect();
        assert_eq!(
            view,
            vec![
                (1, "1102"),
                (1, "santa"),
                (3, "rudolph"),
                (4, "1101"),
                (5, "elf_kim"),
                (6, "snowman"),
            ]
        );
    }

    #[test]
    fn footer_links_point_at_author_and_contact() {
        assert_eq!(AUTHOR_URL, "https://github.com/lmwmason");
        assert_eq!(format!("mailto:{CONTACT_EMAIL}"), "mailto:lmwmason@naver.com");
    }

    #[test]
    fn empty_standings_rank_to_nothing() {
        assert!(rank_standings(&[]).is_empty());
    }
}
