//! Static problem catalog and the badge/indicator rules used to present it.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProblemSummary {
    pub id: &'static str,
    pub title: &'static str,
    /// Tier label such as `LV.4`.
    pub difficulty: &'static str,
    pub score: u32,
    pub max_score: u32,
}

/// Acceptance rule applied by the simulated judge.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum JudgeRule {
    Contains(&'static str),
}

impl JudgeRule {
    pub fn accepts(&self, code: &str) -> bool {
        match self {
            Self::Contains(literal) => code.contains(literal),
        }
    }
}

impl Default for JudgeRule {
    fn default() -> Self {
        Self::Contains("Hello, World!")
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProblemConfig {
    pub summary: ProblemSummary,
    /// Markdown statement.
    pub statement: &'static str,
    /// JSON array of `{ "input", "output" }` shown in the test-case editor.
    pub sample_cases: &'static str,
    pub judge_rule: JudgeRule,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TierGroup {
    Bronze,
    Silver,
    Gold,
    Platinum,
    Diamond,
}

impl TierGroup {
    pub fn from_label(label: &str) -> Option<Self> {
        let tier = label.strip_prefix("LV.")?.parse::<u8>().ok()?;
        match tier {
            1..=3 => Some(Self::Bronze),
            4..=6 => Some(Self::Silver),
            7..=9 => Some(Self::Gold),
            10 => Some(Self::Platinum),
            11 => Some(Self::Diamond),
            _ => None,
        }
    }

    pub fn class(self) -> &'static str {
        match self {
            Self::Bronze => "difficulty-bronze",
            Self::Silver => "difficulty-silver",
            Self::Gold => "difficulty-gold",
            Self::Platinum => "difficulty-platinum",
            Self::Diamond => "difficulty-diamond",
        }
    }
}

/// Badge class for a tier label; empty for labels outside `LV.1`..`LV.11`.
pub fn difficulty_class(label: &str) -> &'static str {
    TierGroup::from_label(label).map(TierGroup::class).unwrap_or("")
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScoreIndicator {
    Green,
    Blue,
    Yellow,
    Red,
}

impl ScoreIndicator {
    pub fn for_score(score: u32, max_score: u32) -> Self {
        let scaled = u64::from(score) * 100;
        let max = u64::from(max_score);
        if scaled >= max * 80 {
            Self::Green
        } else if scaled >= max * 60 {
            Self::Blue
        } else if scaled >= max * 40 {
            Self::Yellow
        } else {
            Self::Red
        }
    }

    pub fn class(self) -> &'static str {
        match self {
            Self::Green => "indicator-green",
            Self::Blue => "indicator-blue",
            Self::Yellow => "indicator-yellow",
            Self::Red => "indicator-red",
        }
    }
}

impl ProblemSummary {
    pub fn indicator(&self) -> ScoreIndicator {
        ScoreIndicator::for_score(self.score, self.max_score)
    }

    /// Filled share of the score bar, 0..=100.
    pub fn percent(&self) -> f64 {
        if self.max_score == 0 {
            return 0.0;
        }
        (f64::from(self.score) / f64::from(self.max_score) * 100.0).clamp(0.0, 100.0)
    }
}

pub fn all_problems() -> &'static [ProblemConfig] {
    PROBLEMS
}

pub fn find_problem(id: &str) -> Option<&'static ProblemConfig> {
    PROBLEMS.iter().find(|problem| problem.summary.id == id)
}

const PROBLEMS: &[ProblemConfig] = &[
    ProblemConfig {
        summary: ProblemSummary {
            id: "0001",
            title: "Hello,
            World!",
            difficulty: "LV.1",
            score: 40,
            max_score: 40,
        },
        statement: r#"# Hello, World!
`Hello, World!`를 출력하는 프로그램을 작성하시오.

## 입력
없음.

## 출력
첫째 줄에 `Hello, World!`를 출력한다.
"#,
        sample_cases: r#"[
    { "input": "", "output": "Hello, World!" }
]"#,
        judge_rule: JudgeRule::Contains("Hello, World!"),
    },
    ProblemConfig {
        summary: ProblemSummary {
            id: "0002",
            title: "A + B",
            difficulty: "LV.2",
            score: 50,
            max_score: 60,
        },
        statement: r#"# A + B
두 정수 A와 B를 입력받아, A+B를 출력하는 프로그램을 작성하시오.

## 입력
첫째 줄에 A와 B가 공백으로 구분되어 주어진다.
- $0 < A, B < 10000$

## 출력
첫째 줄에 A+B를 출력한다.

---

### 예제 입력
```
1 2
```

### 예제 출력
```
3
```
"#,
        sample_cases: r#"[
    { "input": "1 2", "output": "3" },
    { "input": "10 20", "output": "30" }
]"#,
        judge_rule: JudgeRule::Contains("+"),
    },
    ProblemConfig {
        summary: ProblemSummary {
            id: "0003",
            title: "A - B",
            difficulty: "LV.3",
            score: 70,
            max_score: 80,
        },
        statement: r#"# A - B
두 정수 A와 B를 입력받아, A-B를 출력하는 프로그램을 작성하시오.

## 입력
첫째 줄에 A와 B가 공백으로 구분되어 주어진다.

## 출력
첫째 줄에 A-B를 출력한다.
"#,
        sample_cases: r#"[
    { "input": "3 2", "output": "1" }
]"#,
        judge_rule: JudgeRule::Contains("-"),
    },
    ProblemConfig {
        summary: ProblemSummary {
            id: "0004",
            title: "구구단",
            difficulty: "LV.4",
            score: 50,
            max_score: 100,
        },
        statement: r#"# 구구단
N을 입력받아 N단을 `N * i = 결과` 형식으로 출력하시오. (1 ≤ i ≤ 9)

## 입력
첫째 줄에 N이 주어진다. (1 ≤ N ≤ 9)
"#,
        sample_cases: r#"[
    { "input": "2", "output": "2 * 1 = 2\n2 * 2 = 4\n2 * 3 = 6\n2 * 4 = 8\n2 * 5 = 10\n2 * 6 = 12\n2 * 7 = 14\n2 * 8 = 16\n2 * 9 = 18" }
]"#,
        judge_rule: JudgeRule::Contains("for"),
    },
    ProblemConfig {
        summary: ProblemSummary {
            id: "0005",
            title: "트리 찍기",
            difficulty: "LV.5",
            score: 70,
            max_score: 120,
        },
        statement: r#"# 트리 찍기
높이 N인 크리스마스 트리를 `*`로 출력하시오. i번째 줄에는 공백 N-i개와 별 2i-1개가 있다.
"#,
        sample_cases: r#"[
    { "input": "2", "output": " *\n***" }
]"#,
        judge_rule: JudgeRule::Contains("*"),
    },
    ProblemConfig {
        summary: ProblemSummary {
            id: "0006",
            title: "최댓값",
            difficulty: "LV.6",
            score: 40,
            max_score: 140,
        },
        statement: r#"# 최댓값
N개의 정수 중 최댓값을 출력하시오.

## 입력
첫째 줄에 N, 둘째 줄에 N개의 정수가 주어진다.
"#,
        sample_cases: r#"[
    { "input": "3\n1 9 4", "output": "9" }
]"#,
        judge_rule: JudgeRule::Contains("max"),
    },
    ProblemConfig {
        summary: ProblemSummary {
            id: "0007",
            title: "팩토리얼",
            difficulty: "LV.7",
            score: 0,
            max_score: 160,
        },
        statement: r#"# 팩토리얼
0 이상의 정수 N이 주어질 때 N!을 출력하시오. (0 ≤ N ≤ 12)
"#,
        sample_cases: r#"[
    { "input": "5", "output": "120" },
    { "input": "0", "output": "1" }
]"#,
        judge_rule: JudgeRule::Contains("*"),
    },
    ProblemConfig {
        summary: ProblemSummary {
            id: "0008",
            title: "피보나치 수",
            difficulty: "LV.8",
            score: 50,
            max_score: 180,
        },
        statement: r#"# 피보나치 수
F(0) = 0, F(1) = 1, F(n) = F(n-1) + F(n-2)일 때 F(N)을 출력하시오. (0 ≤ N ≤ 45)
"#,
        sample_cases: r#"[
    { "input": "10", "output": "55" }
]"#,
        judge_rule: JudgeRule::Contains("+"),
    },
    ProblemConfig {
        summary: ProblemSummary {
            id: "0009",
            title: "소수 찾기",
            difficulty: "LV.9",
            score: 70,
            max_score: 200,
        },
        statement: r#"# 소수 찾기
주어진 N개의 수 중 소수가 몇 개인지 출력하시오.
"#,
        sample_cases: r#"[
    { "input": "4\n1 3 5 7", "output": "3" }
]"#,
        judge_rule: JudgeRule::Contains("%"),
    },
    ProblemConfig {
        summary: ProblemSummary {
            id: "0010",
            title: "괄호 검사",
            difficulty: "LV.10",
            score: 40,
            max_score: 220,
        },
        statement: r#"# 괄호 검사
괄호 문자열이 올바르면 `YES`, 아니면 `NO`를 출력하시오.
"#,
        sample_cases: r#"[
    { "input": "(())()", "output": "YES" },
    { "input": "(()", "output": "NO" }
]"#,
        judge_rule: JudgeRule::Contains("YES"),
    },
    ProblemConfig {
        summary: ProblemSummary {
            id: "0011",
            title: "산타의 선물 배달",
            difficulty: "LV.11",
            score: 30,
            max_score: 240,
        },
        statement: r#"# 산타의 선물 배달
N개의 집과 집 사이 거리가 주어질 때, 산타가 모든 집을 한 번씩 방문하고 돌아오는 최단 거리를 출력하시오. (N ≤ 10)
"#,
        sample_cases: r#"[
    { "input": "2\n0 5\n5 0", "output": "10" }
]"#,
        judge_rule: JudgeRule::Contains("min"),
    },
];

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn every_tier_maps_to_its_group() {
        let expected = [
            ("LV.1", "difficulty-bronze"),
            ("LV.2", "difficulty-bronze"),
            ("LV.3", "difficulty-bronze"),
            ("LV.4", "difficulty-silver"),
            ("LV.5", "difficulty-silver"),
            ("LV.6", "difficulty-silver"),
            ("LV.7", "difficulty-gold"),
            ("LV.8", "difficulty-gold"),
            ("LV.9", "difficulty-gold"),
            ("LV.10", "difficulty-platinum"),
            ("LV.11", "difficulty-diamond"),
        ];
        for (label, class) in expected {
            assert_eq!(difficulty_class(label), class, "{label}");
        }
    }

    #[test]
    fn unknown_tiers_have_no_badge() {
        for label in ["", "LV.0", "LV.12", "lv.1", "LV.x", "Gold"] {
            assert_eq!(difficulty_class(label), "", "{label}");
        }
    }

    #[test]
    fn indicator_thresholds() {
        assert_eq!(ScoreIndicator::for_score(80, 100), ScoreIndicator::Green);
        assert_eq!(ScoreIndicator::for_score(79, 100), ScoreIndicator::Blue);
        assert_eq!(ScoreIndicator::for_score(60, 100), ScoreIndicator::Blue);
        assert_eq!(ScoreIndicator::for_score(59, 100), ScoreIndicator::Yellow);
        assert_eq!(ScoreIndicator::for_score(40, 100), ScoreIndicator::Yellow);
        assert_eq!(ScoreIndicator::for_score(39, 100), ScoreIndicator::Red);
        assert_eq!(ScoreIndicator::for_score(0, 160), ScoreIndicator::Red);
        assert_eq!(ScoreIndicator::for_score(50, 60), ScoreIndicator::Green);
    }

    #[test]
    fn catalog_ids_are_unique_and_findable() {
        let problems = all_problems();
        assert_eq!(problems.len(), 11);
        for problem in problems {
            assert_eq!(find_problem(problem.summary.id), Some(problem));
            assert!(!problem.summary.title.is_empty());
        }
        assert!(find_problem("9999").is_none());
    }

    #[test]
    fn sample_cases_are_valid_json() {
        for problem in all_problems() {
            let parsed: serde_json::Value = serde_json::from_str(problem.sample_cases).unwrap();
            assert!(parsed.is_array(), "{}", problem.summary.id);
        }
    }

    #[test]
    fn default_rule_requires_hello_world() {
        assert!(JudgeRule::default().accepts("print(\"Hello, World!\")"));
        assert!(!JudgeRule::default().accepts("print(\"hello world\")"));
    }

    #[test]
    fn percent_is_clamped() {
        let summary = ProblemSummary {
            id: "x",
            title: "x",
            difficulty: "LV.1",
            score: 30,
            max_score: 240,
        };
        assert_eq!(summary.percent(), 12.5);
        let empty = ProblemSummary { max_score: 0, ..summary };
        assert_eq!(empty.percent(), 0.0);
    }
}
