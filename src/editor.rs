//! Text operations behind the code editor: keyword completion, bracket
//! pairing and indentation.
//!
//! Positions are `char` indices into the editor text. The DOM reports UTF-16
//! offsets; convert with [`utf16_to_char`] / [`char_to_utf16`] at the edge.

use serde::{Deserialize, Serialize};

pub const INDENT: &str = "    ";
pub const CURSOR_MARKER: &str = "$0";

const PAIRS: &[(char, char)] = &[('(', ')'), ('[', ']'), ('{', '}'), ('"', '"'), ('\'', '\'')];

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Cpp,
    Python,
    Java,
}

impl Language {
    pub const ALL: [Language; 3] = [Language::Cpp, Language::Python, Language::Java];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Cpp => "cpp",
            Self::Python => "python",
            Self::Java => "java",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|language| language.as_str() == value)
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Cpp => "C++",
            Self::Python => "Python",
            Self::Java => "Java",
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            Self::Cpp => "cpp",
            Self::Python => "py",
            Self::Java => "java",
        }
    }

    pub fn file_name(self) -> String {
        format!("main.{}", self.extension())
    }

    pub fn keywords(self) -> &'static [Keyword] {
        match self {
            Self::Cpp => CPP_KEYWORDS,
            Self::Python => PYTHON_KEYWORDS,
            Self::Java => JAVA_KEYWORDS,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Keyword {
    pub word: &'static str,
    /// Inserted in place of the typed token; `$0` marks the resulting cursor.
    pub snippet: &'static str,
}

const fn kw(word: &'static str, snippet: &'static str) -> Keyword {
    Keyword { word, snippet }
}

const CPP_KEYWORDS: &[Keyword] = &[
    kw("#include", "#include <$0>"),
    kw("int", "int $0"),
    kw("main", "int main() {\n    $0\n    return 0;\n}"),
    kw("for", "for (int i = 0; i < $0; i++) {\n    \n}"),
    kw("while", "while ($0) {\n    \n}"),
    kw("if", "if ($0) {\n    \n}"),
    kw("else", "else {\n    $0\n}"),
    kw("return", "return $0;"),
    kw("cout", "cout << $0 << endl;"),
    kw("cin", "cin >> $0;"),
    kw("vector", "vector<$0> "),
    kw("string", "string $0"),
    kw("struct", "struct $0 {\n    \n};"),
    kw("using", "using namespace std;\n$0"),
];

const PYTHON_KEYWORDS: &[Keyword] = &[
    kw("def", "def $0():\n    pass"),
    kw("class", "class $0:\n    pass"),
    kw("if", "if $0:\n    "),
    kw("elif", "elif $0:\n    "),
    kw("else", "else:\n    $0"),
    kw("for", "for i in range($0):\n    "),
    kw("while", "while $0:\n    "),
    kw("return", "return $0"),
    kw("import", "import $0"),
    kw("from", "from $0 import "),
    kw("print", "print($0)"),
    kw("input", "input()$0"),
    kw("range", "range($0)"),
    kw("len", "len($0)"),
    kw("map", "map(int, input().split())$0"),
];

const JAVA_KEYWORDS: &[Keyword] = &[
    kw("public", "public $0"),
    kw("class", "class $0 {\n    \n}"),
    kw("main", "public static void main(String[] args) {\n    $0\n}"),
    kw("static", "static $0"),
    kw("System.out.println", "System.out.println($0);"),
    kw("Scanner", "Scanner sc = new Scanner(System.in);$0"),
    kw("import", "import $0;"),
    kw("for", "for (int i = 0; i < $0; i++) {\n    \n}"),
    kw("while", "while ($0) {\n    \n}"),
    kw("if", "if ($0) {\n    \n}"),
    kw("else", "else {\n    $0\n}"),
    kw("return", "return $0;"),
    kw("String", "String $0"),
    kw("int", "int $0"),
];

/// Result of an editing operation: the whole new text and the cursor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Edit {
    pub text: String,
    pub cursor: usize,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Selection {
    pub start: usize,
    pub end: usize,
}

impl Selection {
    pub fn caret(at: usize) -> Self {
        Self { start: at, end: at }
    }

    pub fn is_collapsed(&self) -> bool {
        self.start == self.end
    }
}

/// Completion popup state, recomputed on every input.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Autocomplete {
    /// Start of the token being completed.
    pub anchor: usize,
    pub cursor: usize,
    pub token: String,
    pub candidates: Vec<Keyword>,
    pub highlighted: usize,
}

impl Autocomplete {
    pub fn compute(language: Language, text: &str, cursor: usize) -> Self {
        let (anchor, token) = token_before(text, cursor);
        let candidates = suggestions(language, &token);
        Self {
            anchor,
            cursor,
            token,
            candidates,
            highlighted: 0,
        }
    }

    pub fn visible(&self) -> bool {
        !self.token.is_empty() && !self.candidates.is_empty()
    }

    pub fn select_next(&mut self) {
        if !self.candidates.is_empty() {
            self.highlighted = (self.highlighted + 1) % self.candidates.len();
        }
    }

    pub fn select_previous(&mut self) {
        if !self.candidates.is_empty() {
            self.highlighted = self
                .highlighted
                .checked_sub(1)
                .unwrap_or(self.candidates.len() - 1);
        }
    }

    pub fn accept(&self, text: &str) -> Option<Edit> {
        self.accept_index(self.highlighted, text)
    }

    pub fn accept_index(&self, index: usize, text: &str) -> Option<Edit> {
        if !self.visible() {
            return None;
        }
        let keyword = self.candidates.get(index)?;
        Some(insert_snippet(text, self.anchor, self.cursor, keyword.snippet))
    }
}

/// Keys the editor reacts to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EditorKey<'a> {
    Enter,
    Tab,
    Backspace,
    ArrowUp,
    ArrowDown,
    Escape,
    Character(&'a str),
    Other,
}

/// What a key press does to the editor. Every variant except `Ignore`
/// suppresses the browser's default handling.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum KeyAction {
    /// A completion was inserted; the popup closes.
    Accept(Edit),
    /// Text changed; the popup is recomputed at the new cursor.
    Edit(Edit),
    SelectNext,
    SelectPrevious,
    Dismiss,
    Ignore,
}

/// Popup navigation wins while it is visible, then Tab indents, Backspace
/// removes an empty pair and typed brackets or quotes are paired.
pub fn key_action(
    key: EditorKey<'_>,
    text: &str,
    selection: Selection,
    popup: &Autocomplete,
) -> KeyAction {
    let edit = match key {
        EditorKey::Enter | EditorKey::Tab if popup.visible() => {
            return popup.accept(text).map_or(KeyAction::Ignore, KeyAction::Accept);
        }
        EditorKey::ArrowDown if popup.visible() => return KeyAction::SelectNext,
        EditorKey::ArrowUp if popup.visible() => return KeyAction::SelectPrevious,
        EditorKey::Escape if popup.visible() => return KeyAction::Dismiss,
        EditorKey::Tab => Some(indent(text, selection)),
        EditorKey::Backspace if selection.is_collapsed() => delete_pair(text, selection.start),
        EditorKey::Character(typed) if selection.is_collapsed() => {
            single_char(typed).and_then(|ch| {
                skip_closer(text, selection.start, ch)
                    .or_else(|| auto_pair(text, selection.start, ch))
            })
        }
        _ => None,
    };
    edit.map_or(KeyAction::Ignore, KeyAction::Edit)
}

fn single_char(typed: &str) -> Option<char> {
    let mut chars = typed.chars();
    match (chars.next(), chars.next()) {
        (Some(ch), None) => Some(ch),
        _ => None,
    }
}

fn is_boundary(ch: char) -> bool {
    ch.is_whitespace() || matches!(ch, '(' | ')' | '[' | ']' | '{' | '}' | '<' | '>')
}

/// The partial word ending at `cursor` and the index where it starts.
pub fn token_before(text: &str, cursor: usize) -> (usize, String) {
    let chars: Vec<char> = text.chars().collect();
    let cursor = cursor.min(chars.len());
    let start = chars[..cursor]
        .iter()
        .rposition(|ch| is_boundary(*ch))
        .map_or(0, |index| index + 1);
    (start, chars[start..cursor].iter().collect())
}

/// Keywords whose word starts with `token`, ignoring case. An empty token
/// never matches.
pub fn suggestions(language: Language, token: &str) -> Vec<Keyword> {
    if token.is_empty() {
        return Vec::new();
    }
    let needle = token.to_lowercase();
    language
        .keywords()
        .iter()
        .filter(|keyword| keyword.word.to_lowercase().starts_with(&needle))
        .copied()
        .collect()
}

/// Replaces `from..to` with `snippet`, placing the cursor at its `$0` marker
/// or after the snippet when there is none.
pub fn insert_snippet(text: &str, from: usize, to: usize, snippet: &str) -> Edit {
    let (body, offset) = match snippet.find(CURSOR_MARKER) {
        Some(byte) => {
            let body = format!("{}{}", &snippet[..byte], &snippet[byte + CURSOR_MARKER.len()..]);
            (body, snippet[..byte].chars().count())
        }
        None => (snippet.to_string(), snippet.chars().count()),
    };
    Edit {
        text: splice(text, from, to, &body),
        cursor: from.min(to) + offset,
    }
}

/// Inserts the closing partner after an opening bracket or quote.
pub fn auto_pair(text: &str, cursor: usize, typed: char) -> Option<Edit> {
    let (open, close) = PAIRS.iter().copied().find(|(open, _)| *open == typed)?;
    let mut pair = String::with_capacity(2);
    pair.push(open);
    pair.push(close);
    Some(Edit {
        text: splice(text, cursor, cursor, &pair),
        cursor: cursor + 1,
    })
}

/// Typing a closer right before the same closer moves past it.
pub fn skip_closer(text: &str, cursor: usize, typed: char) -> Option<Edit> {
    if !PAIRS.iter().any(|(_, close)| *close == typed) {
        return None;
    }
    (text.chars().nth(cursor) == Some(typed)).then(|| Edit {
        text: text.to_string(),
        cursor: cursor + 1,
    })
}

/// Backspace between an empty pair removes both halves.
pub fn delete_pair(text: &str, cursor: usize) -> Option<Edit> {
    let before = cursor.checked_sub(1).and_then(|index| text.chars().nth(index))?;
    let after = text.chars().nth(cursor)?;
    PAIRS
        .iter()
        .any(|pair| *pair == (before, after))
        .then(|| Edit {
            text: splice(text, cursor - 1, cursor + 1, ""),
            cursor: cursor - 1,
        })
}

pub fn indent(text: &str, selection: Selection) -> Edit {
    let start = selection.start.min(selection.end);
    Edit {
        text: splice(text, start, selection.start.max(selection.end), INDENT),
        cursor: start + INDENT.chars().count(),
    }
}

fn splice(text: &str, from: usize, to: usize, replacement: &str) -> String {
    let from = byte_index(text, from);
    let to = byte_index(text, to).max(from);
    let mut out = String::with_capacity(text.len() + replacement.len());
    out.push_str(&text[..from]);
    out.push_str(replacement);
    out.push_str(&text[to..]);
    out
}

fn byte_index(text: &str, char_index: usize) -> usize {
    text.char_indices()
        .nth(char_index)
        .map_or(text.len(), |(byte, _)| byte)
}

pub fn utf16_to_char(text: &str, utf16_offset: usize) -> usize {
    let mut units = 0;
    for (index, ch) in text.chars().enumerate() {
        if units >= utf16_offset {
            return index;
        }
        units += ch.len_utf16();
    }
    text.chars().count()
}

pub fn char_to_utf16(text: &str, char_index: usize) -> usize {
    text.chars().take(char_index).map(char::len_utf16).sum()
}
