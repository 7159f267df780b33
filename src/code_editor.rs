use dioxus::prelude::*;
#[cfg(target_arch = "wasm32")]
use dioxus::web::WebEventExt;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsCast;
use web_sys::HtmlTextAreaElement;

use crate::editor::{self, Autocomplete, Edit, EditorKey, KeyAction, Language, Selection};

#[component]
pub fn CodeEditor(code: Signal<String>, language: Language) -> Element {
    let mut code = code;
    let mut autocomplete = use_signal(Autocomplete::default);
    #[cfg_attr(not(target_arch = "wasm32"), allow(unused_mut))]
    let mut textarea = use_signal(|| None::<HtmlTextAreaElement>);

    let popup = autocomplete();

    rsx! {
        div { class: "code-editor",
            textarea {
                class: "code-editor-input",
                value: "{code}",
                spellcheck: "false",
                autocomplete: "off",
                placeholder: "여기에 코드를 작성하세요...",
                onmounted: move |_event| {
                    #[cfg(target_arch = "wasm32")]
                    {
                        let element = _event.data.as_ref().as_web_event();
                        if let Ok(node) = element.dyn_into::<HtmlTextAreaElement>() {
                            textarea.set(Some(node));
                        }
                    }
                },
                oninput: move |event| {
                    let value = event.value();
                    let element = textarea.peek().as_ref().cloned();
                    let cursor = read_selection(element.as_ref(), &value).end;
                    autocomplete.set(Autocomplete::compute(language, &value, cursor));
                    code.set(value);
                },
                onblur: move |_| autocomplete.set(Autocomplete::default()),
                onkeydown: move |event| {
                    let modifiers = event.modifiers();
                    if modifiers.ctrl() || modifiers.meta() || modifiers.alt() {
                        return;
                    }
                    let text = code();
                    let element = textarea.peek().as_ref().cloned();
                    let selection = read_selection(element.as_ref(), &text);
                    let key = event.key();
                    let action = editor::key_action(editor_key(&key), &text, selection, &autocomplete.peek());
                    if action != KeyAction::Ignore {
                        event.prevent_default();
                    }
                    match action {
                        KeyAction::Accept(edit) => {
                            commit(edit, element.as_ref(), code, autocomplete, None);
                        }
                        KeyAction::Edit(edit) => {
                            commit(edit, element.as_ref(), code, autocomplete, Some(language));
                        }
                        KeyAction::SelectNext => autocomplete.with_mut(|state| state.select_next()),
                        KeyAction::SelectPrevious => autocomplete.with_mut(|state| state.select_previous()),
                        KeyAction::Dismiss => autocomplete.set(Autocomplete::default()),
                        KeyAction::Ignore => {}
                    }
                },
            }
            if popup.visible() {
                ul { class: "autocomplete-list", role: "listbox",
                    for (index, keyword) in popup.candidates.iter().enumerate() {
                        li {
                            key: "{keyword.word}",
                            role: "option",
                            class: if index == popup.highlighted { "autocomplete-item active" } else { "autocomplete-item" },
                            onmousedown: move |event| {
                                event.prevent_default();
                                let text = code();
                                let element = textarea.peek().as_ref().cloned();
                                let accepted = autocomplete.peek().accept_index(index, &text);
                                if let Some(edit) = accepted {
                                    commit(edit, element.as_ref(), code, autocomplete, None);
                                }
                            },
                            "{keyword.word}"
                        }
                    }
                }
            }
        }
    }
}

fn editor_key(key: &Key) -> EditorKey<'_> {
    match key {
        Key::Enter => EditorKey::Enter,
        Key::Tab => EditorKey::Tab,
        Key::Backspace => EditorKey::Backspace,
        Key::ArrowUp => EditorKey::ArrowUp,
        Key::ArrowDown => EditorKey::ArrowDown,
        Key::Escape => EditorKey::Escape,
        Key::Character(typed) => EditorKey::Character(typed),
        _ => EditorKey::Other,
    }
}

/// Writes `edit` to the textarea and signals. With a language the popup is
/// recomputed at the new cursor, otherwise it closes.
fn commit(
    edit: Edit,
    element: Option<&HtmlTextAreaElement>,
    mut code: Signal<String>,
    mut autocomplete: Signal<Autocomplete>,
    recompute_for: Option<Language>,
) {
    write_selection(element, &edit);
    let popup = recompute_for
        .map(|language| Autocomplete::compute(language, &edit.text, edit.cursor))
        .unwrap_or_default();
    autocomplete.set(popup);
    code.set(edit.text);
}

/// Selection in `char` indices; the end of the text when the DOM node is not
/// available.
fn read_selection(element: Option<&HtmlTextAreaElement>, text: &str) -> Selection {
    #[cfg(target_arch = "wasm32")]
    {
        if let Some(element) = element {
            let start = element.selection_start().ok().flatten();
            let end = element.selection_end().ok().flatten();
            if let (Some(start), Some(end)) = (start, end) {
                return Selection {
                    start: editor::utf16_to_char(text, start as usize),
                    end: editor::utf16_to_char(text, end as usize),
                };
            }
        }
    }
    #[cfg(not(target_arch = "wasm32"))]
    let _ = element;
    Selection::caret(text.chars().count())
}

fn write_selection(element: Option<&HtmlTextAreaElement>, edit: &Edit) {
    #[cfg(target_arch = "wasm32")]
    {
        if let Some(element) = element {
            element.set_value(&edit.text);
            let offset = editor::char_to_utf16(&edit.text, edit.cursor) as u32;
            let _ = element.set_selection_range(offset, offset);
        }
    }
    #[cfg(not(target_arch = "wasm32"))]
    let _ = (element, edit);
}
