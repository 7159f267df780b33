//! Colors and the few inline styles that depend on state. Static layout
//! lives in `assets/main.css`.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Theme {
    pub success: &'static str,
    pub failure: &'static str,
    pub primary: &'static str,
    pub test: &'static str,
    pub disabled: &'static str,
    pub muted: &'static str,
    pub surface: &'static str,
    pub surface_alt: &'static str,
    pub border: &'static str,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            success: "#28a745",
            failure: "#dc3545",
            primary: "#007bff",
            test: "#28a745",
            disabled: "#ccc",
            muted: "#888",
            surface: "#f9f9f9",
            surface_alt: "white",
            border: "#eee",
        }
    }
}

impl Theme {
    pub fn verdict_color(&self, passed: bool) -> &'static str {
        if passed {
            self.success
        } else {
            self.failure
        }
    }

    /// Inline style of a test/submit button; greyed out while busy.
    pub fn action_button(&self, color: &str, busy: bool) -> String {
        let (background, cursor) = if busy {
            (self.disabled, "not-allowed")
        } else {
            (color, "pointer")
        };
        format!("background-color: {background}; cursor: {cursor};")
    }

    pub fn row_background(&self, index: usize) -> &'static str {
        if index % 2 == 0 {
            self.surface
        } else {
            self.surface_alt
        }
    }
}
