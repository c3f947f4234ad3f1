use std::io::IsTerminal;

/// Console styling capability. Carries no global state: construct one where
/// colored output is wanted and pass it down.
#[derive(Debug, Clone, Copy)]
pub struct Style {
    enabled: bool,
}

impl Style {
    pub const fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    /// Colors enabled only when stdout is a terminal.
    pub fn auto() -> Self {
        Self::new(std::io::stdout().is_terminal())
    }

    pub const fn plain() -> Self {
        Self::new(false)
    }

    fn paint(&self, code: &str, text: &str) -> String {
        if self.enabled {
            format!("\x1b[{code}m{text}\x1b[0m")
        } else {
            text.to_string()
        }
    }

    pub fn bold(&self, text: &str) -> String {
        self.paint("1", text)
    }

    pub fn red(&self, text: &str) -> String {
        self.paint("91", text)
    }

    pub fn green(&self, text: &str) -> String {
        self.paint("92", text)
    }

    pub fn yellow(&self, text: &str) -> String {
        self.paint("93", text)
    }

    pub fn blue(&self, text: &str) -> String {
        self.paint("94", text)
    }

    pub fn on_red(&self, text: &str) -> String {
        self.paint("41", text)
    }
}
