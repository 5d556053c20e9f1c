//! Styled console output for the binary.

use std::io::IsTerminal;

// ANSI color codes
const RED: &str = "\x1b[31m";
const YELLOW: &str = "\x1b[33m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";
const RESET: &str = "\x1b[0m";

/// Check if color output is enabled.
///
/// Respects NO_COLOR (https://no-color.org/) and disables color when
/// stderr is not a terminal.
pub fn color_enabled() -> bool {
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }
    std::io::stderr().is_terminal()
}

/// Colored string builder.
pub struct Styled {
    use_color: bool,
}

impl Styled {
    pub fn new() -> Self {
        Self {
            use_color: color_enabled(),
        }
    }

    /// Green checkmark symbol.
    pub fn ok_sym(&self) -> &str {
        if self.use_color {
            "\x1b[32m\u{2713}\x1b[0m"
        } else {
            "OK"
        }
    }

    /// Red X symbol.
    pub fn fail_sym(&self) -> &str {
        if self.use_color {
            "\x1b[31m\u{2717}\x1b[0m"
        } else {
            "!!"
        }
    }

    pub fn bold(&self, s: &str) -> String {
        self.wrap(BOLD, s)
    }

    pub fn dim(&self, s: &str) -> String {
        self.wrap(DIM, s)
    }

    pub fn red(&self, s: &str) -> String {
        self.wrap(RED, s)
    }

    pub fn yellow(&self, s: &str) -> String {
        self.wrap(YELLOW, s)
    }

    fn wrap(&self, code: &str, s: &str) -> String {
        if self.use_color {
            format!("{code}{s}{RESET}")
        } else {
            s.to_string()
        }
    }
}

impl Default for Styled {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_wrap_is_identity() {
        let s = Styled { use_color: false };
        assert_eq!(s.bold("hello"), "hello");
        assert_eq!(s.red("hello"), "hello");
        assert_eq!(s.ok_sym(), "OK");
        assert_eq!(s.fail_sym(), "!!");
    }

    #[test]
    fn test_colored_wrap_resets() {
        let s = Styled { use_color: true };
        assert_eq!(s.yellow("hi"), "\x1b[33mhi\x1b[0m");
        assert_eq!(s.dim("hi"), "\x1b[2mhi\x1b[0m");
    }
}
