#![forbid(unsafe_code)]

//! Glyph capability policy (Unicode vs ASCII).
//!
//! Handle shells use this to decide whether the gripper can be drawn with
//! Unicode bar glyphs or must fall back to ASCII. Decisions are
//! deterministic given the environment lookup.

/// Environment variable to override glyph mode (`unicode` or `ascii`).
const ENV_GLYPH_MODE: &str = "SIZER_GLYPH_MODE";

/// Overall glyph rendering mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GlyphMode {
    /// Use Unicode glyphs (bars, dotted grips).
    #[default]
    Unicode,
    /// Use ASCII-only fallbacks.
    Ascii,
}

impl GlyphMode {
    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "unicode" | "uni" | "u" => Some(Self::Unicode),
            "ascii" | "ansi" | "a" => Some(Self::Ascii),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Unicode => "unicode",
            Self::Ascii => "ascii",
        }
    }

    /// Detect the mode from the process environment.
    #[must_use]
    pub fn detect() -> Self {
        Self::from_env_with(|key| std::env::var(key).ok())
    }

    /// Detect the mode using a custom environment lookup (for tests).
    ///
    /// An explicit `SIZER_GLYPH_MODE` wins; otherwise terminals known to lack
    /// Unicode line drawing (`dumb`, `linux`, `vt100`) get ASCII.
    #[must_use]
    pub fn from_env_with<F>(get_env: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = get_env(ENV_GLYPH_MODE)
            && let Some(parsed) = Self::parse(&value)
        {
            return parsed;
        }

        let term = get_env("TERM").unwrap_or_default().to_ascii_lowercase();
        if is_limited_terminal(&term) {
            Self::Ascii
        } else {
            Self::Unicode
        }
    }
}

fn is_limited_terminal(term: &str) -> bool {
    term == "dumb" || term == "linux" || term.starts_with("vt100") || term.starts_with("vt52")
}
