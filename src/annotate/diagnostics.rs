use std::fmt;
use std::io::{self, Write};

/// Characters shown on each side of a highlighted mention
pub const EXCERPT_CONTEXT: usize = 18;

const EXCERPT_ELLIPSIS: &str = "... ";

/// What happened to one ingredient during annotation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// The token that was emitted, or would have been on a match
    pub token: String,
    /// Present only when the ingredient was found
    pub excerpt: Option<Excerpt>,
}

impl Diagnostic {
    pub fn matched(token: String, excerpt: Excerpt) -> Self {
        Self {
            token,
            excerpt: Some(excerpt),
        }
    }

    pub fn unmatched(token: String) -> Self {
        Self {
            token,
            excerpt: None,
        }
    }

    pub fn is_match(&self) -> bool {
        self.excerpt.is_some()
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let marker = if self.is_match() { "✅" } else { "❌" };
        write!(f, "{} {}", marker, self.token)?;
        if let Some(excerpt) = &self.excerpt {
            write!(f, "\n{excerpt}")?;
        }
        Ok(())
    }
}

/// A window of text around a mention, with the mention underlined
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Excerpt {
    pub text: String,
    /// Character offset of the mention inside `text`
    pub offset: usize,
    /// Length of the mention in characters
    pub width: usize,
}

impl Excerpt {
    /// Cut a window around `start..end` (byte offsets into `text`)
    ///
    /// The window is measured in characters so multi-byte text stays aligned
    /// with the caret line. Newlines inside the window are shown as spaces.
    pub fn around(text: &str, start: usize, end: usize) -> Self {
        let start_char = text[..start].chars().count();
        let width = text[start..end].chars().count();
        let first = start_char.saturating_sub(EXCERPT_CONTEXT);
        let take = (start_char - first) + width + EXCERPT_CONTEXT;

        let window = text
            .chars()
            .skip(first)
            .take(take)
            .map(|c| if c == '\n' || c == '\r' { ' ' } else { c })
            .collect();

        Excerpt {
            text: window,
            offset: start_char - first,
            width,
        }
    }
}

impl fmt::Display for Excerpt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}{} ...", EXCERPT_ELLIPSIS, self.text)?;
        write!(
            f,
            "{:indent$}{}",
            "",
            "^".repeat(self.width),
            indent = EXCERPT_ELLIPSIS.len() + self.offset
        )
    }
}

/// Write every diagnostic, each preceded by a blank line
pub fn report<W: Write>(diagnostics: &[Diagnostic], out: &mut W) -> io::Result<()> {
    for diagnostic in diagnostics {
        writeln!(out)?;
        writeln!(out, "{diagnostic}")?;
    }
    Ok(())
}
