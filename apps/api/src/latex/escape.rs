//! Minimal LaTeX escaping for resume text.
//!
//! Only the fixed reserved set is handled: `% $ & # _ { } ~ ^ \`. Each reserved
//! character gets a single `\` prefix and line breaks become `\\`. Brackets and
//! anything that only misbehaves inside specific macros pass through untouched.

/// Characters with special meaning in LaTeX body text.
pub const RESERVED: [char; 10] = ['\\', '%', '$', '&', '#', '_', '{', '}', '~', '^'];

/// Explicit LaTeX line break emitted for every source line break.
pub const LINE_BREAK: &str = "\\\\";

/// Escapes `text` for insertion into a LaTeX document body.
///
/// Runs as one pass over the input, so markers produced for earlier characters
/// are never escaped again. `\r\n` counts as a single line break.
pub fn escape_latex(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }

    let mut out = String::with_capacity(text.len() + text.len() / 8);
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '\r' => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
                out.push_str(LINE_BREAK);
            }
            '\n' => out.push_str(LINE_BREAK),
            c if RESERVED.contains(&c) => {
                out.push('\\');
                out.push(c);
            }
            c => out.push(c),
        }
    }

    out
}
