use crate::common::Int;
use crate::parse::SyntaxError;
use crate::roll::DomainError;
use crate::stringify::Stringify;

/// Renders responses for Discord-flavoured Markdown.
#[derive(Debug, Default)]
pub struct MarkdownStringifier;

impl MarkdownStringifier {
    pub fn new() -> Self {
        Self
    }
}

impl Stringify for MarkdownStringifier {
    fn escape(&self, s: &str) -> String {
        escape(s)
    }

    fn str_input(&mut self, input: &str) -> String {
        format!("**Rolling**: {}", escape(input))
    }

    fn str_syntax_error(&mut self, err: &SyntaxError) -> String {
        format!("**Syntax Error**: {}", escape(&err.to_string()))
    }

    fn str_result(&mut self, label: &str, result: &Result<Int, DomainError>) -> String {
        match result {
            Ok(x) => format!("**{}**: {}", escape(label), x),
            Err(e) => format!("**{}**: **Error**: {}", escape(label), escape(&e.to_string())),
        }
    }
}

/// Makes arbitrary text display literally.
///
/// Control characters, format characters (soft hyphen, bidi and zero-width
/// marks, tags), line and paragraph separators, and private-use characters are
/// dropped, which also strips terminal escape sequences. Code points that are
/// merely unassigned are kept. Every ASCII punctuation character gets a
/// backslash; a backslash before anything else would itself be displayed.
pub fn escape(s: &str) -> String {
    let mut ret = String::with_capacity(s.len());
    for c in s.chars().filter(|&c| is_graphic(c)) {
        if c.is_ascii_punctuation() {
            ret.push('\\');
        }
        ret.push(c);
    }
    ret
}

// Covers the Cc, Cf, Co, Zl and Zp general categories.
fn is_graphic(c: char) -> bool {
    !c.is_control()
        && !matches!(
            c,
            '\u{AD}'
                | '\u{600}'..='\u{605}'
                | '\u{61C}'
                | '\u{6DD}'
                | '\u{70F}'
                | '\u{890}'..='\u{891}'
                | '\u{8E2}'
                | '\u{180E}'
                | '\u{200B}'..='\u{200F}'
                | '\u{2028}'..='\u{202E}'
                | '\u{2060}'..='\u{206F}'
                | '\u{E000}'..='\u{F8FF}'
                | '\u{FEFF}'
                | '\u{FFF9}'..='\u{FFFB}'
                | '\u{110BD}'
                | '\u{110CD}'
                | '\u{13430}'..='\u{1343F}'
                | '\u{1BCA0}'..='\u{1BCA3}'
                | '\u{1D173}'..='\u{1D17A}'
                | '\u{E0001}'..='\u{E007F}'
                | '\u{F0000}'..='\u{10FFFF}'
        )
}
