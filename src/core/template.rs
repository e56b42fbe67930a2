//! Rewriting of template directives into plain function calls.
//!
//! Templates reference translations through directives such as
//! `@lang('default.title')` or `@choice('default.items', $n)`. The compiler
//! turns them into `trans(...)` / `trans_choice(...)` so the call extractor
//! sees the same shape in templates as in code. Line breaks are preserved,
//! so line numbers of the compiled text match the raw file.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;

/// Raw file content → content the lexer can scan.
pub trait TemplateCompiler {
    fn compile(&self, raw: &str) -> String;
}

/// Built-in directive → function rewrites.
pub const DEFAULT_DIRECTIVES: &[(&str, &str)] = &[("lang", "trans"), ("choice", "trans_choice")];

// `@name` not preceded by a word character. A second `@` marks an escaped directive.
static DIRECTIVE_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\B@(@?\w+)").unwrap());

// `{{-- comment --}}`
static COMMENT_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)\{\{--.*?--\}\}").unwrap());

/// Compiler for `@directive(...)` templates.
#[derive(Debug, Clone)]
pub struct DirectiveCompiler {
    directives: HashMap<String, String>,
}

impl DirectiveCompiler {
    pub fn new<I, K, V>(directives: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            directives: directives
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    fn rewrite_directives(&self, text: &str) -> String {
        let mut out = String::with_capacity(text.len());
        let mut last = 0;

        for caps in DIRECTIVE_REGEX.captures_iter(text) {
            let (Some(whole), Some(name)) = (caps.get(0), caps.get(1)) else {
                continue;
            };
            if whole.start() < last {
                continue;
            }

            // `@@lang` prints `@lang` literally
            if let Some(escaped) = name.as_str().strip_prefix('@') {
                out.push_str(&text[last..whole.start()]);
                out.push('@');
                out.push_str(escaped);
                last = whole.end();
                continue;
            }

            let Some(function) = self.directives.get(name.as_str()) else {
                continue;
            };

            let after_name = whole.end();
            let rest = &text[after_name..];
            let args_start = after_name + (rest.len() - rest.trim_start_matches([' ', '\t']).len());

            let (arguments, end) = if text[args_start..].starts_with('(') {
                match balanced_group_end(text, args_start) {
                    Some(end) => (&text[args_start..end], end),
                    // unbalanced argument list: leave the directive untouched
                    None => continue,
                }
            } else {
                ("()", after_name)
            };

            out.push_str(&text[last..whole.start()]);
            out.push_str(function);
            out.push_str(arguments);
            last = end;
        }

        out.push_str(&text[last..]);
        out
    }
}

impl Default for DirectiveCompiler {
    fn default() -> Self {
        Self::new(DEFAULT_DIRECTIVES.iter().copied())
    }
}

impl TemplateCompiler for DirectiveCompiler {
    fn compile(&self, raw: &str) -> String {
        let without_comments = COMMENT_REGEX.replace_all(raw, |caps: &regex::Captures<'_>| {
            "\n".repeat(caps[0].matches('\n').count())
        });
        self.rewrite_directives(&without_comments)
    }
}

/// Byte offset just past the `)` matching the `(` at `open`.
///
/// Parentheses inside quoted strings do not count.
fn balanced_group_end(text: &str, open: usize) -> Option<usize> {
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut chars = text[open..].char_indices();

    while let Some((i, c)) = chars.next() {
        match quote {
            Some(q) => {
                if c == '\\' {
                    chars.next();
                } else if c == q {
                    quote = None;
                }
            }
            None => match c {
                '\'' | '"' => quote = Some(c),
                '(' => depth += 1,
                ')' => {
                    depth -= 1;
                    if depth == 0 {
                        return Some(open + i + 1);
                    }
                }
                _ => {}
            },
        }
    }

    None
}
