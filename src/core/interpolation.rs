//! Command-line tokenizing and `$name` interpolation
//!
//! A command line is first split into shell words, then each word has its
//! `$name` references substituted and, if it looks like a relative file
//! path, is rewritten to an absolute path under the scope's `pwd`. Words are
//! never re-split, so a substituted value containing spaces stays one
//! argument.

use crate::core::{scope::join_normalized, RunnerError, Scope, Step};
use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;

static VARIABLE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\$(\w+)").unwrap());

static RELATIVE_PATH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:\.\.?/)+(?:[\w.-]+/)*[\w-]+(?:\.[\w-]+)*\.\w+$").unwrap());

/// Split a command line into words.
///
/// Whitespace separates words. Single quotes are literal, double quotes
/// allow `\"` and `\\`, and a backslash outside quotes escapes the next
/// character.
pub fn tokenize(line: &str) -> Result<Vec<String>, RunnerError> {
    #[derive(Clone, Copy, PartialEq)]
    enum Quote {
        None,
        Single,
        Double,
    }

    let mut words = Vec::new();
    let mut current = String::new();
    let mut in_word = false;
    let mut quote = Quote::None;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match quote {
            Quote::Single => match c {
                '\'' => quote = Quote::None,
                _ => current.push(c),
            },
            Quote::Double => match c {
                '"' => quote = Quote::None,
                '\\' if matches!(chars.peek(), Some('"') | Some('\\')) => {
                    if let Some(escaped) = chars.next() {
                        current.push(escaped);
                    }
                }
                _ => current.push(c),
            },
            Quote::None => match c {
                '\'' => {
                    quote = Quote::Single;
                    in_word = true;
                }
                '"' => {
                    quote = Quote::Double;
                    in_word = true;
                }
                '\\' => {
                    if let Some(escaped) = chars.next() {
                        current.push(escaped);
                    }
                    in_word = true;
                }
                c if c.is_whitespace() => {
                    if in_word {
                        words.push(std::mem::take(&mut current));
                        in_word = false;
                    }
                }
                _ => {
                    current.push(c);
                    in_word = true;
                }
            },
        }
    }

    if quote != Quote::None {
        return Err(RunnerError::UnterminatedQuote {
            line: line.to_string(),
        });
    }
    if in_word {
        words.push(current);
    }

    Ok(words)
}

/// Substitute every `$name` in `word` from the step bindings and scope
pub fn substitute(word: &str, step: &Step, scope: &Scope) -> Result<String, RunnerError> {
    let mut out = String::with_capacity(word.len());
    let mut last = 0;

    for caps in VARIABLE.captures_iter(word) {
        let whole = caps.get_match();
        let (_, [name]) = caps.extract();
        out.push_str(&word[last..whole.start()]);
        out.push_str(&scope.lookup(name, &step.with, step.label())?);
        last = whole.end();
    }
    out.push_str(&word[last..]);

    Ok(out)
}

/// Rewrite a `./x.ext` or `../dir/x.ext` word to an absolute path under `pwd`
pub fn rewrite_relative_path(word: String, pwd: &Path) -> String {
    if RELATIVE_PATH.is_match(&word) {
        join_normalized(pwd, Path::new(&word))
            .to_string_lossy()
            .into_owned()
    } else {
        word
    }
}

/// Turn one raw command line into argv
pub fn interpolate_line(
    line: &str,
    step: &Step,
    scope: &Scope,
) -> Result<Vec<String>, RunnerError> {
    tokenize(line)?
        .into_iter()
        .map(|word| {
            let word = substitute(&word, step, scope)?;
            Ok(rewrite_relative_path(word, &scope.pwd))
        })
        .collect()
}
