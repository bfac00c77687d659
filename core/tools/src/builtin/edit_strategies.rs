//! String-replacement strategies backing the Edit tool.
//!
//! Three tiers are tried in order, from strictest to most forgiving:
//! exact substring match, whitespace-flexible line match (ignores each
//! line's leading/trailing whitespace), and a regex match that collapses
//! intra-line whitespace runs. A model's `old_string` is also prone to a
//! specific escaping bug — literal `\n`/`\t`/`\"` sequences where it meant
//! actual control characters — which [`pre_correct_escaping`] repairs
//! before matching is attempted.

use regex::NoExpand;
use regex::Regex;
use std::collections::HashMap;

/// Which tier of [`try_match`] produced a replacement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchStrategy {
    Exact,
    Flexible,
    Regex,
}

impl MatchStrategy {
    pub fn label(self) -> &'static str {
        match self {
            Self::Exact => "exact match",
            Self::Flexible => "whitespace-flexible match",
            Self::Regex => "regex match",
        }
    }
}

/// Try exact, then flexible, then (single-replacement only) regex
/// matching, returning the first strategy that finds `old` in `content`.
pub fn try_match(
    content: &str,
    old: &str,
    new: &str,
    replace_all: bool,
) -> Option<(String, usize, MatchStrategy)> {
    if let Some((result, count)) = try_exact_replace(content, old, new, replace_all) {
        return Some((result, count, MatchStrategy::Exact));
    }
    if let Some((result, count)) = try_flexible_replace(content, old, new, replace_all) {
        return Some((result, count, MatchStrategy::Flexible));
    }
    if !replace_all {
        if let Some((result, count)) = try_regex_replace(content, old, new) {
            return Some((result, count, MatchStrategy::Regex));
        }
    }
    None
}

/// Literal substring match.
pub fn try_exact_replace(
    content: &str,
    old: &str,
    new: &str,
    replace_all: bool,
) -> Option<(String, usize)> {
    if !content.contains(old) {
        return None;
    }
    if replace_all {
        let count = content.matches(old).count();
        Some((content.replace(old, new), count))
    } else {
        let idx = content.find(old)?;
        let mut result = String::with_capacity(content.len());
        result.push_str(&content[..idx]);
        result.push_str(new);
        result.push_str(&content[idx + old.len()..]);
        Some((result, 1))
    }
}

/// Line-block match that ignores each matched line's own leading/trailing
/// whitespace, reapplying the original line's indentation to the
/// replacement.
pub fn try_flexible_replace(
    content: &str,
    old: &str,
    new: &str,
    replace_all: bool,
) -> Option<(String, usize)> {
    let content_lines: Vec<&str> = content.split('\n').collect();
    let old_lines: Vec<&str> = old.split('\n').collect();
    let new_lines: Vec<&str> = new.split('\n').collect();
    let old_trimmed: Vec<&str> = old_lines.iter().map(|l| l.trim()).collect();

    let n = content_lines.len();
    let m = old_lines.len();
    if m == 0 || m > n {
        return None;
    }

    let mut starts = Vec::new();
    for start in 0..=(n - m) {
        let slice_trimmed: Vec<&str> = content_lines[start..start + m]
            .iter()
            .map(|l| l.trim())
            .collect();
        if slice_trimmed == old_trimmed {
            starts.push(start);
            if !replace_all {
                break;
            }
        }
    }
    if starts.is_empty() {
        return None;
    }

    let mut result_lines: Vec<String> = content_lines.iter().map(|s| s.to_string()).collect();
    for &start in starts.iter().rev() {
        let indent_of = |idx: usize| -> String {
            let src = if idx < m { start + idx } else { start + m - 1 };
            let line = content_lines[src];
            let indent_len = line.len() - line.trim_start().len();
            line[..indent_len].to_string()
        };
        let replacement: Vec<String> = new_lines
            .iter()
            .enumerate()
            .map(|(i, nl)| format!("{}{}", indent_of(i), nl))
            .collect();
        result_lines.splice(start..start + m, replacement);
    }

    Some((result_lines.join("\n"), starts.len()))
}

/// Regex match that collapses intra-line whitespace runs in `old` to
/// `\s*`, so differences in spacing around tokens don't block a match.
/// Only ever replaces the first occurrence.
pub fn try_regex_replace(content: &str, old: &str, new: &str) -> Option<(String, usize)> {
    let tokens: Vec<String> = old.split_whitespace().map(escape_regex).collect();
    if tokens.is_empty() {
        return None;
    }
    let pattern = tokens.join(r"\s*");
    let re = Regex::new(&pattern).ok()?;
    if !re.is_match(content) {
        return None;
    }

    let new_for_replace = new.strip_suffix('\n').unwrap_or(new);
    let mut result = re.replacen(content, 1, NoExpand(new_for_replace)).into_owned();

    let content_has_nl = content.ends_with('\n');
    if content_has_nl && !result.ends_with('\n') {
        result.push('\n');
    } else if !content_has_nl && result.ends_with('\n') {
        result.pop();
    }

    Some((result, 1))
}

/// Escape regex metacharacters in a literal token.
pub fn escape_regex(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        if matches!(
            c,
            '\\' | '.' | '$' | '|' | '(' | ')' | '[' | ']' | '{' | '}' | '^' | '+' | '*' | '?'
        ) {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// A model sometimes emits `\n`/`\t`/`\"`/`\'` as literal two-character
/// escape sequences where it meant the actual control character. Undo
/// that specific bug — this is not general string-escape handling.
pub fn unescape_string_for_llm_bug(s: &str) -> String {
    let chars: Vec<char> = s.chars().collect();
    let mut out = String::with_capacity(s.len());
    let mut i = 0;
    while i < chars.len() {
        if chars[i] == '\\' {
            if i + 2 < chars.len() && chars[i + 1] == '\\' && is_escape_letter(chars[i + 2]) {
                out.push(escape_letter_to_char(chars[i + 2]));
                i += 3;
                continue;
            }
            if i + 1 < chars.len() && chars[i + 1] == '\\' {
                out.push('\\');
                i += 2;
                continue;
            }
            if i + 1 < chars.len() && is_escape_letter(chars[i + 1]) {
                out.push(escape_letter_to_char(chars[i + 1]));
                i += 2;
                continue;
            }
            out.push('\\');
            i += 1;
            continue;
        }
        out.push(chars[i]);
        i += 1;
    }
    out
}

fn is_escape_letter(c: char) -> bool {
    matches!(c, 'n' | 't' | '"' | '\'')
}

fn escape_letter_to_char(c: char) -> char {
    match c {
        'n' => '\n',
        't' => '\t',
        '"' => '"',
        '\'' => '\'',
        _ => c,
    }
}

/// If `old`/`new` have surrounding whitespace that keeps them from
/// matching `content` verbatim, retry trimmed. Returns `None` when
/// trimming changes nothing, or the trimmed `old` still isn't present.
pub fn trim_pair_if_possible(old: &str, new: &str, content: &str) -> Option<(String, String)> {
    let trimmed_old = old.trim();
    if trimmed_old == old {
        return None;
    }
    if content.contains(trimmed_old) {
        Some((trimmed_old.to_string(), new.trim().to_string()))
    } else {
        None
    }
}

/// Before matching, repair the literal-escape-sequence bug in `old`/`new`
/// if doing so is what makes `old` findable in `content`.
pub fn pre_correct_escaping(old: &str, new: &str, content: &str) -> (String, String) {
    if content.contains(old) {
        return (old.to_string(), unescape_string_for_llm_bug(new));
    }
    let unescaped_old = unescape_string_for_llm_bug(old);
    if content.contains(&unescaped_old) {
        return (unescaped_old, unescape_string_for_llm_bug(new));
    }
    (old.to_string(), new.to_string())
}

/// A hint for the error message when no strategy matched: point at the
/// closest line of `old` still present in `content`, if any.
pub fn find_closest_match(content: &str, old: &str) -> String {
    for line in old.lines() {
        let trimmed = line.trim();
        if !trimmed.is_empty() && content.contains(trimmed) {
            return format!("Hint: found a partial match near: \"{trimmed}\"");
        }
    }
    "Hint: old_string not found anywhere in the file, even partially.".to_string()
}

/// A short `" (+N/-M lines)"` summary of the line-level change, or an
/// empty string when the line multisets are identical.
pub fn diff_stats(old: &str, new: &str) -> String {
    let mut old_count: HashMap<&str, i32> = HashMap::new();
    for l in old.lines() {
        *old_count.entry(l).or_insert(0) += 1;
    }
    let mut new_count: HashMap<&str, i32> = HashMap::new();
    for l in new.lines() {
        *new_count.entry(l).or_insert(0) += 1;
    }

    let mut added = 0i32;
    let mut removed = 0i32;
    for (line, &n_new) in &new_count {
        let n_old = old_count.get(line).copied().unwrap_or(0);
        if n_new > n_old {
            added += n_new - n_old;
        }
    }
    for (line, &n_old) in &old_count {
        let n_new = new_count.get(line).copied().unwrap_or(0);
        if n_old > n_new {
            removed += n_old - n_new;
        }
    }

    if added == 0 && removed == 0 {
        String::new()
    } else {
        format!(" (+{added}/-{removed} lines)")
    }
}

#[cfg(test)]
#[path = "edit_strategies.test.rs"]
mod tests;
