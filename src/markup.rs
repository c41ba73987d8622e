//! Class reference markup → GitHub-flavored markdown.
//!
//! The markup is a small bracket-tag dialect (`[b]bold[/b]`, `[method foo]`,
//! `[ClassName]`, `[codeblock lang=x]`...). Text is rewritten line by line;
//! the only state carried between lines is whether a code block is open.

use crate::anchor::name_to_anchor;
use crate::model::Document;
use crate::registry::ClassRegistry;
use regex::{Captures, Regex};
use std::sync::LazyLock;

/// Language recorded for `[codeblocks]` / `[codeblock]` without `lang=`.
const DEFAULT_CODE_LANG: &str = "gdscript";

static RE_CODEBLOCKS_OPEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[codeblocks\]").unwrap());
static RE_CODEBLOCK_OPEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[codeblock\]").unwrap());
static RE_CODEBLOCK_LANG_OPEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[codeblock\s+lang=(\w+)\]").unwrap());
static RE_CODEBLOCK_CLOSE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[/codeblocks?\]").unwrap());
static RE_GDSCRIPT_OPEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[gdscript\]").unwrap());
static RE_GDSCRIPT_CLOSE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[/gdscript\]").unwrap());

static RE_ITALIC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[i\](.*?)\[/i\]").unwrap());
static RE_BOLD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[b\](.*?)\[/b\]").unwrap());
static RE_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[code\](.*?)\[/code\]").unwrap());
static RE_PARAM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[param (.*?)\]").unwrap());
static RE_CLASS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([A-Z]\w+)\]").unwrap());
static RE_PRIMITIVE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[(bool|float|int)\]").unwrap());
static RE_MEMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[member (.*?)\]").unwrap());
static RE_METHOD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[method (.*?)\]").unwrap());
static RE_CONSTANT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[constant (.*?)\]").unwrap());
static RE_ENUM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[enum (.*?)\]").unwrap());

/// How a matched tag is replaced.
enum Replace {
    /// Regex replacement template (`$1` style)
    Template(&'static str),
    /// Lookup against the current document or the class registry
    Resolve(fn(&MarkupRewriter<'_>, &str) -> String),
}

struct Rule {
    pattern: &'static LazyLock<Regex>,
    replace: Replace,
}

/// Applied in order to every paragraph line. Class brackets must run before
/// the primitive/enum rules so converted text is not matched twice.
static RULES: [Rule; 10] = [
    Rule { pattern: &RE_ITALIC, replace: Replace::Template("*${1}*") },
    Rule { pattern: &RE_BOLD, replace: Replace::Template("**${1}**") },
    Rule { pattern: &RE_CODE, replace: Replace::Template("`${1}`") },
    Rule { pattern: &RE_PARAM, replace: Replace::Template("`${1}`") },
    Rule { pattern: &RE_CLASS, replace: Replace::Resolve(class_link) },
    Rule { pattern: &RE_PRIMITIVE, replace: Replace::Template("`${1}`") },
    Rule { pattern: &RE_MEMBER, replace: Replace::Resolve(member_link) },
    Rule { pattern: &RE_METHOD, replace: Replace::Resolve(method_link) },
    Rule { pattern: &RE_CONSTANT, replace: Replace::Resolve(constant_link) },
    Rule { pattern: &RE_ENUM, replace: Replace::Resolve(enum_link) },
];

enum State {
    Paragraph,
    Code { lang: String, body: String },
}

/// Rewrites markup for one document, resolving references against its
/// entities and the run-wide class registry.
pub struct MarkupRewriter<'a> {
    doc: &'a Document,
    classes: &'a ClassRegistry,
}

impl<'a> MarkupRewriter<'a> {
    pub fn new(doc: &'a Document, classes: &'a ClassRegistry) -> Self {
        Self { doc, classes }
    }

    /// Convert a block of markup text to markdown.
    ///
    /// Paragraph lines are emitted followed by a blank line; a closed code
    /// block becomes one fenced block. An unterminated block is dropped.
    pub fn to_markdown(&self, text: &str) -> String {
        let mut out: Vec<String> = Vec::new();
        let mut state = State::Paragraph;

        for line in text.trim().lines() {
            // Tabs are source indentation; spaces inside code blocks are kept.
            let line = line.trim_start_matches('\t').trim_end();

            match &mut state {
                State::Code { lang, body } => {
                    if RE_GDSCRIPT_OPEN.is_match(line) {
                        *lang = DEFAULT_CODE_LANG.to_string();
                    } else if RE_GDSCRIPT_CLOSE.is_match(line) {
                        // closing language tag, nothing to emit
                    } else if RE_CODEBLOCK_CLOSE.is_match(line) {
                        out.push(format!("```{}\n{}```", lang, body));
                        state = State::Paragraph;
                    } else {
                        body.push_str(line);
                        body.push('\n');
                    }
                }
                State::Paragraph => {
                    if let Some(lang) = code_block_open(line) {
                        state = State::Code { lang, body: String::new() };
                        continue;
                    }
                    out.push(format!("{}\n", self.rewrite_line(line)));
                }
            }
        }

        out.join("\n")
    }

    /// Apply every inline rule, in order, to one paragraph line.
    fn rewrite_line(&self, line: &str) -> String {
        let mut line = line.to_string();
        for rule in &RULES {
            let replaced = match rule.replace {
                Replace::Template(template) => rule.pattern.replace_all(&line, template),
                Replace::Resolve(resolve) => rule
                    .pattern
                    .replace_all(&line, |caps: &Captures| resolve(self, &caps[1])),
            };
            line = replaced.into_owned();
        }
        line
    }
}

fn class_link(rw: &MarkupRewriter<'_>, name: &str) -> String {
    format!("[`{}`]({})", name, rw.classes.resolve(name))
}

/// Members are looked up in the member table, then in the method table.
fn member_link(rw: &MarkupRewriter<'_>, name: &str) -> String {
    let signature = rw
        .doc
        .members
        .get(name)
        .map(|m| m.signature.as_str())
        .or_else(|| rw.doc.methods.get(name).map(|m| m.signature.as_str()));
    match signature {
        Some(signature) => format!("[`{}`](#{})", name, name_to_anchor(signature)),
        None => format!("`{}`", name),
    }
}

fn method_link(rw: &MarkupRewriter<'_>, name: &str) -> String {
    match rw.doc.methods.get(name) {
        Some(method) => format!("[`{}()`](#{})", name, name_to_anchor(&method.signature)),
        None => format!("`{}()`", name),
    }
}

fn constant_link(rw: &MarkupRewriter<'_>, name: &str) -> String {
    if rw.doc.constants.contains_key(name) {
        format!("[`{}`](#{})", name, name_to_anchor(name))
    } else {
        format!("`{}`", name)
    }
}

fn enum_link(_rw: &MarkupRewriter<'_>, name: &str) -> String {
    format!("[`{}`](#{})", name, name_to_anchor(&format!("enum {}", name)))
}

/// Language of a code block opened on this line, if any.
fn code_block_open(line: &str) -> Option<String> {
    if RE_CODEBLOCKS_OPEN.is_match(line) || RE_CODEBLOCK_OPEN.is_match(line) {
        return Some(DEFAULT_CODE_LANG.to_string());
    }
    RE_CODEBLOCK_LANG_OPEN
        .captures(line)
        .map(|caps| caps[1].to_string())
}
