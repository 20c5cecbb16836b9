//! Emotional-language removal and neutral fact extraction
//!
//! `TextNormalizer` turns one free-text record into a single neutral
//! sentence attributed to the fixed actor designation:
//!
//! 1. strip the demo-record prefix marker
//! 2. remove configured lexemes, tidy whitespace and punctuation
//! 3. collect the label of every fact rule that matches, in table order
//! 4. fall back to the sanitized text itself when no rule matches
//! 5. compose `<actor> performed <fact>` (or the multi-fact form)
//!
//! Extraction is pattern based. Pronouns in the source text are ignored on
//! purpose: conduct is always attributed to the configured actor.
//!
//! Text already in one of the composed forms is rebuilt from its fact rather
//! than wrapped again, so normalizing a normalized sentence is a no-op.

use crate::config::{fill, FactRuleSpec, NormalizerConfig};
use crate::error::EngineError;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref WHITESPACE: Regex = Regex::new(r"\s+").unwrap();

    static ref SPACE_BEFORE_PUNCT: Regex = Regex::new(r"\s+([,.;:!?、。，．！？])").unwrap();

    /// Runs of separators left behind by removed words, e.g. "a, , b"
    static ref SEPARATOR_RUN: Regex = Regex::new(r"([,;、，])(?:\s*[,;、，])+").unwrap();

    static ref EDGE_PUNCT: Regex =
        Regex::new(r"^[\s,.;:!?、。，．！？]+|[\s,.;:!?、。，．！？]+$").unwrap();

    static ref TRAILING_TERMINALS: Regex = Regex::new(r"[.!?。！？]+$").unwrap();
}

const TERMINAL_CLASS: &str = "[.!?。！？]";

struct FactRule {
    label: String,
    any_of: Vec<Regex>,
    all_of: Vec<Regex>,
}

impl FactRule {
    fn compile(spec: &FactRuleSpec) -> Result<Self, EngineError> {
        if spec.label.trim().is_empty() {
            return Err(EngineError::EmptyLabel);
        }
        if spec.any_of.is_empty() && spec.all_of.is_empty() {
            return Err(EngineError::EmptyRule(spec.label.clone()));
        }

        let compile_all = |patterns: &[String]| -> Result<Vec<Regex>, EngineError> {
            patterns
                .iter()
                .map(|p| {
                    Regex::new(p).map_err(|source| EngineError::InvalidPattern {
                        label: spec.label.clone(),
                        source,
                    })
                })
                .collect()
        };

        Ok(Self {
            label: spec.label.clone(),
            any_of: compile_all(&spec.any_of)?,
            all_of: compile_all(&spec.all_of)?,
        })
    }

    fn matches(&self, text: &str) -> bool {
        (self.any_of.is_empty() || self.any_of.iter().any(|re| re.is_match(text)))
            && self.all_of.iter().all(|re| re.is_match(text))
    }
}

/// One composing template and the pattern recognizing its output
struct ComposedForm {
    template: String,
    pattern: Regex,
}

impl ComposedForm {
    fn new(template: &str, actor: &str) -> Self {
        // `{fact}` stays literal so it can be located after the actor is filled
        let with_actor = fill(template, &[("actor", actor)]);
        let with_actor = with_actor.trim_start();
        let body = match with_actor.split_once("{fact}") {
            Some((head, tail)) => {
                format!("{}(.+?){}", sentence_start(head), loose_literal(tail))
            }
            None => sentence_start(with_actor),
        };

        let pattern = format!("^{}{}*$", body, TERMINAL_CLASS);
        Self {
            template: template.to_string(),
            pattern: Regex::new(&pattern).expect("escaped literal is a valid pattern"),
        }
    }
}

pub struct TextNormalizer {
    sample_prefixes: Vec<Regex>,
    lexemes: Vec<Regex>,
    rules: Vec<FactRule>,
    composed: Vec<ComposedForm>,
    actor: String,
    single_fact: String,
    multiple_facts: String,
    no_fact: String,
    terminal: String,
}

impl TextNormalizer {
    /// Compile a normalizer from its rule tables
    pub fn new(config: &NormalizerConfig) -> Result<Self, EngineError> {
        let sample_prefixes = config
            .sample_prefixes
            .iter()
            .filter(|p| !p.trim().is_empty())
            .map(|p| literal_pattern(&format!(r"^\s*{}\s*", regex::escape(p.trim()))))
            .collect();

        let lexemes = config
            .lexemes
            .iter()
            .filter(|l| !l.trim().is_empty())
            .map(|l| {
                let words: Vec<String> = l.split_whitespace().map(regex::escape).collect();
                literal_pattern(&words.join(r"\s+"))
            })
            .collect();

        let rules = config
            .fact_rules
            .iter()
            .map(FactRule::compile)
            .collect::<Result<Vec<_>, _>>()?;

        let composed = [&config.multiple_facts, &config.single_fact, &config.no_fact]
            .into_iter()
            .filter(|t| !t.trim().is_empty())
            .map(|t| ComposedForm::new(t, &config.actor))
            .collect();

        Ok(Self {
            sample_prefixes,
            lexemes,
            rules,
            composed,
            actor: config.actor.clone(),
            single_fact: config.single_fact.clone(),
            multiple_facts: config.multiple_facts.clone(),
            no_fact: config.no_fact.clone(),
            terminal: config.terminal.clone(),
        })
    }

    /// Neutral sentence for one record's content; never empty
    pub fn normalize(&self, content: &str) -> String {
        normalize_sentence(&self.clause(content), &self.terminal)
    }

    /// The actor clause without terminal punctuation, for embedding in a
    /// longer statement sentence
    pub fn clause(&self, content: &str) -> String {
        let raw = self.strip_sample_prefix(content);
        if let Some(clause) = self.recompose(&raw) {
            return clause;
        }

        let sanitized = self.sanitize(&raw);
        let source = if sanitized.is_empty() { raw.as_str() } else { sanitized.as_str() };

        let facts = self.extract_facts(source);
        tracing::debug!(facts = facts.len(), "extracted facts");
        self.compose(&facts)
    }

    /// Rebuild `text` from its template when it is already a composed sentence
    /// around a clean fact
    fn recompose(&self, text: &str) -> Option<String> {
        self.composed.iter().find_map(|form| {
            let caps = form.pattern.captures(text)?;
            let fact = caps.get(1).map_or("", |m| m.as_str());
            if !fact.is_empty() && self.sanitize(fact) != fact {
                return None;
            }
            Some(fill(
                &form.template,
                &[("actor", self.actor.as_str()), ("fact", fact)],
            ))
        })
    }

    pub fn strip_sample_prefix(&self, content: &str) -> String {
        let content = content.trim();
        self.sample_prefixes
            .iter()
            .find(|re| re.is_match(content))
            .map(|re| re.replace(content, "").trim().to_string())
            .unwrap_or_else(|| content.to_string())
    }

    /// Remove configured lexemes and tidy the remainder; idempotent
    pub fn sanitize(&self, text: &str) -> String {
        let mut current = text.to_string();
        // Each changing pass shortens the text, so this bound is never hit
        for _ in 0..=text.len() {
            let next = self.sanitize_pass(&current);
            if next == current {
                break;
            }
            current = next;
        }
        current
    }

    fn sanitize_pass(&self, text: &str) -> String {
        let mut s = WHITESPACE.replace_all(text, " ").into_owned();
        for lexeme in &self.lexemes {
            s = lexeme.replace_all(&s, "").into_owned();
        }
        s = SPACE_BEFORE_PUNCT.replace_all(&s, "${1}").into_owned();
        s = SEPARATOR_RUN.replace_all(&s, "${1}").into_owned();
        s = WHITESPACE.replace_all(&s, " ").into_owned();
        EDGE_PUNCT.replace_all(&s, "").into_owned()
    }

    /// Labels of every matching fact rule in table order, or the sanitized
    /// text when none match
    pub fn extract_facts(&self, text: &str) -> Vec<String> {
        let mut facts: Vec<String> = Vec::new();
        for rule in self.rules.iter().filter(|r| r.matches(text)) {
            if !facts.contains(&rule.label) {
                facts.push(rule.label.clone());
            }
        }

        if facts.is_empty() {
            let fallback = self.sanitize(text);
            if !fallback.is_empty() {
                facts.push(fallback);
            }
        }

        facts
    }

    fn compose(&self, facts: &[String]) -> String {
        match facts {
            [] => fill(&self.no_fact, &[("actor", self.actor.as_str())]),
            [fact] => fill(
                &self.single_fact,
                &[("actor", self.actor.as_str()), ("fact", fact.as_str())],
            ),
            [first, ..] => fill(
                &self.multiple_facts,
                &[("actor", self.actor.as_str()), ("fact", first.as_str())],
            ),
        }
    }

    pub fn terminal(&self) -> &str {
        &self.terminal
    }
}

impl Default for TextNormalizer {
    fn default() -> Self {
        Self::new(&NormalizerConfig::default()).expect("built-in rule table compiles")
    }
}

/// Case-insensitive pattern built from escaped literal text
fn literal_pattern(escaped: &str) -> Regex {
    Regex::new(&format!("(?i){}", escaped)).expect("escaped literal is a valid pattern")
}

/// Escaped literal text matching any run of whitespace where it has one
fn loose_literal(text: &str) -> String {
    WHITESPACE
        .replace_all(&regex::escape(text), regex::NoExpand(r"\s+"))
        .into_owned()
}

/// Like `loose_literal`, but the first letter may have been capitalized
fn sentence_start(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => format!(
            "(?i:{}){}",
            regex::escape(first.encode_utf8(&mut [0; 4])),
            loose_literal(chars.as_str())
        ),
        None => String::new(),
    }
}

/// Collapse whitespace, trim, and end with exactly one terminal mark
///
/// A trailing run of terminal marks is reduced to its first mark. The first
/// letter is upper-cased for scripts that have case.
pub fn normalize_sentence(s: &str, terminal: &str) -> String {
    let mut out = WHITESPACE.replace_all(s.trim(), " ").into_owned();
    if out.is_empty() {
        return out;
    }

    match TRAILING_TERMINALS.find(&out).map(|m| m.start()) {
        Some(start) => {
            let first_mark = out[start..].chars().next().unwrap_or_default();
            out.truncate(start);
            out.push(first_mark);
        }
        None => out.push_str(terminal),
    }

    capitalize_first(&out)
}

fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_lowercase() => c.to_uppercase().chain(chars).collect(),
        _ => s.to_string(),
    }
}
