//! # Tokenizer (C7)
//!
//! Builds a maximal-munch tokenizer from an ordered list of [LexicalRule]s: each
//! rule's pattern is compiled to an NFA fragment, every fragment is fused behind a
//! shared start state and annotated with `(kind, priority)`, the fused NFA is
//! determinized ([crate::dfa::subset]) and minimized ([crate::dfa::minimize]), and
//! the resulting DFA is driven over the input by [Tokenizer::tokenize].

use std::collections::HashMap;
use std::rc::Rc;

use thiserror::Error;

use crate::dfa::{self, Dfa};
use crate::nfa::{self, Builder as NfaBuilder};
use crate::regex::{self, BadRegex, Token as RegexToken};
use crate::token::{Token, EOF_KIND, UNKNOWN_KIND};

/// One entry of the rule list: a regex pattern, the token kind it produces, a
/// priority (lower breaks ties in favor of this rule on equal-length matches), and
/// whether matches of this rule are dropped from the output stream (e.g. whitespace).
#[derive(Debug, Clone)]
pub struct LexicalRule {
    pub pattern: Rc<str>,
    pub kind: Rc<str>,
    pub priority: usize,
    pub ignore: bool,
}

impl LexicalRule {
    pub fn new(pattern: impl Into<Rc<str>>, kind: impl Into<Rc<str>>, priority: usize, ignore: bool) -> Self {
        LexicalRule {
            pattern: pattern.into(),
            kind: kind.into(),
            priority,
            ignore,
        }
    }
}

/// A rule failed to compile. `rule_index` is the position of the offending rule in
/// the slice passed to [Tokenizer::build], regardless of the priority order the
/// builder processes rules in internally.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("rule {rule_index} (pattern '{pattern}'): {cause}")]
pub struct BuildError {
    pub rule_index: usize,
    pub pattern: Rc<str>,
    pub cause: BadRegex,
}

/// Tokenizer construction knobs.
///
/// `fallback_to_literal`, when set, makes a rule whose pattern fails to parse as a
/// regex fall back to matching its pattern text literally instead of failing the
/// whole build; which rules took the fallback is recorded and exposed through
/// [Tokenizer::fallback_rules] rather than silently swallowed.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuildOptions {
    pub fallback_to_literal: bool,
}

#[derive(Debug, Clone)]
pub struct Tokenizer {
    dfa: Dfa,
    ignore_by_priority: HashMap<usize, bool>,
    fallback_rules: Vec<usize>,
}

impl Tokenizer {
    pub fn build(rules: &[LexicalRule]) -> Result<Tokenizer, BuildError> {
        Self::build_with_options(rules, BuildOptions::default())
    }

    pub fn build_with_options(rules: &[LexicalRule], options: BuildOptions) -> Result<Tokenizer, BuildError> {
        let mut indexed: Vec<(usize, &LexicalRule)> = rules.iter().enumerate().collect();
        indexed.sort_by_key(|(_, r)| r.priority);

        let mut builder = NfaBuilder::new();
        let mut fragment_starts = Vec::with_capacity(indexed.len());
        let mut ignore_by_priority = HashMap::with_capacity(indexed.len());
        let mut fallback_rules = Vec::new();

        for (rule_index, rule) in indexed {
            ignore_by_priority.insert(rule.priority, rule.ignore);

            let postfix = match regex::parse(&rule.pattern) {
                Ok(postfix) => postfix,
                Err(cause) if options.fallback_to_literal => {
                    fallback_rules.push(rule.priority);
                    let _ = cause;
                    literal_postfix(&rule.pattern)
                }
                Err(cause) => {
                    return Err(BuildError {
                        rule_index,
                        pattern: rule.pattern.clone(),
                        cause,
                    })
                }
            };

            let fragment = nfa::thompson::build_fragment(&mut builder, &postfix).map_err(|cause| BuildError {
                rule_index,
                pattern: rule.pattern.clone(),
                cause,
            })?;
            builder.set_accept(
                fragment.end,
                nfa::Accept {
                    kind: rule.kind.clone(),
                    priority: rule.priority,
                },
            );
            fragment_starts.push(fragment.start);
        }

        let nfa = builder.fuse(fragment_starts);
        let sigma = dfa::subset::alphabet(&nfa, &regex::fixed_alphabet());
        let raw_dfa = dfa::subset::build(&nfa, &sigma);
        let dfa = dfa::minimize::minimize(&raw_dfa, &sigma);

        Ok(Tokenizer {
            dfa,
            ignore_by_priority,
            fallback_rules,
        })
    }

    /// The priorities of the rules that fell back to literal matching, in the order
    /// they were processed. Empty unless [BuildOptions::fallback_to_literal] was set
    /// and at least one pattern failed to parse as a regex.
    pub fn fallback_rules(&self) -> &[usize] {
        &self.fallback_rules
    }

    /// Scans `input` with maximal munch, producing one token per lexeme plus a final
    /// synthetic `EOF` token. A position that matches no rule's DFA path at all
    /// produces a single-character `UNKNOWN` token rather than failing the scan.
    pub fn tokenize(&self, input: &str) -> Vec<Token> {
        let chars: Vec<char> = input.chars().collect();
        let mut tokens = Vec::new();
        let mut pos = 0usize;
        let mut byte_pos = 0usize;
        let mut line = 1usize;
        let mut column = 1usize;

        while pos < chars.len() {
            match self.longest_match(&chars, pos) {
                Some((end, accept)) => {
                    let lexeme: String = chars[pos..end].iter().collect();
                    let ignore = *self.ignore_by_priority.get(&accept.priority).unwrap_or(&false);
                    if !ignore {
                        tokens.push(Token::new(accept.kind.clone(), lexeme.as_str(), byte_pos, line, column));
                    }
                    advance_position(&lexeme, &mut byte_pos, &mut line, &mut column);
                    pos = end;
                }
                None => {
                    let lexeme = chars[pos].to_string();
                    tokens.push(Token::new(UNKNOWN_KIND, lexeme.as_str(), byte_pos, line, column));
                    advance_position(&lexeme, &mut byte_pos, &mut line, &mut column);
                    pos += 1;
                }
            }
        }

        tokens.push(Token::new(EOF_KIND, "", byte_pos, line, column));
        tokens
    }

    fn longest_match(&self, chars: &[char], start: usize) -> Option<(usize, dfa::Accept)> {
        let mut cursor = self.dfa.start;
        let mut j = start;
        let mut best: Option<(usize, dfa::Accept)> = None;

        loop {
            if let Some(accept) = &self.dfa.states[cursor].accept {
                best = Some((j, accept.clone()));
            }
            if j >= chars.len() {
                break;
            }
            match self.dfa.states[cursor].transitions.get(&chars[j]) {
                Some(&next) => {
                    cursor = next;
                    j += 1;
                }
                None => break,
            }
        }

        best.filter(|(end, _)| *end > start)
    }
}

fn advance_position(lexeme: &str, byte_pos: &mut usize, line: &mut usize, column: &mut usize) {
    for c in lexeme.chars() {
        *byte_pos += c.len_utf8();
        if c == '\n' {
            *line += 1;
            *column = 1;
        } else {
            *column += 1;
        }
    }
}

/// Builds a postfix token stream matching `pattern`'s characters literally, one
/// concatenated atom per character, bypassing regex syntax entirely.
fn literal_postfix(pattern: &str) -> Vec<RegexToken> {
    let mut chars = pattern.chars();
    let mut out = Vec::new();
    if let Some(first) = chars.next() {
        out.push(RegexToken::Char(first));
        for c in chars {
            out.push(RegexToken::Char(c));
            out.push(RegexToken::Concat);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maximal_munch_prefers_the_longest_match() {
        let rules = vec![
            LexicalRule::new("if", "KW_IF", 0, false),
            LexicalRule::new("[a-z]+", "IDENT", 1, false),
            LexicalRule::new(" +", "WS", 2, true),
        ];
        let tokenizer = Tokenizer::build(&rules).unwrap();
        let tokens = tokenizer.tokenize("if myif");
        let kinds: Vec<&str> = tokens.iter().map(|t| t.kind.as_ref()).collect();
        assert_eq!(kinds, ["KW_IF", "IDENT", "EOF"]);
        assert_eq!(tokens[1].lexeme.as_ref(), "myif");
    }

    #[test]
    fn priority_breaks_ties_on_equal_length_matches() {
        let rules = vec![
            LexicalRule::new("int", "KW_INT", 0, false),
            LexicalRule::new("[a-z]+", "IDENT", 1, false),
        ];
        let tokenizer = Tokenizer::build(&rules).unwrap();
        let tokens = tokenizer.tokenize("int");
        assert_eq!(tokens[0].kind.as_ref(), "KW_INT");
    }

    #[test]
    fn ignored_rules_are_dropped_but_still_advance_position() {
        let rules = vec![
            LexicalRule::new("[a-z]+", "IDENT", 0, false),
            LexicalRule::new(" +", "WS", 1, true),
        ];
        let tokenizer = Tokenizer::build(&rules).unwrap();
        let tokens = tokenizer.tokenize("a b");
        let kinds: Vec<&str> = tokens.iter().map(|t| t.kind.as_ref()).collect();
        assert_eq!(kinds, ["IDENT", "IDENT", "EOF"]);
        assert_eq!(tokens[1].position, 2);
    }

    #[test]
    fn unmatched_character_becomes_unknown() {
        let rules = vec![LexicalRule::new("[a-z]+", "IDENT", 0, false)];
        let tokenizer = Tokenizer::build(&rules).unwrap();
        let tokens = tokenizer.tokenize("a@b");
        let kinds: Vec<&str> = tokens.iter().map(|t| t.kind.as_ref()).collect();
        assert_eq!(kinds, ["IDENT", "UNKNOWN", "IDENT", "EOF"]);
        assert_eq!(tokens[1].lexeme.as_ref(), "@");
    }

    #[test]
    fn line_and_column_track_newlines() {
        let rules = vec![
            LexicalRule::new("[a-z]+", "IDENT", 0, false),
            LexicalRule::new("\\n", "NL", 1, false),
        ];
        let tokenizer = Tokenizer::build(&rules).unwrap();
        let tokens = tokenizer.tokenize("ab\ncd");
        assert_eq!(tokens[0].line, 1);
        assert_eq!(tokens[0].column, 1);
        assert_eq!(tokens[2].line, 2);
        assert_eq!(tokens[2].column, 1);
    }

    #[test]
    fn eof_is_always_appended() {
        let rules = vec![LexicalRule::new("a", "A", 0, false)];
        let tokenizer = Tokenizer::build(&rules).unwrap();
        let tokens = tokenizer.tokenize("");
        assert_eq!(tokens.len(), 1);
        assert!(tokens[0].is_eof());
    }

    #[test]
    fn build_fails_on_a_malformed_pattern() {
        let rules = vec![LexicalRule::new("(a", "A", 0, false)];
        let err = Tokenizer::build(&rules).unwrap_err();
        assert_eq!(err.rule_index, 0);
    }

    #[test]
    fn fallback_to_literal_recovers_from_a_malformed_pattern() {
        let rules = vec![LexicalRule::new("(a", "PAREN_A", 0, false)];
        let tokenizer = Tokenizer::build_with_options(&rules, BuildOptions { fallback_to_literal: true }).unwrap();
        assert_eq!(tokenizer.fallback_rules(), &[0]);
        let tokens = tokenizer.tokenize("(a");
        assert_eq!(tokens[0].kind.as_ref(), "PAREN_A");
    }
}
