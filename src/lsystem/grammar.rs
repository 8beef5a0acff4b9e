//! L-system grammar expansion
//!
//! A [`GrammarSpec`] pairs an axiom with context-free production rules.
//! [`expand`] rewrites the axiom a fixed number of times. Every symbol is
//! replaced in a single left-to-right pass per iteration; symbols without a
//! rule are copied through unchanged.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Upper bound on the length of an expanded string, in symbols.
///
/// Growth is geometric in the iteration count, so expansion stops here
/// instead of exhausting memory. Every preset fits at
/// [`MAX_ITERATIONS`](super::params::MAX_ITERATIONS); the cap bites only for
/// custom grammars. One `]` costs at most eight leaf instances, so a capped
/// tree stays within a few hundred thousand draw instructions.
pub const MAX_EXPANDED_LEN: usize = 64 * 1024;

/// Axiom plus production rules
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrammarSpec {
    /// Starting string
    pub axiom: String,
    /// Symbol -> replacement
    pub rules: BTreeMap<char, String>,
}

impl GrammarSpec {
    /// Create a grammar with no rules
    pub fn new(axiom: impl Into<String>) -> Self {
        Self {
            axiom: axiom.into(),
            rules: BTreeMap::new(),
        }
    }

    /// Add a production rule, replacing any existing rule for `symbol`
    pub fn with_rule(mut self, symbol: char, replacement: impl Into<String>) -> Self {
        self.rules.insert(symbol, replacement.into());
        self
    }

    /// Replacement for `symbol`, if a rule exists
    pub fn rule(&self, symbol: char) -> Option<&str> {
        self.rules.get(&symbol).map(String::as_str)
    }
}

/// Result of grammar expansion
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ExpandedString {
    symbols: String,
    truncated: bool,
}

impl ExpandedString {
    /// Wrap an already expanded symbol string
    pub fn new(symbols: impl Into<String>) -> Self {
        Self {
            symbols: symbols.into(),
            truncated: false,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.symbols
    }

    /// Symbols in interpretation order
    pub fn symbols(&self) -> std::str::Chars<'_> {
        self.symbols.chars()
    }

    /// Number of symbols
    pub fn len(&self) -> usize {
        self.symbols.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Whether expansion stopped early at [`MAX_EXPANDED_LEN`]
    pub fn is_truncated(&self) -> bool {
        self.truncated
    }

    /// Number of occurrences of `symbol`
    pub fn count(&self, symbol: char) -> usize {
        self.symbols.chars().filter(|&c| c == symbol).count()
    }
}

impl fmt::Display for ExpandedString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.symbols)
    }
}

impl AsRef<str> for ExpandedString {
    fn as_ref(&self) -> &str {
        &self.symbols
    }
}

/// Expand `spec` for `iterations` rewrite passes.
///
/// Deterministic for a given `(spec, iterations)`. Zero iterations return
/// the axiom. Output is capped at [`MAX_EXPANDED_LEN`] symbols.
pub fn expand(spec: &GrammarSpec, iterations: u32) -> ExpandedString {
    expand_with_limit(spec, iterations, MAX_EXPANDED_LEN)
}

/// [`expand`] with an explicit length cap.
///
/// When the cap would be exceeded, the pass stops at the last whole
/// replacement that fits and no further iterations run. The result is
/// flagged as truncated; it may contain unbalanced brackets.
pub fn expand_with_limit(spec: &GrammarSpec, iterations: u32, max_len: usize) -> ExpandedString {
    let mut current: String = spec.axiom.chars().take(max_len).collect();
    let mut current_len = current.chars().count();
    let mut truncated = current_len < spec.axiom.chars().count();

    for iteration in 0..iterations {
        if truncated {
            break;
        }

        let mut next = String::with_capacity(current.len().saturating_mul(2).min(max_len));
        let mut next_len = 0usize;

        for c in current.chars() {
            let (piece_len, piece) = match spec.rules.get(&c) {
                Some(replacement) => (replacement.chars().count(), Some(replacement.as_str())),
                None => (1, None),
            };

            if next_len + piece_len > max_len {
                truncated = true;
                break;
            }

            match piece {
                Some(replacement) => next.push_str(replacement),
                None => next.push(c),
            }
            next_len += piece_len;
        }

        if truncated {
            log::warn!(
                "L-system expansion truncated at {} symbols during iteration {} of {}",
                next_len, iteration + 1, iterations
            );
        }

        current = next;
        current_len = next_len;
    }

    log::trace!("Expanded '{}' x{} -> {} symbols", spec.axiom, iterations, current_len);

    ExpandedString {
        symbols: current,
        truncated,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn branching() -> GrammarSpec {
        GrammarSpec::new("F").with_rule('F', "F[+F][-F]")
    }

    #[test]
    fn test_zero_iterations_returns_axiom() {
        let spec = GrammarSpec::new("X+F").with_rule('F', "FF");
        assert_eq!(expand(&spec, 0).as_str(), "X+F");
    }

    #[test]
    fn test_two_iterations_of_branching_rule() {
        let result = expand(&branching(), 2);
        assert_eq!(result.as_str(), "F[+F][-F][+F[+F][-F]][-F[+F][-F]]");
        assert!(!result.is_truncated());
    }

    #[test]
    fn test_symbols_without_rules_are_kept() {
        let spec = GrammarSpec::new("A+B").with_rule('A', "AB");
        assert_eq!(expand(&spec, 2).as_str(), "ABB+B");
    }

    #[test]
    fn test_single_pass_per_iteration() {
        // The replacement contains its own predecessor; it must not be
        // rewritten again within the same pass.
        let spec = GrammarSpec::new("A").with_rule('A', "AA");
        assert_eq!(expand(&spec, 1).as_str(), "AA");
        assert_eq!(expand(&spec, 3).len(), 8);
    }

    #[test]
    fn test_expansion_is_deterministic() {
        let spec = GrammarSpec::new("X")
            .with_rule('X', "F[+X][-X][/X]")
            .with_rule('F', "F");
        let a = expand(&spec, 4);
        let b = expand(&spec, 4);
        assert_eq!(a, b);
    }

    #[test]
    fn test_length_non_decreasing_for_growing_rules() {
        let spec = GrammarSpec::new("F").with_rule('F', "FF[+F][-F][\\F]");
        let mut previous = 0;
        for iterations in 0..5 {
            let len = expand(&spec, iterations).len();
            assert!(len >= previous, "length shrank at iteration {}", iterations);
            previous = len;
        }
    }

    #[test]
    fn test_expansion_capped_at_limit() {
        let spec = GrammarSpec::new("F").with_rule('F', "FF");
        let result = expand_with_limit(&spec, 20, 100);
        assert!(result.is_truncated());
        assert!(result.len() <= 100);
        assert!(result.len() >= 64);
    }

    #[test]
    fn test_truncation_keeps_whole_replacements() {
        let result = expand_with_limit(&branching(), 5, 20);
        assert!(result.is_truncated());
        // second pass stops before the ']' that would overflow
        assert_eq!(result.as_str(), "F[+F][-F][+F[+F][-F]");
        assert_eq!(result.len(), 20);
    }

    #[test]
    fn test_default_cap_stops_runaway_grammar() {
        let spec = GrammarSpec::new("F").with_rule('F', "FF[+F][-F][/F]");
        let result = expand(&spec, 12);
        assert!(result.is_truncated());
        assert!(result.len() <= MAX_EXPANDED_LEN);
    }

    #[test]
    fn test_count_symbol() {
        let result = expand(&branching(), 2);
        assert_eq!(result.count(']'), 8);
        assert_eq!(result.count('F'), 9);
    }
}
