//! Round-based rewriting engine.
//!
//! Expansion rewrites the sentential form one full left-to-right scan at a
//! time. Terminals are copied through untouched; each non-terminal draws one
//! PRNG value, picks a rule by cumulative weight, and splices that rule's
//! replacement in place. Rewriting stops when the form is all-terminal or a
//! safety bound trips.

use crate::grammar::{Grammar, LimitPolicy, Rule, Symbol};
use crate::rng::Xorshift64;
use crate::utils::{GrammarError, Result};

/// One expansion run: the sentential form and PRNG state for a single
/// `(grammar, seed)` request. Discarded after serialization.
pub(crate) struct Expansion<'g> {
    grammar: &'g Grammar,
    rng: Xorshift64,
    form: Vec<Symbol>,
}

impl<'g> Expansion<'g> {
    pub(crate) fn new(grammar: &'g Grammar, seed: u64) -> Self {
        Expansion {
            grammar,
            rng: Xorshift64::new(seed),
            form: vec![grammar.start_symbol()],
        }
    }

    /// Rewrite until all-terminal or a bound trips, then serialize.
    pub(crate) fn run(mut self) -> Result<String> {
        let limit = self.grammar.config().max_form_symbols;
        let max_rounds = self.grammar.config().max_rounds;
        let policy = self.grammar.config().limit_policy;

        let mut rounds = 0;
        while !self.all_terminal() {
            // The size bound is checked once, against the round's starting
            // size: a round that starts above it is the last round, whatever
            // it produces.
            let last_round = self.form.len() > limit;
            self.rewrite_round()?;
            rounds += 1;

            if last_round {
                if !self.all_terminal() && policy == LimitPolicy::Fail {
                    return Err(GrammarError::FormOverflow {
                        symbols: self.form.len(),
                        limit,
                    });
                }
                break;
            }
            if rounds >= max_rounds && !self.all_terminal() {
                if policy == LimitPolicy::Fail {
                    return Err(GrammarError::RoundLimit { rounds });
                }
                break;
            }
        }

        Ok(self.concat())
    }

    /// One full scan: copy terminals, rewrite every non-terminal once
    fn rewrite_round(&mut self) -> Result<()> {
        let mut next = Vec::with_capacity(self.form.len());

        for &symbol in &self.form {
            if self.grammar.is_terminal(symbol) {
                next.push(symbol);
                continue;
            }

            let candidates = self.grammar.rule_indices(symbol);
            if candidates.is_empty() {
                // Guarded here as well as at build time: an empty candidate
                // list must never reach the selector's modulo.
                return Err(GrammarError::MissingRule(
                    self.grammar.name(symbol).to_string(),
                ));
            }

            let rule = select_weighted(self.grammar, candidates, self.rng.next_u64());
            next.extend_from_slice(rule.rhs());
        }

        self.form = next;
        Ok(())
    }

    fn all_terminal(&self) -> bool {
        self.form.iter().all(|&s| self.grammar.is_terminal(s))
    }

    /// Concatenate the form's literal text, in order, with no separators.
    ///
    /// Under [`LimitPolicy::Truncate`] a leaked non-terminal contributes
    /// the name it was declared with.
    fn concat(&self) -> String {
        let mut out = String::new();
        for &symbol in &self.form {
            out.push_str(self.grammar.name(symbol));
        }
        out
    }
}

/// Cumulative-bucket weighted selection.
///
/// With `sum` the total candidate weight, rule `i` owns the half-open
/// bucket `[prefix_sum(i), prefix_sum(i) + weight(i))` of `[0, sum)`, and
/// `value % sum` picks the bucket. Candidates must be non-empty; the caller
/// checks before drawing a PRNG value.
fn select_weighted<'g>(grammar: &'g Grammar, candidates: &[usize], value: u64) -> &'g Rule {
    let sum: u64 = candidates
        .iter()
        .map(|&idx| u64::from(grammar.rules()[idx].weight()))
        .sum();

    let mut countdown = value % sum;
    for &idx in candidates {
        let rule = &grammar.rules()[idx];
        let weight = u64::from(rule.weight());
        if countdown < weight {
            return rule;
        }
        countdown -= weight;
    }
    unreachable!("countdown starts below the bucket sum")
}
