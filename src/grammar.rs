use std::collections::{HashMap, HashSet};

use rand::RngCore;

use crate::engine::Expansion;
use crate::utils::{GrammarError, Result};

/// Handle to a symbol declared through a [`GrammarBuilder`].
///
/// Symbols are compared by identity, not by name: two terminals declared
/// with the same text are distinct symbols. A handle is only meaningful
/// with the builder (and the [`Grammar`] it builds) that issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Symbol(pub(crate) u32);

/// Table entry behind a [`Symbol`] handle
#[derive(Debug, Clone)]
struct SymbolInfo {
    /// Literal text for terminals, diagnostic name for non-terminals
    name: String,
    terminal: bool,
}

/// A weighted production rule
///
/// The left-hand side is a single non-terminal; the right-hand side is an
/// ordered sequence of symbols, possibly empty. Weights are positive
/// integers and default to 1.
#[derive(Debug, Clone)]
pub struct Rule {
    lhs: Symbol,
    rhs: Vec<Symbol>,
    weight: u32,
}

impl Rule {
    /// The non-terminal this rule rewrites
    pub fn lhs(&self) -> Symbol {
        self.lhs
    }

    /// The replacement sequence, in order
    pub fn rhs(&self) -> &[Symbol] {
        &self.rhs
    }

    /// The selection weight of this rule among its `lhs` alternatives
    pub fn weight(&self) -> u32 {
        self.weight
    }
}

/// What to do when a safety bound trips while non-terminals remain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LimitPolicy {
    /// Report the bound trip as an error
    #[default]
    Fail,
    /// Stop rewriting and serialize the form as-is; a leaked non-terminal
    /// contributes the name it was declared with
    Truncate,
}

/// Configuration options for expansion behavior
#[derive(Debug, Clone)]
pub struct GrammarConfig {
    /// Symbol-count threshold checked against the form at the start of
    /// each round; a round that starts above it is the last round
    pub max_form_symbols: usize,
    /// Hard cap on rewriting rounds, for grammars that oscillate below the
    /// size threshold without converging
    pub max_rounds: usize,
    /// Behavior when either bound trips before the form is all-terminal
    pub limit_policy: LimitPolicy,
}

impl Default for GrammarConfig {
    fn default() -> Self {
        GrammarConfig {
            max_form_symbols: 100,
            max_rounds: 512,
            limit_policy: LimitPolicy::Fail,
        }
    }
}

/// The complete grammar: symbol table, weighted rules, and a start symbol
///
/// A `Grammar` is read-only once built; expansion requests own their
/// sentential form and PRNG state, so independent calls never share
/// mutable state.
#[derive(Debug, Clone)]
pub struct Grammar {
    symbols: Vec<SymbolInfo>,
    rules: Vec<Rule>,
    /// Symbol identity -> rule indices, preserving declaration order
    by_lhs: HashMap<Symbol, Vec<usize>>,
    start: Symbol,
    config: GrammarConfig,
}

impl Grammar {
    /// Produce the fully expanded output for `seed`.
    ///
    /// This is a pure function of `(grammar, seed)`: the seed initializes
    /// the xorshift stream that drives every rule choice, so identical
    /// inputs always yield identical output.
    pub fn production(&self, seed: u64) -> Result<String> {
        Expansion::new(self, seed).run()
    }

    /// Produce output for a randomly drawn seed
    pub fn generate(&self) -> Result<String> {
        self.production(rand::thread_rng().next_u64())
    }

    /// The designated start symbol
    pub fn start_symbol(&self) -> Symbol {
        self.start
    }

    /// All rules, in declaration order
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// The rules whose `lhs` is `symbol`, preserving declaration order.
    ///
    /// The order is load-bearing: the weighted selector walks candidates
    /// in declaration order, so it determines bucket layout.
    pub fn rules_for(&self, symbol: Symbol) -> impl Iterator<Item = &Rule> {
        self.rule_indices(symbol).iter().map(|&idx| &self.rules[idx])
    }

    pub(crate) fn rule_indices(&self, symbol: Symbol) -> &[usize] {
        self.by_lhs.get(&symbol).map(Vec::as_slice).unwrap_or(&[])
    }

    /// The literal text (terminals) or diagnostic name (non-terminals) of
    /// a symbol
    pub fn name(&self, symbol: Symbol) -> &str {
        &self.symbols[symbol.0 as usize].name
    }

    /// Whether a symbol is a terminal
    pub fn is_terminal(&self, symbol: Symbol) -> bool {
        self.symbols[symbol.0 as usize].terminal
    }

    /// Get a reference to the grammar's configuration
    pub fn config(&self) -> &GrammarConfig {
        &self.config
    }

    /// Set a new configuration
    pub fn set_config(&mut self, config: GrammarConfig) {
        self.config = config;
    }
}

/// Builder for declaring symbols and rules and assembling a [`Grammar`]
#[derive(Debug, Default)]
pub struct GrammarBuilder {
    symbols: Vec<SymbolInfo>,
    rules: Vec<Rule>,
    config: GrammarConfig,
}

impl GrammarBuilder {
    /// Create an empty builder with default configuration
    pub fn new() -> Self {
        GrammarBuilder::default()
    }

    /// Declare a terminal symbol carrying literal text
    pub fn terminal(&mut self, text: &str) -> Symbol {
        self.intern(text, true)
    }

    /// Declare a non-terminal symbol with a diagnostic name
    pub fn nonterminal(&mut self, name: &str) -> Symbol {
        self.intern(name, false)
    }

    fn intern(&mut self, name: &str, terminal: bool) -> Symbol {
        let handle = Symbol(self.symbols.len() as u32);
        self.symbols.push(SymbolInfo {
            name: name.to_string(),
            terminal,
        });
        handle
    }

    /// Add a weight-1 rule rewriting `lhs` to `rhs`
    pub fn rule(&mut self, lhs: Symbol, rhs: &[Symbol]) -> Result<&mut Self> {
        self.weighted_rule(1, lhs, rhs)
    }

    /// Add a rule with an explicit selection weight.
    ///
    /// The weight must be at least 1: a zero-weight rule would own an empty
    /// bucket and corrupt the selector's prefix sums. An empty `rhs` is an
    /// epsilon production and splices nothing.
    pub fn weighted_rule(&mut self, weight: u32, lhs: Symbol, rhs: &[Symbol]) -> Result<&mut Self> {
        let info = &self.symbols[lhs.0 as usize];
        if info.terminal {
            return Err(GrammarError::TerminalLhs(info.name.clone()));
        }
        if weight == 0 {
            return Err(GrammarError::ZeroWeight(info.name.clone()));
        }

        self.rules.push(Rule {
            lhs,
            rhs: rhs.to_vec(),
            weight,
        });
        Ok(self)
    }

    /// Set the configuration
    pub fn config(&mut self, config: GrammarConfig) -> &mut Self {
        self.config = config;
        self
    }

    /// Assemble the grammar with `start` as its start symbol.
    ///
    /// Validates that every non-terminal reachable from `start` has at
    /// least one rule, so the selector can never face an empty candidate
    /// list mid-expansion.
    pub fn build(self, start: Symbol) -> Result<Grammar> {
        let mut by_lhs: HashMap<Symbol, Vec<usize>> = HashMap::new();
        for (idx, rule) in self.rules.iter().enumerate() {
            by_lhs.entry(rule.lhs).or_default().push(idx);
        }

        let grammar = Grammar {
            symbols: self.symbols,
            rules: self.rules,
            by_lhs,
            start,
            config: self.config,
        };
        grammar.check_coverage()?;
        Ok(grammar)
    }
}

impl Grammar {
    /// Walk the non-terminals reachable from the start symbol and reject
    /// any that no rule rewrites
    fn check_coverage(&self) -> Result<()> {
        let mut pending = Vec::new();
        let mut visited = HashSet::new();

        if !self.is_terminal(self.start) {
            pending.push(self.start);
            visited.insert(self.start);
        }

        while let Some(symbol) = pending.pop() {
            let indices = self.rule_indices(symbol);
            if indices.is_empty() {
                return Err(GrammarError::MissingRule(self.name(symbol).to_string()));
            }
            for &idx in indices {
                for &next in self.rules[idx].rhs() {
                    if !self.is_terminal(next) && visited.insert(next) {
                        pending.push(next);
                    }
                }
            }
        }

        Ok(())
    }
}
