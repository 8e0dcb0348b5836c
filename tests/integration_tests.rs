use cfg_gen::{Grammar, GrammarBuilder, GrammarConfig, GrammarError, LimitPolicy};
use pretty_assertions::assert_eq;

/// A small recursive expression grammar, weighted toward termination
fn expression_grammar() -> Grammar {
    let mut builder = GrammarBuilder::new();
    let expr = builder.nonterminal("expr");
    let term = builder.nonterminal("term");
    let digit = builder.nonterminal("digit");
    let plus = builder.terminal(" + ");
    let times = builder.terminal(" * ");
    let zero = builder.terminal("0");
    let one = builder.terminal("1");
    let two = builder.terminal("2");

    builder.weighted_rule(3, expr, &[term]).unwrap();
    builder.rule(expr, &[term, plus, expr]).unwrap();
    builder.weighted_rule(3, term, &[digit]).unwrap();
    builder.rule(term, &[digit, times, term]).unwrap();
    builder.rule(digit, &[zero]).unwrap();
    builder.rule(digit, &[one]).unwrap();
    builder.rule(digit, &[two]).unwrap();

    builder.build(expr).unwrap()
}

#[test]
fn test_determinism() {
    let grammar = expression_grammar();

    for seed in [0u64, 1, 7, 42, 1234567, u64::MAX] {
        let first = grammar.production(seed).unwrap();
        let second = grammar.production(seed).unwrap();
        assert_eq!(first, second, "seed {} must replay identically", seed);
    }

    // A clone shares no state with the original but replays the same runs.
    let cloned = grammar.clone();
    assert_eq!(
        grammar.production(99).unwrap(),
        cloned.production(99).unwrap()
    );
}

#[test]
fn test_single_rule_terminal() {
    let mut builder = GrammarBuilder::new();
    let start = builder.nonterminal("start");
    let a = builder.terminal("A");
    builder.rule(start, &[a]).unwrap();
    let grammar = builder.build(start).unwrap();

    for seed in 0..64u64 {
        assert_eq!(grammar.production(seed).unwrap(), "A");
    }
}

#[test]
fn test_weighted_selection_buckets() {
    // Weights [2, 3, 5]: seed drives the first decision directly, so the
    // bucket layout of [0, 10) is visible through the output.
    let mut builder = GrammarBuilder::new();
    let start = builder.nonterminal("start");
    let x = builder.terminal("x");
    let y = builder.terminal("y");
    let z = builder.terminal("z");
    builder.weighted_rule(2, start, &[x]).unwrap();
    builder.weighted_rule(3, start, &[y]).unwrap();
    builder.weighted_rule(5, start, &[z]).unwrap();
    let grammar = builder.build(start).unwrap();

    let expectations = [
        (0u64, "x"),
        (1, "x"),
        (2, "y"),
        (4, "y"),
        (5, "z"),
        (9, "z"),
        (10, "x"),
    ];
    for (seed, expected) in expectations {
        assert_eq!(grammar.production(seed).unwrap(), expected);
    }
}

#[test]
fn test_concatenation_is_exact() {
    // No separators are ever inserted; spacing lives inside terminal text.
    let mut builder = GrammarBuilder::new();
    let start = builder.nonterminal("start");
    let foo = builder.terminal("foo");
    let empty = builder.terminal("");
    let bar = builder.terminal("bar baz");
    builder.rule(start, &[foo, empty, bar]).unwrap();
    let grammar = builder.build(start).unwrap();

    let result = grammar.production(5).unwrap();
    assert_eq!(result, "foobar baz");
    assert_eq!(result.len(), "foo".len() + "".len() + "bar baz".len());
}

#[test]
fn test_missing_rule_is_reported() {
    let mut builder = GrammarBuilder::new();
    let start = builder.nonterminal("start");
    let dangling = builder.nonterminal("dangling");
    builder.rule(start, &[dangling]).unwrap();

    let err = builder.build(start).unwrap_err();
    assert_eq!(err, GrammarError::MissingRule("dangling".to_string()));
}

#[test]
fn test_missing_rule_behind_alternatives() {
    // The uncovered non-terminal sits behind one of two alternatives; the
    // coverage walk still finds it, so no seed can reach undefined
    // selection arithmetic at expansion time.
    let mut builder = GrammarBuilder::new();
    let start = builder.nonterminal("start");
    let safe = builder.terminal("safe");
    let hole = builder.nonterminal("hole");
    builder.rule(start, &[safe]).unwrap();
    builder.rule(start, &[hole]).unwrap();

    let err = builder.build(start).unwrap_err();
    assert_eq!(err, GrammarError::MissingRule("hole".to_string()));
}

/// start -> width copies of `mid`, mid -> inner, inner -> "x"
///
/// Round sizes: 1, width, width, then all-terminal. The form-size bound
/// sees `width` at the start of the second rewrite round.
fn wide_grammar(width: usize, policy: LimitPolicy) -> Grammar {
    let mut builder = GrammarBuilder::new();
    let start = builder.nonterminal("start");
    let mid = builder.nonterminal("m");
    let inner = builder.nonterminal("i");
    let x = builder.terminal("x");

    let rhs = vec![mid; width];
    builder.rule(start, &rhs).unwrap();
    builder.rule(mid, &[inner]).unwrap();
    builder.rule(inner, &[x]).unwrap();

    let mut config = GrammarConfig::default();
    config.limit_policy = policy;
    builder.config(config);
    builder.build(start).unwrap()
}

#[test]
fn test_form_at_exactly_100_keeps_expanding() {
    let grammar = wide_grammar(100, LimitPolicy::Fail);
    let result = grammar.production(17).unwrap();
    assert_eq!(result, "x".repeat(100));
}

#[test]
fn test_form_at_101_trips_the_bound() {
    let grammar = wide_grammar(101, LimitPolicy::Fail);
    let err = grammar.production(17).unwrap_err();
    assert_eq!(
        err,
        GrammarError::FormOverflow {
            symbols: 101,
            limit: 100,
        }
    );
}

#[test]
fn test_truncate_policy_leaks_nonterminal_names() {
    // Compatibility mode: the tripped bound serializes the form as-is and
    // the leaked non-terminal contributes its declared name.
    let grammar = wide_grammar(101, LimitPolicy::Truncate);
    let result = grammar.production(17).unwrap();
    assert_eq!(result, "i".repeat(101));
}

#[test]
fn test_oscillating_grammar_hits_round_limit() {
    let mut builder = GrammarBuilder::new();
    let ping = builder.nonterminal("ping");
    let pong = builder.nonterminal("pong");
    builder.rule(ping, &[pong]).unwrap();
    builder.rule(pong, &[ping]).unwrap();

    let mut config = GrammarConfig::default();
    config.max_rounds = 8;
    builder.config(config);
    let grammar = builder.build(ping).unwrap();

    let err = grammar.production(1).unwrap_err();
    assert_eq!(err, GrammarError::RoundLimit { rounds: 8 });
}

#[test]
fn test_oscillating_grammar_truncates_under_policy() {
    let mut builder = GrammarBuilder::new();
    let ping = builder.nonterminal("ping");
    let pong = builder.nonterminal("pong");
    builder.rule(ping, &[pong]).unwrap();
    builder.rule(pong, &[ping]).unwrap();

    let mut config = GrammarConfig::default();
    config.max_rounds = 8;
    config.limit_policy = LimitPolicy::Truncate;
    builder.config(config);
    let grammar = builder.build(ping).unwrap();

    // Eight rounds from [ping] lands back on ping.
    assert_eq!(grammar.production(1).unwrap(), "ping");
}

#[test]
fn test_epsilon_production() {
    let mut builder = GrammarBuilder::new();
    let start = builder.nonterminal("start");
    builder.rule(start, &[]).unwrap();
    let grammar = builder.build(start).unwrap();

    assert_eq!(grammar.production(31).unwrap(), "");
}

#[test]
fn test_generate_draws_a_fresh_seed() {
    let mut builder = GrammarBuilder::new();
    let start = builder.nonterminal("start");
    let heads = builder.terminal("heads");
    let tails = builder.terminal("tails");
    builder.rule(start, &[heads]).unwrap();
    builder.rule(start, &[tails]).unwrap();
    let grammar = builder.build(start).unwrap();

    for _ in 0..10 {
        let result = grammar.generate().unwrap();
        assert!(result == "heads" || result == "tails");
    }
}

#[test]
fn test_recursive_grammar_stays_within_bounds() {
    let grammar = expression_grammar();

    // Seeds where expansion converges produce pure arithmetic text; seeds
    // where it does not report a bound error instead of leaking symbols.
    for seed in 0..200u64 {
        match grammar.production(seed) {
            Ok(text) => {
                assert!(!text.is_empty());
                assert!(
                    text.chars()
                        .all(|c| "012+* ".contains(c)),
                    "unexpected character in {:?}",
                    text
                );
            }
            Err(
                GrammarError::FormOverflow { .. } | GrammarError::RoundLimit { .. },
            ) => {}
            Err(other) => panic!("unexpected error: {}", other),
        }
    }
}
