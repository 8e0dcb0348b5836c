//! Cfg-Gen is a weighted context-free grammar expansion engine.
//!
//! This library allows you to declare grammars where non-terminals rewrite
//! to weighted sequences of terminals and other non-terminals, and then
//! expand them into text. Every rule choice is driven by a deterministic
//! xorshift stream, so the same grammar and seed always produce the same
//! output.
//!
//! # Example
//!
//! ```rust
//! use cfg_gen::GrammarBuilder;
//!
//! // Declare the symbols, then the rules that rewrite them
//! let mut builder = GrammarBuilder::new();
//! let greeting = builder.nonterminal("greeting");
//! let subject = builder.nonterminal("subject");
//! let hello = builder.terminal("Hello ");
//! let world = builder.terminal("world");
//! let rust = builder.terminal("Rust");
//!
//! builder.rule(greeting, &[hello, subject]).unwrap();
//! builder.rule(subject, &[world]).unwrap();
//! builder.rule(subject, &[rust]).unwrap();
//! let grammar = builder.build(greeting).unwrap();
//!
//! // Same seed, same output
//! let text = grammar.production(42).unwrap();
//! assert_eq!(text, grammar.production(42).unwrap());
//! assert!(text == "Hello world" || text == "Hello Rust");
//! ```

pub mod grammar;
pub mod rng;
pub mod utils;

mod engine;

pub use grammar::{Grammar, GrammarBuilder, GrammarConfig, LimitPolicy, Rule, Symbol};
pub use rng::Xorshift64;
pub use utils::{GrammarError, Result};
