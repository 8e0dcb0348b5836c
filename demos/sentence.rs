use cfg_gen::GrammarBuilder;
use std::error::Error;

/// Example of declaring a sentence grammar and walking it over seeds
fn main() -> Result<(), Box<dyn Error>> {
    let mut builder = GrammarBuilder::new();

    let sentence = builder.nonterminal("sentence");
    let subject = builder.nonterminal("subject");
    let adjective = builder.nonterminal("adjective");
    let noun = builder.nonterminal("noun");
    let verb = builder.nonterminal("verb");

    let the = builder.terminal("The ");
    let a = builder.terminal("A ");
    let space = builder.terminal(" ");
    let stop = builder.terminal(".");

    let quick = builder.terminal("quick");
    let lazy = builder.terminal("lazy");
    let clever = builder.terminal("clever");
    let fox = builder.terminal("fox");
    let dog = builder.terminal("dog");
    let programmer = builder.terminal("programmer");
    let jumps = builder.terminal("jumps");
    let sleeps = builder.terminal("sleeps");
    let refactors = builder.terminal("refactors");

    builder.rule(sentence, &[subject, space, verb, stop])?;
    builder.rule(subject, &[the, adjective, space, noun])?;
    builder.rule(subject, &[a, adjective, space, noun])?;
    builder.rule(adjective, &[quick])?;
    builder.rule(adjective, &[lazy])?;
    builder.rule(adjective, &[clever])?;
    builder.rule(noun, &[fox])?;
    builder.rule(noun, &[dog])?;
    builder.rule(noun, &[programmer])?;
    builder.rule(verb, &[jumps])?;
    builder.rule(verb, &[sleeps])?;
    builder.rule(verb, &[refactors])?;

    let grammar = builder.build(sentence)?;

    println!("Same seed, same sentence; different seeds, different walks:");
    for seed in 1..=5u64 {
        println!("{}. {}", seed, grammar.production(seed)?);
    }

    // Seedless generation draws a fresh seed each call.
    println!("\nSeedless:");
    for i in 1..=3 {
        println!("{}. {}", i, grammar.generate()?);
    }

    Ok(())
}
