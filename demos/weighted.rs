use cfg_gen::GrammarBuilder;
use std::collections::HashMap;
use std::error::Error;

/// Example of rule weights skewing selection across seeds
fn main() -> Result<(), Box<dyn Error>> {
    let mut builder = GrammarBuilder::new();
    let roll = builder.nonterminal("roll");

    let common = builder.terminal("common");
    let uncommon = builder.terminal("uncommon");
    let rare = builder.terminal("rare");

    // Buckets: common owns [0, 6), uncommon [6, 9), rare [9, 10).
    builder.weighted_rule(6, roll, &[common])?;
    builder.weighted_rule(3, roll, &[uncommon])?;
    builder.weighted_rule(1, roll, &[rare])?;

    let grammar = builder.build(roll)?;

    let mut counts: HashMap<String, usize> = HashMap::new();
    for seed in 0..1000u64 {
        *counts.entry(grammar.production(seed)?).or_default() += 1;
    }

    println!("1000 seeds against weights 6/3/1:");
    for outcome in ["common", "uncommon", "rare"] {
        println!("  {:<8} {}", outcome, counts.get(outcome).copied().unwrap_or(0));
    }

    Ok(())
}
