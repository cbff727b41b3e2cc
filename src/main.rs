mod command_line_args;
mod config;
mod fptree;
mod generate_rules;
mod item;
mod item_counter;
mod itemizer;
mod recommend;
mod rule;
mod transaction_reader;

use crate::command_line_args::parse_args_or_exit;
use crate::command_line_args::Arguments;
use crate::fptree::fp_growth;
use crate::fptree::FPTree;
use crate::generate_rules::generate_rules;
use crate::item::Item;
use crate::item_counter::count_item_frequencies;
use crate::itemizer::Itemizer;
use crate::recommend::recommend;
use crate::recommend::MajorityOverlap;
use crate::rule::RuleRecord;
use crate::transaction_reader::read_transactions;

use ordered_float::OrderedFloat;
use std::cmp::Reverse;
use std::error::Error;
use std::fs::File;
use std::process;
use std::time::Instant;

fn mine_fp_growth(args: &Arguments) -> Result<(), Box<dyn Error>> {
    println!("Mining data set: {}", args.input_file_path);
    let start = Instant::now();

    let timer = Instant::now();
    let mut itemizer: Itemizer = Itemizer::new();
    let mut transactions = read_transactions(&args.input_file_path, &mut itemizer)?;
    println!(
        "Read {} transactions in {} seconds.",
        transactions.len(),
        timer.elapsed().as_secs()
    );

    // One pass over the transactions for the global item frequencies,
    // then reorder each transaction by descending frequency so shared
    // prefixes pile up in the tree.
    let timer = Instant::now();
    let item_count = count_item_frequencies(&transactions);
    for transaction in &mut transactions {
        item_count.sort_descending(transaction);
    }
    let mut fptree = FPTree::new();
    for transaction in &transactions {
        fptree.insert(transaction, 1);
    }
    println!(
        "Built initial FPTree in {} seconds.",
        timer.elapsed().as_secs()
    );

    println!("Starting recursive FPGrowth...");
    let timer = Instant::now();
    let patterns = fp_growth(&fptree, args.config.min_support, &[]);
    println!(
        "FPGrowth generated {} frequent itemsets in {} seconds.",
        patterns.len(),
        timer.elapsed().as_secs()
    );

    let timer = Instant::now();
    let rules = generate_rules(&patterns, args.config.confidence_threshold)?;
    println!(
        "Generated {} rules in {} seconds.",
        rules.len(),
        timer.elapsed().as_secs()
    );

    let mut records: Vec<RuleRecord> = rules.iter().map(|r| r.to_record(&itemizer)).collect();
    records.sort_by_key(|r| Reverse(OrderedFloat(r.confidence)));
    let output = File::create(&args.output_rules_path)?;
    serde_json::to_writer_pretty(output, &records)?;
    println!("Wrote rules to {}.", args.output_rules_path);

    if let Some(ref items) = args.recommend_for {
        let known: Vec<Item> = items
            .split(',')
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .map(|s| itemizer.id_of(s))
            .collect();
        let suggested = recommend(&rules, &known, &MajorityOverlap);
        let names: Vec<&str> = suggested.iter().map(|&item| itemizer.str_of(item)).collect();
        println!("Recommended items: {}", names.join(" "));
    }

    println!("Total runtime: {} seconds", start.elapsed().as_secs());

    Ok(())
}

fn main() {
    let arguments = parse_args_or_exit();

    if let Err(err) = mine_fp_growth(&arguments) {
        println!("Error: {}", err);
        process::exit(1);
    }
}
