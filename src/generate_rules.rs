use crate::fptree::ItemSet;
use crate::item::Item;
use crate::rule::Rule;
use fnv::FnvHashMap;
use std::error::Error;
use std::fmt;

// Support lookup keyed by canonical (ascending id) item vectors. The
// miner and rule generation both use this one key form; any slice of
// a canonical vector is itself canonical, so antecedent and consequent
// lookups are exact.
pub type ItemsetSupport = FnvHashMap<Vec<Item>, u32>;

#[derive(Debug, PartialEq)]
pub enum RuleError {
    // The same canonical itemset arrived with two different support
    // counts; the miner double-discovered a set.
    ConflictingSupport(Vec<Item>),
    // A rule's antecedent is missing from the support map. Antecedents
    // are frequent whenever their superset is, so this means the map's
    // keys aren't canonical. Never treated as zero support.
    MissingAntecedentSupport(Vec<Item>),
}

impl fmt::Display for RuleError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RuleError::ConflictingSupport(items) => write!(
                f,
                "itemset {:?} recorded with conflicting support counts",
                items
            ),
            RuleError::MissingAntecedentSupport(items) => {
                write!(f, "no support recorded for frequent antecedent {:?}", items)
            }
        }
    }
}

impl Error for RuleError {}

pub fn itemset_support(itemsets: &[ItemSet]) -> Result<ItemsetSupport, RuleError> {
    let mut support = ItemsetSupport::default();
    for itemset in itemsets {
        if let Some(prev) = support.insert(itemset.items.clone(), itemset.count) {
            if prev != itemset.count {
                return Err(RuleError::ConflictingSupport(itemset.items.clone()));
            }
        }
    }
    Ok(support)
}

fn make_rule(
    antecedent: &[Item],
    consequent: &[Item],
    union_support: u32,
    support: &ItemsetSupport,
    min_confidence: f64,
) -> Result<Option<Rule>, RuleError> {
    let antecedent_support = match support.get(antecedent) {
        Some(&count) => count,
        None => return Err(RuleError::MissingAntecedentSupport(antecedent.to_vec())),
    };
    let confidence = f64::from(union_support) / f64::from(antecedent_support) * 100.0;
    if confidence < min_confidence {
        return Ok(None);
    }
    Ok(Some(Rule {
        antecedent: antecedent.to_vec(),
        consequent: consequent.to_vec(),
        support: union_support,
        confidence,
    }))
}

// Emits every rule clearing min_confidence (a percentage) from each
// multi-item frequent itemset. Each split point of the itemset's
// canonical order yields the implication in both directions; callers
// must treat the output as a set, no ordering is guaranteed.
pub fn generate_rules(itemsets: &[ItemSet], min_confidence: f64) -> Result<Vec<Rule>, RuleError> {
    let support = itemset_support(itemsets)?;
    let mut rules: Vec<Rule> = vec![];
    for itemset in itemsets.iter().filter(|i| i.len() > 1) {
        for split in 1..itemset.len() {
            let (head, tail) = itemset.items.split_at(split);
            if let Some(rule) = make_rule(head, tail, itemset.count, &support, min_confidence)? {
                rules.push(rule);
            }
            if let Some(rule) = make_rule(tail, head, itemset.count, &support, min_confidence)? {
                rules.push(rule);
            }
        }
    }
    Ok(rules)
}
