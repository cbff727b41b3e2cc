use crate::item::Item;
use crate::itemizer::Itemizer;
use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};

// A directional implication antecedent => consequent. Support is the
// transaction count of the union itemset; confidence is a percentage
// in [0,100].
#[derive(Clone, Debug)]
pub struct Rule {
    pub antecedent: Vec<Item>,
    pub consequent: Vec<Item>,
    pub support: u32,
    pub confidence: f64,
}

// Can't derive Eq as f64 doesn't satisfy Eq; identity is the
// (antecedent, consequent) pair.
impl Eq for Rule {}

impl PartialEq for Rule {
    fn eq(&self, other: &Rule) -> bool {
        self.antecedent == other.antecedent && self.consequent == other.consequent
    }
}

impl Hash for Rule {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.antecedent.hash(state);
        self.consequent.hash(state);
    }
}

impl Rule {
    pub fn to_record(&self, itemizer: &Itemizer) -> RuleRecord {
        RuleRecord {
            antecedent: self
                .antecedent
                .iter()
                .map(|&id| itemizer.str_of(id).to_owned())
                .collect(),
            consequent: self
                .consequent
                .iter()
                .map(|&id| itemizer.str_of(id).to_owned())
                .collect(),
            support: self.support,
            confidence: self.confidence,
        }
    }
}

// Wire form of a rule, as stored in the output JSON file.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RuleRecord {
    pub antecedent: Vec<String>,
    pub consequent: Vec<String>,
    pub support: u32,
    pub confidence: f64,
}
