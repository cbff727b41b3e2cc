// Copyright 2018 Chris Pearce
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use crate::item::Item;
use crate::rule::Rule;
use fnv::FnvHashSet;

// Decides whether a rule's antecedent is satisfied by an entity's
// known item set. A policy, not part of the miner; callers pick or
// supply their own.
pub trait CompatibilityPolicy {
    fn compatible(&self, known: &[Item], antecedent: &[Item]) -> bool;
}

// At least one antecedent item, and at least half of the antecedent,
// present in the known set.
pub struct MajorityOverlap;

impl CompatibilityPolicy for MajorityOverlap {
    fn compatible(&self, known: &[Item], antecedent: &[Item]) -> bool {
        let present = antecedent
            .iter()
            .filter(|item| known.contains(item))
            .count();
        present >= 1 && present * 2 >= antecedent.len()
    }
}

// Unions the consequents of every rule compatible with the known set,
// deduplicated and with already-known items dropped.
pub fn recommend(rules: &[Rule], known: &[Item], policy: &dyn CompatibilityPolicy) -> Vec<Item> {
    let mut seen: FnvHashSet<Item> = known.iter().cloned().collect();
    let mut result: Vec<Item> = vec![];
    for rule in rules {
        if !policy.compatible(known, &rule.antecedent) {
            continue;
        }
        for &item in &rule.consequent {
            if seen.insert(item) {
                result.push(item);
            }
        }
    }
    result
}
