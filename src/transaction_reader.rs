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
use crate::itemizer::Itemizer;
use fnv::FnvHashMap;
use fnv::FnvHashSet;
use std::error::Error;
use std::fs::File;
use std::io::prelude::*;
use std::io::BufReader;

pub fn read_transactions(
    path: &str,
    itemizer: &mut Itemizer,
) -> Result<Vec<Vec<Item>>, Box<dyn Error>> {
    let file = File::open(path)?;
    group_transactions(BufReader::new(file), itemizer)
}

// Reads `entity,item` pairs, one per line, and groups them into one
// transaction per entity. Transactions come out in order of each
// entity's first appearance, and each transaction is deduplicated
// preserving first-occurrence order; the frequency sort later breaks
// ties on that order.
pub fn group_transactions<R: BufRead>(
    reader: R,
    itemizer: &mut Itemizer,
) -> Result<Vec<Vec<Item>>, Box<dyn Error>> {
    let mut slot_of_entity: FnvHashMap<String, usize> = FnvHashMap::default();
    let mut transactions: Vec<Vec<Item>> = vec![];
    for line in reader.lines() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        let mut fields = trimmed.splitn(2, ',');
        let entity = fields.next().unwrap_or("").trim();
        let item = match fields.next() {
            Some(item) => item.trim(),
            None => {
                return Err(format!("malformed line, expected `entity,item`: {}", trimmed).into())
            }
        };
        let item = itemizer.id_of(item);
        let slot = match slot_of_entity.get(entity) {
            Some(&slot) => slot,
            None => {
                slot_of_entity.insert(String::from(entity), transactions.len());
                transactions.push(vec![]);
                transactions.len() - 1
            }
        };
        transactions[slot].push(item);
    }
    for transaction in &mut transactions {
        dedupe_preserving_order(transaction);
    }
    Ok(transactions)
}

fn dedupe_preserving_order(v: &mut Vec<Item>) {
    let mut seen: FnvHashSet<Item> = FnvHashSet::default();
    v.retain(|&item| seen.insert(item));
}
