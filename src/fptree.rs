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
use fnv::FnvHashMap;
use itertools::Itertools;
use rayon::prelude::*;

#[derive(Debug)]
struct FPNode {
    item: Item,
    count: u32,
    parent: usize,
    children: FnvHashMap<Item, usize>,
}

impl FPNode {
    fn new(item: Item, parent: usize) -> FPNode {
        FPNode {
            item,
            count: 0,
            parent,
            children: FnvHashMap::default(),
        }
    }

    fn is_root(&self) -> bool {
        self.item.is_null()
    }
}

const ROOT: usize = 0;

// Prefix tree over frequency-ordered transactions. Nodes live in an
// arena owned by the tree; parent and child links are arena indices,
// so conditional trees can be built and dropped per recursion frame
// without any node aliasing. The header index (item_lists) maps each
// item to every node carrying it.
pub struct FPTree {
    nodes: Vec<FPNode>,
    item_lists: Vec<Vec<usize>>,
}

impl FPTree {
    pub fn new() -> FPTree {
        FPTree {
            nodes: vec![FPNode::new(Item::null(), ROOT)],
            item_lists: Vec::new(),
        }
    }

    fn add_node(&mut self, parent: usize, item: Item) -> usize {
        let id = self.nodes.len();
        self.nodes.push(FPNode::new(item, parent));
        self.nodes[parent].children.insert(item, id);
        let index = item.as_index();
        if index >= self.item_lists.len() {
            self.item_lists.resize(index + 1, vec![]);
        }
        self.item_lists[index].push(id);
        id
    }

    fn child_of(&self, id: usize, item: Item) -> Option<usize> {
        self.nodes[id].children.get(&item).copied()
    }

    fn insert_child(&mut self, id: usize, item: Item, count: u32) -> usize {
        let child_id = match self.child_of(id, item) {
            Some(child_id) => child_id,
            None => self.add_node(id, item),
        };
        self.nodes[child_id].count += count;
        child_id
    }

    // Inserts a frequency-ordered transaction, descending from the
    // root and sharing any existing prefix. An empty transaction is a
    // no-op.
    pub fn insert(&mut self, transaction: &[Item], count: u32) {
        let mut id = ROOT;
        for &item in transaction {
            id = self.insert_child(id, item, count);
        }
    }

    // Sum of the counts of every node labelled `item`. By the header
    // invariant this is the number of transactions at this tree level
    // containing `item`.
    pub fn item_support(&self, item: Item) -> u32 {
        match self.item_lists.get(item.as_index()) {
            Some(nodes) => nodes.iter().map(|&id| self.nodes[id].count).sum(),
            None => 0,
        }
    }

    pub fn items_with_support_at_least(&self, min_count: u32) -> Vec<(Item, u32)> {
        (1..self.item_lists.len())
            .filter(|&index| !self.item_lists[index].is_empty())
            .map(|index| Item::with_id(index as u32))
            .map(|item| (item, self.item_support(item)))
            .filter(|&(_, support)| support >= min_count)
            .collect()
    }

    // Builds the tree of the conditional pattern base for `item`: for
    // each of the item's nodes, the ancestor path from the root stands
    // for `count` transactions that all shared that exact prefix, so
    // the path is inserted with that count. The result shares no nodes
    // with this tree.
    pub fn construct_conditional_tree(&self, item: Item) -> FPTree {
        let mut conditional_tree = FPTree::new();
        for &node_id in &self.item_lists[item.as_index()] {
            conditional_tree.insert(
                &self.path_from_root_to_excluding(node_id),
                self.nodes[node_id].count,
            );
        }
        conditional_tree
    }

    fn path_from_root_to_excluding(&self, node_id: usize) -> Vec<Item> {
        let mut path = vec![];
        let mut id = self.nodes[node_id].parent;
        loop {
            let node = &self.nodes[id];
            if node.is_root() {
                break;
            }
            path.push(node.item);
            id = node.parent;
        }
        path.reverse();
        path
    }
}

// A frequent itemset and its support count. Items are kept in the one
// canonical order (ascending id) no matter which recursive branch
// discovered the set, so equal sets always compare and hash equal.
#[derive(Clone, Hash, PartialEq, Eq, Debug, PartialOrd, Ord)]
pub struct ItemSet {
    pub items: Vec<Item>,
    pub count: u32,
}

impl ItemSet {
    pub fn new(items: Vec<Item>, count: u32) -> ItemSet {
        ItemSet {
            items: items.into_iter().sorted().collect(),
            count,
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }
}

// Recursively mines frequent itemsets. At each level, every item in
// the header with support at or above min_count yields `path + item`,
// and its conditional tree is mined with the extended path. Items
// below min_count are skipped outright; their conditional trees are
// never built. Sibling items share nothing, so they fan out across
// rayon worker threads.
pub fn fp_growth(fptree: &FPTree, min_count: u32, path: &[Item]) -> Vec<ItemSet> {
    fptree
        .items_with_support_at_least(min_count)
        .par_iter()
        .flat_map(|&(item, support)| -> Vec<ItemSet> {
            let mut itemset: Vec<Item> = Vec::from(path);
            itemset.push(item);

            let conditional_tree = fptree.construct_conditional_tree(item);
            let mut result = fp_growth(&conditional_tree, min_count, &itemset);

            result.push(ItemSet::new(itemset, support));
            result
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{fp_growth, FPTree, ItemSet};
    use crate::item::Item;
    use crate::item_counter::count_item_frequencies;
    use crate::itemizer::Itemizer;
    use fnv::FnvHashMap;

    fn build_tree(lines: &[Vec<&str>], itemizer: &mut Itemizer) -> FPTree {
        let mut transactions: Vec<Vec<Item>> = lines
            .iter()
            .map(|line| line.iter().map(|s| itemizer.id_of(s)).collect())
            .collect();
        let item_count = count_item_frequencies(&transactions);
        let mut tree = FPTree::new();
        for transaction in &mut transactions {
            item_count.sort_descending(transaction);
            tree.insert(transaction, 1);
        }
        tree
    }

    fn support_map(itemsets: &[ItemSet], itemizer: &Itemizer) -> FnvHashMap<Vec<String>, u32> {
        itemsets
            .iter()
            .map(|itemset| {
                let mut names: Vec<String> = itemset
                    .items
                    .iter()
                    .map(|&id| itemizer.str_of(id).to_owned())
                    .collect();
                names.sort();
                (names, itemset.count)
            })
            .collect()
    }

    fn names(strs: &[&str]) -> Vec<String> {
        strs.iter().map(|s| String::from(*s)).collect()
    }

    #[test]
    fn test_header_counts_match_transaction_counts() {
        let mut itemizer = Itemizer::new();
        let tree = build_tree(
            &[
                vec!["a", "b", "c"],
                vec!["a", "b"],
                vec!["a", "c", "d"],
                vec!["b", "c"],
            ],
            &mut itemizer,
        );
        assert_eq!(tree.item_support(itemizer.id_of("a")), 3);
        assert_eq!(tree.item_support(itemizer.id_of("b")), 3);
        assert_eq!(tree.item_support(itemizer.id_of("c")), 3);
        assert_eq!(tree.item_support(itemizer.id_of("d")), 1);
        assert_eq!(tree.item_support(itemizer.id_of("absent")), 0);
    }

    #[test]
    fn test_conditional_tree_counts() {
        let mut itemizer = Itemizer::new();
        let tree = build_tree(
            &[
                vec!["a", "b", "c"],
                vec!["a", "b"],
                vec!["a", "c", "d"],
                vec!["b", "c"],
            ],
            &mut itemizer,
        );
        // Three transactions contain c; of those, two contain a and
        // two contain b.
        let conditional = tree.construct_conditional_tree(itemizer.id_of("c"));
        assert_eq!(conditional.item_support(itemizer.id_of("a")), 2);
        assert_eq!(conditional.item_support(itemizer.id_of("b")), 2);
        assert_eq!(conditional.item_support(itemizer.id_of("c")), 0);
    }

    #[test]
    fn test_empty_tree_mines_nothing() {
        let tree = FPTree::new();
        assert!(fp_growth(&tree, 1, &[]).is_empty());
    }

    #[test]
    fn test_empty_transaction_is_noop() {
        let mut tree = FPTree::new();
        tree.insert(&[], 1);
        tree.insert(&[Item::with_id(1)], 1);
        tree.insert(&[], 1);
        assert_eq!(tree.item_support(Item::with_id(1)), 1);
        assert_eq!(fp_growth(&tree, 1, &[]).len(), 1);
    }

    #[test]
    fn test_known_dataset() {
        let mut itemizer = Itemizer::new();
        let tree = build_tree(
            &[
                vec!["a", "b", "c"],
                vec!["a", "b"],
                vec!["a", "c", "d"],
                vec!["b", "c"],
            ],
            &mut itemizer,
        );
        let itemsets = fp_growth(&tree, 2, &[]);
        let supports = support_map(&itemsets, &itemizer);
        assert_eq!(itemsets.len(), supports.len());
        assert_eq!(supports.len(), 6);
        assert_eq!(supports[&names(&["a"])], 3);
        assert_eq!(supports[&names(&["b"])], 3);
        assert_eq!(supports[&names(&["c"])], 3);
        assert_eq!(supports[&names(&["a", "b"])], 2);
        assert_eq!(supports[&names(&["a", "c"])], 2);
        assert_eq!(supports[&names(&["b", "c"])], 2);
    }

    #[test]
    fn test_min_support_one_finds_every_itemset() {
        let mut itemizer = Itemizer::new();
        let tree = build_tree(&[vec!["a", "b", "c"], vec!["a", "b"]], &mut itemizer);
        let supports = support_map(&fp_growth(&tree, 1, &[]), &itemizer);
        // Every non-empty subset of some transaction, with its exact
        // transaction count.
        assert_eq!(supports.len(), 7);
        assert_eq!(supports[&names(&["a"])], 2);
        assert_eq!(supports[&names(&["b"])], 2);
        assert_eq!(supports[&names(&["c"])], 1);
        assert_eq!(supports[&names(&["a", "b"])], 2);
        assert_eq!(supports[&names(&["a", "c"])], 1);
        assert_eq!(supports[&names(&["b", "c"])], 1);
        assert_eq!(supports[&names(&["a", "b", "c"])], 1);
    }

    #[test]
    fn test_support_monotonicity() {
        let mut itemizer = Itemizer::new();
        let tree = build_tree(
            &[
                vec!["a", "b", "c"],
                vec!["a", "b"],
                vec!["a", "c", "d"],
                vec!["b", "c"],
                vec!["b", "c", "d"],
            ],
            &mut itemizer,
        );
        let itemsets = fp_growth(&tree, 1, &[]);
        let supports: FnvHashMap<Vec<Item>, u32> = itemsets
            .iter()
            .map(|i| (i.items.clone(), i.count))
            .collect();
        for itemset in &itemsets {
            if itemset.len() < 2 {
                continue;
            }
            // Every subset one item smaller is present, with at least
            // the superset's support.
            for skip in 0..itemset.len() {
                let subset: Vec<Item> = itemset
                    .items
                    .iter()
                    .enumerate()
                    .filter(|&(i, _)| i != skip)
                    .map(|(_, &item)| item)
                    .collect();
                assert!(supports[&subset] >= itemset.count);
            }
        }
    }

    #[test]
    fn test_mining_is_deterministic() {
        let mut itemizer = Itemizer::new();
        let tree = build_tree(
            &[
                vec!["a", "b", "c"],
                vec!["a", "b"],
                vec!["a", "c", "d"],
                vec!["b", "c"],
            ],
            &mut itemizer,
        );
        let mut first = fp_growth(&tree, 1, &[]);
        let mut second = fp_growth(&tree, 1, &[]);
        first.sort();
        second.sort();
        assert_eq!(first, second);
    }
}
