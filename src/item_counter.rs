use crate::item::Item;

pub struct ItemCounter {
    counter: Vec<u32>,
}

impl ItemCounter {
    pub fn new() -> ItemCounter {
        ItemCounter { counter: vec![] }
    }
    pub fn add(&mut self, item: &Item, count: u32) {
        let index = item.as_index();
        if self.counter.len() <= index {
            self.counter.resize(index + 1, 0);
        }
        self.counter[index] += count;
    }
    pub fn get(&self, item: &Item) -> u32 {
        let index = item.as_index();
        if index >= self.counter.len() {
            0
        } else {
            self.counter[index]
        }
    }
    // Stable sort by descending count; items with equal counts keep
    // their relative order from the input transaction. The tree's
    // prefix sharing depends on every transaction using this order.
    pub fn sort_descending(&self, v: &mut Vec<Item>) {
        v.sort_by(|a, b| self.get(b).cmp(&self.get(a)));
    }
}

// Counts each item once per transaction it appears in, regardless of
// transaction length. Transactions are deduplicated by the reader, so
// a plain pass over every entry is sufficient.
pub fn count_item_frequencies(transactions: &[Vec<Item>]) -> ItemCounter {
    let mut item_count = ItemCounter::new();
    for transaction in transactions {
        for item in transaction {
            item_count.add(item, 1);
        }
    }
    item_count
}
