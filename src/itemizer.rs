use crate::item::Item;
use fnv::FnvHashMap;

// Interns item identifier strings to dense u32-backed Item handles.
// Ids start at 1; 0 is the tree root sentinel.
pub struct Itemizer {
    next_item_id: u32,
    item_str_to_id: FnvHashMap<String, Item>,
    item_id_to_str: Vec<String>,
}

impl Itemizer {
    pub fn new() -> Itemizer {
        Itemizer {
            next_item_id: 1,
            item_str_to_id: FnvHashMap::default(),
            item_id_to_str: vec![],
        }
    }
    pub fn id_of(&mut self, item: &str) -> Item {
        if let Some(id) = self.item_str_to_id.get(item) {
            return *id;
        }
        let id = self.next_item_id;
        self.next_item_id += 1;
        self.item_str_to_id
            .insert(String::from(item), Item::with_id(id));
        self.item_id_to_str.push(String::from(item));
        assert_eq!(self.item_id_to_str.len(), id as usize);
        assert_eq!(self.str_of(Item::with_id(id)), item);
        Item::with_id(id)
    }
    pub fn str_of(&self, id: Item) -> &str {
        &self.item_id_to_str[id.as_index() - 1]
    }
}

#[cfg(test)]
mod tests {
    use super::Itemizer;

    #[test]
    fn test_intern_roundtrip() {
        let mut itemizer = Itemizer::new();
        let a = itemizer.id_of("1984");
        let b = itemizer.id_of("dune");
        assert_ne!(a, b);
        assert_eq!(itemizer.id_of("1984"), a);
        assert_eq!(itemizer.str_of(a), "1984");
        assert_eq!(itemizer.str_of(b), "dune");
        assert!(!a.is_null());
    }
}
