//! Stores of items that come with assignable default values.

/// A store whose items can be reset to registered defaults.
pub trait DefaultStore<T> {
    fn get(&self, query: impl Fn(&T) -> bool) -> Option<&T>;

    fn get_all(&self) -> &[T];

    /// Apply `action` to the first item matching `query`, false if nothing matched.
    fn write_matching(&mut self, query: impl Fn(&T) -> bool, action: impl FnOnce(&mut T)) -> bool;

    /// Add every default value that has no matching item yet.
    fn register_defaults(&mut self);

    /// Drop everything and register the defaults again.
    fn reset(&mut self);
}

/// Keeps the items in memory.
pub struct MemoryStore<T> {
    items: Vec<T>,
    defaults: Vec<T>,
    same: fn(&T, &T) -> bool,
}

impl<T: Clone> MemoryStore<T> {
    /// `same` decides if an item already covers a default value.
    pub fn new(defaults: Vec<T>, same: fn(&T, &T) -> bool) -> Self {
        let mut store = Self {
            items: vec![],
            defaults,
            same,
        };
        store.register_defaults();
        store
    }

    pub fn insert(&mut self, item: T) {
        self.items.push(item);
    }
}

impl<T: Clone> DefaultStore<T> for MemoryStore<T> {
    fn get(&self, query: impl Fn(&T) -> bool) -> Option<&T> {
        self.items.iter().find(|x| query(x))
    }

    fn get_all(&self) -> &[T] {
        &self.items
    }

    fn write_matching(&mut self, query: impl Fn(&T) -> bool, action: impl FnOnce(&mut T)) -> bool {
        match self.items.iter_mut().find(|x| query(x)) {
            Some(item) => {
                action(item);
                true
            }
            None => false,
        }
    }

    fn register_defaults(&mut self) {
        for def in &self.defaults {
            if !self.items.iter().any(|x| (self.same)(x, def)) {
                self.items.push(def.clone());
            }
        }
    }

    fn reset(&mut self) {
        self.items.clear();
        self.register_defaults();
    }
}
