use std::collections::{HashMap, VecDeque};

/// Bounded map evicting the least recently used key.
///
/// `order` runs from least to most recently used.
#[derive(Debug, Clone)]
pub struct LruCache<V> {
    capacity: usize,
    map: HashMap<String, V>,
    order: VecDeque<String>,
}

impl<V> LruCache<V> {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            map: HashMap::new(),
            order: VecDeque::new(),
        }
    }

    /// Looks `key` up and marks it most recently used.
    pub fn get(&mut self, key: &str) -> Option<&V> {
        if self.map.contains_key(key) {
            self.touch(key);
            return self.map.get(key);
        }
        None
    }

    /// Looks `key` up without touching recency.
    pub fn peek(&self, key: &str) -> Option<&V> {
        self.map.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.map.contains_key(key)
    }

    /// Stores `value` as most recently used and returns the entry evicted
    /// to make room, if any.
    pub fn insert(&mut self, key: String, value: V) -> Option<(String, V)> {
        if self.capacity == 0 {
            return None;
        }
        if self.map.contains_key(&key) {
            self.map.insert(key.clone(), value);
            self.touch(&key);
            return None;
        }

        self.map.insert(key.clone(), value);
        self.order.push_back(key);
        if self.map.len() <= self.capacity {
            return None;
        }
        let evicted = self.order.pop_front()?;
        self.map.remove(&evicted).map(|value| (evicted, value))
    }

    /// Keys from least to most recently used.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn clear(&mut self) {
        self.map.clear();
        self.order.clear();
    }

    fn touch(&mut self, key: &str) {
        if let Some(position) = self.order.iter().position(|entry| entry == key) {
            if let Some(entry) = self.order.remove(position) {
                self.order.push_back(entry);
            }
        }
    }
}
