//! Drops an item equal to the last one let through.

pub struct DistinctUntilChanged<T> {
    last: Option<T>,
}

impl<T: PartialEq + Clone> DistinctUntilChanged<T> {
    pub fn new() -> Self {
        Self { last: None }
    }

    /// Returns the item if it differs from the previously accepted one.
    pub fn accept(&mut self, item: T) -> Option<T> {
        if self.last.as_ref() == Some(&item) {
            return None;
        }
        self.last = Some(item.clone());
        Some(item)
    }
}

impl<T: PartialEq + Clone> Default for DistinctUntilChanged<T> {
    fn default() -> Self {
        Self::new()
    }
}
