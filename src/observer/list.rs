//! Ordered observer storage with position-based access.

use std::sync::Arc;

use crate::utils::error::Error;

#[derive(Debug)]
pub struct IndexedObserverList<O: ?Sized> {
    observers: Vec<Arc<O>>,
}

impl<O: ?Sized> IndexedObserverList<O> {
    pub fn new() -> Self {
        Self {
            observers: Vec::new(),
        }
    }

    /// Appends `observer` and returns the new length.
    pub fn add(&mut self, observer: Arc<O>) -> usize {
        self.observers.push(observer);
        self.observers.len()
    }

    pub fn count(&self) -> usize {
        self.observers.len()
    }

    pub fn get(&self, index: usize) -> Option<&Arc<O>> {
        self.observers.get(index)
    }

    /// Position of the first entry identical to `observer` at or after `start`.
    pub fn index_of(&self, observer: &Arc<O>, start: usize) -> Option<usize> {
        self.observers
            .iter()
            .enumerate()
            .skip(start)
            .find(|(_, o)| Arc::ptr_eq(o, observer))
            .map(|(i, _)| i)
    }

    /// Removes the entry at `index`, shifting later entries down by one.
    pub fn remove_at(&mut self, index: usize) -> Result<Arc<O>, Error> {
        if index >= self.observers.len() {
            return Err(Error::OutOfBounds {
                index,
                len: self.observers.len(),
            });
        }
        Ok(self.observers.remove(index))
    }

    pub fn snapshot(&self) -> Vec<Arc<O>> {
        self.observers.clone()
    }
}

impl<O: ?Sized> Default for IndexedObserverList<O> {
    fn default() -> Self {
        Self::new()
    }
}
