//! Append-only, id-indexed storage.

use serde::{Deserialize, Serialize};
use std::marker::PhantomData;
use std::ops::Index;

/// A `u32`-backed key into an [`Arena`].
pub trait ArenaId: Copy {
    /// Builds the key for slot `index`.
    fn from_raw(index: u32) -> Self;

    /// Slot index of this key.
    fn as_raw(self) -> u32;
}

/// Dense storage where each pushed item gets the next id.
///
/// Items are never removed or reordered, so ids stay valid for the lifetime
/// of the arena and iteration order is allocation order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Arena<I: ArenaId, T> {
    items: Vec<T>,
    #[serde(skip)]
    _key: PhantomData<I>,
}

impl<I: ArenaId, T> Default for Arena<I, T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            _key: PhantomData,
        }
    }
}

impl<I: ArenaId, T> Arena<I, T> {
    /// Creates an empty arena.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `item` and returns its id.
    pub fn alloc(&mut self, item: T) -> I {
        let id = I::from_raw(self.items.len() as u32);
        self.items.push(item);
        id
    }

    /// Looks up an item, returning `None` for ids from another arena.
    pub fn get(&self, id: I) -> Option<&T> {
        self.items.get(id.as_raw() as usize)
    }

    /// Number of items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if nothing was allocated.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// `(id, item)` pairs in allocation order.
    pub fn iter(&self) -> impl Iterator<Item = (I, &T)> {
        self.items
            .iter()
            .enumerate()
            .map(|(i, item)| (I::from_raw(i as u32), item))
    }
}

impl<I: ArenaId, T> IntoIterator for Arena<I, T> {
    type Item = (I, T);
    type IntoIter = std::iter::Map<
        std::iter::Enumerate<std::vec::IntoIter<T>>,
        fn((usize, T)) -> (I, T),
    >;

    fn into_iter(self) -> Self::IntoIter {
        let with_id: fn((usize, T)) -> (I, T) = |(i, item)| (I::from_raw(i as u32), item);
        self.items.into_iter().enumerate().map(with_id)
    }
}

impl<I: ArenaId, T> Index<I> for Arena<I, T> {
    type Output = T;

    fn index(&self, id: I) -> &T {
        &self.items[id.as_raw() as usize]
    }
}
