//! Immutable, homogeneous list handed out by typed list accessors

use std::ops::Index;

/// A validated list whose elements all have the same kind.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyList<T> {
    elements: Vec<T>,
}

impl<T> PropertyList<T> {
    pub(crate) fn new(elements: Vec<T>) -> Self {
        Self { elements }
    }

    /// Element at `index`, or `None` past the end.
    pub fn element(&self, index: usize) -> Option<&T> {
        self.elements.get(index)
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.elements.iter()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.elements
    }

    pub fn into_vec(self) -> Vec<T> {
        self.elements
    }
}

impl<T> Index<usize> for PropertyList<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        &self.elements[index]
    }
}

impl<T> IntoIterator for PropertyList<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a PropertyList<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.iter()
    }
}
