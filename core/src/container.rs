//! The presentation collaborator seen from the controller.
//!
//! # Design
//! A view needs only four capabilities from whatever displays it: append an
//! element, remove an element by marker class, ask whether one is present,
//! and enable or disable the submitting control. Methods take `&self` so that
//! overlapping requests on one thread can share a container.
//!
//! `MemoryContainer` and `MemoryControl` are complete in-memory
//! implementations, used by tests and by front ends that diff a snapshot.

use std::cell::{Cell, RefCell};

use crate::render::Element;

pub trait Container {
    fn append(&self, element: Element);

    /// Removes the first top-level element carrying `marker`. Returns whether
    /// one was removed.
    fn remove(&self, marker: &str) -> bool;

    fn contains(&self, marker: &str) -> bool;
}

/// The control a submission disables while loading, e.g. a search button.
pub trait Control {
    fn set_enabled(&self, enabled: bool);
}

#[derive(Debug, Default)]
pub struct MemoryContainer {
    children: RefCell<Vec<Element>>,
}

impl MemoryContainer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> Vec<Element> {
        self.children.borrow().clone()
    }

    pub fn count(&self, marker: &str) -> usize {
        self.children
            .borrow()
            .iter()
            .filter(|e| e.has_class(marker))
            .count()
    }

    pub fn find(&self, marker: &str) -> Option<Element> {
        self.children
            .borrow()
            .iter()
            .find(|e| e.has_class(marker))
            .cloned()
    }
}

impl Container for MemoryContainer {
    fn append(&self, element: Element) {
        self.children.borrow_mut().push(element);
    }

    fn remove(&self, marker: &str) -> bool {
        let mut children = self.children.borrow_mut();
        match children.iter().position(|e| e.has_class(marker)) {
            Some(index) => {
                children.remove(index);
                true
            }
            None => false,
        }
    }

    fn contains(&self, marker: &str) -> bool {
        self.children.borrow().iter().any(|e| e.has_class(marker))
    }
}

#[derive(Debug)]
pub struct MemoryControl {
    enabled: Cell<bool>,
    changes: Cell<usize>,
}

impl Default for MemoryControl {
    fn default() -> Self {
        Self {
            enabled: Cell::new(true),
            changes: Cell::new(0),
        }
    }
}

impl MemoryControl {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled.get()
    }

    /// Number of `set_enabled` calls received.
    pub fn changes(&self) -> usize {
        self.changes.get()
    }
}

impl Control for MemoryControl {
    fn set_enabled(&self, enabled: bool) {
        self.enabled.set(enabled);
        self.changes.set(self.changes.get() + 1);
    }
}
