//! Item container with parent bookkeeping.
//!
//! # Responsibility
//! - Own member items and keep their parent back-references in sync.
//! - Provide lookup by position, identity, token and URI.
//!
//! # Invariants
//! - An item lives in at most one array at a time; adding it elsewhere
//!   removes it from its previous array first.
//! - Only the array that is an item's recorded parent clears that parent.
//! - Members are held strongly; items hold the array weakly.

use crate::model::item::SharedItem;
use log::debug;
use std::cell::RefCell;
use std::fmt::{Debug, Formatter};
use std::rc::{Rc, Weak};

struct ArrayInner {
    items: RefCell<Vec<SharedItem>>,
}

/// Ordered, shared collection of items.
///
/// Cloning creates another handle to the same array.
#[derive(Clone)]
pub struct ItemArray {
    inner: Rc<ArrayInner>,
}

/// Non-owning handle recorded by member items.
#[derive(Clone)]
pub struct WeakItemArray {
    inner: Weak<ArrayInner>,
}

impl WeakItemArray {
    /// Returns the array if it is still alive.
    pub fn upgrade(&self) -> Option<ItemArray> {
        self.inner.upgrade().map(|inner| ItemArray { inner })
    }

    pub(crate) fn points_to(&self, array: &ItemArray) -> bool {
        std::ptr::eq(self.inner.as_ptr(), Rc::as_ptr(&array.inner))
    }
}

impl Default for ItemArray {
    fn default() -> Self {
        Self::new()
    }
}

impl ItemArray {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(ArrayInner {
                items: RefCell::new(Vec::new()),
            }),
        }
    }

    /// Returns a non-owning handle to this array.
    pub fn downgrade(&self) -> WeakItemArray {
        WeakItemArray {
            inner: Rc::downgrade(&self.inner),
        }
    }

    /// Returns whether both handles point to the same array.
    pub fn ptr_eq(a: &ItemArray, b: &ItemArray) -> bool {
        Rc::ptr_eq(&a.inner, &b.inner)
    }

    /// Number of live weak handles, one per item recording this array as parent.
    pub fn back_reference_count(&self) -> usize {
        Rc::weak_count(&self.inner)
    }

    pub fn len(&self) -> usize {
        self.inner.items.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.items.borrow().is_empty()
    }

    /// Returns a snapshot of the members in order.
    pub fn items(&self) -> Vec<SharedItem> {
        self.inner.items.borrow().clone()
    }

    pub fn get(&self, index: usize) -> Option<SharedItem> {
        self.inner.items.borrow().get(index).cloned()
    }

    /// Returns the position of `item`, compared by identity.
    pub fn index_of(&self, item: &SharedItem) -> Option<usize> {
        self.inner
            .items
            .borrow()
            .iter()
            .position(|member| Rc::ptr_eq(member, item))
    }

    pub fn contains(&self, item: &SharedItem) -> bool {
        self.index_of(item).is_some()
    }

    /// Appends `item` and records this array as its parent.
    ///
    /// An item living in another array is moved out of it first. Adding a
    /// current member is a no-op.
    pub fn add_item(&self, item: &SharedItem) {
        if self.contains(item) {
            return;
        }

        let previous = item.borrow().parent();
        if let Some(previous) = previous {
            if previous.remove_item(item) {
                debug!("event=array_reparent_item module=array status=ok");
            }
        }

        item.borrow_mut().set_parent(Some(self));
        self.inner.items.borrow_mut().push(Rc::clone(item));
        debug!(
            "event=array_add_item module=array status=ok len={}",
            self.len()
        );
    }

    /// Removes `item` and clears its parent. Returns `false` for non-members.
    pub fn remove_item(&self, item: &SharedItem) -> bool {
        let Some(index) = self.index_of(item) else {
            return false;
        };
        let removed = self.inner.items.borrow_mut().remove(index);
        self.release(&removed);
        debug!(
            "event=array_remove_item module=array status=ok len={}",
            self.len()
        );
        true
    }

    /// Moves a member to `position`, clamped to the end of the array.
    ///
    /// Returns `false` when `item` is not a member.
    pub fn move_item(&self, item: &SharedItem, position: usize) -> bool {
        let Some(index) = self.index_of(item) else {
            return false;
        };
        let mut items = self.inner.items.borrow_mut();
        let moved = items.remove(index);
        let target = position.min(items.len());
        items.insert(target, moved);
        true
    }

    /// Removes every member, clearing their parents.
    pub fn clear(&self) {
        let removed = std::mem::take(&mut *self.inner.items.borrow_mut());
        for item in &removed {
            self.release(item);
        }
        debug!(
            "event=array_clear module=array status=ok removed={}",
            removed.len()
        );
    }

    /// Returns the first member whose token equals `token`.
    pub fn find_token(&self, token: &str) -> Option<SharedItem> {
        self.find(|item| item.borrow().token() == Some(token))
    }

    /// Returns the first member whose URI equals `uri`.
    pub fn find_uri(&self, uri: &str) -> Option<SharedItem> {
        self.find(|item| item.borrow().uri() == Some(uri))
    }

    fn find(&self, predicate: impl Fn(&SharedItem) -> bool) -> Option<SharedItem> {
        self.inner
            .items
            .borrow()
            .iter()
            .find(|item| predicate(item))
            .cloned()
    }

    fn release(&self, item: &SharedItem) {
        let mut item = item.borrow_mut();
        if item.is_child_of(self) {
            item.set_parent(None);
        }
    }
}

impl Debug for ItemArray {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ItemArray")
            .field("len", &self.len())
            .finish()
    }
}
