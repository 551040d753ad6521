//! Item domain model.
//!
//! # Responsibility
//! - Hold the attribute set shared by bookmark, history and search records.
//! - Notify observers once per attribute write.
//! - Record the container an item currently lives in.
//!
//! # Invariants
//! - Absent text is stored as `None` and never conflated with `""`.
//! - Every setter except `set_parent` notifies, even when the value is unchanged.
//! - `parent` is a weak back-reference; an item never keeps its container alive.
//!
//! # Failure modes
//! - Observers receive `&Item` and cannot mutate it. An observer that borrows
//!   a [`SharedItem`] it is observing panics (`RefCell` borrow rules): the
//!   setter still holds the mutable borrow while notifying.

use crate::model::array::{ItemArray, WeakItemArray};
use crate::model::property::{ItemError, ItemProperty, PropertyValue};
use log::{trace, warn};
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::fmt::{Debug, Formatter};
use std::rc::Rc;

/// Item shared between a container and its callers.
pub type SharedItem = Rc<RefCell<Item>>;

/// Plain attribute record of an item.
///
/// Used for construction-time initialization and snapshots. The parent link
/// is deliberately not part of it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ItemAttributes {
    pub name: Option<String>,
    pub text: Option<String>,
    pub uri: Option<String>,
    pub icon: Option<String>,
    pub token: Option<String>,
    /// Caller-formatted timestamp; never parsed.
    pub added: Option<String>,
    pub visits: i32,
}

/// Handle returned by observer registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverId(u64);

type NotifyCallback = Box<dyn Fn(&Item, ItemProperty)>;

struct NotifyHandler {
    id: ObserverId,
    /// `None` observes every property.
    filter: Option<ItemProperty>,
    callback: NotifyCallback,
}

/// Generic mutable record with change notification.
#[derive(Default)]
pub struct Item {
    attributes: ItemAttributes,
    parent: Option<WeakItemArray>,
    handlers: Vec<NotifyHandler>,
    next_observer_id: u64,
}

impl Item {
    /// Creates an item with every attribute absent, zero visits and no parent.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an item with initial attribute values.
    ///
    /// No notification is emitted: no observer can exist yet.
    pub fn with_attributes(attributes: ItemAttributes) -> Self {
        Self {
            attributes,
            ..Self::default()
        }
    }

    /// Wraps this item for membership in an [`ItemArray`].
    pub fn into_shared(self) -> SharedItem {
        Rc::new(RefCell::new(self))
    }

    /// Returns the current attribute values.
    pub fn attributes(&self) -> &ItemAttributes {
        &self.attributes
    }

    pub fn name(&self) -> Option<&str> {
        self.attributes.name.as_deref()
    }

    pub fn set_name(&mut self, name: Option<&str>) {
        self.attributes.name = name.map(str::to_string);
        self.notify(ItemProperty::Name);
    }

    pub fn text(&self) -> Option<&str> {
        self.attributes.text.as_deref()
    }

    pub fn set_text(&mut self, text: Option<&str>) {
        self.attributes.text = text.map(str::to_string);
        self.notify(ItemProperty::Text);
    }

    pub fn uri(&self) -> Option<&str> {
        self.attributes.uri.as_deref()
    }

    pub fn set_uri(&mut self, uri: Option<&str>) {
        self.attributes.uri = uri.map(str::to_string);
        self.notify(ItemProperty::Uri);
    }

    pub fn icon(&self) -> Option<&str> {
        self.attributes.icon.as_deref()
    }

    pub fn set_icon(&mut self, icon: Option<&str>) {
        self.attributes.icon = icon.map(str::to_string);
        self.notify(ItemProperty::Icon);
    }

    pub fn token(&self) -> Option<&str> {
        self.attributes.token.as_deref()
    }

    pub fn set_token(&mut self, token: Option<&str>) {
        self.attributes.token = token.map(str::to_string);
        self.notify(ItemProperty::Token);
    }

    pub fn added(&self) -> Option<&str> {
        self.attributes.added.as_deref()
    }

    pub fn set_added(&mut self, added: Option<&str>) {
        self.attributes.added = added.map(str::to_string);
        self.notify(ItemProperty::Added);
    }

    pub fn visits(&self) -> i32 {
        self.attributes.visits
    }

    /// Replaces the visit counter. Any `i32` is accepted, negatives included.
    pub fn set_visits(&mut self, visits: i32) {
        self.attributes.visits = visits;
        self.notify(ItemProperty::Visits);
    }

    /// Returns the container this item currently lives in.
    ///
    /// Returns `None` when no parent was set or the container is gone.
    pub fn parent(&self) -> Option<ItemArray> {
        self.parent.as_ref().and_then(WeakItemArray::upgrade)
    }

    /// Returns whether `array` is the recorded parent, without upgrading it.
    pub fn is_child_of(&self, array: &ItemArray) -> bool {
        self.parent
            .as_ref()
            .is_some_and(|parent| parent.points_to(array))
    }

    /// Reassigns the parent back-reference.
    ///
    /// Reserved for container implementations managing membership; other
    /// callers should go through [`ItemArray`]. The link to the previous
    /// parent is released before returning. Emits no notification.
    pub fn set_parent(&mut self, parent: Option<&ItemArray>) {
        trace!(
            "event=item_set_parent module=item had_parent={} has_parent={}",
            self.parent.is_some(),
            parent.is_some()
        );
        self.parent = parent.map(ItemArray::downgrade);
    }

    /// Returns one property as a dynamic value.
    pub fn property(&self, property: ItemProperty) -> PropertyValue {
        let text = match property {
            ItemProperty::Name => &self.attributes.name,
            ItemProperty::Text => &self.attributes.text,
            ItemProperty::Uri => &self.attributes.uri,
            ItemProperty::Icon => &self.attributes.icon,
            ItemProperty::Token => &self.attributes.token,
            ItemProperty::Added => &self.attributes.added,
            ItemProperty::Visits => return PropertyValue::Int(self.attributes.visits),
        };
        PropertyValue::Text(text.clone())
    }

    /// Writes one property, notifying exactly as the typed setter does.
    ///
    /// # Errors
    /// - Returns `ValueTypeMismatch` when `value` does not fit `property`;
    ///   the item is left untouched and nothing is notified.
    pub fn set_property(
        &mut self,
        property: ItemProperty,
        value: PropertyValue,
    ) -> Result<(), ItemError> {
        match value {
            PropertyValue::Int(visits) if property == ItemProperty::Visits => {
                self.set_visits(visits)
            }
            PropertyValue::Text(text) if property.is_text() => {
                if let Some(slot) = self.text_slot(property) {
                    *slot = text;
                }
                self.notify(property);
            }
            value => {
                warn!(
                    "event=item_set_property module=item status=error property={} reason=type_mismatch",
                    property
                );
                return Err(ItemError::mismatch(property, &value));
            }
        }
        Ok(())
    }

    /// Parses `name` and writes the property.
    ///
    /// # Errors
    /// - Returns `UnknownProperty` for names outside [`ItemProperty::ALL`].
    /// - Returns `ValueTypeMismatch` as [`Item::set_property`].
    pub fn set_property_by_name(
        &mut self,
        name: &str,
        value: PropertyValue,
    ) -> Result<(), ItemError> {
        let property = name.parse::<ItemProperty>().map_err(|err| {
            warn!("event=item_set_property module=item status=error reason=unknown_property");
            err
        })?;
        self.set_property(property, value)
    }

    /// Registers an observer for every property change.
    pub fn connect_notify(
        &mut self,
        callback: impl Fn(&Item, ItemProperty) + 'static,
    ) -> ObserverId {
        self.register(None, Box::new(callback))
    }

    /// Registers an observer for changes of one property only.
    pub fn connect_property_notify(
        &mut self,
        property: ItemProperty,
        callback: impl Fn(&Item, ItemProperty) + 'static,
    ) -> ObserverId {
        self.register(Some(property), Box::new(callback))
    }

    /// Removes one observer. Returns `false` when `id` is not registered.
    pub fn disconnect(&mut self, id: ObserverId) -> bool {
        let before = self.handlers.len();
        self.handlers.retain(|handler| handler.id != id);
        self.handlers.len() != before
    }

    pub fn observer_count(&self) -> usize {
        self.handlers.len()
    }

    fn text_slot(&mut self, property: ItemProperty) -> Option<&mut Option<String>> {
        let attributes = &mut self.attributes;
        match property {
            ItemProperty::Name => Some(&mut attributes.name),
            ItemProperty::Text => Some(&mut attributes.text),
            ItemProperty::Uri => Some(&mut attributes.uri),
            ItemProperty::Icon => Some(&mut attributes.icon),
            ItemProperty::Token => Some(&mut attributes.token),
            ItemProperty::Added => Some(&mut attributes.added),
            ItemProperty::Visits => None,
        }
    }

    fn register(&mut self, filter: Option<ItemProperty>, callback: NotifyCallback) -> ObserverId {
        let id = ObserverId(self.next_observer_id);
        self.next_observer_id += 1;
        self.handlers.push(NotifyHandler {
            id,
            filter,
            callback,
        });
        id
    }

    /// Delivers one change event to observers in registration order.
    fn notify(&self, property: ItemProperty) {
        for handler in &self.handlers {
            if handler.filter.map_or(true, |filter| filter == property) {
                (handler.callback)(self, property);
            }
        }
    }
}

impl Debug for Item {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Item")
            .field("attributes", &self.attributes)
            .field("has_parent", &self.parent.is_some())
            .field("observer_count", &self.handlers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::{Item, ItemProperty};
    use std::cell::RefCell;
    use std::rc::Rc;

    fn record(item: &mut Item) -> Rc<RefCell<Vec<ItemProperty>>> {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        item.connect_notify(move |_, property| sink.borrow_mut().push(property));
        seen
    }

    #[test]
    fn observers_see_the_new_value() {
        let mut item = Item::new();
        let seen = Rc::new(RefCell::new(None));
        let sink = Rc::clone(&seen);
        item.connect_notify(move |item, _| *sink.borrow_mut() = item.name().map(str::to_string));

        item.set_name(Some("Midday"));
        assert_eq!(seen.borrow().as_deref(), Some("Midday"));
    }

    #[test]
    fn property_observer_ignores_other_properties() {
        let mut item = Item::new();
        let count = Rc::new(RefCell::new(0));
        let sink = Rc::clone(&count);
        item.connect_property_notify(ItemProperty::Uri, move |_, _| *sink.borrow_mut() += 1);

        item.set_name(Some("a"));
        item.set_uri(Some("b"));
        item.set_visits(3);
        assert_eq!(*count.borrow(), 1);
    }

    #[test]
    fn disconnected_observer_is_not_called() {
        let mut item = Item::new();
        let seen = record(&mut item);
        let other = item.connect_notify(|_, _| {});
        assert_eq!(item.observer_count(), 2);

        assert!(item.disconnect(other));
        assert!(!item.disconnect(other));
        item.set_token(Some("t"));
        assert_eq!(*seen.borrow(), vec![ItemProperty::Token]);
        assert_eq!(item.observer_count(), 1);
    }

    #[test]
    fn debug_output_omits_callbacks() {
        let mut item = Item::new();
        item.connect_notify(|_, _| {});
        let rendered = format!("{item:?}");
        assert!(rendered.contains("observer_count: 1"));
        assert!(rendered.contains("has_parent: false"));
    }
}
