use itemkit_core::{Item, ItemAttributes, ItemError, ItemProperty, PropertyValue};
use std::cell::RefCell;
use std::rc::Rc;

#[test]
fn property_reads_match_typed_getters() {
    let mut item = Item::new();
    item.set_name(Some("Name"));
    item.set_visits(-7);

    assert_eq!(
        item.property(ItemProperty::Name),
        PropertyValue::Text(Some("Name".to_string()))
    );
    assert_eq!(item.property(ItemProperty::Uri), PropertyValue::Text(None));
    assert_eq!(item.property(ItemProperty::Visits), PropertyValue::Int(-7));
}

#[test]
fn set_property_writes_and_notifies_every_property() {
    let mut item = Item::new();
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    item.connect_notify(move |_, property| sink.borrow_mut().push(property));

    for property in ItemProperty::ALL {
        let value = if property.is_text() {
            PropertyValue::from(property.as_str())
        } else {
            PropertyValue::from(42)
        };
        item.set_property(property, value.clone()).unwrap();
        assert_eq!(item.property(property), value);
    }

    assert_eq!(*seen.borrow(), ItemProperty::ALL.to_vec());
    assert_eq!(item.icon(), Some("icon"));
    assert_eq!(item.visits(), 42);
}

#[test]
fn mismatched_value_is_rejected_without_side_effects() {
    let mut item = Item::new();
    item.set_visits(3);
    let count = Rc::new(RefCell::new(0));
    let sink = Rc::clone(&count);
    item.connect_notify(move |_, _| *sink.borrow_mut() += 1);

    let err = item
        .set_property(ItemProperty::Visits, PropertyValue::from("4"))
        .unwrap_err();
    assert!(matches!(
        err,
        ItemError::ValueTypeMismatch {
            property: ItemProperty::Visits,
            ..
        }
    ));

    let err = item
        .set_property(ItemProperty::Name, PropertyValue::Int(1))
        .unwrap_err();
    assert!(matches!(err, ItemError::ValueTypeMismatch { .. }));

    assert_eq!(item.visits(), 3);
    assert_eq!(item.name(), None);
    assert_eq!(*count.borrow(), 0);
}

#[test]
fn set_property_by_name_parses_tags() {
    let mut item = Item::new();

    item.set_property_by_name("token", PropertyValue::from("abc"))
        .unwrap();
    item.set_property_by_name("added", PropertyValue::Text(None))
        .unwrap();
    assert_eq!(item.token(), Some("abc"));
    assert_eq!(item.added(), None);

    let err = item
        .set_property_by_name("title", PropertyValue::from("x"))
        .unwrap_err();
    assert_eq!(err, ItemError::UnknownProperty("title".to_string()));
}

#[test]
fn attributes_use_expected_wire_fields() {
    let attributes = ItemAttributes {
        name: Some("Example".to_string()),
        uri: Some("http://example.com".to_string()),
        text: Some(String::new()),
        visits: i32::MIN,
        ..ItemAttributes::default()
    };

    let json = serde_json::to_value(&attributes).unwrap();
    assert_eq!(json["name"], "Example");
    assert_eq!(json["uri"], "http://example.com");
    assert_eq!(json["text"], "");
    assert!(json["icon"].is_null());
    assert_eq!(json["visits"], i64::from(i32::MIN));
}

#[test]
fn partial_attribute_json_falls_back_to_defaults() {
    let attributes: ItemAttributes =
        serde_json::from_value(serde_json::json!({ "name": "History" })).unwrap();

    let item = Item::with_attributes(attributes);
    assert_eq!(item.name(), Some("History"));
    assert_eq!(item.visits(), 0);
    assert_eq!(item.token(), None);
}

#[test]
fn property_tags_serialize_as_snake_case() {
    let json = serde_json::to_value(ItemProperty::Visits).unwrap();
    assert_eq!(json, "visits");
}
