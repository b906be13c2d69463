use std::collections::HashMap;
use std::sync::Arc;

use bw_reflect::info::Typed;

use super::{AccessorConfig, BeanWrapper, DEFAULT_AUTO_GROW_COLLECTION_LIMIT};
use crate::test_beans::{
    Colour, GetterBean, GetterWithOptional, IntelliBean, PropertyTypeMismatch, SnapshotHolder,
    TestBean,
};
use crate::{BatchOptions, ConversionService, PropertyErrorKind, PropertyValue, PropertyValues};

fn growing(bean: &mut TestBean) -> BeanWrapper<'_> {
    let config = AccessorConfig {
        auto_grow_nested_paths: true,
        ..AccessorConfig::default()
    };
    BeanWrapper::with_config(bean, config)
}

// -----------------------------------------------------------------------------
// Simple properties

#[test]
fn set_then_get() {
    let mut bean = TestBean::default();
    let mut wrapper = BeanWrapper::new(&mut bean);

    wrapper.set_property_value("name", String::from("tony")).unwrap();
    wrapper.set_property_value("age", "32").unwrap();
    wrapper.set_property_value("colour", " Green ").unwrap();

    let name = wrapper.get_property_value("name").unwrap().unwrap();
    assert_eq!(name.downcast_ref::<String>().map(String::as_str), Some("tony"));
    assert_eq!(wrapper.get_property_value_as::<i32>("age").unwrap(), Some(32));
    assert_eq!(wrapper.get_property_value_as::<String>("age").unwrap().as_deref(), Some("32"));

    assert_eq!(bean.colour, Colour::Green);
    assert_eq!(bean.age, 32);
}

#[test]
fn failed_conversion_keeps_property() {
    let mut bean = TestBean {
        age: 7,
        ..TestBean::default()
    };
    let mut wrapper = BeanWrapper::new(&mut bean);

    let err = wrapper.set_property_value("age", "foobar").unwrap_err();
    let PropertyErrorKind::TypeMismatch { required_type, .. } = err.kind() else {
        panic!("unexpected error: {err}");
    };
    assert_eq!(required_type, "i32");
    assert_eq!(err.path(), "age");
    assert_eq!(err.bean_type(), "TestBean");
    assert_eq!(err.value().and_then(|v| v.downcast_ref::<&str>()), Some(&"foobar"));
    assert!(err.old_value().is_none());

    let err = wrapper.set_property_value("age", 1_u64 << 40).unwrap_err();
    assert_eq!(err.value().and_then(|v| v.downcast_ref::<u64>()), Some(&(1 << 40)));
    assert_eq!(bean.age, 7);
}

#[test]
fn old_value_is_reported() {
    let mut bean = TestBean {
        age: 7,
        ..TestBean::default()
    };
    let mut wrapper = BeanWrapper::new(&mut bean);
    wrapper.set_extract_old_value_for_editor(true);
    assert!(wrapper.is_extract_old_value_for_editor());

    let err = wrapper.set_property_value("age", "foobar").unwrap_err();
    assert_eq!(err.old_value().and_then(|v| v.downcast_ref::<i32>()), Some(&7));
}

#[test]
fn read_only_and_computed() {
    let mut bean = TestBean {
        id: 9,
        ..TestBean::named("tony")
    };
    let mut wrapper = BeanWrapper::new(&mut bean);

    assert!(wrapper.is_readable_property("id"));
    assert!(!wrapper.is_writable_property("id"));
    let err = wrapper.set_property_value("id", 10_u64).unwrap_err();
    assert!(matches!(err.kind(), PropertyErrorKind::NotWritable { .. }));

    assert_eq!(wrapper.get_property_value_as::<usize>("nameLength").unwrap(), Some(4));
    assert!(!wrapper.is_writable_property("nameLength"));
    assert_eq!(bean.id, 9);
}

#[test]
fn failing_setter() {
    let mut bean = TestBean::default();
    let mut wrapper = BeanWrapper::new(&mut bean);

    let err = wrapper.set_property_value("touchy", String::from(".valid")).unwrap_err();
    assert_eq!(
        err.kind(),
        &PropertyErrorKind::AccessorFailed {
            reason: String::from("'.valid' contains a dot"),
        }
    );
    assert_eq!(
        err.value().and_then(|v| v.downcast_ref::<String>()).map(String::as_str),
        Some(".valid")
    );

    wrapper.set_property_value("touchy", "valid").unwrap();
    assert_eq!(bean.touchy(), "valid");
}

#[test]
fn failing_getter() {
    let mut bean = GetterBean::default();
    let mut wrapper = BeanWrapper::new(&mut bean);

    let err = wrapper.get_property_value("name").unwrap_err();
    assert!(matches!(err.kind(), PropertyErrorKind::AccessorFailed { .. }));

    // The failing getter does not block the write.
    wrapper.set_extract_old_value_for_editor(true);
    wrapper.set_property_value("name", "tony").unwrap();
    assert_eq!(wrapper.get_property_value_as::<String>("name").unwrap().as_deref(), Some("tony"));
}

// -----------------------------------------------------------------------------
// Unknown properties

#[test]
fn unknown_property_suggestions() {
    let mut bean = TestBean::named("tony");
    let mut wrapper = BeanWrapper::new(&mut bean);

    let err = wrapper.set_property_value("ag", 3_i32).unwrap_err();
    assert!(matches!(err.kind(), PropertyErrorKind::NotWritable { .. }));
    assert_eq!(err.possible_matches(), ["age"]);
    assert!(err.to_string().ends_with("Did you mean 'age'?"), "{err}");

    let err = wrapper.get_property_value("nme").unwrap_err();
    assert!(matches!(err.kind(), PropertyErrorKind::NotReadable { .. }));
    assert_eq!(err.possible_matches(), ["name"]);

    let err = wrapper.get_property_value("xyz").unwrap_err();
    assert!(err.possible_matches().is_empty());
}

#[test]
fn similar_names() {
    let mut bean = IntelliBean::default();
    let mut wrapper = BeanWrapper::new(&mut bean);

    let err = wrapper.set_property_value("mystring", "x").unwrap_err();
    assert_eq!(err.possible_matches(), ["myStriNg", "myString", "myStrings"]);

    let err = wrapper.set_property_value("names", "x").unwrap_err();
    assert_eq!(err.possible_matches(), ["name"]);

    assert!(!wrapper.is_readable_property("name"));
    assert!(wrapper.is_writable_property("name"));
    wrapper.set_property_value("myStringss", "last").unwrap();
    assert_eq!(bean.last, "last");
}

#[test]
fn malformed_paths() {
    let mut bean = TestBean::default();
    let mut wrapper = BeanWrapper::new(&mut bean);

    let err = wrapper.set_property_value("[']", "x").unwrap_err();
    assert!(matches!(err.kind(), PropertyErrorKind::MalformedPath { .. }));
    assert!(err.value().is_some());

    let err = wrapper.get_property_value("['").unwrap_err();
    assert!(matches!(err.kind(), PropertyErrorKind::MalformedPath { offset: 1, .. }));

    assert!(!wrapper.is_readable_property("a..b"));
    assert!(wrapper.property_type("a..b").is_none());
}

// -----------------------------------------------------------------------------
// Nested paths

#[test]
fn absent_intermediate() {
    let mut bean = TestBean::default();
    let mut wrapper = BeanWrapper::new(&mut bean);

    let err = wrapper.set_property_value("spouse.name", "kerry").unwrap_err();
    assert_eq!(
        err.kind(),
        &PropertyErrorKind::NullIntermediateValue {
            nested_path: String::from("spouse"),
        }
    );
    assert_eq!(err.value().and_then(|v| v.downcast_ref::<&str>()), Some(&"kerry"));

    let err = wrapper.get_property_value("spouse.name").unwrap_err();
    assert!(matches!(err.kind(), PropertyErrorKind::NullIntermediateValue { .. }));
    assert!(wrapper.get_property_value("spouse").unwrap().is_none());
    assert!(!wrapper.is_readable_property("spouse.name"));
    assert!(bean.spouse.is_none());
}

#[test]
fn nested_set_then_get() {
    let mut bean = TestBean::default();
    let mut wrapper = BeanWrapper::new(&mut bean);

    wrapper.set_property_value("spouse", TestBean::named("kerry")).unwrap();
    wrapper.set_property_value("spouse.age", 31_u8).unwrap();
    wrapper.set_property_value("spouse.someMap['a.b']", 5_i32).unwrap();

    let name = wrapper.get_property_value_as::<String>("spouse.name").unwrap();
    assert_eq!(name.as_deref(), Some("kerry"));
    assert!(wrapper.is_writable_property("spouse.colour"));

    let spouse = bean.spouse.as_deref().unwrap();
    assert_eq!(spouse.age, 31);
    assert_eq!(spouse.some_map["a.b"], "5");
}

#[test]
fn boxed_property_round_trip() {
    let mut bean = TestBean::default();
    let mut wrapper = BeanWrapper::new(&mut bean);

    wrapper.set_property_value("spouse", TestBean::named("kerry")).unwrap();
    let spouse = wrapper.get_property_value_as::<TestBean>("spouse").unwrap();
    assert_eq!(spouse, Some(TestBean::named("kerry")));

    let boxed = wrapper.get_property_value_as::<Box<TestBean>>("spouse").unwrap();
    assert_eq!(boxed.map(|b| b.name), Some(String::from("kerry")));

    let err = wrapper.get_property_value_as::<i32>("spouse").unwrap_err();
    assert!(matches!(err.kind(), PropertyErrorKind::TypeMismatch { .. }));
}

#[test]
fn auto_grow_bean() {
    let mut bean = TestBean::default();
    let mut wrapper = growing(&mut bean);

    wrapper.set_property_value("spouse.spouse.name", "kerry").unwrap();

    // Reads never grow.
    let err = wrapper.get_property_value("friends[0].name").unwrap_err();
    assert_eq!(err.kind(), &PropertyErrorKind::Bounds { index: 0, len: 0 });
    let err = wrapper.get_property_value("spouse.spouse.spouse.name").unwrap_err();
    assert!(matches!(err.kind(), PropertyErrorKind::NullIntermediateValue { .. }));

    let inner = bean.spouse.as_ref().and_then(|s| s.spouse.as_ref()).unwrap();
    assert_eq!(inner.name, "kerry");
    assert!(bean.friends.is_empty());
}

#[test]
fn auto_grow_list() {
    let mut bean = TestBean::default();
    let mut wrapper = growing(&mut bean);

    wrapper.set_property_value("friends[2].name", "tony").unwrap();
    wrapper.set_property_value("friends[1]", TestBean::named("kerry")).unwrap();
    wrapper.set_property_value("friends[3]", TestBean::named("end")).unwrap();

    let names: Vec<_> = bean.friends.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, ["", "kerry", "tony", "end"]);
}

#[test]
fn auto_grow_map() {
    let mut bean = TestBean::default();
    let mut wrapper = growing(&mut bean);

    wrapper.set_property_value("someMap[key]", "value").unwrap();
    wrapper.set_property_value("someMap[3]", 3_i32).unwrap();
    assert!(wrapper.get_property_value("someMap[missing]").unwrap().is_none());

    assert_eq!(bean.some_map["key"], "value");
    assert_eq!(bean.some_map["3"], "3");
}

#[test]
fn collection_limit() {
    let mut bean = TestBean::default();
    let mut wrapper = growing(&mut bean);
    wrapper.set_auto_grow_collection_limit(2);
    assert_eq!(wrapper.auto_grow_collection_limit(), 2);

    let err = wrapper.set_property_value("friends[2].name", "x").unwrap_err();
    assert_eq!(err.kind(), &PropertyErrorKind::Bounds { index: 2, len: 0 });

    wrapper.set_property_value("friends[1].name", "x").unwrap();
    assert_eq!(bean.friends.len(), 2);
}

#[test]
fn default_collection_limit() {
    let mut bean = TestBean::default();
    let mut wrapper = growing(&mut bean);
    assert_eq!(wrapper.auto_grow_collection_limit(), DEFAULT_AUTO_GROW_COLLECTION_LIMIT);

    let err = wrapper.set_property_value("friends[50000000].name", "x").unwrap_err();
    assert_eq!(err.kind(), &PropertyErrorKind::Bounds { index: 50_000_000, len: 0 });
    let limit = DEFAULT_AUTO_GROW_COLLECTION_LIMIT;
    let err = wrapper.set_property_value(&format!("friends[{limit}]"), TestBean::named("x")).unwrap_err();
    assert_eq!(err.kind(), &PropertyErrorKind::Bounds { index: limit, len: 0 });

    wrapper.set_property_value(&format!("friends[{}].name", limit - 1), "x").unwrap();
    assert_eq!(bean.friends.len(), limit);
}

#[test]
fn index_out_of_bounds() {
    let mut bean = TestBean::default();
    let mut wrapper = BeanWrapper::new(&mut bean);

    let err = wrapper.set_property_value("friends[0]", TestBean::named("a")).unwrap_err();
    assert_eq!(err.kind(), &PropertyErrorKind::Bounds { index: 0, len: 0 });

    let err = wrapper.get_property_value("friends[0]").unwrap_err();
    assert_eq!(err.kind(), &PropertyErrorKind::Bounds { index: 0, len: 0 });

    // Arrays never grow.
    wrapper.set_auto_grow_nested_paths(true);
    wrapper.set_property_value("nicknames['1']", "b").unwrap();
    let err = wrapper.set_property_value("nicknames[2]", "c").unwrap_err();
    assert_eq!(err.kind(), &PropertyErrorKind::Bounds { index: 2, len: 2 });

    assert_eq!(bean.nicknames, [String::new(), String::from("b")]);
}

#[test]
fn key_that_is_not_an_index() {
    let mut bean = TestBean::default();
    let wrapper = BeanWrapper::new(&mut bean);

    let err = wrapper.get_property_value("friends[first]").unwrap_err();
    assert_eq!(
        err.kind(),
        &PropertyErrorKind::TypeMismatch {
            value_type: String::from("String"),
            required_type: String::from("usize"),
        }
    );
}

#[test]
fn map_root() {
    let mut scores: HashMap<String, u32> = HashMap::new();
    let mut wrapper = BeanWrapper::new(&mut scores);

    wrapper.set_property_value("[tony]", "3").unwrap();
    assert_eq!(wrapper.get_property_value_as::<u32>("[tony]").unwrap(), Some(3));
    assert!(wrapper.property_names().is_empty());
    assert_eq!(scores["tony"], 3);
}

// -----------------------------------------------------------------------------
// Accessor shapes

#[test]
fn optional_getter_plain_setter() {
    let mut bean = GetterWithOptional::default();
    let mut wrapper = BeanWrapper::new(&mut bean);

    let err = wrapper.get_property_value("object.name").unwrap_err();
    assert!(matches!(err.kind(), PropertyErrorKind::NullIntermediateValue { .. }));
    assert!(wrapper.get_property_value("object").unwrap().is_none());

    wrapper.set_property_value("object", TestBean::named("tony")).unwrap();
    wrapper.set_property_value("object.age", 5_i32).unwrap();
    wrapper.set_property_value("object.name", "kerry").unwrap();

    let object = wrapper.get_property_value_as::<TestBean>("object").unwrap().unwrap();
    assert_eq!(object.name, "kerry");
    assert_eq!(object.age, 5);

    let ty = wrapper.property_type("object").unwrap();
    assert!(ty.is::<Option<TestBean>>());
}

#[test]
fn optional_getter_auto_grow() {
    let mut bean = GetterWithOptional::default();
    let mut wrapper = BeanWrapper::new(&mut bean);
    wrapper.set_auto_grow_nested_paths(true);

    wrapper.set_property_value("object.name", "tony").unwrap();
    assert_eq!(bean.object.map(|o| o.name).as_deref(), Some("tony"));
}

#[test]
fn getter_and_setter_types_differ() {
    let mut bean = PropertyTypeMismatch::default();
    let mut wrapper = BeanWrapper::new(&mut bean);

    wrapper.set_property_value("object", "foo").unwrap();
    assert_eq!(wrapper.get_property_value_as::<usize>("object").unwrap(), Some(3));
    assert!(wrapper.property_type("object").unwrap().is::<usize>());
    assert!(wrapper.is_writable_property("object"));
    assert_eq!(bean.object, "foo");
}

#[test]
fn nested_write_through_setter() {
    let mut holder = SnapshotHolder::default();
    let mut wrapper = BeanWrapper::new(&mut holder);

    wrapper.set_property_value("snapshot.name", "tony").unwrap();
    wrapper.set_property_value("snapshot.friends", vec![TestBean::named("a")]).unwrap();

    let name = wrapper.get_property_value_as::<String>("snapshot.name").unwrap();
    assert_eq!(name.as_deref(), Some("tony"));
    let friend = wrapper.get_property_value("snapshot.friends[0].name").unwrap().unwrap();
    assert!(friend.is_owned());

    assert_eq!(holder.inner.name, "tony");
    assert_eq!(holder.inner.friends.len(), 1);
}

// -----------------------------------------------------------------------------
// Batches

#[test]
fn batch_collects_failures() {
    let mut bean = TestBean::default();
    let mut wrapper = BeanWrapper::new(&mut bean);

    let values = PropertyValues::new()
        .with("age", "foobar")
        .with("name", String::from("tony"))
        .with("touchy", String::from(".valid"));
    let err = wrapper.set_property_values(values).unwrap_err();

    assert_eq!(err.failure_count(), 2);
    let paths: Vec<_> = err.failures().iter().map(|f| f.path()).collect();
    assert_eq!(paths, ["age", "touchy"]);

    let touchy = err.failure_for("touchy").and_then(|f| f.value());
    assert_eq!(
        touchy.and_then(|v| v.downcast_ref::<String>()).map(String::as_str),
        Some(".valid")
    );
    assert!(err.to_string().starts_with("Failed properties: Invalid property 'age'"));

    assert_eq!(bean.name, "tony");
    assert_eq!(bean.age, 0);
}

#[test]
fn batch_options() {
    let mut bean = TestBean::default();
    let mut wrapper = BeanWrapper::new(&mut bean);

    let values = || {
        vec![
            PropertyValue::new("nope", 1_i32),
            PropertyValue::new("spouse.name", "kerry"),
            PropertyValue::new("age", 3_i32),
        ]
    };

    let err = wrapper.set_property_values(values()).unwrap_err();
    assert_eq!(err.failure_count(), 2);

    let options = BatchOptions {
        ignore_unknown: true,
        ..BatchOptions::default()
    };
    let err = wrapper.set_property_values_with(values(), options).unwrap_err();
    assert_eq!(err.failures()[0].path(), "spouse.name");

    let options = BatchOptions {
        ignore_unknown: true,
        ignore_invalid: true,
    };
    wrapper.set_property_values_with(values(), options).unwrap();
    assert_eq!(bean.age, 3);
}

// -----------------------------------------------------------------------------
// Session

#[test]
fn custom_conversion_service() {
    let mut service = ConversionService::new();
    service.register::<u8, Colour>(|index| match index {
        0 => Some(Colour::Red),
        1 => Some(Colour::Green),
        2 => Some(Colour::Blue),
        _ => None,
    });

    let mut bean = TestBean::default();
    let mut wrapper = BeanWrapper::new(&mut bean);
    assert!(wrapper.set_property_value("colour", 2_u8).is_err());

    wrapper.set_conversion_service(Arc::new(service));
    wrapper.set_property_value("colour", 2_u8).unwrap();
    assert!(wrapper.set_property_value("colour", 3_u8).is_err());
    assert_eq!(bean.colour, Colour::Blue);
}

#[test]
fn introspection() {
    let mut bean = TestBean::default();
    let wrapper = BeanWrapper::new(&mut bean);

    let names = wrapper.property_names();
    assert_eq!(names.first(), Some(&"name"));
    assert!(names.contains(&"someMap"));
    assert!(names.contains(&"touchy"));

    assert!(wrapper.property_type("age").unwrap().is::<i32>());
    assert!(wrapper.property_type("friends").unwrap().is::<Vec<TestBean>>());
    assert!(wrapper.property_type("friends[0]").unwrap().is::<TestBean>());
    assert!(wrapper.property_type("someMap[x]").unwrap().is::<String>());
    assert!(wrapper.property_type("spouse.name").is_none());
    assert!(wrapper.property_type("missing").is_none());

    assert_eq!(wrapper.bean_type(), TestBean::type_info().type_name());
    assert!(wrapper.wrapped_instance().is::<TestBean>());
}
