//! Beans shared by the unit tests of this crate.

use std::collections::HashMap;

use bw_reflect::derive::Reflect;

#[derive(Reflect, Debug, Clone, Copy, PartialEq, Default)]
#[reflect(default)]
pub(crate) enum Colour {
    #[default]
    Red,
    Green,
    Blue,
}

#[derive(Reflect, Debug, Clone, PartialEq, Default)]
#[reflect(default, clone, debug, partial_eq, rename_all = "camelCase")]
#[reflect(accessor(name = "touchy", ty = String, get = touchy, try_set = set_touchy))]
#[reflect(accessor(name = "nameLength", ty = usize, get_owned = name_length))]
pub(crate) struct TestBean {
    pub name: String,
    pub age: i32,
    pub spouse: Option<Box<TestBean>>,
    pub friends: Vec<TestBean>,
    pub some_map: HashMap<String, String>,
    pub colour: Colour,
    pub nicknames: [String; 2],
    #[reflect(read_only)]
    pub id: u64,
    #[reflect(skip)]
    pub touchy: String,
}

impl TestBean {
    pub fn named(name: &str) -> Self {
        Self {
            name: name.to_owned(),
            ..Self::default()
        }
    }

    pub fn touchy(&self) -> &String {
        &self.touchy
    }

    /// Rejects values containing a dot.
    pub fn set_touchy(&mut self, touchy: String) -> Result<(), String> {
        if touchy.contains('.') {
            return Err(format!("'{touchy}' contains a dot"));
        }
        self.touchy = touchy;
        Ok(())
    }

    pub fn name_length(&self) -> usize {
        self.name.len()
    }
}

/// Write-only properties with similar names.
#[derive(Reflect, Default)]
#[reflect(default)]
#[reflect(accessor(name = "name", ty = String, set = set_name))]
#[reflect(accessor(name = "myString", ty = String, set = set_my_string))]
#[reflect(accessor(name = "myStrings", ty = String, set = set_my_string))]
#[reflect(accessor(name = "myStriNg", ty = String, set = set_my_string))]
#[reflect(accessor(name = "myStringss", ty = String, set = set_my_string))]
pub(crate) struct IntelliBean {
    #[reflect(skip)]
    pub last: String,
}

impl IntelliBean {
    fn set_name(&mut self, name: String) {
        self.last = name;
    }

    fn set_my_string(&mut self, value: String) {
        self.last = value;
    }
}

/// A getter that fails while the name is empty.
#[derive(Reflect, Default)]
#[reflect(accessor(name = "name", ty = String, try_get = name, set = set_name))]
pub(crate) struct GetterBean {
    #[reflect(skip)]
    name: String,
}

impl GetterBean {
    pub fn name(&self) -> Result<&String, &'static str> {
        if self.name.is_empty() {
            Err("name has not been set")
        } else {
            Ok(&self.name)
        }
    }

    pub fn set_name(&mut self, name: String) {
        self.name = name;
    }
}

/// Exposes an optional bean but accepts a plain one.
#[derive(Reflect, Default)]
#[reflect(accessor(
    name = "object",
    ty = Option<TestBean>,
    set_ty = TestBean,
    get = object,
    get_mut = object_mut,
    set = set_object,
))]
pub(crate) struct GetterWithOptional {
    #[reflect(skip)]
    pub object: Option<TestBean>,
}

impl GetterWithOptional {
    fn object(&self) -> &Option<TestBean> {
        &self.object
    }

    fn object_mut(&mut self) -> &mut Option<TestBean> {
        &mut self.object
    }

    fn set_object(&mut self, object: TestBean) {
        self.object = Some(object);
    }
}

/// Getter and setter with unrelated types.
#[derive(Reflect, Default)]
#[reflect(accessor(
    name = "object",
    ty = usize,
    set_ty = String,
    get_owned = object_len,
    set = set_object,
))]
pub(crate) struct PropertyTypeMismatch {
    #[reflect(skip)]
    pub object: String,
}

impl PropertyTypeMismatch {
    fn object_len(&self) -> usize {
        self.object.len()
    }

    fn set_object(&mut self, object: String) {
        self.object = object;
    }
}

/// A bean reachable only through a computed getter.
#[derive(Reflect, Default)]
#[reflect(accessor(name = "snapshot", ty = TestBean, get_owned = snapshot, set = set_snapshot))]
pub(crate) struct SnapshotHolder {
    #[reflect(skip)]
    pub inner: TestBean,
}

impl SnapshotHolder {
    fn snapshot(&self) -> TestBean {
        self.inner.clone()
    }

    fn set_snapshot(&mut self, inner: TestBean) {
        self.inner = inner;
    }
}
