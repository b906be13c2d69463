use core::fmt;

use crate::Reflect;
use crate::ops::{Bean, List, Map, Optional};

/// The capability a reflected value exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReflectKind {
    Bean,
    Map,
    List,
    Optional,
    Opaque,
}

impl fmt::Display for ReflectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Bean => "bean",
            Self::Map => "map",
            Self::List => "list",
            Self::Optional => "optional",
            Self::Opaque => "opaque",
        })
    }
}

/// Immutable capability view of a reflected value.
pub enum ReflectRef<'a> {
    Bean(&'a dyn Bean),
    Map(&'a dyn Map),
    List(&'a dyn List),
    Optional(&'a dyn Optional),
    Opaque(&'a dyn Reflect),
}

/// Mutable capability view of a reflected value.
pub enum ReflectMut<'a> {
    Bean(&'a mut dyn Bean),
    Map(&'a mut dyn Map),
    List(&'a mut dyn List),
    Optional(&'a mut dyn Optional),
    Opaque(&'a mut dyn Reflect),
}

impl ReflectRef<'_> {
    #[inline]
    pub fn kind(&self) -> ReflectKind {
        match self {
            Self::Bean(_) => ReflectKind::Bean,
            Self::Map(_) => ReflectKind::Map,
            Self::List(_) => ReflectKind::List,
            Self::Optional(_) => ReflectKind::Optional,
            Self::Opaque(_) => ReflectKind::Opaque,
        }
    }
}

impl ReflectMut<'_> {
    #[inline]
    pub fn kind(&self) -> ReflectKind {
        match self {
            Self::Bean(_) => ReflectKind::Bean,
            Self::Map(_) => ReflectKind::Map,
            Self::List(_) => ReflectKind::List,
            Self::Optional(_) => ReflectKind::Optional,
            Self::Opaque(_) => ReflectKind::Opaque,
        }
    }
}
