//! The view trait that lets any tree type be measured.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};

/// One level of a nested value, as seen by the metrics.
pub enum View<'a> {
    /// Key/value container; carries its values.
    Mapping(Vec<&'a dyn Nested>),
    /// Sequence or set; carries its elements.
    Collection(Vec<&'a dyn Nested>),
    /// Anything that is not a container.
    Scalar,
}

/// A value that can be classified as mapping, collection or scalar.
///
/// Types with no container semantics should return [`View::Scalar`].
pub trait Nested {
    fn view(&self) -> View<'_>;
}

impl<T: Nested + ?Sized> Nested for &T {
    fn view(&self) -> View<'_> {
        (**self).view()
    }
}

impl<T: Nested + ?Sized> Nested for Box<T> {
    fn view(&self) -> View<'_> {
        (**self).view()
    }
}

/// `None` is a scalar, like a JSON `null`.
impl<T: Nested> Nested for Option<T> {
    fn view(&self) -> View<'_> {
        match self {
            Some(inner) => inner.view(),
            None => View::Scalar,
        }
    }
}

fn collection<'a, T: Nested + 'a>(items: impl Iterator<Item = &'a T>) -> View<'a> {
    View::Collection(items.map(|item| item as &dyn Nested).collect())
}

fn mapping<'a, T: Nested + 'a>(values: impl Iterator<Item = &'a T>) -> View<'a> {
    View::Mapping(values.map(|value| value as &dyn Nested).collect())
}

impl<T: Nested> Nested for [T] {
    fn view(&self) -> View<'_> {
        collection(self.iter())
    }
}

impl<T: Nested> Nested for Vec<T> {
    fn view(&self) -> View<'_> {
        collection(self.iter())
    }
}

impl<T: Nested> Nested for VecDeque<T> {
    fn view(&self) -> View<'_> {
        collection(self.iter())
    }
}

impl<T: Nested> Nested for BTreeSet<T> {
    fn view(&self) -> View<'_> {
        collection(self.iter())
    }
}

impl<T: Nested, S> Nested for HashSet<T, S> {
    fn view(&self) -> View<'_> {
        collection(self.iter())
    }
}

impl<K, V: Nested> Nested for BTreeMap<K, V> {
    fn view(&self) -> View<'_> {
        mapping(self.values())
    }
}

impl<K, V: Nested, S> Nested for HashMap<K, V, S> {
    fn view(&self) -> View<'_> {
        mapping(self.values())
    }
}

macro_rules! scalar_nested {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Nested for $ty {
                fn view(&self) -> View<'_> {
                    View::Scalar
                }
            }
        )*
    };
}

scalar_nested!(
    (),
    bool,
    char,
    str,
    String,
    i8,
    i16,
    i32,
    i64,
    i128,
    isize,
    u8,
    u16,
    u32,
    u64,
    u128,
    usize,
    f32,
    f64,
);

impl Nested for serde_json::Value {
    fn view(&self) -> View<'_> {
        match self {
            serde_json::Value::Object(map) => mapping(map.values()),
            serde_json::Value::Array(items) => collection(items.iter()),
            _ => View::Scalar,
        }
    }
}

/// Datetimes and other TOML leaves are scalars.
impl Nested for toml::Value {
    fn view(&self) -> View<'_> {
        match self {
            toml::Value::Table(table) => mapping(table.values()),
            toml::Value::Array(items) => collection(items.iter()),
            _ => View::Scalar,
        }
    }
}
