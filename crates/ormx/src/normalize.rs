//! Indirection stripping.
//!
//! References, `Box`, `Rc`, `Arc` and `Option` are transparent: a field of type
//! `Option<Box<i64>>` yields the same [`Value`] as an `i64` field, with `None`
//! becoming [`Value::Null`]. [`Record`] is forwarded through the same layers so
//! `&User`, `Box<User>` and `User` expose one field table.
//!
//! Table names additionally look through one sequence layer; those impls live
//! next to [`crate::table::ToTable`].

use std::rc::Rc;
use std::sync::Arc;

use crate::record::{FieldMeta, Record};
use crate::value::{ToValue, Value};

/// Normalized kind of a value once every indirection layer is gone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    /// An absent value (`None`).
    Null,
    Bool,
    Int,
    UInt,
    Float,
    Number,
    String,
    Timestamp,
    Uuid,
    Sequence,
}

impl Kind {
    pub fn is_sequence(self) -> bool {
        matches!(self, Kind::Sequence)
    }
}

/// Strip every indirection layer of `value` and capture what is left.
pub fn dereference<T: ToValue + ?Sized>(value: &T) -> Value {
    value.to_value()
}

macro_rules! forward_to_value {
    ($($ptr:ty),+ $(,)?) => {
        $(impl<T: ToValue + ?Sized> ToValue for $ptr {
            fn to_value(&self) -> Value {
                (**self).to_value()
            }
        })+
    };
}

forward_to_value!(&T, &mut T, Box<T>, Rc<T>, Arc<T>);

impl<T: ToValue> ToValue for Option<T> {
    fn to_value(&self) -> Value {
        match self {
            Some(inner) => inner.to_value(),
            None => Value::Null,
        }
    }
}

macro_rules! forward_record {
    ($($ptr:ty),+ $(,)?) => {
        $(impl<T: Record> Record for $ptr {
            const TYPE_NAME: &'static str = T::TYPE_NAME;
            const FIELDS: &'static [FieldMeta] = T::FIELDS;

            fn table() -> Option<String> {
                T::table()
            }

            fn values(&self) -> Vec<Value> {
                (**self).values()
            }

            fn is_zero(&self) -> bool {
                (**self).is_zero()
            }
        })+
    };
}

forward_record!(&T, &mut T, Box<T>, Rc<T>, Arc<T>);

impl<T: Record> Record for Option<T> {
    const TYPE_NAME: &'static str = T::TYPE_NAME;
    const FIELDS: &'static [FieldMeta] = T::FIELDS;

    fn table() -> Option<String> {
        T::table()
    }

    fn values(&self) -> Vec<Value> {
        match self {
            Some(inner) => inner.values(),
            None => vec![Value::Null; T::FIELDS.len()],
        }
    }

    fn is_zero(&self) -> bool {
        self.as_ref().is_none_or(Record::is_zero)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::RecordView;
    use crate::record::testing::UserAccount;

    #[test]
    fn test_nested_indirection_is_transparent() {
        let v: Option<Box<Arc<i64>>> = Some(Box::new(Arc::new(42)));
        assert_eq!(dereference(&v), Value::Int(42));
        assert_eq!(dereference(&&&"x"), Value::String("x".into()));
    }

    #[test]
    fn test_none_is_null() {
        let v: Option<Box<i64>> = None;
        assert_eq!(dereference(&v), Value::Null);
        assert_eq!(v.to_value().kind(), Kind::Null);
    }

    #[test]
    fn test_sequence_kind() {
        let ids = Rc::new(vec![1u32, 2]);
        assert!(dereference(&ids).kind().is_sequence());
        assert!(!dereference(&1u32).kind().is_sequence());
    }

    #[test]
    fn test_record_forwarding() {
        let user = UserAccount::sample();
        let direct = RecordView::of(&user);
        assert_eq!(RecordView::of(&&user), direct);
        assert_eq!(RecordView::of(&Box::new(UserAccount::sample())), direct);
        assert_eq!(<Arc<UserAccount> as Record>::TYPE_NAME, "UserAccount");
    }

    #[test]
    fn test_absent_record_is_zero() {
        let none: Option<UserAccount> = None;
        assert!(none.is_zero());
        assert_eq!(none.values(), vec![Value::Null; UserAccount::FIELDS.len()]);
        assert!(!Some(UserAccount::sample()).is_zero());
    }
}
