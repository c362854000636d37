use std::{
    collections::{BTreeMap, HashMap},
    ops::{Range, RangeFrom, RangeFull, RangeInclusive, RangeTo, RangeToInclusive},
};

use serde_json::{Map, Value};

use crate::{endpoint::Endpoint, interval::Interval, prelude::*};

const BEGIN_KEY: &str = "begin";
const END_KEY: &str = "end";

/// Sentinel text that assigns the empty interval.
pub const EMPTY_SENTINEL: &str = "empty";

/// Accepted shapes of a whole-value assignment, in the order they are resolved.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Assignment {
    /// Already canonical, stored as is.
    Interval(Interval),

    /// Unbounded on both sides.
    Infinite,

    /// Empty sentinel or nothing.
    Empty,

    /// Anything that has a begin and an end, missing ones are unbounded.
    Endpoints { begin: Option<Endpoint>, end: Option<Endpoint> },
}

impl Assignment {
    pub fn from_bounds(bounds: &impl Bounds) -> Self {
        Self::Endpoints { begin: bounds.begin(), end: bounds.end() }
    }

    /// Turn the assignment into the canonical interval.
    pub fn coerce(self) -> Result<Interval> {
        match self {
            Self::Interval(interval) => Ok(interval),
            Self::Infinite => Ok(Interval::INFINITE),
            Self::Empty => Ok(Interval::Empty),
            Self::Endpoints { begin, end } => Interval::normalize(begin, end),
        }
    }
}

/// Value exposing its own begin and end.
pub trait Bounds {
    fn begin(&self) -> Option<Endpoint>;

    fn end(&self) -> Option<Endpoint>;
}

/// Anything that may be assigned to a whole interval field.
///
/// Shapes that are not intervals still implement it and fail with [`Error::Type`],
/// so that a rejected assignment is observable at runtime instead of being coerced.
pub trait IntoAssignment {
    fn into_assignment(self) -> Result<Assignment>;
}

/// Coerce the value into the canonical interval.
pub fn coerce(value: impl IntoAssignment) -> Result<Interval> {
    value.into_assignment()?.coerce()
}

impl IntoAssignment for Assignment {
    fn into_assignment(self) -> Result<Assignment> {
        Ok(self)
    }
}

impl IntoAssignment for Interval {
    fn into_assignment(self) -> Result<Assignment> {
        Ok(Assignment::Interval(self))
    }
}

impl<T: IntoAssignment> IntoAssignment for Option<T> {
    fn into_assignment(self) -> Result<Assignment> {
        self.map_or(Ok(Assignment::Empty), IntoAssignment::into_assignment)
    }
}

impl IntoAssignment for () {
    fn into_assignment(self) -> Result<Assignment> {
        Ok(Assignment::Empty)
    }
}

impl IntoAssignment for f64 {
    fn into_assignment(self) -> Result<Assignment> {
        if self.is_infinite() && self.is_sign_positive() {
            Ok(Assignment::Infinite)
        } else {
            Err(Error::type_error(format!("float `{self}`")))
        }
    }
}

macro_rules! reject_integer {
    ($($ty:ty),+) => {
        $(
            impl IntoAssignment for $ty {
                fn into_assignment(self) -> Result<Assignment> {
                    Err(Error::type_error(format!("integer `{self}`")))
                }
            }
        )+
    };
}

reject_integer!(i32, i64, u32, u64);

impl IntoAssignment for &str {
    fn into_assignment(self) -> Result<Assignment> {
        if self == EMPTY_SENTINEL {
            Ok(Assignment::Empty)
        } else {
            Err(Error::type_error(format!("string `{self}`")))
        }
    }
}

impl IntoAssignment for String {
    fn into_assignment(self) -> Result<Assignment> {
        self.as_str().into_assignment()
    }
}

impl<T: Into<Endpoint>> IntoAssignment for Range<T> {
    fn into_assignment(self) -> Result<Assignment> {
        Ok(Assignment::Endpoints { begin: Some(self.start.into()), end: Some(self.end.into()) })
    }
}

impl<T: Into<Endpoint>> IntoAssignment for RangeFrom<T> {
    fn into_assignment(self) -> Result<Assignment> {
        Ok(Assignment::Endpoints { begin: Some(self.start.into()), end: None })
    }
}

impl<T: Into<Endpoint>> IntoAssignment for RangeTo<T> {
    fn into_assignment(self) -> Result<Assignment> {
        Ok(Assignment::Endpoints { begin: None, end: Some(self.end.into()) })
    }
}

/// The stored interval still excludes the end.
impl<T: Into<Endpoint>> IntoAssignment for RangeInclusive<T> {
    fn into_assignment(self) -> Result<Assignment> {
        let (start, end) = self.into_inner();
        Ok(Assignment::Endpoints { begin: Some(start.into()), end: Some(end.into()) })
    }
}

/// The stored interval still excludes the end.
impl<T: Into<Endpoint>> IntoAssignment for RangeToInclusive<T> {
    fn into_assignment(self) -> Result<Assignment> {
        Ok(Assignment::Endpoints { begin: None, end: Some(self.end.into()) })
    }
}

impl IntoAssignment for RangeFull {
    /// Like any other value without endpoints, this is the empty interval.
    fn into_assignment(self) -> Result<Assignment> {
        Ok(Assignment::Endpoints { begin: None, end: None })
    }
}

impl<T: Bounds> IntoAssignment for &T {
    fn into_assignment(self) -> Result<Assignment> {
        Ok(Assignment::from_bounds(self))
    }
}

impl<V: Into<Endpoint>, S: std::hash::BuildHasher> IntoAssignment for HashMap<String, V, S> {
    fn into_assignment(mut self) -> Result<Assignment> {
        Ok(Assignment::Endpoints {
            begin: self.remove(BEGIN_KEY).map(Into::into),
            end: self.remove(END_KEY).map(Into::into),
        })
    }
}

impl<V: Into<Endpoint>> IntoAssignment for BTreeMap<String, V> {
    fn into_assignment(mut self) -> Result<Assignment> {
        Ok(Assignment::Endpoints {
            begin: self.remove(BEGIN_KEY).map(Into::into),
            end: self.remove(END_KEY).map(Into::into),
        })
    }
}

impl IntoAssignment for Map<String, Value> {
    /// Missing keys are unbounded, so an empty object is the empty interval.
    fn into_assignment(mut self) -> Result<Assignment> {
        Ok(Assignment::Endpoints {
            begin: endpoint_from_json(BEGIN_KEY, self.remove(BEGIN_KEY))?,
            end: endpoint_from_json(END_KEY, self.remove(END_KEY))?,
        })
    }
}

impl IntoAssignment for Value {
    fn into_assignment(self) -> Result<Assignment> {
        match self {
            Self::Null => Ok(Assignment::Empty),
            Self::String(text) => text.into_assignment(),
            Self::Object(object) => object.into_assignment(),
            Self::Number(number) => Err(Error::type_error(format!("number `{number}`"))),
            Self::Bool(_) => Err(Error::type_error("boolean")),
            Self::Array(_) => Err(Error::type_error("array")),
        }
    }
}

/// Interpret a JSON value as an optional endpoint, only strings and `null` qualify.
pub fn endpoint_from_json(key: &str, value: Option<Value>) -> Result<Option<Endpoint>> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(text)) => Ok(Some(Endpoint::Text(text))),
        Some(value) => Err(Error::type_error(format!("`{key}` endpoint `{value}`"))),
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeDelta, TimeZone, Utc};
    use serde_json::json;

    use super::*;
    use crate::endpoint::Instant;

    fn early() -> Instant {
        Utc.with_ymd_and_hms(2025, 11, 16, 10, 0, 0).unwrap()
    }

    fn late() -> Instant {
        early() + TimeDelta::days(3)
    }

    struct Lease {
        starts_at: Instant,
        ends_at: Option<Instant>,
    }

    impl Bounds for Lease {
        fn begin(&self) -> Option<Endpoint> {
            Some(self.starts_at.into())
        }

        fn end(&self) -> Option<Endpoint> {
            self.ends_at.map(Endpoint::from)
        }
    }

    #[test]
    fn test_interval_passes_through() -> Result {
        let interval = Interval::from_instants(Some(late()), Some(early()));
        assert_eq!(coerce(interval)?, interval);
        assert_eq!(coerce(Interval::INFINITE)?, Interval::INFINITE);
        Ok(())
    }

    #[test]
    fn test_sentinels() -> Result {
        let infinite = coerce(f64::INFINITY)?;
        assert_eq!(infinite.decompose(), (None, None));
        assert!(!infinite.is_empty());

        assert_eq!(coerce(EMPTY_SENTINEL)?, Interval::Empty);
        assert_eq!(coerce(String::from("empty"))?, Interval::Empty);
        assert_eq!(coerce(None::<Interval>)?, Interval::Empty);
        assert_eq!(coerce(())?, Interval::Empty);
        assert_eq!(coerce(Value::Null)?, Interval::Empty);
        Ok(())
    }

    #[test]
    fn test_begin_end_bearing_shapes() -> Result {
        let expected = Interval::normalize(Some(early()), Some(late()))?;

        let mut hash_map = HashMap::new();
        hash_map.insert(String::from("begin"), early());
        hash_map.insert(String::from("end"), late());

        let btree_map =
            BTreeMap::from([(String::from("begin"), early()), (String::from("end"), late())]);

        assert_eq!(coerce(early()..late())?, expected);
        let lease = Lease { starts_at: early(), ends_at: Some(late()) };
        assert_eq!(coerce(Assignment::from_bounds(&lease))?, expected);
        assert_eq!(coerce(&lease)?, expected);
        assert_eq!(coerce(hash_map)?, expected);
        assert_eq!(coerce(btree_map)?, expected);
        assert_eq!(
            coerce(json!({ "begin": early().to_rfc3339(), "end": late().to_rfc3339() }))?,
            expected,
        );
        Ok(())
    }

    #[test]
    fn test_half_bounded_shapes() -> Result {
        assert_eq!(coerce(early()..)?, Interval::from_instants(Some(early()), None));
        assert_eq!(coerce(..late())?, Interval::from_instants(None, Some(late())));
        assert_eq!(
            coerce(Assignment::from_bounds(&Lease { starts_at: early(), ends_at: None }))?,
            Interval::from_instants(Some(early()), None),
        );
        assert_eq!(
            coerce(json!({ "end": "2025-11-19T10:00:00Z", "begin": null }))?,
            Interval::from_instants(None, Some(late())),
        );
        Ok(())
    }

    #[test]
    fn test_inclusive_ranges_store_exclusive_end() -> Result {
        let interval = coerce(early()..=late())?;
        assert_eq!(interval, coerce(early()..late())?);
        assert!(interval.contains(early()));
        assert!(!interval.contains(late()));

        assert_eq!(coerce(..=late())?, Interval::from_instants(None, Some(late())));
        assert_eq!(
            coerce("2025-11-16T10:00:00Z"..="2025-11-19T10:00:00Z")?,
            Interval::from_instants(Some(early()), Some(late())),
        );
        Ok(())
    }

    #[test]
    fn test_without_endpoints_is_empty() -> Result {
        assert_eq!(coerce(json!({}))?, Interval::Empty);
        assert_eq!(coerce(HashMap::<String, Instant>::new())?, Interval::Empty);
        assert_eq!(coerce(..)?, Interval::Empty);
        Ok(())
    }

    #[test]
    fn test_unrecognized_shapes_fail() {
        assert!(coerce(1_i32).unwrap_err().is_type());
        assert!(coerce(42_u64).unwrap_err().is_type());
        assert!(coerce(1.5_f64).unwrap_err().is_type());
        assert!(coerce(f64::NEG_INFINITY).unwrap_err().is_type());
        assert!(coerce("infinity").unwrap_err().is_type());
        assert!(coerce(json!(1)).unwrap_err().is_type());
        assert!(coerce(json!(true)).unwrap_err().is_type());
        assert!(coerce(json!([early().to_rfc3339()])).unwrap_err().is_type());
        assert!(coerce(json!({ "begin": 5 })).unwrap_err().is_type());
    }

    #[test]
    fn test_bad_endpoint_text_fails() {
        assert!(coerce("tomorrow".."later").unwrap_err().is_conversion());
        assert!(coerce(..="later").unwrap_err().is_conversion());
        assert!(coerce(json!({ "begin": "tomorrow" })).unwrap_err().is_conversion());
    }
}
