use std::borrow::Cow;

use serde_json::{Map, Value};

use crate::{
    assignment::endpoint_from_json,
    endpoint::Instant,
    field::IntervalField,
    prelude::*,
    storage::Storage,
};

/// One of the six generated operations of an interval field.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Accessor {
    Get,
    Set,
    GetBegin,
    SetBegin,
    GetEnd,
    SetEnd,
}

impl Accessor {
    pub const ALL: [Self; 6] =
        [Self::Get, Self::Set, Self::GetBegin, Self::SetBegin, Self::GetEnd, Self::SetEnd];

    /// Appended to the field name to form the accessor name.
    #[must_use]
    pub const fn suffix(self) -> &'static str {
        match self {
            Self::Get => "",
            Self::Set => "=",
            Self::GetBegin => "_begin",
            Self::SetBegin => "_begin=",
            Self::GetEnd => "_end",
            Self::SetEnd => "_end=",
        }
    }
}

impl IntervalField {
    #[must_use]
    pub fn accessor_name(&self, accessor: Accessor) -> String {
        format!("{}{}", self.name(), accessor.suffix())
    }
}

/// Interval fields configured for a record type.
#[must_use]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Fields(Vec<IntervalField>);

impl Default for Fields {
    /// Single field with the conventional name.
    fn default() -> Self {
        Self(vec![IntervalField::default()])
    }
}

impl Fields {
    /// Collect the fields, dropping duplicates.
    ///
    /// No names at all means the default field.
    pub fn new<N: Into<Cow<'static, str>>>(names: impl IntoIterator<Item = N>) -> Self {
        let mut fields: Vec<IntervalField> = Vec::new();
        for field in names.into_iter().map(IntervalField::new) {
            if !fields.contains(&field) {
                fields.push(field);
            }
        }
        if fields.is_empty() { Self::default() } else { Self(fields) }
    }

    pub fn iter(&self) -> impl Iterator<Item = &IntervalField> {
        self.0.iter()
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&IntervalField> {
        self.0.iter().find(|field| field.name() == name)
    }

    /// All generated accessor names, grouped by field.
    pub fn accessor_names(&self) -> impl Iterator<Item = String> + '_ {
        self.iter().flat_map(|field| {
            Accessor::ALL.into_iter().map(|accessor| field.accessor_name(accessor))
        })
    }

    /// Find the field and operation behind a generated accessor name.
    ///
    /// The whole-value accessor wins when a field name itself ends with `_begin` or `_end`.
    #[must_use]
    pub fn resolve(&self, name: &str) -> Option<(&IntervalField, Accessor)> {
        let (base, is_setter) =
            name.strip_suffix('=').map_or((name, false), |base| (base, true));
        let (field, accessor) = if let Some(field) = self.get(base) {
            (field, if is_setter { Accessor::Set } else { Accessor::Get })
        } else if let Some(field) = base.strip_suffix("_begin").and_then(|base| self.get(base)) {
            (field, if is_setter { Accessor::SetBegin } else { Accessor::GetBegin })
        } else {
            let field = base.strip_suffix("_end").and_then(|base| self.get(base))?;
            (field, if is_setter { Accessor::SetEnd } else { Accessor::GetEnd })
        };
        Some((field, accessor))
    }

    /// Read through a generated getter name.
    ///
    /// Whole values are range literals, endpoints are RFC 3339 timestamps,
    /// absent values are `null`.
    pub fn read<S: Storage + ?Sized>(&self, storage: &S, name: &str) -> Result<Value> {
        let value = match self.resolve(name) {
            Some((field, Accessor::Get)) => {
                field.get(storage).map(|interval| Value::String(interval.to_string()))
            }
            Some((field, Accessor::GetBegin)) => field.begin(storage).map(instant_to_json),
            Some((field, Accessor::GetEnd)) => field.end(storage).map(instant_to_json),
            _ => return Err(Error::UnknownAccessor { name: name.to_owned() }),
        };
        Ok(value.unwrap_or(Value::Null))
    }

    /// Write through a generated setter name.
    #[instrument(skip_all, fields(name = name))]
    pub fn write<S: Storage + ?Sized>(&self, storage: &mut S, name: &str, value: Value) -> Result {
        match self.resolve(name) {
            Some((field, Accessor::Set)) => field.set(storage, value),
            Some((field, Accessor::SetBegin)) => {
                field.set_begin(storage, endpoint_from_json(name, Some(value))?)
            }
            Some((field, Accessor::SetEnd)) => {
                field.set_end(storage, endpoint_from_json(name, Some(value))?)
            }
            _ => Err(Error::UnknownAccessor { name: name.to_owned() }),
        }
    }

    /// Apply the attributes in the order they were written, as a record initializer does.
    ///
    /// Keys are accessor names without the trailing `=`. Stops at the first failure,
    /// keeping the attributes applied before it.
    #[instrument(skip_all, fields(n_attributes = attributes.len()))]
    pub fn assign<S: Storage + ?Sized>(
        &self,
        storage: &mut S,
        attributes: Map<String, Value>,
    ) -> Result {
        for (name, value) in attributes {
            self.write(storage, &format!("{name}="), value)?;
        }
        Ok(())
    }
}

fn instant_to_json(instant: Instant) -> Value {
    Value::String(instant.to_rfc3339())
}
