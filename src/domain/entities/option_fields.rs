use serde::{Deserialize, Deserializer, Serialize, Serializer};
use validator::ValidateLength;

/// Field state inside a typed update request.
///
/// - `Unchanged` → field absent from the request, keep the stored value
/// - `SetToNull` → explicit `null`, reset to the empty/default value
/// - `SetToValue` → replace with the provided value
///
/// Request structs carry `#[serde(default)]` so absent fields land on
/// `Unchanged`; `null` and values go through the `Deserialize` impl below.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum OptionField<T> {
    #[default]
    Unchanged,
    SetToNull,
    SetToValue(T),
}

impl<'de, T> Deserialize<'de> for OptionField<T>
where
    T: Deserialize<'de>,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Option::<T>::deserialize(deserializer).map(|value| match value {
            Some(v) => OptionField::SetToValue(v),
            None => OptionField::SetToNull,
        })
    }
}

impl<T: Serialize> Serialize for OptionField<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            OptionField::SetToValue(v) => serializer.serialize_some(v),
            _ => serializer.serialize_none(),
        }
    }
}

// ---------------------- Validation support ----------------------

impl<T> ValidateLength<u64> for OptionField<T>
where
    T: ValidateLength<u64>
{
    fn length(&self) -> Option<u64> {
        match self {
            OptionField::SetToValue(value) => value.length(),
            _ => None,
        }
    }
    fn validate_length(&self, min: Option<u64>, max: Option<u64>, equal: Option<u64>) -> bool {
        match self {
            OptionField::SetToValue(value) => value.validate_length(min, max, equal),
            _ => true,
        }
    }
}

// ---------------------- Merge helpers ----------------------

impl<T> OptionField<T> {
    /// True when `Unchanged`.
    pub fn is_unchanged(&self) -> bool {
        matches!(self, Self::Unchanged)
    }

    /// True when `SetToNull`.
    pub fn is_set_to_null(&self) -> bool {
        matches!(self, Self::SetToNull)
    }

    /// If `SetToValue`, returns a reference to inner value.
    pub fn value_ref(&self) -> Option<&T> {
        if let Self::SetToValue(v) = self {
            Some(v)
        } else {
            None
        }
    }

    /// Transform inner value if `SetToValue`
    pub fn map_value<U, F: FnOnce(T) -> U>(self, f: F) -> OptionField<U> {
        match self {
            Self::Unchanged => OptionField::Unchanged,
            Self::SetToNull => OptionField::SetToNull,
            Self::SetToValue(v) => OptionField::SetToValue(f(v)),
        }
    }

    /// Writes the patch into `target`; `SetToNull` resets it to `T::default()`.
    pub fn apply_to(self, target: &mut T)
    where
        T: Default,
    {
        match self {
            Self::Unchanged => {}
            Self::SetToNull => *target = T::default(),
            Self::SetToValue(v) => *target = v,
        }
    }

    /// Like [`apply_to`](Self::apply_to) for optional targets: `SetToNull` clears them.
    pub fn apply_to_option(self, target: &mut Option<T>) {
        match self {
            Self::Unchanged => {}
            Self::SetToNull => *target = None,
            Self::SetToValue(v) => *target = Some(v),
        }
    }
}

impl<T> From<Option<Option<T>>> for OptionField<T> {
    fn from(opt: Option<Option<T>>) -> Self {
        match opt {
            None => OptionField::Unchanged,
            Some(None) => OptionField::SetToNull,
            Some(Some(v)) => OptionField::SetToValue(v),
        }
    }
}

/// Rejects an explicit `null` on a field that must stay populated.
pub fn validate_required_patch<T>(value: &OptionField<T>) -> Result<(), validator::ValidationError> {
    if value.is_set_to_null() {
        let mut err = validator::ValidationError::new("required");
        err.message = Some("This field cannot be cleared".into());
        return Err(err);
    }
    Ok(())
}
