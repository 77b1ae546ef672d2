//! Per-field precedence between variable bindings and direct values.
//!
//! Every bindable field of a style ends a reconciliation in exactly one of
//! three states, captured by [`FieldSource`]:
//!
//! | Source      | Meaning                                              |
//! |-------------|------------------------------------------------------|
//! | `Bound(id)` | The variable governs the field. No literal is written. |
//! | `Direct(v)` | The literal `v` is written, clearing any binding.    |
//! | `Unset`     | The field is left exactly as it was.                 |
//!
//! A requested binding that cannot be honored never falls back to a direct
//! value. The field becomes `Unset` and a [`BindingSkip`] is reported.

use std::collections::BTreeMap;
use std::fmt;

use crate::error::HostError;
use crate::host::DocumentHost;
use crate::model::{Variable, VariableId, VariableType};

/// Where a field's value comes from after reconciliation.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldSource<T> {
    Bound(VariableId),
    Direct(T),
    Unset,
}

impl<T: Clone> FieldSource<T> {
    /// The literal the field holds once the update lands.
    ///
    /// A bound or unset field keeps `current` as its literal.
    pub fn resolve(&self, current: &T) -> T {
        match self {
            FieldSource::Direct(value) => value.clone(),
            FieldSource::Bound(_) | FieldSource::Unset => current.clone(),
        }
    }

    /// The literal to write, if any.
    pub fn into_direct(self) -> Option<T> {
        match self {
            FieldSource::Direct(value) => Some(value),
            FieldSource::Bound(_) | FieldSource::Unset => None,
        }
    }

    pub fn is_bound(&self) -> bool {
        matches!(self, FieldSource::Bound(_))
    }
}

/// A requested variable binding that was not applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BindingSkip {
    /// Wire name of the field (`fontSize`, `color`, ...).
    pub field: String,
    pub variable: VariableId,
    pub reason: SkipReason,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    TypeMismatch {
        expected: VariableType,
        actual: VariableType,
    },
    MissingVariable,
    LookupFailed(String),
}

impl fmt::Display for BindingSkip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.reason {
            SkipReason::TypeMismatch { expected, actual } => write!(
                f,
                "{}: variable '{}' is {}, expected {}",
                self.field, self.variable, actual, expected
            ),
            SkipReason::MissingVariable => {
                write!(f, "{}: variable '{}' not found", self.field, self.variable)
            }
            SkipReason::LookupFailed(message) => write!(
                f,
                "{}: looking up variable '{}' failed: {}",
                self.field, self.variable, message
            ),
        }
    }
}

/// The binding decision for one field, before any direct value is considered.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Governance {
    /// Bind to a variable that resolved with the right type.
    Bind(VariableId),
    /// The request cleared the binding.
    Unbind,
    /// Not named in the request and currently bound.
    KeepBound(VariableId),
    /// Not named in the request and currently free.
    Free,
    /// A binding was requested but cannot be honored.
    Skip(BindingSkip),
}

impl Governance {
    /// Combines the binding decision with the direct instruction.
    pub(crate) fn source<T>(self, instruction: Option<T>, current: T) -> FieldSource<T> {
        match self {
            Governance::Bind(id) | Governance::KeepBound(id) => FieldSource::Bound(id),
            Governance::Skip(_) => FieldSource::Unset,
            Governance::Unbind | Governance::Free => {
                FieldSource::Direct(instruction.unwrap_or(current))
            }
        }
    }

    /// The binding change to commit: `Some(Some(id))` binds, `Some(None)` clears.
    pub(crate) fn binding_change(&self) -> Option<Option<VariableId>> {
        match self {
            Governance::Bind(id) => Some(Some(id.clone())),
            Governance::Unbind => Some(None),
            _ => None,
        }
    }

    /// True when the direct instruction for this field should be consulted.
    pub(crate) fn is_free(&self) -> bool {
        matches!(self, Governance::Unbind | Governance::Free)
    }

    pub(crate) fn skip(&self) -> Option<&BindingSkip> {
        match self {
            Governance::Skip(skip) => Some(skip),
            _ => None,
        }
    }
}

/// Decides a field's governance from the request and the field's current binding.
///
/// `requested` is the field's entry in the request's binding map: absent,
/// `null` (clear), or a variable id. An empty id counts as absent.
pub(crate) async fn govern<H: DocumentHost + ?Sized>(
    host: &H,
    field: &str,
    required: VariableType,
    current: Option<&VariableId>,
    requested: Option<&Option<VariableId>>,
) -> Governance {
    match requested {
        Some(None) => Governance::Unbind,
        Some(Some(id)) if !id.is_empty() => {
            let lookup = host.variable_by_id(id).await;
            classify(field, required, id, lookup)
        }
        _ => match current {
            Some(id) => Governance::KeepBound(id.clone()),
            None => Governance::Free,
        },
    }
}

/// Classifies the outcome of a variable lookup for a binding request.
pub(crate) fn classify(
    field: &str,
    required: VariableType,
    id: &VariableId,
    lookup: Result<Option<Variable>, HostError>,
) -> Governance {
    let reason = match lookup {
        Ok(Some(variable)) if variable.resolved_type == required => {
            log::debug!("binding {} to variable {} ({})", field, id, variable.name);
            return Governance::Bind(id.clone());
        }
        Ok(Some(variable)) => SkipReason::TypeMismatch {
            expected: required,
            actual: variable.resolved_type,
        },
        Ok(None) => SkipReason::MissingVariable,
        Err(err) => SkipReason::LookupFailed(err.to_string()),
    };
    let skip = BindingSkip {
        field: field.to_string(),
        variable: id.clone(),
        reason,
    };
    log::warn!("skipping binding: {}", skip);
    Governance::Skip(skip)
}

/// Collects the binding changes of several fields into one commit map.
pub(crate) fn binding_changes<'a, K: Ord + Copy + 'a>(
    fields: impl IntoIterator<Item = (K, &'a Governance)>,
) -> BTreeMap<K, Option<VariableId>> {
    fields
        .into_iter()
        .filter_map(|(key, governance)| governance.binding_change().map(|change| (key, change)))
        .collect()
}
