use serde::{Deserialize, Deserializer};

/// A tri-state edit: leave the field, clear it, or set it.
///
/// On the wire an absent key is `Keep` and `null` is `Clear`. Fields of this
/// type need `#[serde(default)]` so that absence reaches [`Default`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Change<T> {
    #[default]
    Keep,
    Clear,
    Set(T),
}

impl<T> Change<T> {
    pub fn as_set(&self) -> Option<&T> {
        match self {
            Change::Set(value) => Some(value),
            Change::Keep | Change::Clear => None,
        }
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Change<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match Option::<T>::deserialize(deserializer)? {
            Some(value) => Change::Set(value),
            None => Change::Clear,
        })
    }
}

/// Name and description edits shared by both style kinds.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenameEdit {
    /// Replacement text: the whole new name, or the substitute for `matching`.
    pub name: Option<String>,
    /// Substring to replace in the current name.
    pub matching: Change<String>,
    pub description: Change<String>,
}

impl RenameEdit {
    /// The new name for a style currently called `current`, or `None` to keep it.
    ///
    /// With a non-empty `matching`, only its first occurrence is replaced. A
    /// name that does not contain it is kept. Without one, a non-empty `name`
    /// replaces the whole name.
    pub fn rename(&self, current: &str) -> Option<String> {
        let name = self.name.as_ref()?;
        match self.matching.as_set() {
            Some(pattern) if !pattern.is_empty() => current
                .contains(pattern.as_str())
                .then(|| current.replacen(pattern.as_str(), name, 1)),
            _ if !name.trim().is_empty() => Some(name.clone()),
            _ => None,
        }
    }

    /// The description to write, or `None` to keep it. `Clear` writes `""`.
    pub fn description(&self) -> Option<String> {
        match &self.description {
            Change::Keep => None,
            Change::Clear => Some(String::new()),
            Change::Set(text) => Some(text.clone()),
        }
    }
}
