//! Interned identifiers for reports and positions.
//!
//! Report and position ids are author-supplied strings that get compared and
//! hashed a lot while a diagram is being built (duplicate detection, lookups
//! by report id, scripted interactions). [`Id`] interns them once and is
//! `Copy` afterwards.

use std::{
    fmt,
    sync::{Mutex, MutexGuard, OnceLock},
};

use string_interner::{DefaultStringInterner, DefaultSymbol};

/// Global string interner backing every [`Id`].
static INTERNER: OnceLock<Mutex<DefaultStringInterner>> = OnceLock::new();

fn interner() -> MutexGuard<'static, DefaultStringInterner> {
    INTERNER
        .get_or_init(|| Mutex::new(DefaultStringInterner::new()))
        .lock()
        .expect("Failed to acquire interner lock")
}

/// Interned identifier of a report or a position.
///
/// # Examples
///
/// ```
/// use reportgraph_core::identifier::Id;
///
/// let revenue = Id::new("UE001");
/// assert_eq!(revenue, "UE001");
/// assert_eq!(revenue, Id::new("UE001"));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Id(DefaultSymbol);

impl Id {
    /// Interns `name` and returns its identifier.
    pub fn new(name: &str) -> Self {
        Self(interner().get_or_intern(name))
    }

    /// Returns `true` when the identifier is empty or whitespace only.
    ///
    /// Catalogs reject such ids, see [`crate::catalog::CatalogError::EmptyId`].
    pub fn is_blank(self) -> bool {
        self.with_str(|s| s.trim().is_empty())
    }

    /// Runs `f` with the interned string without allocating.
    pub fn with_str<R>(self, f: impl FnOnce(&str) -> R) -> R {
        let interner = interner();
        let value = interner
            .resolve(self.0)
            .expect("Symbol should exist in interner");
        f(value)
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.with_str(|s| f.write_str(s))
    }
}

impl From<&str> for Id {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl PartialEq<str> for Id {
    fn eq(&self, other: &str) -> bool {
        self.with_str(|s| s == other)
    }
}

impl PartialEq<&str> for Id {
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_new_interns_equal_strings() {
        let a = Id::new("GUV001");
        let b = Id::new("GUV001");
        let c = Id::new("VB001");

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(a, "GUV001");
    }

    #[test]
    fn test_display() {
        let id = Id::new("MA001");
        assert_eq!(format!("{id}"), "MA001");
        assert_eq!(id.to_string(), "MA001");
    }

    #[test]
    fn test_is_blank() {
        assert!(Id::new("").is_blank());
        assert!(Id::new("   ").is_blank());
        assert!(!Id::new("PK001").is_blank());
    }

    #[test]
    fn test_from_str_slice() {
        let id: Id = "KF001".into();
        assert_eq!(id, Id::new("KF001"));
    }

    #[test]
    fn test_hash_set_dedup() {
        let ids: HashSet<Id> = ["A", "B", "A"].into_iter().map(Id::new).collect();
        assert_eq!(ids.len(), 2);
    }

    #[test]
    fn test_partial_eq_str_ref() {
        let id = Id::new("SV001");
        let owned = String::from("SV001");
        assert!(id == owned.as_str());
        assert!(id != "SV002");
    }
}
