//! Macro registry: lookup table from annotation name to peer macro.
//!
//! # Error Handling
//!
//! Registration conflicts are reported as `ParamTestError::Validation`
//! through the `err_msg!` macro.
//!
//! # Summary Table
//! | Method            | Overwrites | Error on Duplicate |
//! |-------------------|------------|--------------------|
//! | register          | Yes        | No                 |
//! | register_or_error | No         | Yes                |
//! | unregister        | N/A        | N/A                |
//! | lookup/contains   | N/A        | N/A                |
//!
//! # Thread Safety
//! Entries are plain function pointers, so a built registry is `Send + Sync`
//! and can be shared across threads expanding different files.

use std::collections::BTreeMap;

use crate::err_msg;
use crate::macros::{parameterized, PeerMacroFn};
use crate::ParamTestError;

/// Registry of attached peer macros, keyed by annotation name.
///
/// Names are case-sensitive and given without the leading `@`.
///
/// # Example
/// ```rust
/// use paramtest::macros::MacroRegistry;
/// let registry = MacroRegistry::standard();
/// assert!(registry.contains("ParameterizedTest"));
/// assert!(!registry.contains("parameterizedTest"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct MacroRegistry {
    macros: BTreeMap<String, PeerMacroFn>,
}

impl MacroRegistry {
    /// Creates a new, empty macro registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding every macro this crate ships.
    pub fn standard() -> Self {
        let mut registry = Self::new();
        registry.register(parameterized::NAME, parameterized::expansion);
        registry
    }

    /// Registers a macro under `name`, replacing any previous entry.
    ///
    /// # Returns
    /// The previously registered macro, if there was one.
    pub fn register(&mut self, name: &str, func: PeerMacroFn) -> Option<PeerMacroFn> {
        self.macros.insert(name.to_string(), func)
    }

    /// Registers a macro, returning an error if the name is already taken.
    ///
    /// # Example
    /// ```rust
    /// use paramtest::macros::MacroRegistry;
    /// let mut reg = MacroRegistry::standard();
    /// let noop: paramtest::macros::PeerMacroFn = |_, _| Ok(Vec::new());
    /// assert!(reg.register_or_error("ParameterizedTest", noop).is_err());
    /// assert!(reg.register_or_error("Noop", noop).is_ok());
    /// ```
    pub fn register_or_error(&mut self, name: &str, func: PeerMacroFn) -> Result<(), ParamTestError> {
        if self.macros.contains_key(name) {
            return Err(err_msg!(Validation, "Macro '{}' is already registered", name));
        }
        self.macros.insert(name.to_string(), func);
        Ok(())
    }

    /// Removes a macro by name, returning it if it was registered.
    pub fn unregister(&mut self, name: &str) -> Option<PeerMacroFn> {
        self.macros.remove(name)
    }

    pub fn lookup(&self, name: &str) -> Option<PeerMacroFn> {
        self.macros.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.macros.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.macros.len()
    }

    pub fn is_empty(&self) -> bool {
        self.macros.is_empty()
    }

    /// Registered names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.macros.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noop(_: &crate::ast::Attribute, _: &crate::ast::Decl) -> Result<Vec<crate::ast::Decl>, crate::ExpansionError> {
        Ok(Vec::new())
    }

    #[test]
    fn register_replaces_and_reports_previous() {
        let mut reg = MacroRegistry::new();
        assert!(reg.is_empty());
        assert!(reg.register("Noop", noop).is_none());
        assert!(reg.register("Noop", noop).is_some());
        assert_eq!(reg.len(), 1);
    }

    #[test]
    fn unregister_removes_entry() {
        let mut reg = MacroRegistry::standard();
        assert!(reg.unregister("ParameterizedTest").is_some());
        assert!(reg.lookup("ParameterizedTest").is_none());
        assert!(reg.unregister("ParameterizedTest").is_none());
    }

    #[test]
    fn names_are_sorted() {
        let mut reg = MacroRegistry::standard();
        reg.register("Alpha", noop);
        assert_eq!(reg.names().collect::<Vec<_>>(), vec!["Alpha", "ParameterizedTest"]);
    }

    #[test]
    fn registry_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<MacroRegistry>();
    }
}
