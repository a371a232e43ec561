use std::cell::{Ref, RefCell, RefMut};
use std::collections::BTreeMap;
use std::rc::Rc;

use crate::error::{SimError, SimResult};
use crate::object::{ObjectHandle, PhysicalObject};

/// How an effect sees physical objects once registered with a scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ObjectViewMode {
    /// The effect keeps its own set of attached objects.
    #[default]
    Private,
    /// The effect aliases the scheduler's registry and sees every object it
    /// holds, including ones added after the effect.
    SharedWithScheduler,
}

/// A name-keyed set of object handles.
///
/// Cloning an `ObjectRegistry` clones the handle, not the set: both clones
/// see the same entries.
#[derive(Debug, Clone, Default)]
pub struct ObjectRegistry(Rc<RefCell<BTreeMap<String, ObjectHandle>>>);

impl ObjectRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an object under its name, returning the object it replaced.
    pub fn insert(&self, handle: ObjectHandle) -> SimResult<Option<ObjectHandle>> {
        let name = handle
            .try_borrow()
            .map_err(|_| SimError::ObjectBusy(String::from("<unnamed>")))?
            .name()
            .to_owned();
        Ok(self.0.borrow_mut().insert(name, handle))
    }

    /// Remove an object by name. Unknown names are ignored.
    pub fn remove(&self, name: &str) -> Option<ObjectHandle> {
        self.0.borrow_mut().remove(name)
    }

    /// Look up an object by name.
    pub fn get(&self, name: &str) -> Option<ObjectHandle> {
        self.0.borrow().get(name).cloned()
    }

    /// Returns `true` if an object with this name is present.
    pub fn contains(&self, name: &str) -> bool {
        self.0.borrow().contains_key(name)
    }

    /// Number of objects.
    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    /// Returns `true` if the registry holds no objects.
    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }

    /// Object names in sorted order.
    pub fn names(&self) -> Vec<String> {
        self.0.borrow().keys().cloned().collect()
    }

    /// A snapshot of all entries in name order.
    ///
    /// Iterate the snapshot rather than the registry while running hooks, so
    /// the registry itself is never borrowed during a dispatch.
    pub fn entries(&self) -> Vec<(String, ObjectHandle)> {
        self.0
            .borrow()
            .iter()
            .map(|(name, handle)| (name.clone(), Rc::clone(handle)))
            .collect()
    }

    /// Returns `true` if both registries are the same underlying set.
    pub fn same_as(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

/// Immutably borrow an object, reporting a busy object as an error.
pub fn borrow_object<'a>(
    name: &str,
    handle: &'a ObjectHandle,
) -> SimResult<Ref<'a, dyn PhysicalObject + 'static>> {
    handle
        .try_borrow()
        .map_err(|_| SimError::ObjectBusy(name.to_owned()))
}

/// Mutably borrow an object, reporting a busy object as an error.
pub fn borrow_object_mut<'a>(
    name: &str,
    handle: &'a ObjectHandle,
) -> SimResult<RefMut<'a, dyn PhysicalObject + 'static>> {
    handle
        .try_borrow_mut()
        .map_err(|_| SimError::ObjectBusy(name.to_owned()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mass_point::MassPoint;
    use crate::object::share;
    use tw_core::Vector;

    fn point(name: &str) -> ObjectHandle {
        share(MassPoint::new(name, 1.0, Vector::ZERO, Vector::ZERO).unwrap())
    }

    #[test]
    fn insert_replaces_by_name() {
        let registry = ObjectRegistry::new();
        assert!(registry.insert(point("probe")).unwrap().is_none());
        assert!(registry.insert(point("probe")).unwrap().is_some());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn clones_alias_the_same_set() {
        let registry = ObjectRegistry::new();
        let alias = registry.clone();
        registry.insert(point("earth")).unwrap();
        assert!(alias.contains("earth"));
        assert!(alias.same_as(&registry));
        assert!(!ObjectRegistry::new().same_as(&registry));
    }

    #[test]
    fn names_are_sorted() {
        let registry = ObjectRegistry::new();
        for name in ["moon", "earth", "sun"] {
            registry.insert(point(name)).unwrap();
        }
        assert_eq!(registry.names(), vec!["earth", "moon", "sun"]);
        assert_eq!(registry.entries().len(), 3);
    }

    #[test]
    fn remove_unknown_is_noop() {
        let registry = ObjectRegistry::new();
        registry.insert(point("earth")).unwrap();
        assert!(registry.remove("mars").is_none());
        assert_eq!(registry.len(), 1);
        assert!(registry.remove("earth").is_some());
        assert!(registry.is_empty());
    }

    #[test]
    fn busy_object_is_reported() {
        let handle = point("probe");
        let _guard = handle.borrow_mut();
        let err = borrow_object("probe", &handle).unwrap_err();
        assert!(matches!(err, SimError::ObjectBusy(name) if name == "probe"));
    }
}
