//! Object store trait.
//!
//! Defines the [`ObjectStore`] trait through which name tree code reads and
//! writes document objects. The document owns every object; a store only
//! exposes container access (dictionaries and arrays) and object creation.

use lopdf::{Dictionary, Object, ObjectId};

use crate::error::BackendError;

/// Container access to a PDF document's objects.
///
/// Name tree nodes are indirect dictionaries identified by [`ObjectId`];
/// values stored in a tree are arbitrary [`Object`]s that the tree only
/// transports.
///
/// # Usage
///
/// ```ignore
/// let root = store.make_dictionary(dictionary! { "Names" => vec![] });
/// if let Some(names) = store.get_key(root, b"Names") {
///     let items = store.get_array_items(names);
/// }
/// ```
pub trait ObjectStore {
    /// Returns `true` if `id` names an existing dictionary object.
    fn is_dictionary(&self, id: ObjectId) -> bool;

    /// Get a dictionary entry of the object `id`, as stored.
    ///
    /// Returns `None` if the object is missing, is not a dictionary, or has
    /// no entry `name`. Indirect entries are returned unresolved.
    fn get_key(&self, id: ObjectId, name: &[u8]) -> Option<&Object>;

    /// Follow one level of indirection.
    ///
    /// Returns `obj` itself for direct objects and `None` for a dangling
    /// reference.
    fn resolve<'a>(&'a self, obj: &'a Object) -> Option<&'a Object>;

    /// The items of an array, resolving an indirect array first.
    fn get_array_items<'a>(&'a self, obj: &'a Object) -> Option<&'a [Object]> {
        match self.resolve(obj)? {
            Object::Array(items) => Some(items.as_slice()),
            _ => None,
        }
    }

    /// Add a new indirect dictionary object and return its id.
    fn make_dictionary(&mut self, dict: Dictionary) -> ObjectId;

    /// Build a direct array object from `items`.
    fn make_array(&self, items: Vec<Object>) -> Object {
        Object::Array(items)
    }

    /// Set an entry in the dictionary object `id`.
    ///
    /// # Errors
    ///
    /// Returns an error if `id` does not exist or is not a dictionary.
    fn set_key(&mut self, id: ObjectId, name: &[u8], value: Object) -> Result<(), BackendError>;

    /// Remove an entry from the dictionary object `id`, returning the old value.
    ///
    /// # Errors
    ///
    /// Returns an error if `id` does not exist or is not a dictionary.
    fn remove_key(&mut self, id: ObjectId, name: &[u8]) -> Result<Option<Object>, BackendError>;
}
