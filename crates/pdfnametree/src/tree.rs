//! The [`NameTree`] holder.

use std::collections::BTreeMap;

use lopdf::{Dictionary, Object, ObjectId};
use pdfnametree_core::{
    NameKey, NameTreeError, NameTreeOptions, RepairReport, TreeState, ValidationIssue,
};
use pdfnametree_parse::ObjectStore;
use tracing::{debug, warn};

use crate::iter::Entries;
use crate::{lookup, mutate, repair, validate};

/// A name tree rooted at one dictionary object of a document.
///
/// The holder borrows the document mutably for its lifetime and keeps only
/// the root id, the options and a [`TreeState`]. The first operation that
/// reads or writes entries checks the whole tree; a malformed tree is
/// rebuilt once if auto-repair is on, otherwise every operation fails with
/// [`NameTreeError::RepairDisabled`].
///
/// # Example
///
/// ```ignore
/// let root = pdfnametree::catalog::ensure_name_tree(&mut doc, b"Dests")?;
/// let mut tree = NameTree::new(&mut doc, root, true);
/// tree.set("chapter1", Object::Reference(page_id))?;
/// assert!(tree.contains("chapter1")?);
/// ```
pub struct NameTree<'a, S: ObjectStore> {
    store: &'a mut S,
    root: ObjectId,
    options: NameTreeOptions,
    state: TreeState,
}

impl<'a, S: ObjectStore> NameTree<'a, S> {
    /// Open the tree at `root` with default options and the given repair policy.
    pub fn new(store: &'a mut S, root: ObjectId, auto_repair: bool) -> Self {
        Self::with_options(store, root, NameTreeOptions::with_auto_repair(auto_repair))
    }

    /// Open the tree at `root` with explicit options.
    pub fn with_options(store: &'a mut S, root: ObjectId, options: NameTreeOptions) -> Self {
        Self {
            store,
            root,
            options,
            state: TreeState::Unchecked,
        }
    }

    /// Create a new empty tree (`<< /Names [] >>`) in `store`.
    pub fn new_empty(store: &'a mut S, options: NameTreeOptions) -> Self {
        let mut dict = Dictionary::new();
        dict.set("Names", store.make_array(Vec::new()));
        let root = store.make_dictionary(dict);
        debug!(root = ?root, "created empty name tree");
        Self {
            store,
            root,
            options,
            state: TreeState::Valid,
        }
    }

    /// Object id of the root node.
    pub fn root_object(&self) -> ObjectId {
        self.root
    }

    /// The options this holder was created with.
    pub fn options(&self) -> &NameTreeOptions {
        &self.options
    }

    /// Result of the validity check, once it has run.
    pub fn state(&self) -> &TreeState {
        &self.state
    }

    /// The underlying object store.
    pub fn store(&self) -> &S {
        &*self.store
    }

    /// Check the tree without changing it or the holder state.
    pub fn validate(&self) -> Vec<ValidationIssue> {
        validate::validate_tree(&*self.store, self.root, self.options.max_depth)
    }

    /// Rebuild the tree from every entry still reachable, even if it is valid.
    ///
    /// Runs regardless of the auto-repair setting and marks the tree
    /// [`TreeState::Repaired`].
    pub fn repair(&mut self) -> Result<RepairReport, NameTreeError> {
        let report = repair::repair_tree(&mut *self.store, self.root, &self.options)?;
        self.state = TreeState::Repaired;
        Ok(report)
    }

    fn ensure_usable(&mut self) -> Result<(), NameTreeError> {
        match &self.state {
            TreeState::Valid | TreeState::Repaired => return Ok(()),
            TreeState::Invalid(reason) => {
                return Err(NameTreeError::RepairDisabled {
                    reason: reason.clone(),
                });
            }
            TreeState::Unchecked => {}
        }
        let issues = self.validate();
        for issue in issues.iter().filter(|issue| issue.is_warning()) {
            debug!(root = ?self.root, %issue, "name tree warning");
        }
        let Some(first) = issues.iter().find(|issue| issue.is_error()) else {
            self.state = TreeState::Valid;
            return Ok(());
        };
        if self.options.auto_repair {
            warn!(root = ?self.root, issue = %first, "name tree is malformed, repairing");
            self.repair()?;
            return Ok(());
        }
        let reason = first.to_string();
        warn!(root = ?self.root, %reason, "name tree is malformed and auto-repair is disabled");
        self.state = TreeState::Invalid(reason.clone());
        Err(NameTreeError::RepairDisabled { reason })
    }

    /// Returns `true` if `key` is present.
    pub fn contains(&mut self, key: impl AsRef<[u8]>) -> Result<bool, NameTreeError> {
        Ok(self.find(key)?.is_some())
    }

    /// The value stored under `key`, or `None`.
    pub fn find(&mut self, key: impl AsRef<[u8]>) -> Result<Option<Object>, NameTreeError> {
        self.ensure_usable()?;
        lookup::find(&*self.store, self.root, key.as_ref(), self.options.max_depth)
    }

    /// The value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`NameTreeError::NotFound`] if the key is absent.
    pub fn get(&mut self, key: impl AsRef<[u8]>) -> Result<Object, NameTreeError> {
        let key = key.as_ref();
        self.find(key)?
            .ok_or_else(|| NameTreeError::NotFound(NameKey::from(key)))
    }

    /// Insert or replace an entry, returning the previous value.
    pub fn set(
        &mut self,
        key: impl Into<NameKey>,
        value: impl Into<Object>,
    ) -> Result<Option<Object>, NameTreeError> {
        self.ensure_usable()?;
        let key = key.into();
        debug!(root = ?self.root, %key, "set");
        mutate::insert(&mut *self.store, self.root, key, value.into(), &self.options)
    }

    /// Remove an entry.
    ///
    /// # Errors
    ///
    /// Returns [`NameTreeError::NotFound`] if the key is absent.
    pub fn remove(&mut self, key: impl AsRef<[u8]>) -> Result<(), NameTreeError> {
        let key = key.as_ref();
        if self.try_remove(key)? {
            Ok(())
        } else {
            Err(NameTreeError::NotFound(NameKey::from(key)))
        }
    }

    /// Remove an entry, returning `false` if it was absent.
    pub fn try_remove(&mut self, key: impl AsRef<[u8]>) -> Result<bool, NameTreeError> {
        self.ensure_usable()?;
        let key = key.as_ref();
        let removed = mutate::remove(&mut *self.store, self.root, key, &self.options)?;
        debug!(root = ?self.root, key = %NameKey::from(key), removed, "remove");
        Ok(removed)
    }

    /// Iterate over all entries in key order.
    pub fn entries(&mut self) -> Result<Entries<'_, S>, NameTreeError> {
        self.ensure_usable()?;
        Ok(Entries::new(&*self.store, self.root, self.options.max_depth))
    }

    /// All keys in order.
    pub fn keys(&mut self) -> Result<Vec<NameKey>, NameTreeError> {
        self.entries()?.map(|entry| entry.map(|(key, _)| key)).collect()
    }

    /// The whole mapping.
    pub fn as_map(&mut self) -> Result<BTreeMap<NameKey, Object>, NameTreeError> {
        self.entries()?.collect()
    }

    /// Number of entries.
    pub fn len(&mut self) -> Result<usize, NameTreeError> {
        let mut count = 0;
        for entry in self.entries()? {
            entry?;
            count += 1;
        }
        Ok(count)
    }

    /// Returns `true` if the tree holds no entries.
    pub fn is_empty(&mut self) -> Result<bool, NameTreeError> {
        match self.entries()?.next() {
            Some(entry) => entry.map(|_| false),
            None => Ok(true),
        }
    }
}
