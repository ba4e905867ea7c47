//! lopdf-based object store.
//!
//! Implements [`ObjectStore`] for [`lopdf::Document`], the default document
//! model for pdfnametree-rs.

use lopdf::{Dictionary, Document, Object, ObjectId};

use crate::error::BackendError;
use crate::store::ObjectStore;

fn dict_mut(doc: &mut Document, id: ObjectId) -> Result<&mut Dictionary, BackendError> {
    let obj = doc
        .objects
        .get_mut(&id)
        .ok_or(BackendError::MissingObject(id.0, id.1))?;
    match obj {
        Object::Dictionary(dict) => Ok(dict),
        Object::Stream(stream) => Ok(&mut stream.dict),
        _ => Err(BackendError::NotDictionary(id.0, id.1)),
    }
}

fn dict(doc: &Document, id: ObjectId) -> Option<&Dictionary> {
    match doc.objects.get(&id)? {
        Object::Dictionary(dict) => Some(dict),
        Object::Stream(stream) => Some(&stream.dict),
        _ => None,
    }
}

impl ObjectStore for Document {
    fn is_dictionary(&self, id: ObjectId) -> bool {
        dict(self, id).is_some()
    }

    fn get_key(&self, id: ObjectId, name: &[u8]) -> Option<&Object> {
        dict(self, id)?.get(name).ok()
    }

    fn resolve<'a>(&'a self, obj: &'a Object) -> Option<&'a Object> {
        match obj {
            Object::Reference(id) => self.objects.get(id),
            other => Some(other),
        }
    }

    fn make_dictionary(&mut self, dict: Dictionary) -> ObjectId {
        self.add_object(Object::Dictionary(dict))
    }

    fn set_key(&mut self, id: ObjectId, name: &[u8], value: Object) -> Result<(), BackendError> {
        dict_mut(self, id)?.set(name.to_vec(), value);
        Ok(())
    }

    fn remove_key(&mut self, id: ObjectId, name: &[u8]) -> Result<Option<Object>, BackendError> {
        Ok(dict_mut(self, id)?.remove(name))
    }
}
