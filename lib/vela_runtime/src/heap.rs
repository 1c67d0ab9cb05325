use crate::value::Value;
use anyhow::Result;
use parking_lot::RwLock;
use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use vela_core::error;
use vela_core::names::*;
use vela_hierarchy::{Layout, VTable};

/// Handle of an instance on the heap. Copying the handle shares the
/// instance; it does not copy it. Handles are indices into the arena and
/// are never reused, so the arena keeps one (empty) entry per released
/// instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObjRef(usize);

impl ObjRef {
    pub fn id(&self) -> usize {
        self.0
    }
}

impl fmt::Display for ObjRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug)]
pub struct Instance {
    class_name: ClassName,
    layout: Arc<Layout>,
    /// The vtable of the class the instance was created as
    vtable: Arc<VTable>,
    /// Values of the slots of `layout`
    fields: RwLock<Vec<Value>>,
}

impl Instance {
    pub fn new(
        class_name: ClassName,
        layout: Arc<Layout>,
        vtable: Arc<VTable>,
        fields: Vec<Value>,
    ) -> Instance {
        debug_assert_eq!(layout.len(), fields.len());
        debug_assert_eq!(layout.class_name, class_name);
        debug_assert_eq!(vtable.class_name, class_name);
        Instance {
            class_name,
            layout,
            vtable,
            fields: RwLock::new(fields),
        }
    }

    pub fn class_name(&self) -> &ClassName {
        &self.class_name
    }

    pub fn layout(&self) -> &Arc<Layout> {
        &self.layout
    }

    /// The vpointer
    pub fn vtable(&self) -> &Arc<VTable> {
        &self.vtable
    }

    /// Read the `idx`th slot
    pub fn read(&self, idx: usize) -> Value {
        self.fields.read()[idx].clone()
    }

    /// Update the `idx`th slot
    pub fn write(&self, idx: usize, value: Value) {
        self.fields.write()[idx] = value;
    }

    /// Copy of all the slots
    pub fn snapshot(&self) -> Vec<Value> {
        self.fields.read().clone()
    }
}

/// Arena of instances addressed by `ObjRef`
#[derive(Debug, Default)]
pub struct Heap {
    objects: RwLock<Vec<Option<Arc<Instance>>>>,
    /// Number of `Some` entries in `objects`
    live: AtomicUsize,
}

impl Heap {
    pub fn alloc(&self, instance: Instance) -> ObjRef {
        let mut objects = self.objects.write();
        objects.push(Some(Arc::new(instance)));
        self.live.fetch_add(1, Ordering::Relaxed);
        ObjRef(objects.len() - 1)
    }

    pub fn get(&self, obj: ObjRef) -> Result<Arc<Instance>> {
        self.objects
            .read()
            .get(obj.0)
            .and_then(|x| x.clone())
            .ok_or_else(|| error::dangling_reference(obj.0))
    }

    /// Release the instance. Handles to it become dangling.
    pub fn free(&self, obj: ObjRef) -> Result<()> {
        let mut objects = self.objects.write();
        match objects.get_mut(obj.0) {
            Some(slot @ Some(_)) => {
                *slot = None;
                self.live.fetch_sub(1, Ordering::Relaxed);
                Ok(())
            }
            _ => Err(error::dangling_reference(obj.0)),
        }
    }

    /// Number of instances not released yet
    pub fn live_count(&self) -> usize {
        self.live.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vela_core::error::Error;

    fn instance() -> Instance {
        Instance::new(
            ClassName::root(),
            Arc::new(Layout::empty(ClassName::root())),
            Arc::new(VTable::null(ClassName::root())),
            vec![],
        )
    }

    #[test]
    fn test_live_count() -> Result<()> {
        let heap = Heap::default();
        let a = heap.alloc(instance());
        let b = heap.alloc(instance());
        assert_eq!(heap.live_count(), 2);
        heap.free(a)?;
        assert_eq!(heap.live_count(), 1);
        let err = heap.free(a).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<Error>(),
            Some(Error::DanglingReferenceError { obj: 0 })
        ));
        assert_eq!(heap.live_count(), 1);
        // Handles are not reused
        let c = heap.alloc(instance());
        assert_ne!(c, a);
        assert!(heap.get(b).is_ok());
        Ok(())
    }
}
