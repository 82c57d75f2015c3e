//! Block type capability table
//!
//! Each registered type may expose a merge capability and transforms from
//! other types. A missing capability is an ordinary, first-class case.

use super::errors::RegistryError;
use shared_types::{Attributes, Block};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// `(receiving attributes, donor attributes) -> attributes to overlay on the receiver`
pub type MergeFn = Arc<dyn Fn(&Attributes, &Attributes) -> Attributes + Send + Sync>;

/// Converts a block of another type into zero or more blocks of this type.
pub type TransformFn = Arc<dyn Fn(&Block) -> Vec<Block> + Send + Sync>;

/// Capabilities of one block type.
#[derive(Clone)]
pub struct BlockTypeDescriptor {
    name: String,
    merge: Option<MergeFn>,
    /// Transforms keyed by source type name.
    transforms_from: BTreeMap<String, TransformFn>,
}

impl BlockTypeDescriptor {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            merge: None,
            transforms_from: BTreeMap::new(),
        }
    }

    pub fn with_merge<F>(mut self, merge: F) -> Self
    where
        F: Fn(&Attributes, &Attributes) -> Attributes + Send + Sync + 'static,
    {
        self.merge = Some(Arc::new(merge));
        self
    }

    pub fn with_transform_from<F>(mut self, source: impl Into<String>, transform: F) -> Self
    where
        F: Fn(&Block) -> Vec<Block> + Send + Sync + 'static,
    {
        self.transforms_from.insert(source.into(), Arc::new(transform));
        self
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn merge(&self) -> Option<&MergeFn> {
        self.merge.as_ref()
    }

    #[must_use]
    pub fn is_mergeable(&self) -> bool {
        self.merge.is_some()
    }

    /// Transform turning a `source` block into this type.
    #[must_use]
    pub fn transform_from(&self, source: &str) -> Option<&TransformFn> {
        self.transforms_from.get(source)
    }
}

impl fmt::Debug for BlockTypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BlockTypeDescriptor")
            .field("name", &self.name)
            .field("mergeable", &self.is_mergeable())
            .field("transforms_from", &self.transforms_from.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// Capability table keyed by block type name.
#[derive(Debug, Clone, Default)]
pub struct BlockTypeRegistry {
    types: HashMap<String, BlockTypeDescriptor>,
}

impl BlockTypeRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a block type. Names are unique.
    pub fn register(&mut self, descriptor: BlockTypeDescriptor) -> Result<(), RegistryError> {
        if descriptor.name.is_empty() {
            return Err(RegistryError::EmptyName);
        }
        if self.types.contains_key(&descriptor.name) {
            return Err(RegistryError::AlreadyRegistered(descriptor.name));
        }

        debug!(
            block_type = %descriptor.name,
            mergeable = descriptor.is_mergeable(),
            "Block type registered"
        );
        self.types.insert(descriptor.name.clone(), descriptor);
        Ok(())
    }

    /// Remove a block type, returning its descriptor.
    pub fn unregister(&mut self, name: &str) -> Option<BlockTypeDescriptor> {
        self.types.remove(name)
    }

    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<&BlockTypeDescriptor> {
        self.types.get(name)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.types.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}
