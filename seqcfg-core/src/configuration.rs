//! Composite configurations
//!
//! A [`Configuration`] is an ordered list of elements from one domain. It is
//! only ever built by combining two valid operands, and a combination is
//! rejected unless both of these hold:
//!
//! 1. no kind is present on both sides;
//! 2. every kind on the left is compatible with every kind on the right.
//!
//! Since each operand already satisfies both rules internally, the result
//! does too. Combination never mutates an operand: elements are shared
//! behind `Arc` and the result gets a fresh element list, left operand first.

use std::fmt;
use std::sync::Arc;

use crate::element::{AnyElement, ConfigElement};
use crate::error::ConfigError;
use crate::kind::{compatible, ElementKind, KindSet};

pub struct Configuration<K: ElementKind> {
    elements: Vec<Arc<dyn AnyElement<K>>>,
    kinds: KindSet<K>,
}

impl<K: ElementKind> Configuration<K> {
    /// Configuration with no elements
    pub fn new() -> Self {
        Self {
            elements: Vec::new(),
            kinds: KindSet::empty(),
        }
    }

    pub fn from_element<E: ConfigElement<Kind = K>>(element: E) -> Self {
        let mut kinds = KindSet::empty();
        kinds.insert(element.kind());
        let element: Arc<dyn AnyElement<K>> = Arc::new(element);
        Self {
            elements: vec![element],
            kinds,
        }
    }

    /// Append a single element
    pub fn with<E: ConfigElement<Kind = K>>(&self, element: E) -> Result<Self, ConfigError<K>> {
        self.combine(&Self::from_element(element))
    }

    /// Combine with another configuration, `self` first.
    ///
    /// Duplicates are checked before compatibility. Both checks walk kinds in
    /// index order, so the reported kind or pair is deterministic.
    pub fn combine(&self, rhs: &Self) -> Result<Self, ConfigError<K>> {
        if let Some(kind) = self.kinds.intersection(rhs.kinds).iter().next() {
            log::debug!("{}: rejecting duplicate element `{}`", K::DOMAIN, kind);
            return Err(ConfigError::duplicate(kind));
        }

        for first in self.kinds.iter() {
            if let Some(second) = rhs.kinds.iter().find(|&second| !compatible(first, second)) {
                log::debug!(
                    "{}: rejecting incompatible elements `{}` and `{}`",
                    K::DOMAIN,
                    first,
                    second
                );
                return Err(ConfigError::incompatible(first, second));
            }
        }

        let mut elements = Vec::with_capacity(self.elements.len() + rhs.elements.len());
        elements.extend(self.elements.iter().cloned());
        elements.extend(rhs.elements.iter().cloned());

        let combined = Self {
            elements,
            kinds: self.kinds.union(rhs.kinds),
        };
        log::trace!("{}: combined configuration {:?}", K::DOMAIN, combined.kinds);
        Ok(combined)
    }

    /// Every reason `self.combine(rhs)` would fail, duplicates first.
    ///
    /// Empty exactly when the combination would succeed.
    pub fn conflicts(&self, rhs: &Self) -> Vec<ConfigError<K>> {
        let mut conflicts: Vec<_> = self
            .kinds
            .intersection(rhs.kinds)
            .iter()
            .map(ConfigError::duplicate)
            .collect();

        for first in self.kinds.iter() {
            for second in rhs.kinds.iter() {
                if first != second && !compatible(first, second) {
                    conflicts.push(ConfigError::incompatible(first, second));
                }
            }
        }
        conflicts
    }

    /// Re-check the composition invariants over the stored elements
    pub fn validate(&self) -> Result<(), ConfigError<K>> {
        let mut seen = KindSet::empty();
        for (position, element) in self.elements.iter().enumerate() {
            let kind = element.element_kind();
            if !seen.insert(kind) {
                return Err(ConfigError::duplicate(kind));
            }
            for earlier in &self.elements[..position] {
                let earlier = earlier.element_kind();
                if !compatible(earlier, kind) {
                    return Err(ConfigError::incompatible(earlier, kind));
                }
            }
        }
        Ok(())
    }

    pub fn contains(&self, kind: K) -> bool {
        self.kinds.contains(kind)
    }

    /// The element of the given kind, if present
    pub fn get(&self, kind: K) -> Option<&(dyn AnyElement<K> + 'static)> {
        self.elements
            .iter()
            .find(|element| element.element_kind() == kind)
            .map(Arc::as_ref)
    }

    /// Element of `kind` as concrete type `E`.
    ///
    /// Fails when `kind` is present but holds a value of another type.
    pub fn typed<E: ConfigElement<Kind = K>>(
        &self,
        kind: K,
    ) -> Result<Option<&E>, ConfigError<K>> {
        match self.get(kind) {
            None => Ok(None),
            Some(element) => element
                .downcast_ref::<E>()
                .map(Some)
                .ok_or_else(|| ConfigError::value_mismatch(kind, std::any::type_name::<E>())),
        }
    }

    /// First element of concrete type `E`
    pub fn get_as<E: ConfigElement<Kind = K>>(&self) -> Option<&E> {
        self.elements
            .iter()
            .find_map(|element| element.as_any().downcast_ref::<E>())
    }

    /// Value of the first element of concrete type `E`
    pub fn value_of<E: ConfigElement<Kind = K>>(&self) -> Option<&E::Value> {
        self.get_as::<E>().map(ConfigElement::value)
    }

    /// Elements in combination order
    pub fn iter(&self) -> impl Iterator<Item = &(dyn AnyElement<K> + 'static)> + '_ {
        self.elements.iter().map(Arc::as_ref)
    }

    pub fn kinds(&self) -> KindSet<K> {
        self.kinds
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

impl<K: ElementKind> Default for Configuration<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: ElementKind> Clone for Configuration<K> {
    fn clone(&self) -> Self {
        Self {
            elements: self.elements.clone(),
            kinds: self.kinds,
        }
    }
}

impl<K: ElementKind> fmt::Debug for Configuration<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Configuration")
            .field("domain", &K::DOMAIN)
            .field("elements", &self.elements)
            .finish()
    }
}
