//! Configuration elements
//!
//! An element is one immutable option value tagged with its kind. Domains
//! define one type per kind; [`Tagged`] covers the case where the kind is
//! only known at run time.

use std::any::Any;
use std::fmt;

use crate::configuration::Configuration;
use crate::error::ConfigError;
use crate::kind::ElementKind;

/// A single configuration option
pub trait ConfigElement: fmt::Debug + Send + Sync + 'static {
    type Kind: ElementKind;
    type Value: fmt::Debug;

    fn kind(&self) -> Self::Kind;

    fn value(&self) -> &Self::Value;

    /// Wrap this element in a configuration of its own
    fn into_configuration(self) -> Configuration<Self::Kind>
    where
        Self: Sized,
    {
        Configuration::from_element(self)
    }

    /// Combine with another element of the same domain
    fn combine<E>(self, rhs: E) -> Result<Configuration<Self::Kind>, ConfigError<Self::Kind>>
    where
        Self: Sized,
        E: ConfigElement<Kind = Self::Kind>,
    {
        self.into_configuration().with(rhs)
    }
}

/// Type-erased view of an element stored in a [`Configuration`]
pub trait AnyElement<K: ElementKind>: fmt::Debug + Send + Sync {
    fn element_kind(&self) -> K;

    fn as_any(&self) -> &dyn Any;

    fn value_debug(&self) -> &dyn fmt::Debug;
}

impl<E: ConfigElement> AnyElement<E::Kind> for E {
    fn element_kind(&self) -> E::Kind {
        self.kind()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn value_debug(&self) -> &dyn fmt::Debug {
        self.value()
    }
}

impl<'a, K: ElementKind> dyn AnyElement<K> + 'a {
    /// Downcast to a concrete element type
    pub fn downcast_ref<E: ConfigElement<Kind = K>>(&self) -> Option<&E> {
        self.as_any().downcast_ref::<E>()
    }
}

/// Element whose kind is chosen at construction time
#[derive(Debug, Clone, PartialEq)]
pub struct Tagged<K, V> {
    kind: K,
    value: V,
}

impl<K: ElementKind, V> Tagged<K, V> {
    pub fn new(kind: K, value: V) -> Self {
        Self { kind, value }
    }
}

impl<K, V> ConfigElement for Tagged<K, V>
where
    K: ElementKind,
    V: fmt::Debug + Send + Sync + 'static,
{
    type Kind = K;
    type Value = V;

    fn kind(&self) -> K {
        self.kind
    }

    fn value(&self) -> &V {
        &self.value
    }
}
