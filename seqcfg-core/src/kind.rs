//! Element-kind registry
//!
//! Every configuration domain (alignment, search, ...) enumerates its option
//! kinds as a small dense index space. Kinds are appended, never renumbered,
//! and each domain names the compatibility table that governs which kinds may
//! share a configuration.

use std::fmt;
use std::hash::Hash;
use std::marker::PhantomData;

use crate::error::DomainDefinitionError;
use crate::table::CompatibilityTable;

/// Upper bound on kinds per domain; present-kind sets are 64-bit masks.
pub const MAX_KINDS: usize = 64;

/// Identifier for one option kind within a configuration domain
pub trait ElementKind:
    Copy + Eq + Ord + Hash + fmt::Debug + fmt::Display + Send + Sync + 'static
{
    /// Domain name used in diagnostics
    const DOMAIN: &'static str;

    /// Number of kinds in the domain
    const SIZE: usize;

    /// All kinds in index order
    fn all() -> &'static [Self];

    /// Dense index in `0..SIZE`
    fn index(self) -> usize;

    /// Stable snake_case name
    fn name(self) -> &'static str;

    /// The domain's compatibility table
    fn compatibility_table() -> &'static CompatibilityTable;

    fn from_index(index: usize) -> Option<Self> {
        Self::all().get(index).copied()
    }

    fn from_name(name: &str) -> Option<Self> {
        Self::all().iter().copied().find(|kind| kind.name() == name)
    }

    fn compatible(self, other: Self) -> bool {
        compatible(self, other)
    }
}

/// Whether two kinds may appear in the same configuration.
///
/// A kind is never compatible with itself: two elements of one kind are a
/// duplicate, which is reported separately.
pub fn compatible<K: ElementKind>(a: K, b: K) -> bool {
    a != b && K::compatibility_table().get(a.index(), b.index())
}

/// Check that a domain's registry and compatibility table agree
pub fn check_domain<K: ElementKind>() -> Result<(), DomainDefinitionError> {
    if K::SIZE > MAX_KINDS {
        return Err(DomainDefinitionError::TooManyKinds {
            domain: K::DOMAIN,
            size: K::SIZE,
            max: MAX_KINDS,
        });
    }

    let all = K::all();
    if all.len() != K::SIZE {
        return Err(DomainDefinitionError::RegistryLength {
            domain: K::DOMAIN,
            size: K::SIZE,
            listed: all.len(),
        });
    }

    for (position, kind) in all.iter().enumerate() {
        if kind.index() != position {
            return Err(DomainDefinitionError::NonDenseIndex {
                domain: K::DOMAIN,
                kind: kind.name(),
                position,
                index: kind.index(),
            });
        }
    }

    K::compatibility_table().validate(K::DOMAIN, K::SIZE)
}

/// Set of kinds present in a configuration
pub struct KindSet<K> {
    bits: u64,
    _kind: PhantomData<fn() -> K>,
}

impl<K: ElementKind> KindSet<K> {
    pub const fn empty() -> Self {
        Self {
            bits: 0,
            _kind: PhantomData,
        }
    }

    fn bit(kind: K) -> u64 {
        1u64 << kind.index()
    }

    /// Insert a kind; returns `false` if it was already present
    pub fn insert(&mut self, kind: K) -> bool {
        let fresh = !self.contains(kind);
        self.bits |= Self::bit(kind);
        fresh
    }

    pub fn contains(&self, kind: K) -> bool {
        self.bits & Self::bit(kind) != 0
    }

    pub fn len(&self) -> usize {
        self.bits.count_ones() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.bits == 0
    }

    pub fn union(self, other: Self) -> Self {
        Self {
            bits: self.bits | other.bits,
            _kind: PhantomData,
        }
    }

    pub fn intersection(self, other: Self) -> Self {
        Self {
            bits: self.bits & other.bits,
            _kind: PhantomData,
        }
    }

    /// Present kinds in index order
    pub fn iter(&self) -> impl Iterator<Item = K> + '_ {
        K::all().iter().copied().filter(move |kind| self.contains(*kind))
    }
}

impl<K> Clone for KindSet<K> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K> Copy for KindSet<K> {}

impl<K> PartialEq for KindSet<K> {
    fn eq(&self, other: &Self) -> bool {
        self.bits == other.bits
    }
}

impl<K> Eq for KindSet<K> {}

impl<K: ElementKind> Default for KindSet<K> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<K: ElementKind> fmt::Debug for KindSet<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<K: ElementKind> FromIterator<K> for KindSet<K> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut set = Self::empty();
        for kind in iter {
            set.insert(kind);
        }
        set
    }
}
