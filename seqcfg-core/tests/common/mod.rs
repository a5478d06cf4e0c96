//! Three-kind test domain where `a` and `b` may not be combined

use std::fmt;

use seqcfg_core::{CompatibilityTable, ElementKind, Tagged};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TestKind {
    A,
    B,
    C,
}

static TEST_KINDS: [TestKind; 3] = [TestKind::A, TestKind::B, TestKind::C];

static TEST_COMPATIBILITY: CompatibilityTable = CompatibilityTable::new(&[
    //0  1  2
    &[0, 0, 1], // 0: a
    &[0, 0, 1], // 1: b
    &[1, 1, 0], // 2: c
]);

impl ElementKind for TestKind {
    const DOMAIN: &'static str = "test";
    const SIZE: usize = 3;

    fn all() -> &'static [Self] {
        &TEST_KINDS
    }

    fn index(self) -> usize {
        self as usize
    }

    fn name(self) -> &'static str {
        match self {
            TestKind::A => "a",
            TestKind::B => "b",
            TestKind::C => "c",
        }
    }

    fn compatibility_table() -> &'static CompatibilityTable {
        &TEST_COMPATIBILITY
    }
}

impl fmt::Display for TestKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

pub fn element(kind: TestKind, value: i64) -> Tagged<TestKind, i64> {
    Tagged::new(kind, value)
}
