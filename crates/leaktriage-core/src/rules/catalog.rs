//! Leak suppression catalog.
//!
//! Three independent name sets drive classification:
//!
//!   - known             → leaks harmlessly on its own, never reported
//!   - known entraining  → leaks and keeps many smaller objects alive;
//!                         its presence silences everything except priority leaks
//!   - priority          → always reported, and silences small leaks
//!
//! Entries are literals. Extending coverage means adding a line here with
//! the bug that tracks the leak. Nothing checks that the sets are disjoint;
//! a name listed twice fires both checks.

use std::collections::HashSet;
use std::sync::LazyLock;

/// A leak signature and the bug(s) tracking it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KnownLeak {
    pub name: &'static str,
    pub bugs: &'static str,
}

const fn leak(name: &'static str, bugs: &'static str) -> KnownLeak {
    KnownLeak { name, bugs }
}

pub const KNOWN_LEAKS: &[KnownLeak] = &[
    leak("nsMathMLContainerFrame", "391976"),
    leak("nsMathMLmtableOuterFrame", "391976"),
    leak("nsMathMLmtdInnerFrame", "391976"),
    leak("nsMathMLmactionFrame", "391976"),
    leak("nsBaseAppShell", "398462"),
    leak("nsRunnable", "398462"),
    leak("nsSimpleNestedURI", "400926"),
    leak("AtomImpl", "415112"),
    leak("nsInstantiationNode", "415112"),
    leak("nsStringBuffer", "427922"),
];

pub const KNOWN_ENTRAINING_LEAKS: &[KnownLeak] = &[
    leak("nsDocument", "425821"),
    leak("BackstagePass", "397206"),
    leak("nsDNSService", "102229, 403694"),
    leak("nsRDFResource", "424418"),
    leak("nsGenericElement", "413582"),
    // Also entrains several of the entries above.
    leak("nsGlobalWindow", "429085"),
    leak("nsDocShell", "429085, 425821"),
    leak("nsJVMManager", "417630"),
];

pub const PRIORITY_LEAKS: &[KnownLeak] = &[];

/// Immutable set of symbolic object names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SuppressionSet {
    names: HashSet<String>,
}

impl SuppressionSet {
    pub fn from_catalog(entries: &[KnownLeak]) -> Self {
        entries.iter().map(|e| e.name).collect()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for SuppressionSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            names: iter.into_iter().map(Into::into).collect(),
        }
    }
}

static KNOWN: LazyLock<SuppressionSet> =
    LazyLock::new(|| SuppressionSet::from_catalog(KNOWN_LEAKS));

static KNOWN_ENTRAINING: LazyLock<SuppressionSet> =
    LazyLock::new(|| SuppressionSet::from_catalog(KNOWN_ENTRAINING_LEAKS));

static PRIORITY: LazyLock<SuppressionSet> =
    LazyLock::new(|| SuppressionSet::from_catalog(PRIORITY_LEAKS));

/// Names that leak harmlessly in isolation.
pub fn known() -> &'static SuppressionSet {
    &KNOWN
}

/// Names that leak and entrain a flood of smaller objects.
pub fn known_entraining() -> &'static SuppressionSet {
    &KNOWN_ENTRAINING
}

/// Names that are always reported and quell small-leak reporting.
pub fn priority() -> &'static SuppressionSet {
    &PRIORITY
}

/// Looks up the tracking bug(s) for a catalogued name, if any.
pub fn tracking_bugs(name: &str) -> Option<&'static str> {
    KNOWN_LEAKS
        .iter()
        .chain(KNOWN_ENTRAINING_LEAKS)
        .chain(PRIORITY_LEAKS)
        .find(|e| e.name == name)
        .map(|e| e.bugs)
}
