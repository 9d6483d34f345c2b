//! Lock-step walk of a current class stream against its baseline.

use crate::matching::{collect_until_matching, find_matching, ClassKey};
use crate::model::{Class, ClassName, Field, Method};
use crate::retry::RetryIter;
use std::ops::Deref;
use tracing::info;

/// A class as rules see it: its own declaration, plus the members of the
/// baseline counterpart when one exists.
///
/// Derefs to the current [`Class`]; only member iteration looks at the
/// baseline.
#[derive(Debug, Clone, Copy)]
pub struct ClassView<'a> {
    pub class: &'a Class,
    pub base: Option<&'a Class>,
}

impl<'a> ClassView<'a> {
    pub fn new(class: &'a Class, base: Option<&'a Class>) -> Self {
        ClassView { class, base }
    }

    pub fn alone(class: &'a Class) -> Self {
        ClassView { class, base: None }
    }

    pub fn has_base(&self) -> bool {
        self.base.is_some()
    }

    /// Own methods (constructors included), then the baseline's.
    pub fn methods(&self) -> impl Iterator<Item = &'a Method> + 'a {
        let base = self.base.map(|b| b.methods.iter()).into_iter().flatten();
        self.class.methods.iter().chain(base)
    }

    /// Own fields, then the baseline's.
    pub fn fields(&self) -> impl Iterator<Item = &'a Field> + 'a {
        let base = self.base.map(|b| b.fields.iter()).into_iter().flatten();
        self.class.fields.iter().chain(base)
    }

    pub fn constructors(&self) -> impl Iterator<Item = &'a Method> + 'a {
        self.methods()
            .filter(|m| m.kind == crate::model::MethodKind::Ctor)
    }

    pub fn plain_methods(&self) -> impl Iterator<Item = &'a Method> + 'a {
        self.methods()
            .filter(|m| m.kind == crate::model::MethodKind::Method)
    }
}

impl Deref for ClassView<'_> {
    type Target = Class;

    fn deref(&self) -> &Class {
        self.class
    }
}

/// Counters for one reconciliation pass.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ReconcileStats {
    /// Classes of the current stream.
    pub current: usize,
    /// Current classes that had a baseline counterpart.
    pub with_base: usize,
    /// Baseline-only classes examined because they were listed as known.
    pub known_only: usize,
}

/// Walk `current` in order, pairing each class with its counterpart in
/// `base`, and hand every resulting [`ClassView`] to `visit`.
///
/// `known` lists classes known to exist in the baseline even though the
/// current stream may lack them; each one that sorts between two current
/// classes is looked up in `base` and examined on its own. Current classes
/// that found a counterpart are appended to `classes_with_base`.
///
/// All three inputs must be sorted by package name, then fullname.
pub fn reconcile<C, B, K, V>(
    current: C,
    base: Option<B>,
    known: K,
    classes_with_base: &mut Vec<ClassName>,
    mut visit: V,
) -> ReconcileStats
where
    C: IntoIterator<Item = Class>,
    B: IntoIterator<Item = Class>,
    K: IntoIterator<Item = ClassName>,
    V: FnMut(ClassView<'_>),
{
    let mut stats = ReconcileStats::default();
    let mut known = RetryIter::new(known);
    let mut base = RetryIter::new(base.into_iter().flatten());

    for class in current {
        stats.current += 1;
        stats.known_only += examine_known(&mut known, &mut base, Some(&class), &mut visit);

        let counterpart = find_matching(&mut base, Some(&class));
        if counterpart.is_some() {
            stats.with_base += 1;
            classes_with_base.push(class.class_name());
        }
        visit(ClassView::new(&class, counterpart.as_ref()));
    }
    stats.known_only += examine_known(&mut known, &mut base, None::<&Class>, &mut visit);

    info!(
        current = stats.current,
        with_base = stats.with_base,
        known_only = stats.known_only,
        "reconciled class stream"
    );
    stats
}

/// Examine the baseline version of every known class sorting before
/// `target` (all remaining ones when `target` is `None`).
fn examine_known<K, B, T, V>(
    known: &mut RetryIter<K>,
    base: &mut RetryIter<B>,
    target: Option<&T>,
    visit: &mut V,
) -> usize
where
    K: Iterator<Item = ClassName>,
    B: Iterator<Item = Class>,
    T: ClassKey + ?Sized,
    V: FnMut(ClassView<'_>),
{
    let mut examined = 0;
    for name in collect_until_matching(known, target) {
        if let Some(found) = find_matching(base, Some(&name)) {
            examined += 1;
            visit(ClassView::alone(&found));
        }
    }
    examined
}
