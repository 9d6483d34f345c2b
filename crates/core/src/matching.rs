//! Aligning two class streams that are both sorted by package, then by
//! fully qualified name.
//!
//! Signature dumps list packages alphabetically and classes alphabetically
//! within a package, so a single forward pass over each stream is enough
//! to pair a class with its counterpart. The cursor is left positioned
//! just past the last element that sorts at or before the target; an
//! element that sorts after it is pushed back for the next lookup.

use crate::model::{Class, ClassName};
use crate::retry::RetryIter;
use std::cmp::Ordering;

/// Anything that identifies a class within a sorted stream.
pub trait ClassKey {
    fn package_name(&self) -> &str;
    fn fullname(&self) -> &str;
}

impl ClassKey for Class {
    fn package_name(&self) -> &str {
        &self.package
    }
    fn fullname(&self) -> &str {
        &self.fullname
    }
}

impl ClassKey for ClassName {
    fn package_name(&self) -> &str {
        &self.package
    }
    fn fullname(&self) -> &str {
        &self.fullname
    }
}

impl<T: ClassKey + ?Sized> ClassKey for &T {
    fn package_name(&self) -> &str {
        (**self).package_name()
    }
    fn fullname(&self) -> &str {
        (**self).fullname()
    }
}

/// Stream order: package name first, then fully qualified name.
pub fn stream_order<A, B>(a: &A, b: &B) -> Ordering
where
    A: ClassKey + ?Sized,
    B: ClassKey + ?Sized,
{
    a.package_name()
        .cmp(b.package_name())
        .then_with(|| a.fullname().cmp(b.fullname()))
}

/// Advance `it` to the element naming the same class as `target`.
///
/// Elements sorting before `target` are skipped. Returns the match
/// (consumed), or `None` once the stream moves past where `target` would
/// be; in that case the overshooting element is pushed back. Without a
/// target nothing is consumed.
pub fn find_matching<I, T>(it: &mut RetryIter<I>, target: Option<&T>) -> Option<I::Item>
where
    I: Iterator,
    I::Item: ClassKey,
    T: ClassKey + ?Sized,
{
    let target = target?;
    while let Some(item) = it.next() {
        match stream_order(&item, target) {
            Ordering::Less => continue,
            Ordering::Equal => return Some(item),
            Ordering::Greater => {
                it.retry(item);
                return None;
            }
        }
    }
    None
}

/// Lazily yield the elements of `it` that sort before `target`.
///
/// The matching element, if present, is consumed but not yielded. With no
/// target every remaining element is yielded.
pub fn collect_until_matching<'a, I, T>(
    it: &'a mut RetryIter<I>,
    target: Option<&'a T>,
) -> UntilMatching<'a, I, T>
where
    I: Iterator,
    I::Item: ClassKey,
    T: ClassKey + ?Sized,
{
    UntilMatching {
        it,
        target,
        done: false,
    }
}

/// Iterator returned by [`collect_until_matching`].
pub struct UntilMatching<'a, I: Iterator, T: ?Sized> {
    it: &'a mut RetryIter<I>,
    target: Option<&'a T>,
    done: bool,
}

impl<I, T> Iterator for UntilMatching<'_, I, T>
where
    I: Iterator,
    I::Item: ClassKey,
    T: ClassKey + ?Sized,
{
    type Item = I::Item;

    fn next(&mut self) -> Option<I::Item> {
        if self.done {
            return None;
        }
        let Some(item) = self.it.next() else {
            self.done = true;
            return None;
        };
        let Some(target) = self.target else {
            return Some(item);
        };
        match stream_order(&item, target) {
            Ordering::Less => Some(item),
            Ordering::Equal => {
                self.done = true;
                None
            }
            Ordering::Greater => {
                self.it.retry(item);
                self.done = true;
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classes() -> Vec<ClassName> {
        vec![
            ClassName::new("android.app", "ActivityManager"),
            ClassName::new("android.app", "Notification"),
            ClassName::new("android.app", "Notification.Action"),
            ClassName::new("android.graphics", "Bitmap"),
        ]
    }

    fn absent() -> ClassName {
        ClassName::new("android.content", "ContentProvider")
    }

    #[test]
    fn find_matching_returns_the_match_and_stops_after_it() {
        let all = classes();
        let mut it = RetryIter::new(all.clone());
        assert_eq!(find_matching(&mut it, Some(&all[2])), Some(all[2].clone()));
        assert_eq!(it.next(), Some(all[3].clone()));
    }

    #[test]
    fn find_matching_pushes_back_the_overshoot() {
        let all = classes();
        let mut it = RetryIter::new(all.clone());
        assert_eq!(find_matching(&mut it, Some(&absent())), None);
        assert_eq!(it.next(), Some(all[3].clone()));
    }

    #[test]
    fn find_matching_without_target_consumes_nothing() {
        let all = classes();
        let mut it = RetryIter::new(all.clone());
        assert_eq!(find_matching::<_, ClassName>(&mut it, None), None);
        assert_eq!(it.next(), Some(all[0].clone()));
    }

    #[test]
    fn find_matching_on_exhausted_stream() {
        let mut it = RetryIter::new(Vec::<ClassName>::new());
        assert_eq!(find_matching(&mut it, Some(&absent())), None);
        assert_eq!(it.next(), None);
    }

    #[test]
    fn collect_until_matching_found() {
        let all = classes();
        let mut it = RetryIter::new(all.clone());
        let before: Vec<ClassName> = collect_until_matching(&mut it, Some(&all[2])).collect();
        assert_eq!(before, all[..2].to_vec());
        assert_eq!(it.next(), Some(all[3].clone()));
    }

    #[test]
    fn collect_until_matching_not_found() {
        let all = classes();
        let mut it = RetryIter::new(all.clone());
        let target = absent();
        let before: Vec<ClassName> = collect_until_matching(&mut it, Some(&target)).collect();
        assert_eq!(before, all[..3].to_vec());
        assert_eq!(it.next(), Some(all[3].clone()));
    }

    #[test]
    fn collect_until_matching_without_target_drains() {
        let all = classes();
        let mut it = RetryIter::new(all.clone());
        let before: Vec<ClassName> =
            collect_until_matching::<_, ClassName>(&mut it, None).collect();
        assert_eq!(before, all);
        assert_eq!(it.next(), None);
    }

    #[test]
    fn ordering_is_package_first() {
        // `a.z` sorts before `a.b.A` although its full name compares greater.
        let outer = ClassName::new("a", "z");
        let inner = ClassName::new("a.b", "A");
        assert!(outer.fullname > inner.fullname);
        assert_eq!(stream_order(&outer, &inner), Ordering::Less);
        assert_eq!(stream_order(&outer, &outer.clone()), Ordering::Equal);
    }

    #[test]
    fn references_and_owned_keys_compare_alike() {
        let all = classes();
        let mut it = RetryIter::new(all.iter());
        let found = find_matching(&mut it, Some(&all[1]));
        assert_eq!(found.map(|c| c.fullname.as_str()), Some("android.app.Notification"));
    }
}
