//! A forward cursor that can give back the element it just produced.

use crate::error::MatchProtocolError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slot {
    /// `next()` has not produced anything since the last retry (or ever).
    Nothing,
    /// The last `next()` produced an element from the source.
    Yielded,
    /// An element is parked and will be produced by the next `next()`.
    Retried,
}

/// Wraps an iterator so the most recently yielded element can be pushed
/// back exactly once and produced again by the following `next()`.
///
/// ```
/// use apilint_core::RetryIter;
///
/// let mut it = RetryIter::new(vec![1, 2, 3]);
/// let first = it.next().unwrap();
/// it.retry(first);
/// assert_eq!(it.next(), Some(1));
/// assert_eq!(it.next(), Some(2));
/// ```
pub struct RetryIter<I: Iterator> {
    source: I,
    parked: Option<I::Item>,
    slot: Slot,
    exhausted: bool,
}

impl<I: Iterator> RetryIter<I> {
    pub fn new<T>(source: T) -> Self
    where
        T: IntoIterator<IntoIter = I>,
    {
        RetryIter {
            source: source.into_iter(),
            parked: None,
            slot: Slot::Nothing,
            exhausted: false,
        }
    }

    /// Push back the element most recently returned by `next()`.
    ///
    /// The caller hands the element back by value; no copy of it is
    /// retained by the cursor between `next()` and `retry()`.
    pub fn try_retry(&mut self, item: I::Item) -> Result<(), MatchProtocolError> {
        match self.slot {
            Slot::Yielded => {
                self.parked = Some(item);
                self.slot = Slot::Retried;
                Ok(())
            }
            Slot::Retried => Err(MatchProtocolError::DoubleRetry),
            Slot::Nothing if self.exhausted => Err(MatchProtocolError::Exhausted),
            Slot::Nothing => Err(MatchProtocolError::NothingToRetry),
        }
    }

    /// Like [`try_retry`](Self::try_retry), treating misuse as a bug.
    ///
    /// # Panics
    ///
    /// If nothing was yielded since the last retry, or the cursor has
    /// already run dry.
    pub fn retry(&mut self, item: I::Item) {
        if let Err(e) = self.try_retry(item) {
            panic!("RetryIter protocol violation: {}", e);
        }
    }

    /// Whether an element is parked for the next `next()`.
    pub fn has_retry(&self) -> bool {
        self.slot == Slot::Retried
    }
}

impl<I: Iterator> Iterator for RetryIter<I> {
    type Item = I::Item;

    fn next(&mut self) -> Option<I::Item> {
        if let Some(item) = self.parked.take() {
            self.slot = Slot::Yielded;
            return Some(item);
        }
        match self.source.next() {
            Some(item) => {
                self.slot = Slot::Yielded;
                Some(item)
            }
            None => {
                self.slot = Slot::Nothing;
                self.exhausted = true;
                None
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let parked = usize::from(self.parked.is_some());
        let (lo, hi) = self.source.size_hint();
        (
            lo.saturating_add(parked),
            hi.and_then(|h| h.checked_add(parked)),
        )
    }
}
