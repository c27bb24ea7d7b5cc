use std::{
    cmp::Ordering,
    collections::BTreeMap,
    iter::Peekable,
    ops::Bound,
};

use cosmwasm_std::{Order, Record, Storage};

/// A write-buffering view over a [`Storage`]
///
/// All writes are staged in memory and reach the underlying storage only on
/// [`commit`](Self::commit). Reads, including ordered range scans, observe the staged writes.
/// Dropping the transaction, or calling [`rollback`](Self::rollback), discards them.
pub struct Transaction<'storage> {
    base: &'storage mut dyn Storage,
    staged: BTreeMap<Vec<u8>, Option<Vec<u8>>>,
}

impl<'storage> Transaction<'storage> {
    pub fn begin(base: &'storage mut dyn Storage) -> Self {
        Self {
            base,
            staged: BTreeMap::new(),
        }
    }

    pub fn commit(self) {
        let Self { base, staged } = self;

        staged.into_iter().for_each(|(key, value)| match value {
            Some(value) => base.set(&key, &value),
            None => base.remove(&key),
        })
    }

    pub fn rollback(self) {}

    #[cfg(test)]
    fn staged_len(&self) -> usize {
        self.staged.len()
    }
}

impl Storage for Transaction<'_> {
    fn get(&self, key: &[u8]) -> Option<Vec<u8>> {
        match self.staged.get(key) {
            Some(staged) => staged.clone(),
            None => self.base.get(key),
        }
    }

    fn range<'a>(
        &'a self,
        start: Option<&[u8]>,
        end: Option<&[u8]>,
        order: Order,
    ) -> Box<dyn Iterator<Item = Record> + 'a> {
        if let (Some(start), Some(end)) = (start, end) {
            if start >= end {
                return Box::new(std::iter::empty());
            }
        }

        let lower = start.map_or(Bound::Unbounded, Bound::Included);
        let upper = end.map_or(Bound::Unbounded, Bound::Excluded);
        let base = self.base.range(start, end, order);
        let staged = self.staged.range::<[u8], _>((lower, upper));

        match order {
            Order::Ascending => Box::new(Merged::new(base, staged, order)),
            Order::Descending => Box::new(Merged::new(base, staged.rev(), order)),
        }
    }

    fn set(&mut self, key: &[u8], value: &[u8]) {
        self.staged.insert(key.to_vec(), Some(value.to_vec()));
    }

    fn remove(&mut self, key: &[u8]) {
        self.staged.insert(key.to_vec(), None);
    }
}

/// Both ordered record streams of a range scan, merged as they are pulled
///
/// A staged record shadows the base record with the same key. A staged removal
/// hides it.
struct Merged<Base, Staged>
where
    Base: Iterator,
    Staged: Iterator,
{
    base: Peekable<Base>,
    staged: Peekable<Staged>,
    order: Order,
}

impl<Base, Staged> Merged<Base, Staged>
where
    Base: Iterator,
    Staged: Iterator,
{
    fn new(base: Base, staged: Staged, order: Order) -> Self {
        Self {
            base: base.peekable(),
            staged: staged.peekable(),
            order,
        }
    }
}

impl<'a, Base, Staged> Iterator for Merged<Base, Staged>
where
    Base: Iterator<Item = Record>,
    Staged: Iterator<Item = (&'a Vec<u8>, &'a Option<Vec<u8>>)>,
{
    type Item = Record;

    fn next(&mut self) -> Option<Record> {
        loop {
            let base_first = match (self.base.peek(), self.staged.peek()) {
                (None, None) => return None,
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (Some((base_key, _)), Some((staged_key, _))) => {
                    let ord = base_key.as_slice().cmp(staged_key.as_slice());
                    match self.order {
                        Order::Ascending => ord,
                        Order::Descending => ord.reverse(),
                    }
                }
            };

            match base_first {
                Ordering::Less => return self.base.next(),
                Ordering::Equal => {
                    self.base.next();
                }
                Ordering::Greater => {}
            }

            if let Some((key, Some(value))) = self.staged.next() {
                return Some((key.clone(), value.clone()));
            }
        }
    }
}

/// Run `op` against a fresh transaction over `storage`
///
/// The staged writes are committed if `op` succeeds and dropped otherwise, so
/// a failed operation leaves `storage` exactly as it was before the call.
pub fn atomic<T, Err, Op>(storage: &mut dyn Storage, op: Op) -> Result<T, Err>
where
    Op: FnOnce(&mut dyn Storage) -> Result<T, Err>,
{
    let mut transaction = Transaction::begin(storage);

    match op(&mut transaction) {
        Ok(output) => {
            transaction.commit();
            Ok(output)
        }
        Err(error) => {
            transaction.rollback();
            Err(error)
        }
    }
}
