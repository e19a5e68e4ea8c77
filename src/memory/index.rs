//! Chunked offset index over the feed
//!
//! The feed is a singly linked chain, so reaching offset `n` naively costs `n`
//! hops. [`ChunkedIndex`] keeps one sampled node per `stride` symbols, relative
//! to the current front, which bounds any lookup to `stride` hops.
//!
//! # Self-healing
//!
//! Buckets are filled lazily: [`ChunkedIndex::locate`] walks from the nearest
//! populated bucket below the target and records every bucket boundary it
//! crosses on the way.
//!
//! # Rebuild
//!
//! Every change at the front of the feed moves the origin. After such a change
//! [`ChunkedIndex::rebuild`] shifts the bucket array by whole strides and walks
//! each surviving sample forward by the remainder. Samples whose node has been
//! released are cleared rather than followed. The cost depends on the change
//! size and the number of populated buckets, never on the feed length.
//!
//! [`LocalityCache`] sits in front of the index during a single match: most
//! lookups move forward by a few symbols, so walking from the last resolved
//! node is cheaper than going through a bucket.

use super::arena::NodeRef;
use super::feed::Feed;
use crate::interpreter::errors::RuntimeError;

/// Sparse offset → node samples at a fixed stride
#[derive(Debug, Clone)]
pub struct ChunkedIndex {
    stride: usize,
    capacity: usize,
    buckets: Vec<Option<NodeRef>>,
}

impl ChunkedIndex {
    /// Create an empty index
    ///
    /// `stride` must be at least 1; `capacity` is the largest indexable length.
    pub fn new(stride: usize, capacity: usize) -> Self {
        let stride = stride.max(1);
        let bucket_count = capacity.div_ceil(stride).max(1);
        ChunkedIndex {
            stride,
            capacity,
            buckets: vec![None; bucket_count],
        }
    }

    pub fn stride(&self) -> usize {
        self.stride
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Number of populated buckets
    pub fn populated(&self) -> usize {
        self.buckets.iter().filter(|b| b.is_some()).count()
    }

    pub fn clear(&mut self) {
        self.buckets.iter_mut().for_each(|b| *b = None);
    }

    /// Sample every bucket in one pass over the feed
    pub fn warm(&mut self, feed: &Feed) {
        self.clear();
        let mut cursor = feed.head();
        let mut offset = 0;
        while let Some(node) = cursor {
            if offset >= self.capacity {
                break;
            }
            if offset % self.stride == 0 {
                self.buckets[offset / self.stride] = Some(node);
            }
            cursor = feed.next(node);
            offset += 1;
        }
    }

    /// Node at `offset` from the front
    ///
    /// Returns `Ok(None)` when `offset` is at or past the end of the feed, and
    /// [`RuntimeError::IndexCapacityExceeded`] when `offset` is beyond what the
    /// index was sized for.
    pub fn locate(&mut self, feed: &Feed, offset: usize) -> Result<Option<NodeRef>, RuntimeError> {
        if offset >= self.capacity {
            return Err(RuntimeError::IndexCapacityExceeded {
                offset,
                capacity: self.capacity,
            });
        }
        if offset > feed.len() {
            return Ok(None);
        }

        let mut bucket = offset / self.stride;
        let start = loop {
            match self.buckets[bucket] {
                Some(node) if feed.is_live(node) => break node,
                Some(_) => self.buckets[bucket] = None,
                None => {}
            }
            if bucket == 0 {
                match feed.head() {
                    Some(head) => {
                        self.buckets[0] = Some(head);
                        break head;
                    }
                    None => return Ok(None),
                }
            }
            bucket -= 1;
        };

        let mut node = start;
        let mut position = bucket * self.stride;
        while position < offset {
            node = match feed.next(node) {
                Some(next) => next,
                None => return Ok(None),
            };
            position += 1;
            if position % self.stride == 0 {
                self.buckets[position / self.stride] = Some(node);
            }
        }
        Ok(Some(node))
    }

    /// Re-anchor samples after the front moved from `old_len` to `new_len`
    ///
    /// Must run after the nodes of the old prefix have been released and the
    /// new prefix (if any) linked in.
    pub fn rebuild(&mut self, feed: &Feed, old_len: usize, new_len: usize) {
        let count = self.buckets.len();
        let walk = if new_len < old_len {
            let delta = old_len - new_len;
            let shift = (delta / self.stride).min(count);
            self.buckets.drain(..shift);
            self.buckets.resize(count, None);
            delta % self.stride
        } else if new_len > old_len {
            let delta = new_len - old_len;
            let shift = delta.div_ceil(self.stride).min(count);
            self.buckets.truncate(count - shift);
            self.buckets.splice(0..0, std::iter::repeat(None).take(shift));
            (self.stride - delta % self.stride) % self.stride
        } else {
            0
        };

        for bucket in self.buckets.iter_mut() {
            *bucket = match *bucket {
                Some(node) if feed.is_live(node) => feed.arena().advance(node, walk),
                _ => None,
            };
        }
    }

    /// Raw bucket content (tests and diagnostics)
    pub fn bucket(&self, bucket: usize) -> Option<NodeRef> {
        self.buckets.get(bucket).copied().flatten()
    }
}

/// Last resolved (offset, node) pair for one match attempt
#[derive(Debug, Clone, Copy)]
pub struct LocalityCache {
    offset: usize,
    node: Option<NodeRef>,
}

impl LocalityCache {
    /// Cache anchored at the feed front
    pub fn at_front(feed: &Feed) -> Self {
        LocalityCache {
            offset: 0,
            node: feed.head(),
        }
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Node at `offset`, walking from the cached node when it is close ahead
    pub fn resolve(
        &mut self,
        index: &mut ChunkedIndex,
        feed: &Feed,
        offset: usize,
    ) -> Result<Option<NodeRef>, RuntimeError> {
        let window = index.stride() / 2;
        let node = match (self.node, offset.checked_sub(self.offset)) {
            (Some(cached), Some(distance)) if distance < window => {
                feed.arena().advance(cached, distance)
            }
            _ => index.locate(feed, offset)?,
        };
        if offset > self.offset {
            if let Some(found) = node {
                self.offset = offset;
                self.node = Some(found);
            }
        }
        Ok(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::feed::Chain;
    use crate::memory::symbol::Symbol;

    fn pattern_feed(len: usize) -> Feed {
        let symbols: Vec<Symbol> = (0..len).map(|i| Symbol::ALL[(i * 7 + i / 3) % 4]).collect();
        Feed::from_symbols(&symbols)
    }

    fn brute_force(feed: &Feed, offset: usize) -> Option<NodeRef> {
        let mut node = feed.head()?;
        for _ in 0..offset {
            node = feed.next(node)?;
        }
        Some(node)
    }

    fn assert_agrees(index: &mut ChunkedIndex, feed: &Feed) {
        for offset in 0..=feed.len() {
            let expected = if offset == feed.len() {
                None
            } else {
                brute_force(feed, offset)
            };
            assert_eq!(index.locate(feed, offset).unwrap(), expected, "offset {}", offset);
        }
    }

    #[test]
    fn test_locate_fills_crossed_buckets() {
        let feed = pattern_feed(23);
        let mut index = ChunkedIndex::new(4, 100);
        assert_eq!(index.populated(), 0);
        let node = index.locate(&feed, 13).unwrap();
        assert_eq!(node, brute_force(&feed, 13));
        // buckets 0, 1, 2, 3 (offsets 0, 4, 8, 12)
        assert_eq!(index.populated(), 4);
        assert_eq!(index.bucket(3), brute_force(&feed, 12));
        assert_agrees(&mut index, &feed);
    }

    #[test]
    fn test_locate_past_end_and_capacity() {
        let feed = pattern_feed(5);
        let mut index = ChunkedIndex::new(2, 10);
        assert_eq!(index.locate(&feed, 5).unwrap(), None);
        assert_eq!(index.locate(&feed, 9).unwrap(), None);
        assert!(matches!(
            index.locate(&feed, 10),
            Err(RuntimeError::IndexCapacityExceeded { offset: 10, capacity: 10 })
        ));
    }

    #[test]
    fn test_rebuild_after_pops() {
        let mut feed = pattern_feed(40);
        let mut index = ChunkedIndex::new(3, 100);
        index.warm(&feed);
        let old = feed.len();
        for _ in 0..7 {
            feed.pop_front();
        }
        index.rebuild(&feed, old, feed.len());
        assert_agrees(&mut index, &feed);
    }

    #[test]
    fn test_rebuild_after_shrinking_and_growing_splices() {
        for (delete, insert) in [(10, 2), (3, 11), (6, 6), (0, 9), (17, 0), (5, 3)] {
            let mut feed = pattern_feed(50);
            let mut index = ChunkedIndex::new(4, 200);
            index.warm(&feed);

            let mut chain = Chain::new();
            for i in 0..insert {
                chain.push(feed.arena_mut(), Symbol::ALL[i % 4]);
            }
            let old = feed.len();
            feed.splice(delete, chain);
            assert_eq!(feed.len(), old - delete + insert);
            index.rebuild(&feed, old, feed.len());

            // surviving samples sit exactly on bucket boundaries
            for bucket in 0..index.bucket_count() {
                if let Some(node) = index.bucket(bucket) {
                    assert_eq!(Some(node), brute_force(&feed, bucket * 4), "bucket {}", bucket);
                }
            }
            assert_agrees(&mut index, &feed);
        }
    }

    #[test]
    fn test_rebuild_growth_beyond_bucket_count_clears() {
        let mut feed = pattern_feed(8);
        let mut index = ChunkedIndex::new(2, 8);
        index.warm(&feed);
        let mut chain = Chain::new();
        for _ in 0..20 {
            chain.push(feed.arena_mut(), Symbol::C);
        }
        let old = feed.len();
        feed.splice(0, chain);
        index.rebuild(&feed, old, feed.len());
        assert_eq!(index.populated(), 0);
        assert_eq!(index.locate(&feed, 7).unwrap(), brute_force(&feed, 7));
    }

    #[test]
    fn test_locality_cache_matches_locate() {
        let feed = pattern_feed(64);
        let mut cached_index = ChunkedIndex::new(8, 100);
        let mut plain_index = ChunkedIndex::new(8, 100);
        let mut cache = LocalityCache::at_front(&feed);
        for offset in [0, 1, 3, 3, 2, 9, 12, 40, 41, 44, 10, 63, 64, 20] {
            let fast = cache.resolve(&mut cached_index, &feed, offset).unwrap();
            let slow = plain_index.locate(&feed, offset).unwrap();
            assert_eq!(fast, slow, "offset {}", offset);
        }
        assert_eq!(cache.offset(), 63);
    }
}
