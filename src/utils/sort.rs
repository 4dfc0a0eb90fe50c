use core::cmp::Ordering;
use std::collections::BinaryHeap;

/// A document id with its score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ranked {
    pub id: usize,
    pub score: f64,
}

impl Ranked {
    #[inline]
    pub fn new(id: usize, score: f64) -> Self {
        // -0.0 and 0.0 must tie under total_cmp
        Self { id, score: score + 0.0 }
    }
}

/// Ranking comparator: higher score first, then lower id.
/// `Less` means `a` ranks before `b`.
#[inline]
pub fn rank_order(a: &Ranked, b: &Ranked) -> Ordering {
    b.score.total_cmp(&a.score).then_with(|| a.id.cmp(&b.id))
}

/// Heap entry whose greatest element is the worst-ranked one.
struct Worst(Ranked);

impl PartialEq for Worst {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Worst {}

impl PartialOrd for Worst {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Worst {
    fn cmp(&self, other: &Self) -> Ordering {
        rank_order(&self.0, &other.0)
    }
}

/// Select the `n` best entries under [`rank_order`], best first.
///
/// Keeps a bounded heap of size `n`: O(len · log n) time, O(n) memory.
/// The result is independent of input order.
pub fn top_n<I>(items: I, n: usize) -> Vec<Ranked>
where
    I: IntoIterator<Item = Ranked>,
{
    if n == 0 {
        return Vec::new();
    }
    let mut heap: BinaryHeap<Worst> = BinaryHeap::with_capacity(n);
    for item in items {
        if heap.len() < n {
            heap.push(Worst(item));
            continue;
        }
        if let Some(mut worst) = heap.peek_mut() {
            if rank_order(&item, &worst.0) == Ordering::Less {
                // sifts down when `worst` is dropped
                *worst = Worst(item);
            }
        }
    }
    heap.into_sorted_vec().into_iter().map(|w| w.0).collect()
}
