//! Free-block selection under the four placement strategies.

use crate::arena::Arena;
use crate::block::BlockRef;
use crate::config::Strategy;
use crate::freelist::FreeList;

/// Choose a free block of at least `required` units under `strategy`, or
/// `None` if nothing in the list fits.
///
/// `last_freed` seeds the next-fit scan. The resume point is defined by
/// address: the first fitting free block strictly above `last_freed`,
/// wrapping to entries at or below it. A stale mark (block since
/// reallocated or merged away) therefore degrades to a full scan instead
/// of chasing a dangling link.
pub(crate) fn choose(
    arena: &Arena,
    free: &FreeList,
    strategy: Strategy,
    last_freed: Option<BlockRef>,
    required: u32,
) -> Option<BlockRef> {
    let fits = |b: &BlockRef| arena.size_of(*b) >= required;
    match strategy {
        Strategy::FirstFit => free.iter(arena).find(fits),
        Strategy::BestFit => {
            let mut best: Option<(BlockRef, u32)> = None;
            for b in free.iter(arena) {
                let size = arena.size_of(b);
                if size < required {
                    continue;
                }
                let slack = size - required;
                // Strict comparison keeps the first of equally-good blocks.
                match best {
                    Some((_, best_slack)) if slack >= best_slack => {}
                    _ => best = Some((b, slack)),
                }
            }
            best.map(|(b, _)| b)
        }
        Strategy::WorstFit => {
            let mut worst: Option<(BlockRef, u32)> = None;
            for b in free.iter(arena) {
                let size = arena.size_of(b);
                if size < required {
                    continue;
                }
                match worst {
                    Some((_, worst_size)) if size <= worst_size => {}
                    _ => worst = Some((b, size)),
                }
            }
            worst.map(|(b, _)| b)
        }
        Strategy::NextFit => {
            let Some(mark) = last_freed else {
                return free.iter(arena).find(fits);
            };
            free.iter(arena)
                .find(|b| *b > mark && fits(b))
                .or_else(|| free.iter(arena).find(|b| *b <= mark && fits(b)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::Header;
    use crate::config::ListOrder;

    fn live(size: u32) -> Header {
        Header {
            is_free: false,
            ..Header::free(size)
        }
    }

    /// Free blocks of 10, 4, and 7 units with live padding between them.
    fn fixture() -> (Arena, FreeList, [BlockRef; 3]) {
        let mut arena = Arena::new(1024, 4096);
        arena.grow().unwrap();
        let ten = BlockRef(0);
        let four = BlockRef(13);
        let seven = BlockRef(20);
        arena.write_header(ten, Header::free(10));
        arena.write_header(BlockRef(10), live(3));
        arena.write_header(four, Header::free(4));
        arena.write_header(BlockRef(17), live(3));
        arena.write_header(seven, Header::free(7));
        arena.write_header(BlockRef(27), live(37));

        let mut free = FreeList::new(ListOrder::AddressOrdered);
        free.insert(&mut arena, ten);
        free.insert(&mut arena, four);
        free.insert(&mut arena, seven);
        (arena, free, [ten, four, seven])
    }

    #[test]
    fn first_fit_takes_first_that_fits() {
        let (arena, free, [ten, _, _]) = fixture();
        let chosen = choose(&arena, &free, Strategy::FirstFit, None, 5);
        assert_eq!(chosen, Some(ten));
    }

    #[test]
    fn best_fit_minimizes_slack() {
        let (arena, free, [_, _, seven]) = fixture();
        let chosen = choose(&arena, &free, Strategy::BestFit, None, 5);
        assert_eq!(chosen, Some(seven));
    }

    #[test]
    fn best_fit_tie_goes_to_first_encountered() {
        let mut arena = Arena::new(1024, 4096);
        arena.grow().unwrap();
        let a = BlockRef(0);
        let b = BlockRef(11);
        arena.write_header(a, Header::free(8));
        arena.write_header(BlockRef(8), live(3));
        arena.write_header(b, Header::free(8));
        arena.write_header(BlockRef(19), live(45));
        let mut free = FreeList::new(ListOrder::AddressOrdered);
        free.insert(&mut arena, a);
        free.insert(&mut arena, b);

        assert_eq!(choose(&arena, &free, Strategy::BestFit, None, 8), Some(a));
    }

    #[test]
    fn worst_fit_maximizes_size() {
        let (arena, free, [ten, _, _]) = fixture();
        let chosen = choose(&arena, &free, Strategy::WorstFit, None, 3);
        assert_eq!(chosen, Some(ten));
    }

    #[test]
    fn no_fit_returns_none() {
        let (arena, free, _) = fixture();
        assert_eq!(choose(&arena, &free, Strategy::BestFit, None, 11), None);
    }

    #[test]
    fn next_fit_without_mark_scans_from_head() {
        let (arena, free, [ten, _, _]) = fixture();
        let chosen = choose(&arena, &free, Strategy::NextFit, None, 4);
        assert_eq!(chosen, Some(ten));
    }

    #[test]
    fn next_fit_resumes_past_mark() {
        let (arena, free, [ten, four, seven]) = fixture();
        // Mark at the 4-unit block: scan resumes above it.
        let chosen = choose(&arena, &free, Strategy::NextFit, Some(four), 4);
        assert_eq!(chosen, Some(seven));
        // Nothing above the 7-unit block fits 10 units; wraps to the start.
        let chosen = choose(&arena, &free, Strategy::NextFit, Some(seven), 10);
        assert_eq!(chosen, Some(ten));
    }

    #[test]
    fn next_fit_with_stale_mark_still_covers_list() {
        let (arena, free, [ten, _, _]) = fixture();
        // Mark above every free block: the wrap pass finds the fit.
        let chosen = choose(&arena, &free, Strategy::NextFit, Some(BlockRef(60)), 10);
        assert_eq!(chosen, Some(ten));
    }
}
