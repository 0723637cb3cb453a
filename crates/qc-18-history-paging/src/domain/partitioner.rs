//! # Page Partitioner
//!
//! Splits a height → transaction-count summary into pages of roughly
//! `page_size` transactions.
//!
//! ## Algorithm
//!
//! 1. Walk the summary in ascending height order, accumulating counts.
//! 2. Close the running page once its count reaches `page_size`; the next
//!    page starts at the height right after the closed one.
//!    A height whose count would overflow the running total closes the
//!    open page just below it instead.
//! 3. Heights left over at the top form the newest page, unless they hold
//!    no transactions, in which case they are folded into the newest page.
//! 4. Sort newest-first.
//!
//! Pages are numerically contiguous: heights absent from the summary carry
//! zero transactions and land inside whichever page spans them.

use super::page::PageDescriptor;
use super::value_objects::{BlockHeight, HistorySummary};

/// Build the page table for `summary`, newest page first.
///
/// An empty summary yields no pages. `page_size` of zero is treated as one.
pub fn build_pages<L>(summary: &HistorySummary, page_size: u32) -> Vec<PageDescriptor<L>> {
    let mut pages = Vec::new();
    let page_size = page_size.max(1);

    let Some((&first_height, _)) = summary.first_key_value() else {
        return pages;
    };

    let mut bottom = first_height;
    let mut running: u32 = 0;
    // Highest height walked since the last close, if any.
    let mut open_top: Option<BlockHeight> = None;

    for (&height, &count) in summary {
        running = match running.checked_add(count) {
            Some(total) => total,
            None => {
                // Close the open page below this height rather than overflow.
                add_page(&mut pages, running, bottom, height - 1);
                bottom = height;
                count
            }
        };
        open_top = Some(height);

        if running >= page_size {
            add_page(&mut pages, running, bottom, height);
            running = 0;
            open_top = None;
            match height.checked_add(1) {
                Some(next) => bottom = next,
                None => break,
            }
        }
    }

    if let Some(top) = open_top {
        match pages.last_mut() {
            Some(newest) if running == 0 => newest.extend_to(top),
            _ => add_page(&mut pages, running, bottom, top),
        }
    }

    sort_pages(&mut pages);
    pages
}

/// Append one page with a fresh "never built" cache.
pub fn add_page<L>(
    target: &mut Vec<PageDescriptor<L>>,
    count: u32,
    lower_bound: BlockHeight,
    upper_bound: BlockHeight,
) {
    target.push(PageDescriptor::new(count, lower_bound, upper_bound));
}

/// Re-sort pages into history order (descending lower bound).
pub fn sort_pages<L>(target: &mut [PageDescriptor<L>]) {
    target.sort_by(PageDescriptor::newest_first);
}
