use std::ops::Range;

/// Split `len` symbols into exactly `workers` contiguous ranges.
///
/// Every range holds `len / workers` symbols except the last, which also
/// takes the remainder. With more workers than symbols the leading ranges
/// are empty and the last one holds everything.
pub fn partition_ranges(len: usize, workers: usize) -> Vec<Range<usize>> {
    let workers = workers.max(1);
    let chunk = len / workers;

    (0..workers)
        .map(|worker| {
            let start = worker * chunk;
            let end = if worker == workers - 1 {
                len
            } else {
                start + chunk
            };
            start..end
        })
        .collect()
}

/// Borrowing view of [`partition_ranges`] over a symbol slice.
pub fn partition<S>(symbols: &[S], workers: usize) -> Vec<&[S]> {
    partition_ranges(symbols.len(), workers)
        .into_iter()
        .map(|range| &symbols[range])
        .collect()
}
