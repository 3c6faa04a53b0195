/// Deal `entries` out to `workers` lists: entry `i` goes to list `i % workers`.
///
/// Always returns exactly `workers` lists (some may be empty), each keeping
/// the relative order of its entries.
pub fn round_robin<T>(entries: Vec<T>, workers: usize) -> Vec<Vec<T>> {
    let workers = workers.max(1);
    let per_worker = entries.len().div_ceil(workers);
    let mut lists: Vec<Vec<T>> = (0..workers)
        .map(|_| Vec::with_capacity(per_worker))
        .collect();

    for (index, entry) in entries.into_iter().enumerate() {
        lists[index % workers].push(entry);
    }

    lists
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_eight_entries_four_workers() {
        let entries: Vec<String> = (0..8).map(|i| format!("p{i}")).collect();
        let lists = round_robin(entries, 4);

        assert_eq!(lists.len(), 4);
        for (worker, list) in lists.iter().enumerate() {
            assert_eq!(list, &vec![format!("p{worker}"), format!("p{}", worker + 4)]);
        }
    }

    #[test]
    fn test_uneven_tail() {
        let lists = round_robin(vec![1, 2, 3, 4, 5], 3);
        assert_eq!(lists, vec![vec![1, 4], vec![2, 5], vec![3]]);
    }

    #[test]
    fn test_fewer_entries_than_workers() {
        let lists = round_robin(vec!["only"], 3);
        assert_eq!(lists, vec![vec!["only"], vec![], vec![]]);
    }

    #[test]
    fn test_single_worker_keeps_everything_in_order() {
        let lists = round_robin(vec![3, 1, 2], 1);
        assert_eq!(lists, vec![vec![3, 1, 2]]);
    }
}
