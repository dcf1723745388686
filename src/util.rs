/// Sorts `values` ascending and drops duplicates so the result can be handed
/// straight to the tree builder.
pub(crate) fn sorted_unique<T: Ord>(values: impl IntoIterator<Item = T>) -> Vec<T> {
    let mut values: Vec<T> = values.into_iter().collect();
    values.sort_unstable();
    values.dedup();
    values
}

/// Whether every element is strictly larger than the one before it.
pub(crate) fn is_strictly_ascending<T: Ord>(values: &[T]) -> bool {
    values.windows(2).all(|pair| pair[0] < pair[1])
}
