use rayon::prelude::*;

/// The number of captured indices handled by one parallel task.
const CHUNK_LEN: usize = 4096;

/// Collect the indices in `0..len` for which `pred` holds.
///
/// The scan runs on the rayon pool, the result is in increasing order.
pub fn build_index(len: usize, pred: impl Fn(usize) -> bool + Sync) -> Vec<u32> {
    (0..len)
        .into_par_iter()
        .filter(|&i| pred(i))
        .map(|i| i as u32)
        .collect()
}

/// Run `f` on every element of `data` addressed by `indices`.
///
/// `indices` must be strictly increasing. `data` is split into disjoint sub slices following the
/// index chunks, so the chunks run in parallel without locking. `f` receives the position of the
/// index inside `indices` alongside the element.
///
/// Nothing is touched if an index is out of range.
pub fn for_each_at<T: Send>(data: &mut [T], indices: &[u32], f: impl Fn(usize, &mut T) + Sync) {
    debug_assert!(
        indices.windows(2).all(|w| w[0] < w[1]),
        "indices must be strictly increasing"
    );

    match indices.last() {
        None => return,
        Some(&last) if last as usize >= data.len() => {
            log::error!(
                "Index {last} out of range, collection has {} elements",
                data.len()
            );
            return;
        }
        Some(_) => {}
    }

    let mut parts = Vec::with_capacity(indices.len().div_ceil(CHUNK_LEN));
    let mut rest = data;
    let mut offset = 0;
    for (chunk_i, chunk) in indices.chunks(CHUNK_LEN).enumerate() {
        let end = chunk[chunk.len() - 1] as usize + 1;
        let (head, tail) = std::mem::take(&mut rest).split_at_mut(end - offset);
        parts.push((head, offset, chunk_i * CHUNK_LEN, chunk));
        rest = tail;
        offset = end;
    }

    parts
        .into_par_iter()
        .for_each(|(slice, offset, first, chunk)| {
            for (j, &i) in chunk.iter().enumerate() {
                f(first + j, &mut slice[i as usize - offset]);
            }
        });
}
