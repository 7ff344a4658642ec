//! Generic Longest Common Subsequence, parameterized on a similarity
//! predicate rather than plain equality so paragraph alignment can use a
//! Jaccard-tolerant match rule while word diff uses exact equality.

/// Returns the matched index pairs `(i, j)` into `a`/`b`, in increasing
/// order of both indices, under `similar`.
pub fn lcs_pairs<T>(a: &[T], b: &[T], similar: impl Fn(&T, &T) -> bool) -> Vec<(usize, usize)> {
    let n = a.len();
    let m = b.len();
    let mut table = vec![vec![0u32; m + 1]; n + 1];
    for i in (0..n).rev() {
        for j in (0..m).rev() {
            table[i][j] = if similar(&a[i], &b[j]) {
                table[i + 1][j + 1] + 1
            } else {
                table[i + 1][j].max(table[i][j + 1])
            };
        }
    }

    let mut pairs = Vec::new();
    let (mut i, mut j) = (0usize, 0usize);
    while i < n && j < m {
        if similar(&a[i], &b[j]) {
            pairs.push((i, j));
            i += 1;
            j += 1;
        } else if table[i + 1][j] >= table[i][j + 1] {
            i += 1;
        } else {
            j += 1;
        }
    }
    pairs
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aligns_equal_sequences_fully() {
        let a = vec!["x".to_string(), "y".to_string(), "z".to_string()];
        let b = a.clone();
        let pairs = lcs_pairs(&a, &b, |x, y| x == y);
        assert_eq!(pairs, vec![(0, 0), (1, 1), (2, 2)]);
    }

    #[test]
    fn skips_inserted_and_deleted_elements() {
        let a = vec!["foo".to_string(), "bar".to_string(), "baz".to_string()];
        let b = vec!["foo".to_string(), "qux".to_string(), "baz".to_string()];
        let pairs = lcs_pairs(&a, &b, |x, y| x == y);
        assert_eq!(pairs, vec![(0, 0), (2, 2)]);
    }
}
