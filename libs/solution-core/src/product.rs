//! Lazy cartesian product over index tuples.

/// Yields every index tuple `[i0, i1, ...]` with `i_k < lengths[k]`, last
/// position varying fastest. Yields a single empty tuple for no lengths and
/// nothing when any length is zero.
#[derive(Debug, Clone)]
pub struct CartesianIndices {
    lengths: Vec<usize>,
    next: Option<Vec<usize>>,
}

impl CartesianIndices {
    pub fn new(lengths: Vec<usize>) -> Self {
        let next = if lengths.contains(&0) {
            None
        } else {
            Some(vec![0; lengths.len()])
        };
        Self { lengths, next }
    }

    /// Total number of tuples, saturating on overflow.
    pub fn len_hint(&self) -> usize {
        self.lengths
            .iter()
            .fold(1usize, |total, &len| total.saturating_mul(len))
    }
}

impl Iterator for CartesianIndices {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next.take()?;

        let mut following = current.clone();
        for position in (0..following.len()).rev() {
            following[position] += 1;
            if following[position] < self.lengths[position] {
                self.next = Some(following);
                break;
            }
            following[position] = 0;
        }

        Some(current)
    }
}
