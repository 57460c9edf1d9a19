//! Edit-distance scripts over two indexable sequences.
//!
//! The cost model is Delete = 1, Insert = 1, Update = 2 for unequal items and
//! 0 for equal ones, so an unequal Update is never cheaper than a Delete plus
//! an Insert. Backtracking prefers Delete, then Insert, then Update; the
//! script for a given pair of sequences is therefore fully determined.

/// One step of an edit script. Indices refer to the old (`a`) and new (`b`)
/// sequences.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Edit {
    /// Drop `a[i]`.
    Delete(usize),
    /// Insert `b[j]`.
    Insert(usize),
    /// Pair `a[i]` with `b[j]`; they may or may not be equal.
    Update(usize, usize),
}

struct CostMatrix {
    width: usize,
    cells: Vec<usize>,
}

impl CostMatrix {
    fn build<F>(len_a: usize, len_b: usize, mut equal: F) -> Self
    where
        F: FnMut(usize, usize) -> bool,
    {
        let width = len_b + 1;
        let mut cells = vec![0; (len_a + 1) * width];

        for (j, cell) in cells.iter_mut().take(width).enumerate() {
            *cell = j;
        }
        for i in 1..=len_a {
            cells[i * width] = i;
            for j in 1..=len_b {
                let substitute = if equal(i - 1, j - 1) { 0 } else { 2 };
                let diagonal = cells[(i - 1) * width + j - 1] + substitute;
                let delete = cells[(i - 1) * width + j] + 1;
                let insert = cells[i * width + j - 1] + 1;
                cells[i * width + j] = diagonal.min(delete).min(insert);
            }
        }

        Self { width, cells }
    }

    fn at(&self, i: usize, j: usize) -> usize {
        self.cells[i * self.width + j]
    }
}

/// Compute the edit script turning `a[0..len_a)` into `b[0..len_b)`.
///
/// `equal(i, j)` reports whether `a[i]` equals `b[j]`. Edits are returned in
/// forward order and consume both sequences completely.
pub fn edit_script<F>(len_a: usize, len_b: usize, equal: F) -> Vec<Edit>
where
    F: FnMut(usize, usize) -> bool,
{
    let d = CostMatrix::build(len_a, len_b, equal);
    let mut edits = Vec::with_capacity(len_a.max(len_b));
    let (mut i, mut j) = (len_a, len_b);

    while i != 0 && j != 0 {
        let here = d.at(i, j);
        if here == d.at(i - 1, j) + 1 {
            edits.push(Edit::Delete(i - 1));
            i -= 1;
        } else if here == d.at(i, j - 1) + 1 {
            edits.push(Edit::Insert(j - 1));
            j -= 1;
        } else {
            edits.push(Edit::Update(i - 1, j - 1));
            i -= 1;
            j -= 1;
        }
    }
    while i != 0 {
        edits.push(Edit::Delete(i - 1));
        i -= 1;
    }
    while j != 0 {
        edits.push(Edit::Insert(j - 1));
        j -= 1;
    }

    edits.reverse();
    edits
}

/// [`edit_script`] over two slices using `PartialEq`.
pub fn diff_slices<T: PartialEq>(a: &[T], b: &[T]) -> Vec<Edit> {
    edit_script(a.len(), b.len(), |i, j| a[i] == b[j])
}

/// The minimal cost of turning `a[0..len_a)` into `b[0..len_b)`.
pub fn min_cost<F>(len_a: usize, len_b: usize, equal: F) -> usize
where
    F: FnMut(usize, usize) -> bool,
{
    CostMatrix::build(len_a, len_b, equal).at(len_a, len_b)
}

/// Total cost of `edits` under the same cost model.
pub fn script_cost<F>(edits: &[Edit], mut equal: F) -> usize
where
    F: FnMut(usize, usize) -> bool,
{
    edits
        .iter()
        .map(|edit| match *edit {
            Edit::Delete(_) | Edit::Insert(_) => 1,
            Edit::Update(i, j) if equal(i, j) => 0,
            Edit::Update(..) => 2,
        })
        .sum()
}
