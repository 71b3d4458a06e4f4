//! Main-axis placement of a run of children

/// Turns child extents into leading offsets along one axis.
pub trait Arrangement {
    /// Writes one offset per entry of `sizes` into `out_positions`.
    fn arrange(&self, total_size: i32, sizes: &[i32], out_positions: &mut [i32]);
}

/// Where the free space of a linear layout goes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LinearArrangement {
    /// Packed against the leading edge.
    #[default]
    Start,
    /// Packed against the trailing edge.
    End,
    /// Packed in the middle.
    Center,
    /// Free space only between children; the ends are flush.
    SpaceBetween,
    /// Half gaps at the ends, full gaps between children.
    SpaceAround,
    /// Equal gaps at both ends and between children.
    SpaceEvenly,
    /// Packed at the start with a fixed gap.
    SpacedBy(i32),
}

impl LinearArrangement {
    /// Negative spacing is treated as zero.
    pub fn spaced_by(spacing: i32) -> Self {
        Self::SpacedBy(spacing.max(0))
    }

    /// Fixed gap between children, zero for the distributing arrangements.
    pub fn spacing(&self) -> i32 {
        match *self {
            LinearArrangement::SpacedBy(value) => value.max(0),
            _ => 0,
        }
    }

    fn fill_positions(start: i32, gap: i32, sizes: &[i32], out_positions: &mut [i32]) {
        debug_assert_eq!(sizes.len(), out_positions.len());
        let mut cursor = start;
        for (index, (size, position)) in sizes.iter().zip(out_positions.iter_mut()).enumerate() {
            *position = cursor;
            cursor += size;
            if index + 1 < sizes.len() {
                cursor += gap;
            }
        }
    }
}

impl Arrangement for LinearArrangement {
    fn arrange(&self, total_size: i32, sizes: &[i32], out_positions: &mut [i32]) {
        debug_assert_eq!(sizes.len(), out_positions.len());
        if sizes.is_empty() {
            return;
        }

        let count = sizes.len() as i32;
        let remaining = total_size - sizes.iter().sum::<i32>();

        match *self {
            LinearArrangement::Start => Self::fill_positions(0, 0, sizes, out_positions),
            LinearArrangement::End => Self::fill_positions(remaining, 0, sizes, out_positions),
            LinearArrangement::Center => {
                Self::fill_positions(remaining / 2, 0, sizes, out_positions)
            }
            LinearArrangement::SpaceBetween => {
                let gap = if count <= 1 { 0 } else { remaining / (count - 1) };
                Self::fill_positions(0, gap, sizes, out_positions);
            }
            LinearArrangement::SpaceAround => {
                let gap = remaining / count;
                Self::fill_positions(gap / 2, gap, sizes, out_positions);
            }
            LinearArrangement::SpaceEvenly => {
                let gap = remaining / (count + 1);
                Self::fill_positions(gap, gap, sizes, out_positions);
            }
            LinearArrangement::SpacedBy(spacing) => {
                Self::fill_positions(0, spacing.max(0), sizes, out_positions);
            }
        }
    }
}

#[cfg(test)]
#[path = "tests/arrangement_tests.rs"]
mod tests;
