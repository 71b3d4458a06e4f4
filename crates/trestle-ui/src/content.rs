use trestle_core::NodeId;
use trestle_geometry::Size;
use trestle_layout::SizeHint;

/// Measures the intrinsic size of a leaf's content (text, image, ...).
///
/// Implementations must be pure with respect to the hint: the same hint and
/// the same content give the same size. The engine memoizes the answer until
/// the content is reported as changed.
pub trait ContentMeasurer {
    fn measure_intrinsic(&self, node: NodeId, width: SizeHint) -> Size;
}
