//! # Element Ids
//!
//! Index newtypes for mesh elements (vertex, edge, face).
//! Ids are lightweight references into the mesh's element lists using
//! integer indices; `u32::MAX` marks an invalid (not-yet-assigned) id.

use std::fmt;

macro_rules! define_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(u32);

        impl $name {
            /// Create a new id with the given index
            #[inline]
            pub fn new(idx: u32) -> Self {
                Self(idx)
            }

            /// Create from usize
            #[inline]
            pub fn from_usize(idx: usize) -> Self {
                Self(idx as u32)
            }

            /// Get an invalid id
            #[inline]
            pub fn invalid() -> Self {
                Self(u32::MAX)
            }

            /// Get the underlying index
            #[inline]
            pub fn idx(&self) -> u32 {
                self.0
            }

            /// Get as usize (for indexing)
            #[inline]
            pub fn idx_usize(&self) -> usize {
                self.0 as usize
            }

            /// Check if the id is valid (index != MAX)
            #[inline]
            pub fn is_valid(&self) -> bool {
                self.0 != u32::MAX
            }
        }

        impl Default for $name {
            #[inline]
            fn default() -> Self {
                Self::invalid()
            }
        }

        impl From<u32> for $name {
            #[inline]
            fn from(idx: u32) -> Self {
                Self::new(idx)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

define_id!(
    /// Id referencing a vertex in a mesh's point list
    VertexId
);

define_id!(
    /// Id referencing an edge in a mesh's edge list
    EdgeId
);

define_id!(
    /// Id referencing a face in a mesh's face list
    FaceId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_validity() {
        let v = VertexId::new(0);
        assert!(v.is_valid());
        assert_eq!(v.idx(), 0);

        let invalid = VertexId::invalid();
        assert!(!invalid.is_valid());
        assert_eq!(VertexId::default(), invalid);
    }

    #[test]
    fn test_id_conversions() {
        let e = EdgeId::from_usize(42);
        assert_eq!(e.idx_usize(), 42);
        assert_eq!(EdgeId::from(42u32), e);
        assert_eq!(format!("{}", e), "42");
    }

    #[test]
    fn test_id_types_are_distinct() {
        // Compile-time property really, but keep the ordering semantics covered.
        let a = FaceId::new(1);
        let b = FaceId::new(2);
        assert!(a < b);
    }
}
