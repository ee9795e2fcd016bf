//! Listing orders for registry output

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use super::resolved::ResolvedProjectType;

/// Sort order for [`ProjectTypeRegistry::project_types_ordered`](super::ProjectTypeRegistry::project_types_ordered)
///
/// A type always has strictly more ancestors than any of its ancestors, so
/// ancestor count is a valid topological key. Ties are broken by id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TypeOrder {
    /// Descendants before ancestors; the base type sorts last
    #[default]
    ChildToParent,
    /// Ancestors before descendants; the base type sorts first
    ParentToChild,
    /// Lexicographic by id
    ById,
}

impl TypeOrder {
    #[must_use]
    pub fn compare(self, a: &ResolvedProjectType, b: &ResolvedProjectType) -> Ordering {
        let depth = match self {
            Self::ChildToParent => b.ancestors().len().cmp(&a.ancestors().len()),
            Self::ParentToChild => a.ancestors().len().cmp(&b.ancestors().len()),
            Self::ById => Ordering::Equal,
        };
        depth.then_with(|| a.id().cmp(b.id()))
    }

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::ChildToParent => "child-to-parent",
            Self::ParentToChild => "parent-to-child",
            Self::ById => "id",
        }
    }
}

impl fmt::Display for TypeOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TypeOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "child-to-parent" => Ok(Self::ChildToParent),
            "parent-to-child" => Ok(Self::ParentToChild),
            "id" => Ok(Self::ById),
            other => Err(format!(
                "Unknown order: {} (expected child-to-parent, parent-to-child or id)",
                other
            )),
        }
    }
}
