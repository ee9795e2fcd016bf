//! Project type model
//!
//! - attribute: constant/variable attribute definitions and the value-provider boundary
//! - definition: declared (unresolved) project types

pub mod attribute;
pub mod definition;

pub use attribute::{AttributeDefinition, AttributeKind, AttributeValue, ValueProvider, ValueProviderFactory};
pub use definition::{ProjectTypeDefinition, BASE_TYPE_DISPLAY_NAME, BASE_TYPE_ID};
