//! Definition layer
//! - types.rs: Package and Definition records
//! - labels.rs: Typed autobump configuration built from labels
//! - loader.rs: Tree discovery and definition.yaml loading
//! - patch.rs: In-place rewriting of definition.yaml

pub mod error;
pub mod labels;
pub mod loader;
pub mod patch;
pub mod types;

pub use error::{DefinitionError, MutationError};
pub use labels::AutobumpConfig;
pub use patch::{DefinitionWriter, YamlPatcher};
pub use types::{Definition, Package};
