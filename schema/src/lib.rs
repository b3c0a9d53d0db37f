pub mod function;
pub mod invoke;
pub mod metadata;
pub mod project;

pub use function::{FunctionConfig, FunctionSpec, FunctionState, FunctionStatus};
pub use invoke::{InvokeResult, InvokeVia};
pub use metadata::{FunctionFilter, ResourceId, ResourceMeta};
pub use project::{ProjectConfig, ProjectSpec};
