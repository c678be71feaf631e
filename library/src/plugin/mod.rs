pub mod manager;
pub mod node_types;
pub mod pin;
pub mod traits;

pub use self::manager::NodeRegistry;
pub use self::node_types::{NodeCategory, NodeTypeDefinition};
pub use self::pin::{PinDataType, PinDefinition, PinDirection};
pub use self::traits::{NodePlugin, Plugin};
