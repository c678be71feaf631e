macro_rules! define_node_plugin {
    (
        $struct_name:ident,
        id: $id:expr,
        name: $name:expr,
        category: $category:expr,
        version: ($major:expr, $minor:expr, $patch:expr)
    ) => {
        impl $crate::plugin::Plugin for $struct_name {
            fn id(&self) -> &'static str {
                $id
            }

            fn name(&self) -> String {
                $name.to_string()
            }

            fn category(&self) -> $crate::plugin::NodeCategory {
                $category
            }

            fn version(&self) -> (u32, u32, u32) {
                ($major, $minor, $patch)
            }
        }
    };
}
pub(crate) use define_node_plugin;

pub mod image_input;
pub mod image_output;
pub mod lora_input;
pub mod primitives;

pub use self::image_input::InputImage;
pub use self::image_output::OutputImage;
pub use self::lora_input::InputLoRA;
pub use self::primitives::{InputFloat, InputInt, InputString, InputText};
