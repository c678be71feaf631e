pub mod reference;
pub mod tensor;
pub mod value;

pub use reference::{ImageReference, ModelPair, ModelReference};
pub use tensor::{ImageTensor, MaskTensor};
pub use value::{ChangeKey, NodeInputs, NodeOutput, NodeValue, UiImage, UiPayload, Validation};
