//! Typed pin declarations for node inputs and outputs.

use serde::Serialize;

/// Data type carried by a pin.
#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum PinDataType {
    /// Text string
    String,
    /// Integer value (i64)
    Int,
    /// Floating point scalar (f64)
    Float,
    /// `B x H x W x 3` image tensor
    Image,
    /// `B x H x W` mask tensor
    Mask,
}

impl std::fmt::Display for PinDataType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            PinDataType::String => "STRING",
            PinDataType::Int => "INT",
            PinDataType::Float => "FLOAT",
            PinDataType::Image => "IMAGE",
            PinDataType::Mask => "MASK",
        };
        write!(f, "{}", s)
    }
}

/// Direction of a pin.
#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PinDirection {
    Input,
    Output,
}

/// Definition of a pin on a node type.
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct PinDefinition {
    /// Internal name, also the key in `NodeInputs`
    pub name: String,
    pub display_name: String,
    pub direction: PinDirection,
    pub data_type: PinDataType,
    /// Required inputs must be present in `NodeInputs`
    pub required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_value: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub multiline: bool,
    /// Host shows an upload widget next to the choice list
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub image_upload: bool,
    /// Selectable values offered by the host UI
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub choices: Vec<String>,
}

impl PinDefinition {
    pub fn input(name: &str, display_name: &str, data_type: PinDataType) -> Self {
        Self {
            name: name.to_string(),
            display_name: display_name.to_string(),
            direction: PinDirection::Input,
            data_type,
            required: true,
            default_value: None,
            multiline: false,
            image_upload: false,
            choices: Vec::new(),
        }
    }

    pub fn output(name: &str, display_name: &str, data_type: PinDataType) -> Self {
        Self {
            direction: PinDirection::Output,
            ..Self::input(name, display_name, data_type)
        }
    }

    pub fn with_default(mut self, value: serde_json::Value) -> Self {
        self.default_value = Some(value);
        self
    }

    pub fn multiline(mut self) -> Self {
        self.multiline = true;
        self
    }

    pub fn with_choices(mut self, choices: Vec<String>) -> Self {
        self.choices = choices;
        self
    }

    pub fn with_image_upload(mut self) -> Self {
        self.image_upload = true;
        self
    }
}
