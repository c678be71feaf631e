//! Command-line driver for running the nodes outside a host graph.

use std::io::Read;
use std::path::Path;

use log::info;

use crate::config::NodeConfig;
use crate::error::LibraryError;
use crate::model::value::{NodeInputs, NodeOutput, NodeValue, Validation};
use crate::plugin::NodeRegistry;

const USAGE: &str = "usage: cli [--config <path>] <list | image <ref|-> | key <ref|-> | lora <ref>>";

pub fn run(args: Vec<String>) -> Result<(), LibraryError> {
    let mut config_path = None;
    let mut rest = Vec::new();
    let mut iter = args.into_iter().skip(1);
    while let Some(arg) = iter.next() {
        if arg == "--config" {
            let path = iter
                .next()
                .ok_or_else(|| LibraryError::InvalidInput("--config needs a path".to_string()))?;
            config_path = Some(path);
        } else {
            rest.push(arg);
        }
    }

    let config = match config_path {
        Some(path) => NodeConfig::load(Path::new(&path))?,
        None => NodeConfig::load_or_default(),
    }
    .with_env_overrides();
    let registry = crate::create_node_registry(&config)?;

    match rest.as_slice() {
        [cmd] if cmd == "list" => {
            println!("{}", serde_json::to_string_pretty(&registry.object_info()?)?);
            Ok(())
        }
        [cmd, reference] if cmd == "image" => run_image(&registry, reference),
        [cmd, reference] if cmd == "key" => {
            let inputs = image_inputs(reference)?;
            match registry.changed("InputImage", &inputs)? {
                Some(key) => println!("{}", key),
                None => println!("(no change key)"),
            }
            Ok(())
        }
        [cmd, reference] if cmd == "lora" => {
            let inputs =
                NodeInputs::from([("lora".to_string(), NodeValue::from(reference.as_str()))]);
            let output = registry.run("InputLoRA", &inputs)?;
            print_values(&output);
            Ok(())
        }
        _ => Err(LibraryError::InvalidInput(USAGE.to_string())),
    }
}

/// `-` reads the image bytes from stdin.
fn image_inputs(reference: &str) -> Result<NodeInputs, LibraryError> {
    let value = if reference == "-" {
        let mut bytes = Vec::new();
        std::io::stdin().read_to_end(&mut bytes)?;
        NodeValue::Bytes(bytes)
    } else {
        NodeValue::from(reference)
    };
    Ok(NodeInputs::from([("image".to_string(), value)]))
}

fn run_image(registry: &NodeRegistry, reference: &str) -> Result<(), LibraryError> {
    let inputs = image_inputs(reference)?;
    if let Validation::Rejected(reason) = registry.validate("InputImage", &inputs)? {
        return Err(LibraryError::InvalidInput(reason));
    }
    let output = registry.run("InputImage", &inputs)?;
    info!("Resolved image reference '{}'", reference);
    print_values(&output);
    if let Some(key) = registry.changed("InputImage", &inputs)? {
        println!("change key: {}", key);
    }
    Ok(())
}

fn print_values(output: &NodeOutput) {
    for value in &output.values {
        match value {
            NodeValue::Image(image) => println!("IMAGE {:?}", image.shape()),
            NodeValue::Mask(mask) => println!("MASK {:?}", mask.shape()),
            NodeValue::String(s) => println!("{}", s),
            other => println!("{:?}", other),
        }
    }
}
