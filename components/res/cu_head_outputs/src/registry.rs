use crate::output::{FullHeadOutput, HeadOutput};
use crate::transport::HeadTransport;
use crate::FULL_HEAD_KEY;
use cu29::prelude::*;
use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::sync::{Arc, OnceLock};

static OUTPUTS: OnceLock<RwLock<OutputRegistry>> = OnceLock::new();

/// Shared outputs by name. Every lookup of a name hands out the same instance.
#[derive(Default)]
pub struct OutputRegistry {
    outputs: BTreeMap<String, Arc<dyn HeadOutput>>,
}

impl OutputRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_shared(&mut self, name: &str, output: Arc<dyn HeadOutput>) -> CuResult<()> {
        if self.outputs.contains_key(name) {
            return Err(CuError::from(format!(
                "Output '{name}' is already registered"
            )));
        }
        self.outputs.insert(name.to_string(), output);
        debug!("OutputRegistry: registered {}", name);
        Ok(())
    }

    pub fn get_instance(&self, name: &str) -> CuResult<Arc<dyn HeadOutput>> {
        self.outputs
            .get(name)
            .cloned()
            .ok_or_else(|| CuError::from(format!("Output '{name}' not registered")))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.outputs.contains_key(name)
    }

    pub fn names(&self) -> Vec<&str> {
        self.outputs.keys().map(String::as_str).collect()
    }

    pub fn len(&self) -> usize {
        self.outputs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outputs.is_empty()
    }
}

/// Process-wide registry. Copper tasks only receive their config when they are
/// built, so outputs have to be registered here before the application starts.
pub fn outputs() -> &'static RwLock<OutputRegistry> {
    OUTPUTS.get_or_init(|| RwLock::new(OutputRegistry::new()))
}

/// Looks `name` up in the process-wide registry.
pub fn get_instance(name: &str) -> CuResult<Arc<dyn HeadOutput>> {
    outputs().read().get_instance(name)
}

/// Builds a full head output and registers it under `name`.
/// The concrete handle is returned so the caller can keep driving its targets.
pub fn register_head_output(
    registry: &mut OutputRegistry,
    name: &str,
    config: Option<&ComponentConfig>,
    transport: Arc<dyn HeadTransport>,
) -> CuResult<Arc<FullHeadOutput>> {
    let output = Arc::new(FullHeadOutput::from_config(name, config, transport)?);
    registry.add_shared(name, output.clone())?;
    Ok(output)
}

/// [`register_head_output`] under [`FULL_HEAD_KEY`].
pub fn register_full_head(
    registry: &mut OutputRegistry,
    config: Option<&ComponentConfig>,
    transport: Arc<dyn HeadTransport>,
) -> CuResult<Arc<FullHeadOutput>> {
    register_head_output(registry, FULL_HEAD_KEY, config, transport)
}
