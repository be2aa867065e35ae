use std::sync::Arc;

use sluice_model::{Coder, CoderProto, FunctionSpec};

use super::{CoderTranslator, StandardTranslator};
use crate::error::Result;
use crate::registry::ComponentRegistry;

impl CoderTranslator for StandardTranslator {
	fn translate(&self, coder: &Arc<Coder>, registry: &mut ComponentRegistry) -> Result<CoderProto> {
		let component_coder_ids = coder
			.components()
			.iter()
			.map(|component| registry.register_coder(component))
			.collect::<Result<Vec<_>>>()?;
		Ok(CoderProto {
			spec: FunctionSpec::new(coder.urn()).with_payload(coder.payload()),
			component_coder_ids,
		})
	}
}
