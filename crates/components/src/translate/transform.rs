use std::collections::BTreeMap;
use std::sync::Arc;

use sluice_model::{AppliedTransform, Collection, TransformProto};

use super::{StandardTranslator, TransformTranslator};
use crate::error::Result;
use crate::registry::ComponentRegistry;

impl TransformTranslator for StandardTranslator {
	fn translate(
		&self,
		transform: &Arc<AppliedTransform>,
		children: &[Arc<AppliedTransform>],
		registry: &mut ComponentRegistry,
	) -> Result<TransformProto> {
		let subtransforms = children
			.iter()
			.map(|child| registry.existing_transform_id(child).map(str::to_owned))
			.collect::<Result<Vec<_>>>()?;

		let inputs = register_all(transform.inputs(), registry)?;
		let outputs = register_all(transform.outputs(), registry)?;

		let environment_id = if transform.requires_environment() {
			Some(registry.only_environment_id()?.to_owned())
		} else {
			None
		};

		Ok(TransformProto {
			unique_name: transform.full_name().to_owned(),
			spec: transform.spec().cloned(),
			subtransforms,
			inputs,
			outputs,
			environment_id,
		})
	}
}

fn register_all(
	collections: &BTreeMap<String, Arc<Collection>>,
	registry: &mut ComponentRegistry,
) -> Result<BTreeMap<String, String>> {
	collections
		.iter()
		.map(|(tag, collection)| Ok((tag.clone(), registry.register_collection(collection)?)))
		.collect()
}
