use std::sync::Arc;

use sluice_model::{Collection, CollectionProto};

use super::{CollectionTranslator, StandardTranslator};
use crate::error::Result;
use crate::registry::ComponentRegistry;

impl CollectionTranslator for StandardTranslator {
	fn translate(&self, collection: &Arc<Collection>, registry: &mut ComponentRegistry) -> Result<CollectionProto> {
		let coder_id = registry.register_coder(collection.coder())?;
		let windowing_strategy_id = registry.register_windowing_strategy(collection.windowing_strategy())?;
		Ok(CollectionProto {
			unique_name: collection.name().to_owned(),
			coder_id,
			windowing_strategy_id,
			is_bounded: collection.boundedness(),
		})
	}
}
