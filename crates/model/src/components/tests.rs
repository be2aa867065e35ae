use pretty_assertions::assert_eq;

use super::*;

fn sample() -> Components {
	let mut components = Components::new();
	components.coders.insert("VarIntCoder".into(), CoderProto {
		spec: FunctionSpec::new("sluice:coder:varint:v1"),
		component_coder_ids: Vec::new(),
	});
	components.collections.insert("numbers".into(), CollectionProto {
		unique_name: "numbers".into(),
		coder_id: "VarIntCoder".into(),
		windowing_strategy_id: "WindowingStrategy(GlobalWindows)".into(),
		is_bounded: Boundedness::Bounded,
	});
	components
		.environments
		.insert("docker".into(), Environment::new("docker", b"image".to_vec()));
	components
}

#[test]
fn all_ids_spans_every_kind() {
	let components = sample();
	let mut ids: Vec<_> = components.all_ids().collect();
	ids.sort_unstable();
	assert_eq!(ids, ["VarIntCoder", "docker", "numbers"]);
	assert_eq!(components.len(), 3);
	assert!(!components.is_empty());
}

#[test]
fn merge_overwrites_same_ids_and_keeps_the_rest() {
	let mut base = sample();
	let mut incoming = Components::new();
	incoming
		.environments
		.insert("docker".into(), Environment::new("docker", b"other".to_vec()));
	incoming
		.environments
		.insert("process".into(), Environment::new("process", Vec::new()));

	base.merge(incoming);

	assert_eq!(base.environments["docker"].payload, b"other".to_vec());
	assert!(base.environments.contains_key("process"));
	assert!(base.coders.contains_key("VarIntCoder"));
}

/// Serialized output is reproducible: equal components encode to equal bytes.
#[test]
fn encoding_is_deterministic() {
	let a = sample();
	let b = sample();
	assert_eq!(a.to_bytes().unwrap(), b.to_bytes().unwrap());
	assert_eq!(a.to_json().unwrap(), b.to_json().unwrap());
}

#[test]
fn json_and_binary_decode_to_the_same_value() {
	let components = sample();
	let from_json = Components::from_json(&components.to_json().unwrap()).unwrap();
	let from_bytes = Components::from_bytes(&components.to_bytes().unwrap()).unwrap();
	assert_eq!(from_json, components);
	assert_eq!(from_bytes, components);
}

#[test]
fn missing_maps_default_to_empty() {
	let components = Components::from_json(r#"{ "coders": {} }"#).unwrap();
	assert!(components.is_empty());
}
