use ctl_registry::debug::{ALLOC_PATTERN, LOG_LEVEL};
use ctl_registry::{DebugControls, OperationType, Registry, Response, load_str};

fn registry() -> (Registry, DebugControls) {
	let controls = DebugControls::new();
	let mut registry = Registry::default();
	controls.register(&mut registry).unwrap();
	(registry, controls)
}

fn read_pattern(registry: &mut Registry) -> Option<i64> {
	registry
		.execute(ALLOC_PATTERN, OperationType::ReadOnly)
		.and_then(|r| r.as_int())
}

#[test]
fn alloc_pattern_reads_and_writes_through_callbacks() {
	let (mut registry, controls) = registry();
	assert_eq!(read_pattern(&mut registry), Some(1));

	assert_eq!(
		registry.execute("debug.heap.alloc_pattern=2", OperationType::ReadWrite),
		Some(Response::Payload(Some("2".into())))
	);
	assert_eq!(read_pattern(&mut registry), Some(2));
	assert_eq!(controls.alloc_pattern(), 2);

	registry.execute("debug.heap.alloc_pattern=0", OperationType::ReadWrite);
	assert_eq!(read_pattern(&mut registry), Some(0));
}

#[test]
fn unknown_and_invalid_paths_return_nothing() {
	let (mut registry, _) = registry();
	assert_eq!(registry.execute("debug.heap.non_existent", OperationType::ReadOnly), None);
	assert_eq!(registry.execute("invalid.path.alloc_pattern", OperationType::ReadOnly), None);
	assert_eq!(registry.execute("nonexistent.path", OperationType::ReadOnly), None);
	assert_eq!(registry.execute(".debug.heap.alloc_pattern", OperationType::ReadOnly), None);
}

#[test]
fn config_text_drives_debug_options() {
	let (mut registry, controls) = registry();
	let report = load_str(
		&mut registry,
		"debug.heap.alloc_pattern=321;\ndebug.log.level=5;\nctl.log.enable=1;\n",
	);
	assert!(report.is_clean());
	assert_eq!(controls.alloc_pattern(), 321);
	assert_eq!(registry.read_int(LOG_LEVEL), Some(5));

	let mut out = Vec::new();
	registry.write_dump(&mut out).unwrap();
	let out = String::from_utf8(out).unwrap();
	assert!(out.contains("Path: debug.heap.alloc_pattern, Type: exec, Value: callback"));
	assert!(out.contains("Path: debug.log.level, Type: int, Value: 5"));
}
