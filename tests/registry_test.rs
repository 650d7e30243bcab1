use std::sync::Arc;

use anyhow::Result;
use hashify::{bootstrap_all, register, registered, reset, SerializerVariant};
use serde_json::json;

// The registry is process-global, so the whole lifecycle runs in one
// sequential test; this file is its own binary and therefore its own
// process.
#[test]
fn test_registry_lifecycle() -> Result<()> {
    let _ = env_logger::builder().is_test(true).try_init();

    // Fresh process: nothing has ever been registered.
    assert!(registered().is_none());
    assert!(bootstrap_all().is_none());

    let variant = SerializerVariant::declare("LifecycleSerializer")
        .attributes(["first_name"])
        .build();
    let subject = json!({"first_name": "Dave"});

    // Declared but not yet compiled: serialization refuses to run.
    let err = variant.serialize(&subject)?.to_map().unwrap_err();
    assert!(err.to_string().contains("bootstrap_all"));

    // Registration happened at build time and repeated registration is a
    // no-op.
    register(&variant);
    register(&variant);
    let listed = registered().expect("registry is initialized");
    assert_eq!(
        listed.iter().filter(|v| Arc::ptr_eq(v, &variant)).count(),
        1
    );

    // Registration order is preserved.
    let second = SerializerVariant::declare("SecondSerializer")
        .attributes(["id"])
        .build();
    let listed = registered().expect("registry is initialized");
    let first_pos = listed
        .iter()
        .position(|v| Arc::ptr_eq(v, &variant))
        .expect("first variant listed");
    let second_pos = listed
        .iter()
        .position(|v| Arc::ptr_eq(v, &second))
        .expect("second variant listed");
    assert!(first_pos < second_pos);

    // Bootstrap compiles every variant; running it again replaces the
    // extractors and yields byte-identical output.
    assert_eq!(bootstrap_all(), Some(2));
    let before = variant.serialize(&subject)?.to_json()?;
    assert_eq!(bootstrap_all(), Some(2));
    let after = variant.serialize(&subject)?.to_json()?;
    assert_eq!(before, after);
    assert_eq!(before, "{\"first_name\":\"Dave\"}");

    // Reset restores the never-initialized state.
    reset();
    assert!(registered().is_none());
    assert!(bootstrap_all().is_none());

    Ok(())
}
