#![allow(dead_code)]

use std::sync::Once;

use tracing_subscriber::EnvFilter;

/// Installs a tracing subscriber for tests, filtered by the `TEST_LOG` environment variable.
pub fn init_tracing() {
  static INIT: Once = Once::new();
  INIT.call_once(|| {
    let _ = tracing_subscriber::fmt()
      .with_env_filter(EnvFilter::try_from_env("TEST_LOG").unwrap_or_default())
      .with_test_writer()
      .try_init(); // Ignore error ok: another test harness may already have installed a subscriber.
  });
}

/// Runs `f`, expecting it to panic with a payload of type `P`.
pub fn panic_payload<P: 'static, R>(f: impl FnOnce() -> R) -> P {
  let payload = std::panic::catch_unwind(std::panic::AssertUnwindSafe(f)).err().expect("expected a panic");
  match payload.downcast::<P>() {
    Ok(payload) => *payload,
    Err(_) => panic!("unexpected panic payload type, expected {}", std::any::type_name::<P>()),
  }
}
