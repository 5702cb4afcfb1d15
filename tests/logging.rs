//! Log records emitted through the `tracing` log bridge.

use rdpframe::{HintConfig, HintFactoryHandle, WireFormat};
use rdpframe_testing::{LoggerHandle, ResourceCounters, logger};
use rstest::rstest;

#[rstest]
fn destruction_is_logged_once_per_handle(mut logger: LoggerHandle) {
    let counters = ResourceCounters::new();
    let mut handle = counters.handle();
    handle.dispose();
    drop(handle);

    let destroyed: Vec<String> = logger
        .messages()
        .into_iter()
        .filter(|msg| msg.contains("native handle destroyed") && msg.contains("CountingResource"))
        .collect();
    assert_eq!(destroyed.len(), 1, "{destroyed:?}");
    assert!(destroyed[0].contains("dispose"), "{destroyed:?}");
}

#[rstest]
fn factory_and_product_log_their_own_type(mut logger: LoggerHandle) {
    let factory = HintFactoryHandle::new(&HintConfig::new(WireFormat::Rdp))
        .expect("valid configuration");
    let hint = factory.build_pdu_hint().expect("factory is live");
    drop(factory);
    drop(hint);

    let messages = logger.messages();
    for type_name in ["HintFactory", "PduHint"] {
        assert!(
            messages
                .iter()
                .any(|msg| msg.contains("native handle destroyed") && msg.contains(type_name)),
            "no destruction record for {type_name} in {messages:?}"
        );
    }
}
