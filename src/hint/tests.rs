//! Unit and generated tests for the PDU size hints.

use proptest::{
    collection::vec,
    prelude::{Just, Strategy, any, prop_oneof},
    prop_assert_eq,
    test_runner::{Config as ProptestConfig, RngAlgorithm, TestCaseError, TestRng, TestRunner},
};
use rstest::rstest;

use super::*;
use crate::frame::{Endianness, LengthFormat};

fn deterministic_runner(cases: u32) -> TestRunner {
    let config = ProptestConfig {
        cases,
        ..ProptestConfig::default()
    };
    TestRunner::new_with_rng(config, TestRng::deterministic_rng(RngAlgorithm::ChaCha))
}

fn all_hints() -> Vec<Box<dyn PduHint>> {
    vec![
        Box::new(TpktHint::new()),
        Box::new(FastPathHint::new()),
        Box::new(RdpHint::new()),
        Box::new(RailOrderHint::new()),
        Box::new(LengthPrefixedHint::new(LengthFormat::u16_be())),
        Box::new(LengthPrefixedHint::new(LengthFormat::new(8, Endianness::Little))),
    ]
}

#[test]
fn empty_buffer_is_incomplete_for_every_hint() {
    for hint in all_hints() {
        assert_eq!(
            hint.find_size(&[]),
            Ok(PduHintOutcome::Incomplete),
            "{hint:?}"
        );
    }
}

#[test]
fn tpkt_header_yields_total_length() {
    let hint = TpktHint::new();
    assert_eq!(
        hint.find_size(&[0x03, 0x00, 0x00, 0x2a]),
        Ok(PduHintOutcome::Complete(42))
    );
}

#[test]
fn tpkt_rejects_corrupted_version() {
    let hint = TpktHint::new();
    assert_eq!(
        hint.find_size(&[0x07, 0x00, 0x00, 0x2a]),
        Err(FramingError::InvalidHeader {
            found: 0x07,
            expected: "TPKT version 3",
        })
    );
}

#[rstest]
#[case::version_only(vec![0x07])]
#[case::three_bytes(vec![0x07, 0x00, 0x00])]
fn short_corrupted_tpkt_prefix_is_still_incomplete(#[case] bytes: Vec<u8>) {
    assert_eq!(TpktHint::new().find_size(&bytes), Ok(PduHintOutcome::Incomplete));
}

#[test]
fn tpkt_length_below_header_is_rejected() {
    assert_eq!(
        TpktHint::new().find_size(&[0x03, 0x00, 0x00, 0x03]),
        Err(FramingError::LengthTooShort { length: 3, min: 4 })
    );
}

#[test]
fn tpkt_honours_max_pdu_length() {
    let hint = TpktHint::new().with_max_pdu_length(100);
    assert_eq!(
        hint.find_size(&[0x03, 0x00, 0x01, 0x00]),
        Err(FramingError::OversizedPdu { size: 256, max: 100 })
    );
    assert_eq!(
        hint.find_size(&[0x03, 0x00, 0x00, 0x64]),
        Ok(PduHintOutcome::Complete(100))
    );
}

#[rstest]
#[case::short_form(vec![0x00, 0x2a], PduHintOutcome::Complete(42))]
#[case::long_form(vec![0x00, 0x81, 0x00], PduHintOutcome::Complete(256))]
#[case::long_form_pending(vec![0x00, 0x81], PduHintOutcome::Incomplete)]
#[case::single_byte(vec![0x00], PduHintOutcome::Incomplete)]
#[case::flags_in_high_bits(vec![0xc4, 0x10], PduHintOutcome::Complete(16))]
fn fast_path_lengths(#[case] bytes: Vec<u8>, #[case] expected: PduHintOutcome) {
    assert_eq!(FastPathHint::new().find_size(&bytes), Ok(expected));
}

#[test]
fn fast_path_rejects_non_fast_path_action() {
    assert!(matches!(
        FastPathHint::new().find_size(&[0x03, 0x00, 0x00, 0x10]),
        Err(FramingError::InvalidHeader { found: 0x03, .. })
    ));
}

#[rstest]
#[case::short(vec![0x00, 0x01])]
#[case::long(vec![0x00, 0x80, 0x02])]
fn fast_path_length_shorter_than_header_is_rejected(#[case] bytes: Vec<u8>) {
    assert!(matches!(
        FastPathHint::new().find_size(&bytes),
        Err(FramingError::LengthTooShort { .. })
    ));
}

#[rstest]
#[case::tpkt(vec![0x03, 0x00, 0x00, 0x2a], PduHintOutcome::Complete(42))]
#[case::tpkt_partial(vec![0x03, 0x00, 0x00], PduHintOutcome::Incomplete)]
#[case::fast_path(vec![0x00, 0x2a], PduHintOutcome::Complete(42))]
#[case::single_unknown_byte(vec![0x01], PduHintOutcome::Incomplete)]
fn rdp_hint_dispatches_on_action(#[case] bytes: Vec<u8>, #[case] expected: PduHintOutcome) {
    assert_eq!(RdpHint::new().find_size(&bytes), Ok(expected));
}

#[rstest]
#[case(0x01)]
#[case(0x02)]
#[case(0x07)]
fn rdp_hint_rejects_unknown_action(#[case] first: u8) {
    assert!(matches!(
        RdpHint::new().find_size(&[first, 0x00, 0x00, 0x2a]),
        Err(FramingError::InvalidHeader { found, .. }) if found == first
    ));
}

#[test]
fn rdp_hint_applies_limit_to_both_paths() {
    let hint = RdpHint::new().with_max_pdu_length(40);
    assert!(hint.find_size(&[0x03, 0x00, 0x00, 0x2a]).is_err());
    assert!(hint.find_size(&[0x00, 0x2a]).is_err());
}

#[test]
fn rail_order_length_includes_header() {
    let handshake = [0x05, 0x00, 0x08, 0x00, 0xb0, 0x1d, 0x00, 0x00];
    assert_eq!(
        RailOrderHint::new().find_size(&handshake),
        Ok(PduHintOutcome::Complete(8))
    );
}

#[test]
fn rail_accepts_unknown_order_types() {
    assert_eq!(
        RailOrderHint::new().find_size(&[0xff, 0x7f, 0x04, 0x00]),
        Ok(PduHintOutcome::Complete(4))
    );
}

#[test]
fn rail_rejects_length_shorter_than_header() {
    assert_eq!(
        RailOrderHint::new().find_size(&[0x05, 0x00, 0x02, 0x00]),
        Err(FramingError::LengthTooShort { length: 2, min: 4 })
    );
}

#[rstest]
#[case(0x0005, Some("HANDSHAKE"))]
#[case(0x0080, Some("EXEC_RESULT"))]
#[case(0x0007, None)]
fn rail_order_names(#[case] order_type: u16, #[case] expected: Option<&str>) {
    assert_eq!(rail_order_name(order_type), expected);
}

#[test]
fn length_prefixed_total_adds_prefix_width() {
    let hint = LengthPrefixedHint::new(LengthFormat::u32_le());
    assert_eq!(
        hint.find_size(&[0x26, 0x00, 0x00, 0x00]),
        Ok(PduHintOutcome::Complete(42))
    );
}

#[test]
fn length_prefixed_honours_max_pdu_length() {
    let hint = LengthPrefixedHint::new(LengthFormat::u16_be()).with_max_pdu_length(10);
    assert_eq!(
        hint.find_size(&[0x00, 0x09]),
        Err(FramingError::OversizedPdu { size: 11, max: 10 })
    );
}

#[test]
fn configured_limits_are_clamped() {
    let hint = LengthPrefixedHint::new(LengthFormat::new(8, Endianness::Big))
        .with_max_pdu_length(usize::MAX);
    let mut header = [0u8; 8];
    header[4] = 0x02;
    assert_eq!(
        hint.find_size(&header),
        Err(FramingError::OversizedPdu {
            size: 8 + 0x0200_0000,
            max: MAX_PDU_LENGTH,
        })
    );
}

#[test]
fn outcome_converts_to_optional_length() {
    assert_eq!(Option::<usize>::from(PduHintOutcome::Complete(7)), Some(7));
    assert_eq!(PduHintOutcome::from(None), PduHintOutcome::Incomplete);
    assert!(!PduHintOutcome::Incomplete.is_complete());
}

fn prefix_strategy() -> impl Strategy<Value = Vec<u8>> {
    prop_oneof![
        vec(any::<u8>(), 0..12),
        (any::<u16>(), vec(any::<u8>(), 0..8)).prop_map(|(len, tail)| {
            let mut bytes = vec![0x03, 0x00];
            bytes.extend_from_slice(&len.to_be_bytes());
            bytes.extend(tail);
            bytes
        }),
        (Just(0x00u8), any::<u8>(), vec(any::<u8>(), 0..8)).prop_map(|(first, len, tail)| {
            let mut bytes = vec![first, len];
            bytes.extend(tail);
            bytes
        }),
    ]
}

#[test]
fn generated_prefixes_evaluate_deterministically() {
    let mut runner = deterministic_runner(256);
    runner
        .run(&prefix_strategy(), |bytes| {
            for hint in all_hints() {
                prop_assert_eq!(hint.find_size(&bytes), hint.find_size(&bytes));
            }
            Ok(())
        })
        .expect("hints should be idempotent");
}

#[test]
fn generated_known_lengths_survive_appended_bytes() {
    let mut runner = deterministic_runner(256);
    let strategy = (prefix_strategy(), vec(any::<u8>(), 1..32));
    runner
        .run(&strategy, |(prefix, suffix)| {
            for hint in all_hints() {
                let Ok(PduHintOutcome::Complete(len)) = hint.find_size(&prefix) else {
                    continue;
                };
                let mut longer = prefix.clone();
                longer.extend_from_slice(&suffix);
                let outcome = hint
                    .find_size(&longer)
                    .map_err(|err| TestCaseError::fail(format!("{hint:?}: {err}")))?;
                prop_assert_eq!(outcome, PduHintOutcome::Complete(len));
            }
            Ok(())
        })
        .expect("known lengths should be monotonic");
}

#[test]
fn generated_short_prefixes_never_fail() {
    let mut runner = deterministic_runner(256);
    runner
        .run(&vec(any::<u8>(), 0..8), |bytes| {
            for hint in all_hints() {
                let short = &bytes[..bytes.len().min(hint.min_header_len() - 1)];
                prop_assert_eq!(hint.find_size(short), Ok(PduHintOutcome::Incomplete));
            }
            Ok(())
        })
        .expect("short prefixes should always need more bytes");
}
