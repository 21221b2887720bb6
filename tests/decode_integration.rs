//! End-to-end test: synthesize a clean FT8 transmission and confirm the
//! full pipeline (waterfall, sync, demod, LDPC, CRC, unpack, dedup)
//! recovers the exact text, per spec §8's "synthetic buffer encoded by a
//! reference encoder" scenario.

mod support;

use rustyft8::decoder::{decode_buffer, DecoderConfig};
use rustyft8::protocol::Protocol;

#[test]
fn recovers_a_standard_exchange_from_a_clean_synthetic_signal() {
    let protocol = Protocol::Ft8;
    let params = protocol.params();
    let sample_rate = 12000u32;
    let carrier_hz = 1000.0f32;

    let symbols = support::text_to_symbols("N0YPR K1JT DM42", protocol);
    let signal = support::synthesize(&symbols, carrier_hz, sample_rate, &params);

    let config = DecoderConfig {
        freq_min: 800.0,
        freq_max: 1200.0,
        min_score: -10_000,
        max_ldpc_iterations: 30,
    };

    let messages = decode_buffer(&signal, sample_rate, protocol, &config).unwrap();
    assert!(
        messages.iter().any(|m| m.text == "N0YPR K1JT DM42"),
        "expected to recover the exchange, got: {messages:?}"
    );
}

#[test]
fn recovers_free_text_from_a_clean_synthetic_signal() {
    let protocol = Protocol::Ft8;
    let params = protocol.params();
    let sample_rate = 12000u32;
    let carrier_hz = 700.0f32;

    let symbols = support::text_to_symbols("TNX FER 73 GL", protocol);
    let signal = support::synthesize(&symbols, carrier_hz, sample_rate, &params);

    let config = DecoderConfig {
        freq_min: 500.0,
        freq_max: 900.0,
        min_score: -10_000,
        max_ldpc_iterations: 30,
    };

    let messages = decode_buffer(&signal, sample_rate, protocol, &config).unwrap();
    assert!(
        messages.iter().any(|m| m.text == "TNX FER 73 GL"),
        "expected to recover the free-text message, got: {messages:?}"
    );
}

#[test]
fn duplicate_candidates_are_not_emitted_twice() {
    let protocol = Protocol::Ft8;
    let params = protocol.params();
    let sample_rate = 12000u32;
    let carrier_hz = 900.0f32;

    let symbols = support::text_to_symbols("N0YPR K1JT DM42", protocol);
    let signal = support::synthesize(&symbols, carrier_hz, sample_rate, &params);

    let config = DecoderConfig {
        freq_min: 700.0,
        freq_max: 1100.0,
        min_score: -10_000,
        max_ldpc_iterations: 30,
    };

    let messages = decode_buffer(&signal, sample_rate, protocol, &config).unwrap();
    let occurrences = messages.iter().filter(|m| m.text == "N0YPR K1JT DM42").count();
    assert_eq!(occurrences, 1, "a single transmission must dedup to one emitted message");
}

#[test]
fn recovers_a_report_exchange_from_an_ft4_signal() {
    let protocol = Protocol::Ft4;
    let params = protocol.params();
    let sample_rate = 12000u32;
    let carrier_hz = 1200.0f32;

    let symbols = support::text_to_symbols("W1AW K1ABC -05", protocol);
    let signal = support::synthesize(&symbols, carrier_hz, sample_rate, &params);

    let config = DecoderConfig {
        freq_min: 1000.0,
        freq_max: 1400.0,
        min_score: -10_000,
        max_ldpc_iterations: 30,
    };

    let messages = decode_buffer(&signal, sample_rate, protocol, &config).unwrap();
    assert!(
        messages.iter().any(|m| m.text == "W1AW K1ABC -05"),
        "expected to recover the FT4 exchange, got: {messages:?}"
    );
}

#[test]
fn recovers_two_overlapping_messages_sorted_by_frequency() {
    let protocol = Protocol::Ft8;
    let params = protocol.params();
    let sample_rate = 12000u32;

    let low_symbols = support::text_to_symbols("W1AW K1ABC -05", protocol);
    let low = support::synthesize(&low_symbols, 800.0, sample_rate, &params);

    let high_symbols = support::text_to_symbols("CQ K9XYZ EM69", protocol);
    let high = support::synthesize(&high_symbols, 2200.0, sample_rate, &params);

    let signal = support::mix(&low, &high);

    let config = DecoderConfig {
        freq_min: 600.0,
        freq_max: 2400.0,
        min_score: -10_000,
        max_ldpc_iterations: 30,
    };

    let messages = decode_buffer(&signal, sample_rate, protocol, &config).unwrap();
    assert!(
        messages.iter().any(|m| m.text == "W1AW K1ABC -05"),
        "expected the 800 Hz exchange, got: {messages:?}"
    );
    assert!(
        messages.iter().any(|m| m.text == "CQ K9XYZ EM69"),
        "expected the 2200 Hz CQ, got: {messages:?}"
    );
    for pair in messages.windows(2) {
        assert!(pair[0].freq_hz <= pair[1].freq_hz, "messages must be emitted in non-decreasing frequency order");
    }
}

#[test]
fn recovers_a_message_through_light_noise() {
    let protocol = Protocol::Ft8;
    let params = protocol.params();
    let sample_rate = 12000u32;
    let carrier_hz = 1500.0f32;

    let symbols = support::text_to_symbols("CQ K1ABC FN42", protocol);
    let signal = support::synthesize_with_noise(&symbols, carrier_hz, sample_rate, &params, 20.0, 42);

    let config = DecoderConfig {
        freq_min: 1300.0,
        freq_max: 1700.0,
        min_score: -10_000,
        max_ldpc_iterations: 30,
    };

    let messages = decode_buffer(&signal, sample_rate, protocol, &config).unwrap();
    assert!(
        messages.iter().any(|m| m.text == "CQ K1ABC FN42"),
        "expected to recover the message through light noise, got: {messages:?}"
    );
}

#[test]
fn heavy_noise_does_not_falsely_decode_and_does_not_panic() {
    let protocol = Protocol::Ft8;
    let sample_rate = 12000u32;
    let num_samples = (Protocol::Ft8.params().slot_time * sample_rate as f32) as usize;
    let mut signal = vec![0.0f32; num_samples];
    support::add_noise(&mut signal, -10.0, 7);

    let config = DecoderConfig {
        min_score: 10,
        ..DecoderConfig::default()
    };

    let messages = decode_buffer(&signal, sample_rate, protocol, &config).unwrap();
    assert!(messages.is_empty(), "pure noise should not yield decoded messages, got: {messages:?}");
}

#[test]
fn time_offset_is_recovered_within_tolerance_for_a_late_start() {
    let protocol = Protocol::Ft8;
    let params = protocol.params();
    let sample_rate = 12000u32;
    let carrier_hz = 1100.0f32;
    let late_seconds = 0.4f32;

    let symbols = support::text_to_symbols("CQ K1ABC FN42", protocol);
    let tone_signal = support::synthesize(&symbols, carrier_hz, sample_rate, &params);

    let pad_samples = (late_seconds * sample_rate as f32) as usize;
    let mut signal = vec![0.0f32; pad_samples];
    signal.extend_from_slice(&tone_signal);
    signal.truncate((params.slot_time * sample_rate as f32) as usize);

    let config = DecoderConfig {
        freq_min: 900.0,
        freq_max: 1300.0,
        min_score: -10_000,
        max_ldpc_iterations: 30,
    };

    let messages = decode_buffer(&signal, sample_rate, protocol, &config).unwrap();
    let found = messages
        .iter()
        .find(|m| m.text == "CQ K1ABC FN42")
        .unwrap_or_else(|| panic!("expected to recover the message, got: {messages:?}"));
    assert!(
        (found.time_sec - late_seconds).abs() <= 0.08,
        "expected time offset within 0.08s of {late_seconds}, got {}",
        found.time_sec
    );
}
