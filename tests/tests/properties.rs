use std::collections::HashSet;

use anchor_event_decoder::{
    decode_events, decode_structs, Cursor, DecodeError, Discriminator, Schema, SchemaRegistry,
    EVENT_IX_TAG,
};
use anchor_event_decoder_tests::{anchor_discriminator, PayloadBuilder};
use proptest::prelude::*;

fn decode_amount(cursor: &mut Cursor<'_>) -> Result<u64, DecodeError> {
    cursor.read_u64()
}

fn schemas() -> Vec<Schema<u64>> {
    ["deposit", "withdraw", "swap", "initialize"]
        .into_iter()
        .map(|name| Schema::instruction(name, name, decode_amount))
        .collect()
}

#[test]
fn test_known_discriminators() {
    assert_eq!(
        Discriminator::event("SwapEvent").to_bytes(),
        [64, 198, 205, 232, 38, 8, 113, 226]
    );
    assert_eq!(Discriminator::event("SwapEvent").to_base58(), "BqR1a47j945");
    assert_eq!(
        Discriminator::instruction("swap").to_bytes(),
        [248, 198, 158, 145, 225, 117, 135, 200]
    );
    assert_eq!(Discriminator::event("Swap").to_string(), "EcvpSC8svwu");
}

#[test]
fn test_discriminators_distinct_over_sample() {
    let mut seen = HashSet::new();
    for i in 0..10_000 {
        assert!(seen.insert(Discriminator::instruction(&format!("ix_{i}"))));
        assert!(seen.insert(Discriminator::event(&format!("Event{i}"))));
    }
    assert_eq!(seen.len(), 20_000);
}

#[test]
fn test_u128_full_width() {
    let bytes: Vec<u8> = (0..16).collect();
    let mut cursor = Cursor::new(&bytes);
    assert_eq!(
        cursor.read_u128().unwrap(),
        20_011_376_718_272_490_338_853_433_276_725_592_320
    );
    assert!(cursor.is_empty());
}

proptest! {
    #[test]
    fn test_read_u32_matches_le(bytes in any::<[u8; 4]>(), tail in proptest::collection::vec(any::<u8>(), 0..8)) {
        let mut data = bytes.to_vec();
        data.extend_from_slice(&tail);
        let mut cursor = Cursor::new(&data);
        prop_assert_eq!(cursor.read_u32().unwrap(), u32::from_le_bytes(bytes));
        prop_assert_eq!(cursor.offset(), 4);
        prop_assert_eq!(cursor.remaining(), tail.len());
    }

    #[test]
    fn test_read_u64_matches_le(value in any::<u64>()) {
        let data = value.to_le_bytes();
        prop_assert_eq!(Cursor::new(&data).read_u64().unwrap(), value);
    }

    #[test]
    fn test_read_i32_matches_le(value in any::<i32>()) {
        let data = value.to_le_bytes();
        prop_assert_eq!(Cursor::new(&data).read_i32().unwrap(), value);
    }

    #[test]
    fn test_bool_is_nonzero(byte in any::<u8>()) {
        let data = [byte];
        prop_assert_eq!(Cursor::new(&data).read_bool().unwrap(), byte != 0);
    }

    #[test]
    fn test_string_advances_past_text(prefix in proptest::collection::vec(any::<u8>(), 0..16), text in ".{0,40}") {
        let mut data = prefix.clone();
        data.extend(PayloadBuilder::new().string(&text).build());
        let mut cursor = Cursor::new(&data);
        cursor.skip(prefix.len()).unwrap();
        prop_assert_eq!(cursor.read_string().unwrap(), text.clone());
        prop_assert_eq!(cursor.offset(), prefix.len() + 4 + text.len());
        prop_assert!(cursor.is_empty());
    }

    #[test]
    fn test_short_read_does_not_advance(data in proptest::collection::vec(any::<u8>(), 0..8)) {
        let mut cursor = Cursor::new(&data);
        let err = cursor.read_u64().unwrap_err();
        prop_assert_eq!(err, DecodeError::OutOfBounds { offset: 0, needed: 8, len: data.len() });
        prop_assert_eq!(cursor.offset(), 0);
    }

    #[test]
    fn test_discriminator_matches_reference_hash(name in "[A-Za-z_][A-Za-z0-9_]{0,31}") {
        prop_assert_eq!(
            Discriminator::instruction(&name).to_bytes(),
            anchor_discriminator("global", &name)
        );
        prop_assert_eq!(
            Discriminator::event(&name).to_bytes(),
            anchor_discriminator("event", &name)
        );
        prop_assert_eq!(Discriminator::event(&name), Discriminator::event(&name));
    }

    #[test]
    fn test_discriminator_base58_round_trip(bytes in any::<[u8; 8]>()) {
        let disc = Discriminator::from(bytes);
        let parsed: Discriminator = disc.to_base58().parse().unwrap();
        prop_assert_eq!(parsed, disc);
    }

    #[test]
    fn test_unknown_prefix_is_no_match(data in proptest::collection::vec(any::<u8>(), 0..64)) {
        let registry = SchemaRegistry::new(schemas()).unwrap();
        let matches = Discriminator::extract(&data).is_some_and(|d| registry.get(&d).is_some());
        prop_assume!(!matches);
        prop_assert_eq!(registry.dispatch(&data).unwrap(), None);
    }

    #[test]
    fn test_dispatch_reads_after_discriminator(
        index in 0usize..4,
        amount in any::<u64>(),
        trailing in proptest::collection::vec(any::<u8>(), 0..16),
    ) {
        let schemas = schemas();
        let schema = schemas[index];
        let data = PayloadBuilder::new()
            .discriminator(schema.discriminator)
            .u64(amount)
            .raw(&trailing)
            .build();
        let record = decode_structs(&schemas, &data).unwrap().unwrap();
        prop_assert_eq!(record.name, schema.name);
        prop_assert_eq!(record.data, amount);

        let mut event_data = EVENT_IX_TAG.to_vec();
        event_data.extend_from_slice(&data);
        let record = decode_events(&schemas, &event_data).unwrap().unwrap();
        prop_assert_eq!(record.data, amount);
    }

    #[test]
    fn test_event_tag_is_not_checked(tag in any::<[u8; 8]>(), amount in any::<u64>()) {
        let data = PayloadBuilder::new()
            .raw(&tag)
            .discriminator(Discriminator::instruction("swap"))
            .u64(amount)
            .build();
        let record = decode_events(&schemas(), &data).unwrap().unwrap();
        prop_assert_eq!(record.name, "swap");
    }
}
