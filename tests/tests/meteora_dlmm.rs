use anchor_event_decoder::{
    programs::meteora_dlmm::{self, MeteoraDlmmRecord, SwapEvent, SwapInstruction},
    DecodeError, DecoderConfig, DispatchError, DispatchPriority, InstructionError, ItemFailure,
    ProgramDecoder, RecordKind, TransactionSnapshot,
};
use anchor_event_decoder_tests::{
    parse_rpc_transaction, pk, rpc_instruction, rpc_parsed_instruction, rpc_transaction,
    PayloadBuilder, ZERO_SIGNATURE,
};
use serde_json::Value;

const METEORA: &str = "LBUZKhRxPF3XUpBCjp4YzTKgLccjZhTSDM9YuVaPwxo";
const COMPUTE_BUDGET: &str = "ComputeBudget111111111111111111111111111111";
const TOKEN_PROGRAM: &str = "TokenkegQfeZyiNwAJbNbGKPFXCWuBvf9Ss623VQ5DA";
const LB_PAIR: &str = "EgSDeuHbP1AUF9Artd2qfquevKFdpkPTrnSFcPoXTf78";
const TRADER: &str = "9nnLbotNTcUhvbrsA6Mdkx45Sm82G35zo28AqUvjExn8";

fn swap_ix_data() -> Vec<u8> {
    PayloadBuilder::instruction("swap")
        .u64(44_765_283)
        .u64(0)
        .build()
}

fn swap_event_builder() -> PayloadBuilder {
    PayloadBuilder::event_cpi("Swap")
        .pubkey(LB_PAIR)
        .pubkey(TRADER)
        .i32(3039)
        .i32(3039)
        .u64(44_765_283)
        .u64(933_267_444)
        .bool(true)
        .u64(9964)
        .u64(0)
        .u128(222_563)
        .u64(0)
}

fn expected_event() -> SwapEvent {
    SwapEvent {
        lb_pair: pk(LB_PAIR),
        from: pk(TRADER),
        start_bin_id: 3039,
        end_bin_id: 3039,
        amount_in: 44_765_283,
        amount_out: 933_267_444,
        swap_for_y: true,
        fee: 9964,
        protocol_fee: 0,
        fee_bps: 222_563,
        host_fee: 0,
    }
}

/// Compute budget, then the swap; the swap's CPIs are two token transfers
/// and the event self-CPI.
fn swap_transaction(event: Vec<u8>) -> Value {
    rpc_transaction(
        ZERO_SIGNATURE,
        vec![
            rpc_instruction(COMPUTE_BUDGET, &[2, 0x40, 0x0d, 0x03, 0x00], 1),
            rpc_instruction(METEORA, &swap_ix_data(), 1),
        ],
        vec![
            vec![],
            vec![
                rpc_parsed_instruction("spl-token", TOKEN_PROGRAM),
                rpc_parsed_instruction("spl-token", TOKEN_PROGRAM),
                rpc_instruction(METEORA, &event, 2),
            ],
        ],
    )
}

fn decoder() -> ProgramDecoder<MeteoraDlmmRecord> {
    ProgramDecoder::new(meteora_dlmm::schemas()).unwrap()
}

#[test]
fn test_event_payload_size() {
    // tag + discriminator + 2 keys + 2 i32 + 2 u64 + bool + 2 u64 + u128 + u64
    assert_eq!(swap_event_builder().len(), 8 + 8 + 64 + 8 + 16 + 1 + 16 + 16 + 8);
}

#[test]
fn test_inner_event_only_by_default() {
    let tx = parse_rpc_transaction(swap_transaction(swap_event_builder().build()));
    let out = decoder().decode_rpc_transaction(&tx, &DecoderConfig::default());

    assert!(out.failures.is_empty());
    assert_eq!(out.records.len(), 1);
    let record = &out.records[0];
    assert_eq!(record.index, 2);
    assert_eq!(record.kind, RecordKind::Event);
    assert_eq!(record.name(), "SwapEvent");
    assert_eq!(record.data(), &MeteoraDlmmRecord::SwapEvent(expected_event()));
}

#[test]
fn test_outer_instruction_included() {
    let tx = parse_rpc_transaction(swap_transaction(swap_event_builder().build()));
    let config = DecoderConfig::default().with_outer_instructions(true);
    let out = decoder().decode_rpc_transaction(&tx, &config);

    assert!(out.failures.is_empty());
    let names: Vec<_> = out.records.iter().map(|r| (r.index, r.name())).collect();
    assert_eq!(names, vec![(1, "SwapInstruction"), (4, "SwapEvent")]);
    assert_eq!(
        out.instructions().next().map(|r| r.data()),
        Some(&MeteoraDlmmRecord::SwapInstruction(SwapInstruction {
            amount_in: 44_765_283,
            min_amount_out: 0,
        }))
    );
    assert_eq!(out.events().count(), 1);
}

#[test]
fn test_priority_does_not_change_unambiguous_payloads() {
    let tx = parse_rpc_transaction(swap_transaction(swap_event_builder().build()));
    let config = DecoderConfig::default()
        .with_outer_instructions(true)
        .with_priority(DispatchPriority::EventsFirst);
    let out = decoder().decode_rpc_transaction(&tx, &config);
    assert_eq!(out.records.len(), 2);
    assert_eq!(out.records[0].kind, RecordKind::Instruction);
    assert_eq!(out.records[1].kind, RecordKind::Event);
}

#[test]
fn test_any_nonzero_byte_is_true() {
    let mut event = swap_event_builder().build();
    // swap_for_y sits after tag, discriminator, two keys, two i32 and two u64.
    let flag = 8 + 8 + 64 + 8 + 16;
    assert_eq!(event[flag], 1);
    event[flag] = 0x7f;

    let tx = parse_rpc_transaction(swap_transaction(event));
    let out = decoder().decode_rpc_transaction(&tx, &DecoderConfig::default());
    match out.records[0].data() {
        MeteoraDlmmRecord::SwapEvent(ev) => assert!(ev.swap_for_y),
        other => panic!("unexpected record {other:?}"),
    }
}

#[test]
fn test_truncated_event_is_reported() {
    let mut event = swap_event_builder().build();
    event.truncate(event.len() - 3);

    let tx = parse_rpc_transaction(swap_transaction(event));
    let config = DecoderConfig::default()
        .with_outer_instructions(true)
        .with_log_failures(false);
    let out = decoder().decode_rpc_transaction(&tx, &config);

    assert_eq!(out.records.len(), 1);
    assert_eq!(out.records[0].name(), "SwapInstruction");
    assert_eq!(out.failures.len(), 1);
    let failure = &out.failures[0];
    assert_eq!(failure.index, 4);
    assert_eq!(failure.kind, Some(RecordKind::Event));
    match &failure.error {
        InstructionError::Dispatch(DispatchError::Decode { schema, source }) => {
            assert_eq!(*schema, "SwapEvent");
            assert_eq!(
                *source,
                DecodeError::OutOfBounds {
                    offset: 121,
                    needed: 8,
                    len: 126
                }
            );
        }
        other => panic!("unexpected error {other:?}"),
    }
}

#[test]
fn test_invalid_base58_is_reported() {
    let mut value = swap_transaction(swap_event_builder().build());
    value["meta"]["innerInstructions"][0]["instructions"][2]["data"] = "0OIl".into();

    let tx = parse_rpc_transaction(value);
    let out = decoder().decode_rpc_transaction(&tx, &DecoderConfig::default());
    assert!(out.records.is_empty());
    assert!(matches!(
        out.failures.as_slice(),
        [ItemFailure {
            index: 2,
            kind: None,
            error: InstructionError::InvalidBase58(_),
        }]
    ));
}

#[test]
fn test_snapshot() {
    let tx = parse_rpc_transaction(swap_transaction(swap_event_builder().build()));
    let decoder = decoder();
    let out = decoder.decode_rpc_transaction(&tx, &DecoderConfig::default());
    let signature = tx.signature().unwrap().map(|s| s.to_string());
    let snapshot = TransactionSnapshot::new(decoder.program_name(), signature, &out);

    insta::assert_json_snapshot!(snapshot, @r#"
    {
      "program": "Meteora DLMM",
      "signature": "1111111111111111111111111111111111111111111111111111111111111111",
      "records": [
        {
          "index": 2,
          "kind": "event",
          "name": "SwapEvent",
          "fields": [
            {
              "name": "lb_pair",
              "value": "EgSDeuHbP1AUF9Artd2qfquevKFdpkPTrnSFcPoXTf78"
            },
            {
              "name": "from",
              "value": "9nnLbotNTcUhvbrsA6Mdkx45Sm82G35zo28AqUvjExn8"
            },
            {
              "name": "bins",
              "value": "",
              "children": [
                {
                  "name": "start_bin_id",
                  "value": "3039"
                },
                {
                  "name": "end_bin_id",
                  "value": "3039"
                }
              ]
            },
            {
              "name": "amount_in",
              "value": "44765283"
            },
            {
              "name": "amount_out",
              "value": "933267444"
            },
            {
              "name": "swap_for_y",
              "value": "true"
            },
            {
              "name": "fees",
              "value": "",
              "children": [
                {
                  "name": "fee",
                  "value": "9964"
                },
                {
                  "name": "protocol_fee",
                  "value": "0"
                },
                {
                  "name": "fee_bps",
                  "value": "222563"
                },
                {
                  "name": "host_fee",
                  "value": "0"
                }
              ]
            }
          ]
        }
      ]
    }
    "#);
}
