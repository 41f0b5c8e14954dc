//! `getTransaction` responses in `jsonParsed` encoding.
//!
//! Only the parts needed to find candidate instructions are modelled; other
//! fields are ignored. Fetching and caching responses is left to the caller.

use std::borrow::Cow;

use serde::Deserialize;
use solana_pubkey::Pubkey;
use solana_signature::Signature;

use crate::{
    config::DecoderConfig,
    error::{InstructionError, TransactionError},
    transaction::{CandidateInstruction, ProgramDecoder, TransactionRecords},
};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RpcTransaction {
    #[serde(default)]
    pub slot: Option<u64>,
    #[serde(default)]
    pub block_time: Option<i64>,
    pub transaction: RpcTransactionBody,
    #[serde(default)]
    pub meta: Option<RpcTransactionMeta>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RpcTransactionBody {
    #[serde(default)]
    pub signatures: Vec<String>,
    pub message: RpcMessage,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RpcMessage {
    #[serde(default)]
    pub instructions: Vec<RpcInstruction>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RpcTransactionMeta {
    #[serde(default)]
    pub err: Option<serde_json::Value>,
    #[serde(default)]
    pub inner_instructions: Option<Vec<RpcInnerInstructions>>,
}

/// Inner (CPI) instructions of the outer instruction at `index`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RpcInnerInstructions {
    pub index: usize,
    #[serde(default)]
    pub instructions: Vec<RpcInstruction>,
}

/// Either a partially decoded instruction (`data` set, base58) or one the
/// node parsed itself (`parsed` set, no `data`).
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RpcInstruction {
    pub program_id: String,
    #[serde(default)]
    pub data: Option<String>,
    #[serde(default)]
    pub accounts: Vec<String>,
    #[serde(default)]
    pub stack_height: Option<u32>,
    #[serde(default)]
    pub program: Option<String>,
    #[serde(default)]
    pub parsed: Option<serde_json::Value>,
}

impl CandidateInstruction for RpcInstruction {
    fn program_id(&self) -> Option<Pubkey> {
        decode_base58_array(&self.program_id).map(Pubkey::new_from_array)
    }

    fn data(&self) -> Result<Option<Cow<'_, [u8]>>, InstructionError> {
        let Some(data) = self.data.as_deref() else {
            return Ok(None);
        };
        bs58::decode(data)
            .into_vec()
            .map(|bytes| Some(Cow::Owned(bytes)))
            .map_err(|err| InstructionError::InvalidBase58(err.to_string()))
    }
}

impl RpcTransaction {
    pub fn from_json(json: &str) -> Result<Self, TransactionError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_value(value: serde_json::Value) -> Result<Self, TransactionError> {
        Ok(serde_json::from_value(value)?)
    }

    /// First signature of the transaction, which identifies it.
    pub fn signature(&self) -> Result<Option<Signature>, TransactionError> {
        self.transaction
            .signatures
            .first()
            .map(|s| {
                decode_base58_array(s)
                    .map(Signature::from)
                    .ok_or_else(|| TransactionError::InvalidSignature(s.clone()))
            })
            .transpose()
    }

    pub fn inner_instructions(&self) -> &[RpcInnerInstructions] {
        self.meta
            .as_ref()
            .and_then(|meta| meta.inner_instructions.as_deref())
            .unwrap_or_default()
    }

    /// Candidate instructions in execution order. Inner instructions always;
    /// each outer instruction ahead of its inner ones when
    /// `include_outer` is set.
    pub fn candidates(&self, include_outer: bool) -> Vec<&RpcInstruction> {
        let inner = self.inner_instructions();
        if !include_outer {
            return inner.iter().flat_map(|group| &group.instructions).collect();
        }

        let mut out = Vec::new();
        for (index, outer) in self.transaction.message.instructions.iter().enumerate() {
            out.push(outer);
            out.extend(
                inner
                    .iter()
                    .filter(|group| group.index == index)
                    .flat_map(|group| &group.instructions),
            );
        }
        out
    }
}

fn decode_base58_array<const N: usize>(s: &str) -> Option<[u8; N]> {
    let mut out = [0u8; N];
    match bs58::decode(s).onto(&mut out[..]) {
        Ok(len) if len == N => Some(out),
        _ => None,
    }
}

impl<T> ProgramDecoder<T> {
    /// Decode every candidate of an RPC transaction addressed to this program.
    pub fn decode_rpc_transaction(
        &self,
        tx: &RpcTransaction,
        config: &DecoderConfig,
    ) -> TransactionRecords<T> {
        self.decode_candidates(tx.candidates(config.include_outer_instructions), config)
    }
}
