//! Request and response shapes for the Koios endpoints the viewer uses
//!
//! Field names mirror the Koios JSON exactly; everything the indexer marks
//! nullable is an `Option`.

use cborview_scriptref::{bytestring, wrap_script_ref_hex, ScriptKind};
use serde::{Deserialize, Serialize};

use crate::Error;

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct UtxoInfoRequest {
    #[serde(rename = "_utxo_refs")]
    pub utxo_refs: Vec<String>,
    #[serde(rename = "_extended")]
    pub extended: bool,
}

impl UtxoInfoRequest {
    /// Extended lookup for `tx_hash:index` references
    pub fn new(utxo_refs: Vec<String>) -> Self {
        UtxoInfoRequest {
            utxo_refs,
            extended: true,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct InlineDatum {
    pub bytes: String,
    pub value: serde_json::Value,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ReferenceScript {
    pub hash: String,
    pub size: u64,
    #[serde(rename = "type")]
    pub script_type: String,
    pub bytes: String,
    pub value: Option<serde_json::Value>,
}

impl ReferenceScript {
    /// Script kind derived from the indexer's type label
    pub fn kind(&self) -> ScriptKind {
        ScriptKind::from_label(&self.script_type)
    }

    /// Library-ready ScriptRef envelope for these script bytes
    ///
    /// Plutus payloads get the CBOR byte-string head applied before
    /// wrapping; native scripts wrap as raw script CBOR.
    pub fn envelope_hex(&self) -> Result<String, Error> {
        let payload = match self.kind() {
            ScriptKind::Native => self.bytes.clone(),
            _ => bytestring::encode_hex(&self.bytes)?,
        };

        Ok(wrap_script_ref_hex(&payload, Some(&self.script_type))?)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Asset {
    pub policy_id: String,
    pub asset_name: Option<String>,
    pub fingerprint: String,
    pub decimals: u64,
    pub quantity: String,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct UtxoInfoResponse {
    pub tx_hash: String,
    pub tx_index: u64,
    pub address: String,
    pub value: String,
    pub stake_address: Option<String>,
    pub payment_cred: Option<String>,
    pub epoch_no: u64,
    pub block_height: Option<u64>,
    pub block_time: u64,
    pub datum_hash: Option<String>,
    pub inline_datum: Option<InlineDatum>,
    pub reference_script: Option<ReferenceScript>,
    pub asset_list: Option<Vec<Asset>>,
    pub is_spent: bool,
}

impl UtxoInfoResponse {
    /// `tx_hash:index` reference for requesting this output again
    pub fn utxo_ref(&self) -> String {
        format!("{}:{}", self.tx_hash, self.tx_index)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct QueryChainTipResponse {
    pub hash: String,
    pub epoch_no: u64,
    pub abs_slot: u64,
    pub epoch_slot: u64,
    pub block_no: u64,
    pub block_time: u64,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct CostModels {
    #[serde(rename = "PlutusV1")]
    pub plutus_v1: Option<Vec<i64>>,
    #[serde(rename = "PlutusV2")]
    pub plutus_v2: Option<Vec<i64>>,
    #[serde(rename = "PlutusV3")]
    pub plutus_v3: Option<Vec<i64>>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct EpochParamResponse {
    pub epoch_no: u64,
    pub min_fee_a: Option<u64>,
    pub min_fee_b: Option<u64>,
    pub max_block_size: Option<u64>,
    pub max_tx_size: Option<u64>,
    pub max_bh_size: Option<u64>,
    pub key_deposit: Option<String>,
    pub pool_deposit: Option<String>,
    pub max_epoch: Option<u64>,
    pub optimal_pool_count: Option<u64>,
    pub influence: Option<f64>,
    pub monetary_expand_rate: Option<f64>,
    pub treasury_growth_rate: Option<f64>,
    pub decentralisation: Option<f64>,
    pub extra_entropy: Option<String>,
    pub protocol_major: Option<u64>,
    pub protocol_minor: Option<u64>,
    pub min_utxo_value: Option<String>,
    pub min_pool_cost: Option<String>,
    pub nonce: Option<String>,
    pub block_hash: String,
    pub cost_models: Option<CostModels>,
    pub price_mem: Option<f64>,
    pub price_step: Option<f64>,
    pub max_tx_ex_mem: Option<u64>,
    pub max_tx_ex_steps: Option<u64>,
    pub max_block_ex_mem: Option<u64>,
    pub max_block_ex_steps: Option<u64>,
    pub max_val_size: Option<u64>,
    pub collateral_percent: Option<u64>,
    pub max_collateral_inputs: Option<u64>,
    pub coins_per_utxo_size: Option<String>,
}
