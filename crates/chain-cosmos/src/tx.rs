use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use prost::Message;
use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::error::CosmosError;
use crate::proto::{
    Any, AuthInfo, Coin, Fee, ModeInfo, ModeInfoSingle, MsgSend, PubKey, SignDoc, SignerInfo,
    TxBody, TxRaw, MSG_SEND_TYPE_URL, SECP256K1_PUBKEY_TYPE_URL, SIGN_MODE_DIRECT,
};

/// A single bank-send transfer.
#[derive(Debug, Clone)]
pub struct MsgSendParams<'a> {
    pub from: &'a str,
    pub to: &'a str,
    /// Integer amount in base denomination units.
    pub amount: &'a str,
    pub denom: &'a str,
    pub memo: &'a str,
}

/// Per-sender chain state and fee terms bound into the signed payload.
#[derive(Debug, Clone)]
pub struct SigningContext<'a> {
    pub chain_id: &'a str,
    pub account_number: u64,
    pub sequence: u64,
    /// 33-byte compressed secp256k1 public key of the signer.
    pub public_key: &'a [u8; 33],
    pub fee_amount: &'a str,
    pub fee_denom: &'a str,
    pub gas_limit: u64,
}

/// Builds the `SignDoc` for a single bank-send.
///
/// The account number, sequence, and chain id are all bound into the signed
/// bytes, which is what gives Cosmos transactions their replay protection.
pub fn build_sign_doc(
    msg: &MsgSendParams<'_>,
    ctx: &SigningContext<'_>,
) -> Result<SignDoc, CosmosError> {
    validate_amount(msg.amount)?;

    let send = MsgSend {
        from_address: msg.from.to_string(),
        to_address: msg.to.to_string(),
        amount: vec![Coin {
            denom: msg.denom.to_string(),
            amount: msg.amount.to_string(),
        }],
    };

    let body = TxBody {
        messages: vec![Any {
            type_url: MSG_SEND_TYPE_URL.to_string(),
            value: send.encode_to_vec(),
        }],
        memo: msg.memo.to_string(),
        timeout_height: 0,
    };

    let auth_info = AuthInfo {
        signer_infos: vec![SignerInfo {
            public_key: Some(Any {
                type_url: SECP256K1_PUBKEY_TYPE_URL.to_string(),
                value: PubKey {
                    key: ctx.public_key.to_vec(),
                }
                .encode_to_vec(),
            }),
            mode_info: Some(ModeInfo {
                single: Some(ModeInfoSingle {
                    mode: SIGN_MODE_DIRECT,
                }),
            }),
            sequence: ctx.sequence,
        }],
        fee: Some(Fee {
            amount: vec![Coin {
                denom: ctx.fee_denom.to_string(),
                amount: ctx.fee_amount.to_string(),
            }],
            gas_limit: ctx.gas_limit,
            payer: String::new(),
            granter: String::new(),
        }),
    };

    Ok(SignDoc {
        body_bytes: body.encode_to_vec(),
        auth_info_bytes: auth_info.encode_to_vec(),
        chain_id: ctx.chain_id.to_string(),
        account_number: ctx.account_number,
    })
}

/// Canonical sign bytes: the deterministic protobuf encoding of the doc.
pub fn sign_bytes(doc: &SignDoc) -> Vec<u8> {
    doc.encode_to_vec()
}

/// The 32-byte signing hash: SHA-256 of the canonical sign bytes.
pub fn sign_hash(doc: &SignDoc) -> [u8; 32] {
    Sha256::digest(sign_bytes(doc)).into()
}

/// Amino-style public key wrapper used in the signature envelope.
#[derive(Debug, Clone, Serialize)]
pub struct PubKeyEnvelope {
    #[serde(rename = "type")]
    pub key_type: &'static str,
    /// base64 of the 33-byte compressed key.
    pub value: String,
}

/// The signature envelope paired with the signed doc.
///
/// Verification matches the 64-byte r‖s against the supplied public key, so
/// no recovery byte is carried.
#[derive(Debug, Clone, Serialize)]
pub struct StdSignature {
    pub pub_key: PubKeyEnvelope,
    /// base64 of r ‖ s (64 bytes).
    pub signature: String,
}

/// A signed Cosmos transaction: the doc that was hashed plus its envelope.
#[derive(Debug, Clone)]
pub struct SignedCosmosTx {
    pub signed: SignDoc,
    pub signature: StdSignature,
}

/// Binds a normalized signature and public key to a signed doc.
pub fn encode_signed(doc: SignDoc, public_key: &[u8; 33], r: &[u8; 32], s: &[u8; 32]) -> SignedCosmosTx {
    let mut sig_bytes = [0u8; 64];
    sig_bytes[..32].copy_from_slice(r);
    sig_bytes[32..].copy_from_slice(s);

    SignedCosmosTx {
        signed: doc,
        signature: StdSignature {
            pub_key: PubKeyEnvelope {
                key_type: "tendermint/PubKeySecp256k1",
                value: BASE64.encode(public_key),
            },
            signature: BASE64.encode(sig_bytes),
        },
    }
}

impl SignedCosmosTx {
    /// Protobuf `TxRaw` bytes accepted by a node's broadcast endpoint.
    pub fn to_raw_bytes(&self) -> Result<Vec<u8>, CosmosError> {
        let signature = BASE64
            .decode(&self.signature.signature)
            .map_err(|e| CosmosError::EncodingError(format!("signature is not base64: {e}")))?;

        let raw = TxRaw {
            body_bytes: self.signed.body_bytes.clone(),
            auth_info_bytes: self.signed.auth_info_bytes.clone(),
            signatures: vec![signature],
        };
        Ok(raw.encode_to_vec())
    }
}

fn validate_amount(amount: &str) -> Result<(), CosmosError> {
    if amount.is_empty() || !amount.bytes().all(|b| b.is_ascii_digit()) {
        return Err(CosmosError::InvalidAmount(format!(
            "expected an integer base-unit amount, got {amount:?}"
        )));
    }
    Ok(())
}
