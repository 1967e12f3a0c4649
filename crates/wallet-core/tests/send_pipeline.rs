//! Cross-crate integration tests exercising the full pipeline against
//! in-memory mock collaborators:
//! fetch key -> derive address -> assemble -> hash -> sign -> encode ->
//! broadcast.
//!
//! The EVM pipeline is pinned to the published EIP-155 chain-id-1 example
//! transaction, so any drift in field order, hashing, or replay-protection
//! encoding fails loudly.

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chain_cosmos::config::COSMOS_HUB;
use chain_cosmos::proto::Coin;
use chain_cosmos::tx::{sign_hash, SignedCosmosTx};
use chain_evm::chains::ETHEREUM;
use wallet_core::{
    CosmosAccount, CosmosRpc, CosmosWallet, EvmCallRequest, EvmRpc, EvmWallet, RawSignature,
    RemoteSigner, Wallet, WalletError,
};

// ─── Mock collaborators ──────────────────────────────────────────────

/// A signer returning a fixed public key and a fixed signature, recording
/// every interaction.
struct MockSigner {
    public_key: Vec<u8>,
    r: String,
    s: String,
    recovery_id: u8,
    fail_signing: bool,
    key_fetches: AtomicUsize,
    sign_calls: AtomicUsize,
    digests: Mutex<Vec<[u8; 32]>>,
}

impl MockSigner {
    fn new(public_key_hex: &str, r: &str, s: &str, recovery_id: u8) -> Arc<Self> {
        Arc::new(Self {
            public_key: hex::decode(public_key_hex).unwrap(),
            r: r.into(),
            s: s.into(),
            recovery_id,
            fail_signing: false,
            key_fetches: AtomicUsize::new(0),
            sign_calls: AtomicUsize::new(0),
            digests: Mutex::new(Vec::new()),
        })
    }

    fn failing(public_key_hex: &str) -> Arc<Self> {
        let mut signer = Self::new(public_key_hex, "00", "00", 0);
        Arc::get_mut(&mut signer).unwrap().fail_signing = true;
        signer
    }
}

#[async_trait]
impl RemoteSigner for MockSigner {
    async fn public_key(&self) -> Result<Vec<u8>, WalletError> {
        self.key_fetches.fetch_add(1, Ordering::SeqCst);
        Ok(self.public_key.clone())
    }

    async fn sign(&self, digest: [u8; 32]) -> Result<RawSignature, WalletError> {
        self.sign_calls.fetch_add(1, Ordering::SeqCst);
        self.digests.lock().unwrap().push(digest);
        if self.fail_signing {
            return Err(WalletError::SigningUnavailable("coordinator offline".into()));
        }
        Ok(RawSignature {
            r: self.r.clone(),
            s: self.s.clone(),
            recovery_id: self.recovery_id,
        })
    }
}

/// An EVM node stub: fixed gas numbers, a nonce that advances only when a
/// transaction is accepted, and a call log for ordering assertions.
struct MockEvmRpc {
    nonce: AtomicU64,
    calls: Mutex<Vec<&'static str>>,
    estimates: Mutex<Vec<EvmCallRequest>>,
    sent: Mutex<Vec<String>>,
}

impl MockEvmRpc {
    fn new(starting_nonce: u64) -> Arc<Self> {
        Arc::new(Self {
            nonce: AtomicU64::new(starting_nonce),
            calls: Mutex::new(Vec::new()),
            estimates: Mutex::new(Vec::new()),
            sent: Mutex::new(Vec::new()),
        })
    }

    fn call_log(&self) -> Vec<&'static str> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl EvmRpc for MockEvmRpc {
    async fn get_transaction_count(&self, _address: &str) -> Result<u64, WalletError> {
        self.calls.lock().unwrap().push("nonce");
        Ok(self.nonce.load(Ordering::SeqCst))
    }

    async fn get_gas_price(&self) -> Result<u128, WalletError> {
        self.calls.lock().unwrap().push("gas_price");
        Ok(20_000_000_000)
    }

    async fn estimate_gas(&self, call: &EvmCallRequest) -> Result<u64, WalletError> {
        self.calls.lock().unwrap().push("estimate");
        self.estimates.lock().unwrap().push(call.clone());
        Ok(21_000)
    }

    async fn send_raw_transaction(&self, raw_hex: &str) -> Result<String, WalletError> {
        self.calls.lock().unwrap().push("send");
        self.sent.lock().unwrap().push(raw_hex.to_string());
        let accepted = self.nonce.fetch_add(1, Ordering::SeqCst);
        Ok(format!("0xtxhash{accepted}"))
    }

    async fn get_balance(
        &self,
        _address: &str,
        token_contract: Option<&str>,
    ) -> Result<String, WalletError> {
        self.calls.lock().unwrap().push("balance");
        Ok(match token_contract {
            None => "5000000000000000000".into(),
            Some(contract) => format!("token:{contract}"),
        })
    }
}

/// A Cosmos node stub.
struct MockCosmosRpc {
    account: CosmosAccount,
    calls: Mutex<Vec<&'static str>>,
    broadcasts: Mutex<Vec<SignedCosmosTx>>,
}

impl MockCosmosRpc {
    fn new(account_number: u64, sequence: u64) -> Arc<Self> {
        Arc::new(Self {
            account: CosmosAccount {
                account_number,
                sequence,
            },
            calls: Mutex::new(Vec::new()),
            broadcasts: Mutex::new(Vec::new()),
        })
    }
}

#[async_trait]
impl CosmosRpc for MockCosmosRpc {
    async fn get_account(&self, _address: &str) -> Result<CosmosAccount, WalletError> {
        self.calls.lock().unwrap().push("account");
        Ok(self.account)
    }

    async fn get_balance(&self, _address: &str, denom: &str) -> Result<Coin, WalletError> {
        self.calls.lock().unwrap().push("balance");
        Ok(Coin {
            denom: denom.into(),
            amount: "100000000".into(),
        })
    }

    async fn get_all_balances(&self, _address: &str) -> Result<Vec<Coin>, WalletError> {
        self.calls.lock().unwrap().push("all_balances");
        Ok(vec![
            Coin {
                denom: "uatom".into(),
                amount: "100000000".into(),
            },
            Coin {
                denom: "uosmo".into(),
                amount: "7".into(),
            },
        ])
    }

    async fn broadcast(&self, signed: &SignedCosmosTx) -> Result<String, WalletError> {
        self.calls.lock().unwrap().push("broadcast");
        self.broadcasts.lock().unwrap().push(signed.clone());
        Ok("ABCDEF0123".into())
    }
}

// ─── Vectors ─────────────────────────────────────────────────────────

/// secp256k1 generator point, compressed (private key 1). Address:
/// 0x7E5F4552091A69125d5DfCb7b8C2659029395Bdf.
const GENERATOR_PUBKEY_HEX: &str =
    "0279be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798";
const GENERATOR_ETH_ADDRESS: &str = "0x7E5F4552091A69125d5DfCb7b8C2659029395Bdf";

/// The published EIP-155 chain-id-1 example signature.
const EIP155_R: &str = "28ef61340bd939bc2195fe537567866003e1a15d3c71ff63e1590620aa636276";
const EIP155_S: &str = "67cbe9d8997f761aecb703304b3800ccf555c9f3dc64214b297fb1966a3b6d83";
const EIP155_RAW: &str = "0xf86c098504a817c800825208943535353535353535353535353535353535353535880de0b6b3a76400008025a028ef61340bd939bc2195fe537567866003e1a15d3c71ff63e1590620aa636276a067cbe9d8997f761aecb703304b3800ccf555c9f3dc64214b297fb1966a3b6d83";

/// Known Cosmos vector: this compressed key derives
/// cosmos1pkptre7fdkl6gfrzlesjjvhxhlc3r4gmmk8rs6.
const COSMOS_PUBKEY_HEX: &str =
    "034f04181eeba35391b858633a765c4a0c189697b40d216354d50890d350c70290";
const COSMOS_ADDRESS: &str = "cosmos1pkptre7fdkl6gfrzlesjjvhxhlc3r4gmmk8rs6";
const COSMOS_RECIPIENT: &str = "cosmos1qqgjyv6y24n80zye42aueh0wluqpzg3nm75jna";

// ─── EVM: full pipeline ──────────────────────────────────────────────

#[tokio::test]
async fn evm_send_reproduces_the_eip155_vector() {
    let signer = MockSigner::new(GENERATOR_PUBKEY_HEX, EIP155_R, EIP155_S, 0);
    let rpc = MockEvmRpc::new(9);
    let wallet = EvmWallet::new(signer.clone(), rpc.clone(), &ETHEREUM);

    let tx_hash = wallet
        .send_payment("0x3535353535353535353535353535353535353535", "1", None)
        .await
        .unwrap();

    assert_eq!(tx_hash, "0xtxhash9");
    assert_eq!(rpc.sent.lock().unwrap().as_slice(), &[EIP155_RAW.to_string()]);

    // The digest handed to the signer is the published signing hash.
    assert_eq!(
        hex::encode(signer.digests.lock().unwrap()[0]),
        "daf5a779ae972f972197303d7b574746c7ef83eabadc08ba45bd54b4c72e5f85"
    );
}

#[tokio::test]
async fn evm_address_matches_the_derivation_vector() {
    let signer = MockSigner::new(GENERATOR_PUBKEY_HEX, EIP155_R, EIP155_S, 0);
    let wallet = EvmWallet::new(signer, MockEvmRpc::new(0), &ETHEREUM);
    assert_eq!(wallet.address().await.unwrap(), GENERATOR_ETH_ADDRESS);
}

#[tokio::test]
async fn evm_address_is_fetched_once_even_under_concurrency() {
    let signer = MockSigner::new(GENERATOR_PUBKEY_HEX, EIP155_R, EIP155_S, 0);
    let wallet = Arc::new(EvmWallet::new(signer.clone(), MockEvmRpc::new(0), &ETHEREUM));

    let (a, b) = tokio::join!(
        tokio::spawn({
            let w = wallet.clone();
            async move { w.address().await }
        }),
        tokio::spawn({
            let w = wallet.clone();
            async move { w.address().await }
        }),
    );
    assert_eq!(a.unwrap().unwrap(), b.unwrap().unwrap());

    // A third call after the cache has landed.
    wallet.address().await.unwrap();
    assert_eq!(signer.key_fetches.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn evm_erc20_send_overlays_the_token_contract() {
    let signer = MockSigner::new(GENERATOR_PUBKEY_HEX, EIP155_R, EIP155_S, 0);
    let rpc = MockEvmRpc::new(0);
    let wallet = EvmWallet::new(signer, rpc.clone(), &ETHEREUM);

    wallet
        .send_payment("0x000000000000000000000000000000000000dEaD", "10", Some("dai"))
        .await
        .unwrap();

    // The estimated shape is the overlaid one: token contract as target,
    // zero value, transfer calldata.
    let estimates = rpc.estimates.lock().unwrap();
    let call = &estimates[0];
    assert_eq!(call.to, "0x6b175474e89094c44da98b954eedeac495271d0f");
    assert_eq!(call.value, alloy_primitives::U256::ZERO);
    assert_eq!(&call.data[..4], &[0xa9, 0x05, 0x9c, 0xbb]);
    assert!(hex::encode(&call.data[36..68]).ends_with("8ac7230489e80000"));

    // The raw transaction targets the contract, not the recipient.
    let sent = rpc.sent.lock().unwrap();
    assert!(sent[0].contains("6b175474e89094c44da98b954eedeac495271d0f"));
}

#[tokio::test]
async fn evm_unknown_asset_aborts_before_any_remote_call() {
    let signer = MockSigner::new(GENERATOR_PUBKEY_HEX, EIP155_R, EIP155_S, 0);
    let rpc = MockEvmRpc::new(0);
    let wallet = EvmWallet::new(signer.clone(), rpc.clone(), &ETHEREUM);

    // Prime the address cache so the send path alone is measured.
    wallet.address().await.unwrap();

    let err = wallet
        .send_payment(
            "0x000000000000000000000000000000000000dEaD",
            "1",
            Some("doesnotexist"),
        )
        .await
        .unwrap_err();

    assert!(matches!(err, WalletError::UnknownAsset(_)));
    assert!(rpc.call_log().is_empty(), "no RPC call may precede the abort");
    assert_eq!(signer.sign_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn evm_concurrent_sends_are_serialized() {
    let signer = MockSigner::new(GENERATOR_PUBKEY_HEX, EIP155_R, EIP155_S, 0);
    let rpc = MockEvmRpc::new(0);
    let wallet = Arc::new(EvmWallet::new(signer, rpc.clone(), &ETHEREUM));
    wallet.address().await.unwrap();

    let to = "0x3535353535353535353535353535353535353535";
    let (a, b) = tokio::join!(
        tokio::spawn({
            let w = wallet.clone();
            async move { w.send_payment(to, "1", None).await }
        }),
        tokio::spawn({
            let w = wallet.clone();
            async move { w.send_payment(to, "1", None).await }
        }),
    );
    a.unwrap().unwrap();
    b.unwrap().unwrap();

    // Each send runs its four round trips as a block; the second one reads
    // its nonce only after the first broadcast landed.
    assert_eq!(
        rpc.call_log(),
        vec![
            "nonce", "gas_price", "estimate", "send", //
            "nonce", "gas_price", "estimate", "send",
        ]
    );

    let sent = rpc.sent.lock().unwrap();
    assert_ne!(sent[0], sent[1], "the sends must consume distinct nonces");
}

#[tokio::test]
async fn evm_signing_failure_aborts_without_broadcast() {
    let signer = MockSigner::failing(GENERATOR_PUBKEY_HEX);
    let rpc = MockEvmRpc::new(0);
    let wallet = EvmWallet::new(signer, rpc.clone(), &ETHEREUM);

    let err = wallet
        .send_payment("0x3535353535353535353535353535353535353535", "1", None)
        .await
        .unwrap_err();

    assert!(matches!(err, WalletError::SigningUnavailable(_)));
    assert!(!rpc.call_log().contains(&"send"));
    assert!(rpc.sent.lock().unwrap().is_empty());
}

#[tokio::test]
async fn evm_invalid_public_key_surfaces_on_first_use() {
    // 33 bytes of 0xff with a 0x02 prefix is not a curve point.
    let mut bad = vec![0xff; 33];
    bad[0] = 0x02;
    let signer = MockSigner::new(&hex::encode(bad), EIP155_R, EIP155_S, 0);
    let wallet = EvmWallet::new(signer, MockEvmRpc::new(0), &ETHEREUM);

    assert!(matches!(
        wallet.address().await.unwrap_err(),
        WalletError::InvalidPublicKey(_)
    ));
}

#[tokio::test]
async fn evm_balance_queries_native_and_token() {
    let signer = MockSigner::new(GENERATOR_PUBKEY_HEX, EIP155_R, EIP155_S, 0);
    let rpc = MockEvmRpc::new(0);
    let wallet = EvmWallet::new(signer, rpc.clone(), &ETHEREUM);

    assert_eq!(wallet.balance(None).await.unwrap(), "5000000000000000000");
    assert_eq!(wallet.balance(Some("ETH")).await.unwrap(), "5000000000000000000");
    assert_eq!(
        wallet.balance(Some("dai")).await.unwrap(),
        "token:0x6b175474e89094c44da98b954eedeac495271d0f"
    );
    assert!(matches!(
        wallet.balance(Some("doesnotexist")).await.unwrap_err(),
        WalletError::UnknownAsset(_)
    ));
}

// ─── Cosmos: full pipeline ───────────────────────────────────────────

#[tokio::test]
async fn cosmos_address_matches_the_derivation_vector() {
    let signer = MockSigner::new(COSMOS_PUBKEY_HEX, "11", "22", 0);
    let wallet = CosmosWallet::new(signer.clone(), MockCosmosRpc::new(1, 0), &COSMOS_HUB);

    assert_eq!(wallet.address().await.unwrap(), COSMOS_ADDRESS);
    wallet.address().await.unwrap();
    assert_eq!(signer.key_fetches.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn cosmos_send_signs_the_sign_doc_hash() {
    let signer = MockSigner::new(COSMOS_PUBKEY_HEX, &"11".repeat(32), &"22".repeat(32), 0);
    let rpc = MockCosmosRpc::new(1234, 7);
    let wallet = CosmosWallet::new(signer.clone(), rpc.clone(), &COSMOS_HUB);

    let tx_hash = wallet
        .send_payment(COSMOS_RECIPIENT, "100000", None)
        .await
        .unwrap();
    assert_eq!(tx_hash, "ABCDEF0123");

    let broadcasts = rpc.broadcasts.lock().unwrap();
    let signed = &broadcasts[0];

    // The digest handed to the signer is SHA-256 of the broadcast doc.
    assert_eq!(signer.digests.lock().unwrap()[0], sign_hash(&signed.signed));

    // Replay protection is inside the signed bytes.
    assert_eq!(signed.signed.chain_id, "cosmoshub-4");
    assert_eq!(signed.signed.account_number, 1234);

    // Envelope: compressed key + base64(r ‖ s), no recovery byte.
    use base64::{engine::general_purpose::STANDARD, Engine as _};
    let sig = STANDARD.decode(&signed.signature.signature).unwrap();
    assert_eq!(sig.len(), 64);
    assert_eq!(&sig[..32], &[0x11; 32]);
    assert_eq!(&sig[32..], &[0x22; 32]);
    assert_eq!(
        STANDARD.decode(&signed.signature.pub_key.value).unwrap(),
        hex::decode(COSMOS_PUBKEY_HEX).unwrap()
    );
}

#[tokio::test]
async fn cosmos_rejects_recipient_with_wrong_prefix() {
    let signer = MockSigner::new(COSMOS_PUBKEY_HEX, "11", "22", 0);
    let rpc = MockCosmosRpc::new(1, 0);
    let wallet = CosmosWallet::new(signer, rpc.clone(), &COSMOS_HUB);

    // A valid EVM address is not a valid bech32 account address.
    let err = wallet
        .send_payment("0x3535353535353535353535353535353535353535", "1", None)
        .await
        .unwrap_err();
    assert!(matches!(err, WalletError::Encoding(_)));
    assert!(rpc.calls.lock().unwrap().is_empty());
}

#[tokio::test]
async fn cosmos_fractional_amount_is_rejected_before_signing() {
    let signer = MockSigner::new(COSMOS_PUBKEY_HEX, "11", "22", 0);
    let rpc = MockCosmosRpc::new(1, 0);
    let wallet = CosmosWallet::new(signer.clone(), rpc.clone(), &COSMOS_HUB);

    let err = wallet
        .send_payment(COSMOS_RECIPIENT, "1.5", None)
        .await
        .unwrap_err();
    assert!(matches!(err, WalletError::InvalidAmount(_)));
    assert_eq!(signer.sign_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn cosmos_balance_formats_amount_and_denom() {
    let signer = MockSigner::new(COSMOS_PUBKEY_HEX, "11", "22", 0);
    let wallet = CosmosWallet::new(signer, MockCosmosRpc::new(1, 0), &COSMOS_HUB);

    assert_eq!(wallet.balance(None).await.unwrap(), "100000000 uatom");
    assert_eq!(wallet.balance(Some("uosmo")).await.unwrap(), "100000000 uosmo");

    let all = wallet.balances().await.unwrap();
    assert_eq!(all.len(), 2);
    assert_eq!(all[0].denom, "uatom");
}

// ─── The shared wallet contract ──────────────────────────────────────

#[tokio::test]
async fn both_families_share_the_wallet_contract() {
    let evm: Box<dyn Wallet> = Box::new(EvmWallet::new(
        MockSigner::new(GENERATOR_PUBKEY_HEX, EIP155_R, EIP155_S, 0),
        MockEvmRpc::new(0),
        &ETHEREUM,
    ));
    let cosmos: Box<dyn Wallet> = Box::new(CosmosWallet::new(
        MockSigner::new(COSMOS_PUBKEY_HEX, "11", "22", 0),
        MockCosmosRpc::new(1, 0),
        &COSMOS_HUB,
    ));

    for wallet in [&evm, &cosmos] {
        let address = wallet.address().await.unwrap();
        assert!(!address.is_empty());
    }
    assert!(evm.address().await.unwrap().starts_with("0x"));
    assert!(cosmos.address().await.unwrap().starts_with("cosmos1"));
}
