//! End-to-end tests for signed transaction encoding.
//!
//! These go through the public API only: build a ledger transaction, wrap it
//! in a `SignedTransaction` with an injected codec, then check the id, the
//! views and every JSON flag combination against each other. The last group
//! loads node-style JSON back in, which is what the CLI does.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use serde_json::Value;

use ergo_appkit::api::{ErgoTransaction, JsonEncoder};
use ergo_appkit::config::MAX_OUTPUTS;
use ergo_appkit::crypto::blake2b256;
use ergo_appkit::transaction::{
    Constant, ContextExtension, DataInput, ErgoBoxCandidate, ErgoLikeTransaction, ErgoTree, Input,
    ProverResult, RegisterId, Token,
};
use ergo_appkit::{BlockchainContext, CodecError, EncodingError, ErgoTreeCodec, SignedTransaction};

// ---------------------------------------------------------------------------
// Test Helpers
// ---------------------------------------------------------------------------

const SCRIPT: [u8; 4] = [0x10, 0x01, 0x01, 0x7f];

/// Decodes `SCRIPT` to "TRUE" and counts how often it was asked.
#[derive(Default)]
struct TrueCodec {
    calls: AtomicUsize,
}

impl ErgoTreeCodec for TrueCodec {
    fn decode(&self, tree: &ErgoTree) -> Result<String, CodecError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if tree.bytes() == SCRIPT {
            Ok("TRUE".to_string())
        } else {
            Err(CodecError::Unsupported {
                tree_hex: tree.to_hex(),
            })
        }
    }

    fn encode(&self, source: &str) -> Result<ErgoTree, CodecError> {
        match source {
            "TRUE" => Ok(ErgoTree::from_bytes(SCRIPT.to_vec())),
            other => Err(CodecError::InvalidSource {
                reason: other.to_string(),
            }),
        }
    }
}

fn context(codec: Arc<TrueCodec>) -> Arc<BlockchainContext> {
    Arc::new(
        BlockchainContext::builder()
            .height(1_000)
            .tree_codec(codec)
            .build(),
    )
}

fn input(seed: &[u8], proof: Vec<u8>) -> Input {
    Input::new(
        blake2b256(seed),
        ProverResult {
            proof,
            extension: ContextExtension::empty(),
        },
    )
}

fn output(tree: &[u8]) -> ErgoBoxCandidate {
    ErgoBoxCandidate {
        value: 1_000_000,
        ergo_tree: ErgoTree::from_bytes(tree.to_vec()),
        creation_height: 990,
        tokens: vec![],
        registers: Default::default(),
    }
}

/// Two inputs with proofs `p0`, `p1`, one output guarded by `SCRIPT`.
fn scenario(codec: Arc<TrueCodec>) -> SignedTransaction {
    let tx = ErgoLikeTransaction::new(
        vec![
            input(b"box-0", vec![0xa0, 0xa0]),
            input(b"box-1", vec![0xb1, 0xb1, 0xb1]),
        ],
        vec![],
        vec![output(&SCRIPT)],
    );
    SignedTransaction::new(context(codec), tx, 4_242).unwrap()
}

fn parse(json: &str) -> Value {
    serde_json::from_str(json).expect("encoder emits valid JSON")
}

fn strip_whitespace(s: &str) -> String {
    s.chars().filter(|c| !c.is_whitespace()).collect()
}

// ---------------------------------------------------------------------------
// Identity and views
// ---------------------------------------------------------------------------

#[test]
fn id_is_deterministic_and_matches_json() {
    let tx = scenario(Arc::default());
    assert_eq!(tx.id(), tx.id());
    assert_eq!(parse(&tx.to_json(false).unwrap())["id"], tx.id());
}

#[test]
fn id_ignores_proofs_but_not_order() {
    let base = scenario(Arc::default());

    let mut reproved = base.tx().clone();
    reproved.inputs[0].spending_proof.proof = vec![0xff; 64];
    let reproved = SignedTransaction::new(Arc::clone(base.context()), reproved, 0).unwrap();
    assert_eq!(base.id(), reproved.id());

    let mut swapped = base.tx().clone();
    swapped.inputs.swap(0, 1);
    let swapped = SignedTransaction::new(Arc::clone(base.context()), swapped, 0).unwrap();
    assert_ne!(base.id(), swapped.id());
}

#[test]
fn signed_inputs_preserve_order() {
    let tx = scenario(Arc::default());
    let views = tx.signed_inputs();
    assert_eq!(views.len(), tx.tx().inputs.len());
    for (i, view) in views.iter().enumerate() {
        assert_eq!(view.index(), i);
        assert_eq!(view.box_id(), tx.tx().inputs[i].box_id);
        assert_eq!(view.proof_bytes(), tx.tx().inputs[i].spending_proof.proof.as_slice());
    }
}

#[test]
fn outputs_to_spend_preserve_order() {
    let codec = Arc::new(TrueCodec::default());
    let tx = ErgoLikeTransaction::new(
        vec![input(b"only", vec![])],
        vec![],
        vec![output(&SCRIPT), output(&[0x00]), output(&[0x01, 0x02])],
    );
    let signed = SignedTransaction::new(context(codec), tx, 0).unwrap();

    let boxes = signed.outputs_to_spend();
    assert_eq!(boxes.len(), 3);
    for (i, b) in boxes.iter().enumerate() {
        assert_eq!(usize::from(b.transaction_index()), i);
        assert_eq!(b.ergo_tree(), &signed.tx().output_candidates[i].ergo_tree);
        assert_eq!(b.transaction_id(), signed.tx_id());
        assert_eq!(b.confirmations(), 10);
    }
}

#[test]
fn cost_is_passed_through() {
    assert_eq!(scenario(Arc::default()).cost(), 4_242);
}

// ---------------------------------------------------------------------------
// JSON encoding
// ---------------------------------------------------------------------------

#[test]
fn two_inputs_one_output_scenario() {
    let tx = scenario(Arc::default());

    let pretty = parse(&tx.to_json(true).unwrap());
    let inputs = pretty["inputs"].as_array().unwrap();
    assert_eq!(inputs.len(), 2);
    assert_eq!(inputs[0]["spendingProof"]["proofBytes"], "a0a0");
    assert_eq!(inputs[1]["spendingProof"]["proofBytes"], "b1b1b1");
    assert_eq!(pretty["outputs"][0]["ergoTree"], "TRUE");

    let plain = parse(&tx.to_json(false).unwrap());
    assert_eq!(plain["outputs"][0]["ergoTree"], hex::encode(SCRIPT));
    assert_eq!(plain["inputs"], pretty["inputs"]);
    assert_eq!(plain["outputs"][0]["value"], pretty["outputs"][0]["value"]);
}

#[test]
fn format_flag_only_changes_whitespace() {
    let tx = scenario(Arc::default());
    let compact = tx.to_json_with(false, false).unwrap();
    let formatted = tx.to_json_with(false, true).unwrap();

    assert!(!compact.contains('\n'));
    assert!(formatted.contains('\n'));
    assert_ne!(compact, formatted);
    assert_eq!(strip_whitespace(&compact), strip_whitespace(&formatted));
    assert_eq!(parse(&compact), parse(&formatted));
}

#[test]
fn pretty_print_decodes_every_output() {
    let codec = Arc::new(TrueCodec::default());
    let tx = ErgoLikeTransaction::new(
        vec![input(b"in", vec![0x01])],
        vec![],
        vec![output(&SCRIPT), output(&SCRIPT)],
    );
    let signed = SignedTransaction::new(context(Arc::clone(&codec)), tx, 0).unwrap();

    let json = parse(&signed.to_json_with(true, false).unwrap());
    for out in json["outputs"].as_array().unwrap() {
        assert_eq!(out["ergoTree"], "TRUE");
    }
    assert_eq!(codec.calls.load(Ordering::SeqCst), 2);
}

#[test]
fn pretty_print_never_mutates_the_record() {
    let codec = Arc::new(TrueCodec::default());
    let tx = scenario(Arc::clone(&codec));
    let before = tx.tx().clone();

    tx.to_json_with(true, false).unwrap();

    assert_eq!(tx.tx(), &before);
    let plain = parse(&tx.to_json_with(false, false).unwrap());
    assert_eq!(plain["outputs"][0]["ergoTree"], hex::encode(SCRIPT));
}

#[test]
fn codec_is_not_consulted_without_pretty_print() {
    let codec = Arc::new(TrueCodec::default());
    let tx = scenario(Arc::clone(&codec));
    tx.to_json_with(false, true).unwrap();
    tx.to_json_with(false, false).unwrap();
    assert_eq!(codec.calls.load(Ordering::SeqCst), 0);
}

#[test]
fn codec_failure_fails_the_whole_call() {
    let tx = ErgoLikeTransaction::new(
        vec![input(b"in", vec![])],
        vec![],
        vec![output(&SCRIPT), output(&[0xde, 0xad])],
    );
    let signed = SignedTransaction::new(context(Arc::default()), tx, 0).unwrap();

    match signed.to_json(true) {
        Err(EncodingError::ScriptDecode { index, .. }) => assert_eq!(index, 1),
        other => panic!("expected ScriptDecode, got {other:?}"),
    }
}

#[test]
fn malformed_transaction_is_rejected() {
    let mut out = output(&SCRIPT);
    out.registers
        .insert(RegisterId::R5, Constant::from_bytes(vec![0x04, 0x02]));
    let tx = ErgoLikeTransaction::new(vec![input(b"in", vec![])], vec![], vec![out]);

    assert!(matches!(
        SignedTransaction::new(context(Arc::default()), tx, 0),
        Err(EncodingError::Malformed { .. })
    ));
}

#[test]
fn oversized_output_list_never_becomes_a_record() {
    let declared = MAX_OUTPUTS + 1;
    let tx = ErgoLikeTransaction::new(
        vec![input(b"in", vec![])],
        vec![],
        vec![output(&SCRIPT); declared],
    );

    match SignedTransaction::new(context(Arc::default()), tx, 0) {
        Err(EncodingError::Malformed { reason }) => assert!(reason.contains("outputs")),
        other => panic!("expected Malformed, got {other:?}"),
    }
}

#[test]
fn compact_path_follows_the_shared_encoder() {
    let ctx = BlockchainContext::builder()
        .json_encoder(JsonEncoder::with_indent(4))
        .build();
    let tx = ErgoLikeTransaction::new(
        vec![input(b"in", vec![0x01])],
        vec![],
        vec![output(&SCRIPT)],
    );
    let signed = SignedTransaction::new(Arc::new(ctx), tx, 0).unwrap();

    let shared = signed.to_json_with(false, false).unwrap();
    let expected = JsonEncoder::with_indent(4)
        .encode(&ErgoTransaction::try_from(signed.tx()).unwrap())
        .unwrap();
    assert_eq!(shared, expected);
    assert!(shared.contains("\n    \"id\""));

    // Explicit formatting ignores the shared encoder and indents by two.
    let formatted = signed.to_json_with(false, true).unwrap();
    assert!(formatted.contains("\n  \"id\""));
    assert_eq!(parse(&shared), parse(&formatted));
}

#[test]
fn concurrent_reads_agree() {
    let tx = Arc::new(scenario(Arc::default()));
    let expected = tx.to_json(true).unwrap();

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let tx = Arc::clone(&tx);
            std::thread::spawn(move || (tx.id(), tx.to_json(true).unwrap()))
        })
        .collect();

    for handle in handles {
        let (id, json) = handle.join().unwrap();
        assert_eq!(id, tx.id());
        assert_eq!(json, expected);
    }
}

// ---------------------------------------------------------------------------
// Node JSON round trip
// ---------------------------------------------------------------------------

#[test]
fn node_json_loads_back_into_the_same_transaction() {
    let mut out = output(&SCRIPT);
    out.tokens.push(Token::new(blake2b256(b"token"), 7));
    out.registers
        .insert(RegisterId::R4, Constant::from_bytes(vec![0x0e, 0x00]));
    let tx = ErgoLikeTransaction::new(
        vec![input(b"in", vec![0x99])],
        vec![DataInput {
            box_id: blake2b256(b"oracle"),
        }],
        vec![out],
    );
    let signed = SignedTransaction::new(context(Arc::default()), tx, 0).unwrap();

    let json = signed.to_json_with(false, false).unwrap();
    let api: ErgoTransaction = serde_json::from_str(&json).unwrap();
    let restored = ErgoLikeTransaction::try_from(&api).unwrap();

    assert_eq!(&restored, signed.tx());
    assert_eq!(restored.id().to_hex(), signed.id());
}

#[test]
fn node_json_with_wrong_id_is_rejected() {
    let signed = scenario(Arc::default());
    let mut api: ErgoTransaction = serde_json::from_str(&signed.to_json(false).unwrap()).unwrap();
    api.outputs[0].value += 1;

    assert!(matches!(
        ErgoLikeTransaction::try_from(&api),
        Err(EncodingError::IdMismatch { .. })
    ));
}
