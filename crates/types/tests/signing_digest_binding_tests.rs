/// Security tests for the order signing digest
///
/// Every field a maker signs must change the digest. If one of these tests fails, that
/// field can be altered after signing without invalidating the signature.
use cosmwasm_std::Uint128;
use limit_orders_types::{
    canonical_address, derive_public_key, recover_public_key, sign_digest, DomainSeparator,
    OrderSide, OrderTerms, RecoverableSignature,
};

const PRIVATE_KEY: [u8; 32] = [0x42; 32];

fn baseline() -> OrderTerms {
    OrderTerms {
        maker: "cosmwasm1maker".to_string(),
        token_in: "cosmwasm1tokena".to_string(),
        token_out: "cosmwasm1tokenb".to_string(),
        amount_in: Uint128::new(1000),
        amount_out: Uint128::new(500),
        side: OrderSide::Sell,
        expiry: 1_700_003_600,
    }
}

fn domain() -> DomainSeparator {
    DomainSeparator::new("testnet-1", "cosmwasm1contract")
}

fn assert_digest_changes(modify: impl FnOnce(&mut OrderTerms)) {
    let original = baseline();
    let mut modified = baseline();
    modify(&mut modified);
    assert_ne!(
        original.signing_digest(&domain()),
        modified.signing_digest(&domain()),
        "field change did not alter the signing digest"
    );
}

#[test]
fn test_digest_is_deterministic() {
    assert_eq!(
        baseline().signing_digest(&domain()),
        baseline().signing_digest(&domain())
    );
}

#[test]
fn test_maker_is_bound() {
    assert_digest_changes(|t| t.maker = "cosmwasm1attacker".to_string());
}

#[test]
fn test_token_in_is_bound() {
    assert_digest_changes(|t| t.token_in = "cosmwasm1tokenc".to_string());
}

#[test]
fn test_token_out_is_bound() {
    assert_digest_changes(|t| t.token_out = "cosmwasm1tokenc".to_string());
}

#[test]
fn test_swapped_tokens_are_bound() {
    assert_digest_changes(|t| std::mem::swap(&mut t.token_in, &mut t.token_out));
}

#[test]
fn test_amount_in_is_bound() {
    assert_digest_changes(|t| t.amount_in = Uint128::new(1001));
}

#[test]
fn test_amount_out_is_bound() {
    assert_digest_changes(|t| t.amount_out = Uint128::new(499));
}

#[test]
fn test_swapped_amounts_are_bound() {
    assert_digest_changes(|t| std::mem::swap(&mut t.amount_in, &mut t.amount_out));
}

#[test]
fn test_side_is_bound() {
    assert_digest_changes(|t| t.side = OrderSide::Buy);
}

#[test]
fn test_expiry_is_bound() {
    assert_digest_changes(|t| t.expiry += 1);
}

#[test]
fn test_digest_is_bound_to_domain() {
    let other = DomainSeparator::new("mainnet-1", "cosmwasm1contract");
    assert_ne!(
        baseline().signing_digest(&domain()),
        baseline().signing_digest(&other)
    );
}

#[test]
fn test_signature_recovers_signer_only_for_signed_terms() {
    let signer = canonical_address(derive_public_key(&PRIVATE_KEY).unwrap().as_slice());

    let terms = baseline();
    let signature = sign_digest(&terms.signing_digest(&domain()), &PRIVATE_KEY).unwrap();

    let recovered = recover_public_key(&terms.signing_digest(&domain()), &signature).unwrap();
    assert_eq!(canonical_address(&recovered), signer);

    let mut tampered = baseline();
    tampered.amount_out = Uint128::new(1);
    let recovered = recover_public_key(&tampered.signing_digest(&domain()), &signature);
    if let Ok(key) = recovered {
        assert_ne!(canonical_address(&key), signer);
    }
}

#[test]
fn test_truncated_signature_is_an_error_not_a_panic() {
    let terms = baseline();
    let signature = sign_digest(&terms.signing_digest(&domain()), &PRIVATE_KEY).unwrap();
    let bytes = signature.to_binary();

    for len in [0, 1, 32, 63, 64, 66] {
        let mut truncated = bytes.to_vec();
        truncated.resize(len, 0);
        assert!(RecoverableSignature::from_slice(&truncated).is_err());
    }
}
