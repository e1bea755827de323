//! End-to-end commitment behaviour: build, prove, verify, tamper.

use airdrop_core::{
    claims::generate_claims, Address, AirdropError, Amount, PipelineConfig, RawClaim, U256,
};
use airdrop_crypto::{hash_leaf_parts, hash_pair, keccak256};
use airdrop_merkle::{
    generate_all_proofs, proof_path, verify_claim, verify_proof, MerkleTree, Proof, ProofBundle,
    ProofVerifier,
};

fn aa(last: u8) -> Address {
    let mut b = [0xaa; 20];
    b[19] = last;
    Address::from_bytes(b)
}

#[test]
fn two_claim_scenario() {
    let raw = [
        RawClaim::new(aa(0x01), Amount::from(100u64)),
        RawClaim::new(aa(0x02), Amount::from(200u64)),
    ];
    let tree = MerkleTree::build(&raw).unwrap();

    // L0 = keccak(pad(addr) ‖ be32(100) ‖ 00000000)
    let mut enc = vec![0u8; 12];
    enc.extend_from_slice(aa(0x01).as_bytes());
    enc.extend_from_slice(&[0u8; 31]);
    enc.push(100);
    enc.extend_from_slice(&0u32.to_be_bytes());
    let l0 = keccak256(&enc);
    let l1 = hash_leaf_parts(&aa(0x02), &Amount::from(200u64), 1);
    assert_eq!(tree.leaves(), &[l0, l1]);

    let (lo, hi) = if l0 < l1 { (l0, l1) } else { (l1, l0) };
    let mut cat = lo.to_vec();
    cat.extend_from_slice(&hi);
    assert_eq!(tree.root(), keccak256(&cat));

    let p0 = tree.proof(&aa(0x01)).unwrap();
    let p1 = tree.proof(&aa(0x02)).unwrap();
    assert_eq!(p0.siblings, vec![l1]);
    assert_eq!(p1.siblings, vec![l0]);
    assert!(verify_proof(&tree.root(), &aa(0x01), &p0));
    assert!(verify_proof(&tree.root(), &aa(0x02), &p1));

    // Handing each claim the other's sibling breaks both.
    let swapped0 = Proof::new(p1.siblings.clone(), p0.index, p0.amount);
    let swapped1 = Proof::new(p0.siblings, p1.index, p1.amount);
    assert!(!verify_proof(&tree.root(), &aa(0x01), &swapped0));
    assert!(!verify_proof(&tree.root(), &aa(0x02), &swapped1));
}

#[test]
fn odd_sizes_round_trip() {
    for n in [1usize, 2, 3, 5, 17] {
        let tree = MerkleTree::build(&generate_claims(n)).unwrap();
        let verifier = ProofVerifier::new(tree.root());
        for c in tree.claims() {
            let proof = tree.proof(&c.address).unwrap();
            assert_eq!(proof.siblings.len(), tree.height(), "n={n}");
            assert!(verifier.verify_proof(&c.address, &proof), "n={n}");
            assert_eq!(
                proof_path(tree.leaves(), c.index as usize).unwrap(),
                proof.siblings
            );
        }
    }
}

#[test]
fn three_leaf_root_duplicates_trailing_node() {
    let tree = MerkleTree::build(&generate_claims(3)).unwrap();
    let l = tree.leaves();
    let expected = hash_pair(&hash_pair(&l[0], &l[1]), &hash_pair(&l[2], &l[2]));
    assert_eq!(tree.root(), expected);
}

#[test]
fn tampering_breaks_verification() {
    let tree = MerkleTree::build(&generate_claims(9)).unwrap();
    let c = tree.claims()[4];
    let proof = tree.proof(&c.address).unwrap();
    let root = tree.root();
    assert!(verify_claim(&root, &c, &proof.siblings));

    let mut amount = c;
    amount.amount = Amount::new(c.amount.value() ^ U256::one());
    assert!(!verify_claim(&root, &amount, &proof.siblings));

    let mut address = c;
    let mut bytes = *c.address.as_bytes();
    bytes[0] ^= 0x80;
    address.address = Address::from_bytes(bytes);
    assert!(!verify_claim(&root, &address, &proof.siblings));

    let mut index = c;
    index.index ^= 1;
    assert!(!verify_claim(&root, &index, &proof.siblings));

    for k in 0..proof.siblings.len() {
        let mut siblings = proof.siblings.clone();
        siblings[k][31] ^= 1;
        assert!(!verify_claim(&root, &c, &siblings), "sibling {k}");
    }

    let mut truncated = proof.siblings.clone();
    truncated.pop();
    assert!(!verify_claim(&root, &c, &truncated));
}

#[test]
fn rejects_bad_claim_sets() {
    assert_eq!(MerkleTree::build(&[]).unwrap_err(), AirdropError::EmptyInput);

    let dup = [
        RawClaim::new(aa(1), Amount::from(1u64)),
        RawClaim::new(aa(1), Amount::from(2u64)),
    ];
    assert_eq!(
        MerkleTree::build(&dup).unwrap_err(),
        AirdropError::DuplicateAddress { address: aa(1) }
    );

    let zero_amount = [RawClaim::new(aa(1), Amount::ZERO)];
    assert!(matches!(
        MerkleTree::build(&zero_amount),
        Err(AirdropError::InvalidAmount { .. })
    ));

    let zero_addr = [
        RawClaim::new(aa(1), Amount::from(1u64)),
        RawClaim::new(Address::ZERO, Amount::from(1u64)),
    ];
    assert_eq!(
        MerkleTree::build(&zero_addr).unwrap_err(),
        AirdropError::ZeroAddress { position: 1 }
    );
}

#[test]
fn bundle_verifies_after_json_round_trip() {
    let tree = MerkleTree::build(&generate_claims(11)).unwrap();
    let proofs = generate_all_proofs(&tree, &PipelineConfig::default()).unwrap();
    let json = ProofBundle::new(&tree, &proofs).to_json_pretty().unwrap();

    let bundle = ProofBundle::from_json_str(&json).unwrap();
    assert_eq!(bundle.total_claims, 11);
    let verifier = ProofVerifier::from_hex(&bundle.merkle_root).unwrap();
    for (addr, record) in &bundle.proofs {
        assert_eq!(verifier.verify_record(addr, record), Ok(true));
    }
}
