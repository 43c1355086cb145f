mod trust_proofs;

pub use trust_proofs::{TrustProof, TrustProofsController};
