//! Key Pair Generator
//!
//! Prints a fresh Ed25519 key pair for the signing service. Put the private
//! key in `PRIVATE_KEY`; register the public key with the contracts.

use onematch::proof::{generate_keypair, move_vector_literal};
use rand::rngs::OsRng;

fn main() {
    let (secret, public) = generate_keypair(&mut OsRng);

    let public_bytes = match hex::decode(&public) {
        Ok(bytes) => bytes,
        Err(e) => {
            eprintln!("Generated an unreadable public key: {}", e);
            std::process::exit(1);
        }
    };

    println!("PRIVATE_KEY={}", secret);
    println!();
    println!("Public key (hex):  {}", public);
    println!("Public key (Move): {}", move_vector_literal(&public_bytes));
    println!();
    println!("Keep the private key secret. Anyone holding it can sign scores.");
}
