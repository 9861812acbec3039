//! Client-side implementation of the [SRP-6a] password-authenticated key
//! exchange.
//!
//! A client proves knowledge of a password to a verifying server, the
//! server proves itself back, and both sides derive an identical session
//! key — without the password or any password-equivalent secret crossing
//! the wire. This crate is the cryptographic engine only: the
//! arbitrary-precision [`math`], the incremental [`hasher`], the byte
//! [`codec`] with its `PAD()` discipline, the [`groups`] registry and the
//! [`client`] state machine that combines them. Transport, session storage
//! and account provisioning are external collaborators; the engine never
//! performs I/O.
//!
//! Correctness here is all byte layout: every integer entering a hash is
//! encoded big-endian and left-zero-padded to the modulus length, and the
//! proof values M1/M2 are hashes over exactly ordered concatenations that
//! must match the peer's bit for bit.
//!
//! # Usage
//!
//! ```rust
//! use srp_auth::client::{generate_key, SrpClient};
//! use srp_auth::groups;
//!
//! let group = groups::lookup("3072").unwrap();
//!
//! // round-trip 1: send identity and A, receive salt and B
//! let mut client = SrpClient::new(group, &generate_key(32)).unwrap();
//! let a_pub = client.compute_a().unwrap().to_vec();
//! # let salt = vec![7u8; 32];
//! # let b_pub = vec![2u8];
//!
//! client.set_credentials("alice", "password123", &salt).unwrap();
//! client.set_b(&b_pub).unwrap();
//!
//! // round-trip 2: send M1, receive the server's verdict and M2
//! let m1 = client.compute_m1().unwrap();
//! let session_key = client.compute_k().unwrap();
//! ```
//!
//! For registration, [`client::compute_verifier`] derives the verifier the
//! server stores in place of the password.
//!
//! [SRP-6a]: https://datatracker.ietf.org/doc/html/rfc5054

#![forbid(unsafe_code)]
#![warn(rust_2018_idioms)]

pub mod client;
pub mod codec;
pub mod errors;
pub mod groups;
pub mod hasher;
pub mod math;

pub use client::SrpClient;
pub use errors::{AuthenticationFailure, DomainError, ProtocolError, SrpError, StateError};
pub use groups::SrpGroup;
pub use hasher::{HashAlgorithm, Hasher};
