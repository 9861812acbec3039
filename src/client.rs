//! SRP client protocol engine.
//!
//! One [`SrpClient`] instance covers exactly one login attempt. The
//! external transport drives it through two round-trips:
//!
//! ```text
//! construct(group, a)      -> A                (send identity, A)
//! set_credentials(I, P, s)                     (salt, B received)
//! set_b(B)                 -> M1               (send M1)
//! check_m2(M2)             -> authenticated    (M2 received)
//! ```
//!
//! The engine performs no I/O itself. After success or failure the
//! instance is discarded; a retry must regenerate the ephemeral key.
//!
//! ```rust
//! use srp_auth::client::{generate_key, SrpClient};
//! use srp_auth::groups;
//!
//! let group = groups::lookup("3072").unwrap();
//! let mut client = SrpClient::new(group, &generate_key(32)).unwrap();
//! let a_pub = client.compute_a().unwrap().to_vec();
//! // ... transmit A, receive salt and B, then set_credentials / set_b ...
//! ```

use core::mem;

use num_bigint::BigInt;
use num_traits::Zero;
use rand::rngs::OsRng;
use rand::RngCore;
use subtle::ConstantTimeEq;

use crate::codec;
use crate::errors::{AuthenticationFailure, ProtocolError, SrpError, StateError};
use crate::groups::SrpGroup;
use crate::hasher::{HashAlgorithm, Hasher};
use crate::math;

/// Protocol progress, carrying only the fields valid in each state.
enum State {
    KeyGenerated,
    CredentialsSet {
        identity: String,
        salt: Vec<u8>,
        x: BigInt,
    },
    Completed {
        secret: Vec<u8>,
        session_key: Vec<u8>,
        m1: Vec<u8>,
        m2: Vec<u8>,
    },
    Failed,
}

/// Client half of an SRP-6a exchange, scoped to a single attempt.
pub struct SrpClient {
    params: &'static SrpGroup,
    k: BigInt,
    a: BigInt,
    a_pub: Vec<u8>,
    state: State,
}

impl SrpClient {
    /// Create a new instance from a fresh ephemeral private exponent.
    ///
    /// Computes the multiplier k = H(PAD(N) | PAD(g)) and the public value
    /// A = PAD(g^a mod N). `private_key` must come from a
    /// cryptographically secure source (see [`generate_key`]) and must
    /// never be reused across attempts.
    pub fn new(params: &'static SrpGroup, private_key: &[u8]) -> Result<Self, SrpError> {
        let a = codec::bytes_to_int(private_key);
        let k = codec::bytes_to_int(
            &Hasher::new(params.hash)
                .update(params.pad_int(&params.n))
                .update(params.pad_int(&params.g))
                .digest(),
        );
        let a_pub = params.pad_int(&math::mod_pow(&params.g, &a, &params.n)?);

        Ok(Self {
            params,
            k,
            a,
            a_pub,
            state: State::KeyGenerated,
        })
    }

    /// Bind the attempt to the user's identity, password and the
    /// server-issued salt: x = H(salt | H(identity | ":" | password)).
    pub fn set_credentials(
        &mut self,
        identity: &str,
        password: &str,
        salt: &[u8],
    ) -> Result<(), StateError> {
        if !matches!(self.state, State::KeyGenerated) {
            return Err(StateError::InvalidTransition);
        }
        let x = compute_x(self.params, identity, password, salt);
        self.state = State::CredentialsSet {
            identity: identity.to_owned(),
            salt: salt.to_vec(),
            x,
        };
        Ok(())
    }

    /// Process the server's public value B and derive the premaster
    /// secret, session key and both proofs.
    ///
    /// Aborts with [`ProtocolError`] when B lies outside (0, N) or the
    /// scrambling parameter hashes to zero; the instance then stays
    /// failed and must be discarded.
    pub fn set_b(&mut self, b_pub: &[u8]) -> Result<(), SrpError> {
        let (identity, salt, x) = match mem::replace(&mut self.state, State::Failed) {
            State::CredentialsSet { identity, salt, x } => (identity, salt, x),
            other => {
                self.state = other;
                return Err(StateError::InvalidTransition.into());
            }
        };

        let b = codec::bytes_to_int(b_pub);
        if b <= BigInt::zero() || b >= self.params.n {
            return Err(ProtocolError::ServerValueOutOfRange.into());
        }
        let b_padded = self.params.pad_int(&b);

        // u = H(PAD(A) | PAD(B))
        let u = codec::bytes_to_int(
            &self
                .hasher()
                .update(&self.a_pub)
                .update(&b_padded)
                .digest(),
        );
        if u.is_zero() {
            return Err(ProtocolError::DegenerateScrambling.into());
        }

        // S = (B - k * g^x) ^ (a + u * x) mod N
        let g_x = math::mod_pow(&self.params.g, &x, &self.params.n)?;
        let base = math::mod_reduce(&(&b - &self.k * g_x), &self.params.n)?;
        let exponent = &self.a + &u * &x;
        let secret = self
            .params
            .pad_int(&math::mod_pow(&base, &exponent, &self.params.n)?);

        let session_key = self.hasher().update(&secret).digest();

        // M1 = H( (H(N) XOR H(g)) | H(I) | salt | A | B | K )
        let identity_hash = self.hasher().update(codec::utf8_bytes(&identity)).digest();
        let m1 = self
            .hasher()
            .update(self.params_hash()?)
            .update(identity_hash)
            .update(&salt)
            .update(&self.a_pub)
            .update(&b_padded)
            .update(&session_key)
            .digest();

        // M2 = H(A | M1 | K)
        let m2 = self
            .hasher()
            .update(&self.a_pub)
            .update(&m1)
            .update(&session_key)
            .digest();

        self.state = State::Completed {
            secret,
            session_key,
            m1,
            m2,
        };
        Ok(())
    }

    /// Public ephemeral value A for transmission; available as soon as the
    /// instance exists, unless the attempt already failed.
    pub fn compute_a(&self) -> Result<&[u8], StateError> {
        match self.state {
            State::Failed => Err(StateError::Failed),
            _ => Ok(&self.a_pub),
        }
    }

    /// Client proof M1 for transmission.
    pub fn compute_m1(&self) -> Result<&[u8], StateError> {
        match &self.state {
            State::Completed { m1, .. } => Ok(m1),
            State::Failed => Err(StateError::Failed),
            _ => Err(StateError::IncompleteProtocol),
        }
    }

    /// Shared session key K = H(S).
    pub fn compute_k(&self) -> Result<&[u8], StateError> {
        match &self.state {
            State::Completed { session_key, .. } => Ok(session_key),
            State::Failed => Err(StateError::Failed),
            _ => Err(StateError::IncompleteProtocol),
        }
    }

    /// Padded premaster secret S.
    pub fn get_secret(&self) -> Result<&[u8], StateError> {
        match &self.state {
            State::Completed { secret, .. } => Ok(secret),
            State::Failed => Err(StateError::Failed),
            _ => Err(StateError::IncompleteProtocol),
        }
    }

    /// Constant-time comparison of the server's proof against the locally
    /// computed M2. The comparison runs over every byte position; a length
    /// mismatch yields `false` without touching either buffer out of
    /// bounds.
    pub fn check_m2(&self, server_m2: &[u8]) -> Result<bool, StateError> {
        match &self.state {
            State::Completed { m2, .. } => Ok(m2.as_slice().ct_eq(server_m2).into()),
            State::Failed => Err(StateError::Failed),
            _ => Err(StateError::IncompleteProtocol),
        }
    }

    /// [`check_m2`](Self::check_m2) as a verdict: a mismatch is reported
    /// as [`AuthenticationFailure::ServerImpersonation`], to be kept
    /// distinct from a server-side rejection of M1
    /// ([`AuthenticationFailure::VerifierRejected`]).
    pub fn verify_server(&self, server_m2: &[u8]) -> Result<(), SrpError> {
        if self.check_m2(server_m2)? {
            Ok(())
        } else {
            Err(AuthenticationFailure::ServerImpersonation.into())
        }
    }

    fn hasher(&self) -> Hasher {
        Hasher::new(self.params.hash)
    }

    // H(PAD(N)) XOR H(PAD(g))
    fn params_hash(&self) -> Result<Vec<u8>, SrpError> {
        let hn = self
            .hasher()
            .update(self.params.pad_int(&self.params.n))
            .digest();
        let hg = self
            .hasher()
            .update(self.params.pad_int(&self.params.g))
            .digest();
        Ok(codec::xor(&hn, &hg)?)
    }
}

// x = H(salt | H(identity | ":" | password))
fn compute_x(params: &SrpGroup, identity: &str, password: &str, salt: &[u8]) -> BigInt {
    let identity_hash = Hasher::new(params.hash)
        .update(codec::utf8_bytes(identity))
        .update(b":")
        .update(codec::utf8_bytes(password))
        .digest();
    codec::bytes_to_int(
        &Hasher::new(params.hash)
            .update(salt)
            .update(identity_hash)
            .digest(),
    )
}

/// Password verifier v = PAD(g^x mod N) for registration.
///
/// Independent of the login state machine; the provisioning flow stores
/// {identity, salt, verifier} server-side over a protected channel.
pub fn compute_verifier(
    params: &'static SrpGroup,
    identity: &str,
    password: &str,
    salt: &[u8],
) -> Result<Vec<u8>, SrpError> {
    let x = compute_x(params, identity, password, salt);
    Ok(params.pad_int(&math::mod_pow(&params.g, &x, &params.n)?))
}

/// Random key material from the operating system's secure source, for
/// ephemeral private exponents and salts. 32 bytes gives the 256-bit
/// minimum the protocol expects for `a`.
pub fn generate_key(length: usize) -> Vec<u8> {
    let mut buf = vec![0u8; length];
    OsRng.fill_bytes(&mut buf);
    buf
}

/// Post-login proof over the session secret: H(identity | secret).
///
/// A downstream consumer of the engine's outputs, compared against the
/// value the server derives for an established session.
pub fn session_proof(identity: &str, secret: &[u8], algorithm: HashAlgorithm) -> Vec<u8> {
    Hasher::new(algorithm)
        .update(codec::utf8_bytes(identity))
        .update(secret)
        .digest()
}
