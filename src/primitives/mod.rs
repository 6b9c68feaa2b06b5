//! `Primitive` in `passata` refers to the raw hashing algorithm as
//! implemented by an external, vetted library.
//!
//! The only algorithm currently provided is `Bcrypt`, which has a `new`
//! and a `default` constructor. The former can be given a work factor and
//! creates a new dynamic instance of that parameter set, whereas the
//! latter refers to a statically referenced parameter set.
//!
//! All implementations are wrapped in a `Primitive` struct, which in
//! effect works like a trait, since it derefs to a `PrimitiveImpl`. This
//! means that whether using a new or default parameter set, the overall
//! behaviour is equivalent.

/// `Bcrypt` implementation.
///
/// The computation itself is delegated to the `bcrypt` crate.
mod bcrypt;
pub use self::bcrypt::{Bcrypt, DEFAULT_COST, MAX_COST, MIN_COST};

mod sod;
pub use self::sod::Sod;

use ring::constant_time;

use std::cmp::Ordering;
use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

use hashing::Output;
use Cleartext;

/// Password hashing primitives
///
/// Internally, primitives can either be static values, for example the
/// `lazy_static` generated default parameter set, or dynamically allocated
/// variables, which are `Arc<Box<...>>`.
///
/// Most operations are expected to be performed using the default
/// parameter set. However, the flexibility to support arbitrary work
/// factors is essential.
#[derive(Clone)]
pub struct Primitive(pub Sod<dyn PrimitiveImpl>);

impl fmt::Debug for Primitive {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:?}", self.0.deref())
    }
}

/// Trait defining the functionality of a hashing primitive.
pub trait PrimitiveImpl: fmt::Debug + Send + Sync {
    /// Compute the output of the primitive with input `password` and `salt`.
    ///
    /// `salt` must hold at least 16 bytes; only the first 16 are used.
    fn compute(&self, password: &[u8], salt: &[u8]) -> Vec<u8>;

    /// Verify the password and salt against the hash.
    ///
    /// This checks whether `compute(password, salt) == hash` without
    /// leaking, through timing, how many of the leading bytes matched.
    fn verify(&self, password: &[u8], salt: &[u8], hash: &[u8]) -> bool {
        constant_time::verify_slices_are_equal(&self.compute(password, salt), hash).is_ok()
    }

    /// The work factor this parameter set computes at.
    fn work_factor(&self) -> u32;

    /// Return algorithm type as a token-compatible identifier.
    fn hash_id(&self) -> &'static str;
}

impl<P: PrimitiveImpl + 'static> From<P> for Primitive {
    fn from(other: P) -> Self {
        Primitive(Sod::Dynamic(Arc::new(Box::new(other))))
    }
}

impl PartialEq for dyn PrimitiveImpl {
    fn eq(&self, other: &dyn PrimitiveImpl) -> bool {
        self.hash_id() == other.hash_id() && self.work_factor() == other.work_factor()
    }
}

/// Compare two primitive parameterisations by first checking for equality
/// of the hash identifiers, and then comparing the work factors.
impl PartialOrd for dyn PrimitiveImpl {
    fn partial_cmp(&self, other: &dyn PrimitiveImpl) -> Option<Ordering> {
        if self.hash_id() == other.hash_id() {
            self.work_factor().partial_cmp(&other.work_factor())
        } else {
            None
        }
    }
}

impl PartialEq for Primitive {
    fn eq(&self, other: &Primitive) -> bool {
        self.0.deref() == other.0.deref()
    }
}

impl PartialOrd for Primitive {
    fn partial_cmp(&self, other: &Primitive) -> Option<Ordering> {
        self.0.deref().partial_cmp(other.0.deref())
    }
}

impl Deref for Primitive {
    type Target = Sod<dyn PrimitiveImpl>;

    fn deref(&self) -> &Sod<dyn PrimitiveImpl> {
        &self.0
    }
}

impl Primitive {
    /// Hashes the supplied password with a freshly generated salt.
    pub fn hash(&self, password: &Cleartext) -> Output {
        let salt = ::gen_salt();
        let hash = self.compute(&password.0, &salt);
        Output {
            alg: self.clone(),
            salt,
            hash,
        }
    }

    /// Whether a hash computed with this parameter set should be upgraded
    /// to `target`.
    ///
    /// Holds when this parameter set is strictly weaker than, or not
    /// comparable to, the target.
    pub fn needs_update(&self, target: &Primitive) -> bool {
        !self.ge(target)
    }
}
