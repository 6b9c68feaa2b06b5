pub use self::native::{Bcrypt, DEFAULT_COST, MAX_COST, MIN_COST};

mod native {
    extern crate bcrypt;

    use errors::*;
    use hashing::BCRYPT_B64;
    use primitives::{Primitive, PrimitiveImpl};
    use primitives::sod::Sod;

    use std::fmt;
    use std::sync::Arc;

    /// Smallest work factor the algorithm accepts.
    pub const MIN_COST: u32 = 4;
    /// Largest work factor the algorithm accepts.
    pub const MAX_COST: u32 = 31;
    /// Work factor used when none is configured.
    pub const DEFAULT_COST: u32 = 12;

    /// `bcrypt` parameter set.
    ///
    /// Holds the cost value, also known as the work factor.
    /// This implementation is backed by the `bcrypt` crate.
    #[derive(Clone)]
    pub struct Bcrypt {
        cost: u32,
    }

    lazy_static! {
        static ref DEFAULT: Arc<Box<dyn PrimitiveImpl>> =
            Arc::new(Box::new(Bcrypt { cost: DEFAULT_COST }));
    }

    impl PrimitiveImpl for Bcrypt {
        fn compute(&self, password: &[u8], salt: &[u8]) -> Vec<u8> {
            let mut salt16 = [0_u8; 16];
            salt16.copy_from_slice(&salt[..16]);
            // The bcrypt crate null-terminates and truncates to 72 bytes
            // internally, matching the reference implementation.
            let parts = bcrypt::hash_with_salt(password, self.cost, &salt16)
                .expect("bcrypt rejected an already-validated parameter set");
            let encoded = parts.format_for_version(bcrypt::Version::TwoB);
            let hash64 = &encoded[encoded.len() - 31..];
            BCRYPT_B64
                .decode(hash64.as_bytes())
                .expect("bcrypt emitted an undecodable hash segment")
        }

        fn work_factor(&self) -> u32 {
            self.cost
        }

        fn hash_id(&self) -> &'static str {
            "2b"
        }
    }

    impl fmt::Debug for Bcrypt {
        fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
            write!(f, "Bcrypt, cost: {:?}", self.cost)
        }
    }

    impl Bcrypt {
        /// Construct a new `Bcrypt` parameter set.
        ///
        /// Fails with `ErrorKind::UnsupportedCost` if `cost` lies outside
        /// `MIN_COST..=MAX_COST`.
        pub fn new(cost: u32) -> Result<Primitive> {
            if cost < MIN_COST || cost > MAX_COST {
                return Err(ErrorKind::UnsupportedCost(cost).into());
            }
            Ok(Self { cost }.into())
        }

        /// Get the default `Bcrypt` parameter set.
        pub fn default() -> Primitive {
            Primitive(Sod::Dynamic((*DEFAULT).clone()))
        }
    }
}

benches!(Bcrypt);

#[cfg(test)]
mod bcrypt_test {
    use hashing::Output;
    use verify_password;

    #[test]
    fn sanity_check() {
        let params = super::Bcrypt::new(5).unwrap();
        println!("{:?}", params);
        let salt = ::get_salt();
        let hash = params.compute(b"hunter2", &salt);
        let hash2 = params.compute(b"hunter2", &salt);
        assert_eq!(hash, hash2);
        assert_eq!(hash.len(), 23);
        let out = Output {
            alg: params,
            salt,
            hash,
        };
        println!("{:?}", out.to_string());
    }

    #[test]
    fn cost_bounds() {
        assert!(super::Bcrypt::new(super::MIN_COST).is_ok());
        assert!(super::Bcrypt::new(super::MAX_COST).is_ok());
        assert!(super::Bcrypt::new(super::MIN_COST - 1).is_err());
        assert!(super::Bcrypt::new(super::MAX_COST + 1).is_err());
    }

    #[test]
    fn verifies_bcrypt_hashes() {
        let hash = "$2a$10$ckjEeyTD6estWyoofn4EROM9Ik2PqVcfcrepX.uGp6.aqRdCMN/Oe";
        assert!(verify_password(hash, "hunter2").unwrap());
    }

    fn openwall_test(hash: &str, password: &[u8]) {
        let pwd_hash: Output = hash.parse().unwrap();
        assert_eq!(pwd_hash.hash,
                   pwd_hash.alg.compute(password, &pwd_hash.salt));
    }

    // Test against the openwall test vectors.
    // Note that we are not compatible with the broken "2x" variant hashes.
    #[test]
    fn openwall_test_vectors() {
        openwall_test("$2a$05$CCCCCCCCCCCCCCCCCCCCC.E5YPO9kmyuRGyh0XouQYb4YMJKvyOeW",
                      b"U*U");
        openwall_test("$2a$05$CCCCCCCCCCCCCCCCCCCCC.VGOzA784oUp/Z0DY336zx7pLYAy0lwK",
                      b"U*U*");
        openwall_test("$2a$05$XXXXXXXXXXXXXXXXXXXXXOAcXxm9kjPGEMsLznoKqmqw7tc8WCx4a",
                      b"U*U*U");
        openwall_test("$2a$05$CCCCCCCCCCCCCCCCCCCCC.7uG0VCzI2bS7j6ymqJi9CdcdxiRTWNy",
                      b"");
        openwall_test("$2y$05$/OK.fbVrR/bpIqNJ5ianF.Sa7shbm4.OzKpvFnX1pQLmQW96oUlCq",
                      b"\xa3");
    }

    #[cfg(feature = "long_tests")]
    #[test]
    fn openwall_long_password_vectors() {
        openwall_test("$2a$05$abcdefghijklmnopqrstuu5s2v8.iXieOjg/.AySBTTZIIVFJeBui",
                      b"0123456789abcdefghijklmnopqrstuvwxyz\
             ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789\
             chars after 72 are ignored");
        openwall_test("$2a$05$/OK.fbVrR/bpIqNJ5ianF.swQOIzjOiJ9GHEPuhEkvqrUyvWhEMx6",
                      b"\xaa\xaa\xaa\xaa\xaa\xaa\xaa\xaa\xaa\xaa\xaa\xaa\
             \xaa\xaa\xaa\xaa\xaa\xaa\xaa\xaa\xaa\xaa\xaa\xaa\
             \xaa\xaa\xaa\xaa\xaa\xaa\xaa\xaa\xaa\xaa\xaa\xaa\
             \xaa\xaa\xaa\xaa\xaa\xaa\xaa\xaa\xaa\xaa\xaa\xaa\
             \xaa\xaa\xaa\xaa\xaa\xaa\xaa\xaa\xaa\xaa\xaa\xaa\
             \xaa\xaa\xaa\xaa\xaa\xaa\xaa\xaa\xaa\xaa\xaa\xaa\
             chars after 72 are ignored as usual");
    }
}
