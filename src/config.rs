//! # Configuration
//!
//! Included here are methods to setup and configure `passata`.
//! Currently, this refers to the choice of default work factor for new
//! hash computations.
//!
//! Configuration can be specified in two ways: through configuration files,
//! or programmatically with `Config::with_work_factor`. A `Config` value
//! exposes the same hashing operations as the crate root, evaluated against
//! its own work factor instead of the global default.
//!
//! ```
//! use passata::config::Config;
//!
//! let config = Config::with_work_factor(10).unwrap();
//! let hash = config.hash_password("hunter2").unwrap();
//! assert!(hash.starts_with("$2b$10$"));
//! ```

use lazy_static;
use ring::hkdf;
use ring::rand::{self, SecureRandom};
use serde_yaml;

use errors::*;
use hashing::Output;
use primitives::{Bcrypt, Primitive, Sod, DEFAULT_COST};
use Cleartext;

use std::default::Default;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::sync::{Arc, Mutex};

lazy_static! {
    /// Global source of randomness for generating salts
    pub static ref RANDOMNESS_SOURCE: Sod<dyn SecureRandom + Send + Sync> = {
        lazy_static::initialize(&RAND_BACKUP);
        Sod::Dynamic(Arc::new(Box::new(rand::SystemRandom::new())))
    };

    /// Backup PRNG source for when `SystemRandom` is unavailable
    static ref RAND_BACKUP: Arc<Mutex<BackupPrng>> = {
        let rng = rand::SystemRandom::new();
        let mut salt = [0_u8; 32];
        let mut seed = [0_u8; 32];
        rng.fill(&mut salt).expect("could not generate any randomness");
        rng.fill(&mut seed).expect("could not generate any randomness");
        Arc::new(Mutex::new(BackupPrng { salt, seed }))
    };

    /// Default primitive used for new hash computations
    pub static ref DEFAULT_PRIM: Primitive = Bcrypt::default();

    /// Default configuration set.
    pub static ref DEFAULT_CONFIG: Config = Config::default();
}

/// Holds possible configuration options
/// See the [module level documentation](index.html) for more information.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Config {
    #[serde(default = "default_work_factor")]
    work_factor: u32,
    #[serde(skip, default = "Bcrypt::default")]
    primitive: Primitive,
}

fn default_work_factor() -> u32 {
    DEFAULT_COST
}

impl Default for Config {
    fn default() -> Self {
        Self {
            work_factor: DEFAULT_COST,
            primitive: DEFAULT_PRIM.clone(),
        }
    }
}

impl Config {
    /// Create a new `Config` hashing at the supplied work factor.
    ///
    /// Fails with `ErrorKind::UnsupportedCost` if `work_factor` lies outside
    /// the supported range `4..=31`.
    pub fn with_work_factor(work_factor: u32) -> Result<Self> {
        Ok(Self {
            work_factor,
            primitive: Bcrypt::new(work_factor)?,
        })
    }

    /// Generates a `Config` from a YAML configuration file.
    ///
    /// Config files can be generated using the `Config::to_string` method on
    /// an existing config.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path.as_ref());
        if let Ok(file) = file {
            let reader = BufReader::new(file);
            let mut config: Self = serde_yaml::from_reader(reader)?;
            config.primitive = Bcrypt::new(config.work_factor)?;
            trace!("imported config as: {:?}", config);
            Ok(config)
        } else {
            info!("could not open config file {:?}: {:?}", path.as_ref(), file);
            Err("could not open config file".into())
        }
    }

    /// The work factor new hashes are computed at.
    pub fn work_factor(&self) -> u32 {
        self.work_factor
    }

    /// Set the default work factor for new hashes.
    pub fn set_work_factor(&mut self, work_factor: u32) -> Result<()> {
        self.primitive = Bcrypt::new(work_factor)?;
        self.work_factor = work_factor;
        Ok(())
    }

    /// Generates a hash for a given password at the configured work factor.
    ///
    /// Will automatically generate a random salt. In the extreme case that
    /// the default source of randomness is unavailable, this will fallback
    /// to a seed generated when the library is initialised. An error will be
    /// logged when this happens.
    pub fn hash_password(&self, password: &str) -> Result<String> {
        if password.is_empty() {
            return Err(ErrorKind::InvalidInput.into());
        }
        let pwd_hash = self.primitive.hash(&Cleartext::from(password));
        Ok(pwd_hash.to_string())
    }

    /// Verifies a supplied password against a previously computed password
    /// hash, and performs an in-place update of the hash value if the stored
    /// work factor is below the configured one. Hence this needs to take a
    /// mutable `String` reference.
    pub fn verify_password_update_hash(&self, hash: &mut String, password: &str) -> Result<bool> {
        let pwd_hash: Output = hash.as_str().parse()?;
        if pwd_hash.verify(&Cleartext::from(password)) {
            if pwd_hash.alg.needs_update(&self.primitive) {
                *hash = self.hash_password(password)?;
            }
            Ok(true)
        } else {
            Ok(false)
        }
    }

    /// Serialize the configuration as YAML
    pub fn to_string(&self) -> String {
        serde_yaml::to_string(&self).expect("failed to serialize config")
    }
}

struct BackupPrng {
    salt: [u8; 32],
    seed: [u8; 32],
}

struct OkmLen(usize);

impl hkdf::KeyType for OkmLen {
    fn len(&self) -> usize {
        self.0
    }
}

const BACKUP_PRNG_INFO: &'static [&'static [u8]] = &[b"passata backup PRNG"];

impl BackupPrng {
    fn gen_salt(&mut self) -> Vec<u8> {
        let mut output = [0_u8; 48];
        hkdf::Salt::new(hkdf::HKDF_SHA256, &self.salt)
            .extract(&self.seed)
            .expand(BACKUP_PRNG_INFO, OkmLen(48))
            .and_then(|okm| okm.fill(&mut output))
            .expect("could not expand backup PRNG seed");
        self.seed.copy_from_slice(&output[16..]);
        output[..16].to_vec()
    }
}

pub(crate) fn backup_gen_salt() -> Vec<u8> {
    RAND_BACKUP
        .lock()
        .expect("could not acquire lock on RAND_BACKUP")
        .gen_salt()
}

#[cfg(test)]
mod test {
    use super::*;
    use verify_password;

    #[test]
    fn use_config() {
        let config = Config::with_work_factor(10).unwrap();
        let hash = config.hash_password("hunter2").unwrap();
        assert!(hash.starts_with("$2b$10$"));
        assert!(verify_password(&hash, "hunter2").unwrap());
    }

    #[test]
    fn default_work_factor_is_embedded() {
        let hash = DEFAULT_CONFIG.hash_password("hunter2").unwrap();
        assert!(hash.starts_with("$2b$12$"));
    }

    #[test]
    fn config_roundtrip() {
        let config = Config::with_work_factor(11).unwrap();
        let serialized = config.to_string();
        assert!(serialized.contains("work_factor: 11"));
        let parsed: Config = serde_yaml::from_str(&serialized).unwrap();
        assert_eq!(parsed.work_factor(), 11);
    }

    #[test]
    fn rejects_out_of_range_work_factor() {
        assert!(Config::with_work_factor(3).is_err());
        assert!(Config::with_work_factor(32).is_err());
    }

    #[test]
    fn backup_prng_outputs_fresh_salts() {
        let first = backup_gen_salt();
        let second = backup_gen_salt();
        assert_eq!(first.len(), 16);
        assert_ne!(first, second);
    }
}
