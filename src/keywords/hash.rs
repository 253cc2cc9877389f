use crate::constants::keywords::HASH;
use crate::convert::EnumConverter;
use crate::registry::{ElementDescriptor, PropertySpec};
use sha2::{Digest, Sha224, Sha256, Sha384, Sha512};

/// `{hash?value=...&algorithm=sha256}`: lowercase hex digest of `value`.
pub fn hash() -> ElementDescriptor {
    ElementDescriptor::new(HASH, |bound, _| {
        let input = bound.get_str("value").unwrap_or_default().as_bytes();
        Ok(match bound.get_str("algorithm").unwrap_or("sha256") {
            "sha224" => hex::encode(Sha224::digest(input)),
            "sha384" => hex::encode(Sha384::digest(input)),
            "sha512" => hex::encode(Sha512::digest(input)),
            _ => hex::encode(Sha256::digest(input)),
        })
    })
    .property(PropertySpec::new("value").alias("text"))
    .property(
        PropertySpec::new("algorithm")
            .alias("alg")
            .converter(EnumConverter::new(
                "hash algorithm",
                &["sha224", "sha256", "sha384", "sha512"],
            ))
            .default_value("sha256"),
    )
}
