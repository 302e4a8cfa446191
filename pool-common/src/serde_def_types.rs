//! Adapters for de/serializing foreign arkworks types in the JSON layout
//! snarkjs uses for verification keys: decimal coordinate strings, with G1
//! points as `[x, y, z]` and G2 points as `[[x1, x2], [y1, y2], [z1, z2]]`

use alloc::string::{String, ToString};
use core::str::FromStr;

use ark_ec::AffineRepr;
use ruint::aliases::U256;
use serde::{de::Error as DeError, Deserialize, Deserializer, Serialize, Serializer};
use serde_with::{DeserializeAs, SerializeAs};

use crate::{
    curve::{make_g1, make_g2, uint_from_base_field},
    types::{G1Affine, G1BaseField, G2Affine},
};

/// Parses a decimal coordinate string
fn parse_uint<E: DeError>(s: &str) -> Result<U256, E> {
    U256::from_str(s).map_err(|_| E::custom("invalid coordinate"))
}

/// Formats a base field element as a decimal string
fn format_base(value: &G1BaseField) -> String {
    uint_from_base_field(value).to_string()
}

/// A G1 point as `[x, y, "1"]`, or `["0", "1", "0"]` for the point at infinity
pub struct SnarkjsG1;

impl SerializeAs<G1Affine> for SnarkjsG1 {
    fn serialize_as<S: Serializer>(source: &G1Affine, serializer: S) -> Result<S::Ok, S::Error> {
        let coords = match source.xy() {
            Some((x, y)) => [format_base(x), format_base(y), "1".to_string()],
            None => ["0".to_string(), "1".to_string(), "0".to_string()],
        };
        coords.serialize(serializer)
    }
}

impl<'de> DeserializeAs<'de, G1Affine> for SnarkjsG1 {
    fn deserialize_as<D: Deserializer<'de>>(deserializer: D) -> Result<G1Affine, D::Error> {
        let [x, y, z] = <[String; 3]>::deserialize(deserializer)?;
        match parse_uint::<D::Error>(&z)? {
            z if z.is_zero() => Ok(G1Affine::identity()),
            z if z == U256::from(1u64) => {
                make_g1(parse_uint::<D::Error>(&x)?, parse_uint::<D::Error>(&y)?).map_err(|_| D::Error::custom("invalid G1 point"))
            },
            _ => Err(D::Error::custom("G1 point is not in affine form")),
        }
    }
}

/// A G2 point as `[[x1, x2], [y1, y2], ["1", "0"]]`, where `x = x1 + x2 * u`
pub struct SnarkjsG2;

impl SerializeAs<G2Affine> for SnarkjsG2 {
    fn serialize_as<S: Serializer>(source: &G2Affine, serializer: S) -> Result<S::Ok, S::Error> {
        let coords = match source.xy() {
            Some((x, y)) => [
                [format_base(&x.c0), format_base(&x.c1)],
                [format_base(&y.c0), format_base(&y.c1)],
                ["1".to_string(), "0".to_string()],
            ],
            None => [
                ["0".to_string(), "0".to_string()],
                ["1".to_string(), "0".to_string()],
                ["0".to_string(), "0".to_string()],
            ],
        };
        coords.serialize(serializer)
    }
}

impl<'de> DeserializeAs<'de, G2Affine> for SnarkjsG2 {
    fn deserialize_as<D: Deserializer<'de>>(deserializer: D) -> Result<G2Affine, D::Error> {
        let [[x1, x2], [y1, y2], [z1, z2]] = <[[String; 2]; 3]>::deserialize(deserializer)?;
        let z1 = parse_uint::<D::Error>(&z1)?;
        let z2 = parse_uint::<D::Error>(&z2)?;
        if !z2.is_zero() {
            return Err(D::Error::custom("G2 point is not in affine form"));
        }

        match z1 {
            z if z.is_zero() => Ok(G2Affine::identity()),
            z if z == U256::from(1u64) => make_g2(
                parse_uint::<D::Error>(&x1)?,
                parse_uint::<D::Error>(&x2)?,
                parse_uint::<D::Error>(&y1)?,
                parse_uint::<D::Error>(&y2)?,
            )
            .map_err(|_| D::Error::custom("invalid G2 point")),
            _ => Err(D::Error::custom("G2 point is not in affine form")),
        }
    }
}

#[cfg(test)]
mod tests {
    use ark_ec::AffineRepr;
    use serde::{Deserialize, Serialize};
    use serde_with::serde_as;

    use crate::types::{G1Affine, G2Affine};

    use super::{SnarkjsG1, SnarkjsG2};

    /// A wrapper exercising both adapters
    #[serde_as]
    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct Points {
        /// A G1 point
        #[serde_as(as = "SnarkjsG1")]
        g1: G1Affine,
        /// A G2 point
        #[serde_as(as = "SnarkjsG2")]
        g2: G2Affine,
    }

    #[test]
    fn test_generator_json_layout() {
        let json = r#"{
            "g1": ["1", "2", "1"],
            "g2": [
                ["10857046999023057135944570762232829481370756359578518086990519993285655852781",
                 "11559732032986387107991004021392285783925812861821192530917403151452391805634"],
                ["8495653923123431417604973247489272438418190587263600148770280649306958101930",
                 "4082367875863433681332203403145435568316851327593401208105741076214120093531"],
                ["1", "0"]
            ]
        }"#;

        let points: Points = serde_json::from_str(json).unwrap();
        assert_eq!(points.g1, G1Affine::generator());
        assert_eq!(points.g2, G2Affine::generator());

        let reencoded = serde_json::to_string(&points).unwrap();
        let decoded: Points = serde_json::from_str(&reencoded).unwrap();
        assert_eq!(decoded, points);
    }

    #[test]
    fn test_rejects_off_curve_point() {
        let json = r#"{
            "g1": ["1", "3", "1"],
            "g2": [["0", "0"], ["1", "0"], ["0", "0"]]
        }"#;
        assert!(serde_json::from_str::<Points>(json).is_err());
    }

    #[test]
    fn test_identity_encoding() {
        let points = Points { g1: G1Affine::identity(), g2: G2Affine::identity() };
        let json = serde_json::to_string(&points).unwrap();
        assert!(json.contains(r#""g1":["0","1","0"]"#));

        let decoded: Points = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, points);
    }
}
