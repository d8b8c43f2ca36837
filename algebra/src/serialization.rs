use crate::prelude::*;

/// Helper trait to serialize objects that have a canonical byte encoding.
pub trait PghrFromToBytes: Sized {
    /// Convert to bytes.
    fn pghr_to_bytes(&self) -> Vec<u8>;
    /// Reconstruct from bytes.
    fn pghr_from_bytes(bytes: &[u8]) -> Result<Self>;
}

/// Module for serialization for PGHR objects.
pub mod pghr_obj_serde {
    use crate::serialization::PghrFromToBytes;
    use crate::utils::{b64dec, b64enc};
    use ark_std::vec::Vec;
    use serde::de::SeqAccess;
    use serde::de::Visitor;
    use serde::Deserializer;
    use serde::Serializer;

    /// The visitor for bytes, accepting sequences, raw bytes and base64 strings.
    pub struct BytesVisitor;

    impl<'de> Visitor<'de> for BytesVisitor {
        type Value = Vec<u8>;

        fn expecting(&self, formatter: &mut ::core::fmt::Formatter<'_>) -> core::fmt::Result {
            formatter.write_str("a valid PghrFromToBytes object")
        }

        fn visit_seq<V>(self, mut seq: V) -> core::result::Result<Vec<u8>, V::Error>
        where
            V: SeqAccess<'de>,
        {
            let mut vec: Vec<u8> = vec![];
            while let Some(x) = seq.next_element().map_err(serde::de::Error::custom)? {
                vec.push(x);
            }
            Ok(vec)
        }

        fn visit_bytes<E>(self, v: &[u8]) -> core::result::Result<Vec<u8>, E> {
            let mut vec: Vec<u8> = vec![];
            vec.extend_from_slice(v);
            Ok(vec)
        }

        fn visit_str<E>(self, v: &str) -> core::result::Result<Vec<u8>, E>
        where
            E: serde::de::Error,
        {
            b64dec(v).map_err(serde::de::Error::custom)
        }
    }

    /// Serialize the object as a base64 string or as raw bytes.
    pub fn serialize<S, T>(obj: &T, serializer: S) -> core::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
        T: PghrFromToBytes,
    {
        let bytes = obj.pghr_to_bytes();
        if serializer.is_human_readable() {
            serializer.serialize_str(&b64enc(&bytes))
        } else {
            serializer.serialize_bytes(&bytes[..])
        }
    }

    /// Deserialize the object from a base64 string or from raw bytes.
    pub fn deserialize<'de, D, T>(deserializer: D) -> core::result::Result<T, D::Error>
    where
        D: Deserializer<'de>,
        T: PghrFromToBytes,
    {
        if deserializer.is_human_readable() {
            let bytes = deserializer.deserialize_str(BytesVisitor)?;
            T::pghr_from_bytes(bytes.as_slice()).map_err(serde::de::Error::custom)
        } else {
            let v = deserializer.deserialize_bytes(BytesVisitor)?;
            T::pghr_from_bytes(v.as_slice()).map_err(serde::de::Error::custom)
        }
    }
}

/// Implement `serde` for a type through its `PghrFromToBytes` encoding.
#[macro_export]
macro_rules! serialize_deserialize {
    ($t:ident) => {
        impl ::serde::Serialize for $t {
            fn serialize<S>(&self, serializer: S) -> core::result::Result<S::Ok, S::Error>
            where
                S: ::serde::Serializer,
            {
                $crate::serialization::pghr_obj_serde::serialize(self, serializer)
            }
        }

        impl<'de> ::serde::Deserialize<'de> for $t {
            fn deserialize<D>(deserializer: D) -> core::result::Result<Self, D::Error>
            where
                D: ::serde::Deserializer<'de>,
            {
                $crate::serialization::pghr_obj_serde::deserialize(deserializer)
            }
        }
    };
}

macro_rules! to_from_bytes_group {
    ($g:ident) => {
        impl PghrFromToBytes for $g {
            fn pghr_to_bytes(&self) -> Vec<u8> {
                self.to_compressed_bytes()
            }
            fn pghr_from_bytes(bytes: &[u8]) -> Result<$g> {
                $g::from_compressed_bytes(bytes)
            }
        }
    };
}

use crate::bn254::{BN254Gt, BN254G1, BN254G2};

to_from_bytes_group!(BN254G1);
to_from_bytes_group!(BN254G2);
to_from_bytes_group!(BN254Gt);

serialize_deserialize!(BN254G1);
serialize_deserialize!(BN254G2);
serialize_deserialize!(BN254Gt);
