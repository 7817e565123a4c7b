// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Serialization between computed values and their stored wire form.
//!
//! Stores hold opaque strings; this module owns the mapping to and from
//! JSON, so backends never need to understand the cached types.

use serde::{Serialize, de::DeserializeOwned};

pub(crate) fn encode<V: Serialize>(value: &V) -> Result<String, serde_json::Error> {
    serde_json::to_string(value)
}

pub(crate) fn decode<V: DeserializeOwned>(raw: &str) -> Result<V, serde_json::Error> {
    serde_json::from_str(raw)
}
