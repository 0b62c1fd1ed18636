// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzz target for varint (LEB128) encoding/decoding.
//!
//! Doc deltas, term frequencies and field lengths in snapshot files are all
//! varints. Decoding garbage must return Err, never panic.

#![no_main]

use libfuzzer_sys::fuzz_target;
use lexis::binary::{decode_varint, encode_varint};

fuzz_target!(|data: &[u8]| {
    if let Ok((value, consumed)) = decode_varint(data) {
        assert!(consumed <= 10, "varint consumed {} bytes", consumed);
        assert!(consumed <= data.len());

        let mut reencoded = Vec::new();
        encode_varint(value, &mut reencoded);
        let (redecoded, reconsumed) =
            decode_varint(&reencoded).expect("re-encoded value must decode");
        assert_eq!(value, redecoded);
        assert_eq!(reconsumed, reencoded.len());
    }
});
