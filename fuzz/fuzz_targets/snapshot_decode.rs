// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzz target for snapshot file decoding.
//!
//! A snapshot file on disk can be truncated, bit-flipped or just not ours.
//! `decode_snapshot` must reject it with an error, never panic or allocate
//! without bound. Whatever does decode must survive an encode/decode cycle.

#![no_main]

use libfuzzer_sys::fuzz_target;
use lexis::binary::{decode_snapshot, encode_snapshot};

fuzz_target!(|data: &[u8]| {
    let Ok(snapshot) = decode_snapshot(data) else {
        return;
    };
    // Decoding only checks structure; validation may still reject it.
    let _ = snapshot.validate();

    // Varints need not be minimal on input, so compare canonical encodings.
    let bytes = encode_snapshot(&snapshot).expect("decoded snapshot must encode");
    let again = decode_snapshot(&bytes).expect("canonical encoding must decode");
    let bytes_again = encode_snapshot(&again).expect("decoded snapshot must encode");
    assert_eq!(bytes, bytes_again);
});
