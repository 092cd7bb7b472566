#![no_main]

use libfuzzer_sys::fuzz_target;
use rowpack::{decode_with_options, CodecOptions, Schema};

fuzz_target!(|data: &[u8]| {
    let Ok(schema) = Schema::parse([("id", "bigint"), ("age", "int"), ("name", "varchar255")])
    else {
        return;
    };

    let _ = decode_with_options(data, &schema, CodecOptions::strict());
    let _ = decode_with_options(data, &schema, CodecOptions::lenient());
});
