//! Checks that a `SparseSet` agrees with a reference model on arbitrary
//! operation scripts.

#![no_main]

use libfuzzer_sys::fuzz_target;
use sparse_set::debug_utils;
use sparse_set_fuzz::TestCase;

fuzz_target!(|t: TestCase| {
    log::trace!("Script:\n{}", t.script);

    debug_utils::validate_script(&t.script).unwrap();
    let stats = debug_utils::check_script(&t.script).unwrap();
    log::trace!("{stats}");
});
