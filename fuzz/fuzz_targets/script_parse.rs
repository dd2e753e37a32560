//! Checks that dumping a script and then re-parsing it is lossless.

#![no_main]

use libfuzzer_sys::fuzz_target;
use sparse_set::debug_utils::OpScript;
use sparse_set_fuzz::TestCase;

fuzz_target!(|t: TestCase| {
    // Ensure the logger is initialized.
    let _ = pretty_env_logger::try_init();

    let dumped = t.script.to_string();
    let parsed = OpScript::parse(&dumped).unwrap();
    assert_eq!(parsed, t.script);
    assert_eq!(parsed.to_string(), dumped);
});
