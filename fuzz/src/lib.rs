use std::fmt;

use arbitrary::{Arbitrary, Result, Unstructured};
use sparse_set::debug_utils::{ArbitraryScriptConfig, OpScript};

/// Common implementation of a test case used by all fuzz targets.
pub struct TestCase {
    pub script: OpScript,
}

impl Arbitrary<'_> for TestCase {
    fn arbitrary(u: &mut Unstructured) -> Result<Self> {
        // Ensure the logger is initialized.
        let _ = pretty_env_logger::try_init();

        // Mostly tiny identifier spaces so that operations keep hitting the
        // same identifiers, with the occasional larger one.
        let config = if u.ratio(1, 8)? {
            ArbitraryScriptConfig {
                num_ops: 0..=1000,
                max_supported: 1..=4096,
                values: 0..=u32::MAX,
            }
        } else {
            ArbitraryScriptConfig::default()
        };
        let script = OpScript::arbitrary_with_config(u, config)?;
        log::trace!("Generated script with {} ops", script.len());
        Ok(TestCase { script })
    }
}

impl fmt::Debug for TestCase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.script)
    }
}
