use core::ops::RangeInclusive;

use arbitrary::{Arbitrary, Result, Unstructured};

use super::{Op, OpScript};

/// Configuration options for [`OpScript::arbitrary_with_config`].
///
/// These are ranges from which a value is arbitrarily chosen when generating a
/// script.
///
/// It's generally fine to just use `Default::default` for this.
#[derive(Debug, Clone)]
pub struct ArbitraryScriptConfig {
    /// Number of operations in the script.
    pub num_ops: RangeInclusive<usize>,

    /// Largest number of identifiers the set is grown to support. Keeping
    /// this small makes identifiers collide often.
    pub max_supported: RangeInclusive<usize>,

    /// Values stored in the set.
    pub values: RangeInclusive<u32>,
}

impl Default for ArbitraryScriptConfig {
    fn default() -> Self {
        Self {
            num_ops: 0..=200,
            max_supported: 1..=64,
            values: 0..=1000,
        }
    }
}

impl<'a> Arbitrary<'a> for OpScript {
    fn arbitrary(u: &mut Unstructured<'a>) -> Result<Self> {
        OpScript::arbitrary_with_config(u, Default::default())
    }
}

impl OpScript {
    /// Constructs a randomly-generated `OpScript`.
    ///
    /// The returned `OpScript` is guaranteed to pass validation: identifiers
    /// are only inserted once the set has been grown to support them. Queries
    /// and removals sometimes use identifiers just beyond the supported range.
    pub fn arbitrary_with_config(
        u: &mut Unstructured<'_>,
        config: ArbitraryScriptConfig,
    ) -> Result<Self> {
        let max_supported = u.int_in_range(config.max_supported.clone())?.max(1);
        let mut builder = ScriptBuilder {
            u,
            config,
            max_supported,
            supported: 0,
            script: OpScript::new(),
        };

        for _ in 0..builder.u.int_in_range(builder.config.num_ops.clone())? {
            builder.gen_op()?;
        }

        Ok(builder.script)
    }
}

struct ScriptBuilder<'a, 'b> {
    /// Source of randomness.
    u: &'a mut Unstructured<'b>,

    /// Configuration options
    config: ArbitraryScriptConfig,

    /// Upper bound on growth chosen for this script.
    max_supported: usize,

    /// Number of identifiers supported after the operations so far.
    supported: usize,

    /// Script that is being built.
    script: OpScript,
}

impl ScriptBuilder<'_, '_> {
    /// Picks an identifier which may be absent or beyond the supported range.
    fn any_id(&mut self) -> Result<u32> {
        Ok(self.u.int_in_range(0..=self.supported + 1)? as u32)
    }

    /// Picks an identifier which can be inserted.
    fn supported_id(&mut self) -> Result<u32> {
        debug_assert!(self.supported != 0);
        Ok(self.u.int_in_range(0..=self.supported - 1)? as u32)
    }

    fn grow(&mut self) -> Result<Op> {
        // Growing to a smaller size is allowed and does nothing.
        let n = self.u.int_in_range(1..=self.max_supported)?;
        self.supported = self.supported.max(n);
        Ok(Op::Grow(n))
    }

    /// Appends a random operation to the script.
    fn gen_op(&mut self) -> Result<()> {
        let op = match self.u.int_in_range(0..=15)? {
            _ if self.supported == 0 => self.grow()?,
            0 => self.grow()?,
            1 => Op::Shrink,
            2 => {
                // Clearing throws away a lot of state, keep it rare.
                if self.u.ratio(1, 4)? {
                    Op::Clear
                } else {
                    Op::Get(self.any_id()?)
                }
            }
            kind @ 3..=9 => {
                let id = self.supported_id()?;
                let value = self.u.int_in_range(self.config.values.clone())?;
                if kind == 9 {
                    Op::Replace(id, value)
                } else {
                    Op::Insert(id, value)
                }
            }
            10..=12 => Op::Erase(self.any_id()?),
            _ => Op::Get(self.any_id()?),
        };
        self.script.push(op);
        Ok(())
    }
}
