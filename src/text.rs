pub(crate) mod fonts;
pub(crate) mod tiers;
pub(crate) mod wrap;
