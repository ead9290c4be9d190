pub(crate) mod parallax;
pub(crate) mod partition;
pub(crate) mod stagger;
