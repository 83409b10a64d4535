pub(crate) mod hover;
pub(crate) mod parse;
