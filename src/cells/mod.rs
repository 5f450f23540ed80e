pub(crate) mod collection;
pub(crate) mod grid;
pub(crate) mod layout;
pub(crate) mod style;
