pub(crate) mod model;
pub(crate) mod node;
pub(crate) mod ops;
pub(crate) mod script;
pub(crate) mod stage;
