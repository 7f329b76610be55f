pub(crate) mod rect;
pub(crate) mod text;
