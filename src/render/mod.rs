pub(crate) mod composite;
pub(crate) mod cpu;
pub(crate) mod token;
