// Domain layer: catalog data, the eligibility rules, the form reducer and the
// storage ports. Nothing here performs I/O.

pub mod catalog;
pub mod eligibility;
pub mod form;
pub mod model;
pub mod palette;
pub mod ports;
