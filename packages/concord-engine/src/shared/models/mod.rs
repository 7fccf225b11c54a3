mod ocn;

pub use ocn::{format_ocn_list, Ocn};
