#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub use bw_beans as beans;
pub use bw_reflect as reflect;
pub use bw_utils as utils;
