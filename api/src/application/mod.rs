pub mod access;
pub mod dto;
pub mod ordering;
pub mod ports;
pub mod use_cases;

#[cfg(test)]
pub(crate) mod test_support;
