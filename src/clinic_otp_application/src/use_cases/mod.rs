pub mod issue_otp;
pub mod verify_otp;

#[cfg(test)]
pub(crate) mod test_support;
