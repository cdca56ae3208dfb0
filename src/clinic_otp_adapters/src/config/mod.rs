pub mod constants;
pub mod settings;

pub use constants::*;
pub use settings::{
    ApplicationSetting, EmailClientSetting, EmailDelivery, OtpServiceSetting, OtpSetting,
    PostgresSetting,
};
