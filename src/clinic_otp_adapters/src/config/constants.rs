pub mod env {
    pub const ENV_PREFIX: &str = "OTP_SERVICE";
    pub const DATABASE_URL_ENV_VAR: &str = "DATABASE_URL";
    pub const BREVO_API_KEY_ENV_VAR: &str = "BREVO_API_KEY";
}

/// Optional settings file, resolved relative to the working directory.
pub const SETTINGS_FILE: &str = "config/settings";

pub mod cors {
    pub const ALLOWED_HEADERS: [&str; 4] =
        ["authorization", "x-client-info", "apikey", "content-type"];
}

pub mod prod {
    pub const APP_ADDRESS: &str = "0.0.0.0:3000";
    pub const MAX_DB_CONNECTIONS: u32 = 5;
    pub mod email_client {
        use std::time::Duration;

        pub const BASE_URL: &str = "https://api.brevo.com/";
        pub const SENDER_EMAIL: &str = "no-reply@clinicadmin.app";
        pub const SENDER_NAME: &str = "Clinic Admin";
        pub const TIMEOUT: Duration = std::time::Duration::from_secs(10);
    }
}

pub mod test {
    pub const APP_ADDRESS: &str = "127.0.0.1:0";
    pub mod email_client {
        use std::time::Duration;

        pub const SENDER_EMAIL: &str = "test@email.com";
        pub const SENDER_NAME: &str = "Clinic Admin Test";
        pub const TIMEOUT: Duration = std::time::Duration::from_millis(200);
    }
}
