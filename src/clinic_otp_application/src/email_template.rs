use askama::Template;

pub const VERIFICATION_EMAIL_SUBJECT: &str = "Your Verification Code";

/// HTML body of the verification email.
#[derive(Template)]
#[template(
    ext = "html",
    source = r##"<!DOCTYPE html>
<html>
  <body style="font-family: Arial, sans-serif; color: #1f2933;">
    <h2>Verify your email address</h2>
    <p>Hello {{ name }},</p>
    <p>Use the following code to finish verifying your email address:</p>
    <p style="font-size: 28px; font-weight: bold; letter-spacing: 6px;">{{ code }}</p>
    <p>This code expires in {{ ttl_minutes }} minutes.</p>
    <p>If you did not request this code, you can safely ignore this email.</p>
  </body>
</html>
"##
)]
pub struct VerificationEmail<'a> {
    pub name: &'a str,
    pub code: &'a str,
    pub ttl_minutes: i64,
}
