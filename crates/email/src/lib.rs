mod mailer;

pub use self::mailer::SmtpMailer;
