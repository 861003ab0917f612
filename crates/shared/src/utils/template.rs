use askama::{Error, Template};
use tracing::{error, info};

use crate::model::Order;

/// Content of a transactional mail before it is rendered into the layout.
#[derive(Debug, Clone, PartialEq)]
pub struct EmailTemplateData {
    pub subject: String,
    pub title: String,
    pub greeting: String,
    pub lines: Vec<String>,
    pub button: String,
    pub link: Option<String>,
}

#[derive(Template, Debug)]
#[template(path = "email.html")]
pub struct EmailTemplate<'a> {
    pub title: &'a str,
    pub greeting: &'a str,
    pub lines: &'a [String],
    pub button: &'a str,
    pub link: Option<&'a str>,
}

impl<'a> From<&'a EmailTemplateData> for EmailTemplate<'a> {
    fn from(data: &'a EmailTemplateData) -> Self {
        EmailTemplate {
            title: &data.title,
            greeting: &data.greeting,
            lines: &data.lines,
            button: &data.button,
            link: data.link.as_deref(),
        }
    }
}

fn format_vnd(amount: i64) -> String {
    let digits = amount.abs().to_string();
    let mut grouped = String::new();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(c);
    }
    let sign = if amount < 0 { "-" } else { "" };
    format!("{sign}{grouped}₫")
}

impl EmailTemplateData {
    pub fn order_confirmation(order: &Order, client_url: &str) -> Self {
        let mut lines: Vec<String> = order
            .info_product
            .iter()
            .map(|line| {
                format!(
                    "{} x{}: {}",
                    line.name,
                    line.quantity,
                    format_vnd(line.total)
                )
            })
            .collect();

        lines.push(format!("Tạm tính: {}", format_vnd(order.sub_total)));
        if order.discount > 0 {
            lines.push(format!("Giảm giá: -{}", format_vnd(order.discount)));
        }
        lines.push(format!("Tổng cộng: {}", format_vnd(order.total)));

        Self {
            subject: format!("Xác nhận đơn hàng {}", order.order_code),
            title: format!("Đơn hàng {}", order.order_code),
            greeting: format!(
                "Xin chào {}, cảm ơn bạn đã đặt hàng. Đơn hàng của bạn đang được xử lý.",
                order.full_name
            ),
            lines,
            button: "Theo dõi đơn hàng".to_string(),
            link: Some(format!(
                "{}/order/{}",
                client_url.trim_end_matches('/'),
                order.order_code
            )),
        }
    }

    pub fn password_otp(full_name: &str, otp: &str, ttl_minutes: i64) -> Self {
        Self {
            subject: "Mã OTP khôi phục mật khẩu".to_string(),
            title: "Khôi phục mật khẩu".to_string(),
            greeting: format!("Xin chào {full_name},"),
            lines: vec![
                format!("Mã OTP của bạn là: {otp}"),
                format!("Mã có hiệu lực trong {ttl_minutes} phút."),
            ],
            button: String::new(),
            link: None,
        }
    }
}

pub fn render_email(data: &EmailTemplateData) -> Result<String, Error> {
    info!("📧 Rendering email template: {}", data.subject);

    let template = EmailTemplate::from(data);
    template.render().inspect_err(|e| {
        error!("❌ Failed to render email template: {e}");
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_thousands_in_vnd() {
        assert_eq!(format_vnd(1_250_000), "1.250.000₫");
        assert_eq!(format_vnd(500), "500₫");
    }

    #[test]
    fn otp_mail_renders_code() {
        let data = EmailTemplateData::password_otp("Lan", "042917", 5);
        let html = render_email(&data).unwrap();

        assert!(html.contains("042917"));
        assert!(!html.contains("<a href"));
    }
}
