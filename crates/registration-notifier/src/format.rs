//! Rendering of new-registration notifications.

use chrono::{DateTime, Utc};
use registration_store::Registration;

/// Badge color per pass type.
const BADGE_COLORS: &[(&str, &str)] = &[
    ("silver", "#9e9e9e"),
    ("gold", "#f9a825"),
    ("vip", "#7c4dff"),
];

/// Badge color for anything not in [`BADGE_COLORS`].
const DEFAULT_BADGE_COLOR: &str = "#444444";

/// A notification ready to send as `multipart/alternative`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationEmail {
    pub subject: String,
    pub text_body: String,
    pub html_body: String,
}

/// Render the plain-text and HTML summaries of a new registration.
pub fn render(registration: &Registration, brand: &str) -> RegistrationEmail {
    let pass_upper = registration.pass_type.as_str().to_uppercase();
    let registered = format_timestamp(&registration.created_at);

    let subject = format!(
        "🎉 New Registration: {} ({})",
        registration.full_name, pass_upper
    );

    let text_body = format!(
        "New Registration on {brand}\n\
         ---------------------------------------------\n\
         Name:        {name}\n\
         Email:       {email}\n\
         Pass Type:   {pass}\n\
         A/B Variant: {variant}\n\
         Registered:  {registered}\n",
        brand = brand,
        name = registration.full_name,
        email = registration.email,
        pass = pass_upper,
        variant = registration.variant,
        registered = registered,
    );

    let html_body = render_html(registration, brand, &registered);

    RegistrationEmail {
        subject,
        text_body,
        html_body,
    }
}

/// `DD Mon YYYY, HH:MM AM/PM`
pub fn format_timestamp(timestamp: &DateTime<Utc>) -> String {
    timestamp.format("%d %b %Y, %I:%M %p").to_string()
}

/// Color of the pass type badge.
pub fn badge_color(pass_type: &str) -> &'static str {
    BADGE_COLORS
        .iter()
        .find(|(name, _)| *name == pass_type)
        .map(|(_, color)| *color)
        .unwrap_or(DEFAULT_BADGE_COLOR)
}

fn render_html(registration: &Registration, brand: &str, registered: &str) -> String {
    let brand = escape_html(brand);
    let name = escape_html(&registration.full_name);
    let email = escape_html(&registration.email);
    let variant = escape_html(&registration.variant);
    let pass = registration.pass_type.as_str();
    let color = badge_color(pass);

    let row = |label: &str, value: &str| {
        format!(
            r#"<tr>
  <td style="padding:10px 0;border-bottom:1px solid #2a2a4a;color:#7070a0;font-size:13px;width:120px;">{label}</td>
  <td style="padding:10px 0;border-bottom:1px solid #2a2a4a;color:#e0e0f0;font-size:15px;">{value}</td>
</tr>
"#
        )
    };

    let mut rows = String::new();
    rows.push_str(&row("Name", &format!("<strong>{name}</strong>")));
    rows.push_str(&row(
        "Email",
        &format!(r#"<a href="mailto:{email}" style="color:#667eea;text-decoration:none;">{email}</a>"#),
    ));
    rows.push_str(&row(
        "Pass Type",
        &format!(
            r#"<span style="background:{color};color:#fff;padding:3px 12px;border-radius:20px;font-size:13px;font-weight:700;text-transform:uppercase;letter-spacing:1px;">{pass}</span>"#
        ),
    ));
    rows.push_str(&row("A/B Variant", &format!("Variant {variant}")));
    rows.push_str(&row("Registered", registered));

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head><meta charset="UTF-8"></head>
<body style="margin:0;padding:0;background:#0d0d0d;font-family:'Segoe UI',Arial,sans-serif;">
<table width="100%" cellpadding="0" cellspacing="0" style="background:#0d0d0d;padding:40px 0;">
<tr><td align="center">
<table width="560" cellpadding="0" cellspacing="0" style="background:#1a1a2e;border-radius:16px;overflow:hidden;border:1px solid #2a2a4a;">
<tr><td style="background:linear-gradient(135deg,#667eea,#764ba2);padding:32px 40px;text-align:center;">
  <h1 style="margin:0;color:#fff;font-size:22px;">{brand}</h1>
  <p style="margin:6px 0 0;color:rgba(255,255,255,0.8);font-size:14px;">New Registration Alert</p>
</td></tr>
<tr><td style="padding:36px 40px;">
  <p style="margin:0 0 24px;color:#a0a0c0;font-size:15px;">Someone just registered! Here are their details:</p>
  <table width="100%" cellpadding="0" cellspacing="0">
{rows}  </table>
</td></tr>
<tr><td style="background:#111128;padding:20px 40px;text-align:center;color:#4a4a6a;font-size:12px;">{brand} &mdash; Registration Notification</td></tr>
</table>
</td></tr>
</table>
</body>
</html>
"#
    )
}

fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use registration_store::PassType;

    fn registration(pass_type: PassType) -> Registration {
        Registration {
            id: 12,
            full_name: "Jane Doe".into(),
            email: "jane@example.com".into(),
            pass_type,
            variant: "B".into(),
            created_at: "2025-03-04T17:05:00Z".parse().unwrap(),
        }
    }

    #[test]
    fn test_format_timestamp() {
        let morning: DateTime<Utc> = "2025-03-04T09:07:00Z".parse().unwrap();
        assert_eq!(format_timestamp(&morning), "04 Mar 2025, 09:07 AM");

        let evening: DateTime<Utc> = "2025-12-25T17:30:59Z".parse().unwrap();
        assert_eq!(format_timestamp(&evening), "25 Dec 2025, 05:30 PM");

        let midnight: DateTime<Utc> = "2026-01-01T00:00:00Z".parse().unwrap();
        assert_eq!(format_timestamp(&midnight), "01 Jan 2026, 12:00 AM");
    }

    #[test]
    fn test_badge_colors() {
        assert_eq!(badge_color("silver"), "#9e9e9e");
        assert_eq!(badge_color("gold"), "#f9a825");
        assert_eq!(badge_color("vip"), "#7c4dff");
        assert_eq!(badge_color("platinum"), DEFAULT_BADGE_COLOR);
        assert_eq!(badge_color(""), DEFAULT_BADGE_COLOR);
    }

    #[test]
    fn test_every_pass_type_has_a_color() {
        for pass_type in PassType::ALL {
            assert_ne!(badge_color(pass_type.as_str()), DEFAULT_BADGE_COLOR);
        }
    }

    #[test]
    fn test_subject() {
        let email = render(&registration(PassType::Vip), "Ad Makerrrs");
        assert_eq!(email.subject, "🎉 New Registration: Jane Doe (VIP)");
    }

    #[test]
    fn test_text_body_contents() {
        let email = render(&registration(PassType::Gold), "Ad Makerrrs");

        assert!(email.text_body.starts_with("New Registration on Ad Makerrrs\n"));
        assert!(email.text_body.contains("Name:        Jane Doe\n"));
        assert!(email.text_body.contains("Email:       jane@example.com\n"));
        assert!(email.text_body.contains("Pass Type:   GOLD\n"));
        assert!(email.text_body.contains("A/B Variant: B\n"));
        assert!(email.text_body.contains("Registered:  04 Mar 2025, 05:05 PM\n"));
    }

    #[test]
    fn test_html_body_contents() {
        let email = render(&registration(PassType::Silver), "Ad Makerrrs");

        assert!(email.html_body.contains("Jane Doe"));
        assert!(email.html_body.contains("mailto:jane@example.com"));
        assert!(email.html_body.contains("Variant B"));
        assert!(email.html_body.contains("04 Mar 2025, 05:05 PM"));
        assert!(email.html_body.contains("background:#9e9e9e"));
        assert!(email.html_body.contains("border-radius:20px"));
        assert!(email.html_body.contains(">silver</span>"));
    }

    #[test]
    fn test_html_escapes_user_input() {
        let mut reg = registration(PassType::Gold);
        reg.full_name = "<script>alert('x')</script>".into();
        reg.variant = "A&B".into();

        let email = render(&reg, "Ad Makerrrs");
        assert!(!email.html_body.contains("<script>"));
        assert!(email.html_body.contains("&lt;script&gt;alert(&#39;x&#39;)&lt;/script&gt;"));
        assert!(email.html_body.contains("Variant A&amp;B"));

        // Plain text is sent as-is
        assert!(email.text_body.contains("<script>"));
    }
}
