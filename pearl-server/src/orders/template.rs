//! Completion email rendering
//!
//! Builds the HTML body for the order-completed notification: branded
//! header, one download button per deliverable, contact footer.
//! Branding (store name, support contacts) comes from [`Config`].

use crate::core::Config;

/// A resolved download link (label + absolute URL)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadLink {
    pub label: String,
    pub url: String,
}

/// Resolve a deliverable URL against the public base URL
///
/// Absolute URLs pass through untouched; anything else is treated as a
/// path on the public site.
pub fn resolve_url(public_base_url: &str, url: &str) -> String {
    if url.starts_with("http://") || url.starts_with("https://") {
        url.to_string()
    } else {
        format!(
            "{}/{}",
            public_base_url.trim_end_matches('/'),
            url.trim_start_matches('/')
        )
    }
}

/// Render the order-completed notification HTML
pub fn render_order_completed(config: &Config, order_number: &str, links: &[DownloadLink]) -> String {
    let store = &config.store_name;

    let download_buttons: String = links
        .iter()
        .map(|link| {
            format!(
                r#"<a href="{url}"
                  style="color: #0C0B0E;
                         font-size: 16px;
                         font-weight: 500;
                         padding: 16px 24px;
                         border-radius: 16px;
                         background: #FFF;
                         display: block;
                         text-decoration: none;
                         text-align: center;
                         margin-bottom: 10px;">
                  Download {label}
                </a>"#,
                url = link.url,
                label = link.label,
            )
        })
        .collect();

    let mut footer_cells = String::new();
    if let Some(phone) = &config.support_phone {
        footer_cells.push_str(&format!(
            r#"<td style="width: 100px; padding: 0 8px;">
                 <p style="color: #808080; font-size: 12px;">Phone</p>
                 <p style="margin: 0;"><a href="tel:{phone}" style="color: #FFF; font-size: 12px;">{phone}</a></p>
               </td>"#
        ));
    }
    if let Some(email) = &config.support_email {
        footer_cells.push_str(&format!(
            r#"<td style="width: 100px; padding: 0 8px;">
                 <p style="color: #808080; font-size: 12px;">Email</p>
                 <p style="margin: 0;"><a href="mailto:{email}" style="color: #FFF; font-size: 12px;">{email}</a></p>
               </td>"#
        ));
    }

    format!(
        r#"<table width="640"
          style="border-collapse: collapse; margin: 0 auto; font-family: Roboto, sans-serif; border: none; background: #141316;">
          <tbody style="border: none;">
            <tr style="border: none;">
              <td style="padding: 40px 40px 0 40px; background: #141316; border: none;">
                <h2 style="color: #FFF; font-size: 24px; font-weight: 700; margin-bottom: 40px;">
                  Your {store} Order is Ready! - #{order_number}
                </h2>
                <p style="color: #808080; font-size: 16px; font-weight: 400;">
                  Dear customer,
                </p>
                <p style="color: #808080; font-size: 16px; font-weight: 400;">
                  Thank you for your purchase from {store}! Your order has been successfully processed, and your files are now ready for download.
                </p>
                <h3 style="color: #FFF; font-size: 16px; font-weight: 700; margin: 40px 0 20px 0;">
                  Download Your Files Here:
                </h3>
                {download_buttons}
              </td>
            </tr>
            <tr style="border: none;">
              <td style="padding: 40px; background: #141316; border: none;">
                <p style="color: #808080; font-size: 16px; font-weight: 400;">
                  If you have trouble accessing your files or need further assistance, don't hesitate to contact us - we're here to help!
                  <br><br>
                  We appreciate your trust in {store} and look forward to working with you again.
                </p>
                <h3 style="color: #FFF; font-size: 16px; font-weight: 700; margin: 40px 0 20px 0;">
                  Best regards,<br>
                  The {store} Team
                </h3>
              </td>
            </tr>
          </tbody>
          <tfoot style="background-color: #0B0B0E;">
            <tr>
              <td style="padding: 50px 40px;">
                <table>
                  <tr>
                    {footer_cells}
                  </tr>
                </table>
              </td>
            </tr>
          </tfoot>
        </table>"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> Config {
        let mut config = Config::with_overrides("./test-data", 0);
        config.store_name = "Pearl".to_string();
        config.public_base_url = "https://pearl.example.com".to_string();
        config.support_email = Some("info@pearl.example.com".to_string());
        config.support_phone = None;
        config
    }

    #[test]
    fn absolute_urls_pass_through() {
        assert_eq!(
            resolve_url("https://pearl.example.com", "https://cdn.example.com/a.zip"),
            "https://cdn.example.com/a.zip"
        );
    }

    #[test]
    fn relative_urls_get_base_prefix() {
        assert_eq!(
            resolve_url("https://pearl.example.com/", "/media/a.zip"),
            "https://pearl.example.com/media/a.zip"
        );
        assert_eq!(
            resolve_url("https://pearl.example.com", "media/a.zip"),
            "https://pearl.example.com/media/a.zip"
        );
    }

    #[test]
    fn renders_one_button_per_link() {
        let config = test_config();
        let links = vec![
            DownloadLink {
                label: "Kitchen Pack".to_string(),
                url: "https://cdn.example.com/kitchen.zip".to_string(),
            },
            DownloadLink {
                label: "File".to_string(),
                url: "https://cdn.example.com/manual.pdf".to_string(),
            },
        ];

        let html = render_order_completed(&config, "ORD-101", &links);

        // One download button (unique button text color) per link
        assert_eq!(html.matches("#0C0B0E").count(), 2);
        assert!(html.contains("Download Kitchen Pack"));
        assert!(html.contains("Download File"));
        assert!(html.contains("#ORD-101"));
        assert!(html.contains("https://cdn.example.com/kitchen.zip"));
        assert!(html.contains("info@pearl.example.com"));
    }
}
